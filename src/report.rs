use std::fs;
use std::path::Path;

use crate::error::{Result, StatsError};
use crate::match_loader::EARLY_CHECKPOINT_MINUTES;
use crate::metrics::*;
use crate::util::round_to;

pub fn output_report(report: &RunReport) {
    println!("Matches considered: {}", report.matches_considered.len());
    for m in &report.matches_considered {
        println!("  {} ({})", m.filename, m.date.format("%d/%m/%Y"));
    }
    println!("Matches parsed: {}", report.matches_parsed);

    let t = &report.team;
    println!();
    println!("Team averages");
    println!("| Win% {0:5.1} | FB% {1:5.1} | Kills {2:5.2} | Deaths {3:5.2} |",
        t.win_rate, t.first_blood_rate, t.avg_kills, t.avg_deaths);
    println!("| Drakes {0:4.2} | Barons {1:4.2} | Heralds {2:4.2} | Towers {3:5.2} | Grubs {4:4.2} |",
        t.avg_dragons, t.avg_barons, t.avg_heralds, t.avg_towers, t.avg_grubs);
    println!("| Vision {0:6.2} | Control wards {1:5.2} | Wards killed {2:5.2} |",
        t.avg_vision_score, t.avg_control_wards, t.avg_wards_killed);
    println!("| @{0}: CS {1:+7.1} | Gold {2:+8.1} | XP {3:+8.1} |",
        EARLY_CHECKPOINT_MINUTES, t.avg_cs_diff, t.avg_gold_diff, t.avg_xp_diff);

    println!();
    println!("Players");
    for p in &report.players {
        println!("| {0:15} | {1:3} games | Win% {2:5.1} | {3:4.1} / {4:4.1} / {5:4.1} | KP {6:5.1}% | Gold eff. {7:5.1}% |",
            p.display_name,
            p.games,
            p.win_rate,
            p.avg_kills,
            p.avg_deaths,
            p.avg_assists,
            p.kill_participation,
            p.gold_efficiency,
        );
        let radar: Vec<String> = p.radar.iter().map(|r| format!("{:?} {:.0}", r.metric, r.score)).collect();
        println!("|                 | radar: {}", radar.join(", "));
    }

    for (title, rows) in [("Gold per role", &report.gold_by_role), ("Damage per role", &report.damage_by_role)] {
        println!();
        println!("{title}");
        for r in rows {
            println!("| {0:8} | {1:>9.0} | {2:6.2}% |", r.label, r.per_match, r.share);
        }
    }

    println!();
    println!("Champions");
    for c in &report.champions {
        println!("| {0:15} | {1:15} | {2:3} games | Win% {3:5.1} | Picks {4:5.1}% |",
            c.display_name, c.champion, c.games, c.win_rate, c.pick_share);
    }

    println!();
    println!("Compositions");
    for c in &report.compositions {
        let picks: Vec<String> = c.picks.iter().map(|(role, champ)| format!("{}: {}", role.as_str(), champ)).collect();
        println!("| {0:3} games | Win% {1:5.1} | {2}", c.games, c.win_rate, picks.join(", "));
    }

    if !report.notices.is_empty() {
        println!();
        println!("Notices");
        for n in &report.notices {
            println!("  {n}");
        }
    }
}

pub fn export_json(report: &RunReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report).map_err(|e| StatsError::json(e, path))?;
    fs::write(path, json).map_err(|e| StatsError::io(e, path))
}

// One CSV per table, values rounded the way the console shows them
pub fn export_csv(report: &RunReport, dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| StatsError::io(e, dir))?;

    let t = &report.team;
    let mut w = csv::Writer::from_path(dir.join("team.csv"))?;
    w.write_record(["matches_parsed", "win_rate", "first_blood_rate", "kills", "deaths", "dragons", "barons",
        "heralds", "towers", "grubs", "vision_score", "control_wards", "wards_killed", "cs_diff", "gold_diff", "xp_diff"])?;
    let values = [t.win_rate, t.first_blood_rate, t.avg_kills, t.avg_deaths, t.avg_dragons, t.avg_barons,
        t.avg_heralds, t.avg_towers, t.avg_grubs, t.avg_vision_score, t.avg_control_wards, t.avg_wards_killed,
        t.avg_cs_diff, t.avg_gold_diff, t.avg_xp_diff];
    let mut record = vec![report.matches_parsed.to_string()];
    record.extend(values.iter().map(|v| round_to(*v, 2).to_string()));
    w.write_record(&record)?;
    w.flush().map_err(|e| StatsError::io(e, dir))?;

    let mut w = csv::Writer::from_path(dir.join("players.csv"))?;
    w.write_record(["player", "games", "win_rate", "kills", "deaths", "assists", "kda", "kill_participation",
        "gold_efficiency", "damage_per_minute", "vision_per_minute"])?;
    for p in &report.players {
        let mut record = vec![p.display_name.clone(), p.games.to_string()];
        record.extend([p.win_rate, p.avg_kills, p.avg_deaths, p.avg_assists, p.kda, p.kill_participation,
            p.gold_efficiency, p.damage_per_minute, p.vision_per_minute].iter().map(|v| round_to(*v, 1).to_string()));
        w.write_record(&record)?;
    }
    w.flush().map_err(|e| StatsError::io(e, dir))?;

    for (name, rows) in [("gold_by_role.csv", &report.gold_by_role), ("damage_by_role.csv", &report.damage_by_role)] {
        let mut w = csv::Writer::from_path(dir.join(name))?;
        w.write_record(["role", "per_match", "share", "occurrences"])?;
        for r in rows {
            w.write_record([
                r.label.clone(),
                round_to(r.per_match, 0).to_string(),
                round_to(r.share, 2).to_string(),
                r.occurrences.to_string(),
            ])?;
        }
        w.flush().map_err(|e| StatsError::io(e, dir))?;
    }

    let mut w = csv::Writer::from_path(dir.join("champions.csv"))?;
    w.write_record(["player", "champion", "games", "wins", "win_rate", "pick_share"])?;
    for c in &report.champions {
        w.write_record([
            c.display_name.clone(),
            c.champion.clone(),
            c.games.to_string(),
            c.wins.to_string(),
            round_to(c.win_rate, 1).to_string(),
            round_to(c.pick_share, 1).to_string(),
        ])?;
    }
    w.flush().map_err(|e| StatsError::io(e, dir))?;

    let mut w = csv::Writer::from_path(dir.join("compositions.csv"))?;
    w.write_record(["TOP", "JUNGLE", "MIDDLE", "BOTTOM", "UTILITY", "games", "wins", "win_rate"])?;
    for c in &report.compositions {
        let mut record: Vec<String> = c.picks.iter().map(|(_, champ)| champ.clone()).collect();
        record.extend([c.games.to_string(), c.wins.to_string(), round_to(c.win_rate, 1).to_string()]);
        w.write_record(&record)?;
    }
    w.flush().map_err(|e| StatsError::io(e, dir))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis_context::Role;

    fn sample_report() -> RunReport {
        RunReport {
            matches_considered: Vec::new(),
            matches_parsed: 3,
            team: TeamReport {
                win_rate: 66.666, first_blood_rate: 33.333, avg_kills: 18.0, avg_deaths: 12.0,
                avg_dragons: 2.0, avg_barons: 0.666, avg_heralds: 1.0, avg_towers: 6.0, avg_grubs: 3.0,
                avg_vision_score: 140.0, avg_control_wards: 12.0, avg_wards_killed: 9.0,
                avg_cs_diff: -4.5, avg_gold_diff: 310.0, avg_xp_diff: 120.0,
            },
            players: Vec::new(),
            gold_by_role: share_table(&[("TOP".to_string(), 300.0, 3), ("JUNGLE".to_string(), 100.0, 3)]),
            damage_by_role: share_table(&[("TOP".to_string(), 0.0, 0)]),
            champions: Vec::new(),
            compositions: vec![CompositionRow {
                picks: Role::ALL.iter().map(|r| (*r, format!("{}-pick", r.as_str()))).collect(),
                games: 3,
                wins: 2,
                win_rate: 200.0 / 3.0,
            }],
            notices: Vec::new(),
        }
    }

    #[test]
    fn csv_export_writes_every_table() {
        let dir = tempfile::tempdir().unwrap();
        export_csv(&sample_report(), dir.path()).unwrap();

        for name in ["team.csv", "players.csv", "gold_by_role.csv", "damage_by_role.csv", "champions.csv", "compositions.csv"] {
            assert!(dir.path().join(name).exists(), "{name} missing");
        }

        let gold = fs::read_to_string(dir.path().join("gold_by_role.csv")).unwrap();
        assert_eq!(gold.lines().collect::<Vec<_>>(), vec![
            "role,per_match,share,occurrences",
            "TOP,300,75,3",
            "JUNGLE,100,25,3",
            "Total,400,100,6",
        ]);

        let drafts = fs::read_to_string(dir.path().join("compositions.csv")).unwrap();
        assert_eq!(drafts.lines().nth(1), Some("TOP-pick,JUNGLE-pick,MIDDLE-pick,BOTTOM-pick,UTILITY-pick,3,2,66.7"));
    }

    #[test]
    fn json_export_round_trips_through_serde_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        export_json(&sample_report(), &path).unwrap();

        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["matches_parsed"], 3);
        assert_eq!(value["compositions"][0]["games"], 3);
        assert_eq!(value["gold_by_role"][2]["label"], "Total");
    }
}

use serde::Serialize;

use crate::aggregation::{MatchAggregator, PlayerAggregate};
use crate::analysis_context::{AnalysisContext, RadarAxis, RadarMetric, Role};
use crate::catalog::MatchFile;
use crate::notice::Notice;
use crate::util::*;

pub const TOTAL_ROW_LABEL: &str = "Total";

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RunReport {
    pub matches_considered: Vec<MatchFile>,
    pub matches_parsed: u32,
    pub team: TeamReport,
    pub players: Vec<PlayerReport>,
    pub gold_by_role: Vec<RoleShareRow>,
    pub damage_by_role: Vec<RoleShareRow>,
    pub champions: Vec<ChampionRow>,
    pub compositions: Vec<CompositionRow>,
    pub notices: Vec<Notice>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TeamReport {
    pub win_rate: f64,
    pub first_blood_rate: f64,
    pub avg_kills: f64,
    pub avg_deaths: f64,
    pub avg_dragons: f64,
    pub avg_barons: f64,
    pub avg_heralds: f64,
    pub avg_towers: f64,
    pub avg_grubs: f64,
    pub avg_vision_score: f64,
    pub avg_control_wards: f64,
    pub avg_wards_killed: f64,
    pub avg_cs_diff: f64,
    pub avg_gold_diff: f64,
    pub avg_xp_diff: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PlayerReport {
    pub name: String,
    pub display_name: String,
    pub games: u32,
    pub win_rate: f64,
    pub avg_kills: f64,
    pub avg_deaths: f64,
    pub avg_assists: f64,
    pub avg_gold: f64,
    pub avg_damage: f64,
    pub kda: f64,
    pub kill_participation: f64,
    pub gold_efficiency: f64,
    pub damage_per_minute: f64,
    pub vision_per_minute: f64,
    pub radar: Vec<RadarScore>,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct RadarScore {
    pub metric: RadarMetric,
    pub raw: f64,
    pub score: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RoleShareRow {
    pub label: String,
    pub per_match: f64,
    pub share: f64,
    pub occurrences: u32,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ChampionRow {
    pub player: String,
    pub display_name: String,
    pub champion: String,
    pub games: u32,
    pub wins: u32,
    pub win_rate: f64,
    pub pick_share: f64,   // Of this player's games
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CompositionRow {
    pub picks: Vec<(Role, String)>,   // Lane order
    pub games: u32,
    pub wins: u32,
    pub win_rate: f64,
}

pub fn gold_efficiency(avg_damage: f64, avg_gold: f64) -> f64 {
    if avg_gold > 0.0 { avg_damage / avg_gold * 100.0 } else { 0.0 }
}

pub fn radar_score(axis: &RadarAxis, raw: f64) -> f64 {
    remap_value_clamped(raw, axis.min, axis.max, 0.0, 100.0)
}

// Per-minute rate over a playing time in seconds
pub fn per_minute(total: f64, seconds: f64) -> f64 {
    if seconds > 0.0 { total / (seconds / 60.0) } else { 0.0 }
}

pub fn kda(kills: u64, deaths: u64, assists: u64) -> f64 {
    (kills as f64 + assists as f64) / deaths.max(1) as f64
}

// Each value's share of their sum, closed by a totals row
pub fn share_table(rows: &[(String, f64, u32)]) -> Vec<RoleShareRow> {
    let values: Vec<f64> = rows.iter().map(|(_, v, _)| *v).collect();
    let total = sum_vector(&values);

    let mut table: Vec<RoleShareRow> = rows
        .iter()
        .map(|(label, value, occurrences)| RoleShareRow {
            label: label.clone(),
            per_match: *value,
            share: percentage(*value, total),
            occurrences: *occurrences,
        })
        .collect();

    table.push(RoleShareRow {
        label: TOTAL_ROW_LABEL.to_string(),
        per_match: total,
        share: if total > 0.0 { 100.0 } else { 0.0 },
        occurrences: rows.iter().map(|(_, _, n)| n).sum(),
    });
    table
}

/*
    Turns the run totals into report values. Team and role figures are per parsed match, player
    figures are per game that player actually played. The caller makes sure at least one match was
    parsed; without one there is no report at all.
*/
pub fn derive_report(aggregator: MatchAggregator<'_>, matches_considered: Vec<MatchFile>) -> RunReport {
    debug_assert!(aggregator.matches_parsed > 0);

    let context = aggregator.context();
    let parsed = aggregator.matches_parsed;
    let per_match = |total: f64| mean(total, parsed);

    let t = &aggregator.team;
    let team = TeamReport {
        win_rate: percentage(t.wins as f64, parsed as f64),
        first_blood_rate: percentage(t.first_bloods as f64, parsed as f64),
        avg_kills: per_match(t.kills as f64),
        avg_deaths: per_match(t.deaths as f64),
        avg_dragons: per_match(t.dragons as f64),
        avg_barons: per_match(t.barons as f64),
        avg_heralds: per_match(t.heralds as f64),
        avg_towers: per_match(t.towers as f64),
        avg_grubs: per_match(t.grubs as f64),
        avg_vision_score: per_match(t.vision_score as f64),
        avg_control_wards: per_match(t.control_wards as f64),
        avg_wards_killed: per_match(t.wards_killed as f64),
        avg_cs_diff: per_match(t.cs_diff),
        avg_gold_diff: per_match(t.gold_diff),
        avg_xp_diff: per_match(t.xp_diff),
    };

    let players: Vec<PlayerReport> = aggregator.players
        .iter()
        .filter(|p| p.games > 0)
        .map(|p| player_report(p, context))
        .collect();

    let mut gold_rows = Vec::new();
    let mut damage_rows = Vec::new();
    for (role, r) in &aggregator.roles {
        gold_rows.push((role.as_str().to_string(), per_match(r.gold as f64), r.occurrences));
        damage_rows.push((role.as_str().to_string(), per_match(r.damage as f64), r.occurrences));
    }
    let gold_by_role = share_table(&gold_rows);
    let damage_by_role = share_table(&damage_rows);

    let mut champions = Vec::new();
    for p in aggregator.players.iter().filter(|p| p.games > 0) {
        let played = aggregator.champions.games_for(&p.name);
        for (champion, record) in aggregator.champions.ranked_for(&p.name) {
            champions.push(ChampionRow {
                player: p.name.clone(),
                display_name: context.display_name(&p.name).to_string(),
                champion,
                games: record.games,
                wins: record.wins,
                win_rate: record.win_rate(),
                pick_share: percentage(record.games as f64, played as f64),
            });
        }
    }

    let compositions = aggregator.compositions
        .ranked()
        .into_iter()
        .map(|c| CompositionRow {
            picks: c.key.picks().into_iter().map(|(role, champion)| (role, champion.to_string())).collect(),
            games: c.games,
            wins: c.wins,
            win_rate: c.win_rate,
        })
        .collect();

    RunReport {
        matches_considered,
        matches_parsed: parsed,
        team,
        players,
        gold_by_role,
        damage_by_role,
        champions,
        compositions,
        notices: aggregator.notices.clone(),
    }
}

fn player_report(p: &PlayerAggregate, context: &AnalysisContext) -> PlayerReport {
    let avg_gold = mean(p.gold as f64, p.games);
    let avg_damage = mean(p.damage as f64, p.games);

    let kill_participation = p.average_kill_participation();
    let gold_efficiency = gold_efficiency(avg_damage, avg_gold);
    let kda = kda(p.kills, p.deaths, p.assists);
    let damage_per_minute = per_minute(p.damage as f64, p.time_played_secs);
    let vision_per_minute = per_minute(p.vision_score as f64, p.time_played_secs);

    let radar = context.radar_axes
        .iter()
        .map(|axis| {
            let raw = match axis.metric {
                RadarMetric::KillParticipation => kill_participation,
                RadarMetric::GoldEfficiency => gold_efficiency,
                RadarMetric::Kda => kda,
                RadarMetric::DamagePerMinute => damage_per_minute,
                RadarMetric::VisionPerMinute => vision_per_minute,
            };
            RadarScore { metric: axis.metric, raw, score: radar_score(axis, raw) }
        })
        .collect();

    PlayerReport {
        name: p.name.clone(),
        display_name: context.display_name(&p.name).to_string(),
        games: p.games,
        win_rate: percentage(p.wins as f64, p.games as f64),
        avg_kills: mean(p.kills as f64, p.games),
        avg_deaths: mean(p.deaths as f64, p.games),
        avg_assists: mean(p.assists as f64, p.games),
        avg_gold,
        avg_damage,
        kda,
        kill_participation,
        gold_efficiency,
        damage_per_minute,
        vision_per_minute,
        radar,
    }
}

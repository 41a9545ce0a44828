use std::collections::BTreeMap;

use log::{debug, info, warn};
use serde::Serialize;

use crate::analysis_context::{AnalysisContext, Role};
use crate::champion_stats::ChampionStatsTracker;
use crate::composition::{CompositionAnalyzer, CompositionKey};
use crate::match_loader::{LoadedMatch, Participant};
use crate::notice::Notice;
use crate::team_resolver::resolve_side;
use crate::util::mean;

// Sums for one side. Built per match, then added into the run total with absorb()
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct TeamAggregate {
    pub kills: u64,
    pub deaths: u64,

    pub dragons: u64,
    pub barons: u64,
    pub heralds: u64,
    pub towers: u64,
    pub grubs: u64,

    pub vision_score: u64,
    pub control_wards: u64,
    pub wards_killed: u64,

    pub cs_diff: f64,
    pub gold_diff: f64,
    pub xp_diff: f64,

    pub wins: u32,
    pub first_bloods: u32,
}

impl TeamAggregate {
    fn add_participant(&mut self, p: &Participant) {
        self.kills   = self.kills.saturating_add(p.kills);
        self.deaths  = self.deaths.saturating_add(p.deaths);
        self.dragons = self.dragons.saturating_add(p.dragons);
        self.barons  = self.barons.saturating_add(p.barons);
        self.heralds = self.heralds.saturating_add(p.heralds);
        self.towers  = self.towers.saturating_add(p.towers);
        self.grubs   = self.grubs.saturating_add(p.grubs);

        self.vision_score  = self.vision_score.saturating_add(p.vision_score);
        self.control_wards = self.control_wards.saturating_add(p.control_wards);
        self.wards_killed  = self.wards_killed.saturating_add(p.wards_killed);

        self.cs_diff   += p.cs_diff;
        self.gold_diff += p.gold_diff;
        self.xp_diff   += p.xp_diff;
    }

    pub fn absorb(&mut self, other: &TeamAggregate) {
        self.kills   = self.kills.saturating_add(other.kills);
        self.deaths  = self.deaths.saturating_add(other.deaths);
        self.dragons = self.dragons.saturating_add(other.dragons);
        self.barons  = self.barons.saturating_add(other.barons);
        self.heralds = self.heralds.saturating_add(other.heralds);
        self.towers  = self.towers.saturating_add(other.towers);
        self.grubs   = self.grubs.saturating_add(other.grubs);

        self.vision_score  = self.vision_score.saturating_add(other.vision_score);
        self.control_wards = self.control_wards.saturating_add(other.control_wards);
        self.wards_killed  = self.wards_killed.saturating_add(other.wards_killed);

        self.cs_diff   += other.cs_diff;
        self.gold_diff += other.gold_diff;
        self.xp_diff   += other.xp_diff;

        self.wins         += other.wins;
        self.first_bloods += other.first_bloods;
    }
}

// One tracked participant's line in one match
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerMatchRow {
    pub roster_index: usize,
    pub name: String,
    pub champion: String,
    pub role: Option<Role>,

    pub kills: u64,
    pub deaths: u64,
    pub assists: u64,
    pub gold: u64,
    pub damage: u64,
    pub vision_score: u64,
    pub time_played_secs: f64,

    pub kill_participation: f64,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct PlayerAggregate {
    pub name: String,
    pub games: u32,
    pub wins: u32,

    pub kills: u64,
    pub deaths: u64,
    pub assists: u64,
    pub gold: u64,
    pub damage: u64,
    pub vision_score: u64,
    pub time_played_secs: f64,

    // Sum of the per-match percentages, divided by games when reported
    pub kill_participation_sum: f64,
}

impl PlayerAggregate {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string(), ..Self::default() }
    }

    fn absorb(&mut self, row: &PlayerMatchRow, won: bool) {
        self.games += 1;
        if won { self.wins += 1; }

        self.kills   = self.kills.saturating_add(row.kills);
        self.deaths  = self.deaths.saturating_add(row.deaths);
        self.assists = self.assists.saturating_add(row.assists);
        self.gold    = self.gold.saturating_add(row.gold);
        self.damage  = self.damage.saturating_add(row.damage);
        self.vision_score     = self.vision_score.saturating_add(row.vision_score);
        self.time_played_secs += row.time_played_secs;

        self.kill_participation_sum += row.kill_participation;
    }

    pub fn average_kill_participation(&self) -> f64 {
        mean(self.kill_participation_sum, self.games)
    }
}

#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleAggregate {
    pub gold: u64,
    pub damage: u64,
    pub occurrences: u32,
}

// (kills + assists) / team kills of that same match, as a percentage
pub fn kill_participation(kills: u64, assists: u64, team_kills: u64) -> f64 {
    if team_kills == 0 {
        0.0
    } else {
        (kills as f64 + assists as f64) / team_kills as f64 * 100.0
    }
}

// Everything one match adds to a run. Computed in full before anything is folded
#[derive(Debug, Clone)]
pub struct MatchContribution {
    pub file: String,
    pub side: String,
    pub won: bool,
    pub team: TeamAggregate,
    pub players: Vec<PlayerMatchRow>,
    pub composition: CompositionKey,
    pub notices: Vec<Notice>,
}

// Err carries the reason the match is left out of the run entirely
pub fn contribute(game: &LoadedMatch, context: &AnalysisContext) -> Result<MatchContribution, Notice> {
    let file = game.file.filename.clone();

    let Some(resolution) = resolve_side(&game.participants, context) else {
        return Err(Notice::NoRosterPlayers { file });
    };

    let mut notices = Vec::new();
    if resolution.is_ambiguous() {
        notices.push(Notice::AmbiguousSide {
            file: file.clone(),
            chosen: resolution.side.clone(),
            tied_with: resolution.tied_with.clone(),
        });
    }

    let side: Vec<&Participant> = game.participants
        .iter()
        .filter(|p| p.side.as_deref() == Some(resolution.side.as_str()))
        .collect();

    // Team pass, teammates outside the roster included
    let mut team = TeamAggregate::default();
    for p in &side {
        team.add_participant(p);
    }
    let won = side.iter().any(|p| p.win);
    team.wins = won as u32;
    team.first_bloods = side.iter().any(|p| p.first_blood) as u32;

    // Player pass, roster only. A duplicated identity counts once per row
    let mut players = Vec::new();
    for p in &side {
        let Some(roster_index) = context.roster_index(&p.name) else { continue; };

        if p.champion_missing {
            notices.push(Notice::UnknownChampion { file: file.clone(), player: p.name.clone() });
        }

        let role = context.normalize_role(&p.raw_role);
        if role.is_none() {
            notices.push(Notice::UnrecognizedRole {
                file: file.clone(),
                player: p.name.clone(),
                role: p.raw_role.clone(),
            });
        }

        players.push(PlayerMatchRow {
            roster_index,
            name: p.name.clone(),
            champion: p.champion.clone(),
            role,
            kills: p.kills,
            deaths: p.deaths,
            assists: p.assists,
            gold: p.gold,
            damage: p.damage,
            vision_score: p.vision_score,
            time_played_secs: p.time_played_secs,
            kill_participation: kill_participation(p.kills, p.assists, team.kills),
        });
    }

    let composition = CompositionKey::from_side(side.iter().copied(), context);

    Ok(MatchContribution {
        file,
        side: resolution.side,
        won,
        team,
        players,
        composition,
        notices,
    })
}

/*
    Run-scoped accumulator. Each match is turned into a MatchContribution first and folded in one
    go afterwards, so matches_parsed always agrees with what the totals contain.
*/
#[derive(Debug)]
pub struct MatchAggregator<'a> {
    context: &'a AnalysisContext,

    pub matches_parsed: u32,
    pub team: TeamAggregate,
    pub players: Vec<PlayerAggregate>,         // Roster order
    pub roles: BTreeMap<Role, RoleAggregate>,  // Every role present, zeroed
    pub champions: ChampionStatsTracker,
    pub compositions: CompositionAnalyzer,
    pub notices: Vec<Notice>,
}

impl<'a> MatchAggregator<'a> {
    pub fn new(context: &'a AnalysisContext) -> Self {
        Self {
            context,
            matches_parsed: 0,
            team: TeamAggregate::default(),
            players: context.roster.iter().map(|name| PlayerAggregate::new(name)).collect(),
            roles: Role::ALL.iter().map(|r| (*r, RoleAggregate::default())).collect(),
            champions: ChampionStatsTracker::new(),
            compositions: CompositionAnalyzer::new(),
            notices: Vec::new(),
        }
    }

    pub fn context(&self) -> &'a AnalysisContext {
        self.context
    }

    // Returns whether the match made it into the totals
    pub fn add_match(&mut self, game: &LoadedMatch) -> bool {
        match contribute(game, self.context) {
            Ok(contribution) => {
                self.fold(contribution);
                true
            }
            Err(notice) => {
                info!("{notice}");
                self.notices.push(notice);
                false
            }
        }
    }

    pub fn note(&mut self, notice: Notice) {
        warn!("{notice}");
        self.notices.push(notice);
    }

    fn fold(&mut self, contribution: MatchContribution) {
        debug!("{}: side {}, {} roster players, {} team kills, {}",
            contribution.file,
            contribution.side,
            contribution.players.len(),
            contribution.team.kills,
            if contribution.won { "win" } else { "loss" },
        );

        self.team.absorb(&contribution.team);

        for row in &contribution.players {
            self.players[row.roster_index].absorb(row, contribution.won);
            self.champions.record_game(&row.name, &row.champion, contribution.won);

            if let Some(role) = row.role {
                let totals = self.roles.entry(role).or_default();
                totals.gold = totals.gold.saturating_add(row.gold);
                totals.damage = totals.damage.saturating_add(row.damage);
                totals.occurrences += 1;
            }
        }

        self.compositions.record(contribution.composition, contribution.won);

        for notice in contribution.notices {
            self.note(notice);
        }

        self.matches_parsed += 1;
    }
}

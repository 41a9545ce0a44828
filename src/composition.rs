use std::collections::BTreeMap;

use serde::Serialize;

use crate::analysis_context::{AnalysisContext, Role};
use crate::match_loader::Participant;
use crate::util::WinTally;

/*
    The five role -> champion picks of one side. Slots are laid out in role-name order and all five
    are always present (an empty champion for a role nobody played), so two drafts with the same
    picks compare equal however the participants were ordered in the file.
*/
#[derive(Serialize, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CompositionKey(Vec<(Role, String)>);

impl CompositionKey {
    pub fn from_side<'a, I>(side: I, context: &AnalysisContext) -> Self
    where
        I: IntoIterator<Item = &'a Participant>,
    {
        let mut picks: BTreeMap<&'static str, (Role, Option<String>)> = Role::name_sorted()
            .iter()
            .map(|r| (r.as_str(), (*r, None)))
            .collect();

        for p in side {
            let Some(role) = context.normalize_role(&p.raw_role) else { continue; };
            let Some((_, slot)) = picks.get_mut(role.as_str()) else { continue; };
            // First participant in the file claims a doubly assigned role
            if slot.is_none() {
                *slot = Some(if p.champion_missing { String::new() } else { p.champion.clone() });
            }
        }

        CompositionKey(picks.into_values().map(|(role, champion)| (role, champion.unwrap_or_default())).collect())
    }

    pub fn champion(&self, role: Role) -> &str {
        self.0.iter().find(|(r, _)| *r == role).map(|(_, c)| c.as_str()).unwrap_or("")
    }

    // Picks in lane order for display
    pub fn picks(&self) -> Vec<(Role, &str)> {
        Role::ALL.iter().map(|r| (*r, self.champion(*r))).collect()
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CompositionStats {
    pub key: CompositionKey,
    pub games: u32,
    pub wins: u32,
    pub win_rate: f64,
}

#[derive(Debug, Clone, Default)]
pub struct CompositionAnalyzer {
    tallies: BTreeMap<CompositionKey, WinTally>,
}

impl CompositionAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, key: CompositionKey, won: bool) {
        self.tallies.entry(key).or_default().record(won);
    }

    // Most played first, then best win rate
    pub fn ranked(&self) -> Vec<CompositionStats> {
        let mut stats: Vec<CompositionStats> = self.tallies
            .iter()
            .map(|(key, tally)| CompositionStats {
                key: key.clone(),
                games: tally.games,
                wins: tally.wins,
                win_rate: tally.win_rate(),
            })
            .collect();

        // Map order already breaks the remaining ties by key, and the sort is stable
        stats.sort_by(|a, b| b.games.cmp(&a.games).then(b.win_rate.total_cmp(&a.win_rate)));
        stats
    }
}

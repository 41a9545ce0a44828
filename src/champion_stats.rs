use std::collections::BTreeMap;

use crate::util::WinTally;

pub type ChampionRecord = WinTally;

// Games and wins per (tracked player, champion). Entries exist only once a game was recorded.
#[derive(Debug, Clone, Default)]
pub struct ChampionStatsTracker {
    records: BTreeMap<(String, String), ChampionRecord>,
}

impl ChampionStatsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_game(&mut self, player: &str, champion: &str, won: bool) {
        self.records
            .entry((player.to_string(), champion.to_string()))
            .or_default()
            .record(won);
    }

    pub fn games_for(&self, player: &str) -> u32 {
        self.records.iter().filter(|((p, _), _)| p == player).map(|(_, r)| r.games).sum()
    }

    // Most played first, better win rate first among equally played, then by name
    pub fn ranked_for(&self, player: &str) -> Vec<(String, ChampionRecord)> {
        let mut champions: Vec<(String, ChampionRecord)> = self.records
            .iter()
            .filter(|((p, _), _)| p == player)
            .map(|((_, champion), record)| (champion.clone(), *record))
            .collect();

        champions.sort_by(|(a_name, a), (b_name, b)| {
            b.games.cmp(&a.games)
                .then(b.win_rate().total_cmp(&a.win_rate()))
                .then_with(|| a_name.cmp(b_name))
        });
        champions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_games_and_wins_per_player_and_champion() {
        let mut tracker = ChampionStatsTracker::new();
        tracker.record_game("A", "Ahri", true);
        tracker.record_game("A", "Ahri", false);
        tracker.record_game("B", "Ahri", true);

        assert_eq!(tracker.ranked_for("A"), vec![("Ahri".to_string(), ChampionRecord { games: 2, wins: 1 })]);
        assert_eq!(tracker.ranked_for("B"), vec![("Ahri".to_string(), ChampionRecord { games: 1, wins: 1 })]);
        assert!(tracker.ranked_for("C").is_empty());
        assert_eq!(tracker.games_for("A"), 2);
    }

    #[test]
    fn ranks_by_games_then_win_rate() {
        let mut tracker = ChampionStatsTracker::new();
        for won in [true, false, false] { tracker.record_game("A", "Orianna", won); }
        for won in [true, true] { tracker.record_game("A", "Syndra", won); }
        for won in [true, false] { tracker.record_game("A", "Azir", won); }
        tracker.record_game("A", "Viktor", false);
        tracker.record_game("B", "Teemo", true);

        let ranked: Vec<String> = tracker.ranked_for("A").into_iter().map(|(c, _)| c).collect();
        assert_eq!(ranked, vec!["Orianna", "Syndra", "Azir", "Viktor"]);
    }

    #[test]
    fn wins_never_exceed_games() {
        let mut tracker = ChampionStatsTracker::new();
        for i in 0..10 { tracker.record_game("A", "Jinx", i % 3 == 0); }
        let (_, record) = &tracker.ranked_for("A")[0];
        assert!(record.wins <= record.games);
        assert_eq!(record.games, 10);
        assert_eq!(record.wins, 4);
    }
}

use serde::Serialize;

pub fn sum_vector(vec: &[f64]) -> f64 {
    let mut sum = 0.0;
    for i in vec { sum += i }
    sum
}

pub fn remap_value_clamped(val: f64, in_low: f64, in_high: f64, out_low: f64, out_high: f64) -> f64 {
    let clamped_val = val.clamp(in_low,in_high);

    let interpolated = (clamped_val - in_low ) / (in_high - in_low);
    let clamped = interpolated.clamp(0.0, 1.0);

    clamped * out_high + ( 1.0 - clamped ) * out_low
}

// part / whole as a percentage, 0 when there is nothing to divide by
pub fn percentage(part: f64, whole: f64) -> f64 {
    if whole > 0.0 { part / whole * 100.0 } else { 0.0 }
}

// total / count, 0 for an empty count
pub fn mean(total: f64, count: u32) -> f64 {
    if count == 0 { 0.0 } else { total / count as f64 }
}

pub fn round_to(val: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (val * factor).round() / factor
}

// Games and wins for anything that is counted per match: a champion, a draft
#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WinTally {
    pub games: u32,
    pub wins: u32,
}

impl WinTally {
    pub fn record(&mut self, won: bool) {
        self.games += 1;
        if won { self.wins += 1; }
    }

    pub fn win_rate(&self) -> f64 {
        percentage(self.wins as f64, self.games as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remap_clamps_out_of_range_values() {
        assert_eq!(remap_value_clamped(150.0, 0.0, 100.0, 0.0, 100.0), 100.0);
        assert_eq!(remap_value_clamped(-5.0, 0.0, 100.0, 0.0, 100.0), 0.0);
        assert_eq!(remap_value_clamped(125.0, 50.0, 200.0, 0.0, 100.0), 50.0);
    }

    #[test]
    fn percentage_of_zero_whole_is_zero() {
        assert_eq!(percentage(12.0, 0.0), 0.0);
        assert_eq!(percentage(1.0, 4.0), 25.0);
    }

    #[test]
    fn rounds_to_one_decimal() {
        assert_eq!(round_to(2.0 / 3.0 * 100.0, 1), 66.7);
        assert_eq!(round_to(53.333, 1), 53.3);
    }

    #[test]
    fn tally_counts_wins_within_games() {
        let mut tally = WinTally::default();
        tally.record(true);
        tally.record(false);
        tally.record(true);
        assert_eq!(tally, WinTally { games: 3, wins: 2 });
        assert_eq!(round_to(tally.win_rate(), 1), 66.7);
        assert_eq!(WinTally::default().win_rate(), 0.0);
    }

    #[test]
    fn sums_slices() {
        assert_eq!(sum_vector(&[1.5, 2.5, 6.0]), 10.0);
        assert_eq!(sum_vector(&[]), 0.0);
    }
}

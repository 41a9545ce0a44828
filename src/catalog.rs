use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use chrono::NaiveDate;
use log::{debug, info};
use regex::Regex;
use serde::Serialize;

use crate::error::{Result, StatsError};

// DD_MM_YYYY_G<index>.json
fn filename_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(\d{2})_(\d{2})_(\d{4})_G(\d+)\.json$").expect("static regex"))
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MatchFile {
    pub filename: String,
    pub date: NaiveDate,
    pub game_index: u32,
    #[serde(skip)]
    pub path: PathBuf,
}

// Returns None for anything that is not a dated match file, impossible dates included
pub fn parse_match_filename(filename: &str) -> Option<(NaiveDate, u32)> {
    let caps = filename_pattern().captures(filename)?;

    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let year: i32 = caps[3].parse().ok()?;
    let game_index: u32 = caps[4].parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day).map(|date| (date, game_index))
}

// Every dated match file in the directory, oldest first. Same-day games are ordered by their
// game index, so G2 comes after G1 whatever order the directory listing had.
pub fn scan_directory(dir: &Path) -> Result<Vec<MatchFile>> {
    if !dir.is_dir() {
        return Err(StatsError::MissingSourceDir(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| StatsError::io(e, dir))? {
        let entry = entry.map_err(|e| StatsError::io(e, dir))?;
        let Ok(filename) = entry.file_name().into_string() else { continue; };

        match parse_match_filename(&filename) {
            Some((date, game_index)) => files.push(MatchFile {
                path: entry.path(),
                filename,
                date,
                game_index,
            }),
            None => debug!("Ignoring {filename}, not a dated match file"),
        }
    }

    sort_chronologically(&mut files);
    Ok(files)
}

// The most recent `count` files dated on or after `start`
pub fn select_window(files: &[MatchFile], start: NaiveDate, count: usize) -> Vec<MatchFile> {
    let mut kept: Vec<MatchFile> = files.iter().filter(|f| f.date >= start).cloned().collect();
    sort_chronologically(&mut kept);

    if kept.len() > count {
        let excess = kept.len() - count;
        kept.drain(..excess);
    }

    info!("Kept {} of {} match files dated on or after {start}", kept.len(), files.len());
    kept
}

fn sort_chronologically(files: &mut [MatchFile]) {
    files.sort_by(|a, b| {
        a.date.cmp(&b.date)
            .then(a.game_index.cmp(&b.game_index))
            .then_with(|| a.filename.cmp(&b.filename))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn touch(dir: &Path, name: &str) {
        File::create(dir.join(name)).unwrap();
    }

    fn names(files: &[MatchFile]) -> Vec<&str> {
        files.iter().map(|f| f.filename.as_str()).collect()
    }

    #[test]
    fn parses_dated_filenames() {
        assert_eq!(parse_match_filename("05_03_2024_G2.json"), Some((date(2024, 3, 5), 2)));
        assert_eq!(parse_match_filename("31_12_2023_G15.json"), Some((date(2023, 12, 31), 15)));
    }

    #[test]
    fn rejects_non_conforming_filenames() {
        assert_eq!(parse_match_filename("5_03_2024_G2.json"), None);
        assert_eq!(parse_match_filename("05_03_2024_G2.txt"), None);
        assert_eq!(parse_match_filename("05_03_2024_2.json"), None);
        assert_eq!(parse_match_filename("05_03_2024_G.json"), None);
        assert_eq!(parse_match_filename("notes.json"), None);
        assert_eq!(parse_match_filename("31_02_2024_G1.json"), None);
    }

    #[test]
    fn scan_ignores_noise_and_sorts_by_date_then_game() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "02_03_2024_G2.json");
        touch(dir.path(), "02_03_2024_G1.json");
        touch(dir.path(), "01_03_2024_G1.json");
        touch(dir.path(), "readme.md");
        touch(dir.path(), "2024_03_01_G1.json");

        let files = scan_directory(dir.path()).unwrap();
        assert_eq!(names(&files), vec!["01_03_2024_G1.json", "02_03_2024_G1.json", "02_03_2024_G2.json"]);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(scan_directory(&missing), Err(StatsError::MissingSourceDir(_))));
    }

    #[test]
    fn start_date_is_inclusive() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "09_03_2024_G1.json");
        touch(dir.path(), "10_03_2024_G1.json");
        touch(dir.path(), "11_03_2024_G1.json");

        let files = scan_directory(dir.path()).unwrap();
        let kept = select_window(&files, date(2024, 3, 10), 10);
        assert_eq!(names(&kept), vec!["10_03_2024_G1.json", "11_03_2024_G1.json"]);
    }

    #[test]
    fn keeps_the_most_recent_matches() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "01_01_2024_G1.json");
        for day in ["05", "06", "07", "08", "09"] {
            touch(dir.path(), &format!("{day}_02_2024_G1.json"));
        }

        let files = scan_directory(dir.path()).unwrap();
        let kept = select_window(&files, date(2024, 2, 1), 3);
        assert_eq!(names(&kept), vec!["07_02_2024_G1.json", "08_02_2024_G1.json", "09_02_2024_G1.json"]);
    }

    #[test]
    fn nothing_after_start_date_gives_empty_window() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "01_01_2024_G1.json");

        let files = scan_directory(dir.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert!(select_window(&files, date(2024, 6, 1), 5).is_empty());
    }
}

use std::fs;
use std::path::Path;

use serde::*;
use serde_aux::field_attributes::deserialize_default_from_null;
use serde_json::Value;

use crate::catalog::MatchFile;
use crate::coercion::*;
use crate::error::{Result, StatsError};

pub const UNKNOWN_CHAMPION: &str = "Unknown";
pub const EARLY_CHECKPOINT_MINUTES: u32 = 15;

// Participant field names as the replay exporter writes them
mod field {
    pub const NAME: &str = "NAME";
    pub const TEAM: &str = "TEAM";
    pub const TEAM_POSITION: &str = "TEAM_POSITION";
    pub const INDIVIDUAL_POSITION: &str = "INDIVIDUAL_POSITION";
    pub const CHAMPION: &str = "SKIN";
    pub const KILLS: &str = "CHAMPIONS_KILLED";
    pub const DEATHS: &str = "NUM_DEATHS";
    pub const ASSISTS: &str = "ASSISTS";
    pub const GOLD: &str = "GOLD_EARNED";
    pub const DAMAGE: &str = "TOTAL_DAMAGE_DEALT_TO_CHAMPIONS";
    pub const DRAGONS: &str = "DRAGON_KILLS";
    pub const BARONS: &str = "BARON_KILLS";
    pub const HERALDS: &str = "RIFT_HERALD_KILLS";
    pub const TOWERS: &str = "TURRET_TAKEDOWNS";
    pub const GRUBS: &str = "HORDE_KILLS";
    pub const VISION_SCORE: &str = "VISION_SCORE";
    pub const CONTROL_WARDS: &str = "VISION_WARDS_BOUGHT_IN_GAME";
    pub const WARDS_KILLED: &str = "WARD_KILLED";
    pub const WIN: &str = "WIN";
    pub const FIRST_BLOOD: &str = "FIRST_BLOOD_KILL";
    pub const TIME_PLAYED: &str = "TIME_PLAYED";
    pub const CS_DIFF: &str = "CS_DIFF_AT_15";
    pub const GOLD_DIFF: &str = "GOLD_DIFF_AT_15";
    pub const XP_DIFF: &str = "XP_DIFF_AT_15";
}

#[derive(Deserialize, Debug)]
struct MatchDocument {
    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    participants: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    pub name: String,
    pub side: Option<String>,
    pub raw_role: String,
    pub champion: String,
    pub champion_missing: bool,

    pub kills: u64,
    pub deaths: u64,
    pub assists: u64,
    pub gold: u64,
    pub damage: u64,

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

    pub win: bool,
    pub first_blood: bool,
    pub time_played_secs: f64,
}

impl Participant {
    pub fn from_record(record: &Record) -> Self {
        let champion = text_field(record, field::CHAMPION).filter(|c| !c.trim().is_empty());
        let champion_missing = champion.is_none();

        // First non-empty of the two position fields
        let raw_role = [field::TEAM_POSITION, field::INDIVIDUAL_POSITION]
            .iter()
            .filter_map(|key| text_field(record, key))
            .find(|role| !role.is_empty())
            .unwrap_or_default();

        Self {
            name: text_field(record, field::NAME).unwrap_or_default(),
            side: text_field(record, field::TEAM),
            raw_role,
            champion: champion.unwrap_or_else(|| UNKNOWN_CHAMPION.to_string()),
            champion_missing,

            kills: uint_field(record, field::KILLS),
            deaths: uint_field(record, field::DEATHS),
            assists: uint_field(record, field::ASSISTS),
            gold: uint_field(record, field::GOLD),
            damage: uint_field(record, field::DAMAGE),

            dragons: uint_field(record, field::DRAGONS),
            barons: uint_field(record, field::BARONS),
            heralds: uint_field(record, field::HERALDS),
            towers: uint_field(record, field::TOWERS),
            grubs: uint_field(record, field::GRUBS),

            vision_score: uint_field(record, field::VISION_SCORE),
            control_wards: uint_field(record, field::CONTROL_WARDS),
            wards_killed: uint_field(record, field::WARDS_KILLED),

            cs_diff: signed_float_field(record, field::CS_DIFF),
            gold_diff: signed_float_field(record, field::GOLD_DIFF),
            xp_diff: signed_float_field(record, field::XP_DIFF),

            win: win_field(record, field::WIN),
            first_blood: flag_field(record, field::FIRST_BLOOD),
            time_played_secs: float_field(record, field::TIME_PLAYED),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadedMatch {
    pub file: MatchFile,
    pub participants: Vec<Participant>,
}

pub fn load_match(file: &MatchFile) -> Result<LoadedMatch> {
    let participants = load_participants(&file.path)?;
    Ok(LoadedMatch { file: file.clone(), participants })
}

// Entries of the participants array that are not objects are dropped
pub fn load_participants(path: &Path) -> Result<Vec<Participant>> {
    let data = fs::read_to_string(path).map_err(|e| StatsError::io(e, path))?;
    parse_participants(&data).map_err(|e| StatsError::json(e, path))
}

pub fn parse_participants(data: &str) -> serde_json::Result<Vec<Participant>> {
    let document: MatchDocument = serde_json::from_str(data)?;

    Ok(document.participants
        .iter()
        .filter_map(Value::as_object)
        .map(Participant::from_record)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_a_full_participant() {
        let data = r#"{ "participants": [ {
            "NAME": "gumaguccy", "TEAM": "100", "TEAM_POSITION": "MIDDLE", "SKIN": "Ahri",
            "CHAMPIONS_KILLED": "7", "NUM_DEATHS": 2, "ASSISTS": "9",
            "GOLD_EARNED": "12450", "TOTAL_DAMAGE_DEALT_TO_CHAMPIONS": "23012",
            "DRAGON_KILLS": "1", "BARON_KILLS": "0", "RIFT_HERALD_KILLS": "1", "TURRET_TAKEDOWNS": "3", "HORDE_KILLS": "2",
            "VISION_SCORE": "31", "VISION_WARDS_BOUGHT_IN_GAME": "4", "WARD_KILLED": "5",
            "CS_DIFF_AT_15": "-12", "GOLD_DIFF_AT_15": "450.5", "XP_DIFF_AT_15": -200,
            "WIN": "Win", "FIRST_BLOOD_KILL": "1", "TIME_PLAYED": 1830
        } ] }"#;

        let participants = parse_participants(data).unwrap();
        assert_eq!(participants.len(), 1);

        let p = &participants[0];
        assert_eq!(p.name, "gumaguccy");
        assert_eq!(p.side.as_deref(), Some("100"));
        assert_eq!(p.raw_role, "MIDDLE");
        assert_eq!(p.champion, "Ahri");
        assert!(!p.champion_missing);
        assert_eq!((p.kills, p.deaths, p.assists), (7, 2, 9));
        assert_eq!((p.gold, p.damage), (12450, 23012));
        assert_eq!((p.dragons, p.barons, p.heralds, p.towers, p.grubs), (1, 0, 1, 3, 2));
        assert_eq!((p.vision_score, p.control_wards, p.wards_killed), (31, 4, 5));
        assert_eq!((p.cs_diff, p.gold_diff, p.xp_diff), (-12.0, 450.5, -200.0));
        assert!(p.win);
        assert!(p.first_blood);
        assert_eq!(p.time_played_secs, 1830.0);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let participants = parse_participants(r#"{ "participants": [ {} ] }"#).unwrap();
        let p = &participants[0];
        assert_eq!(p.name, "");
        assert_eq!(p.side, None);
        assert_eq!(p.raw_role, "");
        assert_eq!(p.champion, UNKNOWN_CHAMPION);
        assert!(p.champion_missing);
        assert_eq!(p.kills + p.deaths + p.assists + p.gold + p.damage, 0);
        assert!(!p.win);
    }

    #[test]
    fn falls_back_to_individual_position() {
        let data = r#"{ "participants": [
            { "TEAM_POSITION": "", "INDIVIDUAL_POSITION": "support" },
            { "TEAM_POSITION": "JUNGLE", "INDIVIDUAL_POSITION": "TOP" }
        ] }"#;
        let participants = parse_participants(data).unwrap();
        assert_eq!(participants[0].raw_role, "support");
        assert_eq!(participants[1].raw_role, "JUNGLE");
    }

    #[test]
    fn null_or_missing_participants_are_empty() {
        assert!(parse_participants(r#"{ "participants": null }"#).unwrap().is_empty());
        assert!(parse_participants(r#"{ "gameLength": 1800 }"#).unwrap().is_empty());
        assert_eq!(parse_participants(r#"{ "participants": [1, "x", {}] }"#).unwrap().len(), 1);
    }

    #[test]
    fn corrupt_documents_are_errors() {
        assert!(parse_participants("{ not json").is_err());
        assert!(parse_participants("[1, 2, 3]").is_err());
    }

    #[test]
    fn load_reports_the_failing_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("01_01_2024_G1.json");
        std::fs::write(&path, "garbage").unwrap();

        match load_participants(&path) {
            Err(StatsError::Json { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected a JSON error, got {other:?}"),
        }
    }
}

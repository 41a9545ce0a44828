use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use serde::*;
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::error::{Result, StatsError};

pub const MAX_MATCH_COUNT: usize = 50;

/*
    Everything a run can be tuned with. Nothing in here changes while a run is going, and the
    pipeline never reads it from anywhere but the reference it is handed, so two runs with two
    rosters can live side by side.
*/
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisContext {
    pub source_dir: PathBuf,
    pub start_date: NaiveDate,             // Inclusive
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub match_count: usize,                // The N most recent matches on or after start_date

    pub roster: Vec<String>,
    pub aliases: BTreeMap<String, String>, // Roster identity -> name shown in the report
    pub role_synonyms: BTreeMap<String, Role>,

    pub radar_axes: Vec<RadarAxis>,
}

impl Default for AnalysisContext {
    fn default() -> Self {
        let roster = ["", "Peche le coquin", "ManGros Fish", "gumaguccy", "Cheikh Sadri"];
        let aliases = [
            ("", "Nireo"),
            ("Peche le coquin", "Peche"),
            ("ManGros Fish", "Jawa"),
            ("gumaguccy", "kross"),
            ("Cheikh Sadri", "iench taric"),
        ];

        Self {
            source_dir: PathBuf::from("scrims_json"),
            start_date: Local::now().date_naive(),
            match_count: 5,

            roster: roster.iter().map(|s| s.to_string()).collect(),
            aliases: aliases.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
            role_synonyms: default_role_synonyms(),

            radar_axes: vec![
                RadarAxis::new(RadarMetric::KillParticipation, 0.0, 100.0),
                RadarAxis::new(RadarMetric::GoldEfficiency, 50.0, 200.0),
                RadarAxis::new(RadarMetric::Kda, 0.0, 10.0),
                RadarAxis::new(RadarMetric::DamagePerMinute, 0.0, 1000.0),
                RadarAxis::new(RadarMetric::VisionPerMinute, 0.0, 3.0),
            ],
        }
    }
}

impl AnalysisContext {
    // Keys missing from the file keep their default value
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(|e| StatsError::io(e, path))?;
        let context: AnalysisContext = serde_json::from_str(&data).map_err(|e| StatsError::json(e, path))?;
        context.validate()?;
        Ok(context)
    }

    pub fn validate(&self) -> Result<()> {
        if self.roster.is_empty() {
            return Err(StatsError::Config("roster must name at least one player".to_string()));
        }
        if self.match_count == 0 || self.match_count > MAX_MATCH_COUNT {
            return Err(StatsError::Config(format!(
                "match_count must be between 1 and {MAX_MATCH_COUNT}, got {}",
                self.match_count
            )));
        }
        for axis in &self.radar_axes {
            if axis.min >= axis.max {
                return Err(StatsError::Config(format!(
                    "radar axis {:?} has min {} >= max {}",
                    axis.metric, axis.min, axis.max
                )));
            }
        }
        Ok(())
    }

    // Position in the roster, which is also the row order of the player table
    pub fn roster_index(&self, name: &str) -> Option<usize> {
        self.roster.iter().position(|p| p == name)
    }

    pub fn is_tracked(&self, name: &str) -> bool {
        self.roster_index(name).is_some()
    }

    pub fn display_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.get(name).map(String::as_str).unwrap_or(name)
    }

    pub fn normalize_role(&self, raw: &str) -> Option<Role> {
        self.role_synonyms.get(&raw.trim().to_uppercase()).copied()
    }
}

fn default_role_synonyms() -> BTreeMap<String, Role> {
    let mut synonyms: BTreeMap<String, Role> = Role::ALL.iter().map(|r| (r.as_str().to_string(), *r)).collect();
    synonyms.insert("MID".to_string(), Role::Middle);
    synonyms.insert("BOT".to_string(), Role::Bottom);
    synonyms.insert("SUPPORT".to_string(), Role::Utility);
    synonyms
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Top,
    Jungle,
    Middle,
    Bottom,
    Utility,
}

impl Role {
    // Lane order, used for every table shown to a reader
    pub const ALL: [Role; 5] = [Role::Top, Role::Jungle, Role::Middle, Role::Bottom, Role::Utility];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Top => "TOP",
            Role::Jungle => "JUNGLE",
            Role::Middle => "MIDDLE",
            Role::Bottom => "BOTTOM",
            Role::Utility => "UTILITY",
        }
    }

    // Alphabetical by role name. Draft keys are laid out in this order
    pub fn name_sorted() -> [Role; 5] {
        let mut roles = Role::ALL;
        roles.sort_by_key(|r| r.as_str());
        roles
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RadarMetric {
    KillParticipation,
    GoldEfficiency,
    Kda,
    DamagePerMinute,
    VisionPerMinute,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct RadarAxis {
    pub metric: RadarMetric,
    pub min: f64,
    pub max: f64,
}

impl RadarAxis {
    pub fn new(metric: RadarMetric, min: f64, max: f64) -> Self {
        Self { metric, min, max }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn role_synonyms_map_to_canonical_roles() {
        let context = AnalysisContext::default();
        assert_eq!(context.normalize_role("mid"), Some(Role::Middle));
        assert_eq!(context.normalize_role("Bot"), Some(Role::Bottom));
        assert_eq!(context.normalize_role("SUPPORT"), Some(Role::Utility));
        assert_eq!(context.normalize_role("utility"), Some(Role::Utility));
        assert_eq!(context.normalize_role("JUNGLE"), Some(Role::Jungle));
        assert_eq!(context.normalize_role("ADC"), None);
        assert_eq!(context.normalize_role(""), None);
    }

    #[test]
    fn empty_identity_is_part_of_the_default_roster() {
        let context = AnalysisContext::default();
        assert_eq!(context.roster.len(), 5);
        assert!(context.is_tracked(""));
        assert_eq!(context.display_name(""), "Nireo");
        assert_eq!(context.display_name("someone else"), "someone else");
    }

    #[test]
    fn name_sorted_roles_are_alphabetical() {
        let names: Vec<&str> = Role::name_sorted().iter().map(|r| r.as_str()).collect();
        assert_eq!(names, vec!["BOTTOM", "JUNGLE", "MIDDLE", "TOP", "UTILITY"]);
    }

    #[test]
    fn loads_partial_config_file_over_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "roster": ["A", "B"], "match_count": "12", "start_date": "2024-03-01" }}"#).unwrap();

        let context = AnalysisContext::from_file(file.path()).unwrap();
        assert_eq!(context.roster, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(context.match_count, 12);
        assert_eq!(context.start_date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(context.normalize_role("MID"), Some(Role::Middle));
        assert_eq!(context.radar_axes.len(), 5);
    }

    #[test]
    fn rejects_out_of_range_match_count() {
        let mut context = AnalysisContext::default();
        context.match_count = 0;
        assert!(matches!(context.validate(), Err(StatsError::Config(_))));
        context.match_count = MAX_MATCH_COUNT + 1;
        assert!(context.validate().is_err());
        context.match_count = MAX_MATCH_COUNT;
        assert!(context.validate().is_ok());
    }

    #[test]
    fn rejects_degenerate_radar_axis() {
        let mut context = AnalysisContext::default();
        context.radar_axes.push(RadarAxis::new(RadarMetric::Kda, 5.0, 5.0));
        assert!(context.validate().is_err());
    }
}

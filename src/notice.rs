use std::fmt;

use serde::Serialize;

// Things worth telling the reader about that did not stop the run
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    UnreadableFile { file: String, reason: String },
    NoRosterPlayers { file: String },
    AmbiguousSide { file: String, chosen: String, tied_with: Vec<String> },
    UnknownChampion { file: String, player: String },
    UnrecognizedRole { file: String, player: String, role: String },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::UnreadableFile { file, reason } => write!(f, "{file}: skipped, {reason}"),
            Notice::NoRosterPlayers { file } => write!(f, "{file}: no roster player found, match excluded"),
            Notice::AmbiguousSide { file, chosen, tied_with } => {
                write!(f, "{file}: roster split evenly between {chosen} and {}, counted as {chosen}", tied_with.join(", "))
            }
            Notice::UnknownChampion { file, player } => write!(f, "{file}: no champion set for '{player}'"),
            Notice::UnrecognizedRole { file, player, role } => {
                write!(f, "{file}: role '{role}' of '{player}' not recognized, no role credited")
            }
        }
    }
}

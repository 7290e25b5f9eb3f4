use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Subject {
    #[default]
    ComputerScience,
    Stem,
    Humanities,
}

impl Subject {
    pub fn as_str(&self) -> &'static str {
        match self {
            Subject::ComputerScience => "computer_science",
            Subject::Stem => "stem",
            Subject::Humanities => "humanities",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Subject {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "computer_science" => Ok(Subject::ComputerScience),
            "stem" => Ok(Subject::Stem),
            "humanities" => Ok(Subject::Humanities),
            other => Err(format!("Unknown subject '{other}'")),
        }
    }
}

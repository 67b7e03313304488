use std::fs::File;
use std::io::BufReader;

use serde::{Deserialize, Serialize};

use crate::error::Error;

pub const DEFAULT_MAX_PROBLEMS: usize = 100;

/// Analysis settings, as sent by the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub max_number_of_problems: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            max_number_of_problems: DEFAULT_MAX_PROBLEMS,
        }
    }
}

impl Settings {
    /// Read settings from a YAML file. Missing keys keep their defaults.
    pub fn load(path: &str) -> Result<Self, Error> {
        let file = File::open(path).map_err(|e| Error::FileOpen(path.to_string(), e))?;
        serde_yaml::from_reader(BufReader::new(file)).map_err(|e| Error::Config(path.to_string(), e))
    }
}

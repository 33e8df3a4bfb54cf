//! Deterministic clause splitters
//!
//! These run without an oracle and produce plain trimmed strings rather than
//! indexed segments. They never drop characters other than the whitespace
//! they cut on.

pub mod english;
pub mod hebrew;

pub use english::split_english_clauses;
pub use hebrew::{process_hebrew_verse, remove_nikud, split_hebrew_by_cantillation};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which clause splitter to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Script {
    Hebrew,
    #[default]
    English,
}

impl Script {
    /// Split `text` with the splitter for this script
    pub fn split(self, text: &str) -> Vec<String> {
        match self {
            Script::Hebrew => split_hebrew_by_cantillation(text),
            Script::English => split_english_clauses(text),
        }
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Script::Hebrew => f.write_str("hebrew"),
            Script::English => f.write_str("english"),
        }
    }
}

impl FromStr for Script {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hebrew" | "he" => Ok(Script::Hebrew),
            "english" | "en" => Ok(Script::English),
            other => Err(format!("unknown script `{other}` (expected hebrew or english)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_dispatch() {
        assert_eq!(Script::English.split("a, b"), vec!["a,", "b"]);
        assert_eq!(
            Script::Hebrew.split("א\u{0591} ב"),
            vec!["א\u{0591}", "ב"]
        );
    }

    #[test]
    fn test_script_parsing() {
        assert_eq!("HE".parse::<Script>(), Ok(Script::Hebrew));
        assert_eq!("english".parse::<Script>(), Ok(Script::English));
        assert!("greek".parse::<Script>().is_err());
    }
}

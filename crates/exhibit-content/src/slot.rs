//! Exhibit slots
//!
//! Every exhibit has exactly three named regions. The same names double as
//! the panel's tab names.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    /// Program source
    #[default]
    Code,
    /// Sample input fed to the program
    Input,
    /// Sample output produced by the program
    Output,
}

impl Slot {
    /// All slots in tab order
    pub const ALL: [Slot; 3] = [Slot::Code, Slot::Input, Slot::Output];

    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::Code => "code",
            Slot::Input => "input",
            Slot::Output => "output",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Slot::Code => 0,
            Slot::Input => 1,
            Slot::Output => 2,
        }
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Slot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            // Pages name the code region after the language
            "code" | "cpp" => Ok(Slot::Code),
            "input" => Ok(Slot::Input),
            "output" => Ok(Slot::Output),
            _ => Err(format!("Unknown slot: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_slot() {
        assert_eq!("code".parse::<Slot>().unwrap(), Slot::Code);
        assert_eq!("cpp".parse::<Slot>().unwrap(), Slot::Code);
        assert_eq!(" Output ".parse::<Slot>().unwrap(), Slot::Output);
        assert!("stdout".parse::<Slot>().is_err());
    }

    #[test]
    fn test_default_is_code() {
        assert_eq!(Slot::default(), Slot::Code);
        assert_eq!(Slot::ALL[0], Slot::Code);
    }
}

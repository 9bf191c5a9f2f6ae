use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How much detail a sampling pass records.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LevelOfDetail {
    /// Low-overhead mode. Only whitelisted providers run, and dump names are
    /// redacted against the background whitelist.
    #[serde(rename = "background")]
    Background,

    /// Providers should report only their top-level totals.
    #[serde(rename = "light")]
    Light,

    /// Everything a provider knows about.
    #[serde(rename = "detailed")]
    #[default]
    Detailed,
}

impl LevelOfDetail {
    pub fn as_str(self) -> &'static str {
        match self {
            LevelOfDetail::Background => "background",
            LevelOfDetail::Light => "light",
            LevelOfDetail::Detailed => "detailed",
        }
    }
}

impl fmt::Display for LevelOfDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LevelOfDetail {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "background" => Ok(LevelOfDetail::Background),
            "light" => Ok(LevelOfDetail::Light),
            "detailed" => Ok(LevelOfDetail::Detailed),
            other => Err(Error::InvalidLevelOfDetail(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_display_form() {
        for level in [
            LevelOfDetail::Background,
            LevelOfDetail::Light,
            LevelOfDetail::Detailed,
        ] {
            assert_eq!(level.to_string().parse::<LevelOfDetail>().unwrap(), level);
        }
    }

    #[test]
    fn rejects_unknown_level() {
        assert!(matches!(
            "verbose".parse::<LevelOfDetail>(),
            Err(Error::InvalidLevelOfDetail(s)) if s == "verbose"
        ));
    }
}

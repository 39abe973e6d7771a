use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Visual theme. Both themes show the same content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// ASCII borders, no colour
    Plain,
    /// Rounded UTF-8 borders with colour
    Styled,
}

impl Theme {
    /// Styled on a terminal, plain when piped
    pub fn detect() -> Self {
        if atty::is(atty::Stream::Stdout) {
            Theme::Styled
        } else {
            Theme::Plain
        }
    }

    pub fn use_colors(self) -> bool {
        matches!(self, Theme::Styled)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Plain => "plain",
            Theme::Styled => "styled",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" => Ok(Theme::Plain),
            "styled" => Ok(Theme::Styled),
            other => Err(format!("unknown theme '{}', expected plain or styled", other)),
        }
    }
}

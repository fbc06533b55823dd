use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Brazilian company registry id. Kept opaque: never validated, parsed or
/// normalised on the client side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cnpj(pub String);

impl Cnpj {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cnpj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Cnpj {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Cnpj {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Fiscal quarter of an expense entry, kept in the form the backend sent it:
/// a label such as `"1T"` or a plain number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quarter {
    Number(Number),
    Label(String),
}

impl Quarter {
    /// Quarter number when the raw value reads as one; no range check.
    pub fn number(&self) -> Option<u64> {
        match self {
            Self::Number(number) => number.as_u64(),
            Self::Label(label) => {
                let trimmed = label.trim();
                trimmed
                    .strip_suffix(['T', 't'])
                    .unwrap_or(trimmed)
                    .parse()
                    .ok()
            }
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{number}"),
            Self::Label(label) => f.write_str(label),
        }
    }
}

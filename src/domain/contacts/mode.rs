// ============================================================
// MODE & CLASSIFICATION
// ============================================================
// Business rule deciding which classified contacts survive a run

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Flags;

const RENTER_PHRASE: &str = "likely renting";
const OWNER_PHRASE: &str = "likely owner";

/// Occupancy class read from a contact's flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Classification {
    Owner,
    Renter,
    /// Flags matching neither phrase, including empty flags
    Unknown,
}

impl Classification {
    /// Case-insensitive phrase match. Renter wins when both phrases appear.
    pub fn from_flags(flags: &Flags) -> Self {
        let normalized = flags.normalized();
        if normalized.contains(RENTER_PHRASE) {
            Classification::Renter
        } else if normalized.contains(OWNER_PHRASE) {
            Classification::Owner
        } else {
            Classification::Unknown
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Owner => write!(f, "owner"),
            Classification::Renter => write!(f, "renter"),
            Classification::Unknown => write!(f, "unknown"),
        }
    }
}

/// Campaign mode, selected once per run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Mode {
    /// Remove renters; keep owners and unclassified contacts
    Clone,

    /// Remove contacts already flagged as owners; keep renters and unclassified
    OwnerOnly,
}

impl Mode {
    pub fn keeps(self, classification: Classification) -> bool {
        match (self, classification) {
            (Mode::Clone, Classification::Renter) => false,
            (Mode::OwnerOnly, Classification::Owner) => false,
            _ => true,
        }
    }

    /// Classification this mode removes
    pub fn excluded(self) -> Classification {
        match self {
            Mode::Clone => Classification::Renter,
            Mode::OwnerOnly => Classification::Owner,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Clone => "clone",
            Mode::OwnerOnly => "owner_only",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clone" => Ok(Mode::Clone),
            "owner_only" | "owner-only" | "owneronly" => Ok(Mode::OwnerOnly),
            other => Err(format!(
                "unknown mode '{}', expected 'clone' or 'owner_only'",
                other
            )),
        }
    }
}

impl TryFrom<String> for Mode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Mode> for String {
    fn from(mode: Mode) -> Self {
        mode.as_str().to_string()
    }
}

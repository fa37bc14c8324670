//! Shared value types for the accounting domain.
//!
//! Service tags are closed enums whose wire names match the accounting service's
//! snake_case vocabulary. [`Count`] and [`Timestamp`] carry values that the
//! service expects as decimal strings, so both expose a `to_wire` form separate
//! from their `Display`.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::AccountingError;

// ---------------------------------------------------------------------------
// Service tags
// ---------------------------------------------------------------------------

/// Billing model of a service.
///
/// Only [`ServiceType::Oneshot`] has a session implementation in this SDK; the
/// other tags exist so payloads from the accounting service deserialise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    /// Charged for stored volume.
    Storage,
    /// Charged once per job, with an up-front reservation.
    Oneshot,
    /// Charged periodically while a job keeps running.
    Longrun,
}

impl ServiceType {
    /// Returns the wire name of this service type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Storage => "storage",
            Self::Oneshot => "oneshot",
            Self::Longrun => "longrun",
        }
    }
}

impl std::fmt::Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------

/// The concrete service being charged for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceSubtype {
    Storage,
    SingleCellSim,
    SingleCellBuild,
    SynaptomeSim,
    SynaptomeBuild,
    MlRetrieval,
    MlLlm,
    MlRag,
    Notebook,
}

impl ServiceSubtype {
    /// Every known subtype, in declaration order.
    pub const ALL: [ServiceSubtype; 9] = [
        Self::Storage,
        Self::SingleCellSim,
        Self::SingleCellBuild,
        Self::SynaptomeSim,
        Self::SynaptomeBuild,
        Self::MlRetrieval,
        Self::MlLlm,
        Self::MlRag,
        Self::Notebook,
    ];

    /// Returns the wire name of this subtype.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Storage => "storage",
            Self::SingleCellSim => "single_cell_sim",
            Self::SingleCellBuild => "single_cell_build",
            Self::SynaptomeSim => "synaptome_sim",
            Self::SynaptomeBuild => "synaptome_build",
            Self::MlRetrieval => "ml_retrieval",
            Self::MlLlm => "ml_llm",
            Self::MlRag => "ml_rag",
            Self::Notebook => "notebook",
        }
    }
}

impl FromStr for ServiceSubtype {
    type Err = AccountingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|subtype| subtype.as_str() == s)
            .ok_or_else(|| AccountingError::InvalidSubtype {
                value: s.to_string(),
            })
    }
}

impl std::fmt::Display for ServiceSubtype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Counts
// ---------------------------------------------------------------------------

/// Number of billable units reserved or consumed.
///
/// The unit depends on the subtype (tokens for `ml_llm`, cells for simulations).
/// Counts are never negative; the accounting service receives them as strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Count(u64);

impl Count {
    /// Creates a [`Count`] from a raw integer.
    pub fn new(count: u64) -> Self {
        Self(count)
    }

    /// Returns the underlying integer value.
    pub fn as_u64(self) -> u64 {
        self.0
    }

    /// Returns the decimal string sent to the accounting service.
    pub fn to_wire(self) -> String {
        self.0.to_string()
    }
}

impl From<u64> for Count {
    fn from(count: u64) -> Self {
        Self(count)
    }
}

impl std::fmt::Display for Count {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::ops::Add for Count {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A UTC wall-clock timestamp.
///
/// Wraps [`chrono::DateTime<Utc>`] so callers never depend on `chrono` types
/// directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Returns the current UTC time as a [`Timestamp`].
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a [`Timestamp`] from a [`DateTime<Utc>`].
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Whole seconds since the unix epoch, as sent in usage reports.
    pub fn to_wire(self) -> String {
        self.0.timestamp().to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn subtype_names_round_trip_through_from_str() {
        for subtype in ServiceSubtype::ALL {
            assert_eq!(subtype.as_str().parse::<ServiceSubtype>().unwrap(), subtype);
        }
    }

    #[test]
    fn subtype_serde_matches_as_str() {
        let json = serde_json::to_string(&ServiceSubtype::SingleCellBuild).unwrap();
        assert_eq!(json, "\"single_cell_build\"");
        let json = serde_json::to_string(&ServiceType::Oneshot).unwrap();
        assert_eq!(json, "\"oneshot\"");
    }

    #[test]
    fn unknown_subtype_is_rejected() {
        let err = "ml-llm".parse::<ServiceSubtype>().unwrap_err();
        assert!(matches!(err, AccountingError::InvalidSubtype { ref value } if value == "ml-llm"));
    }

    #[test]
    fn count_wire_form_is_decimal_string() {
        assert_eq!(Count::new(0).to_wire(), "0");
        assert_eq!(Count::new(1234).to_wire(), "1234");
        assert_eq!(Count::new(u64::MAX) + Count::new(1), Count::new(u64::MAX));
    }

    #[test]
    fn timestamp_wire_form_is_unix_seconds() {
        let ts = Timestamp::from_utc(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap());
        assert_eq!(ts.to_wire(), "1704164645");
        assert_eq!(ts.to_string(), "2024-01-02T03:04:05+00:00");
    }
}

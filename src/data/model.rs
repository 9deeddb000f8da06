use std::collections::BTreeSet;
use std::fmt;

use serde::Deserialize;

use super::error::{DashError, Result};

// ---------------------------------------------------------------------------
// OutcomeClass – the binary `class` column
// ---------------------------------------------------------------------------

/// Launch outcome as stored in the `class` column (1 = success, 0 = failure).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "i64")]
pub enum OutcomeClass {
    Failure,
    Success,
}

impl OutcomeClass {
    /// Numeric value of the class column.
    pub fn as_u64(self) -> u64 {
        match self {
            OutcomeClass::Failure => 0,
            OutcomeClass::Success => 1,
        }
    }
}

impl TryFrom<i64> for OutcomeClass {
    type Error = DashError;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            0 => Ok(OutcomeClass::Failure),
            1 => Ok(OutcomeClass::Success),
            other => Err(DashError::InvalidOutcomeClass(other)),
        }
    }
}

/// Displays the raw class value, which is also the pie slice label.
impl fmt::Display for OutcomeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u64())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the launch table
// ---------------------------------------------------------------------------

/// A single launch attempt. Column names follow the source CSV headers;
/// any other columns in the file are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LaunchRecord {
    #[serde(rename = "Launch Site")]
    pub launch_site: String,
    #[serde(rename = "Payload Mass (kg)")]
    pub payload_mass_kg: f64,
    #[serde(rename = "Booster Version Category")]
    pub booster_version_category: String,
    #[serde(rename = "class")]
    pub outcome_class: OutcomeClass,
}

impl LaunchRecord {
    pub fn new(
        launch_site: impl Into<String>,
        payload_mass_kg: f64,
        booster_version_category: impl Into<String>,
        outcome_class: OutcomeClass,
    ) -> Self {
        Self {
            launch_site: launch_site.into(),
            payload_mass_kg,
            booster_version_category: booster_version_category.into(),
            outcome_class,
        }
    }

    /// Check the invariants the loader guarantees for every row.
    pub fn validate(&self) -> Result<()> {
        if self.launch_site.trim().is_empty() {
            return Err(DashError::InvalidArgument("empty launch site".into()));
        }
        if !self.payload_mass_kg.is_finite() || self.payload_mass_kg < 0.0 {
            return Err(DashError::InvalidArgument(format!(
                "payload mass must be a non-negative number, got {}",
                self.payload_mass_kg
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// LaunchTable – the immutable loaded dataset
// ---------------------------------------------------------------------------

/// All launch records plus values derived once at load time.
#[derive(Debug, Clone, Default)]
pub struct LaunchTable {
    records: Vec<LaunchRecord>,
    /// Observed (min, max) payload mass; `None` for an empty table.
    payload_bounds: Option<(f64, f64)>,
    /// Sorted distinct launch sites.
    sites: Vec<String>,
}

impl LaunchTable {
    /// Build the table and its payload bounds / site index.
    pub fn new(records: Vec<LaunchRecord>) -> Self {
        let payload_bounds = records.iter().fold(None, |acc, r| {
            let m = r.payload_mass_kg;
            match acc {
                None => Some((m, m)),
                Some((lo, hi)) => Some((f64::min(lo, m), f64::max(hi, m))),
            }
        });
        let sites: BTreeSet<&str> = records.iter().map(|r| r.launch_site.as_str()).collect();
        let sites = sites.into_iter().map(str::to_string).collect();

        Self {
            records,
            payload_bounds,
            sites,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LaunchRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn payload_bounds(&self) -> Option<(f64, f64)> {
        self.payload_bounds
    }

    pub fn sites(&self) -> &[String] {
        &self.sites
    }
}

impl<'a> IntoIterator for &'a LaunchTable {
    type Item = &'a LaunchRecord;
    type IntoIter = std::slice::Iter<'a, LaunchRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

// ---------------------------------------------------------------------------
// Filter criteria
// ---------------------------------------------------------------------------

/// Dropdown value meaning "every site".
pub const ALL_SITES_VALUE: &str = "ALL";

/// Site dropdown selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    /// Map a dropdown value to a selection; `ALL` is the sentinel.
    pub fn from_value(value: &str) -> Self {
        if value == ALL_SITES_VALUE {
            SiteSelection::All
        } else {
            SiteSelection::Site(value.to_string())
        }
    }

    /// Dropdown value (`ALL` or the site name).
    pub fn value(&self) -> &str {
        match self {
            SiteSelection::All => ALL_SITES_VALUE,
            SiteSelection::Site(s) => s,
        }
    }

    /// Dropdown label.
    pub fn label(&self) -> &str {
        match self {
            SiteSelection::All => "All Sites",
            SiteSelection::Site(s) => s,
        }
    }

    /// Whether a record belongs to this selection.
    pub fn matches(&self, record: &LaunchRecord) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(s) => record.launch_site == *s,
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Inclusive payload mass interval in kg.
///
/// `low > high` is a valid range that matches nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    low: f64,
    high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Result<Self> {
        if !low.is_finite() || !high.is_finite() {
            return Err(DashError::InvalidArgument(format!(
                "payload bounds must be finite, got [{low}, {high}]"
            )));
        }
        Ok(Self { low, high })
    }

    /// Range spanning the table's observed payloads, `[0, 0]` when empty.
    pub fn covering(table: &LaunchTable) -> Self {
        let (low, high) = table.payload_bounds().unwrap_or((0.0, 0.0));
        Self { low, high }
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn contains(&self, payload_mass_kg: f64) -> bool {
        self.low <= payload_mass_kg && payload_mass_kg <= self.high
    }
}

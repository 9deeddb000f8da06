//! Launch table shared by the data-layer tests.

use super::model::OutcomeClass::{Failure, Success};
use super::model::{LaunchRecord, LaunchTable};

/// Three CCAFS launches (two successes), one VAFB success, one KSC failure.
pub fn sample_table() -> LaunchTable {
    LaunchTable::new(vec![
        LaunchRecord::new("CCAFS LC-40", 500.0, "v1.0", Success),
        LaunchRecord::new("CCAFS LC-40", 6000.0, "FT", Failure),
        LaunchRecord::new("CCAFS LC-40", 9000.0, "B4", Success),
        LaunchRecord::new("VAFB SLC-4E", 9600.0, "FT", Success),
        LaunchRecord::new("KSC LC-39A", 3000.0, "B5", Failure),
    ])
}

//! Logged-set history loading.
//!
//! Merges the live WAL with the archived CSV to reconstruct a user's full
//! set history for the progress aggregator and recommendation rule.

use crate::{LoggedSet, Result};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use uuid::Uuid;

/// CSV row format for reading archived sets
#[derive(Debug, Deserialize)]
struct CsvRow {
    id: String,
    user_id: u32,
    exercise_id: u32,
    date: String,
    sets_done: u32,
    reps_done: u32,
    weight_used: Option<f64>,
    rpe: Option<u8>,
}

impl TryFrom<CsvRow> for LoggedSet {
    type Error = crate::Error;

    fn try_from(row: CsvRow) -> Result<Self> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| crate::Error::Other(format!("Invalid UUID: {}", e)))?;

        let date: NaiveDate = row
            .date
            .parse()
            .map_err(|e| crate::Error::Other(format!("Invalid date: {}", e)))?;

        Ok(LoggedSet {
            id,
            user_id: row.user_id,
            exercise_id: row.exercise_id,
            date,
            sets_done: row.sets_done,
            reps_done: row.reps_done,
            weight_used: row.weight_used,
            rpe: row.rpe,
        })
    }
}

/// Load a user's full logged-set history from both WAL and CSV
///
/// Returns sets sorted by date (newest first). Automatically deduplicates
/// sets that appear in both WAL and CSV.
pub fn load_user_history(wal_path: &Path, csv_path: &Path, user_id: u32) -> Result<Vec<LoggedSet>> {
    let mut sets = Vec::new();
    let mut seen_ids = HashSet::new();

    // Load from WAL first (most recent)
    if wal_path.exists() {
        let wal_sets = crate::setlog::read_sets(wal_path)?;
        for set in wal_sets {
            if set.user_id == user_id {
                seen_ids.insert(set.id);
                sets.push(set);
            }
        }
        tracing::debug!("Loaded {} sets from WAL", sets.len());
    }

    // Load from CSV (archived)
    if csv_path.exists() {
        let csv_sets = load_sets_from_csv(csv_path)?;
        let mut csv_count = 0;
        for set in csv_sets {
            if set.user_id == user_id && !seen_ids.contains(&set.id) {
                seen_ids.insert(set.id);
                sets.push(set);
                csv_count += 1;
            }
        }
        tracing::debug!("Loaded {} sets from CSV", csv_count);
    }

    // Sort by date, newest first
    sets.sort_by(|a, b| b.date.cmp(&a.date));

    tracing::info!("Loaded {} total sets for user {}", sets.len(), user_id);

    Ok(sets)
}

/// Load all sets from a CSV file
fn load_sets_from_csv(path: &Path) -> Result<Vec<LoggedSet>> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;

    let mut sets = Vec::new();
    for result in reader.deserialize::<CsvRow>() {
        match result {
            Ok(row) => match LoggedSet::try_from(row) {
                Ok(set) => sets.push(set),
                Err(e) => {
                    tracing::warn!("Failed to parse CSV row: {}", e);
                    // Continue processing other rows
                }
            },
            Err(e) => {
                tracing::warn!("Failed to deserialize CSV row: {}", e);
            }
        }
    }

    Ok(sets)
}

//! CSV rollup functionality for archiving the set log.
//!
//! This module implements atomic WAL-to-CSV conversion with proper error
//! handling to prevent data loss.

use crate::{LoggedSet, Result};
use std::fs::OpenOptions;
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
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

impl From<&LoggedSet> for CsvRow {
    fn from(set: &LoggedSet) -> Self {
        CsvRow {
            id: set.id.to_string(),
            user_id: set.user_id,
            exercise_id: set.exercise_id,
            date: set.date.to_string(),
            sets_done: set.sets_done,
            reps_done: set.reps_done,
            weight_used: set.weight_used,
            rpe: set.rpe,
        }
    }
}

/// Roll up WAL sets into CSV and archive the WAL atomically
///
/// This function:
/// 1. Reads all sets from the WAL
/// 2. Appends them to the CSV file (creates with headers if needed)
/// 3. Syncs the CSV to disk
/// 4. Renames the WAL to .processed
/// 5. Returns the number of sets processed
///
/// # Safety
/// - CSV is fsynced before the WAL is renamed
/// - WAL is renamed (not deleted) to allow manual recovery if needed
/// - Processed WAL files can be cleaned up separately
pub fn wal_to_csv_and_archive(wal_path: &Path, csv_path: &Path) -> Result<usize> {
    let sets = crate::setlog::read_sets(wal_path)?;

    if sets.is_empty() {
        tracing::info!("No sets in WAL to roll up");
        return Ok(0);
    }

    // Ensure parent directory exists
    if let Some(parent) = csv_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(csv_path)?;

    // Write headers only when the file is fresh
    let needs_headers = file.metadata()?.len() == 0;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(needs_headers)
        .from_writer(file);

    for set in &sets {
        let row = CsvRow::from(set);
        writer.serialize(row)?;
    }

    // Flush and sync to disk
    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    file.sync_all()?;

    tracing::info!("Wrote {} sets to CSV", sets.len());

    // Atomically archive the WAL by renaming it
    let processed_path = wal_path.with_extension("wal.processed");
    std::fs::rename(wal_path, &processed_path)?;

    tracing::info!("Archived WAL to {:?}", processed_path);

    Ok(sets.len())
}

/// Clean up old processed WAL files
///
/// This removes all .wal.processed files in the given directory.
pub fn cleanup_processed_wals(dir: &Path) -> Result<usize> {
    if !dir.exists() {
        return Ok(0);
    }

    let mut count = 0;
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if let Some(extension) = path.extension() {
            if extension == "processed" {
                std::fs::remove_file(&path)?;
                tracing::debug!("Removed processed WAL: {:?}", path);
                count += 1;
            }
        }
    }

    if count > 0 {
        tracing::info!("Cleaned up {} processed WAL files", count);
    }

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setlog::SetSink;
    use chrono::NaiveDate;
    use std::fs::File;
    use uuid::Uuid;

    fn create_test_set(exercise_id: u32) -> LoggedSet {
        LoggedSet {
            id: Uuid::new_v4(),
            user_id: 1,
            exercise_id,
            date: NaiveDate::from_ymd_opt(2024, 2, 14).unwrap(),
            sets_done: 1,
            reps_done: 10,
            weight_used: Some(60.0),
            rpe: Some(8),
        }
    }

    #[test]
    fn test_wal_to_csv_creates_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let wal_path = temp_dir.path().join("sets.wal");
        let csv_path = temp_dir.path().join("sets.csv");

        let mut sink = crate::setlog::JsonlSink::new(&wal_path);
        for i in 0..3 {
            sink.append(&create_test_set(i)).unwrap();
        }

        let count = wal_to_csv_and_archive(&wal_path, &csv_path).unwrap();
        assert_eq!(count, 3);

        // Verify CSV exists
        assert!(csv_path.exists());

        // Verify WAL was archived
        assert!(!wal_path.exists());
        assert!(wal_path.with_extension("wal.processed").exists());
    }

    #[test]
    fn test_wal_to_csv_appends() {
        let temp_dir = tempfile::tempdir().unwrap();
        let wal_path = temp_dir.path().join("sets.wal");
        let csv_path = temp_dir.path().join("sets.csv");

        // First rollup
        let mut sink = crate::setlog::JsonlSink::new(&wal_path);
        sink.append(&create_test_set(1)).unwrap();
        let count1 = wal_to_csv_and_archive(&wal_path, &csv_path).unwrap();
        assert_eq!(count1, 1);

        // Second rollup (appends)
        let mut sink = crate::setlog::JsonlSink::new(&wal_path);
        sink.append(&create_test_set(2)).unwrap();
        let count2 = wal_to_csv_and_archive(&wal_path, &csv_path).unwrap();
        assert_eq!(count2, 1);

        // Verify CSV has both entries
        let reader = csv::Reader::from_path(&csv_path).unwrap();
        let record_count = reader.into_records().count();
        assert_eq!(record_count, 2);
    }

    #[test]
    fn test_empty_wal() {
        let temp_dir = tempfile::tempdir().unwrap();
        let wal_path = temp_dir.path().join("empty.wal");
        let csv_path = temp_dir.path().join("sets.csv");

        File::create(&wal_path).unwrap();

        let count = wal_to_csv_and_archive(&wal_path, &csv_path).unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_cleanup_processed_wals() {
        let temp_dir = tempfile::tempdir().unwrap();

        File::create(temp_dir.path().join("s1.wal.processed")).unwrap();
        File::create(temp_dir.path().join("s2.wal.processed")).unwrap();
        File::create(temp_dir.path().join("keep.wal")).unwrap();

        let count = cleanup_processed_wals(temp_dir.path()).unwrap();
        assert_eq!(count, 2);

        // Verify only .processed files were removed
        assert!(!temp_dir.path().join("s1.wal.processed").exists());
        assert!(!temp_dir.path().join("s2.wal.processed").exists());
        assert!(temp_dir.path().join("keep.wal").exists());
    }
}

//! Core domain types for the Setflow workout engine.
//!
//! This module defines the fundamental types used throughout the system:
//! - Exercises and plan entries (with per-slot overrides)
//! - Weekly plans and their day schedule
//! - Logged sets (the append-only progress record)
//! - Derived user statistics

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fallback set count when neither the plan slot nor the exercise specify one
pub const FALLBACK_SETS: u32 = 3;

/// Fallback rep target when neither the plan slot nor the exercise specify one
pub const FALLBACK_REPS: u32 = 10;

/// Fallback rest period after a completed set, in seconds
pub const DEFAULT_REST_SECONDS: u32 = 90;

// ============================================================================
// Exercise and Plan Types
// ============================================================================

/// An exercise definition (e.g., "Barbell Bench Press")
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Exercise {
    pub id: u32,
    pub name: String,
    pub primary_muscle: String,
    pub default_sets: Option<u32>,
    pub default_reps: Option<u32>,
    pub base_difficulty: u8,
    pub demo_url: Option<String>,
}

/// One slot in a plan day: an exercise plus optional per-slot overrides
///
/// Read-only during a session. Effective set/rep/rest numbers are always
/// resolved as: slot override, then exercise default, then the hardcoded
/// fallback.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlanEntry {
    pub exercise: Exercise,
    pub sets_override: Option<u32>,
    pub reps_override: Option<u32>,
    pub rest_seconds: Option<u32>,
    pub order_in_day: u32,
}

impl PlanEntry {
    /// Total sets required for this slot
    pub fn total_sets(&self) -> u32 {
        self.sets_override
            .or(self.exercise.default_sets)
            .unwrap_or(FALLBACK_SETS)
    }

    /// Target reps per set for this slot
    pub fn target_reps(&self) -> u32 {
        self.reps_override
            .or(self.exercise.default_reps)
            .unwrap_or(FALLBACK_REPS)
    }

    /// Rest period after each set of this slot, in seconds
    pub fn rest_seconds(&self) -> u32 {
        self.rest_seconds.unwrap_or(DEFAULT_REST_SECONDS)
    }
}

/// One calendar day within a weekly plan
///
/// Rest days carry an empty entry list.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlanDay {
    /// Training focus label (e.g., "Push", "Pull", "Rest")
    pub label: String,
    pub entries: Vec<PlanEntry>,
}

impl PlanDay {
    pub fn is_rest_day(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A complete weekly workout plan, Monday-first
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WeeklyPlan {
    pub id: String,
    pub name: String,
    pub split_type: String,
    pub difficulty: String,
    pub goal: String,
    /// Exactly seven days, index 0 = Monday
    pub days: Vec<PlanDay>,
}

impl WeeklyPlan {
    /// The scheduled entries for a given weekday, ordered for execution
    pub fn workout_for(&self, weekday: chrono::Weekday) -> &[PlanEntry] {
        self.day_for(weekday)
            .map(|d| d.entries.as_slice())
            .unwrap_or(&[])
    }

    /// The day slot for a given weekday, if the schedule defines one
    pub fn day_for(&self, weekday: chrono::Weekday) -> Option<&PlanDay> {
        self.days.get(weekday.num_days_from_monday() as usize)
    }
}

// ============================================================================
// Logged Set and Statistics Types
// ============================================================================

/// One completed set, as persisted to the set log
///
/// Immutable once written; the aggregate view over all of a user's logged
/// sets is the sole input to statistics.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggedSet {
    pub id: Uuid,
    pub user_id: u32,
    pub exercise_id: u32,
    /// Calendar day (host-local), not a timestamp
    pub date: NaiveDate,
    pub sets_done: u32,
    pub reps_done: u32,
    pub weight_used: Option<f64>,
    /// Rate of Perceived Exertion, 1-10
    pub rpe: Option<u8>,
}

impl LoggedSet {
    /// Training volume contributed by this set (missing weight counts as 0)
    pub fn volume(&self) -> f64 {
        self.weight_used.unwrap_or(0.0) * self.reps_done as f64
    }
}

/// Aggregate statistics derived from a user's logged sets
///
/// Recomputed on demand, never stored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    /// Count of distinct workout days
    pub total_workouts: usize,
    /// Sum of weight x reps across all logged sets
    pub total_volume: f64,
    /// Count of logged set rows
    pub total_sets: usize,
    /// Consecutive calendar days with at least one logged set
    pub current_streak: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(sets_override: Option<u32>, default_sets: Option<u32>) -> PlanEntry {
        PlanEntry {
            exercise: Exercise {
                id: 1,
                name: "Squat".into(),
                primary_muscle: "Legs".into(),
                default_sets,
                default_reps: Some(12),
                base_difficulty: 6,
                demo_url: None,
            },
            sets_override,
            reps_override: None,
            rest_seconds: None,
            order_in_day: 1,
        }
    }

    #[test]
    fn test_total_sets_prefers_override() {
        assert_eq!(entry(Some(5), Some(4)).total_sets(), 5);
    }

    #[test]
    fn test_total_sets_falls_back_to_default() {
        assert_eq!(entry(None, Some(4)).total_sets(), 4);
    }

    #[test]
    fn test_total_sets_hardcoded_fallback() {
        assert_eq!(entry(None, None).total_sets(), FALLBACK_SETS);
    }

    #[test]
    fn test_target_reps_resolution() {
        let mut e = entry(None, None);
        assert_eq!(e.target_reps(), 12);
        e.reps_override = Some(8);
        assert_eq!(e.target_reps(), 8);
        e.reps_override = None;
        e.exercise.default_reps = None;
        assert_eq!(e.target_reps(), FALLBACK_REPS);
    }

    #[test]
    fn test_rest_seconds_default() {
        let mut e = entry(None, None);
        assert_eq!(e.rest_seconds(), DEFAULT_REST_SECONDS);
        e.rest_seconds = Some(120);
        assert_eq!(e.rest_seconds(), 120);
    }

    #[test]
    fn test_volume_treats_missing_weight_as_zero() {
        let set = LoggedSet {
            id: Uuid::new_v4(),
            user_id: 1,
            exercise_id: 1,
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            sets_done: 1,
            reps_done: 15,
            weight_used: None,
            rpe: None,
        };
        assert_eq!(set.volume(), 0.0);
    }

    #[test]
    fn test_workout_for_out_of_range_day_is_empty() {
        let plan = WeeklyPlan {
            id: "p".into(),
            name: "P".into(),
            split_type: "Push-Pull".into(),
            difficulty: "Intermediate".into(),
            goal: "Build".into(),
            days: vec![],
        };
        assert!(plan.workout_for(chrono::Weekday::Mon).is_empty());
    }
}

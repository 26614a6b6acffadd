//! Built-in exercise catalog and default weekly plan.
//!
//! This module provides the stock exercises and the default Push-Pull
//! split plan. The plan is the "fetch today's workout" collaborator for
//! the session engine: exercises are keyed by weekday (Monday = 0).

use crate::types::*;
use once_cell::sync::Lazy;

/// Cached default plan - built once and reused across all operations
static DEFAULT_PLAN: Lazy<WeeklyPlan> = Lazy::new(build_default_plan_internal);

/// Get a reference to the cached default plan
pub fn get_default_plan() -> &'static WeeklyPlan {
    &DEFAULT_PLAN
}

/// Builds the default Push-Pull split plan with built-in exercises
///
/// **Note**: For production use, prefer `get_default_plan()` which returns
/// a cached reference. This function is retained for testing and custom
/// plan creation.
pub fn build_default_plan() -> WeeklyPlan {
    build_default_plan_internal()
}

fn exercise(
    id: u32,
    name: &str,
    primary_muscle: &str,
    default_sets: u32,
    default_reps: u32,
    base_difficulty: u8,
) -> Exercise {
    Exercise {
        id,
        name: name.into(),
        primary_muscle: primary_muscle.into(),
        default_sets: Some(default_sets),
        default_reps: Some(default_reps),
        base_difficulty,
        demo_url: None,
    }
}

fn slot(exercise: Exercise, order_in_day: u32, rest_seconds: u32) -> PlanEntry {
    PlanEntry {
        exercise,
        sets_override: None,
        reps_override: None,
        rest_seconds: Some(rest_seconds),
        order_in_day,
    }
}

fn rest_day() -> PlanDay {
    PlanDay {
        label: "Rest".into(),
        entries: vec![],
    }
}

/// Internal function that actually builds the plan
fn build_default_plan_internal() -> WeeklyPlan {
    // ========================================================================
    // Exercises
    // ========================================================================

    let bench_press = exercise(1, "Barbell Bench Press", "Chest", 4, 8, 7);
    let incline_press = exercise(2, "Incline Dumbbell Press", "Chest", 3, 10, 6);
    let tricep_dips = exercise(3, "Tricep Dips", "Triceps", 3, 12, 5);
    let overhead_press = exercise(4, "Overhead Press", "Shoulders", 4, 8, 7);
    let pullups = exercise(5, "Pull-ups", "Back", 3, 8, 8);
    let barbell_rows = exercise(6, "Barbell Rows", "Back", 4, 10, 6);
    let bicep_curls = exercise(7, "Bicep Curls", "Biceps", 3, 12, 4);
    let squats = exercise(8, "Squats", "Legs", 4, 12, 6);

    // ========================================================================
    // Weekly schedule (Monday = 0)
    // ========================================================================

    let push_day = PlanDay {
        label: "Push".into(),
        entries: vec![
            slot(bench_press.clone(), 1, 120),
            slot(incline_press.clone(), 2, 90),
            slot(overhead_press.clone(), 3, 90),
            slot(tricep_dips.clone(), 4, 60),
        ],
    };

    let pull_day = PlanDay {
        label: "Pull".into(),
        entries: vec![
            slot(pullups.clone(), 1, 120),
            slot(barbell_rows.clone(), 2, 90),
            slot(bicep_curls.clone(), 3, 60),
        ],
    };

    let leg_day = PlanDay {
        label: "Legs".into(),
        entries: vec![slot(squats.clone(), 1, 120)],
    };

    WeeklyPlan {
        id: "push_pull_split".into(),
        name: "Push-Pull Split".into(),
        split_type: "Push-Pull".into(),
        difficulty: "Intermediate".into(),
        goal: "Build".into(),
        days: vec![
            push_day.clone(), // Monday
            pull_day.clone(), // Tuesday
            rest_day(),       // Wednesday
            push_day,         // Thursday
            pull_day,         // Friday
            leg_day,          // Saturday
            rest_day(),       // Sunday
        ],
    }
}

impl WeeklyPlan {
    /// Validate the plan for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.id.is_empty() {
            errors.push("Plan has empty ID".to_string());
        }
        if self.name.is_empty() {
            errors.push("Plan has empty name".to_string());
        }
        if self.days.len() != 7 {
            errors.push(format!(
                "Plan '{}' must have 7 days, has {}",
                self.id,
                self.days.len()
            ));
        }

        let mut has_training_day = false;
        for (day_idx, day) in self.days.iter().enumerate() {
            if !day.is_rest_day() {
                has_training_day = true;
            }

            let mut seen_orders = std::collections::HashSet::new();
            for entry in &day.entries {
                if entry.exercise.name.is_empty() {
                    errors.push(format!(
                        "Day {}: exercise {} has empty name",
                        day_idx, entry.exercise.id
                    ));
                }
                if !seen_orders.insert(entry.order_in_day) {
                    errors.push(format!(
                        "Day {}: duplicate order_in_day {}",
                        day_idx, entry.order_in_day
                    ));
                }
                if entry.sets_override == Some(0) {
                    errors.push(format!(
                        "Day {}: exercise '{}' has zero sets override",
                        day_idx, entry.exercise.name
                    ));
                }
                if entry.reps_override == Some(0) {
                    errors.push(format!(
                        "Day {}: exercise '{}' has zero reps override",
                        day_idx, entry.exercise.name
                    ));
                }
                if entry.rest_seconds == Some(0) {
                    errors.push(format!(
                        "Day {}: exercise '{}' has zero rest seconds",
                        day_idx, entry.exercise.name
                    ));
                }
            }
        }

        if !has_training_day {
            errors.push(format!("Plan '{}' has no training days", self.id));
        }

        errors
    }
}

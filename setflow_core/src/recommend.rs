//! RPE-based adjustment recommendations.
//!
//! A simple threshold rule over the two most recent logged sets for an
//! exercise: consistently easy work suggests adding reps, consistently
//! grinding work suggests backing off.

use crate::LoggedSet;
use std::fmt;

/// RPE assumed when a set was logged without one
const NEUTRAL_RPE: f64 = 5.0;

/// Average RPE at or below which an increase is suggested
const EASY_THRESHOLD: f64 = 7.0;

/// Average RPE at or above which a decrease is suggested
const HARD_THRESHOLD: f64 = 9.0;

/// Suggested adjustment for the next session of an exercise
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Recommendation {
    /// Recent work was easy; add ~10% reps next session
    Increase,
    /// Recent work was grinding; reduce weight or reps ~10% next session
    Decrease,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::Increase => {
                write!(f, "Consider increasing reps by 10% next session")
            }
            Recommendation::Decrease => {
                write!(f, "Consider reducing weight or reps by 10% next session")
            }
        }
    }
}

/// Recommend an adjustment for `exercise_id` from recent history
///
/// `log` must be ordered newest first (as `history::load_user_history`
/// returns it). Returns None until at least two sets of the exercise have
/// been logged, or when the average RPE sits in the productive middle.
pub fn recommend_adjustment(log: &[LoggedSet], exercise_id: u32) -> Option<Recommendation> {
    let recent: Vec<&LoggedSet> = log
        .iter()
        .filter(|s| s.exercise_id == exercise_id)
        .take(2)
        .collect();

    if recent.len() < 2 {
        return None;
    }

    let avg_rpe = recent
        .iter()
        .map(|s| s.rpe.map(f64::from).unwrap_or(NEUTRAL_RPE))
        .sum::<f64>()
        / recent.len() as f64;

    if avg_rpe <= EASY_THRESHOLD {
        Some(Recommendation::Increase)
    } else if avg_rpe >= HARD_THRESHOLD {
        Some(Recommendation::Decrease)
    } else {
        None
    }
}

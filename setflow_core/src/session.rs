//! Workout session state machine.
//!
//! A session holds the live progression through one workout: the current
//! exercise index, the current set number, and an active flag. All state
//! lives in an explicit [`WorkoutSession`] value owned by the caller; there
//! is no ambient global store. Transitions are driven by discrete UI
//! events (complete a set, advance, end).

use crate::{Error, PlanEntry, Result};

/// Result of completing a set, telling the caller what to do next
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SetOutcome {
    /// More sets remain for this exercise; start a rest timer for
    /// this many seconds before the next one.
    Rest { seconds: u32 },
    /// That was the last set of the current exercise; the caller must
    /// now call [`WorkoutSession::advance_exercise`].
    ExerciseFinished,
}

/// Result of advancing past the current exercise
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Moved to the next exercise; set counter reset to 1
    NextExercise,
    /// That was the last exercise; the session has ended
    WorkoutComplete,
}

/// Live progression state for a single workout
///
/// Lifecycle: `Inactive` -> `start()` -> `Active` -> (natural completion
/// or `end()`) -> `Inactive`. The exercise list is fixed once started.
#[derive(Clone, Debug, Default)]
pub struct WorkoutSession {
    exercises: Vec<PlanEntry>,
    current_exercise_index: usize,
    current_set: u32,
    is_active: bool,
}

impl WorkoutSession {
    /// Create a new, inactive session
    pub fn new() -> Self {
        Self {
            exercises: Vec::new(),
            current_exercise_index: 0,
            current_set: 1,
            is_active: false,
        }
    }

    /// Begin a workout over the given (non-empty) exercise list
    ///
    /// Resets the position to the first set of the first exercise.
    pub fn start(&mut self, exercises: Vec<PlanEntry>) -> Result<()> {
        if exercises.is_empty() {
            return Err(Error::InvalidTransition(
                "cannot start a workout with no exercises".into(),
            ));
        }

        self.exercises = exercises;
        self.current_exercise_index = 0;
        self.current_set = 1;
        self.is_active = true;

        tracing::info!("Workout started with {} exercises", self.exercises.len());
        Ok(())
    }

    /// Record that the current set is done and report what comes next
    ///
    /// If sets remain for the current exercise the set counter advances and
    /// the caller is told to start a rest timer for the slot's rest period.
    /// On the final set nothing is incremented; the caller must advance.
    pub fn complete_set(&mut self) -> Result<SetOutcome> {
        let entry = self.require_active()?;
        let total_sets = entry.total_sets();
        let rest = entry.rest_seconds();

        if self.current_set < total_sets {
            self.current_set += 1;
            tracing::debug!(
                "Set complete, now on set {}/{} of exercise {}",
                self.current_set,
                total_sets,
                self.current_exercise_index
            );
            Ok(SetOutcome::Rest { seconds: rest })
        } else {
            tracing::debug!(
                "Final set of exercise {} complete",
                self.current_exercise_index
            );
            Ok(SetOutcome::ExerciseFinished)
        }
    }

    /// Move to the next exercise, or end the workout if this was the last
    pub fn advance_exercise(&mut self) -> Result<AdvanceOutcome> {
        self.require_active()?;

        if self.current_exercise_index + 1 < self.exercises.len() {
            self.current_exercise_index += 1;
            self.current_set = 1;
            tracing::debug!("Advanced to exercise {}", self.current_exercise_index);
            Ok(AdvanceOutcome::NextExercise)
        } else {
            self.end();
            tracing::info!("Workout complete");
            Ok(AdvanceOutcome::WorkoutComplete)
        }
    }

    /// Reset to the initial inactive state; safe to call repeatedly
    pub fn end(&mut self) {
        self.exercises.clear();
        self.current_exercise_index = 0;
        self.current_set = 1;
        self.is_active = false;
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// 0-based index of the exercise currently in progress
    pub fn current_exercise_index(&self) -> usize {
        self.current_exercise_index
    }

    /// 1-based set number within the current exercise
    pub fn current_set(&self) -> u32 {
        self.current_set
    }

    pub fn exercise_count(&self) -> usize {
        self.exercises.len()
    }

    /// The plan entry currently in progress, if the session is active
    pub fn current_entry(&self) -> Option<&PlanEntry> {
        if self.is_active {
            self.exercises.get(self.current_exercise_index)
        } else {
            None
        }
    }

    fn require_active(&self) -> Result<&PlanEntry> {
        if !self.is_active {
            return Err(Error::InvalidTransition(
                "no active workout session".into(),
            ));
        }
        self.exercises
            .get(self.current_exercise_index)
            .ok_or_else(|| Error::InvalidTransition("session has no exercises".into()))
    }
}

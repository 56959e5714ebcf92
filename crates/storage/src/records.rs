use chrono::{NaiveDateTime, NaiveTime};
use liftlog_domain::ParsedWorkout;
use serde::Serialize;

use crate::Error;

/// First identifier of each identifier stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdOffsets {
    pub workout: u32,
    pub exercise: u32,
    pub set: u32,
}

impl Default for IdOffsets {
    fn default() -> Self {
        Self {
            workout: 1000,
            exercise: 1000,
            set: 1000,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "table")]
pub enum Record {
    #[serde(rename = "workout_logs")]
    WorkoutLog(WorkoutLog),
    #[serde(rename = "logged_exercises")]
    LoggedExercise(LoggedExercise),
    #[serde(rename = "logged_sets")]
    LoggedSet(LoggedSet),
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct WorkoutLog {
    pub id: u32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
    pub date: NaiveDateTime,
    pub workout_plan_id: u32,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct LoggedExercise {
    pub id: u32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
    pub workout_log_id: u32,
    pub exercise_id: u32,
    pub weight_setup: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct LoggedSet {
    pub id: u32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub deleted_at: Option<NaiveDateTime>,
    pub logged_exercise_id: u32,
    pub reps: u32,
    pub weight: f32,
}

/// Emitted records in insertion order: each workout precedes its exercises, each exercise
/// precedes its sets.
#[derive(Serialize, Debug, Default, Clone, PartialEq)]
#[serde(transparent)]
pub struct Records(Vec<Record>);

impl Records {
    #[must_use]
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Next free identifier of one identifier stream. `None` once the stream is exhausted.
#[derive(Debug, Clone, Copy)]
struct IdStream {
    table: &'static str,
    next: Option<u32>,
}

impl IdStream {
    fn new(table: &'static str, start: u32) -> Self {
        Self {
            table,
            next: Some(start),
        }
    }

    fn take(&mut self) -> Result<u32, Error> {
        let id = self.next.ok_or(Error::IdOverflow(self.table))?;
        self.next = id.checked_add(1);
        Ok(id)
    }
}

/// Assigns identifiers and timestamps to parsed workouts.
///
/// All records of an emitter share one creation timestamp. Identifier streams continue across
/// calls of `emit`.
pub struct Emitter {
    workout: IdStream,
    exercise: IdStream,
    set: IdStream,
    timestamp: NaiveDateTime,
}

impl Emitter {
    #[must_use]
    pub fn new(offsets: IdOffsets, timestamp: NaiveDateTime) -> Self {
        Self {
            workout: IdStream::new("workout_logs", offsets.workout),
            exercise: IdStream::new("logged_exercises", offsets.exercise),
            set: IdStream::new("logged_sets", offsets.set),
            timestamp,
        }
    }

    /// # Errors
    ///
    /// Returns [`Error::IdOverflow`] if an identifier stream runs past `u32::MAX`. Identifiers
    /// handed out before the failure stay consumed.
    pub fn emit(&mut self, workouts: &[ParsedWorkout]) -> Result<Records, Error> {
        let mut records = vec![];

        for workout in workouts {
            let workout_log_id = self.workout.take()?;
            records.push(Record::WorkoutLog(WorkoutLog {
                id: workout_log_id,
                created_at: self.timestamp,
                updated_at: self.timestamp,
                deleted_at: None,
                date: workout.date.and_time(NaiveTime::MIN),
                workout_plan_id: *workout.plan_id,
            }));

            for exercise in &workout.exercises {
                let logged_exercise_id = self.exercise.take()?;
                records.push(Record::LoggedExercise(LoggedExercise {
                    id: logged_exercise_id,
                    created_at: self.timestamp,
                    updated_at: self.timestamp,
                    deleted_at: None,
                    workout_log_id,
                    exercise_id: *exercise.exercise_id,
                    weight_setup: String::new(),
                }));

                for set in &exercise.sets {
                    records.push(Record::LoggedSet(LoggedSet {
                        id: self.set.take()?,
                        created_at: self.timestamp,
                        updated_at: self.timestamp,
                        deleted_at: None,
                        logged_exercise_id,
                        reps: set.reps.into(),
                        weight: set.weight.into(),
                    }));
                }
            }
        }

        Ok(Records(records))
    }
}

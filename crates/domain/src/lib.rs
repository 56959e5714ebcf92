#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod alias;
pub mod error;
pub mod line;
pub mod name;
pub mod token;
pub mod workout;

use chrono::{Datelike, Local, NaiveDate};
use derive_more::{Deref, Display, Into};
use thiserror::Error;

pub use alias::{AliasTables, ExerciseTarget};
pub use error::{AliasError, HeaderError, SkipReason};
pub use line::Line;
pub use name::{NameResolver, Resolution};
pub use token::SetList;
pub use workout::{Import, Skip, WorkoutAssembler};

/// Parses a complete exercise log in a single forward pass.
#[must_use]
pub fn parse_log(text: &str, tables: &AliasTables, config: &ImportConfig) -> Import {
    let mut assembler = WorkoutAssembler::new(tables, config);
    for (idx, line) in text.lines().enumerate() {
        assembler.push_line(idx + 1, line);
    }
    assembler.finish()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportConfig {
    /// Year assigned to every header date. Headers carry only month and day.
    pub year: i32,
}

impl ImportConfig {
    #[must_use]
    pub fn new(year: i32) -> Self {
        Self { year }
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            year: Local::now().year(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedWorkout {
    pub date: NaiveDate,
    pub plan_id: PlanID,
    pub exercises: Vec<ParsedExercise>,
}

impl ParsedWorkout {
    #[must_use]
    pub fn new(date: NaiveDate, plan_id: PlanID) -> Self {
        Self {
            date,
            plan_id,
            exercises: vec![],
        }
    }

    #[must_use]
    pub fn num_sets(&self) -> usize {
        self.exercises.iter().map(|e| e.sets.len()).sum()
    }

    #[must_use]
    pub fn volume_load(&self) -> f32 {
        self.exercises.iter().map(ParsedExercise::volume_load).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedExercise {
    pub exercise_id: ExerciseID,
    pub sets: Vec<ParsedSet>,
}

impl ParsedExercise {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn volume_load(&self) -> f32 {
        self.sets
            .iter()
            .map(|s| f32::from(s.weight) * u32::from(s.reps) as f32)
            .sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedSet {
    pub weight: Weight,
    pub reps: Reps,
}

#[derive(Deref, Debug, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExerciseID(u32);

impl From<u32> for ExerciseID {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

#[derive(Deref, Debug, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlanID(u32);

impl From<u32> for PlanID {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Reps(u32);

impl Reps {
    #[must_use]
    pub fn new(value: u32) -> Self {
        Self(value)
    }
}

impl TryFrom<&str> for Reps {
    type Error = RepsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<u32>() {
            Ok(parsed_value) => Ok(Reps::new(parsed_value)),
            Err(_) => Err(RepsError::ParseError),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum RepsError {
    #[error("Reps must be a non-negative integer")]
    ParseError,
}

/// Weight in kg. Negative values denote assistance.
#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Weight(f32);

impl Weight {
    pub fn new(value: f32) -> Result<Self, WeightError> {
        if !value.is_finite() {
            return Err(WeightError::NotFinite);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Weight {
    type Error = WeightError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<f32>() {
            Ok(parsed_value) => Weight::new(parsed_value),
            Err(_) => Err(WeightError::ParseError),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum WeightError {
    #[error("Weight must be finite")]
    NotFinite,
    #[error("Weight must be a decimal")]
    ParseError,
}

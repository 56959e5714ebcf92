#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum HeaderError {
    #[error("unknown month \"{0}\"")]
    UnknownMonth(String),
    #[error("invalid date {month}/{day}")]
    InvalidDate { month: u32, day: String },
    #[error("unknown plan \"{0}\"")]
    UnknownPlan(String),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AliasError {
    #[error("alias must not be empty")]
    EmptyAlias,
    #[error("month must be in the range 1 to 12 ({0})")]
    InvalidMonth(u32),
}

/// Why an input unit was dropped.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("invalid header: {0}")]
    InvalidHeader(#[from] HeaderError),
    #[error("no open workout")]
    NoOpenWorkout,
    #[error("unrecognized line")]
    UnrecognizedLine,
    #[error("no set list found")]
    UnsplittableLine,
    #[error("unresolved exercise \"{0}\"")]
    UnresolvedExercise(String),
    #[error("unmapped exercise \"{0}\"")]
    UnmappedExercise(String),
    #[error("no valid sets")]
    NoSets,
    #[error("invalid set \"{0}\"")]
    InvalidSet(String),
    #[error("empty workout")]
    EmptyWorkout,
}

impl SkipReason {
    /// Stable short code for aggregating skip statistics.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            SkipReason::InvalidHeader(_) => "invalid-header",
            SkipReason::NoOpenWorkout => "no-open-workout",
            SkipReason::UnrecognizedLine => "unrecognized-line",
            SkipReason::UnsplittableLine => "unsplittable-line",
            SkipReason::UnresolvedExercise(_) => "unresolved-exercise",
            SkipReason::UnmappedExercise(_) => "unmapped-exercise",
            SkipReason::NoSets => "no-sets",
            SkipReason::InvalidSet(_) => "invalid-set",
            SkipReason::EmptyWorkout => "empty-workout",
        }
    }
}

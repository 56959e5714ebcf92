use crate::{AliasError, ExerciseID, PlanID};

/// Built-in exercise aliases. Order matters for substring fallback matching.
const EXERCISES: &[(&str, Option<u32>)] = &[
    ("incline press", Some(1)),
    ("fly", Some(2)),
    ("chest fly", Some(2)),
    ("dips", Some(3)),
    ("lat raise", Some(4)),
    ("lay raise", Some(4)),
    ("shoulder press", Some(5)),
    ("squat", Some(6)),
    ("squad", Some(6)),
    ("deadlift", Some(7)),
    ("deadlifts", Some(7)),
    ("bench press", Some(8)),
    ("flat bench", Some(8)),
    ("cable rows", Some(9)),
    ("low rows", Some(9)),
    ("barbell rows", Some(10)),
    ("face pulls", Some(11)),
    ("facepulls", Some(11)),
    ("fave pulls", Some(11)),
    ("pulldowns", Some(12)),
    ("jm press", Some(13)),
    ("jm", Some(13)),
    ("extensions", Some(14)),
    ("pushdown", Some(14)),
    ("pushdown (v)", Some(14)),
    ("incline curls", Some(15)),
    ("hammer curls", Some(16)),
    ("hammer", Some(16)),
    ("calf raises", Some(17)),
    ("calfs", Some(17)),
    ("standing calfs", Some(17)),
    ("ab crunches", Some(18)),
    ("abs crunch", Some(18)),
    ("leg press", Some(19)),
    ("leg extensions", Some(20)),
    ("hamstring curls", Some(21)),
    ("hamstring curl", Some(21)),
    ("hip press", Some(22)),
    ("hip extensions", Some(23)),
    ("hip hinge", Some(23)),
    ("outer thigh", Some(24)),
    ("inner thigh", Some(25)),
    ("pull-ups", None),
    ("pull ups", None),
    ("rear delt", None),
    ("t-bar/kelso", None),
    ("t-bar", None),
    ("kelso", None),
    ("shrugs", None),
    ("skullcrushers", None),
    ("single arm push down", None),
    ("back extensions", None),
    ("hack squat", None),
    ("forearms", None),
    ("bayesian", None),
];

const PLANS: &[(&str, u32)] = &[
    ("push", 1),
    ("pull", 2),
    ("legs", 3),
    ("lower", 5),
    ("upper", 4),
    ("active rest", 6),
    ("rest", 7),
];

const MONTHS: &[(&str, u32)] = &[
    ("jan", 1),
    ("feb", 2),
    ("mar", 3),
    ("apr", 4),
    ("may", 5),
    ("jun", 6),
    ("jul", 7),
    ("aug", 8),
    ("sep", 9),
    ("oct", 10),
    ("nov", 11),
    ("dec", 12),
];

/// Value of an exercise alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExerciseTarget {
    Exercise(ExerciseID),
    /// Known phrase without a canonical exercise.
    Unmapped,
}

impl From<Option<ExerciseID>> for ExerciseTarget {
    fn from(value: Option<ExerciseID>) -> Self {
        match value {
            Some(id) => ExerciseTarget::Exercise(id),
            None => ExerciseTarget::Unmapped,
        }
    }
}

/// Alias configuration used to resolve free-text phrases.
///
/// All keys are stored normalized (lowercase, single spaces). The exercise table keeps its
/// definition order, which decides ties in substring fallback matching.
#[derive(Debug, Clone, PartialEq)]
pub struct AliasTables {
    exercises: Vec<(String, ExerciseTarget)>,
    plans: Vec<(String, PlanID)>,
    months: Vec<(String, u32)>,
}

impl AliasTables {
    pub fn new(
        exercises: Vec<(String, ExerciseTarget)>,
        plans: Vec<(String, PlanID)>,
        months: Vec<(String, u32)>,
    ) -> Result<Self, AliasError> {
        let exercises = exercises
            .into_iter()
            .map(|(key, target)| Ok((normalize_key(&key)?, target)))
            .collect::<Result<Vec<_>, AliasError>>()?;
        let plans = plans
            .into_iter()
            .map(|(key, id)| Ok((normalize_key(&key)?, id)))
            .collect::<Result<Vec<_>, AliasError>>()?;
        let months = months
            .into_iter()
            .map(|(key, month)| {
                if !(1..=12).contains(&month) {
                    return Err(AliasError::InvalidMonth(month));
                }
                Ok((abbreviation(&normalize_key(&key)?), month))
            })
            .collect::<Result<Vec<_>, AliasError>>()?;

        Ok(Self {
            exercises,
            plans,
            months,
        })
    }

    #[must_use]
    pub fn exercises(&self) -> &[(String, ExerciseTarget)] {
        &self.exercises
    }

    #[must_use]
    pub fn plans(&self) -> &[(String, PlanID)] {
        &self.plans
    }

    #[must_use]
    pub fn months(&self) -> &[(String, u32)] {
        &self.months
    }

    /// Exact lookup of an already normalized exercise name.
    #[must_use]
    pub fn exercise(&self, name: &str) -> Option<ExerciseTarget> {
        self.exercises
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, target)| *target)
    }

    #[must_use]
    pub fn plan(&self, phrase: &str) -> Option<PlanID> {
        let phrase = phrase.trim().to_lowercase();
        self.plans
            .iter()
            .find(|(key, _)| *key == phrase)
            .map(|(_, id)| *id)
    }

    /// Looks up a month by the first three letters of `word`.
    #[must_use]
    pub fn month(&self, word: &str) -> Option<u32> {
        let abbreviation = abbreviation(&word.trim().to_lowercase());
        self.months
            .iter()
            .find(|(key, _)| *key == abbreviation)
            .map(|(_, month)| *month)
    }
}

impl Default for AliasTables {
    fn default() -> Self {
        Self {
            exercises: EXERCISES
                .iter()
                .map(|(key, id)| ((*key).to_string(), id.map(ExerciseID::from).into()))
                .collect(),
            plans: PLANS
                .iter()
                .map(|(key, id)| ((*key).to_string(), PlanID::from(*id)))
                .collect(),
            months: MONTHS
                .iter()
                .map(|(key, month)| ((*key).to_string(), *month))
                .collect(),
        }
    }
}

fn normalize_key(key: &str) -> Result<String, AliasError> {
    let key = key.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();

    if key.is_empty() {
        return Err(AliasError::EmptyAlias);
    }

    Ok(key)
}

fn abbreviation(word: &str) -> String {
    word.chars().take(3).collect()
}

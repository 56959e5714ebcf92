use std::sync::LazyLock;

use regex::Regex;

use crate::{AliasTables, ExerciseID, ExerciseTarget};

static ANNOTATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*\([^)]+\)").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Exercise(ExerciseID),
    /// The alias table knows the phrase but maps it to no exercise.
    Unmapped,
    Unresolved,
}

pub struct NameResolver<'a> {
    tables: &'a AliasTables,
}

impl<'a> NameResolver<'a> {
    #[must_use]
    pub fn new(tables: &'a AliasTables) -> Self {
        Self { tables }
    }

    /// Resolves a raw exercise name.
    ///
    /// An exact alias match wins. Otherwise the first mapped alias in table order that contains
    /// the name, or is contained in it, is taken. A name that normalizes to nothing is contained
    /// in every alias and therefore resolves to the first mapped one.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Resolution {
        let name = normalize(name);

        if let Some(target) = self.tables.exercise(&name) {
            return match target {
                ExerciseTarget::Exercise(id) => Resolution::Exercise(id),
                ExerciseTarget::Unmapped => Resolution::Unmapped,
            };
        }

        self.tables
            .exercises()
            .iter()
            .find_map(|(key, target)| match target {
                ExerciseTarget::Exercise(id) if name.contains(key) || key.contains(&name) => {
                    Some(Resolution::Exercise(*id))
                }
                _ => None,
            })
            .unwrap_or(Resolution::Unresolved)
    }
}

/// Normalizes a raw exercise name. Applying it to its own result yields the same name.
#[must_use]
pub fn normalize(name: &str) -> String {
    let name = name.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
    let name = ANNOTATION.replace_all(&name, "");
    let name = name
        .trim_end_matches(|c: char| c == '-' || c.is_whitespace())
        .trim_start();

    if name.contains("machine") && name.contains("raise") {
        return "lat raise".to_string();
    }
    if name.contains("dumbbell") && name.contains("lat raise") {
        return "lat raise".to_string();
    }
    if name.contains("single arm") && name.contains("push") {
        return "extensions".to_string();
    }
    if name.contains("skullcrushers") || name.contains("skull crushers") {
        return "extensions".to_string();
    }
    if name.contains("hack squat") {
        return "squat".to_string();
    }
    if name.contains("standing") && name.contains("calf") {
        return "calfs".to_string();
    }

    name.to_string()
}

use std::sync::LazyLock;

use regex::Regex;

use crate::{ParsedSet, Reps, RepsError, Weight, WeightError};

static TRAILING_NOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\([^)]+\)\s*$").unwrap());
static TRAILING_NOISE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[?+\s]+$").unwrap());
static SET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^([-0-9.]+s?)(?:\s*x\s*([0-9]*)|\s*$)").unwrap());

/// Parses a weight token such as `40`, `-100` or `25s`.
pub fn parse_weight(token: &str) -> Result<Weight, WeightError> {
    let token = token.trim().to_lowercase();
    Weight::try_from(token.strip_suffix('s').unwrap_or(&token))
}

/// Parses a repetition token such as `7` or `6?`.
pub fn parse_reps(token: &str) -> Result<Reps, RepsError> {
    let token = TRAILING_NOISE.replace(token.trim(), "");
    Reps::try_from(&*token)
}

/// Result of parsing a comma-separated set list.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SetList {
    pub sets: Vec<ParsedSet>,
    /// Tokens that were dropped, as they appeared after cleanup.
    pub invalid: Vec<String>,
}

/// Parses a set list such as `40x7, 40x6 (form reset)`.
///
/// A token without a repetition count (`40x` or a bare `40`) repeats the count of the previous
/// set in the same list. Alternatives (`25x6/7`) and progressions (`70x11 ->80`) keep their
/// first value.
#[must_use]
pub fn parse_sets(text: &str) -> SetList {
    let mut result = SetList::default();
    let mut last_reps: Option<Reps> = None;

    let text = TRAILING_NOTE.replace(text, "");

    for token in text.split(',') {
        let token = TRAILING_NOISE.replace(token.trim(), "");
        let token = first_alternative(&token);

        if token.is_empty() {
            continue;
        }

        match parse_set(token, &mut last_reps) {
            Some(set) => result.sets.push(set),
            None => result.invalid.push(token.to_string()),
        }
    }

    result
}

fn first_alternative(token: &str) -> &str {
    let token = token.split('/').next().unwrap_or(token).trim();
    match token.split_once("->") {
        Some((start, _)) => start.trim(),
        None => token,
    }
}

fn parse_set(token: &str, last_reps: &mut Option<Reps>) -> Option<ParsedSet> {
    let captures = SET.captures(token)?;
    let weight = parse_weight(&captures[1]).ok()?;

    let reps = match captures.get(2).map_or("", |m| m.as_str()) {
        "" => (*last_reps)?,
        digits => {
            let reps = parse_reps(digits).ok()?;
            *last_reps = Some(reps);
            reps
        }
    };

    Some(ParsedSet { weight, reps })
}

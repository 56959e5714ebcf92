use std::sync::LazyLock;

use regex::Regex;

static HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z]+)\s+([0-9]+)\s*\(([^)]+)\)").unwrap());
static SET_HINT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]s?\s*x\s*[0-9]").unwrap());
static SET_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\s+([-0-9.]+s?\s*x\s*[0-9])").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    Blank,
    Header(Header<'a>),
    Exercise(&'a str),
    /// Looks like an exercise entry, but no workout is open.
    Orphan(&'a str),
    Other(&'a str),
}

/// Unresolved parts of a session header like `Oct 13 (push)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header<'a> {
    pub month: &'a str,
    pub day: &'a str,
    pub plan: &'a str,
}

#[must_use]
pub fn classify(line: &str, workout_open: bool) -> Line<'_> {
    let line = line.trim();

    if line.is_empty() {
        return Line::Blank;
    }

    if let Some(captures) = HEADER.captures(line) {
        if let (Some(month), Some(day), Some(plan)) =
            (captures.get(1), captures.get(2), captures.get(3))
        {
            return Line::Header(Header {
                month: month.as_str(),
                day: day.as_str(),
                plan: plan.as_str(),
            });
        }
    }

    if line.contains(" - ") || SET_HINT.is_match(line) {
        if workout_open {
            Line::Exercise(line)
        } else {
            Line::Orphan(line)
        }
    } else {
        Line::Other(line)
    }
}

/// Splits an exercise entry into its name and set list.
#[must_use]
pub fn split_exercise(line: &str) -> Option<(&str, &str)> {
    if let Some((name, sets)) = line.split_once(" - ") {
        return Some((name.trim(), sets.trim()));
    }

    if let Some((name, _)) = line.split_once(" -") {
        return Some((name.trim(), ""));
    }

    let captures = SET_START.captures(line)?;
    let (name, sets) = (captures.get(1)?, captures.get(2)?);
    Some((name.as_str().trim(), line[sets.start()..].trim()))
}

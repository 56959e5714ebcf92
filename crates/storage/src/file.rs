use std::{fs, io::Write, path::Path};

use liftlog_domain::{AliasTables, ExerciseID, ExerciseTarget, PlanID};
use log::debug;
use serde::Deserialize;

use crate::{Error, Records};

/// Alias file contents. Missing sections fall back to the built-in tables.
#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct AliasFile {
    exercises: Option<Vec<(String, Option<u32>)>>,
    plans: Option<Vec<(String, u32)>>,
    months: Option<Vec<(String, u32)>>,
}

pub fn read_log(path: &Path) -> Result<String, Error> {
    let text = fs::read_to_string(path)?;
    debug!("read {} bytes from {}", text.len(), path.display());
    Ok(text)
}

pub fn read_aliases(path: &Path) -> Result<AliasTables, Error> {
    parse_aliases(&fs::read_to_string(path)?)
}

pub fn parse_aliases(json: &str) -> Result<AliasTables, Error> {
    let file: AliasFile = serde_json::from_str(json)?;
    let defaults = AliasTables::default();

    let exercises: Vec<(String, ExerciseTarget)> = match file.exercises {
        Some(exercises) => exercises
            .into_iter()
            .map(|(key, id)| (key, id.map(ExerciseID::from).into()))
            .collect(),
        None => defaults.exercises().to_vec(),
    };
    let plans: Vec<(String, PlanID)> = match file.plans {
        Some(plans) => plans
            .into_iter()
            .map(|(key, id)| (key, PlanID::from(id)))
            .collect(),
        None => defaults.plans().to_vec(),
    };
    let months = file.months.unwrap_or_else(|| defaults.months().to_vec());

    Ok(AliasTables::new(exercises, plans, months)?)
}

pub fn write_records(writer: impl Write, records: &Records) -> Result<(), Error> {
    serde_json::to_writer_pretty(writer, records)?;
    Ok(())
}

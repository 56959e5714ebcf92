use std::collections::BTreeMap;

use chrono::NaiveDate;
use log::{debug, warn};

use crate::{
    AliasTables, HeaderError, ImportConfig, NameResolver, ParsedExercise, ParsedWorkout, PlanID,
    Resolution, SkipReason,
    line::{self, Header, Line},
    token,
};

/// Outcome of parsing a complete log.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Import {
    pub workouts: Vec<ParsedWorkout>,
    pub skipped: Vec<Skip>,
}

impl Import {
    #[must_use]
    pub fn num_exercises(&self) -> usize {
        self.workouts.iter().map(|w| w.exercises.len()).sum()
    }

    #[must_use]
    pub fn num_sets(&self) -> usize {
        self.workouts.iter().map(ParsedWorkout::num_sets).sum()
    }

    #[must_use]
    pub fn volume_load(&self) -> f32 {
        self.workouts.iter().map(ParsedWorkout::volume_load).sum()
    }

    /// Number of skipped units per reason code.
    #[must_use]
    pub fn skip_counts(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for skip in &self.skipped {
            *counts.entry(skip.reason.code()).or_insert(0) += 1;
        }
        counts
    }
}

/// A dropped input unit and the 1-based line it originated from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skip {
    pub line: usize,
    pub reason: SkipReason,
}

struct OpenWorkout {
    line: usize,
    workout: ParsedWorkout,
}

/// Accumulates classified lines into workouts in a single forward pass.
pub struct WorkoutAssembler<'a> {
    tables: &'a AliasTables,
    resolver: NameResolver<'a>,
    year: i32,
    current: Option<OpenWorkout>,
    import: Import,
}

impl<'a> WorkoutAssembler<'a> {
    #[must_use]
    pub fn new(tables: &'a AliasTables, config: &ImportConfig) -> Self {
        Self {
            tables,
            resolver: NameResolver::new(tables),
            year: config.year,
            current: None,
            import: Import::default(),
        }
    }

    pub fn push_line(&mut self, line_number: usize, line: &str) {
        match line::classify(line, self.current.is_some()) {
            Line::Blank => {}
            Line::Header(header) => self.start_workout(line_number, header),
            Line::Exercise(line) => self.add_exercise(line_number, line),
            Line::Orphan(line) => {
                debug!("ignoring line {line_number} outside of workout: {line}");
                self.skip(line_number, SkipReason::NoOpenWorkout);
            }
            Line::Other(line) => {
                debug!("ignoring unrecognized line {line_number}: {line}");
                self.skip(line_number, SkipReason::UnrecognizedLine);
            }
        }
    }

    #[must_use]
    pub fn finish(mut self) -> Import {
        self.flush();
        self.import
    }

    pub fn parse_header(&self, header: &Header) -> Result<(NaiveDate, PlanID), HeaderError> {
        let month = self
            .tables
            .month(header.month)
            .ok_or_else(|| HeaderError::UnknownMonth(header.month.to_string()))?;
        let date = header
            .day
            .parse::<u32>()
            .ok()
            .and_then(|day| NaiveDate::from_ymd_opt(self.year, month, day))
            .ok_or_else(|| HeaderError::InvalidDate {
                month,
                day: header.day.to_string(),
            })?;
        let plan_id = self
            .tables
            .plan(header.plan)
            .ok_or_else(|| HeaderError::UnknownPlan(header.plan.trim().to_string()))?;
        Ok((date, plan_id))
    }

    fn start_workout(&mut self, line_number: usize, header: Header) {
        self.flush();

        match self.parse_header(&header) {
            Ok((date, plan_id)) => {
                debug!("starting workout on {date} with plan {plan_id}");
                self.current = Some(OpenWorkout {
                    line: line_number,
                    workout: ParsedWorkout::new(date, plan_id),
                });
            }
            Err(err) => {
                warn!("ignoring workout at line {line_number}: {err}");
                self.skip(line_number, err.into());
            }
        }
    }

    fn add_exercise(&mut self, line_number: usize, line: &str) {
        let Some((name, sets)) = line::split_exercise(line) else {
            debug!("no set list in line {line_number}: {line}");
            self.skip(line_number, SkipReason::UnsplittableLine);
            return;
        };

        let exercise_id = match self.resolver.resolve(name) {
            Resolution::Exercise(id) => id,
            Resolution::Unmapped => {
                debug!("skipping unmapped exercise in line {line_number}: {name}");
                self.skip(line_number, SkipReason::UnmappedExercise(name.to_string()));
                return;
            }
            Resolution::Unresolved => {
                debug!("skipping unresolved exercise in line {line_number}: {name}");
                self.skip(line_number, SkipReason::UnresolvedExercise(name.to_string()));
                return;
            }
        };

        let set_list = token::parse_sets(sets);

        for token in set_list.invalid {
            debug!("skipping invalid set in line {line_number}: {token}");
            self.skip(line_number, SkipReason::InvalidSet(token));
        }

        if set_list.sets.is_empty() {
            debug!("skipping exercise without sets in line {line_number}: {line}");
            self.skip(line_number, SkipReason::NoSets);
            return;
        }

        if let Some(current) = &mut self.current {
            current.workout.exercises.push(ParsedExercise {
                exercise_id,
                sets: set_list.sets,
            });
        }
    }

    fn flush(&mut self) {
        if let Some(OpenWorkout { line, workout }) = self.current.take() {
            if workout.exercises.is_empty() {
                debug!("dropping empty workout of line {line}");
                self.skip(line, SkipReason::EmptyWorkout);
            } else {
                self.import.workouts.push(workout);
            }
        }
    }

    fn skip(&mut self, line: usize, reason: SkipReason) {
        self.import.skipped.push(Skip { line, reason });
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::{ExerciseTarget, ParsedSet, Reps, Weight, parse_log};

    fn parse(text: &str) -> Import {
        parse_log(text, &AliasTables::default(), &ImportConfig::new(2025))
    }

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, month, day).unwrap()
    }

    fn exercise(exercise_id: u32, sets: &[(f32, u32)]) -> ParsedExercise {
        ParsedExercise {
            exercise_id: exercise_id.into(),
            sets: sets
                .iter()
                .map(|(weight, reps)| ParsedSet {
                    weight: Weight::new(*weight).unwrap(),
                    reps: Reps::new(*reps),
                })
                .collect(),
        }
    }

    fn skip(line: usize, reason: SkipReason) -> Skip {
        Skip { line, reason }
    }

    #[test]
    fn test_single_workout() {
        assert_eq!(
            parse("Oct 13 (push)\nIncline Press - 40x7, 40x6\nFly - 25sx8, 25sx8").workouts,
            vec![ParsedWorkout {
                date: date(10, 13),
                plan_id: 1.into(),
                exercises: vec![
                    exercise(1, &[(40.0, 7), (40.0, 6)]),
                    exercise(2, &[(25.0, 8), (25.0, 8)]),
                ],
            }]
        );
    }

    #[test]
    fn test_multiple_workouts() {
        let import = parse(
            "Oct 13 (push)\n\
             Incline Press - 40x7, 40x6\n\
             \n\
             Oct 15 (Pull)\n\
             Cable rows - 50x10, 55x\n\
             Face pulls 15x15\n\
             \n\
             Nov 4 (legs)\n\
             Squat - 100x5 (form reset)\n\
             Leg press - 200x10/12, 220x8 ->240\n",
        );

        assert_eq!(
            import.workouts,
            vec![
                ParsedWorkout {
                    date: date(10, 13),
                    plan_id: 1.into(),
                    exercises: vec![exercise(1, &[(40.0, 7), (40.0, 6)])],
                },
                ParsedWorkout {
                    date: date(10, 15),
                    plan_id: 2.into(),
                    exercises: vec![
                        exercise(9, &[(50.0, 10), (55.0, 10)]),
                        exercise(11, &[(15.0, 15)]),
                    ],
                },
                ParsedWorkout {
                    date: date(11, 4),
                    plan_id: 3.into(),
                    exercises: vec![
                        exercise(6, &[(100.0, 5)]),
                        exercise(19, &[(200.0, 10), (220.0, 8)]),
                    ],
                },
            ]
        );
        assert_eq!(import.num_exercises(), 5);
        assert_eq!(import.num_sets(), 8);
        assert_approx_eq!(import.volume_load(), 6055.0);
        assert!(import.skipped.is_empty());
    }

    #[test]
    fn test_annotation_only_name_takes_first_alias() {
        let import = parse("Oct 13 (push)\n(note) - 40x7\n");

        assert_eq!(
            import.workouts,
            vec![ParsedWorkout {
                date: date(10, 13),
                plan_id: 1.into(),
                exercises: vec![exercise(1, &[(40.0, 7)])],
            }]
        );
        assert!(import.skipped.is_empty());
    }

    #[test]
    fn test_invalid_plan_silences_block() {
        let import = parse(
            "Oct 13 (push)\n\
             Dips - 20x8\n\
             Oct 14 (freestyle)\n\
             Incline Press - 40x7\n\
             Fly - 25x8\n\
             Oct 15 (pull)\n\
             Pulldowns - 60x10\n",
        );

        assert_eq!(
            import.workouts,
            vec![
                ParsedWorkout {
                    date: date(10, 13),
                    plan_id: 1.into(),
                    exercises: vec![exercise(3, &[(20.0, 8)])],
                },
                ParsedWorkout {
                    date: date(10, 15),
                    plan_id: 2.into(),
                    exercises: vec![exercise(12, &[(60.0, 10)])],
                },
            ]
        );
        assert_eq!(
            import.skipped,
            vec![
                skip(
                    3,
                    SkipReason::InvalidHeader(HeaderError::UnknownPlan("freestyle".into()))
                ),
                skip(4, SkipReason::NoOpenWorkout),
                skip(5, SkipReason::NoOpenWorkout),
            ]
        );
    }

    #[test]
    fn test_only_invalid_header() {
        let import = parse("Oct 14 (freestyle)\nIncline Press - 40x7\n");

        assert!(import.workouts.is_empty());
    }

    #[rstest]
    #[case("Foo 13 (push)", HeaderError::UnknownMonth("Foo".into()))]
    #[case("Feb 30 (push)", HeaderError::InvalidDate { month: 2, day: "30".into() })]
    #[case("Oct 0 (push)", HeaderError::InvalidDate { month: 10, day: "0".into() })]
    #[case("Oct 99999999999 (push)", HeaderError::InvalidDate { month: 10, day: "99999999999".into() })]
    #[case("Oct 13 ( cardio )", HeaderError::UnknownPlan("cardio".into()))]
    fn test_invalid_header(#[case] text: &str, #[case] expected: HeaderError) {
        let import = parse(&format!("{text}\nIncline Press - 40x7"));

        assert!(import.workouts.is_empty());
        assert_eq!(
            import.skipped,
            vec![
                skip(1, SkipReason::InvalidHeader(expected)),
                skip(2, SkipReason::NoOpenWorkout),
            ]
        );
    }

    #[test]
    fn test_unmapped_exercises_drop_workout() {
        let import = parse("Oct 13 (pull)\nPull-ups - -20x8, -20x7\nShrugs - 60x12\n");

        assert!(import.workouts.is_empty());
        assert_eq!(
            import.skipped,
            vec![
                skip(2, SkipReason::UnmappedExercise("Pull-ups".into())),
                skip(3, SkipReason::UnmappedExercise("Shrugs".into())),
                skip(1, SkipReason::EmptyWorkout),
            ]
        );
    }

    #[test]
    fn test_dropped_exercise_keeps_siblings() {
        let import = parse(
            "Oct 13 (push)\n\
             Zottman curls - 10x10\n\
             Fly - \n\
             Dips - bodyweight x 10\n\
             Incline Press - 40x7, heavy, 40x6\n\
             Lat raise -\n",
        );

        assert_eq!(
            import.workouts,
            vec![ParsedWorkout {
                date: date(10, 13),
                plan_id: 1.into(),
                exercises: vec![exercise(1, &[(40.0, 7), (40.0, 6)])],
            }]
        );
        assert_eq!(
            import.skipped,
            vec![
                skip(2, SkipReason::UnresolvedExercise("Zottman curls".into())),
                skip(3, SkipReason::UnrecognizedLine),
                skip(4, SkipReason::InvalidSet("bodyweight x 10".into())),
                skip(4, SkipReason::NoSets),
                skip(5, SkipReason::InvalidSet("heavy".into())),
                skip(6, SkipReason::UnrecognizedLine),
            ]
        );
    }

    #[test]
    fn test_exercise_without_separator() {
        assert_eq!(
            parse("Oct 13 (push)\nDips 20x8, 20x\nLat pulldown -100x6\n").workouts,
            vec![ParsedWorkout {
                date: date(10, 13),
                plan_id: 1.into(),
                exercises: vec![exercise(3, &[(20.0, 8), (20.0, 8)])],
            }]
        );
    }

    #[test]
    fn test_carry_forward_is_reset_per_exercise() {
        assert_eq!(
            parse("Oct 13 (push)\nDips - 20x8\nFly - 25x, 25x10\n").workouts,
            vec![ParsedWorkout {
                date: date(10, 13),
                plan_id: 1.into(),
                exercises: vec![exercise(3, &[(20.0, 8)]), exercise(2, &[(25.0, 10)])],
            }]
        );
    }

    #[test]
    fn test_lines_before_first_header() {
        let import = parse("Training log\nDips - 20x8\n\nOct 13 (push)\nDips - 20x8\n");

        assert_eq!(import.workouts.len(), 1);
        assert_eq!(
            import.skipped,
            vec![
                skip(1, SkipReason::UnrecognizedLine),
                skip(2, SkipReason::NoOpenWorkout),
            ]
        );
    }

    #[test]
    fn test_explicit_year() {
        let import = parse_log(
            "Jan 2 (upper)\nBench press - 80x5",
            &AliasTables::default(),
            &ImportConfig::new(2026),
        );

        assert_eq!(
            import.workouts[0].date,
            NaiveDate::from_ymd_opt(2026, 1, 2).unwrap()
        );
    }

    #[test]
    fn test_injected_tables() {
        let tables = AliasTables::new(
            vec![("kettlebell swing".to_string(), ExerciseTarget::Exercise(40.into()))],
            vec![("conditioning".to_string(), 9.into())],
            vec![("oct".to_string(), 10)],
        )
        .unwrap();
        let import = parse_log(
            "Oct 13 (Conditioning)\nKettlebell swings - 24x20\nIncline Press - 40x7\n",
            &tables,
            &ImportConfig::new(2025),
        );

        assert_eq!(
            import.workouts,
            vec![ParsedWorkout {
                date: date(10, 13),
                plan_id: 9.into(),
                exercises: vec![exercise(40, &[(24.0, 20)])],
            }]
        );
    }

    #[test]
    fn test_skip_counts() {
        let import = parse("Oct 13 (push)\nPull-ups - 10x5\nShrugs - 60x12\nfoo\n");

        assert_eq!(
            import.skip_counts(),
            BTreeMap::from([
                ("empty-workout", 1),
                ("unmapped-exercise", 2),
                ("unrecognized-line", 1),
            ])
        );
    }
}

use std::collections::BTreeSet;

use thiserror::Error;

use super::model::{
    COL_DAYS, COL_FREQUENCY, COL_GENDER, COL_GOAL, COL_LEVEL, COL_SPLIT, GENDER_ALL, RoutineRecord,
    Table, frequency_code, frequency_label,
};

// ---------------------------------------------------------------------------
// AnswerSet – everything the user has answered so far
// ---------------------------------------------------------------------------

/// One `Option` per question; `None` means "not yet answered".
///
/// Only the first five fields narrow the table. The personalization answers
/// (prior experience, time available, muscle focus, medical condition) are
/// required for completeness but never filter anything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnswerSet {
    pub level: Option<String>,
    pub days_per_week: Option<i64>,
    pub goal: Option<String>,
    pub gender: Option<String>,
    /// Frequency display label ("Low" / "Medium" / "High"); inverted back to
    /// the numeric code when filtering.
    pub frequency: Option<String>,

    pub prior_experience: Option<String>,
    pub time_available: Option<String>,
    pub muscle_focus: BTreeSet<String>,
    pub medical_condition: Option<String>,
}

/// Whether every question has been answered.
pub fn is_complete(answers: &AnswerSet) -> bool {
    answers.level.is_some()
        && answers.days_per_week.is_some()
        && answers.goal.is_some()
        && answers.gender.is_some()
        && answers.frequency.is_some()
        && answers.prior_experience.is_some()
        && answers.time_available.is_some()
        && answers.medical_condition.is_some()
        && !answers.muscle_focus.is_empty()
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// The table has no column with this name; surfaced at the step that
    /// first consults the column, not at load time.
    #[error("The routine table has no '{0}' column. Check the data file.")]
    MissingColumn(String),
    /// One or more questions are still unanswered.
    #[error("Please answer every question before generating a routine.")]
    Incomplete,
    /// Every answer is in, but no routine matches. An expected outcome.
    #[error("No routines match your answers exactly. Try adjusting them.")]
    NoMatch,
}

fn require_column(table: &Table, name: &str) -> Result<(), GenerateError> {
    if table.has_column(name) {
        Ok(())
    } else {
        Err(GenerateError::MissingColumn(name.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Cascade – one full pipeline run over the table
// ---------------------------------------------------------------------------

/// The result of rerunning the filter pipeline against the current answers:
/// the option list offered for each data-driven question, and the indices of
/// rows that pass every answered filter.
///
/// Each option list reflects the rows left by all *prior* answers, so the
/// choices narrow as the user works down the form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cascade {
    pub level_options: Vec<String>,
    pub days_options: Vec<i64>,
    pub goal_options: Vec<String>,
    /// Frequency labels present in the filtered rows; codes outside the
    /// fixed lookup are dropped silently.
    pub frequency_options: Vec<&'static str>,
    pub matching: Vec<usize>,
}

/// Distinct values over the given rows, in first-seen order.
fn distinct<T, F>(table: &Table, rows: &[usize], value: F) -> Vec<T>
where
    T: PartialEq,
    F: Fn(&RoutineRecord) -> T,
{
    let mut out = Vec::new();
    for &i in rows {
        let v = value(&table.records[i]);
        if !out.contains(&v) {
            out.push(v);
        }
    }
    out
}

/// Run the filter pipeline: level → days → goal → gender → frequency.
///
/// Unanswered steps leave the row set untouched. Answered steps keep rows
/// whose field equals the answer, except gender, which also keeps rows
/// marked [`GENDER_ALL`]. Missing columns error out at the step that needs
/// them; gender's options are a fixed list, so its column is only consulted
/// once the question is answered.
pub fn run_cascade(table: &Table, answers: &AnswerSet) -> Result<Cascade, GenerateError> {
    let mut rows: Vec<usize> = (0..table.len()).collect();

    require_column(table, COL_LEVEL)?;
    let level_options = distinct(table, &rows, |r| r.level.clone());
    if let Some(level) = &answers.level {
        rows.retain(|&i| table.records[i].level == *level);
    }

    require_column(table, COL_DAYS)?;
    let days_options = distinct(table, &rows, |r| r.days_per_week);
    if let Some(days) = answers.days_per_week {
        rows.retain(|&i| table.records[i].days_per_week == days);
    }

    require_column(table, COL_GOAL)?;
    let goal_options = distinct(table, &rows, |r| r.goal.clone());
    if let Some(goal) = &answers.goal {
        rows.retain(|&i| table.records[i].goal == *goal);
    }

    if let Some(gender) = &answers.gender {
        require_column(table, COL_GENDER)?;
        rows.retain(|&i| {
            let g = &table.records[i].gender;
            g == gender || g == GENDER_ALL
        });
    }

    require_column(table, COL_FREQUENCY)?;
    let mut frequency_options = Vec::new();
    for &i in &rows {
        if let Some(label) = frequency_label(table.records[i].frequency) {
            if !frequency_options.contains(&label) {
                frequency_options.push(label);
            }
        }
    }
    if let Some(label) = &answers.frequency {
        let code = frequency_code(label);
        rows.retain(|&i| code.is_some_and(|c| table.records[i].frequency == c));
    }

    Ok(Cascade {
        level_options,
        days_options,
        goal_options,
        frequency_options,
        matching: rows,
    })
}

// ---------------------------------------------------------------------------
// Recommendation
// ---------------------------------------------------------------------------

/// Produce the recommended split list for a completed questionnaire.
///
/// Completeness is checked first, then the pipeline runs, then the match is
/// examined. The result is the distinct split labels of the surviving rows
/// in first-seen order. Deterministic for a given table and answer set.
pub fn recommend(table: &Table, answers: &AnswerSet) -> Result<Vec<String>, GenerateError> {
    if !is_complete(answers) {
        return Err(GenerateError::Incomplete);
    }

    let cascade = run_cascade(table, answers)?;
    require_column(table, COL_SPLIT)?;

    if cascade.matching.is_empty() {
        return Err(GenerateError::NoMatch);
    }

    Ok(distinct(table, &cascade.matching, |r| {
        r.recommended_split.clone()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(
        level: &str,
        days: i64,
        goal: &str,
        gender: &str,
        frequency: f64,
        split: &str,
    ) -> RoutineRecord {
        RoutineRecord {
            level: level.to_string(),
            days_per_week: days,
            goal: goal.to_string(),
            gender: gender.to_string(),
            frequency,
            recommended_split: split.to_string(),
        }
    }

    fn all_columns() -> Vec<String> {
        [COL_LEVEL, COL_DAYS, COL_GOAL, COL_GENDER, COL_FREQUENCY, COL_SPLIT]
            .iter()
            .map(|c| c.to_string())
            .collect()
    }

    fn table(records: Vec<RoutineRecord>) -> Table {
        Table::new(records, all_columns())
    }

    /// A fully answered questionnaire matching a (Beginner, 3, Strength,
    /// Male, Low) routine.
    fn answered() -> AnswerSet {
        AnswerSet {
            level: Some("Beginner".into()),
            days_per_week: Some(3),
            goal: Some("Strength".into()),
            gender: Some("Male".into()),
            frequency: Some("Low".into()),
            prior_experience: Some("Gym".into()),
            time_available: Some("30-60 minutes".into()),
            muscle_focus: BTreeSet::from(["Chest".to_string()]),
            medical_condition: Some("No".into()),
        }
    }

    #[test]
    fn test_unanswered_questions_leave_table_untouched() {
        let t = table(vec![
            rec("Beginner", 3, "Strength", "Male", 1.0, "Full Body"),
            rec("Intermediate", 4, "Hypertrophy", "Female", 1.5, "Upper/Lower"),
            rec("Advanced", 6, "Strength", GENDER_ALL, 2.0, "Push/Pull/Legs"),
        ]);
        let cascade = run_cascade(&t, &AnswerSet::default()).unwrap();
        assert_eq!(cascade.matching, vec![0, 1, 2]);
        assert_eq!(cascade.level_options, vec!["Beginner", "Intermediate", "Advanced"]);
    }

    #[test]
    fn test_each_step_only_narrows() {
        let t = table(vec![
            rec("Beginner", 3, "Strength", "Male", 1.0, "Full Body"),
            rec("Beginner", 3, "Strength", GENDER_ALL, 1.0, "Full Body"),
            rec("Beginner", 3, "Hypertrophy", "Male", 1.5, "Upper/Lower"),
            rec("Beginner", 4, "Strength", "Female", 1.0, "Upper/Lower"),
            rec("Intermediate", 5, "Strength", "Male", 2.0, "Push/Pull/Legs"),
            rec("Advanced", 6, "Endurance", GENDER_ALL, 2.0, "Full Body Circuit"),
        ]);

        let steps: [fn(&mut AnswerSet); 5] = [
            |a| a.level = Some("Beginner".into()),
            |a| a.days_per_week = Some(3),
            |a| a.goal = Some("Strength".into()),
            |a| a.gender = Some("Male".into()),
            |a| a.frequency = Some("Low".into()),
        ];

        let mut answers = AnswerSet::default();
        let mut last = run_cascade(&t, &answers).unwrap().matching.len();
        for step in steps {
            step(&mut answers);
            let count = run_cascade(&t, &answers).unwrap().matching.len();
            assert!(count <= last, "step widened the row set: {count} > {last}");
            last = count;
        }
        assert_eq!(last, 2);
    }

    #[test]
    fn test_option_lists_follow_prior_answers() {
        let t = table(vec![
            rec("Beginner", 3, "Strength", "Male", 1.0, "Full Body"),
            rec("Beginner", 4, "Hypertrophy", "Male", 1.5, "Upper/Lower"),
            rec("Advanced", 6, "Strength", "Male", 2.0, "Push/Pull/Legs"),
        ]);

        let mut answers = AnswerSet::default();
        let all = run_cascade(&t, &answers).unwrap();
        assert_eq!(all.days_options, vec![3, 4, 6]);
        assert_eq!(all.frequency_options, vec!["Low", "Medium", "High"]);

        answers.level = Some("Beginner".into());
        let narrowed = run_cascade(&t, &answers).unwrap();
        // The first question's own options always come from the full table.
        assert_eq!(narrowed.level_options, vec!["Beginner", "Advanced"]);
        assert_eq!(narrowed.days_options, vec![3, 4]);
        assert_eq!(narrowed.goal_options, vec!["Strength", "Hypertrophy"]);
        assert_eq!(narrowed.frequency_options, vec!["Low", "Medium"]);
    }

    #[test]
    fn test_gender_step_keeps_rows_for_everyone() {
        let t = table(vec![
            rec("Beginner", 3, "Strength", "Male", 1.0, "A"),
            rec("Beginner", 3, "Strength", "Female", 1.0, "B"),
            rec("Beginner", 3, "Strength", GENDER_ALL, 1.0, "C"),
        ]);

        let mut answers = AnswerSet::default();
        answers.gender = Some("Female".into());
        let cascade = run_cascade(&t, &answers).unwrap();
        assert_eq!(cascade.matching, vec![1, 2]);
    }

    #[test]
    fn test_frequency_options_drop_unknown_codes() {
        let t = table(vec![
            rec("Beginner", 3, "Strength", "Male", 1.0, "A"),
            rec("Beginner", 4, "Strength", "Male", 2.5, "B"),
            rec("Beginner", 5, "Strength", "Male", 2.0, "C"),
        ]);

        let cascade = run_cascade(&t, &AnswerSet::default()).unwrap();
        assert_eq!(cascade.frequency_options, vec!["Low", "High"]);
    }

    #[test]
    fn test_frequency_label_filters_by_recovered_code() {
        let t = table(vec![
            rec("Beginner", 3, "Strength", "Male", 1.0, "A"),
            rec("Beginner", 3, "Strength", "Male", 2.0, "B"),
        ]);

        let mut answers = AnswerSet::default();
        answers.frequency = Some("High".into());
        let cascade = run_cascade(&t, &answers).unwrap();
        assert_eq!(cascade.matching, vec![1]);
    }

    #[test]
    fn test_generate_requires_every_answer() {
        let t = table(vec![rec("Beginner", 3, "Strength", "Male", 1.0, "Full Body")]);
        assert!(recommend(&t, &answered()).is_ok());

        let unset: [fn(&mut AnswerSet); 9] = [
            |a| a.level = None,
            |a| a.days_per_week = None,
            |a| a.goal = None,
            |a| a.gender = None,
            |a| a.frequency = None,
            |a| a.prior_experience = None,
            |a| a.time_available = None,
            |a| a.medical_condition = None,
            |a| a.muscle_focus.clear(),
        ];
        for clear in unset {
            let mut answers = answered();
            clear(&mut answers);
            assert_eq!(recommend(&t, &answers), Err(GenerateError::Incomplete));
        }
    }

    #[test]
    fn test_splits_come_back_in_first_seen_order() {
        let t = table(vec![
            rec("Beginner", 3, "Strength", "Male", 1.0, "Push/Pull/Legs"),
            rec("Beginner", 3, "Strength", GENDER_ALL, 1.0, "Full Body"),
            rec("Beginner", 3, "Strength", "Male", 1.0, "Push/Pull/Legs"),
        ]);

        let splits = recommend(&t, &answered()).unwrap();
        assert_eq!(splits, vec!["Push/Pull/Legs", "Full Body"]);
    }

    #[test]
    fn test_other_gender_rows_are_excluded() {
        let t = table(vec![
            rec("Beginner", 3, "Strength", "Male", 1.0, "Push/Pull/Legs"),
            rec("Beginner", 3, "Strength", GENDER_ALL, 1.0, "Full Body"),
        ]);

        let mut answers = answered();
        answers.gender = Some("Female".into());
        assert_eq!(recommend(&t, &answers).unwrap(), vec!["Full Body"]);
    }

    #[test]
    fn test_no_match_when_filters_exhaust_the_table() {
        let t = table(vec![rec("Advanced", 6, "Strength", "Male", 2.0, "Push/Pull/Legs")]);
        assert_eq!(recommend(&t, &answered()), Err(GenerateError::NoMatch));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let t = table(vec![
            rec("Beginner", 3, "Strength", "Male", 1.0, "Full Body"),
            rec("Beginner", 3, "Strength", GENDER_ALL, 1.0, "Upper/Lower"),
        ]);
        let answers = answered();
        assert_eq!(recommend(&t, &answers), recommend(&t, &answers));
    }

    #[test]
    fn test_missing_column_surfaces_when_its_step_runs() {
        let columns: Vec<String> = all_columns()
            .into_iter()
            .filter(|c| c != COL_GENDER)
            .collect();
        let t = Table::new(
            vec![rec("Beginner", 3, "Strength", "", 1.0, "Full Body")],
            columns,
        );

        // Gender unanswered: the column is never consulted.
        assert!(run_cascade(&t, &AnswerSet::default()).is_ok());

        let mut answers = AnswerSet::default();
        answers.gender = Some("Male".into());
        assert_eq!(
            run_cascade(&t, &answers).unwrap_err(),
            GenerateError::MissingColumn(COL_GENDER.to_string())
        );
    }

    #[test]
    fn test_missing_split_column_fails_only_at_generation() {
        let columns: Vec<String> = all_columns()
            .into_iter()
            .filter(|c| c != COL_SPLIT)
            .collect();
        let t = Table::new(
            vec![rec("Beginner", 3, "Strength", "Male", 1.0, "")],
            columns,
        );

        assert!(run_cascade(&t, &answered()).is_ok());
        assert_eq!(
            recommend(&t, &answered()),
            Err(GenerateError::MissingColumn(COL_SPLIT.to_string()))
        );
    }

    #[test]
    fn test_incomplete_wins_over_no_match() {
        let t = table(vec![rec("Advanced", 6, "Strength", "Male", 2.0, "A")]);
        let mut answers = answered();
        answers.medical_condition = None;
        assert_eq!(recommend(&t, &answers), Err(GenerateError::Incomplete));
    }
}

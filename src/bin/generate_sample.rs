//! Writes a sample `routines.csv` so the app has a dataset to load.
//!
//! Usage:  `cargo run --bin generate_sample`

use anyhow::Result;
use serde::Serialize;

/// Gender value marking a routine as applicable to every gender.
const ALL_GENDERS: &str = "Male, Female";

/// One routine row; serde renames give the CSV its header names.
#[derive(Serialize)]
struct SampleRow {
    #[serde(rename = "Nivel")]
    level: &'static str,
    #[serde(rename = "Días/Semana")]
    days_per_week: i64,
    #[serde(rename = "Objetivo")]
    goal: &'static str,
    #[serde(rename = "Género")]
    gender: &'static str,
    #[serde(rename = "Frecuencia")]
    frequency: f64,
    #[serde(rename = "Split Recomendado")]
    recommended_split: &'static str,
}

fn row(
    level: &'static str,
    days_per_week: i64,
    goal: &'static str,
    gender: &'static str,
    frequency: f64,
    recommended_split: &'static str,
) -> SampleRow {
    SampleRow {
        level,
        days_per_week,
        goal,
        gender,
        frequency,
        recommended_split,
    }
}

/// A deterministic routine catalog: all three tiers, 2-6 training days,
/// gender-specific and applies-to-all rows, all three frequency codes.
fn sample_rows() -> Vec<SampleRow> {
    vec![
        // -- Beginner --
        row("Beginner", 2, "General fitness", ALL_GENDERS, 1.0, "Full Body"),
        row("Beginner", 3, "Strength", ALL_GENDERS, 1.0, "Full Body"),
        row("Beginner", 3, "Strength", "Male", 1.0, "Full Body + Core"),
        row("Beginner", 3, "Fat loss", ALL_GENDERS, 1.5, "Full Body Circuit"),
        row("Beginner", 3, "Hypertrophy", ALL_GENDERS, 1.5, "Full Body"),
        row("Beginner", 4, "Strength", ALL_GENDERS, 1.0, "Upper/Lower"),
        row("Beginner", 4, "Fat loss", "Female", 1.5, "Full Body Circuit"),
        row("Beginner", 4, "Hypertrophy", ALL_GENDERS, 1.5, "Upper/Lower"),
        // -- Intermediate --
        row("Intermediate", 3, "Strength", ALL_GENDERS, 1.0, "Full Body"),
        row("Intermediate", 3, "Hypertrophy", ALL_GENDERS, 1.5, "Upper/Lower"),
        row("Intermediate", 4, "Strength", ALL_GENDERS, 1.5, "Upper/Lower"),
        row("Intermediate", 4, "Hypertrophy", "Male", 1.5, "Upper/Lower"),
        row("Intermediate", 4, "Hypertrophy", "Female", 1.5, "Lower-Focus Upper/Lower"),
        row("Intermediate", 4, "Fat loss", ALL_GENDERS, 2.0, "Upper/Lower + Conditioning"),
        row("Intermediate", 5, "Hypertrophy", ALL_GENDERS, 1.5, "Upper/Lower + Arms"),
        row("Intermediate", 5, "Endurance", ALL_GENDERS, 2.0, "Full Body Circuit"),
        // -- Advanced --
        row("Advanced", 4, "Strength", ALL_GENDERS, 1.5, "Upper/Lower"),
        row("Advanced", 5, "Strength", "Male", 1.5, "Push/Pull/Legs + Upper/Lower"),
        row("Advanced", 5, "Hypertrophy", ALL_GENDERS, 1.5, "Push/Pull/Legs"),
        row("Advanced", 5, "Fat loss", "Female", 2.0, "Push/Pull/Legs + Conditioning"),
        row("Advanced", 6, "Hypertrophy", ALL_GENDERS, 2.0, "Push/Pull/Legs"),
        row("Advanced", 6, "Hypertrophy", "Male", 2.0, "Body Part Split"),
        row("Advanced", 6, "Strength", ALL_GENDERS, 2.0, "Push/Pull/Legs"),
        row("Advanced", 6, "Endurance", ALL_GENDERS, 2.0, "Hybrid Conditioning"),
    ]
}

fn main() -> Result<()> {
    let rows = sample_rows();

    let mut writer = csv::Writer::from_path("routines.csv")?;
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    println!("Wrote {} routines to routines.csv", rows.len());
    Ok(())
}

// ---------------------------------------------------------------------------
// Column names – exactly as they appear in the source file (after trimming)
// ---------------------------------------------------------------------------

pub const COL_LEVEL: &str = "Nivel";
pub const COL_DAYS: &str = "Días/Semana";
pub const COL_GOAL: &str = "Objetivo";
pub const COL_GENDER: &str = "Género";
pub const COL_FREQUENCY: &str = "Frecuencia";
pub const COL_SPLIT: &str = "Split Recomendado";

/// Gender value marking a routine as applicable to every gender.
pub const GENDER_ALL: &str = "Male, Female";

// ---------------------------------------------------------------------------
// Frequency lookup – numeric code in the table ↔ label shown to the user
// ---------------------------------------------------------------------------

/// The three recognised training-frequency codes and their display labels.
/// Codes outside this table are never offered as options.
pub const FREQUENCY_LEVELS: [(f64, &str); 3] = [(1.0, "Low"), (1.5, "Medium"), (2.0, "High")];

/// Display label for a frequency code, if the code is one of the known three.
pub fn frequency_label(code: f64) -> Option<&'static str> {
    FREQUENCY_LEVELS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| *label)
}

/// Invert [`frequency_label`]: recover the numeric code behind a label.
pub fn frequency_code(label: &str) -> Option<f64> {
    FREQUENCY_LEVELS
        .iter()
        .find(|(_, l)| *l == label)
        .map(|(code, _)| *code)
}

// ---------------------------------------------------------------------------
// RoutineRecord – one row of the routine table
// ---------------------------------------------------------------------------

/// A single workout routine (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct RoutineRecord {
    /// Experience tier, e.g. "Beginner".
    pub level: String,
    /// Training days per week.
    pub days_per_week: i64,
    /// Main training goal, e.g. "Strength".
    pub goal: String,
    /// Target gender, or [`GENDER_ALL`] when the routine fits everyone.
    pub gender: String,
    /// Frequency code; see [`FREQUENCY_LEVELS`].
    pub frequency: f64,
    /// The recommended split label (the output of the questionnaire).
    pub recommended_split: String,
}

// ---------------------------------------------------------------------------
// Table – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The loaded routine table, immutable for the session.
///
/// `columns` records which column names were actually present in the source
/// (trimmed). A source missing a required column still loads; the gap only
/// surfaces when a filter step consults that column.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub records: Vec<RoutineRecord>,
    pub columns: Vec<String>,
}

impl Table {
    pub fn new(records: Vec<RoutineRecord>, columns: Vec<String>) -> Self {
        Table { records, columns }
    }

    /// Number of routines.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table holds no routines.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether the source carried a column with this (trimmed) name.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_label_round_trip() {
        for (code, label) in FREQUENCY_LEVELS {
            assert_eq!(frequency_label(code), Some(label));
            assert_eq!(frequency_code(label), Some(code));
        }
    }

    #[test]
    fn test_unknown_frequency_values_have_no_mapping() {
        assert_eq!(frequency_label(2.5), None);
        assert_eq!(frequency_label(f64::NAN), None);
        assert_eq!(frequency_code("Very high"), None);
    }

    #[test]
    fn test_table_reports_present_columns() {
        let table = Table::new(Vec::new(), vec![COL_LEVEL.to_string(), COL_GOAL.to_string()]);
        assert!(table.has_column(COL_LEVEL));
        assert!(!table.has_column(COL_GENDER));
        assert!(table.is_empty());
    }
}

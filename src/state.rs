use std::path::Path;

use crate::data::filter::{AnswerSet, GenerateError, recommend};
use crate::data::loader;
use crate::data::model::Table;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded routine table (None until a dataset loads).
    pub table: Option<Table>,

    /// Everything the user has answered so far.
    pub answers: AnswerSet,

    /// Result of the last "Generate routine" press; cleared when an answer
    /// changes so a stale recommendation is never shown.
    pub outcome: Option<Result<Vec<String>, GenerateError>>,

    /// Rows matching the current answers (cached for the status bar).
    pub matching_count: usize,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Ingest a newly loaded table and reset the questionnaire.
    pub fn set_table(&mut self, table: Table) {
        self.matching_count = table.len();
        self.answers = AnswerSet::default();
        self.outcome = None;
        self.status_message = None;
        self.table = Some(table);
    }

    /// Load a routine table from disk. On failure the current table (if any)
    /// is kept and the error is surfaced in the status bar.
    pub fn load_from(&mut self, path: &Path) {
        match loader::load_file(path) {
            Ok(table) => {
                log::info!(
                    "Loaded {} routines with columns {:?}",
                    table.len(),
                    table.columns
                );
                self.set_table(table);
            }
            Err(e) => {
                log::error!("Failed to load routine table: {e:#}");
                self.status_message = Some(format!("Could not load the routine data: {e:#}"));
            }
        }
    }

    /// Run the recommendation for the current answers and remember the
    /// outcome. Each press re-evaluates from scratch.
    pub fn generate(&mut self) {
        let Some(table) = &self.table else {
            return;
        };
        let outcome = recommend(table, &self.answers);
        self.outcome = Some(outcome);
    }
}

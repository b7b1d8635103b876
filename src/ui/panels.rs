use std::fmt;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::{Cascade, GenerateError, run_cascade};
use crate::state::AppState;

/// Combo-box entry standing for "not yet answered".
const NO_SELECTION: &str = "Select an option";

// ---------------------------------------------------------------------------
// Fixed option lists (the data-driven questions derive theirs from the table)
// ---------------------------------------------------------------------------

const GENDER_OPTIONS: [&str; 2] = ["Male", "Female"];

const EXPERIENCE_OPTIONS: [&str; 12] = [
    "None",
    "Gym",
    "Home training",
    "Calisthenics",
    "Crossfit",
    "Running",
    "Zumba",
    "Circuit training",
    "Yoga",
    "Pilates",
    "Hypopressives",
    "Other",
];

const TIME_OPTIONS: [&str; 3] = ["<30 minutes", "30-60 minutes", ">60 minutes"];

const MUSCLE_GROUPS: [&str; 8] = [
    "Chest", "Back", "Arms", "Shoulders", "Legs", "Glutes", "Abs", "Calves",
];

const MEDICAL_OPTIONS: [&str; 2] = ["No", "Yes"];

// ---------------------------------------------------------------------------
// Central panel – the questionnaire
// ---------------------------------------------------------------------------

/// Render the questionnaire form.
pub fn form_panel(ui: &mut Ui, state: &mut AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(RichText::new("Smart Split").size(28.0));
        ui.label(
            RichText::new("Answer the questions to get a workout split that fits you.")
                .color(Color32::GRAY),
        );
    });
    ui.add_space(6.0);
    ui.separator();

    // Rerun the filter pipeline against the current answers. A schema error
    // here halts the questionnaire, like a broken data file would.
    let cascade = match &state.table {
        None => {
            ui.label("No routine data loaded. Use File → Open… to pick a dataset.");
            return;
        }
        Some(table) => match run_cascade(table, &state.answers) {
            Ok(cascade) => cascade,
            Err(e) => {
                state.matching_count = 0;
                ui.colored_label(Color32::LIGHT_RED, e.to_string());
                return;
            }
        },
    };
    state.matching_count = cascade.matching.len();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            let mut changed = drop_stale_answers(state, &cascade);

            changed |= select_one(
                ui,
                "level",
                "What is your experience level?",
                &cascade.level_options,
                &mut state.answers.level,
            );
            changed |= select_one(
                ui,
                "days",
                "How many days per week can you train?",
                &cascade.days_options,
                &mut state.answers.days_per_week,
            );
            changed |= select_one(
                ui,
                "goal",
                "What is your main goal?",
                &cascade.goal_options,
                &mut state.answers.goal,
            );

            let gender_options: Vec<String> =
                GENDER_OPTIONS.iter().map(|s| s.to_string()).collect();
            changed |= select_one(
                ui,
                "gender",
                "What is your gender?",
                &gender_options,
                &mut state.answers.gender,
            );

            let frequency_options: Vec<String> = cascade
                .frequency_options
                .iter()
                .map(|s| s.to_string())
                .collect();
            changed |= select_one(
                ui,
                "frequency",
                "What training frequency do you prefer?",
                &frequency_options,
                &mut state.answers.frequency,
            );

            ui.separator();

            let experience_options: Vec<String> =
                EXPERIENCE_OPTIONS.iter().map(|s| s.to_string()).collect();
            changed |= select_one(
                ui,
                "experience",
                "Do you have previous experience with any kind of training?",
                &experience_options,
                &mut state.answers.prior_experience,
            );

            let time_options: Vec<String> = TIME_OPTIONS.iter().map(|s| s.to_string()).collect();
            changed |= select_one(
                ui,
                "time",
                "How much time per day do you have to train?",
                &time_options,
                &mut state.answers.time_available,
            );

            ui.strong("Which muscle groups do you want to focus on?");
            ui.horizontal_wrapped(|ui: &mut Ui| {
                for group in MUSCLE_GROUPS {
                    let mut on = state.answers.muscle_focus.contains(group);
                    if ui.checkbox(&mut on, group).changed() {
                        if on {
                            state.answers.muscle_focus.insert(group.to_string());
                        } else {
                            state.answers.muscle_focus.remove(group);
                        }
                        changed = true;
                    }
                }
            });
            ui.add_space(6.0);

            let medical_options: Vec<String> =
                MEDICAL_OPTIONS.iter().map(|s| s.to_string()).collect();
            changed |= select_one(
                ui,
                "medical",
                "Do you have any injury or medical condition we should consider?",
                &medical_options,
                &mut state.answers.medical_condition,
            );

            if changed {
                state.outcome = None;
            }

            ui.add_space(10.0);
            if ui.button("Generate routine").clicked() {
                state.generate();
            }

            if let Some(outcome) = &state.outcome {
                ui.add_space(6.0);
                match outcome {
                    Ok(splits) => {
                        ui.colored_label(
                            Color32::LIGHT_GREEN,
                            format!("Routine generated: {}", splits.join(", ")),
                        );
                    }
                    Err(e @ (GenerateError::Incomplete | GenerateError::NoMatch)) => {
                        ui.colored_label(Color32::GOLD, e.to_string());
                    }
                    Err(e) => {
                        ui.colored_label(Color32::LIGHT_RED, e.to_string());
                    }
                }
            }
        });
}

/// Reset answers whose value the narrowed table no longer offers, so earlier
/// changes cannot leave an impossible selection behind.
fn drop_stale_answers(state: &mut AppState, cascade: &Cascade) -> bool {
    let answers = &mut state.answers;
    let mut changed = false;

    if answers
        .level
        .as_ref()
        .is_some_and(|v| !cascade.level_options.contains(v))
    {
        answers.level = None;
        changed = true;
    }
    if answers
        .days_per_week
        .is_some_and(|v| !cascade.days_options.contains(&v))
    {
        answers.days_per_week = None;
        changed = true;
    }
    if answers
        .goal
        .as_ref()
        .is_some_and(|v| !cascade.goal_options.contains(v))
    {
        answers.goal = None;
        changed = true;
    }
    if answers
        .frequency
        .as_ref()
        .is_some_and(|v| !cascade.frequency_options.iter().any(|l| *l == v.as_str()))
    {
        answers.frequency = None;
        changed = true;
    }

    changed
}

/// One question as a combo box. The first entry is the "no selection"
/// sentinel; picking it clears the answer. Returns whether the answer
/// changed.
fn select_one<T>(
    ui: &mut Ui,
    id_salt: &str,
    question: &str,
    options: &[T],
    answer: &mut Option<T>,
) -> bool
where
    T: PartialEq + Clone + fmt::Display,
{
    let mut changed = false;

    ui.strong(question);
    let selected_text = answer
        .as_ref()
        .map(|v| v.to_string())
        .unwrap_or_else(|| NO_SELECTION.to_string());

    egui::ComboBox::from_id_salt(id_salt)
        .width(220.0)
        .selected_text(selected_text)
        .show_ui(ui, |ui: &mut Ui| {
            if ui.selectable_label(answer.is_none(), NO_SELECTION).clicked() && answer.is_some() {
                *answer = None;
                changed = true;
            }
            for option in options {
                let is_selected = answer.as_ref() == Some(option);
                if ui
                    .selectable_label(is_selected, option.to_string())
                    .clicked()
                    && !is_selected
                {
                    *answer = Some(option.clone());
                    changed = true;
                }
            }
        });
    ui.add_space(6.0);

    changed
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(table) = &state.table {
            ui.label(format!(
                "{} routines loaded, {} matching",
                table.len(),
                state.matching_count
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::LIGHT_RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open routine data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_from(&path);
    }
}

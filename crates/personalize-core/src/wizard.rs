//! Wizard state machine.
//!
//! [`WizardState::apply`] is a pure reducer: it never mutates its input and
//! either returns a new state with a success outcome, or the unchanged state
//! with an `Invalid`/`Rejected` outcome. [`WizardController`] owns one state,
//! feeds actions through the reducer and keeps the serialized form fields in
//! step with every save.

use crate::config::Rules;
use crate::error::{PersonalizeError, Result};
use crate::item::ItemConfiguration;
use crate::preview::{self, Preview};
use crate::serialize::{self, FormFields};
use crate::validate::{self, ValidationFailure};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Editing,
    AllComplete,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Editing => f.write_str("editing"),
            Mode::AllComplete => f.write_str("all_complete"),
        }
    }
}

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    SetFont { key: String },
    SetColor { key: String },
    SetText { text: String },
    SaveAndAdvance,
    Back,
    /// Jump to an already-saved item (0-based).
    EditExisting { index: usize },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::SetFont { .. } => "set_font",
            Action::SetColor { .. } => "set_color",
            Action::SetText { .. } => "set_text",
            Action::SaveAndAdvance => "save_and_advance",
            Action::Back => "back",
            Action::EditExisting { .. } => "edit_existing",
        }
    }
}

// ---------------------------------------------------------------------------
// Outcome / Transition
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// The draft changed.
    Updated,
    /// The draft was saved at `index` and the wizard moved on.
    Saved { index: usize },
    /// The wizard moved without saving anything.
    Moved,
    /// The last item was saved; every slot now holds a configuration.
    Completed { index: usize },
    /// Save was attempted on an incomplete draft. Nothing changed.
    Invalid { failure: ValidationFailure },
    /// The action is not legal in the current state. Nothing changed.
    Rejected { reason: String },
}

impl Outcome {
    /// Index written by this outcome, if any.
    pub fn saved_index(&self) -> Option<usize> {
        match self {
            Outcome::Saved { index } | Outcome::Completed { index } => Some(*index),
            _ => None,
        }
    }

    pub fn changed_state(&self) -> bool {
        !matches!(self, Outcome::Invalid { .. } | Outcome::Rejected { .. })
    }
}

#[derive(Debug, Clone)]
pub struct Transition {
    pub state: WizardState,
    pub outcome: Outcome,
}

// ---------------------------------------------------------------------------
// WizardState
// ---------------------------------------------------------------------------

/// Per-mount configuration progress.
///
/// Invariants kept by [`WizardState::apply`]:
/// - `saved.len() <= item_count`
/// - `current_index < item_count` and `current_index <= saved.len()`
/// - `mode == AllComplete` only while every slot holds a saved configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardState {
    item_count: usize,
    saved: Vec<ItemConfiguration>,
    current_index: usize,
    mode: Mode,
    draft: ItemConfiguration,
}

impl WizardState {
    pub fn new(item_count: usize) -> Result<Self> {
        if item_count == 0 {
            return Err(PersonalizeError::InvalidItemCount(item_count));
        }
        Ok(Self {
            item_count,
            saved: Vec::new(),
            current_index: 0,
            mode: Mode::Editing,
            draft: ItemConfiguration::empty(0),
        })
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn saved(&self) -> &[ItemConfiguration] {
        &self.saved
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn draft(&self) -> &ItemConfiguration {
        &self.draft
    }

    /// Single-item listings skip step and progress indicators.
    pub fn shows_progress(&self) -> bool {
        self.item_count > 1
    }

    /// "Item 2 of 3" style label, or `None` for a single-item listing.
    pub fn progress_label(&self, item_label: &str) -> Option<String> {
        self.shows_progress().then(|| {
            format!(
                "{} {} of {}",
                item_label,
                self.current_index + 1,
                self.item_count
            )
        })
    }

    /// Whether a Back transition is currently available.
    pub fn can_go_back(&self) -> bool {
        self.mode == Mode::Editing && self.current_index > 0
    }

    /// True when every slot holds a complete configuration. Evaluated from
    /// the saved list on each call.
    pub fn is_complete(&self, rules: &Rules) -> bool {
        self.saved.len() == self.item_count
            && self
                .saved
                .iter()
                .all(|item| validate::is_complete(item, rules.catalog(), rules.max_text_len()))
    }

    fn state_label(&self) -> String {
        match self.mode {
            Mode::Editing => format!("editing({})", self.current_index),
            Mode::AllComplete => "all_complete".to_string(),
        }
    }

    fn reject(&self, action: &Action, reason: impl Into<String>) -> Transition {
        let reason = reason.into();
        let err = PersonalizeError::InvalidTransition {
            from: self.state_label(),
            action: action.name().to_string(),
            reason: reason.clone(),
        };
        tracing::warn!("{err}");
        Transition {
            state: self.clone(),
            outcome: Outcome::Rejected { reason },
        }
    }

    // -----------------------------------------------------------------------
    // Reducer
    // -----------------------------------------------------------------------

    pub fn apply(&self, action: Action, rules: &Rules) -> Transition {
        if self.mode == Mode::AllComplete {
            return match action {
                Action::EditExisting { index } => self.edit_existing(index, &action),
                _ => self.reject(
                    &action,
                    "every item is saved; choose an item to edit first",
                ),
            };
        }

        match action {
            Action::SetFont { ref key } => self.with_draft(|d| d.font_key = key.clone()),
            Action::SetColor { ref key } => self.with_draft(|d| d.color_key = key.clone()),
            Action::SetText { ref text } => self.with_draft(|d| d.text = text.clone()),
            Action::SaveAndAdvance => self.save_and_advance(rules),
            Action::Back => self.back(rules, &action),
            Action::EditExisting { index } => self.edit_existing(index, &action),
        }
    }

    fn with_draft(&self, edit: impl FnOnce(&mut ItemConfiguration)) -> Transition {
        let mut next = self.clone();
        edit(&mut next.draft);
        Transition {
            state: next,
            outcome: Outcome::Updated,
        }
    }

    fn save_and_advance(&self, rules: &Rules) -> Transition {
        if let Err(failure) = validate::validate(&self.draft, rules.catalog(), rules.max_text_len())
        {
            return Transition {
                state: self.clone(),
                outcome: Outcome::Invalid { failure },
            };
        }

        let i = self.current_index;
        let mut next = self.clone();
        next.write_slot(i);

        if i + 1 < self.item_count {
            next.current_index = i + 1;
            next.draft = next.seed(i + 1);
            return Transition {
                state: next,
                outcome: Outcome::Saved { index: i },
            };
        }

        // Last slot. A single-item listing stays on its only step so the
        // host never sees a review screen.
        if self.item_count > 1 {
            next.mode = Mode::AllComplete;
        }
        next.draft = next.saved[i].clone();
        Transition {
            state: next,
            outcome: Outcome::Completed { index: i },
        }
    }

    fn back(&self, rules: &Rules, action: &Action) -> Transition {
        let i = self.current_index;
        if i == 0 {
            return self.reject(action, "already at the first item");
        }

        let mut next = self.clone();
        let kept = validate::is_complete(&self.draft, rules.catalog(), rules.max_text_len());
        if kept {
            next.write_slot(i);
        }
        next.current_index = i - 1;
        next.draft = next.seed(i - 1);

        let outcome = if kept {
            Outcome::Saved { index: i }
        } else {
            Outcome::Moved
        };
        Transition {
            state: next,
            outcome,
        }
    }

    fn edit_existing(&self, index: usize, action: &Action) -> Transition {
        if index >= self.saved.len() {
            return self.reject(
                action,
                PersonalizeError::NoSavedItem(index + 1).to_string(),
            );
        }
        let mut next = self.clone();
        next.mode = Mode::Editing;
        next.current_index = index;
        next.draft = next.saved[index].clone();
        Transition {
            state: next,
            outcome: Outcome::Moved,
        }
    }

    /// Store the (trimmed) draft at slot `i`, overwriting or appending.
    fn write_slot(&mut self, i: usize) {
        let item = self.draft.normalized().at_index(i);
        debug_assert!(i <= self.saved.len());
        if i < self.saved.len() {
            self.saved[i] = item;
        } else {
            self.saved.push(item);
        }
    }

    fn seed(&self, i: usize) -> ItemConfiguration {
        self.saved
            .get(i)
            .cloned()
            .unwrap_or_else(|| ItemConfiguration::empty(i))
    }
}

// ---------------------------------------------------------------------------
// WizardController
// ---------------------------------------------------------------------------

/// Owns the state of one mounted configurator.
#[derive(Debug, Clone)]
pub struct WizardController {
    state: WizardState,
    rules: Rules,
    fields: FormFields,
}

impl WizardController {
    pub fn new(item_count: usize, rules: Rules) -> Result<Self> {
        Ok(Self {
            state: WizardState::new(item_count)?,
            rules,
            fields: FormFields::default(),
        })
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Host form fields as of the latest save.
    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn is_complete(&self) -> bool {
        self.state.is_complete(&self.rules)
    }

    pub fn preview(&self) -> Preview {
        preview::render(self.state.draft(), &self.rules)
    }

    /// First reason the current draft could not be saved, if any.
    pub fn draft_failure(&self) -> Option<ValidationFailure> {
        validate::validate(
            self.state.draft(),
            self.rules.catalog(),
            self.rules.max_text_len(),
        )
        .err()
    }

    pub fn dispatch(&mut self, action: Action) -> Outcome {
        let name = action.name();
        let Transition { state, outcome } = self.state.apply(action, &self.rules);
        self.state = state;
        if outcome.saved_index().is_some() {
            self.fields = serialize::serialize(
                self.state.saved(),
                self.state.item_count(),
                self.rules.fields(),
            );
        }
        tracing::debug!(
            action = name,
            state = %self.state.state_label(),
            saved = self.state.saved().len(),
            ?outcome,
            "dispatched"
        );
        outcome
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(ctl: &mut WizardController, font: &str, color: &str, text: &str) {
        ctl.dispatch(Action::SetFont { key: font.into() });
        ctl.dispatch(Action::SetColor { key: color.into() });
        ctl.dispatch(Action::SetText { text: text.into() });
    }

    fn save(ctl: &mut WizardController, font: &str, color: &str, text: &str) -> Outcome {
        fill(ctl, font, color, text);
        ctl.dispatch(Action::SaveAndAdvance)
    }

    #[test]
    fn zero_items_rejected() {
        assert!(matches!(
            WizardState::new(0),
            Err(PersonalizeError::InvalidItemCount(0))
        ));
    }

    #[test]
    fn initial_state() {
        let s = WizardState::new(3).unwrap();
        assert_eq!(s.mode(), Mode::Editing);
        assert_eq!(s.current_index(), 0);
        assert!(s.saved().is_empty());
        assert!(!s.is_complete(&Rules::default()));
        assert_eq!(s.progress_label("Item").as_deref(), Some("Item 1 of 3"));
        assert!(!s.can_go_back());
    }

    #[test]
    fn single_item_completes_in_one_save() {
        let mut ctl = WizardController::new(1, Rules::default()).unwrap();
        assert!(!ctl.state().shows_progress());
        assert_eq!(ctl.state().progress_label("Item"), None);

        let outcome = save(&mut ctl, "Script", "Gold", "Sarah");
        assert_eq!(outcome, Outcome::Completed { index: 0 });
        assert_eq!(ctl.state().mode(), Mode::Editing);
        assert_eq!(ctl.state().current_index(), 0);
        assert!(ctl.is_complete());
        assert_eq!(ctl.fields().get("Name on bottle"), Some("Sarah"));
    }

    #[test]
    fn invalid_save_changes_nothing() {
        let mut ctl = WizardController::new(2, Rules::default()).unwrap();
        ctl.dispatch(Action::SetFont { key: "Script".into() });
        let before = ctl.state().clone();
        let outcome = ctl.dispatch(Action::SaveAndAdvance);
        assert_eq!(
            outcome,
            Outcome::Invalid {
                failure: ValidationFailure::MissingColor
            }
        );
        assert_eq!(ctl.state(), &before);
        assert!(ctl.fields().is_empty());
    }

    #[test]
    fn save_advances_and_seeds_empty_draft() {
        let mut ctl = WizardController::new(3, Rules::default()).unwrap();
        assert_eq!(save(&mut ctl, "Script", "Gold", "Ava"), Outcome::Saved { index: 0 });
        assert_eq!(ctl.state().current_index(), 1);
        assert_eq!(ctl.state().draft(), &ItemConfiguration::empty(1));
        assert_eq!(ctl.fields().len(), 3);
        assert!(!ctl.is_complete());
    }

    #[test]
    fn saved_text_is_trimmed() {
        let mut ctl = WizardController::new(2, Rules::default()).unwrap();
        save(&mut ctl, "Script", "Gold", "  Ava  ");
        assert_eq!(ctl.state().saved()[0].text, "Ava");
    }

    #[test]
    fn last_save_enters_all_complete() {
        let mut ctl = WizardController::new(2, Rules::default()).unwrap();
        save(&mut ctl, "Script", "Gold", "Ava");
        assert_eq!(save(&mut ctl, "Bold", "Black", "Mia"), Outcome::Completed { index: 1 });
        assert_eq!(ctl.state().mode(), Mode::AllComplete);
        assert_eq!(ctl.state().current_index(), 1);
        assert!(ctl.is_complete());
    }

    #[test]
    fn all_complete_only_allows_edit_existing() {
        let mut ctl = WizardController::new(2, Rules::default()).unwrap();
        save(&mut ctl, "Script", "Gold", "Ava");
        save(&mut ctl, "Bold", "Black", "Mia");

        for action in [
            Action::SaveAndAdvance,
            Action::Back,
            Action::SetText { text: "x".into() },
        ] {
            assert!(matches!(ctl.dispatch(action), Outcome::Rejected { .. }));
        }
        assert_eq!(ctl.dispatch(Action::EditExisting { index: 0 }), Outcome::Moved);
        assert_eq!(ctl.state().mode(), Mode::Editing);
        assert_eq!(ctl.state().draft().text, "Ava");
        // The saved set is still complete while re-editing.
        assert!(ctl.is_complete());
    }

    #[test]
    fn back_saves_valid_draft() {
        let mut ctl = WizardController::new(3, Rules::default()).unwrap();
        save(&mut ctl, "Script", "Gold", "Ava");
        fill(&mut ctl, "Bold", "Black", "Mia");
        assert_eq!(ctl.dispatch(Action::Back), Outcome::Saved { index: 1 });
        assert_eq!(ctl.state().current_index(), 0);
        assert_eq!(ctl.state().draft().text, "Ava");
        assert_eq!(ctl.state().saved().len(), 2);
        assert_eq!(ctl.fields().get("Item 2 — Name"), Some("Mia"));
    }

    #[test]
    fn back_discards_incomplete_draft() {
        let mut ctl = WizardController::new(3, Rules::default()).unwrap();
        save(&mut ctl, "Script", "Gold", "Ava");
        ctl.dispatch(Action::SetFont { key: "Bold".into() });
        assert_eq!(ctl.dispatch(Action::Back), Outcome::Moved);
        assert_eq!(ctl.state().saved().len(), 1);
        assert_eq!(ctl.state().current_index(), 0);
    }

    #[test]
    fn back_from_first_item_rejected() {
        let mut ctl = WizardController::new(3, Rules::default()).unwrap();
        let before = ctl.state().clone();
        assert!(matches!(ctl.dispatch(Action::Back), Outcome::Rejected { .. }));
        assert_eq!(ctl.state(), &before);
    }

    #[test]
    fn edit_existing_requires_saved_slot() {
        let mut ctl = WizardController::new(3, Rules::default()).unwrap();
        save(&mut ctl, "Script", "Gold", "Ava");
        match ctl.dispatch(Action::EditExisting { index: 1 }) {
            Outcome::Rejected { reason } => assert!(reason.contains("item 2")),
            other => panic!("expected rejection, got {other:?}"),
        }
        assert_eq!(ctl.dispatch(Action::EditExisting { index: 0 }), Outcome::Moved);
        assert_eq!(ctl.state().current_index(), 0);
    }

    #[test]
    fn re_entry_seeds_from_saved() {
        let mut ctl = WizardController::new(3, Rules::default()).unwrap();
        save(&mut ctl, "Script", "Gold", "Ava");
        save(&mut ctl, "Bold", "Black", "Mia");
        ctl.dispatch(Action::EditExisting { index: 0 });
        assert_eq!(save(&mut ctl, "Roman", "Ivory", "Eve"), Outcome::Saved { index: 0 });
        // Index 1 already saved: the draft comes back with its values.
        assert_eq!(ctl.state().draft().text, "Mia");
        assert_eq!(ctl.state().draft().font_key, "Bold");
        assert_eq!(ctl.state().saved()[1].text, "Mia");
        assert_eq!(ctl.state().saved()[0].text, "Eve");
    }

    #[test]
    fn saving_one_slot_leaves_others_untouched() {
        let mut ctl = WizardController::new(3, Rules::default()).unwrap();
        save(&mut ctl, "Script", "Gold", "Ava");
        save(&mut ctl, "Bold", "Black", "Mia");
        save(&mut ctl, "Serif", "Silver", "Zoe");
        let before = ctl.state().saved().to_vec();

        ctl.dispatch(Action::EditExisting { index: 1 });
        save(&mut ctl, "Stencil", "Bronze", "Lia");

        let after = ctl.state().saved();
        assert_eq!(after[0], before[0]);
        assert_eq!(after[2], before[2]);
        assert_eq!(after[1].text, "Lia");
    }

    #[test]
    fn reducer_does_not_mutate_input() {
        let rules = Rules::default();
        let s = WizardState::new(2).unwrap();
        let t = s.apply(Action::SetText { text: "Ava".into() }, &rules);
        assert_eq!(s.draft().text, "");
        assert_eq!(t.state.draft().text, "Ava");
    }

    #[test]
    fn action_yaml_shape() {
        let actions: Vec<Action> = serde_yaml::from_str(
            "- action: set_font\n  key: Script\n- action: save_and_advance\n- action: edit_existing\n  index: 0\n",
        )
        .unwrap();
        assert_eq!(
            actions,
            vec![
                Action::SetFont {
                    key: "Script".into()
                },
                Action::SaveAndAdvance,
                Action::EditExisting { index: 0 },
            ]
        );
    }
}

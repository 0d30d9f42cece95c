use crate::item::Field;
use crate::wizard::{Mode, WizardController};
use serde::{Deserialize, Serialize};

/// Result of intercepting a host-form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum SubmitDecision {
    Allow,
    Block {
        message: String,
        saved: usize,
        required: usize,
        /// Field to focus, when the item being edited has an identifiable gap.
        focus: Option<Field>,
    },
}

impl SubmitDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, SubmitDecision::Allow)
    }
}

/// Decide whether the host form may submit. Reads the completion predicate
/// fresh on every call and never touches the form payload.
pub fn check(controller: &WizardController) -> SubmitDecision {
    if controller.is_complete() {
        return SubmitDecision::Allow;
    }

    let state = controller.state();
    let base = &controller.rules().config().incomplete_message;
    let saved = state.saved().len();
    let required = state.item_count();
    let message = if state.shows_progress() {
        format!("{base} ({saved} of {required} items saved)")
    } else {
        base.clone()
    };
    let focus = match state.mode() {
        Mode::Editing => controller.draft_failure().map(|f| f.field()),
        Mode::AllComplete => None,
    };

    SubmitDecision::Block {
        message,
        saved,
        required,
        focus,
    }
}

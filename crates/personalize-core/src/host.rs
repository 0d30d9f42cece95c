use crate::item::Field;
use crate::serialize::FormFields;
use std::cell::RefCell;
use std::rc::Rc;
use uuid::Uuid;

/// The purchase form the configurator is mounted into.
///
/// The configurator only writes fields and presentation hints through this
/// seam; submitting, payment and order creation stay with the host.
pub trait HostForm {
    /// Replace the configurator-owned fields with `fields`.
    fn set_fields(&mut self, fields: &FormFields);
    fn show_message(&mut self, message: &str);
    fn clear_message(&mut self);
    fn focus_field(&mut self, field: Field);
    fn scroll_into_view(&mut self);
    /// Register a submit interceptor owned by `instance`. It must run before
    /// any handler that would send the form.
    fn attach_guard(&mut self, instance: Uuid);
    fn detach_guard(&mut self, instance: Uuid);
    /// Let the submission continue with the current fields.
    fn submit(&mut self);
}

// ---------------------------------------------------------------------------
// RecordingForm
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormRecord {
    pub fields: FormFields,
    pub message: Option<String>,
    pub focused: Option<Field>,
    pub scrolls: usize,
    pub guards: Vec<Uuid>,
    pub submitted: Vec<FormFields>,
}

/// In-memory host form. Clones share one record, the way several handles
/// on a page point at the same form element.
#[derive(Debug, Clone, Default)]
pub struct RecordingForm {
    inner: Rc<RefCell<FormRecord>>,
}

impl RecordingForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> FormRecord {
        self.inner.borrow().clone()
    }

    pub fn fields(&self) -> FormFields {
        self.inner.borrow().fields.clone()
    }

    pub fn message(&self) -> Option<String> {
        self.inner.borrow().message.clone()
    }

    pub fn guard_count(&self) -> usize {
        self.inner.borrow().guards.len()
    }

    pub fn submissions(&self) -> usize {
        self.inner.borrow().submitted.len()
    }
}

impl HostForm for RecordingForm {
    fn set_fields(&mut self, fields: &FormFields) {
        self.inner.borrow_mut().fields = fields.clone();
    }

    fn show_message(&mut self, message: &str) {
        self.inner.borrow_mut().message = Some(message.to_string());
    }

    fn clear_message(&mut self) {
        self.inner.borrow_mut().message = None;
    }

    fn focus_field(&mut self, field: Field) {
        self.inner.borrow_mut().focused = Some(field);
    }

    fn scroll_into_view(&mut self) {
        self.inner.borrow_mut().scrolls += 1;
    }

    fn attach_guard(&mut self, instance: Uuid) {
        let mut rec = self.inner.borrow_mut();
        if !rec.guards.contains(&instance) {
            rec.guards.push(instance);
        }
    }

    fn detach_guard(&mut self, instance: Uuid) {
        self.inner.borrow_mut().guards.retain(|g| *g != instance);
    }

    fn submit(&mut self) {
        let mut rec = self.inner.borrow_mut();
        let fields = rec.fields.clone();
        rec.submitted.push(fields);
    }
}

use crate::config::Rules;
use crate::detect::{self, Detection};
use crate::error::{PersonalizeError, Result};
use crate::guard::{self, SubmitDecision};
use crate::host::HostForm;
use crate::paths;
use crate::preview::Preview;
use crate::serialize::FormFields;
use crate::wizard::{Action, Outcome, WizardController, WizardState};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// What the configurator knows about the product it is mounted on.
#[derive(Debug, Clone, Default)]
pub struct Listing {
    pub title: String,
    /// Count from structured listing data; wins over the title when set.
    pub item_count: Option<usize>,
}

impl Listing {
    pub fn from_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            item_count: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Configurator
// ---------------------------------------------------------------------------

/// One live configurator: a wizard controller wired to a host form.
#[derive(Debug)]
pub struct Configurator<H: HostForm> {
    id: Uuid,
    mounted_at: DateTime<Utc>,
    listing: Listing,
    detection: Detection,
    controller: WizardController,
    host: H,
}

impl<H: HostForm> Configurator<H> {
    pub fn new(listing: Listing, rules: Rules, host: H) -> Result<Self> {
        let (detection, controller) = Self::prepare(&listing, rules)?;
        Ok(Self::attach(listing, detection, controller, host))
    }

    /// Every fallible step of mounting. Runs before any host form is touched.
    fn prepare(listing: &Listing, rules: Rules) -> Result<(Detection, WizardController)> {
        let detection = detect::resolve(&listing.title, listing.item_count)?;
        let controller = WizardController::new(detection.count, rules)?;
        Ok((detection, controller))
    }

    fn attach(
        listing: Listing,
        detection: Detection,
        controller: WizardController,
        mut host: H,
    ) -> Self {
        let id = Uuid::new_v4();
        host.attach_guard(id);
        host.set_fields(controller.fields());
        tracing::info!(
            instance = %id,
            items = detection.count,
            source = %detection.source,
            "configurator mounted"
        );
        Self {
            id,
            mounted_at: Utc::now(),
            listing,
            detection,
            controller,
            host,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn mounted_at(&self) -> DateTime<Utc> {
        self.mounted_at
    }

    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    pub fn detection(&self) -> Detection {
        self.detection
    }

    pub fn state(&self) -> &WizardState {
        self.controller.state()
    }

    pub fn controller(&self) -> &WizardController {
        &self.controller
    }

    pub fn fields(&self) -> &FormFields {
        self.controller.fields()
    }

    pub fn preview(&self) -> Preview {
        self.controller.preview()
    }

    /// Apply one user action and push its effects to the host form.
    pub fn dispatch(&mut self, action: Action) -> Outcome {
        let outcome = self.controller.dispatch(action);
        match &outcome {
            Outcome::Invalid { failure } => {
                self.host.show_message(&failure.to_string());
                self.host.focus_field(failure.field());
            }
            Outcome::Rejected { reason } => self.host.show_message(reason),
            _ => self.host.clear_message(),
        }
        if outcome.saved_index().is_some() {
            self.host.set_fields(self.controller.fields());
        }
        outcome
    }

    /// Run the submission guard. A blocked submission surfaces the message,
    /// focuses the first gap and scrolls the configurator into view; an
    /// allowed one lets the host submit its fields unchanged.
    pub fn attempt_submit(&mut self) -> SubmitDecision {
        let decision = guard::check(&self.controller);
        match &decision {
            SubmitDecision::Allow => {
                tracing::info!(instance = %self.id, "submission allowed");
                self.host.clear_message();
                self.host.submit();
            }
            SubmitDecision::Block {
                message,
                saved,
                required,
                focus,
            } => {
                tracing::warn!(instance = %self.id, saved, required, "submission blocked");
                self.host.show_message(message);
                if let Some(field) = focus {
                    self.host.focus_field(*field);
                }
                self.host.scroll_into_view();
            }
        }
        decision
    }

    /// Detach from the host form, clear the fields it wrote and hand the
    /// form back.
    pub fn dispose(mut self) -> H {
        self.host.detach_guard(self.id);
        self.host.set_fields(&FormFields::default());
        self.host.clear_message();
        tracing::info!(instance = %self.id, "configurator disposed");
        self.host
    }
}

// ---------------------------------------------------------------------------
// MountRegistry
// ---------------------------------------------------------------------------

/// At most one live configurator per mount point. Mounting over an occupied
/// point disposes the previous instance first.
#[derive(Debug)]
pub struct MountRegistry<H: HostForm> {
    mounts: HashMap<String, Configurator<H>>,
}

impl<H: HostForm> Default for MountRegistry<H> {
    fn default() -> Self {
        Self {
            mounts: HashMap::new(),
        }
    }
}

impl<H: HostForm> MountRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mount(
        &mut self,
        point: &str,
        listing: Listing,
        rules: Rules,
        host: H,
    ) -> Result<&mut Configurator<H>> {
        paths::validate_mount_point(point)?;
        // A failed mount leaves the current instance and its guard in place.
        let (detection, controller) = Configurator::<H>::prepare(&listing, rules)?;
        if let Some(previous) = self.mounts.remove(point) {
            tracing::info!(point, instance = %previous.id(), "replacing mounted configurator");
            previous.dispose();
        }
        let configurator = Configurator::attach(listing, detection, controller, host);
        Ok(self
            .mounts
            .entry(point.to_string())
            .or_insert(configurator))
    }

    pub fn get(&self, point: &str) -> Option<&Configurator<H>> {
        self.mounts.get(point)
    }

    pub fn dispose(&mut self, point: &str) -> Result<H> {
        self.mounts
            .remove(point)
            .map(Configurator::dispose)
            .ok_or_else(|| PersonalizeError::MountNotFound(point.to_string()))
    }

    pub fn len(&self) -> usize {
        self.mounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mounts.is_empty()
    }
}

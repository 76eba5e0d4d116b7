//! Form state controllers.
//!
//! Each form owns its field values, a [`Submission`] tracking the
//! Idle → Submitting → Idle cycle, and the last result shown to the user.
//! Network work happens elsewhere: `begin_submit` hands out the payload and
//! `finish_submit` takes the outcome back.

pub mod address;
pub mod login;
pub mod signup;

pub use address::{AddressField, SavedAddressForm};
pub use login::{LoginField, LoginForm};
pub use signup::{SignUpField, SignUpForm};

use crate::gateway::Endpoint;
use crate::models::{AccessMode, SubmissionResult};
use crate::utils::TextInput;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
}

/// Submission state plus the result of the last settled attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    status: SubmissionStatus,
    last_result: Option<SubmissionResult>,
}

impl Submission {
    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    pub fn is_in_flight(&self) -> bool {
        self.status == SubmissionStatus::Submitting
    }

    pub fn last_result(&self) -> Option<&SubmissionResult> {
        self.last_result.as_ref()
    }

    pub fn clear_message(&mut self) {
        self.last_result = None;
    }

    fn begin(&mut self) {
        self.status = SubmissionStatus::Submitting;
        self.last_result = None;
    }

    fn settle(&mut self, result: SubmissionResult) {
        self.status = SubmissionStatus::Idle;
        self.last_result = Some(result);
    }
}

/// Why `begin_submit` refused to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitBlocked {
    /// A submission is already outstanding
    InFlight,
    /// Field rules are not met
    Invalid,
}

pub trait Form {
    type Field: Copy + std::fmt::Debug;
    type Payload: Serialize + Send + Sync + 'static;

    fn endpoint(&self) -> Endpoint;

    /// Text input backing `field`, if it is a text field.
    fn input_mut(&mut self, field: Self::Field) -> Option<&mut TextInput>;

    /// Replace one field's value.
    fn set_field(&mut self, field: Self::Field, value: &str);

    fn validate(&self) -> bool;

    /// Clear every field and the message. The access mode is kept.
    fn reset(&mut self);

    /// Body to send; `None` only when the form is invalid.
    fn payload(&self) -> Option<Self::Payload>;

    /// Shown when a successful response carries no message.
    fn confirmation(&self) -> String;

    fn submission(&self) -> &Submission;

    fn submission_mut(&mut self) -> &mut Submission;

    /// Whether a successful submission clears the form.
    fn reset_on_success(&self) -> bool {
        true
    }

    /// Apply an in-place edit to a text field, clearing the message.
    fn edit<F>(&mut self, field: Self::Field, f: F) -> bool
    where
        F: FnOnce(&mut TextInput) -> bool,
        Self: Sized,
    {
        let handled = match self.input_mut(field) {
            Some(input) => f(input),
            None => false,
        };
        if handled {
            self.submission_mut().clear_message();
        }
        handled
    }

    /// Start a submission: returns the payload to dispatch.
    fn begin_submit(&mut self) -> Result<Self::Payload, SubmitBlocked> {
        if self.submission().is_in_flight() {
            debug!("{} submit ignored, already in flight", self.endpoint().name());
            return Err(SubmitBlocked::InFlight);
        }
        if !self.validate() {
            return Err(SubmitBlocked::Invalid);
        }
        let payload = self.payload().ok_or(SubmitBlocked::Invalid)?;
        self.submission_mut().begin();
        Ok(payload)
    }

    /// Settle the outstanding submission.
    fn finish_submit(&mut self, result: SubmissionResult) {
        if result.success && self.reset_on_success() {
            self.reset();
        }
        self.submission_mut().settle(result);
    }

    fn is_submitting(&self) -> bool {
        self.submission().is_in_flight()
    }

    fn last_result(&self) -> Option<&SubmissionResult> {
        self.submission().last_result()
    }
}

/// Forms with a company/general switch.
pub trait AccessModeSelector {
    fn mode(&self) -> AccessMode;

    /// Switch mode, clearing mode-specific fields and the message.
    fn set_mode(&mut self, mode: AccessMode);

    fn toggle_mode(&mut self) {
        let next = self.mode().toggled();
        self.set_mode(next);
    }
}

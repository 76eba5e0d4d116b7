use super::{Form, Submission};
use crate::gateway::Endpoint;
use crate::models::SavedAddress;
use crate::utils::TextInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressField {
    Location,
}

/// The location shown on the safety routing screen, saved on demand.
#[derive(Debug, Clone, Default)]
pub struct SavedAddressForm {
    pub location: TextInput,
    submission: Submission,
}

impl SavedAddressForm {
    pub fn new(location: &str) -> Self {
        Self {
            location: TextInput::with_text(location),
            submission: Submission::default(),
        }
    }
}

impl Form for SavedAddressForm {
    type Field = AddressField;
    type Payload = SavedAddress;

    fn endpoint(&self) -> Endpoint {
        Endpoint::SaveAddress
    }

    fn input_mut(&mut self, field: AddressField) -> Option<&mut TextInput> {
        match field {
            AddressField::Location => Some(&mut self.location),
        }
    }

    fn set_field(&mut self, field: AddressField, value: &str) {
        if let Some(input) = self.input_mut(field) {
            input.set_text(value);
        }
        self.submission.clear_message();
    }

    fn validate(&self) -> bool {
        !self.location.is_blank()
    }

    fn reset(&mut self) {
        self.location.clear();
        self.submission = Submission::default();
    }

    fn payload(&self) -> Option<SavedAddress> {
        Some(SavedAddress {
            address: self.location.text_trimmed().to_string(),
        })
    }

    fn confirmation(&self) -> String {
        "Address saved successfully!".to_string()
    }

    fn submission(&self) -> &Submission {
        &self.submission
    }

    fn submission_mut(&mut self) -> &mut Submission {
        &mut self.submission
    }

    fn reset_on_success(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::SubmitBlocked;
    use crate::models::SubmissionResult;

    #[test]
    fn test_blank_location_is_invalid() {
        let mut form = SavedAddressForm::new("  ");
        assert!(!form.validate());
        assert_eq!(form.begin_submit(), Err(SubmitBlocked::Invalid));
    }

    #[test]
    fn test_success_keeps_location() {
        let mut form = SavedAddressForm::new("2972 Westheimer Rd");
        let payload = form.begin_submit().unwrap();
        assert_eq!(payload.address, "2972 Westheimer Rd");
        form.finish_submit(SubmissionResult::success(form.confirmation()));
        assert_eq!(form.location.text(), "2972 Westheimer Rd");
        assert_eq!(form.last_result().unwrap().message, "Address saved successfully!");
    }
}

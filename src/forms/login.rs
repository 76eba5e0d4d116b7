use super::{AccessModeSelector, Form, Submission};
use crate::gateway::Endpoint;
use crate::models::{AccessMode, Credentials};
use crate::utils::TextInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
}

#[derive(Debug, Clone)]
pub struct LoginForm {
    pub email: TextInput,
    pub password: TextInput,
    pub remember_me: bool,
    pub show_password: bool,
    mode: AccessMode,
    submission: Submission,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            email: TextInput::new(),
            password: TextInput::new(),
            remember_me: false,
            show_password: false,
            mode: AccessMode::Company,
            submission: Submission::default(),
        }
    }
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_remember_me(&mut self) {
        self.remember_me = !self.remember_me;
    }

    pub fn toggle_password_visibility(&mut self) {
        self.show_password = !self.show_password;
    }
}

impl Form for LoginForm {
    type Field = LoginField;
    type Payload = Credentials;

    fn endpoint(&self) -> Endpoint {
        Endpoint::Login
    }

    fn input_mut(&mut self, field: LoginField) -> Option<&mut TextInput> {
        Some(match field {
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
        })
    }

    fn set_field(&mut self, field: LoginField, value: &str) {
        if let Some(input) = self.input_mut(field) {
            input.set_text(value);
        }
        self.submission.clear_message();
    }

    fn validate(&self) -> bool {
        !self.email.is_blank() && self.email.text().contains('@') && !self.password.is_blank()
    }

    fn reset(&mut self) {
        self.email.clear();
        self.password.clear();
        self.remember_me = false;
        self.show_password = false;
        self.submission = Submission::default();
    }

    fn payload(&self) -> Option<Credentials> {
        Some(Credentials {
            email: self.email.text_trimmed().to_string(),
            password: self.password.text().to_string(),
            remember_me: self.remember_me,
            access_mode: self.mode,
        })
    }

    fn confirmation(&self) -> String {
        format!("Signed in successfully with {} access!", self.mode)
    }

    fn submission(&self) -> &Submission {
        &self.submission
    }

    fn submission_mut(&mut self) -> &mut Submission {
        &mut self.submission
    }
}

impl AccessModeSelector for LoginForm {
    fn mode(&self) -> AccessMode {
        self.mode
    }

    fn set_mode(&mut self, mode: AccessMode) {
        self.mode = mode;
        self.email.clear();
        self.password.clear();
        self.submission.clear_message();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::{SubmissionStatus, SubmitBlocked};
    use crate::models::SubmissionResult;

    fn filled() -> LoginForm {
        let mut form = LoginForm::new();
        form.set_field(LoginField::Email, "ops@rivulex.io");
        form.set_field(LoginField::Password, "x");
        form
    }

    #[test]
    fn test_starts_in_company_mode() {
        assert_eq!(LoginForm::new().mode(), AccessMode::Company);
    }

    #[test]
    fn test_validate() {
        assert!(filled().validate());

        let mut form = filled();
        form.set_field(LoginField::Email, "ops.rivulex.io");
        assert!(!form.validate());

        let mut form = filled();
        form.set_field(LoginField::Password, "");
        assert!(!form.validate());

        let mut form = filled();
        form.set_field(LoginField::Email, "   ");
        assert!(!form.validate());
    }

    #[test]
    fn test_whitespace_password_blocks_submit() {
        let mut form = filled();
        form.set_field(LoginField::Password, "   ");
        assert!(!form.validate());
        assert_eq!(form.begin_submit().unwrap_err(), SubmitBlocked::Invalid);
        assert!(!form.is_submitting());
    }

    #[test]
    fn test_set_mode_clears_credentials() {
        let mut form = filled();
        form.finish_submit(SubmissionResult::failure("bad"));
        form.set_mode(AccessMode::General);
        assert_eq!(form.email.text(), "");
        assert_eq!(form.password.text(), "");
        assert!(form.last_result().is_none());

        // Re-selecting the same mode clears too
        form.set_field(LoginField::Email, "a@b.co");
        form.set_mode(AccessMode::General);
        assert_eq!(form.email.text(), "");
    }

    #[test]
    fn test_payload_carries_mode_and_remember_me() {
        let mut form = filled();
        form.toggle_mode();
        form.set_field(LoginField::Email, "ops@rivulex.io");
        form.set_field(LoginField::Password, "hunter22");
        form.toggle_remember_me();
        let payload = form.begin_submit().unwrap();
        assert_eq!(payload.access_mode, AccessMode::General);
        assert!(payload.remember_me);
        assert_eq!(form.submission().status(), SubmissionStatus::Submitting);
    }

    #[test]
    fn test_second_submit_is_noop() {
        let mut form = filled();
        assert!(form.begin_submit().is_ok());
        assert_eq!(form.begin_submit(), Err(SubmitBlocked::InFlight));
        assert!(form.is_submitting());
    }

    #[test]
    fn test_success_resets_and_confirms() {
        let mut form = filled();
        form.toggle_remember_me();
        let _ = form.begin_submit().unwrap();
        let confirmation = form.confirmation();
        assert_eq!(confirmation, "Signed in successfully with company access!");
        form.finish_submit(SubmissionResult::success(confirmation));
        assert_eq!(form.email.text(), "");
        assert!(!form.remember_me);
        assert_eq!(form.mode(), AccessMode::Company);
        assert!(form.last_result().unwrap().success);
    }

    #[test]
    fn test_failure_keeps_fields() {
        let mut form = filled();
        let _ = form.begin_submit().unwrap();
        form.finish_submit(SubmissionResult::failure(
            "request timed out, check your connection and try again.",
        ));
        assert_eq!(form.email.text(), "ops@rivulex.io");
        assert_eq!(form.password.text(), "x");
        assert!(!form.is_submitting());
    }
}

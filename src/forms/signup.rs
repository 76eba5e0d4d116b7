use super::{AccessModeSelector, Form, Submission};
use crate::gateway::Endpoint;
use crate::models::{AccessMode, Gender, SignUpProfile};
use crate::utils::TextInput;
use tracing::warn;

pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignUpField {
    FirstName,
    LastName,
    Gender,
    Country,
    StateOfResidence,
    CompanyEmail,
    GeneralEmail,
    Password,
}

#[derive(Debug, Clone)]
pub struct SignUpForm {
    pub first_name: TextInput,
    pub last_name: TextInput,
    pub country: TextInput,
    pub state_of_residence: TextInput,
    pub company_email: TextInput,
    pub general_email: TextInput,
    pub password: TextInput,
    pub show_password: bool,
    gender: Option<Gender>,
    mode: AccessMode,
    submission: Submission,
}

impl Default for SignUpForm {
    fn default() -> Self {
        Self {
            first_name: TextInput::new(),
            last_name: TextInput::new(),
            country: TextInput::new(),
            state_of_residence: TextInput::new(),
            company_email: TextInput::new(),
            general_email: TextInput::new(),
            password: TextInput::new(),
            show_password: false,
            gender: None,
            mode: AccessMode::General,
            submission: Submission::default(),
        }
    }
}

impl SignUpForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gender(&self) -> Option<Gender> {
        self.gender
    }

    pub fn set_gender(&mut self, gender: Option<Gender>) {
        self.gender = gender;
        self.submission.clear_message();
    }

    /// Step the gender selector forwards or backwards.
    pub fn cycle_gender(&mut self, forward: bool) {
        self.set_gender(Gender::cycle(self.gender, forward));
    }

    /// Email field that belongs to the active mode.
    pub fn active_email(&self) -> &TextInput {
        match self.mode {
            AccessMode::Company => &self.company_email,
            AccessMode::General => &self.general_email,
        }
    }

    /// Field id of the active-mode email.
    pub fn active_email_field(&self) -> SignUpField {
        match self.mode {
            AccessMode::Company => SignUpField::CompanyEmail,
            AccessMode::General => SignUpField::GeneralEmail,
        }
    }

    pub fn password_long_enough(&self) -> bool {
        self.password.char_count() >= MIN_PASSWORD_LEN
    }
}

impl Form for SignUpForm {
    type Field = SignUpField;
    type Payload = SignUpProfile;

    fn endpoint(&self) -> Endpoint {
        Endpoint::SignUp
    }

    fn input_mut(&mut self, field: SignUpField) -> Option<&mut TextInput> {
        Some(match field {
            SignUpField::FirstName => &mut self.first_name,
            SignUpField::LastName => &mut self.last_name,
            SignUpField::Country => &mut self.country,
            SignUpField::StateOfResidence => &mut self.state_of_residence,
            SignUpField::CompanyEmail => &mut self.company_email,
            SignUpField::GeneralEmail => &mut self.general_email,
            SignUpField::Password => &mut self.password,
            SignUpField::Gender => return None,
        })
    }

    fn set_field(&mut self, field: SignUpField, value: &str) {
        if field == SignUpField::Gender {
            let gender = if value.trim().is_empty() {
                None
            } else {
                match value.parse::<Gender>() {
                    Ok(gender) => Some(gender),
                    Err(e) => {
                        warn!("{}", e);
                        None
                    }
                }
            };
            self.set_gender(gender);
            return;
        }
        if let Some(input) = self.input_mut(field) {
            input.set_text(value);
        }
        self.submission.clear_message();
    }

    fn validate(&self) -> bool {
        let required = [
            &self.first_name,
            &self.last_name,
            &self.country,
            &self.state_of_residence,
        ];
        required.iter().all(|input| !input.is_blank())
            && self.gender.is_some()
            && self.active_email().text().contains('@')
            && self.password_long_enough()
    }

    fn reset(&mut self) {
        for input in [
            &mut self.first_name,
            &mut self.last_name,
            &mut self.country,
            &mut self.state_of_residence,
            &mut self.company_email,
            &mut self.general_email,
            &mut self.password,
        ] {
            input.clear();
        }
        self.gender = None;
        self.show_password = false;
        self.submission = Submission::default();
    }

    fn payload(&self) -> Option<SignUpProfile> {
        Some(SignUpProfile {
            first_name: self.first_name.text_trimmed().to_string(),
            last_name: self.last_name.text_trimmed().to_string(),
            gender: self.gender?,
            country: self.country.text_trimmed().to_string(),
            state_of_residence: self.state_of_residence.text_trimmed().to_string(),
            email: self.active_email().text_trimmed().to_string(),
            password: self.password.text().to_string(),
            access_mode: self.mode,
        })
    }

    fn confirmation(&self) -> String {
        format!("Account created successfully with {} access!", self.mode)
    }

    fn submission(&self) -> &Submission {
        &self.submission
    }

    fn submission_mut(&mut self) -> &mut Submission {
        &mut self.submission
    }
}

impl AccessModeSelector for SignUpForm {
    fn mode(&self) -> AccessMode {
        self.mode
    }

    fn set_mode(&mut self, mode: AccessMode) {
        self.mode = mode;
        match mode {
            AccessMode::Company => self.general_email.clear(),
            AccessMode::General => self.company_email.clear(),
        }
        self.submission.clear_message();
    }
}

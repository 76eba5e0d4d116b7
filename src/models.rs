//! Wire and domain types shared by the forms, the gateway and the screens.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// User category selected on the login and sign-up screens.
///
/// Serialized as `"company"` / `"general"`. On the wire the field is always
/// named `accessType`, for both login and sign-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessMode {
    Company,
    General,
}

impl AccessMode {
    /// Wire value (`company` / `general`).
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessMode::Company => "company",
            AccessMode::General => "general",
        }
    }

    /// Title used on the sign-up screen ("Company Access").
    pub fn title(&self) -> &'static str {
        match self {
            AccessMode::Company => "Company Access",
            AccessMode::General => "General Access",
        }
    }

    /// Welcome line shown under the login header.
    pub fn welcome(&self) -> &'static str {
        match self {
            AccessMode::Company => {
                "Access the full dashboard with AI assistant and damage assessment tools."
            }
            AccessMode::General => {
                "Get location-specific flood insights and analytics for your area."
            }
        }
    }

    /// Secondary note under the welcome line.
    pub fn welcome_note(&self) -> &'static str {
        match self {
            AccessMode::Company => "Company domain email required for full system access.",
            AccessMode::General => {
                "Access personalized flood monitoring without resource-intensive features."
            }
        }
    }

    /// Heading and feature list of the login access panel.
    pub fn login_features(&self) -> (&'static str, &'static [&'static str]) {
        match self {
            AccessMode::Company => (
                "Full Access Includes",
                &[
                    "AI Assistant & Chat Support",
                    "Damage Assessment Tools",
                    "Complete Analytics Dashboard",
                    "Emergency Response System",
                ],
            ),
            AccessMode::General => (
                "Your Access Includes",
                &[
                    "Location-Specific Insights",
                    "Flood Risk Analytics",
                    "Personal Alerts & Notifications",
                    "Community Updates",
                ],
            ),
        }
    }

    /// Plan features listed on the sign-up access card.
    pub fn plan_features(&self) -> &'static [&'static str] {
        match self {
            AccessMode::Company => &[
                "Full platform access",
                "Advanced analytics",
                "Team collaboration",
                "Priority support",
            ],
            AccessMode::General => &[
                "Basic platform access",
                "Standard features",
                "Community support",
                "Limited storage",
            ],
        }
    }

    /// The other mode.
    pub fn toggled(&self) -> Self {
        match self {
            AccessMode::Company => AccessMode::General,
            AccessMode::General => AccessMode::Company,
        }
    }
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gender options offered by the sign-up form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
    #[serde(rename = "prefer-not-to-say")]
    Unspecified,
}

impl Gender {
    pub const ALL: [Gender; 4] = [
        Gender::Male,
        Gender::Female,
        Gender::Other,
        Gender::Unspecified,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
            Gender::Unspecified => "prefer-not-to-say",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
            Gender::Unspecified => "Prefer not to say",
        }
    }

    /// Step through `None -> Male -> ... -> Unspecified -> None`.
    pub fn cycle(current: Option<Gender>, forward: bool) -> Option<Gender> {
        let len = Self::ALL.len() as isize;
        // Index -1 stands for "no selection".
        let index = current
            .and_then(|g| Self::ALL.iter().position(|x| *x == g))
            .map(|i| i as isize)
            .unwrap_or(-1);
        let next = if forward { index + 1 } else { index - 1 };
        let next = (next + 1).rem_euclid(len + 1) - 1;
        if next < 0 {
            None
        } else {
            Some(Self::ALL[next as usize])
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            "prefer-not-to-say" | "unspecified" => Ok(Gender::Unspecified),
            other => Err(format!("Unknown gender: {}", other)),
        }
    }
}

/// Login request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
    #[serde(rename = "accessType")]
    pub access_mode: AccessMode,
}

/// Sign-up request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpProfile {
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub country: String,
    pub state_of_residence: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "accessType")]
    pub access_mode: AccessMode,
}

/// Address-save request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavedAddress {
    pub address: String,
}

/// Route-lookup request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteRequest {
    pub origin: String,
    pub destination: String,
}

/// Alert category. Unknown categories are kept as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertCategory {
    Weather,
    General,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    #[serde(other)]
    Unknown,
}

/// A read-only alert produced by the safety-data endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyAlert {
    #[serde(default)]
    pub id: serde_json::Value,
    #[serde(alias = "type", default = "default_category")]
    pub category: AlertCategory,
    #[serde(alias = "text")]
    pub message: String,
    #[serde(default = "default_severity")]
    pub severity: Severity,
}

fn default_category() -> AlertCategory {
    AlertCategory::General
}

fn default_severity() -> Severity {
    Severity::Unknown
}

impl SafetyAlert {
    pub fn new(id: u64, category: AlertCategory, message: &str, severity: Severity) -> Self {
        Self {
            id: serde_json::Value::from(id),
            category,
            message: message.to_string(),
            severity,
        }
    }

    /// Alerts shown before any safety data has been fetched.
    pub fn initial() -> Vec<SafetyAlert> {
        vec![
            SafetyAlert::new(1, AlertCategory::Weather, "Rainfall: 2mm", Severity::Low),
            SafetyAlert::new(2, AlertCategory::General, "Others", Severity::Medium),
        ]
    }
}

/// Response of the safety-data endpoint. `alerts` is optional; when it is
/// absent the caller keeps whatever it was showing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SafetyData {
    #[serde(default)]
    pub alerts: Option<Vec<SafetyAlert>>,
}

/// Opaque route description, only ever rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteDescription(pub serde_json::Value);

impl RouteDescription {
    /// One-line summary for the map caption.
    pub fn summary(&self) -> String {
        match &self.0 {
            serde_json::Value::Object(map) => {
                for key in ["summary", "description", "name"] {
                    if let Some(serde_json::Value::String(s)) = map.get(key) {
                        return s.clone();
                    }
                }
                format!("Route loaded ({} fields)", map.len())
            }
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Null => "No route data".to_string(),
            _ => "Route loaded".to_string(),
        }
    }
}

/// Outcome of one submission attempt, shown to the user until the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResult {
    pub success: bool,
    pub message: String,
}

impl SubmissionResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_up_profile_wire_names() {
        let profile = SignUpProfile {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            gender: Gender::Male,
            country: "Nigeria".to_string(),
            state_of_residence: "Borno".to_string(),
            email: "john@gmail.com".to_string(),
            password: "password1".to_string(),
            access_mode: AccessMode::General,
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["firstName"], "John");
        assert_eq!(json["stateOfResidence"], "Borno");
        assert_eq!(json["email"], "john@gmail.com");
        assert_eq!(json["accessType"], "general");
        assert_eq!(json["gender"], "male");
    }

    #[test]
    fn test_credentials_wire_names() {
        let creds = Credentials {
            email: "a@b.co".to_string(),
            password: "pw".to_string(),
            remember_me: true,
            access_mode: AccessMode::Company,
        };
        let json = serde_json::to_value(&creds).unwrap();
        assert_eq!(json["rememberMe"], true);
        assert_eq!(json["accessType"], "company");
    }

    #[test]
    fn test_gender_unspecified_wire_value() {
        let json = serde_json::to_string(&Gender::Unspecified).unwrap();
        assert_eq!(json, "\"prefer-not-to-say\"");
        assert_eq!("prefer-not-to-say".parse::<Gender>(), Ok(Gender::Unspecified));
    }

    #[test]
    fn test_gender_cycle_wraps_through_none() {
        assert_eq!(Gender::cycle(None, true), Some(Gender::Male));
        assert_eq!(Gender::cycle(Some(Gender::Unspecified), true), None);
        assert_eq!(Gender::cycle(None, false), Some(Gender::Unspecified));
        assert_eq!(Gender::cycle(Some(Gender::Male), false), None);
    }

    #[test]
    fn test_alert_accepts_alternate_keys() {
        let alert: SafetyAlert = serde_json::from_str(
            r#"{"id": 7, "type": "weather", "text": "Flash flood", "severity": "high"}"#,
        )
        .unwrap();
        assert_eq!(alert.category, AlertCategory::Weather);
        assert_eq!(alert.message, "Flash flood");
        assert_eq!(alert.severity, Severity::High);
    }

    #[test]
    fn test_alert_unknown_category_and_severity() {
        let alert: SafetyAlert = serde_json::from_str(
            r#"{"id": "x", "category": "traffic", "message": "Road closed", "severity": "extreme"}"#,
        )
        .unwrap();
        assert_eq!(alert.category, AlertCategory::Other);
        assert_eq!(alert.severity, Severity::Unknown);
    }

    #[test]
    fn test_safety_data_without_alerts() {
        let data: SafetyData = serde_json::from_str("{}").unwrap();
        assert!(data.alerts.is_none());
    }

    #[test]
    fn test_route_summary() {
        let route = RouteDescription(serde_json::json!({"summary": "Via Lincoln St"}));
        assert_eq!(route.summary(), "Via Lincoln St");
        let route = RouteDescription(serde_json::Value::Null);
        assert_eq!(route.summary(), "No route data");
    }
}

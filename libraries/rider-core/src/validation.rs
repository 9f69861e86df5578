//! Form validation for the sign-in, user and trip forms.
//!
//! Two rules exist: `required` (the value is not blank) and `email` (the
//! value looks like an address). Forms collect every failing field rather
//! than stopping at the first.

use crate::date::parse_date;
use crate::error::{Result, RiderError};
use crate::types::{NewTrip, NewUser, Role};

/// A validation rule applied to a single field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required,
    Email,
}

impl Rule {
    /// Check `value`, returning the failure message if it does not pass
    pub fn check(self, value: &str) -> std::result::Result<(), &'static str> {
        match self {
            Self::Required if value.trim().is_empty() => Err("is required"),
            Self::Email if !value.trim().is_empty() && !is_email(value.trim()) => {
                Err("must be a valid email")
            }
            _ => Ok(()),
        }
    }
}

fn is_email(value: &str) -> bool {
    let mut parts = value.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };

    !local.is_empty()
        && !value.contains(char::is_whitespace)
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}

/// Validate one field against a set of rules
pub fn validate_field(field: &str, value: &str, rules: &[Rule]) -> Result<()> {
    for rule in rules {
        rule.check(value)
            .map_err(|message| RiderError::validation(field, message))?;
    }
    Ok(())
}

/// Feedback state for a form field.
///
/// Returns `None` until the field has been touched or the form submitted, so
/// that a pristine form shows neither success nor failure. After that, the
/// field's validity is reported.
pub fn validation_state(dirty: bool, validated: bool, valid: Option<bool>) -> Option<bool> {
    if dirty || validated {
        valid
    } else {
        None
    }
}

/// Collected failures of a form, keyed by field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    errors: Vec<RiderError>,
}

impl FormErrors {
    fn check(&mut self, field: &str, value: &str, rules: &[Rule]) {
        if let Err(e) = validate_field(field, value, rules) {
            self.errors.push(e);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[RiderError] {
        &self.errors
    }

    /// Whether `field` has a failure
    pub fn has(&self, field: &str) -> bool {
        self.errors
            .iter()
            .any(|e| matches!(e, RiderError::Validation { field: f, .. } if f == field))
    }

    fn into_result(self) -> std::result::Result<(), FormErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for FormErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
        f.write_str(&messages.join("; "))
    }
}

impl std::error::Error for FormErrors {}

/// Raw input of the sign-in form
#[derive(Debug, Clone, Default)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

impl SignInForm {
    pub fn validate(&self) -> std::result::Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        errors.check("email", &self.email, &[Rule::Required, Rule::Email]);
        errors.check("password", &self.password, &[Rule::Required]);
        errors.into_result()
    }
}

/// Raw input of the user form
#[derive(Debug, Clone)]
pub struct UserForm {
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl UserForm {
    pub fn validate(&self) -> std::result::Result<NewUser, FormErrors> {
        let mut errors = FormErrors::default();
        errors.check("email", &self.email, &[Rule::Required, Rule::Email]);
        errors.check("password", &self.password, &[Rule::Required]);
        errors.into_result()?;

        Ok(NewUser::new(
            self.email.trim(),
            self.password.clone(),
            self.role,
        ))
    }
}

/// Raw input of the trip form, dates as typed
#[derive(Debug, Clone, Default)]
pub struct TripForm {
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    pub comment: Option<String>,
}

impl TripForm {
    pub fn validate(&self) -> std::result::Result<NewTrip, FormErrors> {
        let mut errors = FormErrors::default();
        errors.check("destination", &self.destination, &[Rule::Required]);
        errors.check("startDate", &self.start_date, &[Rule::Required]);
        errors.check("endDate", &self.end_date, &[Rule::Required]);

        let start = parse_date_field(&mut errors, "startDate", &self.start_date);
        let end = parse_date_field(&mut errors, "endDate", &self.end_date);

        match (start, end) {
            (Some(start_date), Some(end_date)) if errors.is_empty() => Ok(NewTrip {
                destination: self.destination.trim().to_string(),
                start_date,
                end_date,
                comment: self
                    .comment
                    .as_ref()
                    .map(|c| c.trim().to_string())
                    .filter(|c| !c.is_empty()),
            }),
            _ => Err(errors),
        }
    }
}

fn parse_date_field(
    errors: &mut FormErrors,
    field: &str,
    value: &str,
) -> Option<chrono::NaiveDate> {
    if value.trim().is_empty() {
        return None;
    }
    match parse_date(value) {
        Ok(date) => Some(date),
        Err(_) => {
            errors
                .errors
                .push(RiderError::validation(field, "must be a date (YYYY-MM-DD)"));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_rejects_blank() {
        assert!(Rule::Required.check("").is_err());
        assert!(Rule::Required.check("   ").is_err());
        assert!(Rule::Required.check("x").is_ok());
    }

    #[test]
    fn email_rule() {
        assert!(Rule::Email.check("user1@example.com").is_ok());
        assert!(Rule::Email.check("user1@example").is_err());
        assert!(Rule::Email.check("@example.com").is_err());
        assert!(Rule::Email.check("a@b@example.com").is_err());
        assert!(Rule::Email.check("a b@example.com").is_err());
        assert!(Rule::Email.check("a@example..com").is_err());
        // Blank values are the required rule's business.
        assert!(Rule::Email.check("").is_ok());
    }

    #[test]
    fn validate_field_reports_first_failure() {
        let err = validate_field("email", "", &[Rule::Required, Rule::Email]).unwrap_err();
        assert_eq!(err, RiderError::validation("email", "is required"));
    }

    #[test]
    fn pristine_fields_show_no_state() {
        assert_eq!(validation_state(false, false, Some(false)), None);
        assert_eq!(validation_state(true, false, Some(false)), Some(false));
        assert_eq!(validation_state(false, true, Some(true)), Some(true));
        assert_eq!(validation_state(true, true, None), None);
    }

    #[test]
    fn sign_in_form_collects_all_errors() {
        let errors = SignInForm::default().validate().unwrap_err();
        assert!(errors.has("email"));
        assert!(errors.has("password"));
        assert_eq!(errors.errors().len(), 2);
    }

    #[test]
    fn user_form_builds_new_user() {
        let form = UserForm {
            email: " m@example.com ".to_string(),
            password: "secret".to_string(),
            role: Role::Manager,
        };
        let user = form.validate().unwrap();
        assert_eq!(user.email, "m@example.com");
        assert_eq!(user.role, Role::Manager);
    }

    #[test]
    fn trip_form_parses_dates() {
        let form = TripForm {
            destination: "Rome".to_string(),
            start_date: "2020-07-01".to_string(),
            end_date: "2020-08-01".to_string(),
            comment: Some("  ".to_string()),
        };
        let trip = form.validate().unwrap();
        assert_eq!(trip.destination, "Rome");
        assert_eq!(trip.comment, None);
        assert_eq!(crate::date::date_to_string(trip.end_date), "2020-08-01");
    }

    #[test]
    fn trip_form_rejects_bad_dates() {
        let form = TripForm {
            destination: String::new(),
            start_date: "tomorrow".to_string(),
            end_date: String::new(),
            comment: None,
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.has("destination"));
        assert!(errors.has("startDate"));
        assert!(errors.has("endDate"));
        assert!(errors.to_string().contains("YYYY-MM-DD"));
    }
}

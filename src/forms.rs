//! Intake forms for bookings and tutor selection requests.
//!
//! Validation is pure. A failed validation yields the messages per field so the
//! caller can show the same form again; only a successful one reaches the store.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateArgs, ValidationError, ValidationErrors};

use crate::catalog;

pub const MSG_REQUIRED: &str = "Обязательное поле";
pub const MSG_NAME_LEN: &str = "от 3 до 100 символов";
pub const MSG_PHONE_LEN: &str = "от 4 до 15 цифр";
pub const MSG_NOT_A_CHOICE: &str = "Выберите один из вариантов";

/// Field name to the messages raised for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let fields = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let messages = errs
                    .iter()
                    .map(|e| match &e.message {
                        Some(message) => message.to_string(),
                        None => e.code.to_string(),
                    })
                    .collect();
                (field.to_string(), messages)
            })
            .collect();
        Self(fields)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ReservationForm {
    #[serde(default)]
    #[validate(
        required(message = "Обязательное поле"),
        length(min = 3, max = 100, message = "от 3 до 100 символов")
    )]
    pub name: Option<String>,
    #[serde(default)]
    #[validate(
        required(message = "Обязательное поле"),
        length(min = 4, max = 15, message = "от 4 до 15 цифр")
    )]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationInput {
    pub name: String,
    pub phone: String,
}

impl ReservationForm {
    pub fn validated(&self) -> Result<ReservationInput, FieldErrors> {
        let form = Self {
            name: trimmed(&self.name),
            phone: trimmed(&self.phone),
        };
        form.validate()?;

        Ok(ReservationInput {
            name: form.name.unwrap_or_default(),
            phone: form.phone.unwrap_or_default(),
        })
    }
}

/// Goal keys currently in the store; the selection form accepts only these.
#[derive(Debug, Clone, Default)]
pub struct GoalKeys(pub Vec<String>);

impl GoalKeys {
    pub fn contains(&self, key: &str) -> bool {
        self.0.iter().any(|k| k == key)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[validate(context = GoalKeys)]
pub struct SelectionForm {
    #[serde(default)]
    #[validate(
        required(message = "Обязательное поле"),
        length(min = 3, max = 100, message = "от 3 до 100 символов")
    )]
    pub name: Option<String>,
    #[serde(default)]
    #[validate(
        required(message = "Обязательное поле"),
        length(min = 4, max = 15, message = "от 4 до 15 цифр")
    )]
    pub phone: Option<String>,
    #[serde(default)]
    #[validate(
        required(message = "Обязательное поле"),
        custom(function = "known_goal", use_context)
    )]
    pub goal: Option<String>,
    #[serde(default)]
    #[validate(
        required(message = "Обязательное поле"),
        custom(function = "known_time_budget")
    )]
    pub limit_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionInput {
    pub name: String,
    pub phone: String,
    pub goal: String,
    pub limit_time: String,
}

impl SelectionForm {
    /// The form shown before anything was submitted.
    pub fn with_defaults() -> Self {
        Self {
            name: None,
            phone: None,
            goal: Some(catalog::DEFAULT_GOAL.to_string()),
            limit_time: Some(catalog::DEFAULT_TIME_BUDGET.to_string()),
        }
    }

    /// `goals` is the set of goal keys currently in the store.
    pub fn validated(&self, goals: &[&str]) -> Result<SelectionInput, FieldErrors> {
        let form = Self {
            name: trimmed(&self.name),
            phone: trimmed(&self.phone),
            goal: trimmed(&self.goal),
            limit_time: trimmed(&self.limit_time),
        };
        let keys = GoalKeys(goals.iter().map(|g| g.to_string()).collect());
        form.validate_with_args(&keys)?;

        Ok(SelectionInput {
            name: form.name.unwrap_or_default(),
            phone: form.phone.unwrap_or_default(),
            goal: form.goal.unwrap_or_default(),
            limit_time: form.limit_time.unwrap_or_default(),
        })
    }
}

// blank counts as missing
fn trimmed(raw: &Option<String>) -> Option<String> {
    raw.as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn not_a_choice() -> ValidationError {
    ValidationError::new("choice").with_message(Cow::Borrowed(MSG_NOT_A_CHOICE))
}

fn known_goal(value: &str, goals: &GoalKeys) -> Result<(), ValidationError> {
    if goals.contains(value) {
        Ok(())
    } else {
        Err(not_a_choice())
    }
}

fn known_time_budget(value: &str) -> Result<(), ValidationError> {
    if catalog::time_budget_label(value).is_some() {
        Ok(())
    } else {
        Err(not_a_choice())
    }
}

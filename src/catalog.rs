//! Fixed lookup tables shared by the forms and the handlers.

use serde::Serialize;

/// Weekday codes in calendar order with their display labels.
pub const WEEKDAYS: [(&str, &str); 7] = [
    ("mon", "Понедельник"),
    ("tue", "Вторник"),
    ("wed", "Среда"),
    ("thu", "Четверг"),
    ("fri", "Пятница"),
    ("sat", "Суббота"),
    ("sun", "Воскресенье"),
];

/// Hours per week a client can spend on lessons.
pub const TIME_BUDGETS: [(&str, &str); 4] = [
    ("time_1", "1-2"),
    ("time_2", "3-5"),
    ("time_3", "5-7"),
    ("time_4", "7-10"),
];

pub const DEFAULT_GOAL: &str = "work";
pub const DEFAULT_TIME_BUDGET: &str = "time_3";

const GOAL_MARKERS: [(&str, &str); 4] = [
    ("travel", "⛱"),
    ("study", "🏫"),
    ("work", "🏢"),
    ("relocate", "🚜"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub key: String,
    pub label: String,
}

impl Choice {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self { key: key.into(), label: label.into() }
    }
}

pub fn weekday_label(code: &str) -> Option<&'static str> {
    WEEKDAYS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| *label)
}

pub fn time_budget_label(key: &str) -> Option<&'static str> {
    TIME_BUDGETS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, label)| *label)
}

pub fn time_budget_keys() -> impl Iterator<Item = &'static str> {
    TIME_BUDGETS.iter().map(|(k, _)| *k)
}

pub fn time_budget_choices() -> Vec<Choice> {
    TIME_BUDGETS
        .iter()
        .map(|(k, label)| Choice::new(*k, *label))
        .collect()
}

/// Prefixes the homepage goals with their emoji; other goals keep the plain label.
pub fn decorate_goal_label(aim: &str, label: &str) -> String {
    match GOAL_MARKERS.iter().find(|(a, _)| *a == aim) {
        Some((_, marker)) => format!("{} {}", marker, label),
        None => label.to_string(),
    }
}

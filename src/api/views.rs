//! Payloads handed to the page renderer, one per route.

use serde::Serialize;

use crate::catalog::Choice;
use crate::forms::{FieldErrors, ReservationForm, SelectionForm};
use crate::models::{Goal, Teacher, TeacherCard};

impl From<Goal> for Choice {
    fn from(g: Goal) -> Self {
        Choice::new(g.aim, g.value)
    }
}

#[derive(Debug, Serialize)]
pub struct HomePage {
    pub goals: Vec<Choice>,
    pub teachers: Vec<TeacherCard>,
}

#[derive(Debug, Serialize)]
pub struct GoalPage {
    pub goal: Choice,
    pub teachers: Vec<TeacherCard>,
}

#[derive(Debug, Serialize)]
pub struct DaySchedule {
    pub day: &'static str,
    pub label: &'static str,
    pub slots: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ProfilePage {
    pub teacher: TeacherCard,
    pub goals: Vec<Choice>,
    pub schedule: Vec<DaySchedule>,
}

#[derive(Debug, Serialize)]
pub struct AllProfilesPage {
    pub teachers: Vec<TeacherCard>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum RequestPage {
    Form {
        form: SelectionForm,
        errors: FieldErrors,
        goals: Vec<Choice>,
        times: Vec<Choice>,
    },
    Done {
        name: String,
        phone: String,
        goal: String,
        time: String,
    },
}

#[derive(Debug, Serialize)]
pub struct BookingTeacher {
    pub id: i64,
    pub name: String,
    pub picture: String,
}

impl From<Teacher> for BookingTeacher {
    fn from(t: Teacher) -> Self {
        Self { id: t.id, name: t.name, picture: t.picture }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum BookingPage {
    Form {
        teacher: BookingTeacher,
        day: String,
        client_day: String,
        time: String,
        form: ReservationForm,
        errors: FieldErrors,
    },
    Done {
        teacher_id: i64,
        name: String,
        phone: String,
        client_day: String,
        hour: String,
    },
}

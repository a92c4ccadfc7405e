pub mod views;

use axum::extract::{Form, Path};
use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use tracing::{info, warn};

use crate::catalog::{self, Choice, WEEKDAYS};
use crate::db::repository;
use crate::error::AppError;
use crate::forms::{FieldErrors, ReservationForm, SelectionForm};
use crate::models::{NewReserveRequest, NewSelectionRequest, Teacher, TeacherCard};
use crate::state::AppState;

use views::*;

const FEATURED_TEACHERS: i64 = 6;
const MAX_SLOT_LEN: usize = 32;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/goals/{goal}/", get(goal_listing))
        .route("/profiles/{id}/", get(teacher_profile))
        .route("/request/", get(request_form).post(submit_request))
        .route("/booking/{id}/{day}/{time}/", get(booking_form).post(submit_booking))
        .route("/all/", get(all_profiles))
        .route("/health", get(health))
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(StatusCode::OK)
}

async fn home(State(state): State<AppState>) -> Result<Json<HomePage>, AppError> {
    let teachers = repository::fetch_random_teachers(&state.db, FEATURED_TEACHERS).await?;
    let goals = repository::fetch_goals(&state.db)
        .await?
        .into_iter()
        .map(|g| {
            let label = catalog::decorate_goal_label(&g.aim, &g.value);
            Choice::new(g.aim, label)
        })
        .collect();

    Ok(Json(HomePage {
        goals,
        teachers: teachers.into_iter().map(TeacherCard::from).collect(),
    }))
}

async fn goal_listing(
    State(state): State<AppState>,
    Path(goal): Path<String>,
) -> Result<Json<GoalPage>, AppError> {
    let goal = repository::find_goal_by_aim(&state.db, &goal)
        .await?
        .ok_or(AppError::NotFound)?;
    let teachers = repository::fetch_teachers_by_goal(&state.db, &goal.aim).await?;

    Ok(Json(GoalPage {
        goal: goal.into(),
        teachers: teachers.into_iter().map(TeacherCard::from).collect(),
    }))
}

async fn teacher_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProfilePage>, AppError> {
    let id = parse_teacher_id(&id)?;
    let teacher = repository::find_teacher_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound)?;
    let free = teacher.free_slots()?;
    let goals = repository::fetch_goals_for_teacher(&state.db, id).await?;

    let schedule = WEEKDAYS
        .iter()
        .map(|&(day, label)| DaySchedule {
            day,
            label,
            slots: free.slots(day).to_vec(),
        })
        .collect();

    Ok(Json(ProfilePage {
        teacher: teacher.into(),
        goals: goals.into_iter().map(Choice::from).collect(),
        schedule,
    }))
}

async fn request_form(State(state): State<AppState>) -> Result<Json<RequestPage>, AppError> {
    let goals = goal_choices(&state).await?;
    Ok(Json(RequestPage::Form {
        form: SelectionForm::with_defaults(),
        errors: FieldErrors::default(),
        goals,
        times: catalog::time_budget_choices(),
    }))
}

async fn submit_request(
    State(state): State<AppState>,
    Form(form): Form<SelectionForm>,
) -> Result<Json<RequestPage>, AppError> {
    let goals = goal_choices(&state).await?;
    let allowed: Vec<&str> = goals.iter().map(|g| g.key.as_str()).collect();

    let input = match form.validated(&allowed) {
        Ok(input) => input,
        Err(errors) => {
            return Ok(Json(RequestPage::Form {
                form,
                errors,
                goals,
                times: catalog::time_budget_choices(),
            }));
        }
    };

    let goal_label = goals
        .iter()
        .find(|g| g.key == input.goal)
        .map(|g| g.label.clone())
        .unwrap_or_default();
    let time_label = catalog::time_budget_label(&input.limit_time).unwrap_or_default();

    let selection = repository::insert_selection(
        &state.db,
        NewSelectionRequest {
            name: input.name,
            phone: input.phone,
            goal: input.goal,
            time_learning: input.limit_time,
        },
    )
    .await?;
    info!("Stored selection request {} (goal: {})", selection.id, selection.goal);

    Ok(Json(RequestPage::Done {
        name: selection.name,
        phone: selection.phone,
        goal: goal_label,
        time: time_label.to_string(),
    }))
}

async fn booking_form(
    State(state): State<AppState>,
    Path((id, day, time)): Path<(String, String, String)>,
) -> Result<Json<BookingPage>, AppError> {
    let slot = BookingSlot::parse(&id, &day, &time)?;
    let teacher = repository::find_teacher_by_id(&state.db, slot.teacher_id)
        .await?
        .ok_or(AppError::NotFound)?;
    ensure_offered(&teacher, &day, &time)?;

    Ok(Json(BookingPage::Form {
        teacher: teacher.into(),
        day,
        client_day: slot.day_label.to_string(),
        time,
        form: ReservationForm::default(),
        errors: FieldErrors::default(),
    }))
}

async fn submit_booking(
    State(state): State<AppState>,
    Path((id, day, time)): Path<(String, String, String)>,
    Form(form): Form<ReservationForm>,
) -> Result<Json<BookingPage>, AppError> {
    let slot = BookingSlot::parse(&id, &day, &time)?;
    let teacher = repository::find_teacher_by_id(&state.db, slot.teacher_id)
        .await?
        .ok_or(AppError::NotFound)?;
    ensure_offered(&teacher, &day, &time)?;

    let input = match form.validated() {
        Ok(input) => input,
        Err(errors) => {
            return Ok(Json(BookingPage::Form {
                teacher: teacher.into(),
                day,
                client_day: slot.day_label.to_string(),
                time,
                form,
                errors,
            }));
        }
    };

    let reserve = repository::insert_reserve(
        &state.db,
        NewReserveRequest {
            name: input.name,
            phone: input.phone,
            day,
            time,
            teacher_id: teacher.id,
        },
    )
    .await?;
    info!(
        "Stored reservation {} for teacher {} ({} {})",
        reserve.id, reserve.teacher_id, reserve.day, reserve.time
    );

    Ok(Json(BookingPage::Done {
        teacher_id: reserve.teacher_id,
        name: reserve.name,
        phone: reserve.phone,
        client_day: slot.day_label.to_string(),
        hour: reserve.time,
    }))
}

async fn all_profiles(State(state): State<AppState>) -> Result<Json<AllProfilesPage>, AppError> {
    let teachers = repository::fetch_all_teachers(&state.db).await?;
    Ok(Json(AllProfilesPage {
        teachers: teachers.into_iter().map(TeacherCard::from).collect(),
    }))
}

async fn goal_choices(state: &AppState) -> Result<Vec<Choice>, AppError> {
    let goals = repository::fetch_goals(&state.db).await?;
    Ok(goals.into_iter().map(Choice::from).collect())
}

/// Path parameters of a booking URL, checked before anything touches the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BookingSlot {
    teacher_id: i64,
    day_label: &'static str,
}

impl BookingSlot {
    fn parse(id: &str, day: &str, time: &str) -> Result<Self, AppError> {
        let teacher_id = parse_teacher_id(id)?;
        let day_label = catalog::weekday_label(day).ok_or_else(|| {
            warn!("rejected booking path: unknown weekday {:?}", day);
            AppError::BadRequest(format!("Unknown weekday: {}", day))
        })?;
        if !is_valid_slot(time) {
            warn!("rejected booking path: malformed time slot {:?}", time);
            return Err(AppError::BadRequest(format!("Malformed time slot: {}", time)));
        }
        Ok(Self { teacher_id, day_label })
    }
}

/// Only slots listed in the teacher's schedule for that weekday can be booked.
fn ensure_offered(teacher: &Teacher, day: &str, time: &str) -> Result<(), AppError> {
    let free = teacher.free_slots()?;
    if free.slots(day).iter().any(|s| s == time) {
        return Ok(());
    }
    warn!("rejected booking: teacher {} has no slot {} on {}", teacher.id, time, day);
    Err(AppError::BadRequest(format!("Slot {} is not offered on {}", time, day)))
}

fn parse_teacher_id(raw: &str) -> Result<i64, AppError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        warn!("rejected teacher id {:?}", raw);
        return Err(AppError::BadRequest(format!("Invalid teacher id: {}", raw)));
    }
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => {
            warn!("rejected teacher id {:?}", raw);
            Err(AppError::BadRequest(format!("Invalid teacher id: {}", raw)))
        }
    }
}

fn is_valid_slot(time: &str) -> bool {
    !time.is_empty()
        && time.len() <= MAX_SLOT_LEN
        && time
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | ':' | '-'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn teacher_ids_must_be_positive_integers() {
        assert_eq!(parse_teacher_id("3").unwrap(), 3);
        assert!(matches!(parse_teacher_id("0"), Err(AppError::BadRequest(_))));
        assert!(matches!(parse_teacher_id("-4"), Err(AppError::BadRequest(_))));
        assert!(matches!(parse_teacher_id("abc"), Err(AppError::BadRequest(_))));
        assert!(matches!(parse_teacher_id("3.0"), Err(AppError::BadRequest(_))));
        assert!(matches!(parse_teacher_id("+3"), Err(AppError::BadRequest(_))));
        assert!(matches!(parse_teacher_id(" 3"), Err(AppError::BadRequest(_))));
        assert!(matches!(parse_teacher_id(""), Err(AppError::BadRequest(_))));
        assert!(matches!(parse_teacher_id("99999999999999999999"), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn only_offered_slots_can_be_booked() {
        let teacher = Teacher {
            id: 7,
            name: "Ann".to_string(),
            about: String::new(),
            rating: 4.0,
            picture: String::new(),
            price: 100,
            free: r#"{"mon":["8:00","10:00"],"tue":[]}"#.to_string(),
        };

        assert!(ensure_offered(&teacher, "mon", "10:00").is_ok());
        assert!(matches!(ensure_offered(&teacher, "mon", "9:00"), Err(AppError::BadRequest(_))));
        assert!(matches!(ensure_offered(&teacher, "tue", "8:00"), Err(AppError::BadRequest(_))));
        assert!(matches!(ensure_offered(&teacher, "wed", "8:00"), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn booking_slot_checks_day_and_time() {
        let slot = BookingSlot::parse("3", "mon", "time_2").unwrap();
        assert_eq!(slot.teacher_id, 3);
        assert_eq!(slot.day_label, "Понедельник");

        assert!(BookingSlot::parse("3", "8:00", "mon").is_err());
        assert!(BookingSlot::parse("3", "mon", "8:00; drop").is_err());
        assert!(BookingSlot::parse("3", "mon", &"9".repeat(33)).is_err());
        assert!(BookingSlot::parse("3", "mon", "8:00").is_ok());
    }
}

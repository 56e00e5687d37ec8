use async_graphql::InputObject;
use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use serde::Deserialize;
use validator::Validate;

use crate::models::domain::{AssignmentState, DifficultyLevel, ExerciseKind, UserRole};

static HEX_COLOUR_REGEX: Lazy<regex::Regex> = Lazy::new(|| {
    regex::Regex::new(r"^#[0-9a-fA-F]{6}$").expect("HEX_COLOUR_REGEX is a valid regex pattern")
});

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100))]
    pub last_name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[serde(default)]
    pub role: Option<UserRole>,

    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,

    pub birth_date: Option<NaiveDate>,

    #[validate(url)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAreaRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    pub description: Option<String>,

    #[validate(length(max = 50))]
    pub icon: Option<String>,

    #[validate(regex(path = *HEX_COLOUR_REGEX, message = "Colour must look like #rrggbb"))]
    pub color: Option<String>,

    #[serde(default)]
    #[validate(range(min = 0))]
    pub order: i32,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCourseRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    pub description: Option<String>,

    pub objectives: Option<String>,

    pub level: DifficultyLevel,

    #[validate(range(min = 0))]
    pub estimated_hours: Option<i32>,

    #[validate(url)]
    pub cover_image: Option<String>,

    #[validate(length(min = 1))]
    pub area_id: String,

    /// Only honoured for admins; teachers always own what they create.
    pub teacher_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCourseRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    pub description: Option<String>,

    pub objectives: Option<String>,

    pub level: Option<DifficultyLevel>,

    #[validate(range(min = 0))]
    pub estimated_hours: Option<i32>,

    #[validate(url)]
    pub cover_image: Option<String>,

    pub area_id: Option<String>,

    pub active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateLessonRequest {
    #[validate(length(min = 1))]
    pub course_id: String,

    #[validate(length(min = 1, max = 200))]
    pub title: String,

    pub description: Option<String>,

    pub content: Option<String>,

    #[validate(url)]
    pub video_url: Option<String>,

    #[validate(range(min = 0))]
    pub position: i32,

    #[validate(range(min = 0))]
    pub points: Option<i64>,

    #[validate(range(min = 0))]
    pub estimated_minutes: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateLessonRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    pub description: Option<String>,

    pub content: Option<String>,

    #[validate(url)]
    pub video_url: Option<String>,

    #[validate(range(min = 0))]
    pub position: Option<i32>,

    #[validate(range(min = 0))]
    pub points: Option<i64>,

    #[validate(range(min = 0))]
    pub estimated_minutes: Option<i32>,

    pub active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateExerciseRequest {
    #[validate(length(min = 1))]
    pub lesson_id: String,

    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(min = 1))]
    pub statement: String,

    pub kind: ExerciseKind,

    pub level: Option<DifficultyLevel>,

    #[validate(range(min = 0))]
    pub points: Option<i64>,

    #[validate(range(min = 1))]
    pub time_limit_minutes: Option<i32>,

    #[validate(range(min = 0))]
    pub position: i32,

    pub options_json: Option<String>,

    #[validate(length(min = 1))]
    pub correct_answer: String,

    pub explanation: Option<String>,

    pub latex_formula: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateExerciseRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    #[validate(length(min = 1))]
    pub statement: Option<String>,

    pub kind: Option<ExerciseKind>,

    pub level: Option<DifficultyLevel>,

    #[validate(range(min = 0))]
    pub points: Option<i64>,

    #[validate(range(min = 1))]
    pub time_limit_minutes: Option<i32>,

    #[validate(range(min = 0))]
    pub position: Option<i32>,

    pub options_json: Option<String>,

    #[validate(length(min = 1))]
    pub correct_answer: Option<String>,

    pub explanation: Option<String>,

    pub latex_formula: Option<String>,

    pub active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct SubmitAnswerRequest {
    #[validate(length(max = 2000))]
    pub answer: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LinkTeacherStudentRequest {
    #[validate(length(min = 1))]
    pub teacher_id: String,

    #[validate(length(min = 1))]
    pub student_id: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAssignmentRequest {
    #[validate(length(min = 1))]
    pub course_id: String,

    #[validate(length(min = 1, max = 200))]
    pub student_ids: Vec<String>,

    pub due_date: Option<DateTime<Utc>>,

    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateAssignmentRequest {
    pub due_date: Option<DateTime<Utc>>,

    #[validate(length(max = 1000))]
    pub notes: Option<String>,

    pub state: Option<AssignmentState>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAchievementRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    pub description: Option<String>,

    #[validate(length(max = 50))]
    pub icon: Option<String>,

    #[validate(range(min = 0))]
    pub points_required: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GrantAchievementRequest {
    #[validate(length(min = 1))]
    pub achievement_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationParams {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

impl PaginationParams {
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CourseQueryParams {
    pub area_id: Option<String>,
    pub level: Option<DifficultyLevel>,
    pub active: Option<bool>,
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

impl CourseQueryParams {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            offset: self.offset,
            limit: self.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(color: Option<&str>) -> CreateAreaRequest {
        CreateAreaRequest {
            name: "Algebra".to_string(),
            description: None,
            icon: None,
            color: color.map(str::to_string),
            order: 1,
        }
    }

    #[test]
    fn test_area_colour_must_be_hex() {
        assert!(area(Some("#1a2B3c")).validate().is_ok());
        assert!(area(None).validate().is_ok());
        assert!(area(Some("blue")).validate().is_err());
        assert!(area(Some("#12345")).validate().is_err());
    }

    #[test]
    fn test_register_rejects_short_password_and_bad_email() {
        let request = RegisterRequest {
            first_name: "Juan".to_string(),
            last_name: "Pérez".to_string(),
            email: "not-an-email".to_string(),
            password: "short".to_string(),
            role: None,
            birth_date: None,
        };
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn test_pagination_defaults_and_bounds() {
        let params = PaginationParams::default();
        assert_eq!(params.offset(), 0);
        assert_eq!(params.limit(), DEFAULT_PAGE_SIZE);

        let params = PaginationParams {
            offset: Some(-5),
            limit: Some(1000),
        };
        assert_eq!(params.offset(), 0);
        assert_eq!(params.limit(), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_assignment_requires_students() {
        let request = CreateAssignmentRequest {
            course_id: "c1".to_string(),
            student_ids: vec![],
            due_date: None,
            notes: None,
        };
        assert!(request.validate().is_err());
    }
}

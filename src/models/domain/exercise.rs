use async_graphql::Enum;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::course::DifficultyLevel;

pub const DEFAULT_EXERCISE_POINTS: i64 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, Enum)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKind {
    MultipleChoice,
    Development,
    TrueFalse,
    FillIn,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Exercise {
    pub id: String,
    pub lesson_id: String,
    pub title: String,
    pub statement: String,
    pub kind: ExerciseKind,
    pub level: DifficultyLevel,
    pub points: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_limit_minutes: Option<i32>,
    pub position: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options_json: Option<String>,
    pub correct_answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latex_formula: Option<String>,
    pub active: bool,
}

impl Exercise {
    pub fn new(lesson_id: &str, title: &str, statement: &str, correct_answer: &str, position: i32) -> Self {
        Exercise {
            id: Uuid::new_v4().to_string(),
            lesson_id: lesson_id.to_string(),
            title: title.to_string(),
            statement: statement.to_string(),
            kind: ExerciseKind::FillIn,
            level: DifficultyLevel::Basic,
            points: DEFAULT_EXERCISE_POINTS,
            time_limit_minutes: None,
            position,
            options_json: None,
            correct_answer: correct_answer.to_string(),
            explanation: None,
            latex_formula: None,
            active: true,
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One graded submission. Attempts are append-only.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExerciseAttempt {
    pub id: String,
    pub user_id: String,
    pub exercise_id: String,
    pub answer: String,
    pub is_correct: bool,
    pub points: i64,
    pub submitted_at: DateTime<Utc>,
}

impl ExerciseAttempt {
    pub fn new(user_id: &str, exercise_id: &str, answer: &str, is_correct: bool, points: i64) -> Self {
        ExerciseAttempt {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            exercise_id: exercise_id.to_string(),
            answer: answer.to_string(),
            is_correct,
            points,
            submitted_at: Utc::now(),
        }
    }
}

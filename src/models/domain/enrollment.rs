use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Enrollment {
    pub id: String,
    pub user_id: String,
    pub course_id: String,
    pub enrolled_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Cached value of `progress_percentage(completed, active_lessons)`.
    pub progress_percentage: f64,
    pub points: i64,
    pub active: bool,
}

impl Enrollment {
    pub fn new(user_id: &str, course_id: &str) -> Self {
        Enrollment {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            course_id: course_id.to_string(),
            enrolled_at: Utc::now(),
            completed_at: None,
            progress_percentage: 0.0,
            points: 0,
            active: true,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.progress_percentage >= 100.0
    }
}

/// Completed-lesson share of a course's active lessons, 0 when it has none.
pub fn progress_percentage(completed_lessons: usize, total_lessons: usize) -> f64 {
    if total_lessons == 0 {
        return 0.0;
    }
    let completed = completed_lessons.min(total_lessons);
    completed as f64 / total_lessons as f64 * 100.0
}

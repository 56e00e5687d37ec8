use async_graphql::Enum;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize, Enum)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentState {
    #[default]
    Assigned,
    InProgress,
    Completed,
}

impl AssignmentState {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentState::Assigned => "assigned",
            AssignmentState::InProgress => "in_progress",
            AssignmentState::Completed => "completed",
        }
    }
}

/// A course a teacher directs a student to take, independent of enrollment.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct CourseAssignment {
    pub id: String,
    pub teacher_id: String,
    pub student_id: String,
    pub course_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub state: AssignmentState,
    pub active: bool,
    pub assigned_at: DateTime<Utc>,
}

impl CourseAssignment {
    pub fn new(teacher_id: &str, student_id: &str, course_id: &str) -> Self {
        CourseAssignment {
            id: Uuid::new_v4().to_string(),
            teacher_id: teacher_id.to_string(),
            student_id: student_id.to_string(),
            course_id: course_id.to_string(),
            due_date: None,
            notes: None,
            state: AssignmentState::Assigned,
            active: true,
            assigned_at: Utc::now(),
        }
    }

    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.state != AssignmentState::Completed && self.due_date.map_or(false, |due| due < now)
    }
}

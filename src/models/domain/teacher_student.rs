use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Roster membership: the students a teacher may follow.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct TeacherStudentLink {
    pub id: String,
    pub teacher_id: String,
    pub student_id: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl TeacherStudentLink {
    pub fn new(teacher_id: &str, student_id: &str) -> Self {
        TeacherStudentLink {
            id: Uuid::new_v4().to_string(),
            teacher_id: teacher_id.to_string(),
            student_id: student_id.to_string(),
            active: true,
            created_at: Utc::now(),
        }
    }
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_LESSON_POINTS: i64 = 10;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Lesson {
    pub id: String,
    pub course_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    pub position: i32,
    pub points: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_minutes: Option<i32>,
    pub active: bool,
}

impl Lesson {
    pub fn new(course_id: &str, title: &str, position: i32) -> Self {
        Lesson {
            id: Uuid::new_v4().to_string(),
            course_id: course_id.to_string(),
            title: title.to_string(),
            description: None,
            content: None,
            video_url: None,
            position,
            points: DEFAULT_LESSON_POINTS,
            estimated_minutes: None,
            active: true,
        }
    }
}

use async_graphql::Enum;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize, Enum)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyLevel {
    Basic,
    Intermediate,
    Advanced,
}

impl DifficultyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyLevel::Basic => "basic",
            DifficultyLevel::Intermediate => "intermediate",
            DifficultyLevel::Advanced => "advanced",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Course {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objectives: Option<String>,
    pub level: DifficultyLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    pub teacher_id: String,
    pub area_id: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Course {
    pub fn new(title: &str, level: DifficultyLevel, teacher_id: &str, area_id: &str) -> Self {
        Course {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            description: None,
            objectives: None,
            level,
            estimated_hours: None,
            cover_image: None,
            teacher_id: teacher_id.to_string(),
            area_id: area_id.to_string(),
            active: true,
            created_at: Utc::now(),
        }
    }
}

/// Optional listing filters; `active` defaults to live courses only.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CourseFilter {
    pub area_id: Option<String>,
    pub level: Option<DifficultyLevel>,
    pub active: Option<bool>,
    pub teacher_id: Option<String>,
}

impl CourseFilter {
    pub fn matches(&self, course: &Course) -> bool {
        self.area_id.as_ref().map_or(true, |a| &course.area_id == a)
            && self.level.map_or(true, |l| course.level == l)
            && course.active == self.active.unwrap_or(true)
            && self.teacher_id.as_ref().map_or(true, |t| &course.teacher_id == t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_defaults_to_active_courses() {
        let mut course = Course::new("Algebra I", DifficultyLevel::Basic, "t1", "a1");
        let filter = CourseFilter::default();
        assert!(filter.matches(&course));

        course.active = false;
        assert!(!filter.matches(&course));

        let inactive = CourseFilter {
            active: Some(false),
            ..Default::default()
        };
        assert!(inactive.matches(&course));
    }

    #[test]
    fn test_filter_by_area_and_level() {
        let course = Course::new("Geometry", DifficultyLevel::Advanced, "t1", "geo");
        let filter = CourseFilter {
            area_id: Some("geo".to_string()),
            level: Some(DifficultyLevel::Advanced),
            ..Default::default()
        };
        assert!(filter.matches(&course));

        let wrong_level = CourseFilter {
            level: Some(DifficultyLevel::Basic),
            ..Default::default()
        };
        assert!(!wrong_level.matches(&course));
    }
}

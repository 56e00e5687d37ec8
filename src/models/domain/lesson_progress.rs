use async_graphql::Enum;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize, Enum)]
#[serde(rename_all = "snake_case")]
pub enum ProgressState {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl ProgressState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressState::NotStarted => "not_started",
            ProgressState::InProgress => "in_progress",
            ProgressState::Completed => "completed",
        }
    }
}

/// Per (user, lesson) state machine: NotStarted -> InProgress -> Completed.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct LessonProgress {
    pub id: String,
    pub user_id: String,
    pub lesson_id: String,
    pub course_id: String,
    pub state: ProgressState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    pub points: i64,
}

impl LessonProgress {
    /// Placeholder used when reporting lessons the user never touched.
    pub fn not_started(user_id: &str, lesson_id: &str, course_id: &str) -> Self {
        LessonProgress {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            lesson_id: lesson_id.to_string(),
            course_id: course_id.to_string(),
            state: ProgressState::NotStarted,
            started_at: None,
            completed_at: None,
            points: 0,
        }
    }

    pub fn started(user_id: &str, lesson_id: &str, course_id: &str, now: DateTime<Utc>) -> Self {
        let mut progress = Self::not_started(user_id, lesson_id, course_id);
        progress.start(now);
        progress
    }

    /// Completion without a prior start: both timestamps are `now`.
    pub fn completed(
        user_id: &str,
        lesson_id: &str,
        course_id: &str,
        points: i64,
        now: DateTime<Utc>,
    ) -> Self {
        let mut progress = Self::not_started(user_id, lesson_id, course_id);
        progress.complete(points, now);
        progress
    }

    pub fn is_completed(&self) -> bool {
        self.state == ProgressState::Completed
    }

    /// Returns true when the record moved to InProgress.
    pub fn start(&mut self, now: DateTime<Utc>) -> bool {
        if self.state != ProgressState::NotStarted {
            return false;
        }
        self.state = ProgressState::InProgress;
        self.started_at = Some(now);
        true
    }

    /// Returns true when the record moved to Completed; points are only
    /// recorded on that transition.
    pub fn complete(&mut self, points: i64, now: DateTime<Utc>) -> bool {
        if self.is_completed() {
            return false;
        }
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
        self.state = ProgressState::Completed;
        self.completed_at = Some(now);
        self.points = points;
        true
    }

    /// Whole minutes between start and completion, 0 while unfinished.
    pub fn minutes_spent(&self) -> i64 {
        match (self.started_at, self.completed_at) {
            (Some(start), Some(end)) if end > start => (end - start).num_minutes(),
            _ => 0,
        }
    }
}

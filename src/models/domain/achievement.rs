use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Achievement {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Awarded automatically once a user's points reach this value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points_required: Option<i64>,
    pub active: bool,
}

impl Achievement {
    pub fn new(name: &str, points_required: Option<i64>) -> Self {
        Achievement {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: None,
            icon: None,
            points_required,
            active: true,
        }
    }

    pub fn is_unlocked_by(&self, points: i64) -> bool {
        self.active && self.points_required.map_or(false, |required| points >= required)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserAchievement {
    pub id: String,
    pub user_id: String,
    pub achievement_id: String,
    pub awarded_at: DateTime<Utc>,
}

impl UserAchievement {
    pub fn new(user_id: &str, achievement_id: &str) -> Self {
        UserAchievement {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            achievement_id: achievement_id.to_string(),
            awarded_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_unlock() {
        let achievement = Achievement::new("First hundred", Some(100));
        assert!(!achievement.is_unlocked_by(99));
        assert!(achievement.is_unlocked_by(100));

        let manual = Achievement::new("Teacher's pick", None);
        assert!(!manual.is_unlocked_by(10_000));
    }
}

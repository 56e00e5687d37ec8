use async_graphql::Enum;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const POINTS_PER_LEVEL: i64 = 100;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize, Enum)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[default]
    Student,
    Teacher,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Student => "student",
            UserRole::Teacher => "teacher",
            UserRole::Admin => "admin",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub points: i64,
    pub active: bool,
    pub registered_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        first_name: &str,
        last_name: &str,
        email: &str,
        password_hash: &str,
        role: UserRole,
    ) -> Self {
        User {
            id: Uuid::new_v4().to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.trim().to_lowercase(),
            password_hash: password_hash.to_string(),
            role,
            birth_date: None,
            avatar_url: None,
            points: 0,
            active: true,
            registered_at: Utc::now(),
        }
    }

    /// Level is derived from points and never stored.
    pub fn level(&self) -> i64 {
        self.points.max(0) / POINTS_PER_LEVEL + 1
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_student(&self) -> bool {
        self.role == UserRole::Student
    }

    pub fn is_teacher(&self) -> bool {
        self.role == UserRole::Teacher
    }
}

#[cfg(test)]
impl User {
    pub fn test_user(first_name: &str, role: UserRole) -> Self {
        User::new(
            first_name,
            "Test",
            &format!("{}@example.com", first_name.to_lowercase()),
            "not-a-real-hash",
            role,
        )
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Subject area grouping courses (algebra, geometry, ...).
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Area {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub order: i32,
    pub created_at: DateTime<Utc>,
}

impl Area {
    pub fn new(name: &str, order: i32) -> Self {
        Area {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: None,
            icon: None,
            color: None,
            order,
            created_at: Utc::now(),
        }
    }
}

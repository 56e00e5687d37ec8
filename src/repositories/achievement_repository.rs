use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::{collections, Database},
    errors::{AppError, AppResult},
    models::domain::{Achievement, UserAchievement},
};

/// Achievement catalogue plus the per-user grants.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AchievementRepository: Send + Sync {
    async fn create(&self, achievement: Achievement) -> AppResult<Achievement>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Achievement>>;
    async fn list_active(&self) -> AppResult<Vec<Achievement>>;
    /// Fails with `AlreadyExists` when the user already holds the achievement.
    async fn grant(&self, grant: UserAchievement) -> AppResult<UserAchievement>;
    async fn list_grants_by_user(&self, user_id: &str) -> AppResult<Vec<UserAchievement>>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoAchievementRepository {
    achievements: Collection<Achievement>,
    grants: Collection<UserAchievement>,
}

impl MongoAchievementRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            achievements: db.get_collection(collections::ACHIEVEMENTS),
            grants: db.get_collection(collections::USER_ACHIEVEMENTS),
        }
    }
}

#[async_trait]
impl AchievementRepository for MongoAchievementRepository {
    async fn create(&self, achievement: Achievement) -> AppResult<Achievement> {
        self.achievements.insert_one(&achievement).await?;
        Ok(achievement)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Achievement>> {
        Ok(self.achievements.find_one(doc! { "id": id }).await?)
    }

    async fn list_active(&self) -> AppResult<Vec<Achievement>> {
        let achievements = self
            .achievements
            .find(doc! { "active": true })
            .sort(doc! { "name": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(achievements)
    }

    async fn grant(&self, grant: UserAchievement) -> AppResult<UserAchievement> {
        self.grants.insert_one(&grant).await.map_err(|e| match AppError::from(e) {
            AppError::AlreadyExists(_) => AppError::AlreadyExists(
                "The user already has this achievement".to_string(),
            ),
            other => other,
        })?;
        Ok(grant)
    }

    async fn list_grants_by_user(&self, user_id: &str) -> AppResult<Vec<UserAchievement>> {
        let grants = self
            .grants
            .find(doc! { "user_id": user_id })
            .sort(doc! { "awarded_at": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(grants)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        let grant_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "achievement_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("user_achievement".to_string())
                    .build(),
            )
            .build();

        self.achievements.create_index(id_index).await?;
        self.grants.create_index(grant_index).await?;
        log::info!("Created indexes on achievements collections");
        Ok(())
    }
}

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, to_bson},
    options::{IndexOptions, ReturnDocument},
    Collection, IndexModel,
};

use crate::{
    db::{collections, Database},
    errors::{AppError, AppResult},
    models::domain::{User, UserRole},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: User) -> AppResult<User>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
    async fn find_all_paginated(&self, offset: i64, limit: i64) -> AppResult<(Vec<User>, i64)>;
    /// Writes the editable profile fields and the active flag; points are
    /// only ever changed through `add_points`.
    async fn update_profile(&self, user: User) -> AppResult<User>;
    /// Atomically adds to the user's point total and returns the updated user.
    async fn add_points(&self, id: &str, points: i64) -> AppResult<User>;
    /// Active students ordered by points descending, then email ascending.
    async fn list_students_by_points(&self, offset: i64, limit: i64) -> AppResult<(Vec<User>, i64)>;
    /// Number of active students ordered ahead of (points, email).
    async fn count_students_ranked_ahead(&self, points: i64, email: &str) -> AppResult<i64>;
    async fn count_by_role(&self, role: UserRole) -> AppResult<i64>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(collections::USERS);
        Self { collection }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        self.collection.insert_one(&user).await.map_err(|e| match AppError::from(e) {
            AppError::AlreadyExists(_) => {
                AppError::AlreadyExists(format!("Email '{}' is already registered", user.email))
            }
            other => other,
        })?;
        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        let user = self.collection.find_one(doc! { "id": id }).await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = self
            .collection
            .find_one(doc! { "email": email.trim().to_lowercase() })
            .await?;
        Ok(user)
    }

    async fn find_all_paginated(&self, offset: i64, limit: i64) -> AppResult<(Vec<User>, i64)> {
        let total = self.collection.count_documents(doc! {}).await? as i64;

        let users = self
            .collection
            .find(doc! {})
            .sort(doc! { "registered_at": 1, "id": 1 })
            .skip(offset.max(0) as u64)
            .limit(limit)
            .await?
            .try_collect()
            .await?;

        Ok((users, total))
    }

    async fn update_profile(&self, user: User) -> AppResult<User> {
        let result = self
            .collection
            .update_one(
                doc! { "id": &user.id },
                doc! {
                    "$set": {
                        "first_name": &user.first_name,
                        "last_name": &user.last_name,
                        "birth_date": to_bson(&user.birth_date)?,
                        "avatar_url": to_bson(&user.avatar_url)?,
                        "active": user.active,
                    }
                },
            )
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "User with id '{}' not found",
                user.id
            )));
        }

        Ok(user)
    }

    async fn add_points(&self, id: &str, points: i64) -> AppResult<User> {
        self.collection
            .find_one_and_update(doc! { "id": id }, doc! { "$inc": { "points": points } })
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id '{}' not found", id)))
    }

    async fn list_students_by_points(&self, offset: i64, limit: i64) -> AppResult<(Vec<User>, i64)> {
        let filter = doc! { "role": UserRole::Student.as_str(), "active": true };
        let total = self.collection.count_documents(filter.clone()).await? as i64;

        let users = self
            .collection
            .find(filter)
            .sort(doc! { "points": -1, "email": 1 })
            .skip(offset.max(0) as u64)
            .limit(limit)
            .await?
            .try_collect()
            .await?;

        Ok((users, total))
    }

    async fn count_students_ranked_ahead(&self, points: i64, email: &str) -> AppResult<i64> {
        let count = self
            .collection
            .count_documents(doc! {
                "role": UserRole::Student.as_str(),
                "active": true,
                "$or": [
                    { "points": { "$gt": points } },
                    { "points": points, "email": { "$lt": email } },
                ]
            })
            .await?;
        Ok(count as i64)
    }

    async fn count_by_role(&self, role: UserRole) -> AppResult<i64> {
        let count = self
            .collection
            .count_documents(doc! { "role": role.as_str(), "active": true })
            .await?;
        Ok(count as i64)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        let ranking_index = IndexModel::builder()
            .keys(doc! { "role": 1, "points": -1, "email": 1 })
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(email_index).await?;
        self.collection.create_index(ranking_index).await?;
        log::info!("Created indexes on users collection");

        Ok(())
    }
}

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, to_bson},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{
    db::{collections, Database},
    errors::{AppError, AppResult},
    models::domain::Enrollment,
};

#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Fails with `AlreadyExists` when the pair already has an active enrollment.
    async fn create(&self, enrollment: Enrollment) -> AppResult<Enrollment>;
    async fn find_active(&self, user_id: &str, course_id: &str) -> AppResult<Option<Enrollment>>;
    async fn list_active_by_user(&self, user_id: &str) -> AppResult<Vec<Enrollment>>;
    async fn list_active_by_course(&self, course_id: &str) -> AppResult<Vec<Enrollment>>;
    /// Stores a recomputed percentage without touching accumulated points.
    async fn update_progress(
        &self,
        id: &str,
        progress_percentage: f64,
        completed_at: Option<DateTime<Utc>>,
    ) -> AppResult<()>;
    /// Atomically adds to the enrollment's accumulated points.
    async fn add_points(&self, id: &str, points: i64) -> AppResult<()>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoEnrollmentRepository {
    collection: Collection<Enrollment>,
}

impl MongoEnrollmentRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(collections::ENROLLMENTS);
        Self { collection }
    }
}

#[async_trait]
impl EnrollmentRepository for MongoEnrollmentRepository {
    async fn create(&self, enrollment: Enrollment) -> AppResult<Enrollment> {
        self.collection.insert_one(&enrollment).await.map_err(|e| match AppError::from(e) {
            AppError::AlreadyExists(_) => AppError::AlreadyExists(
                "You are already enrolled in this course".to_string(),
            ),
            other => other,
        })?;
        Ok(enrollment)
    }

    async fn find_active(&self, user_id: &str, course_id: &str) -> AppResult<Option<Enrollment>> {
        Ok(self
            .collection
            .find_one(doc! { "user_id": user_id, "course_id": course_id, "active": true })
            .await?)
    }

    async fn list_active_by_user(&self, user_id: &str) -> AppResult<Vec<Enrollment>> {
        let enrollments = self
            .collection
            .find(doc! { "user_id": user_id, "active": true })
            .sort(doc! { "enrolled_at": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(enrollments)
    }

    async fn list_active_by_course(&self, course_id: &str) -> AppResult<Vec<Enrollment>> {
        let enrollments = self
            .collection
            .find(doc! { "course_id": course_id, "active": true })
            .await?
            .try_collect()
            .await?;
        Ok(enrollments)
    }

    async fn update_progress(
        &self,
        id: &str,
        progress_percentage: f64,
        completed_at: Option<DateTime<Utc>>,
    ) -> AppResult<()> {
        let mut set = doc! { "progress_percentage": progress_percentage };
        if let Some(completed_at) = completed_at {
            set.insert("completed_at", to_bson(&completed_at)?);
        }

        let result = self
            .collection
            .update_one(doc! { "id": id }, doc! { "$set": set })
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "Enrollment with id '{}' not found",
                id
            )));
        }
        Ok(())
    }

    async fn add_points(&self, id: &str, points: i64) -> AppResult<()> {
        let result = self
            .collection
            .update_one(doc! { "id": id }, doc! { "$inc": { "points": points } })
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "Enrollment with id '{}' not found",
                id
            )));
        }
        Ok(())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        let one_active_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "course_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .partial_filter_expression(doc! { "active": true })
                    .name("one_active_enrollment".to_string())
                    .build(),
            )
            .build();
        let course_index = IndexModel::builder()
            .keys(doc! { "course_id": 1, "active": 1 })
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(one_active_index).await?;
        self.collection.create_index(course_index).await?;
        log::info!("Created indexes on enrollments collection");
        Ok(())
    }
}

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
    models::domain::{LessonProgress, ProgressState},
};

#[async_trait]
pub trait LessonProgressRepository: Send + Sync {
    /// Fails with `AlreadyExists` when the (user, lesson) pair has a record.
    async fn create(&self, progress: LessonProgress) -> AppResult<LessonProgress>;
    async fn find(&self, user_id: &str, lesson_id: &str) -> AppResult<Option<LessonProgress>>;
    async fn update(&self, progress: LessonProgress) -> AppResult<LessonProgress>;
    /// Moves a record to Completed only if it is not already Completed.
    /// Returns whether this call performed the transition.
    async fn complete_if_pending(&self, id: &str, points: i64, now: DateTime<Utc>) -> AppResult<bool>;
    async fn list_by_user_and_course(&self, user_id: &str, course_id: &str) -> AppResult<Vec<LessonProgress>>;
    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<LessonProgress>>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoLessonProgressRepository {
    collection: Collection<LessonProgress>,
}

impl MongoLessonProgressRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(collections::LESSON_PROGRESS);
        Self { collection }
    }
}

#[async_trait]
impl LessonProgressRepository for MongoLessonProgressRepository {
    async fn create(&self, progress: LessonProgress) -> AppResult<LessonProgress> {
        self.collection.insert_one(&progress).await?;
        Ok(progress)
    }

    async fn find(&self, user_id: &str, lesson_id: &str) -> AppResult<Option<LessonProgress>> {
        Ok(self
            .collection
            .find_one(doc! { "user_id": user_id, "lesson_id": lesson_id })
            .await?)
    }

    async fn update(&self, progress: LessonProgress) -> AppResult<LessonProgress> {
        let result = self
            .collection
            .replace_one(doc! { "id": &progress.id }, &progress)
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "Lesson progress with id '{}' not found",
                progress.id
            )));
        }

        Ok(progress)
    }

    async fn complete_if_pending(&self, id: &str, points: i64, now: DateTime<Utc>) -> AppResult<bool> {
        let completed = ProgressState::Completed.as_str();
        let now = to_bson(&now)?;

        let result = self
            .collection
            .update_one(
                doc! { "id": id, "state": { "$ne": completed } },
                vec![doc! {
                    "$set": {
                        "state": completed,
                        "completed_at": now.clone(),
                        "points": points,
                        "started_at": { "$ifNull": ["$started_at", now] },
                    }
                }],
            )
            .await?;

        Ok(result.modified_count == 1)
    }

    async fn list_by_user_and_course(&self, user_id: &str, course_id: &str) -> AppResult<Vec<LessonProgress>> {
        let records = self
            .collection
            .find(doc! { "user_id": user_id, "course_id": course_id })
            .await?
            .try_collect()
            .await?;
        Ok(records)
    }

    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<LessonProgress>> {
        let records = self
            .collection
            .find(doc! { "user_id": user_id })
            .await?
            .try_collect()
            .await?;
        Ok(records)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        let pair_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "lesson_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("user_lesson".to_string())
                    .build(),
            )
            .build();
        let course_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "course_id": 1 })
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(pair_index).await?;
        self.collection.create_index(course_index).await?;
        log::info!("Created indexes on lesson_progress collection");
        Ok(())
    }
}

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::{collections, Database},
    errors::AppResult,
    models::domain::ExerciseAttempt,
};

/// Totals over a set of attempts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AttemptCounts {
    pub total: i64,
    pub correct: i64,
}

#[async_trait]
pub trait ExerciseAttemptRepository: Send + Sync {
    async fn create(&self, attempt: ExerciseAttempt) -> AppResult<ExerciseAttempt>;
    /// Attempts by one user on one exercise, newest first.
    async fn list_by_user_and_exercise(&self, user_id: &str, exercise_id: &str) -> AppResult<Vec<ExerciseAttempt>>;
    async fn counts_by_user(&self, user_id: &str) -> AppResult<AttemptCounts>;
    async fn counts(&self) -> AppResult<AttemptCounts>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoExerciseAttemptRepository {
    collection: Collection<ExerciseAttempt>,
}

impl MongoExerciseAttemptRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(collections::EXERCISE_ATTEMPTS);
        Self { collection }
    }
}

#[async_trait]
impl ExerciseAttemptRepository for MongoExerciseAttemptRepository {
    async fn create(&self, attempt: ExerciseAttempt) -> AppResult<ExerciseAttempt> {
        self.collection.insert_one(&attempt).await?;
        Ok(attempt)
    }

    async fn list_by_user_and_exercise(&self, user_id: &str, exercise_id: &str) -> AppResult<Vec<ExerciseAttempt>> {
        let attempts = self
            .collection
            .find(doc! { "user_id": user_id, "exercise_id": exercise_id })
            .sort(doc! { "submitted_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(attempts)
    }

    async fn counts_by_user(&self, user_id: &str) -> AppResult<AttemptCounts> {
        let total = self
            .collection
            .count_documents(doc! { "user_id": user_id })
            .await?;
        let correct = self
            .collection
            .count_documents(doc! { "user_id": user_id, "is_correct": true })
            .await?;

        Ok(AttemptCounts {
            total: total as i64,
            correct: correct as i64,
        })
    }

    async fn counts(&self) -> AppResult<AttemptCounts> {
        let total = self.collection.count_documents(doc! {}).await?;
        let correct = self
            .collection
            .count_documents(doc! { "is_correct": true })
            .await?;

        Ok(AttemptCounts {
            total: total as i64,
            correct: correct as i64,
        })
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        let user_exercise_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "exercise_id": 1, "submitted_at": -1 })
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(user_exercise_index).await?;
        log::info!("Created indexes on exercise_attempts collection");
        Ok(())
    }
}

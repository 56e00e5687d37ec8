use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::{collections, Database},
    errors::{AppError, AppResult},
    models::domain::Exercise,
};

#[async_trait]
pub trait ExerciseRepository: Send + Sync {
    async fn create(&self, exercise: Exercise) -> AppResult<Exercise>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Exercise>>;
    async fn list_active_by_lesson(&self, lesson_id: &str) -> AppResult<Vec<Exercise>>;
    async fn update(&self, exercise: Exercise) -> AppResult<Exercise>;
    async fn count_active(&self) -> AppResult<i64>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoExerciseRepository {
    collection: Collection<Exercise>,
}

impl MongoExerciseRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(collections::EXERCISES);
        Self { collection }
    }
}

#[async_trait]
impl ExerciseRepository for MongoExerciseRepository {
    async fn create(&self, exercise: Exercise) -> AppResult<Exercise> {
        self.collection.insert_one(&exercise).await?;
        Ok(exercise)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Exercise>> {
        Ok(self.collection.find_one(doc! { "id": id }).await?)
    }

    async fn list_active_by_lesson(&self, lesson_id: &str) -> AppResult<Vec<Exercise>> {
        let exercises = self
            .collection
            .find(doc! { "lesson_id": lesson_id, "active": true })
            .sort(doc! { "position": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(exercises)
    }

    async fn update(&self, exercise: Exercise) -> AppResult<Exercise> {
        let result = self
            .collection
            .replace_one(doc! { "id": &exercise.id }, &exercise)
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "Exercise with id '{}' not found",
                exercise.id
            )));
        }

        Ok(exercise)
    }

    async fn count_active(&self) -> AppResult<i64> {
        Ok(self.collection.count_documents(doc! { "active": true }).await? as i64)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        let lesson_index = IndexModel::builder()
            .keys(doc! { "lesson_id": 1, "active": 1, "position": 1 })
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(lesson_index).await?;
        log::info!("Created indexes on exercises collection");
        Ok(())
    }
}

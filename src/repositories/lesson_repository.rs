use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::{collections, Database},
    errors::{AppError, AppResult},
    models::domain::Lesson,
};

#[async_trait]
pub trait LessonRepository: Send + Sync {
    async fn create(&self, lesson: Lesson) -> AppResult<Lesson>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Lesson>>;
    /// Active lessons of a course ordered by position.
    async fn list_active_by_course(&self, course_id: &str) -> AppResult<Vec<Lesson>>;
    async fn update(&self, lesson: Lesson) -> AppResult<Lesson>;
    async fn count_active(&self) -> AppResult<i64>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoLessonRepository {
    collection: Collection<Lesson>,
}

impl MongoLessonRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(collections::LESSONS);
        Self { collection }
    }
}

#[async_trait]
impl LessonRepository for MongoLessonRepository {
    async fn create(&self, lesson: Lesson) -> AppResult<Lesson> {
        self.collection.insert_one(&lesson).await?;
        Ok(lesson)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Lesson>> {
        Ok(self.collection.find_one(doc! { "id": id }).await?)
    }

    async fn list_active_by_course(&self, course_id: &str) -> AppResult<Vec<Lesson>> {
        let lessons = self
            .collection
            .find(doc! { "course_id": course_id, "active": true })
            .sort(doc! { "position": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(lessons)
    }

    async fn update(&self, lesson: Lesson) -> AppResult<Lesson> {
        let result = self
            .collection
            .replace_one(doc! { "id": &lesson.id }, &lesson)
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "Lesson with id '{}' not found",
                lesson.id
            )));
        }

        Ok(lesson)
    }

    async fn count_active(&self) -> AppResult<i64> {
        Ok(self.collection.count_documents(doc! { "active": true }).await? as i64)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        let course_index = IndexModel::builder()
            .keys(doc! { "course_id": 1, "active": 1, "position": 1 })
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(course_index).await?;
        log::info!("Created indexes on lessons collection");
        Ok(())
    }
}

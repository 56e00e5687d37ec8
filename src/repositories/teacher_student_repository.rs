use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::{collections, Database},
    errors::{AppError, AppResult},
    models::domain::TeacherStudentLink,
};

#[async_trait]
pub trait TeacherStudentRepository: Send + Sync {
    /// Fails with `AlreadyExists` when the pair is already linked.
    async fn create(&self, link: TeacherStudentLink) -> AppResult<TeacherStudentLink>;
    async fn find_active(&self, teacher_id: &str, student_id: &str) -> AppResult<Option<TeacherStudentLink>>;
    async fn list_active_by_teacher(&self, teacher_id: &str) -> AppResult<Vec<TeacherStudentLink>>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoTeacherStudentRepository {
    collection: Collection<TeacherStudentLink>,
}

impl MongoTeacherStudentRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(collections::TEACHER_STUDENTS);
        Self { collection }
    }
}

#[async_trait]
impl TeacherStudentRepository for MongoTeacherStudentRepository {
    async fn create(&self, link: TeacherStudentLink) -> AppResult<TeacherStudentLink> {
        self.collection.insert_one(&link).await.map_err(|e| match AppError::from(e) {
            AppError::AlreadyExists(_) => AppError::AlreadyExists(
                "This student is already linked to the teacher".to_string(),
            ),
            other => other,
        })?;
        Ok(link)
    }

    async fn find_active(&self, teacher_id: &str, student_id: &str) -> AppResult<Option<TeacherStudentLink>> {
        Ok(self
            .collection
            .find_one(doc! { "teacher_id": teacher_id, "student_id": student_id, "active": true })
            .await?)
    }

    async fn list_active_by_teacher(&self, teacher_id: &str) -> AppResult<Vec<TeacherStudentLink>> {
        let links = self
            .collection
            .find(doc! { "teacher_id": teacher_id, "active": true })
            .sort(doc! { "created_at": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(links)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let pair_index = IndexModel::builder()
            .keys(doc! { "teacher_id": 1, "student_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .partial_filter_expression(doc! { "active": true })
                    .name("one_active_link".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(pair_index).await?;
        log::info!("Created indexes on teacher_students collection");
        Ok(())
    }
}

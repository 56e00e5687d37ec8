use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::{collections, Database},
    errors::{AppError, AppResult},
    models::domain::{AssignmentState, CourseAssignment},
};

#[async_trait]
pub trait CourseAssignmentRepository: Send + Sync {
    async fn create(&self, assignment: CourseAssignment) -> AppResult<CourseAssignment>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<CourseAssignment>>;
    async fn find_active(&self, teacher_id: &str, student_id: &str, course_id: &str) -> AppResult<Option<CourseAssignment>>;
    async fn list_active_by_teacher(&self, teacher_id: &str) -> AppResult<Vec<CourseAssignment>>;
    async fn list_active_by_student(&self, student_id: &str) -> AppResult<Vec<CourseAssignment>>;
    async fn update(&self, assignment: CourseAssignment) -> AppResult<CourseAssignment>;
    /// Marks every unfinished active assignment of the student for the
    /// course as Completed. Returns how many changed.
    async fn complete_for_student_course(&self, student_id: &str, course_id: &str) -> AppResult<u64>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoCourseAssignmentRepository {
    collection: Collection<CourseAssignment>,
}

impl MongoCourseAssignmentRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(collections::COURSE_ASSIGNMENTS);
        Self { collection }
    }
}

#[async_trait]
impl CourseAssignmentRepository for MongoCourseAssignmentRepository {
    async fn create(&self, assignment: CourseAssignment) -> AppResult<CourseAssignment> {
        self.collection.insert_one(&assignment).await?;
        Ok(assignment)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<CourseAssignment>> {
        Ok(self.collection.find_one(doc! { "id": id }).await?)
    }

    async fn find_active(&self, teacher_id: &str, student_id: &str, course_id: &str) -> AppResult<Option<CourseAssignment>> {
        Ok(self
            .collection
            .find_one(doc! {
                "teacher_id": teacher_id,
                "student_id": student_id,
                "course_id": course_id,
                "active": true,
            })
            .await?)
    }

    async fn list_active_by_teacher(&self, teacher_id: &str) -> AppResult<Vec<CourseAssignment>> {
        let assignments = self
            .collection
            .find(doc! { "teacher_id": teacher_id, "active": true })
            .sort(doc! { "assigned_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(assignments)
    }

    async fn list_active_by_student(&self, student_id: &str) -> AppResult<Vec<CourseAssignment>> {
        let assignments = self
            .collection
            .find(doc! { "student_id": student_id, "active": true })
            .sort(doc! { "assigned_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(assignments)
    }

    async fn update(&self, assignment: CourseAssignment) -> AppResult<CourseAssignment> {
        let result = self
            .collection
            .replace_one(doc! { "id": &assignment.id }, &assignment)
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "Assignment with id '{}' not found",
                assignment.id
            )));
        }

        Ok(assignment)
    }

    async fn complete_for_student_course(&self, student_id: &str, course_id: &str) -> AppResult<u64> {
        let completed = AssignmentState::Completed.as_str();
        let result = self
            .collection
            .update_many(
                doc! {
                    "student_id": student_id,
                    "course_id": course_id,
                    "active": true,
                    "state": { "$ne": completed },
                },
                doc! { "$set": { "state": completed } },
            )
            .await?;
        Ok(result.modified_count)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        let teacher_index = IndexModel::builder()
            .keys(doc! { "teacher_id": 1, "active": 1 })
            .build();
        let student_index = IndexModel::builder()
            .keys(doc! { "student_id": 1, "course_id": 1, "active": 1 })
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(teacher_index).await?;
        self.collection.create_index(student_index).await?;
        log::info!("Created indexes on course_assignments collection");
        Ok(())
    }
}

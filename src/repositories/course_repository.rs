use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{
    db::{collections, Database},
    errors::{AppError, AppResult},
    models::domain::{Course, CourseFilter},
};

#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn create(&self, course: Course) -> AppResult<Course>;
    /// Returns the course whatever its active flag; callers decide.
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Course>>;
    async fn list(&self, filter: &CourseFilter, offset: i64, limit: i64) -> AppResult<(Vec<Course>, i64)>;
    async fn update(&self, course: Course) -> AppResult<Course>;
    async fn count_active(&self) -> AppResult<i64>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoCourseRepository {
    collection: Collection<Course>,
}

impl MongoCourseRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(collections::COURSES);
        Self { collection }
    }

    fn filter_document(filter: &CourseFilter) -> Document {
        let mut document = doc! { "active": filter.active.unwrap_or(true) };
        if let Some(area_id) = &filter.area_id {
            document.insert("area_id", area_id);
        }
        if let Some(level) = filter.level {
            document.insert("level", level.as_str());
        }
        if let Some(teacher_id) = &filter.teacher_id {
            document.insert("teacher_id", teacher_id);
        }
        document
    }
}

#[async_trait]
impl CourseRepository for MongoCourseRepository {
    async fn create(&self, course: Course) -> AppResult<Course> {
        self.collection.insert_one(&course).await?;
        Ok(course)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Course>> {
        Ok(self.collection.find_one(doc! { "id": id }).await?)
    }

    async fn list(&self, filter: &CourseFilter, offset: i64, limit: i64) -> AppResult<(Vec<Course>, i64)> {
        let document = Self::filter_document(filter);
        let total = self.collection.count_documents(document.clone()).await? as i64;

        let courses = self
            .collection
            .find(document)
            .sort(doc! { "created_at": 1, "id": 1 })
            .skip(offset.max(0) as u64)
            .limit(limit)
            .await?
            .try_collect()
            .await?;

        Ok((courses, total))
    }

    async fn update(&self, course: Course) -> AppResult<Course> {
        let result = self
            .collection
            .replace_one(doc! { "id": &course.id }, &course)
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "Course with id '{}' not found",
                course.id
            )));
        }

        Ok(course)
    }

    async fn count_active(&self) -> AppResult<i64> {
        Ok(self.collection.count_documents(doc! { "active": true }).await? as i64)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        let listing_index = IndexModel::builder()
            .keys(doc! { "active": 1, "area_id": 1, "level": 1 })
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(listing_index).await?;
        log::info!("Created indexes on courses collection");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::DifficultyLevel;

    #[test]
    fn test_filter_document_always_has_active_predicate() {
        let document = MongoCourseRepository::filter_document(&CourseFilter::default());
        assert_eq!(document.get_bool("active").unwrap(), true);
        assert!(document.get("area_id").is_none());
    }

    #[test]
    fn test_filter_document_includes_optional_filters() {
        let filter = CourseFilter {
            area_id: Some("algebra".to_string()),
            level: Some(DifficultyLevel::Intermediate),
            active: Some(false),
            teacher_id: None,
        };
        let document = MongoCourseRepository::filter_document(&filter);
        assert_eq!(document.get_str("area_id").unwrap(), "algebra");
        assert_eq!(document.get_str("level").unwrap(), "intermediate");
        assert_eq!(document.get_bool("active").unwrap(), false);
    }
}

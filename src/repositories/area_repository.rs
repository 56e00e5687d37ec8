use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::{collections, Database},
    errors::AppResult,
    models::domain::Area,
};

#[async_trait]
pub trait AreaRepository: Send + Sync {
    async fn create(&self, area: Area) -> AppResult<Area>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Area>>;
    async fn list(&self) -> AppResult<Vec<Area>>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoAreaRepository {
    collection: Collection<Area>,
}

impl MongoAreaRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(collections::AREAS);
        Self { collection }
    }
}

#[async_trait]
impl AreaRepository for MongoAreaRepository {
    async fn create(&self, area: Area) -> AppResult<Area> {
        self.collection.insert_one(&area).await?;
        Ok(area)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Area>> {
        Ok(self.collection.find_one(doc! { "id": id }).await?)
    }

    async fn list(&self) -> AppResult<Vec<Area>> {
        let areas = self
            .collection
            .find(doc! {})
            .sort(doc! { "order": 1, "name": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(areas)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection.create_index(id_index).await?;
        log::info!("Created indexes on areas collection");
        Ok(())
    }
}

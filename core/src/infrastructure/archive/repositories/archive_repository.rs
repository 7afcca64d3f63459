use sea_orm::{DatabaseConnection, EntityTrait};
use tracing::error;

use crate::domain::{
    archive::{entities::ArchivedDocument, ports::ArchiveRepository},
    common::entities::app_errors::CoreError,
};
use crate::entity::generated_documents::{
    ActiveModel as GeneratedDocumentActiveModel, Entity as GeneratedDocumentEntity,
};

#[derive(Debug, Clone)]
pub struct PostgresArchiveRepository {
    pub db: DatabaseConnection,
}

impl PostgresArchiveRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl ArchiveRepository for PostgresArchiveRepository {
    async fn save(&self, document: ArchivedDocument) -> Result<(), CoreError> {
        let collection = document.collection.as_str();

        GeneratedDocumentEntity::insert(GeneratedDocumentActiveModel::from(document))
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to archive {} document: {}", collection, e);
                CoreError::DatabaseError(e.to_string())
            })?;

        Ok(())
    }
}

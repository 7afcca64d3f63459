use sea_orm::ActiveValue::Set;

use crate::domain::archive::entities::ArchivedDocument;
use crate::entity::generated_documents::ActiveModel as GeneratedDocumentActiveModel;

impl From<ArchivedDocument> for GeneratedDocumentActiveModel {
    fn from(document: ArchivedDocument) -> Self {
        GeneratedDocumentActiveModel {
            id: Set(document.id),
            collection: Set(document.collection.as_str().to_string()),
            owner_id: Set(document.owner_id),
            document: Set(document.document),
            meta: Set(document.meta),
            created_at: Set(document.created_at.naive_utc()),
        }
    }
}

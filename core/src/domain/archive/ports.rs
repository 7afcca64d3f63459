use std::future::Future;

use crate::domain::{archive::entities::ArchivedDocument, common::entities::app_errors::CoreError};

#[cfg_attr(test, mockall::automock)]
pub trait ArchiveRepository: Send + Sync {
    fn save(&self, document: ArchivedDocument) -> impl Future<Output = Result<(), CoreError>> + Send;
}

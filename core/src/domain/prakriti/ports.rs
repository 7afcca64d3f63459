use std::future::Future;

use crate::domain::{
    common::{entities::app_errors::CoreError, side_effects::WithSideEffects},
    prakriti::{entities::PrakritiResponse, value_objects::AssessPrakritiInput},
};

#[cfg_attr(test, mockall::automock)]
pub trait PrakritiService: Send + Sync {
    fn assess_prakriti(
        &self,
        input: AssessPrakritiInput,
    ) -> impl Future<Output = Result<WithSideEffects<PrakritiResponse>, CoreError>> + Send;
}

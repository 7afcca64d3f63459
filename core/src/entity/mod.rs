pub mod dish_rotation;
pub mod generated_documents;
pub mod generation_cache;

pub mod archive;
pub mod cache;
pub mod db;
pub mod llm;
pub mod review;
pub mod rotation;
pub mod vector;

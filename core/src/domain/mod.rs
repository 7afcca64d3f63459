pub mod archive;
pub mod cache;
pub mod common;
pub mod generation;
pub mod grocery;
pub mod llm;
pub mod meal_plan;
pub mod prakriti;
pub mod rag;
pub mod recipe;
pub mod rotation;

#[cfg(test)]
pub(crate) mod testing;

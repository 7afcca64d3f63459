pub mod client;
pub mod entities;
pub mod model_router;
pub mod ports;
pub mod prompt_renderer;
pub mod schema_registry;
pub mod tasks;

pub mod chunking;
pub mod entities;
pub mod ports;
pub mod prompt;
pub mod schema;
pub mod services;

pub use entities::*;
pub use ports::*;

pub mod entities;
pub mod ports;
pub mod schema;
pub mod services;
pub mod validators;
pub mod value_objects;
pub mod variety;

pub use entities::*;
pub use ports::*;
pub use value_objects::*;

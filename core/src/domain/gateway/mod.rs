pub mod entities;
pub mod errors;
pub mod helpers;
pub mod ports;
pub mod prompts;
pub mod schema;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use ports::*;
pub use value_objects::*;

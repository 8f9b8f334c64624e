// Backend Domain Layer

pub mod catalog;
pub mod entities;
pub mod ports;
pub mod utils;
pub mod value_objects;

pub use catalog::*;
pub use entities::*;
pub use ports::*;
pub use utils::*;
pub use value_objects::*;

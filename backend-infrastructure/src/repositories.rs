pub mod catalog_files;
pub mod memory;

pub use catalog_files::*;
pub use memory::*;

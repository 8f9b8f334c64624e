// Domain value objects
pub mod category;
pub mod event_type;
pub mod trigger;

pub use category::*;
pub use event_type::*;
pub use trigger::*;

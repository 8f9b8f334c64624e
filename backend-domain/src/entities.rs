// Domain entities
pub mod achievement;
pub mod game_event;
pub mod unlock;

pub use achievement::*;
pub use game_event::*;
pub use unlock::*;

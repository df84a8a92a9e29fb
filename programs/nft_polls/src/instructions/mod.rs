pub mod create_poll;
pub mod cast_vote;
pub mod close_poll;

pub use create_poll::*;
pub use cast_vote::*;
pub use close_poll::*;

pub mod errors;
pub mod player;
pub mod team;

pub use errors::*;
pub use player::*;
pub use team::*;

pub mod memo;
pub mod state;

pub use memo::*;
pub use state::*;

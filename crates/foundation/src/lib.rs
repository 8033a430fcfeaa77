pub mod bounds;
pub mod tile;

// Foundation crate: small, well-tested primitives only.
pub use bounds::*;
pub use tile::*;

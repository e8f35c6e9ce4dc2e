//! Seat and table view-models derived from one snapshot.
pub mod directory;
pub use directory::*;

pub mod seat;
pub use seat::*;

pub mod table;
pub use table::*;

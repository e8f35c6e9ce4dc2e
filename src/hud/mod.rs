//! Legal actions, raise windows and quick-raise presets for the local seat.
pub mod betting;
pub use betting::*;

pub mod choice;
pub use choice::*;

pub mod context;
pub use context::*;

pub mod limit;
pub use limit::*;

pub mod quick;
pub use quick::*;

//! Turn countdowns and the tick loop that drives periodic recomputation.
pub mod clock;
pub use clock::*;

pub mod countdown;
pub use countdown::*;

pub mod ticker;
pub use ticker::*;

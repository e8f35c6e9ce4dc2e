//! Tournament snapshots, join options and registration.
pub mod join;
pub use join::*;

pub mod model;
pub use model::*;

pub mod registrar;
pub use registrar::*;

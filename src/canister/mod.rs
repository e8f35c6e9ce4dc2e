//! Remote actor seams and an in-memory stand-in for both canisters.
pub mod principal;
pub use principal::*;

#[cfg(any(test, feature = "sandbox"))]
pub mod sandbox;
#[cfg(any(test, feature = "sandbox"))]
pub use sandbox::*;

pub mod table;
pub use table::*;

pub mod tournament;
pub use tournament::*;

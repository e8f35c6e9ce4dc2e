//! Server-owned snapshot types, decoded straight from canister replies.
pub mod action;
pub use action::*;

pub mod game;
pub use game::*;

pub mod queue;
pub use queue::*;

pub mod seat;
pub use seat::*;

pub mod snapshot;
pub use snapshot::*;

pub mod stage;
pub use stage::*;

pub mod user;
pub use user::*;

#[cfg(test)]
pub mod fixtures;

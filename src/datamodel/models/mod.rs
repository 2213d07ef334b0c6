//! Model exports.
//!
//! Lightweight concrete types, one per kind tag. They carry identity and
//! a few descriptive fields - enough for delegates and tests to exercise
//! the typed cache API, nothing more.

pub mod amplitude;
pub mod comment;
pub mod event;
pub mod magnitude;
pub mod origin;
pub mod station_magnitude;

pub use amplitude::Amplitude;
pub use comment::Comment;
pub use event::Event;
pub use magnitude::Magnitude;
pub use origin::Origin;
pub use station_magnitude::StationMagnitude;

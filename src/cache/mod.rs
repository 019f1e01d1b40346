//! Time-bounded caches shared by the domain clients.

pub mod poll;

pub use poll::PollCache;

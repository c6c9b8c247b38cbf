//! HTTP surface of the Redditix game: the first-party content endpoint, the
//! game API and the event stream.

pub mod api;
pub mod metrics;
pub mod state;

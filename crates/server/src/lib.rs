//! HTTP front-end for the media converter.

pub mod api;
pub mod metrics;
pub mod state;

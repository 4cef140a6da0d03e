//! Core business logic for chirp-rs.
//!
//! Services orchestrate the in-memory stores and compute all derived
//! fields (counts, liked-by-me, follow flags) at read time. They consume
//! an already-authenticated identity from the request layer and return
//! plain data values; no transport concerns live here.

pub mod services;

pub use services::*;

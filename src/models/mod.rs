//! Data models for the org-chart backend.
//!
//! The employee and training-topic payloads are client-defined and flexible, so they
//! are carried as opaque JSON values; only `id`, `photo` and `lastUpdated` are ever
//! interpreted by the server.

mod state;

pub use state::*;

//! REST API module.
//!
//! Contains all API routes and handlers following the front-end contract.

mod employees;

pub use employees::*;

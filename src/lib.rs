//! Retirement savings planner for Indian households.
//!
//! The [`core`] module holds the projection engine: closed-form
//! time-value-of-money helpers, the corpus estimate, and the year-by-year
//! savings series. The [`api`] module is the orchestrator that clamps user
//! input, recomputes plans and serves the browser UI.

pub mod api;
pub mod core;
pub mod error;

pub use error::{NiveshError, Result};

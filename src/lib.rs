//! Terminal sign-up form demo.
//!
//! A single-screen TUI form (email + password) that validates input against a
//! declarative schema, simulates an asynchronous submission, and renders
//! field-level error messages coming from either validation or a simulated
//! backend rejection.

pub mod config;
pub mod errors;
pub mod form;
pub mod schema;
pub mod submit;
pub mod tui;

//! Shared test utilities used across the bellman crates.
//!
//! - [`recording`] captures spans and events so suites can assert on
//!   instrumentation without parsing formatted log output.
//! - [`ci`] resolves environment-driven tuning for property suites.
//! - [`graphs`] holds small hand-checked graphs with known answers.

pub mod ci;
pub mod graphs;
pub mod recording;

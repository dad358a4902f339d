//! Plain-text edge-list graphs: loading them into an [`EdgeSet`] and
//! generating random ones.
//!
//! The format is a `"V E"` header line followed by `E` lines of
//! `"source target weight"`, all whitespace separated.
//!
//! [`EdgeSet`]: bellman_core::EdgeSet

mod errors;
pub mod generate;
mod provider;

pub use crate::{
    errors::{EdgeListError, GenerateError},
    provider::EdgeListProvider,
};

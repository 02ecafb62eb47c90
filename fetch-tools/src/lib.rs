//! Agent-callable REST fetch tools.
//!
//! Each tool performs one outbound GET and returns a single JSON string: the
//! upstream payload verbatim, or an error envelope describing what went wrong.

pub mod config;
pub mod controllers;
pub mod fetch;
pub mod models;
pub mod tools;

#[cfg(test)]
mod test_support;

use std::sync::Arc;
use tools::{ToolContext, ToolRegistry};

pub struct AppState {
    pub registry: Arc<ToolRegistry>,
    pub context: ToolContext,
}

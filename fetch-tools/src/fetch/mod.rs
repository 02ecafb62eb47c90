//! Fetch helpers: input validation plus a single classified GET.

pub mod client;
pub mod validate;

pub use client::{excerpt, fetch_json_object, FetchRequest};
pub use fetch_tools_types::{FetchResult, ToolFailure};

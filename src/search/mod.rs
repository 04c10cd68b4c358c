//! Search Module
//!
//! Web search for the research stage of the pipeline.
//! Uses the Serper API (google.serper.dev) as the backend.

pub mod serper;

pub use serper::{format_results, SearchError, SearchResult, SerperClient};

//! Router module for managing page navigation and routing
//!
//! This module maps location fragments to page handlers for the dashboard.

pub mod route;
pub mod router;

// Re-export commonly used types
pub use route::{document_title, page_title, Route, RouteId, APP_TITLE, DEFAULT_ROUTE};
pub use router::{normalize_path, Dispatch, Router, RouterResult};

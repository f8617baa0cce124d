//! Route definitions and utilities
//!
//! This module defines the core route types and the fixed title table
//! shown for each page.

use std::borrow::Borrow;
use std::fmt;

/// Route every empty or unknown location falls back to
pub const DEFAULT_ROUTE: &str = "dashboard";

/// Title used for routes without an entry in the title table
pub const APP_TITLE: &str = "JobApp AI Agent";

/// Unique identifier for a route
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteId(pub String);

impl RouteId {
    /// Create a new route ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RouteId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RouteId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RouteId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for RouteId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for RouteId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for RouteId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Route definition containing metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Unique identifier for this route
    pub id: RouteId,
    /// Title shown in the page header
    pub title: String,
}

impl Route {
    /// Create a route titled from the fixed title table
    pub fn new(id: impl Into<RouteId>) -> Self {
        let id = id.into();
        let title = page_title(id.as_str()).to_string();
        Self { id, title }
    }

    /// Browser/window title for this route
    pub fn document_title(&self) -> String {
        document_title(&self.title)
    }
}

/// Page header title for a route name
pub fn page_title(route: &str) -> &'static str {
    match route {
        "dashboard" => "Dashboard",
        "jobs" => "Jobs Management",
        "cvs" => "CV Manager",
        "agent" => "Agent Control",
        _ => APP_TITLE,
    }
}

/// Document title derived from a page title
pub fn document_title(page_title: &str) -> String {
    format!("{} - {}", page_title, APP_TITLE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_id_traits() {
        let route_id = RouteId::from("test");

        assert_eq!(format!("{}", route_id), "test");

        let s: &str = route_id.as_ref();
        assert_eq!(s, "test");

        let s: &str = route_id.borrow();
        assert_eq!(s, "test");
        assert_eq!(route_id, "test");
    }

    #[test]
    fn test_title_table() {
        assert_eq!(page_title("jobs"), "Jobs Management");
        assert_eq!(page_title("cvs"), "CV Manager");
        assert_eq!(page_title("settings"), "JobApp AI Agent");

        let route = Route::new("agent");
        assert_eq!(route.title, "Agent Control");
        assert_eq!(route.document_title(), "Agent Control - JobApp AI Agent");
    }
}

//! Fragment router
//!
//! The router owns the location fragment (`#/jobs`). Every change of the
//! fragment is resolved to exactly one registered handler; unknown routes
//! redirect to the default route. The router does not run handlers itself:
//! it hands back a [`Dispatch`] so the caller can release any lock before
//! awaiting the page load.

use super::route::{Route, RouteId, DEFAULT_ROUTE};
use crate::error::RouterError;
use std::collections::HashMap;
use tracing::debug;

/// Type alias for router operation results
pub type RouterResult<T> = Result<T, RouterError>;

/// Strip a leading `#/` or `/` from a navigation target
pub fn normalize_path(path: &str) -> &str {
    if let Some(rest) = path.strip_prefix("#/") {
        rest
    } else if let Some(rest) = path.strip_prefix('/') {
        rest
    } else {
        path
    }
}

/// Outcome of resolving one navigation event
#[derive(Debug, Clone)]
pub struct Dispatch<H> {
    /// Route that was resolved
    pub route: Route,
    /// Handler registered for it
    pub handler: H,
    /// Whether the requested route was unknown and the default was used
    pub redirected: bool,
}

impl<H> Dispatch<H> {
    pub fn route_id(&self) -> &RouteId {
        &self.route.id
    }
}

struct RouteEntry<H> {
    route: Route,
    handler: H,
}

/// Route table plus the current location
pub struct Router<H> {
    routes: HashMap<RouteId, RouteEntry<H>>,
    default_route: RouteId,
    current_route: Option<RouteId>,
    fragment: String,
}

impl<H: Clone> Router<H> {
    /// Create an empty router with the `dashboard` default route
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
            default_route: RouteId::from(DEFAULT_ROUTE),
            current_route: None,
            fragment: String::new(),
        }
    }

    /// Set the default route
    pub fn with_default_route(mut self, id: impl Into<RouteId>) -> Self {
        self.default_route = id.into();
        self
    }

    /// Register a handler; an existing registration is replaced
    pub fn add_route(&mut self, id: impl Into<RouteId>, handler: H) {
        let route = Route::new(id);
        self.routes
            .insert(route.id.clone(), RouteEntry { route, handler });
    }

    pub fn contains(&self, id: &str) -> bool {
        self.routes.contains_key(id)
    }

    /// Metadata of a registered route
    pub fn route(&self, id: &str) -> Option<&Route> {
        self.routes.get(id).map(|entry| &entry.route)
    }

    /// Registered route ids, sorted
    pub fn route_ids(&self) -> Vec<&RouteId> {
        let mut ids: Vec<_> = self.routes.keys().collect();
        ids.sort_by(|a, b| a.0.cmp(&b.0));
        ids
    }

    pub fn default_route(&self) -> &RouteId {
        &self.default_route
    }

    /// Route recorded by the last navigation event
    pub fn current_route(&self) -> Option<&RouteId> {
        self.current_route.as_ref()
    }

    /// Current location fragment, e.g. `#/jobs`
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// Validate the table and resolve the initial location
    pub fn start(&mut self) -> RouterResult<Dispatch<H>> {
        if self.routes.is_empty() {
            return Err(RouterError::NoRoutes);
        }
        if !self.routes.contains_key(&self.default_route) {
            return Err(RouterError::DefaultRouteMissing(
                self.default_route.0.clone(),
            ));
        }
        self.handle_location_change()
    }

    /// Move to `path` and resolve it
    ///
    /// Moving to the fragment already shown is not a location change and
    /// yields `None`; use [`Router::handle_location_change`] to reload.
    pub fn navigate(&mut self, path: &str) -> RouterResult<Option<Dispatch<H>>> {
        let fragment = format!("#/{}", normalize_path(path));
        if fragment == self.fragment {
            debug!(%fragment, "already at location");
            return Ok(None);
        }
        self.fragment = fragment;
        self.handle_location_change().map(Some)
    }

    /// Replace the fragment as if the location changed externally
    pub fn set_fragment(&mut self, fragment: impl Into<String>) -> RouterResult<Dispatch<H>> {
        self.fragment = fragment.into();
        self.handle_location_change()
    }

    /// Resolve the current fragment to a handler
    pub fn handle_location_change(&mut self) -> RouterResult<Dispatch<H>> {
        let hash = self.fragment.strip_prefix('#').unwrap_or(&self.fragment);
        let hash = hash.strip_prefix('/').unwrap_or(hash);

        let route = if hash.is_empty() {
            self.default_route.clone()
        } else {
            RouteId::from(hash)
        };

        self.current_route = Some(route.clone());
        self.execute_route(&route)
    }

    fn execute_route(&mut self, id: &RouteId) -> RouterResult<Dispatch<H>> {
        if let Some(entry) = self.routes.get(id) {
            debug!(route = %id, "dispatching route");
            return Ok(Dispatch {
                route: entry.route.clone(),
                handler: entry.handler.clone(),
                redirected: false,
            });
        }

        // Redirect once; a missing default is an error rather than another redirect.
        debug!(route = %id, default = %self.default_route, "unknown route, redirecting");
        let default = self.default_route.clone();
        let entry = self
            .routes
            .get(&default)
            .ok_or_else(|| RouterError::DefaultRouteMissing(default.0.clone()))?;

        self.fragment = format!("#/{}", default);
        self.current_route = Some(default);

        Ok(Dispatch {
            route: entry.route.clone(),
            handler: entry.handler.clone(),
            redirected: true,
        })
    }
}

impl<H: Clone> Default for Router<H> {
    fn default() -> Self {
        Self::new()
    }
}

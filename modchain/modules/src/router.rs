use core::fmt::{Debug, Formatter};
use std::collections::BTreeMap;
use std::sync::Arc;

use prost_types::Any;
use tendermint::abci::Event;

use crate::context::Context;
use crate::error::Error;
use crate::manager::Error as ManagerError;

/// Executes a message routed to a module, returning the resulting events.
pub type Handler = Arc<dyn Fn(&Context, &Any) -> Result<Vec<Event>, Error> + Send + Sync>;

/// Answers a query routed to a module. Receives the path segments that follow the route and the
/// raw query data.
pub type Querier = Arc<dyn Fn(&[String], &[u8]) -> Result<Vec<u8>, Error> + Send + Sync>;

fn check_route(route: &str) -> Result<(), ManagerError> {
    if route.is_empty() || !route.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ManagerError::InvalidRoute {
            route: route.to_owned(),
        });
    }
    Ok(())
}

/// Message handlers by route.
#[derive(Clone, Default)]
pub struct Router {
    routes: BTreeMap<String, Handler>,
}

impl Router {
    /// Adds a handler under `route`, which must be a non-empty alphanumeric string not taken by
    /// another handler.
    pub fn add_route(&mut self, route: &str, handler: Handler) -> Result<(), ManagerError> {
        check_route(route)?;
        if self.routes.contains_key(route) {
            return Err(ManagerError::DuplicateRoute {
                route: route.to_owned(),
            });
        }
        self.routes.insert(route.to_owned(), handler);
        Ok(())
    }

    pub fn route(&self, route: &str) -> Option<&Handler> {
        self.routes.get(route)
    }

    pub fn has_route(&self, route: &str) -> bool {
        self.routes.contains_key(route)
    }

    pub fn routes(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }
}

impl Debug for Router {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Queriers by route.
#[derive(Clone, Default)]
pub struct QueryRouter {
    routes: BTreeMap<String, Querier>,
}

impl QueryRouter {
    pub fn add_route(&mut self, route: &str, querier: Querier) -> Result<(), ManagerError> {
        check_route(route)?;
        if self.routes.contains_key(route) {
            return Err(ManagerError::DuplicateQuerierRoute {
                route: route.to_owned(),
            });
        }
        self.routes.insert(route.to_owned(), querier);
        Ok(())
    }

    pub fn route(&self, route: &str) -> Option<&Querier> {
        self.routes.get(route)
    }

    pub fn has_route(&self, route: &str) -> bool {
        self.routes.contains_key(route)
    }

    pub fn routes(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }

    /// Dispatches a `/`-separated query path: the first segment selects the querier, the rest is
    /// handed to it.
    pub fn query(&self, path: &str, data: &[u8]) -> Result<Vec<u8>, Error> {
        let mut segments = path.trim_matches('/').split('/').map(str::to_owned);
        let route = segments.next().unwrap_or_default();
        let querier = self.route(&route).ok_or(Error::NotHandled)?;
        let rest: Vec<String> = segments.collect();
        querier(&rest, data)
    }
}

impl Debug for QueryRouter {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("QueryRouter")
            .field("routes", &self.routes.keys().collect::<Vec<_>>())
            .finish()
    }
}

//! Route table and first-match dispatch.

use super::{Method, RouteDefinitionError, RoutePattern, RoutingError};
use std::str::FromStr;

/// Captured path segments, in the order their placeholders appear in the
/// pattern.
pub type PathParams = Vec<String>;

/// A registered route.
#[derive(Debug, Clone)]
pub struct Route<H> {
    method: Method,
    pattern: RoutePattern,
    handler: H,
}

impl<H> Route<H> {
    /// Returns the route method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Returns the compiled pattern.
    #[must_use]
    pub const fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    /// Returns the handler bound at registration.
    #[must_use]
    pub const fn handler(&self) -> &H {
        &self.handler
    }
}

/// Ordered route table.
///
/// Dispatch scans routes in registration order and the first route whose
/// method and pattern both match wins.
#[derive(Debug, Clone)]
pub struct Router<H> {
    routes: Vec<Route<H>>,
}

impl<H> Default for Router<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> Router<H> {
    /// Creates an empty router.
    #[must_use]
    pub const fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Registers a route.
    ///
    /// # Errors
    ///
    /// Returns [`RouteDefinitionError`] when `pattern` is malformed.
    pub fn register(
        &mut self,
        method: Method,
        pattern: &str,
        handler: H,
    ) -> Result<&mut Self, RouteDefinitionError> {
        let pattern = RoutePattern::compile(pattern)?;
        self.routes.push(Route {
            method,
            pattern,
            handler,
        });
        Ok(self)
    }

    /// Registers a `GET` route.
    ///
    /// # Errors
    ///
    /// Returns [`RouteDefinitionError`] when `pattern` is malformed.
    pub fn get(&mut self, pattern: &str, handler: H) -> Result<&mut Self, RouteDefinitionError> {
        self.register(Method::Get, pattern, handler)
    }

    /// Registers a `POST` route.
    ///
    /// # Errors
    ///
    /// Returns [`RouteDefinitionError`] when `pattern` is malformed.
    pub fn post(&mut self, pattern: &str, handler: H) -> Result<&mut Self, RouteDefinitionError> {
        self.register(Method::Post, pattern, handler)
    }

    /// Registers a `PUT` route.
    ///
    /// # Errors
    ///
    /// Returns [`RouteDefinitionError`] when `pattern` is malformed.
    pub fn put(&mut self, pattern: &str, handler: H) -> Result<&mut Self, RouteDefinitionError> {
        self.register(Method::Put, pattern, handler)
    }

    /// Registers a `DELETE` route.
    ///
    /// # Errors
    ///
    /// Returns [`RouteDefinitionError`] when `pattern` is malformed.
    pub fn delete(
        &mut self,
        pattern: &str,
        handler: H,
    ) -> Result<&mut Self, RouteDefinitionError> {
        self.register(Method::Delete, pattern, handler)
    }

    /// Returns the registered routes in registration order.
    #[must_use]
    pub fn routes(&self) -> &[Route<H>] {
        &self.routes
    }

    /// Finds the first route matching `request_method` and `request_path`.
    ///
    /// Any query string or fragment is stripped before matching. Methods the
    /// router does not support never match.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::NotFound`] when no route matches.
    pub fn resolve(
        &self,
        request_path: &str,
        request_method: &str,
    ) -> Result<(&H, PathParams), RoutingError> {
        let path = strip_query(request_path);
        let method = Method::from_str(request_method).ok();

        let found = method.and_then(|method| {
            self.routes
                .iter()
                .filter(|route| route.method == method)
                .find_map(|route| {
                    route
                        .pattern
                        .captures(path)
                        .map(|params| (route, params))
                })
        });

        match found {
            Some((route, params)) => {
                tracing::debug!(
                    method = request_method,
                    path,
                    pattern = route.pattern.as_str(),
                    "route matched"
                );
                Ok((&route.handler, params))
            }
            None => {
                tracing::debug!(method = request_method, path, "no route matched");
                Err(RoutingError::NotFound {
                    method: request_method.to_owned(),
                    path: path.to_owned(),
                })
            }
        }
    }

    /// Resolves a request and invokes `invoke` with the matched handler and
    /// its positional parameters.
    ///
    /// The handler's return value is passed back unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::NotFound`] when no route matches; `invoke` is
    /// not called in that case.
    pub fn dispatch<F, R>(
        &self,
        request_path: &str,
        request_method: &str,
        invoke: F,
    ) -> Result<R, RoutingError>
    where
        F: FnOnce(&H, PathParams) -> R,
    {
        let (handler, params) = self.resolve(request_path, request_method)?;
        Ok(invoke(handler, params))
    }
}

fn strip_query(request_path: &str) -> &str {
    request_path
        .split(['?', '#'])
        .next()
        .unwrap_or(request_path)
}

//! Ordered route table.
//!
//! Routes are kept in declaration order and matched by a linear scan: the
//! first route whose method and pattern accept the request wins. Duplicates
//! are allowed; the later one is simply unreachable. Build the table once at
//! startup and share it by reference. Lookups never mutate it.

use std::collections::HashMap;
use std::fmt;

use tracing::trace;

use crate::auth::{self, AuthRouteProvider, AuthScope};
use crate::error::Error;
use crate::method::Method;
use crate::resource::{self, Action};
use crate::route::Route;

/// A successful lookup: the winning route and the parameters it extracted.
#[derive(Debug)]
pub struct Match<'r> {
    pub route: &'r Route,
    pub params: HashMap<String, String>,
}

/// The application route table.
///
/// Every builder method returns `Result<Self, Error>` so a whole table reads
/// as one `?`-chained declaration:
///
/// ```rust
/// use quill::{Action, Method, Router};
///
/// # fn main() -> Result<(), quill::Error> {
/// let router = Router::new()
///     .resources("posts", &[Action::Index, Action::Show])?
///     .root("posts#index")?;
///
/// let hit = router.lookup(Method::Get, "/posts/7").unwrap();
/// assert_eq!(hit.route.handler().to_string(), "posts#show");
/// assert_eq!(hit.params["id"], "7");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Appends a route for `method` + `pattern` dispatching to `handler`
    /// (`controller#action`).
    pub fn on(self, method: Method, pattern: &str, handler: &str) -> Result<Self, Error> {
        Ok(self.push(Route::new(method, pattern, handler)?))
    }

    pub fn get(self, pattern: &str, handler: &str) -> Result<Self, Error> {
        self.on(Method::Get, pattern, handler)
    }

    pub fn post(self, pattern: &str, handler: &str) -> Result<Self, Error> {
        self.on(Method::Post, pattern, handler)
    }

    pub fn put(self, pattern: &str, handler: &str) -> Result<Self, Error> {
        self.on(Method::Put, pattern, handler)
    }

    pub fn patch(self, pattern: &str, handler: &str) -> Result<Self, Error> {
        self.on(Method::Patch, pattern, handler)
    }

    pub fn delete(self, pattern: &str, handler: &str) -> Result<Self, Error> {
        self.on(Method::Delete, pattern, handler)
    }

    /// Appends an already-built route. Use this for named routes.
    pub fn push(mut self, route: Route) -> Self {
        trace!(method = %route.method(), pattern = route.pattern(), handler = %route.handler(), "route registered");
        self.routes.push(route);
        self
    }

    /// Appends the resource routes for `name`, restricted to `only`.
    /// See [`expand_resource`](crate::expand_resource).
    pub fn resources(self, name: &str, only: &[Action]) -> Result<Self, Error> {
        Ok(resource::expand(name, only)?.into_iter().fold(self, Router::push))
    }

    /// Appends the provider's routes for `scope` with the scope's overrides
    /// applied. See [`AuthScope::route`].
    pub fn mount_auth(self, provider: &dyn AuthRouteProvider, scope: AuthScope) -> Result<Self, Error> {
        Ok(auth::compose(provider, &scope)?.into_iter().fold(self, Router::push))
    }

    /// Appends `GET /` dispatching to `handler`, named `root`.
    pub fn root(self, handler: &str) -> Result<Self, Error> {
        Ok(self.push(Route::new(Method::Get, "/", handler)?.named("root")))
    }

    /// First route, in declaration order, that accepts `method` and `path`.
    ///
    /// One trailing `/` on the request path is ignored, so `/posts/` finds
    /// `/posts`. A `HEAD` request with no `HEAD` route of its own falls back
    /// to the `GET` routes.
    pub fn lookup(&self, method: Method, path: &str) -> Option<Match<'_>> {
        let path = match path.strip_suffix('/') {
            Some(trimmed) if !trimmed.is_empty() => trimmed,
            _ => path,
        };
        self.scan(method, path).or_else(|| match method {
            Method::Head => self.scan(Method::Get, path),
            _ => None,
        })
    }

    fn scan(&self, method: Method, path: &str) -> Option<Match<'_>> {
        self.routes.iter().find_map(|route| {
            route.matches(method, path).map(|params| Match { route, params })
        })
    }

    /// Path for the first route named `name`, with `params` substituted.
    ///
    /// ```rust
    /// # use quill::{Action, Router};
    /// # let router = Router::new().resources("posts", &[Action::Edit]).unwrap();
    /// assert_eq!(router.path_for("edit_post", &[("id", "3")]).as_deref(), Some("/posts/3/edit"));
    /// ```
    pub fn path_for(&self, name: &str, params: &[(&str, &str)]) -> Option<String> {
        self.routes.iter()
            .find(|route| route.name() == Some(name))?
            .fill(params)
    }

    /// All routes, in match order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize { self.routes.len() }
    pub fn is_empty(&self) -> bool { self.routes.is_empty() }
}

/// One line per route, columns aligned: `name METHOD pattern handler`.
impl fmt::Display for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name_w = self.routes.iter().filter_map(Route::name).map(str::len).max().unwrap_or(0);
        let method_w = self.routes.iter().map(|r| r.method().as_str().len()).max().unwrap_or(0);
        let pattern_w = self.routes.iter().map(|r| r.pattern().len()).max().unwrap_or(0);

        for route in &self.routes {
            writeln!(
                f,
                "{:>name_w$} {:<method_w$} {:<pattern_w$} {}",
                route.name().unwrap_or(""),
                route.method().as_str(),
                route.pattern(),
                route.handler(),
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handler_of(router: &Router, method: Method, path: &str) -> Option<String> {
        router.lookup(method, path).map(|m| m.route.handler().to_string())
    }

    #[test]
    fn first_declaration_wins() {
        let router = Router::new()
            .get("/posts/:id", "posts#show").unwrap()
            .get("/posts/new", "posts#new").unwrap()
            .get("/posts/:slug", "articles#show").unwrap();
        assert_eq!(handler_of(&router, Method::Get, "/posts/new").as_deref(), Some("posts#show"));
        assert_eq!(router.lookup(Method::Get, "/posts/x").unwrap().params.get("slug"), None);
    }

    #[test]
    fn exact_duplicates_are_kept_and_shadowed() {
        let router = Router::new()
            .get("/about", "pages#about").unwrap()
            .get("/about", "pages#legacy_about").unwrap();
        assert_eq!(router.len(), 2);
        assert_eq!(handler_of(&router, Method::Get, "/about").as_deref(), Some("pages#about"));
    }

    #[test]
    fn unmatched_is_none() {
        let router = Router::new().get("/posts", "posts#index").unwrap();
        assert!(router.lookup(Method::Post, "/posts").is_none());
        assert!(router.lookup(Method::Get, "/missing").is_none());
        assert!(Router::new().lookup(Method::Get, "/").is_none());
    }

    #[test]
    fn trailing_slash_is_ignored() {
        let router = Router::new()
            .resources("posts", &[Action::Index, Action::Show]).unwrap()
            .root("posts#index").unwrap();
        assert_eq!(handler_of(&router, Method::Get, "/posts/").as_deref(), Some("posts#index"));
        let show = router.lookup(Method::Get, "/posts/1/").unwrap();
        assert_eq!(show.route.handler().to_string(), "posts#show");
        assert_eq!(show.params["id"], "1");
        assert_eq!(handler_of(&router, Method::Get, "/").as_deref(), Some("posts#index"));
        assert_eq!(handler_of(&router, Method::Get, "/posts//"), None);
    }

    #[test]
    fn head_falls_back_to_get() {
        let router = Router::new()
            .get("/posts", "posts#index").unwrap()
            .on(Method::Head, "/feed", "feeds#head").unwrap()
            .get("/feed", "feeds#show").unwrap();
        assert_eq!(handler_of(&router, Method::Head, "/posts").as_deref(), Some("posts#index"));
        assert_eq!(handler_of(&router, Method::Head, "/feed").as_deref(), Some("feeds#head"));
        assert_eq!(handler_of(&router, Method::Post, "/feed"), None);
    }

    #[test]
    fn lookup_is_repeatable() {
        let router = Router::new()
            .resources("posts", &Action::ALL).unwrap();
        let first = router.lookup(Method::Get, "/posts/9").unwrap();
        for _ in 0..3 {
            let again = router.lookup(Method::Get, "/posts/9").unwrap();
            assert!(std::ptr::eq(first.route, again.route));
            assert_eq!(first.params, again.params);
        }
    }

    #[test]
    fn invalid_pattern_stops_the_build() {
        let err = Router::new().get("/posts/:", "posts#show").unwrap_err();
        assert!(err.to_string().contains("/posts/:"));
    }

    #[test]
    fn path_for_named_routes() {
        let router = Router::new()
            .resources("posts", &[Action::Index, Action::New, Action::Show]).unwrap()
            .root("posts#index").unwrap();
        assert_eq!(router.path_for("posts", &[]).as_deref(), Some("/posts"));
        assert_eq!(router.path_for("new_post", &[]).as_deref(), Some("/posts/new"));
        assert_eq!(router.path_for("post", &[("id", "12")]).as_deref(), Some("/posts/12"));
        assert_eq!(router.path_for("post", &[]), None);
        assert_eq!(router.path_for("root", &[]).as_deref(), Some("/"));
        assert_eq!(router.path_for("edit_post", &[("id", "12")]), None);
    }

    #[test]
    fn display_lists_routes_in_order() {
        let router = Router::new()
            .resources("posts", &[Action::Index, Action::Create]).unwrap()
            .root("posts#index").unwrap();
        let listing = router.to_string();
        let lines: Vec<_> = listing.lines().collect();
        assert_eq!(lines, [
            "posts GET  /posts posts#index",
            "      POST /posts posts#create",
            " root GET  /      posts#index",
        ]);
    }
}

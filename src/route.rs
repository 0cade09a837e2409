//! A single route: method, compiled path pattern, and handler name.
//!
//! # Pattern syntax
//!
//! | Segment  | Matches                                  |
//! |----------|------------------------------------------|
//! | `posts`  | the literal text `posts`                 |
//! | `:id`    | exactly one non-empty segment, as `id`   |
//! | `*path`  | one or more trailing segments, as `path` |
//!
//! Patterns start with `/`. Empty segments (`//`, a trailing `/`) are rejected,
//! as are `:`, `*` or braces inside a literal and duplicate parameter names. Each
//! route compiles its pattern into a single-entry [`matchit`] tree; ordering
//! between routes is the router's job, not the tree's.

use std::collections::HashMap;
use std::fmt;

use matchit::Router as MatchitRouter;

use crate::error::Error;
use crate::handler::HandlerId;
use crate::method::Method;

#[derive(Clone, Debug, Eq, PartialEq)]
enum Segment {
    Literal(String),
    Param(String),
    Glob(String),
}

/// An immutable binding from (method, path pattern) to a handler name.
pub struct Route {
    method: Method,
    pattern: String,
    segments: Vec<Segment>,
    handler: HandlerId,
    name: Option<String>,
    tree: MatchitRouter<()>,
}

impl Route {
    /// Compiles `pattern` and parses `handler` (`controller#action`).
    ///
    /// Both are startup-time inputs: an error here means the route table is
    /// misconfigured.
    pub fn new(method: Method, pattern: &str, handler: &str) -> Result<Self, Error> {
        let handler = handler.parse()?;
        Self::with_handler(method, pattern, handler)
    }

    pub(crate) fn with_handler(method: Method, pattern: &str, handler: HandlerId) -> Result<Self, Error> {
        let segments = parse(pattern)?;
        let mut tree = MatchitRouter::new();
        tree.insert(matchit_path(&segments), ())
            .map_err(|e| Error::invalid_route(pattern, e.to_string()))?;
        Ok(Self { method, pattern: pattern.to_owned(), segments, handler, name: None, tree })
    }

    /// Attaches a route name, used by [`Router::path_for`](crate::Router::path_for).
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn method(&self) -> Method { self.method }
    pub fn pattern(&self) -> &str { &self.pattern }
    pub fn handler(&self) -> &HandlerId { &self.handler }
    pub fn name(&self) -> Option<&str> { self.name.as_deref() }

    /// Returns the extracted parameters if this route accepts `method` and `path`.
    pub fn matches(&self, method: Method, path: &str) -> Option<HashMap<String, String>> {
        if method != self.method {
            return None;
        }
        let matched = self.tree.at(path).ok()?;
        let mut params = HashMap::new();
        for (key, value) in matched.params.iter() {
            if value.is_empty() {
                return None;
            }
            params.insert(key.to_owned(), value.to_owned());
        }
        Some(params)
    }

    /// Renders the pattern with `params` substituted. `None` if one is missing.
    pub(crate) fn fill(&self, params: &[(&str, &str)]) -> Option<String> {
        let lookup = |key: &str| params.iter().find(|(k, _)| *k == key).map(|(_, v)| *v);
        let mut path = String::new();
        for segment in &self.segments {
            path.push('/');
            match segment {
                Segment::Literal(text) => path.push_str(text),
                Segment::Param(key) | Segment::Glob(key) => path.push_str(lookup(key)?),
            }
        }
        if path.is_empty() {
            path.push('/');
        }
        Some(path)
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("pattern", &self.pattern)
            .field("handler", &self.handler.to_string())
            .field("name", &self.name)
            .finish()
    }
}

fn parse(pattern: &str) -> Result<Vec<Segment>, Error> {
    let Some(rest) = pattern.strip_prefix('/') else {
        return Err(Error::invalid_route(pattern, "must start with `/`"));
    };
    if rest.is_empty() {
        return Ok(Vec::new());
    }

    let parts: Vec<&str> = rest.split('/').collect();
    let mut segments = Vec::with_capacity(parts.len());
    let mut seen: Vec<&str> = Vec::new();

    for (i, part) in parts.iter().enumerate() {
        if part.is_empty() {
            return Err(Error::invalid_route(pattern, "empty path segment"));
        }
        let segment = if let Some(name) = part.strip_prefix(':') {
            Segment::Param(param_name(pattern, name, &mut seen)?)
        } else if let Some(name) = part.strip_prefix('*') {
            if i + 1 != parts.len() {
                return Err(Error::invalid_route(pattern, "glob must be the last segment"));
            }
            Segment::Glob(param_name(pattern, name, &mut seen)?)
        } else if part.contains([':', '*', '{', '}']) {
            return Err(Error::invalid_route(pattern, format!("unexpected parameter syntax in `{part}`")));
        } else {
            Segment::Literal((*part).to_owned())
        };
        segments.push(segment);
    }
    Ok(segments)
}

fn param_name<'p>(pattern: &str, name: &'p str, seen: &mut Vec<&'p str>) -> Result<String, Error> {
    let mut chars = name.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        return Err(Error::invalid_route(pattern, format!("invalid parameter name `{name}`")));
    }
    if seen.contains(&name) {
        return Err(Error::invalid_route(pattern, format!("duplicate parameter `{name}`")));
    }
    seen.push(name);
    Ok(name.to_owned())
}

/// Translates segments into matchit's `{param}` / `{*glob}` syntax.
fn matchit_path(segments: &[Segment]) -> String {
    if segments.is_empty() {
        return "/".to_owned();
    }
    let mut path = String::new();
    for segment in segments {
        path.push('/');
        match segment {
            Segment::Literal(text) => path.push_str(text),
            Segment::Param(name) => {
                path.push('{');
                path.push_str(name);
                path.push('}');
            }
            Segment::Glob(name) => {
                path.push_str("{*");
                path.push_str(name);
                path.push('}');
            }
        }
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(pattern: &str) -> Route {
        Route::new(Method::Get, pattern, "posts#show").unwrap()
    }

    #[test]
    fn root_matches_only_root() {
        let root = route("/");
        assert_eq!(root.matches(Method::Get, "/"), Some(HashMap::new()));
        assert_eq!(root.matches(Method::Get, "/posts"), None);
    }

    #[test]
    fn param_is_extracted_verbatim() {
        let show = route("/posts/:id");
        let params = show.matches(Method::Get, "/posts/hello%20world").unwrap();
        assert_eq!(params["id"], "hello%20world");
        assert_eq!(show.matches(Method::Get, "/posts/007").unwrap()["id"], "007");
    }

    #[test]
    fn param_needs_exactly_one_non_empty_segment() {
        let show = route("/posts/:id");
        assert_eq!(show.matches(Method::Get, "/posts/"), None);
        assert_eq!(show.matches(Method::Get, "/posts"), None);
        assert_eq!(show.matches(Method::Get, "/posts/1/edit"), None);
    }

    #[test]
    fn method_must_match() {
        assert_eq!(route("/posts/:id").matches(Method::Post, "/posts/1"), None);
    }

    #[test]
    fn glob_takes_the_rest() {
        let files = route("/files/*path");
        assert_eq!(files.matches(Method::Get, "/files/a/b/c").unwrap()["path"], "a/b/c");
        assert_eq!(files.matches(Method::Get, "/files"), None);
    }

    #[test]
    fn malformed_patterns_are_rejected() {
        for bad in [
            "posts",
            "",
            "/posts/",
            "/posts//new",
            "/posts/:",
            "/posts/:1d",
            "/posts/:id/:id",
            "/posts/:id.:format",
            "/files/*path/tail",
            "/posts/*",
            "/raw/{id}",
        ] {
            let err = Route::new(Method::Get, bad, "posts#show").unwrap_err();
            assert!(matches!(err, Error::InvalidRoute { .. }), "{bad}: {err}");
        }
    }

    #[test]
    fn malformed_handler_is_rejected() {
        let err = Route::new(Method::Get, "/posts", "posts").unwrap_err();
        assert!(matches!(err, Error::InvalidHandler(_)));
    }

    #[test]
    fn fill_substitutes_params() {
        let edit = route("/posts/:id/edit");
        assert_eq!(edit.fill(&[("id", "42")]).as_deref(), Some("/posts/42/edit"));
        assert_eq!(edit.fill(&[]), None);
        assert_eq!(route("/").fill(&[]).as_deref(), Some("/"));
    }
}

//! # quill
//!
//! The routing layer of a small posts application, and just enough HTTP
//! plumbing around it to serve.
//!
//! ## The contract
//!
//! A route table is a value: built once at startup, read concurrently
//! afterwards, never mutated. Requests match routes in declaration order and
//! the first match wins. A request nothing matches is a `404`, not an error.
//! A malformed pattern or a route pointing at a handler nobody provides is
//! an error, and it happens before the first connection is accepted.
//!
//! What's in the table:
//!
//! - Resourceful routes with an explicit allow-list ([`Router::resources`])
//! - Authentication routes contributed by a provider ([`AuthRouteProvider`]),
//!   with per-route overrides ([`AuthScope::route`])
//! - A root route ([`Router::root`])
//!
//! Persistence, views, and the provider's credential handling live in the
//! handlers, not here.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use quill::{blog, Application, Controllers, DeviseRoutes, Request, Response, Server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), quill::Error> {
//!     let router = blog::routes(&DeviseRoutes::new())?;
//!     let mut controllers = Controllers::new();
//!     for route in router.routes() {
//!         controllers = controllers.action(&route.handler().to_string(), echo)?;
//!     }
//!
//!     Server::bind("0.0.0.0:3000")
//!         .serve(Application::new(router, controllers)?)
//!         .await
//! }
//!
//! async fn echo(req: Request) -> Response {
//!     Response::text(format!("{} {}", req.method(), req.path()))
//! }
//! ```

mod application;
mod auth;
mod controllers;
mod error;
mod handler;
mod method;
mod request;
mod resource;
mod response;
mod route;
mod router;
mod server;

pub mod blog;

pub use application::Application;
pub use auth::{AuthModule, AuthRouteProvider, AuthScope, DeviseRoutes};
pub use controllers::Controllers;
pub use error::Error;
pub use handler::{Handler, HandlerId};
pub use http::StatusCode;
pub use method::Method;
pub use request::Request;
pub use resource::{expand as expand_resource, Action};
pub use response::{IntoResponse, Response, ResponseBuilder};
pub use route::Route;
pub use router::{Match, Router};
pub use server::Server;

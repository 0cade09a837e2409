//! Handler identifiers, the handler trait, and type erasure.
//!
//! A route never holds a function. It holds a [`HandlerId`], the
//! `controller#action` name of the code that should run. The binding from
//! name to function lives in [`Controllers`](crate::Controllers) and is
//! checked once when the [`Application`](crate::Application) is assembled.
//!
//! # How handlers are stored
//!
//! [`Controllers`](crate::Controllers) keys handlers of different concrete
//! types by [`HandlerId`], so each one is erased to an `Arc<dyn ErasedHandler>`
//! when it is bound:
//!
//! ```text
//! controllers.action("posts#show", show)      parse id, erase `show`
//!        ↓
//! HashMap<HandlerId, BoxedHandler>             built once at startup
//!        ↓
//! router.lookup(..) → route.handler()          the id of the winning route
//!        ↓
//! controllers.get(id)?.call(req)               Arc clone, then the call
//! ```

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::Error;
use crate::request::Request;
use crate::response::{IntoResponse, Response};

// ── HandlerId ─────────────────────────────────────────────────────────────────

/// The `controller#action` name a route dispatches to.
///
/// The controller may be namespaced with `/` (`devise/sessions`,
/// `users/registrations`). Neither half may be empty or contain whitespace.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct HandlerId {
    controller: String,
    action: String,
}

impl HandlerId {
    pub fn new(controller: &str, action: &str) -> Result<Self, Error> {
        let valid_controller = !controller.is_empty()
            && controller.split('/').all(|part| !part.is_empty() && is_word(part));
        if !valid_controller || action.is_empty() || !is_word(action) {
            return Err(Error::InvalidHandler(format!("{controller}#{action}")));
        }
        Ok(Self { controller: controller.to_owned(), action: action.to_owned() })
    }

    pub fn controller(&self) -> &str { &self.controller }
    pub fn action(&self) -> &str { &self.action }
}

fn is_word(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl FromStr for HandlerId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('#') {
            Some((controller, action)) if !action.contains('#') => Self::new(controller, action),
            _ => Err(Error::InvalidHandler(s.to_owned())),
        }
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.controller, self.action)
    }
}

// ── Type erasure ──────────────────────────────────────────────────────────────

/// A heap-allocated, type-erased future that resolves to a [`Response`].
pub(crate) type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// What [`Application`](crate::Application) calls once a route's
/// [`HandlerId`] has been resolved through `Controllers`.
///
/// Public only because `Handler::into_boxed_handler` returns it.
#[doc(hidden)]
pub trait ErasedHandler {
    fn call(&self, req: Request) -> BoxFuture;
}

/// The value side of the `Controllers` map, shared by every request that
/// resolves to the same `controller#action`.
#[doc(hidden)]
pub type BoxedHandler = Arc<dyn ErasedHandler + Send + Sync + 'static>;

/// Implemented for every valid handler function.
///
/// Satisfied by any `async fn name(req: Request) -> impl IntoResponse`, which
/// is what [`Controllers::action`](crate::Controllers::action) accepts. Sealed:
/// the blanket impl below is the only one.
pub trait Handler: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler;
}

mod private {
    pub trait Sealed {}
}

impl<F, Fut, R> private::Sealed for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
}

impl<F, Fut, R> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        Arc::new(FnHandler(self))
    }
}

struct FnHandler<F>(F);

impl<F, Fut, R> ErasedHandler for FnHandler<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, req: Request) -> BoxFuture {
        let fut = (self.0)(req);
        Box::pin(async move { fut.await.into_response() })
    }
}

#[cfg(test)]
mod tests {
    use http::StatusCode;

    use super::{Handler, HandlerId};
    use crate::method::Method;
    use crate::request::Request;

    #[test]
    fn parses_namespaced_controller() {
        let id: HandlerId = "devise/sessions#destroy".parse().unwrap();
        assert_eq!(id.controller(), "devise/sessions");
        assert_eq!(id.action(), "destroy");
        assert_eq!(id.to_string(), "devise/sessions#destroy");
    }

    #[test]
    fn rejects_malformed_ids() {
        for bad in ["posts", "#index", "posts#", "posts#index#x", "a//b#c", "/a#b", "posts #index"] {
            assert!(bad.parse::<HandlerId>().is_err(), "{bad} should be rejected");
        }
    }

    async fn gone(_req: Request) -> StatusCode { StatusCode::GONE }

    #[tokio::test]
    async fn erased_handler_converts_its_return_value() {
        let boxed = gone.into_boxed_handler();
        let res = boxed.call(Request::new(Method::Get, "/posts/1")).await;
        assert_eq!(res.status_code(), StatusCode::GONE);
        assert!(res.body().is_empty());
    }
}

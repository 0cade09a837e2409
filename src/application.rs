//! A route table bound to the controllers that serve it.
//!
//! Assembling an [`Application`] is the last startup step: every route must
//! name a handler that [`Controllers`] provides, or the process refuses to
//! start. After that, [`Application::respond`] is the whole request path:
//! look up, fill in parameters, call.

use http::StatusCode;
use tracing::{debug, error, info};

use crate::controllers::Controllers;
use crate::error::Error;
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;

pub struct Application {
    router: Router,
    controllers: Controllers,
}

impl Application {
    /// Fails with [`Error::UndefinedHandler`] on the first route whose
    /// handler is not bound.
    pub fn new(router: Router, controllers: Controllers) -> Result<Self, Error> {
        if let Some(route) = router.routes().iter().find(|r| !controllers.contains(r.handler())) {
            return Err(Error::UndefinedHandler {
                handler: route.handler().to_string(),
                method: route.method(),
                pattern: route.pattern().to_owned(),
            });
        }
        info!(routes = router.len(), actions = controllers.len(), "routes loaded");
        Ok(Self { router, controllers })
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Routes `req` and runs its handler. Unmatched requests get `404`;
    /// `HEAD` answers carry the handler's status and headers without a body.
    pub async fn respond(&self, req: Request) -> Response {
        let Some(matched) = self.router.lookup(req.method(), req.path()) else {
            debug!(method = %req.method(), path = req.path(), "no route matched");
            return Response::status(StatusCode::NOT_FOUND);
        };

        let id = matched.route.handler();
        let Some(handler) = self.controllers.get(id) else {
            // Unreachable once `new` has validated the table.
            error!(handler = %id, "route points at an unbound handler");
            return Response::status(StatusCode::INTERNAL_SERVER_ERROR);
        };

        debug!(method = %req.method(), path = req.path(), handler = %id, "dispatching");
        let head = req.method() == Method::Head;
        let mut res = handler.call(req.with_params(matched.params)).await;
        if head {
            res.body.clear();
        }
        res
    }
}

//! Binding from handler names to handler functions.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::Error;
use crate::handler::{BoxedHandler, Handler, HandlerId};

/// Every `controller#action` the application can run.
///
/// ```rust
/// use quill::{Controllers, Request, Response};
///
/// async fn index(_req: Request) -> Response { Response::text("all posts") }
///
/// let controllers = Controllers::new().action("posts#index", index).unwrap();
/// assert_eq!(controllers.len(), 1);
/// ```
#[derive(Default)]
pub struct Controllers {
    actions: HashMap<HandlerId, BoxedHandler>,
}

impl Controllers {
    pub fn new() -> Self {
        Self { actions: HashMap::new() }
    }

    /// Binds `id` to `handler`. Binding the same id twice keeps the later one.
    pub fn action(mut self, id: &str, handler: impl Handler) -> Result<Self, Error> {
        self.actions.insert(id.parse()?, handler.into_boxed_handler());
        Ok(self)
    }

    pub fn contains(&self, id: &HandlerId) -> bool {
        self.actions.contains_key(id)
    }

    pub fn len(&self) -> usize { self.actions.len() }
    pub fn is_empty(&self) -> bool { self.actions.is_empty() }

    pub(crate) fn get(&self, id: &HandlerId) -> Option<BoxedHandler> {
        self.actions.get(id).map(Arc::clone)
    }
}

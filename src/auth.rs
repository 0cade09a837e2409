//! Delegated authentication routes.
//!
//! Sign-in, sign-out and registration are owned by an authentication
//! provider, not by the application. The provider contributes its routes
//! through [`AuthRouteProvider`]; the application describes what it wants
//! with an [`AuthScope`]: which entity, which modules, which controllers it
//! replaces, and which individual routes it overrides.
//!
//! ```rust
//! use quill::{AuthModule, AuthScope, DeviseRoutes, Method, Router};
//!
//! let router = Router::new()
//!     .mount_auth(
//!         &DeviseRoutes::new(),
//!         AuthScope::new("users")
//!             .controller(AuthModule::Registrations, "users/registrations")
//!             .route(Method::Get, "/users/sign_out", "devise/sessions#destroy"),
//!     )
//!     .unwrap();
//!
//! let hit = router.lookup(Method::Get, "/users/sign_out").unwrap();
//! assert_eq!(hit.route.handler().to_string(), "devise/sessions#destroy");
//! ```

use std::collections::HashMap;

use tracing::debug;

use crate::error::Error;
use crate::method::Method;
use crate::resource::singularize;
use crate::route::Route;

/// Source of an authentication provider's default routes.
pub trait AuthRouteProvider {
    /// The routes the provider mounts for `scope`, before any override.
    fn default_routes(&self, scope: &AuthScope) -> Result<Vec<Route>, Error>;
}

/// A group of provider routes.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum AuthModule {
    /// Sign in and sign out.
    Sessions,
    /// Sign up, profile edit, account cancellation.
    Registrations,
    /// Password reset.
    Passwords,
}

impl AuthModule {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sessions      => "sessions",
            Self::Registrations => "registrations",
            Self::Passwords     => "passwords",
        }
    }
}

struct Override {
    method: Method,
    pattern: String,
    handler: String,
}

/// What the application asks of the provider for one entity.
pub struct AuthScope {
    entity: String,
    modules: Vec<AuthModule>,
    controllers: HashMap<AuthModule, String>,
    overrides: Vec<Override>,
}

impl AuthScope {
    /// Scope for plural `entity` (e.g. `users`) with sessions and registrations.
    pub fn new(entity: &str) -> Self {
        Self {
            entity: entity.to_owned(),
            modules: vec![AuthModule::Sessions, AuthModule::Registrations],
            controllers: HashMap::new(),
            overrides: Vec::new(),
        }
    }

    /// Replaces the set of enabled modules.
    pub fn modules(mut self, modules: &[AuthModule]) -> Self {
        self.modules = modules.to_vec();
        self
    }

    /// Routes `module` to the application's own `controller` instead of the
    /// provider's.
    pub fn controller(mut self, module: AuthModule, controller: &str) -> Self {
        self.controllers.insert(module, controller.to_owned());
        self
    }

    /// Declares an override route. It replaces every provider route with the
    /// same path pattern, whatever their method, and takes the position and
    /// the name of the first one. An override sharing its pattern with an
    /// earlier override goes right after it; any other goes ahead of the
    /// defaults.
    pub fn route(mut self, method: Method, pattern: &str, handler: &str) -> Self {
        self.overrides.push(Override {
            method,
            pattern: pattern.to_owned(),
            handler: handler.to_owned(),
        });
        self
    }

    pub fn entity(&self) -> &str { &self.entity }

    pub fn singular(&self) -> String {
        singularize(&self.entity)
    }

    pub fn has_module(&self, module: AuthModule) -> bool {
        self.modules.contains(&module)
    }

    /// Controller handling `module`: the application's replacement if one was
    /// declared, otherwise `{namespace}/{module}`.
    pub fn controller_for(&self, module: AuthModule, namespace: &str) -> String {
        self.controllers
            .get(&module)
            .cloned()
            .unwrap_or_else(|| format!("{namespace}/{}", module.as_str()))
    }
}

/// Composes the provider's defaults with the scope's overrides.
pub(crate) fn compose(provider: &dyn AuthRouteProvider, scope: &AuthScope) -> Result<Vec<Route>, Error> {
    let mut block: Vec<(Route, bool)> = provider
        .default_routes(scope)?
        .into_iter()
        .map(|route| (route, false))
        .collect();

    let mut front = 0;
    for ov in &scope.overrides {
        let mut route = Route::new(ov.method, &ov.pattern, &ov.handler)?;
        let replaced = |(r, is_override): &(Route, bool)| !is_override && r.pattern() == ov.pattern;

        let first = block.iter().position(replaced);
        let sibling = block.iter().rposition(|(r, is_override)| *is_override && r.pattern() == ov.pattern);
        let before = block.len();

        let at = match (first, sibling) {
            (Some(i), _) => {
                if let Some(name) = block[i].0.name() {
                    route = route.named(name);
                }
                block.retain(|entry| !replaced(entry));
                debug!(pattern = %ov.pattern, replaced = before - block.len(), "auth override replaces default route");
                i
            }
            (None, Some(j)) => {
                if j < front {
                    front += 1;
                }
                j + 1
            }
            (None, None) => {
                front += 1;
                front - 1
            }
        };
        block.insert(at, (route, true));
    }

    Ok(block.into_iter().map(|(route, _)| route).collect())
}

/// The conventional registration / session / password route set, with
/// handlers under the `devise` namespace unless told otherwise.
///
/// For `users`:
///
/// | Module        | Method       | Path                  | Action  |
/// |---------------|--------------|-----------------------|---------|
/// | sessions      | GET          | `/users/sign_in`      | new     |
/// | sessions      | POST         | `/users/sign_in`      | create  |
/// | sessions      | DELETE       | `/users/sign_out`     | destroy |
/// | passwords     | GET          | `/users/password/new` | new     |
/// | passwords     | GET          | `/users/password/edit`| edit    |
/// | passwords     | PATCH, PUT   | `/users/password`     | update  |
/// | passwords     | POST         | `/users/password`     | create  |
/// | registrations | GET          | `/users/cancel`       | cancel  |
/// | registrations | GET          | `/users/sign_up`      | new     |
/// | registrations | GET          | `/users/edit`         | edit    |
/// | registrations | PATCH, PUT   | `/users`              | update  |
/// | registrations | DELETE       | `/users`              | destroy |
/// | registrations | POST         | `/users`              | create  |
pub struct DeviseRoutes {
    namespace: String,
}

impl DeviseRoutes {
    pub fn new() -> Self {
        Self { namespace: "devise".to_owned() }
    }

    /// Controller namespace for modules the scope does not replace.
    pub fn namespace(mut self, namespace: &str) -> Self {
        self.namespace = namespace.to_owned();
        self
    }
}

impl Default for DeviseRoutes {
    fn default() -> Self { Self::new() }
}

impl AuthRouteProvider for DeviseRoutes {
    fn default_routes(&self, scope: &AuthScope) -> Result<Vec<Route>, Error> {
        use AuthModule::*;
        use Method::*;

        let prefix = format!("/{}", scope.entity());
        let one = scope.singular();
        let mut routes = Vec::new();

        let mut add = |module: AuthModule, method: Method, path: &str, action: &str, name: Option<String>| -> Result<(), Error> {
            let handler = format!("{}#{action}", scope.controller_for(module, &self.namespace));
            let path = format!("{prefix}{path}");
            let route = Route::new(method, &path, &handler)?;
            routes.push(match name {
                Some(name) => route.named(name),
                None => route,
            });
            Ok(())
        };

        if scope.has_module(Sessions) {
            add(Sessions, Get, "/sign_in", "new", Some(format!("new_{one}_session")))?;
            add(Sessions, Post, "/sign_in", "create", Some(format!("{one}_session")))?;
            add(Sessions, Delete, "/sign_out", "destroy", Some(format!("destroy_{one}_session")))?;
        }
        if scope.has_module(Passwords) {
            add(Passwords, Get, "/password/new", "new", Some(format!("new_{one}_password")))?;
            add(Passwords, Get, "/password/edit", "edit", Some(format!("edit_{one}_password")))?;
            add(Passwords, Patch, "/password", "update", Some(format!("{one}_password")))?;
            add(Passwords, Put, "/password", "update", None)?;
            add(Passwords, Post, "/password", "create", None)?;
        }
        if scope.has_module(Registrations) {
            add(Registrations, Get, "/cancel", "cancel", Some(format!("cancel_{one}_registration")))?;
            add(Registrations, Get, "/sign_up", "new", Some(format!("new_{one}_registration")))?;
            add(Registrations, Get, "/edit", "edit", Some(format!("edit_{one}_registration")))?;
            add(Registrations, Patch, "", "update", Some(format!("{one}_registration")))?;
            add(Registrations, Put, "", "update", None)?;
            add(Registrations, Delete, "", "destroy", None)?;
            add(Registrations, Post, "", "create", None)?;
        }

        Ok(routes)
    }
}

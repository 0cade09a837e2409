//! Route table of the posts application.
//!
//! ```text
//!                  posts GET    /posts           posts#index
//!                        POST   /posts           posts#create
//!               new_post GET    /posts/new       posts#new
//!              edit_post GET    /posts/:id/edit  posts#edit
//!                   post GET    /posts/:id       posts#show
//!       new_user_session GET    /users/sign_in   devise/sessions#new
//!           user_session POST   /users/sign_in   devise/sessions#create
//!                        GET    /users/sign_out  devise/sessions#destroy
//!                    ... registrations under /users, users/registrations#...
//!                   root GET    /                posts#index
//! ```
//!
//! Posts cannot be updated or destroyed over HTTP. Sign-out is a `GET` so a
//! plain link can trigger it; the provider's `DELETE` route is not mounted.

use crate::auth::{AuthModule, AuthRouteProvider, AuthScope};
use crate::error::Error;
use crate::method::Method;
use crate::resource::Action;
use crate::router::Router;

/// Controller that replaces the provider's registrations controller.
pub const REGISTRATIONS_CONTROLLER: &str = "users/registrations";

/// Builds the application's route table on top of `provider`'s auth routes.
pub fn routes(provider: &dyn AuthRouteProvider) -> Result<Router, Error> {
    Router::new()
        .resources("posts", &[Action::Index, Action::New, Action::Create, Action::Show, Action::Edit])?
        .mount_auth(
            provider,
            AuthScope::new("users")
                .controller(AuthModule::Registrations, REGISTRATIONS_CONTROLLER)
                .route(Method::Get, "/users/sign_out", "devise/sessions#destroy"),
        )?
        .root("posts#index")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DeviseRoutes;

    #[test]
    fn table_shape() {
        let router = routes(&DeviseRoutes::new()).unwrap();
        // 5 post routes, 3 session routes, 7 registration routes, root.
        assert_eq!(router.len(), 16);
        assert_eq!(router.routes().last().map(|r| r.pattern()), Some("/"));
    }

    #[test]
    fn registrations_use_the_application_controller() {
        let router = routes(&DeviseRoutes::new()).unwrap();
        let hit = router.lookup(Method::Post, "/users").unwrap();
        assert_eq!(hit.route.handler().to_string(), "users/registrations#create");
    }
}

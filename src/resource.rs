//! Resourceful route expansion.
//!
//! [`expand`] turns a plural resource name and an allow-list of actions into
//! concrete routes:
//!
//! | Action    | Method       | Path              | Name          |
//! |-----------|--------------|-------------------|---------------|
//! | `Index`   | GET          | `/posts`          | `posts`       |
//! | `Create`  | POST         | `/posts`          |               |
//! | `New`     | GET          | `/posts/new`      | `new_post`    |
//! | `Edit`    | GET          | `/posts/:id/edit` | `edit_post`   |
//! | `Show`    | GET          | `/posts/:id`      | `post`        |
//! | `Update`  | PATCH, PUT   | `/posts/:id`      |               |
//! | `Destroy` | DELETE       | `/posts/:id`      |               |
//!
//! Routes come out in the order of the table, whatever order the allow-list
//! uses, so `/posts/new` always precedes `/posts/:id`.

use crate::error::Error;
use crate::handler::HandlerId;
use crate::method::Method;
use crate::route::Route;

/// One of the seven conventional resource actions.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Action {
    Index,
    New,
    Create,
    Show,
    Edit,
    Update,
    Destroy,
}

impl Action {
    /// Every action, in expansion order.
    pub const ALL: [Action; 7] = [
        Action::Index,
        Action::Create,
        Action::New,
        Action::Edit,
        Action::Show,
        Action::Update,
        Action::Destroy,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Index   => "index",
            Self::New     => "new",
            Self::Create  => "create",
            Self::Show    => "show",
            Self::Edit    => "edit",
            Self::Update  => "update",
            Self::Destroy => "destroy",
        }
    }
}

/// Expands resource `name` (plural, e.g. `posts`) into routes for the actions
/// in `only`. Actions outside `only` produce no route at all.
pub fn expand(name: &str, only: &[Action]) -> Result<Vec<Route>, Error> {
    let collection = format!("/{name}");
    let member = format!("/{name}/:id");
    let singular = singularize(name).replace('/', "_");

    let mut routes = Vec::new();
    for action in Action::ALL.into_iter().filter(|a| only.contains(a)) {
        let handler = HandlerId::new(name, action.as_str())?;
        let route = |method, pattern: &str| Route::with_handler(method, pattern, handler.clone());
        match action {
            Action::Index => routes.push(route(Method::Get, &collection)?.named(name.replace('/', "_"))),
            Action::Create => routes.push(route(Method::Post, &collection)?),
            Action::New => {
                routes.push(route(Method::Get, &format!("{collection}/new"))?.named(format!("new_{singular}")));
            }
            Action::Edit => {
                routes.push(route(Method::Get, &format!("{member}/edit"))?.named(format!("edit_{singular}")));
            }
            Action::Show => routes.push(route(Method::Get, &member)?.named(singular.clone())),
            Action::Update => {
                routes.push(route(Method::Patch, &member)?);
                routes.push(route(Method::Put, &member)?);
            }
            Action::Destroy => routes.push(route(Method::Delete, &member)?),
        }
    }
    Ok(routes)
}

/// English singular of a plural resource name, for route names.
///
/// Covers the regular forms (`posts`, `categories`, `addresses`); irregular
/// plurals come back unchanged.
pub(crate) fn singularize(plural: &str) -> String {
    if let Some(stem) = plural.strip_suffix("ies") {
        format!("{stem}y")
    } else if let Some(stem) = plural.strip_suffix("sses") {
        format!("{stem}ss")
    } else if plural.ends_with("ss") {
        plural.to_owned()
    } else if let Some(stem) = plural.strip_suffix('s') {
        stem.to_owned()
    } else {
        plural.to_owned()
    }
}

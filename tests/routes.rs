use quill::{blog, Application, Controllers, DeviseRoutes, Method, Request, Response, Router, StatusCode};

fn router() -> Router {
    blog::routes(&DeviseRoutes::new()).expect("route table builds")
}

fn resolve(router: &Router, method: Method, path: &str) -> Option<String> {
    router.lookup(method, path).map(|m| m.route.handler().to_string())
}

#[test]
fn wire_contract() {
    let router = router();
    let table = [
        (Method::Get,  "/posts",          "posts#index"),
        (Method::Get,  "/posts/new",      "posts#new"),
        (Method::Post, "/posts",          "posts#create"),
        (Method::Get,  "/posts/17",       "posts#show"),
        (Method::Get,  "/posts/17/edit",  "posts#edit"),
        (Method::Get,  "/",               "posts#index"),
        (Method::Get,  "/users/sign_out", "devise/sessions#destroy"),
        (Method::Get,  "/users/sign_in",  "devise/sessions#new"),
        (Method::Post, "/users/sign_in",  "devise/sessions#create"),
        (Method::Get,  "/users/sign_up",  "users/registrations#new"),
        (Method::Post, "/users",          "users/registrations#create"),
        (Method::Get,  "/users/edit",     "users/registrations#edit"),
        (Method::Patch, "/users",         "users/registrations#update"),
        (Method::Put,  "/users",          "users/registrations#update"),
    ];
    for (method, path, handler) in table {
        assert_eq!(resolve(&router, method, path).as_deref(), Some(handler), "{method} {path}");
    }
}

#[test]
fn show_extracts_id_verbatim() {
    let router = router();
    for id in ["1", "007", "hello-world", "a%2Fb", "ünïcode"] {
        let path = format!("/posts/{id}");
        let hit = router.lookup(Method::Get, &path).unwrap();
        assert_eq!(hit.route.handler().to_string(), "posts#show");
        assert_eq!(hit.params["id"], id);
    }
}

#[test]
fn new_is_not_shadowed_by_show() {
    let router = router();
    let hit = router.lookup(Method::Get, "/posts/new").unwrap();
    assert_eq!(hit.route.handler().action(), "new");
    assert!(hit.params.is_empty());
}

#[test]
fn update_and_destroy_are_not_routed() {
    let router = router();
    for method in [Method::Post, Method::Patch, Method::Put, Method::Delete] {
        assert_eq!(resolve(&router, method, "/posts/1"), None, "{method} /posts/1");
    }
}

#[test]
fn root_and_index_share_a_handler() {
    let router = router();
    assert_eq!(resolve(&router, Method::Get, "/"), resolve(&router, Method::Get, "/posts"));
}

#[test]
fn sign_out_override_replaces_the_default() {
    let router = router();
    assert_eq!(resolve(&router, Method::Delete, "/users/sign_out"), None);
    let sign_outs = router.routes().iter().filter(|r| r.pattern() == "/users/sign_out").count();
    assert_eq!(sign_outs, 1);
}

#[test]
fn trailing_slash_and_head_requests() {
    let router = router();
    assert_eq!(resolve(&router, Method::Get, "/posts/").as_deref(), Some("posts#index"));
    assert_eq!(resolve(&router, Method::Get, "/posts/1/").as_deref(), Some("posts#show"));
    assert_eq!(resolve(&router, Method::Get, "/users/sign_out/").as_deref(), Some("devise/sessions#destroy"));
    assert_eq!(resolve(&router, Method::Head, "/posts/1").as_deref(), Some("posts#show"));
    assert_eq!(resolve(&router, Method::Head, "/users/sign_in").as_deref(), Some("devise/sessions#new"));
}

#[test]
fn named_paths() {
    let router = router();
    assert_eq!(router.path_for("root", &[]).as_deref(), Some("/"));
    assert_eq!(router.path_for("edit_post", &[("id", "5")]).as_deref(), Some("/posts/5/edit"));
    assert_eq!(router.path_for("new_user_session", &[]).as_deref(), Some("/users/sign_in"));
    assert_eq!(router.path_for("new_user_registration", &[]).as_deref(), Some("/users/sign_up"));
    assert_eq!(router.path_for("destroy_user_session", &[]).as_deref(), Some("/users/sign_out"));
}

#[test]
fn listing_mentions_every_route() {
    let router = router();
    let listing = router.to_string();
    assert_eq!(listing.lines().count(), router.len());
    assert!(listing.contains("devise/sessions#destroy"));
}

#[test]
fn shared_table_across_threads() {
    let router = std::sync::Arc::new(router());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let router = std::sync::Arc::clone(&router);
            std::thread::spawn(move || {
                let path = format!("/posts/{i}");
                router.lookup(Method::Get, &path).map(|m| m.params["id"].clone())
            })
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), Some(i.to_string()));
    }
}

async fn label(req: Request) -> Response {
    Response::text(format!("{} {}", req.method(), req.path()))
}

#[tokio::test]
async fn application_serves_the_table() {
    let router = router();
    let mut controllers = Controllers::new();
    for route in router.routes() {
        controllers = controllers.action(&route.handler().to_string(), label).unwrap();
    }
    let app = Application::new(router, controllers).unwrap();

    let ok = app.respond(Request::new(Method::Get, "/users/sign_out")).await;
    assert_eq!(ok.status_code(), StatusCode::OK);
    assert_eq!(ok.body(), b"GET /users/sign_out");

    let missing = app.respond(Request::new(Method::Delete, "/posts/3")).await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
}

#[test]
fn missing_controller_blocks_startup() {
    let controllers = Controllers::new()
        .action("posts#index", label).unwrap();
    assert!(Application::new(router(), controllers).is_err());
}

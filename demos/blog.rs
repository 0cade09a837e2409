//! The posts application's routes, served with placeholder controllers.
//!
//! Run with:
//!   RUST_LOG=debug cargo run --example blog
//!
//! Try:
//!   curl http://localhost:3000/
//!   curl http://localhost:3000/posts/42
//!   curl -X POST http://localhost:3000/posts -d 'title=hello'
//!   curl -i -X DELETE http://localhost:3000/posts/42     # 404, not routed
//!   curl -i http://localhost:3000/users/sign_out

use quill::{blog, Application, Controllers, DeviseRoutes, Request, Response, Server, StatusCode};

#[tokio::main]
async fn main() -> Result<(), quill::Error> {
    tracing_subscriber::fmt::init();

    let router = blog::routes(&DeviseRoutes::new())?;
    print!("{router}");

    let controllers = Controllers::new()
        .action("posts#index", posts_index)?
        .action("posts#new", posts_new)?
        .action("posts#create", posts_create)?
        .action("posts#show", posts_show)?
        .action("posts#edit", posts_edit)?
        .action("devise/sessions#new", sign_in_form)?
        .action("devise/sessions#create", sign_in)?
        .action("devise/sessions#destroy", sign_out)?
        .action("users/registrations#cancel", registration)?
        .action("users/registrations#new", registration)?
        .action("users/registrations#edit", registration)?
        .action("users/registrations#update", registration)?
        .action("users/registrations#destroy", registration)?
        .action("users/registrations#create", registration)?;

    let app = Application::new(router, controllers)?;

    Server::bind("0.0.0.0:3000").serve(app).await
}

// GET /posts and GET /
async fn posts_index(_req: Request) -> Response {
    Response::html("<h1>Posts</h1>")
}

// GET /posts/new
async fn posts_new(_req: Request) -> Response {
    Response::html(r#"<form method="post" action="/posts"><input name="title"></form>"#)
}

// POST /posts
async fn posts_create(req: Request) -> Response {
    if req.body().is_empty() {
        return Response::status(StatusCode::UNPROCESSABLE_ENTITY);
    }
    Response::redirect("/posts/1")
}

// GET /posts/:id
async fn posts_show(req: Request) -> Response {
    let id = req.param("id").unwrap_or("unknown");
    Response::html(format!("<h1>Post {id}</h1>"))
}

// GET /posts/:id/edit
async fn posts_edit(req: Request) -> Response {
    let id = req.param("id").unwrap_or("unknown");
    Response::html(format!("<h1>Editing post {id}</h1>"))
}

async fn sign_in_form(_req: Request) -> Response {
    Response::html(r#"<form method="post" action="/users/sign_in"></form>"#)
}

async fn sign_in(_req: Request) -> Response {
    Response::redirect("/")
}

// GET /users/sign_out
async fn sign_out(_req: Request) -> Response {
    Response::redirect("/")
}

async fn registration(req: Request) -> Response {
    Response::text(format!("registrations: {} {}", req.method(), req.path()))
}

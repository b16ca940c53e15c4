//! Hello-world function

use axum::{routing::any, Router};

/// ANY /hello-world
async fn hello_world() -> &'static str {
    "Hello, World!\n"
}

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/hello-world", any(hello_world))
}

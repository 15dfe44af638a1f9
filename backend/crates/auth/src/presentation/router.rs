//! Auth Routers

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::domain::repository::UserRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_bearer_token;

/// `/signup`, `/signin`, and the gated `/user/dashboard`
pub fn auth_router<R>(state: AuthAppState<R>) -> Router
where
    R: UserRepository + Send + Sync + 'static,
{
    let gateway = state.gateway();

    Router::new()
        .route("/user/dashboard", get(handlers::dashboard::<R>))
        .route_layer(middleware::from_fn_with_state(gateway, require_bearer_token))
        .route("/signup", post(handlers::sign_up::<R>))
        .route("/signin", post(handlers::sign_in::<R>))
        .with_state(state)
}

/// `/users` CRUD (not gated)
pub fn users_router<R>(state: AuthAppState<R>) -> Router
where
    R: UserRepository + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/users",
            get(handlers::list_users::<R>).post(handlers::create_user::<R>),
        )
        .route(
            "/users/{id}",
            get(handlers::get_user::<R>)
                .put(handlers::update_user::<R>)
                .delete(handlers::delete_user::<R>),
        )
        .with_state(state)
}

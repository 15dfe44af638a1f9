//! Content Routers

use auth::{AuthGateway, require_bearer_token};
use axum::{Router, middleware, routing::get};

use crate::domain::entities::{Post, SocialAccount};
use crate::domain::repository::OwnedRepository;
use crate::presentation::dto::ResourceApi;
use crate::presentation::handlers::{self, ResourceState};

/// `{path}` and `{path}/{id}` for one resource type (not gated)
pub fn resource_router<E, R>(path: &str, repo: R) -> Router
where
    E: ResourceApi,
    R: OwnedRepository<E> + Send + Sync + 'static,
{
    Router::new()
        .route(
            path,
            get(handlers::list::<E, R>).post(handlers::create::<E, R>),
        )
        .route(
            &format!("{path}/{{id}}"),
            get(handlers::get::<E, R>)
                .put(handlers::update::<E, R>)
                .delete(handlers::delete::<E, R>),
        )
        .with_state(ResourceState::<E, R>::new(repo))
}

/// `/posts` and `/social_media_accounts`, all behind the bearer-token gateway
pub fn content_router<P, S>(posts: P, accounts: S, gateway: AuthGateway) -> Router
where
    P: OwnedRepository<Post> + Send + Sync + 'static,
    S: OwnedRepository<SocialAccount> + Send + Sync + 'static,
{
    Router::new()
        .merge(resource_router::<Post, P>("/posts", posts))
        .merge(resource_router::<SocialAccount, S>(
            "/social_media_accounts",
            accounts,
        ))
        .route_layer(middleware::from_fn_with_state(gateway, require_bearer_token))
}

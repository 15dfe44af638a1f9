//! HTTP Handlers
//!
//! One set of generic handlers serves every owned resource. The owner is
//! always the gateway's [`AuthenticatedUser`].

use std::sync::Arc;

use auth::AuthenticatedUser;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use kernel::error::app_error::AppError;

use crate::application::OwnedResourceService;
use crate::domain::repository::OwnedRepository;
use crate::domain::resource::ResourceId;
use crate::error::{ContentError, ContentResult, ContentResultExt};
use crate::presentation::dto::ResourceApi;

/// Shared state for one resource's routes
pub struct ResourceState<E, R>
where
    E: ResourceApi,
    R: OwnedRepository<E> + Send + Sync + 'static,
{
    pub service: Arc<OwnedResourceService<E, R>>,
}

impl<E, R> ResourceState<E, R>
where
    E: ResourceApi,
    R: OwnedRepository<E> + Send + Sync + 'static,
{
    pub fn new(repo: R) -> Self {
        Self {
            service: Arc::new(OwnedResourceService::new(
                Arc::new(repo),
                E::MESSAGES.not_found,
            )),
        }
    }
}

// Manual impl: `derive(Clone)` would demand `E: Clone` and `R: Clone`.
impl<E, R> Clone for ResourceState<E, R>
where
    E: ResourceApi,
    R: OwnedRepository<E> + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
        }
    }
}

/// Unparseable ids cannot name a resource
fn parse_id<E: ResourceApi>(raw: &str) -> ContentResult<ResourceId<E>> {
    raw.parse()
        .map_err(|_| ContentError::NotFound(E::MESSAGES.not_found))
}

/// GET /{resources}
pub async fn list<E, R>(
    State(state): State<ResourceState<E, R>>,
    Extension(current): Extension<AuthenticatedUser>,
) -> ContentResult<Json<Vec<E::Response>>>
where
    E: ResourceApi,
    R: OwnedRepository<E> + Send + Sync + 'static,
{
    let items = state
        .service
        .list(&current.user_id)
        .await
        .or_fail(E::MESSAGES.list_failed)?;

    Ok(Json(items.into_iter().map(E::Response::from).collect()))
}

/// GET /{resources}/{id}
pub async fn get<E, R>(
    State(state): State<ResourceState<E, R>>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> ContentResult<Json<E::Response>>
where
    E: ResourceApi,
    R: OwnedRepository<E> + Send + Sync + 'static,
{
    let id = parse_id::<E>(&id)?;

    let item = state
        .service
        .get(&current.user_id, &id)
        .await
        .or_fail(E::MESSAGES.fetch_failed)?;

    Ok(Json(E::Response::from(item)))
}

/// POST /{resources}
pub async fn create<E, R>(
    State(state): State<ResourceState<E, R>>,
    Extension(current): Extension<AuthenticatedUser>,
    payload: Result<Json<E::CreateRequest>, JsonRejection>,
) -> ContentResult<(StatusCode, Json<E::Response>)>
where
    E: ResourceApi,
    R: OwnedRepository<E> + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(AppError::from)?;
    let fields = E::fields(req)?;

    let item = state
        .service
        .create(&current.user_id, fields)
        .await
        .or_fail(E::MESSAGES.create_failed)?;

    Ok((StatusCode::CREATED, Json(E::Response::from(item))))
}

/// PUT /{resources}/{id}
pub async fn update<E, R>(
    State(state): State<ResourceState<E, R>>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    payload: Result<Json<E::UpdateRequest>, JsonRejection>,
) -> ContentResult<Json<E::Response>>
where
    E: ResourceApi,
    R: OwnedRepository<E> + Send + Sync + 'static,
{
    let id = parse_id::<E>(&id)?;
    let Json(req) = payload.map_err(AppError::from)?;
    let changes = E::changes(req)?;

    let item = state
        .service
        .update(&current.user_id, &id, changes)
        .await
        .or_fail(E::MESSAGES.update_failed)?;

    Ok(Json(E::Response::from(item)))
}

/// DELETE /{resources}/{id}
pub async fn delete<E, R>(
    State(state): State<ResourceState<E, R>>,
    Extension(current): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> ContentResult<StatusCode>
where
    E: ResourceApi,
    R: OwnedRepository<E> + Send + Sync + 'static,
{
    let id = parse_id::<E>(&id)?;

    state
        .service
        .delete(&current.user_id, &id)
        .await
        .or_fail(E::MESSAGES.delete_failed)?;

    Ok(StatusCode::NO_CONTENT)
}

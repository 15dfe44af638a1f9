//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use platform::token::TokenService;

use crate::application::config::AuthConfig;
use crate::application::{
    DashboardUseCase, ManageUsersUseCase, SignInInput, SignInUseCase, SignUpInput, SignUpUseCase,
    UpdateUserInput,
};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::UserId;
use crate::error::{AuthError, AuthResult, AuthResultExt};
use crate::AppError;
use crate::presentation::dto::{SignInRequest, TokenResponse, UserRequest, UserResponse};
use crate::presentation::middleware::{AuthGateway, AuthenticatedUser};

/// Shared state for auth handlers
pub struct AuthAppState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub tokens: Arc<TokenService>,
}

impl<R> AuthAppState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    /// Build state; the token service is derived from `config` once, here
    pub fn new(repo: R, config: AuthConfig) -> Self {
        let tokens = Arc::new(config.token_service());
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
            tokens,
        }
    }

    /// Gateway sharing this state's token service
    pub fn gateway(&self) -> AuthGateway {
        AuthGateway::new(self.tokens.clone())
    }
}

// Manual impl: `derive(Clone)` would demand `R: Clone`.
impl<R> Clone for AuthAppState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
            tokens: self.tokens.clone(),
        }
    }
}

/// Unparseable ids cannot name a user
fn parse_user_id(raw: &str) -> AuthResult<UserId> {
    raw.parse().map_err(|_| AuthError::UserNotFound)
}

async fn register<R>(state: &AuthAppState<R>, req: UserRequest) -> AuthResult<TokenResponse>
where
    R: UserRepository + Send + Sync + 'static,
{
    let use_case =
        SignUpUseCase::new(state.repo.clone(), state.config.clone(), state.tokens.clone());

    let output = use_case
        .execute(SignUpInput {
            user_name: req.username,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(TokenResponse::new(output.token))
}

// ============================================================================
// Sign Up / Sign In
// ============================================================================

/// POST /signup
pub async fn sign_up<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> AuthResult<Json<TokenResponse>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(AppError::from)?;

    let response = register(&state, req)
        .await
        .or_fail("Error signing up user.")?;

    Ok(Json(response))
}

/// POST /signin
pub async fn sign_in<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<SignInRequest>, JsonRejection>,
) -> AuthResult<Json<TokenResponse>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(AppError::from)?;

    let use_case =
        SignInUseCase::new(state.repo.clone(), state.config.clone(), state.tokens.clone());

    let output = use_case
        .execute(SignInInput {
            email: req.email,
            password: req.password,
        })
        .await
        .or_fail("Error signing in user.")?;

    Ok(Json(TokenResponse::new(output.token)))
}

// ============================================================================
// Dashboard (gated)
// ============================================================================

/// GET /user/dashboard
pub async fn dashboard<R>(
    State(state): State<AuthAppState<R>>,
    Extension(current): Extension<AuthenticatedUser>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let user = DashboardUseCase::new(state.repo.clone())
        .execute(&current.user_id)
        .await
        .or_fail("Error fetching user.")?;

    Ok(Json(UserResponse::from(user)))
}

// ============================================================================
// Users
// ============================================================================

/// GET /users
pub async fn list_users<R>(
    State(state): State<AuthAppState<R>>,
) -> AuthResult<Json<Vec<UserResponse>>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let users = ManageUsersUseCase::new(state.repo.clone(), state.config.clone())
        .list()
        .await
        .or_fail("Error fetching users.")?;

    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

/// GET /users/{id}
pub async fn get_user<R>(
    State(state): State<AuthAppState<R>>,
    Path(id): Path<String>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let user_id = parse_user_id(&id)?;

    let user = ManageUsersUseCase::new(state.repo.clone(), state.config.clone())
        .get(&user_id)
        .await
        .or_fail("Error fetching user.")?;

    Ok(Json(UserResponse::from(user)))
}

/// POST /users
pub async fn create_user<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> AuthResult<(StatusCode, Json<TokenResponse>)>
where
    R: UserRepository + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(AppError::from)?;
    let response = register(&state, req)
        .await
        .or_fail("Error creating user.")?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// PUT /users/{id}
pub async fn update_user<R>(
    State(state): State<AuthAppState<R>>,
    Path(id): Path<String>,
    payload: Result<Json<UserRequest>, JsonRejection>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let user_id = parse_user_id(&id)?;
    let Json(req) = payload.map_err(AppError::from)?;

    let input = UpdateUserInput {
        user_name: req.username,
        email: req.email,
        password: req.password,
    };

    let user = ManageUsersUseCase::new(state.repo.clone(), state.config.clone())
        .update(&user_id, input)
        .await
        .or_fail("Error updating user.")?;

    Ok(Json(UserResponse::from(user)))
}

/// DELETE /users/{id}
pub async fn delete_user<R>(
    State(state): State<AuthAppState<R>>,
    Path(id): Path<String>,
) -> AuthResult<StatusCode>
where
    R: UserRepository + Send + Sync + 'static,
{
    let user_id = parse_user_id(&id)?;

    ManageUsersUseCase::new(state.repo.clone(), state.config.clone())
        .delete(&user_id)
        .await
        .or_fail("Error deleting user.")?;

    Ok(StatusCode::NO_CONTENT)
}

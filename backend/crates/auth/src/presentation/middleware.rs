//! Auth Gateway Middleware
//!
//! Guards protected routes. The bearer token is verified before the handler
//! runs; on success the subject is placed in request extensions as
//! [`AuthenticatedUser`].
//!
//! ```rust,ignore
//! Router::new()
//!     .route("/posts", get(list_posts))
//!     .route_layer(axum::middleware::from_fn_with_state(gateway, require_bearer_token))
//! ```

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use platform::bearer::extract_bearer_token;
use platform::token::TokenService;

use crate::domain::value_object::UserId;
use crate::error::AuthError;

/// Middleware state: the shared token verifier
#[derive(Clone, Debug)]
pub struct AuthGateway {
    tokens: Arc<TokenService>,
}

impl AuthGateway {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }

    /// Resolve a raw header value to the user it names
    pub fn authenticate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let subject = self.tokens.verify(token).map_err(AuthError::TokenRejected)?;

        Ok(AuthenticatedUser {
            user_id: UserId::from_uuid(subject),
        })
    }
}

/// Identity established by the gateway, read by handlers via `Extension`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware that requires a valid bearer token
///
/// - no token: 403 `{auth: false, message: "No token provided."}`
/// - token not accepted: 500 `{auth: false, message: "Failed to authenticate token."}`
pub async fn require_bearer_token(
    State(gateway): State<AuthGateway>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let Some(token) = extract_bearer_token(req.headers()) else {
        return Err(AuthError::MissingToken);
    };

    let user = gateway.authenticate(&token)?;
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

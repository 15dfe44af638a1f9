//! API DTOs (Data Transfer Objects)
//!
//! Request bodies never carry an owner; an owner field sent by the client is
//! ignored by deserialization and the gateway's identity is used instead.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{NewPost, Post, PostChanges, SocialAccount, SocialAccountFields};
use crate::domain::resource::OwnedResource;
use crate::error::ContentResult;

/// Client-facing messages for one resource's routes
#[derive(Debug, Clone, Copy)]
pub struct Messages {
    pub not_found: &'static str,
    pub list_failed: &'static str,
    pub fetch_failed: &'static str,
    pub create_failed: &'static str,
    pub update_failed: &'static str,
    pub delete_failed: &'static str,
}

/// HTTP surface of an owned resource
pub trait ResourceApi: OwnedResource {
    type CreateRequest: DeserializeOwned + Send + 'static;
    type UpdateRequest: DeserializeOwned + Send + 'static;
    type Response: Serialize + From<Self> + Send + 'static;

    const MESSAGES: Messages;

    fn fields(req: Self::CreateRequest) -> ContentResult<Self::Fields>;

    fn changes(req: Self::UpdateRequest) -> ContentResult<Self::Changes>;
}

// ============================================================================
// Post
// ============================================================================

/// Body of `POST /posts` and `PUT /posts/{id}`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRequest {
    pub content: String,
    pub scheduled_at: DateTime<Utc>,
    #[serde(default)]
    pub is_published: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub scheduled_at: DateTime<Utc>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.post_id.into_uuid(),
            user_id: post.owner_id.into_uuid(),
            content: post.content,
            scheduled_at: post.scheduled_at,
            is_published: post.is_published,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

impl ResourceApi for Post {
    type CreateRequest = PostRequest;
    type UpdateRequest = PostRequest;
    type Response = PostResponse;

    const MESSAGES: Messages = Messages {
        not_found: "Post not found.",
        list_failed: "Error fetching posts.",
        fetch_failed: "Error fetching post.",
        create_failed: "Error creating post.",
        update_failed: "Error updating post.",
        delete_failed: "Error deleting post.",
    };

    fn fields(req: PostRequest) -> ContentResult<NewPost> {
        Ok(NewPost::new(req.content, req.scheduled_at, req.is_published)?)
    }

    fn changes(req: PostRequest) -> ContentResult<PostChanges> {
        Ok(PostChanges::new(req.content, req.scheduled_at, req.is_published)?)
    }
}

// ============================================================================
// Social Account
// ============================================================================

/// Body of `POST /social_media_accounts` and `PUT /social_media_accounts/{id}`
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialAccountRequest {
    pub platform: String,
    pub access_token: String,
}

impl std::fmt::Debug for SocialAccountRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SocialAccountRequest")
            .field("platform", &self.platform)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

/// The owner's own view; it includes the access token they linked
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialAccountResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub platform: String,
    pub access_token: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SocialAccount> for SocialAccountResponse {
    fn from(account: SocialAccount) -> Self {
        Self {
            id: account.account_id.into_uuid(),
            user_id: account.owner_id.into_uuid(),
            platform: account.platform,
            access_token: account.access_token.expose().to_string(),
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

impl ResourceApi for SocialAccount {
    type CreateRequest = SocialAccountRequest;
    type UpdateRequest = SocialAccountRequest;
    type Response = SocialAccountResponse;

    const MESSAGES: Messages = Messages {
        not_found: "Social media account not found.",
        list_failed: "Error fetching social media accounts.",
        fetch_failed: "Error fetching social media account.",
        create_failed: "Error adding social media account.",
        update_failed: "Error updating social media account.",
        delete_failed: "Error deleting social media account.",
    };

    fn fields(req: SocialAccountRequest) -> ContentResult<SocialAccountFields> {
        Ok(SocialAccountFields::new(req.platform, req.access_token)?)
    }

    fn changes(req: SocialAccountRequest) -> ContentResult<SocialAccountFields> {
        Self::fields(req)
    }
}

//! Domain Entities
//!
//! Scheduled posts and linked social accounts. Both belong to exactly one
//! user.

use chrono::{DateTime, Utc};
use kernel::error::app_error::AppResult;
use kernel::id::{PostId, SocialAccountId, UserId, markers};
use kernel::time::now;

use crate::domain::resource::{OwnedResource, ResourceId};
use crate::domain::value_objects::{AccessToken, required_text};

// ============================================================================
// Post
// ============================================================================

/// A post scheduled for publication
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub post_id: PostId,
    pub owner_id: UserId,
    pub content: String,
    pub scheduled_at: DateTime<Utc>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Attributes of a new post
#[derive(Debug)]
pub struct NewPost {
    content: String,
    scheduled_at: DateTime<Utc>,
    is_published: bool,
}

impl NewPost {
    pub fn new(
        content: String,
        scheduled_at: DateTime<Utc>,
        is_published: Option<bool>,
    ) -> AppResult<Self> {
        Ok(Self {
            content: required_text("Content", content)?,
            scheduled_at,
            is_published: is_published.unwrap_or(false),
        })
    }
}

/// Replacement attributes; an absent `is_published` keeps the current value
#[derive(Debug)]
pub struct PostChanges {
    content: String,
    scheduled_at: DateTime<Utc>,
    is_published: Option<bool>,
}

impl PostChanges {
    pub fn new(
        content: String,
        scheduled_at: DateTime<Utc>,
        is_published: Option<bool>,
    ) -> AppResult<Self> {
        Ok(Self {
            content: required_text("Content", content)?,
            scheduled_at,
            is_published,
        })
    }
}

impl OwnedResource for Post {
    type Marker = markers::Post;
    type Fields = NewPost;
    type Changes = PostChanges;

    const KIND: &'static str = "post";

    fn create(owner: UserId, fields: NewPost) -> Self {
        let timestamp = now();
        Self {
            post_id: PostId::new(),
            owner_id: owner,
            content: fields.content,
            scheduled_at: fields.scheduled_at,
            is_published: fields.is_published,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    fn apply(&mut self, changes: PostChanges) {
        self.content = changes.content;
        self.scheduled_at = changes.scheduled_at;
        if let Some(is_published) = changes.is_published {
            self.is_published = is_published;
        }
        self.updated_at = now();
    }

    fn id(&self) -> ResourceId<Self> {
        self.post_id
    }

    fn owner_id(&self) -> UserId {
        self.owner_id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

// ============================================================================
// Social Account
// ============================================================================

/// A social media account linked by its owner
#[derive(Debug, Clone, PartialEq)]
pub struct SocialAccount {
    pub account_id: SocialAccountId,
    pub owner_id: UserId,
    pub platform: String,
    pub access_token: AccessToken,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Attributes of a social account, for both linking and replacing
#[derive(Debug)]
pub struct SocialAccountFields {
    platform: String,
    access_token: AccessToken,
}

impl SocialAccountFields {
    pub fn new(platform: String, access_token: String) -> AppResult<Self> {
        Ok(Self {
            platform: required_text("Platform", platform)?,
            access_token: AccessToken::new(access_token)?,
        })
    }
}

impl OwnedResource for SocialAccount {
    type Marker = markers::SocialAccount;
    type Fields = SocialAccountFields;
    type Changes = SocialAccountFields;

    const KIND: &'static str = "social_media_account";

    fn create(owner: UserId, fields: SocialAccountFields) -> Self {
        let timestamp = now();
        Self {
            account_id: SocialAccountId::new(),
            owner_id: owner,
            platform: fields.platform,
            access_token: fields.access_token,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    fn apply(&mut self, changes: SocialAccountFields) {
        self.platform = changes.platform;
        self.access_token = changes.access_token;
        self.updated_at = now();
    }

    fn id(&self) -> ResourceId<Self> {
        self.account_id
    }

    fn owner_id(&self) -> UserId {
        self.owner_id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

//! PostgreSQL Repository Implementation
//!
//! A single generic repository. Each resource describes its table through
//! [`PgSchema`]; the owner-scoped statements are generated from that once,
//! when the repository is built.

use std::marker::PhantomData;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::{PostId, SocialAccountId, UserId};
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{FromRow, PgPool, Postgres};
use uuid::Uuid;

use crate::domain::entities::{Post, SocialAccount};
use crate::domain::repository::OwnedRepository;
use crate::domain::resource::{OwnedResource, ResourceId};
use crate::domain::value_objects::AccessToken;
use crate::error::ContentResult;

type PgQuery<'q> = Query<'q, Postgres, PgArguments>;

/// Table layout of an owned resource
///
/// Every table has `id`, `user_id`, `created_at` and `updated_at`; only the
/// resource's own columns are listed here.
pub trait PgSchema: OwnedResource {
    const TABLE: &'static str;

    /// Resource columns, in bind order
    const COLUMNS: &'static [&'static str];

    type Row: for<'r> FromRow<'r, PgRow> + Send + Unpin;

    fn from_row(row: Self::Row) -> Self;

    /// Bind values for [`Self::COLUMNS`], in order
    fn bind_columns<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q>;

    fn updated_at(&self) -> DateTime<Utc>;
}

/// Generated statements for one table
struct Statements {
    list: String,
    find: String,
    insert: String,
    update: String,
    delete: String,
}

impl Statements {
    fn for_schema<E: PgSchema>() -> Self {
        let table = E::TABLE;
        let columns = E::COLUMNS;
        let select = format!(
            "SELECT id, user_id, {}, created_at, updated_at FROM {}",
            columns.join(", "),
            table
        );

        // $1 id, $2 user_id, $3.. columns, then created_at, updated_at
        let placeholders: Vec<String> = (3..3 + columns.len()).map(|n| format!("${n}")).collect();
        let insert = format!(
            "INSERT INTO {} (id, user_id, {}, created_at, updated_at) VALUES ($1, $2, {}, ${}, ${})",
            table,
            columns.join(", "),
            placeholders.join(", "),
            3 + columns.len(),
            4 + columns.len()
        );

        // $1 id, $2 user_id, $3.. columns, then updated_at
        let assignments: Vec<String> = columns
            .iter()
            .enumerate()
            .map(|(i, column)| format!("{} = ${}", column, i + 3))
            .collect();
        let update = format!(
            "UPDATE {} SET {}, updated_at = ${} WHERE id = $1 AND user_id = $2",
            table,
            assignments.join(", "),
            3 + columns.len()
        );

        Self {
            list: format!("{select} WHERE user_id = $1 ORDER BY created_at, id"),
            find: format!("{select} WHERE id = $1 AND user_id = $2"),
            insert,
            update,
            delete: format!("DELETE FROM {table} WHERE id = $1 AND user_id = $2"),
        }
    }
}

/// PostgreSQL-backed owner-scoped repository
pub struct PgOwnedRepository<E> {
    pool: PgPool,
    sql: Arc<Statements>,
    _resource: PhantomData<fn() -> E>,
}

impl<E: PgSchema> PgOwnedRepository<E> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            sql: Arc::new(Statements::for_schema::<E>()),
            _resource: PhantomData,
        }
    }
}

impl<E> Clone for PgOwnedRepository<E> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            sql: self.sql.clone(),
            _resource: PhantomData,
        }
    }
}

impl<E: PgSchema> OwnedRepository<E> for PgOwnedRepository<E> {
    async fn list(&self, owner: &UserId) -> ContentResult<Vec<E>> {
        let rows = sqlx::query_as::<_, E::Row>(&self.sql.list)
            .bind(owner.as_uuid())
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(E::from_row).collect())
    }

    async fn find(&self, owner: &UserId, id: &ResourceId<E>) -> ContentResult<Option<E>> {
        let row = sqlx::query_as::<_, E::Row>(&self.sql.find)
            .bind(id.as_uuid())
            .bind(owner.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(E::from_row))
    }

    async fn insert(&self, resource: &E) -> ContentResult<()> {
        let query = sqlx::query(&self.sql.insert)
            .bind(resource.id().into_uuid())
            .bind(resource.owner_id().into_uuid());

        resource
            .bind_columns(query)
            .bind(resource.created_at())
            .bind(resource.updated_at())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn update(&self, resource: &E) -> ContentResult<bool> {
        let query = sqlx::query(&self.sql.update)
            .bind(resource.id().into_uuid())
            .bind(resource.owner_id().into_uuid());

        let updated = resource
            .bind_columns(query)
            .bind(resource.updated_at())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(updated > 0)
    }

    async fn delete(&self, owner: &UserId, id: &ResourceId<E>) -> ContentResult<bool> {
        let deleted = sqlx::query(&self.sql.delete)
            .bind(id.as_uuid())
            .bind(owner.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Schemas
// ============================================================================

#[derive(sqlx::FromRow)]
pub struct PostRow {
    id: Uuid,
    user_id: Uuid,
    content: String,
    scheduled_at: DateTime<Utc>,
    is_published: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PgSchema for Post {
    const TABLE: &'static str = "posts";
    const COLUMNS: &'static [&'static str] = &["content", "scheduled_at", "is_published"];

    type Row = PostRow;

    fn from_row(row: PostRow) -> Self {
        Self {
            post_id: PostId::from_uuid(row.id),
            owner_id: UserId::from_uuid(row.user_id),
            content: row.content,
            scheduled_at: row.scheduled_at,
            is_published: row.is_published,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }

    fn bind_columns<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(&self.content)
            .bind(self.scheduled_at)
            .bind(self.is_published)
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[derive(sqlx::FromRow)]
pub struct SocialAccountRow {
    id: Uuid,
    user_id: Uuid,
    platform: String,
    access_token: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PgSchema for SocialAccount {
    const TABLE: &'static str = "social_media_accounts";
    const COLUMNS: &'static [&'static str] = &["platform", "access_token"];

    type Row = SocialAccountRow;

    fn from_row(row: SocialAccountRow) -> Self {
        Self {
            account_id: SocialAccountId::from_uuid(row.id),
            owner_id: UserId::from_uuid(row.user_id),
            platform: row.platform,
            access_token: AccessToken::from_db(row.access_token),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }

    fn bind_columns<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(&self.platform)
            .bind(self.access_token.expose())
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

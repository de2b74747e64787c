use crate::models::{NewTopic, Post, PostFields, Topic, User};
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

/// Repository Trait
///
/// Abstract contract for all persistence operations. Handlers only ever see
/// this trait, which keeps them testable against an in-memory implementation
/// and keeps SQL out of the request path.
///
/// Field validation happens in the model layer before any of these methods
/// are called; the repository assumes its inputs already passed validation
/// and only surfaces infrastructure failures (`sqlx::Error`).
#[async_trait]
pub trait Repository: Send + Sync {
    // --- Topics ---
    async fn create_topic(&self, topic: NewTopic) -> Result<Topic, sqlx::Error>;
    async fn get_topic(&self, id: Uuid) -> Result<Option<Topic>, sqlx::Error>;
    async fn list_topics(&self) -> Result<Vec<Topic>, sqlx::Error>;
    /// A topic's posts in creation order (oldest first).
    async fn topic_posts(&self, topic_id: Uuid) -> Result<Vec<Post>, sqlx::Error>;
    async fn count_posts(&self, topic_id: Uuid) -> Result<i64, sqlx::Error>;

    // --- Posts ---
    /// Persists a new post authored by `user_id` under `topic_id`. Both
    /// foreign keys must reference existing rows; the schema enforces it.
    async fn create_post(
        &self,
        topic_id: Uuid,
        user_id: Uuid,
        fields: PostFields,
    ) -> Result<Post, sqlx::Error>;
    /// Fetches a post scoped to its topic, mirroring the nested route shape.
    async fn get_post(&self, topic_id: Uuid, post_id: Uuid) -> Result<Option<Post>, sqlx::Error>;
    async fn update_post(&self, id: Uuid, fields: PostFields) -> Result<Option<Post>, sqlx::Error>;
    /// Returns true when a row was actually removed.
    async fn delete_post(&self, id: Uuid) -> Result<bool, sqlx::Error>;

    // --- Users ---
    async fn create_user(
        &self,
        email: String,
        password_hash: String,
        role: String,
    ) -> Result<User, sqlx::Error>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error>;
    async fn get_user(&self, id: Uuid) -> Result<Option<User>, sqlx::Error>;
}

/// RepositoryState
///
/// The concrete type used to share the persistence layer across the
/// application state.
pub type RepositoryState = Arc<dyn Repository>;

/// PostgresRepository
///
/// `Repository` backed by the PostgreSQL pool.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for PostgresRepository {
    async fn create_topic(&self, topic: NewTopic) -> Result<Topic, sqlx::Error> {
        sqlx::query_as::<_, Topic>(
            r#"INSERT INTO topics (id, title, description)
               VALUES ($1, $2, $3)
               RETURNING id, title, description, created_at"#,
        )
        .bind(Uuid::new_v4())
        .bind(topic.title)
        .bind(topic.description)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_topic(&self, id: Uuid) -> Result<Option<Topic>, sqlx::Error> {
        sqlx::query_as::<_, Topic>(
            "SELECT id, title, description, created_at FROM topics WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn list_topics(&self) -> Result<Vec<Topic>, sqlx::Error> {
        sqlx::query_as::<_, Topic>(
            "SELECT id, title, description, created_at FROM topics ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn topic_posts(&self, topic_id: Uuid) -> Result<Vec<Post>, sqlx::Error> {
        sqlx::query_as::<_, Post>(
            r#"SELECT id, topic_id, user_id, title, body, created_at, updated_at
               FROM posts
               WHERE topic_id = $1
               ORDER BY created_at ASC"#,
        )
        .bind(topic_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn count_posts(&self, topic_id: Uuid) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts WHERE topic_id = $1")
            .bind(topic_id)
            .fetch_one(&self.pool)
            .await
    }

    async fn create_post(
        &self,
        topic_id: Uuid,
        user_id: Uuid,
        fields: PostFields,
    ) -> Result<Post, sqlx::Error> {
        sqlx::query_as::<_, Post>(
            r#"INSERT INTO posts (id, topic_id, user_id, title, body)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING id, topic_id, user_id, title, body, created_at, updated_at"#,
        )
        .bind(Uuid::new_v4())
        .bind(topic_id)
        .bind(user_id)
        .bind(fields.title)
        .bind(fields.body)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_post(&self, topic_id: Uuid, post_id: Uuid) -> Result<Option<Post>, sqlx::Error> {
        sqlx::query_as::<_, Post>(
            r#"SELECT id, topic_id, user_id, title, body, created_at, updated_at
               FROM posts
               WHERE id = $1 AND topic_id = $2"#,
        )
        .bind(post_id)
        .bind(topic_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn update_post(&self, id: Uuid, fields: PostFields) -> Result<Option<Post>, sqlx::Error> {
        sqlx::query_as::<_, Post>(
            r#"UPDATE posts
               SET title = $2, body = $3, updated_at = NOW()
               WHERE id = $1
               RETURNING id, topic_id, user_id, title, body, created_at, updated_at"#,
        )
        .bind(id)
        .bind(fields.title)
        .bind(fields.body)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_post(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn create_user(
        &self,
        email: String,
        password_hash: String,
        role: String,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"INSERT INTO users (id, email, password_hash, role)
               VALUES ($1, $2, $3, $4)
               RETURNING id, email, password_hash, role, created_at"#,
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .fetch_one(&self.pool)
        .await
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, role, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, role, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }
}

//! SQL post repository - hand-built statements per placeholder dialect.

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DbConn, DbErr, EntityTrait, Statement, Value};

use blog_core::domain::{NewPost, Post, PostChanges};
use blog_core::error::RepoError;
use blog_core::ports::PostRepository;

use super::dialect::Dialect;
use super::entity::post::Entity as PostEntity;

const SELECT_COLUMNS: &str = "SELECT id, title, content, author, created_at FROM posts";

/// Post repository backed by a SQL database.
///
/// The dialect is fixed at construction from the configured driver name.
pub struct SqlPostRepository {
    db: DbConn,
    dialect: Dialect,
}

impl SqlPostRepository {
    pub fn new(db: DbConn, driver: &str) -> Self {
        Self {
            db,
            dialect: Dialect::detect(driver),
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    #[cfg(test)]
    pub(crate) fn connection(&self) -> &DbConn {
        &self.db
    }

    #[cfg(test)]
    pub(crate) fn into_connection(self) -> DbConn {
        self.db
    }

    fn statement(&self, sql: String, values: Vec<Value>) -> Statement {
        Statement::from_sql_and_values(self.db.get_database_backend(), sql, values)
    }
}

/// Build `UPDATE posts SET ... WHERE id = ...` from the present fields, in
/// title, content, author order with the id bound last.
fn update_statement(dialect: Dialect, id: i64, changes: PostChanges) -> Option<(String, Vec<Value>)> {
    let mut sets = Vec::with_capacity(3);
    let mut values: Vec<Value> = Vec::with_capacity(4);

    let fields = [
        ("title", changes.title),
        ("content", changes.content),
        ("author", changes.author),
    ];
    for (column, value) in fields {
        if let Some(value) = value {
            values.push(value.into());
            sets.push(format!("{column} = {}", dialect.placeholder(values.len())));
        }
    }

    if sets.is_empty() {
        return None;
    }

    values.push(id.into());
    let sql = format!(
        "UPDATE posts SET {} WHERE id = {}",
        sets.join(", "),
        dialect.placeholder(values.len())
    );
    Some((sql, values))
}

fn map_db_err(err: DbErr) -> RepoError {
    match err {
        DbErr::Conn(e) => RepoError::Connection(e.to_string()),
        DbErr::ConnectionAcquire(e) => RepoError::Connection(e.to_string()),
        other => {
            let msg = other.to_string();
            if msg.contains("duplicate") || msg.contains("unique") || msg.contains("UNIQUE") {
                RepoError::Constraint(msg)
            } else {
                RepoError::Query(msg)
            }
        }
    }
}

#[async_trait]
impl PostRepository for SqlPostRepository {
    async fn create(&self, post: NewPost) -> Result<Post, RepoError> {
        let sql = format!(
            "INSERT INTO posts (title, content, author, created_at) VALUES ({})",
            self.dialect.placeholders(4)
        );
        let values: Vec<Value> = vec![
            post.title.clone().into(),
            post.content.clone().into(),
            post.author.clone().into(),
            post.created_at.into(),
        ];

        let id = match self.dialect {
            Dialect::Numbered => {
                let row = self
                    .db
                    .query_one(self.statement(format!("{sql} RETURNING id"), values))
                    .await
                    .map_err(map_db_err)?
                    .ok_or_else(|| RepoError::Query("insert returned no id".to_string()))?;
                row.try_get::<i64>("", "id").map_err(map_db_err)?
            }
            Dialect::Positional => {
                let result = self
                    .db
                    .execute(self.statement(sql, values))
                    .await
                    .map_err(map_db_err)?;
                i64::try_from(result.last_insert_id())
                    .map_err(|e| RepoError::Query(e.to_string()))?
            }
        };

        tracing::debug!(post_id = id, "Post inserted");
        Ok(post.into_post(id))
    }

    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        let stmt = self.statement(format!("{SELECT_COLUMNS} ORDER BY id"), Vec::new());
        let models = PostEntity::find()
            .from_raw_sql(stmt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Post, RepoError> {
        let stmt = self.statement(
            format!("{SELECT_COLUMNS} WHERE id = {}", self.dialect.placeholder(1)),
            vec![id.into()],
        );
        let model = PostEntity::find()
            .from_raw_sql(stmt)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        model.map(Into::into).ok_or(RepoError::NotFound)
    }

    async fn update(&self, id: i64, changes: PostChanges) -> Result<Post, RepoError> {
        let Some((sql, values)) = update_statement(self.dialect, id, changes) else {
            return self.find_by_id(id).await;
        };

        let result = self
            .db
            .execute(self.statement(sql, values))
            .await
            .map_err(map_db_err)?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }

        // Not atomic with the write: a delete landing in between surfaces as NotFound.
        self.find_by_id(id).await
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let stmt = self.statement(
            format!("DELETE FROM posts WHERE id = {}", self.dialect.placeholder(1)),
            vec![id.into()],
        );
        let result = self.db.execute(stmt).await.map_err(map_db_err)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }

        tracing::debug!(post_id = id, "Post deleted");
        Ok(())
    }
}

use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::{NewUser, User};

pub async fn create(pool: &SqlitePool, new: &NewUser) -> Result<User> {
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (username, email, first_name, last_name)
        VALUES (?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(&new.username)
    .bind(&new.email)
    .bind(&new.first_name)
    .bind(&new.last_name)
    .fetch_one(pool)
    .await?;

    log::debug!("created user {} ({})", user.id, user.username);
    Ok(user)
}

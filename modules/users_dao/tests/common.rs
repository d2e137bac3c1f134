#![allow(dead_code)]
use anyhow::Result;
use db::{ConnectOpts, DbHandle};
use sea_orm::{ConnectionTrait, DatabaseConnection};
use users_dao::{SqlUsersRepository, User, UserProfile};

pub const CREATE_USER_TABLE: &str = "CREATE TABLE user (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    login TEXT NOT NULL,
    password TEXT NOT NULL,
    user_name TEXT NOT NULL,
    email TEXT NOT NULL,
    profile_id INTEGER NOT NULL,
    profile_info TEXT NOT NULL,
    active BOOLEAN NOT NULL
)";

/// Fresh in-memory database with the `user` table in place.
pub async fn create_test_db() -> Result<DbHandle> {
    let db = DbHandle::connect("sqlite::memory:", ConnectOpts::default()).await?;
    db.seaorm().execute_unprepared(CREATE_USER_TABLE).await?;
    Ok(db)
}

pub async fn create_test_repo() -> Result<(DbHandle, SqlUsersRepository<DatabaseConnection>)> {
    let db = create_test_db().await?;
    let repo = SqlUsersRepository::from_db(&db);
    Ok((db, repo))
}

pub async fn count_rows(db: &DbHandle) -> Result<i64> {
    let conn = db.seaorm();
    let row = conn
        .query_one(sea_orm::Statement::from_string(
            conn.get_database_backend(),
            "SELECT COUNT(*) AS n FROM user",
        ))
        .await?
        .ok_or_else(|| anyhow::anyhow!("COUNT returned no row"))?;
    Ok(row.try_get("", "n")?)
}

pub fn alice() -> User {
    User::new(
        "abc",
        "123",
        "Alice",
        "a@x.com",
        true,
        UserProfile::new(1, "admin"),
    )
}

pub fn user(login: &str, user_name: &str) -> User {
    User::new(
        login,
        format!("{login}-pw"),
        user_name,
        format!("{login}@example.com"),
        true,
        UserProfile::new(2, "member"),
    )
}

//! SQL text for the `user` table, one fixed set of statements per dialect.
//!
//! Bind order is part of the contract:
//! `insert`: login, password, user_name, email, profile_id, profile_info, active.
//! `update`: the same seven, then id.

use sea_orm::DbBackend;

/// Statements used by the repository.
#[derive(Debug)]
pub struct Statements {
    pub insert: &'static str,
    pub update: &'static str,
    pub delete_by_id: &'static str,
    pub find_by_id: &'static str,
    pub find_all: &'static str,
    pub find_by_login: &'static str,
    /// `insert` yields the generated id as a result row instead of through
    /// the driver's last-insert id.
    pub insert_returns_id: bool,
}

/// SQLite and MySQL: `?` placeholders, key read back via last-insert id.
pub static QUESTION_MARK: Statements = Statements {
    insert: "INSERT INTO user (login, password, user_name, email, profile_id, profile_info, active) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
    update: "UPDATE user SET login = ?, password = ?, user_name = ?, email = ?, profile_id = ?, \
             profile_info = ?, active = ? WHERE id = ?",
    delete_by_id: "DELETE FROM user WHERE id = ?",
    find_by_id: "SELECT id, login, password, user_name, email, profile_id, profile_info, active \
                 FROM user WHERE id = ?",
    find_all: "SELECT id, login, password, user_name, email, profile_id, profile_info, active \
               FROM user ORDER BY user_name",
    find_by_login: "SELECT id, login, password, user_name, email, profile_id, profile_info, active \
                    FROM user WHERE login = ?",
    insert_returns_id: false,
};

/// PostgreSQL: numbered placeholders, `user` is reserved and must be quoted.
pub static POSTGRES: Statements = Statements {
    insert: "INSERT INTO \"user\" (login, password, user_name, email, profile_id, profile_info, active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING id",
    update: "UPDATE \"user\" SET login = $1, password = $2, user_name = $3, email = $4, \
             profile_id = $5, profile_info = $6, active = $7 WHERE id = $8",
    delete_by_id: "DELETE FROM \"user\" WHERE id = $1",
    find_by_id: "SELECT id, login, password, user_name, email, profile_id, profile_info, active \
                 FROM \"user\" WHERE id = $1",
    find_all: "SELECT id, login, password, user_name, email, profile_id, profile_info, active \
               FROM \"user\" ORDER BY user_name",
    find_by_login: "SELECT id, login, password, user_name, email, profile_id, profile_info, active \
                    FROM \"user\" WHERE login = $1",
    insert_returns_id: true,
};

pub fn statements_for(backend: DbBackend) -> &'static Statements {
    match backend {
        DbBackend::Postgres => &POSTGRES,
        // MySql, Sqlite
        _ => &QUESTION_MARK,
    }
}

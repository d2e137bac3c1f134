//! SQL-backed repository implementation for the domain ports.
//!
//! This struct is generic over `C: ConnectionTrait`, so you can construct it
//! with a `DatabaseConnection` **or** a transactional connection.
//! The connection is injected by the caller and never opened or closed here.
//! Every method runs exactly one parameterized statement; statement and row
//! handles live only for the duration of the call.
//!
//! Spans here never record the password, but SeaORM's own statement spans
//! do; build subscribers with [`db::logging::log_targets`].

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection, FromQueryResult, Statement, Value};
use tracing::{debug, instrument};

use crate::contract::{Result, User, UserDaoError};
use crate::domain::repo::{CrudDao, UsersRepository};
use crate::infra::storage::mapper::column_values;
use crate::infra::storage::sql::{statements_for, Statements};

/// Repository over the `user` table.
/// Holds a connection object; its lifetime/ownership is up to the caller.
pub struct SqlUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SqlUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }

    fn statements(&self) -> &'static Statements {
        statements_for(self.conn.get_database_backend())
    }

    fn statement(&self, sql: &str, values: Vec<Value>) -> Statement {
        Statement::from_sql_and_values(self.conn.get_database_backend(), sql, values)
    }

    async fn fetch_one(&self, sql: &str, values: Vec<Value>) -> Result<Option<User>> {
        let row = self.conn.query_one(self.statement(sql, values)).await?;
        row.map(|r| User::from_query_result(&r, ""))
            .transpose()
            .map_err(Into::into)
    }
}

impl SqlUsersRepository<DatabaseConnection> {
    /// Wire a repository to the connection held by a [`db::DbHandle`].
    pub fn from_db(handle: &db::DbHandle) -> Self {
        Self::new(handle.sea())
    }
}

fn generated_id(raw: u64) -> Result<i32> {
    i32::try_from(raw).map_err(|_| {
        UserDaoError::data_access(format!("generated key {raw} does not fit a user id"))
    })
}

#[async_trait]
impl<C> CrudDao<User> for SqlUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    #[instrument(name = "users_dao.repo.insert", skip_all, fields(login = %user.login))]
    async fn insert(&self, user: &mut User) -> Result<()> {
        if let Some(id) = user.id {
            return Err(UserDaoError::data_access(format!(
                "cannot insert user that already has id {id}"
            )));
        }

        let stmts = self.statements();
        let stmt = self.statement(stmts.insert, column_values(user));

        if stmts.insert_returns_id {
            if let Some(row) = self.conn.query_one(stmt).await? {
                let id: i32 = row.try_get("", "id")?;
                user.id = Some(id);
            }
        } else {
            let res = self.conn.execute(stmt).await?;
            if res.rows_affected() > 0 {
                user.id = Some(generated_id(res.last_insert_id())?);
            }
        }

        match user.id {
            Some(id) => debug!(user_id = id, "Inserted user"),
            None => debug!("Insert returned no generated key; id left unset"),
        }
        Ok(())
    }

    #[instrument(name = "users_dao.repo.update", skip_all, fields(user_id = ?user.id))]
    async fn update(&self, user: &User) -> Result<()> {
        let id = user
            .id
            .ok_or_else(|| UserDaoError::data_access("cannot update user without id"))?;

        let mut values = column_values(user);
        values.push(id.into());

        let res = self
            .conn
            .execute(self.statement(self.statements().update, values))
            .await?;
        debug!(rows_affected = res.rows_affected(), "Updated user");
        Ok(())
    }

    #[instrument(name = "users_dao.repo.delete_by_id", skip(self))]
    async fn delete_by_id(&self, id: i32) -> Result<()> {
        let res = self
            .conn
            .execute(self.statement(self.statements().delete_by_id, vec![id.into()]))
            .await?;
        debug!(rows_affected = res.rows_affected(), "Deleted user");
        Ok(())
    }

    #[instrument(name = "users_dao.repo.find_by_id", skip(self))]
    async fn find_by_id(&self, id: i32) -> Result<Option<User>> {
        let found = self
            .fetch_one(self.statements().find_by_id, vec![id.into()])
            .await?;
        debug!(found = found.is_some(), "Looked up user by id");
        Ok(found)
    }

    #[instrument(name = "users_dao.repo.find_all", skip(self))]
    async fn find_all(&self) -> Result<Vec<User>> {
        let rows = self
            .conn
            .query_all(self.statement(self.statements().find_all, Vec::new()))
            .await?;
        let users = rows
            .iter()
            .map(|r| User::from_query_result(r, ""))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        debug!(count = users.len(), "Listed users");
        Ok(users)
    }
}

#[async_trait]
impl<C> UsersRepository for SqlUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    #[instrument(name = "users_dao.repo.find_by_login", skip(self))]
    async fn find_by_login(&self, login: &str) -> Result<Option<User>> {
        let found = self
            .fetch_one(self.statements().find_by_login, vec![login.into()])
            .await?;
        debug!(found = found.is_some(), "Looked up user by login");
        Ok(found)
    }
}

use async_trait::async_trait;

use crate::contract::{Result, User};

/// Generic CRUD port over one entity type keyed by an integer id.
/// Object-safe and async-friendly via `async_trait`.
#[async_trait]
pub trait CrudDao<T>: Send + Sync
where
    T: Send + Sync,
{
    /// Persist a new entity and write the generated key back into it.
    async fn insert(&self, obj: &mut T) -> Result<()>;
    /// Overwrite the stored entity with the same id. Missing rows are not an error.
    async fn update(&self, obj: &T) -> Result<()>;
    /// Delete by id. Deleting an id that does not exist is a no-op.
    async fn delete_by_id(&self, id: i32) -> Result<()>;
    async fn find_by_id(&self, id: i32) -> Result<Option<T>>;
    async fn find_all(&self) -> Result<Vec<T>>;
}

/// Persistence operations for [`User`].
#[async_trait]
pub trait UsersRepository: CrudDao<User> {
    /// Look a user up by login.
    ///
    /// At most one user is returned. If several rows share the login, which
    /// one comes back is up to the database engine.
    async fn find_by_login(&self, login: &str) -> Result<Option<User>>;
}

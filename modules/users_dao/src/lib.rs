//! Data-access layer for `User` records stored in the `user` table.
//!
//! ```rust,no_run
//! # async fn run() -> anyhow::Result<()> {
//! use users_dao::{CrudDao, SqlUsersRepository, User, UserProfile, UsersRepository};
//!
//! let handle = db::DbHandle::connect("sqlite://data/users.db", db::ConnectOpts::default()).await?;
//! let repo = SqlUsersRepository::from_db(&handle);
//!
//! let mut user = User::new("abc", "123", "Alice", "a@x.com", true, UserProfile::new(1, "admin"));
//! repo.insert(&mut user).await?;
//! assert!(user.id.is_some());
//!
//! let same = repo.find_by_login("abc").await?;
//! assert_eq!(same.as_ref(), Some(&user));
//!
//! handle.close().await?;
//! # Ok(())
//! # }
//! ```

// === PUBLIC CONTRACT ===
pub mod contract;

pub use contract::{Result, User, UserDaoError, UserProfile};

// === PORTS ===
pub mod domain;

pub use domain::repo::{CrudDao, UsersRepository};

// === STORAGE ===
pub mod infra;

pub use infra::storage::SqlUsersRepository;

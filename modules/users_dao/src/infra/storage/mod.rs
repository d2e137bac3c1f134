pub mod mapper;
pub mod sql;
pub mod sql_repo;

pub use sql_repo::SqlUsersRepository;

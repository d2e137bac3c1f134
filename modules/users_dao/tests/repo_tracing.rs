//! Tests to verify that the repository emits expected tracing spans

mod common;

use std::{
    io::Write,
    sync::{Arc, Mutex},
};

use anyhow::Result;
use tracing::{level_filters::LevelFilter, subscriber::DefaultGuard};
use tracing_subscriber::{fmt, layer::SubscriberExt};
use users_dao::{CrudDao, UsersRepository};

use common::{alice, create_test_repo};

/// In-memory log sink shared between the subscriber and the test body.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contains(&self, needle: &str) -> bool {
        let buf = self.0.lock().unwrap();
        String::from_utf8_lossy(&buf).contains(needle)
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> fmt::MakeWriter<'a> for CapturedLogs {
    type Writer = Self;
    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Everything at TRACE, drivers capped the way deployments configure them.
fn capture_logs() -> (CapturedLogs, DefaultGuard) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(logs.clone()).with_ansi(false))
        .with(db::logging::log_targets(LevelFilter::TRACE));
    let guard = tracing::subscriber::set_default(subscriber);
    (logs, guard)
}

#[tokio::test]
async fn insert_and_lookups_emit_spans() -> Result<()> {
    let (logs, _guard) = capture_logs();
    let (_db, repo) = create_test_repo().await?;

    let mut u = alice();
    u.password = "do-not-log-me".to_string();
    repo.insert(&mut u).await?;
    repo.find_by_login("abc").await?;
    repo.find_all().await?;

    assert!(logs.contains("users_dao.repo.insert"));
    assert!(logs.contains("Inserted user"));
    assert!(logs.contains("users_dao.repo.find_by_login"));
    assert!(logs.contains("users_dao.repo.find_all"));
    assert!(logs.contains("Opened database connection"));
    assert!(!logs.contains("do-not-log-me"));
    Ok(())
}

#[tokio::test]
async fn updated_password_stays_out_of_logs() -> Result<()> {
    let (logs, _guard) = capture_logs();
    let (_db, repo) = create_test_repo().await?;

    let mut u = alice();
    repo.insert(&mut u).await?;
    u.password = "rotated-secret".to_string();
    repo.update(&u).await?;

    assert!(logs.contains("users_dao.repo.update"));
    assert!(logs.contains("Updated user"));
    assert!(!logs.contains("rotated-secret"));
    Ok(())
}

#[tokio::test]
async fn zero_row_writes_are_logged_not_failed() -> Result<()> {
    let (logs, _guard) = capture_logs();
    let (_db, repo) = create_test_repo().await?;

    let mut ghost = alice();
    ghost.id = Some(77);
    repo.update(&ghost).await?;
    repo.delete_by_id(77).await?;

    assert!(logs.contains("users_dao.repo.update"));
    assert!(logs.contains("users_dao.repo.delete_by_id"));
    assert!(logs.contains("rows_affected=0"));
    Ok(())
}

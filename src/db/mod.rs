pub mod repository;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::SqlitePool;
use tokio::sync::watch;
use tracing::info;

use crate::error::EditorError;
use crate::models::{Course, NewCourseRequest};

/// Destination for committed course edits.
#[async_trait]
pub trait CourseSink: Send + Sync {
    async fn save(&self, id: &str, course: Course) -> Result<(), EditorError>;
}

/// SQLite-backed course store.
///
/// Publishes the full course list on a watch channel after every write, so
/// editors always see the latest snapshot.
pub struct SqliteCourseStore {
    db: SqlitePool,
    feed: watch::Sender<Arc<Vec<Course>>>,
}

impl SqliteCourseStore {
    pub async fn open(db: SqlitePool) -> Result<Self, EditorError> {
        sqlx::migrate!("./migrations").run(&db).await?;
        let courses = repository::fetch_courses(&db).await?;
        let (feed, _) = watch::channel(Arc::new(courses));
        Ok(Self { db, feed })
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<Course>>> {
        self.feed.subscribe()
    }

    pub fn courses(&self) -> Arc<Vec<Course>> {
        self.feed.borrow().clone()
    }

    pub async fn find(&self, id: &str) -> Result<Option<Course>, EditorError> {
        repository::find_course_by_id(&self.db, id).await
    }

    pub async fn create(&self, req: NewCourseRequest) -> Result<Course, EditorError> {
        let course = repository::insert_course(&self.db, req).await?;
        self.publish().await?;
        Ok(course)
    }

    pub async fn ping(&self) -> Result<(), EditorError> {
        sqlx::query("select 1").execute(&self.db).await?;
        Ok(())
    }

    async fn publish(&self) -> Result<(), EditorError> {
        let courses = repository::fetch_courses(&self.db).await?;
        self.feed.send_replace(Arc::new(courses));
        Ok(())
    }
}

#[async_trait]
impl CourseSink for SqliteCourseStore {
    async fn save(&self, id: &str, course: Course) -> Result<(), EditorError> {
        repository::upsert_course(&self.db, &course).await?;
        info!("saved course {}", id);
        self.publish().await
    }
}

#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test db");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

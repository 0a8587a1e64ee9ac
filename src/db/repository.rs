use chrono::Utc;
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::error::EditorError;
use crate::models::{Course, NewCourseRequest};

#[derive(Debug, FromRow)]
struct CourseRow {
    id: String,
    body: String,
}

impl CourseRow {
    fn into_course(self) -> Result<Course, EditorError> {
        let mut course: Course = serde_json::from_str(&self.body)?;
        course.id = self.id;
        Ok(course)
    }
}

pub async fn fetch_courses(db: &SqlitePool) -> Result<Vec<Course>, EditorError> {
    sqlx::query_as::<_, CourseRow>("SELECT id, body FROM courses ORDER BY name, id")
        .fetch_all(db)
        .await?
        .into_iter()
        .map(CourseRow::into_course)
        .collect()
}

pub async fn find_course_by_id(db: &SqlitePool, id: &str) -> Result<Option<Course>, EditorError> {
    sqlx::query_as::<_, CourseRow>("SELECT id, body FROM courses WHERE id = ?")
        .bind(id)
        .fetch_optional(db)
        .await?
        .map(CourseRow::into_course)
        .transpose()
}

pub async fn insert_course(db: &SqlitePool, req: NewCourseRequest) -> Result<Course, EditorError> {
    let course = Course::from_request(Uuid::new_v4().to_string(), req);
    upsert_course(db, &course).await?;
    Ok(course)
}

pub async fn upsert_course(db: &SqlitePool, course: &Course) -> Result<(), EditorError> {
    let body = serde_json::to_string(course)?;
    let now = Utc::now().to_rfc3339();

    sqlx::query(
        r#"
        INSERT INTO courses (id, name, body, updated_at)
        VALUES (?1, ?2, ?3, ?4)
        ON CONFLICT(id) DO UPDATE SET
            name = excluded.name,
            body = excluded.body,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(&course.id)
    .bind(&course.name)
    .bind(body)
    .bind(now)
    .execute(db)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use crate::models::{Person, Plan};

    fn request(name: &str) -> NewCourseRequest {
        NewCourseRequest {
            name: name.to_string(),
            description: "desc".to_string(),
            author: Person {
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn test_insert_and_fetch_course() {
        let pool = test_pool().await;

        let course = insert_course(&pool, request("Rust"))
            .await
            .expect("Failed to insert course");
        assert!(course.plans.is_empty());

        let courses = fetch_courses(&pool).await.expect("Failed to fetch courses");
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0], course);
    }

    #[tokio::test]
    async fn test_upsert_overwrites_existing_course() {
        let pool = test_pool().await;
        let mut course = insert_course(&pool, request("Rust"))
            .await
            .expect("Failed to insert course");

        course.name = "Rust 2".to_string();
        course.plans.push(Plan {
            name: "Pro".to_string(),
            price: 30.0,
            advantages: vec![],
        });
        upsert_course(&pool, &course)
            .await
            .expect("Failed to upsert course");

        let found = find_course_by_id(&pool, &course.id)
            .await
            .expect("Failed to find course")
            .expect("Course not found");
        assert_eq!(found, course);
        assert_eq!(fetch_courses(&pool).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_find_missing_course() {
        let pool = test_pool().await;
        let found = find_course_by_id(&pool, "nope").await.unwrap();
        assert!(found.is_none());
    }
}

use std::str::FromStr;
use std::sync::Arc;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use course_editor::api::router;
use course_editor::config::EditorConfig;
use course_editor::db::{CourseSink, SqliteCourseStore};
use course_editor::services::CourseEditor;
use course_editor::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "course_editor=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = EditorConfig::new_from_env()?;

    let options = SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    let store = Arc::new(SqliteCourseStore::open(pool).await?);
    let (route, routes) = watch::channel(None);
    let sink: Arc<dyn CourseSink> = store.clone();
    let editor = CourseEditor::start(sink, config.quiet_period, routes, store.subscribe());

    let state = AppState {
        store,
        editor: Arc::new(editor),
        route: Arc::new(route),
    };

    let app = router(state);

    info!("listening on http://{}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

use std::sync::Arc;

use tokio::sync::watch;

use crate::db::SqliteCourseStore;
use crate::services::CourseEditor;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SqliteCourseStore>,
    pub editor: Arc<CourseEditor>,
    pub route: Arc<watch::Sender<Option<String>>>,
}

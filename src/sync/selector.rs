use std::sync::Arc;

use tracing::debug;

use crate::models::Course;

/// Joins the latest route id with the latest course snapshot.
///
/// Nothing is selected until both sources have reported at least once.
/// Each update re-evaluates the pair and yields the course whose id matches
/// the route, or `None` when there is no such course.
#[derive(Debug, Default)]
pub struct EntitySelector {
    route_id: Option<String>,
    courses: Option<Arc<Vec<Course>>>,
}

impl EntitySelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_route(&mut self, route_id: Option<String>) -> Option<Course> {
        self.route_id = route_id;
        self.select()
    }

    pub fn on_courses(&mut self, courses: Arc<Vec<Course>>) -> Option<Course> {
        self.courses = Some(courses);
        self.select()
    }

    fn select(&self) -> Option<Course> {
        let (route_id, courses) = (self.route_id.as_deref()?, self.courses.as_ref()?);
        let found = courses.iter().find(|course| course.id == route_id).cloned();
        if found.is_none() {
            debug!("no course matches route id {}", route_id);
        }
        found
    }
}

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::{oneshot, watch};
use tracing::info;

use crate::db::CourseSink;
use crate::models::Course;
use crate::sync::engine::FormSyncEngine;
use crate::sync::selector::EntitySelector;
use crate::sync::subscription::{self, Subscription};

/// Course editor bound to a route and a course feed.
///
/// Holds two subscriptions: the selection listener that mounts the course
/// matching the route, and (inside the engine) the debounced form listener.
/// Teardown releases them in reverse order, and runs on drop.
pub struct CourseEditor {
    engine: Arc<Mutex<FormSyncEngine>>,
    selection: Option<Subscription>,
}

impl CourseEditor {
    /// Starts listening. Must be called from within a tokio runtime.
    pub fn start(
        sink: Arc<dyn CourseSink>,
        quiet_period: Duration,
        routes: watch::Receiver<Option<String>>,
        courses: watch::Receiver<Arc<Vec<Course>>>,
    ) -> Self {
        let engine = Arc::new(Mutex::new(FormSyncEngine::new(sink, quiet_period)));
        let selection = Subscription::spawn({
            let engine = engine.clone();
            move |cancelled| run_selection(engine, routes, courses, cancelled)
        });

        Self {
            engine,
            selection: Some(selection),
        }
    }

    /// Runs `f` against the engine. Do not hold on to anything across awaits.
    pub fn with_engine<R>(&self, f: impl FnOnce(&mut FormSyncEngine) -> R) -> R {
        f(&mut lock(&self.engine))
    }

    /// Releases the form listener, then the selection listener.
    ///
    /// The engine stays locked until both are gone, so a selection that is
    /// already waiting on the lock finds a released engine and mounts nothing.
    pub fn teardown(&mut self) {
        let mut engine = lock(&self.engine);
        engine.release();
        if self.selection.is_some() {
            info!("course editor torn down");
        }
        subscription::release(&mut self.selection);
        drop(engine);
    }
}

impl Drop for CourseEditor {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn lock(engine: &Mutex<FormSyncEngine>) -> MutexGuard<'_, FormSyncEngine> {
    engine.lock().unwrap_or_else(PoisonError::into_inner)
}

async fn run_selection(
    engine: Arc<Mutex<FormSyncEngine>>,
    mut routes: watch::Receiver<Option<String>>,
    mut courses: watch::Receiver<Arc<Vec<Course>>>,
    mut cancelled: oneshot::Receiver<()>,
) {
    let mut selector = EntitySelector::new();
    // Current values count as the first emission of each source.
    routes.mark_changed();
    courses.mark_changed();

    let (mut routes_open, mut courses_open) = (true, true);
    while routes_open || courses_open {
        let picked = tokio::select! {
            biased;
            _ = &mut cancelled => break,
            changed = routes.changed(), if routes_open => match changed {
                Ok(()) => selector.on_route(routes.borrow_and_update().clone()),
                Err(_) => {
                    routes_open = false;
                    None
                }
            },
            changed = courses.changed(), if courses_open => match changed {
                Ok(()) => selector.on_courses(courses.borrow_and_update().clone()),
                Err(_) => {
                    courses_open = false;
                    None
                }
            },
        };

        if let Some(course) = picked {
            lock(&engine).rebuild(&course);
        }
    }
}

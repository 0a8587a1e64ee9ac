use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::db::CourseSink;
use crate::error::EditorError;
use crate::form::FormTree;
use crate::models::Course;
use crate::sync::course_form::{self, COAUTHORS, CONTENTS, PLANS};
use crate::sync::debounce::debounce;
use crate::sync::subscription::{self, Subscription};

pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(1000);

/// Owns the live course form and writes settled edits back to the sink.
pub struct FormSyncEngine {
    sink: Arc<dyn CourseSink>,
    quiet_period: Duration,
    current_id: Option<String>,
    form: Option<FormTree>,
    form_sub: Option<Subscription>,
    released: bool,
}

impl FormSyncEngine {
    pub fn new(sink: Arc<dyn CourseSink>, quiet_period: Duration) -> Self {
        Self {
            sink,
            quiet_period,
            current_id: None,
            form: None,
            form_sub: None,
            released: false,
        }
    }

    pub fn current_id(&self) -> Option<&str> {
        self.current_id.as_deref()
    }

    pub fn form(&self) -> Option<&FormTree> {
        self.form.as_ref()
    }

    /// Replaces the mounted form with one built from `course`.
    ///
    /// The previous change listener is released before the new one is
    /// attached, so edits still waiting on the old form are never committed.
    /// Once the engine is released this is a no-op. Must be called from
    /// within a tokio runtime.
    pub fn rebuild(&mut self, course: &Course) {
        if self.released {
            debug!("engine released, not mounting course {}", course.id);
            return;
        }
        self.current_id = Some(course.id.clone());
        let mut form = FormTree::new(course_form::build_form(course));

        subscription::release(&mut self.form_sub);

        let changes = form.value_changes();
        let sink = self.sink.clone();
        let id = course.id.clone();
        self.form_sub = Some(debounce(changes, self.quiet_period, move |value| {
            commit(sink.clone(), id.clone(), value)
        }));
        self.form = Some(form);

        info!("mounted course form for {}", course.id);
    }

    /// Releases the change listener for good. The form itself stays readable.
    pub fn release(&mut self) {
        self.released = true;
        subscription::release(&mut self.form_sub);
    }

    pub fn set_field(&mut self, path: &str, value: Value) -> Result<(), EditorError> {
        self.form_mut()?.set_value(path, value)
    }

    pub fn add_plan(&mut self) -> Result<usize, EditorError> {
        self.form_mut()?.push(PLANS, course_form::new_plan())
    }

    pub fn add_advantage(&mut self, plan_index: usize) -> Result<usize, EditorError> {
        let form = self.form_mut()?;
        let len = form.len_of(PLANS)?;
        if plan_index >= len {
            return Err(EditorError::PlanIndexOutOfRange {
                index: plan_index,
                len,
            });
        }
        form.push(&course_form::advantages_path(plan_index), course_form::new_advantage())
    }

    pub fn add_content_item(&mut self) -> Result<usize, EditorError> {
        self.form_mut()?.push(CONTENTS, course_form::new_contents_item())
    }

    pub fn add_coauthor(&mut self) -> Result<usize, EditorError> {
        self.form_mut()?.push(COAUTHORS, course_form::new_coauthor())
    }

    /// Course currently represented by the mounted form.
    pub fn snapshot(&self) -> Result<Course, EditorError> {
        let (id, form) = self
            .current_id
            .as_deref()
            .zip(self.form.as_ref())
            .ok_or(EditorError::NoFormMounted)?;
        course_form::compose_course(id, &form.value())
    }

    fn form_mut(&mut self) -> Result<&mut FormTree, EditorError> {
        self.form.as_mut().ok_or(EditorError::NoFormMounted)
    }
}

impl Drop for FormSyncEngine {
    fn drop(&mut self) {
        self.release();
    }
}

async fn commit(sink: Arc<dyn CourseSink>, id: String, value: Value) {
    let course = match course_form::compose_course(&id, &value) {
        Ok(course) => course,
        Err(e) => {
            warn!("skipping commit for {}: {}", id, e);
            return;
        }
    };

    debug!("committing course {}", id);
    if let Err(e) = sink.save(&id, course).await {
        warn!("saving course {} failed: {:?}", id, e);
    }
}

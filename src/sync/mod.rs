//! Keeps the course edit form in step with the selected course.
//!
//! [`selector::EntitySelector`] picks the course matching the current route;
//! [`engine::FormSyncEngine`] mounts a form for it and writes settled edits
//! back after a quiet period.

pub mod course_form;
pub mod datetime;
pub mod debounce;
pub mod engine;
pub mod selector;
pub mod subscription;

pub use engine::{DEFAULT_QUIET_PERIOD, FormSyncEngine};
pub use selector::EntitySelector;
pub use subscription::Subscription;

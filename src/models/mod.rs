pub mod course;

pub use course::{
    Advantage, ContentsItem, ContentsItemType, Course, Duration, DurationUnit, NewCourseRequest,
    Person, Plan, Sales,
};

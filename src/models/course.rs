use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationUnit {
    Minute,
    Hour,
    Day,
    Week,
    Month,
}

/// Kind of a content entry. Every variant shares the same record shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentsItemType {
    Lesson,
    Video,
    Quiz,
    Assignment,
}

/// A magnitude paired with its unit. Both halves are `None` when the
/// duration was never filled in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Duration {
    pub unit: Option<DurationUnit>,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentsItem {
    #[serde(rename = "type")]
    pub kind: ContentsItemType,
    pub name: String,
    #[serde(default)]
    pub duration: Duration,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Advantage {
    pub available: bool,
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub advantages: Vec<Advantage>,
}

/// Optional sale window, in local wall-clock time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sales {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub name: String,
    pub description: String,
    pub author: Person,
    #[serde(default)]
    pub coauthors: Vec<Person>,
    #[serde(default)]
    pub duration: Duration,
    #[serde(default)]
    pub contents: Vec<ContentsItem>,
    #[serde(default)]
    pub plans: Vec<Plan>,
    #[serde(default)]
    pub sales: Sales,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourseRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub author: Person,
}

impl Course {
    pub fn from_request(id: String, req: NewCourseRequest) -> Self {
        Self {
            id,
            name: req.name,
            description: req.description,
            author: req.author,
            coauthors: Vec::new(),
            duration: Duration::default(),
            contents: Vec::new(),
            plans: Vec::new(),
            sales: Sales::default(),
        }
    }
}

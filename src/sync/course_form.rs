//! Mapping between a [`Course`] and the shape of its edit form.

use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::EditorError;
use crate::form::FormNode;
use crate::models::{
    Advantage, ContentsItem, ContentsItemType, Course, Duration, DurationUnit, Person, Plan, Sales,
};
use crate::sync::datetime;

pub const PLANS: &str = "plans";
pub const CONTENTS: &str = "contents";
pub const COAUTHORS: &str = "coauthors";

/// Builds a fresh form whose shape and values mirror `course`.
pub fn build_form(course: &Course) -> FormNode {
    let (start_date, start_time) = datetime::decompose(course.sales.start);
    let (end_date, end_time) = datetime::decompose(course.sales.end);

    FormNode::group([
        ("name", FormNode::control(course.name.as_str())),
        ("description", FormNode::control(course.description.as_str())),
        ("author", person_group(&course.author)),
        (
            "sales",
            FormNode::group([
                ("startDate", FormNode::Control(start_date)),
                ("startTime", FormNode::Control(start_time)),
                ("endDate", FormNode::Control(end_date)),
                ("endTime", FormNode::Control(end_time)),
            ]),
        ),
        (PLANS, FormNode::array(course.plans.iter().map(plan_group))),
        (
            CONTENTS,
            FormNode::array(course.contents.iter().map(contents_group)),
        ),
        ("duration", duration_group(&course.duration)),
        (
            COAUTHORS,
            FormNode::array(course.coauthors.iter().map(person_group)),
        ),
    ])
}

/// Form entry appended by "add plan": one blank advantage, zero price.
pub fn new_plan() -> FormNode {
    plan_group(&Plan {
        name: String::new(),
        price: 0.0,
        advantages: vec![Advantage::default()],
    })
}

pub fn new_advantage() -> FormNode {
    advantage_group(&Advantage::default())
}

pub fn new_contents_item() -> FormNode {
    contents_group(&ContentsItem {
        kind: ContentsItemType::Lesson,
        name: String::new(),
        duration: Duration {
            unit: Some(DurationUnit::Day),
            value: Some(0.0),
        },
    })
}

pub fn new_coauthor() -> FormNode {
    person_group(&Person::default())
}

pub fn advantages_path(plan_index: usize) -> String {
    format!("{PLANS}.{plan_index}.advantages")
}

/// Derives the course record represented by a form value.
///
/// A field that does not decode is reported with its dotted form path.
pub fn compose_course(id: &str, value: &Value) -> Result<Course, EditorError> {
    let sales = at(value, "sales");

    Ok(Course {
        id: id.to_string(),
        name: decode(at(value, "name"), "name")?,
        description: decode(at(value, "description"), "description")?,
        author: decode(at(value, "author"), "author")?,
        coauthors: each(at(value, COAUTHORS), COAUTHORS, decode)?,
        duration: decode::<Option<Duration>>(at(value, "duration"), "duration")?.unwrap_or_default(),
        contents: each(at(value, CONTENTS), CONTENTS, decode)?,
        plans: each(at(value, PLANS), PLANS, |plan, path| {
            Ok(Plan {
                name: decode(at(plan, "name"), &format!("{path}.name"))?,
                price: decode(at(plan, "price"), &format!("{path}.price"))?,
                advantages: each(at(plan, "advantages"), &format!("{path}.advantages"), decode)?,
            })
        })?,
        sales: Sales {
            start: datetime::recompose(at(sales, "startDate"), at(sales, "startTime")),
            end: datetime::recompose(at(sales, "endDate"), at(sales, "endTime")),
        },
    })
}

fn at<'a>(value: &'a Value, key: &str) -> &'a Value {
    value.get(key).unwrap_or(&Value::Null)
}

fn decode<T: DeserializeOwned>(value: &Value, path: &str) -> Result<T, EditorError> {
    T::deserialize(value).map_err(|source| EditorError::InvalidField {
        path: path.to_string(),
        source,
    })
}

/// Decodes every element of an array field; an absent field is empty.
fn each<T>(
    value: &Value,
    path: &str,
    item: impl Fn(&Value, &str) -> Result<T, EditorError>,
) -> Result<Vec<T>, EditorError> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, element)| item(element, &format!("{path}.{i}")))
            .collect(),
        other => Err(EditorError::InvalidField {
            path: path.to_string(),
            source: de::Error::custom(format!("expected an array, found {other}")),
        }),
    }
}

fn person_group(person: &Person) -> FormNode {
    FormNode::group([
        ("firstName", FormNode::control(person.first_name.as_str())),
        ("lastName", FormNode::control(person.last_name.as_str())),
    ])
}

fn plan_group(plan: &Plan) -> FormNode {
    FormNode::group([
        ("name", FormNode::control(plan.name.as_str())),
        ("price", FormNode::control(plan.price)),
        (
            "advantages",
            FormNode::array(plan.advantages.iter().map(advantage_group)),
        ),
    ])
}

fn advantage_group(advantage: &Advantage) -> FormNode {
    FormNode::group([
        ("available", FormNode::control(advantage.available)),
        ("title", FormNode::control(advantage.title.as_str())),
    ])
}

fn contents_group(item: &ContentsItem) -> FormNode {
    FormNode::group([
        ("type", FormNode::Control(tag(&item.kind))),
        ("duration", duration_group(&item.duration)),
        ("name", FormNode::control(item.name.as_str())),
    ])
}

fn duration_group(duration: &Duration) -> FormNode {
    FormNode::group([
        ("unit", FormNode::Control(tag(&duration.unit))),
        ("value", FormNode::control(duration.value)),
    ])
}

fn tag<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn course() -> Course {
        Course {
            id: "c-1".to_string(),
            name: "Rust in Practice".to_string(),
            description: "Ownership first".to_string(),
            author: Person {
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
            },
            coauthors: vec![Person {
                first_name: "Alan".to_string(),
                last_name: "Turing".to_string(),
            }],
            duration: Duration {
                unit: Some(DurationUnit::Week),
                value: Some(6.0),
            },
            contents: vec![ContentsItem {
                kind: ContentsItemType::Video,
                name: "Borrowing".to_string(),
                duration: Duration::default(),
            }],
            plans: vec![
                Plan {
                    name: "Basic".to_string(),
                    price: 10.0,
                    advantages: vec![],
                },
                Plan {
                    name: "Pro".to_string(),
                    price: 25.5,
                    advantages: vec![
                        Advantage {
                            available: true,
                            title: "Videos".to_string(),
                        },
                        Advantage {
                            available: false,
                            title: "Mentor".to_string(),
                        },
                    ],
                },
            ],
            sales: Sales {
                start: NaiveDate::from_ymd_opt(2024, 3, 10)
                    .and_then(|d| d.and_hms_opt(14, 30, 0)),
                end: None,
            },
        }
    }

    #[test]
    fn test_build_form_mirrors_course_shape() {
        let value = build_form(&course()).value();

        assert_eq!(value["name"], json!("Rust in Practice"));
        assert_eq!(value["author"], json!({ "firstName": "Ada", "lastName": "Lovelace" }));
        assert_eq!(value["plans"][0]["advantages"], json!([]));
        assert_eq!(value["plans"][1]["advantages"][1]["title"], json!("Mentor"));
        assert_eq!(value["contents"][0]["type"], json!("video"));
        assert_eq!(value["contents"][0]["duration"], json!({ "unit": null, "value": null }));
        assert_eq!(value["duration"], json!({ "unit": "week", "value": 6.0 }));
        assert_eq!(value["coauthors"].as_array().map(Vec::len), Some(1));
        assert_eq!(
            value["sales"],
            json!({
                "startDate": "2024-03-10",
                "startTime": "14:30:00",
                "endDate": null,
                "endTime": null
            })
        );
    }

    #[test]
    fn test_compose_course_reverses_build_form() {
        let original = course();
        let value = build_form(&original).value();
        let composed = compose_course(&original.id, &value).unwrap();
        assert_eq!(composed, original);
    }

    #[test]
    fn test_compose_course_drops_malformed_sales_but_keeps_the_rest() {
        let mut value = build_form(&course()).value();
        value["sales"]["startTime"] = json!("later");
        value["name"] = json!("Renamed");

        let composed = compose_course("c-1", &value).unwrap();
        assert_eq!(composed.sales.start, None);
        assert_eq!(composed.name, "Renamed");
    }

    #[test]
    fn test_compose_course_rejects_wrongly_typed_fields() {
        let mut value = build_form(&course()).value();
        value["plans"][0]["price"] = json!("ten");
        match compose_course("c-1", &value) {
            Err(EditorError::InvalidField { path, .. }) => assert_eq!(path, "plans.0.price"),
            other => panic!("expected an invalid field, got {other:?}"),
        }
    }

    #[test]
    fn test_compose_course_names_nested_entries() {
        let mut value = build_form(&course()).value();
        value["plans"][1]["advantages"][1]["available"] = json!("yes");
        let err = compose_course("c-1", &value).unwrap_err();
        assert!(err.to_string().contains("plans.1.advantages.1"));

        let mut value = build_form(&course()).value();
        value["contents"] = json!("none");
        assert!(matches!(
            compose_course("c-1", &value),
            Err(EditorError::InvalidField { path, .. }) if path == "contents"
        ));
    }

    #[test]
    fn test_compose_course_tolerates_absent_collections() {
        let mut value = build_form(&course()).value();
        for key in ["plans", "contents", "coauthors", "duration", "sales"] {
            value.as_object_mut().unwrap().remove(key);
        }
        let composed = compose_course("c-1", &value).unwrap();
        assert!(composed.plans.is_empty());
        assert_eq!(composed.duration, Duration::default());
        assert_eq!(composed.sales, Sales::default());
    }

    #[test]
    fn test_default_entries() {
        assert_eq!(
            new_plan().value(),
            json!({
                "name": "",
                "price": 0.0,
                "advantages": [{ "available": false, "title": "" }]
            })
        );
        assert_eq!(
            new_contents_item().value(),
            json!({
                "type": "lesson",
                "duration": { "unit": "day", "value": 0.0 },
                "name": ""
            })
        );
        assert_eq!(new_coauthor().value(), json!({ "firstName": "", "lastName": "" }));
        assert_eq!(advantages_path(2), "plans.2.advantages");
    }
}

use std::collections::BTreeMap;

use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum FormNode {
    /// Leaf holding one value. `Value::Null` marks an unset field.
    Control(Value),
    Group(BTreeMap<String, FormNode>),
    Array(Vec<FormNode>),
}

impl FormNode {
    pub fn control(value: impl Into<Value>) -> Self {
        FormNode::Control(value.into())
    }

    pub fn unset() -> Self {
        FormNode::Control(Value::Null)
    }

    pub fn group<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, FormNode)>,
        K: Into<String>,
    {
        FormNode::Group(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn array(items: impl IntoIterator<Item = FormNode>) -> Self {
        FormNode::Array(items.into_iter().collect())
    }

    /// Current value of this node and everything below it.
    pub fn value(&self) -> Value {
        match self {
            FormNode::Control(value) => value.clone(),
            FormNode::Group(fields) => {
                let map: Map<String, Value> = fields
                    .iter()
                    .map(|(name, node)| (name.clone(), node.value()))
                    .collect();
                Value::Object(map)
            }
            FormNode::Array(items) => Value::Array(items.iter().map(FormNode::value).collect()),
        }
    }

    /// Number of entries, for arrays only.
    pub fn len(&self) -> Option<usize> {
        match self {
            FormNode::Array(items) => Some(items.len()),
            _ => None,
        }
    }

    pub fn child(&self, segment: &str) -> Option<&FormNode> {
        match self {
            FormNode::Control(_) => None,
            FormNode::Group(fields) => fields.get(segment),
            FormNode::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        }
    }

    pub fn child_mut(&mut self, segment: &str) -> Option<&mut FormNode> {
        match self {
            FormNode::Control(_) => None,
            FormNode::Group(fields) => fields.get_mut(segment),
            FormNode::Array(items) => match segment.parse::<usize>() {
                Ok(i) => items.get_mut(i),
                Err(_) => None,
            },
        }
    }
}

use serde_json::Value;
use tokio::sync::mpsc;

use crate::error::EditorError;
use crate::form::FormNode;

/// Root of a live form plus the listeners interested in its value.
#[derive(Debug)]
pub struct FormTree {
    root: FormNode,
    listeners: Vec<mpsc::UnboundedSender<Value>>,
}

impl FormTree {
    pub fn new(root: FormNode) -> Self {
        Self {
            root,
            listeners: Vec::new(),
        }
    }

    pub fn value(&self) -> Value {
        self.root.value()
    }

    /// Stream of aggregate values, one per mutation made after this call.
    pub fn value_changes(&mut self) -> mpsc::UnboundedReceiver<Value> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.listeners.push(tx);
        rx
    }

    pub fn get(&self, path: &str) -> Result<&FormNode, EditorError> {
        segments(path).try_fold(&self.root, |node, segment| {
            node.child(segment)
                .ok_or_else(|| EditorError::UnknownPath(path.to_string()))
        })
    }

    fn get_mut(&mut self, path: &str) -> Result<&mut FormNode, EditorError> {
        let mut node = &mut self.root;
        for segment in segments(path) {
            node = node
                .child_mut(segment)
                .ok_or_else(|| EditorError::UnknownPath(path.to_string()))?;
        }
        Ok(node)
    }

    /// Number of entries in the array at `path`.
    pub fn len_of(&self, path: &str) -> Result<usize, EditorError> {
        self.get(path)?
            .len()
            .ok_or_else(|| EditorError::NotAnArray(path.to_string()))
    }

    /// Replaces a control's value. Notifies even when the value is unchanged.
    pub fn set_value(&mut self, path: &str, value: Value) -> Result<(), EditorError> {
        match self.get_mut(path)? {
            FormNode::Control(current) => *current = value,
            _ => return Err(EditorError::NotAControl(path.to_string())),
        }
        self.notify();
        Ok(())
    }

    /// Appends `node` to the array at `path` and returns its index.
    pub fn push(&mut self, path: &str, node: FormNode) -> Result<usize, EditorError> {
        let index = match self.get_mut(path)? {
            FormNode::Array(items) => {
                items.push(node);
                items.len() - 1
            }
            _ => return Err(EditorError::NotAnArray(path.to_string())),
        };
        self.notify();
        Ok(index)
    }

    fn notify(&mut self) {
        if self.listeners.is_empty() {
            return;
        }
        let value = self.value();
        self.listeners.retain(|tx| tx.send(value.clone()).is_ok());
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('.').filter(|s| !s.is_empty())
}

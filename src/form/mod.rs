//! Editable form tree.
//!
//! A form is a tree of [`FormNode`]s: controls hold a single JSON value,
//! groups hold named children, arrays hold an ordered, growable list of
//! children. The owning [`FormTree`] addresses nodes by dot-separated paths
//! (`plans.0.advantages.1.title`) and publishes the aggregate value to every
//! subscriber after each mutation.

pub mod node;
pub mod tree;

pub use node::FormNode;
pub use tree::FormTree;

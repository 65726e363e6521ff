//! Denormalized position of a category in the tree.
//!
//! A category stores its depth, the ids of every ancestor (root first) and a
//! breadcrumb path so that listing and filtering never has to walk the tree.

use uuid::Uuid;

use crate::models::Category;

pub const PATH_SEPARATOR: &str = ">";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hierarchy {
    pub parent_id: Option<Uuid>,
    pub level: u32,
    pub ancestors: Vec<Uuid>,
    pub path: String,
}

impl Hierarchy {
    pub fn root(name: &str) -> Self {
        Self {
            parent_id: None,
            level: 0,
            ancestors: Vec::new(),
            path: name.to_string(),
        }
    }

    pub fn child_of(parent: &Category, name: &str) -> Self {
        let mut ancestors = parent.ancestors.clone();
        ancestors.push(parent.id);

        Self {
            parent_id: Some(parent.id),
            level: parent.level + 1,
            ancestors,
            path: format!("{}{}{}", parent.path, PATH_SEPARATOR, name),
        }
    }

    /// Whether making `parent` the parent of `category_id` would close a loop.
    pub fn would_cycle(category_id: Uuid, parent: &Category) -> bool {
        parent.id == category_id || parent.ancestors.contains(&category_id)
    }
}

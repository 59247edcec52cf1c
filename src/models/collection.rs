//! Collection data structures and tree assembly.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named, user-owned grouping of materials.
///
/// Nesting is a flat parent/child relationship over `parent_id`; the server
/// enforces ownership and rejects cycles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    /// Server-assigned identifier
    pub id: String,

    /// Collection name
    pub name: String,

    /// Owning user id
    pub owner_id: String,

    /// Parent collection, if nested
    #[serde(default)]
    pub parent_id: Option<String>,

    /// Materials grouped into this collection
    #[serde(default)]
    pub material_ids: Vec<String>,

    /// Creation time
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a collection.
#[derive(Debug, Clone, Serialize)]
pub struct NewCollection {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

/// A collection with its resolved children, for display.
#[derive(Debug, Clone)]
pub struct CollectionNode {
    pub collection: Collection,
    pub children: Vec<CollectionNode>,
}

/// Assemble a display tree from a flat collection list.
///
/// A collection whose `parent_id` does not appear in the list is treated as
/// a root rather than an error. Input order is preserved among siblings.
pub fn build_tree(collections: &[Collection]) -> Vec<CollectionNode> {
    let known: HashMap<&str, &Collection> =
        collections.iter().map(|c| (c.id.as_str(), c)).collect();

    let mut children_of: HashMap<&str, Vec<&Collection>> = HashMap::new();
    let mut roots: Vec<&Collection> = Vec::new();

    for collection in collections {
        match collection.parent_id.as_deref() {
            Some(parent) if known.contains_key(parent) => {
                children_of.entry(parent).or_default().push(collection);
            }
            _ => roots.push(collection),
        }
    }

    fn attach(collection: &Collection, children_of: &HashMap<&str, Vec<&Collection>>) -> CollectionNode {
        let children = children_of
            .get(collection.id.as_str())
            .map(|kids| kids.iter().map(|c| attach(c, children_of)).collect())
            .unwrap_or_default();
        CollectionNode {
            collection: collection.clone(),
            children,
        }
    }

    roots.iter().map(|c| attach(c, &children_of)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection(id: &str, parent: Option<&str>) -> Collection {
        Collection {
            id: id.to_string(),
            name: format!("Collection {id}"),
            owner_id: "u1".to_string(),
            parent_id: parent.map(str::to_string),
            material_ids: Vec::new(),
            created_at: "2026-01-01T00:00:00Z".parse().unwrap(),
        }
    }

    #[test]
    fn nests_children_under_parents() {
        let list = vec![
            collection("root", None),
            collection("child", Some("root")),
            collection("grandchild", Some("child")),
        ];
        let tree = build_tree(&list);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].children.len(), 1);
        assert_eq!(tree[0].children[0].children[0].collection.id, "grandchild");
    }

    #[test]
    fn dangling_parent_becomes_root() {
        let list = vec![collection("orphan", Some("deleted-elsewhere"))];
        let tree = build_tree(&list);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].collection.id, "orphan");
    }

    #[test]
    fn sibling_order_is_preserved() {
        let list = vec![
            collection("p", None),
            collection("a", Some("p")),
            collection("b", Some("p")),
        ];
        let tree = build_tree(&list);
        let ids: Vec<_> = tree[0]
            .children
            .iter()
            .map(|n| n.collection.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}

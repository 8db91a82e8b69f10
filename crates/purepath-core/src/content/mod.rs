//! Static educational content.
//!
//! The topic graph is a hand-authored directed graph rooted at `root`.
//! `children_ids` are drill-down edges and are expected to form a DAG;
//! `related_ids` are "see also" edges and may loop back. Neither property is
//! enforced at load time, [`ContentGraph::validate`] reports on both.
//!
//! Alongside the graph live the device lockdown guides ([`shield`]), the
//! panic-screen quotes ([`quotes`]) and the AI library topic list
//! ([`library`]).

pub mod library;
pub mod navigator;
pub mod quotes;
pub mod shield;
mod topics;

pub use navigator::{Navigator, NavigatorState};

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::GraphError;

/// Id of the distinguished root node in the bundled dataset.
pub const ROOT_ID: &str = "root";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TopicCategory {
    Science,
    Strategy,
    Philosophy,
    Emergency,
}

impl TopicCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TopicCategory::Science => "science",
            TopicCategory::Strategy => "strategy",
            TopicCategory::Philosophy => "philosophy",
            TopicCategory::Emergency => "emergency",
        }
    }
}

impl std::fmt::Display for TopicCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry in the topic graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicNode {
    pub id: String,
    pub title: String,
    pub category: TopicCategory,
    pub summary: String,
    /// Markdown body.
    pub content: String,
    pub children_ids: Vec<String>,
    pub related_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl TopicNode {
    pub fn is_leaf(&self) -> bool {
        self.children_ids.is_empty()
    }

    /// Case-insensitive substring match on title or summary.
    /// `needle` must already be lowercased.
    fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.summary.to_lowercase().contains(needle)
    }
}

/// Findings from [`ContentGraph::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphReport {
    /// `(from, to)` child edges whose target does not exist.
    pub dangling_children: Vec<(String, String)>,
    /// `(from, to)` related edges whose target does not exist.
    pub dangling_related: Vec<(String, String)>,
    /// Child edges `(from, to)` that close a cycle.
    pub child_cycles: Vec<(String, String)>,
    /// Nodes not reachable from the root through child or related edges.
    pub unreachable: Vec<String>,
}

impl GraphReport {
    /// True when the child hierarchy is a DAG and every edge resolves.
    pub fn is_clean(&self) -> bool {
        self.dangling_children.is_empty()
            && self.dangling_related.is_empty()
            && self.child_cycles.is_empty()
    }
}

/// Read-only topic graph keyed by id, iterated in authored order.
#[derive(Debug, Clone)]
pub struct ContentGraph {
    root_id: String,
    nodes: IndexMap<String, TopicNode>,
}

impl ContentGraph {
    /// Build a graph from authored nodes.
    ///
    /// # Errors
    /// Returns an error if two nodes share an id or `root_id` has no node.
    pub fn new(
        root_id: impl Into<String>,
        nodes: impl IntoIterator<Item = TopicNode>,
    ) -> Result<Self, GraphError> {
        let root_id = root_id.into();
        let mut map = IndexMap::new();
        for node in nodes {
            if map.contains_key(&node.id) {
                return Err(GraphError::DuplicateId(node.id));
            }
            map.insert(node.id.clone(), node);
        }
        if !map.contains_key(&root_id) {
            return Err(GraphError::MissingRoot(root_id));
        }
        Ok(Self { root_id, nodes: map })
    }

    /// The bundled recovery map.
    pub fn builtin() -> Self {
        let nodes = topics::builtin_topics()
            .into_iter()
            .map(|node| (node.id.clone(), node))
            .collect();
        Self {
            root_id: ROOT_ID.to_string(),
            nodes,
        }
    }

    pub fn root_id(&self) -> &str {
        &self.root_id
    }

    pub fn root(&self) -> &TopicNode {
        // `new` and `builtin` both guarantee the root is present.
        &self.nodes[self.root_id.as_str()]
    }

    pub fn get(&self, id: &str) -> Option<&TopicNode> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Look up `id`, falling back to the root for unknown ids.
    pub fn resolve(&self, id: &str) -> &TopicNode {
        self.get(id).unwrap_or_else(|| self.root())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in authored order.
    pub fn iter(&self) -> impl Iterator<Item = &TopicNode> {
        self.nodes.values()
    }

    /// Children of `node` that exist in the graph, in authored order.
    pub fn children_of(&self, node: &TopicNode) -> Vec<&TopicNode> {
        node.children_ids.iter().filter_map(|id| self.get(id)).collect()
    }

    /// Related nodes of `node` that exist in the graph, in authored order.
    pub fn related_of(&self, node: &TopicNode) -> Vec<&TopicNode> {
        node.related_ids.iter().filter_map(|id| self.get(id)).collect()
    }

    /// All nodes whose title or summary contains `query`, ignoring case.
    ///
    /// An empty query matches nothing.
    pub fn search(&self, query: &str) -> Vec<&TopicNode> {
        if query.is_empty() {
            return Vec::new();
        }
        let needle = query.to_lowercase();
        self.iter().filter(|node| node.matches(&needle)).collect()
    }

    /// Check edge targets, child-edge cycles and reachability.
    pub fn validate(&self) -> GraphReport {
        let mut report = GraphReport::default();

        for node in self.iter() {
            for child in &node.children_ids {
                if !self.contains(child) {
                    report.dangling_children.push((node.id.clone(), child.clone()));
                }
            }
            for rel in &node.related_ids {
                if !self.contains(rel) {
                    report.dangling_related.push((node.id.clone(), rel.clone()));
                }
            }
        }

        // Depth-first over child edges from every node so cycles outside
        // the root's subtree are caught as well.
        let mut done: HashSet<&str> = HashSet::new();
        for node in self.iter() {
            let mut on_path: Vec<&str> = Vec::new();
            self.find_child_cycles(&node.id, &mut on_path, &mut done, &mut report.child_cycles);
        }

        let mut seen: HashSet<&str> = HashSet::new();
        let mut stack = vec![self.root_id.as_str()];
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            if let Some(node) = self.get(id) {
                stack.extend(node.children_ids.iter().map(String::as_str));
                stack.extend(node.related_ids.iter().map(String::as_str));
            }
        }
        report.unreachable = self
            .iter()
            .filter(|node| !seen.contains(node.id.as_str()))
            .map(|node| node.id.clone())
            .collect();

        report
    }

    fn find_child_cycles<'a>(
        &'a self,
        id: &'a str,
        on_path: &mut Vec<&'a str>,
        done: &mut HashSet<&'a str>,
        cycles: &mut Vec<(String, String)>,
    ) {
        if done.contains(id) {
            return;
        }
        let Some(node) = self.get(id) else {
            return;
        };
        on_path.push(id);
        for child in &node.children_ids {
            if on_path.contains(&child.as_str()) {
                cycles.push((id.to_string(), child.clone()));
            } else {
                self.find_child_cycles(child, on_path, done, cycles);
            }
        }
        on_path.pop();
        done.insert(id);
    }
}

impl Default for ContentGraph {
    fn default() -> Self {
        Self::builtin()
    }
}

//! Back-stack navigation over a [`ContentGraph`].
//!
//! A navigator is opened fresh for each browsing session and dropped when
//! the browser closes; its state is never persisted.
//!
//! ## Operations
//!
//! ```text
//! drill_into(x): history.push(current); current = x (or root if unknown); query = ""
//! back():        history non-empty  -> current = history.pop()
//!                empty, not at root -> current = root
//!                empty, at root     -> no-op
//! search(q):     q empty -> browsing mode, no results
//!                else    -> title/summary substring matches, authored order
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ContentGraph, TopicNode};

/// Ephemeral browsing state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigatorState {
    pub current_id: String,
    /// Previously visited ids, most recent last.
    pub history: Vec<String>,
    /// Empty means browsing mode.
    pub search_query: String,
}

pub struct Navigator<'g> {
    graph: &'g ContentGraph,
    state: NavigatorState,
}

impl<'g> Navigator<'g> {
    /// Open at the graph's own root.
    pub fn new(graph: &'g ContentGraph) -> Self {
        Self::open(graph, graph.root_id())
    }

    /// Open at `root_id`. An unknown id opens at the graph's root.
    pub fn open(graph: &'g ContentGraph, root_id: &str) -> Self {
        let current_id = graph.resolve(root_id).id.clone();
        Self {
            graph,
            state: NavigatorState {
                current_id,
                history: Vec::new(),
                search_query: String::new(),
            },
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &NavigatorState {
        &self.state
    }

    pub fn into_state(self) -> NavigatorState {
        self.state
    }

    pub fn current_id(&self) -> &str {
        &self.state.current_id
    }

    pub fn history(&self) -> &[String] {
        &self.state.history
    }

    pub fn search_query(&self) -> &str {
        &self.state.search_query
    }

    pub fn current(&self) -> &'g TopicNode {
        self.graph.resolve(&self.state.current_id)
    }

    pub fn is_at_root(&self) -> bool {
        self.state.current_id == self.graph.root_id()
    }

    pub fn is_searching(&self) -> bool {
        !self.state.search_query.is_empty()
    }

    /// Whether there is a visited node to return to.
    pub fn can_go_back(&self) -> bool {
        !self.state.history.is_empty()
    }

    /// Resolvable children of the current node. Empty for leaves.
    pub fn next_steps(&self) -> Vec<&'g TopicNode> {
        self.graph.children_of(self.current())
    }

    /// Resolvable related nodes of the current node.
    pub fn related(&self) -> Vec<&'g TopicNode> {
        self.graph.related_of(self.current())
    }

    /// Matches for the active query. Empty in browsing mode.
    pub fn results(&self) -> Vec<&'g TopicNode> {
        self.graph.search(&self.state.search_query)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Move to `node_id`, remembering where we came from.
    ///
    /// Unknown ids land on the root. `history` always grows by one.
    pub fn drill_into(&mut self, node_id: &str) -> &'g TopicNode {
        let target = self.graph.resolve(node_id);
        if target.id != node_id {
            debug!(requested = node_id, "unknown topic id, falling back to root");
        }
        let previous = std::mem::replace(&mut self.state.current_id, target.id.clone());
        self.state.history.push(previous);
        self.state.search_query.clear();
        debug!(current = %self.state.current_id, depth = self.state.history.len(), "drill into");
        target
    }

    /// Return to the previous node, or to the root when there is none.
    pub fn back(&mut self) -> &'g TopicNode {
        if let Some(previous) = self.state.history.pop() {
            self.state.current_id = previous;
        } else if !self.is_at_root() {
            self.state.current_id = self.graph.root_id().to_string();
        }
        debug!(current = %self.state.current_id, depth = self.state.history.len(), "back");
        self.current()
    }

    /// Enter (or leave, with an empty query) search mode.
    ///
    /// `current_id` and `history` are untouched either way.
    pub fn search(&mut self, query: &str) -> Vec<&'g TopicNode> {
        self.state.search_query = query.to_string();
        self.results()
    }

    pub fn clear_search(&mut self) {
        self.state.search_query.clear();
    }

    /// Pick the `index`-th result of the active search.
    ///
    /// Returns `None` when the index is out of range; state is unchanged.
    pub fn select_result(&mut self, index: usize) -> Option<&'g TopicNode> {
        let id = self.results().get(index)?.id.clone();
        Some(self.drill_into(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ROOT_ID;

    #[test]
    fn open_starts_clean() {
        let graph = ContentGraph::builtin();
        let nav = Navigator::new(&graph);
        assert_eq!(nav.current_id(), ROOT_ID);
        assert!(nav.history().is_empty());
        assert_eq!(nav.search_query(), "");
        assert!(!nav.can_go_back());
    }

    #[test]
    fn open_at_unknown_id_uses_root() {
        let graph = ContentGraph::builtin();
        let nav = Navigator::open(&graph, "nowhere");
        assert_eq!(nav.current_id(), ROOT_ID);
    }

    #[test]
    fn drill_then_back_twice() {
        let graph = ContentGraph::builtin();
        let mut nav = Navigator::new(&graph);

        nav.drill_into("science_root");
        nav.drill_into("dopamine");
        assert_eq!(nav.history(), ["root", "science_root"]);

        nav.back();
        assert_eq!(nav.current_id(), "science_root");
        assert_eq!(nav.history(), ["root"]);

        nav.back();
        assert_eq!(nav.current_id(), "root");
        assert!(nav.history().is_empty());
    }

    #[test]
    fn drill_into_unknown_lands_on_root_and_grows_history() {
        let graph = ContentGraph::builtin();
        let mut nav = Navigator::new(&graph);
        nav.drill_into("strategy_root");

        let node = nav.drill_into("anhedonia");
        assert_eq!(node.id, ROOT_ID);
        assert_eq!(nav.current_id(), ROOT_ID);
        assert_eq!(nav.history(), ["root", "strategy_root"]);
    }

    #[test]
    fn back_at_root_is_noop() {
        let graph = ContentGraph::builtin();
        let mut nav = Navigator::new(&graph);
        for _ in 0..3 {
            nav.back();
            assert_eq!(nav.current_id(), ROOT_ID);
            assert!(nav.history().is_empty());
        }
    }

    #[test]
    fn back_with_empty_history_off_root_goes_to_root() {
        let graph = ContentGraph::builtin();
        let mut nav = Navigator::open(&graph, "identity");
        assert_eq!(nav.current_id(), "identity");
        nav.back();
        assert_eq!(nav.current_id(), ROOT_ID);
    }

    #[test]
    fn search_preserves_position_and_history() {
        let graph = ContentGraph::builtin();
        let mut nav = Navigator::new(&graph);
        nav.drill_into("philosophy_root");

        let results = nav.search("dopa");
        assert_eq!(results.len(), 1);
        assert!(nav.is_searching());
        assert_eq!(nav.current_id(), "philosophy_root");
        assert_eq!(nav.history(), ["root"]);

        assert!(nav.search("").is_empty());
        assert!(!nav.is_searching());
        assert_eq!(nav.current_id(), "philosophy_root");
        assert_eq!(nav.history(), ["root"]);
    }

    #[test]
    fn selecting_result_behaves_like_drill_into() {
        let graph = ContentGraph::builtin();
        let mut nav = Navigator::new(&graph);
        nav.drill_into("philosophy_root");
        nav.search("wave");

        let picked = nav.select_result(0).unwrap();
        assert_eq!(picked.id, "urge_surfing");
        assert!(!nav.is_searching());
        assert_eq!(nav.history(), ["root", "philosophy_root"]);

        nav.back();
        assert_eq!(nav.current_id(), "philosophy_root");
    }

    #[test]
    fn select_result_out_of_range_changes_nothing() {
        let graph = ContentGraph::builtin();
        let mut nav = Navigator::new(&graph);
        nav.search("wave");
        assert!(nav.select_result(5).is_none());
        assert_eq!(nav.search_query(), "wave");
        assert!(nav.history().is_empty());
    }

    #[test]
    fn leaves_have_no_next_steps() {
        let graph = ContentGraph::builtin();
        let mut nav = Navigator::new(&graph);
        nav.drill_into("hypofrontality");
        assert!(nav.current().is_leaf());
        assert!(nav.next_steps().is_empty());
        assert!(nav.related().is_empty());
    }
}

//! Compatibility graph over operation categories

use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use crate::domain::errors::DomainError;
use crate::domain::model::{Category, MediaKind};
use crate::domain::rules::RuleSet;

/// Undirected graph whose edges mean "may share one invocation"
#[derive(Debug, Clone, Default)]
pub struct CompatibilityGraph {
    nodes: IndexMap<Category, IndexSet<Category>>,
}

impl CompatibilityGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from a rule set. Every group becomes a clique.
    pub fn from_rules(rules: &RuleSet) -> Result<Self, DomainError> {
        let mut graph = Self::new();
        for group in rules.parse_groups()? {
            for (i, a) in group.iter().enumerate() {
                for b in &group[i..] {
                    graph.add_edge(*a, *b);
                }
            }
        }
        debug!(
            nodes = graph.nodes.len(),
            "Compatibility graph built from {} rule groups",
            rules.groups().len()
        );
        Ok(graph)
    }

    /// Build the graph a render of `kind` media schedules against.
    ///
    /// Categories the rules never mention still become nodes, with no edges,
    /// so their edits run in stages of their own instead of being lost.
    pub fn for_kind(rules: &RuleSet, kind: MediaKind) -> Result<Self, DomainError> {
        let mut graph = Self::from_rules(rules)?;
        for category in Category::ALL {
            if kind.accepts(category) && !graph.contains(category) {
                debug!(%category, "Category has no rule group, it runs alone");
                graph.add_node(category);
            }
        }
        Ok(graph)
    }

    pub fn add_node(&mut self, category: Category) {
        self.nodes.entry(category).or_default();
    }

    /// Add a symmetric edge.
    ///
    /// A self pair only registers the node: every category is trivially
    /// compatible with itself, so `neighbors` never lists the category itself.
    pub fn add_edge(&mut self, a: Category, b: Category) {
        self.add_node(a);
        self.add_node(b);
        if a == b || self.are_compatible(a, b) {
            return;
        }
        if let Some(edges) = self.nodes.get_mut(&a) {
            edges.insert(b);
        }
        if let Some(edges) = self.nodes.get_mut(&b) {
            edges.insert(a);
        }
    }

    /// Categories compatible with `category`; empty when it runs alone
    pub fn neighbors(&self, category: Category) -> Vec<Category> {
        self.nodes
            .get(&category)
            .map(|edges| edges.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn are_compatible(&self, a: Category, b: Category) -> bool {
        self.nodes
            .get(&a)
            .map(|edges| edges.contains(&b))
            .unwrap_or(false)
    }

    pub fn contains(&self, category: Category) -> bool {
        self.nodes.contains_key(&category)
    }

    /// Nodes in the order they first appeared in the rules
    pub fn categories(&self) -> Vec<Category> {
        self.nodes.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_are_symmetric_and_idempotent() {
        let mut graph = CompatibilityGraph::new();
        graph.add_edge(Category::ASPECT, Category::AUDIO_FILTER);
        graph.add_edge(Category::AUDIO_FILTER, Category::ASPECT);
        graph.add_edge(Category::ASPECT, Category::AUDIO_FILTER);

        assert_eq!(graph.neighbors(Category::ASPECT), vec![Category::AUDIO_FILTER]);
        assert_eq!(graph.neighbors(Category::AUDIO_FILTER), vec![Category::ASPECT]);
    }

    #[test]
    fn test_self_pair_registers_isolated_node() {
        let mut graph = CompatibilityGraph::new();
        graph.add_edge(Category::SEEK, Category::SEEK);
        assert!(graph.contains(Category::SEEK));
        assert!(graph.neighbors(Category::SEEK).is_empty());
    }

    #[test]
    fn test_groups_become_cliques() {
        let rules = RuleSet::new(["-ss|-aspect|-filter:a", "-filter_complex"]);
        let graph = CompatibilityGraph::from_rules(&rules).unwrap();

        assert_eq!(graph.len(), 4);
        assert!(graph.are_compatible(Category::SEEK, Category::ASPECT));
        assert!(graph.are_compatible(Category::ASPECT, Category::AUDIO_FILTER));
        assert!(graph.are_compatible(Category::AUDIO_FILTER, Category::SEEK));
        assert!(graph.neighbors(Category::COMPOSABLE_FILTER).is_empty());
    }

    #[test]
    fn test_categories_follow_rule_order() {
        let graph = CompatibilityGraph::from_rules(&RuleSet::default_video()).unwrap();
        assert_eq!(
            graph.categories(),
            vec![
                Category::ASPECT,
                Category::AUDIO_FILTER,
                Category::COMPOSABLE_FILTER,
                Category::SEEK
            ]
        );
    }

    #[test]
    fn test_unknown_category_has_no_neighbors() {
        let graph = CompatibilityGraph::from_rules(&RuleSet::default_audio()).unwrap();
        assert!(!graph.contains(Category::ASPECT));
        assert!(graph.neighbors(Category::ASPECT).is_empty());
    }

    #[test]
    fn test_for_kind_adds_undeclared_categories_as_isolated_nodes() {
        let rules = RuleSet::new(["-aspect|-filter:a", "-filter_complex"]);
        let graph = CompatibilityGraph::for_kind(&rules, MediaKind::Video).unwrap();

        assert!(graph.contains(Category::SEEK));
        assert!(graph.neighbors(Category::SEEK).is_empty());
        assert!(!graph.contains(Category::EQUALIZER));
        assert!(graph.are_compatible(Category::ASPECT, Category::AUDIO_FILTER));
        assert_eq!(
            graph.categories(),
            vec![
                Category::ASPECT,
                Category::AUDIO_FILTER,
                Category::COMPOSABLE_FILTER,
                Category::SEEK
            ]
        );
    }

    #[test]
    fn test_for_kind_skips_categories_the_kind_refuses() {
        let graph =
            CompatibilityGraph::for_kind(&RuleSet::default_audio(), MediaKind::Audio).unwrap();
        assert!(!graph.contains(Category::ASPECT));
        assert_eq!(graph.len(), 4);
    }

    #[test]
    fn test_malformed_rules_fail_construction() {
        let rules = RuleSet::new(["-ss|"]);
        assert!(CompatibilityGraph::from_rules(&rules).is_err());
    }
}

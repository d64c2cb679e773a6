//! Arena-based decision tree and its traversal semantics

use std::collections::HashSet;
use std::fmt;

use generational_arena::{Arena, Index};
use itertools::Itertools;
use termtree::Tree;
use tracing::instrument;

use crate::domain::{Answer, Conditions, Mechanism, Question};
use crate::errors::{ChartError, ChartResult};

/// What a tree node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Internal node asking a question; out-edges cover its answers
    Decision(Question),
    /// Terminal classification; no out-edges
    Outcome(Mechanism),
}

impl NodeKind {
    /// Text drawn inside the node on the diagram.
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Decision(q) => q.prompt(),
            NodeKind::Outcome(m) => m.label(),
        }
    }
}

/// Tree node in the arena-based chart structure.
#[derive(Debug)]
pub struct ChartNode {
    /// Unique key identifying the node in DOT output
    pub key: String,
    pub kind: NodeKind,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// Out-edges: the answer selecting the edge and the child it reaches
    pub children: Vec<(Answer, Index)>,
}

/// Arena-backed rooted decision tree.
///
/// Uses generational arena for memory-safe node references and O(1)
/// lookups. One chart holds the complete classification procedure.
#[derive(Debug, Default)]
pub struct DecisionChart {
    arena: Arena<ChartNode>,
    root: Option<Index>,
}

impl DecisionChart {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Insert a node. The first node inserted without a parent becomes the
    /// root; child nodes are attached under the given answer label.
    #[instrument(level = "trace", skip(self))]
    pub fn insert_node(
        &mut self,
        key: impl Into<String> + fmt::Debug,
        kind: NodeKind,
        parent: Option<(Index, Answer)>,
    ) -> Index {
        let node = ChartNode {
            key: key.into(),
            kind,
            parent: parent.map(|(idx, _)| idx),
            children: Vec::new(),
        };
        let node_idx = self.arena.insert(node);

        if let Some((parent_idx, answer)) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.push((answer, node_idx));
            }
        } else {
            self.root = Some(node_idx);
        }

        node_idx
    }

    pub fn node(&self, idx: Index) -> Option<&ChartNode> {
        self.arena.get(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    pub fn edge_count(&self) -> usize {
        self.arena.iter().map(|(_, node)| node.children.len()).sum()
    }

    /// Preorder iterator; children are visited in insertion order, which
    /// makes DOT output and display trees deterministic.
    pub fn iter(&self) -> ChartIterator {
        ChartIterator::new(self)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        if let Some(root) = self.root {
            self.calculate_depth(root)
        } else {
            0
        }
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        if let Some(node) = self.node(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&(_, child)| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Collects all terminal nodes in preorder.
    pub fn terminals(&self) -> Vec<(Index, Mechanism)> {
        self.iter()
            .filter_map(|(idx, node)| match node.kind {
                NodeKind::Outcome(m) => Some((idx, m)),
                NodeKind::Decision(_) => None,
            })
            .collect()
    }

    /// Walk the tree from the root, answering each decision node from the
    /// conditions record until a terminal is reached.
    ///
    /// Total for every conditions value once the chart passes `validate`;
    /// a missing edge therefore indicates a structural defect.
    #[instrument(level = "debug", skip(self))]
    pub fn classify(&self, conditions: &Conditions) -> ChartResult<Mechanism> {
        let mut current = self
            .root
            .ok_or_else(|| ChartError::Structure("chart has no root".into()))?;

        loop {
            let node = self
                .node(current)
                .ok_or_else(|| ChartError::Structure("dangling node index".into()))?;
            match node.kind {
                NodeKind::Outcome(mechanism) => return Ok(mechanism),
                NodeKind::Decision(question) => {
                    let answer = conditions.answer(question);
                    current = node
                        .children
                        .iter()
                        .find(|(edge, _)| *edge == answer)
                        .map(|&(_, child)| child)
                        .ok_or_else(|| {
                            ChartError::Structure(format!(
                                "no edge for answer {} at node '{}'",
                                answer, node.key
                            ))
                        })?;
                }
            }
        }
    }

    /// Check the structural invariants of the chart.
    ///
    /// - exactly one root (a node without parent)
    /// - node keys are unique
    /// - terminal nodes have no out-edges
    /// - decision-node out-edges carry pairwise distinct answers and cover
    ///   the question's full answer set
    /// - every node is reachable from the root
    #[instrument(level = "debug", skip(self))]
    pub fn validate(&self) -> ChartResult<()> {
        let root = self
            .root
            .ok_or_else(|| ChartError::Structure("chart has no root".into()))?;

        let orphans = self
            .arena
            .iter()
            .filter(|(idx, node)| node.parent.is_none() && *idx != root)
            .count();
        if orphans > 0 {
            return Err(ChartError::Structure(format!(
                "{} nodes besides the root have no parent",
                orphans
            )));
        }

        let mut keys = HashSet::new();
        let mut reachable = 0usize;
        for (_, node) in self.iter() {
            reachable += 1;
            if !keys.insert(node.key.as_str()) {
                return Err(ChartError::Structure(format!(
                    "duplicate node key '{}'",
                    node.key
                )));
            }

            match node.kind {
                NodeKind::Outcome(_) => {
                    if !node.children.is_empty() {
                        return Err(ChartError::Structure(format!(
                            "terminal node '{}' has out-edges",
                            node.key
                        )));
                    }
                }
                NodeKind::Decision(question) => {
                    let answers: Vec<Answer> =
                        node.children.iter().map(|&(answer, _)| answer).collect();
                    if !answers.iter().all_unique() {
                        return Err(ChartError::Structure(format!(
                            "node '{}' has overlapping answer edges",
                            node.key
                        )));
                    }
                    let expected = question.answers();
                    if answers.len() != expected.len()
                        || !expected.iter().all(|a| answers.contains(a))
                    {
                        return Err(ChartError::Structure(format!(
                            "node '{}' does not cover its answer set: {:?} vs {:?}",
                            node.key, answers, expected
                        )));
                    }
                }
            }
        }

        if reachable != self.arena.len() {
            return Err(ChartError::Structure(format!(
                "{} of {} nodes unreachable from the root",
                self.arena.len() - reachable,
                self.arena.len()
            )));
        }

        Ok(())
    }

    /// Render the hierarchy as a terminal tree, one line per node, with the
    /// selecting answer prefixed on every non-root line.
    pub fn to_display_tree(&self) -> Option<Tree<String>> {
        self.root.map(|root| self.display_subtree(root, None))
    }

    fn display_subtree(&self, node_idx: Index, via: Option<Answer>) -> Tree<String> {
        let node = &self.arena[node_idx];
        let label = node.kind.label().replace('\n', " ");
        let text = match via {
            Some(answer) => format!("{} -> {}", answer, label),
            None => label,
        };
        let leaves: Vec<_> = node
            .children
            .iter()
            .map(|&(answer, child)| self.display_subtree(child, Some(answer)))
            .collect();
        Tree::new(text).with_leaves(leaves)
    }

    /// Every root-to-terminal path, one line each: the answers taken in
    /// order, then the mechanism reached.
    pub fn decision_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        if let Some(root) = self.root {
            let mut answers = Vec::new();
            self.collect_paths(root, &mut answers, &mut paths);
        }
        paths
    }

    fn collect_paths(&self, node_idx: Index, answers: &mut Vec<Answer>, paths: &mut Vec<String>) {
        let node = &self.arena[node_idx];
        match node.kind {
            NodeKind::Outcome(mechanism) => {
                let steps: Vec<String> = answers.iter().map(|a| a.to_string()).collect();
                paths.push(format!("{} => {}", steps.join(" "), mechanism));
            }
            NodeKind::Decision(_) => {
                for &(answer, child) in &node.children {
                    answers.push(answer);
                    self.collect_paths(child, answers, paths);
                    answers.pop();
                }
            }
        }
    }
}

pub struct ChartIterator<'a> {
    chart: &'a DecisionChart,
    stack: Vec<Index>,
}

impl<'a> ChartIterator<'a> {
    fn new(chart: &'a DecisionChart) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = chart.root() {
            stack.push(root);
        }
        Self { chart, stack }
    }
}

impl<'a> Iterator for ChartIterator<'a> {
    type Item = (Index, &'a ChartNode);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.chart.node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &(_, child) in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Degree;

    fn two_level_chart() -> DecisionChart {
        let mut chart = DecisionChart::new();
        let root = chart.insert_node("bulky", NodeKind::Decision(Question::BulkyBase), None);
        chart.insert_node(
            "e2",
            NodeKind::Outcome(Mechanism::E2),
            Some((root, Answer::Yes)),
        );
        chart.insert_node(
            "sn2",
            NodeKind::Outcome(Mechanism::Sn2),
            Some((root, Answer::No)),
        );
        chart
    }

    #[test]
    fn test_insert_sets_root_and_children() {
        let chart = two_level_chart();
        let root = chart.root().unwrap();
        assert_eq!(chart.node(root).unwrap().children.len(), 2);
        assert_eq!(chart.node_count(), 3);
        assert_eq!(chart.edge_count(), 2);
        assert_eq!(chart.depth(), 2);
    }

    #[test]
    fn test_preorder_iteration_follows_insertion_order() {
        let chart = two_level_chart();
        let keys: Vec<&str> = chart.iter().map(|(_, n)| n.key.as_str()).collect();
        assert_eq!(keys, ["bulky", "e2", "sn2"]);
    }

    #[test]
    fn test_validate_accepts_complete_boolean_node() {
        let chart = two_level_chart();
        assert!(chart.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_edge() {
        let mut chart = DecisionChart::new();
        let root = chart.insert_node("heat", NodeKind::Decision(Question::HeatApplied), None);
        chart.insert_node(
            "e1",
            NodeKind::Outcome(Mechanism::E1),
            Some((root, Answer::Yes)),
        );
        // NO edge missing
        assert!(matches!(
            chart.validate(),
            Err(ChartError::Structure(_))
        ));
    }

    #[test]
    fn test_validate_rejects_duplicate_answers() {
        let mut chart = DecisionChart::new();
        let root = chart.insert_node("heat", NodeKind::Decision(Question::HeatApplied), None);
        chart.insert_node(
            "e1",
            NodeKind::Outcome(Mechanism::E1),
            Some((root, Answer::Yes)),
        );
        chart.insert_node(
            "sn1",
            NodeKind::Outcome(Mechanism::Sn1),
            Some((root, Answer::Yes)),
        );
        assert!(chart.validate().is_err());
    }

    #[test]
    fn test_classify_walks_to_terminal() {
        let chart = two_level_chart();
        let mut conditions = Conditions::new(Degree::Primary);
        conditions.bulky_base = true;
        assert_eq!(chart.classify(&conditions).unwrap(), Mechanism::E2);
        conditions.bulky_base = false;
        assert_eq!(chart.classify(&conditions).unwrap(), Mechanism::Sn2);
    }
}

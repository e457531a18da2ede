//! Intra-version dependency DAG and topological ordering.
//!
//! Units inside one version may declare an `after` predecessor; edges are
//! only added when the predecessor belongs to the same unit set, so
//! references to units of other versions (or to the unit itself) are
//! silently dropped.

use crate::error::{CoreError, CoreResult};
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::{HashMap, HashSet};

/// A directed acyclic graph of upgrade-unit predecessors.
#[derive(Debug, Default)]
pub struct UnitDag {
    graph: DiGraph<String, ()>,
    node_map: HashMap<String, NodeIndex>,
}

impl UnitDag {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
        }
    }

    /// Add a unit to the DAG, returning the existing node if already present.
    pub fn add_unit(&mut self, identifier: &str) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(identifier) {
            idx
        } else {
            let idx = self.graph.add_node(identifier.to_string());
            self.node_map.insert(identifier.to_string(), idx);
            idx
        }
    }

    /// Add a predecessor edge (`unit` runs after `predecessor`).
    pub fn add_predecessor(&mut self, unit: &str, predecessor: &str) {
        let unit_idx = self.add_unit(unit);
        let pred_idx = self.add_unit(predecessor);
        // Edge goes from predecessor to dependent so topological sort
        // yields predecessors first.
        self.graph.add_edge(pred_idx, unit_idx, ());
    }

    /// Build the DAG from a map of unit identifier -> predecessors.
    ///
    /// Predecessors outside the map's key set, including self references,
    /// are dropped.
    pub fn build(predecessors: &HashMap<String, Vec<String>>) -> CoreResult<Self> {
        let mut dag = Self::new();

        for unit in predecessors.keys() {
            dag.add_unit(unit);
        }

        for (unit, preds) in predecessors {
            for pred in preds {
                if pred != unit && predecessors.contains_key(pred) {
                    dag.add_predecessor(unit, pred);
                } else {
                    log::debug!("dropping predecessor '{pred}' of '{unit}': outside this unit set");
                }
            }
        }

        dag.validate()?;

        Ok(dag)
    }

    /// Validate the DAG has no cycles.
    pub fn validate(&self) -> CoreResult<()> {
        match toposort(&self.graph, None) {
            Ok(_) => Ok(()),
            Err(cycle) => Err(CoreError::CircularDependency {
                cycle: self.find_cycle_path(cycle.node_id()),
            }),
        }
    }

    /// Units in execution order (predecessors first).
    ///
    /// Tie-breaking among units with no ordering constraint between them is
    /// unspecified; callers must not rely on it.
    pub fn topological_order(&self) -> CoreResult<Vec<String>> {
        match toposort(&self.graph, None) {
            Ok(indices) => Ok(indices
                .into_iter()
                .map(|idx| self.graph[idx].clone())
                .collect()),
            Err(cycle) => Err(CoreError::CircularDependency {
                cycle: self.find_cycle_path(cycle.node_id()),
            }),
        }
    }

    /// Direct predecessors of a unit.
    pub fn predecessors(&self, unit: &str) -> Vec<String> {
        if let Some(&idx) = self.node_map.get(unit) {
            self.graph
                .edges_directed(idx, petgraph::Direction::Incoming)
                .map(|e| self.graph[e.source()].clone())
                .collect()
        } else {
            Vec::new()
        }
    }

    pub fn contains(&self, unit: &str) -> bool {
        self.node_map.contains_key(unit)
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Walk edges from a node that participates in a cycle to produce a
    /// readable `a -> b -> a` path for the error message.
    fn find_cycle_path(&self, start: NodeIndex) -> String {
        let mut path: Vec<String> = vec![self.graph[start].clone()];
        let mut current = start;
        let mut visited = HashSet::new();
        visited.insert(current);

        while let Some(edge) = self.graph.edges(current).next() {
            let target = edge.target();
            path.push(self.graph[target].clone());

            if target == start || visited.contains(&target) {
                break;
            }

            visited.insert(target);
            current = target;
        }

        path.join(" -> ")
    }
}

#[cfg(test)]
#[path = "dag_test.rs"]
mod tests;

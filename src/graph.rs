//! Dual graph of the carved maze

use std::collections::{BTreeMap, HashMap};

use petgraph::algo::{astar, connected_components};
use petgraph::graph::NodeIndex;
use petgraph::{Graph, Undirected};

use crate::geometry::Cell;

/// Cells connected by carved (wall free) edges
///
/// Nodes iterate in ascending (row, col) order, neighbours in the order the
/// edges were added. Every edge is stored on both endpoints.
#[derive(PartialEq, Eq, Clone, Debug, Default)]
pub struct MazeGraph {
    adjacency: BTreeMap<Cell, Vec<Cell>>,
}

impl MazeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node without edges, if not already present
    pub fn add_node(&mut self, cell: Cell) {
        self.adjacency.entry(cell).or_default();
    }

    /// Add undirected edge a <--> b
    pub fn add_edge(&mut self, a: Cell, b: Cell) {
        self.adjacency.entry(a).or_default().push(b);
        self.adjacency.entry(b).or_default().push(a);
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.adjacency.contains_key(&cell)
    }

    pub fn neighbors(&self, cell: Cell) -> &[Cell] {
        self.adjacency.get(&cell).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn degree(&self, cell: Cell) -> usize {
        self.neighbors(cell).len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = Cell> + '_ {
        self.adjacency.keys().copied()
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum::<usize>() / 2
    }

    /// Cells with exactly one carved edge
    pub fn dead_ends(&self) -> Vec<Cell> {
        self.adjacency
            .iter()
            .filter(|(_, neighbors)| neighbors.len() == 1)
            .map(|(cell, _)| *cell)
            .collect()
    }

    /// Undirected petgraph view; node weights are the cells
    pub fn to_petgraph(&self) -> (Graph<Cell, (), Undirected>, HashMap<Cell, NodeIndex>) {
        let mut graph = Graph::new_undirected();
        let index: HashMap<Cell, NodeIndex> = self
            .nodes()
            .map(|cell| (cell, graph.add_node(cell)))
            .collect();
        for (cell, neighbors) in &self.adjacency {
            // Each edge is stored twice; add it from the smaller endpoint only
            for next in neighbors.iter().filter(|next| *next > cell) {
                graph.add_edge(index[cell], index[next], ());
            }
        }
        (graph, index)
    }

    /// Connected, acyclic and non-empty
    pub fn is_spanning_tree(&self) -> bool {
        let (graph, _) = self.to_petgraph();
        graph.node_count() > 0
            && graph.edge_count() == graph.node_count() - 1
            && connected_components(&graph) == 1
    }

    /// Path from `from` to `to` along carved edges, both ends included
    pub fn path(&self, from: Cell, to: Cell) -> Option<Vec<Cell>> {
        let (graph, index) = self.to_petgraph();
        let (start, goal) = (*index.get(&from)?, *index.get(&to)?);
        let (_, nodes) = astar(
            &graph,
            start,
            |n| n == goal,
            |_| 1usize,
            |n| graph[n].manhattan(to),
        )?;
        Some(nodes.into_iter().map(|n| graph[n]).collect())
    }
}

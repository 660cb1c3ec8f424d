//! Cross-line shortest-path search.
//!
//! Every line's sections are assembled into one undirected weighted graph;
//! queries run Dijkstra over it (petgraph's `astar` with a zero estimate).
//! The graph is an immutable snapshot of the lines it was built from, so
//! queries are read-only and can run concurrently.

use std::collections::HashMap;

use itertools::Itertools;
use petgraph::algo::astar;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use tracing::debug;

use crate::identifiers::StationId;
use crate::models::line::Line;
use crate::models::types::{Result, SubwayError};

/// A computed route: station ids from source to target, plus the total
/// distance travelled.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoutePlan {
    pub stations: Vec<StationId>,
    pub distance: u64,
}

impl RoutePlan {
    /// Consecutive station pairs along the route.
    pub fn legs(&self) -> impl Iterator<Item = (StationId, StationId)> + '_ {
        self.stations.iter().copied().tuple_windows()
    }
}

/// Weighted-graph snapshot of the whole network.
///
/// Parallel edges from overlapping lines are all retained; the search
/// naturally prefers the lighter one.
pub struct NetworkGraph {
    graph: UnGraph<StationId, u32>,
    nodes: HashMap<StationId, NodeIndex>,
}

impl NetworkGraph {
    /// Build a graph from every section of every line.
    ///
    /// Deterministic in line and section order; a pure function of its
    /// input with no hidden repository state.
    pub fn from_lines(lines: &[Line]) -> Self {
        let mut graph = UnGraph::new_undirected();
        let mut nodes: HashMap<StationId, NodeIndex> = HashMap::new();

        for line in lines {
            for section in line.sections().sections() {
                let up = Self::intern(&mut graph, &mut nodes, section.up());
                let down = Self::intern(&mut graph, &mut nodes, section.down());
                graph.add_edge(up, down, section.distance());
            }
        }

        debug!(
            stations = graph.node_count(),
            edges = graph.edge_count(),
            "built network graph"
        );
        Self { graph, nodes }
    }

    fn intern(
        graph: &mut UnGraph<StationId, u32>,
        nodes: &mut HashMap<StationId, NodeIndex>,
        station: StationId,
    ) -> NodeIndex {
        *nodes
            .entry(station)
            .or_insert_with(|| graph.add_node(station))
    }

    pub fn contains(&self, station: StationId) -> bool {
        self.nodes.contains_key(&station)
    }

    pub fn station_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Minimum-total-distance route between two stations.
    ///
    /// Fails on a degenerate query (`source == target`), on a station the
    /// graph has never seen, and on an unreachable target.
    pub fn shortest_path(&self, source: StationId, target: StationId) -> Result<RoutePlan> {
        if source == target {
            return Err(SubwayError::SameStation(source));
        }
        let &from = self
            .nodes
            .get(&source)
            .ok_or(SubwayError::StationNotFound(source))?;
        let &to = self
            .nodes
            .get(&target)
            .ok_or(SubwayError::StationNotFound(target))?;

        let (distance, path) = astar(
            &self.graph,
            from,
            |node| node == to,
            |edge| u64::from(*edge.weight()),
            |_| 0,
        )
        .ok_or(SubwayError::NoPath {
            from: source,
            to: target,
        })?;

        let stations = path.into_iter().map(|idx| self.graph[idx]).collect();
        Ok(RoutePlan { stations, distance })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifiers::LineId;
    use crate::models::types::Section;

    const A: StationId = StationId::new(1);
    const B: StationId = StationId::new(2);
    const C: StationId = StationId::new(3);
    const D: StationId = StationId::new(4);
    const X: StationId = StationId::new(8);
    const Y: StationId = StationId::new(9);

    fn line(id: u64, sections: &[(StationId, StationId, u32)]) -> Line {
        let line_id = LineId::new(id);
        let mut line = Line::new(line_id, format!("Line {id}"), "green");
        for &(up, down, distance) in sections {
            line.add_section(Section::new(line_id, up, down, distance).unwrap())
                .unwrap();
        }
        line
    }

    #[test]
    fn test_shortest_path_on_single_line() {
        let lines = [line(1, &[(A, B, 10), (B, C, 4)])];
        let graph = NetworkGraph::from_lines(&lines);

        let route = graph.shortest_path(A, C).unwrap();

        assert_eq!(route.stations, vec![A, B, C]);
        assert_eq!(route.distance, 14);
    }

    #[test]
    fn test_shortest_path_crosses_lines() {
        // Line 1: A - B - C, line 2 branches at B towards D.
        let lines = [line(1, &[(A, B, 10), (B, C, 4)]), line(2, &[(B, D, 2)])];
        let graph = NetworkGraph::from_lines(&lines);

        let route = graph.shortest_path(A, D).unwrap();

        assert_eq!(route.stations, vec![A, B, D]);
        assert_eq!(route.distance, 12);
    }

    #[test]
    fn test_shortest_path_prefers_lighter_of_two_routes() {
        // Two ways from A to C: direct heavy edge on line 2, or via B.
        let lines = [line(1, &[(A, B, 3), (B, C, 4)]), line(2, &[(A, C, 20)])];
        let graph = NetworkGraph::from_lines(&lines);

        let route = graph.shortest_path(A, C).unwrap();

        assert_eq!(route.stations, vec![A, B, C]);
        assert_eq!(route.distance, 7);
    }

    #[test]
    fn test_parallel_edges_use_lighter_weight() {
        // Both lines run A - B; the search must take the 5, not the 9.
        let lines = [line(1, &[(A, B, 9)]), line(2, &[(A, B, 5)])];
        let graph = NetworkGraph::from_lines(&lines);

        let route = graph.shortest_path(A, B).unwrap();

        assert_eq!(route.distance, 5);
    }

    #[test]
    fn test_paths_are_undirected() {
        let lines = [line(1, &[(A, B, 10), (B, C, 4)])];
        let graph = NetworkGraph::from_lines(&lines);

        let route = graph.shortest_path(C, A).unwrap();

        assert_eq!(route.stations, vec![C, B, A]);
        assert_eq!(route.distance, 14);
    }

    #[test]
    fn test_same_station_query_fails() {
        let lines = [line(1, &[(A, B, 10)])];
        let graph = NetworkGraph::from_lines(&lines);

        assert_eq!(
            graph.shortest_path(A, A),
            Err(SubwayError::SameStation(A))
        );
    }

    #[test]
    fn test_unknown_station_fails() {
        let lines = [line(1, &[(A, B, 10)])];
        let graph = NetworkGraph::from_lines(&lines);

        assert_eq!(
            graph.shortest_path(A, X),
            Err(SubwayError::StationNotFound(X))
        );
        assert_eq!(
            graph.shortest_path(X, A),
            Err(SubwayError::StationNotFound(X))
        );
    }

    #[test]
    fn test_disjoint_lines_have_no_path() {
        let lines = [line(1, &[(A, B, 10)]), line(2, &[(X, Y, 3)])];
        let graph = NetworkGraph::from_lines(&lines);

        assert_eq!(
            graph.shortest_path(A, Y),
            Err(SubwayError::NoPath { from: A, to: Y })
        );
    }

    #[test]
    fn test_route_distance_matches_leg_weights() {
        let lines = [line(1, &[(A, B, 10), (B, C, 4), (C, D, 6)])];
        let graph = NetworkGraph::from_lines(&lines);

        let route = graph.shortest_path(A, D).unwrap();

        let legs: Vec<_> = route.legs().collect();
        assert_eq!(legs, vec![(A, B), (B, C), (C, D)]);
        assert_eq!(route.distance, 20);
    }

    #[test]
    fn test_graph_reflects_mid_chain_edits() {
        let mut edited = line(1, &[(A, B, 10)]);
        let line_id = edited.id();
        edited
            .add_section(Section::new(line_id, A, C, 7).unwrap())
            .unwrap();

        let lines = [edited];
        let graph = NetworkGraph::from_lines(&lines);

        // The split replaced A-10-B with A-7-C and C-3-B.
        let route = graph.shortest_path(A, B).unwrap();
        assert_eq!(route.stations, vec![A, C, B]);
        assert_eq!(route.distance, 10);
    }
}

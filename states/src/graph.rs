use std::{
    collections::{BTreeMap, BTreeSet, VecDeque},
    fmt::{Debug, Formatter},
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TopologyError<T>
where
    T: Debug,
{
    #[error("Cycle detected in dependency graph, from {:?}", .0)]
    CycleDetected(DepRoute<T>),
    #[error("Duplicate edge detected in dependency graph, from {:?} to {:?}", .0.route[0], .0.route[1])]
    DuplicateEdge(DepRoute<T>),
}

pub struct DepRoute<T> {
    // first means the start node, last means the end node
    route: Vec<T>,
}

impl<T> DepRoute<T> {
    pub fn nodes(&self) -> &[T] {
        &self.route
    }
}

impl<T> Debug for DepRoute<T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let len = self.route.len();
        if len == 0 {
            return write!(f, "[]");
        }
        for item in &self.route[..len - 1] {
            write!(f, "{item:?} -> ")?;
        }
        write!(f, "{:?}", self.route[len - 1])
    }
}

/// Directed dependency graph. An edge `from -> to` means `to` depends on `from`.
#[derive(Debug)]
pub struct Graph<Node>
where
    Node: Debug + Copy + Ord,
{
    nodes: BTreeSet<Node>,
    edges: BTreeMap<Node, Vec<Node>>,
}

impl<Node> Default for Graph<Node>
where
    Node: Debug + Copy + Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<Node> Graph<Node>
where
    Node: Debug + Copy + Ord,
{
    pub fn new() -> Self {
        Self {
            nodes: BTreeSet::new(),
            edges: BTreeMap::new(),
        }
    }

    pub fn add_node(&mut self, node: Node) {
        self.nodes.insert(node);
    }

    pub fn route_to(&mut self, from: Node, to: Node) {
        self.nodes.insert(from);
        self.nodes.insert(to);
        self.edges.entry(from).or_default().push(to);
    }

    fn direct_dependents(&self, node: Node) -> Result<BTreeSet<Node>, TopologyError<Node>> {
        let mut collected = BTreeSet::new();
        for to in self.edges.get(&node).into_iter().flatten() {
            if !collected.insert(*to) {
                return Err(TopologyError::DuplicateEdge(DepRoute {
                    route: vec![node, *to],
                }));
            }
        }
        Ok(collected)
    }

    /// Kahn's algorithm. Ties are broken by node order so the result is stable.
    pub fn topology_sort(&self) -> Result<Vec<Node>, TopologyError<Node>> {
        let mut in_degree: BTreeMap<Node, usize> = self.nodes.iter().map(|n| (*n, 0)).collect();
        for node in &self.nodes {
            for to in self.direct_dependents(*node)? {
                *in_degree.entry(to).or_insert(0) += 1;
            }
        }

        let mut order = Vec::with_capacity(self.nodes.len());
        let mut ready: VecDeque<Node> = in_degree
            .iter()
            .filter(|(_, deg)| **deg == 0)
            .map(|(n, _)| *n)
            .collect();

        while let Some(node) = ready.pop_front() {
            order.push(node);
            for to in self.direct_dependents(node)? {
                if let Some(deg) = in_degree.get_mut(&to) {
                    *deg -= 1;
                    if *deg == 0 {
                        ready.push_back(to);
                    }
                }
            }
        }

        if order.len() == self.nodes.len() {
            return Ok(order);
        }

        let remaining: Vec<Node> = in_degree
            .into_iter()
            .filter(|(_, deg)| *deg > 0)
            .map(|(n, _)| n)
            .collect();
        let route = self.find_cycle(&remaining).unwrap_or_default();
        Err(TopologyError::CycleDetected(DepRoute { route }))
    }

    fn find_cycle(&self, nodes: &[Node]) -> Option<Vec<Node>> {
        let mut visited = BTreeSet::new();
        let mut path_set = BTreeSet::new();
        let mut path = Vec::new();
        let mut stack: Vec<(Node, std::vec::IntoIter<Node>)> = Vec::new();

        let neighbours = |node: Node| -> std::vec::IntoIter<Node> {
            self.edges
                .get(&node)
                .into_iter()
                .flatten()
                .copied()
                .filter(|n| nodes.contains(n))
                .collect::<Vec<_>>()
                .into_iter()
        };

        for &start in nodes {
            if !visited.insert(start) {
                continue;
            }
            stack.push((start, neighbours(start)));
            path_set.insert(start);
            path.push(start);

            while let Some((current, iter)) = stack.last_mut() {
                if let Some(next) = iter.next() {
                    if path_set.contains(&next) {
                        let pos = path.iter().position(|&x| x == next)?;
                        let mut cycle = path[pos..].to_vec();
                        cycle.push(next);
                        return Some(cycle);
                    }
                    if visited.insert(next) {
                        path_set.insert(next);
                        path.push(next);
                        stack.push((next, neighbours(next)));
                    }
                } else {
                    let done = *current;
                    stack.pop();
                    path_set.remove(&done);
                    path.pop();
                }
            }
        }
        None
    }

    /// Every node that transitively depends on `node`.
    pub fn dependents(&self, node: Node) -> BTreeSet<Node> {
        let mut collected = BTreeSet::new();
        let mut queue = VecDeque::from([node]);

        while let Some(current) = queue.pop_front() {
            for to in self.edges.get(&current).into_iter().flatten() {
                if collected.insert(*to) {
                    queue.push_back(*to);
                }
            }
        }

        collected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topology_sort_orders_dependencies_first() {
        let mut graph: Graph<u32> = Graph::new();
        graph.route_to(1, 2);
        graph.route_to(2, 3);
        graph.route_to(1, 3);

        let order = graph.topology_sort().expect("acyclic graph sorts");
        assert_eq!(order, vec![1, 2, 3]);
    }

    #[test]
    fn isolated_nodes_are_kept() {
        let mut graph: Graph<u32> = Graph::new();
        graph.add_node(7);
        graph.route_to(1, 2);

        let order = graph.topology_sort().expect("acyclic graph sorts");
        assert_eq!(order.len(), 3);
        assert!(order.contains(&7));
    }

    #[test]
    fn cycle_is_reported_with_route() {
        let mut graph: Graph<u32> = Graph::new();
        graph.route_to(1, 2);
        graph.route_to(2, 3);
        graph.route_to(3, 1);

        match graph.topology_sort() {
            Err(TopologyError::CycleDetected(route)) => {
                let rendered = format!("{route:?}");
                assert!(rendered.contains("->"));
                assert_eq!(route.nodes().first(), route.nodes().last());
            }
            other => panic!("expected CycleDetected, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_edge_is_rejected() {
        let mut graph: Graph<u32> = Graph::new();
        graph.route_to(1, 2);
        graph.route_to(1, 2);

        let err = graph.topology_sort().expect_err("duplicate edge");
        assert!(err.to_string().contains("from 1 to 2"));
    }

    #[test]
    fn dependents_are_transitive() {
        let mut graph: Graph<u32> = Graph::new();
        graph.route_to(1, 2);
        graph.route_to(2, 3);
        graph.route_to(4, 3);

        let deps = graph.dependents(1);
        assert_eq!(deps.into_iter().collect::<Vec<_>>(), vec![2, 3]);
        assert!(graph.dependents(3).is_empty());
    }
}

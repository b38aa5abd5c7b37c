//! Node selection policies.
//!
//! The wire client does not track which member is primary, so routing is an
//! explicit policy rather than an accident of map iteration order.

/// Chooses which connected member receives the next request.
pub trait SelectionPolicy: Send {
    /// Pick an index into `nodes`, the connected member addresses in
    /// configured order. `nodes` is never empty.
    fn select(&mut self, nodes: &[&str]) -> usize;
}

/// Always routes to the first connected member in configured order.
///
/// Deterministic stand-in for primary selection when the caller lists the
/// primary first.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstNode;

impl SelectionPolicy for FirstNode {
    fn select(&mut self, _nodes: &[&str]) -> usize {
        0
    }
}

/// Rotates through connected members.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoundRobin {
    next: usize,
}

impl SelectionPolicy for RoundRobin {
    fn select(&mut self, nodes: &[&str]) -> usize {
        let index = self.next % nodes.len();
        self.next = self.next.wrapping_add(1);
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NODES: [&str; 3] = ["127.0.0.1:27105", "127.0.0.1:27106", "127.0.0.1:27107"];

    #[test]
    fn first_node_is_deterministic() {
        let mut policy = FirstNode;
        assert_eq!(policy.select(&NODES), 0);
        assert_eq!(policy.select(&NODES), 0);
        assert_eq!(policy.select(&NODES[..1]), 0);
    }

    #[test]
    fn round_robin_cycles_in_order() {
        let mut policy = RoundRobin::default();
        let picks: Vec<usize> = (0..6).map(|_| policy.select(&NODES)).collect();
        assert_eq!(picks, [0, 1, 2, 0, 1, 2]);
    }

    #[test]
    fn round_robin_adapts_to_fewer_nodes() {
        let mut policy = RoundRobin::default();
        policy.select(&NODES);
        policy.select(&NODES);
        // Two members left; selection stays in range.
        assert!(policy.select(&NODES[..2]) < 2);
        assert!(policy.select(&NODES[..2]) < 2);
    }
}

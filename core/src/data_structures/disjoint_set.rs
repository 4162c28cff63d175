//! Weighted union-find over dense vertex indices
//!
//! During one augmenting-path search every blossom is named by the leader of
//! its set. Sets are merged by weight (member count) and every `find`
//! compresses the path it walks, so a search performs near-constant amortized
//! work per lookup.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

/// Disjoint-set forest with path compression and union by weight
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
    weight: Vec<usize>,
}

impl DisjointSet {
    /// Creates `n` singleton sets, one per index in `0..n`
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            weight: vec![1; n],
        }
    }

    /// Number of indices the forest currently covers
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Singleton sets for every index up to and including `node`
    fn ensure(&mut self, node: usize) {
        if node >= self.parent.len() {
            let start = self.parent.len();
            self.parent.extend(start..=node);
            self.weight.resize(node + 1, 1);
        }
    }

    /// Returns the leader of the set containing `node`.
    ///
    /// Unseen indices become singleton sets of weight 1.
    pub fn find(&mut self, mut node: usize) -> usize {
        self.ensure(node);

        let mut root = node;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        while self.parent[node] != node {
            let parent = self.parent[node];
            self.parent[node] = root;
            node = parent;
        }

        root
    }

    /// Merges the sets of every listed node and returns the surviving leader.
    ///
    /// The leader with the greatest `(weight, index)` survives. Returns `None`
    /// only when `nodes` is empty.
    pub fn union(&mut self, nodes: &[usize]) -> Option<usize> {
        let leaders: Vec<usize> = nodes.iter().map(|&node| self.find(node)).collect();
        let heaviest = leaders
            .iter()
            .copied()
            .max_by_key(|&leader| (self.weight[leader], leader))?;

        for leader in leaders {
            if leader != heaviest && self.parent[leader] == leader {
                self.weight[heaviest] += self.weight[leader];
                self.parent[leader] = heaviest;
            }
        }

        Some(heaviest)
    }

    /// Member count of the set containing `node`
    pub fn weight(&mut self, node: usize) -> usize {
        let leader = self.find(node);
        self.weight[leader]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_creates_singletons() {
        let mut sets = DisjointSet::new(2);
        assert_eq!(sets.find(0), 0);
        assert_eq!(sets.find(5), 5);
        assert_eq!(sets.len(), 6);
        assert_eq!(sets.weight(5), 1);
    }

    #[test]
    fn test_union_prefers_heavier_leader() {
        let mut sets = DisjointSet::new(6);
        let big = sets.union(&[0, 1, 2]).unwrap();
        let merged = sets.union(&[4, big]).unwrap();

        assert_eq!(merged, big);
        assert_eq!(sets.weight(4), 4);
        for node in [0, 1, 2, 4] {
            assert_eq!(sets.find(node), big);
        }
        assert_eq!(sets.find(3), 3);
    }

    #[test]
    fn test_union_tie_breaks_on_index() {
        let mut sets = DisjointSet::new(4);
        assert_eq!(sets.union(&[1, 3]), Some(3));
        assert_eq!(sets.union(&[0, 2]), Some(2));
        // equal weights of two: the larger leader index wins
        assert_eq!(sets.union(&[0, 1]), Some(3));
        assert_eq!(sets.weight(2), 4);
    }

    #[test]
    fn test_union_with_repeated_members() {
        let mut sets = DisjointSet::new(3);
        let leader = sets.union(&[0, 1, 0, 1]).unwrap();
        assert_eq!(sets.weight(leader), 2);
        assert_eq!(sets.union(&[]), None);
    }

    #[test]
    fn test_path_compression() {
        let mut sets = DisjointSet::new(5);
        sets.union(&[0, 1]);
        sets.union(&[2, 3]);
        let leader = sets.union(&[1, 3]).unwrap();
        sets.union(&[4, leader]);

        let root = sets.find(0);
        assert_eq!(sets.parent[0], root);
        assert_eq!(sets.weight(0), 5);
    }
}

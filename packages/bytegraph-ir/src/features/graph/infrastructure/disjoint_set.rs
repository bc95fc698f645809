//! Disjoint Set (Union-Find) over a dense integer domain
//!
//! - Path compression: near O(1) amortized `find`
//! - Union by rank: balanced trees
//! - `pack`: collapse into canonical class ids `0..K`
//!
//! `find` is iterative (two passes: locate the root, then repoint the path),
//! so arbitrarily long chains built from machine-generated code cannot
//! overflow the call stack.
//!
//! # References
//! - Tarjan, R. E. "Efficiency of a Good But Not Linear Set Union Algorithm" (1975)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisjointSet {
    /// Parent pointers (self-loop = root)
    parent: Vec<usize>,

    /// Rank (tree height upper bound) for union by rank
    rank: Vec<u8>,

    /// Number of disjoint classes
    class_count: usize,
}

impl DisjointSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// `count` singleton classes `0..count`
    pub fn with_size(count: usize) -> Self {
        Self {
            parent: (0..count).collect(),
            rank: vec![0; count],
            class_count: count,
        }
    }

    /// Allocate a new singleton class and return its element index
    pub fn create(&mut self) -> usize {
        let id = self.parent.len();
        self.parent.push(id);
        self.rank.push(0);
        self.class_count += 1;
        id
    }

    /// Representative of `x`'s class, compressing the path on the way
    ///
    /// Elements not yet created are materialised as singletons.
    pub fn find(&mut self, x: usize) -> usize {
        self.ensure(x + 1);

        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut current = x;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    /// Merge the classes of `a` and `b`; returns the new representative
    pub fn union(&mut self, a: usize, b: usize) -> usize {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return root_a;
        }

        let new_root = match self.rank[root_a].cmp(&self.rank[root_b]) {
            std::cmp::Ordering::Less => {
                self.parent[root_a] = root_b;
                root_b
            }
            std::cmp::Ordering::Greater => {
                self.parent[root_b] = root_a;
                root_a
            }
            std::cmp::Ordering::Equal => {
                self.parent[root_b] = root_a;
                self.rank[root_a] = self.rank[root_a].saturating_add(1);
                root_a
            }
        };

        self.class_count -= 1;
        new_root
    }

    #[inline]
    pub fn connected(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }

    /// Canonical class ids for elements `0..count`
    ///
    /// Ids are dense (`0..K`, K = number of distinct classes among those
    /// elements) and assigned in order of first appearance, so the result is
    /// deterministic for a given union history.
    pub fn pack(&mut self, count: usize) -> Vec<usize> {
        const UNASSIGNED: usize = usize::MAX;

        self.ensure(count);
        let mut class_of_root = vec![UNASSIGNED; self.parent.len()];
        let mut next_class = 0;
        let mut packed = Vec::with_capacity(count);
        for element in 0..count {
            let root = self.find(element);
            if class_of_root[root] == UNASSIGNED {
                class_of_root[root] = next_class;
                next_class += 1;
            }
            packed.push(class_of_root[root]);
        }
        packed
    }

    /// Number of disjoint classes
    #[inline]
    pub fn class_count(&self) -> usize {
        self.class_count
    }

    /// Total number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    fn ensure(&mut self, count: usize) {
        while self.parent.len() < count {
            self.create();
        }
    }
}

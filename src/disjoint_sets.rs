//! Array-based union-find with path compression and a smaller-root-wins merge rule.

use hashbrown::HashMap;

/// Union-find over the dense universe `[0, n)`.
///
/// The representative of a merged pair is always the smaller of the two
/// roots — callers (notably [`crate::contraction_graph::DynamicContractionGraph`])
/// depend on this to decide which of two contracted nodes stays "alive".
#[derive(Debug, Clone)]
pub struct DisjointSets {
    parent: Vec<usize>,
    num_sets: usize,
}

impl DisjointSets {
    /// Builds a fresh union-find over `[0, n)`, every element its own set.
    pub fn new(n: usize) -> Self {
        let mut ds = DisjointSets {
            parent: Vec::new(),
            num_sets: 0,
        };
        ds.reset(n);
        ds
    }

    /// Resets to `n` singleton sets, reusing the backing storage.
    pub fn reset(&mut self, n: usize) {
        self.parent.clear();
        self.parent.extend(0..n);
        self.num_sets = n;
    }

    /// Finds the representative of `x`'s set, compressing the path as it goes.
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut cur = x;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    /// Merges the sets containing `x` and `y`. The new root is the smaller
    /// of the two previous roots; if they already agree, this is a no-op.
    /// Returns the resulting root.
    pub fn merge(&mut self, x: usize, y: usize) -> usize {
        let rx = self.find(x);
        let ry = self.find(y);
        if rx == ry {
            return rx;
        }
        self.num_sets -= 1;
        let (small, big) = if rx < ry { (rx, ry) } else { (ry, rx) };
        self.parent[big] = small;
        small
    }

    /// Number of distinct sets currently tracked.
    pub fn number_of_sets(&self) -> usize {
        self.num_sets
    }

    /// Fills `out` with a mapping from each distinct root to a dense id in
    /// `[0, number_of_sets())`, assigned in ascending order of the root id.
    pub fn representative_labeling(&mut self, out: &mut HashMap<usize, usize>) {
        out.clear();
        let n = self.parent.len();
        let mut roots: Vec<usize> = (0..n).map(|x| self.find(x)).collect();
        roots.sort_unstable();
        roots.dedup();
        for (dense_id, root) in roots.into_iter().enumerate() {
            out.insert(root, dense_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn singletons_are_their_own_root() {
        let mut ds = DisjointSets::new(5);
        for i in 0..5 {
            assert_eq!(ds.find(i), i);
        }
        assert_eq!(ds.number_of_sets(), 5);
    }

    #[test]
    fn merge_picks_smaller_root() {
        // S6: merge(3,1) -> find(3) == 1; merge(1,5) -> find(5) == 1.
        let mut ds = DisjointSets::new(6);
        ds.merge(3, 1);
        assert_eq!(ds.find(3), 1);
        ds.merge(1, 5);
        assert_eq!(ds.find(5), 1);
        assert_eq!(ds.number_of_sets(), 4);
    }

    #[test]
    fn merge_of_equal_roots_is_noop() {
        let mut ds = DisjointSets::new(3);
        ds.merge(0, 1);
        let sets_before = ds.number_of_sets();
        let root = ds.merge(0, 1);
        assert_eq!(root, ds.find(0));
        assert_eq!(ds.number_of_sets(), sets_before);
    }

    #[test]
    fn representative_labeling_is_dense_and_ascending() {
        let mut ds = DisjointSets::new(6);
        ds.merge(0, 2);
        ds.merge(4, 5);
        let mut mapping = HashMap::new();
        ds.representative_labeling(&mut mapping);
        assert_eq!(mapping.len(), ds.number_of_sets());
        // roots are 0, 1, 3, 4 in ascending order -> dense ids 0,1,2,3
        assert_eq!(mapping[&0], 0);
        assert_eq!(mapping[&1], 1);
        assert_eq!(mapping[&3], 2);
        assert_eq!(mapping[&4], 3);
    }

    #[test]
    fn reset_restores_singletons() {
        let mut ds = DisjointSets::new(4);
        ds.merge(0, 1);
        ds.reset(4);
        assert_eq!(ds.number_of_sets(), 4);
        for i in 0..4 {
            assert_eq!(ds.find(i), i);
        }
    }
}

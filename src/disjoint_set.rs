/// Union-find over `0..size` with path compression and a live component count.
pub struct DisjointSet {
    parent: Vec<usize>,
    components: usize,
}

impl DisjointSet {
    /// Creates `size` singleton sets.
    pub fn new(size: usize) -> Self {
        DisjointSet {
            parent: (0..size).collect(),
            components: size,
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Returns the root of `x`'s set, re-pointing every node on the way directly at it.
    ///
    /// # Panics
    /// If `x` is out of range.
    pub fn find(&mut self, x: usize) -> usize {
        assert!(x < self.parent.len(), "disjoint set index {x} out of range");
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    /// Attaches the root of `x`'s set under the root of `y`'s set.
    /// Returns `false` if they were already in the same set.
    pub fn union(&mut self, x: usize, y: usize) -> bool {
        let root_x = self.find(x);
        let root_y = self.find(y);
        if root_x == root_y {
            return false; // Already in same set
        }
        self.parent[root_x] = root_y;
        self.components -= 1;
        true
    }

    /// Number of distinct sets, i.e. indices that are their own root.
    pub fn count(&self) -> usize {
        self.components
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    fn self_rooted(ds: &DisjointSet) -> usize {
        ds.parent.iter().enumerate().filter(|&(i, &p)| i == p).count()
    }

    #[test]
    fn test_singletons() {
        let mut ds = DisjointSet::new(5);
        assert_eq!(ds.count(), 5);
        for i in 0..5 {
            assert_eq!(ds.find(i), i);
        }
    }

    #[test]
    fn test_union_attaches_x_under_y() {
        let mut ds = DisjointSet::new(4);
        assert!(ds.union(0, 1));
        assert_eq!(ds.find(0), 1);
        assert!(ds.union(2, 0));
        assert_eq!(ds.find(2), 1);
        assert!(!ds.union(2, 1));
        assert_eq!(ds.count(), 2);
    }

    #[test]
    fn test_find_compresses_chain() {
        let mut ds = DisjointSet::new(6);
        // Builds the chain 0 -> 1 -> 2 -> 3 -> 4 -> 5.
        for i in 0..5 {
            ds.union(i, i + 1);
        }
        let root = ds.find(0);
        assert_eq!(root, 5);
        assert!(ds.parent.iter().all(|&p| p == root));
        // Idempotent.
        assert_eq!(ds.find(0), root);
    }

    #[test]
    fn test_laws_against_naive_labels() {
        let mut rng = StdRng::seed_from_u64(7);
        let size = 40;
        let mut ds = DisjointSet::new(size);
        let mut labels = (0..size).collect::<Vec<_>>();
        for _ in 0..60 {
            let (x, y) = (rng.random_range(0..size), rng.random_range(0..size));
            let before = ds.count();
            let merged = ds.union(x, y);
            let (lx, ly) = (labels[x], labels[y]);
            assert_eq!(merged, lx != ly);
            if merged {
                labels.iter_mut().filter(|l| **l == lx).for_each(|l| *l = ly);
                assert_eq!(ds.count(), before - 1);
            } else {
                assert_eq!(ds.count(), before);
            }
            assert_eq!(ds.count(), self_rooted(&ds));
        }
        for x in 0..size {
            for y in 0..size {
                assert_eq!(ds.find(x) == ds.find(y), labels[x] == labels[y]);
            }
        }
    }

    #[test]
    #[should_panic]
    fn test_out_of_range_panics() {
        let mut ds = DisjointSet::new(3);
        ds.find(3);
    }
}

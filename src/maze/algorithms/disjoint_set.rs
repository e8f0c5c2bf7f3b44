use std::collections::HashMap;

use thiserror::Error;

use crate::dims::Dims;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DisjointSetError {
    #[error("tile {0:?} was never registered with make_set")]
    UnknownTile(Dims),
}

/// Union-find over tile positions, used during generation to track which
/// tiles are already connected. Union by attachment, path compression on
/// find.
#[derive(Debug, Default)]
pub struct DisjointSet {
    parent: HashMap<Dims, Dims>,
}

impl DisjointSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tile as its own root. Must happen before any other call
    /// involving that tile.
    pub fn make_set(&mut self, tile: Dims) {
        self.parent.entry(tile).or_insert(tile);
    }

    /// Representative root of the tile's set. Every node on the way is
    /// re-parented directly to the root.
    pub fn find(&mut self, tile: Dims) -> Result<Dims, DisjointSetError> {
        let mut root = tile;
        loop {
            let parent = *self
                .parent
                .get(&root)
                .ok_or(DisjointSetError::UnknownTile(root))?;
            if parent == root {
                break;
            }
            root = parent;
        }

        let mut node = tile;
        while node != root {
            let parent = self.parent[&node];
            self.parent.insert(node, root);
            node = parent;
        }

        Ok(root)
    }

    /// Merges the two sets by attaching one root under the other. A no-op
    /// when the tiles already share a root.
    pub fn union(&mut self, a: Dims, b: Dims) -> Result<(), DisjointSetError> {
        let root_a = self.find(a)?;
        let root_b = self.find(b)?;
        if root_a != root_b {
            self.parent.insert(root_a, root_b);
        }
        Ok(())
    }

    pub fn connected(&mut self, a: Dims, b: Dims) -> Result<bool, DisjointSetError> {
        Ok(self.find(a)? == self.find(b)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn singleton_is_its_own_root() {
        let mut sets = DisjointSet::new();
        sets.make_set(Dims(0, 0));
        assert_eq!(sets.find(Dims(0, 0)).unwrap(), Dims(0, 0));
    }

    #[test]
    fn union_connects() {
        let mut sets = DisjointSet::new();
        for pos in [Dims(0, 0), Dims(0, 1), Dims(1, 0)] {
            sets.make_set(pos);
        }

        assert!(!sets.connected(Dims(0, 0), Dims(0, 1)).unwrap());
        sets.union(Dims(0, 0), Dims(0, 1)).unwrap();
        assert!(sets.connected(Dims(0, 0), Dims(0, 1)).unwrap());
        assert!(!sets.connected(Dims(0, 0), Dims(1, 0)).unwrap());

        sets.union(Dims(0, 1), Dims(1, 0)).unwrap();
        assert!(sets.connected(Dims(0, 0), Dims(1, 0)).unwrap());
    }

    #[test]
    fn union_is_idempotent() {
        let mut sets = DisjointSet::new();
        sets.make_set(Dims(0, 0));
        sets.make_set(Dims(0, 1));
        sets.union(Dims(0, 0), Dims(0, 1)).unwrap();
        sets.union(Dims(0, 1), Dims(0, 0)).unwrap();
        assert!(sets.connected(Dims(0, 0), Dims(0, 1)).unwrap());
    }

    #[test]
    fn find_compresses_chains() {
        let mut sets = DisjointSet::new();
        let chain = [Dims(0, 0), Dims(0, 1), Dims(0, 2), Dims(0, 3)];
        for pos in chain {
            sets.make_set(pos);
        }
        for pair in chain.windows(2) {
            sets.union(pair[0], pair[1]).unwrap();
        }

        let root = sets.find(chain[0]).unwrap();
        for pos in chain {
            // idempotent and all pointing at the same root after compression
            assert_eq!(sets.find(pos).unwrap(), root);
            assert_eq!(sets.parent[&pos], root);
        }
    }

    #[test]
    fn unregistered_tile_is_an_error() {
        let mut sets = DisjointSet::new();
        sets.make_set(Dims(0, 0));

        assert_eq!(
            sets.find(Dims(5, 5)).unwrap_err(),
            DisjointSetError::UnknownTile(Dims(5, 5))
        );
        assert_eq!(
            sets.union(Dims(0, 0), Dims(5, 5)).unwrap_err(),
            DisjointSetError::UnknownTile(Dims(5, 5))
        );
        assert!(sets.connected(Dims(5, 5), Dims(0, 0)).is_err());
    }

    #[test]
    fn make_set_does_not_reset_membership() {
        let mut sets = DisjointSet::new();
        sets.make_set(Dims(0, 0));
        sets.make_set(Dims(0, 1));
        sets.union(Dims(0, 0), Dims(0, 1)).unwrap();
        sets.make_set(Dims(0, 0));
        assert!(sets.connected(Dims(0, 0), Dims(0, 1)).unwrap());
    }
}

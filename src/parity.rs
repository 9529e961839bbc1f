use log::{debug, info};

use crate::coloring::{Assignment, Conflict, START_GROUP};
use crate::graph::ConstraintGraph;
use crate::relation::{Group, Relation};

/**
 * Weighted quick-union, with path compression, where every element also
 * stores the parity of its group relative to its leader's group.
 *
 * Two elements of the same set are in the same group when their parities
 * (relative to the shared leader) are equal, and in opposite groups when they
 * differ. Constraints can be added one at a time, so this is an incremental
 * alternative to the traversal in 'TwoColoring'.
 *
 * | Operation | Cost             |
 * | --------- | ---------------- |
 * | 'new'     | N                |
 * | 'relate'  | a(N), amortised  |
 * | 'find'    | a(N), amortised  |
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParityUnionFind {
    leaders: Vec<usize>,
    parities: Vec<bool>,
    sizes: Vec<usize>,
    count: usize,
}

impl ParityUnionFind {
    /// Creates 'n' singleton sets, '{0}, {1}, ..., {n-1}'.
    pub fn new(n: usize) -> Self {
        Self {
            leaders: (0..n).collect(),
            parities: vec![false; n],
            sizes: vec![1; n],
            count: n,
        }
    }

    pub fn len(&self) -> usize {
        self.leaders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaders.is_empty()
    }

    /// Number of disjoint sets.
    pub fn count(&self) -> usize {
        self.count
    }

    /**
     *  Returns the leader of 'p', and the parity of 'p' relative to it. Every
     *  element on the path is re-parented directly onto the leader.
     */
    pub fn find(&mut self, p: usize) -> (usize, bool) {
        let mut root = p;
        let mut parity = false;
        while self.leaders[root] != root {
            parity ^= self.parities[root];
            root = self.leaders[root];
        }

        // Path compression.
        let mut x = p;
        let mut remaining = parity;
        while x != root {
            let next = self.leaders[x];
            let next_remaining = remaining ^ self.parities[x];
            self.leaders[x] = root;
            self.parities[x] = remaining;
            x = next;
            remaining = next_remaining;
        }

        (root, parity)
    }

    pub fn connected(&mut self, p: usize, q: usize) -> bool {
        self.find(p).0 == self.find(q).0
    }

    /**
     *  Adds the constraint that 'p' and 'q' are related by 'relation'.
     *
     *  When both are already in the same set, the constraint is only checked.
     *  Otherwise the smaller set is attached beneath the larger one, with its
     *  root's parity chosen so that the new constraint holds. A violated
     *  constraint leaves the structure unchanged.
     */
    pub fn relate(&mut self, p: usize, q: usize, relation: Relation) -> Result<(), Conflict> {
        let (p_leader, p_parity) = self.find(p);
        let (q_leader, q_parity) = self.find(q);

        if p_leader == q_leader {
            if p_parity ^ q_parity == relation.parity() {
                return Ok(());
            }
            return Err(Conflict {
                vertex: p,
                neighbour: q,
                relation,
            });
        }

        let (root, child) = if self.sizes[p_leader] < self.sizes[q_leader] {
            (q_leader, p_leader)
        } else {
            (p_leader, q_leader)
        };
        self.leaders[child] = root;
        self.parities[child] = p_parity ^ q_parity ^ relation.parity();
        self.sizes[root] += self.sizes[child];
        self.count -= 1;
        Ok(())
    }

    /**
     *  Places every element in a group according to its parity relative to
     *  its leader; leaders are in 'START_GROUP'.
     */
    pub fn assignment(&mut self) -> Assignment {
        let groups: Vec<Group> = (0..self.len())
            .map(|p| match self.find(p).1 {
                false => START_GROUP,
                true => START_GROUP.opposite(),
            })
            .collect();
        Assignment::from_groups(groups)
    }

    /**
     *  Feeds every edge of the graph, in input order, and stops at the first
     *  edge that contradicts those before it.
     */
    pub fn check(graph: &ConstraintGraph) -> Result<Self, Conflict> {
        let mut sets = Self::new(graph.num_vertices());
        for &(u, v, relation) in graph.edges().iter() {
            if let Err(conflict) = sets.relate(u, v, relation) {
                info!("{}", conflict);
                return Err(conflict);
            }
        }
        debug!("consistent: {} disjoint sets", sets.count());
        Ok(sets)
    }
}

use crate::relation::Relation;
use std::fmt;

/**
 * Undirected graph whose edges carry an equal/opposite constraint.
 *
 * The adjacency lists are stored in the same layout as Compressed Row Sparse
 * (CRS) matrices: the neighbours of vertex 'v' are the entries
 * 'neighbours[offsets[v]..offsets[v + 1]]'. Each edge '(u, v)' is stored in
 * both rows, except for self-loops, which are stored once. The graph is built
 * in one go from the list of edges, and is never modified afterwards.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintGraph {
    num_vertices: usize,
    edges: Vec<(usize, usize, Relation)>,
    offsets: Vec<usize>,
    neighbours: Vec<(usize, Relation)>,
}

impl fmt::Display for ConstraintGraph {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "ConstraintGraph {{")?;
        writeln!(f, "    num_vertices: {}", self.num_vertices)?;
        writeln!(f, "    num_edges: {}", self.edges.len())?;
        writeln!(f, "    adjacency {{")?;
        for v in 0..self.num_vertices {
            write!(f, "        {:3}:", v)?;
            for (u, relation) in self.neighbours(v) {
                let sign = match relation {
                    Relation::Equal => '=',
                    Relation::Opposite => '!',
                };
                write!(f, " {}{}", sign, u)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "    }}")?;
        writeln!(f, "}}")
    }
}

impl ConstraintGraph {
    /**
     *  Builds the graph from a list of '(u, v, relation)' edges.
     *
     *  Panics if an edge refers to a vertex outside of '0..num_vertices', or
     *  if 'num_vertices' is 'usize::MAX'; the input parser checks both before
     *  calling this.
     */
    pub fn new(num_vertices: usize, edges: Vec<(usize, usize, Relation)>) -> Self {
        assert!(num_vertices < usize::MAX, "too many vertices: {}", num_vertices);
        let mut offsets: Vec<usize> = vec![0; num_vertices + 1];
        for &(u, v, _) in edges.iter() {
            assert!(
                u < num_vertices && v < num_vertices,
                "edge {} -> {} out of range (vertices: {})",
                u,
                v,
                num_vertices
            );
            offsets[u + 1] += 1;
            if u != v {
                offsets[v + 1] += 1;
            }
        }
        for i in 0..num_vertices {
            offsets[i + 1] += offsets[i];
        }

        // Fill each row in input order, using a moving cursor per vertex.
        let mut cursor: Vec<usize> = offsets[..num_vertices].to_vec();
        let mut neighbours = vec![(0, Relation::Equal); offsets[num_vertices]];
        for &(u, v, relation) in edges.iter() {
            neighbours[cursor[u]] = (v, relation);
            cursor[u] += 1;
            if u != v {
                neighbours[cursor[v]] = (u, relation);
                cursor[v] += 1;
            }
        }

        Self {
            num_vertices,
            edges,
            offsets,
            neighbours,
        }
    }

    /// Graph with no edges.
    pub fn empty(num_vertices: usize) -> Self {
        Self::new(num_vertices, Vec::new())
    }

    // -- PUBLIC QUERY FUNCTIONS -- //

    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// The edges, in the order that they were given.
    pub fn edges(&self) -> &[(usize, usize, Relation)] {
        &self.edges
    }

    pub fn neighbours(&self, vertex: usize) -> impl Iterator<Item = (usize, Relation)> + '_ {
        self.row(vertex).iter().copied()
    }

    pub fn degree(&self, vertex: usize) -> usize {
        self.row(vertex).len()
    }

    pub fn is_isolated(&self, vertex: usize) -> bool {
        self.degree(vertex) == 0
    }

    fn row(&self, vertex: usize) -> &[(usize, Relation)] {
        &self.neighbours[self.offsets[vertex]..self.offsets[vertex + 1]]
    }
}

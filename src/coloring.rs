use log::{debug, info, trace};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::graph::ConstraintGraph;
use crate::relation::{Group, Relation};

/// Group given to the first vertex of every newly-visited component.
pub const START_GROUP: Group = Group::A;

/**
 * An edge whose constraint cannot hold, given the groups that the constraints
 * seen before it have already forced.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("edge {vertex} -> {neighbour} requires '{relation}' groups, which contradicts earlier constraints")]
pub struct Conflict {
    pub vertex: usize,
    pub neighbour: usize,
    pub relation: Relation,
}

#[derive(Debug, Error)]
pub enum WitnessError {
    #[error("failed to write witness file '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialise witness: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/**
 * Group assignment for each vertex of a graph; vertices that have not been
 * reached yet are 'None'.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    groups: Vec<Option<Group>>,
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[")?;
        for (v, group) in self.iter() {
            if v > 0 {
                write!(f, " ")?;
            }
            match group {
                Some(g) => write!(f, "{}:{}", v, g)?,
                None => write!(f, "{}:-", v)?,
            }
        }
        write!(f, "]")
    }
}

struct Entry(usize, Option<Group>);

impl Serialize for Entry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Entry", 2)?;
        s.serialize_field("vertex", &self.0)?;
        s.serialize_field("group", &self.1)?;
        s.end()
    }
}

/// Serialised as a list of '{ vertex, group }' entries.
impl Serialize for Assignment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.groups.iter().enumerate().map(|(v, g)| Entry(v, *g)))
    }
}

impl Assignment {
    pub fn unassigned(num_vertices: usize) -> Self {
        Self {
            groups: vec![None; num_vertices],
        }
    }

    pub fn from_groups<I: IntoIterator<Item = Group>>(groups: I) -> Self {
        Self {
            groups: groups.into_iter().map(Some).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn group(&self, vertex: usize) -> Option<Group> {
        self.groups[vertex]
    }

    pub fn is_complete(&self) -> bool {
        self.groups.iter().all(Option::is_some)
    }

    pub fn count(&self, group: Group) -> usize {
        self.groups.iter().filter(|g| **g == Some(group)).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, Option<Group>)> + '_ {
        self.groups.iter().copied().enumerate()
    }

    /**
     *  Re-checks every edge of the graph against this assignment. Unassigned
     *  endpoints count as a violation.
     */
    pub fn satisfies(&self, graph: &ConstraintGraph) -> bool {
        graph.num_vertices() == self.groups.len()
            && graph.edges().iter().all(|&(u, v, relation)| {
                match (self.groups[u], self.groups[v]) {
                    (Some(a), Some(b)) => Relation::between(a, b) == relation,
                    _ => false,
                }
            })
    }

    /// Writes the assignment to a YAML file, as a list of '{ vertex, group }'.
    pub fn save(&self, path: &Path) -> Result<(), WitnessError> {
        let io_error = |source| WitnessError::Io {
            path: path.to_path_buf(),
            source,
        };
        let mut writer = BufWriter::new(File::create(path).map_err(io_error)?);
        serde_yaml::to_writer(&mut writer, self)?;
        writer.flush().map_err(io_error)?;
        Ok(())
    }

    fn assign(&mut self, vertex: usize, group: Group) {
        debug_assert!(self.groups[vertex].is_none());
        trace!("assign: {} -> {}", vertex, group);
        self.groups[vertex] = Some(group);
    }
}

/**
 * Decides whether the vertices of a constraint graph can be split into two
 * groups, such that every "equal" edge joins vertices of the same group and
 * every "opposite" edge joins vertices of different groups.
 */
pub struct TwoColoring<'a> {
    graph: &'a ConstraintGraph,
}

impl<'a> TwoColoring<'a> {
    pub fn new(graph: &'a ConstraintGraph) -> Self {
        Self { graph }
    }

    pub fn is_consistent(&self) -> bool {
        self.solve().is_ok()
    }

    /**
     *  Propagates the group constraints through each connected component, and
     *  returns the (complete) assignment, or the first edge found to be
     *  violated.
     *
     *  Algorithm:
     *   1) seed each unvisited component from its lowest vertex, using the
     *      fixed 'START_GROUP';
     *   2) pop a vertex from the work-list, and compute the group required by
     *      each of its edges;
     *   3) an assigned neighbour must already be in the required group, and an
     *      unassigned neighbour is given it and pushed onto the work-list.
     *
     *  Once assigned, a vertex is never reassigned, so each edge is inspected
     *  at most twice.
     */
    pub fn solve(&self) -> Result<Assignment, Conflict> {
        let num_vertices = self.graph.num_vertices();
        let mut assignment = Assignment::unassigned(num_vertices);
        let mut stack: Vec<(usize, Group)> = Vec::new();
        let mut components: usize = 0;

        for seed in 0..num_vertices {
            if assignment.group(seed).is_some() {
                continue;
            }
            components += 1;
            debug!(
                "component {}: seed vertex {} (degree: {})",
                components,
                seed,
                self.graph.degree(seed)
            );
            assignment.assign(seed, START_GROUP);
            stack.push((seed, START_GROUP));

            while let Some((vertex, group)) = stack.pop() {
                for (neighbour, relation) in self.graph.neighbours(vertex) {
                    let required = group.required(relation);
                    match assignment.group(neighbour) {
                        Some(found) if found != required => {
                            let conflict = Conflict {
                                vertex,
                                neighbour,
                                relation,
                            };
                            info!("{} ({} is in group {})", conflict, neighbour, found);
                            return Err(conflict);
                        }
                        Some(_) => {}
                        None => {
                            assignment.assign(neighbour, required);
                            stack.push((neighbour, required));
                        }
                    }
                }
            }
        }

        debug!(
            "consistent: {} components, groups A/B = {}/{}",
            components,
            assignment.count(Group::A),
            assignment.count(Group::B)
        );
        Ok(assignment)
    }
}

/// Convenience wrapper for 'TwoColoring::is_consistent'.
pub fn is_consistent(graph: &ConstraintGraph) -> bool {
    TwoColoring::new(graph).is_consistent()
}

#[cfg(test)]
mod tests {
    use super::*;
    use Relation::{Equal, Opposite};

    fn cycle(n: usize, relation: Relation) -> ConstraintGraph {
        let edges = (0..n).map(|i| (i, (i + 1) % n, relation)).collect();
        ConstraintGraph::new(n, edges)
    }

    #[test]
    fn no_edges_is_consistent() {
        for n in 0..5 {
            assert!(is_consistent(&ConstraintGraph::empty(n)));
        }
    }

    #[test]
    fn opposite_triangle_is_inconsistent() {
        assert!(!is_consistent(&cycle(3, Opposite)));
    }

    #[test]
    fn opposite_square_is_consistent() {
        let graph = cycle(4, Opposite);
        let assignment = TwoColoring::new(&graph).solve().expect("consistent");
        assert_eq!(assignment.count(Group::A), 2);
        assert_eq!(assignment.count(Group::B), 2);
        assert_eq!(assignment.group(0), Some(START_GROUP));
        assert!(assignment.satisfies(&graph));
    }

    #[test]
    fn all_equal_cycles_are_consistent() {
        for n in 1..8 {
            let graph = cycle(n, Equal);
            let assignment = TwoColoring::new(&graph).solve().expect("consistent");
            assert_eq!(assignment.count(START_GROUP), n);
        }
    }

    #[test]
    fn self_loops() {
        assert!(!is_consistent(&ConstraintGraph::new(1, vec![(0, 0, Opposite)])));
        assert!(is_consistent(&ConstraintGraph::new(1, vec![(0, 0, Equal)])));
    }

    #[test]
    fn conflicting_multi_edge_is_reported() {
        let graph = ConstraintGraph::new(2, vec![(0, 1, Equal), (0, 1, Opposite)]);
        let conflict = TwoColoring::new(&graph).solve().unwrap_err();
        assert_eq!(conflict.vertex, 0);
        assert_eq!(conflict.neighbour, 1);
        assert_eq!(conflict.relation, Opposite);
    }

    #[test]
    fn any_bad_component_fails_the_whole_graph() {
        // Even square on 0..4, triangle on 4..7.
        let mut edges: Vec<_> = (0..4).map(|i| (i, (i + 1) % 4, Opposite)).collect();
        edges.extend([(4, 5, Opposite), (5, 6, Opposite), (6, 4, Opposite)]);
        assert!(!is_consistent(&ConstraintGraph::new(7, edges.clone())));

        edges.truncate(4);
        let graph = ConstraintGraph::new(7, edges);
        let assignment = TwoColoring::new(&graph).solve().expect("consistent");
        assert!(assignment.is_complete());
        assert_eq!(assignment.group(6), Some(START_GROUP));
    }

    #[test]
    fn assignment_serialises_as_entries() {
        let graph = ConstraintGraph::new(2, vec![(0, 1, Opposite)]);
        let assignment = TwoColoring::new(&graph).solve().expect("consistent");
        let yaml = serde_yaml::to_string(&assignment).expect("yaml");
        assert_eq!(yaml, "- vertex: 0\n  group: A\n- vertex: 1\n  group: B\n");
        assert_eq!(assignment.to_string(), "[0:A 1:B]");
    }

    #[test]
    fn saved_witness_reads_back() {
        #[derive(serde::Deserialize)]
        struct Row {
            vertex: usize,
            group: Option<Group>,
        }

        let graph = cycle(4, Opposite);
        let assignment = TwoColoring::new(&graph).solve().expect("consistent");
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("witness.yaml");
        assignment.save(&path).expect("save");

        let text = std::fs::read_to_string(&path).expect("read");
        let rows: Vec<Row> = serde_yaml::from_str(&text).expect("yaml");
        assert_eq!(rows.len(), 4);
        for row in rows {
            assert_eq!(row.group, assignment.group(row.vertex));
        }

        let missing = dir.path().join("missing").join("witness.yaml");
        assert!(matches!(assignment.save(&missing), Err(WitnessError::Io { .. })));
    }

    #[test]
    fn satisfies_rejects_partial_assignments() {
        let graph = ConstraintGraph::new(2, vec![(0, 1, Equal)]);
        assert!(!Assignment::unassigned(2).satisfies(&graph));
    }
}

use log::{debug, warn};
use std::io::BufRead;
use thiserror::Error;

use crate::graph::ConstraintGraph;
use crate::relation::Relation;

/// Largest vertex count accepted, so the adjacency offsets stay allocatable.
pub const MAX_VERTICES: usize = 1 << 28;

/// Edge capacity reserved up-front; the rest grows with the lines actually read.
const RESERVE_EDGES: usize = 1 << 16;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("missing 'N M' header line")]
    MissingHeader,

    #[error("line {line}: expected 'N M', found {found} field(s)")]
    MalformedHeader { line: usize, found: usize },

    #[error("line {line}: {vertices} vertices exceeds the limit of {limit}")]
    TooManyVertices {
        line: usize,
        vertices: usize,
        limit: usize,
    },

    #[error("line {line}: expected 'u v tag', found {found} field(s)")]
    MalformedEdge { line: usize, found: usize },

    #[error("line {line}: invalid number '{token}'")]
    InvalidNumber { line: usize, token: String },

    #[error("line {line}: invalid tag '{tag}' (expected 0 or 1)")]
    InvalidTag { line: usize, tag: String },

    #[error("line {line}: vertex {vertex} out of range (vertices: {vertices})")]
    VertexOutOfRange {
        line: usize,
        vertex: usize,
        vertices: usize,
    },

    #[error("expected {expected} edge(s), found {found}")]
    MissingEdges { expected: usize, found: usize },
}

fn parse_number(line: usize, token: &str) -> Result<usize, InputError> {
    token.parse().map_err(|_| InputError::InvalidNumber {
        line,
        token: token.to_string(),
    })
}

fn parse_vertex(line: usize, token: &str, vertices: usize) -> Result<usize, InputError> {
    let vertex = parse_number(line, token)?;
    if vertex >= vertices {
        return Err(InputError::VertexOutOfRange {
            line,
            vertex,
            vertices,
        });
    }
    Ok(vertex)
}

/**
 *  Reads an instance in the format:
 *
 *    N M
 *    u v tag      (M lines, with 'tag' being 0 for equal, or 1 for opposite)
 *
 *  Blank lines are skipped, and anything after the M edges is ignored. Line
 *  numbers in errors are 1-based.
 */
pub fn read<R: BufRead>(reader: R) -> Result<ConstraintGraph, InputError> {
    let mut lines = reader
        .lines()
        .enumerate()
        .map(|(i, line)| line.map(|text| (i + 1, text)));

    let mut header: Option<(usize, usize)> = None;
    let mut edges: Vec<(usize, usize, Relation)> = Vec::new();

    for next in lines.by_ref() {
        let (line, text) = next?;
        let fields: Vec<&str> = text.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }

        let (vertices, expected) = match header {
            Some(counts) => counts,
            None => {
                if fields.len() != 2 {
                    return Err(InputError::MalformedHeader {
                        line,
                        found: fields.len(),
                    });
                }
                let counts = (parse_number(line, fields[0])?, parse_number(line, fields[1])?);
                if counts.0 > MAX_VERTICES {
                    return Err(InputError::TooManyVertices {
                        line,
                        vertices: counts.0,
                        limit: MAX_VERTICES,
                    });
                }
                debug!("header: {} vertices, {} edges", counts.0, counts.1);
                header = Some(counts);
                edges.reserve(counts.1.min(RESERVE_EDGES));
                if counts.1 == 0 {
                    break;
                }
                continue;
            }
        };

        if fields.len() != 3 {
            return Err(InputError::MalformedEdge {
                line,
                found: fields.len(),
            });
        }
        let u = parse_vertex(line, fields[0], vertices)?;
        let v = parse_vertex(line, fields[1], vertices)?;
        let relation = fields[2]
            .parse::<u8>()
            .ok()
            .and_then(Relation::from_tag)
            .ok_or_else(|| InputError::InvalidTag {
                line,
                tag: fields[2].to_string(),
            })?;
        edges.push((u, v, relation));

        if edges.len() == expected {
            break;
        }
    }

    let (vertices, expected) = header.ok_or(InputError::MissingHeader)?;
    if edges.len() < expected {
        return Err(InputError::MissingEdges {
            expected,
            found: edges.len(),
        });
    }

    let trailing = lines
        .filter(|next| matches!(next, Ok((_, text)) if !text.trim().is_empty()))
        .count();
    if trailing > 0 {
        warn!("ignoring {} line(s) after the last edge", trailing);
    }

    Ok(ConstraintGraph::new(vertices, edges))
}

/// Parses an instance held in memory.
pub fn parse(text: &str) -> Result<ConstraintGraph, InputError> {
    read(text.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use Relation::{Equal, Opposite};

    #[test]
    fn parses_triangle() {
        let graph = parse("3 3\n0 1 1\n1 2 1\n2 0 1\n").expect("parse");
        assert_eq!(graph.num_vertices(), 3);
        assert_eq!(graph.edges(), &[(0, 1, Opposite), (1, 2, Opposite), (2, 0, Opposite)]);
    }

    #[test]
    fn parses_header_only() {
        let graph = parse("2 0\n").expect("parse");
        assert_eq!(graph.num_vertices(), 2);
        assert_eq!(graph.num_edges(), 0);
    }

    #[test]
    fn skips_blank_lines_and_ignores_trailing_text() {
        let graph = parse("\n2 1\n\n  1 0 0  \nleftover\n").expect("parse");
        assert_eq!(graph.edges(), &[(1, 0, Equal)]);
    }

    #[test]
    fn missing_header() {
        assert!(matches!(parse(""), Err(InputError::MissingHeader)));
        assert!(matches!(parse("\n \n"), Err(InputError::MissingHeader)));
    }

    #[test]
    fn malformed_lines() {
        assert!(matches!(
            parse("3\n"),
            Err(InputError::MalformedHeader { line: 1, found: 1 })
        ));
        assert!(matches!(
            parse("3 1\n0 1\n"),
            Err(InputError::MalformedEdge { line: 2, found: 2 })
        ));
    }

    #[test]
    fn invalid_values() {
        assert!(matches!(
            parse("3 x\n"),
            Err(InputError::InvalidNumber { line: 1, ref token }) if token == "x"
        ));
        assert!(matches!(
            parse("3 1\n0 1 2\n"),
            Err(InputError::InvalidTag { line: 2, ref tag }) if tag == "2"
        ));
        assert!(matches!(
            parse("3 1\n0 3 0\n"),
            Err(InputError::VertexOutOfRange { line: 2, vertex: 3, vertices: 3 })
        ));
        assert!(matches!(
            parse("3 1\n-1 0 0\n"),
            Err(InputError::InvalidNumber { line: 2, .. })
        ));
    }

    #[test]
    fn huge_edge_count_reports_missing_edges() {
        let text = format!("2 {}\n0 1 0\n", usize::MAX);
        assert!(matches!(
            parse(&text),
            Err(InputError::MissingEdges { expected: usize::MAX, found: 1 })
        ));
    }

    #[test]
    fn huge_vertex_count_is_rejected() {
        let text = format!("{} 0\n", usize::MAX);
        assert!(matches!(
            parse(&text),
            Err(InputError::TooManyVertices { line: 1, vertices: usize::MAX, .. })
        ));
        let text = format!("{} 0\n", MAX_VERTICES + 1);
        assert!(matches!(parse(&text), Err(InputError::TooManyVertices { .. })));
    }

    #[test]
    fn too_few_edges() {
        assert!(matches!(
            parse("3 2\n0 1 0\n"),
            Err(InputError::MissingEdges { expected: 2, found: 1 })
        ));
    }
}

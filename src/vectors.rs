use log::debug;
use rand::distributions::{Bernoulli, BernoulliError, Distribution, Uniform};
use rand::Rng;
use std::io::{self, Write};
use thiserror::Error;

use crate::graph::ConstraintGraph;
use crate::relation::{Group, Relation};

#[derive(Debug, Error)]
pub enum VectorError {
    #[error("cannot place {0} edge(s) without any vertices")]
    NoVertices(usize),

    #[error("invalid 'opposite' probability: {0}")]
    Probability(#[from] BernoulliError),
}

/**
 * Generates a random instance, with endpoints drawn uniformly (so self-loops
 * and multi-edges can occur).
 *
 * When 'planted' is set, a hidden random grouping is drawn first and each tag
 * is derived from the groups of its endpoints, so the instance is always
 * consistent, and 'opposite' is ignored. Otherwise each edge is "opposite"
 * with probability 'opposite'.
 */
pub fn random_instance<R: Rng>(
    rng: &mut R,
    vertices: usize,
    edges: usize,
    opposite: f64,
    planted: bool,
) -> Result<ConstraintGraph, VectorError> {
    let tags = Bernoulli::new(opposite)?;
    if vertices == 0 {
        if edges > 0 {
            return Err(VectorError::NoVertices(edges));
        }
        return Ok(ConstraintGraph::empty(0));
    }

    let hidden: Vec<Group> = (0..vertices)
        .map(|_| if rng.gen::<bool>() { Group::A } else { Group::B })
        .collect();
    if planted {
        debug!("planted groups: {:?}", hidden);
    }

    let endpoints = Uniform::from(0..vertices);
    let mut list: Vec<(usize, usize, Relation)> = Vec::with_capacity(edges);
    for _ in 0..edges {
        let u = endpoints.sample(rng);
        let v = endpoints.sample(rng);
        let relation = if planted {
            Relation::between(hidden[u], hidden[v])
        } else if tags.sample(rng) {
            Relation::Opposite
        } else {
            Relation::Equal
        };
        list.push((u, v, relation));
    }

    Ok(ConstraintGraph::new(vertices, list))
}

/// Writes the graph in the same 'N M' + 'u v tag' format that is read.
pub fn write_instance<W: Write>(out: &mut W, graph: &ConstraintGraph) -> io::Result<()> {
    writeln!(out, "{} {}", graph.num_vertices(), graph.num_edges())?;
    for &(u, v, relation) in graph.edges().iter() {
        writeln!(out, "{} {} {}", u, v, relation.tag())?;
    }
    out.flush()
}

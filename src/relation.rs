use serde::{Deserialize, Serialize};
use std::fmt;

/**
 * Constraint carried by an edge: both endpoints in the same group, or in
 * opposite groups. The input format tags these as '0' and '1'.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    Equal,
    Opposite,
}

impl Relation {
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Relation::Equal),
            1 => Some(Relation::Opposite),
            _ => None,
        }
    }

    pub fn tag(self) -> u8 {
        match self {
            Relation::Equal => 0,
            Relation::Opposite => 1,
        }
    }

    /// Parity bit, as used by the union-find checker.
    pub fn parity(self) -> bool {
        self == Relation::Opposite
    }

    /// Relation implied by a pair of groups.
    pub fn between(a: Group, b: Group) -> Self {
        if a == b {
            Relation::Equal
        } else {
            Relation::Opposite
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Relation::Equal => write!(f, "equal"),
            Relation::Opposite => write!(f, "opposite"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Group {
    A,
    B,
}

impl Group {
    pub fn opposite(self) -> Self {
        match self {
            Group::A => Group::B,
            Group::B => Group::A,
        }
    }

    /**
     *  The group that a neighbour must take, if this vertex is in `self` and
     *  the two are joined by an edge with the given relation.
     */
    pub fn required(self, relation: Relation) -> Self {
        match relation {
            Relation::Equal => self,
            Relation::Opposite => self.opposite(),
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Group::A => write!(f, "A"),
            Group::B => write!(f, "B"),
        }
    }
}

pub use crate::coloring::*;
pub use crate::config::*;
pub use crate::graph::*;
pub use crate::input::*;
pub use crate::parity::*;
pub use crate::relation::*;

pub mod coloring;
pub mod config;
pub mod graph;
pub mod input;
pub mod logger;
pub mod parity;
pub mod relation;
pub mod vectors;

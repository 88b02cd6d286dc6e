#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)] // may be revisited

pub mod config;
pub mod hash;
pub mod instances;
pub mod search_state;

pub mod domain;
pub mod solver;

// Re-exports: stable minimal API surface for external callers
pub use crate::config::{SearchConfig, MAX_COST};
pub use crate::domain::pancake::PancakeDomain;
pub use crate::domain::tile::TileDomain;
pub use crate::domain::Domain;
pub use crate::hash::{priority_from_hash, ZobristTable};
pub use crate::instances::{load_instances, random_instances};
pub use crate::search_state::SearchState;
pub use crate::solver::dfs::PerimeterBuilder;
pub use crate::solver::ida::{Ida, SearchResult};
pub use crate::solver::perimeter::PerimeterDb;
pub use crate::solver::tt::{Probe, TransTable};
pub use crate::solver::{NodeStatus, PruneStatus};

//! The lattice planning core: workspace BFS field, state interning, and the
//! environment served to the search engine.

pub mod bfs3d;
pub mod environment;
pub mod interner;

pub use bfs3d::Bfs3D;
pub use environment::{PlanningEnvironment, PlanningStats};
pub use interner::{DiscreteCoord, StateEntry, StateId, StateInterner};

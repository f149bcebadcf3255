//! # BhujaPlan
//!
//! Discrete search-based motion planning core for articulated arms.
//!
//! Given a start configuration, a goal configuration, and volumetric
//! obstacle descriptions, the crate builds a joint-angle lattice environment
//! that a heuristic graph-search engine can consume: a successor oracle with
//! lazy collision checking, consistent heuristics, and dense integer state
//! ids. The workspace side is a goal-rooted 3-D breadth-first distance field
//! over the collision grid's voxels.
//!
//! ## Components
//!
//! - [`motion`]: per-joint lattice semantics ([`JointSpace`]) and the fixed
//!   ±step action set ([`MotionPrimitiveSet`])
//! - [`planning`]: the workspace BFS field ([`Bfs3D`]), the state table
//!   ([`StateInterner`]), and the environment itself
//!   ([`PlanningEnvironment`])
//! - [`model`]: seams to the caller's robot stack (forward kinematics,
//!   collision oracle, distance fields) plus plan request/response types
//! - [`config`]: plan-scoped tuning
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use bhuja_plan::{PlanningConfig, PlanningEnvironment, PlanRequest};
//!
//! let request = PlanRequest {
//!     group_name: "right_arm".into(),
//!     start_state: start_joints,
//!     goal: goal_joints,
//! };
//! let mut env = PlanningEnvironment::setup(
//!     &request, kinematics, oracle, &self_field, &world_field,
//!     PlanningConfig::default(),
//! )?;
//!
//! // Hand env.start_id() / env.goal_id() / env.successors(..) /
//! // env.heuristic_to_goal(..) to your search engine, then:
//! let trajectory = env.extract_trajectory(&winning_ids)?;
//! ```
//!
//! Everything is scoped to a single plan: build an environment, search it,
//! extract the trajectory, drop it. The environment is not safe for
//! concurrent mutation; parallel hosts hold one per worker.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod model;
pub mod motion;
pub mod planning;

pub use config::{HeuristicSource, PlanningConfig};
pub use error::{PlanningError, Result};
pub use model::{
    CollisionOracle, CollisionRequest, CollisionResult, DistanceField, JointTrajectory,
    KinematicModel, NamedJoint, PlanRequest,
};
pub use motion::{JointDescriptor, JointSpace, MotionPrimitive, MotionPrimitiveSet};
pub use planning::{
    Bfs3D, DiscreteCoord, PlanningEnvironment, PlanningStats, StateEntry, StateId, StateInterner,
};

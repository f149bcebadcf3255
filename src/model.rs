//! Collaborator seams and plan I/O types.
//!
//! The planner core is deliberately agnostic of any particular robot stack:
//! forward kinematics, collision evaluation, and the precomputed obstacle
//! distance fields are reached through the traits defined here. The caller
//! constructs implementations once per scene and lends them to the planning
//! environment for the duration of a plan.

use std::collections::HashMap;

use nalgebra::Isometry3;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One active joint of a planning group, as the robot model describes it.
///
/// Lattice discretization is a planner concern and is attached later from
/// the plan configuration; the model only reports limits and continuity.
#[derive(Clone, Debug)]
pub struct NamedJoint {
    /// Joint name as used in plan requests.
    pub name: String,
    /// True for wrap-around joints without position limits.
    pub is_continuous: bool,
    /// Lower position limit in radians. Meaningful for bounded joints only.
    pub lower: f64,
    /// Upper position limit in radians. Meaningful for bounded joints only.
    pub upper: f64,
}

impl NamedJoint {
    /// A bounded revolute joint.
    pub fn bounded(name: impl Into<String>, lower: f64, upper: f64) -> Self {
        Self {
            name: name.into(),
            is_continuous: false,
            lower,
            upper,
        }
    }

    /// A continuous (wrap-around) joint.
    pub fn continuous(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_continuous: true,
            lower: -std::f64::consts::PI,
            upper: std::f64::consts::PI,
        }
    }
}

/// Forward-kinematics provider for the robot being planned for.
pub trait KinematicModel {
    /// Active joints of a planning group, in the fixed group order.
    ///
    /// Returns `None` for groups the model does not know.
    fn group_joints(&self, group: &str) -> Option<Vec<NamedJoint>>;

    /// Current scene value of a named joint.
    ///
    /// Plan requests may leave joints unspecified; those default to the
    /// value reported here.
    fn current_value(&self, joint: &str) -> Option<f64>;

    /// Pose of the group's tip link under the given joint values.
    ///
    /// `values` follows the order of [`KinematicModel::group_joints`]. Only
    /// the translation is consumed by the planner (for voxel lookup).
    fn tip_link_transform(&self, group: &str, values: &[f64]) -> Isometry3<f64>;
}

/// A collision query for one robot configuration.
#[derive(Clone, Copy, Debug)]
pub struct CollisionRequest<'a> {
    /// Planning group whose links are active for the check.
    pub group_name: &'a str,
    /// Joint values in group order.
    pub joint_values: &'a [f64],
}

/// Outcome of a collision query. Carries only the boolean verdict the
/// planner consults.
#[derive(Clone, Copy, Debug, Default)]
pub struct CollisionResult {
    /// True when the configuration is in collision.
    pub collision: bool,
}

/// Boolean collision verdicts for robot configurations.
pub trait CollisionOracle {
    /// Evaluate one configuration.
    ///
    /// An `Err` means the oracle could not evaluate the state at all (its
    /// backing structures are missing), which aborts the plan; an
    /// in-collision verdict is a normal `Ok`.
    fn check(&self, request: &CollisionRequest<'_>) -> Result<CollisionResult>;
}

/// A voxel grid mapping workspace positions to obstacle clearance.
pub trait DistanceField {
    /// Cell counts along x, y, and z.
    fn dimensions(&self) -> (usize, usize, usize);

    /// Cell edge length in meters.
    fn resolution(&self) -> f64;

    /// Distance from the cell to the nearest obstacle, in meters. Zero
    /// means the cell itself is occupied.
    fn distance_from_cell(&self, x: usize, y: usize, z: usize) -> f64;

    /// Grid cell containing a world position, or `None` outside the grid.
    fn world_to_grid(&self, x: f64, y: f64, z: f64) -> Option<(usize, usize, usize)>;

    /// World position of a cell's center.
    fn grid_to_world(&self, x: usize, y: usize, z: usize) -> (f64, f64, f64);
}

/// A motion-plan request.
///
/// Joints of the active group that are absent from `start_state` or `goal`
/// default to the kinematic model's current scene values.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PlanRequest {
    /// Planning group to move.
    pub group_name: String,
    /// Starting joint values by name.
    #[serde(default)]
    pub start_state: HashMap<String, f64>,
    /// Goal joint values by name.
    #[serde(default)]
    pub goal: HashMap<String, f64>,
}

/// A planned joint-space trajectory.
///
/// Waypoints are raw lattice configurations in joint order; no smoothing or
/// time parameterization is applied.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct JointTrajectory {
    /// Names of the joints, matching the inner order of `points`.
    pub joint_names: Vec<String>,
    /// Waypoints from start to goal.
    pub points: Vec<Vec<f64>>,
}

impl JointTrajectory {
    /// Number of waypoints.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the trajectory has no waypoints.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

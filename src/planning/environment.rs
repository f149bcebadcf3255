//! The planning environment: a joint-angle lattice served to a search engine.
//!
//! One environment is built per plan request. Setup validates the endpoints,
//! floods the goal-rooted workspace BFS field, and interns the start and
//! goal states; afterwards the environment answers successor and heuristic
//! queries from the engine and resolves the winning id sequence back into a
//! joint trajectory. Collision checks run lazily during expansion, so only
//! the reachable part of the lattice ever pays for them.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::config::{HeuristicSource, PlanningConfig};
use crate::error::{PlanningError, Result};
use crate::model::{
    CollisionOracle, CollisionRequest, DistanceField, JointTrajectory, KinematicModel, PlanRequest,
};
use crate::motion::{JointDescriptor, JointSpace, MotionPrimitiveSet};
use crate::planning::bfs3d::Bfs3D;
use crate::planning::interner::{DiscreteCoord, StateEntry, StateId, StateInterner};

/// Counters accumulated while serving one search.
#[derive(Clone, Debug)]
pub struct PlanningStats {
    /// Number of `successors` expansions served.
    pub expansions: u64,
    /// Number of collision checks issued.
    pub collision_checks: u64,
    /// Wall time spent inside the collision oracle.
    pub collision_check_time: Duration,
    /// Wall time spent inside `successors` overall.
    pub expansion_time: Duration,
    /// Smallest max-over-joints integer distance to goal seen on any
    /// candidate so far.
    pub closest_to_goal: u32,
}

impl Default for PlanningStats {
    fn default() -> Self {
        Self {
            expansions: 0,
            collision_checks: 0,
            collision_check_time: Duration::ZERO,
            expansion_time: Duration::ZERO,
            closest_to_goal: u32::MAX,
        }
    }
}

/// Lattice state space over one planning group.
///
/// The environment exclusively owns its state table, BFS field, and
/// primitive set, and borrows the two distance fields for the plan's
/// duration. It is single-threaded: hosts that parallelize expansions hold
/// one environment per worker.
#[derive(Debug)]
pub struct PlanningEnvironment<'a, K, C, F> {
    config: PlanningConfig,
    kinematics: K,
    oracle: C,
    self_field: &'a F,
    #[allow(dead_code)]
    world_field: &'a F,
    group_name: String,
    joint_names: Vec<String>,
    space: JointSpace,
    primitives: MotionPrimitiveSet,
    interner: StateInterner,
    bfs: Bfs3D,
    start_id: StateId,
    goal_id: StateId,
    goal_coord: DiscreteCoord,
    stats: PlanningStats,
}

impl<'a, K, C, F> PlanningEnvironment<'a, K, C, F>
where
    K: KinematicModel,
    C: CollisionOracle,
    F: DistanceField,
{
    /// Validate a plan request and build the environment for it.
    ///
    /// Checks, in order: configuration consistency, group membership, start
    /// and goal joint resolution (unspecified joints default to current
    /// scene values), distance-field dimension agreement, endpoint collision
    /// freedom, and endpoint reachability of the workspace grid. On success
    /// the goal-rooted BFS field has been flooded and both endpoints are
    /// interned, the start first.
    pub fn setup(
        request: &PlanRequest,
        kinematics: K,
        oracle: C,
        self_field: &'a F,
        world_field: &'a F,
        config: PlanningConfig,
    ) -> Result<Self> {
        config.validate()?;

        let named = kinematics
            .group_joints(&request.group_name)
            .ok_or_else(|| PlanningError::UnknownGroup(request.group_name.clone()))?;
        let joint_names: Vec<String> = named.iter().map(|j| j.name.clone()).collect();
        let descriptors: Vec<JointDescriptor> = named
            .iter()
            .enumerate()
            .map(|(index, j)| JointDescriptor {
                index,
                is_continuous: j.is_continuous,
                lower: j.lower,
                upper: j.upper,
                step: config.joint_step,
            })
            .collect();
        let space = JointSpace::new(descriptors);
        let primitives = MotionPrimitiveSet::for_space(&space);

        let start = resolve_values(&joint_names, &request.start_state, &kinematics)
            .map_err(PlanningError::InvalidStart)?;
        let goal = resolve_values(&joint_names, &request.goal, &kinematics)
            .map_err(PlanningError::InvalidGoal)?;

        let dims = self_field.dimensions();
        if dims != world_field.dimensions() {
            tracing::warn!(
                self_dims = ?dims,
                world_dims = ?world_field.dimensions(),
                "size mismatch between self and world distance fields"
            );
            return Err(PlanningError::GridMismatch);
        }

        let verdict = oracle.check(&CollisionRequest {
            group_name: &request.group_name,
            joint_values: &start,
        })?;
        if verdict.collision {
            tracing::warn!("start state is in collision, cannot plan");
            return Err(PlanningError::StartInCollision);
        }
        let start_xyz = tip_voxel(&kinematics, self_field, &request.group_name, &start)
            .ok_or_else(|| {
                PlanningError::InvalidStart("end effector outside the workspace grid".into())
            })?;

        let verdict = oracle.check(&CollisionRequest {
            group_name: &request.group_name,
            joint_values: &goal,
        })?;
        if verdict.collision {
            tracing::warn!("goal state is in collision, cannot plan");
            return Err(PlanningError::GoalInCollision);
        }
        let goal_xyz = tip_voxel(&kinematics, self_field, &request.group_name, &goal)
            .ok_or_else(|| {
                PlanningError::InvalidGoal("end effector outside the workspace grid".into())
            })?;

        // Walls are the union of self and world zero-clearance cells over
        // the grid interior; the BFS treats the outer boundary as walls on
        // its own.
        let (nx, ny, nz) = dims;
        let mut bfs = Bfs3D::new(nx, ny, nz);
        let mut wall_count = 0usize;
        for x in 1..nx.saturating_sub(1) {
            for y in 1..ny.saturating_sub(1) {
                for z in 1..nz.saturating_sub(1) {
                    if self_field.distance_from_cell(x, y, z) == 0.0
                        || world_field.distance_from_cell(x, y, z) == 0.0
                    {
                        bfs.set_wall(x, y, z);
                        wall_count += 1;
                    }
                }
            }
        }
        tracing::info!(nx, ny, nz, wall_count, "workspace BFS grid prepared");

        bfs.run(goal_xyz[0] as usize, goal_xyz[1] as usize, goal_xyz[2] as usize);

        tracing::debug!(start = ?start, goal = ?goal, "plan endpoints resolved");

        let mut interner = StateInterner::new();
        let start_id = interner.intern(space.quantize(&start), start, start_xyz, 0);
        let goal_coord = space.quantize(&goal);
        let goal_id = interner.insert_detached(goal_coord.clone(), goal, goal_xyz, 0);

        Ok(Self {
            config,
            kinematics,
            oracle,
            self_field,
            world_field,
            group_name: request.group_name.clone(),
            joint_names,
            space,
            primitives,
            interner,
            bfs,
            start_id,
            goal_id,
            goal_coord,
            stats: PlanningStats::default(),
        })
    }

    /// Id of the interned start state.
    pub fn start_id(&self) -> StateId {
        self.start_id
    }

    /// Id of the absorbing goal state.
    pub fn goal_id(&self) -> StateId {
        self.goal_id
    }

    /// Number of interned states.
    pub fn state_count(&self) -> usize {
        self.interner.len()
    }

    /// Names of the active joints, in trajectory order.
    pub fn joint_names(&self) -> &[String] {
        &self.joint_names
    }

    /// The joint motion model of the active group.
    pub fn joint_space(&self) -> &JointSpace {
        &self.space
    }

    /// The goal-rooted workspace BFS field.
    pub fn bfs(&self) -> &Bfs3D {
        &self.bfs
    }

    /// Counters accumulated so far.
    pub fn stats(&self) -> &PlanningStats {
        &self.stats
    }

    /// Entry for an interned id.
    pub fn state(&self, id: StateId) -> Result<&StateEntry> {
        self.interner.get(id)
    }

    /// Successors of a state, in primitive order, each with the uniform
    /// edge cost.
    ///
    /// The goal is absorbing: expanding it yields nothing. Per-candidate
    /// rejections (inapplicable primitive, end effector off the grid,
    /// collision) silently drop that candidate; a bad source id or an
    /// oracle failure aborts the plan.
    pub fn successors(&mut self, id: StateId) -> Result<Vec<(StateId, u32)>> {
        let expansion_started = Instant::now();

        if id == self.goal_id {
            return Ok(Vec::new());
        }

        let source_angles = self.interner.get(id)?.angles.clone();
        let goal_angles = self.interner.get(self.goal_id)?.angles.clone();
        self.stats.expansions += 1;

        let mut successors = Vec::with_capacity(self.primitives.len());
        for index in 0..self.primitives.len() {
            let Some(candidate) = self
                .primitives
                .get(index)
                .and_then(|p| p.apply(&self.space, &source_angles))
            else {
                continue;
            };

            let max_dist = self.space.integer_distance_max(&candidate, &goal_angles);
            if max_dist < self.stats.closest_to_goal {
                self.stats.closest_to_goal = max_dist;
                tracing::debug!(max_dist, "new closest approach to goal");
            }

            let Some(xyz) = self.tip_voxel(&candidate) else {
                tracing::debug!(primitive = index, "candidate end effector outside grid");
                continue;
            };

            let check_started = Instant::now();
            let verdict = self.oracle.check(&CollisionRequest {
                group_name: &self.group_name,
                joint_values: &candidate,
            })?;
            self.stats.collision_checks += 1;
            self.stats.collision_check_time += check_started.elapsed();
            if verdict.collision {
                continue;
            }

            let coord = self.space.quantize(&candidate);
            let successor = if coord == self.goal_coord {
                // A candidate on the goal's lattice point attaches to the
                // absorbing goal entry itself, never to a twin state.
                self.goal_id
            } else {
                self.interner.intern(coord, candidate, xyz, index as u16)
            };
            successors.push((successor, self.config.edge_cost));
        }

        self.stats.expansion_time += expansion_started.elapsed();
        Ok(successors)
    }

    /// Heuristic estimate of the cost from one state to another.
    ///
    /// The source is fixed per plan by the configuration: the joint-space
    /// integer distance sum, or the goal-rooted workspace BFS cost at the
    /// `from` state's end-effector voxel (which estimates distance to the
    /// goal regardless of `to`).
    pub fn heuristic(&self, from: StateId, to: StateId) -> Result<u32> {
        let from_entry = self.interner.get(from)?;
        let to_entry = self.interner.get(to)?;
        Ok(match self.config.heuristic {
            HeuristicSource::JointDistance => self
                .space
                .integer_distance_sum(&from_entry.angles, &to_entry.angles)
                .saturating_mul(self.config.joint_dist_cost_mult),
            HeuristicSource::WorkspaceBfs => {
                let [x, y, z] = from_entry.xyz;
                self.bfs_cost_to_goal(x as usize, y as usize, z as usize)
            }
        })
    }

    /// Heuristic estimate of the remaining cost to the goal.
    pub fn heuristic_to_goal(&self, id: StateId) -> Result<u32> {
        self.heuristic(id, self.goal_id)
    }

    /// Workspace BFS cost from a voxel to the goal, in cost units.
    pub fn bfs_cost_to_goal(&self, x: usize, y: usize, z: usize) -> u32 {
        let cells = self.bfs.distance(x, y, z);
        if cells == Bfs3D::UNREACHABLE {
            u32::MAX
        } else {
            cells.saturating_mul(self.config.bfs_cell_cost)
        }
    }

    /// Resolve a searched id sequence into a joint trajectory.
    ///
    /// Waypoints are the representative angles of each state, in order; no
    /// smoothing or retiming.
    pub fn extract_trajectory(&self, ids: &[StateId]) -> Result<JointTrajectory> {
        let points = self.interner.ids_to_angles(ids)?;
        tracing::debug!(waypoints = points.len(), "trajectory extracted");
        Ok(JointTrajectory {
            joint_names: self.joint_names.clone(),
            points,
        })
    }

    /// Log a state's identity and configuration. Diagnostic.
    pub fn print_state(&self, id: StateId) -> Result<()> {
        let entry = self.interner.get(id)?;
        let role = if id == self.goal_id {
            "goal"
        } else if id == self.start_id {
            "start"
        } else {
            "lattice"
        };
        tracing::info!(
            id = %entry.id,
            role,
            coord = ?entry.coord,
            angles = ?entry.angles,
            xyz = ?entry.xyz,
            "state"
        );
        Ok(())
    }

    fn tip_voxel(&self, values: &[f64]) -> Option<[i32; 3]> {
        tip_voxel(&self.kinematics, self.self_field, &self.group_name, values)
    }
}

/// End-effector voxel for a joint vector, or `None` off the grid.
fn tip_voxel<K: KinematicModel, F: DistanceField>(
    kinematics: &K,
    field: &F,
    group: &str,
    values: &[f64],
) -> Option<[i32; 3]> {
    let pose = kinematics.tip_link_transform(group, values);
    let t = pose.translation.vector;
    let (x, y, z) = field.world_to_grid(t.x, t.y, t.z)?;
    Some([x as i32, y as i32, z as i32])
}

/// Resolve per-joint values from a request map, defaulting to the scene.
fn resolve_values<K: KinematicModel>(
    names: &[String],
    requested: &HashMap<String, f64>,
    kinematics: &K,
) -> std::result::Result<Vec<f64>, String> {
    names
        .iter()
        .map(|name| {
            requested
                .get(name)
                .copied()
                .or_else(|| kinematics.current_value(name))
                .ok_or_else(|| format!("no value for joint {name}"))
        })
        .collect()
}

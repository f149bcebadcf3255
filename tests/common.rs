//! Shared test doubles and a minimal search driver.
//!
//! The planner core treats kinematics, collision checking, the distance
//! fields, and the search engine itself as external collaborators; the
//! doubles here give the scenarios simple, exactly predictable stand-ins.

#![allow(dead_code)]

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use bhuja_plan::{
    CollisionOracle, CollisionRequest, CollisionResult, DistanceField, KinematicModel, NamedJoint,
    PlanningEnvironment, PlanningError, StateId,
};
use nalgebra::Isometry3;

/// Axis-aligned box obstacle in workspace coordinates.
#[derive(Clone, Copy, Debug)]
pub struct Aabb {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl Aabb {
    pub fn new(min: [f64; 3], max: [f64; 3]) -> Self {
        Self { min, max }
    }

    /// Cube of half-width `r` around a point.
    pub fn around(center: [f64; 3], r: f64) -> Self {
        Self {
            min: [center[0] - r, center[1] - r, center[2] - r],
            max: [center[0] + r, center[1] + r, center[2] + r],
        }
    }

    pub fn contains(&self, p: [f64; 3]) -> bool {
        (0..3).all(|i| p[i] >= self.min[i] && p[i] <= self.max[i])
    }
}

/// Gantry-style arm: joint `i` translates the tip along world axis `i`.
#[derive(Clone, Debug)]
pub struct GantryArm {
    joints: Vec<NamedJoint>,
}

impl GantryArm {
    pub fn new(joints: Vec<NamedJoint>) -> Self {
        assert!(joints.len() <= 3);
        Self { joints }
    }

    fn tip(&self, values: &[f64]) -> [f64; 3] {
        let mut tip = [0.0; 3];
        for (axis, value) in values.iter().enumerate().take(3) {
            tip[axis] = *value;
        }
        tip
    }
}

impl KinematicModel for GantryArm {
    fn group_joints(&self, group: &str) -> Option<Vec<NamedJoint>> {
        (group == "arm").then(|| self.joints.clone())
    }

    fn current_value(&self, joint: &str) -> Option<f64> {
        self.joints.iter().any(|j| j.name == joint).then_some(0.0)
    }

    fn tip_link_transform(&self, _group: &str, values: &[f64]) -> Isometry3<f64> {
        let [x, y, z] = self.tip(values);
        Isometry3::translation(x, y, z)
    }
}

/// Single continuous joint swinging a unit-length link in the xy plane.
#[derive(Clone)]
pub struct RotaryArm;

impl KinematicModel for RotaryArm {
    fn group_joints(&self, group: &str) -> Option<Vec<NamedJoint>> {
        (group == "arm").then(|| vec![NamedJoint::continuous("shoulder")])
    }

    fn current_value(&self, joint: &str) -> Option<f64> {
        (joint == "shoulder").then_some(0.0)
    }

    fn tip_link_transform(&self, _group: &str, values: &[f64]) -> Isometry3<f64> {
        Isometry3::translation(values[0].cos(), values[0].sin(), 0.0)
    }
}

/// Collision oracle that forward-kinematics the tip through its own copy of
/// the model and reports a hit inside any box obstacle.
#[derive(Clone, Debug)]
pub struct TipObstacleOracle<M> {
    pub model: M,
    pub obstacles: Vec<Aabb>,
}

impl<M: KinematicModel> CollisionOracle for TipObstacleOracle<M> {
    fn check(&self, request: &CollisionRequest<'_>) -> bhuja_plan::Result<CollisionResult> {
        let t = self
            .model
            .tip_link_transform(request.group_name, request.joint_values)
            .translation
            .vector;
        let collision = self.obstacles.iter().any(|b| b.contains([t.x, t.y, t.z]));
        Ok(CollisionResult { collision })
    }
}

/// Uniform-resolution voxel field with a set of occupied cells.
#[derive(Clone, Debug)]
pub struct VoxelField {
    dims: (usize, usize, usize),
    resolution: f64,
    origin: [f64; 3],
    occupied: HashSet<(usize, usize, usize)>,
}

impl VoxelField {
    pub fn open(dims: (usize, usize, usize), resolution: f64, origin: [f64; 3]) -> Self {
        Self {
            dims,
            resolution,
            origin,
            occupied: HashSet::new(),
        }
    }

    /// Occupy the cell containing a world point.
    pub fn occupy_world(&mut self, x: f64, y: f64, z: f64) {
        let cell = self
            .world_to_grid(x, y, z)
            .expect("occupied point outside the field");
        self.occupied.insert(cell);
    }
}

impl DistanceField for VoxelField {
    fn dimensions(&self) -> (usize, usize, usize) {
        self.dims
    }

    fn resolution(&self) -> f64 {
        self.resolution
    }

    fn distance_from_cell(&self, x: usize, y: usize, z: usize) -> f64 {
        if self.occupied.contains(&(x, y, z)) {
            0.0
        } else {
            self.resolution
        }
    }

    fn world_to_grid(&self, x: f64, y: f64, z: f64) -> Option<(usize, usize, usize)> {
        let cell = |w: f64, o: f64| ((w - o) / self.resolution).floor() as i64;
        let (cx, cy, cz) = (
            cell(x, self.origin[0]),
            cell(y, self.origin[1]),
            cell(z, self.origin[2]),
        );
        if cx < 0 || cy < 0 || cz < 0 {
            return None;
        }
        let (cx, cy, cz) = (cx as usize, cy as usize, cz as usize);
        let (nx, ny, nz) = self.dims;
        (cx < nx && cy < ny && cz < nz).then_some((cx, cy, cz))
    }

    fn grid_to_world(&self, x: usize, y: usize, z: usize) -> (f64, f64, f64) {
        (
            self.origin[0] + (x as f64 + 0.5) * self.resolution,
            self.origin[1] + (y as f64 + 0.5) * self.resolution,
            self.origin[2] + (z as f64 + 0.5) * self.resolution,
        )
    }
}

/// Node in the driver's open set.
struct SearchNode {
    id: StateId,
    f: u64,
}

impl PartialEq for SearchNode {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.id == other.id
    }
}

impl Eq for SearchNode {}

impl Ord for SearchNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap; ties broken by id for determinism
        other.f.cmp(&self.f).then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Minimal A* driver standing in for the external search engine.
///
/// Returns the start-to-goal id sequence, `Err(NoPath)` when the reachable
/// graph is exhausted, or `Err(Timeout)` past the expansion budget.
pub fn astar<K, C, F>(
    env: &mut PlanningEnvironment<'_, K, C, F>,
    max_expansions: usize,
) -> Result<Vec<StateId>, PlanningError>
where
    K: KinematicModel,
    C: CollisionOracle,
    F: DistanceField,
{
    let start = env.start_id();
    let goal = env.goal_id();

    let mut open = BinaryHeap::new();
    let mut g_score: HashMap<StateId, u64> = HashMap::new();
    let mut parent: HashMap<StateId, StateId> = HashMap::new();
    let mut closed: HashSet<StateId> = HashSet::new();

    g_score.insert(start, 0);
    open.push(SearchNode {
        id: start,
        f: env.heuristic_to_goal(start)? as u64,
    });

    let mut expansions = 0usize;

    while let Some(node) = open.pop() {
        let current = node.id;
        if current == goal {
            return Ok(reconstruct(&parent, start, goal));
        }
        if !closed.insert(current) {
            continue;
        }
        expansions += 1;
        if expansions > max_expansions {
            return Err(PlanningError::Timeout);
        }

        let current_g = g_score[&current];
        for (succ, cost) in env.successors(current)? {
            if closed.contains(&succ) {
                continue;
            }
            let tentative = current_g + cost as u64;
            if tentative < *g_score.get(&succ).unwrap_or(&u64::MAX) {
                g_score.insert(succ, tentative);
                parent.insert(succ, current);
                let f = tentative.saturating_add(env.heuristic_to_goal(succ)? as u64);
                open.push(SearchNode { id: succ, f });
            }
        }
    }

    Err(PlanningError::NoPath)
}

fn reconstruct(parent: &HashMap<StateId, StateId>, start: StateId, goal: StateId) -> Vec<StateId> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        current = parent[&current];
        path.push(current);
    }
    path.reverse();
    path
}

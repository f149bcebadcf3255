//! Plan-scoped planner configuration.

use std::path::Path;

use serde::Deserialize;

use crate::error::{PlanningError, Result};

/// Which single heuristic source serves a plan.
///
/// Exactly one source is active per plan; mixing sources between calls would
/// break the consistency the search engine relies on.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HeuristicSource {
    /// Sum over joints of integer lattice distance to the target, scaled by
    /// `joint_dist_cost_mult`.
    #[default]
    JointDistance,
    /// Goal-rooted workspace BFS distance at the state's end-effector voxel,
    /// scaled by `bfs_cell_cost`. Admissible as long as one joint step cannot
    /// sweep the end effector across more than `edge_cost / bfs_cell_cost`
    /// voxels.
    WorkspaceBfs,
}

/// Tuning for a single plan request.
///
/// All values are fixed for the lifetime of one planning environment.
#[derive(Clone, Debug, Deserialize)]
pub struct PlanningConfig {
    /// Joint lattice step in radians.
    #[serde(default = "default_joint_step")]
    pub joint_step: f64,

    /// Heuristic scale applied to the joint-space integer distance sum.
    ///
    /// Must not exceed `edge_cost`: a single primitive changes the distance
    /// sum by at most one, so this bound keeps the heuristic consistent.
    #[serde(default = "default_joint_dist_cost_mult")]
    pub joint_dist_cost_mult: u32,

    /// Uniform transition cost charged for every primitive.
    #[serde(default = "default_edge_cost")]
    pub edge_cost: u32,

    /// Cost per workspace cell when the BFS heuristic source is active.
    #[serde(default = "default_bfs_cell_cost")]
    pub bfs_cell_cost: u32,

    /// Heuristic source for this plan.
    #[serde(default)]
    pub heuristic: HeuristicSource,
}

fn default_joint_step() -> f64 {
    0.1
}
fn default_joint_dist_cost_mult() -> u32 {
    1000
}
fn default_edge_cost() -> u32 {
    1000
}
fn default_bfs_cell_cost() -> u32 {
    100
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            joint_step: default_joint_step(),
            joint_dist_cost_mult: default_joint_dist_cost_mult(),
            edge_cost: default_edge_cost(),
            bfs_cell_cost: default_bfs_cell_cost(),
            heuristic: HeuristicSource::default(),
        }
    }
}

impl PlanningConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| PlanningError::Config(format!("failed to read config file: {}", e)))?;
        let config: PlanningConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field invariants.
    pub fn validate(&self) -> Result<()> {
        if !(self.joint_step > 0.0) {
            return Err(PlanningError::Config(format!(
                "joint_step must be positive, got {}",
                self.joint_step
            )));
        }
        if self.edge_cost == 0 {
            return Err(PlanningError::Config("edge_cost must be positive".into()));
        }
        if self.joint_dist_cost_mult > self.edge_cost {
            return Err(PlanningError::Config(format!(
                "joint_dist_cost_mult ({}) must not exceed edge_cost ({})",
                self.joint_dist_cost_mult, self.edge_cost
            )));
        }
        Ok(())
    }
}

//! Per-joint lattice semantics: limits, continuity, and distances.
//!
//! Every degree of freedom is described by a [`JointDescriptor`] that knows
//! how to move, measure, and quantize its angle. [`JointSpace`] aggregates
//! the descriptors of a planning group and provides the vector-level
//! operations the environment works with.

use std::f64::consts::{PI, TAU};

/// Tolerance (as a fraction of a step) under which an angular distance is
/// treated as an exact multiple of the lattice step. Keeps float noise from
/// pushing one-step neighbors to integer distance two.
const STEP_SNAP_TOL: f64 = 1e-3;

/// Slack for bounded-joint limit checks.
const LIMIT_EPS: f64 = 1e-9;

/// Normalize an angle to [-π, π].
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    let mut a = angle % TAU;
    if a > PI {
        a -= TAU;
    } else if a < -PI {
        a += TAU;
    }
    a
}

/// Shortest signed angular difference from `a` to `b`.
#[inline]
pub fn shortest_angular_distance(a: f64, b: f64) -> f64 {
    normalize_angle(b - a)
}

/// Lattice semantics for one degree of freedom.
#[derive(Clone, Debug, PartialEq)]
pub struct JointDescriptor {
    /// Position of this joint within the group's joint vector.
    pub index: usize,
    /// True for wrap-around joints without position limits.
    pub is_continuous: bool,
    /// Lower position limit in radians. Meaningful for bounded joints only.
    pub lower: f64,
    /// Upper position limit in radians. Meaningful for bounded joints only.
    pub upper: f64,
    /// Lattice step in radians. Always positive.
    pub step: f64,
}

impl JointDescriptor {
    /// Descriptor for a bounded joint.
    pub fn bounded(index: usize, lower: f64, upper: f64, step: f64) -> Self {
        Self {
            index,
            is_continuous: false,
            lower,
            upper,
            step,
        }
    }

    /// Descriptor for a continuous joint.
    pub fn continuous(index: usize, step: f64) -> Self {
        Self {
            index,
            is_continuous: true,
            lower: -PI,
            upper: PI,
            step,
        }
    }

    /// Move the joint by `delta`.
    ///
    /// Bounded joints reject motions that would leave their limits;
    /// continuous joints wrap into [-π, π].
    pub fn apply(&self, angle: f64, delta: f64) -> Option<f64> {
        let next = angle + delta;
        if self.is_continuous {
            return Some(normalize_angle(next));
        }
        if next < self.lower - LIMIT_EPS || next > self.upper + LIMIT_EPS {
            None
        } else {
            Some(next)
        }
    }

    /// Absolute angular distance between two values of this joint.
    ///
    /// Takes the short way around for continuous joints.
    pub fn continuous_distance(&self, a: f64, b: f64) -> f64 {
        if self.is_continuous {
            shortest_angular_distance(a, b).abs()
        } else {
            (a - b).abs()
        }
    }

    /// Distance between two values in whole lattice steps, rounded up.
    ///
    /// Distances within [`STEP_SNAP_TOL`] of an exact multiple floor
    /// instead, so two angles exactly one step apart report 1.
    pub fn integer_distance(&self, a: f64, b: f64) -> u32 {
        let steps = self.continuous_distance(a, b) / self.step;
        let floor = steps.floor();
        if steps - floor < STEP_SNAP_TOL {
            floor as u32
        } else {
            steps.ceil() as u32
        }
    }

    /// Lattice coordinate of an angle.
    ///
    /// Continuous joints are normalized first and reduced modulo the number
    /// of steps per revolution, so equivalent angles share a coordinate.
    pub fn quantize(&self, angle: f64) -> i32 {
        if self.is_continuous {
            let steps_per_rev = (TAU / self.step).round().max(1.0) as i64;
            let raw = (normalize_angle(angle) / self.step).round() as i64;
            raw.rem_euclid(steps_per_rev) as i32
        } else {
            (angle / self.step).round() as i32
        }
    }
}

/// The joint motion model of a planning group.
#[derive(Clone, Debug)]
pub struct JointSpace {
    joints: Vec<JointDescriptor>,
}

impl JointSpace {
    /// Build a joint space from per-joint descriptors in group order.
    pub fn new(joints: Vec<JointDescriptor>) -> Self {
        debug_assert!(joints.iter().all(|j| j.step > 0.0));
        Self { joints }
    }

    /// Number of degrees of freedom.
    pub fn dof(&self) -> usize {
        self.joints.len()
    }

    /// Per-joint descriptors in group order.
    pub fn joints(&self) -> &[JointDescriptor] {
        &self.joints
    }

    /// Lattice coordinate of a joint vector.
    pub fn quantize(&self, angles: &[f64]) -> Vec<i32> {
        debug_assert_eq!(angles.len(), self.joints.len());
        self.joints
            .iter()
            .zip(angles)
            .map(|(joint, &a)| joint.quantize(a))
            .collect()
    }

    /// Sum over joints of the integer lattice distance.
    pub fn integer_distance_sum(&self, a: &[f64], b: &[f64]) -> u32 {
        debug_assert_eq!(a.len(), b.len());
        self.joints
            .iter()
            .zip(a.iter().zip(b))
            .map(|(joint, (&x, &y))| joint.integer_distance(x, y))
            .sum()
    }

    /// Maximum over joints of the integer lattice distance.
    pub fn integer_distance_max(&self, a: &[f64], b: &[f64]) -> u32 {
        debug_assert_eq!(a.len(), b.len());
        self.joints
            .iter()
            .zip(a.iter().zip(b))
            .map(|(joint, (&x, &y))| joint.integer_distance(x, y))
            .max()
            .unwrap_or(0)
    }

    /// Sum over joints of the continuous angular distance. Diagnostic only.
    pub fn continuous_distance_sum(&self, a: &[f64], b: &[f64]) -> f64 {
        debug_assert_eq!(a.len(), b.len());
        self.joints
            .iter()
            .zip(a.iter().zip(b))
            .map(|(joint, (&x, &y))| joint.continuous_distance(x, y))
            .sum()
    }
}

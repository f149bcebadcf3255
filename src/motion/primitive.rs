//! Single-joint motion primitives.
//!
//! The action set of the lattice: one positive and one negative step per
//! active joint, in a fixed order the search engine can rely on.

use super::joint::JointSpace;

/// A single-joint lattice move of `delta` radians.
///
/// Primitives are pure: applying one never mutates its inputs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionPrimitive {
    joint: usize,
    delta: f64,
}

impl MotionPrimitive {
    /// Index of the joint this primitive moves.
    pub fn joint(&self) -> usize {
        self.joint
    }

    /// Signed step in radians.
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Successor joint vector, or `None` when the move would leave a
    /// bounded joint's limits.
    pub fn apply(&self, space: &JointSpace, source: &[f64]) -> Option<Vec<f64>> {
        let next = space.joints()[self.joint].apply(source[self.joint], self.delta)?;
        let mut successor = source.to_vec();
        successor[self.joint] = next;
        Some(successor)
    }
}

/// The fixed action set for one plan: `2N` primitives for `N` active DOFs.
///
/// Order is stable and index-addressable: primitive `2i` steps joint `i`
/// positively, `2i + 1` negatively. The index of the primitive that created
/// a state is recorded in its entry for bookkeeping.
#[derive(Clone, Debug)]
pub struct MotionPrimitiveSet {
    primitives: Vec<MotionPrimitive>,
}

impl MotionPrimitiveSet {
    /// Build the ±step primitive pair for every joint of a space.
    pub fn for_space(space: &JointSpace) -> Self {
        let mut primitives = Vec::with_capacity(2 * space.dof());
        for joint in space.joints() {
            primitives.push(MotionPrimitive {
                joint: joint.index,
                delta: joint.step,
            });
            primitives.push(MotionPrimitive {
                joint: joint.index,
                delta: -joint.step,
            });
        }
        Self { primitives }
    }

    /// Number of primitives (`2N`).
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// True for a zero-DOF group.
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Primitive at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<&MotionPrimitive> {
        self.primitives.get(index)
    }

    /// Iterate primitives in application order.
    pub fn iter(&self) -> impl Iterator<Item = &MotionPrimitive> {
        self.primitives.iter()
    }
}

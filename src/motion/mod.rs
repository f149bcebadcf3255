//! Joint-space motion semantics: per-DOF models and lattice primitives.

pub mod joint;
pub mod primitive;

pub use joint::{normalize_angle, shortest_angular_distance, JointDescriptor, JointSpace};
pub use primitive::{MotionPrimitive, MotionPrimitiveSet};

//! Hash-consing of discrete joint coordinates to dense state ids.
//!
//! Every lattice state the search touches lives in one contiguous arena; a
//! coordinate-keyed index maps each discrete coordinate to the id of its
//! single representative entry. The index stores ids, never references, so
//! arena growth can never dangle.

use std::collections::HashMap;
use std::fmt;

use crate::error::{PlanningError, Result};

/// Discrete joint-lattice coordinate: one signed step count per DOF.
pub type DiscreteCoord = Vec<i32>;

/// Dense identifier of an interned lattice state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(
    /// Raw dense index into the state table.
    pub u32,
);

impl StateId {
    /// The id as an arena index.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One interned lattice state.
///
/// `angles` is the representative continuous configuration that produced
/// `coord` when the state was first created; later configurations that
/// quantize to the same coordinate fold onto this representative.
#[derive(Clone, Debug)]
pub struct StateEntry {
    /// Dense id of this entry.
    pub id: StateId,
    /// Discrete coordinate identifying the state.
    pub coord: DiscreteCoord,
    /// Representative joint angles.
    pub angles: Vec<f64>,
    /// End-effector voxel in the workspace grid.
    pub xyz: [i32; 3],
    /// Index of the primitive that first produced this state. Bookkeeping
    /// only; zero for start and goal.
    pub last_primitive: u16,
}

/// Arena-plus-index state table for one plan.
#[derive(Clone, Debug, Default)]
pub struct StateInterner {
    entries: Vec<StateEntry>,
    ids_by_coord: HashMap<DiscreteCoord, StateId>,
}

impl StateInterner {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of interned states.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True before the first intern.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Intern a state, folding onto the existing entry for its coordinate.
    ///
    /// New entries receive the next dense id; repeated interns of one
    /// coordinate all return the first id.
    pub fn intern(
        &mut self,
        coord: DiscreteCoord,
        angles: Vec<f64>,
        xyz: [i32; 3],
        last_primitive: u16,
    ) -> StateId {
        if let Some(&id) = self.ids_by_coord.get(&coord) {
            return id;
        }
        let id = StateId(self.entries.len() as u32);
        self.ids_by_coord.insert(coord.clone(), id);
        self.entries.push(StateEntry {
            id,
            coord,
            angles,
            xyz,
            last_primitive,
        });
        id
    }

    /// Append an entry without registering its coordinate in the index.
    ///
    /// Used for the absorbing goal, whose id must stay distinct from every
    /// lattice state even when a reachable state shares its coordinate.
    pub fn insert_detached(
        &mut self,
        coord: DiscreteCoord,
        angles: Vec<f64>,
        xyz: [i32; 3],
        last_primitive: u16,
    ) -> StateId {
        let id = StateId(self.entries.len() as u32);
        self.entries.push(StateEntry {
            id,
            coord,
            angles,
            xyz,
            last_primitive,
        });
        id
    }

    /// Id registered for a coordinate, if any.
    pub fn lookup(&self, coord: &[i32]) -> Option<StateId> {
        self.ids_by_coord.get(coord).copied()
    }

    /// Entry for an id.
    ///
    /// Out-of-range ids are a contract violation by the caller and are
    /// reported, never silently mapped.
    pub fn get(&self, id: StateId) -> Result<&StateEntry> {
        self.entries
            .get(id.index())
            .ok_or(PlanningError::InvalidStateId {
                id: id.0,
                len: self.entries.len(),
            })
    }

    /// Resolve an id sequence to its representative joint vectors.
    pub fn ids_to_angles(&self, ids: &[StateId]) -> Result<Vec<Vec<f64>>> {
        ids.iter()
            .map(|&id| self.get(id).map(|entry| entry.angles.clone()))
            .collect()
    }

    /// Iterate entries in id order.
    pub fn iter(&self) -> impl Iterator<Item = &StateEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_returns_same_id_for_same_coord() {
        let mut interner = StateInterner::new();
        let a = interner.intern(vec![1, 2], vec![0.1, 0.2], [5, 5, 5], 0);
        let b = interner.intern(vec![1, 2], vec![0.1001, 0.2], [5, 5, 5], 3);
        assert_eq!(a, b);
        assert_eq!(interner.len(), 1);
        // The representative angles are the first ones seen
        assert_eq!(interner.get(a).unwrap().angles, vec![0.1, 0.2]);
    }

    #[test]
    fn test_ids_are_dense_and_monotonic() {
        let mut interner = StateInterner::new();
        let ids: Vec<StateId> = (0..10)
            .map(|i| interner.intern(vec![i], vec![i as f64], [1, 1, 1], 0))
            .collect();
        for (expected, id) in ids.iter().enumerate() {
            assert_eq!(id.index(), expected);
        }
        assert_eq!(interner.len(), 10);
    }

    #[test]
    fn test_detached_entry_shares_coord_but_not_id() {
        let mut interner = StateInterner::new();
        let start = interner.intern(vec![0], vec![0.0], [2, 2, 2], 0);
        let goal = interner.insert_detached(vec![0], vec![0.0], [2, 2, 2], 0);
        assert_ne!(start, goal);
        // The index still resolves the coord to the registered entry
        assert_eq!(interner.lookup(&[0]), Some(start));
        assert_eq!(interner.len(), 2);
    }

    #[test]
    fn test_out_of_range_id_is_reported() {
        let mut interner = StateInterner::new();
        interner.intern(vec![0], vec![0.0], [1, 1, 1], 0);
        let err = interner.get(StateId(7)).unwrap_err();
        assert_eq!(err, PlanningError::InvalidStateId { id: 7, len: 1 });
    }

    #[test]
    fn test_ids_to_angles_resolves_in_order() {
        let mut interner = StateInterner::new();
        let a = interner.intern(vec![0], vec![0.0], [1, 1, 1], 0);
        let b = interner.intern(vec![1], vec![0.5], [1, 1, 1], 0);
        let angles = interner.ids_to_angles(&[b, a, b]).unwrap();
        assert_eq!(angles, vec![vec![0.5], vec![0.0], vec![0.5]]);

        assert!(interner.ids_to_angles(&[StateId(9)]).is_err());
    }
}

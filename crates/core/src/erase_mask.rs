//! Partial-erase bookkeeping owned by the eraser tool
//!
//! A stroke only stores an [`EraseMaskId`]. The masks themselves live in an
//! [`EraseMaskTable`] so their lifetime is decided by whoever runs the eraser;
//! a stroke whose mask was dropped just finds nothing on lookup.

use std::collections::HashMap;

use crate::eraser::EraserHit;

/// Handle to an entry in an [`EraseMaskTable`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct EraseMaskId(pub uuid::Uuid);

impl EraseMaskId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for EraseMaskId {
    fn default() -> Self {
        Self::new()
    }
}

/// Eraser hits collected against one stroke
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EraseMask {
    hits: Vec<EraserHit>,
}

impl EraseMask {
    pub fn record(&mut self, hit: EraserHit) {
        self.hits.push(hit);
    }

    pub fn hits(&self) -> &[EraserHit] {
        &self.hits
    }

    /// Distinct split indices, ascending
    pub fn split_indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = self.hits.iter().map(|hit| hit.split_index).collect();
        indices.sort_unstable();
        indices.dedup();
        indices
    }
}

#[derive(Debug, Default)]
pub struct EraseMaskTable {
    masks: HashMap<EraseMaskId, EraseMask>,
}

impl EraseMaskTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an empty mask and return its handle
    pub fn create(&mut self) -> EraseMaskId {
        let id = EraseMaskId::new();
        self.masks.insert(id, EraseMask::default());
        id
    }

    pub fn get(&self, id: EraseMaskId) -> Option<&EraseMask> {
        self.masks.get(&id)
    }

    pub fn get_mut(&mut self, id: EraseMaskId) -> Option<&mut EraseMask> {
        self.masks.get_mut(&id)
    }

    pub fn remove(&mut self, id: EraseMaskId) -> Option<EraseMask> {
        self.masks.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.masks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masks.is_empty()
    }
}

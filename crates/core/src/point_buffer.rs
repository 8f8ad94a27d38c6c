//! Growable point storage for a stroke
//!
//! Capacity grows by a fixed chunk when an append finds the buffer full and
//! only shrinks on an explicit [`PointBuffer::compact`]. The logical capacity
//! is tracked here rather than read back from `Vec`, whose allocator is free
//! to round up.

use crate::error::{StrokeError, StrokeResult};
use crate::point::Point;

/// Default number of slots added when the buffer fills up
pub const DEFAULT_GROWTH_CHUNK: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct PointBuffer {
    points: Vec<Point>,
    capacity: usize,
    chunk: usize,
}

impl Default for PointBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl PointBuffer {
    pub fn new() -> Self {
        Self::with_chunk(DEFAULT_GROWTH_CHUNK)
    }

    /// Buffer that grows by `chunk` slots at a time (at least one)
    pub fn with_chunk(chunk: usize) -> Self {
        Self { points: Vec::new(), capacity: 0, chunk: chunk.max(1) }
    }

    /// Take ownership of decoded points; capacity equals length
    pub fn from_points(points: Vec<Point>) -> Self {
        let capacity = points.len();
        Self { points, capacity, chunk: DEFAULT_GROWTH_CHUNK }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn growth_chunk(&self) -> usize {
        self.chunk
    }

    /// Grow storage to at least `capacity` slots; never shrinks
    pub fn reserve(&mut self, capacity: usize) {
        if capacity <= self.capacity {
            return;
        }
        self.points.reserve_exact(capacity - self.points.len());
        self.capacity = capacity;
    }

    pub fn append(&mut self, point: Point) {
        if self.points.len() >= self.capacity {
            let target = self.capacity + self.chunk;
            tracing::trace!(from = self.capacity, to = target, "growing point buffer");
            self.reserve(target);
        }
        self.points.push(point);
    }

    /// Drop unused slots so capacity equals length
    pub fn compact(&mut self) {
        if self.capacity == self.points.len() {
            return;
        }
        tracing::trace!(from = self.capacity, to = self.points.len(), "compacting point buffer");
        self.points.shrink_to_fit();
        self.capacity = self.points.len();
    }

    /// Discard `index..`; capacity is kept
    pub fn truncate_from(&mut self, index: usize) {
        if index >= self.points.len() {
            return;
        }
        self.points.truncate(index);
    }

    /// Remove one point, shifting the rest down; out-of-range is a no-op
    pub fn remove_at(&mut self, index: usize) {
        if index >= self.points.len() {
            return;
        }
        self.points.remove(index);
    }

    pub fn get(&self, index: usize) -> StrokeResult<Point> {
        self.points
            .get(index)
            .copied()
            .ok_or(StrokeError::OutOfRange { index, len: self.points.len() })
    }

    pub fn last_mut(&mut self) -> Option<&mut Point> {
        self.points.last_mut()
    }

    pub fn as_slice(&self) -> &[Point] {
        &self.points
    }

    pub fn as_mut_slice(&mut self) -> &mut [Point] {
        &mut self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Point> {
        self.points.iter_mut()
    }
}

impl<'a> IntoIterator for &'a PointBuffer {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

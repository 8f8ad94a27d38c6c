//! Strokes belonging to one page
//!
//! The page owns its strokes: removing one from the page ends its life.
//! Insertion order is kept because it is the paint order.

use std::collections::HashMap;

use crate::element::{Element, Rect};
use crate::erase_mask::EraseMaskTable;
use crate::eraser::EraserHit;
use crate::stroke::Stroke;

/// Unique identifier for a stroke on a page
pub type StrokeId = uuid::Uuid;

#[derive(Debug, Default)]
pub struct Page {
    strokes: HashMap<StrokeId, Stroke>,
    order: Vec<StrokeId>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stroke on top of the existing ones
    pub fn add(&mut self, stroke: Stroke) -> StrokeId {
        let id = uuid::Uuid::new_v4();
        self.strokes.insert(id, stroke);
        self.order.push(id);
        id
    }

    pub fn remove(&mut self, id: StrokeId) -> Option<Stroke> {
        let stroke = self.strokes.remove(&id)?;
        self.order.retain(|&sid| sid != id);
        Some(stroke)
    }

    pub fn get(&self, id: StrokeId) -> Option<&Stroke> {
        self.strokes.get(&id)
    }

    pub fn get_mut(&mut self, id: StrokeId) -> Option<&mut Stroke> {
        self.strokes.get_mut(&id)
    }

    /// Strokes in paint order (bottom first)
    pub fn iter(&self) -> impl Iterator<Item = (StrokeId, &Stroke)> + '_ {
        self.order.iter().filter_map(|id| self.strokes.get(id).map(|stroke| (*id, stroke)))
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn clear(&mut self) {
        self.strokes.clear();
        self.order.clear();
    }

    /// Union of all stroke boxes, `None` for an empty page
    pub fn bounding_box(&self) -> Option<Rect> {
        self.iter().map(|(_, stroke)| stroke.bounding_box()).reduce(|a, b| a.union(&b))
    }

    /// Strokes the eraser footprint touches, in paint order
    pub fn hit_test_eraser(&self, x: f64, y: f64, half_size: f64) -> Vec<(StrokeId, EraserHit)> {
        self.iter()
            .filter_map(|(id, stroke)| stroke.intersects(x, y, half_size).map(|hit| (id, hit)))
            .collect()
    }

    /// Remove every stroke under the eraser, returning their ids
    pub fn erase_whole_strokes(&mut self, x: f64, y: f64, half_size: f64) -> Vec<StrokeId> {
        let hits: Vec<StrokeId> =
            self.hit_test_eraser(x, y, half_size).into_iter().map(|(id, _)| id).collect();
        for id in &hits {
            self.remove(*id);
        }
        if !hits.is_empty() {
            tracing::debug!(removed = hits.len(), "erased whole strokes");
        }
        hits
    }

    /// Record eraser hits in each touched stroke's mask, creating masks as needed
    ///
    /// Returns the number of strokes hit.
    pub fn mark_partial_erase(
        &mut self,
        x: f64,
        y: f64,
        half_size: f64,
        masks: &mut EraseMaskTable,
    ) -> usize {
        let hits = self.hit_test_eraser(x, y, half_size);
        for (id, hit) in &hits {
            let Some(stroke) = self.strokes.get_mut(id) else {
                continue;
            };
            let mask_id = match stroke.erase_mask().filter(|mask| masks.get(*mask).is_some()) {
                Some(mask_id) => mask_id,
                None => {
                    let mask_id = masks.create();
                    stroke.set_erase_mask(Some(mask_id));
                    mask_id
                }
            };
            if let Some(mask) = masks.get_mut(mask_id) {
                mask.record(*hit);
            }
        }
        hits.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Point;
    use crate::stroke::StrokeTool;

    fn line(y: f64) -> Stroke {
        let mut stroke = Stroke::new(StrokeTool::Pen, 1.0);
        stroke.add_point(Point::without_pressure(0.0, y));
        stroke.add_point(Point::without_pressure(100.0, y));
        stroke
    }

    #[test]
    fn add_remove_keeps_order() {
        let mut page = Page::new();
        let a = page.add(line(0.0));
        let b = page.add(line(10.0));
        let c = page.add(line(20.0));

        let ids: Vec<_> = page.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![a, b, c]);

        assert!(page.remove(b).is_some());
        assert!(page.remove(b).is_none());
        let ids: Vec<_> = page.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![a, c]);
        assert_eq!(page.len(), 2);

        page.clear();
        assert!(page.is_empty());
        assert_eq!(page.bounding_box(), None);
    }

    #[test]
    fn page_box_is_union() {
        let mut page = Page::new();
        page.add(line(0.0));
        page.add(line(50.0));
        let bbox = page.bounding_box().unwrap();
        assert_eq!(bbox, Rect::new(-2.0, -2.0, 105.0, 55.0));
    }

    #[test]
    fn whole_stroke_erase() {
        let mut page = Page::new();
        let keep = page.add(line(0.0));
        let gone = page.add(line(50.0));

        let removed = page.erase_whole_strokes(50.0, 51.0, 3.0);
        assert_eq!(removed, vec![gone]);
        assert!(page.get(keep).is_some());
        assert!(page.get(gone).is_none());

        assert!(page.erase_whole_strokes(50.0, 25.0, 3.0).is_empty());
    }

    #[test]
    fn partial_erase_attaches_masks() {
        let mut page = Page::new();
        let id = page.add(line(0.0));
        let other = page.add(line(80.0));
        let mut masks = EraseMaskTable::new();

        assert_eq!(page.mark_partial_erase(30.0, 1.0, 3.0, &mut masks), 1);
        let mask_id = page.get(id).unwrap().erase_mask().expect("mask attached");
        assert!(page.get(other).unwrap().erase_mask().is_none());

        assert_eq!(page.mark_partial_erase(70.0, 1.0, 3.0, &mut masks), 1);
        assert_eq!(page.get(id).unwrap().erase_mask(), Some(mask_id));
        assert_eq!(masks.get(mask_id).unwrap().hits().len(), 2);
        assert_eq!(masks.len(), 1);

        // A dropped mask is replaced, the stale handle is not reused
        masks.remove(mask_id);
        page.mark_partial_erase(30.0, 1.0, 3.0, &mut masks);
        let new_mask = page.get(id).unwrap().erase_mask().unwrap();
        assert_ne!(new_mask, mask_id);
        assert_eq!(masks.get(new_mask).unwrap().hits().len(), 1);
    }

    #[test]
    fn removing_stroke_leaves_mask_table_alone() {
        let mut page = Page::new();
        let id = page.add(line(0.0));
        let mut masks = EraseMaskTable::new();
        page.mark_partial_erase(30.0, 0.0, 3.0, &mut masks);

        page.remove(id);
        assert_eq!(masks.len(), 1);
    }
}

//! Eraser hit-testing against a stroke's polyline
//!
//! The eraser footprint is an axis-aligned square of side `2 * half_size`.
//! Each segment is tested in two stages: a cheap "endpoint inside the square"
//! check, then, for segments at least `half_size` long, a perpendicular
//! distance test followed by a circle approximation of the square, measured
//! from the point halfway between the segment start and the eraser. This is
//! looser than exact square/segment clipping; the eraser only needs to know
//! whether it passed near a segment.

use crate::stroke::Stroke;

/// Slack added to the half segment length when comparing against the footprint
pub const HIT_SLACK: f64 = 0.1;

/// Where the eraser touched a stroke
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct EraserHit {
    /// Index of the segment's end point; the stroke would be split there.
    /// Always at least 1.
    pub split_index: usize,
    /// 0 when an end point lies inside the footprint, otherwise the signed
    /// distance from the start-to-eraser midpoint to the footprint edge
    pub gap: f64,
}

impl Stroke {
    /// First segment the eraser at `(x, y)` intersects, if any
    pub fn intersects(&self, x: f64, y: f64, half_size: f64) -> Option<EraserHit> {
        let points = self.points();
        let x1 = x - half_size;
        let x2 = x + half_size;
        let y1 = y - half_size;
        let y2 = y + half_size;
        let footprint_radius = half_size.hypot(half_size);

        for (index, segment) in points.windows(2).enumerate() {
            let (last, point) = (segment[0], segment[1]);
            let split_index = index + 1;

            if point.x >= x1 && point.y >= y1 && point.x <= x2 && point.y <= y2 {
                return Some(EraserHit { split_index, gap: 0.0 });
            }

            let len = (point.x - last.x).hypot(point.y - last.y);
            if len < half_size || len == 0.0 {
                continue;
            }

            // Distance from the eraser to the infinite line through the segment
            let cross = (x - last.x) * (last.y - point.y) + (y - last.y) * (point.x - last.x);
            let perpendicular = cross.abs() / len;
            if perpendicular > half_size {
                continue;
            }

            // Close to the line, but the segment may end short of the eraser
            let center_x = (last.x + x) / 2.0;
            let center_y = (last.y + y) / 2.0;
            let distance = (x - center_x).hypot(y - center_y) - footprint_radius;

            if distance <= len / 2.0 + HIT_SLACK {
                return Some(EraserHit { split_index, gap: distance });
            }
        }

        None
    }
}

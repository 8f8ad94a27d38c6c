//! Freehand ink stroke
//!
//! A stroke is an ordered run of sampled points plus the nib width and tool
//! it was drawn with. Points are appended while the pen is down; afterwards
//! the editing tools move, scale, re-pressure or cut it. The bounding box is
//! padded for the nib so it can serve as a repaint rectangle.

use std::fmt;

use crate::config::InkConfig;
use crate::element::{Element, ElementBase, ElementKind, Rect, ShapeContainer};
use crate::erase_mask::EraseMaskId;
use crate::error::{StreamError, StreamResult, StrokeError, StrokeResult};
use crate::point::Point;
use crate::point_buffer::PointBuffer;
use crate::stream::{ObjectInputStream, ObjectOutputStream};

/// Padding added on each side of the sampled centerline
const BOX_PADDING: f64 = 2.0;

/// Tool a stroke was drawn with
///
/// Discriminants are the integers stored in documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum StrokeTool {
    Pen = 0,
    Eraser = 1,
    Highlighter = 2,
}

impl StrokeTool {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for StrokeTool {
    type Error = StreamError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(StrokeTool::Pen),
            1 => Ok(StrokeTool::Eraser),
            2 => Ok(StrokeTool::Highlighter),
            other => Err(StreamError::InvalidToolType(other)),
        }
    }
}

impl fmt::Display for StrokeTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StrokeTool::Pen => "pen",
            StrokeTool::Eraser => "eraser",
            StrokeTool::Highlighter => "highlighter",
        };
        f.write_str(name)
    }
}

#[derive(Debug)]
pub struct Stroke {
    base: ElementBase,
    points: PointBuffer,
    width: f64,
    tool: StrokeTool,
    erase_mask: Option<EraseMaskId>,
}

impl Stroke {
    pub fn new(tool: StrokeTool, width: f64) -> Self {
        Self {
            base: ElementBase::new(ElementKind::Stroke),
            points: PointBuffer::new(),
            width,
            tool,
            erase_mask: None,
        }
    }

    /// Empty stroke using the configured nib width and buffer growth
    pub fn from_config(tool: StrokeTool, config: &InkConfig) -> Self {
        let mut stroke = Self::new(tool, config.width_for(tool));
        stroke.points = PointBuffer::with_chunk(config.point_growth_chunk);
        stroke
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn set_width(&mut self, width: f64) {
        self.width = width;
        self.base.mark_dirty();
    }

    pub fn tool(&self) -> StrokeTool {
        self.tool
    }

    pub fn set_tool(&mut self, tool: StrokeTool) {
        self.tool = tool;
    }

    pub fn erase_mask(&self) -> Option<EraseMaskId> {
        self.erase_mask
    }

    pub fn set_erase_mask(&mut self, mask: Option<EraseMaskId>) {
        self.erase_mask = mask;
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        self.points.as_slice()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    /// Allocated point slots
    pub fn point_capacity(&self) -> usize {
        self.points.capacity()
    }

    pub fn add_point(&mut self, point: Point) {
        self.points.append(point);
        self.base.mark_dirty();
    }

    /// Point at `index`, or a zero point (logged) when out of range
    pub fn get_point(&self, index: usize) -> Point {
        match self.points.get(index) {
            Ok(point) => point,
            Err(err) => {
                tracing::warn!(index, len = self.points.len(), "Stroke::get_point: {err}");
                Point::zero()
            }
        }
    }

    pub fn try_point(&self, index: usize) -> StrokeResult<Point> {
        self.points.get(index)
    }

    /// Move the still-open end of the stroke
    pub fn set_last_point(&mut self, x: f64, y: f64) {
        if let Some(last) = self.points.last_mut() {
            last.x = x;
            last.y = y;
            self.base.mark_dirty();
        }
    }

    pub fn delete_points_from(&mut self, index: usize) {
        if index < self.points.len() {
            self.points.truncate_from(index);
            self.base.mark_dirty();
        }
    }

    pub fn delete_point(&mut self, index: usize) {
        if index < self.points.len() {
            self.points.remove_at(index);
            self.base.mark_dirty();
        }
    }

    /// Release buffer slots left over from drawing
    pub fn free_unused_points(&mut self) {
        self.points.compact();
    }

    /// Pressure is all-or-nothing per stroke, so only the first sample is checked
    pub fn has_pressure(&self) -> bool {
        self.points.as_slice().first().is_some_and(Point::has_pressure)
    }

    pub fn scale_pressure(&mut self, factor: f64) {
        if !self.has_pressure() {
            return;
        }
        for point in self.points.iter_mut() {
            point.pressure *= factor;
        }
    }

    pub fn clear_pressure(&mut self) {
        for point in self.points.iter_mut() {
            point.pressure = Point::NO_PRESSURE;
        }
    }

    pub fn set_last_pressure(&mut self, pressure: f64) {
        if let Some(last) = self.points.last_mut() {
            last.pressure = pressure;
        }
    }

    /// Overwrite pressures positionally
    ///
    /// `None` leaves the stroke untouched. Fewer values than points is
    /// rejected; extra values are ignored.
    pub fn set_pressure(&mut self, data: Option<&[f64]>) -> StrokeResult<()> {
        let Some(data) = data else {
            return Ok(());
        };
        if data.len() < self.points.len() {
            return Err(StrokeError::InvalidArgument(format!(
                "pressure data has {} values for {} points",
                data.len(),
                self.points.len()
            )));
        }
        for (point, &pressure) in self.points.iter_mut().zip(data) {
            point.pressure = pressure;
        }
        Ok(())
    }

    /// True when every point lies inside `container`
    pub fn is_in_selection(&self, container: &impl ShapeContainer) -> bool {
        self.points.iter().all(|p| container.contains(p.x, p.y))
    }

    /// Decode a stroke object
    ///
    /// The stroke only exists once every field has been read; a failure
    /// leaves nothing behind for the caller to misuse.
    pub fn read_from(input: &mut ObjectInputStream<'_>) -> StreamResult<Self> {
        input.read_object(ElementKind::Stroke.tag())?;

        let mut base = ElementBase::new(ElementKind::Stroke);
        base.read_serialized(input)?;

        let width = input.read_double()?;
        let tool = StrokeTool::try_from(input.read_int()?)?;

        let (count, bytes) = input.read_data(Point::RECORD_SIZE)?;
        let points = bytes
            .chunks_exact(Point::RECORD_SIZE)
            .filter_map(Point::from_record)
            .collect::<Vec<_>>();
        debug_assert_eq!(points.len(), count);

        input.end_object()?;

        Ok(Self { base, points: PointBuffer::from_points(points), width, tool, erase_mask: None })
    }
}

/// Copies points, color, tool and width; the erase mask is not carried over
impl Clone for Stroke {
    fn clone(&self) -> Self {
        let mut points = PointBuffer::with_chunk(self.points.growth_chunk());
        points.reserve(self.points.len());
        for point in self.points.iter() {
            points.append(*point);
        }

        let mut base = ElementBase::new(ElementKind::Stroke);
        base.set_color(self.base.color());

        Self { base, points, width: self.width, tool: self.tool, erase_mask: None }
    }
}

impl Element for Stroke {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn calc_size(&self, previous: Rect) -> Rect {
        let points = self.points.as_slice();
        let Some(first) = points.first() else {
            return Rect::new(previous.x, previous.y, 0.0, 0.0);
        };

        let (mut min_x, mut max_x, mut min_y, mut max_y) = (first.x, first.x, first.y, first.y);
        for point in &points[1..] {
            min_x = min_x.min(point.x);
            max_x = max_x.max(point.x);
            min_y = min_y.min(point.y);
            max_y = max_y.max(point.y);
        }

        Rect::new(
            min_x - BOX_PADDING,
            min_y - BOX_PADDING,
            max_x - min_x + 2.0 * BOX_PADDING + self.width,
            max_y - min_y + 2.0 * BOX_PADDING + self.width,
        )
    }

    fn move_by(&mut self, dx: f64, dy: f64) {
        for point in self.points.iter_mut() {
            point.x += dx;
            point.y += dy;
        }
        self.base.mark_dirty();
    }

    /// Pressure and width are a scalar thickness, so they take the mean of
    /// the two axis factors. A mean that is not positive (a reflection, say)
    /// still moves the points but leaves width and pressure as they were.
    fn scale(&mut self, x0: f64, y0: f64, fx: f64, fy: f64) {
        let fz = (fx + fy) / 2.0;
        let thickness = fz > 0.0 && fz.is_finite();
        if !thickness {
            tracing::warn!(fx, fy, "Stroke::scale: non-positive thickness factor, width and pressure kept");
        }

        for point in self.points.iter_mut() {
            point.x = (point.x - x0) * fx + x0;
            point.y = (point.y - y0) * fy + y0;
            if thickness && point.has_pressure() {
                point.pressure *= fz;
            }
        }
        if thickness {
            self.width *= fz;
        }
        self.base.mark_dirty();
    }

    fn serialize(&self, out: &mut ObjectOutputStream) -> StreamResult<()> {
        out.write_object(ElementKind::Stroke.tag())?;
        self.base.serialize(self.bounding_box(), out)?;
        out.write_double(self.width);
        out.write_int(self.tool.as_i32());

        let mut records = Vec::with_capacity(self.points.len() * Point::RECORD_SIZE);
        for point in self.points.iter() {
            records.extend_from_slice(&point.to_record());
        }
        out.write_data(&records, self.points.len(), Point::RECORD_SIZE)?;

        out.end_object();
        Ok(())
    }
}

impl fmt::Display for Stroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Stroke(tool={}, width={}, pressure={})", self.tool, self.width, self.has_pressure())?;
        for point in self.points.iter() {
            write!(f, " {}/{}", point.x, point.y)?;
        }
        Ok(())
    }
}

//! Shared contract for drawable page elements
//!
//! Every element carries a color and a cached bounding box. The box is
//! derived from the element's own geometry and recomputed lazily: mutators
//! call [`ElementBase::mark_dirty`] and the next read runs the element's
//! `calc_size`.

use std::cell::Cell;

use crate::error::StreamResult;
use crate::stream::{ObjectInputStream, ObjectOutputStream};

/// RGBA color representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Pack as `0xRRGGBBAA`
    pub fn to_u32(self) -> u32 {
        u32::from_be_bytes([self.r, self.g, self.b, self.a])
    }

    pub fn from_u32(packed: u32) -> Self {
        let [r, g, b, a] = packed.to_be_bytes();
        Self { r, g, b, a }
    }
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const RED: Color = Color { r: 255, g: 0, b: 0, a: 255 };
    pub const BLUE: Color = Color { r: 0, g: 0, b: 255, a: 255 };
    pub const YELLOW: Color = Color { r: 255, g: 255, b: 0, a: 255 };
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

/// Axis-aligned rectangle in page coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Smallest rectangle covering both
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect::new(x, y, self.right().max(other.right()) - x, self.bottom().max(other.bottom()) - y)
    }
}

/// A region that can answer point containment (selection lasso, rectangle)
pub trait ShapeContainer {
    fn contains(&self, x: f64, y: f64) -> bool;
}

impl ShapeContainer for Rect {
    fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }
}

/// Closed set of element kinds that can live on a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ElementKind {
    Stroke,
}

impl ElementKind {
    /// Object tag used in the document stream
    pub fn tag(self) -> &'static str {
        match self {
            ElementKind::Stroke => "Stroke",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "Stroke" => Some(ElementKind::Stroke),
            _ => None,
        }
    }
}

/// Position, size and color storage common to all elements
///
/// The bounding box sits in `Cell`s so a shared borrow can refresh it; the
/// model is single-threaded.
#[derive(Debug, Clone)]
pub struct ElementBase {
    kind: ElementKind,
    color: Color,
    bounds: Cell<Rect>,
    size_dirty: Cell<bool>,
}

impl ElementBase {
    pub fn new(kind: ElementKind) -> Self {
        Self { kind, color: Color::default(), bounds: Cell::new(Rect::default()), size_dirty: Cell::new(true) }
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Invalidate the cached bounding box
    pub fn mark_dirty(&self) {
        self.size_dirty.set(true);
    }

    pub fn is_size_dirty(&self) -> bool {
        self.size_dirty.get()
    }

    /// Cached box, refreshed through `calc` when dirty
    ///
    /// `calc` receives the previous box so degenerate geometry can keep
    /// its position.
    pub fn ensure_size(&self, calc: impl FnOnce(Rect) -> Rect) -> Rect {
        if self.size_dirty.get() {
            self.bounds.set(calc(self.bounds.get()));
            self.size_dirty.set(false);
        }
        self.bounds.get()
    }

    /// Write color and `bounds`; callers pass their refreshed bounding box
    pub fn serialize(&self, bounds: Rect, out: &mut ObjectOutputStream) -> StreamResult<()> {
        out.write_object("Element")?;
        out.write_int(self.color.to_u32() as i32);
        out.write_double(bounds.x);
        out.write_double(bounds.y);
        out.write_double(bounds.width);
        out.write_double(bounds.height);
        out.end_object();
        Ok(())
    }

    /// Restore color and stored bounds; the box stays dirty because the
    /// owning element replaces its geometry right after.
    pub fn read_serialized(&mut self, input: &mut ObjectInputStream<'_>) -> StreamResult<()> {
        input.read_object("Element")?;
        self.color = Color::from_u32(input.read_int()? as u32);
        let x = input.read_double()?;
        let y = input.read_double()?;
        let width = input.read_double()?;
        let height = input.read_double()?;
        input.end_object()?;

        self.bounds.set(Rect::new(x, y, width, height));
        self.size_dirty.set(true);
        Ok(())
    }
}

/// Behaviour shared by every drawable element
pub trait Element {
    fn base(&self) -> &ElementBase;

    fn base_mut(&mut self) -> &mut ElementBase;

    /// Compute a fresh bounding box from the element's geometry
    fn calc_size(&self, previous: Rect) -> Rect;

    /// Translate by a fixed offset
    fn move_by(&mut self, dx: f64, dy: f64);

    /// Scale about `(x0, y0)` independently per axis
    fn scale(&mut self, x0: f64, y0: f64, fx: f64, fy: f64);

    fn serialize(&self, out: &mut ObjectOutputStream) -> StreamResult<()>;

    fn kind(&self) -> ElementKind {
        self.base().kind()
    }

    fn color(&self) -> Color {
        self.base().color()
    }

    fn set_color(&mut self, color: Color) {
        self.base_mut().set_color(color);
    }

    /// Bounding box, recomputed first if the geometry changed
    fn bounding_box(&self) -> Rect {
        self.base().ensure_size(|previous| self.calc_size(previous))
    }
}

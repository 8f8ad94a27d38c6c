//! Closed set of element types readable from a document stream
//!
//! The reader peeks the next object tag once and dispatches on it, so an
//! unknown tag is reported instead of being decoded as the wrong type.

use crate::element::{Element, ElementKind};
use crate::error::{StreamError, StreamResult};
use crate::stream::{ObjectInputStream, ObjectOutputStream};
use crate::stroke::Stroke;

#[derive(Debug, Clone)]
pub enum DocumentElement {
    Stroke(Stroke),
}

impl DocumentElement {
    pub fn kind(&self) -> ElementKind {
        match self {
            DocumentElement::Stroke(_) => ElementKind::Stroke,
        }
    }

    pub fn as_element(&self) -> &dyn Element {
        match self {
            DocumentElement::Stroke(stroke) => stroke,
        }
    }

    pub fn serialize(&self, out: &mut ObjectOutputStream) -> StreamResult<()> {
        self.as_element().serialize(out)
    }

    pub fn into_stroke(self) -> Option<Stroke> {
        match self {
            DocumentElement::Stroke(stroke) => Some(stroke),
        }
    }
}

impl From<Stroke> for DocumentElement {
    fn from(stroke: Stroke) -> Self {
        DocumentElement::Stroke(stroke)
    }
}

/// Read whichever element comes next
pub fn read_element(input: &mut ObjectInputStream<'_>) -> StreamResult<DocumentElement> {
    let tag = input.peek_object()?;
    match ElementKind::from_tag(&tag) {
        Some(ElementKind::Stroke) => Stroke::read_from(input).map(DocumentElement::Stroke),
        None => Err(StreamError::UnknownElement(tag)),
    }
}

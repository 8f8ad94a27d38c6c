//! Page persistence
//!
//! A page file is a single `"Page"` object in the binary object stream: an
//! element count followed by that many element objects. JSON export is a
//! read-only summary for tooling.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::element::{Color, Element, Rect};
use crate::error::{StreamError, StreamResult};
use crate::page::Page;
use crate::point::Point;
use crate::registry::{read_element, DocumentElement};
use crate::stream::{len_to_i32, ObjectInputStream, ObjectOutputStream};
use crate::stroke::StrokeTool;

const PAGE_TAG: &str = "Page";

/// Error types for persistence operations
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("malformed document: {0}")]
    Format(#[from] StreamError),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

pub fn write_page(page: &Page, out: &mut ObjectOutputStream) -> StreamResult<()> {
    out.write_object(PAGE_TAG)?;
    out.write_int(len_to_i32(page.len())?);
    for (_, stroke) in page.iter() {
        stroke.serialize(out)?;
    }
    out.end_object();
    Ok(())
}

/// Decode a page object; nothing is returned unless every element decoded
pub fn read_page(input: &mut ObjectInputStream<'_>) -> StreamResult<Page> {
    input.read_object(PAGE_TAG)?;
    let count = input.read_int()?;
    let count = usize::try_from(count).map_err(|_| StreamError::InvalidLength(i64::from(count)))?;

    let mut page = Page::new();
    for _ in 0..count {
        match read_element(input)? {
            DocumentElement::Stroke(stroke) => page.add(stroke),
        };
    }
    input.end_object()?;
    Ok(page)
}

pub fn page_to_bytes(page: &Page) -> StreamResult<Vec<u8>> {
    let mut out = ObjectOutputStream::new();
    write_page(page, &mut out)?;
    Ok(out.into_bytes())
}

/// Decode a whole buffer, rejecting bytes after the page object
pub fn page_from_bytes(bytes: &[u8]) -> StreamResult<Page> {
    let mut input = ObjectInputStream::new(bytes);
    let page = read_page(&mut input)?;
    match input.remaining() {
        0 => Ok(page),
        extra => Err(StreamError::TrailingData(extra)),
    }
}

/// Save a page atomically (temp file + rename)
pub fn save_page(path: &Path, page: &Page) -> PersistenceResult<()> {
    let bytes = page_to_bytes(page)?;
    let temp_path = temp_path_for(path);
    fs::write(&temp_path, &bytes)?;
    fs::rename(&temp_path, path)?;
    tracing::info!(path = %path.display(), strokes = page.len(), bytes = bytes.len(), "saved page");
    Ok(())
}

pub fn load_page(path: &Path) -> PersistenceResult<Page> {
    let bytes = fs::read(path)?;
    let page = page_from_bytes(&bytes)?;
    tracing::info!(path = %path.display(), strokes = page.len(), "loaded page");
    Ok(page)
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// JSON view of one stroke
#[derive(Debug, Clone, Serialize)]
pub struct StrokeSummary {
    pub id: String,
    pub tool: StrokeTool,
    pub width: f64,
    pub color: Color,
    pub point_count: usize,
    pub has_pressure: bool,
    pub bounding_box: Rect,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<Point>>,
}

/// JSON view of a page
#[derive(Debug, Clone, Serialize)]
pub struct PageSummary {
    pub stroke_count: usize,
    pub bounding_box: Option<Rect>,
    pub strokes: Vec<StrokeSummary>,
}

/// Summarize a page; `include_points` adds every sample
pub fn summarize(page: &Page, include_points: bool) -> PageSummary {
    let strokes = page
        .iter()
        .map(|(id, stroke)| StrokeSummary {
            id: id.to_string(),
            tool: stroke.tool(),
            width: stroke.width(),
            color: stroke.color(),
            point_count: stroke.point_count(),
            has_pressure: stroke.has_pressure(),
            bounding_box: stroke.bounding_box(),
            points: include_points.then(|| stroke.points().to_vec()),
        })
        .collect();

    PageSummary { stroke_count: page.len(), bounding_box: page.bounding_box(), strokes }
}

/// Full JSON export, points included
pub fn export_json(page: &Page) -> PersistenceResult<String> {
    Ok(serde_json::to_string_pretty(&summarize(page, true))?)
}

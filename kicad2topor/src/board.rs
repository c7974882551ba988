//! Board Schema Definitions
//!
//! Data structures for the converted PCB: layers, placed modules, pads,
//! routed copper and the board outline. All coordinates are millimeters in
//! a right-handed coordinate system (the KiCad Y axis is negated once at
//! extraction time, see `parser::pcb`).

use serde::{Deserialize, Serialize};

/// A point on the board (mm).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Manhattan distance, used for endpoint matching in the outline
    /// stitcher.
    pub fn manhattan(&self, other: &Point) -> f64 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

/// Board layer definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    pub name: String,
    pub kind: LayerKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayerKind {
    Signal,
    User,
    Plane,
}

impl Default for LayerKind {
    fn default() -> Self {
        LayerKind::Signal
    }
}

/// Text label kinds. `Reference` and `Value` occur once per module;
/// `Simple` is free-standing board text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextKind {
    Reference,
    Value,
    User,
    Simple,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub kind: TextKind,
    pub text: String,
    pub layer: String,
    pub pos: Point,
    pub angle: f64,
}

/// A drawing primitive. Extractor and emitter both dispatch on this one
/// variant; no other place re-derives the figure kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Figure {
    Line {
        layer: String,
        width: f64,
        start: Point,
        end: Point,
    },
    /// After extraction `end` holds the arc center (KiCad stores the center
    /// in its nominal "start" field); the outline builder replaces it with
    /// the computed literal endpoint. `angle` is the sweep in degrees,
    /// sign-flipped at extraction to match the negated Y axis.
    Arc {
        layer: String,
        width: f64,
        start: Point,
        end: Point,
        angle: f64,
    },
    Circle {
        layer: String,
        width: f64,
        center: Point,
        end: Point,
    },
    Polygon {
        layer: String,
        width: f64,
        points: Vec<Point>,
    },
}

impl Figure {
    pub fn layer(&self) -> &str {
        match self {
            Figure::Line { layer, .. }
            | Figure::Arc { layer, .. }
            | Figure::Circle { layer, .. }
            | Figure::Polygon { layer, .. } => layer,
        }
    }

    pub fn width(&self) -> f64 {
        match self {
            Figure::Line { width, .. }
            | Figure::Arc { width, .. }
            | Figure::Circle { width, .. }
            | Figure::Polygon { width, .. } => *width,
        }
    }

    /// Start point for contour traversal. Circles and polygons do not take
    /// part in contour stitching and fall back to their anchor point.
    pub fn start_point(&self) -> Point {
        match self {
            Figure::Line { start, .. } | Figure::Arc { start, .. } => *start,
            Figure::Circle { center, .. } => *center,
            Figure::Polygon { points, .. } => points.first().copied().unwrap_or_default(),
        }
    }

    /// End point for contour traversal.
    pub fn end_point(&self) -> Point {
        match self {
            Figure::Line { end, .. } | Figure::Arc { end, .. } => *end,
            Figure::Circle { end, .. } => *end,
            Figure::Polygon { points, .. } => points.last().copied().unwrap_or_default(),
        }
    }

    /// Flip traversal direction in place. Reversing an arc swaps its
    /// endpoints and negates the sweep.
    pub fn reverse(&mut self) {
        match self {
            Figure::Line { start, end, .. } => std::mem::swap(start, end),
            Figure::Arc {
                start, end, angle, ..
            } => {
                std::mem::swap(start, end);
                *angle = -*angle;
            }
            Figure::Circle { .. } | Figure::Polygon { .. } => {}
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PadShape {
    Circle,
    Rect,
    Oval,
    Custom,
}

/// Pad placement: position relative to the module origin plus rotation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PadPos {
    pub pos: Point,
    pub rot: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pad {
    pub pad_id: String,
    pub smd: bool,
    pub drill: f64,
    pub shape: PadShape,
    pub center: PadPos,
    pub size: (f64, f64),
    pub layers: Vec<String>,
    pub net_id: Option<u32>,
    pub net_name: Option<String>,
    /// Outline points of `Custom` pads, flattened from nested polygon
    /// primitives.
    pub extra_points: Vec<Point>,
}

/// A placed component footprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub footprint: String,
    pub layer: String,
    pub pos: Point,
    /// Rotation in degrees. Back-side modules are normalized by +180° mod
    /// 360 at extraction so orientation always reads as seen from the front.
    pub rot: f64,
    pub smd: bool,
    pub texts: Vec<Text>,
    pub figures: Vec<Figure>,
    pub pads: Vec<Pad>,
    /// Pad ids minted by collision renaming, in mint order.
    pub extrapads: Vec<String>,
}

impl Module {
    /// Reference designator, taken from the first `Reference` text.
    pub fn reference(&self) -> Option<&str> {
        self.texts
            .iter()
            .find(|t| t.kind == TextKind::Reference)
            .map(|t| t.text.as_str())
    }

    /// Part name, taken from the first `Value` text.
    pub fn value(&self) -> Option<&str> {
        self.texts
            .iter()
            .find(|t| t.kind == TextKind::Value)
            .map(|t| t.text.as_str())
    }

    pub fn is_back(&self) -> bool {
        self.layer.starts_with("B.")
    }
}

/// A pad-on-module reference inside a net.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub module_ref: String,
    pub pad_id: String,
}

/// An electrical net. Created with empty collections at extraction; the
/// resolver appends contacts, segments and vias afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Net {
    pub net_id: u32,
    pub net_name: String,
    pub contacts: Vec<Contact>,
    pub segments: Vec<Segment>,
    pub vias: Vec<Via>,
    /// Name of the owning net class, empty until resolved.
    pub group: String,
}

impl Net {
    pub fn new(net_id: u32, net_name: String) -> Self {
        Self {
            net_id,
            net_name,
            contacts: Vec::new(),
            segments: Vec::new(),
            vias: Vec::new(),
            group: String::new(),
        }
    }
}

/// Net class: routing rules plus the net names the class claims.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetClass {
    pub name: String,
    pub clearance: f64,
    pub trace_width: f64,
    pub via_diameter: f64,
    pub via_drill: f64,
    pub nets: Vec<String>,
}

/// One straight run of routed copper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
    pub width: f64,
    pub layer: String,
    pub net_id: u32,
}

impl Segment {
    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }
}

/// A plated hole connecting layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Via {
    pub center: Point,
    pub size: f64,
    pub drill: f64,
    pub layers: Vec<String>,
    pub net_id: u32,
}

/// Aggregate root for one conversion run. Owns every entity; nothing
/// outlives it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Board {
    pub layers: Vec<Layer>,
    pub modules: Vec<Module>,
    /// Board outline figures. Unordered after extraction; the outline
    /// builder leaves them ordered end-to-end.
    pub edge: Vec<Figure>,
    pub texts: Vec<Text>,
    pub nets: Vec<Net>,
    pub net_classes: Vec<NetClass>,
    /// Routed copper staged at extraction, drained into the owning nets by
    /// the resolver.
    pub segments: Vec<Segment>,
    pub vias: Vec<Via>,
}

impl Board {
    pub fn net_by_id_mut(&mut self, net_id: u32) -> Option<&mut Net> {
        self.nets.iter_mut().find(|n| n.net_id == net_id)
    }

    pub fn net_by_id(&self, net_id: u32) -> Option<&Net> {
        self.nets.iter().find(|n| n.net_id == net_id)
    }
}

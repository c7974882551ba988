//! KiCad board extractor.
//!
//! Walks the parsed s-expression tree of a `.kicad_pcb` file and produces
//! the typed [`Board`] aggregate. All source-format normalizations happen
//! here, each applied exactly once:
//!
//! - every Y ordinate is negated (KiCad's Y axis grows downwards, the
//!   output format's grows upwards);
//! - arc records swap their nominal fields: KiCad stores the arc center in
//!   `start` and the literal start point in `end`; the sweep sign flips
//!   with the Y axis;
//! - wildcard layer tokens (`*.Cu`) expand to the front/back pair and
//!   unrecognized layer names are dropped with a warning;
//! - pads on one module get unique ids, renamed deterministically on
//!   collision;
//! - back-side modules with an explicit rotation get +180° mod 360 so the
//!   orientation reads as seen from the front.

use std::collections::HashSet;

use thiserror::Error;
use tracing::{debug, warn};

use crate::board::{
    Board, Figure, Layer, LayerKind, Module, Net, NetClass, Pad, PadPos, PadShape, Point, Segment,
    Text, TextKind, Via,
};
use crate::parser::sexp::{self, Sexpr, SexprError};

/// Layer names the converter understands. Anything else is dropped (with a
/// warning), never invented.
pub const RECOGNIZED_LAYERS: &[&str] = &[
    "F.Cu", "B.Cu", "F.SilkS", "B.SilkS", "F.Paste", "B.Paste", "F.Mask", "B.Mask", "F.Adhes",
    "B.Adhes", "F.CrtYd", "B.CrtYd", "F.Fab", "B.Fab", "Edge.Cuts", "Dwgs.User", "Cmts.User",
    "Eco1.User", "Eco2.User", "Margin",
];

/// The layer whose figures define the physical board boundary.
pub const OUTLINE_LAYER: &str = "Edge.Cuts";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("s-expression parse error: {0}")]
    Sexpr(#[from] SexprError),
    #[error("not a KiCad board: expected kicad_pcb root, found {0}")]
    NotABoard(String),
    #[error("board has no layers section")]
    NoLayers,
    #[error("missing required field `{field}` in {record} record")]
    MissingField {
        record: &'static str,
        field: &'static str,
    },
    #[error("malformed {record} record: {reason}")]
    Malformed {
        record: &'static str,
        reason: String,
    },
}

/// Extractor for KiCad board files.
pub struct BoardParser;

impl BoardParser {
    /// Parse board text into the typed aggregate.
    pub fn parse_board(input: &str) -> Result<Board, ExtractError> {
        let root = sexp::parse(input)?;
        Self::from_sexpr(&root)
    }

    /// Extract a board from an already-parsed tree.
    pub fn from_sexpr(root: &Sexpr) -> Result<Board, ExtractError> {
        match root.tag() {
            Some("kicad_pcb") => {}
            other => return Err(ExtractError::NotABoard(other.unwrap_or("<atom>").to_string())),
        }

        let mut board = Board::default();

        let layers = root.child("layers").ok_or(ExtractError::NoLayers)?;
        board.layers = Self::parse_layers(layers)?;

        for item in root.as_list().unwrap_or(&[]).iter().skip(1) {
            match item.tag() {
                Some("net") => board.nets.push(Self::parse_net(item)?),
                Some("net_class") => board.net_classes.push(Self::parse_net_class(item)?),
                Some("module") | Some("footprint") => {
                    board.modules.push(Self::parse_module(item)?)
                }
                Some("segment") => board.segments.push(Self::parse_segment(item)?),
                Some("via") => board.vias.push(Self::parse_via(item)?),
                Some("gr_line") | Some("gr_arc") | Some("gr_circle") | Some("gr_poly") => {
                    if let Some(figure) = Self::parse_figure(item)? {
                        // Only lines and arcs take part in the outline
                        // contour.
                        let stitchable =
                            matches!(figure, Figure::Line { .. } | Figure::Arc { .. });
                        if stitchable && figure.layer() == OUTLINE_LAYER {
                            board.edge.push(figure);
                        } else {
                            debug!("skipping board figure on {}", figure.layer());
                        }
                    }
                }
                Some("gr_text") => {
                    if let Some(text) = Self::parse_board_text(item)? {
                        board.texts.push(text);
                    }
                }
                _ => {}
            }
        }

        debug!(
            modules = board.modules.len(),
            nets = board.nets.len(),
            edge_figures = board.edge.len(),
            "extracted board"
        );
        Ok(board)
    }

    /// Negate Y exactly once, at the point of first extraction. No other
    /// code path touches the sign.
    fn flipped(x: f64, y: f64) -> Point {
        Point::new(x, -y)
    }

    /// Read `(key x y ...)` and return the flipped point.
    fn point_field(
        record: &Sexpr,
        key: &'static str,
        kind: &'static str,
    ) -> Result<Point, ExtractError> {
        let field = record.child(key).ok_or(ExtractError::MissingField {
            record: kind,
            field: key,
        })?;
        match (field.nth_f64(1), field.nth_f64(2)) {
            (Some(x), Some(y)) => Ok(Self::flipped(x, y)),
            _ => Err(ExtractError::Malformed {
                record: kind,
                reason: format!("non-numeric `{}` coordinates", key),
            }),
        }
    }

    /// Expand wildcard layer tokens and drop unknown names. `*.<suffix>`
    /// yields both `F.<suffix>` and `B.<suffix>`.
    fn canonicalize_layers(tokens: impl Iterator<Item = impl AsRef<str>>) -> Vec<String> {
        let mut out = Vec::new();
        for token in tokens {
            let token = token.as_ref();
            if let Some(suffix) = token.strip_prefix("*.") {
                for side in ["F.", "B."] {
                    let name = format!("{}{}", side, suffix);
                    if RECOGNIZED_LAYERS.contains(&name.as_str()) {
                        out.push(name);
                    } else {
                        warn!("dropping unknown layer `{}` (from `{}`)", name, token);
                    }
                }
            } else if RECOGNIZED_LAYERS.contains(&token) {
                out.push(token.to_string());
            } else {
                warn!("dropping unknown layer `{}`", token);
            }
        }
        out
    }

    fn parse_layers(section: &Sexpr) -> Result<Vec<Layer>, ExtractError> {
        let mut layers = Vec::new();
        for item in section.as_list().unwrap_or(&[]).iter().skip(1) {
            let Some(list) = item.as_list() else { continue };
            // `(0 F.Cu signal)` — ordinal, canonical name, type.
            if list.len() < 3 {
                return Err(ExtractError::Malformed {
                    record: "layer",
                    reason: format!("expected ordinal, name and type, got {}", item),
                });
            }
            let name = list[1]
                .as_atom()
                .ok_or(ExtractError::MissingField {
                    record: "layer",
                    field: "name",
                })?
                .to_string();
            let kind = match list[2].as_atom() {
                Some("signal") => LayerKind::Signal,
                Some("power") => LayerKind::Plane,
                _ => LayerKind::User,
            };
            layers.push(Layer { name, kind });
        }
        if layers.is_empty() {
            return Err(ExtractError::NoLayers);
        }
        Ok(layers)
    }

    fn parse_net(record: &Sexpr) -> Result<Net, ExtractError> {
        let net_id = record
            .nth_atom(1)
            .and_then(|s| s.parse().ok())
            .ok_or(ExtractError::MissingField {
                record: "net",
                field: "id",
            })?;
        let net_name = record.nth_atom(2).unwrap_or("").to_string();
        Ok(Net::new(net_id, net_name))
    }

    fn parse_net_class(record: &Sexpr) -> Result<NetClass, ExtractError> {
        let name = record
            .nth_atom(1)
            .ok_or(ExtractError::MissingField {
                record: "net_class",
                field: "name",
            })?
            .to_string();
        let nets = record
            .children("add_net")
            .filter_map(|n| n.nth_atom(1))
            .map(str::to_string)
            .collect();
        Ok(NetClass {
            name,
            clearance: record.value_f64("clearance").unwrap_or(0.2),
            trace_width: record.value_f64("trace_width").unwrap_or(0.25),
            via_diameter: record.value_f64("via_dia").unwrap_or(0.8),
            via_drill: record.value_f64("via_drill").unwrap_or(0.4),
            nets,
        })
    }

    fn parse_module(record: &Sexpr) -> Result<Module, ExtractError> {
        let footprint = record
            .nth_atom(1)
            .ok_or(ExtractError::MissingField {
                record: "module",
                field: "name",
            })?
            .to_string();
        let layer = record
            .value_str("layer")
            .ok_or(ExtractError::MissingField {
                record: "module",
                field: "layer",
            })?
            .to_string();
        let at = record.child("at").ok_or(ExtractError::MissingField {
            record: "module",
            field: "at",
        })?;
        let pos = match (at.nth_f64(1), at.nth_f64(2)) {
            (Some(x), Some(y)) => Self::flipped(x, y),
            _ => {
                return Err(ExtractError::Malformed {
                    record: "module",
                    reason: "non-numeric placement coordinates".to_string(),
                })
            }
        };
        // Back-side modules that declare a rotation are normalized so the
        // stored orientation is as seen from the front.
        let rot = match at.nth_f64(3) {
            Some(r) if layer.starts_with("B.") => (r + 180.0).rem_euclid(360.0),
            Some(r) => r,
            None => 0.0,
        };
        let smd = record.value_str("attr") == Some("smd");

        let mut texts = Vec::new();
        for text in record.children("fp_text") {
            texts.push(Self::parse_fp_text(text)?);
        }
        if !texts.iter().any(|t| t.kind == TextKind::Reference) {
            return Err(ExtractError::Malformed {
                record: "module",
                reason: format!("module `{}` has no reference text", footprint),
            });
        }
        if !texts.iter().any(|t| t.kind == TextKind::Value) {
            return Err(ExtractError::Malformed {
                record: "module",
                reason: format!("module `{}` has no value text", footprint),
            });
        }

        let mut figures = Vec::new();
        for item in record.as_list().unwrap_or(&[]) {
            if matches!(
                item.tag(),
                Some("fp_line") | Some("fp_arc") | Some("fp_circle") | Some("fp_poly")
            ) {
                if let Some(figure) = Self::parse_figure(item)? {
                    figures.push(figure);
                }
            }
        }

        // Pad ids must be unique within the module. A collision gets the
        // smallest unused numeric suffix, scanning upward from 1, so the
        // renaming is reproducible from source order alone.
        let mut pads = Vec::new();
        let mut extrapads = Vec::new();
        let mut used_ids: HashSet<String> = HashSet::new();
        for pad_record in record.children("pad") {
            let mut pad = Self::parse_pad(pad_record)?;
            if used_ids.contains(&pad.pad_id) {
                let renamed = Self::dedup_pad_id(&pad.pad_id, &used_ids);
                extrapads.push(renamed.clone());
                pad.pad_id = renamed;
            }
            used_ids.insert(pad.pad_id.clone());
            pads.push(pad);
        }

        Ok(Module {
            footprint,
            layer,
            pos,
            rot,
            smd,
            texts,
            figures,
            pads,
            extrapads,
        })
    }

    fn dedup_pad_id(base: &str, used: &HashSet<String>) -> String {
        let mut n = 1u32;
        loop {
            let candidate = format!("{}{}", base, n);
            if !used.contains(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    fn parse_fp_text(record: &Sexpr) -> Result<Text, ExtractError> {
        let kind = match record.nth_atom(1) {
            Some("reference") => TextKind::Reference,
            Some("value") => TextKind::Value,
            _ => TextKind::User,
        };
        let text = record.nth_atom(2).unwrap_or("").to_string();
        let at = record.child("at").ok_or(ExtractError::MissingField {
            record: "fp_text",
            field: "at",
        })?;
        let pos = match (at.nth_f64(1), at.nth_f64(2)) {
            (Some(x), Some(y)) => Self::flipped(x, y),
            _ => {
                return Err(ExtractError::Malformed {
                    record: "fp_text",
                    reason: "non-numeric position".to_string(),
                })
            }
        };
        let angle = at.nth_f64(3).unwrap_or(0.0);
        let layer = record
            .value_str("layer")
            .ok_or(ExtractError::MissingField {
                record: "fp_text",
                field: "layer",
            })?
            .to_string();
        Ok(Text {
            kind,
            text,
            layer,
            pos,
            angle,
        })
    }

    fn parse_board_text(record: &Sexpr) -> Result<Option<Text>, ExtractError> {
        let text = record.nth_atom(1).unwrap_or("").to_string();
        let Some(at) = record.child("at") else {
            return Ok(None);
        };
        let pos = match (at.nth_f64(1), at.nth_f64(2)) {
            (Some(x), Some(y)) => Self::flipped(x, y),
            _ => return Ok(None),
        };
        let angle = at.nth_f64(3).unwrap_or(0.0);
        let layer = record
            .value_str("layer")
            .ok_or(ExtractError::MissingField {
                record: "gr_text",
                field: "layer",
            })?
            .to_string();
        Ok(Some(Text {
            kind: TextKind::Simple,
            text,
            layer,
            pos,
            angle,
        }))
    }

    /// Parse any of the four figure records (`gr_*` or `fp_*` spelling).
    fn parse_figure(record: &Sexpr) -> Result<Option<Figure>, ExtractError> {
        let tag = record.tag().unwrap_or("");
        let kind = tag.trim_start_matches("gr_").trim_start_matches("fp_");
        let layer = match record.value_str("layer") {
            Some(l) => l.to_string(),
            None => {
                return Err(ExtractError::MissingField {
                    record: "figure",
                    field: "layer",
                })
            }
        };
        let width = record.value_f64("width").unwrap_or(0.0);

        let figure = match kind {
            "line" => Figure::Line {
                layer,
                width,
                start: Self::point_field(record, "start", "line")?,
                end: Self::point_field(record, "end", "line")?,
            },
            "arc" => {
                // KiCad's nominal `start` is the arc center and its nominal
                // `end` is the literal start point. Swap here, once, and
                // flip the sweep sign along with the Y axis.
                let center = Self::point_field(record, "start", "arc")?;
                let literal_start = Self::point_field(record, "end", "arc")?;
                let angle = record.value_f64("angle").ok_or(ExtractError::MissingField {
                    record: "arc",
                    field: "angle",
                })?;
                Figure::Arc {
                    layer,
                    width,
                    start: literal_start,
                    end: center,
                    angle: -angle,
                }
            }
            "circle" => Figure::Circle {
                layer,
                width,
                center: Self::point_field(record, "center", "circle")?,
                end: Self::point_field(record, "end", "circle")?,
            },
            "poly" => {
                let pts = record.child("pts").ok_or(ExtractError::MissingField {
                    record: "polygon",
                    field: "pts",
                })?;
                Figure::Polygon {
                    layer,
                    width,
                    points: Self::parse_pts(pts),
                }
            }
            _ => return Ok(None),
        };
        Ok(Some(figure))
    }

    fn parse_pts(pts: &Sexpr) -> Vec<Point> {
        pts.children("xy")
            .filter_map(|xy| match (xy.nth_f64(1), xy.nth_f64(2)) {
                (Some(x), Some(y)) => Some(Self::flipped(x, y)),
                _ => None,
            })
            .collect()
    }

    fn parse_segment(record: &Sexpr) -> Result<Segment, ExtractError> {
        let width = record.value_f64("width").ok_or(ExtractError::MissingField {
            record: "segment",
            field: "width",
        })?;
        let layer = record
            .value_str("layer")
            .ok_or(ExtractError::MissingField {
                record: "segment",
                field: "layer",
            })?
            .to_string();
        Ok(Segment {
            start: Self::point_field(record, "start", "segment")?,
            end: Self::point_field(record, "end", "segment")?,
            width,
            layer,
            net_id: record.value_u32("net").unwrap_or(0),
        })
    }

    fn parse_via(record: &Sexpr) -> Result<Via, ExtractError> {
        let at = record.child("at").ok_or(ExtractError::MissingField {
            record: "via",
            field: "at",
        })?;
        let center = match (at.nth_f64(1), at.nth_f64(2)) {
            (Some(x), Some(y)) => Self::flipped(x, y),
            _ => {
                return Err(ExtractError::Malformed {
                    record: "via",
                    reason: "non-numeric position".to_string(),
                })
            }
        };
        let size = record.value_f64("size").ok_or(ExtractError::MissingField {
            record: "via",
            field: "size",
        })?;
        let drill = record.value_f64("drill").unwrap_or(0.0);
        let layers = record
            .child("layers")
            .map(|l| {
                Self::canonicalize_layers(
                    l.as_list().unwrap_or(&[]).iter().skip(1).filter_map(Sexpr::as_atom),
                )
            })
            .unwrap_or_else(|| vec!["F.Cu".to_string(), "B.Cu".to_string()]);
        Ok(Via {
            center,
            size,
            drill,
            layers,
            net_id: record.value_u32("net").unwrap_or(0),
        })
    }

    fn parse_pad(record: &Sexpr) -> Result<Pad, ExtractError> {
        let pad_id = record
            .nth_atom(1)
            .ok_or(ExtractError::MissingField {
                record: "pad",
                field: "id",
            })?
            .to_string();
        let smd = record.nth_atom(2) == Some("smd");
        let shape = match record.nth_atom(3) {
            Some("circle") => PadShape::Circle,
            Some("rect") => PadShape::Rect,
            Some("oval") => PadShape::Oval,
            Some("custom") => PadShape::Custom,
            // Unrecognized shape tokens fall back to oval.
            _ => PadShape::Oval,
        };

        let at = record.child("at").ok_or(ExtractError::MissingField {
            record: "pad",
            field: "at",
        })?;
        let center = match (at.nth_f64(1), at.nth_f64(2)) {
            (Some(x), Some(y)) => PadPos {
                pos: Self::flipped(x, y),
                rot: at.nth_f64(3).unwrap_or(0.0),
            },
            _ => {
                return Err(ExtractError::Malformed {
                    record: "pad",
                    reason: format!("pad `{}` has non-numeric position", pad_id),
                })
            }
        };

        let size = record
            .child("size")
            .and_then(|s| match (s.nth_f64(1), s.nth_f64(2)) {
                (Some(w), Some(h)) => Some((w, h)),
                _ => None,
            })
            .ok_or(ExtractError::MissingField {
                record: "pad",
                field: "size",
            })?;

        let drill = record.value_f64("drill").unwrap_or(0.0);

        let layers = record
            .child("layers")
            .map(|l| {
                Self::canonicalize_layers(
                    l.as_list().unwrap_or(&[]).iter().skip(1).filter_map(Sexpr::as_atom),
                )
            })
            .unwrap_or_default();

        let (net_id, net_name) = match record.child("net") {
            Some(net) => (
                net.nth_atom(1).and_then(|s| s.parse().ok()),
                net.nth_atom(2).map(str::to_string),
            ),
            None => (None, None),
        };

        // Custom pads carry their outline as nested polygon primitives.
        let mut extra_points = Vec::new();
        if shape == PadShape::Custom {
            if let Some(primitives) = record.child("primitives") {
                for primitive in primitives.as_list().unwrap_or(&[]).iter().skip(1) {
                    if let Some(pts) = primitive.child("pts") {
                        extra_points.extend(Self::parse_pts(pts));
                    } else if primitive.tag() == Some("pts") {
                        extra_points.extend(Self::parse_pts(primitive));
                    }
                }
            }
        }

        Ok(Pad {
            pad_id,
            smd,
            drill,
            shape,
            center,
            size,
            layers,
            net_id,
            net_name,
            extra_points,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODULE_HEAD: &str = r#"(fp_text reference R1 (at 0 0) (layer F.SilkS))
        (fp_text value 10k (at 0 1) (layer F.Fab))"#;

    fn board(body: &str) -> Board {
        let input = format!(
            "(kicad_pcb (layers (0 F.Cu signal) (31 B.Cu signal) (36 B.SilkS user)) {})",
            body
        );
        BoardParser::parse_board(&input).expect("board should parse")
    }

    #[test]
    fn test_y_flip_applied_once() {
        let board = board(
            "(segment (start 1 2) (end 3 4) (width 0.25) (layer F.Cu) (net 1))",
        );
        let segment = &board.segments[0];
        assert_eq!(segment.start, Point::new(1.0, -2.0));
        assert_eq!(segment.end, Point::new(3.0, -4.0));
        // Re-applying the flip restores the source point: nothing downstream
        // may negate again.
        assert_eq!(
            Point::new(segment.start.x, -segment.start.y),
            Point::new(1.0, 2.0)
        );
    }

    #[test]
    fn test_arc_field_swap() {
        // Nominal start is really the center, nominal end the literal start.
        let board = board(
            "(gr_arc (start 0 0) (end 10 0) (angle 90) (layer Edge.Cuts) (width 0.1))",
        );
        match &board.edge[0] {
            Figure::Arc { start, end, angle, .. } => {
                assert_eq!(*start, Point::new(10.0, 0.0));
                assert_eq!(*end, Point::new(0.0, 0.0));
                assert!((angle + 90.0).abs() < 1e-12);
            }
            other => panic!("expected arc, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_pad_shape_defaults_to_oval() {
        let board = board(&format!(
            "(module R (layer F.Cu) (at 0 0) {} \
             (pad 1 smd trapezoid (at 0 0) (size 1 1) (layers F.Cu)))",
            MODULE_HEAD
        ));
        assert_eq!(board.modules[0].pads[0].shape, PadShape::Oval);
    }

    #[test]
    fn test_wildcard_layer_expands_to_front_and_back() {
        let layers = BoardParser::canonicalize_layers(["*.Cu", "F.Mask"].iter());
        assert_eq!(layers, vec!["F.Cu", "B.Cu", "F.Mask"]);
    }

    #[test]
    fn test_unknown_layer_dropped() {
        let layers = BoardParser::canonicalize_layers(["F.Cu", "Inner7.Cu"].iter());
        assert_eq!(layers, vec!["F.Cu"]);
    }

    #[test]
    fn test_back_module_rotation_corrected() {
        let board = board(&format!(
            "(module R (layer B.Cu) (at 10 20 270) {})",
            MODULE_HEAD
        ));
        assert!((board.modules[0].rot - 90.0).abs() < 1e-12);
    }

    #[test]
    fn test_front_module_rotation_untouched() {
        let board = board(&format!(
            "(module R (layer F.Cu) (at 10 20 270) {})",
            MODULE_HEAD
        ));
        assert!((board.modules[0].rot - 270.0).abs() < 1e-12);
    }

    #[test]
    fn test_pad_id_collision_renamed_in_order() {
        let board = board(&format!(
            "(module J (layer F.Cu) (at 0 0) {} \
             (pad 1 smd rect (at 0 0) (size 1 1) (layers F.Cu)) \
             (pad 1 smd rect (at 1 0) (size 1 1) (layers F.Cu)) \
             (pad 1 smd rect (at 2 0) (size 1 1) (layers F.Cu)))",
            MODULE_HEAD
        ));
        let ids: Vec<_> = board.modules[0].pads.iter().map(|p| p.pad_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "11", "12"]);
        assert_eq!(board.modules[0].extrapads, vec!["11", "12"]);
    }

    #[test]
    fn test_module_without_layer_fails() {
        let input = format!(
            "(kicad_pcb (layers (0 F.Cu signal)) (module R (at 0 0) {}))",
            MODULE_HEAD
        );
        let err = BoardParser::parse_board(&input).unwrap_err();
        assert!(matches!(
            err,
            ExtractError::MissingField { record: "module", field: "layer" }
        ));
    }

    #[test]
    fn test_module_without_reference_fails() {
        let input = "(kicad_pcb (layers (0 F.Cu signal)) \
             (module R (layer F.Cu) (at 0 0) \
             (fp_text value 10k (at 0 1) (layer F.Fab))))";
        assert!(BoardParser::parse_board(input).is_err());
    }

    #[test]
    fn test_missing_layers_section_fails() {
        let err = BoardParser::parse_board("(kicad_pcb (net 1 GND))").unwrap_err();
        assert!(matches!(err, ExtractError::NoLayers));
    }

    #[test]
    fn test_custom_pad_outline_flattened_and_flipped() {
        let board = board(&format!(
            "(module U (layer F.Cu) (at 0 0) {} \
             (pad 1 smd custom (at 0 0) (size 1 1) (layers F.Cu) \
               (primitives (gr_poly (pts (xy 0 0) (xy 2 0) (xy 2 3)) (width 0)))))",
            MODULE_HEAD
        ));
        let pad = &board.modules[0].pads[0];
        assert_eq!(pad.shape, PadShape::Custom);
        assert_eq!(
            pad.extra_points,
            vec![Point::new(0.0, 0.0), Point::new(2.0, 0.0), Point::new(2.0, -3.0)]
        );
    }

    #[test]
    fn test_net_and_class_extraction() {
        let board = board(
            "(net 1 GND) (net 2 VCC) \
             (net_class Power \"fat traces\" (clearance 0.3) (trace_width 0.5) \
               (via_dia 0.9) (via_drill 0.5) (add_net GND) (add_net VCC))",
        );
        assert_eq!(board.nets.len(), 2);
        assert_eq!(board.net_classes[0].nets, vec!["GND", "VCC"]);
        assert!((board.net_classes[0].trace_width - 0.5).abs() < 1e-12);
    }
}

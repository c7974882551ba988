//! TopoR document emitter.
//!
//! Serializes a resolved [`Board`] into the TopoR XML board format. The
//! whole document is rendered into memory first and written in one shot,
//! so a failing conversion never leaves a half-written file behind.

use std::collections::HashSet;
use std::fs;
use std::io::Cursor;
use std::path::Path;

use chrono::Local;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use thiserror::Error;
use uuid::Uuid;

use crate::board::{Board, Figure, LayerKind, Module, PadShape, Point, TextKind};
use crate::config::Settings;

const FORMAT_NAME: &str = "TopoR PCB file";
const FORMAT_VERSION: &str = "1.2.1";
const PROGRAM_NAME: &str = "TopoR Lite 7.0.18707";
const SECTION_VERSION: &str = "1.1";

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("XML write error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Render the board and write it to `output`, fully buffered.
pub fn write_file(
    board: &Board,
    settings: &Settings,
    original_file: &str,
    output: &Path,
) -> Result<(), EmitError> {
    let bytes = render(board, settings, original_file)?;
    fs::write(output, bytes)?;
    Ok(())
}

/// Render the board into an XML byte buffer.
pub fn render(board: &Board, settings: &Settings, original_file: &str) -> Result<Vec<u8>, EmitError> {
    let mut emitter = Emitter {
        xml: Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2),
        board,
        settings,
        used_ids: HashSet::new(),
    };
    emitter.document(original_file)?;
    Ok(emitter.xml.into_inner().into_inner())
}

/// Numbers are printed the short way: `1` rather than `1.0`, `0.25` as-is.
/// Flipped ordinates can carry a negative zero; print it as plain `0`.
fn num(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{}", value)
    }
}

/// Output layer name for a source drawing layer. Silk and fabrication
/// drawings land on the assembly-outline layers, copper stays copper.
fn detail_layer(source: &str) -> &'static str {
    match source {
        "F.Cu" => "F.Cu",
        "B.Cu" => "B.Cu",
        "F.Paste" => "Paste Top",
        "B.Paste" => "Paste Bottom",
        "F.Mask" => "Mask Top",
        "B.Mask" => "Mask Bottom",
        name if name.starts_with("B.") => "B.Cu_outline",
        _ => "F.Cu_outline",
    }
}

struct Emitter<'a> {
    xml: Writer<Cursor<Vec<u8>>>,
    board: &'a Board,
    settings: &'a Settings,
    used_ids: HashSet<String>,
}

impl<'a> Emitter<'a> {
    fn open(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), EmitError> {
        let mut start = BytesStart::new(name);
        for (k, v) in attrs {
            start.push_attribute((*k, *v));
        }
        self.xml.write_event(Event::Start(start))?;
        Ok(())
    }

    fn close(&mut self, name: &str) -> Result<(), EmitError> {
        self.xml.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), EmitError> {
        let mut start = BytesStart::new(name);
        for (k, v) in attrs {
            start.push_attribute((*k, *v));
        }
        self.xml.write_event(Event::Empty(start))?;
        Ok(())
    }

    fn text_element(&mut self, name: &str, text: &str) -> Result<(), EmitError> {
        self.open(name, &[])?;
        self.xml.write_event(Event::Text(BytesText::new(text)))?;
        self.close(name)
    }

    fn dot(&mut self, point: Point) -> Result<(), EmitError> {
        self.empty("Dot", &[("x", num(point.x).as_str()), ("y", num(point.y).as_str())])
    }

    /// Mint a document-unique 8-character id. Random, not stable across
    /// runs; collisions within one document are re-drawn.
    fn unique_id(&mut self) -> String {
        loop {
            let hex = Uuid::new_v4().simple().to_string();
            let id = hex[..8].to_string();
            if self.used_ids.insert(id.clone()) {
                return id;
            }
        }
    }

    /// Footprints in first-use order; later modules reuse the first
    /// definition with the same name.
    fn unique_footprints(&self) -> Vec<&'a Module> {
        let mut seen = HashSet::new();
        self.board
            .modules
            .iter()
            .filter(|m| seen.insert(m.footprint.as_str()))
            .collect()
    }

    fn padstack_name(module: &Module, pad_id: &str) -> String {
        format!("{}_{}", module.footprint, pad_id)
    }

    fn document(&mut self, original_file: &str) -> Result<(), EmitError> {
        self.xml
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        self.open("TopoR_PCB_File", &[])?;
        self.header(original_file)?;
        self.layers()?;
        self.text_styles()?;
        self.local_library()?;
        self.constructive()?;
        self.components_on_board()?;
        self.net_list()?;
        self.groups()?;
        self.rules()?;
        self.connectivity()?;
        self.close("TopoR_PCB_File")
    }

    fn header(&mut self, original_file: &str) -> Result<(), EmitError> {
        self.open("Header", &[])?;
        self.text_element("Format", FORMAT_NAME)?;
        self.text_element("Version", FORMAT_VERSION)?;
        self.text_element("Program", PROGRAM_NAME)?;
        let date = Local::now().format("%A, %B %-d, %Y %H:%M").to_string();
        self.text_element("Date", &date)?;
        self.text_element("OriginalFormat", "KiCad PCB")?;
        self.text_element("OriginalFile", original_file)?;
        self.empty("Units", &[("dist", "mm"), ("time", "ps")])?;
        self.close("Header")
    }

    fn layers(&mut self) -> Result<(), EmitError> {
        self.open("Layers", &[("version", SECTION_VERSION)])?;
        self.open("StackUpLayers", &[])?;
        self.empty("Layer", &[("name", "Paste Top"), ("type", "Paste"), ("thickness", "0")])?;
        self.empty("Layer", &[("name", "Mask Top"), ("type", "Mask"), ("thickness", "0")])?;
        self.empty(
            "Layer",
            &[("name", "F.Cu_outline"), ("type", "Assy"), ("compsOutline", "on")],
        )?;
        for layer in &self.board.layers {
            let kind = match layer.kind {
                LayerKind::Signal => "Signal",
                LayerKind::Plane => "Plane",
                LayerKind::User => continue,
            };
            self.empty(
                "Layer",
                &[("name", layer.name.as_str()), ("type", kind), ("thickness", "0")],
            )?;
        }
        self.empty(
            "Layer",
            &[("name", "B.Cu_outline"), ("type", "Assy"), ("compsOutline", "on")],
        )?;
        self.empty("Layer", &[("name", "Paste Bottom"), ("type", "Paste"), ("thickness", "0")])?;
        self.empty("Layer", &[("name", "Mask Bottom"), ("type", "Mask"), ("thickness", "0")])?;
        self.close("StackUpLayers")?;
        self.close("Layers")
    }

    fn text_styles(&mut self) -> Result<(), EmitError> {
        self.open("TextStyles", &[("version", SECTION_VERSION)])?;
        self.empty(
            "TextStyle",
            &[
                ("name", "Default"),
                ("fontName", self.settings.font_name.as_str()),
                ("height", num(self.settings.font_size).as_str()),
            ],
        )?;
        self.close("TextStyles")
    }

    fn local_library(&mut self) -> Result<(), EmitError> {
        self.open("LocalLibrary", &[("version", SECTION_VERSION)])?;
        self.padstacks()?;
        self.viastacks()?;
        self.footprints()?;
        self.components()?;
        self.packages()?;
        self.close("LocalLibrary")
    }

    fn padstacks(&mut self) -> Result<(), EmitError> {
        self.open("Padstacks", &[])?;
        for module in self.unique_footprints() {
            for pad in &module.pads {
                let name = Self::padstack_name(module, &pad.pad_id);
                let pad_type = if pad.smd { "smd" } else { "through" };
                self.open(
                    "Padstack",
                    &[
                        ("name", name.as_str()),
                        ("type", pad_type),
                        ("holeDiameter", num(pad.drill).as_str()),
                    ],
                )?;
                let (w, h) = pad.size;
                match pad.shape {
                    PadShape::Circle => {
                        self.empty("PadCircle", &[("diameter", num(w).as_str())])?
                    }
                    PadShape::Rect => self.empty(
                        "PadRect",
                        &[("width", num(w).as_str()), ("height", num(h).as_str())],
                    )?,
                    PadShape::Oval => self.empty(
                        "PadOval",
                        &[("width", num(w).as_str()), ("height", num(h).as_str())],
                    )?,
                    PadShape::Custom => {
                        self.open("PadPoly", &[])?;
                        for point in &pad.extra_points {
                            self.dot(*point)?;
                        }
                        self.close("PadPoly")?;
                    }
                }
                self.close("Padstack")?;
            }
        }
        self.close("Padstacks")
    }

    fn viastacks(&mut self) -> Result<(), EmitError> {
        self.open("Viastacks", &[])?;
        let mut seen = HashSet::new();
        for net in &self.board.nets {
            for via in &net.vias {
                let name = format!("Via{}_{}", num(via.size), num(via.drill));
                if !seen.insert(name.clone()) {
                    continue;
                }
                self.open(
                    "Viastack",
                    &[
                        ("name", name.as_str()),
                        ("viaDiameter", num(via.size).as_str()),
                        ("holeDiameter", num(via.drill).as_str()),
                    ],
                )?;
                self.open("LayerRange", &[])?;
                for layer in &via.layers {
                    self.empty("LayerRef", &[("name", layer.as_str())])?;
                }
                self.close("LayerRange")?;
                self.close("Viastack")?;
            }
        }
        self.close("Viastacks")
    }

    fn footprints(&mut self) -> Result<(), EmitError> {
        self.open("Footprints", &[])?;
        for module in self.unique_footprints() {
            self.open("Footprint", &[("name", module.footprint.as_str())])?;
            self.open("Details", &[])?;
            for figure in &module.figures {
                self.open("Detail", &[("lineWidth", num(figure.width()).as_str())])?;
                self.empty("LayerRef", &[("name", detail_layer(figure.layer()))])?;
                self.figure(figure)?;
                self.close("Detail")?;
            }
            self.close("Details")?;
            self.open("Pads", &[])?;
            for pad in &module.pads {
                let padstack = Self::padstack_name(module, &pad.pad_id);
                self.empty(
                    "FpPad",
                    &[
                        ("name", pad.pad_id.as_str()),
                        ("x", num(pad.center.pos.x).as_str()),
                        ("y", num(pad.center.pos.y).as_str()),
                        ("angle", num(pad.center.rot).as_str()),
                        ("padstackRef", padstack.as_str()),
                    ],
                )?;
            }
            self.close("Pads")?;
            self.close("Footprint")?;
        }
        self.close("Footprints")
    }

    fn figure(&mut self, figure: &Figure) -> Result<(), EmitError> {
        match figure {
            Figure::Line { start, end, .. } => {
                self.open("Line", &[])?;
                self.dot(*start)?;
                self.dot(*end)?;
                self.close("Line")
            }
            Figure::Arc { start, end, angle, .. } => {
                self.open("ArcByAngle", &[("angle", num(*angle).as_str())])?;
                self.dot(*start)?;
                self.dot(*end)?;
                self.close("ArcByAngle")
            }
            Figure::Circle { center, end, .. } => {
                let diameter = 2.0 * center.distance(end);
                self.open("Circle", &[("diameter", num(diameter).as_str())])?;
                self.dot(*center)?;
                self.close("Circle")
            }
            Figure::Polygon { points, .. } => {
                self.open("Polygon", &[])?;
                for point in points {
                    self.dot(*point)?;
                }
                self.close("Polygon")
            }
        }
    }

    fn components(&mut self) -> Result<(), EmitError> {
        self.open("Components", &[])?;
        for module in self.unique_footprints() {
            self.open("Component", &[("name", module.footprint.as_str())])?;
            self.open("Pins", &[])?;
            for (i, pad) in module.pads.iter().enumerate() {
                self.empty(
                    "Pin",
                    &[
                        ("pinNum", (i + 1).to_string().as_str()),
                        ("name", pad.pad_id.as_str()),
                        ("padNum", pad.pad_id.as_str()),
                    ],
                )?;
            }
            self.close("Pins")?;
            self.close("Component")?;
        }
        self.close("Components")
    }

    fn packages(&mut self) -> Result<(), EmitError> {
        self.open("Packages", &[])?;
        for module in self.unique_footprints() {
            self.open("Package", &[])?;
            self.empty("ComponentRef", &[("name", module.footprint.as_str())])?;
            self.empty("FootprintRef", &[("name", module.footprint.as_str())])?;
            self.close("Package")?;
        }
        self.close("Packages")
    }

    fn constructive(&mut self) -> Result<(), EmitError> {
        self.open("Constructive", &[("version", SECTION_VERSION)])?;
        self.board_outline()?;
        self.board_texts()?;
        self.close("Constructive")
    }

    /// The outline is an ordered polyline: a start dot, then one segment
    /// element per figure (straight or arc-by-angle), each naming its end
    /// point.
    fn board_outline(&mut self) -> Result<(), EmitError> {
        self.open("BoardOutline", &[])?;
        if let Some(first) = self.board.edge.first() {
            let width = num(first.width());
            self.open("Contour", &[("lineWidth", width.as_str())])?;
            self.open("Shape", &[])?;
            let start = first.start_point();
            self.empty(
                "Start",
                &[("x", num(start.x).as_str()), ("y", num(start.y).as_str())],
            )?;
            for figure in &self.board.edge {
                let end = figure.end_point();
                match figure {
                    Figure::Arc { angle, .. } => self.empty(
                        "SegmentArcByAngle",
                        &[
                            ("angle", num(*angle).as_str()),
                            ("x", num(end.x).as_str()),
                            ("y", num(end.y).as_str()),
                        ],
                    )?,
                    _ => self.empty(
                        "SegmentLine",
                        &[("x", num(end.x).as_str()), ("y", num(end.y).as_str())],
                    )?,
                }
            }
            self.close("Shape")?;
            self.close("Contour")?;
        }
        self.close("BoardOutline")
    }

    fn board_texts(&mut self) -> Result<(), EmitError> {
        self.open("Texts", &[])?;
        for text in &self.board.texts {
            self.open(
                "Text",
                &[
                    ("text", text.text.as_str()),
                    ("x", num(text.pos.x).as_str()),
                    ("y", num(text.pos.y).as_str()),
                    ("angle", num(text.angle).as_str()),
                ],
            )?;
            self.empty("TextStyleRef", &[("name", "Default")])?;
            self.empty("LayerRef", &[("name", detail_layer(&text.layer))])?;
            self.close("Text")?;
        }
        self.close("Texts")
    }

    fn components_on_board(&mut self) -> Result<(), EmitError> {
        self.open("ComponentsOnBoard", &[("version", SECTION_VERSION)])?;
        for module in &self.board.modules {
            let Some(reference) = module.reference() else {
                continue;
            };
            let unique_id = self.unique_id();
            let side = if module.is_back() { "Bottom" } else { "Top" };
            self.open(
                "CompInstance",
                &[
                    ("name", reference),
                    ("uniqueId", unique_id.as_str()),
                    ("side", side),
                    ("x", num(module.pos.x).as_str()),
                    ("y", num(module.pos.y).as_str()),
                    ("angle", num(module.rot).as_str()),
                ],
            )?;
            self.empty("ComponentRef", &[("name", module.footprint.as_str())])?;
            self.empty("FootprintRef", &[("name", module.footprint.as_str())])?;
            self.open("Attributes", &[])?;
            let hidden = self.settings.label_hidden(reference);
            self.attribute_label(module, TextKind::Reference, "RefDes", hidden)?;
            self.attribute_label(module, TextKind::Value, "PartName", hidden)?;
            self.close("Attributes")?;
            self.close("CompInstance")?;
        }
        self.close("ComponentsOnBoard")
    }

    /// RefDes / PartName label: positioned independently of the component
    /// origin, visibility controlled by the settings suppression list.
    fn attribute_label(
        &mut self,
        module: &Module,
        kind: TextKind,
        attr_type: &str,
        hidden: bool,
    ) -> Result<(), EmitError> {
        let Some(text) = module.texts.iter().find(|t| t.kind == kind) else {
            return Ok(());
        };
        self.open(
            "Attribute",
            &[("type", attr_type), ("value", text.text.as_str())],
        )?;
        let pos = Point::new(module.pos.x + text.pos.x, module.pos.y + text.pos.y);
        self.open(
            "Label",
            &[
                ("x", num(pos.x).as_str()),
                ("y", num(pos.y).as_str()),
                ("angle", num(text.angle).as_str()),
                ("visible", if hidden { "off" } else { "on" }),
            ],
        )?;
        self.empty("TextStyleRef", &[("name", "Default")])?;
        self.close("Label")?;
        self.close("Attribute")
    }

    fn net_list(&mut self) -> Result<(), EmitError> {
        self.open("NetList", &[("version", SECTION_VERSION)])?;
        for net in &self.board.nets {
            if net.net_name.is_empty() {
                continue;
            }
            self.open("Net", &[("name", net.net_name.as_str())])?;
            for contact in &net.contacts {
                self.empty(
                    "PinRef",
                    &[
                        ("compName", contact.module_ref.as_str()),
                        ("pinName", contact.pad_id.as_str()),
                    ],
                )?;
            }
            self.close("Net")?;
        }
        self.close("NetList")
    }

    fn groups(&mut self) -> Result<(), EmitError> {
        self.open("Groups", &[("version", SECTION_VERSION)])?;
        self.open("NetGroups", &[])?;
        for class in &self.board.net_classes {
            self.open("NetGroup", &[("name", class.name.as_str())])?;
            for net in &self.board.nets {
                if net.group == class.name && !net.net_name.is_empty() {
                    self.empty("NetRef", &[("name", net.net_name.as_str())])?;
                }
            }
            self.close("NetGroup")?;
        }
        self.close("NetGroups")?;
        self.close("Groups")
    }

    fn rules(&mut self) -> Result<(), EmitError> {
        // Global defaults come from the class named Default when present,
        // from the first class otherwise.
        let default = self
            .board
            .net_classes
            .iter()
            .find(|c| c.name == "Default")
            .or_else(|| self.board.net_classes.first());
        let (global_width, global_clearance) =
            default.map_or((0.25, 0.2), |c| (c.trace_width, c.clearance));

        self.open("Rules", &[("version", SECTION_VERSION)])?;
        self.open("WireWidths", &[])?;
        self.empty("WireWidth", &[("width", num(global_width).as_str())])?;
        for class in &self.board.net_classes {
            self.open("WireWidth", &[("width", num(class.trace_width).as_str())])?;
            self.empty("NetGroupRef", &[("name", class.name.as_str())])?;
            self.close("WireWidth")?;
        }
        self.close("WireWidths")?;
        self.open("Clearances", &[])?;
        self.empty("Clearance", &[("clrn", num(global_clearance).as_str())])?;
        for class in &self.board.net_classes {
            self.open("Clearance", &[("clrn", num(class.clearance).as_str())])?;
            self.empty("NetGroupRef", &[("name", class.name.as_str())])?;
            self.close("Clearance")?;
        }
        self.close("Clearances")?;
        self.close("Rules")
    }

    fn connectivity(&mut self) -> Result<(), EmitError> {
        self.open("Connectivity", &[("version", SECTION_VERSION)])?;
        self.open("Wires", &[])?;
        for net in &self.board.nets {
            for segment in &net.segments {
                self.open("Wire", &[("width", num(segment.width).as_str())])?;
                self.empty("LayerRef", &[("name", segment.layer.as_str())])?;
                self.empty("NetRef", &[("name", net.net_name.as_str())])?;
                self.open("Line", &[])?;
                self.dot(segment.start)?;
                self.dot(segment.end)?;
                self.close("Line")?;
                self.close("Wire")?;
            }
        }
        self.close("Wires")?;
        self.open("Vias", &[])?;
        for net in &self.board.nets {
            for via in &net.vias {
                let viastack = format!("Via{}_{}", num(via.size), num(via.drill));
                self.open(
                    "Via",
                    &[
                        ("x", num(via.center.x).as_str()),
                        ("y", num(via.center.y).as_str()),
                    ],
                )?;
                self.empty("ViastackRef", &[("name", viastack.as_str())])?;
                self.empty("NetRef", &[("name", net.net_name.as_str())])?;
                self.close("Via")?;
            }
        }
        self.close("Vias")?;
        self.close("Connectivity")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Contact, Net, Pad, PadPos, Text};

    fn sample_board() -> Board {
        let module = Module {
            footprint: "R_0805".to_string(),
            layer: "F.Cu".to_string(),
            pos: Point::new(10.0, -20.0),
            rot: 90.0,
            smd: true,
            texts: vec![
                Text {
                    kind: TextKind::Reference,
                    text: "R1".to_string(),
                    layer: "F.SilkS".to_string(),
                    pos: Point::new(0.0, 1.0),
                    angle: 0.0,
                },
                Text {
                    kind: TextKind::Value,
                    text: "10k".to_string(),
                    layer: "F.Fab".to_string(),
                    pos: Point::new(0.0, -1.0),
                    angle: 0.0,
                },
            ],
            figures: vec![Figure::Line {
                layer: "F.SilkS".to_string(),
                width: 0.12,
                start: Point::new(-1.0, 0.0),
                end: Point::new(1.0, 0.0),
            }],
            pads: vec![Pad {
                pad_id: "1".to_string(),
                smd: true,
                drill: 0.0,
                shape: PadShape::Rect,
                center: PadPos::default(),
                size: (1.0, 1.3),
                layers: vec!["F.Cu".to_string()],
                net_id: Some(1),
                net_name: Some("GND".to_string()),
                extra_points: vec![],
            }],
            extrapads: vec![],
        };
        let mut net = Net::new(1, "GND".to_string());
        net.contacts.push(Contact {
            module_ref: "R1".to_string(),
            pad_id: "1".to_string(),
        });
        let square = |sx: f64, sy: f64, ex: f64, ey: f64| Figure::Line {
            layer: "Edge.Cuts".to_string(),
            width: 0.1,
            start: Point::new(sx, sy),
            end: Point::new(ex, ey),
        };
        Board {
            layers: vec![
                crate::board::Layer {
                    name: "F.Cu".to_string(),
                    kind: LayerKind::Signal,
                },
                crate::board::Layer {
                    name: "B.Cu".to_string(),
                    kind: LayerKind::Signal,
                },
            ],
            modules: vec![module],
            edge: vec![
                square(0.0, 0.0, 30.0, 0.0),
                square(30.0, 0.0, 30.0, 30.0),
                square(30.0, 30.0, 0.0, 30.0),
                square(0.0, 30.0, 0.0, 0.0),
            ],
            texts: vec![],
            nets: vec![net],
            net_classes: vec![],
            segments: vec![],
            vias: vec![],
        }
    }

    fn render_str(board: &Board, settings: &Settings) -> String {
        let bytes = render(board, settings, "test.kicad_pcb").expect("render");
        String::from_utf8(bytes).expect("utf-8")
    }

    #[test]
    fn test_one_footprint_component_package_triplet() {
        let output = render_str(&sample_board(), &Settings::default());
        assert_eq!(output.matches("<Footprint ").count(), 1);
        assert_eq!(output.matches("<Component ").count(), 1);
        assert_eq!(output.matches("<Package>").count(), 1);
        assert_eq!(output.matches("<Net ").count(), 1);
    }

    #[test]
    fn test_outline_has_four_segments_and_closes() {
        let output = render_str(&sample_board(), &Settings::default());
        assert_eq!(output.matches("<SegmentLine ").count(), 4);
        assert!(output.contains("<Start x=\"0\" y=\"0\"/>"));
        // Last segment returns to the starting corner.
        assert!(output.contains("<SegmentLine x=\"0\" y=\"0\"/>"));
    }

    #[test]
    fn test_duplicate_footprint_emitted_once() {
        let mut board = sample_board();
        let mut second = board.modules[0].clone();
        second.texts[0].text = "R2".to_string();
        board.modules.push(second);
        let output = render_str(&board, &Settings::default());
        assert_eq!(output.matches("<Footprint ").count(), 1);
        assert_eq!(output.matches("<CompInstance ").count(), 2);
    }

    #[test]
    fn test_label_visibility_suppressed_by_pattern() {
        let mut board = sample_board();
        board.modules[0].texts[0].text = "LOGO1".to_string();
        let output = render_str(&board, &Settings::default());
        assert!(output.contains("visible=\"off\""));
        assert!(!output.contains("visible=\"on\""));
    }

    #[test]
    fn test_unique_ids_are_fixed_length_and_distinct() {
        let mut board = sample_board();
        let mut second = board.modules[0].clone();
        second.texts[0].text = "R2".to_string();
        board.modules.push(second);
        let output = render_str(&board, &Settings::default());
        let ids: Vec<&str> = output
            .match_indices("uniqueId=\"")
            .map(|(i, _)| &output[i + 10..i + 18])
            .collect();
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);
        for id in ids {
            assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_declaration_and_root() {
        let output = render_str(&sample_board(), &Settings::default());
        assert!(output.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(output.contains("<TopoR_PCB_File>"));
        assert!(output.trim_end().ends_with("</TopoR_PCB_File>"));
    }
}

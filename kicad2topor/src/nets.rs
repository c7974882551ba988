//! Net and net-class resolution.
//!
//! Builds the connectivity view the emitter consumes: pad contacts per net,
//! net-class membership, and routed copper attached to its owning net. All
//! state is scoped to one resolver instance, so repeated conversions in one
//! process cannot leak into each other.

use tracing::warn;

use crate::board::{Board, Contact};

/// Counters surfaced to the caller after resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveSummary {
    pub contacts: usize,
    /// References that named a net id or net name with no matching declared
    /// net. These are skipped, not fatal; the conversion is lossy on this
    /// path and the caller is told by how much.
    pub skipped_refs: usize,
}

/// One-shot resolver for a single conversion run.
#[derive(Debug, Default)]
pub struct NetResolver {
    summary: ResolveSummary,
}

impl NetResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run all three passes and return the counters.
    pub fn resolve(mut self, board: &mut Board) -> ResolveSummary {
        self.assign_groups(board);
        self.collect_contacts(board);
        self.distribute_copper(board);
        self.summary
    }

    /// Point each net at its net class. A net belongs to at most one group;
    /// when two classes claim the same net, the later declaration wins.
    /// That matches the source tool and is deliberately left as-is.
    fn assign_groups(&mut self, board: &mut Board) {
        for class in &board.net_classes {
            for net_name in &class.nets {
                match board.nets.iter_mut().find(|n| &n.net_name == net_name) {
                    Some(net) => net.group = class.name.clone(),
                    None => {
                        warn!(
                            "net class `{}` claims undeclared net `{}`, skipping",
                            class.name, net_name
                        );
                        self.summary.skipped_refs += 1;
                    }
                }
            }
        }
    }

    /// Append a `(module_ref, pad_id)` contact for every connected pad, in
    /// module-encounter order. The join key is the numeric net id; the pad's
    /// net name is informational only.
    fn collect_contacts(&mut self, board: &mut Board) {
        let mut contacts: Vec<(u32, Contact)> = Vec::new();
        for module in &board.modules {
            let Some(reference) = module.reference() else {
                continue;
            };
            for pad in &module.pads {
                let Some(net_id) = pad.net_id else { continue };
                if pad.net_name.as_deref().unwrap_or("").is_empty() {
                    continue;
                }
                contacts.push((
                    net_id,
                    Contact {
                        module_ref: reference.to_string(),
                        pad_id: pad.pad_id.clone(),
                    },
                ));
            }
        }
        for (net_id, contact) in contacts {
            match board.net_by_id_mut(net_id) {
                Some(net) => {
                    net.contacts.push(contact);
                    self.summary.contacts += 1;
                }
                None => {
                    warn!(
                        "pad {}:{} references undeclared net id {}, skipping",
                        contact.module_ref, contact.pad_id, net_id
                    );
                    self.summary.skipped_refs += 1;
                }
            }
        }
    }

    /// Move staged segments and vias into their owning nets.
    fn distribute_copper(&mut self, board: &mut Board) {
        for segment in std::mem::take(&mut board.segments) {
            let net_id = segment.net_id;
            match board.net_by_id_mut(net_id) {
                Some(net) => net.segments.push(segment),
                None => {
                    warn!("segment references undeclared net id {}, skipping", net_id);
                    self.summary.skipped_refs += 1;
                }
            }
        }
        for via in std::mem::take(&mut board.vias) {
            let net_id = via.net_id;
            match board.net_by_id_mut(net_id) {
                Some(net) => net.vias.push(via),
                None => {
                    warn!("via references undeclared net id {}, skipping", net_id);
                    self.summary.skipped_refs += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{
        Module, Net, NetClass, Pad, PadPos, PadShape, Point, Segment, Text, TextKind, Via,
    };

    fn module(reference: &str, pads: Vec<Pad>) -> Module {
        Module {
            footprint: "R_0805".to_string(),
            layer: "F.Cu".to_string(),
            pos: Point::default(),
            rot: 0.0,
            smd: true,
            texts: vec![
                Text {
                    kind: TextKind::Reference,
                    text: reference.to_string(),
                    layer: "F.SilkS".to_string(),
                    pos: Point::default(),
                    angle: 0.0,
                },
                Text {
                    kind: TextKind::Value,
                    text: "10k".to_string(),
                    layer: "F.Fab".to_string(),
                    pos: Point::default(),
                    angle: 0.0,
                },
            ],
            figures: vec![],
            pads,
            extrapads: vec![],
        }
    }

    fn pad(pad_id: &str, net_id: u32, net_name: &str) -> Pad {
        Pad {
            pad_id: pad_id.to_string(),
            smd: true,
            drill: 0.0,
            shape: PadShape::Rect,
            center: PadPos::default(),
            size: (1.0, 1.0),
            layers: vec!["F.Cu".to_string()],
            net_id: Some(net_id),
            net_name: Some(net_name.to_string()),
            extra_points: vec![],
        }
    }

    #[test]
    fn test_contact_aggregation_in_module_order() {
        let mut board = Board {
            nets: vec![Net::new(3, "SIG".to_string())],
            modules: vec![
                module("R1", vec![pad("1", 3, "SIG")]),
                module("R2", vec![pad("2", 3, "SIG")]),
            ],
            ..Board::default()
        };
        let summary = NetResolver::new().resolve(&mut board);
        let net = board.net_by_id(3).unwrap();
        assert_eq!(net.contacts.len(), 2);
        assert_eq!(net.contacts[0].module_ref, "R1");
        assert_eq!(net.contacts[0].pad_id, "1");
        assert_eq!(net.contacts[1].module_ref, "R2");
        assert_eq!(summary.contacts, 2);
        assert_eq!(summary.skipped_refs, 0);
    }

    #[test]
    fn test_duplicate_class_claim_last_wins() {
        let class = |name: &str| NetClass {
            name: name.to_string(),
            clearance: 0.2,
            trace_width: 0.25,
            via_diameter: 0.8,
            via_drill: 0.4,
            nets: vec!["GND".to_string()],
        };
        let mut board = Board {
            nets: vec![Net::new(1, "GND".to_string())],
            net_classes: vec![class("Default"), class("Power")],
            ..Board::default()
        };
        NetResolver::new().resolve(&mut board);
        assert_eq!(board.nets[0].group, "Power");
    }

    #[test]
    fn test_dangling_references_skipped_and_counted() {
        let mut board = Board {
            nets: vec![Net::new(1, "GND".to_string())],
            modules: vec![module("R1", vec![pad("1", 7, "GHOST")])],
            segments: vec![Segment {
                start: Point::default(),
                end: Point::new(1.0, 0.0),
                width: 0.25,
                layer: "F.Cu".to_string(),
                net_id: 9,
            }],
            vias: vec![Via {
                center: Point::default(),
                size: 0.8,
                drill: 0.4,
                layers: vec!["F.Cu".to_string(), "B.Cu".to_string()],
                net_id: 9,
            }],
            ..Board::default()
        };
        let summary = NetResolver::new().resolve(&mut board);
        assert_eq!(summary.skipped_refs, 3);
        assert_eq!(summary.contacts, 0);
        assert!(board.nets[0].contacts.is_empty());
        assert!(board.nets[0].segments.is_empty());
        assert!(board.nets[0].vias.is_empty());
        // Staged copper is consumed either way.
        assert!(board.segments.is_empty());
        assert!(board.vias.is_empty());
    }

    #[test]
    fn test_unconnected_pad_is_not_a_contact() {
        let mut unconnected = pad("1", 0, "");
        unconnected.net_id = None;
        unconnected.net_name = None;
        let mut board = Board {
            nets: vec![Net::new(1, "GND".to_string())],
            modules: vec![module("R1", vec![unconnected])],
            ..Board::default()
        };
        let summary = NetResolver::new().resolve(&mut board);
        assert_eq!(summary.contacts, 0);
        assert_eq!(summary.skipped_refs, 0);
    }

    #[test]
    fn test_copper_lands_on_its_net() {
        let mut board = Board {
            nets: vec![Net::new(2, "VCC".to_string())],
            segments: vec![Segment {
                start: Point::default(),
                end: Point::new(5.0, 0.0),
                width: 0.3,
                layer: "B.Cu".to_string(),
                net_id: 2,
            }],
            vias: vec![Via {
                center: Point::new(5.0, 0.0),
                size: 0.8,
                drill: 0.4,
                layers: vec!["F.Cu".to_string(), "B.Cu".to_string()],
                net_id: 2,
            }],
            ..Board::default()
        };
        NetResolver::new().resolve(&mut board);
        let net = board.net_by_id(2).unwrap();
        assert_eq!(net.segments.len(), 1);
        assert_eq!(net.vias.len(), 1);
    }
}

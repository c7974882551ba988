//! kicad2topor - KiCad PCB to TopoR board file converter
//!
//! Parses a `.kicad_pcb` board (KiCad's s-expression format), normalizes it
//! into a typed board model, reconstructs the board outline as one ordered
//! closed contour, resolves net connectivity, and emits a TopoR `.fst` XML
//! document.
//!
//! # Quick Start
//!
//! ```no_run
//! use kicad2topor::{Converter, Settings};
//! use std::path::Path;
//!
//! let converter = Converter::new(Settings::default());
//! let report = converter
//!     .convert_file(Path::new("FireFly.kicad_pcb"), None)
//!     .unwrap();
//!
//! println!(
//!     "{} modules, {} nets -> {}",
//!     report.modules,
//!     report.nets,
//!     report.output.display()
//! );
//! ```
//!
//! # Pipeline
//!
//! - **Extraction**: s-expression tree to typed entities, with the KiCad Y
//!   axis flipped once and arc fields swapped (`parser`)
//! - **Outline**: arc endpoint computation and greedy contour stitching
//!   (`outline`)
//! - **Resolution**: pad contacts, net classes and routed copper attached
//!   to their nets (`nets`)
//! - **Emission**: TopoR XML rendering (`emit`)

pub mod board;
pub mod config;
pub mod core;
pub mod emit;
pub mod nets;
pub mod outline;
pub mod parser;

// Re-export main types
pub use board::Board;
pub use config::{ConfigError, Settings};
pub use core::{ConvertError, ConvertReport, Converter};
pub use emit::EmitError;
pub use nets::{NetResolver, ResolveSummary};
pub use outline::OutlineError;
pub use parser::{BoardParser, ExtractError};

/// Convert a board file with default settings (convenience wrapper).
pub fn convert_file(input: &std::path::Path) -> Result<ConvertReport, ConvertError> {
    Converter::default().convert_file(input, None)
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Board, ConvertError, ConvertReport, Converter, Settings};
}

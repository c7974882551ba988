//! Conversion pipeline shared by library users and the CLI.
//!
//! One run is strictly sequential: read the whole input, extract the typed
//! board, order the outline, resolve connectivity, render the document,
//! write it in one shot. Nothing here is retried and nothing is written
//! until rendering has fully succeeded.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::board::Board;
use crate::config::{ConfigError, Settings};
use crate::emit::{self, EmitError};
use crate::nets::{NetResolver, ResolveSummary};
use crate::outline::{self, OutlineError};
use crate::parser::pcb::{BoardParser, ExtractError};

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("extract error: {0}")]
    Extract(#[from] ExtractError),
    #[error("outline error: {0}")]
    Outline(#[from] OutlineError),
    #[error("emit error: {0}")]
    Emit(#[from] EmitError),
    #[error("settings error: {0}")]
    Config(#[from] ConfigError),
}

/// What one conversion produced.
#[derive(Debug, Clone)]
pub struct ConvertReport {
    pub output: PathBuf,
    pub modules: usize,
    pub nets: usize,
    /// Dangling net references dropped during resolution; non-zero means
    /// the conversion was lossy.
    pub skipped_refs: usize,
}

/// Converter for KiCad board files.
pub struct Converter {
    settings: Settings,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl Converter {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Output path derived from the input: the fixed `.fst` extension is
    /// appended to the full input file name.
    pub fn default_output_path(input: &Path) -> PathBuf {
        let mut name = input.as_os_str().to_os_string();
        name.push(".fst");
        PathBuf::from(name)
    }

    /// Convert one board file. With no explicit `output`, the result lands
    /// next to the input under the derived name.
    pub fn convert_file(
        &self,
        input: &Path,
        output: Option<&Path>,
    ) -> Result<ConvertReport, ConvertError> {
        let text = fs::read_to_string(input)?;
        let (board, summary) = self.build_board(&text)?;

        let output = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| Self::default_output_path(input));
        emit::write_file(&board, &self.settings, &input.display().to_string(), &output)?;

        info!(
            modules = board.modules.len(),
            nets = board.nets.len(),
            skipped = summary.skipped_refs,
            output = %output.display(),
            "conversion finished"
        );
        Ok(ConvertReport {
            output,
            modules: board.modules.len(),
            nets: board.nets.len(),
            skipped_refs: summary.skipped_refs,
        })
    }

    /// Run extraction, outline ordering and net resolution on board text.
    pub fn build_board(&self, text: &str) -> Result<(Board, ResolveSummary), ConvertError> {
        let mut board = BoardParser::parse_board(text)?;
        board.edge = outline::build(std::mem::take(&mut board.edge))?;
        outline::verify_closed(&board.edge)?;
        let summary = NetResolver::new().resolve(&mut board);
        Ok((board, summary))
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path_appends_extension() {
        let path = Converter::default_output_path(Path::new("boards/FireFly.kicad_pcb"));
        assert_eq!(path, PathBuf::from("boards/FireFly.kicad_pcb.fst"));
    }

    #[test]
    fn test_open_outline_is_fatal() {
        let converter = Converter::default();
        let text = "(kicad_pcb (layers (0 F.Cu signal)) \
             (gr_line (start 0 0) (end 10 0) (layer Edge.Cuts) (width 0.1)) \
             (gr_line (start 10 0) (end 10 10) (layer Edge.Cuts) (width 0.1)))";
        match converter.build_board(text) {
            Err(ConvertError::Outline(OutlineError::NotClosed { .. })) => {}
            other => panic!("expected open-outline failure, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_input_is_io_error() {
        let converter = Converter::default();
        let result = converter.convert_file(Path::new("no_such_board.kicad_pcb"), None);
        assert!(matches!(result, Err(ConvertError::Io(_))));
    }
}

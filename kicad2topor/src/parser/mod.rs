pub mod pcb;
pub mod sexp;

// Re-export for convenience
pub use pcb::{BoardParser, ExtractError, OUTLINE_LAYER, RECOGNIZED_LAYERS};
pub use sexp::{Sexpr, SexprError};

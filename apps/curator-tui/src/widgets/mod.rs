//! TUI widgets

mod mode_indicator;
mod popup;
mod structure;

pub use mode_indicator::ModeIndicator;
pub use popup::{centered_rect, Popup};
pub use structure::StructureCanvas;

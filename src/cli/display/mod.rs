//! Display module for formatted CLI output

pub mod icons;
pub mod table;

pub use icons::StatusIcon;
pub use table::TableRenderer;

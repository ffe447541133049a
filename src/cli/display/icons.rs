//! Status icons for CLI output

/// Status icons for different states
pub struct StatusIcon;

impl StatusIcon {
    /// Success icon (unit installed)
    pub const SUCCESS: &'static str = "✓";

    /// Error icon (unit failed)
    pub const ERROR: &'static str = "✗";
}

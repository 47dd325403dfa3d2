// Renderer and runtime tuning shared by the popup surface and its session.

// ============================================================================
// Font Metrics
// ============================================================================

/// Monospace glyph advance as a fraction of the font size
pub(crate) const MONO_ADVANCE_RATIO: f32 = 0.6;

/// Line height as a fraction of the font size
pub(crate) const LINE_HEIGHT_RATIO: f32 = 1.4;

// ============================================================================
// Surface Constants
// ============================================================================

/// Layer-shell namespace of the popup surface
pub(crate) const LAYER_NAMESPACE: &str = "notifications";

/// How long to wait for the compositor to describe an output before placing
/// the popup from the configured insets alone
pub(crate) const OUTPUT_WAIT: std::time::Duration = std::time::Duration::from_millis(250);

/// How long to wait for the compositor to show the popup before starting the
/// dismissal race anyway
pub(crate) const SURFACE_WAIT: std::time::Duration = std::time::Duration::from_millis(500);

// ============================================================================
// Process Constants
// ============================================================================

/// Name of the thread running the dismissal watchers
pub(crate) const DISMISSAL_THREAD: &str = "dismissal";

/// Exit status for usage and fatal errors
pub(crate) const FAILURE_CODE: u8 = 1;

//! Crate-wide constants.
//!
//! Centralizes magic numbers so the wheel table and button conventions live
//! in one place.

// ============================================================================
// Mouse
// ============================================================================

/// DOM button index of the primary (usually left) mouse button
pub const PRIMARY_BUTTON: u16 = 0;

// ============================================================================
// Wheel Normalization
// ============================================================================
// There is no hard standard for line and page heights; these are empirical.

/// Pixels per pixel-mode delta unit
pub const WHEEL_PIXEL_SCALE: f64 = 1.0;

/// Pixels per line-mode delta unit
pub const WHEEL_LINE_SCALE: f64 = 20.0;

/// Pixels per page-mode delta unit
pub const WHEEL_PAGE_SCALE: f64 = 50.0;

// ============================================================================
// Instrumentation
// ============================================================================

/// Handlers slower than this are reported (milliseconds)
pub const SLOW_HANDLER_MS: f64 = 4.0;

// ============================================================================
// Settings
// ============================================================================

/// Directory under the platform config dir holding settings
pub const SETTINGS_DIR_NAME: &str = "unipointer";

/// Settings file name
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Log filter used when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "unipointer=info";

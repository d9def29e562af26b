//! Platform-specific configuration

/// Save shortcut display for form help text
/// Ctrl+S works on all platforms
pub const SAVE_SHORTCUT: &str = "Ctrl+S";

/// Remove-row shortcut display for form help text
pub const REMOVE_ROW_SHORTCUT: &str = "Ctrl+D";

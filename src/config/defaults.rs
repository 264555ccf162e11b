// SPDX-License-Identifier: MPL-2.0
//! Default values for the settings file.

// ==========================================================================
// Report Defaults
// ==========================================================================

/// Render the Size column as "1.5 MB" rather than a byte count.
pub const DEFAULT_HUMAN_READABLE_SIZE: bool = true;

// ==========================================================================
// Scan Defaults
// ==========================================================================

/// Descend into subdirectories of directory inputs.
pub const DEFAULT_RECURSIVE: bool = false;

/// Follow symbolic links while walking directories.
pub const DEFAULT_FOLLOW_SYMLINKS: bool = false;

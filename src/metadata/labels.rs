// SPDX-License-Identifier: MPL-2.0
//! Human-readable labels for enumerated EXIF codes.

/// SceneCaptureType (tag 41990).
pub const SCENE_TYPES: &[(i64, &str)] = &[
    (0, "Standard"),
    (1, "Landscape"),
    (2, "Portrait"),
    (3, "Night Scene"),
];

/// Flash (tag 37385). Bit 0 is "fired", bits 1-2 the return light status,
/// bits 3-4 the mode, bit 5 "no flash function", bit 6 red-eye reduction.
pub const FLASH_MODES: &[(i64, &str)] = &[
    (0, "Flash did not fire"),
    (1, "Flash fired"),
    (5, "Strobe return light not detected"),
    (7, "Strobe return light detected"),
    (9, "Flash fired, compulsory flash mode"),
    (13, "Flash fired, compulsory flash mode, return light not detected"),
    (15, "Flash fired, compulsory flash mode, return light detected"),
    (16, "Flash did not fire, compulsory flash mode"),
    (24, "Flash did not fire, auto mode"),
    (25, "Flash fired, auto mode"),
    (29, "Flash fired, auto mode, return light not detected"),
    (31, "Flash fired, auto mode, return light detected"),
    (32, "No flash function"),
    (65, "Flash fired, red-eye reduction mode"),
    (69, "Flash fired, red-eye reduction mode, return light not detected"),
    (71, "Flash fired, red-eye reduction mode, return light detected"),
    (73, "Flash fired, compulsory flash mode, red-eye reduction mode"),
    (
        77,
        "Flash fired, compulsory flash mode, red-eye reduction mode, return light not detected",
    ),
    (
        79,
        "Flash fired, compulsory flash mode, red-eye reduction mode, return light detected",
    ),
    (89, "Flash fired, auto mode, red-eye reduction mode"),
    (
        93,
        "Flash fired, auto mode, return light not detected, red-eye reduction mode",
    ),
    (
        95,
        "Flash fired, auto mode, return light detected, red-eye reduction mode",
    ),
];

/// Label for a scene capture type code, `None` when the code is unknown.
#[must_use]
pub fn scene_type(code: i64) -> Option<&'static str> {
    lookup(SCENE_TYPES, code)
}

/// Label for a flash code, `None` when the code is unknown.
#[must_use]
pub fn flash(code: i64) -> Option<&'static str> {
    lookup(FLASH_MODES, code)
}

fn lookup(table: &'static [(i64, &'static str)], code: i64) -> Option<&'static str> {
    table
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, label)| *label)
}

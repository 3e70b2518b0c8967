// src/screens/constants.rs
//! Shared layout constants for the screens.

/// Side length of the square reading tiles and the navigation widget.
pub const TILE_SIZE_PX: u32 = 63;

/// X coordinate of the reading tile column on the idle screen.
pub const TILE_COLUMN_X: i32 = 20;

/// Vertical step between reading tiles.
pub const TILE_ROW_STEP_PX: i32 = 70;

/// Tooltip distance from its widget (a quarter tile).
pub const TOOLTIP_PADDING_PX: u16 = (TILE_SIZE_PX / 4) as u16;

/// Corner radius of the reading tiles.
pub const TILE_CORNER_RADIUS_PX: u32 = 5;

/// Navigation widget (idle -> config) origin.
pub const NAV_ORIGIN: (i32, i32) = (200, 350);

/// Back widget (config -> idle) origin and side length.
pub const BACK_ORIGIN: (i32, i32) = (200, 350);
pub const BACK_SIZE_PX: u32 = 100;

/// Corner radius of the back widget.
pub const BACK_CORNER_RADIUS_PX: u32 = 15;

/// Y coordinate of the "Last update" footer line on the idle screen.
pub const FOOTER_Y: i32 = 440;

/// Side length of the calibration corner markers.
pub const CAL_MARKER_SIZE_PX: u16 = 15;

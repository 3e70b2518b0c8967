// src/ui/mod.rs
//! Widget layer for the serra console UI.
//!
//! Provides the [`ButtonWidget`] interactive drawable, the [`TextSize`]
//! font selector, and the RGB565 color constants used across screens.
//! Widgets are ephemeral stack values: each screen rebuilds its layout on
//! every render, so there is no persistent widget registry.

pub mod styling;
pub mod text;
pub mod widget;

pub use styling::*;
pub use text::TextSize;
pub use widget::{ButtonWidget, TooltipAnchor, WidgetShape};

/// Display width in pixels (portrait orientation).
pub const DISPLAY_WIDTH_PX: u16 = 320;

/// Display height in pixels (portrait orientation).
pub const DISPLAY_HEIGHT_PX: u16 = 480;

// src/ui/widget.rs
//! Interactive button widget with styles, content and tooltips.
//!
//! A [`ButtonWidget`] is a rectangular screen region with a shaped
//! background fill, a foreground (centered text or a 1-bpp icon, never
//! both) and an optional tooltip anchored to one of its edges. Widgets are
//! rebuilt on the stack for every screen render; geometry is fixed at
//! construction, style and content may be set any number of times before
//! [`ButtonWidget::draw`].
//!
//! Hit-testing is pure geometry: [`ButtonWidget::is_pressed`] takes the
//! current debounced touch sample as an explicit argument and is strict on
//! all four bounds, so the no-touch sentinel `(0, 0)` never registers.

use embedded_graphics::prelude::*;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::primitives::{Ellipse, PrimitiveStyle, Rectangle, RoundedRectangle};
use embedded_graphics::text::{Baseline, Text};

use crate::icons::Icon;
use crate::touch::TouchSample;
use crate::ui::text::TextSize;

/// Background shape of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetShape {
    Rect,
    RoundRect { corner_radius: u32 },
    /// Inscribed in the widget's bounding box: centered at
    /// `origin + size / 2` with radii `size / 2`.
    Ellipse,
}

/// Edge of the widget a tooltip is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooltipAnchor {
    Up,
    Down,
    Left,
    Right,
}

/// Foreground content. Exactly one mode is active at a time; the enum
/// makes rendering both text and an icon unrepresentable.
#[derive(Debug, Clone, Copy)]
enum WidgetContent<'a> {
    None,
    Text { text: &'a str, size: TextSize },
    Icon(&'a Icon),
}

#[derive(Debug, Clone, Copy)]
struct Tooltip<'a> {
    text: &'a str,
    size: TextSize,
    anchor: TooltipAnchor,
    padding: u16,
    color: Rgb565,
}

/// A rectangular interactive drawable bound to fixed geometry.
pub struct ButtonWidget<'a> {
    bounds: Rectangle,
    shape: WidgetShape,
    background: Rgb565,
    foreground: Rgb565,
    content: WidgetContent<'a>,
    tooltip: Option<Tooltip<'a>>,
}

impl<'a> ButtonWidget<'a> {
    pub fn new(origin: Point, size: Size) -> Self {
        Self {
            bounds: Rectangle::new(origin, size),
            shape: WidgetShape::Rect,
            background: Rgb565::WHITE,
            foreground: Rgb565::BLACK,
            content: WidgetContent::None,
            tooltip: None,
        }
    }

    /// Set the background/foreground colors and the background shape.
    pub fn set_style(&mut self, background: Rgb565, foreground: Rgb565, shape: WidgetShape) {
        self.background = background;
        self.foreground = foreground;
        self.shape = shape;
    }

    /// Set text content. Mutual alternative to [`Self::set_icon`]; the
    /// last call wins.
    pub fn set_text(&mut self, text: &'a str, size: TextSize) {
        self.content = WidgetContent::Text { text, size };
    }

    /// Set icon content. Mutual alternative to [`Self::set_text`]; the
    /// last call wins. The icon's dimensions are expected to match the
    /// widget size.
    pub fn set_icon(&mut self, icon: &'a Icon) {
        self.content = WidgetContent::Icon(icon);
    }

    /// Enable the tooltip. Absent by default.
    pub fn set_tooltip(
        &mut self,
        text: &'a str,
        size: TextSize,
        anchor: TooltipAnchor,
        padding: u16,
        color: Rgb565,
    ) {
        self.tooltip = Some(Tooltip {
            text,
            size,
            anchor,
            padding,
            color,
        });
    }

    /// True iff the sample lies strictly inside the bounding box.
    ///
    /// Strict on all four bounds, so edge touches and the `(0, 0)`
    /// no-touch sentinel both report not-pressed.
    pub fn is_pressed(&self, sample: TouchSample) -> bool {
        let (x, y) = (sample.x as i32, sample.y as i32);
        let Point { x: x0, y: y0 } = self.bounds.top_left;
        let w = self.bounds.size.width as i32;
        let h = self.bounds.size.height as i32;
        x > x0 && x < x0 + w && y > y0 && y < y0 + h
    }

    /// Draw the background fill, the foreground content and, if enabled,
    /// the tooltip.
    pub fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        let fill = PrimitiveStyle::with_fill(self.background);
        match self.shape {
            WidgetShape::Rect => self.bounds.into_styled(fill).draw(display)?,
            WidgetShape::RoundRect { corner_radius } => {
                RoundedRectangle::with_equal_corners(
                    self.bounds,
                    Size::new(corner_radius, corner_radius),
                )
                .into_styled(fill)
                .draw(display)?
            }
            WidgetShape::Ellipse => Ellipse::new(self.bounds.top_left, self.bounds.size)
                .into_styled(fill)
                .draw(display)?,
        }

        match self.content {
            WidgetContent::None => {}
            WidgetContent::Icon(icon) => {
                icon.draw(display, self.bounds.top_left, self.foreground)?;
            }
            WidgetContent::Text { text, size } => {
                let extent = size.measure(text);
                let origin = self.bounds.top_left + centered_offset(self.bounds.size, extent);
                let style = MonoTextStyle::new(size.font(), self.foreground);
                Text::with_baseline(text, origin, style, Baseline::Top).draw(display)?;
            }
        }

        if let Some(tooltip) = &self.tooltip {
            let origin = self.tooltip_origin(tooltip);
            let style = MonoTextStyle::new(tooltip.size.font(), tooltip.color);
            Text::with_baseline(tooltip.text, origin, style, Baseline::Top).draw(display)?;
        }

        Ok(())
    }

    /// Top-left corner of the tooltip text for its anchor edge.
    ///
    /// Extents come from the tooltip's own text and font, not the
    /// widget's content.
    fn tooltip_origin(&self, tooltip: &Tooltip<'_>) -> Point {
        let extent = tooltip.size.measure(tooltip.text);
        let Point { x: x0, y: y0 } = self.bounds.top_left;
        let w = self.bounds.size.width as i32;
        let h = self.bounds.size.height as i32;
        let (tip_w, tip_h) = (extent.width as i32, extent.height as i32);
        let padding = tooltip.padding as i32;

        match tooltip.anchor {
            TooltipAnchor::Right => Point::new(x0 + w + padding, y0 + (h - tip_h) / 2),
            TooltipAnchor::Left => Point::new(x0 - tip_w - padding, y0 + (h - tip_h) / 2),
            TooltipAnchor::Up => Point::new(x0 + (w - tip_w) / 2, y0 - padding),
            TooltipAnchor::Down => Point::new(x0 + (w - tip_w) / 2, y0 + h + padding),
        }
    }

    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    pub fn start_x(&self) -> i32 {
        self.bounds.top_left.x
    }

    pub fn end_x(&self) -> i32 {
        self.bounds.top_left.x + self.bounds.size.width as i32
    }

    pub fn start_y(&self) -> i32 {
        self.bounds.top_left.y
    }

    pub fn end_y(&self) -> i32 {
        self.bounds.top_left.y + self.bounds.size.height as i32
    }

    pub fn size_x(&self) -> u32 {
        self.bounds.size.width
    }

    pub fn size_y(&self) -> u32 {
        self.bounds.size.height
    }
}

/// Offset that centers `inner` within a box of size `outer`.
fn centered_offset(outer: Size, inner: Size) -> Point {
    Point::new(
        (outer.width as i32 - inner.width as i32) / 2,
        (outer.height as i32 - inner.height as i32) / 2,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icons::ICON_COG;
    use embedded_graphics::mock_display::MockDisplay;

    fn nav_widget() -> ButtonWidget<'static> {
        ButtonWidget::new(Point::new(200, 350), Size::new(63, 63))
    }

    #[test]
    fn pressed_strictly_inside() {
        let widget = nav_widget();
        assert!(widget.is_pressed(TouchSample::new(230, 375)));
        assert!(widget.is_pressed(TouchSample::new(201, 351)));
        assert!(widget.is_pressed(TouchSample::new(262, 412)));
    }

    #[test]
    fn edges_are_exclusive() {
        let widget = nav_widget();
        assert!(!widget.is_pressed(TouchSample::new(200, 375)));
        assert!(!widget.is_pressed(TouchSample::new(263, 375)));
        assert!(!widget.is_pressed(TouchSample::new(230, 350)));
        assert!(!widget.is_pressed(TouchSample::new(230, 413)));
    }

    #[test]
    fn sentinel_never_presses() {
        let at_origin = ButtonWidget::new(Point::zero(), Size::new(63, 63));
        assert!(!at_origin.is_pressed(TouchSample::NONE));
        assert!(!nav_widget().is_pressed(TouchSample::NONE));
    }

    #[test]
    fn axis_accessors() {
        let widget = nav_widget();
        assert_eq!(widget.start_x(), 200);
        assert_eq!(widget.end_x(), 263);
        assert_eq!(widget.start_y(), 350);
        assert_eq!(widget.end_y(), 413);
        assert_eq!((widget.size_x(), widget.size_y()), (63, 63));
    }

    #[test]
    fn content_modes_are_exclusive() {
        let mut widget = nav_widget();
        widget.set_text("Back", TextSize::Medium);
        widget.set_icon(&ICON_COG);
        assert!(matches!(widget.content, WidgetContent::Icon(_)));

        widget.set_text("Back", TextSize::Medium);
        assert!(matches!(widget.content, WidgetContent::Text { .. }));
    }

    #[test]
    fn tooltip_anchor_right() {
        // 63x63 widget at (20, 0), "Temp1" to the right with 63/4 padding:
        // x = 20 + 63 + 15 = 98, y centered over 0..63
        let mut widget = ButtonWidget::new(Point::new(20, 0), Size::new(63, 63));
        widget.set_tooltip("Temp1", TextSize::Medium, TooltipAnchor::Right, 15, Rgb565::WHITE);
        let tooltip = widget.tooltip.unwrap();
        assert_eq!(widget.tooltip_origin(&tooltip), Point::new(98, (63 - 10) / 2));
    }

    #[test]
    fn tooltip_anchor_measures_tooltip_text_not_content() {
        // content text is much longer than the tooltip; LEFT anchoring must
        // clear only the tooltip's own width
        let mut widget = ButtonWidget::new(Point::new(100, 40), Size::new(63, 63));
        widget.set_text("a very long label", TextSize::Large);
        widget.set_tooltip("Hi", TextSize::Medium, TooltipAnchor::Left, 10, Rgb565::WHITE);
        let tooltip = widget.tooltip.unwrap();
        // width of "Hi" in 6x10: 12 px -> x = 100 - 12 - 10 = 78
        assert_eq!(widget.tooltip_origin(&tooltip).x, 78);
    }

    #[test]
    fn tooltip_anchor_up_down() {
        let mut widget = ButtonWidget::new(Point::new(40, 100), Size::new(60, 20));
        widget.set_tooltip("Up", TextSize::Medium, TooltipAnchor::Up, 12, Rgb565::WHITE);
        let tooltip = widget.tooltip.unwrap();
        // "Up" is 12 px wide -> x = 40 + (60 - 12) / 2 = 64
        assert_eq!(widget.tooltip_origin(&tooltip), Point::new(64, 88));

        widget.set_tooltip("Dn", TextSize::Medium, TooltipAnchor::Down, 12, Rgb565::WHITE);
        let tooltip = widget.tooltip.unwrap();
        assert_eq!(widget.tooltip_origin(&tooltip), Point::new(64, 132));
    }

    #[test]
    fn draw_without_content_fills_background_only() {
        let mut display = MockDisplay::new();
        display.set_allow_overdraw(true);
        let widget = ButtonWidget::new(Point::new(4, 4), Size::new(16, 8));
        widget.draw(&mut display).unwrap();
        assert_eq!(display.get_pixel(Point::new(5, 5)), Some(Rgb565::WHITE));
        // outside the box stays untouched
        assert_eq!(display.get_pixel(Point::new(2, 2)), None);
    }

    #[test]
    fn draw_text_is_centered() {
        let mut display = MockDisplay::new();
        display.set_allow_overdraw(true);
        let mut widget = ButtonWidget::new(Point::new(0, 0), Size::new(40, 20));
        widget.set_style(Rgb565::BLACK, Rgb565::WHITE, WidgetShape::Rect);
        widget.set_text("ab", TextSize::Medium);
        widget.draw(&mut display).unwrap();
        // 12x10 text centered in 40x20 starts at (14, 5): some white pixel
        // must land inside that cell and none left of it
        let white = display
            .affected_area()
            .points()
            .filter(|p| display.get_pixel(*p) == Some(Rgb565::WHITE))
            .collect::<heapless::Vec<_, 256>>();
        assert!(!white.is_empty());
        assert!(white.iter().all(|p| p.x >= 14 && p.x < 26 && p.y >= 5 && p.y < 15));
    }

    #[test]
    fn draw_ellipse_leaves_corners_clear() {
        let mut display = MockDisplay::new();
        display.set_allow_overdraw(true);
        let mut widget = ButtonWidget::new(Point::new(0, 0), Size::new(20, 20));
        widget.set_style(Rgb565::RED, Rgb565::BLACK, WidgetShape::Ellipse);
        widget.draw(&mut display).unwrap();
        assert_eq!(display.get_pixel(Point::new(0, 0)), None);
        assert_eq!(display.get_pixel(Point::new(10, 10)), Some(Rgb565::RED));
    }
}

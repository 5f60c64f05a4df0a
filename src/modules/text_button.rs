/*
Clickable text button drawn in screen space.

let btn = TextButton::new(10.0, 10.0, 120.0, 36.0, "Circle", DARKGRAY, GRAY, 22);
if btn.click() { ... }

Call `click()` once per frame: it draws the button and reports whether it was
pressed this frame. `set_selected(true)` paints it with the hover colour so a
group of buttons can show which one is active.
*/

use macroquad::prelude::*;

pub struct TextButton {
    rect: Rect,
    text: String,
    color: Color,
    hover_color: Color,
    font_size: u16,
    selected: bool,
}

impl TextButton {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        text: &str,
        color: Color,
        hover_color: Color,
        font_size: u16,
    ) -> Self {
        Self {
            rect: Rect::new(x, y, width, height),
            text: text.to_string(),
            color,
            hover_color,
            font_size,
            selected: false,
        }
    }

    pub fn set_text(&mut self, text: &str) {
        if self.text != text {
            self.text = text.to_string();
        }
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub fn contains(&self, point: Vec2) -> bool {
        self.rect.contains(point)
    }

    /// Draw the button and report a left click on it this frame
    pub fn click(&self) -> bool {
        let mouse = Vec2::from(mouse_position());
        let hovered = self.contains(mouse);
        self.draw(hovered);
        hovered && is_mouse_button_pressed(MouseButton::Left)
    }

    fn draw(&self, hovered: bool) {
        let fill = if hovered || self.selected {
            self.hover_color
        } else {
            self.color
        };
        draw_rectangle(self.rect.x, self.rect.y, self.rect.w, self.rect.h, fill);
        if self.selected {
            draw_rectangle_lines(self.rect.x, self.rect.y, self.rect.w, self.rect.h, 2.0, WHITE);
        }

        // Center the label inside the button
        let dims = measure_text(&self.text, None, self.font_size, 1.0);
        let x = self.rect.x + (self.rect.w - dims.width) / 2.0;
        let y = self.rect.y + (self.rect.h + dims.offset_y) / 2.0 - 2.0;
        draw_text(&self.text, x, y, self.font_size as f32, WHITE);
    }
}

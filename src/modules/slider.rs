/*
Horizontal slider bound to a `SliderRange`.
*/

use macroquad::prelude::*;

use crate::modules::config::SliderRange;

const KNOB_RADIUS: f32 = 8.0;

pub struct Slider {
    label: String,
    track: Rect,
    range: SliderRange,
    value: f32,
    dragging: bool,
}

impl Slider {
    pub fn new(label: &str, track: Rect, range: SliderRange) -> Self {
        Self {
            label: label.to_string(),
            track,
            range,
            value: range.clamp(range.default),
            dragging: false,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Value under screen x, clamped to the track ends
    pub fn value_at(&self, x: f32) -> f32 {
        let t = if self.track.w > 0.0 {
            ((x - self.track.x) / self.track.w).clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.range.min + t * (self.range.max - self.range.min)
    }

    fn knob_x(&self) -> f32 {
        let span = self.range.max - self.range.min;
        let t = if span > 0.0 {
            (self.value - self.range.min) / span
        } else {
            0.0
        };
        self.track.x + t * self.track.w
    }

    /// Area that reacts to the pointer: the track padded by the knob
    fn hit_rect(&self) -> Rect {
        Rect::new(
            self.track.x - KNOB_RADIUS,
            self.track.y + self.track.h / 2.0 - KNOB_RADIUS * 1.5,
            self.track.w + KNOB_RADIUS * 2.0,
            KNOB_RADIUS * 3.0,
        )
    }

    /// Feed one frame of pointer state. Returns true if the value changed.
    pub fn update(&mut self, mouse: Vec2, pressed: bool, down: bool) -> bool {
        if pressed && self.hit_rect().contains(mouse) {
            self.dragging = true;
        }
        if !down {
            self.dragging = false;
        }
        if self.dragging {
            let before = self.value;
            self.value = self.value_at(mouse.x);
            return self.value != before;
        }
        false
    }

    pub fn draw(&self, text_color: Color) {
        let mid = self.track.y + self.track.h / 2.0;
        draw_line(self.track.x, mid, self.track.x + self.track.w, mid, 4.0, GRAY);
        draw_line(self.track.x, mid, self.knob_x(), mid, 4.0, SKYBLUE);
        draw_circle(self.knob_x(), mid, KNOB_RADIUS, WHITE);
        draw_text(
            &format!("{}: {:.1}", self.label, self.value),
            self.track.x,
            self.track.y - 2.0,
            18.0,
            text_color,
        );
    }
}

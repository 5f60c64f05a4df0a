/*
Turns one frame of raw mouse/touch state into `PointerEvent`s.

macroquad mirrors the first touch onto the mouse, so touch and mouse share
this path. Positions here are still in screen space; the caller maps them
into the world.
*/

use macroquad::math::Vec2;

/// Raw input sampled once per frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerFrame {
    pub position: Vec2,
    pub left_pressed: bool,
    pub left_down: bool,
    pub left_released: bool,
    /// Right click stands in for the context menu
    pub right_pressed: bool,
    pub touch_cancelled: bool,
    /// Pointer is over the control strip
    pub over_ui: bool,
}

/// Screen-space version of `PointerEvent`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScreenEvent {
    Down(Vec2),
    Move(Vec2),
    Up,
    Cancel,
}

#[derive(Debug, Default)]
pub struct PointerTracker {
    last: Option<Vec2>,
    /// A press started on the canvas and has not ended yet
    active: bool,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn translate(&mut self, frame: PointerFrame) -> Vec<ScreenEvent> {
        let mut events = Vec::new();
        let moved = self.last.is_some_and(|last| last != frame.position);
        self.last = Some(frame.position);

        if self.active && (frame.right_pressed || frame.touch_cancelled) {
            events.push(ScreenEvent::Cancel);
            self.active = false;
            return events;
        }

        if frame.left_pressed && !frame.over_ui && !self.active {
            events.push(ScreenEvent::Down(frame.position));
            self.active = true;
        } else if self.active && moved && frame.left_down {
            // Keep tracking even when the pointer wanders over the controls
            events.push(ScreenEvent::Move(frame.position));
        }

        if self.active && (frame.left_released || !frame.left_down) {
            if moved && !frame.left_pressed {
                // Last position must reach the controller before commit
                if !matches!(events.last(), Some(ScreenEvent::Move(_))) {
                    events.push(ScreenEvent::Move(frame.position));
                }
            }
            events.push(ScreenEvent::Up);
            self.active = false;
        }
        events
    }
}

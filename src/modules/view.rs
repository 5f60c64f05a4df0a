/*
Canvas sizing and the world rect shown in it.

World units are canvas pixels at the default fit: the view starts as the
canvas rect and only grows to take in bodies that left it.
*/

use macroquad::camera::Camera2D;
use macroquad::math::{Rect, Vec2, vec2};

/// How far the view may grow past the canvas on each side, in canvas sizes
const MAX_OVERSCAN: f32 = 1.5;

/// Drawable area below the control strip
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    /// Window minus the UI chrome on top
    pub fn from_window(window_width: f32, window_height: f32, chrome: f32) -> Self {
        Self::new(window_width, window_height - chrome)
    }

    pub fn rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }
}

/// World rect mapped onto the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    pub rect: Rect,
}

impl View {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            rect: viewport.rect(),
        }
    }

    /// Smallest rect that holds the canvas and every bound, with the
    /// canvas aspect ratio.
    pub fn fit(viewport: Viewport, bounds: impl IntoIterator<Item = Rect>) -> Self {
        let canvas = viewport.rect();
        let limit = Rect::new(
            -canvas.w * MAX_OVERSCAN,
            -canvas.h * MAX_OVERSCAN,
            canvas.w * (1.0 + 2.0 * MAX_OVERSCAN),
            canvas.h * (1.0 + 2.0 * MAX_OVERSCAN),
        );

        let mut union = canvas;
        for b in bounds {
            if !(b.x.is_finite() && b.y.is_finite() && b.w.is_finite() && b.h.is_finite()) {
                continue;
            }
            union = union.combine_with(b);
        }
        let union = clip(union, limit);

        let aspect = viewport.aspect();
        let (w, h) = if union.w / union.h > aspect {
            (union.w, union.w / aspect)
        } else {
            (union.h * aspect, union.h)
        };
        let center = union.center();
        Self {
            rect: Rect::new(center.x - w / 2.0, center.y - h / 2.0, w, h),
        }
    }

    /// Canvas-local pixel position to world position
    pub fn canvas_to_world(&self, viewport: Viewport, p: Vec2) -> Vec2 {
        vec2(
            self.rect.x + p.x / viewport.width * self.rect.w,
            self.rect.y + p.y / viewport.height * self.rect.h,
        )
    }

    /// World position to canvas-local pixel position
    pub fn world_to_canvas(&self, viewport: Viewport, p: Vec2) -> Vec2 {
        vec2(
            (p.x - self.rect.x) / self.rect.w * viewport.width,
            (p.y - self.rect.y) / self.rect.h * viewport.height,
        )
    }

    /// World units per canvas pixel
    pub fn scale(&self, viewport: Viewport) -> f32 {
        self.rect.w / viewport.width
    }

    /// Camera drawing this view into the canvas area at the bottom of the
    /// window (GL viewports count from the bottom-left corner).
    pub fn camera(&self, viewport: Viewport) -> Camera2D {
        Camera2D {
            target: self.rect.center(),
            zoom: vec2(2.0 / self.rect.w, 2.0 / self.rect.h),
            viewport: Some((0, 0, viewport.width as i32, viewport.height as i32)),
            ..Default::default()
        }
    }
}

fn clip(r: Rect, limit: Rect) -> Rect {
    let left = r.x.max(limit.x);
    let top = r.y.max(limit.y);
    let right = (r.x + r.w).min(limit.x + limit.w);
    let bottom = (r.y + r.h).min(limit.y + limit.h);
    Rect::new(left, top, (right - left).max(1.0), (bottom - top).max(1.0))
}

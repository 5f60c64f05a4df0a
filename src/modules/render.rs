/*
Drawing. Everything here only reads the scene.
*/

use macroquad::prelude::*;
use rapier2d::prelude::{Isometry, Real};

use crate::modules::planet::Background;
use crate::modules::scene::Scene;
use crate::modules::shapes::kind_of;
use crate::modules::world::BodyTag;

const GRADIENT_BANDS: usize = 48;
const PREVIEW_ALPHA: f32 = 0.4;
const SURFACE_COLOR: Color = Color::new(0.1, 0.75, 0.45, 1.0);
const GROUND_COLOR: Color = Color::new(0.3, 0.25, 0.22, 1.0);
const SPRING_COLOR: Color = Color::new(0.95, 0.95, 0.95, 0.7);
const OUTLINE_COLOR: Color = Color::new(0.0, 0.0, 0.0, 0.35);

/// Paint the scene below the control strip.
pub fn draw_scene(scene: &Scene, chrome: f32) {
    draw_background(scene.background(), chrome);

    let viewport = scene.viewport();
    let view = scene.view();
    set_camera(&view.camera(viewport));

    let world = scene.world();
    let ground = scene.surface().and_then(|s| s.ground());
    for (handle, body, tag) in world.iter_bodies() {
        let color = match tag {
            Some(BodyTag::Surface) if Some(handle) == ground => GROUND_COLOR,
            Some(BodyTag::Surface) => SURFACE_COLOR,
            Some(BodyTag::Anchor) => {
                let p = body.translation();
                draw_circle(p.x, p.y, 5.0, DARKGRAY);
                continue;
            }
            Some(BodyTag::Cursor) | None => continue,
            Some(BodyTag::Shape) | Some(BodyTag::Preview) => WHITE,
        };
        let translucent = tag == Some(BodyTag::Preview);

        for collider in world.colliders_of(body) {
            let local = collider
                .position_wrt_parent()
                .copied()
                .unwrap_or_else(Isometry::identity);
            let pose = body.position() * local;
            let fill = match tag {
                Some(BodyTag::Shape) | Some(BodyTag::Preview) => kind_of(collider.shape())
                    .map(|kind| kind.color())
                    .unwrap_or(color),
                _ => color,
            };
            let fill = if translucent {
                Color::new(fill.r, fill.g, fill.b, PREVIEW_ALPHA)
            } else {
                fill
            };
            draw_collider(collider.shape(), &pose, fill);
        }
    }

    for (a, b) in world.joint_segments() {
        draw_line(a.x, a.y, b.x, b.y, 2.0 * view.scale(viewport), SPRING_COLOR);
    }

    set_default_camera();
}

fn draw_collider(shape: &dyn rapier2d::parry::shape::Shape, pose: &Isometry<Real>, fill: Color) {
    let center = vec2(pose.translation.x, pose.translation.y);
    let angle = pose.rotation.angle();

    if let Some(ball) = shape.as_ball() {
        draw_circle(center.x, center.y, ball.radius, fill);
        // Spoke so rotation is visible
        let tip = center + Vec2::from_angle(angle) * ball.radius;
        draw_line(center.x, center.y, tip.x, tip.y, 2.0, OUTLINE_COLOR);
    } else if let Some(cuboid) = shape.as_cuboid() {
        let hx = cuboid.half_extents.x;
        let hy = cuboid.half_extents.y;
        draw_rectangle_ex(
            center.x,
            center.y,
            hx * 2.0,
            hy * 2.0,
            DrawRectangleParams {
                offset: vec2(0.5, 0.5),
                rotation: angle,
                color: fill,
            },
        );
    } else if let Some(triangle) = shape.as_triangle() {
        let [a, b, c] = [triangle.a, triangle.b, triangle.c].map(|p| {
            let w = pose * p;
            vec2(w.x, w.y)
        });
        draw_triangle(a, b, c, fill);
        draw_triangle_lines(a, b, c, 1.5, OUTLINE_COLOR);
    }
}

/// Vertical gradient in horizontal bands over the canvas area
fn draw_background(background: Background, chrome: f32) {
    let width = screen_width();
    let height = (screen_height() - chrome).max(0.0);
    let band = height / GRADIENT_BANDS as f32;
    for i in 0..GRADIENT_BANDS {
        let t = i as f32 / (GRADIENT_BANDS - 1) as f32;
        let color = Color::new(
            background.top.r + (background.bottom.r - background.top.r) * t,
            background.top.g + (background.bottom.g - background.top.g) * t,
            background.top.b + (background.bottom.b - background.top.b) * t,
            1.0,
        );
        // Overlap by a pixel to hide seams
        draw_rectangle(0.0, chrome + band * i as f32, width, band + 1.0, color);
    }
}

/// Planet, gravity and counts in the top-left corner of the canvas.
pub fn draw_hud(scene: &Scene, chrome: f32, fps: i32) {
    let text = scene.background().text;
    let world = scene.world();
    let lines = [
        format!(
            "{}  g = {:.3} ({:.0} px/s^2)",
            scene.planet().label(),
            scene.planet().gravity_scalar(),
            world.gravity()
        ),
        format!(
            "{} trampoline  |  shapes: {}  |  bodies: {}",
            scene.surface_variant().label(),
            scene.shapes().len(),
            world.body_count()
        ),
        format!("{fps} fps  |  right click cancels"),
    ];
    for (i, line) in lines.iter().enumerate() {
        draw_text(line, 12.0, chrome + 22.0 + i as f32 * 20.0, 20.0, text);
    }
}

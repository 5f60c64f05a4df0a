/*
Body factory for the three droppable shapes.
*/

use macroquad::color::Color;
use macroquad::math::Vec2;
use rapier2d::parry::shape::Shape;
use rapier2d::prelude::*;
use serde::{Deserialize, Serialize};

use crate::modules::config::MaterialConfig;
use crate::modules::world::{BodyTag, PhysicsWorld, to_na, to_point};

const MIN_SIZE: f32 = 1.0;
const MIN_MASS: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
// Unknown ids in a config file fall back to the default instead of failing the load
#[serde(rename_all = "lowercase", from = "String")]
pub enum ShapeKind {
    #[default]
    Circle,
    Square,
    Triangle,
}

impl From<String> for ShapeKind {
    fn from(id: String) -> Self {
        Self::from_id(&id)
    }
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Circle, ShapeKind::Square, ShapeKind::Triangle];

    pub fn label(&self) -> &'static str {
        match self {
            ShapeKind::Circle => "Circle",
            ShapeKind::Square => "Square",
            ShapeKind::Triangle => "Triangle",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "circle" => Some(ShapeKind::Circle),
            "square" => Some(ShapeKind::Square),
            "triangle" => Some(ShapeKind::Triangle),
            _ => None,
        }
    }

    /// Lossy lookup: anything unrecognised is a circle.
    pub fn from_id(s: &str) -> Self {
        Self::parse(s).unwrap_or_default()
    }

    pub fn color(&self) -> Color {
        match self {
            ShapeKind::Circle => Color::new(0.95, 0.36, 0.36, 1.0),
            ShapeKind::Square => Color::new(0.3, 0.62, 0.95, 1.0),
            ShapeKind::Triangle => Color::new(0.98, 0.78, 0.2, 1.0),
        }
    }

    /// Width and height of the shape's bounding box at rest
    pub fn extent(&self, size: f32) -> Vec2 {
        match self {
            ShapeKind::Circle | ShapeKind::Square => Vec2::splat(size),
            ShapeKind::Triangle => Vec2::new(size, triangle_height(size)),
        }
    }
}

/// What the user asked for: kind plus the slider values at commit time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeParams {
    pub kind: ShapeKind,
    pub size: f32,
    pub mass: f32,
}

impl ShapeParams {
    /// Invalid sizes and masses are pulled up to a small minimum
    pub fn sanitized(self) -> Self {
        Self {
            kind: self.kind,
            size: positive_or(self.size, MIN_SIZE),
            mass: positive_or(self.mass, MIN_MASS),
        }
    }
}

fn positive_or(value: f32, floor: f32) -> f32 {
    if value.is_finite() { value.max(floor) } else { floor }
}

pub fn triangle_height(size: f32) -> f32 {
    size * 3f32.sqrt() / 2.0
}

/// Vertices of an equilateral triangle with side `size`, centroid at the
/// origin, apex pointing up (screen y grows downward).
pub fn triangle_vertices(size: f32) -> [Vec2; 3] {
    let h = triangle_height(size);
    [
        Vec2::new(0.0, -2.0 * h / 3.0),
        Vec2::new(size / 2.0, h / 3.0),
        Vec2::new(-size / 2.0, h / 3.0),
    ]
}

fn collider_for(kind: ShapeKind, size: f32) -> ColliderBuilder {
    match kind {
        // ball() takes a radius, cuboid() takes half extents
        ShapeKind::Circle => ColliderBuilder::ball(size / 2.0),
        ShapeKind::Square => ColliderBuilder::cuboid(size / 2.0, size / 2.0),
        ShapeKind::Triangle => {
            let [a, b, c] = triangle_vertices(size);
            ColliderBuilder::triangle(to_point(a), to_point(b), to_point(c))
        }
    }
}

/// Create a dynamic shape centred at `at`.
pub fn create_body(
    world: &mut PhysicsWorld,
    at: Vec2,
    params: ShapeParams,
    material: &MaterialConfig,
) -> RigidBodyHandle {
    let params = params.sanitized();
    // Dynamic body: moved by gravity and collisions.
    // linear_damping stands in for air friction.
    // CCD keeps fast, small shapes from tunnelling through the thin trampoline
    let body = RigidBodyBuilder::dynamic()
        .translation(to_na(at))
        .linear_damping(material.air_friction)
        .angular_damping(material.angular_damping)
        .ccd_enabled(true)
        .build();
    // mass() sets the total mass directly instead of deriving it from a density
    let collider = collider_for(params.kind, params.size)
        .mass(params.mass)
        .restitution(material.restitution)
        .friction(material.friction)
        .build();
    log::debug!(
        "{} size={:.1} mass={:.1} at ({:.0}, {:.0})",
        params.kind.label(),
        params.size,
        params.mass,
        at.x,
        at.y
    );
    world.add_body(body, vec![collider], BodyTag::Shape)
}

/// Ghost shape that follows the pointer and collides with nothing.
pub fn create_preview(world: &mut PhysicsWorld, at: Vec2, params: ShapeParams) -> RigidBodyHandle {
    let params = params.sanitized();
    // Kinematic: moved only by us, never pushed by other bodies
    let body = RigidBodyBuilder::kinematic_position_based()
        .translation(to_na(at))
        .build();
    // Sensor colliders report overlaps but produce no contact forces
    let collider = collider_for(params.kind, params.size).sensor(true).build();
    world.add_body(body, vec![collider], BodyTag::Preview)
}

/// Recover the kind of a shape body from its collider
pub fn kind_of(shape: &dyn Shape) -> Option<ShapeKind> {
    if shape.as_ball().is_some() {
        Some(ShapeKind::Circle)
    } else if shape.as_cuboid().is_some() {
        Some(ShapeKind::Square)
    } else if shape.as_triangle().is_some() {
        Some(ShapeKind::Triangle)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_unknown_is_circle() {
        let kind: ShapeKind = serde_json::from_str("\"hexagon\"").unwrap();
        assert_eq!(kind, ShapeKind::Circle);
        let kind: ShapeKind = serde_json::from_str("\"triangle\"").unwrap();
        assert_eq!(kind, ShapeKind::Triangle);
    }

    #[test]
    fn test_triangle_centroid_at_origin() {
        let [a, b, c] = triangle_vertices(60.0);
        let centroid = (a + b + c) / 3.0;
        assert!(centroid.length() < 1e-4);
    }

    #[test]
    fn test_triangle_is_equilateral() {
        let [a, b, c] = triangle_vertices(42.0);
        for side in [a.distance(b), b.distance(c), c.distance(a)] {
            assert!((side - 42.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_unknown_kind_is_circle() {
        assert_eq!(ShapeKind::from_id("hexagon"), ShapeKind::Circle);
        assert_eq!(ShapeKind::from_id("Square"), ShapeKind::Square);
    }

    #[test]
    fn test_sanitized_params() {
        let p = ShapeParams {
            kind: ShapeKind::Square,
            size: -5.0,
            mass: f32::NAN,
        }
        .sanitized();
        assert_eq!(p.size, MIN_SIZE);
        assert_eq!(p.mass, MIN_MASS);
    }

    #[test]
    fn test_mass_is_applied() {
        let mut world = PhysicsWorld::new(0.0);
        let handle = create_body(
            &mut world,
            Vec2::ZERO,
            ShapeParams {
                kind: ShapeKind::Triangle,
                size: 40.0,
                mass: 7.5,
            },
            &MaterialConfig::default(),
        );
        assert!((world.mass(handle).unwrap() - 7.5).abs() < 1e-3);
    }

    #[test]
    fn test_preview_is_sensor() {
        let mut world = PhysicsWorld::new(0.0);
        let params = ShapeParams {
            kind: ShapeKind::Circle,
            size: 30.0,
            mass: 1.0,
        };
        let handle = create_preview(&mut world, Vec2::new(10.0, 10.0), params);
        let body = world.body(handle).unwrap();
        assert!(body.is_kinematic());
        assert!(world.colliders_of(body).all(|c| c.is_sensor()));
        assert_eq!(world.tag(handle), Some(BodyTag::Preview));
        // Sensors are never picked for dragging
        assert_eq!(world.shape_at(Vec2::new(10.0, 10.0)), None);
    }
}

/*
Drag-and-throw for shapes already in the scene.

A kinematic cursor body follows the pointer and pulls the grabbed shape
along with a stiff zero-length spring attached at the grab point. Letting
go removes the cursor; the shape keeps whatever velocity it had.
*/

use macroquad::math::Vec2;
use rapier2d::prelude::*;

use crate::modules::world::{BodyTag, Entity, PhysicsWorld, from_na, to_na, to_point};

/// Spring stiffness per unit mass (squared angular frequency)
const PULL_STIFFNESS: f32 = 900.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grab {
    body: RigidBodyHandle,
    cursor: RigidBodyHandle,
    joint: ImpulseJointHandle,
}

impl Grab {
    /// Attach to `body` at world point `at`. `None` if the body is gone.
    pub fn begin(world: &mut PhysicsWorld, body: RigidBodyHandle, at: Vec2) -> Option<Self> {
        let local = world
            .body(body)?
            .position()
            .inverse_transform_point(&to_point(at));
        let mass = world.mass(body)?.max(0.01);

        let cursor = world.add_body(
            RigidBodyBuilder::kinematic_position_based()
                .translation(to_na(at))
                .build(),
            Vec::new(),
            BodyTag::Cursor,
        );
        // Critically damped: c = 2 * sqrt(k * m)
        let stiffness = PULL_STIFFNESS * mass;
        let damping = 2.0 * (stiffness * mass).sqrt();
        let spring = SpringJointBuilder::new(0.0, stiffness, damping)
            .local_anchor2(local)
            .build();
        let Some(joint) = world.add_constraint(cursor, body, spring) else {
            world.remove(Entity::Body(cursor));
            return None;
        };
        if let Some(target) = world.body_mut(body) {
            target.wake_up(true);
        }
        log::debug!("Grabbed shape at ({:.0}, {:.0})", at.x, at.y);
        Some(Self {
            body,
            cursor,
            joint,
        })
    }

    pub fn body(&self) -> RigidBodyHandle {
        self.body
    }

    pub fn move_to(&self, world: &mut PhysicsWorld, at: Vec2) {
        world.move_kinematic(self.cursor, at);
        if let Some(target) = world.body_mut(self.body) {
            target.wake_up(true);
        }
    }

    /// Let go. Returns the shape's velocity at release, if it still exists.
    pub fn release(self, world: &mut PhysicsWorld) -> Option<Vec2> {
        world.remove(Entity::Constraint(self.joint));
        world.remove(Entity::Body(self.cursor));
        let velocity = world.body(self.body).map(|b| from_na(b.linvel()));
        if let Some(v) = velocity {
            log::debug!("Threw shape at ({:.0}, {:.0}) px/s", v.x, v.y);
        }
        velocity
    }
}

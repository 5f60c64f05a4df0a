/*
Thin façade over the rapier2d simulation.

Owns every rapier set so the rest of the crate only deals in handles.
Coordinates are screen pixels with +y pointing down, so gravity is a
positive y value.
*/

use macroquad::math::{Rect, Vec2};
use rapier2d::prelude::*;

/// What a body is for. Stored in the body's `user_data`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyTag {
    Surface,
    Anchor,
    Shape,
    Preview,
    Cursor,
}

impl BodyTag {
    fn to_user_data(self) -> u128 {
        match self {
            BodyTag::Surface => 1,
            BodyTag::Anchor => 2,
            BodyTag::Shape => 3,
            BodyTag::Preview => 4,
            BodyTag::Cursor => 5,
        }
    }

    fn from_user_data(data: u128) -> Option<Self> {
        match data {
            1 => Some(BodyTag::Surface),
            2 => Some(BodyTag::Anchor),
            3 => Some(BodyTag::Shape),
            4 => Some(BodyTag::Preview),
            5 => Some(BodyTag::Cursor),
            _ => None,
        }
    }
}

/// Anything that can be taken back out of the world
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Body(RigidBodyHandle),
    Constraint(ImpulseJointHandle),
}

pub fn to_na(v: Vec2) -> Vector<Real> {
    vector![v.x, v.y]
}

pub fn to_point(v: Vec2) -> Point<Real> {
    point![v.x, v.y]
}

pub fn from_na(v: &Vector<Real>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

pub struct PhysicsWorld {
    gravity: Vector<Real>,
    integration_params: IntegrationParameters,
    pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: BroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd: CCDSolver,
    query_pipeline: QueryPipeline,
}

impl PhysicsWorld {
    /// Create an empty world pulling along +y with `gravity_y`.
    pub fn new(gravity_y: f32) -> Self {
        Self {
            gravity: vector![0.0, sanitize_gravity(gravity_y)],
            integration_params: IntegrationParameters::default(),
            pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: BroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    pub fn gravity(&self) -> f32 {
        self.gravity.y
    }

    /// Non-finite values are ignored.
    pub fn set_gravity(&mut self, gravity_y: f32) {
        if gravity_y.is_finite() {
            self.gravity.y = gravity_y;
            // Sleeping bodies would otherwise ignore the change
            for (_, body) in self.bodies.iter_mut() {
                if body.is_dynamic() {
                    body.wake_up(true);
                }
            }
        }
    }

    /// Advance the simulation by `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        if !(dt.is_finite() && dt > 0.0) {
            return;
        }
        self.integration_params.dt = dt;
        self.pipeline.step(
            &self.gravity,              // Gravity vector, +y is down the screen
            &self.integration_params,   // Timestep and solver settings
            &mut self.island_manager,   // Tracks sleeping / awake groups of bodies
            &mut self.broad_phase,      // Coarse pass: which AABBs overlap
            &mut self.narrow_phase,     // Exact contacts for the overlapping pairs
            &mut self.bodies,
            &mut self.colliders,
            &mut self.joints,           // Springs of the elastic surface and the drag cursor
            &mut self.multibody_joints, // Unused, but step() needs one
            &mut self.ccd,              // Continuous collision detection for fast shapes
            Some(&mut self.query_pipeline), // Keep point queries current
            &(),                        // No physics hooks
            &(),                        // No event handler
        );
    }

    /// Insert a body with its colliders, tagging it with `tag`.
    pub fn add_body(
        &mut self,
        mut body: RigidBody,
        colliders: Vec<Collider>,
        tag: BodyTag,
    ) -> RigidBodyHandle {
        body.user_data = tag.to_user_data();
        // Insert the body first, then hang its colliders off the returned handle
        let handle = self.bodies.insert(body);
        for collider in colliders {
            self.colliders
                .insert_with_parent(collider, handle, &mut self.bodies);
        }
        // Point queries before the next step must see the new body
        self.query_pipeline.update(&self.bodies, &self.colliders);
        handle
    }

    /// Link two bodies. Returns `None` if either handle is stale.
    pub fn add_constraint(
        &mut self,
        a: RigidBodyHandle,
        b: RigidBodyHandle,
        joint: impl Into<GenericJoint>,
    ) -> Option<ImpulseJointHandle> {
        if !self.bodies.contains(a) || !self.bodies.contains(b) {
            return None;
        }
        Some(self.joints.insert(a, b, joint, true))
    }

    /// Take an entity out of the world. Removing a body also removes its
    /// colliders and every joint attached to it. Stale handles are ignored.
    pub fn remove(&mut self, entity: Entity) {
        match entity {
            Entity::Body(handle) => {
                self.bodies.remove(
                    handle,
                    &mut self.island_manager,
                    &mut self.colliders,
                    &mut self.joints,
                    &mut self.multibody_joints,
                    true,
                );
                self.query_pipeline.update(&self.bodies, &self.colliders);
            }
            Entity::Constraint(handle) => {
                self.joints.remove(handle, true);
            }
        }
    }

    pub fn contains(&self, entity: Entity) -> bool {
        match entity {
            Entity::Body(handle) => self.bodies.contains(handle),
            Entity::Constraint(handle) => self.joints.contains(handle),
        }
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    /// Number of bodies carrying `tag`
    pub fn count_tagged(&self, tag: BodyTag) -> usize {
        self.bodies
            .iter()
            .filter(|(_, body)| BodyTag::from_user_data(body.user_data) == Some(tag))
            .count()
    }

    pub fn body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle)
    }

    pub fn body_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(handle)
    }

    pub fn tag(&self, handle: RigidBodyHandle) -> Option<BodyTag> {
        self.bodies
            .get(handle)
            .and_then(|body| BodyTag::from_user_data(body.user_data))
    }

    pub fn position(&self, handle: RigidBodyHandle) -> Option<Vec2> {
        self.bodies.get(handle).map(|body| from_na(body.translation()))
    }

    /// Move a kinematic body to `to`.
    pub fn move_kinematic(&mut self, handle: RigidBodyHandle, to: Vec2) {
        if let Some(body) = self.bodies.get_mut(handle) {
            if body.is_kinematic() {
                // Teleport so drawing and bounds are current before the next step
                body.set_translation(to_na(to), true);
                body.set_next_kinematic_translation(to_na(to));
            }
        }
    }

    /// Total mass of a body's colliders
    pub fn mass(&self, handle: RigidBodyHandle) -> Option<f32> {
        let body = self.bodies.get(handle)?;
        Some(self.colliders_of(body).map(|collider| collider.mass()).sum())
    }

    /// Axis-aligned bounds of every collider attached to `handle`
    pub fn bounds_of(&self, handle: RigidBodyHandle) -> Option<Rect> {
        let body = self.bodies.get(handle)?;
        let mut bounds: Option<Aabb> = None;
        for collider_handle in body.colliders() {
            let Some(collider) = self.colliders.get(*collider_handle) else {
                continue;
            };
            // Colliders of freshly moved bodies lag behind until the next
            // step, so compute the box at the body's own pose
            let local = collider
                .position_wrt_parent()
                .copied()
                .unwrap_or_else(Isometry::identity);
            let pose = body.position() * local;
            let aabb = collider.shape().compute_aabb(&pose);
            bounds = Some(match bounds {
                Some(b) => b.merged(&aabb),
                None => aabb,
            });
        }
        bounds.map(|b| {
            Rect::new(
                b.mins.x,
                b.mins.y,
                b.maxs.x - b.mins.x,
                b.maxs.y - b.mins.y,
            )
        })
    }

    /// Topmost body tagged `Shape` whose collider contains `point`.
    pub fn shape_at(&self, point: Vec2) -> Option<RigidBodyHandle> {
        let mut found = None;
        self.query_pipeline.intersections_with_point(
            &self.bodies,
            &self.colliders,
            &to_point(point),
            QueryFilter::default().exclude_sensors(),
            |collider_handle| {
                let parent = self
                    .colliders
                    .get(collider_handle)
                    .and_then(|collider| collider.parent());
                if let Some(parent) = parent {
                    if self.tag(parent) == Some(BodyTag::Shape) {
                        found = Some(parent);
                        return false;
                    }
                }
                true
            },
        );
        found
    }

    /// Every body with its colliders, for drawing
    pub fn iter_bodies(
        &self,
    ) -> impl Iterator<Item = (RigidBodyHandle, &RigidBody, Option<BodyTag>)> + '_ {
        self.bodies
            .iter()
            .map(|(handle, body)| (handle, body, BodyTag::from_user_data(body.user_data)))
    }

    pub fn colliders_of<'a>(&'a self, body: &'a RigidBody) -> impl Iterator<Item = &'a Collider> + 'a {
        body.colliders()
            .iter()
            .filter_map(|handle| self.colliders.get(*handle))
    }

    /// World-space anchor positions of every joint, for drawing springs
    pub fn joint_segments(&self) -> Vec<(Vec2, Vec2)> {
        self.joints
            .iter()
            .filter_map(|(_, joint)| {
                let a = self.bodies.get(joint.body1)?;
                let b = self.bodies.get(joint.body2)?;
                let pa = a.position() * joint.data.local_anchor1();
                let pb = b.position() * joint.data.local_anchor2();
                Some((Vec2::new(pa.x, pa.y), Vec2::new(pb.x, pb.y)))
            })
            .collect()
    }
}

fn sanitize_gravity(gravity_y: f32) -> f32 {
    if gravity_y.is_finite() { gravity_y } else { 0.0 }
}

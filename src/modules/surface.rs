/*
The trampoline itself, in two flavours.

A `Surface` owns every body and joint it puts in the world so it can take
all of them back out again. Callers never hold two surfaces at once:
`rebuild` consumes the old one.
*/

use rapier2d::prelude::*;

use crate::modules::config::{SurfaceConfig, SurfaceVariant};
use crate::modules::view::Viewport;
use crate::modules::world::{BodyTag, Entity, PhysicsWorld};

/// Collision group shared by elastic segments, which ignore each other
const SEGMENT_GROUP: Group = Group::GROUP_2;

const GROUND_RESTITUTION: f32 = 0.2;
const GROUND_FRICTION: f32 = 0.6;
const SEGMENT_DAMPING: f32 = 1.0;

#[derive(Debug)]
pub struct Surface {
    variant: SurfaceVariant,
    bodies: Vec<RigidBodyHandle>,
    joints: Vec<ImpulseJointHandle>,
    ground: Option<RigidBodyHandle>,
    /// y of the trampoline's centre line
    level: f32,
}

impl Surface {
    pub fn build(
        world: &mut PhysicsWorld,
        variant: SurfaceVariant,
        viewport: Viewport,
        cfg: &SurfaceConfig,
    ) -> Self {
        let mut surface = Self {
            variant,
            bodies: Vec::new(),
            joints: Vec::new(),
            ground: None,
            level: viewport.height * cfg.height_fraction,
        };
        match variant {
            SurfaceVariant::Rigid => surface.build_rigid(world, viewport, cfg),
            SurfaceVariant::Elastic => surface.build_elastic(world, viewport, cfg),
        }
        surface.build_ground(world, viewport, cfg);
        log::debug!(
            "Built {} surface: {} bodies, {} joints",
            variant.label(),
            surface.bodies.len(),
            surface.joints.len()
        );
        surface
    }

    /// Tear this surface down completely, then build a fresh one.
    pub fn rebuild(
        self,
        world: &mut PhysicsWorld,
        variant: SurfaceVariant,
        viewport: Viewport,
        cfg: &SurfaceConfig,
    ) -> Self {
        self.destroy(world);
        Self::build(world, variant, viewport, cfg)
    }

    pub fn destroy(self, world: &mut PhysicsWorld) {
        for joint in self.joints {
            world.remove(Entity::Constraint(joint));
        }
        for body in self.bodies {
            world.remove(Entity::Body(body));
        }
    }

    pub fn variant(&self) -> SurfaceVariant {
        self.variant
    }

    pub fn bodies(&self) -> &[RigidBodyHandle] {
        &self.bodies
    }

    pub fn joints(&self) -> &[ImpulseJointHandle] {
        &self.joints
    }

    /// The catch-all floor under the trampoline
    pub fn ground(&self) -> Option<RigidBodyHandle> {
        self.ground
    }

    /// True while every piece of this surface is still in `world`
    pub fn is_present(&self, world: &PhysicsWorld) -> bool {
        self.bodies
            .iter()
            .all(|handle| world.contains(Entity::Body(*handle)))
            && self
                .joints
                .iter()
                .all(|handle| world.contains(Entity::Constraint(*handle)))
    }

    fn build_rigid(&mut self, world: &mut PhysicsWorld, viewport: Viewport, cfg: &SurfaceConfig) {
        let half_width = viewport.width * cfg.rigid_width_fraction / 2.0;
        // Fixed body: never moves, centred across the canvas at the trampoline line
        let body = RigidBodyBuilder::fixed()
            .translation(vector![viewport.width / 2.0, self.level])
            .build();
        // restitution above 1 adds energy on every bounce; Max makes sure the
        // slab's value wins over whatever the shape has
        let collider = ColliderBuilder::cuboid(half_width, cfg.thickness / 2.0)
            .restitution(cfg.restitution)
            .restitution_combine_rule(CoefficientCombineRule::Max)
            .friction(cfg.friction)
            .build();
        self.bodies
            .push(world.add_body(body, vec![collider], BodyTag::Surface));
    }

    fn build_elastic(&mut self, world: &mut PhysicsWorld, viewport: Viewport, cfg: &SurfaceConfig) {
        let span = viewport.width * cfg.elastic_width_fraction;
        let left = (viewport.width - span) / 2.0;
        let spacing = span / cfg.segments as f32;

        let segments: Vec<RigidBodyHandle> = (0..cfg.segments)
            .map(|i| {
                let x = left + spacing * (i as f32 + 0.5);
                // Dynamic so the chain can sag and spring back; damping bleeds off wobble
                let body = RigidBodyBuilder::dynamic()
                    .translation(vector![x, self.level])
                    .linear_damping(SEGMENT_DAMPING)
                    .build();
                // Slightly narrower than the spacing so neighbours never overlap.
                // Segments sit in their own group and only collide with everything else
                let collider = ColliderBuilder::cuboid(spacing * 0.45, cfg.thickness / 2.0)
                    .mass(cfg.segment_mass)
                    .restitution(cfg.restitution)
                    .restitution_combine_rule(CoefficientCombineRule::Max)
                    .friction(cfg.friction)
                    .collision_groups(InteractionGroups::new(
                        SEGMENT_GROUP,
                        Group::ALL.difference(SEGMENT_GROUP),
                    ))
                    .build();
                world.add_body(body, vec![collider], BodyTag::Surface)
            })
            .collect();

        for pair in segments.windows(2) {
            let link = segment_link(spacing, cfg.spring_stiffness, cfg.spring_damping);
            if let Some(joint) = world.add_constraint(pair[0], pair[1], link) {
                self.joints.push(joint);
            }
        }

        // Pin both ends to fixed points just outside the chain
        let ends = [
            (left, segments.first()),
            (left + span, segments.last()),
        ];
        for (x, segment) in ends {
            // Anchors have no collider; they only hold one end of a spring
            let anchor = world.add_body(
                RigidBodyBuilder::fixed()
                    .translation(vector![x, self.level])
                    .build(),
                Vec::new(),
                BodyTag::Anchor,
            );
            self.bodies.push(anchor);
            if let Some(segment) = segment {
                // SpringJointBuilder::new(rest length, stiffness, damping)
                let spring = SpringJointBuilder::new(
                    spacing / 2.0,
                    cfg.anchor_stiffness,
                    cfg.anchor_damping,
                )
                .build();
                if let Some(joint) = world.add_constraint(anchor, *segment, spring) {
                    self.joints.push(joint);
                }
            }
        }

        self.bodies.extend(segments);
    }

    /// Full-width floor catching anything that misses the trampoline
    fn build_ground(&mut self, world: &mut PhysicsWorld, viewport: Viewport, cfg: &SurfaceConfig) {
        // Sits flush with the bottom edge of the canvas
        let body = RigidBodyBuilder::fixed()
            .translation(vector![
                viewport.width / 2.0,
                viewport.height - cfg.ground_thickness / 2.0
            ])
            .build();
        let collider = ColliderBuilder::cuboid(viewport.width / 2.0, cfg.ground_thickness / 2.0)
            .restitution(GROUND_RESTITUTION)
            .friction(GROUND_FRICTION)
            .build();
        let ground = world.add_body(body, vec![collider], BodyTag::Surface);
        self.ground = Some(ground);
        self.bodies.push(ground);
    }
}

/// Spring between two neighbouring segments.
///
/// Two force-based position motors hold the second segment `spacing` to the
/// right of the first. Nothing is locked, so the link stretches and bends
/// like a spring. A `SpringJoint` between two dynamic bodies trips an index
/// panic in the rapier 0.18 solver; motors on separate axes do not.
fn segment_link(spacing: f32, stiffness: f32, damping: f32) -> GenericJoint {
    GenericJointBuilder::new(JointAxesMask::empty())
        .motor_position(JointAxis::X, spacing, stiffness, damping)
        .motor_model(JointAxis::X, MotorModel::ForceBased)
        .motor_position(JointAxis::Y, 0.0, stiffness, damping)
        .motor_model(JointAxis::Y, MotorModel::ForceBased)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(800.0, 600.0)
    }

    #[test]
    fn test_rigid_has_slab_and_ground() {
        let mut world = PhysicsWorld::new(980.0);
        let cfg = SurfaceConfig::default();
        let surface = Surface::build(&mut world, SurfaceVariant::Rigid, viewport(), &cfg);
        assert_eq!(surface.bodies().len(), 2);
        assert!(surface.joints().is_empty());
        assert_eq!(world.count_tagged(BodyTag::Surface), 2);

        let slab = world.bounds_of(surface.bodies()[0]).unwrap();
        assert!((slab.w - 800.0 * cfg.rigid_width_fraction).abs() < 1e-3);
    }

    #[test]
    fn test_elastic_chain_layout() {
        let mut world = PhysicsWorld::new(980.0);
        let cfg = SurfaceConfig::default();
        let surface = Surface::build(&mut world, SurfaceVariant::Elastic, viewport(), &cfg);
        // segments + 2 anchors + ground
        assert_eq!(surface.bodies().len(), cfg.segments + 3);
        assert_eq!(world.count_tagged(BodyTag::Anchor), 2);
        // neighbour springs + 2 anchor springs
        assert_eq!(surface.joints().len(), cfg.segments - 1 + 2);
        assert_eq!(world.joint_count(), surface.joints().len());
    }

    #[test]
    fn test_elastic_chain_holds_under_gravity() {
        let mut world = PhysicsWorld::new(980.0);
        let cfg = SurfaceConfig::default();
        let surface = Surface::build(&mut world, SurfaceVariant::Elastic, viewport(), &cfg);
        for _ in 0..240 {
            world.step(1.0 / 60.0);
        }
        let lowest = surface
            .bodies()
            .iter()
            .filter(|h| world.tag(**h) == Some(BodyTag::Surface))
            .filter_map(|h| world.body(*h))
            .filter(|b| b.is_dynamic())
            .map(|b| b.translation().y)
            .fold(f32::MIN, f32::max);
        // Sags but never reaches the ground
        assert!(lowest < 600.0 - cfg.ground_thickness);
    }

    #[test]
    fn test_segment_link_between_dynamic_bodies() {
        let mut world = PhysicsWorld::new(0.0);
        let box_at = |world: &mut PhysicsWorld, x: f32| {
            world.add_body(
                RigidBodyBuilder::dynamic().translation(vector![x, 100.0]).build(),
                vec![ColliderBuilder::cuboid(10.0, 5.0).mass(0.5).build()],
                BodyTag::Surface,
            )
        };
        let a = box_at(&mut world, 100.0);
        // Starts stretched to twice the rest spacing
        let b = box_at(&mut world, 180.0);
        world
            .add_constraint(a, b, segment_link(40.0, 20_000.0, 100.0))
            .unwrap();
        for _ in 0..120 {
            world.step(1.0 / 60.0);
        }
        let gap = world.position(b).unwrap() - world.position(a).unwrap();
        assert!((gap.x - 40.0).abs() < 2.0);
        assert!(gap.y.abs() < 2.0);
    }

    #[test]
    fn test_destroy_leaves_nothing() {
        let mut world = PhysicsWorld::new(980.0);
        let cfg = SurfaceConfig::default();
        let surface = Surface::build(&mut world, SurfaceVariant::Elastic, viewport(), &cfg);
        surface.destroy(&mut world);
        assert_eq!(world.body_count(), 0);
        assert_eq!(world.joint_count(), 0);
    }

    #[test]
    fn test_rebuild_swaps_variant() {
        let mut world = PhysicsWorld::new(980.0);
        let cfg = SurfaceConfig::default();
        let old = Surface::build(&mut world, SurfaceVariant::Elastic, viewport(), &cfg);
        let old_bodies = old.bodies().to_vec();
        let new = old.rebuild(&mut world, SurfaceVariant::Rigid, viewport(), &cfg);
        assert!(new.is_present(&world));
        assert!(old_bodies.iter().all(|h| !world.contains(Entity::Body(*h))));
        assert_eq!(world.body_count(), 2);
        assert_eq!(world.joint_count(), 0);
    }
}

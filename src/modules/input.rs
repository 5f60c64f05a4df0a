/*
Pointer state machine.

Idle --Down(p) on a shape--> Dragging --Up/Cancel--> Idle (throw)
Idle --Down(p) elsewhere---> Placing  --Up--------> Idle (commit)
                                      --Cancel----> Idle (discard)

Events arrive in world coordinates; the controller knows nothing about
the windowing layer. Control values are passed in with every event and
read when they are needed, never cached.
*/

use macroquad::math::Vec2;
use rapier2d::prelude::RigidBodyHandle;

use crate::modules::config::{MaterialConfig, PlacementMode};
use crate::modules::drag::Grab;
use crate::modules::shapes::{self, ShapeKind, ShapeParams};
use crate::modules::view::Viewport;
use crate::modules::world::{Entity, PhysicsWorld};

/// Top band of the canvas where dropped shapes appear, as a fraction of height
const DROP_BAND: f32 = 0.12;

/// Pointer or touch input in world coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Vec2),
    Move(Vec2),
    Up,
    /// Right click / context menu / touch cancel
    Cancel,
}

/// Current values of the UI controls
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Controls {
    pub shape: ShapeKind,
    pub mass: f32,
    pub size: f32,
}

impl Controls {
    pub fn params(&self) -> ShapeParams {
        ShapeParams {
            kind: self.shape,
            size: self.size,
            mass: self.mass,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PointerState {
    #[default]
    Idle,
    Placing {
        preview: RigidBodyHandle,
        /// Params the preview was built with
        shown: ShapeParams,
        at: Vec2,
    },
    Dragging {
        grab: Grab,
    },
}

/// What a single event did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    Ignored,
    PreviewShown(RigidBodyHandle),
    PreviewMoved,
    Committed(RigidBodyHandle),
    Cancelled,
    DragStarted(RigidBodyHandle),
    Dragged,
    Thrown(RigidBodyHandle),
}

#[derive(Debug, Default)]
pub struct Controller {
    state: PointerState,
    mode: PlacementMode,
}

impl Controller {
    pub fn new(mode: PlacementMode) -> Self {
        Self {
            state: PointerState::Idle,
            mode,
        }
    }

    pub fn mode(&self) -> PlacementMode {
        self.mode
    }

    /// Switching modes abandons any gesture in progress.
    pub fn set_mode(&mut self, world: &mut PhysicsWorld, mode: PlacementMode) {
        if mode != self.mode {
            self.reset(world);
            self.mode = mode;
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, PointerState::Idle)
    }

    /// Live preview body, if placing
    pub fn preview(&self) -> Option<RigidBodyHandle> {
        match self.state {
            PointerState::Placing { preview, .. } => Some(preview),
            _ => None,
        }
    }

    pub fn handle(
        &mut self,
        world: &mut PhysicsWorld,
        event: PointerEvent,
        controls: &Controls,
        material: &MaterialConfig,
    ) -> Outcome {
        let state = std::mem::take(&mut self.state);
        let (next, outcome) = match (state, event) {
            (PointerState::Idle, PointerEvent::Down(at)) => match world.shape_at(at) {
                Some(body) => match Grab::begin(world, body, at) {
                    Some(grab) => (PointerState::Dragging { grab }, Outcome::DragStarted(body)),
                    None => (PointerState::Idle, Outcome::Ignored),
                },
                None if self.mode == PlacementMode::Drop => (PointerState::Idle, Outcome::Ignored),
                None => {
                    let shown = controls.params();
                    let preview = shapes::create_preview(world, at, shown);
                    (
                        PointerState::Placing { preview, shown, at },
                        Outcome::PreviewShown(preview),
                    )
                }
            },

            (PointerState::Placing { preview, shown, .. }, PointerEvent::Move(at)) => {
                let wanted = controls.params();
                let preview = if wanted == shown {
                    world.move_kinematic(preview, at);
                    preview
                } else {
                    // Slider or shape changed mid-drag; swap the ghost
                    world.remove(Entity::Body(preview));
                    shapes::create_preview(world, at, wanted)
                };
                (
                    PointerState::Placing {
                        preview,
                        shown: wanted,
                        at,
                    },
                    Outcome::PreviewMoved,
                )
            }

            (PointerState::Placing { preview, at, .. }, PointerEvent::Up) => {
                world.remove(Entity::Body(preview));
                let body = shapes::create_body(world, at, controls.params(), material);
                (PointerState::Idle, Outcome::Committed(body))
            }

            (PointerState::Placing { preview, .. }, PointerEvent::Cancel) => {
                world.remove(Entity::Body(preview));
                log::debug!("Placement cancelled");
                (PointerState::Idle, Outcome::Cancelled)
            }

            (PointerState::Dragging { grab }, PointerEvent::Move(at)) => {
                grab.move_to(world, at);
                (PointerState::Dragging { grab }, Outcome::Dragged)
            }

            (PointerState::Dragging { grab }, PointerEvent::Up | PointerEvent::Cancel) => {
                let body = grab.body();
                grab.release(world);
                (PointerState::Idle, Outcome::Thrown(body))
            }

            (state, _) => (state, Outcome::Ignored),
        };
        self.state = next;
        outcome
    }

    /// Simple mode: drop a shape straight away at a random x near the top.
    pub fn drop_shape(
        &self,
        world: &mut PhysicsWorld,
        viewport: Viewport,
        controls: &Controls,
        material: &MaterialConfig,
        roll: f32,
    ) -> RigidBodyHandle {
        let params = controls.params().sanitized();
        let half = params.size / 2.0;
        let span = (viewport.width - params.size).max(0.0);
        let x = half + span * roll.clamp(0.0, 1.0);
        let y = (viewport.height * DROP_BAND).max(half);
        shapes::create_body(world, Vec2::new(x, y), params, material)
    }

    /// Drop any preview or grab without committing anything.
    pub fn reset(&mut self, world: &mut PhysicsWorld) {
        match std::mem::take(&mut self.state) {
            PointerState::Idle => {}
            PointerState::Placing { preview, .. } => world.remove(Entity::Body(preview)),
            PointerState::Dragging { grab } => {
                grab.release(world);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::world::BodyTag;

    fn controls() -> Controls {
        Controls {
            shape: ShapeKind::Circle,
            mass: 5.0,
            size: 50.0,
        }
    }

    #[test]
    fn test_move_while_idle_is_ignored() {
        let mut world = PhysicsWorld::new(0.0);
        let mut controller = Controller::new(PlacementMode::Preview);
        let m = MaterialConfig::default();
        let out = controller.handle(&mut world, PointerEvent::Move(Vec2::ONE), &controls(), &m);
        assert_eq!(out, Outcome::Ignored);
        assert_eq!(
            controller.handle(&mut world, PointerEvent::Up, &controls(), &m),
            Outcome::Ignored
        );
        assert!(controller.is_idle());
        assert_eq!(world.body_count(), 0);
    }

    #[test]
    fn test_second_down_keeps_single_preview() {
        let mut world = PhysicsWorld::new(0.0);
        let mut controller = Controller::new(PlacementMode::Preview);
        let m = MaterialConfig::default();
        controller.handle(&mut world, PointerEvent::Down(Vec2::new(10.0, 10.0)), &controls(), &m);
        controller.handle(&mut world, PointerEvent::Down(Vec2::new(90.0, 10.0)), &controls(), &m);
        assert_eq!(world.count_tagged(BodyTag::Preview), 1);
    }

    #[test]
    fn test_changed_size_swaps_preview() {
        let mut world = PhysicsWorld::new(0.0);
        let mut controller = Controller::new(PlacementMode::Preview);
        let m = MaterialConfig::default();
        let mut c = controls();
        controller.handle(&mut world, PointerEvent::Down(Vec2::new(100.0, 100.0)), &c, &m);
        let first = controller.preview().unwrap();
        c.size = 90.0;
        controller.handle(&mut world, PointerEvent::Move(Vec2::new(120.0, 100.0)), &c, &m);
        let second = controller.preview().unwrap();
        assert_ne!(first, second);
        assert_eq!(world.count_tagged(BodyTag::Preview), 1);
        let bounds = world.bounds_of(second).unwrap();
        assert!((bounds.w - 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_down_on_shape_drags() {
        let mut world = PhysicsWorld::new(0.0);
        let mut controller = Controller::new(PlacementMode::Preview);
        let m = MaterialConfig::default();
        let body = shapes::create_body(&mut world, Vec2::new(50.0, 50.0), controls().params(), &m);
        let out = controller.handle(&mut world, PointerEvent::Down(Vec2::new(50.0, 50.0)), &controls(), &m);
        assert_eq!(out, Outcome::DragStarted(body));
        assert!(controller.preview().is_none());
        let out = controller.handle(&mut world, PointerEvent::Cancel, &controls(), &m);
        assert_eq!(out, Outcome::Thrown(body));
        assert_eq!(world.body_count(), 1);
    }

    #[test]
    fn test_drop_mode_ignores_empty_press() {
        let mut world = PhysicsWorld::new(0.0);
        let mut controller = Controller::new(PlacementMode::Preview);
        let m = MaterialConfig::default();
        controller.handle(&mut world, PointerEvent::Down(Vec2::ZERO), &controls(), &m);
        controller.set_mode(&mut world, PlacementMode::Drop);
        assert!(controller.is_idle());
        assert_eq!(world.body_count(), 0);

        let out = controller.handle(&mut world, PointerEvent::Down(Vec2::ZERO), &controls(), &m);
        assert_eq!(out, Outcome::Ignored);
        assert_eq!(world.body_count(), 0);
    }

    #[test]
    fn test_drop_shape_lands_near_top() {
        let mut world = PhysicsWorld::new(0.0);
        let controller = Controller::new(PlacementMode::Preview);
        let vp = Viewport::new(800.0, 600.0);
        let m = MaterialConfig::default();
        for roll in [0.0, 0.5, 1.0] {
            let body = controller.drop_shape(&mut world, vp, &controls(), &m, roll);
            let b = world.bounds_of(body).unwrap();
            assert!(b.x >= -1e-3 && b.x + b.w <= 800.0 + 1e-3);
            assert!(b.y + b.h < 600.0 * 0.5);
        }
        assert!(controller.is_idle());
    }

    #[test]
    fn test_reset_discards_preview() {
        let mut world = PhysicsWorld::new(0.0);
        let mut controller = Controller::new(PlacementMode::Preview);
        let m = MaterialConfig::default();
        controller.handle(&mut world, PointerEvent::Down(Vec2::ZERO), &controls(), &m);
        controller.reset(&mut world);
        assert!(controller.is_idle());
        assert_eq!(world.body_count(), 0);
    }
}

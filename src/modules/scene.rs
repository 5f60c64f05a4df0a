/*
The scene context: one physics world, one surface, one pointer controller.

Everything the frame loop touches goes through here, so the whole toy can
run headless in tests.
*/

use macroquad::math::Rect;
use rapier2d::prelude::RigidBodyHandle;

use crate::modules::config::{PlacementMode, SceneConfig, SurfaceVariant};
use crate::modules::input::{Controller, Controls, Outcome, PointerEvent};
use crate::modules::planet::{Background, Planet};
use crate::modules::surface::Surface;
use crate::modules::view::{View, Viewport};
use crate::modules::world::PhysicsWorld;

pub struct Scene {
    config: SceneConfig,
    world: PhysicsWorld,
    planet: Planet,
    background: Background,
    surface: Option<Surface>,
    variant: SurfaceVariant,
    controller: Controller,
    shapes: Vec<RigidBodyHandle>,
    viewport: Viewport,
    view: View,
    accumulator: f32,
}

impl Scene {
    pub fn new(config: SceneConfig, viewport: Viewport) -> Self {
        let config = config.validated();
        let planet = config.planet;
        let variant = config.surface.variant;
        let placement = config.placement;
        let mut world = PhysicsWorld::new(planet.gravity(config.gravity_px));
        let surface = Surface::build(&mut world, variant, viewport, &config.surface);
        log::info!(
            "Scene {}x{} on {} with {} trampoline",
            viewport.width,
            viewport.height,
            planet.label(),
            variant.label()
        );
        Self {
            config,
            world,
            planet,
            background: planet.background(),
            surface: Some(surface),
            variant,
            controller: Controller::new(placement),
            shapes: Vec::new(),
            viewport,
            view: View::new(viewport),
            accumulator: 0.0,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn planet(&self) -> Planet {
        self.planet
    }

    pub fn background(&self) -> Background {
        self.background
    }

    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    pub fn surface_variant(&self) -> SurfaceVariant {
        self.variant
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Every committed shape, oldest first
    pub fn shapes(&self) -> &[RigidBodyHandle] {
        &self.shapes
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn view(&self) -> View {
        self.view
    }

    /// Advance physics by `frame_dt` seconds in fixed steps.
    pub fn tick(&mut self, frame_dt: f32) {
        let step = self.config.timestep;
        if !frame_dt.is_finite() || frame_dt <= 0.0 {
            return;
        }
        // Long stalls (tab in background) are dropped, not replayed
        self.accumulator += frame_dt.min(step * self.config.max_substeps as f32);

        let mut substeps = 0;
        while self.accumulator >= step && substeps < self.config.max_substeps {
            self.world.step(step);
            self.accumulator -= step;
            substeps += 1;
        }
    }

    /// New canvas size: rebuild the surface and re-fit the view.
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport == self.viewport {
            return;
        }
        log::debug!("Resize to {}x{}", viewport.width, viewport.height);
        self.viewport = viewport;
        self.rebuild_surface();
        self.refit_view();
    }

    /// Switch gravity and background together, then rebuild the surface.
    pub fn select_planet(&mut self, planet: Planet) {
        if planet == self.planet {
            return;
        }
        log::info!("Planet: {}", planet.label());
        self.planet = planet;
        self.world.set_gravity(planet.gravity(self.config.gravity_px));
        self.background = planet.background();
        self.rebuild_surface();
    }

    pub fn set_surface_variant(&mut self, variant: SurfaceVariant) {
        if variant == self.variant {
            return;
        }
        self.variant = variant;
        self.rebuild_surface();
    }

    pub fn placement_mode(&self) -> PlacementMode {
        self.controller.mode()
    }

    pub fn set_placement_mode(&mut self, mode: PlacementMode) {
        self.controller.set_mode(&mut self.world, mode);
    }

    /// Route one pointer event through the controller.
    pub fn pointer(&mut self, event: PointerEvent, controls: &Controls) -> Outcome {
        let outcome = self
            .controller
            .handle(&mut self.world, event, controls, &self.config.material);
        if let Outcome::Committed(body) = outcome {
            self.shapes.push(body);
        }
        outcome
    }

    /// Drop mode: commit a shape at a random x near the top.
    pub fn drop_shape(&mut self, controls: &Controls) -> RigidBodyHandle {
        let roll = macroquad::rand::gen_range(0.0, 1.0);
        self.drop_shape_at(controls, roll)
    }

    /// Drop mode with the horizontal position given as a 0..1 fraction
    pub fn drop_shape_at(&mut self, controls: &Controls, roll: f32) -> RigidBodyHandle {
        let body = self.controller.drop_shape(
            &mut self.world,
            self.viewport,
            controls,
            &self.config.material,
            roll,
        );
        self.shapes.push(body);
        body
    }

    /// Fit the view around the canvas and every shape.
    pub fn refit_view(&mut self) {
        let bounds: Vec<Rect> = self
            .shapes
            .iter()
            .filter_map(|handle| self.world.bounds_of(*handle))
            .collect();
        self.view = View::fit(self.viewport, bounds);
    }

    fn rebuild_surface(&mut self) {
        let surface = match self.surface.take() {
            Some(old) => old.rebuild(
                &mut self.world,
                self.variant,
                self.viewport,
                &self.config.surface,
            ),
            None => Surface::build(
                &mut self.world,
                self.variant,
                self.viewport,
                &self.config.surface,
            ),
        };
        self.surface = Some(surface);
    }
}

/*
Control strip across the top of the window.

Row one: planet selector, shape selector, drop / mode / surface buttons.
Row two: mass and size sliders.
*/

use macroquad::prelude::*;

use crate::modules::config::{PlacementMode, SceneConfig, SurfaceVariant};
use crate::modules::input::Controls;
use crate::modules::planet::Planet;
use crate::modules::shapes::ShapeKind;
use crate::modules::slider::Slider;
use crate::modules::text_button::TextButton;

const PAD: f32 = 8.0;
const BUTTON_W: f32 = 84.0;
const BUTTON_H: f32 = 32.0;
const FONT: u16 = 20;
const SLIDER_W: f32 = 220.0;
const PANEL_COLOR: Color = Color::new(0.12, 0.13, 0.17, 1.0);
const BUTTON_COLOR: Color = Color::new(0.24, 0.26, 0.32, 1.0);
const ACTIVE_COLOR: Color = Color::new(0.2, 0.5, 0.85, 1.0);

/// What the user asked for this frame besides slider moves
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PanelActions {
    pub planet: Option<Planet>,
    pub drop: bool,
    pub toggle_mode: bool,
    pub toggle_surface: bool,
}

pub struct ControlPanel {
    height: f32,
    planet: Planet,
    shape: ShapeKind,
    planet_buttons: Vec<(Planet, TextButton)>,
    shape_buttons: Vec<(ShapeKind, TextButton)>,
    drop_button: TextButton,
    mode_button: TextButton,
    surface_button: TextButton,
    mass: Slider,
    size: Slider,
}

impl ControlPanel {
    pub fn new(config: &SceneConfig) -> Self {
        let row = PAD;
        let mut x = PAD;
        let mut next_button = |label: &str| {
            let button = TextButton::new(x, row, BUTTON_W, BUTTON_H, label, BUTTON_COLOR, ACTIVE_COLOR, FONT);
            x += BUTTON_W + PAD;
            button
        };

        let planet_buttons = Planet::ALL
            .iter()
            .map(|p| (*p, next_button(p.label())))
            .collect();
        let shape_buttons = ShapeKind::ALL
            .iter()
            .map(|s| (*s, next_button(s.label())))
            .collect();
        let drop_button = next_button("Drop");
        let mode_button = next_button(mode_label(config.placement));
        let surface_button = next_button(config.surface.variant.label());

        let slider_y = row + BUTTON_H + PAD * 3.5;
        let mass = Slider::new(
            "Mass",
            Rect::new(PAD * 2.0, slider_y, SLIDER_W, 8.0),
            config.mass,
        );
        let size = Slider::new(
            "Size",
            Rect::new(PAD * 6.0 + SLIDER_W, slider_y, SLIDER_W, 8.0),
            config.size,
        );

        let mut panel = Self {
            height: config.ui_chrome_height,
            planet: config.planet,
            shape: config.shape,
            planet_buttons,
            shape_buttons,
            drop_button,
            mode_button,
            surface_button,
            mass,
            size,
        };
        panel.sync_selection();
        panel
    }

    /// Pointer is over the strip
    pub fn contains(&self, point: Vec2) -> bool {
        point.y < self.height
    }

    /// Current values, read fresh every time
    pub fn controls(&self) -> Controls {
        Controls {
            shape: self.shape,
            mass: self.mass.value(),
            size: self.size.value(),
        }
    }

    /// Labels that depend on scene state
    pub fn sync_labels(&mut self, mode: PlacementMode, variant: SurfaceVariant) {
        self.mode_button.set_text(mode_label(mode));
        self.surface_button.set_text(variant.label());
        self.drop_button.set_selected(mode == PlacementMode::Drop);
    }

    /// Draw the strip and process clicks on it.
    pub fn update(&mut self) -> PanelActions {
        let mut actions = PanelActions::default();
        draw_rectangle(0.0, 0.0, screen_width(), self.height, PANEL_COLOR);

        for (planet, button) in &self.planet_buttons {
            if button.click() && *planet != self.planet {
                actions.planet = Some(*planet);
            }
        }
        if let Some(planet) = actions.planet {
            self.planet = planet;
        }

        let mut picked = None;
        for (shape, button) in &self.shape_buttons {
            if button.click() {
                picked = Some(*shape);
            }
        }
        if let Some(shape) = picked {
            self.shape = shape;
        }
        self.sync_selection();

        actions.drop = self.drop_button.click();
        actions.toggle_mode = self.mode_button.click();
        actions.toggle_surface = self.surface_button.click();

        let mouse = Vec2::from(mouse_position());
        let pressed = is_mouse_button_pressed(MouseButton::Left);
        let down = is_mouse_button_down(MouseButton::Left);
        self.mass.update(mouse, pressed, down);
        self.size.update(mouse, pressed, down);
        self.mass.draw(WHITE);
        self.size.draw(WHITE);
        actions
    }

    /// One button lit per group
    fn sync_selection(&mut self) {
        for (planet, button) in &mut self.planet_buttons {
            button.set_selected(*planet == self.planet);
        }
        for (shape, button) in &mut self.shape_buttons {
            button.set_selected(*shape == self.shape);
        }
    }
}

fn mode_label(mode: PlacementMode) -> &'static str {
    match mode {
        PlacementMode::Preview => "Place",
        PlacementMode::Drop => "Drop only",
    }
}

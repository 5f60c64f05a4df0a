/*
Program Details: <Trampoline: drop circles, squares and triangles onto a
bouncy surface under Earth, Moon or Jupiter gravity>
*/

use macroquad::miniquad::date;
use macroquad::prelude::*;

use trampoline::modules::config::{PlacementMode, SceneConfig};
use trampoline::modules::input::PointerEvent;
use trampoline::modules::pointer::{PointerFrame, PointerTracker, ScreenEvent};
use trampoline::modules::render::{draw_hud, draw_scene};
use trampoline::modules::scene::Scene;
use trampoline::modules::ui::ControlPanel;
use trampoline::modules::view::Viewport;

/// Set up window settings before the app runs
fn window_conf() -> Conf {
    Conf {
        window_title: "trampoline".to_string(),
        window_width: 1024,
        window_height: 768,
        fullscreen: false,
        // Logical pixels everywhere; the canvas math assumes 1:1
        high_dpi: false,
        window_resizable: true,
        sample_count: 4, // MSAA
        ..Default::default()
    }
}

/// Sample this frame's mouse and touch state
fn pointer_frame(panel: &ControlPanel) -> PointerFrame {
    let position = Vec2::from(mouse_position());
    PointerFrame {
        position,
        left_pressed: is_mouse_button_pressed(MouseButton::Left),
        left_down: is_mouse_button_down(MouseButton::Left),
        left_released: is_mouse_button_released(MouseButton::Left),
        right_pressed: is_mouse_button_pressed(MouseButton::Right),
        touch_cancelled: touches()
            .iter()
            .any(|t| t.phase == TouchPhase::Cancelled),
        over_ui: panel.contains(position),
    }
}

/// Screen position to world position through the scene's current view
fn to_world(scene: &Scene, chrome: f32, p: Vec2) -> Vec2 {
    scene
        .view()
        .canvas_to_world(scene.viewport(), vec2(p.x, p.y - chrome))
}

#[macroquad::main(window_conf)]
async fn main() {
    #[cfg(all(feature = "native", not(target_arch = "wasm32")))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    // No env_logger in the browser; route records to the JS console
    #[cfg(target_arch = "wasm32")]
    trampoline::modules::console::init();

    let config = SceneConfig::load_or_default();
    let chrome = config.ui_chrome_height;
    let mut panel = ControlPanel::new(&config);
    let mut scene = Scene::new(
        config,
        Viewport::from_window(screen_width(), screen_height(), chrome),
    );
    let mut tracker = PointerTracker::new();

    rand::srand(date::now() as u64);

    loop {
        // Canvas follows the window; resize() is a no-op when unchanged
        scene.resize(Viewport::from_window(screen_width(), screen_height(), chrome));

        clear_background(BLACK);
        draw_scene(&scene, chrome);
        draw_hud(&scene, chrome, get_fps());

        // ---- Controls ----
        panel.sync_labels(scene.placement_mode(), scene.surface_variant());
        let actions = panel.update();
        if let Some(planet) = actions.planet {
            scene.select_planet(planet);
        }
        if actions.toggle_surface {
            scene.set_surface_variant(scene.surface_variant().toggled());
        }
        if actions.toggle_mode {
            let mode = match scene.placement_mode() {
                PlacementMode::Preview => PlacementMode::Drop,
                PlacementMode::Drop => PlacementMode::Preview,
            };
            scene.set_placement_mode(mode);
        }
        if actions.drop {
            scene.drop_shape(&panel.controls());
        }

        // ---- Pointer ----
        for event in tracker.translate(pointer_frame(&panel)) {
            let event = match event {
                ScreenEvent::Down(p) => PointerEvent::Down(to_world(&scene, chrome, p)),
                ScreenEvent::Move(p) => PointerEvent::Move(to_world(&scene, chrome, p)),
                ScreenEvent::Up => PointerEvent::Up,
                ScreenEvent::Cancel => PointerEvent::Cancel,
            };
            // Controls are read now so mid-gesture slider changes apply
            scene.pointer(event, &panel.controls());
        }

        // ---- Physics ----
        scene.tick(get_frame_time());

        next_frame().await;
    }
}

/*
Trampoline - drop circles, squares and triangles onto a bouncy surface

Core modules (all under `modules`):
- `planet`: gravity and background presets
- `config`: tunables, loaded from JSON on native builds
- `console`: log backend for the browser build
- `world`: thin wrapper around the rapier2d simulation
- `surface`: rigid or elastic trampoline construction
- `shapes`: body factory for the three shape kinds
- `input` / `drag`: pointer state machine and drag-and-throw
- `view`: canvas sizing and camera fitting
- `scene`: the context object tying it all together
- `ui` / `render`: macroquad controls and drawing
*/

pub mod modules;

pub use modules::config::{PlacementMode, SceneConfig, SurfaceVariant};
pub use modules::input::{Controls, PointerEvent};
pub use modules::planet::Planet;
pub use modules::scene::Scene;
pub use modules::shapes::ShapeKind;

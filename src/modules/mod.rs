pub mod config;
pub mod console;
pub mod drag;
pub mod input;
pub mod planet;
pub mod pointer;
pub mod render;
pub mod scene;
pub mod shapes;
pub mod surface;
pub mod text_button;
pub mod slider;
pub mod ui;
pub mod view;
pub mod world;

pub mod renderer;

pub use renderer::{Button, ControlPad, Renderer, ScreenLayout};

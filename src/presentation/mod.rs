pub mod input;
pub mod ui;

pub use input::InputHandler;
pub use ui::render_ui;

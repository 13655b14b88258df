//! Drawing helpers shared by the screens.

pub mod camera;
pub mod details;
pub mod shapes;

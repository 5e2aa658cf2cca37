pub mod canvas;
pub mod drag;
pub mod hit;
pub mod input;
pub mod responsive;

pub use canvas::{CanvasMutation, CanvasView, FloatingCanvas, ImageView, InitTicket};
pub use drag::{DragMode, DragSession, DragTool, Grab, Interaction};
pub use hit::{Hit, hit_test};
pub use input::InputEvent;
pub use responsive::{ModeChange, ViewportMode};

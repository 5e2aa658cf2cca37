pub mod config;
pub mod error;
pub mod grid;
pub mod id;
pub mod layout;
pub mod model;
pub mod probe;
pub mod zorder;

pub use config::CanvasConfig;
pub use error::{ConfigError, LayoutError, LoadError, LoadFailure};
pub use grid::{GridTile, TileAspect, compact_tiles};
pub use id::ImageId;
pub use layout::{Arrangement, Viewport, scatter};
pub use model::*;
pub use probe::{ImageProbe, NaturalSize, StaticProbe, probe_all};
pub use zorder::ZOrder;

// Re-export kurbo geometry so downstream crates don't need a direct dependency
pub use kurbo::{Point, Size, Vec2};

pub mod background;
pub mod color;
pub mod composite;
pub mod frame;
pub mod mask;

pub use background::median_background;
pub use color::{CloakColor, ColorError, ColorRange, HsvProfile};
pub use composite::apply_cloak;
pub use frame::FrameError;
pub use mask::{build_mask, MorphologyConfig};

pub mod attachment;
pub mod viewport;

pub use attachment::Attachment;
pub use viewport::{Viewport, ZoomDirection, ZoomStep};

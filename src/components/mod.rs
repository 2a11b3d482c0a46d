pub mod app;
pub mod viewer;
pub mod viewer_controls;

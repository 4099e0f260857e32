pub mod frame_preview;
pub mod status_bar;

pub use frame_preview::FramePreview;
pub use status_bar::StatusBar;

pub mod event;
pub mod feed;
pub mod store;

pub use event::ColoredEvent;
pub use feed::Feed;
pub use store::{Loaded, Store};

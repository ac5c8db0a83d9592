//! Widgets drawn in terminal cells around the grid surface.

mod status_bar;
mod traits;

pub use status_bar::{StatusBar, StatusBarConfig};
pub use traits::Widget;

pub mod map_canvas;
pub mod popup;
pub mod results;
pub mod status;

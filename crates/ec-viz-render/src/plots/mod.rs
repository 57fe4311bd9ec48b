pub mod heatmap;
pub mod triplet1d;
pub mod triplet2d;
pub mod weight_control;
pub mod weights;

mod axes_draw;

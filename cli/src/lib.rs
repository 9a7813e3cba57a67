pub mod options;
pub mod render;

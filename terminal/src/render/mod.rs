pub mod annotations;
pub mod map;
pub mod standard_renderer;
pub mod traits;
pub mod types;

pub mod api;
pub mod model;

pub use api::Error;

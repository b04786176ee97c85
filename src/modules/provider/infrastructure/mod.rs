pub mod hh;

pub use hh::HhClient;

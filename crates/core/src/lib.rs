#![forbid(unsafe_code)]

pub mod cloud;

pub use cloud::{Colors, Normals, PointCloud};

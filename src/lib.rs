pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod picking;
pub mod render;
pub mod session;
pub mod surface;

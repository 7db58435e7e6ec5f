//! Stormcove library - rainy night ocean tableau

pub mod animation;
pub mod camera;
pub mod cli;
pub mod clock;
pub mod effects;
pub mod error;
pub mod ocean;
pub mod params;
pub mod picking;
pub mod rain;
pub mod rendering;
pub mod scene;
pub mod scheduler;
pub mod world;

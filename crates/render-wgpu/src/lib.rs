//! wgpu render backend for the pyramid viewer.
//!
//! Uploads a five-vertex pyramid once and draws it every frame with a single
//! pipeline. The camera orbits its look-at center under mouse control.
//!
//! # Invariants
//! - Vertex and index buffers are written once, at construction.
//! - A frame writes exactly one uniform (projection * view) and issues two
//!   indexed draws: the base, then the apex triangle.
//! - Camera and controller never touch the GPU.

mod camera;
mod controller;
mod gpu;
pub mod mesh;
mod shaders;

pub use camera::Camera;
pub use controller::CameraController;
pub use gpu::PyramidRenderer;

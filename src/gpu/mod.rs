// GPU module - organizes all WebGPU-related functionality
// This module provides abstractions for WebGPU operations including:
// - Canvas creation and sizing
// - Context management (adapter, device, canvas configuration)
// - Render pass recording and submission
// - Pipeline and shader creation
// - Buffer uploads and the vertex/uniform data they carry

pub mod canvas;
pub mod context;
pub mod geometry;
pub mod pipeline;
pub mod render_pass;
pub mod shaders;
pub mod utils;

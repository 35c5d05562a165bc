// Shader Management
// WGSL sources for the fixed pipeline and their compilation into modules.
// Callers may supply their own sources as long as they match the pipeline's
// interface: `@location(0) vec3<f32>` input and a uniform at group 0, binding 0.

use web_sys::{GpuDevice, GpuShaderModule};

use crate::config::AppConfig;

pub const DEFAULT_VERTEX_SHADER: &str = r#"
struct Uniforms {
    transform: mat4x4<f32>,
}

@group(0) @binding(0) var<uniform> uniforms: Uniforms;

@vertex
fn main(@location(0) position: vec3<f32>) -> @builtin(position) vec4<f32> {
    return uniforms.transform * vec4<f32>(position, 1.0);
}
"#;

pub const DEFAULT_FRAGMENT_SHADER: &str = r#"
@fragment
fn main() -> @location(0) vec4<f32> {
    return vec4<f32>(1.0, 0.5, 0.0, 1.0);
}
"#;

#[derive(Debug, Clone, PartialEq)]
pub struct ShaderSources {
    pub vertex: String,
    pub fragment: String,
    pub vertex_entry_point: String,
    pub fragment_entry_point: String,
}

impl ShaderSources {
    pub fn new(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
            vertex_entry_point: "main".to_string(),
            fragment_entry_point: "main".to_string(),
        }
    }

    pub fn with_entry_points(mut self, config: &AppConfig) -> Self {
        self.vertex_entry_point = config.vertex_entry_point.clone();
        self.fragment_entry_point = config.fragment_entry_point.clone();
        self
    }
}

impl Default for ShaderSources {
    fn default() -> Self {
        Self::new(DEFAULT_VERTEX_SHADER, DEFAULT_FRAGMENT_SHADER)
    }
}

pub struct ShaderManager;

impl ShaderManager {
    /// Compiles the vertex and fragment modules. Compilation errors are
    /// reported asynchronously by the browser, not here.
    pub fn compile(device: &GpuDevice, sources: &ShaderSources) -> (GpuShaderModule, GpuShaderModule) {
        let vertex = device.create_shader_module(&web_sys::GpuShaderModuleDescriptor::new(&sources.vertex));
        let fragment =
            device.create_shader_module(&web_sys::GpuShaderModuleDescriptor::new(&sources.fragment));
        (vertex, fragment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_entry_points_are_main() {
        let sources = ShaderSources::default();
        assert_eq!(sources.vertex_entry_point, "main");
        assert_eq!(sources.fragment_entry_point, "main");
        assert!(sources.vertex.contains("fn main("));
        assert!(sources.fragment.contains("fn main("));
    }

    #[test]
    fn default_vertex_shader_matches_pipeline_interface() {
        assert!(DEFAULT_VERTEX_SHADER.contains("@location(0) position: vec3<f32>"));
        assert!(DEFAULT_VERTEX_SHADER.contains("@group(0) @binding(0) var<uniform>"));
    }

    #[test]
    fn entry_points_follow_config() {
        let config = AppConfig {
            vertex_entry_point: "vs_main".to_string(),
            fragment_entry_point: "fs_main".to_string(),
            ..AppConfig::default()
        };
        let sources = ShaderSources::new("", "").with_entry_points(&config);
        assert_eq!(sources.vertex_entry_point, "vs_main");
        assert_eq!(sources.fragment_entry_point, "fs_main");
    }
}

// Render Pipeline Management
// Creates the single fixed render pipeline:
// - one uniform buffer at group 0, binding 0, visible to the vertex stage
// - one vertex buffer of tightly packed float32x3 positions
// - triangle-list topology, one color target in the canvas format

use web_sys::{
    GpuBindGroup, GpuBindGroupLayout, GpuBuffer, GpuDevice, GpuRenderPassEncoder,
    GpuRenderPipeline, GpuTextureFormat, GpuVertexFormat,
};

use crate::error::Result;
use crate::gpu::shaders::{ShaderManager, ShaderSources};

pub const UNIFORM_GROUP: u32 = 0;
pub const UNIFORM_BINDING: u32 = 0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexAttribute {
    pub format: GpuVertexFormat,
    pub offset: u32,
    pub shader_location: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VertexLayout {
    pub array_stride: u32,
    pub attributes: Vec<VertexAttribute>,
}

impl VertexLayout {
    /// `vec3<f32>` position at location 0, 4 * 3 bytes per vertex.
    pub fn position_f32x3() -> Self {
        Self {
            array_stride: 4 * 3,
            attributes: vec![VertexAttribute {
                format: GpuVertexFormat::Float32x3,
                offset: 0,
                shader_location: 0,
            }],
        }
    }

    fn to_gpu(&self) -> web_sys::GpuVertexBufferLayout {
        let attributes = js_sys::Array::new();
        for attribute in &self.attributes {
            attributes.push(&web_sys::GpuVertexAttribute::new(
                attribute.format,
                attribute.offset as f64,
                attribute.shader_location,
            ));
        }
        let layout = web_sys::GpuVertexBufferLayout::new(self.array_stride as f64, &attributes);
        layout.set_step_mode(web_sys::GpuVertexStepMode::Vertex);
        layout
    }
}

pub struct UniformPipeline {
    pipeline: GpuRenderPipeline,
    uniform_layout: GpuBindGroupLayout,
}

impl UniformPipeline {
    pub fn new(
        device: &GpuDevice,
        format: GpuTextureFormat,
        shaders: &ShaderSources,
    ) -> Result<Self> {
        // Uniform buffer visible to the vertex shader
        let entries = js_sys::Array::new();
        let uniform_entry =
            web_sys::GpuBindGroupLayoutEntry::new(UNIFORM_BINDING, web_sys::gpu_shader_stage::VERTEX);
        let buffer_binding = web_sys::GpuBufferBindingLayout::new();
        buffer_binding.set_type(web_sys::GpuBufferBindingType::Uniform);
        uniform_entry.set_buffer(&buffer_binding);
        entries.push(&uniform_entry);

        let uniform_layout = device
            .create_bind_group_layout(&web_sys::GpuBindGroupLayoutDescriptor::new(&entries))?;

        let pipeline_layout = device.create_pipeline_layout(
            &web_sys::GpuPipelineLayoutDescriptor::new(&js_sys::Array::of1(&uniform_layout)),
        );

        let (vertex_module, fragment_module) = ShaderManager::compile(device, shaders);

        // Vertex stage
        let vertex_state = web_sys::GpuVertexState::new(&vertex_module);
        vertex_state.set_entry_point(&shaders.vertex_entry_point);
        vertex_state.set_buffers(&js_sys::Array::of1(&VertexLayout::position_f32x3().to_gpu()));

        // Fragment stage
        let targets = js_sys::Array::of1(&web_sys::GpuColorTargetState::new(format));
        let fragment_state = web_sys::GpuFragmentState::new(&fragment_module, &targets);
        fragment_state.set_entry_point(&shaders.fragment_entry_point);

        let primitive = web_sys::GpuPrimitiveState::new();
        primitive.set_topology(web_sys::GpuPrimitiveTopology::TriangleList);

        let pipeline_desc =
            web_sys::GpuRenderPipelineDescriptor::new(&pipeline_layout, &vertex_state);
        pipeline_desc.set_fragment(&fragment_state);
        pipeline_desc.set_primitive(&primitive);

        let pipeline = device.create_render_pipeline(&pipeline_desc)?;
        log::debug!("render pipeline created for {:?}", format);

        Ok(Self {
            pipeline,
            uniform_layout,
        })
    }

    pub fn bind(&self, render_pass: &GpuRenderPassEncoder) {
        render_pass.set_pipeline(&self.pipeline);
    }

    pub fn create_uniform_bind_group(&self, device: &GpuDevice, uniforms: &GpuBuffer) -> GpuBindGroup {
        let resource = web_sys::GpuBufferBinding::new(uniforms);
        let entry = web_sys::GpuBindGroupEntry::new(UNIFORM_BINDING, &resource);
        let descriptor =
            web_sys::GpuBindGroupDescriptor::new(&js_sys::Array::of1(&entry), &self.uniform_layout);
        device.create_bind_group(&descriptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_layout_is_twelve_byte_stride() {
        let layout = VertexLayout::position_f32x3();
        assert_eq!(layout.array_stride, 4 * 3);
        assert_eq!(
            layout.attributes,
            vec![VertexAttribute {
                format: GpuVertexFormat::Float32x3,
                offset: 0,
                shader_location: 0,
            }]
        );
    }

    #[test]
    fn position_layout_matches_vertex_struct() {
        // the buffer uploaded by draw must line up with the declared stride
        let layout = VertexLayout::position_f32x3();
        assert_eq!(
            layout.array_stride as usize,
            std::mem::size_of::<crate::gpu::geometry::Vertex>()
        );
        let bytes: &[u8] = bytemuck::cast_slice(&crate::gpu::geometry::TRIANGLE);
        assert_eq!(bytes.len(), layout.array_stride as usize * 3);
    }
}

// Render Pass
// One command encoder with one render pass clearing the current swap chain
// texture. The pass stays open so the pipeline and draws can be recorded
// into it, and is submitted by `Frame::finish`.

use web_sys::{GpuCommandEncoder, GpuDevice, GpuRenderPassEncoder, GpuTextureView};

use crate::config::ClearColor;
use crate::error::Result;
use crate::gpu::canvas::CanvasSize;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

impl Viewport {
    /// Viewport at the origin covering the canvas's displayed size. WebGPU
    /// rejects viewports larger than the attachment, so each axis is clamped
    /// to the color buffer.
    pub fn covering(client_width: i32, client_height: i32, attachment: CanvasSize) -> Self {
        let width = client_width.max(0) as u32;
        let height = client_height.max(0) as u32;
        Self {
            x: 0.0,
            y: 0.0,
            width: width.min(attachment.width) as f32,
            height: height.min(attachment.height) as f32,
            min_depth: 0.0,
            max_depth: 1.0,
        }
    }

    fn apply(&self, pass: &GpuRenderPassEncoder) {
        pass.set_viewport(
            self.x,
            self.y,
            self.width,
            self.height,
            self.min_depth,
            self.max_depth,
        );
    }
}

pub struct Frame {
    pub encoder: GpuCommandEncoder,
    pub pass: GpuRenderPassEncoder,
}

impl Frame {
    pub fn begin(
        device: &GpuDevice,
        view: &GpuTextureView,
        clear_color: &ClearColor,
        viewport: Viewport,
    ) -> Result<Self> {
        let encoder = device.create_command_encoder();

        let color_attachments = js_sys::Array::new();
        let color_attachment = web_sys::GpuRenderPassColorAttachment::new(
            web_sys::GpuLoadOp::Clear,
            web_sys::GpuStoreOp::Store,
            view,
        );
        color_attachment.set_clear_value(&clear_color.to_gpu());
        color_attachments.push(&color_attachment);

        let descriptor = web_sys::GpuRenderPassDescriptor::new(&color_attachments);
        let pass = encoder.begin_render_pass(&descriptor)?;
        viewport.apply(&pass);

        Ok(Self { encoder, pass })
    }

    /// Ends the pass and submits the recorded commands.
    pub fn finish(self, device: &GpuDevice) {
        self.pass.end();
        let command_buffer = self.encoder.finish();
        device.queue().submit(&js_sys::Array::of1(&command_buffer));
    }
}

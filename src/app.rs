// WebGPU setup object
// Owns every host object created along the setup sequence:
//   create_canvas -> init_webgpu -> init_render_pass -> init_pipeline
// followed by draw/submit. Each step checks that the ones it depends on ran
// and fails with `GpuError::NotInitialized` otherwise.

use web_sys::{GpuBuffer, GpuTextureFormat, HtmlCanvasElement, HtmlElement, gpu_buffer_usage};

use crate::config::{AppConfig, ClearColor};
use crate::error::{GpuError, Result};
use crate::gpu::canvas::{self, CanvasSize};
use crate::gpu::context::GpuContext;
use crate::gpu::geometry::{Uniforms, Vertex};
use crate::gpu::pipeline::{UNIFORM_GROUP, UniformPipeline};
use crate::gpu::render_pass::{Frame, Viewport};
use crate::gpu::shaders::ShaderSources;
use crate::gpu::utils;

/// Whether a render pass is open and has the pipeline set on it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct PassState {
    open: bool,
    pipeline_bound: bool,
}

impl PassState {
    /// A fresh pass; an already built pipeline is set on it right away.
    fn opened(has_pipeline: bool) -> Self {
        Self {
            open: true,
            pipeline_bound: has_pipeline,
        }
    }

    fn with_pipeline(self) -> Self {
        Self {
            pipeline_bound: true,
            ..self
        }
    }

    fn ready_to_draw(self) -> Result<()> {
        if !self.open {
            return Err(GpuError::NotInitialized {
                step: "draw",
                requires: "init_render_pass",
            });
        }
        if !self.pipeline_bound {
            return Err(GpuError::NotInitialized {
                step: "draw",
                requires: "init_pipeline",
            });
        }
        Ok(())
    }
}

pub struct GpuApp {
    config: AppConfig,
    canvas: Option<HtmlCanvasElement>,
    gpu: Option<GpuContext>,
    frame: Option<Frame>,
    pipeline: Option<UniformPipeline>,
    pass: PassState,
}

impl GpuApp {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            canvas: None,
            gpu: None,
            frame: None,
            pipeline: None,
            pass: PassState::default(),
        }
    }

    pub fn canvas_size(&self) -> Option<CanvasSize> {
        self.canvas.as_ref().map(CanvasSize::of)
    }

    pub fn format(&self) -> Option<GpuTextureFormat> {
        self.gpu.as_ref().map(|gpu| gpu.format)
    }

    pub fn create_canvas(&mut self, root: &HtmlElement) -> Result<()> {
        self.canvas = Some(canvas::create_canvas(root, self.config.fallback_size)?);
        Ok(())
    }

    pub async fn init_webgpu(&mut self) -> Result<()> {
        let canvas = self.canvas.as_ref().ok_or(GpuError::NotInitialized {
            step: "init_webgpu",
            requires: "create_canvas",
        })?;
        self.gpu = Some(GpuContext::new(canvas, &self.config).await?);
        Ok(())
    }

    /// Opens a render pass clearing the canvas to `clear_color`. A pipeline
    /// built for an earlier pass is set on the new one.
    pub fn init_render_pass(&mut self, clear_color: &ClearColor) -> Result<()> {
        let gpu = self.gpu.as_ref().ok_or(GpuError::NotInitialized {
            step: "init_render_pass",
            requires: "init_webgpu",
        })?;
        let canvas = self.canvas.as_ref().ok_or(GpuError::NotInitialized {
            step: "init_render_pass",
            requires: "create_canvas",
        })?;

        let viewport = Viewport::covering(
            canvas.client_width(),
            canvas.client_height(),
            CanvasSize::of(canvas),
        );
        let view = gpu.current_texture_view()?;
        let frame = Frame::begin(&gpu.device, &view, clear_color, viewport)?;
        if let Some(pipeline) = &self.pipeline {
            pipeline.bind(&frame.pass);
        }
        self.pass = PassState::opened(self.pipeline.is_some());
        self.frame = Some(frame);
        Ok(())
    }

    /// Builds the render pipeline from WGSL sources and sets it on the open pass.
    pub fn init_pipeline(&mut self, vertex_wgsl: &str, fragment_wgsl: &str) -> Result<()> {
        let gpu = self.gpu.as_ref().ok_or(GpuError::NotInitialized {
            step: "init_pipeline",
            requires: "init_webgpu",
        })?;
        let frame = self.frame.as_ref().ok_or(GpuError::NotInitialized {
            step: "init_pipeline",
            requires: "init_render_pass",
        })?;

        let sources = ShaderSources::new(vertex_wgsl, fragment_wgsl).with_entry_points(&self.config);
        let pipeline = UniformPipeline::new(&gpu.device, gpu.format, &sources)?;
        pipeline.bind(&frame.pass);
        self.pipeline = Some(pipeline);
        self.pass = self.pass.with_pipeline();
        Ok(())
    }

    pub fn create_gpu_buffer(&self, data: &[u8], usage: u32) -> Result<GpuBuffer> {
        let gpu = self.gpu.as_ref().ok_or(GpuError::NotInitialized {
            step: "create_gpu_buffer",
            requires: "init_webgpu",
        })?;
        utils::create_gpu_buffer(&gpu.device, data, usage)
    }

    /// Records a draw of `vertices` with `uniforms` bound at group 0.
    pub fn draw(&self, vertices: &[Vertex], uniforms: &Uniforms) -> Result<()> {
        self.pass.ready_to_draw()?;
        let (Some(frame), Some(pipeline)) = (&self.frame, &self.pipeline) else {
            return Err(GpuError::NotInitialized {
                step: "draw",
                requires: "init_pipeline",
            });
        };
        let gpu = self.gpu.as_ref().ok_or(GpuError::NotInitialized {
            step: "draw",
            requires: "init_webgpu",
        })?;

        let vertex_buffer = self.create_gpu_buffer(bytemuck::cast_slice(vertices), gpu_buffer_usage::VERTEX)?;
        let uniform_buffer =
            self.create_gpu_buffer(bytemuck::bytes_of(uniforms), gpu_buffer_usage::UNIFORM)?;
        let bind_group = pipeline.create_uniform_bind_group(&gpu.device, &uniform_buffer);

        frame.pass.set_bind_group(UNIFORM_GROUP, Some(&bind_group));
        frame.pass.set_vertex_buffer(0, Some(&vertex_buffer));
        frame.pass.draw(vertices.len() as u32);

        log::debug!("recorded draw of {} vertices", vertices.len());
        Ok(())
    }

    /// Ends the open render pass and submits it. Drawing again needs a new
    /// pass from `init_render_pass`; the pipeline is kept and reused.
    pub fn submit(&mut self) -> Result<()> {
        let frame = self.frame.take().ok_or(GpuError::NotInitialized {
            step: "submit",
            requires: "init_render_pass",
        })?;
        let gpu = self.gpu.as_ref().ok_or(GpuError::NotInitialized {
            step: "submit",
            requires: "init_webgpu",
        })?;
        frame.finish(&gpu.device);
        self.pass = PassState::default();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn requires(err: GpuError) -> &'static str {
        match err {
            GpuError::NotInitialized { requires, .. } => requires,
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn render_pass_needs_webgpu() {
        let mut app = GpuApp::new(AppConfig::default());
        let err = app.init_render_pass(&ClearColor::default()).unwrap_err();
        assert_eq!(requires(err), "init_webgpu");
    }

    #[test]
    fn pipeline_needs_webgpu() {
        let mut app = GpuApp::new(AppConfig::default());
        let err = app.init_pipeline("", "").unwrap_err();
        assert_eq!(requires(err), "init_webgpu");
    }

    #[test]
    fn buffers_need_a_device() {
        let app = GpuApp::new(AppConfig::default());
        let err = app.create_gpu_buffer(&[0; 4], gpu_buffer_usage::VERTEX).unwrap_err();
        assert_eq!(requires(err), "init_webgpu");
    }

    #[test]
    fn draw_needs_an_open_pass() {
        let app = GpuApp::new(AppConfig::default());
        let err = app
            .draw(&crate::gpu::geometry::TRIANGLE, &Uniforms::IDENTITY)
            .unwrap_err();
        assert_eq!(requires(err), "init_render_pass");
    }

    #[test]
    fn submit_needs_an_open_pass() {
        let mut app = GpuApp::new(AppConfig::default());
        let err = app.submit().unwrap_err();
        assert_eq!(requires(err), "init_render_pass");
    }

    #[test]
    fn new_pass_without_pipeline_cannot_draw() {
        let err = PassState::opened(false).ready_to_draw().unwrap_err();
        assert_eq!(requires(err), "init_pipeline");
        assert!(PassState::opened(false).with_pipeline().ready_to_draw().is_ok());
    }

    #[test]
    fn pipeline_survives_submit_onto_next_pass() {
        // init_render_pass -> init_pipeline -> submit -> init_render_pass
        let first = PassState::opened(false).with_pipeline();
        assert!(first.ready_to_draw().is_ok());

        let submitted = PassState::default();
        let err = submitted.ready_to_draw().unwrap_err();
        assert_eq!(requires(err), "init_render_pass");

        // the kept pipeline is set on the next pass when it opens
        let second = PassState::opened(true);
        assert!(second.pipeline_bound);
        assert!(second.ready_to_draw().is_ok());
    }

    #[test]
    fn nothing_is_created_up_front() {
        let app = GpuApp::new(AppConfig::default());
        assert!(app.canvas_size().is_none());
        assert!(app.format().is_none());
        assert_eq!(app.pass, PassState::default());
    }
}

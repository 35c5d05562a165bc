// GPU Context Management
// Handles WebGPU initialization, adapter/device creation, and canvas context configuration
// Main responsibilities:
// - Detect whether the browser exposes WebGPU at all
// - Request the GPU adapter and device
// - Configure the canvas rendering context

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Gpu, GpuAdapter, GpuCanvasContext, GpuDevice, GpuTextureFormat, GpuTextureView,
    HtmlCanvasElement, gpu_texture_usage,
};

use crate::config::AppConfig;
use crate::error::{GpuError, Result};

pub struct GpuContext {
    pub adapter: GpuAdapter,
    pub device: GpuDevice,
    pub context: GpuCanvasContext,
    pub format: GpuTextureFormat,
}

impl GpuContext {
    pub async fn new(canvas: &HtmlCanvasElement, config: &AppConfig) -> Result<Self> {
        let gpu = navigator_gpu()?;

        // Request adapter
        let adapter_promise = match config.power_preference {
            Some(preference) => {
                let options = web_sys::GpuRequestAdapterOptions::new();
                options.set_power_preference(preference.into());
                gpu.request_adapter_with_options(&options)
            }
            None => gpu.request_adapter(),
        };
        let adapter = JsFuture::from(adapter_promise).await?;
        if adapter.is_null() || adapter.is_undefined() {
            return Err(GpuError::NoAdapter);
        }
        let adapter: GpuAdapter = adapter.into();

        // Request device
        let device = JsFuture::from(adapter.request_device()).await?;
        let device: GpuDevice = device.into();

        // Get canvas context
        let context: GpuCanvasContext = canvas
            .get_context("webgpu")?
            .ok_or(GpuError::ContextUnavailable)?
            .dyn_into()
            .map_err(|_| GpuError::ContextUnavailable)?;

        // Configure canvas context
        let format = config.format.resolve(&gpu);
        let surface = web_sys::GpuCanvasConfiguration::new(&device, format);
        surface.set_usage(gpu_texture_usage::RENDER_ATTACHMENT);
        surface.set_alpha_mode(config.alpha_mode.into());
        context.configure(&surface)?;

        log::info!("Congratulations! You've got a WebGPU context!");
        log::debug!("canvas context configured with {:?}", format);

        Ok(Self {
            adapter,
            device,
            context,
            format,
        })
    }

    pub fn current_texture_view(&self) -> Result<GpuTextureView> {
        let current_texture = self.context.get_current_texture()?;
        Ok(current_texture.create_view()?)
    }
}

// `navigator.gpu` is simply missing on browsers without WebGPU, so look it up
// reflectively instead of through the typed getter.
fn navigator_gpu() -> Result<Gpu> {
    let window = web_sys::window().ok_or(GpuError::Dom("window"))?;
    let navigator = window.navigator();
    let gpu = js_sys::Reflect::get(&navigator, &JsValue::from_str("gpu"))?;
    let entry = (!gpu.is_undefined() && !gpu.is_null()).then(|| gpu.unchecked_into::<Gpu>());
    webgpu_entry(entry)
}

fn webgpu_entry<T>(entry: Option<T>) -> Result<T> {
    entry.ok_or(GpuError::Unsupported)
}

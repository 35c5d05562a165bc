use leptos::html::Div;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

mod app;
mod config;
mod error;
mod gpu;
mod logging;

use app::GpuApp;
use config::AppConfig;
use gpu::geometry::{TRIANGLE, Uniforms};
use gpu::shaders::{DEFAULT_FRAGMENT_SHADER, DEFAULT_VERTEX_SHADER};

async fn render_triangle(root: HtmlElement, config: AppConfig) -> Result<(), JsValue> {
    log::info!("Starting WebGPU setup...");

    let clear_color = config.clear_color;
    let mut app = GpuApp::new(config);

    app.create_canvas(&root)?;
    app.init_webgpu().await?;
    app.init_render_pass(&clear_color)?;
    app.init_pipeline(DEFAULT_VERTEX_SHADER, DEFAULT_FRAGMENT_SHADER)?;

    let uniforms = app
        .canvas_size()
        .map(Uniforms::aspect_corrected)
        .unwrap_or(Uniforms::IDENTITY);
    app.draw(&TRIANGLE, &uniforms)?;
    app.submit()?;

    log::info!("Triangle rendered with {:?}", app.format());
    Ok(())
}

fn load_config() -> AppConfig {
    let loaded = web_sys::window()
        .and_then(|window| window.document())
        .map(|document| AppConfig::from_document(&document))
        .unwrap_or_else(|| Ok(AppConfig::default()));

    match loaded {
        Ok(config) => {
            logging::init(config.log_level);
            config
        }
        Err(e) => {
            let config = AppConfig::default();
            logging::init(config.log_level);
            log::warn!("{}; using defaults", e);
            config
        }
    }
}

#[component]
fn CanvasHost() -> impl IntoView {
    let root = NodeRef::<Div>::new();

    Effect::new(move |_| {
        if let Some(div) = root.get() {
            let config = load_config();
            let element: HtmlElement = div.into();
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = render_triangle(element, config).await {
                    log::error!("WebGPU error: {:?}", e);
                }
            });
        }
    });

    view! {
        <div node_ref=root style="width: 100vw; height: 100vh; margin: 0;"></div>
    }
}

fn main() {
    leptos::mount::mount_to_body(|| view! { <CanvasHost/> })
}

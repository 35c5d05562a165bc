// Runtime configuration
// Read from an optional `<script id="gpu-config" type="application/json">`
// block in the host page. Every field is optional and falls back to the
// defaults below.

use serde::Deserialize;
use web_sys::{Document, Gpu, GpuCanvasAlphaMode, GpuPowerPreference, GpuTextureFormat};

use crate::error::Result;
use crate::gpu::canvas::CanvasSize;

pub const CONFIG_ELEMENT_ID: &str = "gpu-config";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    pub format: SurfaceFormat,
    pub alpha_mode: AlphaMode,
    pub power_preference: Option<PowerPreference>,
    pub clear_color: ClearColor,
    pub vertex_entry_point: String,
    pub fragment_entry_point: String,
    pub fallback_size: CanvasSize,
    pub log_level: LogLevel,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            format: SurfaceFormat::Bgra8unorm,
            alpha_mode: AlphaMode::Opaque,
            power_preference: None,
            clear_color: ClearColor::default(),
            vertex_entry_point: "main".to_string(),
            fragment_entry_point: "main".to_string(),
            fallback_size: CanvasSize::DEFAULT,
            log_level: LogLevel::Info,
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads the config block from the page, or the defaults when the page has none.
    pub fn from_document(document: &Document) -> Result<Self> {
        match document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|element| element.text_content())
        {
            Some(json) if !json.trim().is_empty() => Self::from_json(&json),
            _ => Ok(Self::default()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceFormat {
    Bgra8unorm,
    Rgba8unorm,
    /// Whatever `navigator.gpu.getPreferredCanvasFormat()` reports.
    Preferred,
}

impl SurfaceFormat {
    pub fn resolve(self, gpu: &Gpu) -> GpuTextureFormat {
        match self {
            SurfaceFormat::Bgra8unorm => GpuTextureFormat::Bgra8unorm,
            SurfaceFormat::Rgba8unorm => GpuTextureFormat::Rgba8unorm,
            SurfaceFormat::Preferred => gpu.get_preferred_canvas_format(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlphaMode {
    Opaque,
    Premultiplied,
}

impl From<AlphaMode> for GpuCanvasAlphaMode {
    fn from(mode: AlphaMode) -> Self {
        match mode {
            AlphaMode::Opaque => GpuCanvasAlphaMode::Opaque,
            AlphaMode::Premultiplied => GpuCanvasAlphaMode::Premultiplied,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PowerPreference {
    LowPower,
    HighPerformance,
}

impl From<PowerPreference> for GpuPowerPreference {
    fn from(preference: PowerPreference) -> Self {
        match preference {
            PowerPreference::LowPower => GpuPowerPreference::LowPower,
            PowerPreference::HighPerformance => GpuPowerPreference::HighPerformance,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ClearColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Default for ClearColor {
    fn default() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 1.0 }
    }
}

impl ClearColor {
    pub fn to_gpu(&self) -> web_sys::GpuColorDict {
        // web-sys orders dictionary constructor arguments alphabetically
        web_sys::GpuColorDict::new(self.a, self.b, self.g, self.r)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GpuError;

    #[test]
    fn empty_object_gives_defaults() {
        let config = AppConfig::from_json("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.format, SurfaceFormat::Bgra8unorm);
        assert_eq!(config.vertex_entry_point, "main");
        assert_eq!(config.clear_color.a, 1.0);
        assert!(config.power_preference.is_none());
    }

    #[test]
    fn partial_override() {
        let config = AppConfig::from_json(
            r#"{
                "format": "preferred",
                "powerPreference": "high-performance",
                "clearColor": { "r": 0.1, "g": 0.2, "b": 0.3, "a": 1.0 },
                "fallbackSize": { "width": 640, "height": 480 },
                "logLevel": "debug"
            }"#,
        )
        .unwrap();

        assert_eq!(config.format, SurfaceFormat::Preferred);
        assert_eq!(config.power_preference, Some(PowerPreference::HighPerformance));
        assert_eq!(config.clear_color.g, 0.2);
        assert_eq!(config.fallback_size, CanvasSize { width: 640, height: 480 });
        assert_eq!(log::Level::from(config.log_level), log::Level::Debug);
        assert_eq!(config.alpha_mode, AlphaMode::Opaque);
    }

    #[test]
    fn unknown_format_is_rejected() {
        let err = AppConfig::from_json(r#"{ "format": "rgb565" }"#).unwrap_err();
        assert!(matches!(err, GpuError::Config(_)));
    }

    #[test]
    fn enum_conversions() {
        assert_eq!(
            GpuPowerPreference::from(PowerPreference::LowPower),
            GpuPowerPreference::LowPower
        );
        assert_eq!(
            GpuCanvasAlphaMode::from(AlphaMode::Premultiplied),
            GpuCanvasAlphaMode::Premultiplied
        );
    }
}

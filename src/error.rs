use thiserror::Error;
use wasm_bindgen::JsValue;

pub type Result<T> = std::result::Result<T, GpuError>;

#[derive(Debug, Error)]
pub enum GpuError {
    #[error("WebGPU is not supported on this browser.")]
    Unsupported,

    #[error("Your browser seems not support WebGPU!")]
    ContextUnavailable,

    #[error("No suitable GPU adapter was found.")]
    NoAdapter,

    #[error("{step} requires {requires} to run first.")]
    NotInitialized {
        step: &'static str,
        requires: &'static str,
    },

    #[error("Missing {0}.")]
    Dom(&'static str),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("WebGPU call failed: {0}")]
    Js(String),
}

impl From<JsValue> for GpuError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| {
                js_sys::Reflect::get(&value, &"message".into())
                    .ok()
                    .and_then(|m| m.as_string())
            })
            .unwrap_or_else(|| format!("{:?}", value));
        GpuError::Js(message)
    }
}

// Surfaces as a thrown JS `Error` at the wasm boundary.
impl From<GpuError> for JsValue {
    fn from(error: GpuError) -> Self {
        js_sys::Error::new(&error.to_string()).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_messages() {
        assert_eq!(
            GpuError::Unsupported.to_string(),
            "WebGPU is not supported on this browser."
        );
        assert_eq!(
            GpuError::ContextUnavailable.to_string(),
            "Your browser seems not support WebGPU!"
        );
    }

    #[test]
    fn ordering_message_names_both_steps() {
        let err = GpuError::NotInitialized {
            step: "init_pipeline",
            requires: "init_render_pass",
        };
        assert_eq!(
            err.to_string(),
            "init_pipeline requires init_render_pass to run first."
        );
    }

    #[test]
    fn config_errors_convert() {
        let parse = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: GpuError = parse.into();
        assert!(matches!(err, GpuError::Config(_)));
    }
}

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures while setting up or driving a scene
#[derive(Debug, Error)]
pub enum GardenError {
    #[error("WebGL error: {0}")]
    WebGl(String),

    #[error("shader error: {0}")]
    Shader(String),

    #[error("failed to create {0}")]
    Resource(&'static str),

    #[error("config parse error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("DOM error: {0}")]
    Dom(String),
}

impl GardenError {
    /// Wrap a JS exception thrown by a browser API
    pub fn dom(err: JsValue) -> Self {
        Self::Dom(format!("{:?}", err))
    }
}

impl From<GardenError> for JsValue {
    fn from(err: GardenError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

pub type Result<T, E = GardenError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            GardenError::Resource("vertex buffer").to_string(),
            "failed to create vertex buffer"
        );
        assert_eq!(
            GardenError::InvalidConfig("max_flowers must be at least 1".into()).to_string(),
            "invalid config: max_flowers must be at least 1"
        );
    }

    #[test]
    fn test_yaml_error_converts() {
        let err: GardenError = serde_yaml::from_str::<u32>("[not, a, number]")
            .unwrap_err()
            .into();
        assert!(matches!(err, GardenError::Config(_)));
    }
}

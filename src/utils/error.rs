use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenError {
    #[error("Missing required option '{field}'")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for option '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Malformed parameter segment '{segment}': expected key=value")]
    MalformedParameterError { segment: String },

    #[error("Failed to parse template {template}: {message}")]
    TemplateParseError { template: String, message: String },

    #[error("Failed to render template {template}: {message}")]
    RenderError { template: String, message: String },

    #[error("Failed to read existing file {path}: {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to generate files for service {service}: {source}")]
    ServiceGenerationError {
        service: String,
        #[source]
        source: Box<GenError>,
    },

    #[error("CodeGeneratorRequest exceeds {limit} bytes")]
    InputTooLargeError { limit: u64 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to decode CodeGeneratorRequest: {0}")]
    DecodeError(#[from] prost::DecodeError),

    #[error("Failed to encode CodeGeneratorResponse: {0}")]
    EncodeError(#[from] prost::EncodeError),
}

impl GenError {
    /// 是否屬於設定錯誤（在規劃開始前就會中止）
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            GenError::MissingConfigError { .. }
                | GenError::InvalidConfigValueError { .. }
                | GenError::MalformedParameterError { .. }
        )
    }

    /// 解開 service 包裝，取得最內層的錯誤
    pub fn root_cause(&self) -> &GenError {
        match self {
            GenError::ServiceGenerationError { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, GenError>;

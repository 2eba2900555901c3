#[cfg(feature = "cli")]
pub mod cli;

use crate::utils::error::{GenError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MODE_PER_SERVICE: &str = "per_service";
pub const MODE_PER_METHOD: &str = "per_method";
pub const DEFAULT_IMPL_SUFFIX: &str = "_handler";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMode {
    /// 每個 service 一個實作檔，缺少的方法以附加方式補上
    #[default]
    PerService,
    /// 每個方法一個檔案，已存在的檔案完全不動
    PerMethod,
}

impl GenerationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationMode::PerService => MODE_PER_SERVICE,
            GenerationMode::PerMethod => MODE_PER_METHOD,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            MODE_PER_SERVICE => Some(GenerationMode::PerService),
            MODE_PER_METHOD => Some(GenerationMode::PerMethod),
            _ => None,
        }
    }
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 外掛參數（例如 buf.gen.yaml 的 `opt`）解析後的設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    pub mode: GenerationMode,
    pub dir_pattern: String,
    pub impl_suffix: String,
    pub out: String,
}

impl Options {
    /// 解析 `key=value,key=value` 格式的參數字串
    ///
    /// Unknown keys are ignored so newer `buf.gen.yaml` files keep working
    /// with older plugin builds. A missing `out` fails the whole invocation.
    pub fn from_parameter(parameter: &str) -> Result<Self> {
        let mut mode = GenerationMode::default();
        let mut dir_pattern = String::new();
        let mut impl_suffix = DEFAULT_IMPL_SUFFIX.to_string();
        let mut out: Option<String> = None;

        for segment in parameter.split(',') {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }

            let Some((key, value)) = segment.split_once('=') else {
                return Err(GenError::MalformedParameterError {
                    segment: segment.to_string(),
                });
            };
            let (key, value) = (key.trim(), value.trim());

            match key {
                "mode" => match GenerationMode::parse(value) {
                    Some(parsed) => mode = parsed,
                    None => tracing::warn!(
                        "⚠️ Unknown mode '{}', keeping {}",
                        value,
                        mode
                    ),
                },
                "dir_pattern" => dir_pattern = value.to_string(),
                "impl_suffix" => impl_suffix = value.to_string(),
                "out" => out = Some(value.to_string()).filter(|v| !v.is_empty()),
                other => tracing::debug!("Ignoring unknown option '{}'", other),
            }
        }

        let out = validation::validate_required_field("out", &out)?.clone();

        let options = Self {
            mode,
            dir_pattern,
            impl_suffix,
            out,
        };
        options.validate()?;
        Ok(options)
    }
}

impl Validate for Options {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("out", &self.out)?;
        validation::validate_path("out", &self.out)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_options() {
        let opts = Options::from_parameter("out=gen").unwrap();
        assert_eq!(opts.mode, GenerationMode::PerService);
        assert_eq!(opts.dir_pattern, "");
        assert_eq!(opts.impl_suffix, "_handler");
        assert_eq!(opts.out, "gen");
    }

    #[test]
    fn test_per_method_mode() {
        let opts = Options::from_parameter("out=gen,mode=per_method").unwrap();
        assert_eq!(opts.mode, GenerationMode::PerMethod);
        assert_eq!(opts.impl_suffix, "_handler");
    }

    #[test]
    fn test_custom_suffix_and_pattern() {
        let opts = Options::from_parameter(
            " out = gen , impl_suffix=_impl, dir_pattern={package_path}/{service_snake} ",
        )
        .unwrap();
        assert_eq!(opts.mode, GenerationMode::PerService);
        assert_eq!(opts.dir_pattern, "{package_path}/{service_snake}");
        assert_eq!(opts.impl_suffix, "_impl");
        assert_eq!(opts.out, "gen");
    }

    #[test]
    fn test_missing_out_is_an_error() {
        let err = Options::from_parameter(
            "mode=per_method,impl_suffix=_impl,dir_pattern={package_path}/{service_snake}",
        )
        .unwrap_err();
        assert!(matches!(err, GenError::MissingConfigError { ref field } if field == "out"));
        assert!(err.is_config_error());

        assert!(Options::from_parameter("").is_err());
        assert!(Options::from_parameter("out=").is_err());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let opts = Options::from_parameter("out=gen,paths=source_relative,future=1").unwrap();
        assert_eq!(opts.out, "gen");
    }

    #[test]
    fn test_trailing_comma_is_allowed() {
        assert!(Options::from_parameter("out=gen,").is_ok());
    }

    #[test]
    fn test_value_may_contain_equals() {
        let opts = Options::from_parameter("out=gen,dir_pattern=a=b").unwrap();
        assert_eq!(opts.dir_pattern, "a=b");
    }

    #[test]
    fn test_unrecognised_mode_keeps_current_mode() {
        let opts = Options::from_parameter("out=gen,mode=PerMethod").unwrap();
        assert_eq!(opts.mode, GenerationMode::PerService);

        let opts = Options::from_parameter("out=gen,mode=per_method,mode=per_file").unwrap();
        assert_eq!(opts.mode, GenerationMode::PerMethod);
    }

    #[test]
    fn test_suffix_is_taken_verbatim() {
        let opts = Options::from_parameter("out=gen,impl_suffix=/impl").unwrap();
        assert_eq!(opts.impl_suffix, "/impl");
    }

    #[test]
    fn test_segment_without_value_is_rejected() {
        let err = Options::from_parameter("out=gen,verbose").unwrap_err();
        assert!(matches!(err, GenError::MalformedParameterError { .. }));
        assert!(err.is_config_error());

        let err = Options::from_parameter("out=ge\0n").unwrap_err();
        assert!(matches!(err, GenError::InvalidConfigValueError { .. }));
    }
}

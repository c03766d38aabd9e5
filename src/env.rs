//! 统一的环境变量管理
//!
//! 每个环境变量都是一个实现了 [`EnvVar`] 的零大小类型，负责名称、默认值和解析。

use std::env;
use std::fmt;
use std::path::PathBuf;

/// 环境变量解析错误
#[derive(Debug, Clone)]
pub struct EnvError {
    pub variable: String,
    pub message: String,
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Environment variable '{}': {}", self.variable, self.message)
    }
}

impl std::error::Error for EnvError {}

pub type EnvResult<T> = Result<T, EnvError>;

/// 环境变量访问器特性
pub trait EnvVar<T> {
    const NAME: &'static str;
    const DEFAULT: Option<T>;
    const DESCRIPTION: &'static str;

    fn parse(value: &str) -> EnvResult<T>;

    fn get() -> EnvResult<T> {
        match env::var(Self::NAME) {
            Ok(value) => Self::parse(&value),
            Err(_) => Self::DEFAULT.ok_or_else(|| EnvError {
                variable: Self::NAME.to_string(),
                message: "Required environment variable not set".to_string(),
            }),
        }
    }

    /// 仅在变量被设置时返回值
    fn get_opt() -> EnvResult<Option<T>> {
        match env::var(Self::NAME) {
            Ok(value) => Self::parse(&value).map(Some),
            Err(_) => Ok(None),
        }
    }

    fn get_or_default(default: T) -> T {
        Self::get().unwrap_or(default)
    }
}

fn parse_path(value: &str, name: &str) -> EnvResult<PathBuf> {
    let value = value.trim();
    if value.is_empty() {
        return Err(EnvError {
            variable: name.to_string(),
            message: "Path must not be empty".to_string(),
        });
    }
    Ok(PathBuf::from(shellexpand::tilde(value).as_ref()))
}

/// 覆盖配置文件中路径的环境变量
pub mod bundle {
    use super::*;

    /// 入口 HTML 文件
    pub struct Src;
    impl EnvVar<PathBuf> for Src {
        const NAME: &'static str = "WC_BUNDLE_SRC";
        const DEFAULT: Option<PathBuf> = None;
        const DESCRIPTION: &'static str = "Entry HTML document (adminViewElem.src)";

        fn parse(value: &str) -> EnvResult<PathBuf> {
            parse_path(value, Self::NAME)
        }
    }

    /// 输出根目录
    pub struct RootDir;
    impl EnvVar<PathBuf> for RootDir {
        const NAME: &'static str = "WC_BUNDLE_ROOT_DIR";
        const DEFAULT: Option<PathBuf> = None;
        const DESCRIPTION: &'static str = "Base output directory (build.rootDirectory)";

        fn parse(value: &str) -> EnvResult<PathBuf> {
            parse_path(value, Self::NAME)
        }
    }

    /// 输出子目录
    pub struct Dest;
    impl EnvVar<PathBuf> for Dest {
        const NAME: &'static str = "WC_BUNDLE_DEST";
        const DEFAULT: Option<PathBuf> = None;
        const DESCRIPTION: &'static str =
            "Output subdirectory relative to the root (adminViewElem.dest)";

        fn parse(value: &str) -> EnvResult<PathBuf> {
            parse_path(value, Self::NAME)
        }
    }
}

/// 日志与终端输出
pub mod logging {
    use super::*;

    /// 日志级别
    pub struct LogLevel;
    impl EnvVar<String> for LogLevel {
        const NAME: &'static str = "WC_BUNDLE_LOG_LEVEL";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Log level: trace, debug, info, warn, error";

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("info".to_string()),
            }
        }

        fn parse(value: &str) -> EnvResult<String> {
            match value.trim().to_lowercase().as_str() {
                level @ ("trace" | "debug" | "info" | "warn" | "error") => Ok(level.to_string()),
                _ => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!(
                        "Invalid log level '{}'. Use: trace, debug, info, warn, error",
                        value
                    ),
                }),
            }
        }
    }

    /// 禁用颜色输出
    pub struct NoColor;
    impl EnvVar<bool> for NoColor {
        const NAME: &'static str = "NO_COLOR";
        const DEFAULT: Option<bool> = Some(false);
        const DESCRIPTION: &'static str = "Disable colored output when set to any value";

        fn parse(value: &str) -> EnvResult<bool> {
            // NO_COLOR 约定：任何非空值都表示禁用颜色
            Ok(!value.is_empty())
        }
    }
}

/// 列出所有已知的环境变量及其说明
pub fn describe_all() -> Vec<(&'static str, &'static str)> {
    vec![
        (bundle::Src::NAME, bundle::Src::DESCRIPTION),
        (bundle::RootDir::NAME, bundle::RootDir::DESCRIPTION),
        (bundle::Dest::NAME, bundle::Dest::DESCRIPTION),
        (logging::LogLevel::NAME, logging::LogLevel::DESCRIPTION),
        (logging::NoColor::NAME, logging::NoColor::DESCRIPTION),
    ]
}

//! # wc-bundle
//!
//! 把一个 Web Components 入口页面及其引用的 HTML import、脚本内联成单个文档，
//! 再把其中的内联脚本拆分到同名的 `.js` 文件中。
//!
//! ## 模块组织
//!
//! - `core` - 打包任务与错误类型
//! - `config` - 配置文件与环境变量覆盖
//! - `env` - 类型安全的环境变量访问
//! - `parsers` - HTML 与 CSS 处理
//! - `utils` - URL 工具函数

pub mod config;
pub mod core;
pub mod env;
pub mod parsers;
pub mod utils;

pub use config::BundleConfig;
pub use core::{BundleError, BundleOutput, BundleTask, OutputFile};

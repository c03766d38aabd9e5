//! # 工具模块
//!
//! - `url` - 文件URL转换、引用解析、相对路径计算

pub mod url;

// 重新导出常用项
pub use url::{
    clean_url, is_foreign_reference, is_relative_reference, path_to_url, relative_url,
    resolve_url, url_to_path, Url,
};

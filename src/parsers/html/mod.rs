//! HTML 解析和处理模块
//!
//! - `dom`: 基础 DOM 操作
//! - `parser`: `<link rel>` 与 `<script type>` 的识别
//! - `inliner`: 内联 HTML import、外部脚本与样式表
//! - `splitter`: 拆分出内联脚本
//! - `serializer`: 序列化功能

pub mod dom;
pub mod inliner;
pub mod parser;
pub mod serializer;
pub mod splitter;

pub use dom::{get_charset, html_to_dom, parse_html_document};
pub use inliner::{inline_document, BundledDocument, InlineOptions};
pub use parser::{is_js_script_type, parse_link_type, LinkType};
pub use serializer::serialize_document;
pub use splitter::{split_document, SplitContent, SplitOptions};

//! # 解析器模块
//!
//! - `html` - HTML 文档解析、DOM 操作、内联与拆分
//! - `css` - 样式中 `url(...)` 与 `@import` 引用的重写

pub mod css;
pub mod html;

pub use css::relocate_css;
pub use html::{
    html_to_dom, inline_document, serialize_document, split_document, InlineOptions,
    SplitOptions,
};

//! HTML 引用解析
//!
//! 识别 `<link>` 元素的 `rel` 关系，以及 `<script>` 元素是否包含 JavaScript。

/// `<link rel>` 中与打包相关的关系类型
#[derive(Debug, PartialEq, Eq)]
pub enum LinkType {
    /// HTML 导入（`rel="import"`）
    Import,
    /// CSS 样式表
    Stylesheet,
}

/// 被视为 JavaScript 的 `<script type>` 取值
const JS_MEDIA_TYPES: &[&str] = &[
    "text/javascript",
    "application/javascript",
    "text/ecmascript",
    "application/ecmascript",
    "application/x-javascript",
];

/// 解析HTML链接的rel属性值
///
/// 支持多个空格分隔的值，不区分大小写，未知的值会被忽略。
///
/// ```rust
/// # use wc_bundle::parsers::html::parser::{parse_link_type, LinkType};
/// assert_eq!(parse_link_type("import"), vec![LinkType::Import]);
/// assert_eq!(parse_link_type("import STYLESHEET"), vec![LinkType::Import, LinkType::Stylesheet]);
/// ```
pub fn parse_link_type(link_attr_rel_value: &str) -> Vec<LinkType> {
    let mut types: Vec<LinkType> = vec![];

    for link_attr_rel_type in link_attr_rel_value.split_whitespace() {
        if link_attr_rel_type.eq_ignore_ascii_case("import") {
            types.push(LinkType::Import);
        } else if link_attr_rel_type.eq_ignore_ascii_case("stylesheet") {
            types.push(LinkType::Stylesheet);
        }
    }

    types
}

/// 检查 `<script type>` 是否表示 JavaScript
///
/// 缺省或空的 `type` 按 JavaScript 处理；MIME 参数（如 `;charset=`）会被忽略。
pub fn is_js_script_type(script_type: Option<&str>) -> bool {
    let Some(script_type) = script_type else {
        return true;
    };

    let media_type = script_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    media_type.is_empty() || JS_MEDIA_TYPES.contains(&media_type.as_str())
}

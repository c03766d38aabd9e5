//! 脚本拆分器
//!
//! 把内联后的文档中所有内联 JavaScript 按文档顺序取出，拼接成一个脚本文件，
//! 并在 HTML 中留下一个指向该文件的 `<script src>` 引用。
//! `<template>` 内的脚本属于模板内容，不会被提取。

use markup5ever_rcdom::{Handle, NodeData, RcDom};
use serde::{Deserialize, Serialize};

use super::dom::{
    append_child, detach, find_nodes, get_node_attr, get_node_name, get_text_content,
    new_element,
};
use super::parser::is_js_script_type;

/// 样式提取时需要原地保留的容器元素
const STYLE_SCOPES: &[&str] = &["custom-style", "dom-module"];

/// 拆分阶段的选项
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SplitOptions {
    /// 只提取脚本；否则顶层 `<style>` 内容也一并提取
    pub only_script: bool,
    /// 在 `<head>` 末尾（带 `defer`）而不是 `<body>` 末尾引用提取出的脚本
    pub script_in_head: bool,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            only_script: true,
            script_in_head: true,
        }
    }
}

/// 拆分阶段从文档中取出的内容
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SplitContent {
    /// 按文档顺序拼接的脚本内容
    pub script: String,
    /// 参与拼接的 `<script>` 元素数量
    pub script_count: usize,
    /// 拼接的样式内容，仅在提取样式时存在
    pub style: Option<String>,
}

/// 从 `dom` 中移除内联脚本（按配置也移除样式）
///
/// 之后文档改为引用 `js_file_name`，提取了样式时还会引用 `css_file_name`。
pub fn split_document(
    dom: &RcDom,
    js_file_name: &str,
    css_file_name: &str,
    options: &SplitOptions,
) -> SplitContent {
    let mut scripts: Vec<String> = Vec::new();
    let mut styles: Vec<String> = Vec::new();
    let mut script_count = 0;

    collect(&dom.document, options, false, &mut |kind, body| match kind {
        Extracted::Script => {
            script_count += 1;
            if !body.trim().is_empty() {
                scripts.push(body);
            }
        }
        Extracted::Style => {
            if !body.trim().is_empty() {
                styles.push(body);
            }
        }
    });

    let script = join_scripts(&scripts);
    let style = (!options.only_script && !styles.is_empty()).then(|| styles.join("\n"));

    if let Some(head) = find_nodes(&dom.document, &["html", "head"]).into_iter().next() {
        if style.is_some() {
            let link = new_element(dom, "link", &[("rel", "stylesheet"), ("href", css_file_name)]);
            append_child(&head, &link);
        }

        if options.script_in_head {
            let reference = new_element(dom, "script", &[("src", js_file_name), ("defer", "")]);
            append_child(&head, &reference);
        }
    }

    if !options.script_in_head {
        if let Some(body) = find_nodes(&dom.document, &["html", "body"]).into_iter().next() {
            let reference = new_element(dom, "script", &[("src", js_file_name)]);
            append_child(&body, &reference);
        }
    }

    SplitContent {
        script,
        script_count,
        style,
    }
}

enum Extracted {
    Script,
    Style,
}

fn collect<F>(node: &Handle, options: &SplitOptions, in_scope: bool, sink: &mut F)
where
    F: FnMut(Extracted, String),
{
    let children: Vec<Handle> = node.children.borrow().clone();

    for child in children.iter() {
        if !matches!(child.data, NodeData::Element { .. }) {
            continue;
        }

        match get_node_name(child).unwrap_or_default() {
            "script" if is_inline_js(child) => {
                sink(Extracted::Script, get_text_content(child));
                detach(child);
            }
            "style" if !options.only_script && !in_scope => {
                sink(Extracted::Style, get_text_content(child));
                detach(child);
            }
            name => {
                let in_scope = in_scope || STYLE_SCOPES.contains(&name);
                collect(child, options, in_scope, sink);
            }
        }
    }
}

fn is_inline_js(node: &Handle) -> bool {
    get_node_attr(node, "src").is_none()
        && is_js_script_type(get_node_attr(node, "type").as_deref())
}

/// 每段脚本以换行结尾，段与段之间用 `;` 分隔，依赖自动分号插入的脚本不会与下一段连在一起
fn join_scripts(scripts: &[String]) -> String {
    let mut joined = String::new();

    for (i, script) in scripts.iter().enumerate() {
        if i > 0 {
            joined.push_str(";\n");
        }
        joined.push_str(script);
        if !script.ends_with('\n') {
            joined.push('\n');
        }
    }

    joined
}

//! HTML import 内联器
//!
//! 从入口文档开始，按文档顺序把 `<link rel="import">` 引用的文档递归地合并进来，
//! 并（按配置）内联外部脚本与样式表，得到一个自包含的文档。
//!
//! 每个被导入的文档在合并前都会先做一次“重定位”：其中所有相对引用都被改写为
//! 相对于入口文档的路径。因此遍历时只需要以入口文档的 URL 作为基准解析引用。

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use markup5ever_rcdom::{Handle, NodeData, RcDom};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::BundleError;
use crate::parsers::css::relocate_css;
use crate::utils::url::{
    clean_url, is_foreign_reference, is_relative_reference, relative_url, resolve_url,
    url_to_path, Url,
};

use super::dom::{
    append_child, detach, find_nodes, get_node_attr, get_node_name, get_template_contents,
    get_text_content, insert_before, new_element, parse_html_document, prepend_child,
    set_node_attr, set_text_content,
};
use super::parser::{is_js_script_type, parse_link_type, LinkType};

/// 可能包含文档相对 URL 的属性
const URL_ATTRS: &[&str] = &["href", "src", "action", "poster", "background"];

/// 内联阶段的选项
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InlineOptions {
    /// 除 HTML import 外，也内联外部 `<script src>` 文件
    pub inline_scripts: bool,
    /// 把 `<link rel="stylesheet">` 转换为 `<style>`
    pub inline_css: bool,
    /// 删除注释，每个 `@license` 注释只保留一份
    pub strip_comments: bool,
    /// 位于这些路径下的引用不会被内联；相对路径以当前工作目录为基准
    pub excludes: Vec<PathBuf>,
    /// 删除被排除的引用，而不是原样保留
    pub strip_excludes: bool,
}

impl Default for InlineOptions {
    fn default() -> Self {
        Self {
            inline_scripts: true,
            inline_css: false,
            strip_comments: false,
            excludes: Vec::new(),
            strip_excludes: false,
        }
    }
}

/// 内联阶段产生的单个文档
pub struct BundledDocument {
    pub dom: RcDom,
    /// 入口文档声明的字符集（缺省为 `utf-8`）
    pub encoding: String,
}

/// 内联入口文档 `entry_url` 引用的全部内容
///
/// `data` 是已经读取的入口文档内容。
pub fn inline_document(
    data: &[u8],
    entry_url: &Url,
    options: &InlineOptions,
) -> Result<BundledDocument, BundleError> {
    let entry_path = url_to_path(entry_url).ok_or_else(|| BundleError::SourceNotFound {
        path: PathBuf::from(entry_url.path()),
        source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a local file"),
    })?;

    let (dom, encoding) = parse_html_document(data);

    let mut inliner = Inliner::new(entry_url, options);
    let mut deferred = Vec::new();
    inliner.walk(&dom, &dom.document, &entry_path, false, &mut deferred)?;
    place_deferred(&dom, deferred);

    Ok(BundledDocument { dom, encoding })
}

struct Inliner<'a> {
    options: &'a InlineOptions,
    entry_url: Url,
    excludes: Vec<PathBuf>,
    /// 已合并的文档
    visited: HashSet<Url>,
    /// 已保留的 `@license` 注释
    licenses: HashSet<String>,
}

impl<'a> Inliner<'a> {
    fn new(entry_url: &Url, options: &'a InlineOptions) -> Self {
        // 与配置中的其他路径一致，相对路径以当前工作目录为基准
        let excludes = options
            .excludes
            .iter()
            .map(|exclude| {
                fs::canonicalize(exclude)
                    .or_else(|_| std::path::absolute(exclude))
                    .unwrap_or_else(|_| exclude.clone())
            })
            .collect();

        let mut visited = HashSet::new();
        visited.insert(clean_url(entry_url));

        Self {
            options,
            entry_url: entry_url.clone(),
            excludes,
            visited,
            licenses: HashSet::new(),
        }
    }

    /// 遍历一个文档；由其 `<head>` 导入的 body 内容收集到 `deferred` 中
    fn walk(
        &mut self,
        dom: &RcDom,
        node: &Handle,
        doc_path: &Path,
        in_head: bool,
        deferred: &mut Vec<Handle>,
    ) -> Result<(), BundleError> {
        // 子节点在遍历过程中可能被替换，先取快照
        let children: Vec<Handle> = node.children.borrow().clone();

        for child in children.iter() {
            match child.data {
                NodeData::Comment { ref contents } => {
                    if self.options.strip_comments && !self.keep_comment(contents) {
                        detach(child);
                    }
                }
                NodeData::Element { .. } => match get_node_name(child).unwrap_or_default() {
                    "link" => self.handle_link(dom, child, doc_path, in_head, deferred)?,
                    "script" => self.handle_script(child, doc_path)?,
                    "head" => self.walk(dom, child, doc_path, true, deferred)?,
                    _ => self.walk(dom, child, doc_path, in_head, deferred)?,
                },
                _ => {}
            }
        }

        Ok(())
    }

    fn keep_comment(&mut self, contents: &str) -> bool {
        contents.contains("@license") && self.licenses.insert(contents.trim().to_string())
    }

    fn handle_link(
        &mut self,
        dom: &RcDom,
        node: &Handle,
        doc_path: &Path,
        in_head: bool,
        deferred: &mut Vec<Handle>,
    ) -> Result<(), BundleError> {
        let link_types = parse_link_type(&get_node_attr(node, "rel").unwrap_or_default());
        let href = get_node_attr(node, "href").unwrap_or_default();

        let is_import = link_types.contains(&LinkType::Import);
        let is_stylesheet = link_types.contains(&LinkType::Stylesheet);
        if !is_import && !(is_stylesheet && self.options.inline_css) {
            return Ok(());
        }

        let Some(target) = self.resolve_local(&href) else {
            return Ok(());
        };

        if self.is_excluded(&target) {
            debug!(href = %href, "excluded from inlining");
            if self.options.strip_excludes {
                detach(node);
            }
            return Ok(());
        }

        let css_import = get_node_attr(node, "type").is_some_and(|t| t.eq_ignore_ascii_case("css"));
        if is_stylesheet || css_import {
            let css = self.read_text(&target, &href, doc_path)?;
            let style = new_element(dom, "style", &[]);
            if let Some(media) = get_node_attr(node, "media") {
                set_node_attr(&style, "media", Some(media));
            }
            set_text_content(&style, &relocate_css(&css, &target, &self.entry_url));
            insert_before(node, &style);
            detach(node);
            debug!(href = %href, "inlined stylesheet");
            return Ok(());
        }

        if !self.visited.insert(target.clone()) {
            debug!(href = %href, "dropping duplicate import");
            detach(node);
            return Ok(());
        }

        let (head_nodes, body_nodes) = self.load_import(&target, &href, doc_path)?;
        for imported_node in head_nodes.iter() {
            insert_before(node, imported_node);
        }
        for imported_node in body_nodes.iter() {
            if in_head {
                detach(imported_node);
                deferred.push(imported_node.clone());
            } else {
                insert_before(node, imported_node);
            }
        }
        detach(node);
        debug!(href = %href, "inlined import");

        Ok(())
    }

    fn handle_script(&mut self, node: &Handle, doc_path: &Path) -> Result<(), BundleError> {
        if !self.options.inline_scripts {
            return Ok(());
        }

        let Some(src) = get_node_attr(node, "src") else {
            return Ok(());
        };
        if !is_js_script_type(get_node_attr(node, "type").as_deref()) {
            return Ok(());
        }

        let Some(target) = self.resolve_local(&src) else {
            return Ok(());
        };

        if self.is_excluded(&target) {
            debug!(src = %src, "excluded from inlining");
            if self.options.strip_excludes {
                detach(node);
            }
            return Ok(());
        }

        let script = self.read_text(&target, &src, doc_path)?;
        set_text_content(node, &escape_script(&script));
        set_node_attr(node, "src", None);
        debug!(src = %src, "inlined script");

        Ok(())
    }

    /// 读取、重定位并内联一个被导入的文档
    ///
    /// 按文档顺序分别返回属于 `<head>` 和属于 `<body>` 的节点。
    fn load_import(
        &mut self,
        target: &Url,
        href: &str,
        doc_path: &Path,
    ) -> Result<(Vec<Handle>, Vec<Handle>), BundleError> {
        let data = self.read_bytes(target, href, doc_path)?;
        let (import_dom, _) = parse_html_document(&data);

        relocate_tree(&import_dom.document, target, &self.entry_url);

        let import_path = url_to_path(target).unwrap_or_else(|| PathBuf::from(target.path()));
        let mut deferred = Vec::new();
        self.walk(&import_dom, &import_dom.document, &import_path, false, &mut deferred)?;

        // 文档级注释（位于 <html> 之前）归入 head 部分
        let mut head_nodes: Vec<Handle> = import_dom
            .document
            .children
            .borrow()
            .iter()
            .filter(|node| matches!(node.data, NodeData::Comment { .. }))
            .cloned()
            .collect();
        for head in find_nodes(&import_dom.document, &["html", "head"]).iter() {
            head_nodes.extend(head.children.borrow().iter().cloned());
        }

        let mut body_nodes = deferred;
        for body in find_nodes(&import_dom.document, &["html", "body"]).iter() {
            body_nodes.extend(body.children.borrow().iter().cloned());
        }

        // import_dom 析构时会清空仍挂在树上的所有后代节点
        for node in head_nodes.iter().chain(body_nodes.iter()) {
            detach(node);
        }

        Ok((head_nodes, body_nodes))
    }

    /// 以入口文档为基准解析引用；不指向本地文件的引用返回 `None`
    fn resolve_local(&self, href: &str) -> Option<Url> {
        if href.trim().is_empty() {
            return None;
        }

        if is_foreign_reference(href) {
            warn!(reference = %href, "leaving remote reference in place");
            return None;
        }

        // 根相对路径、片段和模板绑定保持原样
        if !is_relative_reference(href) {
            debug!(reference = %href, "leaving non-relative reference in place");
            return None;
        }

        resolve_url(&self.entry_url, href).map(|url| clean_url(&url))
    }

    fn is_excluded(&self, target: &Url) -> bool {
        match url_to_path(target) {
            Some(path) => self.excludes.iter().any(|exclude| path.starts_with(exclude)),
            None => false,
        }
    }

    fn read_bytes(&self, target: &Url, reference: &str, doc_path: &Path) -> Result<Vec<u8>, BundleError> {
        let resolution_error = |source: std::io::Error| BundleError::Resolution {
            reference: reference.to_string(),
            referrer: doc_path.to_path_buf(),
            source,
        };

        let path = url_to_path(target).ok_or_else(|| {
            resolution_error(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "not a local file",
            ))
        })?;

        fs::read(&path).map_err(resolution_error)
    }

    fn read_text(&self, target: &Url, reference: &str, doc_path: &Path) -> Result<String, BundleError> {
        let data = self.read_bytes(target, reference, doc_path)?;
        let (text, _, had_errors) = encoding_rs::UTF_8.decode(&data);
        if had_errors {
            warn!(reference = %reference, "invalid UTF-8 replaced while inlining");
        }
        Ok(text.into_owned())
    }
}

/// 改写被导入文档中的相对 URL，使其相对于 `document_url` 仍指向同一文件
pub fn relocate_tree(node: &Handle, from: &Url, document_url: &Url) {
    if from == document_url {
        return;
    }

    for child in node.children.borrow().iter() {
        if let NodeData::Element { .. } = child.data {
            relocate_element(child, from, document_url);

            if let Some(contents) = get_template_contents(child) {
                relocate_tree(&contents, from, document_url);
            }
        }
        relocate_tree(child, from, document_url);
    }
}

fn relocate_element(node: &Handle, from: &Url, document_url: &Url) {
    for attr_name in URL_ATTRS {
        if let Some(value) = get_node_attr(node, attr_name) {
            if is_relative_reference(&value) {
                if let Some(absolute) = resolve_url(from, &value) {
                    set_node_attr(node, attr_name, Some(relative_url(document_url, &absolute)));
                }
            }
        }
    }

    if let Some(style) = get_node_attr(node, "style") {
        set_node_attr(node, "style", Some(relocate_css(&style, from, document_url)));
    }

    match get_node_name(node) {
        Some("style") => {
            let css = get_text_content(node);
            set_text_content(node, &relocate_css(&css, from, document_url));
        }
        Some("dom-module") if get_node_attr(node, "assetpath").is_none() => {
            if let Some(dir) = resolve_url(from, "./") {
                // 与入口同目录的模块不需要 assetpath
                let assetpath = relative_url(document_url, &dir);
                if assetpath != "./" {
                    set_node_attr(node, "assetpath", Some(assetpath));
                }
            }
        }
        _ => {}
    }
}

/// 把由入口 `<head>` 导入的 body 内容放进 `<body>` 开头的隐藏容器
fn place_deferred(dom: &RcDom, deferred: Vec<Handle>) {
    if deferred.is_empty() {
        return;
    }

    let Some(body) = find_nodes(&dom.document, &["html", "body"]).into_iter().next() else {
        return;
    };

    let container = new_element(dom, "div", &[("hidden", ""), ("by-vulcanize", "")]);
    for node in deferred.iter() {
        append_child(&container, node);
    }
    prepend_child(&body, &container);
}

/// 防止内联的代码提前闭合所在的 `<script>` 元素
fn escape_script(script: &str) -> String {
    script.replace("</script", "<\\/script").replace("</SCRIPT", "<\\/SCRIPT")
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use tempfile::TempDir;

    use crate::parsers::html::serializer::serialize_document;
    use crate::utils::url::path_to_url;

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
        path
    }

    fn inline(dir: &TempDir, entry: &str, options: &InlineOptions) -> Result<String, BundleError> {
        let path = fs::canonicalize(dir.path().join(entry)).unwrap();
        let data = fs::read(&path).unwrap();
        let url = path_to_url(&path).unwrap();
        let bundled = inline_document(&data, &url, options)?;
        let html = serialize_document(&bundled.dom, &bundled.encoding).unwrap();
        Ok(String::from_utf8(html).unwrap())
    }

    #[test]
    fn inlines_imports_in_place() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.html", "<p>from a</p>");
        write(
            &dir,
            "index.html",
            "<html><head></head><body><link rel=\"import\" href=\"a.html\"><p>main</p></body></html>",
        );

        let html = inline(&dir, "index.html", &InlineOptions::default()).unwrap();
        assert!(html.contains("<body><p>from a</p><p>main</p></body>"));
        assert!(!html.contains("rel=\"import\""));
    }

    #[test]
    fn imports_are_inlined_once() {
        let dir = TempDir::new().unwrap();
        write(&dir, "shared.html", "<style>.shared{}</style>");
        write(&dir, "a.html", "<link rel=\"import\" href=\"shared.html\"><p>a</p>");
        write(
            &dir,
            "index.html",
            "<body><link rel=\"import\" href=\"shared.html\"><link rel=\"import\" href=\"a.html\"></body>",
        );

        let html = inline(&dir, "index.html", &InlineOptions::default()).unwrap();
        assert_eq!(html.matches(".shared{}").count(), 1);
        assert!(html.contains("<p>a</p>"));
    }

    #[test]
    fn import_cycles_terminate() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.html", "<link rel=\"import\" href=\"b.html\"><p>a</p>");
        write(&dir, "b.html", "<link rel=\"import\" href=\"a.html\"><p>b</p>");
        write(&dir, "index.html", "<body><link rel=\"import\" href=\"a.html\"></body>");

        let html = inline(&dir, "index.html", &InlineOptions::default()).unwrap();
        assert!(html.contains("<p>b</p><p>a</p>"));
    }

    #[test]
    fn inlines_external_scripts() {
        let dir = TempDir::new().unwrap();
        write(&dir, "lib/app.js", "console.log('</script>');");
        write(&dir, "index.html", "<body><script src=\"lib/app.js\"></script></body>");

        let html = inline(&dir, "index.html", &InlineOptions::default()).unwrap();
        assert!(html.contains("<script>console.log('<\\/script>');</script>"));
    }

    #[test]
    fn leaves_scripts_when_disabled() {
        let dir = TempDir::new().unwrap();
        write(&dir, "app.js", "x();");
        write(&dir, "index.html", "<body><script src=\"app.js\"></script></body>");

        let options = InlineOptions {
            inline_scripts: false,
            ..InlineOptions::default()
        };
        let html = inline(&dir, "index.html", &options).unwrap();
        assert!(html.contains("<script src=\"app.js\"></script>"));
    }

    #[test]
    fn leaves_remote_references() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "index.html",
            "<head><link rel=\"import\" href=\"https://example.com/x.html\"></head><body><script src=\"//cdn.example.com/x.js\"></script></body>",
        );

        let html = inline(&dir, "index.html", &InlineOptions::default()).unwrap();
        assert!(html.contains("https://example.com/x.html"));
        assert!(html.contains("//cdn.example.com/x.js"));
    }

    #[test]
    fn relocates_urls_of_nested_imports() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "components/card/card.html",
            "<dom-module id=\"x-card\"><template><img src=\"star.png\"><div style=\"background: url(bg.png)\"></div></template><script src=\"card.js\"></script></dom-module>",
        );
        write(&dir, "components/card/card.js", "Polymer({is: 'x-card'});");
        write(
            &dir,
            "components/all.html",
            "<link rel=\"import\" href=\"card/card.html\">",
        );
        write(
            &dir,
            "index.html",
            "<body><link rel=\"import\" href=\"components/all.html\"></body>",
        );

        let html = inline(&dir, "index.html", &InlineOptions::default()).unwrap();
        assert!(html.contains("src=\"components/card/star.png\""));
        assert!(html.contains("url(components/card/bg.png)"));
        assert!(html.contains("assetpath=\"components/card/\""));
        assert!(html.contains("Polymer({is: 'x-card'});"));
    }

    #[test]
    fn moves_body_content_out_of_head() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "el.html",
            "<style>.el{}</style><dom-module id=\"x-el\"></dom-module><script>one()</script>",
        );
        write(
            &dir,
            "index.html",
            "<html><head><link rel=\"import\" href=\"el.html\"></head><body><p>main</p></body></html>",
        );

        let html = inline(&dir, "index.html", &InlineOptions::default()).unwrap();
        assert!(html.contains("<head><style>.el{}</style></head>"));
        assert!(html.contains(
            "<body><div hidden=\"\" by-vulcanize=\"\"><dom-module id=\"x-el\"></dom-module><script>one()</script></div><p>main</p>"
        ));
    }

    #[test]
    fn missing_import_is_a_resolution_error() {
        let dir = TempDir::new().unwrap();
        write(&dir, "index.html", "<link rel=\"import\" href=\"missing.html\">");

        match inline(&dir, "index.html", &InlineOptions::default()) {
            Err(BundleError::Resolution { reference, .. }) => assert_eq!(reference, "missing.html"),
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn missing_script_is_a_resolution_error() {
        let dir = TempDir::new().unwrap();
        write(&dir, "index.html", "<script src=\"nope.js\"></script>");

        assert!(matches!(
            inline(&dir, "index.html", &InlineOptions::default()),
            Err(BundleError::Resolution { .. })
        ));
    }

    #[test]
    fn excluded_references_stay_or_go() {
        let dir = TempDir::new().unwrap();
        write(&dir, "vendor/big.html", "<p>big</p>");
        write(&dir, "index.html", "<body><link rel=\"import\" href=\"vendor/big.html\"></body>");

        let options = InlineOptions {
            excludes: vec![dir.path().join("vendor")],
            ..InlineOptions::default()
        };
        let html = inline(&dir, "index.html", &options).unwrap();
        assert!(html.contains("href=\"vendor/big.html\""));
        assert!(!html.contains("<p>big</p>"));

        let options = InlineOptions {
            strip_excludes: true,
            ..options
        };
        let html = inline(&dir, "index.html", &options).unwrap();
        assert!(!html.contains("vendor/big.html"));
    }

    #[test]
    fn relative_excludes_do_not_follow_the_entry_directory() {
        let dir = TempDir::new().unwrap();
        write(&dir, "src/vendor/big.js", "big();");
        write(&dir, "src/index.html", "<body><script src=\"vendor/big.js\"></script></body>");

        // 工作目录下不存在 vendor，入口目录下的 vendor 不受影响
        let options = InlineOptions {
            excludes: vec![PathBuf::from("vendor")],
            ..InlineOptions::default()
        };
        let html = inline(&dir, "src/index.html", &options).unwrap();
        assert!(html.contains("<script>big();</script>"));
    }

    #[test]
    fn leaves_non_relative_references() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "index.html",
            "<head><link rel=\"import\" href=\"#local\"></head><body><script src=\"/static/app.js\"></script><script src=\"{{base}}/x.js\"></script><script src=\"[[root]]y.js\"></script></body>",
        );

        let html = inline(&dir, "index.html", &InlineOptions::default()).unwrap();
        assert!(html.contains("<link rel=\"import\" href=\"#local\">"));
        assert!(html.contains("<script src=\"/static/app.js\"></script>"));
        assert!(html.contains("<script src=\"{{base}}/x.js\"></script>"));
        assert!(html.contains("<script src=\"[[root]]y.js\"></script>"));
    }

    #[test]
    fn same_directory_imports_keep_their_content() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "x-el.html",
            "<dom-module id=\"x-el\"><template><b>hi</b></template><script>A()</script></dom-module>",
        );
        write(
            &dir,
            "index.html",
            "<html><head><link rel=\"import\" href=\"x-el.html\"></head><body><script>B()</script></body></html>",
        );

        let html = inline(&dir, "index.html", &InlineOptions::default()).unwrap();
        assert!(html.contains(
            "<div hidden=\"\" by-vulcanize=\"\"><dom-module id=\"x-el\"><template><b>hi</b></template><script>A()</script></dom-module></div>"
        ));
        assert!(!html.contains("assetpath"));
    }

    #[test]
    fn nested_import_content_survives() {
        let dir = TempDir::new().unwrap();
        write(&dir, "el/leaf.html", "<p><em>leaf</em></p><script>leaf()</script>");
        write(&dir, "el/mid.html", "<link rel=\"import\" href=\"leaf.html\"><p>mid</p>");
        write(&dir, "index.html", "<body><link rel=\"import\" href=\"el/mid.html\"></body>");

        let html = inline(&dir, "index.html", &InlineOptions::default()).unwrap();
        assert!(html.contains("<p><em>leaf</em></p><script>leaf()</script><p>mid</p>"));
    }

    #[test]
    fn malformed_utf8_is_still_inlined() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("latin.js"), b"var s = 'caf\xe9';").unwrap();
        write(&dir, "index.html", "<body><script src=\"latin.js\"></script></body>");

        let html = inline(&dir, "index.html", &InlineOptions::default()).unwrap();
        assert!(html.contains("var s = 'caf\u{fffd}';"));
    }

    #[test]
    fn strips_comments_but_keeps_one_license() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.html", "<!-- @license MIT --><!-- a note --><p>a</p>");
        write(
            &dir,
            "index.html",
            "<body><!-- @license MIT --><!-- todo --><link rel=\"import\" href=\"a.html\"></body>",
        );

        let options = InlineOptions {
            strip_comments: true,
            ..InlineOptions::default()
        };
        let html = inline(&dir, "index.html", &options).unwrap();
        assert_eq!(html.matches("@license MIT").count(), 1);
        assert!(!html.contains("todo"));
        assert!(!html.contains("a note"));
    }

    #[test]
    fn inlines_stylesheets_when_asked() {
        let dir = TempDir::new().unwrap();
        write(&dir, "css/site.css", "body { background: url(bg.png) }");
        write(
            &dir,
            "index.html",
            "<head><link rel=\"stylesheet\" media=\"screen\" href=\"css/site.css\"></head>",
        );

        let html = inline(&dir, "index.html", &InlineOptions::default()).unwrap();
        assert!(html.contains("<link rel=\"stylesheet\""));

        let options = InlineOptions {
            inline_css: true,
            ..InlineOptions::default()
        };
        let html = inline(&dir, "index.html", &options).unwrap();
        assert!(html.contains("<style media=\"screen\">body { background: url(css/bg.png) }</style>"));
    }
}

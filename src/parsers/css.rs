//! CSS 引用重写
//!
//! 当一个被导入的文档被内联到入口文档中时，其样式里的相对 `url(...)` 和
//! `@import` 必须改写为相对于入口文档的路径，否则浏览器会从错误的目录加载资源。

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::utils::url::{is_relative_reference, relative_url, resolve_url, Url};

static CSS_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"url\(\s*(?:"([^"]*)"|'([^']*)'|([^)"'\s]*))\s*\)"#).expect("valid url() pattern")
});

static CSS_IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"@import\s+(?:"([^"]*)"|'([^']*)')"#).expect("valid @import pattern")
});

/// 将 `css`（原本位于 `css_url`）中的相对引用改写为相对于 `document_url`
pub fn relocate_css(css: &str, css_url: &Url, document_url: &Url) -> String {
    if css_url == document_url {
        return css.to_string();
    }

    let relocate = |value: &str| -> Option<String> {
        if !is_relative_reference(value) {
            return None;
        }
        resolve_url(css_url, value).map(|absolute| relative_url(document_url, &absolute))
    };

    let css = CSS_URL_RE.replace_all(css, |caps: &Captures| {
        let (quote, value) = quoted_value(caps);
        match relocate(value) {
            Some(relocated) => format!("url({quote}{relocated}{quote})"),
            None => caps[0].to_string(),
        }
    });

    CSS_IMPORT_RE
        .replace_all(&css, |caps: &Captures| {
            let (quote, value) = quoted_value(caps);
            match relocate(value) {
                Some(relocated) => format!("@import {quote}{relocated}{quote}"),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// 返回引用原本使用的引号以及引用本身
fn quoted_value<'a>(caps: &'a Captures) -> (&'static str, &'a str) {
    if let Some(m) = caps.get(1) {
        ("\"", m.as_str())
    } else if let Some(m) = caps.get(2) {
        ("'", m.as_str())
    } else {
        ("", caps.get(3).map(|m| m.as_str()).unwrap_or_default())
    }
}

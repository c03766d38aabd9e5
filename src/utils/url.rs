use std::path::{Path, PathBuf};

pub use url::Url;

/// 总是指向本地源码树之外的 URL 协议
const FOREIGN_SCHEMES: &[&str] = &["http", "https", "data", "blob", "javascript", "mailto", "tel"];

/// 文件路径转换为绝对 `file://` URL
pub fn path_to_url(path: &Path) -> Option<Url> {
    Url::from_file_path(path).ok()
}

/// `file://` URL 转换回文件路径
pub fn url_to_path(url: &Url) -> Option<PathBuf> {
    if url.scheme() != "file" {
        return None;
    }

    url.to_file_path().ok()
}

/// 以 `from` 处的文档为基准解析引用
pub fn resolve_url(from: &Url, href: &str) -> Option<Url> {
    from.join(href.trim()).ok()
}

/// 去掉查询串和片段，只保留定位磁盘文件的部分
pub fn clean_url(url: &Url) -> Url {
    let mut url = url.clone();
    url.set_fragment(None);
    url.set_query(None);
    url
}

/// 判断引用是否相对于所在文档
///
/// 根相对路径、协议相对 URL、片段、模板绑定以及带协议的 URL 都不算。
pub fn is_relative_reference(href: &str) -> bool {
    let href = href.trim();

    if href.is_empty()
        || href.starts_with('#')
        || href.starts_with('/')
        || href.starts_with('\\')
        || href.contains("{{")
        || href.contains("[[")
    {
        return false;
    }

    match Url::parse(href) {
        Ok(parsed) => !FOREIGN_SCHEMES.contains(&parsed.scheme()) && parsed.scheme() != "file",
        Err(_) => true,
    }
}

/// 判断引用是否指向不从磁盘读取的资源
pub fn is_foreign_reference(href: &str) -> bool {
    let href = href.trim();

    if href.starts_with("//") {
        return true;
    }

    match Url::parse(href) {
        Ok(parsed) => FOREIGN_SCHEMES.contains(&parsed.scheme()),
        Err(_) => false,
    }
}

/// 把 `target` 表示为相对于 `base` 处文档的 URL
///
/// `target` 恰好是 `base` 所在目录时返回 `./`。
pub fn relative_url(base: &Url, target: &Url) -> String {
    // make_relative 对文档自身所在目录给出 "/"，那是根相对路径
    if base.join("./").ok().as_ref() == Some(target) {
        return "./".to_string();
    }

    base.make_relative(target)
        .unwrap_or_else(|| target.to_string())
}

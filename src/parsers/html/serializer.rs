use encoding_rs::Encoding;
use html5ever::serialize::{serialize, SerializeOpts};
use markup5ever_rcdom::{Handle, RcDom, SerializableHandle};

use crate::core::BundleError;

use super::dom::{append_child, get_template_contents};

/// 序列化文档
///
/// 输出按文档原有的字符集编码，这样 `<meta charset>` 依然成立。
/// `<template>` 的内容会先被移回为元素的子节点，因此调用之后不应再遍历该 DOM。
pub fn serialize_document(dom: &RcDom, document_encoding: &str) -> Result<Vec<u8>, BundleError> {
    let mut buf: Vec<u8> = Vec::new();

    flatten_templates(&dom.document);

    let serializable: SerializableHandle = dom.document.clone().into();
    serialize(&mut buf, &serializable, SerializeOpts::default())
        .map_err(BundleError::Serialize)?;

    if buf.last() != Some(&b'\n') {
        buf.push(b'\n');
    }

    if let Some(encoding) = Encoding::for_label(document_encoding.as_bytes()) {
        if encoding != encoding_rs::UTF_8 {
            let s: &str = &String::from_utf8_lossy(&buf);
            let (data, _, _) = encoding.encode(s);
            buf = data.into_owned();
        }
    }

    Ok(buf)
}

/// RcDom 的序列化器不会输出 `<template>` 的内容片段
fn flatten_templates(node: &Handle) {
    if let Some(contents) = get_template_contents(node) {
        let moved: Vec<Handle> = contents.children.borrow().clone();
        for child in moved.iter() {
            append_child(node, child);
        }
    }

    let children: Vec<Handle> = node.children.borrow().clone();
    for child in children.iter() {
        flatten_templates(child);
    }
}

use std::cell::RefCell;
use std::rc::Rc;

use encoding_rs::Encoding;
use html5ever::interface::{Attribute, QualName};
use html5ever::parse_document;
use html5ever::tendril::{format_tendril, StrTendril, TendrilSink};
use html5ever::tree_builder::create_element;
use html5ever::{namespace_url, ns, LocalName};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom};

/// 将 HTML 字节转换为 DOM
pub fn html_to_dom(data: &[u8], document_encoding: &str) -> RcDom {
    let s: String = match Encoding::for_label(document_encoding.as_bytes()) {
        Some(encoding) => encoding.decode(data).0.into_owned(),
        None => String::from_utf8_lossy(data).into_owned(),
    };

    parse_document(RcDom::default(), Default::default()).one(s)
}

/// 解析文档并根据 `<meta charset>` 确定其编码
///
/// 先按 UTF-8 解析；如果文档声明了另一个有效的字符集，则用该字符集重新解析。
pub fn parse_html_document(data: &[u8]) -> (RcDom, String) {
    let mut document_encoding = "utf-8".to_string();
    let mut dom = html_to_dom(data, &document_encoding);

    if let Some(html_charset) = get_charset(&dom.document) {
        if let Some(charset) = Encoding::for_label_no_replacement(html_charset.trim().as_bytes()) {
            if charset != encoding_rs::UTF_8 {
                document_encoding = charset.name().to_string();
                dom = html_to_dom(data, &document_encoding);
            }
        }
    }

    (dom, document_encoding)
}

/// 获取文档声明的字符集
pub fn get_charset(node: &Handle) -> Option<String> {
    for meta_node in find_nodes(node, &["html", "head", "meta"]).iter() {
        if let Some(charset) = get_node_attr(meta_node, "charset") {
            return Some(charset);
        }

        if get_node_attr(meta_node, "http-equiv")
            .unwrap_or_default()
            .eq_ignore_ascii_case("content-type")
        {
            if let Some(content) = get_node_attr(meta_node, "content") {
                return content.split(';').skip(1).find_map(|part| {
                    part.trim()
                        .strip_prefix("charset=")
                        .map(|charset| charset.trim_matches('"').to_string())
                });
            }
        }
    }

    None
}

/// 查找指定路径的DOM节点
pub fn find_nodes(node: &Handle, node_names: &[&str]) -> Vec<Handle> {
    let mut found_nodes = Vec::new();
    let Some((node_name, rest)) = node_names.split_first() else {
        return found_nodes;
    };

    let matches = get_node_name(node) == Some(*node_name);

    if matches && rest.is_empty() {
        found_nodes.push(node.clone());
    }

    for child_node in node.children.borrow().iter() {
        if matches && !rest.is_empty() {
            found_nodes.append(&mut find_nodes(child_node, rest));
        } else {
            found_nodes.append(&mut find_nodes(child_node, node_names));
        }
    }

    found_nodes
}

/// 获取节点属性值
pub fn get_node_attr(node: &Handle, attr_name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|attr| &*attr.name.local == attr_name)
            .map(|attr| attr.value.to_string()),
        _ => None,
    }
}

/// 获取节点名称
pub fn get_node_name(node: &Handle) -> Option<&'_ str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.as_ref()),
        _ => None,
    }
}

/// 获取 `<template>` 元素的内容片段
pub fn get_template_contents(node: &Handle) -> Option<Handle> {
    match &node.data {
        NodeData::Element {
            template_contents, ..
        } => template_contents.borrow().clone(),
        _ => None,
    }
}

/// 设置节点属性；`None` 表示删除该属性
pub fn set_node_attr(node: &Handle, attr_name: &str, attr_value: Option<String>) {
    let NodeData::Element { attrs, .. } = &node.data else {
        return;
    };
    let mut attrs = attrs.borrow_mut();

    match attr_value {
        Some(value) => {
            if let Some(attr) = attrs.iter_mut().find(|attr| &*attr.name.local == attr_name) {
                attr.value.clear();
                attr.value.push_slice(&value);
            } else {
                attrs.push(Attribute {
                    name: QualName::new(None, ns!(), LocalName::from(attr_name)),
                    value: format_tendril!("{}", value),
                });
            }
        }
        None => attrs.retain(|attr| &*attr.name.local != attr_name),
    }
}

/// 创建一个新的元素节点
pub fn new_element(dom: &RcDom, name: &str, attrs: &[(&str, &str)]) -> Handle {
    create_element(
        dom,
        QualName::new(None, ns!(html), LocalName::from(name)),
        attrs
            .iter()
            .map(|(attr_name, attr_value)| Attribute {
                name: QualName::new(None, ns!(), LocalName::from(*attr_name)),
                value: format_tendril!("{}", attr_value),
            })
            .collect(),
    )
}

/// 创建一个新的文本节点
pub fn new_text(text: &str) -> Handle {
    Node::new(NodeData::Text {
        contents: RefCell::new(StrTendril::from(text)),
    })
}

/// 获取父节点
pub fn get_parent_node(child: &Handle) -> Option<Handle> {
    let weak = child.parent.take();
    let parent = weak.as_ref().and_then(|node| node.upgrade());
    child.parent.set(weak);
    parent
}

/// 将节点从其父节点中移除
pub fn detach(node: &Handle) {
    if let Some(parent) = get_parent_node(node) {
        parent
            .children
            .borrow_mut()
            .retain(|child| !Rc::ptr_eq(child, node));
    }
    node.parent.set(None);
}

/// 将节点追加为最后一个子节点
pub fn append_child(parent: &Handle, child: &Handle) {
    detach(child);
    child.parent.set(Some(Rc::downgrade(parent)));
    parent.children.borrow_mut().push(child.clone());
}

/// 将节点插入为第一个子节点
pub fn prepend_child(parent: &Handle, child: &Handle) {
    detach(child);
    child.parent.set(Some(Rc::downgrade(parent)));
    parent.children.borrow_mut().insert(0, child.clone());
}

/// 在 `sibling` 之前插入节点
pub fn insert_before(sibling: &Handle, new_node: &Handle) {
    let Some(parent) = get_parent_node(sibling) else {
        return;
    };

    detach(new_node);
    let mut children = parent.children.borrow_mut();
    let index = children
        .iter()
        .position(|child| Rc::ptr_eq(child, sibling))
        .unwrap_or(children.len());
    new_node.parent.set(Some(Rc::downgrade(&parent)));
    children.insert(index, new_node.clone());
}

/// 拼接所有直接文本子节点的内容
pub fn get_text_content(node: &Handle) -> String {
    let mut text = String::new();
    for child_node in node.children.borrow().iter() {
        if let NodeData::Text { ref contents } = child_node.data {
            text.push_str(&contents.borrow());
        }
    }
    text
}

/// 用一个文本节点替换全部子节点
pub fn set_text_content(node: &Handle, text: &str) {
    let children: Vec<Handle> = node.children.borrow_mut().drain(..).collect();
    for child in children {
        child.parent.set(None);
    }
    append_child(node, &new_text(text));
}

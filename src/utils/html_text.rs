// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::utils::url_utils::resolve_url;

/// 整个子树被丢弃的标签
const SKIPPED_TAGS: &[&str] = &[
    "script", "style", "noscript", "template", "svg", "iframe", "nav", "header", "footer", "form",
];

/// 前后换行的块级标签
const BLOCK_TAGS: &[&str] = &[
    "p", "div", "section", "article", "main", "aside", "ul", "ol", "li", "table", "tr", "h1", "h2",
    "h3", "h4", "h5", "h6", "blockquote", "pre", "figure", "figcaption", "dl", "dt", "dd",
];

static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("title").expect("valid title selector"));
static OG_IMAGE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"meta[property="og:image"]"#).expect("valid og:image selector")
});
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// 从HTML中提取出的页面文本
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    /// `<title>` 内容
    pub title: Option<String>,
    /// `og:image` 声明的图片地址（已解析为绝对URL）
    pub image_url: Option<String>,
    /// 可读正文，每个块一行
    pub text: String,
}

impl PageText {
    /// 供模型阅读的正文；存在 `og:image` 时在首行给出图片地址
    pub fn into_content(self) -> String {
        match self.image_url {
            Some(image) => format!("Image: {}\n{}", image, self.text),
            None => self.text,
        }
    }
}

/// 将HTML转换为可读文本
///
/// `base_url` 用于把相对的图片地址解析为绝对地址。
pub fn extract_page_text(html: &str, base_url: Option<&Url>) -> PageText {
    let document = Html::parse_document(html);

    let title = document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|el| normalize_line(&el.text().collect::<String>()))
        .filter(|t| !t.is_empty());

    let image_url = document
        .select(&OG_IMAGE_SELECTOR)
        .filter_map(|el| el.value().attr("content"))
        .map(str::trim)
        .find(|src| !src.is_empty())
        .map(|src| match base_url {
            Some(base) => resolve_url(base, src)
                .map(|u| u.to_string())
                .unwrap_or_else(|_| src.to_string()),
            None => src.to_string(),
        });

    let mut raw = String::new();
    let body = document
        .root_element()
        .children()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "body");
    match body {
        Some(body) => collect_text(body, &mut raw),
        None => collect_text(document.root_element(), &mut raw),
    }

    PageText {
        title,
        image_url,
        text: normalize_text(&raw),
    }
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => {
                let name = el.name();
                if SKIPPED_TAGS.contains(&name) {
                    continue;
                }
                if name == "br" {
                    out.push('\n');
                    continue;
                }
                let Some(child_el) = ElementRef::wrap(child) else {
                    continue;
                };
                let is_block = BLOCK_TAGS.contains(&name);
                if is_block {
                    out.push('\n');
                }
                if name == "li" {
                    out.push_str("- ");
                }
                collect_text(child_el, out);
                if is_block {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }
}

fn normalize_line(line: &str) -> String {
    WHITESPACE.replace_all(line, " ").trim().to_string()
}

/// 规范化空白：行内空白折叠为单个空格，删除空行
fn normalize_text(raw: &str) -> String {
    raw.lines()
        .map(normalize_line)
        .filter(|line| !line.is_empty() && line != "-")
        .collect::<Vec<_>>()
        .join("\n")
}

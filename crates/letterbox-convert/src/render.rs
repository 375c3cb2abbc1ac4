//! Markdown rendering of a prepared document tree
//!
//! The dialect is fixed: ATX headings, `**bold**`, `*italic*` and
//! `[text](url)` links. Table structure and `center` are stripped down to
//! their contents, so row boundaries only survive through the newlines
//! injected by [`crate::sanitize`].

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html};

static NEWLINE_WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\t\n\x0C\r ]*\n[\t\n\x0C\r ]*").unwrap());

/// Bullets used for unordered lists, cycled by nesting depth
const BULLETS: [char; 3] = ['*', '+', '-'];

/// Elements that never emit anything
const SILENT_ELEMENTS: &[&str] = &["meta", "link", "base", "template", "noscript"];

/// Elements that start their own line; blank text beside them is layout only
const BLOCK_ELEMENTS: &[&str] = &[
    "p", "div", "h1", "h2", "h3", "h4", "h5", "h6", "li", "ul", "ol", "tr", "table", "thead",
    "tbody", "tfoot", "blockquote", "pre", "hr",
];

/// Element nesting rendered structurally; deeper subtrees become plain text
pub const MAX_RENDER_DEPTH: usize = 256;

#[derive(Debug, Clone, Copy, Default)]
struct Context {
    in_pre: bool,
    list_depth: usize,
    depth: usize,
}

impl Context {
    fn descend(self) -> Self {
        Self {
            depth: self.depth + 1,
            ..self
        }
    }

    fn pre(self) -> Self {
        Self {
            in_pre: true,
            ..self
        }
    }

    fn nested_list(self) -> Self {
        Self {
            list_depth: self.list_depth + 1,
            ..self
        }
    }
}

/// Render the whole document to unnormalized Markdown.
pub fn render(document: &Html) -> String {
    render_children(&document.root_element(), Context::default())
}

fn render_children(element: &ElementRef, ctx: Context) -> String {
    let mut out = String::new();
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            out.push_str(&render_element(&child_element, ctx));
        } else if let Some(text_node) = child.value().as_text() {
            let beside_block = is_block(child.prev_sibling().and_then(ElementRef::wrap))
                || is_block(child.next_sibling().and_then(ElementRef::wrap));
            if !ctx.in_pre && beside_block && is_blank(text_node) {
                if text_node.contains('\n') {
                    out.push('\n');
                }
                continue;
            }
            out.push_str(&render_text(text_node, ctx));
        }
    }
    out
}

fn is_block(sibling: Option<ElementRef>) -> bool {
    sibling.is_some_and(|element| BLOCK_ELEMENTS.contains(&element.value().name()))
}

fn is_blank(text: &str) -> bool {
    text.chars()
        .all(|c| matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0C'))
}

/// Plain text of a subtree nested past [`MAX_RENDER_DEPTH`]
fn render_flat(element: &ElementRef, ctx: Context) -> String {
    let text: String = element.text().collect();
    render_text(&text, ctx)
}

fn render_text(text: &str, ctx: Context) -> String {
    if ctx.in_pre {
        text.to_string()
    } else {
        NEWLINE_WHITESPACE.replace_all(text, "\n").into_owned()
    }
}

fn render_element(element: &ElementRef, ctx: Context) -> String {
    if ctx.depth >= MAX_RENDER_DEPTH {
        return render_flat(element, ctx);
    }
    let ctx = ctx.descend();

    let name = element.value().name();
    if SILENT_ELEMENTS.contains(&name) {
        return String::new();
    }

    match name {
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            let level = name[1..].parse::<usize>().unwrap_or(1);
            render_heading(element, level, ctx)
        }
        "p" => {
            let inner = render_children(element, ctx);
            let inner = inner.trim();
            if inner.is_empty() {
                String::new()
            } else {
                format!("\n\n{}\n\n", inner)
            }
        }
        "b" | "strong" => wrap_inline(&render_children(element, ctx), "**"),
        "i" | "em" => wrap_inline(&render_children(element, ctx), "*"),
        "a" => render_link(element, ctx),
        "img" => render_image(element),
        "code" if !ctx.in_pre => wrap_inline(&render_children(element, ctx), "`"),
        "pre" => {
            let inner = render_children(element, ctx.pre());
            let inner = inner.trim_matches('\n');
            if inner.is_empty() {
                String::new()
            } else {
                format!("\n\n```\n{}\n```\n\n", inner)
            }
        }
        "blockquote" => render_blockquote(element, ctx),
        "hr" => "\n\n---\n\n".to_string(),
        "ul" => render_list(element, None, ctx),
        "ol" => {
            let start = element
                .value()
                .attr("start")
                .and_then(|s| s.trim().parse::<u64>().ok())
                .unwrap_or(1);
            render_list(element, Some(start), ctx)
        }
        "li" => render_list_item(element, &bullet(ctx.list_depth), ctx),
        // table, thead, tbody, tfoot, tr, td, th, center, br, div, span and
        // anything unknown keep only their contents
        _ => render_children(element, ctx),
    }
}

fn render_heading(element: &ElementRef, level: usize, ctx: Context) -> String {
    let inner = render_children(element, ctx);
    let text = inner.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.is_empty() {
        return String::new();
    }
    format!("\n\n{} {}\n\n", "#".repeat(level.clamp(1, 6)), text)
}

fn render_link(element: &ElementRef, ctx: Context) -> String {
    let inner = render_children(element, ctx);
    match element.value().attr("href").filter(|href| !href.is_empty()) {
        Some(href) => {
            let (prefix, text, suffix) = chomp(&inner);
            if text.is_empty() {
                format!("{}{}", prefix, suffix)
            } else {
                format!("{}[{}]({}){}", prefix, text, href, suffix)
            }
        }
        None => inner,
    }
}

fn render_image(element: &ElementRef) -> String {
    let src = element.value().attr("src").unwrap_or("");
    if src.is_empty() {
        return String::new();
    }
    let alt = element.value().attr("alt").unwrap_or("");
    format!("![{}]({})", alt, src)
}

fn render_blockquote(element: &ElementRef, ctx: Context) -> String {
    let inner = render_children(element, ctx);
    let inner = inner.trim();
    if inner.is_empty() {
        return String::new();
    }
    let quoted = inner
        .lines()
        .map(|line| {
            if line.is_empty() {
                ">".to_string()
            } else {
                format!("> {}", line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!("\n\n{}\n\n", quoted)
}

/// Render `ul` (`start == None`) or `ol` children.
///
/// Whitespace-only text between items is dropped so that items stay
/// on consecutive lines.
fn render_list(element: &ElementRef, start: Option<u64>, ctx: Context) -> String {
    let mut items = String::new();
    let mut number = start;

    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            if child_element.value().name() == "li" {
                let marker = match number.as_mut() {
                    Some(n) => {
                        let marker = format!("{}.", n);
                        *n = n.saturating_add(1);
                        marker
                    }
                    None => bullet(ctx.list_depth),
                };
                items.push_str(&render_list_item(&child_element, &marker, ctx));
            } else {
                items.push_str(&render_element(&child_element, ctx));
            }
        } else if let Some(text_node) = child.value().as_text() {
            if !text_node.trim().is_empty() {
                items.push_str(&render_text(text_node, ctx));
            }
        }
    }

    if ctx.list_depth == 0 {
        format!("\n\n{}\n\n", items)
    } else {
        format!("\n{}", items)
    }
}

fn render_list_item(element: &ElementRef, marker: &str, ctx: Context) -> String {
    let inner = render_children(element, ctx.nested_list());
    let inner = inner.trim();
    let mut lines = inner.lines();
    let mut out = format!("{} {}\n", marker, lines.next().unwrap_or(""));
    for line in lines {
        if !line.is_empty() {
            out.push('\t');
        }
        out.push_str(line);
        out.push('\n');
    }
    out
}

fn bullet(depth: usize) -> String {
    BULLETS[depth % BULLETS.len()].to_string()
}

/// Wrap inline content in `marker`, keeping surrounding whitespace outside.
fn wrap_inline(content: &str, marker: &str) -> String {
    let (prefix, text, suffix) = chomp(content);
    if text.is_empty() {
        return format!("{}{}", prefix, suffix);
    }
    format!("{}{}{}{}{}", prefix, marker, text, marker, suffix)
}

fn chomp(content: &str) -> (&str, &str, &str) {
    let trimmed_start = content.trim_start();
    let prefix = &content[..content.len() - trimmed_start.len()];
    let text = trimmed_start.trim_end();
    let suffix = &trimmed_start[text.len()..];
    (prefix, text, suffix)
}

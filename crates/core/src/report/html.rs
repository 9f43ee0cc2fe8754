use crate::report::markup::{Block, Document, Inline};
use std::fmt::Write;

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render(doc: &Document) -> String {
    let mut out = String::new();
    render_blocks(&doc.blocks, &mut out);
    out
}

fn class_attr(classes: &[&str]) -> String {
    if classes.is_empty() {
        String::new()
    } else {
        format!(" class=\"{}\"", escape(&classes.join(" ")))
    }
}

fn render_blocks(blocks: &[Block], out: &mut String) {
    for block in blocks {
        render_block(block, out);
    }
}

fn render_block(block: &Block, out: &mut String) {
    match block {
        Block::Heading {
            level,
            classes,
            content,
        } => {
            let _ = write!(out, "<h{level}{}>", class_attr(classes));
            render_inlines(content, out);
            let _ = writeln!(out, "</h{level}>");
        }
        Block::Paragraph(inlines) => {
            out.push_str("<p>");
            render_inlines(inlines, out);
            out.push_str("</p>\n");
        }
        Block::Plain(inlines) => render_inlines(inlines, out),
        Block::List { start, items } => {
            match start {
                Some(1) => out.push_str("<ol>\n"),
                Some(n) => {
                    let _ = writeln!(out, "<ol start=\"{n}\">");
                }
                None => out.push_str("<ul>\n"),
            }
            for item in items {
                out.push_str("<li>");
                render_blocks(item, out);
                out.push_str("</li>\n");
            }
            out.push_str(if start.is_some() { "</ol>\n" } else { "</ul>\n" });
        }
        Block::BlockQuote(inner) => {
            out.push_str("<blockquote>\n");
            render_blocks(inner, out);
            out.push_str("</blockquote>\n");
        }
        Block::CodeBlock { lang, code } => {
            match lang {
                Some(lang) => {
                    let _ = write!(out, "<pre><code class=\"language-{}\">", escape(lang));
                }
                None => out.push_str("<pre><code>"),
            }
            out.push_str(&escape(code));
            out.push_str("</code></pre>\n");
        }
        Block::Rule => out.push_str("<hr />\n"),
        Block::Html(html) => out.push_str(html),
    }
}

fn render_inlines(inlines: &[Inline], out: &mut String) {
    for inline in inlines {
        render_inline(inline, out);
    }
}

fn render_inline(inline: &Inline, out: &mut String) {
    match inline {
        Inline::Text(s) => out.push_str(&escape(s)),
        Inline::Code(s) => {
            let _ = write!(out, "<code>{}</code>", escape(s));
        }
        Inline::Emphasis(content) => wrap("em", content, out),
        Inline::Strikethrough(content) => wrap("del", content, out),
        Inline::Strong { sentiment, content } => {
            match sentiment {
                Some(s) => {
                    let _ = write!(out, "<strong class=\"{}\">", s.css_class());
                }
                None => out.push_str("<strong>"),
            }
            render_inlines(content, out);
            out.push_str("</strong>");
        }
        Inline::Link {
            dest,
            title,
            content,
        } => {
            let _ = write!(out, "<a href=\"{}\"", escape(dest));
            if !title.is_empty() {
                let _ = write!(out, " title=\"{}\"", escape(title));
            }
            out.push('>');
            render_inlines(content, out);
            out.push_str("</a>");
        }
        Inline::Image { dest, title, alt } => {
            let _ = write!(out, "<img src=\"{}\" alt=\"{}\"", escape(dest), escape(alt));
            if !title.is_empty() {
                let _ = write!(out, " title=\"{}\"", escape(title));
            }
            out.push_str(" />");
        }
        Inline::SoftBreak => out.push('\n'),
        Inline::HardBreak => out.push_str("<br />\n"),
        Inline::Html(html) => out.push_str(html),
    }
}

fn wrap(tag: &str, content: &[Inline], out: &mut String) {
    let _ = write!(out, "<{tag}>");
    render_inlines(content, out);
    let _ = write!(out, "</{tag}>");
}

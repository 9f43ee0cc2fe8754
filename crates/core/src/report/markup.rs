use crate::report::annotate::Sentiment;
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading {
        level: u8,
        classes: Vec<&'static str>,
        content: Vec<Inline>,
    },
    Paragraph(Vec<Inline>),
    Plain(Vec<Inline>),
    List {
        start: Option<u64>,
        items: Vec<Vec<Block>>,
    },
    BlockQuote(Vec<Block>),
    CodeBlock {
        lang: Option<String>,
        code: String,
    },
    Rule,
    Html(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Text(String),
    Code(String),
    Emphasis(Vec<Inline>),
    Strong {
        sentiment: Option<Sentiment>,
        content: Vec<Inline>,
    },
    Strikethrough(Vec<Inline>),
    Link {
        dest: String,
        title: String,
        content: Vec<Inline>,
    },
    Image {
        dest: String,
        title: String,
        alt: String,
    },
    SoftBreak,
    HardBreak,
    Html(String),
}

impl Inline {
    fn push_plain_text(&self, out: &mut String) {
        match self {
            Self::Text(s) | Self::Code(s) => out.push_str(s),
            Self::Emphasis(c) | Self::Strikethrough(c) => push_all(c, out),
            Self::Strong { content, .. } | Self::Link { content, .. } => push_all(content, out),
            Self::Image { alt, .. } => out.push_str(alt),
            Self::SoftBreak | Self::HardBreak => out.push(' '),
            Self::Html(_) => {}
        }
    }
}

pub fn plain_text(inlines: &[Inline]) -> String {
    let mut out = String::new();
    push_all(inlines, &mut out);
    out
}

fn push_all(inlines: &[Inline], out: &mut String) {
    for inline in inlines {
        inline.push_plain_text(out);
    }
}

pub fn parse(text: &str) -> Document {
    let mut builder = TreeBuilder {
        events: Parser::new_ext(text, Options::ENABLE_STRIKETHROUGH),
    };
    Document {
        blocks: builder.blocks(),
    }
}

struct TreeBuilder<'a> {
    events: Parser<'a>,
}

impl<'a> TreeBuilder<'a> {
    fn blocks(&mut self) -> Vec<Block> {
        let mut out = Vec::new();
        let mut loose: Vec<Inline> = Vec::new();

        while let Some(event) = self.events.next() {
            let block = match event {
                Event::End(_) => break,
                Event::Start(Tag::Paragraph) => Block::Paragraph(self.inlines()),
                Event::Start(Tag::Heading { level, .. }) => Block::Heading {
                    level: heading_level(level),
                    classes: Vec::new(),
                    content: self.inlines(),
                },
                Event::Start(Tag::BlockQuote(_)) => Block::BlockQuote(self.blocks()),
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => info
                            .split_whitespace()
                            .next()
                            .map(str::to_string),
                        CodeBlockKind::Indented => None,
                    };
                    Block::CodeBlock {
                        lang,
                        code: self.raw_text(),
                    }
                }
                Event::Start(Tag::List(start)) => Block::List {
                    start,
                    items: self.list_items(),
                },
                Event::Start(Tag::HtmlBlock) => Block::Html(self.raw_text()),
                Event::Rule => Block::Rule,
                Event::Html(html) => Block::Html(html.into_string()),
                other => {
                    if let Some(inline) = self.inline(other) {
                        push_inline(&mut loose, inline);
                    }
                    continue;
                }
            };

            if !loose.is_empty() {
                out.push(Block::Plain(std::mem::take(&mut loose)));
            }
            out.push(block);
        }

        if !loose.is_empty() {
            out.push(Block::Plain(loose));
        }
        out
    }

    fn list_items(&mut self) -> Vec<Vec<Block>> {
        let mut items = Vec::new();
        while let Some(event) = self.events.next() {
            match event {
                Event::Start(Tag::Item) => items.push(self.blocks()),
                Event::End(_) => break,
                _ => {}
            }
        }
        items
    }

    fn inlines(&mut self) -> Vec<Inline> {
        let mut out = Vec::new();
        while let Some(event) = self.events.next() {
            if let Event::End(_) = event {
                break;
            }
            if let Some(inline) = self.inline(event) {
                push_inline(&mut out, inline);
            }
        }
        out
    }

    fn inline(&mut self, event: Event<'a>) -> Option<Inline> {
        let inline = match event {
            Event::Text(s) => Inline::Text(s.into_string()),
            Event::Code(s) => Inline::Code(s.into_string()),
            Event::InlineHtml(s) => Inline::Html(s.into_string()),
            Event::SoftBreak => Inline::SoftBreak,
            Event::HardBreak => Inline::HardBreak,
            Event::Start(Tag::Emphasis) => Inline::Emphasis(self.inlines()),
            Event::Start(Tag::Strong) => Inline::Strong {
                sentiment: None,
                content: self.inlines(),
            },
            Event::Start(Tag::Strikethrough) => Inline::Strikethrough(self.inlines()),
            Event::Start(Tag::Link {
                dest_url, title, ..
            }) => Inline::Link {
                dest: dest_url.into_string(),
                title: title.into_string(),
                content: self.inlines(),
            },
            Event::Start(Tag::Image {
                dest_url, title, ..
            }) => Inline::Image {
                dest: dest_url.into_string(),
                title: title.into_string(),
                alt: plain_text(&self.inlines()),
            },
            Event::Start(_) => {
                // Constructs the report never uses; keep their text.
                return Some(Inline::Text(plain_text(&self.inlines())));
            }
            _ => return None,
        };
        Some(inline)
    }

    fn raw_text(&mut self) -> String {
        let mut out = String::new();
        while let Some(event) = self.events.next() {
            match event {
                Event::End(_) => break,
                Event::Text(s) | Event::Html(s) => out.push_str(&s),
                _ => {}
            }
        }
        out
    }
}

fn push_inline(out: &mut Vec<Inline>, inline: Inline) {
    if let (Some(Inline::Text(prev)), Inline::Text(next)) = (out.last_mut(), &inline) {
        prev.push_str(next);
        return;
    }
    out.push(inline);
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

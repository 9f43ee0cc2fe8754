use crate::report::markup::{plain_text, Block, Document, Inline};

pub const SECTION_HEADER_CLASS: &str = "section-header";

pub const SECTION_HEADING_LEVEL: u8 = 2;

const NEGATIVE_KEYWORDS: [&str; 6] = ["decline", "drop", "fall", "decrease", "-", "negative"];
const POSITIVE_KEYWORDS: [&str; 5] = ["increase", "rise", "grow", "positive", "+"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    Negative,
    Positive,
}

impl Sentiment {
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Negative => "negative",
            Self::Positive => "positive",
        }
    }

    /// Case-insensitive substring match. Negative keywords are tested first, so a
    /// phrase matching both sets is negative. Phrases matching neither stay `None`.
    pub fn classify_phrase(text: &str) -> Option<Self> {
        let lower = text.to_lowercase();
        if NEGATIVE_KEYWORDS.iter().any(|k| lower.contains(k)) {
            Some(Self::Negative)
        } else if POSITIVE_KEYWORDS.iter().any(|k| lower.contains(k)) {
            Some(Self::Positive)
        } else {
            None
        }
    }

    pub fn from_sign(value: f64) -> Self {
        if value < 0.0 {
            Self::Negative
        } else {
            Self::Positive
        }
    }
}

pub fn annotate(doc: &mut Document) {
    annotate_blocks(&mut doc.blocks);
}

fn annotate_blocks(blocks: &mut [Block]) {
    for block in blocks {
        match block {
            Block::Heading {
                level,
                classes,
                content,
            } => {
                if *level == SECTION_HEADING_LEVEL && !classes.contains(&SECTION_HEADER_CLASS) {
                    classes.push(SECTION_HEADER_CLASS);
                }
                annotate_inlines(content);
            }
            Block::Paragraph(inlines) | Block::Plain(inlines) => annotate_inlines(inlines),
            Block::List { items, .. } => {
                for item in items {
                    annotate_blocks(item);
                }
            }
            Block::BlockQuote(inner) => annotate_blocks(inner),
            Block::CodeBlock { .. } | Block::Rule | Block::Html(_) => {}
        }
    }
}

fn annotate_inlines(inlines: &mut [Inline]) {
    for inline in inlines {
        match inline {
            Inline::Strong { sentiment, content } => {
                *sentiment = Sentiment::classify_phrase(&plain_text(content));
                annotate_inlines(content);
            }
            Inline::Emphasis(content)
            | Inline::Strikethrough(content)
            | Inline::Link { content, .. } => annotate_inlines(content),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::markup::parse;

    fn strong_sentiments(doc: &Document) -> Vec<Option<Sentiment>> {
        fn walk_inlines(inlines: &[Inline], out: &mut Vec<Option<Sentiment>>) {
            for inline in inlines {
                match inline {
                    Inline::Strong { sentiment, content } => {
                        out.push(*sentiment);
                        walk_inlines(content, out);
                    }
                    Inline::Emphasis(c) | Inline::Strikethrough(c) => walk_inlines(c, out),
                    Inline::Link { content, .. } => walk_inlines(content, out),
                    _ => {}
                }
            }
        }
        fn walk_blocks(blocks: &[Block], out: &mut Vec<Option<Sentiment>>) {
            for block in blocks {
                match block {
                    Block::Heading { content, .. } => walk_inlines(content, out),
                    Block::Paragraph(i) | Block::Plain(i) => walk_inlines(i, out),
                    Block::List { items, .. } => items.iter().for_each(|b| walk_blocks(b, out)),
                    Block::BlockQuote(b) => walk_blocks(b, out),
                    _ => {}
                }
            }
        }
        let mut out = Vec::new();
        walk_blocks(&doc.blocks, &mut out);
        out
    }

    #[test]
    fn negative_keywords_take_precedence() {
        assert_eq!(
            Sentiment::classify_phrase("Decrease of +2%"),
            Some(Sentiment::Negative)
        );
    }

    #[test]
    fn keyword_matching_is_case_insensitive_substring() {
        assert_eq!(Sentiment::classify_phrase("Sharp DECLINES"), Some(Sentiment::Negative));
        assert_eq!(Sentiment::classify_phrase("Exports rise sharply"), Some(Sentiment::Positive));
        assert_eq!(Sentiment::classify_phrase("+4.2%"), Some(Sentiment::Positive));
        assert_eq!(Sentiment::classify_phrase("Key takeaway"), None);
    }

    #[test]
    fn hyphenated_ticker_reads_as_negative() {
        // Naive substring rule: the hyphen alone is a negative keyword.
        assert_eq!(Sentiment::classify_phrase("BRK-B gained"), Some(Sentiment::Negative));
    }

    #[test]
    fn sign_rule_is_strict() {
        assert_eq!(Sentiment::from_sign(-0.01), Sentiment::Negative);
        assert_eq!(Sentiment::from_sign(0.0), Sentiment::Positive);
        assert_eq!(Sentiment::from_sign(3.5), Sentiment::Positive);
    }

    #[test]
    fn keyword_and_sign_rules_may_disagree_on_the_same_figure() {
        // A +1.0% move described as a decrease from the prior week.
        let change = 1.0;
        assert_eq!(Sentiment::from_sign(change), Sentiment::Positive);
        assert_eq!(
            Sentiment::classify_phrase("1.0% decrease in gains"),
            Some(Sentiment::Negative)
        );

        // And a negative figure written without a sign or keyword stays unclassified.
        assert_eq!(Sentiment::from_sign(-2.5), Sentiment::Negative);
        assert_eq!(Sentiment::classify_phrase("2.5%"), None);
    }

    #[test]
    fn annotates_section_headings_only_at_level_two() {
        let mut doc = parse("# Title\n\n## Executive Summary\n\n### Detail\n");
        annotate(&mut doc);

        let classes: Vec<(u8, Vec<&str>)> = doc
            .blocks
            .iter()
            .filter_map(|b| match b {
                Block::Heading { level, classes, .. } => Some((*level, classes.clone())),
                _ => None,
            })
            .collect();
        assert_eq!(
            classes,
            vec![
                (1, vec![]),
                (2, vec![SECTION_HEADER_CLASS]),
                (3, vec![]),
            ]
        );
    }

    #[test]
    fn annotating_twice_does_not_duplicate_classes() {
        let mut doc = parse("## Outlook\n");
        annotate(&mut doc);
        annotate(&mut doc);
        let Block::Heading { classes, .. } = &doc.blocks[0] else {
            panic!("expected heading");
        };
        assert_eq!(classes.len(), 1);
    }

    #[test]
    fn classifies_strong_spans_everywhere() {
        let mut doc = parse(
            "## Market Performance Analysis\n\n\
             The Nikkei saw a **sharp drop** while gold had a **rise of 2%**.\n\n\
             * **Key takeaway:** stay defensive\n\n\
             > **Negative outlook** persists\n",
        );
        annotate(&mut doc);

        assert_eq!(
            strong_sentiments(&doc),
            vec![
                Some(Sentiment::Negative),
                Some(Sentiment::Positive),
                None,
                Some(Sentiment::Negative),
            ]
        );
    }
}

use super::{
    elements::{BulletItem, Slide, SlideElement, SlideFrontmatter},
    inline::tokenize_inline,
};
use std::mem;
use tracing::{debug, warn};

const SEPARATOR: &str = "---";

/// The keys that can show up in a slide's frontmatter.
const FRONTMATTER_KEYS: &[&str] = &["font", "align", "image-position", "image_position"];

#[derive(Clone, Debug, Default)]
pub struct ParserOptions {
    /// Whether a top level heading in a slide that already has a title starts a new slide.
    pub implicit_slide_ends: bool,
}

/// Parses a presentation into slides.
///
/// Parsing never fails: anything that isn't understood is turned into plain text.
#[derive(Default)]
pub struct SlideParser {
    options: ParserOptions,
}

impl SlideParser {
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }

    pub fn parse(&self, document: &str) -> Vec<Slide> {
        let lines: Vec<&str> = document.lines().collect();
        let mut slides = Vec::new();
        let mut builder = SlideBuilder::default();
        let mut index = 0;
        while let Some(line) = lines.get(index) {
            index += 1;
            if is_separator(line) {
                // A separator at the very beginning of a slide may instead open its frontmatter.
                if !builder.started {
                    if let Some(end) = find_frontmatter_end(&lines, index) {
                        builder.set_frontmatter(&lines[index..end]);
                        index = end + 1;
                        continue;
                    }
                }
                slides.extend(mem::take(&mut builder).finish());
                continue;
            }
            if self.options.implicit_slide_ends && builder.has_title() && is_title(line) {
                slides.extend(mem::take(&mut builder).finish());
            }
            builder.process_line(line);
        }
        slides.extend(builder.finish());
        slides
    }
}

#[derive(Default)]
struct SlideBuilder {
    slide: Slide,
    bullets: Vec<BulletItem>,
    started: bool,
}

impl SlideBuilder {
    fn has_title(&self) -> bool {
        !self.slide.title.is_empty()
    }

    fn set_frontmatter(&mut self, lines: &[&str]) {
        self.started = true;
        let contents = lines.join("\n");
        match serde_yaml::from_str::<SlideFrontmatter>(&contents) {
            Ok(frontmatter) => self.slide.frontmatter = Some(frontmatter),
            Err(e) => warn!("ignoring invalid slide frontmatter: {e}"),
        }
    }

    fn process_line(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            self.close_bullets();
            return;
        }
        self.started = true;
        if let Some(item) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
            self.bullets.push(BulletItem(tokenize_inline(item.trim())));
            return;
        }
        self.close_bullets();

        if let Some(title) = line.strip_prefix("# ") {
            let title = title.trim();
            if self.has_title() {
                self.push(SlideElement::Heading { level: 1, content: title.into() });
            } else {
                self.slide.title = title.into();
            }
        } else if let Some(content) = line.strip_prefix("## ") {
            self.push(SlideElement::Heading { level: 2, content: content.trim().into() });
        } else if let Some(content) = line.strip_prefix("### ") {
            self.push(SlideElement::Heading { level: 3, content: content.trim().into() });
        } else if let Some(image) = parse_image(line) {
            self.push(image);
        } else {
            for span in tokenize_inline(line) {
                self.push(span.into());
            }
        }
    }

    fn push(&mut self, element: SlideElement) {
        self.slide.elements.push(element);
    }

    fn close_bullets(&mut self) {
        if !self.bullets.is_empty() {
            let items = mem::take(&mut self.bullets);
            self.push(SlideElement::Bullets(items));
        }
    }

    fn finish(mut self) -> Option<Slide> {
        self.close_bullets();
        if self.slide.is_empty() {
            debug!("dropping empty slide");
            None
        } else {
            Some(self.slide)
        }
    }
}

fn is_separator(line: &str) -> bool {
    line.trim() == SEPARATOR
}

fn is_title(line: &str) -> bool {
    line.trim().starts_with("# ")
}

/// Finds the separator that closes a frontmatter block starting at `start`.
///
/// Only blank lines and `key: value` lines using a known frontmatter key can show up before the
/// closing separator, and there has to be at least one of the latter.
fn find_frontmatter_end(lines: &[&str], start: usize) -> Option<usize> {
    let mut has_entries = false;
    for (index, line) in lines.iter().enumerate().skip(start) {
        if is_separator(line) {
            return has_entries.then_some(index);
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if !is_frontmatter_entry(line) {
            return None;
        }
        has_entries = true;
    }
    None
}

fn is_frontmatter_entry(line: &str) -> bool {
    match line.split_once(':') {
        Some((key, _)) => FRONTMATTER_KEYS.contains(&key.trim_end()),
        None => false,
    }
}

fn parse_image(line: &str) -> Option<SlideElement> {
    let inner = line.strip_prefix("![")?.strip_suffix(')')?;
    let (alt, filename) = inner.split_once("](")?;
    if filename.is_empty() {
        return None;
    }
    Some(SlideElement::Image { alt: alt.into(), filename: filename.into() })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::markdown::elements::{Alignment, ImagePosition, InlineSpan, Link};
    use rstest::rstest;

    fn parse(input: &str) -> Vec<Slide> {
        SlideParser::default().parse(input)
    }

    fn parse_single(input: &str) -> Slide {
        let mut slides = parse(input);
        assert_eq!(slides.len(), 1, "expected a single slide");
        slides.remove(0)
    }

    #[test]
    fn title_only() {
        let slide = parse_single("# Title");
        assert_eq!(slide.title, "Title");
        assert!(slide.elements.is_empty());
        assert!(slide.frontmatter.is_none());
    }

    #[rstest]
    #[case::one(1)]
    #[case::two(2)]
    #[case::five(5)]
    fn separators_split_slides(#[case] separators: usize) {
        let blocks: Vec<_> = (0..=separators).map(|index| format!("# Slide {index}\n\nsome text\n")).collect();
        let input = blocks.join("---\n");
        let slides = parse(&input);
        assert_eq!(slides.len(), separators + 1);
        for (index, slide) in slides.iter().enumerate() {
            assert_eq!(slide.title, format!("Slide {index}"));
        }
    }

    #[rstest]
    #[case::consecutive("# A\n---\n---\n# B")]
    #[case::many_consecutive("# A\n---\n---\n---\n---\n# B")]
    #[case::leading("---\n# A\n---\n# B")]
    #[case::trailing("# A\n---\n# B\n---\n")]
    #[case::blank_block("# A\n---\n\n\n---\n# B")]
    fn empty_blocks_are_dropped(#[case] input: &str) {
        let slides = parse(input);
        let titles: Vec<_> = slides.iter().map(|slide| slide.title.as_str()).collect();
        assert_eq!(titles, &["A", "B"]);
    }

    #[test]
    fn empty_document() {
        assert!(parse("").is_empty());
        assert!(parse("\n\n---\n\n").is_empty());
    }

    #[test]
    fn untitled_slide() {
        let slide = parse_single("hello");
        assert_eq!(slide.title, "");
        assert_eq!(slide.elements, &[SlideElement::plain_text("hello")]);
    }

    #[test]
    fn leading_frontmatter() {
        let input = r"---
font: big
align: center
image-position: 10, 5
---
# Hi
";
        let slide = parse_single(input);
        let expected = SlideFrontmatter {
            font: Some("big".into()),
            align: Alignment::Center,
            image_position: Some(ImagePosition { column: 10, row: 5 }),
        };
        assert_eq!(slide.frontmatter, Some(expected));
        assert_eq!(slide.title, "Hi");
    }

    #[test]
    fn frontmatter_after_separator() {
        let input = r"# A
---
---
align: right
image_position: 1, 2
---
# B
";
        let slides = parse(input);
        assert_eq!(slides.len(), 2);
        assert!(slides[0].frontmatter.is_none());
        let frontmatter = slides[1].frontmatter.as_ref().expect("no frontmatter");
        assert_eq!(frontmatter.align, Alignment::Right);
        assert_eq!(frontmatter.image_position, Some(ImagePosition { column: 1, row: 2 }));
        assert_eq!(slides[1].title, "B");
    }

    #[test]
    fn unclosed_frontmatter_is_content() {
        let slides = parse("# A\n---\n---\nfont: big\n");
        assert_eq!(slides.len(), 2);
        assert_eq!(slides[1].frontmatter, None);
        assert_eq!(slides[1].elements, &[SlideElement::plain_text("font: big")]);
    }

    #[test]
    fn interrupted_frontmatter_is_boundary() {
        let slides = parse("---\nfont: big\n# Title\n---\n# Next");
        let titles: Vec<_> = slides.iter().map(|slide| slide.title.as_str()).collect();
        assert_eq!(titles, &["Title", "Next"]);
        assert_eq!(slides[0].elements, &[SlideElement::plain_text("font: big")]);
        assert!(slides[0].frontmatter.is_none());
    }

    #[test]
    fn separator_after_content_is_boundary() {
        let slides = parse("# A\ntext\n---\nfont: big\n---\n# B");
        assert_eq!(slides.len(), 3);
        assert_eq!(slides[1].elements, &[SlideElement::plain_text("font: big")]);
    }

    #[test]
    fn invalid_frontmatter_is_ignored() {
        let slide = parse_single("---\nalign: diagonal\n---\n# Hi");
        assert_eq!(slide.title, "Hi");
        assert!(slide.frontmatter.is_none());
    }

    #[test]
    fn key_value_content_is_not_frontmatter() {
        let slides = parse("# A\n---\n---\nNote: this is important\n---\n# B\ntext");
        let titles: Vec<_> = slides.iter().map(|slide| slide.title.as_str()).collect();
        assert_eq!(titles, &["A", "", "B"]);
        assert_eq!(slides[1].elements, &[SlideElement::plain_text("Note: this is important")]);
        assert!(slides.iter().all(|slide| slide.frontmatter.is_none()));
    }

    #[rstest]
    #[case::unknown_key("---\ntheme: dark\nfont: small\n---\n# Hi")]
    #[case::content_line("---\nfont: small\nsee: below\n---\n# Hi")]
    fn unknown_keys_end_frontmatter(#[case] input: &str) {
        let slides = parse(input);
        assert!(slides.iter().all(|slide| slide.frontmatter.is_none()));
        assert_eq!(slides.last().map(|slide| slide.title.as_str()), Some("Hi"));
    }

    #[test]
    fn headings() {
        let slide = parse_single("# Title\n# Again\n## Sub\n### Subsub\n#### Too deep");
        assert_eq!(slide.title, "Title");
        let expected = &[
            SlideElement::Heading { level: 1, content: "Again".into() },
            SlideElement::Heading { level: 2, content: "Sub".into() },
            SlideElement::Heading { level: 3, content: "Subsub".into() },
            SlideElement::plain_text("#### Too deep"),
        ];
        assert_eq!(slide.elements, expected);
    }

    #[test]
    fn title_keeps_line_break_marker() {
        let slide = parse_single(r"# Hello\nWorld");
        assert_eq!(slide.title, r"Hello\nWorld");
    }

    #[test]
    fn image() {
        let slide = parse_single("![a cat](cat.txt)");
        assert_eq!(slide.elements, &[SlideElement::Image { alt: "a cat".into(), filename: "cat.txt".into() }]);
    }

    #[test]
    fn bullets_close_on_non_bullet_line() {
        let slide = parse_single("- one\n* two\ntext\n- three");
        let expected = &[
            SlideElement::Bullets(vec![
                BulletItem(vec![InlineSpan::plain("one")]),
                BulletItem(vec![InlineSpan::plain("two")]),
            ]),
            SlideElement::plain_text("text"),
            SlideElement::Bullets(vec![BulletItem(vec![InlineSpan::plain("three")])]),
        ];
        assert_eq!(slide.elements, expected);
    }

    #[test]
    fn bullets_close_on_blank_line() {
        let slide = parse_single("- one\n\n- two");
        let expected = &[
            SlideElement::Bullets(vec![BulletItem(vec![InlineSpan::plain("one")])]),
            SlideElement::Bullets(vec![BulletItem(vec![InlineSpan::plain("two")])]),
        ];
        assert_eq!(slide.elements, expected);
    }

    #[test]
    fn bullets_close_before_heading() {
        let slide = parse_single("- one\n## Next");
        assert_eq!(slide.elements.len(), 2);
        assert!(matches!(slide.elements[0], SlideElement::Bullets(_)));
        assert!(matches!(slide.elements[1], SlideElement::Heading { level: 2, .. }));
    }

    #[test]
    fn text_spans_are_top_level() {
        let slide = parse_single("see [docs](https://example.com) **now**");
        let expected = &[
            SlideElement::plain_text("see "),
            SlideElement::Link(Link::new("docs", "https://example.com")),
            SlideElement::plain_text(" "),
            SlideElement::bold_text("now"),
        ];
        assert_eq!(slide.elements, expected);
    }

    #[test]
    fn implicit_slide_ends() {
        let parser = SlideParser::new(ParserOptions { implicit_slide_ends: true });
        let slides = parser.parse("# A\ntext\n# B\n# C");
        let titles: Vec<_> = slides.iter().map(|slide| slide.title.as_str()).collect();
        assert_eq!(titles, &["A", "B", "C"]);
    }

    #[test]
    fn end_to_end() {
        let slide = parse_single("# Intro\n\nHello **world**\n\n- [Go](tmux://main/ls)\n");
        assert_eq!(slide.title, "Intro");
        let expected = &[
            SlideElement::plain_text("Hello "),
            SlideElement::bold_text("world"),
            SlideElement::Bullets(vec![BulletItem(vec![InlineSpan::link("Go", "tmux://main/ls")])]),
        ];
        assert_eq!(slide.elements, expected);
    }
}

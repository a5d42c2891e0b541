//! The demo document: headings, animated paragraphs and spacers, laid out
//! as terminal rows.
//!
//! One row is one line of text, so a paragraph's line height is `1` and
//! its height is the number of wrapped rows.

use std::borrow::Cow;

/// Widest a paragraph column may get, in cells.
const MAX_COLUMN_WIDTH: u16 = 80;
/// Blank rows above and below each paragraph.
const PARAGRAPH_PADDING: u32 = 3;

pub const INTRO_HEADING: &str = "Scroll down to see the animation";
pub const OUTRO_HEADING: &str = "Multiple animated text blocks!";

pub const LOREM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Suspendisse \
facilisis, ligula sit amet maximus luctus, dolor dolor tincidunt massa, in rhoncus purus lectus \
quis purus. Lorem ipsum dolor sit amet, consectetur adipiscing elit. Interdum et malesuada fames \
ac ante ipsum primis in faucibus. Etiam tincidunt neque ut tincidunt auctor. Curabitur malesuada \
vel mi in ultricies. Sed dignissim malesuada fermentum. Vestibulum dignissim et lectus sed \
pulvinar. Sed sit amet pulvinar lacus. Suspendisse odio dui, venenatis ac neque sed, eleifend \
condimentum augue. Fusce nec vestibulum ante, non malesuada lectus. Integer eu est sed risus \
ultricies auctor a id purus. Aenean at quam vehicula diam laoreet finibus ac ut lacus. Nunc \
cursus lectus vel varius iaculis. Donec eget posuere urna, vel dignissim lectus. Phasellus \
hendrerit erat nec eros scelerisque, vel dignissim felis placerat. Phasellus pharetra venenatis \
risus, sed auctor est varius nec.";

pub const SECOND_PARAGRAPH: &str = "This is another paragraph with different colors and \
settings. You can easily reuse the animation with any text content and customize the appearance.";

// ───────────────────────────────────────── layout ────────────

/// What occupies a stretch of rows.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionKind {
    /// A full-viewport spacer with a centred heading.
    Heading(&'static str),
    /// An animated paragraph; `block` indexes the caller's paragraph list.
    Text { block: usize, rows: Vec<String> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    /// First document row of this section.
    pub top: u32,
    pub height: u32,
    pub kind: SectionKind,
}

/// Row-level layout of the whole document for one viewport size.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageLayout {
    pub sections: Vec<Section>,
    pub doc_height: u32,
    pub viewport_height: u32,
    pub column_width: u16,
}

impl PageLayout {
    /// Lay out `paragraphs` between an intro and an outro spacer, each
    /// spacer one viewport tall.
    pub fn compute(paragraphs: &[&str], viewport_width: u16, viewport_height: u16) -> Self {
        let column_width = viewport_width.saturating_sub(4).clamp(1, MAX_COLUMN_WIDTH);
        let vh = u32::from(viewport_height);
        let mut sections = Vec::new();
        let mut cursor = 0;

        let mut push = |height: u32, kind: SectionKind, cursor: &mut u32| {
            sections.push(Section {
                top: *cursor,
                height,
                kind,
            });
            *cursor += height;
        };

        push(vh, SectionKind::Heading(INTRO_HEADING), &mut cursor);
        for (block, text) in paragraphs.iter().enumerate() {
            let rows = wrap_rows(text, column_width);
            cursor += PARAGRAPH_PADDING;
            push(rows.len() as u32, SectionKind::Text { block, rows }, &mut cursor);
            cursor += PARAGRAPH_PADDING;
        }
        push(vh, SectionKind::Heading(OUTRO_HEADING), &mut cursor);

        Self {
            sections,
            doc_height: cursor,
            viewport_height: vh,
            column_width,
        }
    }

    /// The text section for paragraph `block`.
    pub fn block(&self, block: usize) -> Option<&Section> {
        self.sections.iter().find(|s| match &s.kind {
            SectionKind::Text { block: b, .. } => *b == block,
            SectionKind::Heading(_) => false,
        })
    }

    /// Largest valid scroll offset.
    pub fn max_scroll(&self) -> u32 {
        self.doc_height.saturating_sub(self.viewport_height)
    }
}

/// Word-wrap `text` to `width` cells.
pub fn wrap_rows(text: &str, width: u16) -> Vec<String> {
    textwrap::wrap(text, usize::from(width.max(1)))
        .into_iter()
        .map(Cow::into_owned)
        .collect()
}

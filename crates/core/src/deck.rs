//! Turns a presentation payload into the ordered slide sequence the
//! controller navigates.
//!
//! A slide starts at every `# ` or `## ` heading line. The deck is bracketed by
//! a title slide and a closing slide, both named after the first level-one
//! heading, so `k` headed sections give `k + 2` slides.

const UNTITLED: &str = "Untitled";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    pub heading: String,
    pub level: u8,
    pub body: Vec<String>,
}

impl Slide {
    fn new(heading: impl Into<String>, level: u8) -> Self {
        Self {
            heading: heading.into(),
            level,
            body: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlideDeck {
    title: String,
    slides: Vec<Slide>,
}

impl SlideDeck {
    pub fn render(markdown: &str) -> Self {
        let mut sections: Vec<Slide> = Vec::new();
        let mut in_fence = false;

        for line in markdown.lines() {
            if line.trim_start().starts_with("```") {
                in_fence = !in_fence;
            }
            let heading = if in_fence { None } else { parse_heading(line) };
            match (heading, sections.last_mut()) {
                (Some((level, text)), _) => sections.push(Slide::new(text, level)),
                (None, Some(slide)) => slide.body.push(line.to_string()),
                (None, None) => {}
            }
        }

        for slide in &mut sections {
            while slide.body.last().is_some_and(|l| l.trim().is_empty()) {
                slide.body.pop();
            }
            let leading_blank = slide.body.iter().take_while(|l| l.trim().is_empty()).count();
            slide.body.drain(..leading_blank);
        }

        let title = sections
            .iter()
            .find(|s| s.level == 1)
            .map(|s| s.heading.clone())
            .unwrap_or_else(|| UNTITLED.to_string());

        let mut slides = Vec::with_capacity(sections.len() + 2);
        slides.push(Slide::new(title.clone(), 1));
        slides.extend(sections);
        slides.push(Slide::new(format!("End of {title}"), 1));

        Self { title, slides }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn headings(&self) -> impl Iterator<Item = &str> {
        self.slides.iter().map(|s| s.heading.as_str())
    }
}

fn parse_heading(line: &str) -> Option<(u8, &str)> {
    if let Some(text) = line.strip_prefix("## ") {
        Some((2, text.trim()))
    } else {
        line.strip_prefix("# ").map(|text| (1, text.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brackets_sections_with_title_and_closing_slides() {
        let deck = SlideDeck::render("# Rust Tips\nintro\n\n## Ownership\nmove\n## Borrowing\n&T\n");

        assert_eq!(deck.title(), "Rust Tips");
        assert_eq!(
            deck.headings().collect::<Vec<_>>(),
            vec![
                "Rust Tips",
                "Rust Tips",
                "Ownership",
                "Borrowing",
                "End of Rust Tips"
            ]
        );
        assert_eq!(deck.slides()[1].body, vec!["intro".to_string()]);
        assert_eq!(deck.slides()[3].level, 2);
    }

    #[test]
    fn ignores_preamble_and_deeper_headings() {
        let deck = SlideDeck::render("preamble\n## Only\n### detail\n#hashtag\n");
        assert_eq!(deck.len(), 3);
        assert_eq!(deck.title(), "Untitled");
        assert_eq!(
            deck.slides()[1].body,
            vec!["### detail".to_string(), "#hashtag".to_string()]
        );
    }

    #[test]
    fn code_fences_do_not_start_slides() {
        let deck = SlideDeck::render("# Deck\n```sh\n# not a heading\n```\n");
        assert_eq!(deck.len(), 3);
        assert_eq!(deck.slides()[1].body.len(), 3);
    }

    #[test]
    fn empty_payload_still_has_bookends() {
        let deck = SlideDeck::render("");
        assert_eq!(deck.len(), 2);
        assert!(!deck.is_empty());
    }
}

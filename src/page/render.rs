// Section renderer: maps a section onto a framework-neutral presentation block.
//
// Each typed view implements `RenderSection`; dispatch goes through
// `SectionBody::renderer` so a new section type cannot be validated without
// also being rendered.

use serde::Serialize;

use super::model::{Alignment, ImageRef, Item, Section, SectionSettings, Spacing};
use super::payload::{self, FeedFlags, FeedSource, SectionBody};

pub const DEFAULT_CARD_COLUMNS: u8 = 3;
pub const DEFAULT_FEED_COLUMNS: u8 = 3;

/// Layout parameters derived from a section's settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub spacing: String,
    /// Vertical padding in pixels.
    pub padding_y: u16,
    pub align: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
}

impl Layout {
    pub fn from_settings(settings: Option<&SectionSettings>) -> Self {
        let spacing = settings
            .and_then(|s| s.spacing.clone())
            .filter(Spacing::is_recognized)
            .unwrap_or(Spacing::Medium);
        let alignment = settings
            .and_then(|s| s.alignment.clone())
            .filter(Alignment::is_recognized)
            .unwrap_or(Alignment::Left);

        let padding_y = match spacing {
            Spacing::Small => 32,
            Spacing::Large => 96,
            _ => 64,
        };

        Self {
            spacing: spacing.to_string(),
            padding_y,
            align: alignment.to_string(),
            background_color: settings.and_then(|s| s.background_color.clone()),
            text_color: settings.and_then(|s| s.text_color.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Picture {
    pub src: String,
    pub alt: String,
}

impl Picture {
    fn from_ref(image: &ImageRef, fallback_alt: Option<&str>) -> Self {
        Self {
            src: image.url.clone(),
            alt: image
                .alt
                .clone()
                .or_else(|| fallback_alt.map(str::to_string))
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub href: String,
    /// Absolute http(s) target, opened outside the site.
    pub external: bool,
}

impl Link {
    fn parse(href: &str) -> Option<Self> {
        let href = href.trim();
        if href.is_empty() {
            return None;
        }
        let external = url::Url::parse(href)
            .map(|u| matches!(u.scheme(), "http" | "https"))
            .unwrap_or(false);
        Some(Self {
            href: href.to_string(),
            external,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Icon {
    pub name: String,
    pub glyph: String,
}

const ICON_GLYPHS: &[(&str, &str)] = &[
    ("award", "\u{1F3C6}"),
    ("check", "\u{2713}"),
    ("clock", "\u{1F552}"),
    ("hammer", "\u{1F528}"),
    ("home", "\u{1F3E0}"),
    ("lightbulb", "\u{1F4A1}"),
    ("mail", "\u{2709}"),
    ("map-pin", "\u{1F4CD}"),
    ("palette", "\u{1F3A8}"),
    ("phone", "\u{260E}"),
    ("ruler", "\u{1F4D0}"),
    ("sofa", "\u{1F6CB}"),
    ("sparkles", "\u{2728}"),
    ("star", "\u{2605}"),
    ("users", "\u{1F465}"),
];

pub const FALLBACK_GLYPH: &str = "\u{2022}";

/// Resolves a symbolic icon name to its glyph. Unknown names get a bullet.
pub fn resolve_icon(name: &str) -> Icon {
    let key = name.trim().to_ascii_lowercase();
    let glyph = ICON_GLYPHS
        .iter()
        .find(|(n, _)| *n == key)
        .map(|(_, g)| *g)
        .unwrap_or(FALLBACK_GLYPH);
    Icon {
        name: key,
        glyph: glyph.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Picture>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<Link>,
}

impl Card {
    fn from_item(item: &Item) -> Self {
        Self {
            id: item.id.clone(),
            title: item.title.clone(),
            description: item.description.clone(),
            image: item.image.as_ref().map(|i| Picture::from_ref(i, Some(item.title.as_str()))),
            icon: item.icon.as_deref().map(resolve_icon),
            link: item.link.as_deref().and_then(Link::parse),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEntry {
    pub id: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub icon: Icon,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccordionEntry {
    pub id: String,
    pub question: String,
    pub answer: Vec<String>,
    /// Initial state only; toggling is client-side and never persisted.
    pub expanded: bool,
}

/// Query a live entity grid issues against the projects/services collaborators.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedQuery {
    pub featured_only: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    pub show_pricing: bool,
}

impl From<FeedFlags> for FeedQuery {
    fn from(flags: FeedFlags) -> Self {
        Self {
            featured_only: flags.featured_only,
            limit: flags.limit,
            show_pricing: flags.show_pricing,
        }
    }
}

/// Presentation description of one section.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "block", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Block {
    Headline {
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        subtitle: Option<String>,
        paragraphs: Vec<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        background: Option<Picture>,
        layout: Layout,
    },
    TextWithImage {
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        paragraphs: Vec<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        image: Option<Picture>,
        layout: Layout,
    },
    CardGrid {
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        subtitle: Option<String>,
        columns: u8,
        cards: Vec<Card>,
        layout: Layout,
    },
    BulletList {
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        paragraphs: Vec<String>,
        entries: Vec<ListEntry>,
        layout: Layout,
    },
    CenteredImage {
        #[serde(skip_serializing_if = "Option::is_none")]
        image: Option<Picture>,
        #[serde(skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
        layout: Layout,
    },
    ContactForm {
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        subtitle: Option<String>,
        paragraphs: Vec<String>,
        /// Endpoint of the consultation intake collaborator.
        submit_to: String,
        layout: Layout,
    },
    Accordion {
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        subtitle: Option<String>,
        entries: Vec<AccordionEntry>,
        layout: Layout,
    },
    EntityFeed {
        source: FeedSource,
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        subtitle: Option<String>,
        columns: u8,
        query: FeedQuery,
        layout: Layout,
    },
    Diagnostic {
        section_type: String,
        message: String,
    },
}

/// Rendered section with its identity, as served to the public site.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedSection {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub sort_order: i32,
    #[serde(flatten)]
    pub block: Block,
}

pub const CONTACT_SUBMIT_PATH: &str = "/consultations";

/// One rendering capability per section variant.
pub trait RenderSection {
    fn render(&self, settings: Option<&SectionSettings>) -> Block;
}

impl<'a> SectionBody<'a> {
    pub fn renderer(&self) -> &dyn RenderSection {
        match self {
            SectionBody::Hero(v) => v,
            SectionBody::Text(v) => v,
            SectionBody::Cards(v) => v,
            SectionBody::List(v) => v,
            SectionBody::Image(v) => v,
            SectionBody::ContactForm(v) => v,
            SectionBody::Faq(v) => v,
            SectionBody::Projects(v) => v,
            SectionBody::Services(v) => v,
        }
    }
}

/// Splits free text into paragraphs on line breaks, dropping blank lines.
pub fn paragraphs(content: Option<&str>) -> Vec<String> {
    content
        .map(|c| {
            c.lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Items in display order: ascending `sortOrder`, position for those without one.
fn ordered_items(items: &[Item]) -> Vec<&Item> {
    let mut ordered: Vec<(i64, &Item)> = items
        .iter()
        .enumerate()
        .map(|(pos, item)| (item.sort_order.map_or(pos as i64, i64::from), item))
        .collect();
    ordered.sort_by_key(|(key, _)| *key);
    ordered.into_iter().map(|(_, item)| item).collect()
}

fn columns(settings: Option<&SectionSettings>, default: u8) -> u8 {
    settings
        .and_then(|s| s.columns)
        .filter(|c| payload::COLUMN_RANGE.contains(c))
        .and_then(|c| u8::try_from(c).ok())
        .unwrap_or(default)
}

fn owned(s: Option<&str>) -> Option<String> {
    s.map(str::to_string)
}

impl RenderSection for payload::Hero<'_> {
    fn render(&self, settings: Option<&SectionSettings>) -> Block {
        Block::Headline {
            title: owned(self.title),
            subtitle: owned(self.subtitle),
            paragraphs: paragraphs(self.content),
            background: self.image.map(|i| Picture::from_ref(i, self.title)),
            layout: Layout::from_settings(settings),
        }
    }
}

impl RenderSection for payload::Text<'_> {
    fn render(&self, settings: Option<&SectionSettings>) -> Block {
        Block::TextWithImage {
            title: owned(self.title),
            paragraphs: paragraphs(self.content),
            image: self.image.map(|i| Picture::from_ref(i, self.title)),
            layout: Layout::from_settings(settings),
        }
    }
}

impl RenderSection for payload::Cards<'_> {
    fn render(&self, settings: Option<&SectionSettings>) -> Block {
        Block::CardGrid {
            title: owned(self.title),
            subtitle: owned(self.subtitle),
            columns: columns(settings, DEFAULT_CARD_COLUMNS),
            cards: ordered_items(self.items).into_iter().map(Card::from_item).collect(),
            layout: Layout::from_settings(settings),
        }
    }
}

impl RenderSection for payload::List<'_> {
    fn render(&self, settings: Option<&SectionSettings>) -> Block {
        let entries = ordered_items(self.items)
            .into_iter()
            .map(|item| ListEntry {
                id: item.id.clone(),
                text: item.title.clone(),
                detail: item.description.clone(),
                icon: resolve_icon(item.icon.as_deref().unwrap_or("check")),
            })
            .collect();

        Block::BulletList {
            title: owned(self.title),
            paragraphs: paragraphs(self.content),
            entries,
            layout: Layout::from_settings(settings),
        }
    }
}

impl RenderSection for payload::Image<'_> {
    fn render(&self, settings: Option<&SectionSettings>) -> Block {
        let mut layout = Layout::from_settings(settings);
        layout.align = Alignment::Center.to_string();

        Block::CenteredImage {
            image: self.image.map(|i| Picture::from_ref(i, self.title)),
            caption: owned(self.title),
            layout,
        }
    }
}

impl RenderSection for payload::ContactForm<'_> {
    fn render(&self, settings: Option<&SectionSettings>) -> Block {
        Block::ContactForm {
            title: owned(self.title),
            subtitle: owned(self.subtitle),
            paragraphs: paragraphs(self.content),
            submit_to: CONTACT_SUBMIT_PATH.to_string(),
            layout: Layout::from_settings(settings),
        }
    }
}

impl RenderSection for payload::Faq<'_> {
    fn render(&self, settings: Option<&SectionSettings>) -> Block {
        let entries = ordered_items(self.items)
            .into_iter()
            .map(|item| AccordionEntry {
                id: item.id.clone(),
                question: item.title.clone(),
                answer: paragraphs(item.description.as_deref()),
                expanded: false,
            })
            .collect();

        Block::Accordion {
            title: owned(self.title),
            subtitle: owned(self.subtitle),
            entries,
            layout: Layout::from_settings(settings),
        }
    }
}

impl RenderSection for payload::Feed<'_> {
    fn render(&self, settings: Option<&SectionSettings>) -> Block {
        Block::EntityFeed {
            source: self.source,
            title: owned(self.title),
            subtitle: owned(self.subtitle),
            columns: columns(settings, DEFAULT_FEED_COLUMNS),
            query: self.flags.into(),
            layout: Layout::from_settings(settings),
        }
    }
}

/// Renders a section. Sections that fail validation degrade to a diagnostic block.
pub fn render_section(section: &Section) -> RenderedSection {
    let block = match SectionBody::view(section) {
        Ok(body) => body.renderer().render(section.settings.as_ref()),
        Err(e) => {
            tracing::warn!("rendering placeholder for section {}: {}", section.id, e);
            Block::Diagnostic {
                section_type: section.kind.to_string(),
                message: e.to_string(),
            }
        }
    };

    RenderedSection {
        id: section.id.clone(),
        kind: section.kind.to_string(),
        sort_order: section.sort_order,
        block,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::model::SectionType;

    fn section(kind: SectionType) -> Section {
        Section::new("s1", kind)
    }

    #[test]
    fn default_layout_is_medium_left() {
        let layout = Layout::from_settings(None);
        assert_eq!(layout.spacing, "medium");
        assert_eq!(layout.padding_y, 64);
        assert_eq!(layout.align, "left");
    }

    #[test]
    fn spacing_maps_to_padding() {
        let small = SectionSettings { spacing: Some(Spacing::Small), ..Default::default() };
        let large = SectionSettings { spacing: Some(Spacing::Large), ..Default::default() };
        assert_eq!(Layout::from_settings(Some(&small)).padding_y, 32);
        assert_eq!(Layout::from_settings(Some(&large)).padding_y, 96);
    }

    #[test]
    fn cards_default_to_three_columns() {
        let mut s = section(SectionType::Cards);
        s.items = vec![Item::titled("a"), Item::titled("b")];
        match render_section(&s).block {
            Block::CardGrid { columns, cards, .. } => {
                assert_eq!(columns, 3);
                assert_eq!(cards.len(), 2);
            }
            other => panic!("expected card grid, got {:?}", other),
        }

        s.settings = Some(SectionSettings { columns: Some(4), ..Default::default() });
        match render_section(&s).block {
            Block::CardGrid { columns, .. } => assert_eq!(columns, 4),
            other => panic!("expected card grid, got {:?}", other),
        }
    }

    #[test]
    fn items_follow_sort_order() {
        let mut s = section(SectionType::List);
        s.items = vec![
            Item { id: "late".into(), sort_order: Some(5), ..Item::titled("late") },
            Item { id: "early".into(), sort_order: Some(-1), ..Item::titled("early") },
            Item { id: "middle".into(), ..Item::titled("middle") },
        ];
        match render_section(&s).block {
            Block::BulletList { entries, .. } => {
                let ids: Vec<_> = entries.iter().map(|e| e.id.as_str()).collect();
                assert_eq!(ids, vec!["early", "middle", "late"]);
            }
            other => panic!("expected bullet list, got {:?}", other),
        }
    }

    #[test]
    fn faq_entries_start_collapsed() {
        let mut s = section(SectionType::Faq);
        s.items = vec![Item {
            id: "q1".into(),
            description: Some("First line\n\nSecond line".into()),
            ..Item::titled("Q1")
        }];
        match render_section(&s).block {
            Block::Accordion { entries, .. } => {
                assert_eq!(entries[0].question, "Q1");
                assert_eq!(entries[0].answer, vec!["First line", "Second line"]);
                assert!(!entries[0].expanded);
            }
            other => panic!("expected accordion, got {:?}", other),
        }
    }

    #[test]
    fn projects_ignore_own_items() {
        let mut s = section(SectionType::Projects);
        s.items = vec![Item::titled("stale copy")];
        s.settings = Some(SectionSettings {
            featured_only: Some(true),
            limit: Some(3),
            ..Default::default()
        });
        match render_section(&s).block {
            Block::EntityFeed { source, query, columns, .. } => {
                assert_eq!(source, FeedSource::Projects);
                assert!(query.featured_only);
                assert_eq!(query.limit, Some(3));
                assert_eq!(columns, 3);
            }
            other => panic!("expected entity feed, got {:?}", other),
        }
    }

    #[test]
    fn unknown_type_renders_diagnostic() {
        let rendered = render_section(&section(SectionType::from("carousel")));
        assert_eq!(rendered.kind, "carousel");
        match rendered.block {
            Block::Diagnostic { section_type, .. } => assert_eq!(section_type, "carousel"),
            other => panic!("expected diagnostic, got {:?}", other),
        }
    }

    #[test]
    fn icons_and_links_resolve() {
        assert_eq!(resolve_icon("Sofa").glyph, "\u{1F6CB}");
        assert_eq!(resolve_icon("unicorn").glyph, FALLBACK_GLYPH);

        assert!(Link::parse("https://example.com/portfolio").unwrap().external);
        assert!(!Link::parse("/projects/loft").unwrap().external);
        assert!(!Link::parse("mailto:hello@example.com").unwrap().external);
        assert!(Link::parse("  ").is_none());
    }

    #[test]
    fn rendered_section_serializes_flat() {
        let mut s = section(SectionType::Hero);
        s.title = Some("Spaces that feel like you".into());
        let value = serde_json::to_value(render_section(&s)).unwrap();
        assert_eq!(value["type"], "hero");
        assert_eq!(value["block"], "headline");
        assert_eq!(value["title"], "Spaces that feel like you");
        assert_eq!(value["layout"]["paddingY"], 64);
    }
}

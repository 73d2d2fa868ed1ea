// Section payload model: validation and per-type views over a stored section.

use super::error::PageError;
use super::model::{Alignment, ImageRef, Item, Section, SectionSettings, SectionType, Spacing};

pub const MAX_TITLE_LEN: usize = 100;
pub const MAX_META_TITLE_LEN: usize = 60;
pub const MAX_META_DESCRIPTION_LEN: usize = 160;
pub const MAX_SLUG_LEN: usize = 100;
pub const COLUMN_RANGE: std::ops::RangeInclusive<i64> = 1..=6;
pub const FEED_LIMIT_RANGE: std::ops::RangeInclusive<i64> = 1..=24;

/// Checks that a section is well-formed for its declared type.
///
/// Fields that do not apply to the type are tolerated and ignored.
pub fn validate(section: &Section) -> Result<(), PageError> {
    if !section.kind.is_recognized() {
        return Err(PageError::InvalidSectionType(section.kind.to_string()));
    }
    if let Some(settings) = &section.settings {
        validate_settings(settings)?;
    }
    Ok(())
}

pub fn validate_settings(settings: &SectionSettings) -> Result<(), PageError> {
    if let Some(columns) = settings.columns {
        if !COLUMN_RANGE.contains(&columns) {
            return Err(PageError::InvalidSectionSettings(format!(
                "columns must be between {} and {}, got {}",
                COLUMN_RANGE.start(),
                COLUMN_RANGE.end(),
                columns
            )));
        }
    }
    if let Some(Spacing::Unrecognized(value)) = &settings.spacing {
        return Err(PageError::InvalidSectionSettings(format!(
            "spacing '{}' is not one of {}",
            value,
            Spacing::accepted()
        )));
    }
    if let Some(Alignment::Unrecognized(value)) = &settings.alignment {
        return Err(PageError::InvalidSectionSettings(format!(
            "alignment '{}' is not one of {}",
            value,
            Alignment::accepted()
        )));
    }
    if let Some(limit) = settings.limit {
        if !FEED_LIMIT_RANGE.contains(&limit) {
            return Err(PageError::InvalidSectionSettings(format!(
                "limit must be between {} and {}, got {}",
                FEED_LIMIT_RANGE.start(),
                FEED_LIMIT_RANGE.end(),
                limit
            )));
        }
    }
    Ok(())
}

/// Slug, title and SEO length rules shared by create and update.
pub fn validate_page_fields(
    slug: &str,
    title: &str,
    meta_title: Option<&str>,
    meta_description: Option<&str>,
) -> Result<(), PageError> {
    validate_slug(slug)?;

    if title.trim().is_empty() {
        return Err(PageError::invalid("title", "title is required"));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(PageError::invalid(
            "title",
            format!("must be at most {} characters", MAX_TITLE_LEN),
        ));
    }
    if meta_title.is_some_and(|t| t.chars().count() > MAX_META_TITLE_LEN) {
        return Err(PageError::invalid(
            "metaTitle",
            format!("must be at most {} characters", MAX_META_TITLE_LEN),
        ));
    }
    if meta_description.is_some_and(|d| d.chars().count() > MAX_META_DESCRIPTION_LEN) {
        return Err(PageError::invalid(
            "metaDescription",
            format!("must be at most {} characters", MAX_META_DESCRIPTION_LEN),
        ));
    }
    Ok(())
}

/// Slugs are lowercase ASCII letters, digits and hyphens.
pub fn validate_slug(slug: &str) -> Result<(), PageError> {
    if slug.is_empty() {
        return Err(PageError::invalid("slug", "slug is required"));
    }
    if slug.len() > MAX_SLUG_LEN {
        return Err(PageError::invalid(
            "slug",
            format!("must be at most {} characters", MAX_SLUG_LEN),
        ));
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(PageError::invalid(
            "slug",
            "can only contain lowercase letters, numbers, and hyphens",
        ));
    }
    Ok(())
}

/// Which live entity collection a feed section pulls from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedSource {
    Projects,
    Services,
}

/// Query flags a projects/services section carries in its settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedFlags {
    pub featured_only: bool,
    pub limit: Option<u32>,
    pub show_pricing: bool,
}

impl FeedFlags {
    fn from_settings(settings: Option<&SectionSettings>) -> Self {
        Self {
            featured_only: settings.and_then(|s| s.featured_only).unwrap_or(false),
            limit: settings
                .and_then(|s| s.limit)
                .and_then(|l| u32::try_from(l).ok()),
            show_pricing: settings.and_then(|s| s.show_pricing).unwrap_or(false),
        }
    }
}

pub struct Hero<'a> {
    pub title: Option<&'a str>,
    pub subtitle: Option<&'a str>,
    pub content: Option<&'a str>,
    pub image: Option<&'a ImageRef>,
}

pub struct Text<'a> {
    pub title: Option<&'a str>,
    pub content: Option<&'a str>,
    pub image: Option<&'a ImageRef>,
}

pub struct Cards<'a> {
    pub title: Option<&'a str>,
    pub subtitle: Option<&'a str>,
    pub items: &'a [Item],
}

pub struct List<'a> {
    pub title: Option<&'a str>,
    pub content: Option<&'a str>,
    pub items: &'a [Item],
}

pub struct Image<'a> {
    pub title: Option<&'a str>,
    pub image: Option<&'a ImageRef>,
}

pub struct ContactForm<'a> {
    pub title: Option<&'a str>,
    pub subtitle: Option<&'a str>,
    pub content: Option<&'a str>,
}

pub struct Faq<'a> {
    pub title: Option<&'a str>,
    pub subtitle: Option<&'a str>,
    pub items: &'a [Item],
}

pub struct Feed<'a> {
    pub source: FeedSource,
    pub title: Option<&'a str>,
    pub subtitle: Option<&'a str>,
    pub flags: FeedFlags,
}

/// Typed view of a section: one variant per type, each with only its own fields.
pub enum SectionBody<'a> {
    Hero(Hero<'a>),
    Text(Text<'a>),
    Cards(Cards<'a>),
    List(List<'a>),
    Image(Image<'a>),
    ContactForm(ContactForm<'a>),
    Faq(Faq<'a>),
    Projects(Feed<'a>),
    Services(Feed<'a>),
}

impl<'a> SectionBody<'a> {
    /// Validates the section and projects it onto its variant.
    pub fn view(section: &'a Section) -> Result<Self, PageError> {
        validate(section)?;

        let title = section.title.as_deref();
        let subtitle = section.subtitle.as_deref();
        let content = section.content.as_deref();
        let image = section.image.as_ref();
        let items = section.items.as_slice();

        let body = match &section.kind {
            SectionType::Hero => SectionBody::Hero(Hero { title, subtitle, content, image }),
            SectionType::Text => SectionBody::Text(Text { title, content, image }),
            SectionType::Cards => SectionBody::Cards(Cards { title, subtitle, items }),
            SectionType::List => SectionBody::List(List { title, content, items }),
            SectionType::Image => SectionBody::Image(Image { title, image }),
            SectionType::ContactForm => {
                SectionBody::ContactForm(ContactForm { title, subtitle, content })
            }
            SectionType::Faq => SectionBody::Faq(Faq { title, subtitle, items }),
            SectionType::Projects => SectionBody::Projects(Feed {
                source: FeedSource::Projects,
                title,
                subtitle,
                flags: FeedFlags::from_settings(section.settings.as_ref()),
            }),
            SectionType::Services => SectionBody::Services(Feed {
                source: FeedSource::Services,
                title,
                subtitle,
                flags: FeedFlags::from_settings(section.settings.as_ref()),
            }),
            SectionType::Unrecognized(other) => {
                return Err(PageError::InvalidSectionType(other.clone()))
            }
        };
        Ok(body)
    }

    pub fn kind(&self) -> SectionType {
        match self {
            SectionBody::Hero(_) => SectionType::Hero,
            SectionBody::Text(_) => SectionType::Text,
            SectionBody::Cards(_) => SectionType::Cards,
            SectionBody::List(_) => SectionType::List,
            SectionBody::Image(_) => SectionType::Image,
            SectionBody::ContactForm(_) => SectionType::ContactForm,
            SectionBody::Faq(_) => SectionType::Faq,
            SectionBody::Projects(_) => SectionType::Projects,
            SectionBody::Services(_) => SectionType::Services,
        }
    }
}

// Section list mutations. These are pure: the caller loads the page, applies
// one of these to its `sections`, and persists the whole document.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::PageError;
use super::model::{Item, Section, SectionInput, SectionPatch};
use super::payload::validate;

/// What to do with ids in a reorder request that match no section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReorderPolicy {
    /// Skip them silently.
    #[default]
    Drop,
    /// Fail the whole reorder with `UnknownSectionIds`.
    Reject,
}

impl std::str::FromStr for ReorderPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "drop" => Ok(ReorderPolicy::Drop),
            "reject" => Ok(ReorderPolicy::Reject),
            other => Err(format!("unknown reorder policy '{}'", other)),
        }
    }
}

/// Ids that collide with static path segments under `/sections/`.
const RESERVED_SECTION_IDS: &[&str] = &["reorder"];

pub fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Gives every item a non-empty id unique within the list.
///
/// Items keep their id unless it is empty or already used by an earlier item.
pub fn assign_item_ids(items: &mut [Item]) {
    let mut seen = HashSet::new();
    for item in items.iter_mut() {
        if item.id.trim().is_empty() || seen.contains(&item.id) {
            item.id = fresh_id(&seen);
        }
        seen.insert(item.id.clone());
    }
}

fn fresh_id(taken: &HashSet<String>) -> String {
    loop {
        let id = new_id();
        if !taken.contains(&id) {
            return id;
        }
    }
}

fn into_section(input: SectionInput, taken: &HashSet<String>, default_sort: i32) -> Section {
    let id = match input.id {
        Some(id)
            if !id.trim().is_empty()
                && !taken.contains(&id)
                && !RESERVED_SECTION_IDS.contains(&id.as_str()) =>
        {
            id
        }
        _ => fresh_id(taken),
    };
    let mut items = input.items;
    assign_item_ids(&mut items);

    Section {
        id,
        kind: input.kind,
        title: input.title,
        subtitle: input.subtitle,
        content: input.content,
        image: input.image,
        items,
        settings: input.settings,
        sort_order: input.sort_order.unwrap_or(default_sort),
    }
}

/// Builds a full section list from client input (page create and replace).
///
/// Section ids are made unique, missing sort orders default to the list position.
pub fn build_sections(inputs: Vec<SectionInput>) -> Result<Vec<Section>, PageError> {
    let mut taken = HashSet::new();
    let mut sections = Vec::with_capacity(inputs.len());
    for (position, input) in inputs.into_iter().enumerate() {
        let section = into_section(input, &taken, position as i32);
        validate(&section)?;
        taken.insert(section.id.clone());
        sections.push(section);
    }
    Ok(sections)
}

/// Appends a section and returns its id.
pub fn add_section(sections: &mut Vec<Section>, input: SectionInput) -> Result<String, PageError> {
    let taken: HashSet<String> = sections.iter().map(|s| s.id.clone()).collect();
    let next_sort = sections
        .iter()
        .map(|s| s.sort_order)
        .max()
        .map_or(0, |max| max.saturating_add(1));

    let section = into_section(input, &taken, next_sort);
    validate(&section)?;

    let id = section.id.clone();
    sections.push(section);
    Ok(id)
}

/// Merges `patch` over the section with `section_id`.
///
/// Omitted fields keep their value. `items` replaces the list wholesale.
/// The section is left untouched if the merged result does not validate.
pub fn update_section(
    sections: &mut [Section],
    section_id: &str,
    patch: SectionPatch,
) -> Result<(), PageError> {
    let slot = sections
        .iter_mut()
        .find(|s| s.id == section_id)
        .ok_or_else(|| PageError::SectionNotFound(section_id.to_string()))?;

    let mut merged = slot.clone();
    if let Some(kind) = patch.kind {
        merged.kind = kind;
    }
    if let Some(title) = patch.title {
        merged.title = Some(title);
    }
    if let Some(subtitle) = patch.subtitle {
        merged.subtitle = Some(subtitle);
    }
    if let Some(content) = patch.content {
        merged.content = Some(content);
    }
    if let Some(image) = patch.image {
        merged.image = Some(image);
    }
    if let Some(mut items) = patch.items {
        assign_item_ids(&mut items);
        merged.items = items;
    }
    if let Some(settings) = patch.settings {
        merged.settings = Some(settings);
    }
    if let Some(sort_order) = patch.sort_order {
        merged.sort_order = sort_order;
    }

    validate(&merged)?;
    *slot = merged;
    Ok(())
}

/// Removes and returns the section with `section_id`.
pub fn delete_section(sections: &mut Vec<Section>, section_id: &str) -> Result<Section, PageError> {
    let index = sections
        .iter()
        .position(|s| s.id == section_id)
        .ok_or_else(|| PageError::SectionNotFound(section_id.to_string()))?;
    Ok(sections.remove(index))
}

/// Produces the reordered list: matched sections only, in the order given,
/// each with `sort_order` set to its index in `ordered_ids`.
pub fn reorder_sections(
    sections: &[Section],
    ordered_ids: &[String],
    policy: ReorderPolicy,
) -> Result<Vec<Section>, PageError> {
    let mut placed = HashSet::new();
    let mut unknown = Vec::new();
    let mut result = Vec::with_capacity(ordered_ids.len());

    for (index, id) in ordered_ids.iter().enumerate() {
        if !placed.insert(id.as_str()) {
            continue;
        }
        match sections.iter().find(|s| &s.id == id) {
            Some(section) => {
                let mut section = section.clone();
                section.sort_order = index as i32;
                result.push(section);
            }
            None => unknown.push(id.clone()),
        }
    }

    if !unknown.is_empty() {
        match policy {
            ReorderPolicy::Reject => return Err(PageError::UnknownSectionIds(unknown)),
            ReorderPolicy::Drop => {
                tracing::debug!("reorder dropped unknown section ids: {:?}", unknown);
            }
        }
    }
    Ok(result)
}

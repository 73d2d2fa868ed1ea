use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::page::Page;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Page fields the admin listing may sort on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageColumn {
    UpdatedAt,
    CreatedAt,
    Title,
    Slug,
}

impl PageColumn {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "updatedAt" | "updated_at" => Some(PageColumn::UpdatedAt),
            "createdAt" | "created_at" => Some(PageColumn::CreatedAt),
            "title" => Some(PageColumn::Title),
            "slug" => Some(PageColumn::Slug),
            _ => None,
        }
    }

    pub fn sql_name(&self) -> &'static str {
        match self {
            PageColumn::UpdatedAt => "updated_at",
            PageColumn::CreatedAt => "created_at",
            PageColumn::Title => "title",
            PageColumn::Slug => "slug",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageOrder {
    pub column: PageColumn,
    pub sort: SortDirection,
}

impl PageOrder {
    /// Admin listing default: most recently edited first.
    pub fn default_listing() -> Vec<PageOrder> {
        vec![PageOrder {
            column: PageColumn::UpdatedAt,
            sort: SortDirection::Desc,
        }]
    }

    /// Parses `"title asc, updatedAt desc"`. Direction defaults to ascending.
    pub fn parse_list(s: &str) -> Result<Vec<PageOrder>, String> {
        let mut out = Vec::new();
        for part in s.split(',') {
            let trimmed = part.trim();
            if trimmed.is_empty() {
                continue;
            }
            let mut it = trimmed.split_whitespace();
            let Some(col) = it.next() else { continue };
            let column = PageColumn::parse(col)
                .ok_or_else(|| format!("cannot order pages by '{}'", col))?;
            let sort = match it.next() {
                None => SortDirection::Asc,
                Some(dir) if dir.eq_ignore_ascii_case("asc") => SortDirection::Asc,
                Some(dir) if dir.eq_ignore_ascii_case("desc") => SortDirection::Desc,
                Some(dir) => return Err(format!("unknown sort direction '{}'", dir)),
            };
            out.push(PageOrder { column, sort });
        }
        Ok(out)
    }

    pub fn generate(orders: &[PageOrder]) -> String {
        if orders.is_empty() {
            return String::new();
        }
        let parts: Vec<String> = orders
            .iter()
            .map(|o| format!("\"{}\" {}", o.column.sql_name(), o.sort.to_sql()))
            .collect();
        format!("ORDER BY {}", parts.join(", "))
    }

    /// In-memory equivalent of `generate` for stores without SQL.
    pub fn compare(orders: &[PageOrder], a: &Page, b: &Page) -> Ordering {
        for order in orders {
            let ord = match order.column {
                PageColumn::UpdatedAt => a.updated_at.cmp(&b.updated_at),
                PageColumn::CreatedAt => a.created_at.cmp(&b.created_at),
                PageColumn::Title => a.title.cmp(&b.title),
                PageColumn::Slug => a.slug.cmp(&b.slug),
            };
            let ord = match order.sort {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }
}

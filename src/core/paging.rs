//! Client-side pagination over a fully fetched collection.
//!
//! The changelog is small and capped server-side, so it is loaded once and
//! every filter or page change is answered from memory. This does not scale
//! to unbounded collections; those page on the server (see the feedback
//! store).

use serde::Serialize;

/// Items that carry a single filterable tag.
pub trait Tagged {
    type Tag: PartialEq;

    fn tag(&self) -> &Self::Tag;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedView<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub total_pages: usize,
    pub page: usize,
}

impl<T> PagedView<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Clamps a requested page into `[1, max(total_pages, 1)]`.
pub fn clamp_page(page: i64, total_pages: usize) -> usize {
    let last = total_pages.max(1);
    if page < 1 {
        return 1;
    }
    usize::try_from(page).map_or(last, |p| p.min(last))
}

/// Derives the visible slice for `page` of the items matching `tag`.
///
/// Items keep their fetch order. A `page_size` of zero is treated as one.
pub fn paginate<T>(all: &[T], tag: Option<&T::Tag>, page: i64, page_size: usize) -> PagedView<T>
where
    T: Tagged + Clone,
{
    let page_size = page_size.max(1);

    let filtered: Vec<&T> = match tag {
        Some(tag) => all.iter().filter(|item| item.tag() == tag).collect(),
        None => all.iter().collect(),
    };

    let total = filtered.len();
    let total_pages = total.div_ceil(page_size);
    let page = clamp_page(page, total_pages);

    let items = filtered
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .cloned()
        .collect();

    PagedView { items, total, total_pages, page }
}

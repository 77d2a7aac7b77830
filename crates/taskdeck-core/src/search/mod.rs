// ── Search and pagination ──
//
// Stateless helpers applied to whatever the current snapshot is. Nothing
// here caches: callers rerun `search` and `paginate` on every change.

mod view;

use std::num::NonZeroUsize;

pub use view::{PageSummary, ViewState};

use crate::model::{RemotePost, RemoteUser, Task};

/// Accessor for one searchable text field of `T`.
pub type Field<T> = fn(&T) -> &str;

/// Types with a default set of searchable fields.
pub trait Searchable: Sized + 'static {
    const SEARCH_FIELDS: &'static [Field<Self>];
}

fn user_name(user: &RemoteUser) -> &str {
    &user.name
}

fn user_email(user: &RemoteUser) -> &str {
    &user.email
}

fn user_username(user: &RemoteUser) -> &str {
    &user.username
}

fn post_title(post: &RemotePost) -> &str {
    &post.title
}

fn post_body(post: &RemotePost) -> &str {
    &post.body
}

fn task_text(task: &Task) -> &str {
    &task.text
}

impl Searchable for RemoteUser {
    const SEARCH_FIELDS: &'static [Field<Self>] = &[user_name, user_email, user_username];
}

impl Searchable for RemotePost {
    const SEARCH_FIELDS: &'static [Field<Self>] = &[post_title, post_body];
}

impl Searchable for Task {
    const SEARCH_FIELDS: &'static [Field<Self>] = &[task_text];
}

/// Items where at least one of `fields` contains `term`, ignoring case.
///
/// A term that is empty after trimming matches everything. Otherwise the
/// term is matched as given (surrounding spaces included) with plain
/// substring containment. Order is preserved.
pub fn search<'a, T>(items: &'a [T], term: &str, fields: &[Field<T>]) -> Vec<&'a T> {
    if term.trim().is_empty() {
        return items.iter().collect();
    }
    let needle = term.to_lowercase();
    items
        .iter()
        .filter(|&item| {
            fields
                .iter()
                .any(|field| field(item).to_lowercase().contains(&needle))
        })
        .collect()
}

/// [`search`] over the type's default fields.
pub fn search_default<'a, T: Searchable>(items: &'a [T], term: &str) -> Vec<&'a T> {
    search(items, term, T::SEARCH_FIELDS)
}

/// The 1-based `page` of `items`, `page_size` items wide.
///
/// Page 0 and pages past the end are empty.
pub fn paginate<T>(items: &[T], page_size: NonZeroUsize, page: usize) -> &[T] {
    let Some(index) = page.checked_sub(1) else {
        return &[];
    };
    let size = page_size.get();
    let start = index.saturating_mul(size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(size).min(items.len());
    &items[start..end]
}

/// Number of pages needed for `len` items. Zero when there are no items.
pub fn total_pages(len: usize, page_size: NonZeroUsize) -> usize {
    len.div_ceil(page_size.get())
}

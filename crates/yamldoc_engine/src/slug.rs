use std::collections::HashSet;

use crate::types::Page;

const FALLBACK_SLUG: &str = "page";
const INDEX_SLUG: &str = "index";

/// Lowercase, trim, collapse every run of characters outside `[a-z0-9]`
/// into one hyphen, then strip hyphens at both ends.
pub fn sanitize_slug(input: &str) -> String {
    let lowered = input.trim().to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut pending_hyphen = false;
    for c in lowered.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

/// Output filename stem for a page: `meta.slug`, then the title, then the
/// source file stem, then `"page"`. Candidates that sanitize to nothing
/// are skipped.
pub fn slug_for(page: &Page) -> String {
    let from_meta = page
        .meta
        .get("slug")
        .filter(|value| !value.is_blank())
        .map(|value| value.to_string());
    let from_stem = page
        .path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned());

    [from_meta, page.title.clone(), from_stem]
        .into_iter()
        .flatten()
        .map(|candidate| sanitize_slug(&candidate))
        .find(|slug| !slug.is_empty())
        .unwrap_or_else(|| FALLBACK_SLUG.to_string())
}

/// Unique slugs for `pages`, in page order.
///
/// A slug already taken by an earlier page gets the first free `-N` suffix
/// starting at 2. With `reserve_index` set, `index` counts as taken so no
/// page overwrites the generated index.
pub fn assign_slugs(pages: &[Page], reserve_index: bool) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::new();
    if reserve_index {
        taken.insert(INDEX_SLUG.to_string());
    }
    pages
        .iter()
        .map(|page| {
            let base = slug_for(page);
            let mut slug = base.clone();
            let mut n = 2;
            while taken.contains(&slug) {
                slug = format!("{base}-{n}");
                n += 1;
            }
            taken.insert(slug.clone());
            slug
        })
        .collect()
}

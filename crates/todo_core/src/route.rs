use crate::view::Filter;

pub const DEFAULT_ROUTE: &str = "/all";

/// Maps a URL fragment such as `#/active` to the filter it selects.
///
/// A leading `#` and `/` are optional; only the first path segment counts.
/// Anything unrecognised selects [`Filter::All`].
pub fn filter_from_fragment(fragment: &str) -> Filter {
    let path = fragment.trim();
    let path = path.strip_prefix('#').unwrap_or(path);
    let path = path.strip_prefix('/').unwrap_or(path);
    let segment = path.split(['/', '?']).next().unwrap_or_default();
    Filter::from_name(segment)
}

pub fn fragment_for(filter: Filter) -> String {
    format!("#/{}", filter.as_str())
}

use crate::config::Cap;
use crate::record::Bookmark;

/// Sort by save time and keep at most `cap` entries from the front.
///
/// Only the timestamp is compared and the sort is unstable, so bookmarks
/// saved in the same second may come out in either order.
pub fn order(mut bookmarks: Vec<Bookmark>, reverse: bool, cap: Cap) -> Vec<Bookmark> {
    if reverse {
        bookmarks.sort_unstable_by(|a, b| b.added.cmp(&a.added));
    } else {
        bookmarks.sort_unstable_by_key(|b| b.added);
    }
    if let Cap::AtMost(n) = cap {
        bookmarks.truncate(n);
    }
    bookmarks
}

/// Earliest and latest save time in the dump, if it has any records.
pub fn span(bookmarks: &[Bookmark]) -> Option<(i64, i64)> {
    let min = bookmarks.iter().map(|b| b.added).min()?;
    let max = bookmarks.iter().map(|b| b.added).max()?;
    Some((min, max))
}

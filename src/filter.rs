use regex::Regex;

use crate::config::{Config, StatusFilter, Window};
use crate::record::{Bookmark, Status};

/// The predicates a bookmark must pass to be listed. Each check is
/// independent, so the order below only decides which one fails first.
pub struct Selection<'a> {
    pub status: StatusFilter,
    pub window: Window,
    pub url: Option<&'a Regex>,
    pub title: Option<&'a Regex>,
}

impl<'a> Selection<'a> {
    pub fn from_config(config: &'a Config) -> Self {
        Self {
            status: config.status,
            window: config.window,
            url: config.url_pattern.as_ref(),
            title: config.title_pattern.as_ref(),
        }
    }

    pub fn accepts(&self, bookmark: &Bookmark) -> bool {
        status_allows(self.status, &bookmark.status)
            && self.window.contains(bookmark.added)
            && self.url.is_none_or(|re| re.is_match(&bookmark.url))
            && self.title.is_none_or(|re| re.is_match(&bookmark.title))
    }

    pub fn apply(&self, bookmarks: Vec<Bookmark>) -> Vec<Bookmark> {
        let before = bookmarks.len();
        let kept: Vec<Bookmark> =
            bookmarks.into_iter().filter(|b| self.accepts(b)).collect();
        tracing::debug!(before, after = kept.len(), "selection applied");
        kept
    }
}

fn status_allows(filter: StatusFilter, status: &Status) -> bool {
    match filter {
        StatusFilter::All => true,
        StatusFilter::Active => *status != Status::Deleted,
        StatusFilter::Unread => *status == Status::Unread,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bm(added: i64, title: &str, url: &str, status: Status) -> Bookmark {
        Bookmark {
            status,
            url: url.to_string(),
            title: title.to_string(),
            added,
        }
    }

    fn sample() -> Vec<Bookmark> {
        vec![
            bm(100, "A", "http://a", Status::Unread),
            bm(200, "http://b", "http://b", Status::Archived),
            bm(300, "C", "http://c", Status::Unread),
            bm(400, "D", "http://d", Status::Deleted),
        ]
    }

    fn open<'a>() -> Selection<'a> {
        Selection {
            status: StatusFilter::All,
            window: Window::default(),
            url: None,
            title: None,
        }
    }

    fn added(list: &[Bookmark]) -> Vec<i64> {
        list.iter().map(|b| b.added).collect()
    }

    #[test]
    fn test_no_filters_keeps_everything() {
        assert_eq!(added(&open().apply(sample())), vec![100, 200, 300, 400]);
    }

    #[test]
    fn test_status_filters() {
        let mut sel = open();
        sel.status = StatusFilter::Active;
        assert_eq!(added(&sel.apply(sample())), vec![100, 200, 300]);
        sel.status = StatusFilter::Unread;
        assert_eq!(added(&sel.apply(sample())), vec![100, 300]);
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let mut sel = open();
        sel.window = Window::new(Some(200), Some(300)).unwrap();
        assert_eq!(added(&sel.apply(sample())), vec![200, 300]);
        sel.window = Window::new(Some(150), None).unwrap();
        assert_eq!(added(&sel.apply(sample())), vec![200, 300, 400]);
    }

    #[test]
    fn test_title_pattern_matches_resolved_title() {
        let re = Regex::new("^C$").unwrap();
        let mut sel = open();
        sel.title = Some(&re);
        assert_eq!(added(&sel.apply(sample())), vec![300]);

        // URL fallback titles are matched too
        let re = Regex::new("b$").unwrap();
        sel.title = Some(&re);
        assert_eq!(added(&sel.apply(sample())), vec![200]);
    }

    #[test]
    fn test_url_pattern_is_unanchored() {
        let re = Regex::new("//[cd]").unwrap();
        let mut sel = open();
        sel.url = Some(&re);
        assert_eq!(added(&sel.apply(sample())), vec![300, 400]);
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let url = Regex::new("http").unwrap();
        let title = Regex::new("[A-C]").unwrap();
        let mut sel = open();
        sel.url = Some(&url);
        sel.title = Some(&title);
        let once = sel.apply(sample());
        let twice = sel.apply(once.clone());
        assert_eq!(once, twice);
    }
}

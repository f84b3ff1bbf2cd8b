//! Page navigation driven by GitHub's `Link` response header.
//!
//! GitHub advertises neighbouring pages as
//! `<https://api.github.com/...?page=2>; rel="next", <...?page=9>; rel="last"`.
//! Only the page numbers are kept; every request is rebuilt from
//! [`IssuesQuery`](crate::api::IssuesQuery).

use url::Url;

/// Page numbers of the relations found in a `Link` header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PageLinks {
    pub first: Option<u32>,
    pub prev: Option<u32>,
    pub next: Option<u32>,
    pub last: Option<u32>,
}

impl PageLinks {
    pub fn parse(header: Option<&str>) -> Self {
        let mut links = PageLinks::default();
        let Some(header) = header else {
            return links;
        };

        for entry in header.split(',') {
            let mut parts = entry.split(';');
            let Some(target) = parts.next().map(str::trim) else {
                continue;
            };
            let Some(url) = target.strip_prefix('<').and_then(|t| t.strip_suffix('>')) else {
                continue;
            };
            let Some(page) = page_param(url) else {
                continue;
            };

            for param in parts {
                let Some((key, value)) = param.split_once('=') else {
                    continue;
                };
                if key.trim() != "rel" {
                    continue;
                }
                // rel may hold several space separated relation types.
                for rel in value.trim().trim_matches('"').split_whitespace() {
                    match rel {
                        "first" => links.first = Some(page),
                        "prev" => links.prev = Some(page),
                        "next" => links.next = Some(page),
                        "last" => links.last = Some(page),
                        _ => {}
                    }
                }
            }
        }

        links
    }

    /// The last page number, if it can be told from this response.
    ///
    /// GitHub drops `rel="last"` when the current page is the last one,
    /// so a response without `next` means `current` is the end.
    pub fn last_page(&self, current: u32) -> Option<u32> {
        match (self.last, self.next) {
            (Some(last), _) => Some(last),
            (None, None) => Some(current),
            (None, Some(_)) => None,
        }
    }
}

fn page_param(link: &str) -> Option<u32> {
    let url = Url::parse(link).ok()?;
    let (_, value) = url.query_pairs().find(|(key, _)| key == "page")?;
    value.parse().ok().filter(|page| *page > 0)
}

/// Current position in the issue list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pager {
    pub page: u32,
    pub last_page: Option<u32>,
}

impl Default for Pager {
    fn default() -> Self {
        Self {
            page: 1,
            last_page: None,
        }
    }
}

impl Pager {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        match self.last_page {
            Some(last) => self.page < last,
            None => true,
        }
    }

    pub fn previous(&self) -> Option<Self> {
        self.has_previous().then(|| Self {
            page: self.page - 1,
            ..*self
        })
    }

    pub fn next(&self) -> Option<Self> {
        self.has_next().then(|| Self {
            page: self.page + 1,
            ..*self
        })
    }

    /// Record what a response for the current page said about the range.
    pub fn with_links(&self, links: &PageLinks) -> Self {
        Self {
            page: self.page,
            last_page: links.last_page(self.page).or(self.last_page),
        }
    }

    pub fn reset(&self) -> Self {
        Self::default()
    }

    pub fn describe(&self) -> String {
        match self.last_page {
            Some(last) => format!("Page {} of {}", self.page, last.max(self.page)),
            None => format!("Page {}", self.page),
        }
    }
}

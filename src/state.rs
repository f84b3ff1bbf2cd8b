//! State behind the repository page.
//!
//! Each fetch is tagged with a ticket from [`RepositoryState::begin_repository`]
//! or [`RepositoryState::begin_issues`]; results carrying an older ticket are
//! discarded so out-of-order responses never replace newer data.

use crate::api::IssuePage;
use crate::error::ApiError;
use crate::filter::IssueFilter;
use crate::models::{Issue, Repository};
use crate::pagination::Pager;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RepositoryState {
    pub repository: Option<Repository>,
    pub repo_error: Option<String>,
    pub issues: Vec<Issue>,
    pub issues_error: Option<String>,
    pub filter: IssueFilter,
    pub pager: Pager,
    pub fetching: bool,
    issues_loaded: bool,
    repo_ticket: u64,
    issues_ticket: u64,
}

impl RepositoryState {
    /// Start loading metadata for a (possibly different) repository.
    ///
    /// Returns the ticket the result must be applied with.
    pub fn begin_repository(&mut self) -> u64 {
        self.repo_ticket += 1;
        self.repository = None;
        self.repo_error = None;
        self.repo_ticket
    }

    /// Forget everything tied to the previous repository.
    pub fn switch_repository(&mut self) {
        self.issues.clear();
        self.issues_error = None;
        self.issues_loaded = false;
        self.filter = IssueFilter::default();
        self.pager = self.pager.reset();
    }

    /// Returns false when the result belongs to a superseded request.
    pub fn apply_repository(&mut self, ticket: u64, result: Result<Repository, ApiError>) -> bool {
        if ticket != self.repo_ticket {
            return false;
        }
        match result {
            Ok(repository) => self.repository = Some(repository),
            Err(e) => self.repo_error = Some(e.to_string()),
        }
        true
    }

    pub fn fail_repository(&mut self, err: &ApiError) {
        self.repo_ticket += 1;
        self.repository = None;
        self.repo_error = Some(err.to_string());
    }

    pub fn begin_issues(&mut self) -> u64 {
        self.issues_ticket += 1;
        self.fetching = true;
        self.issues_ticket
    }

    /// Returns false when the result belongs to a superseded request.
    pub fn apply_issues(
        &mut self,
        ticket: u64,
        page: u32,
        result: Result<IssuePage, ApiError>,
    ) -> bool {
        if ticket != self.issues_ticket {
            return false;
        }
        match result {
            Ok(issue_page) => {
                self.issues = issue_page.issues;
                if self.pager.page == page {
                    self.pager = self.pager.with_links(&issue_page.links);
                }
                self.issues_error = None;
            }
            Err(e) => self.issues_error = Some(e.to_string()),
        }
        self.issues_loaded = true;
        self.fetching = false;
        true
    }

    /// Switch the state filter; a new filter starts over on page 1.
    ///
    /// Returns false, leaving the state untouched, when `filter` is already active.
    pub fn select_filter(&mut self, filter: IssueFilter) -> bool {
        if filter == self.filter {
            return false;
        }
        self.filter = filter;
        self.pager = self.pager.reset();
        true
    }

    pub fn can_go_previous(&self) -> bool {
        !self.fetching && self.pager.has_previous()
    }

    pub fn can_go_next(&self) -> bool {
        !self.fetching && self.pager.has_next()
    }

    pub fn previous_page(&mut self) -> bool {
        match self.pager.previous().filter(|_| !self.fetching) {
            Some(pager) => {
                self.pager = pager;
                true
            }
            None => false,
        }
    }

    pub fn next_page(&mut self) -> bool {
        match self.pager.next().filter(|_| !self.fetching) {
            Some(pager) => {
                self.pager = pager;
                true
            }
            None => false,
        }
    }

    /// The placeholder stays up until both the metadata and the first
    /// issues page are in, unless the metadata fetch failed.
    pub fn is_loading(&self) -> bool {
        self.repo_error.is_none() && (self.repository.is_none() || !self.issues_loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Owner;
    use crate::pagination::PageLinks;
    use chrono::{TimeZone, Utc};

    fn owner() -> Owner {
        Owner {
            login: "octocat".to_string(),
            avatar_url: "https://avatars.example/octocat.png".to_string(),
            html_url: None,
        }
    }

    fn repository(name: &str) -> Repository {
        Repository {
            id: 1,
            name: name.to_string(),
            full_name: format!("octocat/{name}"),
            html_url: format!("https://github.com/octocat/{name}"),
            description: None,
            owner: owner(),
            stargazers_count: 0,
            forks_count: 0,
            open_issues_count: 0,
            language: None,
        }
    }

    fn issue(number: u64) -> Issue {
        Issue {
            id: number,
            number,
            title: format!("issue {number}"),
            html_url: format!("https://github.com/octocat/hello/issues/{number}"),
            state: "open".to_string(),
            user: owner(),
            labels: Vec::new(),
            comments: 0,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            pull_request: None,
        }
    }

    fn page(numbers: &[u64], links: PageLinks) -> Result<IssuePage, ApiError> {
        Ok(IssuePage {
            issues: numbers.iter().copied().map(issue).collect(),
            links,
        })
    }

    fn numbers(state: &RepositoryState) -> Vec<u64> {
        state.issues.iter().map(|i| i.number).collect()
    }

    #[test]
    fn out_of_order_issue_response_is_ignored() {
        let mut state = RepositoryState::default();
        let first = state.begin_issues();
        let second = state.begin_issues();

        assert!(state.apply_issues(second, 1, page(&[2], PageLinks::default())));
        assert!(!state.apply_issues(first, 1, page(&[1], PageLinks::default())));
        assert_eq!(numbers(&state), vec![2]);
    }

    #[test]
    fn superseded_response_does_not_end_fetching() {
        let mut state = RepositoryState::default();
        let first = state.begin_issues();
        let _second = state.begin_issues();

        assert!(!state.apply_issues(first, 1, page(&[1], PageLinks::default())));
        assert!(state.fetching);
        assert!(state.issues.is_empty());
    }

    #[test]
    fn reselecting_active_filter_changes_nothing() {
        let mut state = RepositoryState::default();
        state.pager = Pager {
            page: 3,
            last_page: Some(7),
        };
        let before = state.clone();

        assert!(!state.select_filter(IssueFilter::Open));
        assert_eq!(state, before);
    }

    #[test]
    fn new_filter_returns_to_first_page() {
        let mut state = RepositoryState::default();
        state.pager = Pager {
            page: 3,
            last_page: Some(7),
        };

        assert!(state.select_filter(IssueFilter::Closed));
        assert_eq!(state.filter, IssueFilter::Closed);
        assert_eq!(state.pager, Pager::default());
        assert_eq!(state.pager.last_page, None);
    }

    #[test]
    fn learns_last_page_from_links() {
        let mut state = RepositoryState::default();
        let ticket = state.begin_issues();
        let links = PageLinks {
            next: Some(2),
            last: Some(4),
            ..PageLinks::default()
        };
        state.apply_issues(ticket, 1, page(&[1, 2], links));

        assert_eq!(state.pager.last_page, Some(4));
        assert!(!state.can_go_previous());
        assert!(state.can_go_next());
    }

    #[test]
    fn navigation_blocked_while_fetching() {
        let mut state = RepositoryState::default();
        state.pager = Pager {
            page: 2,
            last_page: Some(3),
        };
        state.begin_issues();

        assert!(!state.can_go_next());
        assert!(!state.next_page());
        assert!(!state.previous_page());
        assert_eq!(state.pager.page, 2);
    }

    #[test]
    fn navigation_stops_at_boundaries() {
        let mut state = RepositoryState::default();
        let ticket = state.begin_issues();
        state.apply_issues(ticket, 1, page(&[1], PageLinks::default()));

        assert!(!state.previous_page());
        assert!(!state.next_page());
        assert_eq!(state.pager.page, 1);
    }

    #[test]
    fn loading_until_both_fetches_resolve() {
        let mut state = RepositoryState::default();
        let repo_ticket = state.begin_repository();
        let issues_ticket = state.begin_issues();
        assert!(state.is_loading());

        state.apply_issues(issues_ticket, 1, page(&[1], PageLinks::default()));
        assert!(state.is_loading());

        state.apply_repository(repo_ticket, Ok(repository("hello")));
        assert!(!state.is_loading());
    }

    #[test]
    fn metadata_failure_ends_loading() {
        let mut state = RepositoryState::default();
        let repo_ticket = state.begin_repository();
        state.begin_issues();

        state.apply_repository(repo_ticket, Err(ApiError::NotFound));
        assert!(!state.is_loading());
        assert_eq!(state.repo_error.as_deref(), Some("Repository not found."));
    }

    #[test]
    fn issues_failure_still_ends_loading() {
        let mut state = RepositoryState::default();
        let repo_ticket = state.begin_repository();
        let issues_ticket = state.begin_issues();
        state.apply_repository(repo_ticket, Ok(repository("hello")));
        state.apply_issues(issues_ticket, 1, Err(ApiError::RateLimited));

        assert!(!state.is_loading());
        assert!(!state.fetching);
        assert!(state.issues_error.is_some());
    }

    #[test]
    fn late_metadata_for_previous_repository_is_ignored() {
        let mut state = RepositoryState::default();
        let old = state.begin_repository();
        state.switch_repository();
        let new = state.begin_repository();

        assert!(state.apply_repository(new, Ok(repository("second"))));
        assert!(!state.apply_repository(old, Ok(repository("first"))));
        assert_eq!(state.repository.map(|r| r.name).as_deref(), Some("second"));
    }

    #[test]
    fn invalid_name_invalidates_pending_metadata() {
        let mut state = RepositoryState::default();
        let pending = state.begin_repository();
        state.fail_repository(&ApiError::InvalidRepository("x".to_string()));

        assert!(!state.apply_repository(pending, Ok(repository("hello"))));
        assert!(state.repository.is_none());
        assert!(!state.is_loading());
    }

    #[test]
    fn switching_repository_resets_filter_and_issues() {
        let mut state = RepositoryState::default();
        let ticket = state.begin_issues();
        state.apply_issues(ticket, 1, page(&[1], PageLinks::default()));
        state.select_filter(IssueFilter::All);

        state.switch_repository();
        assert_eq!(state.filter, IssueFilter::Open);
        assert_eq!(state.pager, Pager::default());
        assert!(state.issues.is_empty());
        assert!(state.is_loading());
    }
}

use leptos::logging::{log, warn};
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::filter::IssueFilter;
use crate::models::{Issue, RepoName, Repository};
use crate::pagination::PageLinks;

/// Parameters of one issues page request.
#[derive(Clone, Debug, PartialEq)]
pub struct IssuesQuery {
    pub repo: RepoName,
    pub state: IssueFilter,
    pub page: u32,
    pub per_page: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IssuePage {
    pub issues: Vec<Issue>,
    pub links: PageLinks,
}

#[derive(Clone, Debug)]
pub struct GithubClient {
    config: ApiConfig,
}

impl GithubClient {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    pub fn repository_url(&self, repo: &RepoName) -> String {
        format!(
            "{}/repos/{}/{}",
            self.config.base_url,
            encode_segment(&repo.owner),
            encode_segment(&repo.name)
        )
    }

    pub fn issues_url(&self, query: &IssuesQuery) -> String {
        format!(
            "{}/issues?state={}&page={}&per_page={}",
            self.repository_url(&query.repo),
            query.state.as_str(),
            query.page.max(1),
            query.per_page
        )
    }

    /// Query for `page` of `repo` using the configured page size.
    pub fn issues_query(&self, repo: RepoName, state: IssueFilter, page: u32) -> IssuesQuery {
        IssuesQuery {
            repo,
            state,
            page,
            per_page: self.config.per_page,
        }
    }

    pub async fn fetch_repository(&self, repo: &RepoName) -> Result<Repository, ApiError> {
        let url = self.repository_url(repo);
        let response = self.get(&url).await?;
        decode(&response.text().await.map_err(|e| ApiError::Request(format!("{e:?}")))?)
    }

    pub async fn fetch_issues(&self, query: &IssuesQuery) -> Result<IssuePage, ApiError> {
        let url = self.issues_url(query);
        let response = self.get(&url).await?;
        let links = PageLinks::parse(response.headers().get("link").as_deref());
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Request(format!("{e:?}")))?;
        let issues: Vec<Issue> = decode(&body)?;

        log!(
            "{} {} page {}: {} issues, links {:?}",
            query.repo,
            query.state.as_str(),
            query.page,
            issues.len(),
            links
        );

        Ok(IssuePage { issues, links })
    }

    async fn get(&self, url: &str) -> Result<reqwasm::http::Response, ApiError> {
        log!("GET {url}");

        let response = reqwasm::http::Request::get(url)
            .header("Accept", "application/vnd.github.v3+json")
            .header("User-Agent", &self.config.user_agent)
            .send()
            .await
            .map_err(|e| {
                warn!("GET {url} failed: {e:?}");
                ApiError::Request(format!("{e:?}"))
            })?;

        if !response.ok() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let err = ApiError::from_status(status, &body);
            warn!("GET {url} returned {status}: {err}");
            return Err(err);
        }

        Ok(response)
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Percent-encode a single URL path segment.
pub(crate) fn encode_segment(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.' | '~' => result.push(c),
            _ => {
                let mut buf = [0u8; 4];
                for byte in c.encode_utf8(&mut buf).as_bytes() {
                    result.push_str(&format!("%{:02X}", byte));
                }
            }
        }
    }
    result
}

/// Settings for talking to the GitHub API.
///
/// Values are fixed at build time (`REPO_ISSUES_API_URL`,
/// `REPO_ISSUES_PER_PAGE`) since the app runs entirely in the browser.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub per_page: u32,
    pub user_agent: String,
}

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_PER_PAGE: u32 = 5;
pub const USER_AGENT: &str = "repo-issues";

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            per_page: DEFAULT_PER_PAGE,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl ApiConfig {
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("REPO_ISSUES_API_URL"),
            option_env!("REPO_ISSUES_PER_PAGE"),
        )
    }

    fn from_values(base_url: Option<&str>, per_page: Option<&str>) -> Self {
        let mut config = Self::default();

        if let Some(url) = base_url.map(str::trim).filter(|u| !u.is_empty()) {
            config.base_url = url.trim_end_matches('/').to_string();
        }

        // GitHub caps per_page at 100.
        if let Some(n) = per_page
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|n| (1..=100).contains(n))
        {
            config.per_page = n;
        }

        config
    }
}

use octocrab::Error as OctocrabError;
use thiserror::Error;

const TOKEN_FIXES: &str = "🔧 QUICK FIXES:
   → Export a token: export GITHUB_TOKEN=your_token
   → Or reuse the GitHub CLI login: export GITHUB_TOKEN=\"$(gh auth token)\"
   → Create token at: https://github.com/settings/tokens
     (needs 'repo' scope for private repos, 'public_repo' for public)";

const CONFIG_FIXES: &str = "🔧 QUICK FIXES:
   → Check workflow-metrics.toml for typos
   → Override a key from the environment: export WORKFLOW_METRICS__COLLECTION__LOOKBACK_DAYS=7";

#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("GitHub Authentication Error\n🔑 {0}\n\n{fixes}", fixes = TOKEN_FIXES)]
    TokenNotFound(String),
    #[error("GitHub API Error\n🌐 {0}")]
    ApiError(#[from] OctocrabError),
    #[error("File System Error\n📁 {0}")]
    IoError(#[from] std::io::Error),
    #[error("Configuration Error\n📂 {0}\n\n{fixes}", fixes = CONFIG_FIXES)]
    Configuration(String),
}

impl GitHubError {
    /// Short operator hint for the failure, keyed on the HTTP status where there is one.
    pub fn troubleshooting(&self) -> &'static str {
        match self {
            GitHubError::TokenNotFound(_) => "set GITHUB_TOKEN before running the collector",
            GitHubError::Configuration(_) => "fix the configuration file or WORKFLOW_METRICS__* overrides",
            GitHubError::IoError(_) => "check file permissions and free disk space",
            GitHubError::ApiError(octocrab_err) => match octocrab_err {
                OctocrabError::GitHub { source, .. } => match source.status_code.as_u16() {
                    401 => "token is invalid or expired; run: gh auth login",
                    403 => "token lacks permissions or the rate limit was hit; check: gh api rate_limit",
                    404 => "repository may not exist or be private; check GITHUB_REPOSITORY",
                    _ => "check authentication (gh auth status) and GitHub status (https://status.github.com)",
                },
                OctocrabError::Serde { .. } | OctocrabError::Json { .. } => {
                    "the API answered with an unexpected payload; check api_base_url"
                }
                _ => "network connection to the GitHub API failed; test: curl -I https://api.github.com",
            },
        }
    }
}

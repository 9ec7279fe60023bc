use serde::Deserialize;

/// Label reference as embedded in issue and pull request payloads
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LabelRef {
    pub name: String,
}

/// The subset of an issue or pull request the collector reads.
///
/// The issues endpoint also returns pull requests; both deserialize into this
/// shape.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct LabeledItem {
    #[serde(default)]
    pub labels: Vec<LabelRef>,
    #[serde(default)]
    pub body: Option<String>,
}

impl LabeledItem {
    pub fn label_names(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(|label| label.name.as_str())
    }
}

/// One GitHub Actions workflow run
#[derive(Debug, Clone, Deserialize, Default)]
pub struct WorkflowRunRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub conclusion: Option<String>,
}

/// Envelope returned by `GET /repos/{repo}/actions/runs`
#[derive(Debug, Clone, Deserialize, Default)]
pub struct WorkflowRunsPage {
    #[serde(default)]
    pub workflow_runs: Vec<WorkflowRunRecord>,
}

/// A repository label from `GET /repos/{repo}/labels`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RepoLabel {
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub description: Option<String>,
}

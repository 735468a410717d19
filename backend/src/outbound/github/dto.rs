//! DTOs for decoding GitHub issue-creation responses.

use serde::Deserialize;

use crate::domain::ports::FiledIssue;

/// Subset of the `201 Created` body returned by `POST /repos/{owner}/{repo}/issues`.
#[derive(Debug, Deserialize)]
pub(super) struct CreatedIssueDto {
    pub(super) number: u64,
    pub(super) html_url: String,
}

impl From<CreatedIssueDto> for FiledIssue {
    fn from(value: CreatedIssueDto) -> Self {
        Self {
            number: value.number,
            url: value.html_url,
        }
    }
}

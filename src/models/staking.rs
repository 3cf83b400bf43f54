use serde::{Deserialize, Serialize};

use crate::services::staking_refresh::{RefreshOutcome, RefreshReport};

pub const REFRESH_SUCCESS_MESSAGE: &str = "All staking data updated successfully";
pub const REFRESH_PARTIAL_MESSAGE: &str = "Some staking data updates failed";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedUpdate {
    pub id_protocol: String,
    pub name_project: String,
    pub chain: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedUpdate {
    pub id_protocol: String,
    pub name_project: String,
    pub chain: String,
    pub reason: String,
}

/// Body of `POST /staking/update`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub message: String,
    pub failed_updates: Vec<FailedUpdate>,
    pub updated: Vec<String>,
    pub skipped: Vec<SkippedUpdate>,
}

impl From<RefreshReport> for RefreshResponse {
    fn from(report: RefreshReport) -> Self {
        let mut failed_updates = Vec::new();
        let mut updated = Vec::new();
        let mut skipped = Vec::new();

        for outcome in report.outcomes {
            match outcome {
                RefreshOutcome::Updated { id_protocol, .. } => updated.push(id_protocol),
                RefreshOutcome::Skipped {
                    id_protocol,
                    name_project,
                    chain,
                    reason,
                } => skipped.push(SkippedUpdate {
                    id_protocol,
                    name_project,
                    chain,
                    reason,
                }),
                RefreshOutcome::Failed {
                    id_protocol,
                    name_project,
                    chain,
                    error,
                } => failed_updates.push(FailedUpdate {
                    id_protocol,
                    name_project,
                    chain,
                    error,
                }),
            }
        }

        let message = if failed_updates.is_empty() {
            REFRESH_SUCCESS_MESSAGE
        } else {
            REFRESH_PARTIAL_MESSAGE
        };

        Self {
            message: message.to_string(),
            failed_updates,
            updated,
            skipped,
        }
    }
}

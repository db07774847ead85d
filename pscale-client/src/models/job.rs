//! Job engine models

use serde::{Deserialize, Serialize};

/// Parameters of a SnapRevert job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnaprevertParams {
    pub snapid: i64,
}

/// Body for starting a job
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobRequest {
    #[serde(rename = "type")]
    pub job_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_dup: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snaprevert_params: Option<SnaprevertParams>,
}

impl JobRequest {
    pub const SNAP_REVERT: &'static str = "SnapRevert";

    /// A SnapRevert job restoring snapshot `snapid`
    pub fn snap_revert(snapid: i64, allow_dup: Option<bool>) -> Self {
        Self {
            job_type: Self::SNAP_REVERT.to_string(),
            allow_dup,
            snaprevert_params: Some(SnaprevertParams { snapid }),
        }
    }
}

/// A job as returned by the API
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Job {
    pub id: i64,
    #[serde(default)]
    pub state: String,
    #[serde(rename = "type", default)]
    pub job_type: String,
}

/// `{"jobs": [...]}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobList {
    #[serde(default)]
    pub jobs: Vec<Job>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn snap_revert_body() {
        let req = JobRequest::snap_revert(42, None);
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"type": "SnapRevert", "snaprevert_params": {"snapid": 42}})
        );
    }
}

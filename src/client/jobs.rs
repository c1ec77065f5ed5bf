//! Server-side zip archive jobs.
//!
//! A fire-and-poll protocol with no client-side state: start a job, poll its
//! status, optionally cancel it. The caller owns the polling loop and its
//! backoff; nothing here polls or retries on its own.

use reqwest::Method;
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

use super::{Client, files::require_paths};
use crate::{
    error::{Error, Result},
    types::{JobId, OpenMap},
};

fn require_job_id(job_id: &JobId) -> Result<()> {
    if job_id.as_str().trim().is_empty() {
        return Err(Error::validation("job id must not be empty"));
    }
    Ok(())
}

impl Client {
    /// Submits the paths for archiving and returns the job identifier.
    pub async fn start_zip_job<S: AsRef<str>>(&self, cancel: &CancellationToken, paths: &[S]) -> Result<JobId> {
        let paths = require_paths(paths)?;
        let body = json!({ "paths": paths });
        let raw: OpenMap = self.post(cancel, &["start-zip-job"], Some(&body)).await?;

        match raw.get("job_id") {
            Some(Value::String(id)) if !id.is_empty() => Ok(JobId::new(id.clone())),
            Some(Value::Number(id)) => Ok(JobId::new(id.to_string())),
            _ => Err(Error::UnexpectedResponse(format!(
                "missing job_id in {}",
                serde_json::to_string(&raw)?
            ))),
        }
    }

    /// Current status of a job. The payload shape is defined by the server.
    pub async fn zip_job_status(&self, cancel: &CancellationToken, job_id: &JobId) -> Result<OpenMap> {
        require_job_id(job_id)?;
        self.get(cancel, &["zip-job-status", job_id.as_str()], &[]).await
    }

    /// Asks the server to cancel a job. Returns `true` once acknowledged.
    pub async fn cancel_zip_job(&self, cancel: &CancellationToken, job_id: &JobId) -> Result<bool> {
        require_job_id(job_id)?;
        self.request_empty(cancel, Method::POST, &["cancel-zip-job", job_id.as_str()], &[], None)
            .await?;
        Ok(true)
    }
}

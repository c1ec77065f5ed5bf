use tokio_util::sync::CancellationToken;

use super::{fail, spinner};
use crate::{client::Client, info, success, types::JobId, warning};

pub async fn zip_start(client: &Client, cancel: &CancellationToken, paths: Vec<String>) {
    let pb = spinner(format!("Starting zip job for {} paths...", paths.len()));
    match client.start_zip_job(cancel, &paths).await {
        Ok(job_id) => {
            pb.finish_and_clear();
            success!("Zip job started: {}", job_id);
            info!("Check progress with: juicewrld zip status {}", job_id);
        }
        Err(e) => fail(&pb, "Cannot start zip job", e),
    }
}

pub async fn zip_status(client: &Client, cancel: &CancellationToken, job_id: String) {
    let job_id = JobId::new(job_id);
    let pb = spinner(format!("Fetching status of job {}...", job_id));
    let status = match client.zip_job_status(cancel, &job_id).await {
        Ok(status) => status,
        Err(e) => fail(&pb, "Cannot load job status", e),
    };
    pb.finish_and_clear();

    if status.is_empty() {
        warning!("Server returned an empty status for job {}", job_id);
        return;
    }
    for (key, _) in status.iter() {
        println!("  {:<16} {}", format!("{}:", key), status.display(key));
    }
}

pub async fn zip_cancel(client: &Client, cancel: &CancellationToken, job_id: String) {
    let job_id = JobId::new(job_id);
    let pb = spinner(format!("Cancelling job {}...", job_id));
    match client.cancel_zip_job(cancel, &job_id).await {
        Ok(true) => {
            pb.finish_and_clear();
            success!("Job {} cancelled", job_id);
        }
        Ok(false) => {
            pb.finish_and_clear();
            warning!("Job {} was not cancelled", job_id);
        }
        Err(e) => fail(&pb, "Cannot cancel job", e),
    }
}

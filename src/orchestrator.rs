use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::api::GatewayClient;
use crate::error::FerryError;
use crate::executor::run_bounded;
use crate::params::JobParams;
use crate::poll::wait_for_file;
use crate::transfer;
use crate::ui::{BatchProgress, PhaseSpinner};

/// File extensions the service accepts as job inputs.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["wav", "mp3", "flac", "ogg", "m4a", "yaml"];

/// Content type for the uploaded job descriptor.
const YAML_MIME: &str = "application/x-yaml";

/// Everything a single run needs beyond the gateway client.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub inputs_dir: PathBuf,
    pub output_dir: PathBuf,
    pub agents: Vec<String>,
    pub prefix: Option<String>,
    /// Maximum wall-clock wait per expected output file.
    pub timeout: Duration,
    /// Constant delay between finalized checks.
    pub interval: Duration,
    /// Worker cap for upload/download batches.
    pub workers: usize,
}

/// Local paths of the two artifacts produced for one input file.
#[derive(Debug, Clone, Serialize)]
pub struct ResultPair {
    pub file: PathBuf,
    pub json: PathBuf,
}

/// Outcome of a full run. Per-file failures are counted, not fatal.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub job_id: String,
    /// Base names that made it into the job's `files` list.
    pub uploaded: Vec<String>,
    pub upload_failures: usize,
    pub download_failures: usize,
    /// Original file name → downloaded artifact pair. Entries with any
    /// failure (timeout or transfer) are absent.
    pub results: BTreeMap<String, ResultPair>,
}

/// Drives a job through the full workflow: create, upload, submit, collect.
pub struct JobRunner {
    client: GatewayClient,
    options: RunOptions,
}

impl JobRunner {
    pub fn new(client: GatewayClient, options: RunOptions) -> Self {
        Self { client, options }
    }

    /// Run the end-to-end workflow. Job creation and descriptor submission
    /// failures abort the run; per-file upload/download failures are
    /// recorded in the report and the batch continues without them.
    pub async fn run(&self) -> Result<RunReport> {
        let spinner = PhaseSpinner::start("Creating job");
        let job_id = match self.client.create_job().await {
            Ok(id) => {
                spinner.done(&format!("Created job {id}"));
                id
            }
            Err(e) => {
                spinner.fail("Job creation failed");
                return Err(e).context("failed to create job");
            }
        };

        let inputs = collect_inputs(&self.options.inputs_dir)?;
        tokio::fs::create_dir_all(&self.options.output_dir)
            .await
            .with_context(|| {
                format!(
                    "failed to create output directory {}",
                    self.options.output_dir.display()
                )
            })?;

        let (uploaded, upload_failures) = self.upload_inputs(&job_id, &inputs).await;

        let mut params = JobParams::new(self.options.agents.clone(), self.options.prefix.clone());
        params.files = uploaded.clone();

        let spinner = PhaseSpinner::start("Submitting job parameters");
        match self.submit_params(&job_id, &params).await {
            Ok(descriptor) => {
                spinner.done(&format!("Submitted {}", descriptor.display()));
            }
            Err(e) => {
                spinner.fail("Descriptor submission failed");
                return Err(e).context("failed to submit job parameters");
            }
        }

        // Results are expected for every accepted input, whether or not its
        // upload succeeded; missing ones simply time out and are omitted.
        let accepted: Vec<String> = inputs.iter().map(|p| base_name(p)).collect();
        let (results, download_failures) = self.download_results(&job_id, &accepted).await;

        Ok(RunReport {
            job_id,
            uploaded,
            upload_failures,
            download_failures,
            results,
        })
    }

    /// Upload every accepted input with bounded concurrency, returning the
    /// base names that succeeded (in submission order) and the failure count.
    async fn upload_inputs(&self, job_id: &str, inputs: &[PathBuf]) -> (Vec<String>, usize) {
        if inputs.is_empty() {
            return (Vec::new(), 0);
        }
        let progress = BatchProgress::start("Uploading", inputs.len() as u64);
        let outcomes = run_bounded(inputs.to_vec(), self.options.workers, |path| {
            let progress = progress.clone();
            async move {
                let result = self.upload_one(job_id, &path).await;
                match &result {
                    Ok(name) => progress.file_done(name),
                    Err(e) => progress.file_failed(&base_name(&path), &e.to_string()),
                }
                result
            }
        })
        .await;
        progress.finish();

        let mut uploaded = Vec::new();
        let mut failures = 0;
        for (_, result) in outcomes {
            match result {
                Ok(name) => uploaded.push(name),
                Err(_) => failures += 1,
            }
        }
        (uploaded, failures)
    }

    async fn upload_one(&self, job_id: &str, path: &Path) -> Result<String, FerryError> {
        let file_name = base_name(path);
        let mime = transfer::guess_mime(path);
        let signed_url = self.client.upload_url(job_id, &file_name, &mime).await?;
        transfer::upload(self.client.http(), path, &signed_url, &mime).await?;
        Ok(file_name)
    }

    /// Write the descriptor to the output directory and upload it to the job.
    async fn submit_params(
        &self,
        job_id: &str,
        params: &JobParams,
    ) -> Result<PathBuf, FerryError> {
        let file_name = JobParams::file_name(job_id);
        let descriptor = self.options.output_dir.join(&file_name);
        tokio::fs::write(&descriptor, params.to_yaml()?).await?;

        let signed_url = self.client.upload_url(job_id, &file_name, YAML_MIME).await?;
        transfer::upload(self.client.http(), &descriptor, &signed_url, YAML_MIME).await?;
        Ok(descriptor)
    }

    /// Download the result pair for every name, with bounded concurrency.
    /// An entry is included only when both artifacts arrive.
    async fn download_results(
        &self,
        job_id: &str,
        names: &[String],
    ) -> (BTreeMap<String, ResultPair>, usize) {
        if names.is_empty() {
            return (BTreeMap::new(), 0);
        }
        let progress = BatchProgress::start("Downloading", names.len() as u64);
        let outcomes = run_bounded(names.to_vec(), self.options.workers, |name| {
            let progress = progress.clone();
            async move {
                let result = self.download_pair(job_id, &name).await;
                match &result {
                    Ok(_) => progress.file_done(&name),
                    Err(e) => progress.file_failed(&name, &e.to_string()),
                }
                result
            }
        })
        .await;
        progress.finish();

        let mut results = BTreeMap::new();
        let mut failures = 0;
        for (name, result) in outcomes {
            match result {
                Ok(pair) => {
                    results.insert(name, pair);
                }
                Err(_) => failures += 1,
            }
        }
        (results, failures)
    }

    async fn download_pair(&self, job_id: &str, file_name: &str) -> Result<ResultPair, FerryError> {
        let stem = Path::new(file_name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_name.to_string());
        let file = self.fetch_result(job_id, file_name).await?;
        let json = self.fetch_result(job_id, &format!("{stem}.json")).await?;
        Ok(ResultPair { file, json })
    }

    /// Wait for one output file to finalize, then download it.
    async fn fetch_result(&self, job_id: &str, file_name: &str) -> Result<PathBuf, FerryError> {
        let ready = wait_for_file(
            &self.client,
            job_id,
            file_name,
            self.options.timeout,
            self.options.interval,
        )
        .await;
        if !ready {
            return Err(FerryError::Timeout {
                file_name: file_name.to_string(),
                timeout_secs: self.options.timeout.as_secs(),
            });
        }
        let signed_url = self.client.download_url(job_id, file_name).await?;
        let dest = self.options.output_dir.join(file_name);
        transfer::download(self.client.http(), &signed_url, &dest).await?;
        Ok(dest)
    }
}

/// Enumerate the inputs directory, keeping only files whose extension is on
/// the allow-list. Everything else is silently skipped. Sorted by path so
/// the uploaded `files` list is deterministic.
pub fn collect_inputs(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read inputs directory {}", dir.display()))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && has_supported_extension(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

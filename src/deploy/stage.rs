use crate::common::{
    constants::{
        GCP_CREDENTIALS_ENV, GCP_CREDENTIALS_FILENAME, KUBECONFIG_ENV, KUBECONFIG_FILENAME,
        VALUES_FILENAME, XDG_ENVS,
    },
    error::{Result, WriteStagedFile},
};
use snafu::ResultExt;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// This is the outcome of staging a run: the environment mapping the helm process must
/// run with, and the staged values file for the values-file profile. The mapping is
/// handed to the process invocation directly instead of mutating the global process
/// environment.
#[derive(Debug)]
pub(crate) struct StagedRun {
    envs: Vec<(String, String)>,
    values_file: Option<PathBuf>,
}

impl StagedRun {
    /// This returns the environment mapping for the helm process.
    pub(crate) fn envs(&self) -> Vec<(String, String)> {
        self.envs.clone()
    }

    /// This returns the path of the staged values file, if one was written.
    pub(crate) fn values_file(&self) -> Option<&Path> {
        self.values_file.as_deref()
    }
}

/// Stages one run under `stage_dir`. The XDG cache/config directory variables are
/// always produced so that helm can run without a home directory. The kubeconfig and
/// cloud credential blobs are written to their fixed paths only when provided, each
/// adding the location variable helm (or its secrets extension) reads. The values blob
/// is written for the values-file profile only. Files are overwritten on every run and
/// never cleaned up.
pub(crate) async fn stage_run<P>(
    stage_dir: P,
    kubeconfig: &str,
    gcp_credentials: &str,
    values_blob: Option<&str>,
) -> Result<StagedRun>
where
    P: AsRef<Path>,
{
    let stage_dir = stage_dir.as_ref();

    let mut envs: Vec<(String, String)> = XDG_ENVS
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();

    if !kubeconfig.is_empty() {
        let filepath = stage_dir.join(KUBECONFIG_FILENAME);
        write_staged_file(&filepath, kubeconfig).await?;
        envs.push((
            KUBECONFIG_ENV.to_string(),
            filepath.to_string_lossy().to_string(),
        ));
    }

    if !gcp_credentials.is_empty() {
        let filepath = stage_dir.join(GCP_CREDENTIALS_FILENAME);
        write_staged_file(&filepath, gcp_credentials).await?;
        envs.push((
            GCP_CREDENTIALS_ENV.to_string(),
            filepath.to_string_lossy().to_string(),
        ));
    }

    let mut values_file: Option<PathBuf> = None;
    if let Some(blob) = values_blob {
        let filepath = stage_dir.join(VALUES_FILENAME);
        write_staged_file(&filepath, blob).await?;
        values_file = Some(filepath);
    }

    Ok(StagedRun { envs, values_file })
}

/// Writes one staged file. A write failure (disk full, permission) aborts the run.
async fn write_staged_file(filepath: &Path, content: &str) -> Result<()> {
    debug!(filepath = %filepath.display(), "Staging file");
    fs::write(filepath, content).await.context(WriteStagedFile {
        filepath: filepath.to_path_buf(),
    })
}

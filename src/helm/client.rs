use crate::common::{
    constants::HELM_COMMAND,
    error::{HelmCommand, HelmUpgradeCommand, Result, U8VectorToString},
};
use snafu::{ensure, ResultExt};
use std::str;
use tokio::process::Command;
use tracing::{debug, warn};

/// This is a builder for HelmClient.
#[derive(Default)]
pub(crate) struct HelmClientBuilder {
    command_name: Option<String>,
    envs: Vec<(String, String)>,
}

impl HelmClientBuilder {
    /// This is a builder option to override the name of the helm binary. Defaults to
    /// `helm` from $PATH.
    #[must_use]
    pub(crate) fn with_command_name<J>(mut self, command_name: J) -> Self
    where
        J: ToString,
    {
        self.command_name = Some(command_name.to_string());
        self
    }

    /// This is a builder option to add the staged environment variables which the helm
    /// process runs with.
    #[must_use]
    pub(crate) fn with_envs(mut self, envs: Vec<(String, String)>) -> Self {
        self.envs = envs;
        self
    }

    /// Build the HelmClient.
    pub(crate) fn build(self) -> HelmClient {
        HelmClient {
            command_name: self
                .command_name
                .unwrap_or_else(|| HELM_COMMAND.to_string()),
            envs: self.envs,
        }
    }
}

/// This type executes helm commands to deploy and remove helm releases.
pub(crate) struct HelmClient {
    command_name: String,
    envs: Vec<(String, String)>,
}

impl HelmClient {
    /// This creates an empty builder.
    pub(crate) fn builder() -> HelmClientBuilder {
        HelmClientBuilder::default()
    }

    /// Runs the `helm upgrade` command with the assembled argv. A non-zero exit is a
    /// fatal failure carrying helm's standard error.
    pub(crate) async fn upgrade(&self, args: Vec<String>) -> Result<()> {
        let output = self.run(args.clone(), "Helm upgrade command").await?;

        ensure!(
            output.status.success(),
            HelmUpgradeCommand {
                command: self.command_name.clone(),
                args,
                std_err: str::from_utf8(output.stderr.as_slice())
                    .context(U8VectorToString)?
                    .to_string()
            }
        );

        Ok(())
    }

    /// Runs the `helm delete` command with the assembled argv. Removal is best-effort,
    /// so a non-zero exit (e.g. release not found) is logged and ignored. Failing to
    /// execute the binary at all still errors out.
    pub(crate) async fn uninstall(&self, args: Vec<String>) -> Result<()> {
        let output = self.run(args.clone(), "Helm delete command").await?;

        if !output.status.success() {
            let std_err = str::from_utf8(output.stderr.as_slice())
                .context(U8VectorToString)?
                .to_string();
            warn!(%std_err, ?args, "Helm delete command failed, ignoring");
        }

        Ok(())
    }

    /// Spawns the helm binary with the given argv and the staged environment, and
    /// awaits its completion.
    async fn run(&self, args: Vec<String>, log_context: &str) -> Result<std::process::Output> {
        let command = self.command_name.as_str();
        debug!(%command, ?args, "{}", log_context);

        let output = Command::new(command)
            .args(args.clone())
            .envs(self.envs.iter().map(|(key, value)| (key.as_str(), value.as_str())))
            .output()
            .await
            .context(HelmCommand {
                command: command.to_string(),
                args,
            })?;

        let stdout_str = str::from_utf8(output.stdout.as_slice()).context(U8VectorToString)?;
        debug!(stdout=%stdout_str, "{} standard output", log_context);

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::HelmClient;
    use crate::vec_to_strings;
    use std::{fs, os::unix::fs::PermissionsExt, path::PathBuf};
    use tempfile::TempDir;

    // A stand-in for the helm binary, exiting with the given code after printing a
    // known line on stderr. Refuses to run without the staged marker variable when
    // require_env is set.
    fn stub_helm(dir: &TempDir, exit_code: i32, require_env: bool) -> PathBuf {
        let filepath = dir.path().join("helm-stub");
        let env_check = if require_env {
            "[ -n \"$STAGED_MARKER\" ] || exit 90\n"
        } else {
            ""
        };
        fs::write(
            &filepath,
            format!("#!/bin/sh\n{env_check}echo release failure text >&2\nexit {exit_code}\n"),
        )
        .unwrap();
        fs::set_permissions(&filepath, fs::Permissions::from_mode(0o755)).unwrap();
        filepath
    }

    #[tokio::test]
    async fn test_upgrade_succeeds_on_zero_exit() {
        let dir = TempDir::new().unwrap();
        let stub = stub_helm(&dir, 0, false);

        let client = HelmClient::builder()
            .with_command_name(stub.display())
            .build();
        client
            .upgrade(vec_to_strings!["upgrade", "foo", "mychart"])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_upgrade_fails_on_non_zero_exit_with_stderr() {
        let dir = TempDir::new().unwrap();
        let stub = stub_helm(&dir, 3, false);

        let client = HelmClient::builder()
            .with_command_name(stub.display())
            .build();
        let error = client
            .upgrade(vec_to_strings!["upgrade", "foo", "mychart"])
            .await
            .unwrap_err();
        assert!(error.to_string().contains("release failure text"));
    }

    #[tokio::test]
    async fn test_uninstall_ignores_non_zero_exit() {
        let dir = TempDir::new().unwrap();
        let stub = stub_helm(&dir, 1, false);

        let client = HelmClient::builder()
            .with_command_name(stub.display())
            .build();
        client
            .uninstall(vec_to_strings!["delete", "-n", "bar", "foo"])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_missing_binary_is_an_error_even_for_uninstall() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("no-such-helm");

        let client = HelmClient::builder()
            .with_command_name(missing.display())
            .build();
        client
            .uninstall(vec_to_strings!["delete", "-n", "bar", "foo"])
            .await
            .unwrap_err();
    }

    #[tokio::test]
    async fn test_staged_envs_reach_the_child_process() {
        let dir = TempDir::new().unwrap();
        let stub = stub_helm(&dir, 0, true);

        let client = HelmClient::builder()
            .with_command_name(stub.display())
            .build();
        assert!(client
            .upgrade(vec_to_strings!["upgrade", "foo", "mychart"])
            .await
            .is_err());

        let client = HelmClient::builder()
            .with_command_name(stub.display())
            .with_envs(vec![("STAGED_MARKER".to_string(), "1".to_string())])
            .build();
        client
            .upgrade(vec_to_strings!["upgrade", "foo", "mychart"])
            .await
            .unwrap();
    }
}

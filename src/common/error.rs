use snafu::Snafu;
use std::path::PathBuf;

/// For use with multiple fallible operations which may fail for different reasons, but are
/// defined withing the same scope and must return to the outer scope (calling scope) using
/// the try operator -- '?'.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
#[snafu(context(suffix(false)))]
pub(crate) enum Error {
    /// Error for when a helm command could not be executed at all.
    #[snafu(display(
        "Failed to run helm command,\ncommand: {},\nargs: {:?},\ncommand_error: {}",
        command,
        args,
        source
    ))]
    HelmCommand {
        source: std::io::Error,
        command: String,
        args: Vec<String>,
    },

    /// Error for when the `helm upgrade` command returns a failure.
    #[snafu(display(
        "Failed to run helm upgrade,\ncommand: {},\nargs: {:?},\nstd_err: {}",
        command,
        args,
        std_err
    ))]
    HelmUpgradeCommand {
        command: String,
        args: Vec<String>,
        std_err: String,
    },

    /// Error for when std::str::from_utf8() fails.
    #[snafu(display("Failed to convert UTF8 bytes to String: {}", source))]
    U8VectorToString { source: std::str::Utf8Error },

    /// Error for when a credential/config file could not be staged to disk.
    #[snafu(display("Failed to write staged file {}: {}", filepath.display(), source))]
    WriteStagedFile {
        source: std::io::Error,
        filepath: PathBuf,
    },

    /// Error for when the normalized helm values could not be serialized to YAML.
    #[snafu(display("Failed to serialize helm values: {}", source))]
    SerializeValues { source: serde_yaml::Error },
}

/// A wrapper type to remove repeated Result<T, Error> returns.
pub(crate) type Result<T, E = Error> = std::result::Result<T, E>;

use crate::{
    common::constants::{DEFAULT_IMAGE_FIELD, DEFAULT_TAG_FIELD, SECRETS_SCHEME},
    opts::{
        normalize::{string_list, value_assignments, Toggle, ValueAssignment},
        CliArgs,
    },
    vec_to_strings,
};
use clap::ValueEnum;
use std::path::Path;

/// This selects how values reach helm and which install flags are always applied. Helm
/// resolves later flags over earlier ones for the same value path, so both profiles are
/// valid orderings. They are kept distinct because deployments depend on the resulting
/// precedence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum DeployProfile {
    /// Explode values into discrete --set flags after the values files, and always
    /// run with --dependency-update and --create-namespace.
    SetFlags,
    /// Stage values into a single values file appended after all other flags, without
    /// the aggressive install flags.
    ValuesFile,
}

/// This is the normalized input set for one deployment, assembled once from the raw
/// CLI/environment inputs.
#[derive(Debug)]
pub(crate) struct DeploySpec {
    pub(crate) release: String,
    pub(crate) namespace: String,
    pub(crate) chart: String,
    pub(crate) chart_version: String,
    pub(crate) repository: String,
    pub(crate) values: Vec<ValueAssignment>,
    pub(crate) value_files: Vec<String>,
    pub(crate) secrets_files: Vec<String>,
    pub(crate) timeout: String,
    pub(crate) dry_run: bool,
    pub(crate) atomic: bool,
    pub(crate) image: String,
    pub(crate) image_fields: Vec<String>,
    pub(crate) tag: String,
    pub(crate) tag_fields: Vec<String>,
    pub(crate) profile: DeployProfile,
}

impl DeploySpec {
    /// Normalizes the raw inputs into a DeploySpec. The CSV values input is only
    /// meaningful for the set-flags profile; the values-file profile routes the raw
    /// values through the staged values blob instead.
    pub(crate) fn from_opts(opts: &CliArgs) -> Self {
        let profile = opts.profile();
        let values = match profile {
            DeployProfile::SetFlags => value_assignments(&opts.values()),
            DeployProfile::ValuesFile => Vec::new(),
        };

        Self {
            release: opts.release(),
            namespace: opts.namespace(),
            chart: opts.chart(),
            chart_version: opts.chart_version(),
            repository: opts.repository(),
            values,
            value_files: string_list(&opts.value_files()),
            secrets_files: string_list(&opts.secrets_files()),
            timeout: opts.timeout(),
            dry_run: Toggle::parse(&opts.dry_run()).resolve(false),
            atomic: Toggle::parse(&opts.atomic()).resolve(true),
            image: opts.image(),
            image_fields: string_list(&opts.image_fields()),
            tag: opts.tag(),
            tag_fields: string_list(&opts.tag_fields()),
            profile,
        }
    }

    /// Builds the argv for the `helm upgrade` command. The argument order is
    /// deterministic and is never shuffled after assembly. `values_file` is the staged
    /// values blob path, present for the values-file profile only.
    pub(crate) fn upgrade_args(&self, values_file: Option<&Path>) -> Vec<String> {
        let mut args: Vec<String> = vec_to_strings![
            "upgrade",
            self.release,
            self.chart,
            "--install",
            "--wait",
            format!("--namespace={}", self.namespace)
        ];

        match self.profile {
            DeployProfile::SetFlags => {
                args.push("--dependency-update".to_string());
                args.push("--create-namespace".to_string());

                self.push_file_flags(&mut args);
                self.push_set_flags(&mut args);

                if self.dry_run {
                    args.push("--dry-run".to_string());
                }
                self.push_chart_source_flags(&mut args);
                if self.atomic {
                    args.push("--atomic".to_string());
                }
            }
            DeployProfile::ValuesFile => {
                if self.dry_run {
                    args.push("--dry-run".to_string());
                }
                if !self.image.is_empty() {
                    args.push(format!("--set={}={}", DEFAULT_IMAGE_FIELD, self.image));
                }
                if !self.tag.is_empty() {
                    args.push(format!("--set={}={}", DEFAULT_TAG_FIELD, self.tag));
                }
                self.push_chart_source_flags(&mut args);
                if self.atomic {
                    args.push("--atomic".to_string());
                }

                self.push_file_flags(&mut args);
                // The staged blob goes last, taking precedence over all other values
                // files.
                if let Some(filepath) = values_file {
                    args.push(format!("--values={}", filepath.display()));
                }
            }
        }

        args
    }

    /// Builds the argv for the `helm delete` command.
    pub(crate) fn uninstall_args(&self) -> Vec<String> {
        vec_to_strings!["delete", "-n", self.namespace, self.release]
    }

    /// Appends the --values flags for the plain and the helm-secrets encrypted values
    /// files, in input order.
    fn push_file_flags(&self, args: &mut Vec<String>) {
        for file in self.value_files.iter() {
            args.push(format!("--values={file}"));
        }
        for file in self.secrets_files.iter() {
            args.push(format!("--values={SECRETS_SCHEME}{file}"));
        }
    }

    /// Appends one --set flag per value assignment, then the image and tag overrides
    /// at their configured (or default) value paths. An assignment without a value
    /// renders as the literal 'undefined'.
    fn push_set_flags(&self, args: &mut Vec<String>) {
        for ValueAssignment { key, value } in self.values.iter() {
            args.push(format!(
                "--set={key}={}",
                value.as_deref().unwrap_or("undefined")
            ));
        }

        if !self.image.is_empty() {
            for field in Self::fields_or_default(&self.image_fields, DEFAULT_IMAGE_FIELD) {
                args.push(format!("--set={field}={}", self.image));
            }
        }
        if !self.tag.is_empty() {
            for field in Self::fields_or_default(&self.tag_fields, DEFAULT_TAG_FIELD) {
                args.push(format!("--set={field}={}", self.tag));
            }
        }
    }

    /// Appends the conditional chart-source flags, present only when their inputs are.
    fn push_chart_source_flags(&self, args: &mut Vec<String>) {
        if !self.chart_version.is_empty() {
            args.push(format!("--version={}", self.chart_version));
        }
        if !self.repository.is_empty() {
            args.push(format!("--repo={}", self.repository));
        }
        if !self.timeout.is_empty() {
            args.push(format!("--timeout={}", self.timeout));
        }
    }

    fn fields_or_default<'a>(fields: &'a [String], default: &'a str) -> Vec<&'a str> {
        if fields.is_empty() {
            vec![default]
        } else {
            fields.iter().map(String::as_str).collect()
        }
    }
}

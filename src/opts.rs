use crate::helm::args::DeployProfile;
use clap::Parser;

/// Normalize raw string inputs into canonical lists, toggles and discriminators.
pub(crate) mod normalize;

/// These are the supported configuration options for a deployment. Every option doubles
/// as an `INPUT_*` environment variable, the convention used by the hosting CI system to
/// hand action inputs to the process.
#[derive(Parser)]
#[command(name = env!("CARGO_PKG_NAME"), version)]
#[command(about = "Deploys a helm chart release", long_about = None)]
pub(crate) struct CliArgs {
    /// This is the name of the helm release to deploy or remove.
    #[arg(long, env = "INPUT_RELEASE", default_value = "")]
    release: String,

    /// This is the Kubernetes Namespace for the helm release.
    #[arg(long, env = "INPUT_NAMESPACE", default_value = "")]
    namespace: String,

    /// This is the chart reference, either a chart directory or a chart name in a
    /// repository.
    #[arg(long, env = "INPUT_CHART", default_value = "")]
    chart: String,

    /// This is the version of the chart to deploy. When empty, the latest chart
    /// version is used.
    #[arg(long, env = "INPUT_CHART_VERSION", default_value = "")]
    chart_version: String,

    /// This is the chart repository URL to locate the chart in.
    #[arg(long, env = "INPUT_REPOSITORY", default_value = "")]
    repository: String,

    /// These are the helm values. CSV-encoded key=value pairs for the set-flags
    /// profile, a YAML/JSON blob for the values-file profile.
    #[arg(long, env = "INPUT_VALUES", default_value = "")]
    values: String,

    /// These are the values files to pass to helm, as a JSON array or a single bare
    /// path.
    #[arg(long, env = "INPUT_VALUE_FILES", default_value = "")]
    value_files: String,

    /// These are the helm-secrets encrypted values files, as a JSON array or a single
    /// bare path.
    #[arg(long, env = "INPUT_SECRETS_FILES", default_value = "")]
    secrets_files: String,

    /// This selects the action: 'remove' uninstalls the release, anything else
    /// deploys it.
    #[arg(long, env = "INPUT_TASK", default_value = "")]
    task: String,

    /// This is the timeout forwarded to helm, e.g. '5m30s'.
    #[arg(long, env = "INPUT_TIMEOUT", default_value = "")]
    timeout: String,

    /// If set to 'true', the deployment runs as a dry-run.
    #[arg(long, env = "INPUT_DRY_RUN", default_value = "")]
    dry_run: String,

    /// If set to 'true' or left empty, failed deployments are rolled back. Any other
    /// value disables the rollback.
    #[arg(long, env = "INPUT_ATOMIC", default_value = "")]
    atomic: String,

    /// This is the container image to inject into the chart values.
    #[arg(long, env = "INPUT_IMAGE", default_value = "")]
    image: String,

    /// These are the dotted value paths the image override is injected at, as a JSON
    /// array or a single bare path. Defaults to 'image.name'.
    #[arg(long, env = "INPUT_IMAGE_FIELDS", default_value = "")]
    image_fields: String,

    /// This is the image tag to inject into the chart values.
    #[arg(long, env = "INPUT_TAG", default_value = "")]
    tag: String,

    /// These are the dotted value paths the tag override is injected at, as a JSON
    /// array or a single bare path. Defaults to 'image.tag'.
    #[arg(long, env = "INPUT_TAG_FIELDS", default_value = "")]
    tag_fields: String,

    /// This selects how values reach helm and which install flags are always applied.
    #[arg(long, env = "DEPLOY_PROFILE", value_enum, default_value = "set-flags")]
    profile: DeployProfile,

    /// This is the raw kubeconfig content to stage to disk for helm.
    #[arg(long, env = "KUBECONFIG_FILE", default_value = "", hide_env_values = true)]
    kubeconfig: String,

    /// This is the raw GCP credential content to stage to disk for the helm-secrets
    /// KMS backend.
    #[arg(long, env = "GCP_KMS_KEY_FILE", default_value = "", hide_env_values = true)]
    gcp_kms_key: String,
}

impl CliArgs {
    /// This returns the helm release name.
    pub(crate) fn release(&self) -> String {
        self.release.clone()
    }

    /// This returns the Kubernetes Namespace for the helm release.
    pub(crate) fn namespace(&self) -> String {
        self.namespace.clone()
    }

    /// This returns the chart reference.
    pub(crate) fn chart(&self) -> String {
        self.chart.clone()
    }

    /// This returns the chart version input.
    pub(crate) fn chart_version(&self) -> String {
        self.chart_version.clone()
    }

    /// This returns the chart repository input.
    pub(crate) fn repository(&self) -> String {
        self.repository.clone()
    }

    /// This returns the raw values input.
    pub(crate) fn values(&self) -> String {
        self.values.clone()
    }

    /// This returns the raw value-files input.
    pub(crate) fn value_files(&self) -> String {
        self.value_files.clone()
    }

    /// This returns the raw secrets-files input.
    pub(crate) fn secrets_files(&self) -> String {
        self.secrets_files.clone()
    }

    /// This returns the raw task discriminator input.
    pub(crate) fn task(&self) -> String {
        self.task.clone()
    }

    /// This returns the timeout input.
    pub(crate) fn timeout(&self) -> String {
        self.timeout.clone()
    }

    /// This returns the raw dry-run toggle input.
    pub(crate) fn dry_run(&self) -> String {
        self.dry_run.clone()
    }

    /// This returns the raw atomic toggle input.
    pub(crate) fn atomic(&self) -> String {
        self.atomic.clone()
    }

    /// This returns the image override input.
    pub(crate) fn image(&self) -> String {
        self.image.clone()
    }

    /// This returns the raw image-fields input.
    pub(crate) fn image_fields(&self) -> String {
        self.image_fields.clone()
    }

    /// This returns the tag override input.
    pub(crate) fn tag(&self) -> String {
        self.tag.clone()
    }

    /// This returns the raw tag-fields input.
    pub(crate) fn tag_fields(&self) -> String {
        self.tag_fields.clone()
    }

    /// This returns the selected deploy profile.
    pub(crate) fn profile(&self) -> DeployProfile {
        self.profile
    }

    /// This returns the raw kubeconfig content, empty when none was provided.
    pub(crate) fn kubeconfig(&self) -> String {
        self.kubeconfig.clone()
    }

    /// This returns the raw GCP credential content, empty when none was provided.
    pub(crate) fn gcp_kms_key(&self) -> String {
        self.gcp_kms_key.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::CliArgs;
    use crate::helm::args::DeployProfile;
    use clap::Parser;

    #[test]
    fn test_all_inputs_are_optional() {
        let opts = CliArgs::parse_from(["helm-deployer"]);
        assert_eq!(opts.release(), "");
        assert_eq!(opts.namespace(), "");
        assert_eq!(opts.profile(), DeployProfile::SetFlags);
    }

    #[test]
    fn test_profile_selection() {
        let opts = CliArgs::parse_from(["helm-deployer", "--profile=values-file"]);
        assert_eq!(opts.profile(), DeployProfile::ValuesFile);

        let opts = CliArgs::parse_from([
            "helm-deployer",
            "--release=myrelease",
            "--chart=mychart",
            "--namespace=ns",
        ]);
        assert_eq!(opts.profile(), DeployProfile::SetFlags);
        assert_eq!(opts.release(), "myrelease");
        assert_eq!(opts.chart(), "mychart");
    }
}

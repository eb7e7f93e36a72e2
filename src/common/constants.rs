/// This is the name of the external package-manager binary which runs the deployment.
pub(crate) const HELM_COMMAND: &str = "helm";

/// This is the directory under which the ephemeral credential/config files are staged.
pub(crate) const STAGE_DIR: &str = "/";

/// This is the name of the staged kubeconfig file, under the stage directory.
pub(crate) const KUBECONFIG_FILENAME: &str = "kubeconfig.yml";

/// This is the name of the staged cloud credential file, under the stage directory.
pub(crate) const GCP_CREDENTIALS_FILENAME: &str = "gcp_kms_key.json";

/// This is the name of the staged helm values file, under the stage directory.
pub(crate) const VALUES_FILENAME: &str = "values.yml";

/// This is the environment variable helm reads its kubeconfig location from.
pub(crate) const KUBECONFIG_ENV: &str = "KUBECONFIG";

/// This is the environment variable the helm-secrets KMS backend reads its credential
/// location from.
pub(crate) const GCP_CREDENTIALS_ENV: &str = "GOOGLE_APPLICATION_CREDENTIALS";

/// These are set so that helm may run as a non-interactive process without a home
/// directory. Ref: https://helm.sh/docs/faq/#xdg-base-directory-support
pub(crate) const XDG_ENVS: [(&str, &str); 3] = [
    ("XDG_DATA_HOME", "/root/.local/share"),
    ("XDG_CACHE_HOME", "/root/.cache"),
    ("XDG_CONFIG_HOME", "/root/.config"),
];

/// This is the default dotted path for the image override, when no image-fields input
/// is provided.
pub(crate) const DEFAULT_IMAGE_FIELD: &str = "image.name";

/// This is the default dotted path for the tag override, when no tag-fields input is
/// provided.
pub(crate) const DEFAULT_TAG_FIELD: &str = "image.tag";

/// This is the URI scheme prefix which routes a values file through the helm-secrets
/// decryption extension.
pub(crate) const SECRETS_SCHEME: &str = "secrets://";

use crate::{
    common::{constants::STAGE_DIR, error::Result},
    helm::{
        args::{DeployProfile, DeploySpec},
        client::HelmClient,
        values::values_blob,
    },
    opts::{normalize::Task, CliArgs},
};
use std::path::Path;
use tracing::{debug, info};

/// Contains the environment staging for a run.
pub(crate) mod stage;

/// Runs one deployment end-to-end: normalize the inputs, stage the run environment,
/// then dispatch to the helm action selected by the task input.
pub(crate) async fn run(opts: &CliArgs) -> Result<()> {
    debug!(
        release = %opts.release(),
        namespace = %opts.namespace(),
        chart = %opts.chart(),
        chart_version = %opts.chart_version(),
        repository = %opts.repository(),
        values = %opts.values(),
        value_files = %opts.value_files(),
        secrets_files = %opts.secrets_files(),
        task = %opts.task(),
        timeout = %opts.timeout(),
        dry_run = %opts.dry_run(),
        atomic = %opts.atomic(),
        image = %opts.image(),
        image_fields = %opts.image_fields(),
        tag = %opts.tag(),
        tag_fields = %opts.tag_fields(),
        profile = ?opts.profile(),
        "Deployment inputs"
    );

    let spec = DeploySpec::from_opts(opts);

    let blob = match spec.profile {
        DeployProfile::ValuesFile => Some(values_blob(&opts.values())?),
        DeployProfile::SetFlags => None,
    };

    let staged = stage::stage_run(
        Path::new(STAGE_DIR),
        &opts.kubeconfig(),
        &opts.gcp_kms_key(),
        blob.as_deref(),
    )
    .await?;

    let client = HelmClient::builder().with_envs(staged.envs()).build();

    match Task::parse(&opts.task()) {
        Task::Remove => {
            client.uninstall(spec.uninstall_args()).await?;
            info!(release = %spec.release, "Removed helm release");
        }
        Task::Deploy => {
            client
                .upgrade(spec.upgrade_args(staged.values_file()))
                .await?;
            info!(release = %spec.release, "Deployed helm release");
        }
    }

    Ok(())
}

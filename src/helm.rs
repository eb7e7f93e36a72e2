/// Contains the deploy argument assembly for the `helm upgrade` and `helm delete`
/// commands.
pub(crate) mod args;

/// Contains the HelmClient. Used for invoking the helm binary.
pub(crate) mod client;

/// Contains the values blob normalization for the values-file deploy profile.
pub(crate) mod values;

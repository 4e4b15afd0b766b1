//! AWS SDK configuration built from the profile files envaws reads.

use crate::error::Result;
use crate::settings::Settings;
use aws_config::meta::region::ProvideRegion;
use aws_config::profile::profile_file::{ProfileFileKind, ProfileFiles};
use aws_config::profile::{ProfileFileCredentialsProvider, ProfileFileRegionProvider};
use aws_config::{BehaviorVersion, Region, SdkConfig};
use log::debug;

/// Region used when the profile does not name one. STS and IAM both answer there.
pub const FALLBACK_REGION: &str = "us-east-1";

fn profile_files(settings: &Settings) -> Result<ProfileFiles> {
    Ok(ProfileFiles::builder()
        .with_file(ProfileFileKind::Credentials, settings.credentials_path()?)
        .with_file(ProfileFileKind::Config, settings.config_path()?)
        .build())
}

/// SDK config for the default provider chain, reading the configured profile files.
///
/// # Errors
///
/// Fails if the profile file paths cannot be expanded.
pub async fn load_config(settings: &Settings) -> Result<SdkConfig> {
    let config = aws_config::defaults(BehaviorVersion::latest())
        .profile_files(profile_files(settings)?)
        .load()
        .await;

    if config.region().is_some() {
        return Ok(config);
    }
    debug!("no region configured, using {}", FALLBACK_REGION);
    Ok(config
        .into_builder()
        .region(Region::from_static(FALLBACK_REGION))
        .build())
}

/// SDK config whose credentials and region come only from `profile` in the profile files.
///
/// Environment credentials and `AWS_REGION` are ignored, and a profile with incomplete keys
/// fails when credentials are requested instead of falling back to another provider.
///
/// # Errors
///
/// Fails if the profile file paths cannot be expanded.
pub async fn load_profile_config(settings: &Settings, profile: &str) -> Result<SdkConfig> {
    let files = profile_files(settings)?;

    let credentials = ProfileFileCredentialsProvider::builder()
        .profile_files(files.clone())
        .profile_name(profile)
        .build();

    let region = ProfileFileRegionProvider::builder()
        .profile_files(files.clone())
        .profile_name(profile)
        .build()
        .region()
        .await
        .unwrap_or_else(|| {
            debug!("no region configured for {profile}, using {FALLBACK_REGION}");
            Region::from_static(FALLBACK_REGION)
        });

    Ok(aws_config::defaults(BehaviorVersion::latest())
        .profile_files(files)
        .profile_name(profile)
        .credentials_provider(credentials)
        .region(region)
        .load()
        .await)
}

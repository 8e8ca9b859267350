// file: src/bedrock/client.rs
// description: AWS SDK configuration bound to a region and credential profile
// reference: https://docs.rs/aws-config

use crate::config::AwsConfig;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use tracing::{debug, info};

/// Resolve an SDK configuration for the configured region, optionally
/// through a named credential profile. With no profile set, the default
/// credential chain applies (environment, shared config, instance role).
pub async fn load_sdk_config(aws: &AwsConfig) -> SdkConfig {
    let mut loader =
        aws_config::defaults(BehaviorVersion::latest()).region(Region::new(aws.region.clone()));

    if let Some(profile) = aws.profile.as_deref().filter(|p| !p.trim().is_empty()) {
        debug!("Using credential profile: {}", profile);
        loader = loader.profile_name(profile);
    }

    let sdk_config = loader.load().await;
    info!("AWS SDK configured for region {}", aws.region);

    sdk_config
}

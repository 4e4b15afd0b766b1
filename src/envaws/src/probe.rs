//! Concurrent `sts:GetCallerIdentity` lookups, one per profile.

use crate::error::{EnvawsError, Result};
use crate::sdk;
use crate::settings::Settings;
use async_trait::async_trait;
use aws_sdk_sts::error::DisplayErrorContext;
use aws_sdk_sts::Client as StsClient;
use futures::future::join_all;
use log::{debug, info};

/// Who a set of credentials belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    pub account: String,
    pub user_id: String,
    pub arn: String,
}

/// Resolves the caller identity for a named profile.
#[async_trait]
pub trait IdentitySource: Send + Sync {
    async fn caller_identity(&self, profile: &str) -> Result<CallerIdentity>;
}

/// Asks STS, authenticating with each profile's own credentials.
pub struct StsIdentitySource {
    settings: Settings,
}

impl StsIdentitySource {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl IdentitySource for StsIdentitySource {
    async fn caller_identity(&self, profile: &str) -> Result<CallerIdentity> {
        let config = sdk::load_profile_config(&self.settings, profile).await?;
        let client = StsClient::new(&config);

        let identity = client
            .get_caller_identity()
            .send()
            .await
            .map_err(|e| EnvawsError::Aws(DisplayErrorContext(&e).to_string()))?;

        Ok(CallerIdentity {
            account: identity.account().unwrap_or_default().to_string(),
            user_id: identity.user_id().unwrap_or_default().to_string(),
            arn: identity.arn().unwrap_or_default().to_string(),
        })
    }
}

/// One line of `ls --full` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeRow {
    pub name: String,
    pub outcome: std::result::Result<CallerIdentity, String>,
}

impl ProbeRow {
    /// Tab separated: name, account, user id, ARN. Failures leave those empty and
    /// append the error on the same line.
    pub fn to_line(&self) -> String {
        match &self.outcome {
            Ok(id) => format!("{}\t{}\t{}\t{}", self.name, id.account, id.user_id, id.arn),
            Err(message) => format!("{}\t\t\t\t{}", self.name, message),
        }
    }
}

fn flatten_message(message: &str) -> String {
    message.replace('\n', " ")
}

/// Probes every profile at once and returns rows in the order of `profiles`.
///
/// A failing profile produces an error row; it never stops the others.
pub async fn probe<S>(source: &S, profiles: &[String]) -> Vec<ProbeRow>
where
    S: IdentitySource + ?Sized,
{
    info!("probing {} profiles", profiles.len());

    let mut slots: Vec<Option<ProbeRow>> = vec![None; profiles.len()];

    let lookups = profiles.iter().enumerate().map(|(index, name)| async move {
        let outcome = source
            .caller_identity(name)
            .await
            .map_err(|e| flatten_message(&e.to_string()));
        if let Err(message) = &outcome {
            debug!("{name}: {message}");
        }
        (index, ProbeRow { name: name.clone(), outcome })
    });

    for (index, row) in join_all(lookups).await {
        slots[index] = Some(row);
    }

    slots.into_iter().flatten().collect()
}

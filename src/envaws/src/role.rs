//! IAM role listing and lookup for the `role` subcommands.

use crate::error::{EnvawsError, Result};
use aws_sdk_iam::error::DisplayErrorContext;
use aws_sdk_iam::primitives::DateTimeFormat;
use aws_sdk_iam::types::Role;
use aws_sdk_iam::Client as IamClient;
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleSummary {
    pub name: String,
    pub id: String,
    pub arn: String,
}

impl RoleSummary {
    pub fn to_line(&self, full: bool) -> String {
        if full {
            format!("{}\t{}\t{}", self.name, self.id, self.arn)
        } else {
            self.name.clone()
        }
    }
}

impl From<&Role> for RoleSummary {
    fn from(role: &Role) -> Self {
        Self {
            name: role.role_name().to_string(),
            id: role.role_id().to_string(),
            arn: role.arn().to_string(),
        }
    }
}

fn api_error<E: std::error::Error>(err: E) -> EnvawsError {
    EnvawsError::Aws(DisplayErrorContext(&err).to_string())
}

/// One `ListRoles` page; markers are not followed.
///
/// # Errors
///
/// Returns [`EnvawsError::Aws`] if the call fails.
pub async fn list_roles(client: &IamClient) -> Result<Vec<RoleSummary>> {
    let output = client.list_roles().send().await.map_err(api_error)?;
    Ok(output.roles().iter().map(RoleSummary::from).collect())
}

/// Fetches a role by name.
///
/// # Errors
///
/// Returns [`EnvawsError::Aws`] if the call fails or the response has no role.
pub async fn get_role(client: &IamClient, name: &str) -> Result<Role> {
    let output = client
        .get_role()
        .role_name(name)
        .send()
        .await
        .map_err(api_error)?;
    output
        .role()
        .cloned()
        .ok_or_else(|| EnvawsError::Aws(format!("GetRole returned no role for {name}")))
}

/// JSON shaped like the `GetRole` response.
pub fn role_to_json(role: &Role) -> Value {
    let tags: Vec<Value> = role
        .tags()
        .iter()
        .map(|tag| json!({ "Key": tag.key(), "Value": tag.value() }))
        .collect();

    let mut body = json!({
        "Path": role.path(),
        "RoleName": role.role_name(),
        "RoleId": role.role_id(),
        "Arn": role.arn(),
        "CreateDate": role.create_date().fmt(DateTimeFormat::DateTime).ok(),
        "AssumeRolePolicyDocument": role.assume_role_policy_document(),
        "Description": role.description(),
        "MaxSessionDuration": role.max_session_duration(),
        "Tags": tags,
    });

    if let Some(boundary) = role.permissions_boundary() {
        body["PermissionsBoundary"] = json!({
            "PermissionsBoundaryType": boundary.permissions_boundary_type().map(|t| t.as_str()),
            "PermissionsBoundaryArn": boundary.permissions_boundary_arn(),
        });
    }
    if let Some(last_used) = role.role_last_used() {
        body["RoleLastUsed"] = json!({
            "LastUsedDate": last_used
                .last_used_date()
                .and_then(|date| date.fmt(DateTimeFormat::DateTime).ok()),
            "Region": last_used.region(),
        });
    }

    json!({ "Role": body })
}

/// IAM returns policy documents URL-encoded. `+` decodes to a space.
///
/// # Errors
///
/// Returns [`EnvawsError::Aws`] if the decoded bytes are not UTF-8.
pub fn decode_policy_document(document: &str) -> Result<String> {
    urlencoding::decode(&document.replace('+', " "))
        .map(|decoded| decoded.into_owned())
        .map_err(|e| EnvawsError::Aws(format!("failed to decode policy document: {e}")))
}

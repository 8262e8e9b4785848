//! Azure DevOps variable group client.
//!
//! Uses the `distributedtask/variablegroups` REST endpoints with a
//! personal access token sent as basic auth.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::{MigrateError, Result};

use super::{overlay, VariableSink};

/// REST API version for variable group requests.
const API_VERSION: &str = "7.1";

/// Connection settings for an Azure DevOps organization.
#[derive(Debug, Clone)]
pub struct AzureDevOpsSettings {
    /// Organization URL (e.g. `https://dev.azure.com/contoso`).
    pub organization_url: String,
    /// Project that owns the variable groups.
    pub project: String,
    /// Personal access token.
    pub pat: String,
    /// Request timeout.
    pub timeout: Duration,
}

/// A variable group as read and written back.
///
/// Only the fields accepted by the update endpoint are kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VariableGroup {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    group_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    provider_data: Option<serde_json::Value>,
    #[serde(default)]
    variables: BTreeMap<String, VariableValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    variable_group_project_references: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VariableValue {
    /// Null for secret values, which the server keeps on write-back.
    value: Option<String>,
    #[serde(default)]
    is_secret: bool,
}

impl VariableValue {
    fn plain(value: &str) -> Self {
        Self {
            value: Some(value.to_string()),
            is_secret: false,
        }
    }
}

/// Writes variables into Azure DevOps variable groups.
///
/// # Example
///
/// ```no_run
/// use octomigrate::sink::{AzureDevOpsClient, AzureDevOpsSettings, VariableSink};
/// use std::collections::BTreeMap;
/// use std::time::Duration;
///
/// let client = AzureDevOpsClient::new(AzureDevOpsSettings {
///     organization_url: "https://dev.azure.com/contoso".to_string(),
///     project: "NewProject".to_string(),
///     pat: "xxxxxxxx".to_string(),
///     timeout: Duration::from_secs(30),
/// })
/// .unwrap();
///
/// let mut variables = BTreeMap::new();
/// variables.insert("Port".to_string(), "9090".to_string());
/// client.upsert_variable_group(123, &variables).unwrap();
/// ```
pub struct AzureDevOpsClient {
    client: Client,
    organization_url: Url,
    project: String,
    pat: String,
}

impl AzureDevOpsClient {
    /// Create a client for the given organization and project.
    ///
    /// # Errors
    ///
    /// Returns `ConfigValidationError` if the organization URL cannot be parsed.
    pub fn new(settings: AzureDevOpsSettings) -> Result<Self> {
        let organization_url = Url::parse(&settings.organization_url).map_err(|e| {
            MigrateError::ConfigValidationError {
                message: format!(
                    "Invalid Azure DevOps URL '{}': {}",
                    settings.organization_url, e
                ),
            }
        })?;

        let client = Client::builder()
            .user_agent(concat!("octomigrate/", env!("CARGO_PKG_VERSION")))
            .timeout(settings.timeout)
            .build()
            .map_err(|e| MigrateError::Other(e.into()))?;

        Ok(Self {
            client,
            organization_url,
            project: settings.project,
            pat: settings.pat,
        })
    }

    /// Build `{organization}/{prefix...}/_apis/distributedtask/variablegroups/{id}`.
    fn group_url(&self, project_scoped: bool, group_id: u32) -> Result<Url> {
        let mut url = self.organization_url.clone();
        {
            let mut path =
                url.path_segments_mut()
                    .map_err(|_| MigrateError::ConfigValidationError {
                        message: format!(
                            "Azure DevOps URL '{}' cannot be a base",
                            self.organization_url
                        ),
                    })?;
            path.pop_if_empty();
            if project_scoped {
                path.push(&self.project);
            }
            path.extend(["_apis", "distributedtask", "variablegroups"])
                .push(&group_id.to_string());
        }
        url.query_pairs_mut().append_pair("api-version", API_VERSION);
        Ok(url)
    }

    fn fetch_group(&self, group_id: u32) -> Result<VariableGroup> {
        let url = self.group_url(true, group_id)?;
        tracing::debug!("GET {}", url);

        let failure = |message: String| MigrateError::RemoteWriteFailure { group_id, message };

        let response = self
            .client
            .get(url)
            .basic_auth("", Some(&self.pat))
            .send()
            .map_err(|e| failure(format!("reading group: {}", e)))?;

        if !response.status().is_success() {
            return Err(failure(format!("reading group: HTTP {}", response.status())));
        }

        response
            .json()
            .map_err(|e| failure(format!("reading group: {}", e)))
    }

    fn store_group(&self, group_id: u32, group: &VariableGroup) -> Result<()> {
        let url = self.group_url(false, group_id)?;
        tracing::debug!("PUT {}", url);

        let failure = |message: String| MigrateError::RemoteWriteFailure { group_id, message };

        let response = self
            .client
            .put(url)
            .basic_auth("", Some(&self.pat))
            .json(group)
            .send()
            .map_err(|e| failure(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(failure(format!("HTTP {} {}", status, body.trim())));
        }

        Ok(())
    }
}

impl VariableSink for AzureDevOpsClient {
    fn upsert_variable_group(
        &self,
        group_id: u32,
        variables: &BTreeMap<String, String>,
    ) -> Result<()> {
        let mut group = self.fetch_group(group_id)?;

        let mut added = 0;
        for (name, value) in variables {
            if overlay(&mut group.variables, name, VariableValue::plain(value)) {
                added += 1;
            }
        }

        tracing::debug!(
            "Variable group '{}' ({}): {} updated, {} added",
            group.name,
            group_id,
            variables.len() - added,
            added
        );

        self.store_group(group_id, &group)
    }
}

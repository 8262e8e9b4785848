//! Octopus Deploy REST client.
//!
//! Reads environments, projects, library variable sets, and variable sets
//! through the `/api` endpoints using an API key. Named lookups go
//! through the `/all` listings and match names ignoring case.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{MigrateError, Result};
use crate::variables::order::{names_match, sort_names};
use crate::variables::{Environment, RawVariable, SetKind, VariableScope, VariableSet};

use super::{set_resource_kind, VariableSource};

/// Header carrying the Octopus API key.
const API_KEY_HEADER: &str = "X-Octopus-ApiKey";

/// Scope dimension that restricts a variable to environments.
const ENVIRONMENT_SCOPE: &str = "Environment";

/// Connection settings for an Octopus server.
#[derive(Debug, Clone)]
pub struct OctopusSettings {
    /// Server base URL (e.g. `https://octopus.contoso.local`).
    pub url: String,
    /// API key sent with every request.
    pub api_key: String,
    /// Space id for multi-space servers (e.g. `Spaces-1`).
    pub space: Option<String>,
    /// Request timeout.
    pub timeout: Duration,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct EnvironmentResource {
    id: String,
    name: String,
}

/// Shape shared by projects and library variable sets.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct VariableSetOwner {
    name: String,
    variable_set_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct VariableSetResource {
    id: String,
    #[serde(default)]
    variables: Vec<VariableResource>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct VariableResource {
    name: String,
    /// Sensitive values come back as null.
    #[serde(default)]
    value: Option<String>,
    #[serde(default)]
    is_sensitive: bool,
    #[serde(default)]
    scope: Option<HashMap<String, Vec<String>>>,
}

impl From<VariableResource> for RawVariable {
    fn from(resource: VariableResource) -> Self {
        let mut scope = VariableScope::unscoped();
        for (field, values) in resource.scope.unwrap_or_default() {
            let values = values.into_iter().collect();
            if field == ENVIRONMENT_SCOPE {
                scope.environments = Some(values);
            } else {
                scope.other.insert(field, values);
            }
        }

        RawVariable {
            name: resource.name,
            value: resource.value.unwrap_or_default(),
            is_sensitive: resource.is_sensitive,
            scope,
        }
    }
}

/// Reads variables from an Octopus Deploy server.
///
/// # Example
///
/// ```no_run
/// use octomigrate::source::{OctopusClient, OctopusSettings, VariableSource};
/// use std::time::Duration;
///
/// let client = OctopusClient::new(OctopusSettings {
///     url: "https://octopus.contoso.local".to_string(),
///     api_key: "API-XXXXXXXXXXXXXXXX".to_string(),
///     space: None,
///     timeout: Duration::from_secs(30),
/// })
/// .unwrap();
///
/// for name in client.list_project_names().unwrap() {
///     println!("{}", name);
/// }
/// ```
pub struct OctopusClient {
    client: Client,
    base_url: Url,
    api_key: String,
    space: Option<String>,
}

impl OctopusClient {
    /// Create a client for the given server.
    ///
    /// # Errors
    ///
    /// Returns `ConfigValidationError` if the URL cannot be parsed.
    pub fn new(settings: OctopusSettings) -> Result<Self> {
        let base_url =
            Url::parse(&settings.url).map_err(|e| MigrateError::ConfigValidationError {
                message: format!("Invalid Octopus URL '{}': {}", settings.url, e),
            })?;

        let client = Client::builder()
            .user_agent(concat!("octomigrate/", env!("CARGO_PKG_VERSION")))
            .timeout(settings.timeout)
            .build()
            .map_err(|e| MigrateError::Other(e.into()))?;

        Ok(Self {
            client,
            base_url,
            api_key: settings.api_key,
            space: settings.space.filter(|s| !s.is_empty()),
        })
    }

    /// Build `{base}/api[/{space}]/{segments...}`.
    fn api_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| MigrateError::ConfigValidationError {
                    message: format!("Octopus URL '{}' cannot be a base", self.base_url),
                })?;
            path.pop_if_empty().push("api");
            if let Some(space) = &self.space {
                path.push(space);
            }
            path.extend(segments);
        }
        Ok(url)
    }

    fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let url = self.api_url(segments)?;
        tracing::debug!("GET {}", url);

        let read_failure = |message: String| MigrateError::RemoteReadFailure {
            url: url.to_string(),
            message,
        };

        let response = self
            .client
            .get(url.clone())
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .map_err(|e| read_failure(e.to_string()))?;

        if !response.status().is_success() {
            return Err(read_failure(format!("HTTP {}", response.status())));
        }

        response.json().map_err(|e| read_failure(e.to_string()))
    }

    fn find_owner(&self, kind: SetKind, name: &str) -> Result<VariableSetOwner> {
        let collection = match kind {
            SetKind::Library => "libraryvariablesets",
            SetKind::Project => "projects",
        };
        let owners: Vec<VariableSetOwner> = self.get_json(&[collection, "all"])?;

        owners
            .into_iter()
            .find(|owner| names_match(&owner.name, name))
            .ok_or_else(|| MigrateError::not_found(set_resource_kind(kind), name))
    }
}

impl VariableSource for OctopusClient {
    fn list_environments(&self) -> Result<Vec<Environment>> {
        let resources: Vec<EnvironmentResource> = self.get_json(&["environments", "all"])?;
        Ok(resources
            .into_iter()
            .map(|r| Environment::new(r.id, r.name))
            .collect())
    }

    fn list_project_names(&self) -> Result<Vec<String>> {
        let projects: Vec<VariableSetOwner> = self.get_json(&["projects", "all"])?;
        let mut names: Vec<String> = projects.into_iter().map(|p| p.name).collect();
        sort_names(&mut names);
        Ok(names)
    }

    fn find_variable_set(&self, kind: SetKind, name: &str) -> Result<VariableSet> {
        let owner = self.find_owner(kind, name)?;
        let resource: VariableSetResource =
            self.get_json(&["variables", &owner.variable_set_id])?;

        tracing::debug!(
            "Fetched {} variables from '{}' ({})",
            resource.variables.len(),
            owner.name,
            resource.id
        );

        Ok(VariableSet {
            id: resource.id,
            variables: resource.variables.into_iter().map(Into::into).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResourceKind;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(server: &MockServer, space: Option<&str>) -> OctopusClient {
        OctopusClient::new(OctopusSettings {
            url: server.base_url(),
            api_key: "API-TEST".to_string(),
            space: space.map(String::from),
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[test]
    fn lists_environments_with_api_key() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/environments/all")
                .header("X-Octopus-ApiKey", "API-TEST");
            then.status(200).json_body(json!([
                { "Id": "Environments-1", "Name": "Prod" },
                { "Id": "Environments-2", "Name": "Dev" }
            ]));
        });

        let envs = client_for(&server, None).list_environments().unwrap();

        mock.assert();
        assert_eq!(envs.len(), 2);
        assert_eq!(envs[0], Environment::new("Environments-1", "Prod"));
    }

    #[test]
    fn space_is_part_of_the_path() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/api/Spaces-2/environments/all");
            then.status(200).json_body(json!([]));
        });

        let envs = client_for(&server, Some("Spaces-2"))
            .list_environments()
            .unwrap();

        mock.assert();
        assert!(envs.is_empty());
    }

    #[test]
    fn project_names_sorted_ignoring_case() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/projects/all");
            then.status(200).json_body(json!([
                { "Id": "Projects-1", "Name": "web", "VariableSetId": "variableset-Projects-1" },
                { "Id": "Projects-2", "Name": "Api", "VariableSetId": "variableset-Projects-2" },
                { "Id": "Projects-3", "Name": "batch", "VariableSetId": "variableset-Projects-3" }
            ]));
        });

        let names = client_for(&server, None).list_project_names().unwrap();

        assert_eq!(names, vec!["Api", "batch", "web"]);
    }

    #[test]
    fn finds_library_set_and_converts_scope() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/libraryvariablesets/all");
            then.status(200).json_body(json!([
                { "Id": "LibraryVariableSets-1", "Name": "Demo-Library", "VariableSetId": "variableset-LibraryVariableSets-1" }
            ]));
        });
        server.mock(|when, then| {
            when.method(GET)
                .path("/api/variables/variableset-LibraryVariableSets-1");
            then.status(200).json_body(json!({
                "Id": "variableset-LibraryVariableSets-1",
                "Variables": [
                    { "Name": "Port", "Value": "8080", "IsSensitive": false, "Scope": {} },
                    { "Name": "Port", "Value": "9090", "IsSensitive": false,
                      "Scope": { "Environment": ["Environments-1"], "Role": ["web"] } },
                    { "Name": "ApiKey", "Value": null, "IsSensitive": true }
                ]
            }));
        });

        let set = client_for(&server, None)
            .find_variable_set(SetKind::Library, "demo-library")
            .unwrap();

        assert_eq!(set.id, "variableset-LibraryVariableSets-1");
        assert_eq!(set.variables.len(), 3);
        assert!(set.variables[0].scope.is_unscoped());
        assert!(set.variables[1].scope.applies_to("Environments-1"));
        assert!(set.variables[1].scope.other.contains_key("Role"));
        assert!(set.variables[2].is_sensitive);
        assert_eq!(set.variables[2].value, "");
    }

    #[test]
    fn missing_project_is_not_found() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/projects/all");
            then.status(200).json_body(json!([]));
        });

        let err = client_for(&server, None)
            .find_variable_set(SetKind::Project, "Ghost")
            .unwrap_err();

        assert!(matches!(
            err,
            MigrateError::NotFound {
                kind: ResourceKind::Project,
                ..
            }
        ));
    }

    #[test]
    fn http_error_is_read_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/environments/all");
            then.status(401);
        });

        let err = client_for(&server, None).list_environments().unwrap_err();

        match err {
            MigrateError::RemoteReadFailure { url, message } => {
                assert!(url.ends_with("/api/environments/all"));
                assert!(message.contains("401"));
                assert!(!message.contains("API-TEST"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_invalid_url() {
        let result = OctopusClient::new(OctopusSettings {
            url: "not a url".to_string(),
            api_key: "API-TEST".to_string(),
            space: None,
            timeout: Duration::from_secs(5),
        });
        assert!(matches!(
            result,
            Err(MigrateError::ConfigValidationError { .. })
        ));
    }
}

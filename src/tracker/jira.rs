//! Implements the Tracker trait for Jira
use async_trait::async_trait;
use log::*;
use reqwest::{
    Client, StatusCode, Url,
    header::{HeaderMap, HeaderValue},
};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{
    error::HeraldError,
    result::Result,
    tracker::{
        traits::Tracker,
        types::{Issue, NewIssue, Transition},
    },
};

#[derive(Debug, Deserialize)]
struct CreatedIssue {
    pub key: String,
}

#[derive(Debug, Deserialize)]
struct IssueResponse {
    pub key: String,
    pub fields: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct TransitionItem {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct TransitionsResponse {
    pub transitions: Vec<TransitionItem>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    pub issues: Vec<IssueResponse>,
}

/// Build the tracker-native field payload for issue creation.
fn create_issue_body(issue: &NewIssue) -> Value {
    serde_json::json!({
        "fields": {
            "project": { "key": issue.project },
            "summary": issue.summary,
            "description": issue.description,
            "issuetype": { "name": issue.issue_type },
            "labels": issue.labels,
            "priority": { "name": issue.priority },
        }
    })
}

/// Lift the wire shape into [`Issue`], pulling the status name out of the
/// nested status field.
fn issue_from_response(raw: IssueResponse) -> Issue {
    let status = raw
        .fields
        .get("status")
        .and_then(|status| status.get("name"))
        .and_then(|name| name.as_str())
        .unwrap_or_default()
        .to_string();

    Issue {
        key: raw.key,
        status,
        fields: raw.fields,
    }
}

/// Jira tracker implementation using reqwest against the REST v2 API with
/// personal access token authentication.
pub struct Jira {
    base_url: Url,
    client: Client,
}

impl Jira {
    /// Create Jira client with bearer token authentication rooted at the
    /// given server URL.
    pub fn new(server: &str, token: &SecretString) -> Result<Self> {
        let mut headers = HeaderMap::new();

        let mut token_value = HeaderValue::from_str(
            format!("Bearer {}", token.expose_secret()).as_str(),
        )?;
        token_value.set_sensitive(true);

        headers.append("Authorization", token_value);

        let client = Client::builder().default_headers(headers).build()?;

        let mut server = server.to_string();
        if !server.ends_with('/') {
            server.push('/');
        }

        let base_url = Url::parse(&server)?.join("rest/api/2/")?;

        Ok(Self { base_url, client })
    }
}

#[async_trait]
impl Tracker for Jira {
    async fn create_issue(&self, issue: NewIssue) -> Result<String> {
        let url = self.base_url.join("issue")?;
        let body = create_issue_body(&issue);

        // The one terminal write of a run: issued exactly once, no retry,
        // so an interrupted run never leaves a duplicate issue behind.
        let request = self.client.post(url).json(&body).build()?;
        let response = self.client.execute(request).await?;
        let result = response.error_for_status()?;
        let created: CreatedIssue = result.json().await?;

        info!("created tracker issue {}", created.key);

        Ok(created.key)
    }

    async fn get_issue(&self, key: &str) -> Result<Issue> {
        let url = self.base_url.join(&format!("issue/{key}"))?;

        let request = self.client.get(url).build()?;
        let response = self.client.execute(request).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(HeraldError::NotFound(format!(
                "issue {key} not found"
            )));
        }

        let result = response.error_for_status()?;
        let raw: IssueResponse = result.json().await?;

        Ok(issue_from_response(raw))
    }

    async fn list_transitions(&self, key: &str) -> Result<Vec<Transition>> {
        let url = self.base_url.join(&format!("issue/{key}/transitions"))?;

        let request = self.client.get(url).build()?;
        let response = self.client.execute(request).await?;
        let result = response.error_for_status()?;
        let parsed: TransitionsResponse = result.json().await?;

        Ok(parsed
            .transitions
            .into_iter()
            .map(|t| Transition {
                id: t.id,
                name: t.name,
            })
            .collect())
    }

    async fn transition_issue(
        &self,
        key: &str,
        transition_id: &str,
        fields: Value,
    ) -> Result<()> {
        let url = self.base_url.join(&format!("issue/{key}/transitions"))?;

        let mut body =
            serde_json::json!({ "transition": { "id": transition_id } });

        if !fields.is_null() {
            body["fields"] = fields;
        }

        let request = self.client.post(url).json(&body).build()?;
        let response = self.client.execute(request).await?;
        response.error_for_status()?;

        Ok(())
    }

    async fn search_issues(&self, jql: &str) -> Result<Vec<Issue>> {
        let mut url = self.base_url.join("search")?;
        url.query_pairs_mut().append_pair("jql", jql);

        let request = self.client.get(url).build()?;
        let response = self.client.execute(request).await?;
        let result = response.error_for_status()?;
        let parsed: SearchResponse = result.json().await?;

        Ok(parsed
            .issues
            .into_iter()
            .map(issue_from_response)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_new_issue() -> NewIssue {
        NewIssue {
            project: "RHODS".to_string(),
            summary: "Verify Component widgets changes for release 1.2"
                .to_string(),
            description: "h3. *Changes*\n".to_string(),
            issue_type: "Story".to_string(),
            labels: vec!["release".to_string()],
            priority: "Normal".to_string(),
        }
    }

    #[test]
    fn builds_create_issue_body() {
        let body = create_issue_body(&test_new_issue());

        assert_eq!(body["fields"]["project"]["key"], "RHODS");
        assert_eq!(body["fields"]["issuetype"]["name"], "Story");
        assert_eq!(body["fields"]["priority"]["name"], "Normal");
        assert_eq!(body["fields"]["labels"][0], "release");
        assert_eq!(
            body["fields"]["summary"],
            "Verify Component widgets changes for release 1.2"
        );
    }

    #[test]
    fn lifts_issue_response_status() {
        let raw: IssueResponse = serde_json::from_str(
            r#"{
                "key": "RHODS-42",
                "fields": {
                    "status": { "name": "Resolved", "id": "5" },
                    "customfield_12311241": "+"
                }
            }"#,
        )
        .unwrap();

        let issue = issue_from_response(raw);
        assert_eq!(issue.key, "RHODS-42");
        assert_eq!(issue.status, "Resolved");
        assert_eq!(
            issue.fields.get("customfield_12311241"),
            Some(&Value::String("+".to_string()))
        );
    }

    #[test]
    fn missing_status_yields_empty_string() {
        let raw: IssueResponse = serde_json::from_str(
            r#"{ "key": "RHODS-7", "fields": {} }"#,
        )
        .unwrap();

        let issue = issue_from_response(raw);
        assert_eq!(issue.status, "");
    }

    #[test]
    fn deserializes_transitions_response() {
        let parsed: TransitionsResponse = serde_json::from_str(
            r#"{
                "transitions": [
                    { "id": "791", "name": "Ready for QA", "to": {} },
                    { "id": "11", "name": "Close", "to": {} }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(parsed.transitions.len(), 2);
        assert_eq!(parsed.transitions[0].id, "791");
        assert_eq!(parsed.transitions[0].name, "Ready for QA");
    }

    #[test]
    fn joins_server_url_with_and_without_trailing_slash() {
        let token = SecretString::from("secret".to_string());

        let jira = Jira::new("https://issues.example.com", &token).unwrap();
        assert_eq!(
            jira.base_url.as_str(),
            "https://issues.example.com/rest/api/2/"
        );

        let jira = Jira::new("https://issues.example.com/", &token).unwrap();
        assert_eq!(
            jira.base_url.as_str(),
            "https://issues.example.com/rest/api/2/"
        );
    }
}

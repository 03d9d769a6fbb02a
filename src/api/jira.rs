use super::IssueTracker;
use crate::libs::config::ConfigModule;
use crate::libs::issue::IssueKey;
use crate::libs::messages::Message;
use crate::libs::secret::Secret;
use crate::{msg_bail_anyhow, msg_error_anyhow, msg_print};
use anyhow::Result;
use chrono::Utc;
use dialoguer::{theme::ColorfulTheme, Input};
use reqwest::{header::ACCEPT, Client, Method, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const MAX_RETRY_COUNT: u32 = 3;
const SECRET_FILE: &str = ".jira_secret";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(8);
const RETRY_DELAY: Duration = Duration::from_secs(1);

pub const DEFAULT_API_PATH: &str = "/rest/api/2/";
pub const URL_SERVER_INFO: &str = "serverInfo";
pub const URL_GET_ISSUE: &str = "issue/{issue}?fields=summary";
pub const URL_LOG_WORK: &str = "issue/{issue}/worklog";

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct WorklogRequest<'a> {
    comment: &'a str,
    started: String,
    time_spent: &'a str,
}

#[derive(Deserialize, Debug)]
struct WorklogResponse {
    id: Option<String>,
}

#[derive(Deserialize, Debug)]
struct JiraIssue {
    fields: JiraIssueFields,
}

#[derive(Deserialize, Debug)]
struct JiraIssueFields {
    summary: Option<String>,
}

/// Jira REST client authenticating with Basic auth.
#[derive(Debug)]
pub struct Jira {
    client: Client,
    config: JiraConfig,
    secret: Secret,
    password: Option<String>,
    /// Whether a rejected or missing password may be asked for on the terminal.
    prompts: bool,
}

impl IssueTracker for Jira {
    async fn test_connection(&mut self) -> Result<bool> {
        let res = self.send(Method::GET, URL_SERVER_INFO, None).await?;
        Ok(res.status().is_success())
    }

    async fn issue_summary(&mut self, issue: &IssueKey) -> Result<Option<String>> {
        let slug = URL_GET_ISSUE.replace("{issue}", issue.as_str());
        let res = self.send(Method::GET, &slug, None).await?;
        if !res.status().is_success() {
            return Ok(None);
        }
        let issue = res.json::<JiraIssue>().await?;
        Ok(issue.fields.summary.filter(|summary| !summary.is_empty()))
    }

    async fn log_time(&mut self, issue: &IssueKey, time: &str, description: &str) -> Result<Option<String>> {
        let slug = URL_LOG_WORK.replace("{issue}", issue.as_str());
        let body = serde_json::to_value(WorklogRequest {
            comment: description,
            started: Self::started_now(),
            time_spent: time,
        })?;

        let res = self.send(Method::POST, &slug, Some(body)).await?;
        let status = res.status();
        if !status.is_success() {
            msg_bail_anyhow!(Message::JiraRequestFailed(status.to_string()));
        }
        let worklog = res.json::<WorklogResponse>().await?;
        Ok(worklog.id)
    }
}

impl Jira {
    pub fn new(config: &JiraConfig) -> Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            config: config.clone(),
            secret: Secret::new(SECRET_FILE, &Message::PromptJiraPassword.to_string()),
            password: None,
            prompts: true,
        })
    }

    /// Disables password prompts for clients used while something else owns
    /// stdin. A rejected password then fails the request and is forgotten.
    pub fn without_prompts(mut self) -> Self {
        self.prompts = false;
        self
    }

    /// Removes the stored password so the next session prompts again.
    pub fn forget_credentials() -> Result<()> {
        Secret::new(SECRET_FILE, &Message::PromptJiraPassword.to_string()).forget()
    }

    /// Full URL for an API slug: base URL, API path, slug.
    pub fn url(&self, slug: &str) -> String {
        let base = self.config.api_url.trim_end_matches('/');
        let path = self.config.api_path.trim_matches('/');
        let slug = slug.trim_start_matches('/');
        if path.is_empty() {
            format!("{}/{}", base, slug)
        } else {
            format!("{}/{}/{}", base, path, slug)
        }
    }

    /// Loads the password now so that later requests never need to prompt
    /// unless Jira rejects it.
    pub fn unlock(&mut self) -> Result<()> {
        if self.password.is_none() {
            self.password = Some(self.secret.get_or_prompt()?);
        }
        Ok(())
    }

    /// Jira's worklog timestamp format, always in UTC.
    fn started_now() -> String {
        Utc::now().format("%Y-%m-%dT%H:%M:%S%.3f+0000").to_string()
    }

    /// Sends a request, re-prompting for the password on 401 and retrying
    /// timeouts, up to [`MAX_RETRY_COUNT`] times each. Without prompts a 401
    /// fails at once.
    async fn send(&mut self, method: Method, slug: &str, body: Option<serde_json::Value>) -> Result<Response> {
        let url = self.url(slug);
        let mut auth_retries = 0;
        let mut timeout_retries = 0;

        loop {
            let password = match self.password.clone() {
                Some(password) => password,
                None if !self.prompts => {
                    let password = self.secret.read().map_err(|_| msg_error_anyhow!(Message::JiraCredentialsRejected))?;
                    self.password = Some(password.clone());
                    password
                }
                None => {
                    let password = match auth_retries > 0 {
                        true => self.secret.prompt()?,
                        false => self.secret.get_or_prompt()?,
                    };
                    self.password = Some(password.clone());
                    password
                }
            };

            let mut request = self
                .client
                .request(method.clone(), &url)
                .basic_auth(&self.config.login, Some(password))
                .header(ACCEPT, "application/json");
            if let Some(body) = &body {
                request = request.json(body);
            }

            match request.send().await {
                Ok(res) if res.status() == StatusCode::UNAUTHORIZED && !self.prompts => {
                    tracing::warn!(url = %url, "Jira rejected the credentials, forgetting them");
                    self.password = None;
                    self.secret.forget()?;
                    msg_bail_anyhow!(Message::JiraCredentialsRejected);
                }
                Ok(res) if res.status() == StatusCode::UNAUTHORIZED => {
                    if auth_retries >= MAX_RETRY_COUNT {
                        msg_bail_anyhow!(Message::WrongPassword(MAX_RETRY_COUNT));
                    }
                    tracing::warn!(url = %url, "Jira rejected the credentials");
                    self.password = None;
                    auth_retries += 1;
                }
                Ok(res) => return Ok(res),
                Err(err) if err.is_timeout() && timeout_retries < MAX_RETRY_COUNT => {
                    tracing::warn!(url = %url, attempt = timeout_retries + 1, "Jira request timed out, retrying");
                    timeout_retries += 1;
                    tokio::time::sleep(RETRY_DELAY).await;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}

fn default_api_path() -> String {
    DEFAULT_API_PATH.to_string()
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct JiraConfig {
    pub login: String,
    pub api_url: String,
    #[serde(default = "default_api_path")]
    pub api_path: String,
}

impl JiraConfig {
    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "jira".to_string(),
            name: "Jira".to_string(),
        }
    }

    pub fn init(config: &Option<Self>) -> Result<Self> {
        let config = config.clone().unwrap_or_else(|| Self {
            login: "".to_string(),
            api_url: "".to_string(),
            api_path: default_api_path(),
        });
        msg_print!(Message::ConfigModuleJira);
        Ok(Self {
            login: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptJiraLogin.to_string())
                .default(config.login)
                .interact_text()?,
            api_url: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptJiraUrl.to_string())
                .default(config.api_url)
                .interact_text()?,
            api_path: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptJiraApiPath.to_string())
                .default(config.api_path)
                .interact_text()?,
        })
    }
}

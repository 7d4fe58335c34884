/// API client, the single point of entry for every backend call.
///
/// No other module issues HTTP requests. Generation endpoints take multipart
/// forms and answer `{ "content": ... }`; the tracker endpoints speak JSON.
/// Failures arrive as JSON with an `error` string field.
///
/// No client-side timeout and no retries: a failed request is terminal for
/// that attempt.
use reqwest::multipart::Form;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::{ClientError, UNKNOWN_REMOTE_MESSAGE};
use crate::models::job::{JobApplication, JobApplicationDraft, JobId};
use crate::models::template::Template;

const TEMPLATES_PATH: &str = "/api/get-templates";
const JOBS_PATH: &str = "/api/jobs";

#[derive(Debug, Deserialize)]
struct ContentResponse {
    content: String,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: Url) -> Result<Self, ClientError> {
        let client = Client::builder().build()?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::Network(format!("invalid endpoint '{path}': {e}")))
    }

    /// GET /api/get-templates
    ///
    /// Any non-success status or a body that is not a template array is a
    /// network error: the catalog has no user-facing remote failure mode.
    pub async fn get_templates(&self) -> Result<Vec<Template>, ClientError> {
        let response = self.client.get(self.url(TEMPLATES_PATH)?).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Network(format!(
                "template catalog returned {status}"
            )));
        }
        let templates: Vec<Template> = response
            .json()
            .await
            .map_err(|e| ClientError::Network(format!("malformed template catalog: {e}")))?;
        debug!("Fetched {} templates", templates.len());
        Ok(templates)
    }

    /// POST a generation form and return the `content` field of the reply.
    pub async fn post_form(&self, endpoint: &str, form: Form) -> Result<String, ClientError> {
        let response = self
            .client
            .post(self.url(endpoint)?)
            .multipart(form)
            .send()
            .await?;
        let body: ContentResponse = read_json(response).await?;
        Ok(body.content)
    }

    /// GET /api/jobs
    pub async fn list_jobs(&self) -> Result<Vec<JobApplication>, ClientError> {
        let response = self.client.get(self.url(JOBS_PATH)?).send().await?;
        read_json(response).await
    }

    /// POST /api/jobs
    pub async fn create_job(
        &self,
        record: &JobApplicationDraft,
    ) -> Result<JobApplication, ClientError> {
        let response = self
            .client
            .post(self.url(JOBS_PATH)?)
            .json(record)
            .send()
            .await?;
        read_json(response).await
    }

    /// PUT /api/jobs/{id}
    pub async fn update_job(
        &self,
        id: JobId,
        record: &JobApplicationDraft,
    ) -> Result<(), ClientError> {
        let response = self
            .client
            .put(self.url(&format!("{JOBS_PATH}/{id}"))?)
            .json(record)
            .send()
            .await?;
        expect_success(response).await
    }

    /// DELETE /api/jobs/{id}
    pub async fn delete_job(&self, id: JobId) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(self.url(&format!("{JOBS_PATH}/{id}"))?)
            .send()
            .await?;
        expect_success(response).await
    }
}

/// Decodes a JSON reply, treating a non-success status or an `error` field
/// as a remote failure.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.text().await?;

    let value: Value = serde_json::from_str(&body).map_err(|e| {
        ClientError::Network(format!("non-JSON response (status {status}): {e}"))
    })?;

    if let Some(message) = remote_error(&value) {
        warn!("Backend returned {status}: {message}");
        return Err(ClientError::Remote(message));
    }
    if !status.is_success() {
        warn!("Backend returned {status} without an error message");
        return Err(ClientError::Remote(UNKNOWN_REMOTE_MESSAGE.to_string()));
    }

    serde_json::from_value(value)
        .map_err(|e| ClientError::Network(format!("unexpected response shape: {e}")))
}

/// For endpoints whose success body is irrelevant (PUT/DELETE).
async fn expect_success(response: Response) -> Result<(), ClientError> {
    let status = response.status();
    let body = response.text().await?;
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|value| remote_error(&value));

    match message {
        Some(message) => {
            warn!("Backend returned {status}: {message}");
            Err(ClientError::Remote(message))
        }
        None if !status.is_success() => {
            warn!("Backend returned {status} without an error message");
            Err(ClientError::Remote(UNKNOWN_REMOTE_MESSAGE.to_string()))
        }
        None => Ok(()),
    }
}

fn remote_error(value: &Value) -> Option<String> {
    value.get("error")?.as_str().map(str::to_string)
}

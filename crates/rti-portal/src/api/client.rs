use std::sync::Arc;

use reqwest::multipart;
use serde::de::DeserializeOwned;
use serde_json::json;

use super::envelope::{ApiError, Envelope};
use super::session::{Session, SessionStore};
use crate::config::ApiConfig;
use crate::workflows::application::domain::{ApplicationRecord, ReferenceEntry};
use crate::workflows::application::submission::SubmissionBody;

/// Typed client for the remote RTI API. All calls except `login` carry the
/// bearer credential held by the shared [`SessionStore`]; calling them
/// without an active session fails before any request is issued.
///
/// No timeout or retry policy is configured; transport defaults apply.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, session: Arc<SessionStore>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url().to_string(),
            session,
        }
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn bearer(&self) -> Result<String, ApiError> {
        self.session.token().ok_or(ApiError::NotAuthenticated)
    }

    /// Authenticated GET returning the unwrapped envelope payload.
    pub async fn get<T>(&self, path: &str, query: &[(&str, &str)]) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let token = self.bearer()?;
        let response = self
            .http
            .get(self.endpoint(path))
            .query(query)
            .bearer_auth(token)
            .send()
            .await?;
        let envelope: Envelope<T> = response.json().await?;
        envelope.into_result()
    }

    pub async fn states(&self) -> Result<Vec<ReferenceEntry>, ApiError> {
        self.get("states", &[]).await
    }

    pub async fn districts(&self, state_id: &str) -> Result<Vec<ReferenceEntry>, ApiError> {
        self.get("districts", &[("state_id", state_id)]).await
    }

    pub async fn police_stations(&self, district_id: &str) -> Result<Vec<ReferenceEntry>, ApiError> {
        self.get("police-stations", &[("district_id", district_id)])
            .await
    }

    pub async fn post_offices(
        &self,
        police_station_id: &str,
    ) -> Result<Vec<ReferenceEntry>, ApiError> {
        self.get("post-offices", &[("police_station_id", police_station_id)])
            .await
    }

    pub async fn municipalities(&self) -> Result<Vec<ReferenceEntry>, ApiError> {
        self.get("municipalities", &[]).await
    }

    pub async fn application_types(&self) -> Result<Vec<ReferenceEntry>, ApiError> {
        self.get("application-types", &[]).await
    }

    pub async fn fees_categories(&self) -> Result<Vec<ReferenceEntry>, ApiError> {
        self.get("fees-categories", &[]).await
    }

    /// Question categories; the endpoint keeps its historical name.
    pub async fn pollution_types(&self) -> Result<Vec<ReferenceEntry>, ApiError> {
        self.get("pollution-types", &[]).await
    }

    pub async fn application(&self, id: &str) -> Result<ApplicationRecord, ApiError> {
        self.get(&format!("applications/{id}"), &[]).await
    }

    /// POST a new application as a multipart body.
    pub async fn create_application(
        &self,
        body: SubmissionBody,
    ) -> Result<ApplicationRecord, ApiError> {
        let token = self.bearer()?;
        let form = multipart_form(body)?;
        let response = self
            .http
            .post(self.endpoint("applications"))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;
        let envelope: Envelope<ApplicationRecord> = response.json().await?;
        envelope.into_result()
    }

    /// PUT an updated application over an existing record.
    pub async fn update_application(
        &self,
        id: &str,
        body: SubmissionBody,
    ) -> Result<ApplicationRecord, ApiError> {
        let token = self.bearer()?;
        let form = multipart_form(body)?;
        let response = self
            .http
            .put(self.endpoint(&format!("applications/{id}")))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;
        let envelope: Envelope<ApplicationRecord> = response.json().await?;
        envelope.into_result()
    }

    /// Exchange credentials for a session. Unauthenticated by definition;
    /// the caller decides whether to store the returned session.
    pub async fn login(
        &self,
        user_name_or_email: &str,
        password: &str,
    ) -> Result<Session, ApiError> {
        let response = self
            .http
            .post(self.endpoint("auth/login"))
            .json(&json!({
                "user_nameORemail": user_name_or_email,
                "password": password,
            }))
            .send()
            .await?;
        let envelope: Envelope<Session> = response.json().await?;
        envelope.into_result()
    }
}

fn multipart_form(body: SubmissionBody) -> Result<multipart::Form, ApiError> {
    let mut form = multipart::Form::new();
    for (name, value) in body.fields {
        form = form.text(name, value);
    }
    if let Some(file) = body.file {
        let part = multipart::Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.content_type)?;
        form = form.part("bpl_file", part);
    }
    Ok(form)
}

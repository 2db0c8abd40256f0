use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};

use super::error::ApiError;
use super::types::{
    CreateJobResponse, DeveloperTokenResponse, DeveloperTokensResponse, DeveloperTokenEntry,
    DownloadUrlRequest, FinalizedRequest, FinalizedResponse, JobContentItem, JobContentResponse,
    JobSummary, JobsResponse, SignedUrlResponse, UploadUrlRequest,
};

pub struct GatewayClient {
    base_url: String,
    token: Option<String>,
    client: Client,
}

impl GatewayClient {
    /// Create a client for the given base URL. The token is sent raw in the
    /// `Authorization` header on every non-admin call; `None` means
    /// unauthenticated mode.
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(120))
            .build()
            .expect("failed to build HTTP client");
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()),
            client,
        }
    }

    /// The underlying HTTP client, shared with signed-URL transfers so they
    /// reuse the same connection pool.
    pub fn http(&self) -> &Client {
        &self.client
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.header("Authorization", token),
            None => builder,
        }
    }

    async fn check(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(ApiError::from_status(status.as_u16(), message));
        }
        Ok(response)
    }

    /// Create a new job. The server scopes it to the token's namespace and
    /// returns the assigned identifier.
    pub async fn create_job(&self) -> Result<String, ApiError> {
        let response = self
            .authed(self.client.post(self.endpoint("/api/jobs")))
            .send()
            .await?;
        let body = Self::check(response).await?.json::<CreateJobResponse>().await?;
        Ok(body.job_id)
    }

    /// List the jobs associated with the configured token.
    pub async fn list_jobs(&self) -> Result<Vec<JobSummary>, ApiError> {
        let response = self
            .authed(self.client.get(self.endpoint("/api/jobs")))
            .send()
            .await?;
        let body = Self::check(response).await?.json::<JobsResponse>().await?;
        Ok(body.jobs)
    }

    /// List the content items the server has recorded for a job.
    pub async fn job_content(&self, job_id: &str) -> Result<Vec<JobContentItem>, ApiError> {
        let response = self
            .authed(
                self.client
                    .get(self.endpoint(&format!("/api/jobs/{job_id}/content"))),
            )
            .send()
            .await?;
        let body = Self::check(response).await?.json::<JobContentResponse>().await?;
        Ok(body.job_content)
    }

    /// Request a signed URL for uploading `file_name` with the given MIME type.
    pub async fn upload_url(
        &self,
        job_id: &str,
        file_name: &str,
        file_type: &str,
    ) -> Result<String, ApiError> {
        let payload = UploadUrlRequest {
            file_name: file_name.to_string(),
            file_type: file_type.to_string(),
        };
        let response = self
            .authed(
                self.client
                    .post(self.endpoint(&format!("/api/jobs/{job_id}/files/upload-url"))),
            )
            .json(&payload)
            .send()
            .await?;
        let body = Self::check(response).await?.json::<SignedUrlResponse>().await?;
        Ok(body.signed_url)
    }

    /// Request a signed URL for downloading `file_name`.
    pub async fn download_url(&self, job_id: &str, file_name: &str) -> Result<String, ApiError> {
        let payload = DownloadUrlRequest {
            file_name: file_name.to_string(),
        };
        let response = self
            .authed(
                self.client
                    .post(self.endpoint(&format!("/api/jobs/{job_id}/files/download-url"))),
            )
            .json(&payload)
            .send()
            .await?;
        let body = Self::check(response).await?.json::<SignedUrlResponse>().await?;
        Ok(body.signed_url)
    }

    /// Ask the server whether `file_name` has been fully written to storage.
    ///
    /// Transport errors are propagated; the polling loop decides how to treat
    /// them.
    pub async fn check_finalized(&self, job_id: &str, file_name: &str) -> Result<bool, ApiError> {
        let payload = FinalizedRequest {
            file_name: file_name.to_string(),
        };
        let response = self
            .authed(
                self.client
                    .post(self.endpoint(&format!("/api/jobs/{job_id}/files/finalized"))),
            )
            .json(&payload)
            .send()
            .await?;
        let body = Self::check(response).await?.json::<FinalizedResponse>().await?;
        Ok(body.exists)
    }

    /// Mint a new developer token. Admin endpoints use Bearer auth, unlike
    /// the job endpoints which send the token raw.
    pub async fn mint_developer_token(&self, admin_token: &str) -> Result<String, ApiError> {
        let response = self
            .client
            .post(self.endpoint("/api/admin/developer-token"))
            .header("Authorization", format!("Bearer {admin_token}"))
            .send()
            .await?;
        let body = Self::check(response)
            .await?
            .json::<DeveloperTokenResponse>()
            .await?;
        Ok(body.developer_token)
    }

    /// List the developer tokens minted under the given admin token.
    pub async fn list_developer_tokens(
        &self,
        admin_token: &str,
    ) -> Result<Vec<DeveloperTokenEntry>, ApiError> {
        let response = self
            .client
            .get(self.endpoint("/api/admin/developer-tokens"))
            .header("Authorization", format!("Bearer {admin_token}"))
            .send()
            .await?;
        let body = Self::check(response)
            .await?
            .json::<DeveloperTokensResponse>()
            .await?;
        Ok(body.developer_tokens)
    }
}

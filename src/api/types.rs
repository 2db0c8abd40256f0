//! Tipos de dados para requisições e respostas da API de jobs.
//!
//! Todas as structs derivam `Serialize` e `Deserialize` para conversão JSON
//! conforme o formato esperado pelos endpoints do serviço. Os campos que o
//! servidor expõe em camelCase usam `serde(rename)` explícito.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Resposta do endpoint `POST /api/jobs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateJobResponse {
    /// Identificador do job gerado pelo servidor.
    pub job_id: String,
}

/// Resposta do endpoint `GET /api/jobs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobsResponse {
    /// Jobs associados ao token autenticado.
    #[serde(default)]
    pub jobs: Vec<JobSummary>,
}

/// Um job listado pelo servidor.
///
/// O servidor pode omitir campos dependendo da versão; tudo além do
/// identificador é opcional na desserialização.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSummary {
    pub job_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Resposta do endpoint `GET /api/jobs/{job_id}/content`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobContentResponse {
    /// Itens de conteúdo do job. Serializado como "jobContent" no JSON.
    #[serde(rename = "jobContent", default)]
    pub job_content: Vec<JobContentItem>,
}

/// Um item de conteúdo pertencente a um job (um arquivo processado).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobContentItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    /// Nome do arquivo armazenado pelo servidor.
    pub file_name: String,
    /// Duração do áudio em segundos, quando aplicável.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Corpo da requisição para `POST /api/jobs/{job_id}/files/upload-url`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadUrlRequest {
    /// Nome do arquivo a ser enviado. Serializado como "fileName".
    #[serde(rename = "fileName")]
    pub file_name: String,
    /// Tipo MIME do arquivo. Serializado como "fileType".
    #[serde(rename = "fileType")]
    pub file_type: String,
}

/// Corpo da requisição para `POST /api/jobs/{job_id}/files/download-url`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadUrlRequest {
    #[serde(rename = "fileName")]
    pub file_name: String,
}

/// Resposta dos endpoints de upload-url e download-url.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedUrlResponse {
    /// URL assinada, válida por tempo limitado. Serializada como "signedUrl".
    #[serde(rename = "signedUrl")]
    pub signed_url: String,
}

/// Corpo da requisição para `POST /api/jobs/{job_id}/files/finalized`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalizedRequest {
    #[serde(rename = "fileName")]
    pub file_name: String,
}

/// Resposta do endpoint de verificação de finalização.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalizedResponse {
    /// `true` quando o arquivo foi completamente escrito no storage.
    #[serde(default)]
    pub exists: bool,
}

/// Resposta do endpoint `POST /api/admin/developer-token`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeveloperTokenResponse {
    /// Token de desenvolvedor recém-emitido. Serializado como "developerToken".
    #[serde(rename = "developerToken")]
    pub developer_token: String,
}

/// Resposta do endpoint `GET /api/admin/developer-tokens`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeveloperTokensResponse {
    #[serde(rename = "developerTokens", default)]
    pub developer_tokens: Vec<DeveloperTokenEntry>,
}

/// Um token de desenvolvedor listado pelo endpoint administrativo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeveloperTokenEntry {
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

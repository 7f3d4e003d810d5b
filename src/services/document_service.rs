use std::path::Path;

use reqwest::multipart::{Form, Part};

use crate::client::{ApiClient, Download};
use crate::dto::selection_dto::DocumentReviewPayload;
use crate::error::{Error, Result};
use crate::models::document::{CandidateDocument, DocumentListPayload};
use crate::utils::validation::{check_upload, guess_mime_type};

#[derive(Clone)]
pub struct DocumentService {
    client: ApiClient,
    max_upload_bytes: u64,
}

impl DocumentService {
    pub fn new(client: ApiClient, max_upload_bytes: u64) -> Self {
        Self {
            client,
            max_upload_bytes,
        }
    }

    pub async fn list_for_candidate(&self, selected_candidate_id: &str) -> Result<Vec<CandidateDocument>> {
        let payload: DocumentListPayload = self
            .client
            .get_with_query(
                "candidate-documents",
                &[("selectedCandidate", selected_candidate_id)],
            )
            .await?;
        Ok(payload.into())
    }

    pub async fn review(&self, document_id: &str, review: &DocumentReviewPayload) -> Result<Option<CandidateDocument>> {
        self.client
            .put(&format!("candidate-documents/{}/verify", document_id), review)
            .await
    }

    pub async fn delete(&self, document_id: &str) -> Result<()> {
        self.client
            .delete::<serde_json::Value>(&format!("candidate-documents/{}", document_id))
            .await?;
        Ok(())
    }

    pub async fn download(&self, document_id: &str) -> Result<Download> {
        self.client
            .download(&format!("candidate-documents/{}/download", document_id))
            .await
    }

    /// Validates type and size locally; a rejected file never reaches the API.
    pub async fn upload(
        &self,
        selected_candidate_id: &str,
        document_type: &str,
        file_name: &str,
        mime_type: &str,
        bytes: Vec<u8>,
    ) -> Result<Option<CandidateDocument>> {
        check_upload(file_name, mime_type, bytes.len() as u64, self.max_upload_bytes)?;
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime_type)?;
        let form = Form::new()
            .text("selectedCandidate", selected_candidate_id.to_string())
            .text("documentType", document_type.to_string())
            .part("document", part);
        self.client.post_multipart("candidate-documents", form).await
    }

    pub async fn upload_file(
        &self,
        selected_candidate_id: &str,
        document_type: &str,
        path: &Path,
    ) -> Result<Option<CandidateDocument>> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| Error::Validation("Please select a file".to_string()))?
            .to_string();
        let mime = guess_mime_type(path).unwrap_or("application/octet-stream");
        let size = tokio::fs::metadata(path).await?.len();
        check_upload(&file_name, mime, size, self.max_upload_bytes)?;
        let bytes = tokio::fs::read(path).await?;
        self.upload(selected_candidate_id, document_type, &file_name, mime, bytes)
            .await
    }
}

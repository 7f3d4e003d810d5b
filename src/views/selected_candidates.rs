use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::future::join_all;
use tracing::{info, warn};

use super::{toast_err, DialogResult, Notifier, Prompter};
use crate::dto::selection_dto::{
    AddSelectedCandidatePayload, DocumentReviewPayload, JoiningLetterForm, OfferLetterForm,
};
use crate::error::{Error, Result};
use crate::models::document::{CandidateDocument, DocumentCounts};
use crate::models::selected_candidate::{SelectedCandidate, SelectedCandidateQuery, SelectionStatus};
use crate::services::document_service::DocumentService;
use crate::services::selected_candidate_service::SelectedCandidateService;
use crate::utils::files::save_to_dir;

/// A table row: the candidate and, when the fetch worked, their documents.
#[derive(Debug, Clone)]
pub struct CandidateRow {
    pub candidate: SelectedCandidate,
    pub documents: Option<DocumentCounts>,
}

pub struct SelectedCandidates {
    candidates: SelectedCandidateService,
    documents: DocumentService,
    notifier: Arc<dyn Notifier>,
    prompter: Arc<dyn Prompter>,
}

impl SelectedCandidates {
    pub fn new(
        candidates: SelectedCandidateService,
        documents: DocumentService,
        notifier: Arc<dyn Notifier>,
        prompter: Arc<dyn Prompter>,
    ) -> Self {
        Self {
            candidates,
            documents,
            notifier,
            prompter,
        }
    }

    /// Loads the candidates, then one document listing per candidate.
    /// A failed document fetch leaves that row without counts.
    pub async fn list(&self, query: &SelectedCandidateQuery) -> Result<Vec<CandidateRow>> {
        let candidates = toast_err(&*self.notifier, self.candidates.list(query).await)?;
        let fetches = candidates
            .iter()
            .map(|c| self.documents.list_for_candidate(&c.id));
        let documents = join_all(fetches).await;
        Ok(candidates
            .into_iter()
            .zip(documents)
            .map(|(candidate, docs)| {
                let documents = match docs {
                    Ok(docs) => Some(DocumentCounts::from_documents(&docs)),
                    Err(err) => {
                        warn!(candidate = %candidate.id, error = %err, "document counts unavailable");
                        None
                    }
                };
                CandidateRow {
                    candidate,
                    documents,
                }
            })
            .collect())
    }

    pub async fn documents(&self, candidate_id: &str) -> Result<Vec<CandidateDocument>> {
        toast_err(
            &*self.notifier,
            self.documents.list_for_candidate(candidate_id).await,
        )
    }

    pub async fn verify(&self, document_id: &str) -> Result<()> {
        toast_err(
            &*self.notifier,
            self.documents
                .review(document_id, &DocumentReviewPayload::verify())
                .await,
        )?;
        self.notifier.success("Document verified successfully");
        Ok(())
    }

    /// Prompts for the reason; a blank or dismissed answer aborts.
    pub async fn reject(&self, document_id: &str) -> Result<bool> {
        let reason = match self.prompter.prompt("Please provide a reason for rejection:")? {
            DialogResult::Confirmed(reason) => reason,
            DialogResult::Dismissed => {
                self.notifier
                    .info("Document was not rejected: a reason is required");
                return Ok(false);
            }
        };
        let review = toast_err(&*self.notifier, DocumentReviewPayload::reject(&reason))?;
        toast_err(
            &*self.notifier,
            self.documents.review(document_id, &review).await,
        )?;
        self.notifier.success("Document rejected");
        Ok(true)
    }

    pub async fn delete_document(&self, document_id: &str) -> Result<bool> {
        if let DialogResult::Dismissed = self.prompter.confirm("Delete this document?")? {
            return Ok(false);
        }
        toast_err(&*self.notifier, self.documents.delete(document_id).await)?;
        info!(document = %document_id, "candidate document deleted");
        self.notifier.success("Document deleted successfully");
        Ok(true)
    }

    pub async fn upload(&self, candidate_id: &str, document_type: &str, path: &Path) -> Result<()> {
        toast_err(
            &*self.notifier,
            self.documents
                .upload_file(candidate_id, document_type, path)
                .await,
        )?;
        self.notifier.success("Document uploaded successfully");
        Ok(())
    }

    pub async fn download(&self, document_id: &str, dir: &Path) -> Result<PathBuf> {
        let download = toast_err(&*self.notifier, self.documents.download(document_id).await)?;
        let name = download
            .filename
            .clone()
            .unwrap_or_else(|| format!("document-{}", document_id));
        toast_err(&*self.notifier, save_to_dir(dir, &name, &download.bytes).await)
    }

    pub async fn send_offer(&self, candidate_id: &str, offer: &OfferLetterForm) -> Result<()> {
        toast_err(&*self.notifier, offer.check())?;
        toast_err(
            &*self.notifier,
            self.candidates.send_offer(candidate_id, offer).await,
        )?;
        self.notifier.success("Offer letter sent successfully");
        Ok(())
    }

    pub async fn send_joining_letter(&self, candidate_id: &str, letter: &JoiningLetterForm) -> Result<()> {
        toast_err(&*self.notifier, crate::utils::validation::validate(letter))?;
        toast_err(
            &*self.notifier,
            self.candidates.send_joining_letter(candidate_id, letter).await,
        )?;
        self.notifier.success("Joining letter sent successfully");
        Ok(())
    }

    /// Sends the same offer to every listed candidate at once. Any failure
    /// fails the whole batch with a single error toast.
    pub async fn bulk_send_offers(&self, candidate_ids: &[String], offer: &OfferLetterForm) -> Result<usize> {
        if candidate_ids.is_empty() {
            let err = Error::Validation("Please select at least one candidate".to_string());
            return toast_err(&*self.notifier, Err(err));
        }
        toast_err(&*self.notifier, offer.check())?;
        let sent = toast_err(
            &*self.notifier,
            self.candidates.send_offers(candidate_ids, offer).await,
        )?;
        info!(sent, "bulk offer letters delivered");
        self.notifier
            .success(&format!("Offer letters sent to {} candidate(s)", sent));
        Ok(sent)
    }

    pub async fn add_selected(&self, payload: &AddSelectedCandidatePayload) -> Result<()> {
        toast_err(&*self.notifier, self.candidates.add(payload).await)?;
        self.notifier.success("Candidate added to selected list");
        Ok(())
    }

    pub async fn update_status(&self, candidate_id: &str, status: SelectionStatus) -> Result<()> {
        toast_err(
            &*self.notifier,
            self.candidates.update_status(candidate_id, status).await,
        )?;
        self.notifier
            .success(&format!("Candidate status updated to {}", status));
        Ok(())
    }

    pub async fn remove(&self, candidate_id: &str) -> Result<bool> {
        let question = "Remove this candidate from the selected list?";
        if let DialogResult::Dismissed = self.prompter.confirm(question)? {
            return Ok(false);
        }
        toast_err(&*self.notifier, self.candidates.remove(candidate_id).await)?;
        self.notifier.success("Candidate removed from selected list");
        Ok(true)
    }
}

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;
use crate::proposal::models::ProposalDocument;

/// In-memory proposal drafts for the lifetime of the process.
#[derive(Clone, Default)]
pub struct DraftStore {
    drafts: Arc<RwLock<HashMap<Uuid, ProposalDocument>>>,
}

impl DraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, doc: ProposalDocument) -> ProposalDocument {
        self.drafts.write().await.insert(doc.id, doc.clone());
        doc
    }

    pub async fn get(&self, id: Uuid) -> Result<ProposalDocument, AppError> {
        self.drafts
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    /// Summaries of every draft, most recently updated first.
    pub async fn list(&self) -> Vec<ProposalDocument> {
        let mut all: Vec<ProposalDocument> = self.drafts.read().await.values().cloned().collect();
        all.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        all
    }

    /// Applies `f` to the stored draft under the write lock and bumps `updated_at`
    /// when it succeeds. A failed edit leaves the draft unchanged.
    pub async fn update<T, F>(&self, id: Uuid, f: F) -> Result<(T, ProposalDocument), AppError>
    where
        F: FnOnce(&mut ProposalDocument) -> Result<T, AppError>,
    {
        let mut drafts = self.drafts.write().await;
        let stored = drafts.get_mut(&id).ok_or_else(|| not_found(id))?;

        let mut working = stored.clone();
        let out = f(&mut working)?;
        working.id = id;
        working.updated_at = Utc::now();
        *stored = working;
        Ok((out, stored.clone()))
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        self.drafts
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Proposal {id} not found"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_get_remove() {
        let store = DraftStore::new();
        let doc = store.insert(ProposalDocument::default()).await;
        assert_eq!(store.get(doc.id).await.unwrap().id, doc.id);

        store.remove(doc.id).await.unwrap();
        assert!(matches!(store.get(doc.id).await, Err(AppError::NotFound(_))));
        assert!(matches!(store.remove(doc.id).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_bumps_timestamp() {
        let store = DraftStore::new();
        let doc = store.insert(ProposalDocument::default()).await;

        let (_, updated) = store
            .update(doc.id, |d| {
                d.header.proposal_title = "Roof Assessment".to_string();
                Ok(())
            })
            .await
            .unwrap();

        assert_eq!(updated.header.proposal_title, "Roof Assessment");
        assert!(updated.updated_at >= doc.updated_at);
        assert_eq!(store.get(doc.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_failed_update_leaves_draft_untouched() {
        let store = DraftStore::new();
        let doc = store.insert(ProposalDocument::default()).await;

        let result: Result<((), ProposalDocument), AppError> = store
            .update(doc.id, |d| {
                d.header.date = "changed".to_string();
                Err(AppError::Validation("nope".to_string()))
            })
            .await;

        assert!(result.is_err());
        assert_eq!(store.get(doc.id).await.unwrap().header.date, "");
    }

    #[tokio::test]
    async fn test_update_cannot_change_id() {
        let store = DraftStore::new();
        let doc = store.insert(ProposalDocument::default()).await;
        let (_, updated) = store
            .update(doc.id, |d| {
                d.id = Uuid::new_v4();
                Ok(())
            })
            .await
            .unwrap();
        assert_eq!(updated.id, doc.id);
    }
}

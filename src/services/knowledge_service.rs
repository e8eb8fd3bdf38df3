use serde_json::Value;
use crate::error::DashboardResult;
use crate::models::knowledge::sort_entries;
use crate::models::{KnowledgeDraft, KnowledgeEntry};
use crate::services::ApiClient;

const BASE: &str = "/api/base-knowledge";

fn entry_path(id: &str) -> String {
    format!("{}/{}", BASE, urlencoding::encode(id))
}

/// Entries sorted newest first.
pub async fn list_entries(api: &ApiClient) -> DashboardResult<Vec<KnowledgeEntry>> {
    let mut entries: Vec<KnowledgeEntry> = api.get_list(BASE).await?;
    sort_entries(&mut entries);
    log::info!("📚 [KNOWLEDGE] {} entries", entries.len());
    Ok(entries)
}

pub async fn create_entry(api: &ApiClient, draft: &KnowledgeDraft) -> DashboardResult<()> {
    let _: Value = api.post(BASE, draft).await?;
    log::info!("📚 [KNOWLEDGE] Created '{}'", draft.title);
    Ok(())
}

pub async fn update_entry(api: &ApiClient, id: &str, draft: &KnowledgeDraft) -> DashboardResult<()> {
    let _: Value = api.put(&entry_path(id), draft).await?;
    log::info!("📚 [KNOWLEDGE] Updated {}", id);
    Ok(())
}

pub async fn delete_entry(api: &ApiClient, id: &str) -> DashboardResult<()> {
    api.delete(&entry_path(id)).await?;
    log::info!("📚 [KNOWLEDGE] Deleted {}", id);
    Ok(())
}

//! Persistence for blog records, settings and the profile
//!
//! Handlers only see the traits, so a database-backed store can replace the
//! in-memory one. The in-memory store keeps everything for the lifetime of
//! the process. Concurrent writes to the same record are last-writer-wins.

use crate::error::{ContentCraftError, Result};

use async_trait::async_trait;
use contentcraft_shared::{BlogRecord, BlogUpdate, NewBlogRecord, Profile, Settings};
use dashmap::DashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// Blog record storage
#[async_trait]
pub trait BlogRepository: Send + Sync {
    async fn create(&self, input: NewBlogRecord) -> Result<BlogRecord>;

    async fn get(&self, id: &str) -> Result<Option<BlogRecord>>;

    /// Overwrite the given fields. Unknown ids are a `NotFound` error.
    async fn update(&self, id: &str, update: BlogUpdate) -> Result<BlogRecord>;

    /// Returns whether a record was removed
    async fn delete(&self, id: &str) -> Result<bool>;

    /// Newest first
    async fn list(&self) -> Result<Vec<BlogRecord>>;
}

/// Singleton settings and profile storage
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn settings(&self) -> Result<Settings>;

    async fn replace_settings(&self, settings: Settings) -> Result<Settings>;

    async fn profile(&self) -> Result<Profile>;

    async fn replace_profile(&self, profile: Profile) -> Result<Profile>;
}

#[derive(Debug, Default)]
pub struct InMemoryBlogRepository {
    records: DashMap<String, BlogRecord>,
}

impl InMemoryBlogRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlogRepository for InMemoryBlogRepository {
    async fn create(&self, input: NewBlogRecord) -> Result<BlogRecord> {
        let record = BlogRecord::new(input);
        self.records.insert(record.id.clone(), record.clone());
        debug!("Created blog record {}", record.id);
        Ok(record)
    }

    async fn get(&self, id: &str) -> Result<Option<BlogRecord>> {
        Ok(self.records.get(id).map(|entry| entry.value().clone()))
    }

    async fn update(&self, id: &str, update: BlogUpdate) -> Result<BlogRecord> {
        let mut entry = self
            .records
            .get_mut(id)
            .ok_or_else(|| ContentCraftError::not_found(format!("blog {}", id)))?;

        update.apply(entry.value_mut());
        debug!("Updated blog record {}", id);
        Ok(entry.value().clone())
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        Ok(self.records.remove(id).is_some())
    }

    async fn list(&self) -> Result<Vec<BlogRecord>> {
        let mut records: Vec<BlogRecord> = self
            .records
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(records)
    }
}

#[derive(Debug, Default)]
pub struct InMemorySettingsStore {
    settings: RwLock<Settings>,
    profile: RwLock<Profile>,
}

impl InMemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsStore for InMemorySettingsStore {
    async fn settings(&self) -> Result<Settings> {
        Ok(self.settings.read().await.clone())
    }

    async fn replace_settings(&self, settings: Settings) -> Result<Settings> {
        *self.settings.write().await = settings.clone();
        Ok(settings)
    }

    async fn profile(&self) -> Result<Profile> {
        Ok(self.profile.read().await.clone())
    }

    async fn replace_profile(&self, profile: Profile) -> Result<Profile> {
        *self.profile.write().await = profile.clone();
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contentcraft_shared::{ContentLength, Theme};
    use pretty_assertions::assert_eq;

    fn draft(content: &str) -> NewBlogRecord {
        NewBlogRecord {
            title: Some("Draft".to_string()),
            content: content.to_string(),
            hero_image: None,
        }
    }

    #[tokio::test]
    async fn test_blog_crud() {
        let repo = InMemoryBlogRepository::new();

        let created = repo.create(draft("first")).await.unwrap();
        assert_eq!(repo.get(&created.id).await.unwrap(), Some(created.clone()));

        let updated = repo
            .update(
                &created.id,
                BlogUpdate {
                    content: Some("second".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.content, "second");
        assert_eq!(updated.title.as_deref(), Some("Draft"));
        assert!(updated.updated_at >= created.updated_at);

        assert!(repo.delete(&created.id).await.unwrap());
        assert!(!repo.delete(&created.id).await.unwrap());
        assert_eq!(repo.get(&created.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_missing_leaves_table_unchanged() {
        let repo = InMemoryBlogRepository::new();
        let existing = repo.create(draft("kept")).await.unwrap();

        let error = repo
            .update(
                "does-not-exist",
                BlogUpdate {
                    content: Some("lost".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(error, ContentCraftError::NotFound { .. }));
        assert_eq!(repo.list().await.unwrap(), vec![existing]);
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let repo = InMemoryBlogRepository::new();
        let older = repo.create(draft("older")).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let newer = repo.create(draft("newer")).await.unwrap();

        let ids: Vec<String> = repo.list().await.unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![newer.id, older.id]);
    }

    #[tokio::test]
    async fn test_settings_replaced_wholesale() {
        let store = InMemorySettingsStore::new();
        assert_eq!(store.settings().await.unwrap(), Settings::default());

        let replacement = Settings {
            default_tone: "casual".to_string(),
            default_length: ContentLength::Short,
            theme: Theme::Dark,
            ..Settings::default()
        };
        store.replace_settings(replacement.clone()).await.unwrap();
        assert_eq!(store.settings().await.unwrap(), replacement);
    }

    #[tokio::test]
    async fn test_profile_roundtrip() {
        let store = InMemorySettingsStore::new();
        let profile = Profile {
            name: "Sam Writer".to_string(),
            email: "sam@example.com".to_string(),
            bio: "Writes about work.".to_string(),
            avatar_url: None,
        };
        store.replace_profile(profile.clone()).await.unwrap();
        assert_eq!(store.profile().await.unwrap(), profile);
    }
}

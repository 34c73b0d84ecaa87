use crate::domain::model::ContactMessage;
use crate::utils::error::Result;
use std::path::Path;

use super::JsonArrayFile;

pub struct ContactStore {
    file: JsonArrayFile,
}

impl ContactStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            file: JsonArrayFile::new(data_dir.join("contacts.json")),
        }
    }

    pub async fn append(&self, message: ContactMessage) -> Result<()> {
        self.file
            .update(|items: &mut Vec<ContactMessage>| items.push(message))
            .await
    }

    /// Newest-first listing, optionally capped.
    pub async fn recent(&self, limit: Option<usize>) -> Result<Vec<ContactMessage>> {
        let mut items: Vec<ContactMessage> = self.file.snapshot().await?;
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        if let Some(limit) = limit {
            if limit > 0 {
                items.truncate(limit);
            }
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use tempfile::TempDir;

    fn message(name: &str, age_minutes: i64) -> ContactMessage {
        ContactMessage {
            name: name.to_string(),
            email: format!("{}@example.com", name),
            phone: String::new(),
            topic: "General".to_string(),
            message: "hello".to_string(),
            source: "contact-form".to_string(),
            created_at: Utc::now() - Duration::minutes(age_minutes),
            meta: Default::default(),
        }
    }

    #[tokio::test]
    async fn recent_sorts_newest_first_and_limits() {
        let dir = TempDir::new().unwrap();
        let store = ContactStore::new(dir.path());
        store.append(message("older", 30)).await.unwrap();
        store.append(message("newest", 1)).await.unwrap();
        store.append(message("oldest", 90)).await.unwrap();

        let all = store.recent(None).await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].name, "newest");
        assert_eq!(all[2].name, "oldest");

        let capped = store.recent(Some(2)).await.unwrap();
        assert_eq!(capped.len(), 2);
        assert_eq!(capped[1].name, "older");
    }
}

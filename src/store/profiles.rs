use crate::domain::model::Profile;
use crate::utils::error::Result;
use std::path::Path;

use super::JsonArrayFile;

pub struct ProfileStore {
    file: JsonArrayFile,
}

impl ProfileStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            file: JsonArrayFile::new(data_dir.join("profiles.json")),
        }
    }

    pub async fn append(&self, profile: Profile) -> Result<()> {
        self.file
            .update(|items: &mut Vec<Profile>| items.push(profile))
            .await
    }
}

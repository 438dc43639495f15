use hf_hub::api::sync::Api as HfApi;
use hf_hub::{Repo, RepoType};
use std::path::PathBuf;

/// Fetches files from one Hugging Face model repository at a fixed revision.
#[derive(Debug, Clone)]
pub struct HfLoader {
    pub repo: String,
    pub revision: String,
}

impl HfLoader {
    pub fn new(repo: &str, revision: &str) -> Self {
        Self {
            repo: repo.into(),
            revision: revision.into(),
        }
    }

    /// Download `filename` (or reuse the cached copy) and return its local path.
    pub fn get(&self, filename: &str) -> anyhow::Result<PathBuf> {
        let hf_api = HfApi::new()?;
        let hf_repo = hf_api.repo(Repo::with_revision(
            self.repo.clone(),
            RepoType::Model,
            self.revision.clone(),
        ));

        Ok(hf_repo.get(filename)?)
    }

    /// Return the first of `candidates` present in the repo.
    pub fn get_first(&self, candidates: &[&str]) -> anyhow::Result<PathBuf> {
        let mut last_error = None;
        for filename in candidates {
            match self.get(filename) {
                Ok(path) => return Ok(path),
                Err(e) => {
                    tracing::debug!(repo = %self.repo, filename, error = %e, "file not in repo");
                    last_error = Some(e);
                }
            }
        }
        match last_error {
            Some(e) => Err(e.context(format!(
                "None of {:?} found in repo {}",
                candidates, self.repo
            ))),
            None => anyhow::bail!("No candidate files given for repo {}", self.repo),
        }
    }
}

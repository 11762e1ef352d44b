//! Materializing a remote directory into the local project
//!
//! Only the top level of the directory is fetched. Subdirectories are listed
//! by the contents API but not recursed into.

use super::listing::{EntryKind, Listing, RemoteEntry};
use super::location::SourceLocation;
use crate::error::FetchError;
use crate::events::{AddEvent, Reporter};
use crate::http::HttpClient;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use url::Url;

/// A file that was listed but could not be materialized
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileWarning {
    pub name: String,
    pub reason: String,
}

/// Outcome of a successful fetch (which may still carry per-file warnings)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchReport {
    pub destination: PathBuf,
    /// Names written, in listing order
    pub written: Vec<String>,
    /// Directories and other non-file entries
    pub skipped: Vec<String>,
    pub warnings: Vec<FileWarning>,
}

/// Lists a remote directory and downloads its files, one at a time
pub struct DirectoryFetcher {
    http: Arc<dyn HttpClient>,
    api_base: Url,
}

impl DirectoryFetcher {
    pub fn new(http: Arc<dyn HttpClient>, api_base: Url) -> Self {
        Self { http, api_base }
    }

    pub async fn fetch(
        &self,
        source: &str,
        destination: &Path,
        reporter: &dyn Reporter,
    ) -> Result<FetchReport, FetchError> {
        let location = SourceLocation::parse(source)?;
        let listing_url = location.contents_url(&self.api_base)?;

        reporter.report(&AddEvent::FetchStarted {
            source: source.to_string(),
            destination: destination.to_path_buf(),
        });

        let entries = self.list(&listing_url).await?;

        fs::create_dir_all(destination)
            .await
            .map_err(|source| FetchError::DestinationWrite {
                path: destination.to_path_buf(),
                source,
            })?;

        let mut report = FetchReport {
            destination: destination.to_path_buf(),
            ..FetchReport::default()
        };

        for entry in &entries {
            if entry.kind != EntryKind::File {
                report.skipped.push(entry.name.clone());
                reporter.report(&AddEvent::FileSkipped {
                    name: entry.name.clone(),
                });
                continue;
            }

            match self.download(entry).await {
                Ok(bytes) => {
                    let target = destination.join(&entry.name);
                    fs::write(&target, &bytes).await.map_err(|source| {
                        FetchError::DestinationWrite {
                            path: target.clone(),
                            source,
                        }
                    })?;
                    report.written.push(entry.name.clone());
                    reporter.report(&AddEvent::FileWritten {
                        name: entry.name.clone(),
                    });
                }
                Err(reason) => {
                    let warning = FileWarning {
                        name: entry.name.clone(),
                        reason,
                    };
                    tracing::debug!(
                        file = %warning.name,
                        reason = %warning.reason,
                        "skipping file"
                    );
                    reporter.report(&AddEvent::FileWarning(warning.clone()));
                    report.warnings.push(warning);
                }
            }
        }

        reporter.report(&AddEvent::FetchFinished {
            destination: destination.to_path_buf(),
            written: report.written.len(),
        });

        Ok(report)
    }

    async fn list(&self, url: &Url) -> Result<Vec<RemoteEntry>, FetchError> {
        let failed = |reason: String| FetchError::ListingFailed {
            url: url.to_string(),
            reason,
        };

        let response = self.http.get(url).await.map_err(|e| failed(e.to_string()))?;
        if !response.is_success() {
            return Err(failed(response.status_line()));
        }

        match Listing::from_slice(&response.body).map_err(|e| failed(e.to_string()))? {
            Listing::Directory(entries) => Ok(entries),
            Listing::SingleEntry => Err(FetchError::NotADirectory {
                url: url.to_string(),
            }),
        }
    }

    /// Download one file entry; `Err` is a per-file warning reason
    async fn download(&self, entry: &RemoteEntry) -> Result<Vec<u8>, String> {
        if !is_plain_file_name(&entry.name) {
            return Err("file name would escape the destination directory".to_string());
        }

        let download_url = entry
            .download_url
            .as_deref()
            .ok_or_else(|| "no download URL".to_string())?;
        let url = Url::parse(download_url).map_err(|e| format!("invalid download URL: {}", e))?;

        let response = self.http.get(&url).await.map_err(|e| e.to_string())?;
        if !response.is_success() {
            return Err(response.status_line());
        }

        Ok(response.body)
    }
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

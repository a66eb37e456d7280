//! Streaming archive downloads with progress tracking

use crate::error::{JdkupError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;
use tokio::fs;
use tokio::io::{AsyncWriteExt, BufWriter};

/// Whole-transfer timeout; JDK archives run to a few hundred megabytes.
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Size of the write buffer between the network and the file.
const BUFFER_SIZE: usize = 64 * 1024;

/// HTTP downloader for release archives.
#[derive(Clone)]
pub struct Downloader {
    client: reqwest::Client,
    show_progress: bool,
}

impl Downloader {
    pub fn new(show_progress: bool) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(DOWNLOAD_TIMEOUT)
            .user_agent(format!("jdkup/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            show_progress,
        })
    }

    /// Stream `url` into `dest`, returning the number of bytes written.
    ///
    /// An interrupted transfer leaves whatever was written so far in `dest`.
    pub async fn download(&self, url: &str, dest: &Path, label: &str) -> Result<u64> {
        tracing::info!("Downloading {} to {}", url, dest.display());

        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| JdkupError::network(host_of(url), e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(JdkupError::network(
                host_of(url),
                format!("GET {} returned {}", url, status),
            ));
        }

        let pb = self.progress_bar(response.content_length(), label);

        let file = fs::File::create(dest).await?;
        let mut writer = BufWriter::with_capacity(BUFFER_SIZE, file);
        let mut downloaded: u64 = 0;

        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| JdkupError::network(host_of(url), e.to_string()))?
        {
            writer.write_all(&chunk).await?;
            downloaded += chunk.len() as u64;
            if let Some(pb) = &pb {
                pb.set_position(downloaded);
            }
        }

        writer.flush().await?;

        if let Some(pb) = &pb {
            pb.finish_with_message(format!("✓ {}", label));
        }

        tracing::debug!("Downloaded {} bytes from {}", downloaded, url);
        Ok(downloaded)
    }

    fn progress_bar(&self, total: Option<u64>, label: &str) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let pb = ProgressBar::new(total.unwrap_or(0));
        let style = ProgressStyle::default_bar()
            .template("{msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})")
            .map(|style| style.progress_chars("#>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        pb.set_style(style);
        pb.set_message(format!("⬇ {}", label));
        Some(pb)
    }
}

/// Host part of a URL, used to name the failing endpoint in errors.
fn host_of(url: &str) -> String {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|url| url.host_str().map(str::to_string))
        .unwrap_or_else(|| "remote".to_string())
}

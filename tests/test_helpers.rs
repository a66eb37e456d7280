// Test helpers for isolated testing
// Provides temporary install roots and real JDK-shaped archives

#![allow(dead_code)]

use flate2::Compression;
use flate2::write::GzEncoder;
use jdkup::catalog::{CatalogClient, Provider, ReleaseEntry};
use jdkup::download::Downloader;
use jdkup::installer::Installer;
use jdkup::platform::Host;
use std::fs::File;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

/// Isolated test environment using temporary directories
/// Automatically cleaned up when dropped (RAII pattern)
pub struct TestEnvironment {
    pub temp_dir: TempDir,
    /// Install root handed to the installer
    pub root: PathBuf,
    /// Where test archives are written
    pub archives: PathBuf,
}

impl TestEnvironment {
    /// Create a new isolated test environment
    ///
    /// - temp/
    ///   - versions/   (install root, created lazily by the installer)
    ///   - archives/   (archives built by the test)
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().join("versions");
        let archives = temp_dir.path().join("archives");
        std::fs::create_dir_all(&archives).unwrap();

        Self {
            temp_dir,
            root,
            archives,
        }
    }

    /// Installer for this host that never touches the network in these tests
    pub fn installer(&self) -> Installer {
        Installer::with_parts(
            CatalogClient::new(None).unwrap(),
            Downloader::new(false).unwrap(),
            self.root.clone(),
            Host::detect(),
            Provider::Adoptium,
        )
    }

    pub fn archive_path(&self, name: &str) -> PathBuf {
        self.archives.join(name)
    }

    /// Hidden staging directories left in the install root
    pub fn leftover_staging(&self) -> Vec<String> {
        if !self.root.exists() {
            return vec![];
        }
        std::fs::read_dir(&self.root)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name.starts_with('.'))
            .collect()
    }
}

impl Default for TestEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

pub fn executable() -> &'static str {
    Host::detect().executable_name()
}

/// Files of a minimal JDK, relative to its root
pub fn jdk_files(version: &str) -> Vec<(String, String)> {
    vec![
        (format!("bin/{}", executable()), "#!/bin/sh\necho java\n".to_string()),
        ("bin/javac".to_string(), "#!/bin/sh\necho javac\n".to_string()),
        ("lib/modules".to_string(), "modules".to_string()),
        ("release".to_string(), format!("JAVA_VERSION=\"{}\"\n", version)),
    ]
}

fn prefixed(prefix: Option<&str>, name: &str) -> String {
    match prefix {
        Some(prefix) => format!("{}/{}", prefix, name),
        None => name.to_string(),
    }
}

/// Write a .tar.gz holding a JDK, optionally under a wrapping folder
pub fn jdk_tar_gz(path: &Path, wrapper: Option<&str>, version: &str) {
    let files: Vec<(String, String)> = jdk_files(version)
        .into_iter()
        .map(|(name, data)| (prefixed(wrapper, &name), data))
        .collect();
    tar_gz(path, &files);
}

/// Write a .zip holding a JDK, optionally under a wrapping folder
pub fn jdk_zip(path: &Path, wrapper: Option<&str>, version: &str) {
    let files: Vec<(String, String)> = jdk_files(version)
        .into_iter()
        .map(|(name, data)| (prefixed(wrapper, &name), data))
        .collect();
    zip(path, &files);
}

pub fn tar_gz(path: &Path, files: &[(String, String)]) {
    let encoder = GzEncoder::new(File::create(path).unwrap(), Compression::default());
    let mut builder = tar::Builder::new(encoder);
    for (name, data) in files {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(if name.contains("bin/") { 0o755 } else { 0o644 });
        header.set_entry_type(tar::EntryType::Regular);
        header.set_cksum();
        builder.append_data(&mut header, name, data.as_bytes()).unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap();
}

pub fn zip(path: &Path, files: &[(String, String)]) {
    let mut writer = zip::ZipWriter::new(File::create(path).unwrap());
    for (name, data) in files {
        let options = SimpleFileOptions::default()
            .unix_permissions(if name.contains("bin/") { 0o755 } else { 0o644 });
        writer.start_file(name.as_str(), options).unwrap();
        writer.write_all(data.as_bytes()).unwrap();
    }
    writer.finish().unwrap();
}

pub fn entry(version: &str, lts: bool, url: &str) -> ReleaseEntry {
    let host = Host::detect();
    ReleaseEntry::new(Provider::Adoptium, version, &host.os, &host.arch, lts, url).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_creates_directories() {
        let env = TestEnvironment::new();
        assert!(env.archives.exists());
        assert!(!env.root.exists());
    }

    #[test]
    fn test_environment_cleanup() {
        let archives = {
            let env = TestEnvironment::new();
            env.archives.clone()
        };

        // After env is dropped, temp directory should be cleaned up
        assert!(!archives.exists());
    }

    #[test]
    fn test_multiple_environments_isolated() {
        let env1 = TestEnvironment::new();
        let env2 = TestEnvironment::new();
        assert_ne!(env1.root, env2.root);
    }

    #[test]
    fn test_archive_builders_write_files() {
        let env = TestEnvironment::new();
        let tgz = env.archive_path("jdk.tar.gz");
        let zip = env.archive_path("jdk.zip");
        jdk_tar_gz(&tgz, Some("jdk-21.0.2+13"), "21.0.2");
        jdk_zip(&zip, None, "21.0.2");
        assert!(std::fs::metadata(tgz).unwrap().len() > 0);
        assert!(std::fs::metadata(zip).unwrap().len() > 0);
    }
}

/// Serve canned HTTP responses on a local port for the rest of the test run.
///
/// `respond` receives the raw request head (request line and headers) and
/// returns the status code and JSON body. Returns the `http://127.0.0.1:<port>`
/// base URL.
pub fn serve(respond: fn(&str) -> (u16, String)) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    std::thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };

            let mut head = Vec::new();
            let mut buf = [0u8; 4096];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => head.extend_from_slice(&buf[..n]),
                }
            }

            let (status, body) = respond(&String::from_utf8_lossy(&head));
            let reason = if status == 200 { "OK" } else { "Error" };
            let response = format!(
                "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                reason,
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });

    format!("http://{}", addr)
}

/// Base URL where nothing listens.
pub const UNREACHABLE: &str = "http://127.0.0.1:9";

// Catalog client tests against a local HTTP server
//
// Each test serves canned vendor responses from 127.0.0.1 and points the
// client's endpoints at it, so the HTTP plumbing (status mapping, bearer auth,
// pagination, per-record decoding) runs without the real catalogs.

mod test_helpers;

use jdkup::catalog::{CatalogClient, Endpoints, Provider, zulu};
use jdkup::config::CustomProvider;
use jdkup::download::Downloader;
use jdkup::error::JdkupError;
use jdkup::installer::Installer;
use jdkup::platform::Host;
use jdkup::version::VersionSpec;
use test_helpers::{UNREACHABLE, serve};

fn client(
    adoptium: &str,
    zulu: &str,
    liberica: &str,
    custom: Option<CustomProvider>,
) -> CatalogClient {
    CatalogClient::with_endpoints(
        Endpoints {
            adoptium: adoptium.to_string(),
            zulu: zulu.to_string(),
            liberica: liberica.to_string(),
        },
        custom,
    )
    .unwrap()
}

fn zulu_package(version: [u32; 3]) -> String {
    let [major, minor, patch] = version;
    let name = format!("zulu{major}.0.0-ca-jdk{major}.{minor}.{patch}-linux_x64.tar.gz");
    format!(
        r#"{{"name": "{name}", "java_version": [{major}, {minor}, {patch}], "download_url": "https://cdn.azul.com/zulu/bin/{name}"}}"#
    )
}

fn mixed_catalogs(head: &str) -> (u16, String) {
    if head.starts_with("GET /metadata/v1/zulu/") {
        return (200, format!("[{}]", zulu_package([21, 0, 2])));
    }
    if head.starts_with("GET /v1/liberica/") {
        return (503, "{}".to_string());
    }
    if head.starts_with("GET /releases.json") {
        if !head.to_ascii_lowercase().contains("authorization: bearer s3cr3t") {
            return (401, "{}".to_string());
        }
        return (
            200,
            r#"[
              {"version": "21.0.3", "download": "https://mirror.corp/jdk-21.0.3-linux-x64.tar.gz", "os": "linux", "arch": "x64", "lts": true},
              {"version": 21, "download": "https://mirror.corp/jdk-21.tar.gz", "os": "linux", "arch": "x64"},
              {"version": "17.0.11", "download": "https://mirror.corp/jdk-17.0.11-linux-x64.tar.gz", "os": "linux", "arch": "x64", "lts": true}
            ]"#
            .to_string(),
        );
    }
    (404, "{}".to_string())
}

#[tokio::test]
async fn test_fetch_all_reports_failures_and_keeps_other_providers() {
    let base = serve(mixed_catalogs);
    let custom = CustomProvider {
        endpoint: format!("{}/releases.json", base),
        token: Some("s3cr3t".to_string()),
    };
    let client = client(UNREACHABLE, &base, &base, Some(custom));

    let catalogs = client.fetch_all(None).await;
    let providers: Vec<Provider> = catalogs.iter().map(|c| c.provider).collect();
    assert_eq!(providers, Provider::ALL.to_vec());

    // Connection refused
    assert!(matches!(catalogs[0].result, Err(JdkupError::Network { .. })));

    let zulu = catalogs[1].result.as_ref().unwrap();
    assert_eq!(zulu.len(), 1);
    assert_eq!(zulu[0].spec, VersionSpec::exact(21, 0, 2));

    // Non-success status
    match &catalogs[2].result {
        Err(JdkupError::Network { provider, message }) => {
            assert_eq!(provider, "liberica");
            assert!(message.contains("503"));
        }
        other => panic!("unexpected liberica result: {other:?}"),
    }

    let custom = catalogs[3].result.as_ref().unwrap();
    let versions: Vec<&str> = custom.iter().map(|e| e.raw_version.as_str()).collect();
    assert_eq!(versions, vec!["21.0.3", "17.0.11"]);
}

#[tokio::test]
async fn test_custom_catalog_requires_the_configured_token() {
    let base = serve(mixed_catalogs);
    let custom = CustomProvider {
        endpoint: format!("{}/releases.json", base),
        token: Some("wrong".to_string()),
    };
    let client = client(UNREACHABLE, UNREACHABLE, UNREACHABLE, Some(custom));

    let err = client.fetch_entries(Provider::Custom, None).await.unwrap_err();
    match err {
        JdkupError::Network { message, .. } => assert!(message.contains("401")),
        other => panic!("unexpected error: {other}"),
    }
}

fn paged_zulu(head: &str) -> (u16, String) {
    if !head.starts_with("GET /metadata/v1/zulu/") {
        return (404, "{}".to_string());
    }
    let packages: Vec<String> = if head.contains("&page=1 ") {
        (0..zulu::PAGE_SIZE as u32).map(|patch| zulu_package([21, 0, patch])).collect()
    } else if head.contains("&page=2 ") {
        vec![zulu_package([17, 0, 9]), zulu_package([11, 0, 21])]
    } else {
        vec![]
    };
    (200, format!("[{}]", packages.join(",")))
}

#[tokio::test]
async fn test_zulu_catalog_follows_pages_until_a_short_page() {
    let base = serve(paged_zulu);
    let client = client(UNREACHABLE, &base, UNREACHABLE, None);

    let entries = client.fetch_entries(Provider::Zulu, None).await.unwrap();
    assert_eq!(entries.len(), zulu::PAGE_SIZE + 2);

    let mut majors: Vec<u32> = entries.iter().map(|e| e.spec.major).collect();
    majors.dedup();
    assert_eq!(majors, vec![21, 17, 11]);
}

fn adoptium_catalog(head: &str) -> (u16, String) {
    if head.starts_with("GET /v3/info/available_releases") {
        return (
            200,
            r#"{"available_releases": [8, 11, 17, 21, 22], "available_lts_releases": [8, 11, 17, 21]}"#
                .to_string(),
        );
    }
    if head.starts_with("GET /v3/assets/feature_releases/21/ga") {
        return (
            200,
            r#"[
              {
                "binaries": [{
                  "os": "linux",
                  "architecture": "x64",
                  "image_type": "jdk",
                  "package": {"link": "https://github.com/adoptium/temurin21-binaries/releases/download/jdk-21.0.2%2B13/OpenJDK21U-jdk_x64_linux_hotspot_21.0.2_13.tar.gz"}
                }],
                "version_data": {"openjdk_version": "21.0.2+13-LTS"}
              },
              {
                "binaries": [{"os": "linux", "architecture": "x64", "image_type": "jdk"}]
              }
            ]"#
            .to_string(),
        );
    }
    (404, "{}".to_string())
}

#[tokio::test]
async fn test_adoptium_skips_malformed_releases() {
    let base = serve(adoptium_catalog);
    let client = client(&base, UNREACHABLE, UNREACHABLE, None);

    let entries = client.fetch_entries(Provider::Adoptium, Some(21)).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].spec, VersionSpec::exact(21, 0, 2));
    assert!(entries[0].is_lts);
    assert_eq!(
        entries[0].archive_file_name().as_deref(),
        Some("OpenJDK21U-jdk_x64_linux_hotspot_21.0.2_13.tar.gz")
    );
}

#[tokio::test]
async fn test_unpublished_adoptium_major_is_no_match() {
    let base = serve(adoptium_catalog);
    let client = client(&base, UNREACHABLE, UNREACHABLE, None);

    let entries = client.fetch_entries(Provider::Adoptium, Some(7)).await.unwrap();
    assert!(entries.is_empty());

    let root = tempfile::TempDir::new().unwrap();
    let installer = Installer::with_parts(
        client,
        Downloader::new(false).unwrap(),
        root.path().to_path_buf(),
        Host::new("linux", "x64"),
        Provider::Adoptium,
    );
    let err = installer.resolve("99", None).await.unwrap_err();
    match err {
        JdkupError::NoMatch { request, .. } => assert_eq!(request, "99"),
        other => panic!("unexpected error: {other}"),
    }
}

use crate::output::{entry_line, lts_badge};
use colored::Colorize;
use jdkup::catalog::{Provider, ReleaseEntry};
use jdkup::error::Result;
use jdkup::installer::{self, Installer};
use std::collections::BTreeMap;

/// Show the recommended release of every major line.
///
/// With `all`, every configured provider is queried and a failing provider
/// is reported without hiding the others.
pub async fn list_remote(
    installer: &Installer,
    provider: Option<Provider>,
    all: bool,
) -> Result<()> {
    if !all {
        let provider = provider.unwrap_or(installer.default_provider());
        let recommended = installer.recommended(Some(provider)).await?;
        print_recommendations(provider, installer, &recommended);
        return Ok(());
    }

    for catalog in installer.catalog().fetch_all(None).await {
        match catalog.result {
            Ok(entries) => {
                let recommended = installer::recommend_for_host(&entries, installer.host());
                print_recommendations(catalog.provider, installer, &recommended);
            }
            Err(e) => {
                println!(
                    "{} {}",
                    format!("==> {}", catalog.provider).bold().cyan(),
                    "(unavailable)".dimmed()
                );
                println!("  {} {}", "✗".red(), e);
            }
        }
        println!();
    }

    Ok(())
}

fn print_recommendations(
    provider: Provider,
    installer: &Installer,
    recommended: &BTreeMap<u32, ReleaseEntry>,
) {
    println!(
        "{} {}",
        format!("==> {}", provider).bold().cyan(),
        format!("({})", installer.host()).dimmed()
    );

    if recommended.is_empty() {
        println!("  {} No releases built for this platform", "⚠".yellow());
        return;
    }

    // Newest major first
    for (major, entry) in recommended.iter().rev() {
        println!(
            "  {:>3}  {}  {}",
            major.to_string().bold(),
            lts_badge(entry.is_lts),
            entry.raw_version
        );
    }
}

/// Show every release that satisfies `request` on this host.
pub async fn search(
    installer: &Installer,
    request: &str,
    provider: Option<Provider>,
) -> Result<()> {
    let resolution = installer.resolve(request, provider).await?;

    println!(
        "{} {} matching {}\n",
        "✓".green(),
        resolution.candidates.len().to_string().bold(),
        request.cyan()
    );

    for entry in &resolution.candidates {
        let marker = if entry == &resolution.best {
            "*".green().bold()
        } else {
            " ".normal()
        };
        println!("{} {}", marker, entry_line(entry));
    }

    println!("\n{} would be installed", resolution.best.raw_version.bold());
    Ok(())
}

use crate::output::{format_size, lts_badge};
use colored::Colorize;
use jdkup::error::Result;
use jdkup::installed;
use jdkup::installer::Installer;
use jdkup::version::VersionSpec;

/// List installed releases, newest first.
pub fn list(installer: &Installer) -> Result<()> {
    let releases = installed::list(installer.root())?;

    if releases.is_empty() {
        println!(
            "No releases installed in {}",
            installer.root().display().to_string().dimmed()
        );
        return Ok(());
    }

    for release in &releases {
        let mut line = format!("{:<12}", release.name).bold().to_string();
        if let Some(receipt) = &release.receipt {
            line.push_str(&format!(
                " {} {:<10}",
                lts_badge(receipt.is_lts),
                receipt.provider.to_string()
            ));
            if let Some(when) = receipt.installed_at() {
                line.push_str(&format!(" {}", when.format("%Y-%m-%d").to_string().dimmed()));
            }
        }
        line.push_str(&format!(" {}", format_size(release.size_bytes()).dimmed()));
        if !release.is_valid() {
            line.push_str(&format!(" {}", "(broken)".red()));
        }
        println!("{}", line);
    }

    Ok(())
}

/// Print the root of the installed release matching `request`.
pub fn home(installer: &Installer, request: &str) -> Result<()> {
    let spec = VersionSpec::parse_request(request)?;
    let release = installed::find(installer.root(), &spec)?;
    println!("{}", release.path.display());
    Ok(())
}

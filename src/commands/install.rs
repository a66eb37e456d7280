use crate::output::format_size;
use colored::Colorize;
use jdkup::catalog::Provider;
use jdkup::error::Result;
use jdkup::installed;
use jdkup::installer::Installer;
use jdkup::version::VersionSpec;

/// Install the best release for `request` and print its root on stdout.
///
/// Progress goes to stderr so `JAVA_HOME=$(jdkup install 21)` works.
pub async fn install(
    installer: &Installer,
    request: &str,
    provider: Option<Provider>,
) -> Result<()> {
    eprintln!(
        "Installing {} from {}...",
        request.cyan(),
        provider
            .unwrap_or(installer.default_provider())
            .to_string()
            .bold()
    );

    let outcome = installer.install(request, provider).await?;

    if outcome.already_installed {
        eprintln!(
            "  {} {} is already installed",
            "✓".green(),
            outcome.entry.raw_version.bold()
        );
    } else {
        let files = outcome.report.map(|r| r.written).unwrap_or_default();
        eprintln!(
            "  {} Installed {} ({} files in {:.1}s)",
            "✓".green(),
            outcome.entry.raw_version.bold(),
            files,
            outcome.time_ms as f64 / 1000.0
        );
    }

    println!("{}", outcome.path.display());
    Ok(())
}

pub fn uninstall(installer: &Installer, request: &str) -> Result<()> {
    let spec = VersionSpec::parse_request(request)?;
    let size = installed::find(installer.root(), &spec)?.size_bytes();
    let release = installed::remove(installer.root(), &spec)?;

    println!(
        "  {} Uninstalled {} ({} freed)",
        "✓".green(),
        release.name.bold(),
        format_size(size)
    );
    Ok(())
}

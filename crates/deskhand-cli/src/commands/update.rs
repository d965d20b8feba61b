//! Update command - check GitHub releases for a newer build.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use tracing::debug;

/// Latest release endpoint for this project.
const LATEST_RELEASE_URL: &str = "https://api.github.com/repos/example/deskhand/releases/latest";

/// Arguments for the update command.
#[derive(Args)]
pub struct UpdateArgs {
    /// Only report whether a newer version exists
    #[arg(long)]
    check_only: bool,

    /// Directory to place the downloaded binary (default: current directory)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// The release fields we read from the GitHub API.
#[derive(Debug, Deserialize)]
struct ReleaseInfo {
    tag_name: String,
    assets: Vec<ReleaseAsset>,
}

#[derive(Debug, Deserialize)]
struct ReleaseAsset {
    name: String,
    browser_download_url: String,
    size: u64,
}

pub async fn run(args: UpdateArgs) -> anyhow::Result<()> {
    let client = reqwest::Client::builder()
        .user_agent(concat!("deskhand/", env!("CARGO_PKG_VERSION")))
        .timeout(std::time::Duration::from_secs(300))
        .build()?;

    let body = client
        .get(LATEST_RELEASE_URL)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    let release: ReleaseInfo = serde_json::from_str(&body)?;

    let current = env!("CARGO_PKG_VERSION");
    let latest = release.tag_name.trim_start_matches('v');

    if !is_newer(latest, current) {
        println!(
            "{} Already up to date (v{})",
            style("✓").green(),
            current
        );
        return Ok(());
    }

    println!(
        "{} New version available: v{} (current: v{})",
        style("ℹ").blue(),
        latest,
        current
    );

    if args.check_only {
        return Ok(());
    }

    let asset_name = platform_asset_name();
    let Some(asset) = release.assets.iter().find(|a| a.name == asset_name) else {
        println!(
            "{} No download available for this platform ({})",
            style("⚠").yellow(),
            asset_name
        );
        return Ok(());
    };

    let output_dir = args.output.unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&output_dir)?;
    let target = output_dir.join(versioned_name(&asset.name, latest));

    debug!("Downloading {} from {}", asset.name, asset.browser_download_url);

    let pb = ProgressBar::new(asset.size);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  {spinner:.green} {msg:<30} [{bar:25.cyan/blue}] {bytes}/{total_bytes}")
            .unwrap()
            .progress_chars("=>-"),
    );
    pb.set_message(asset.name.clone());

    download_file(&client, &asset.browser_download_url, &target, &pb).await?;
    pb.finish_with_message(format!("{} {}", style("✓").green(), asset.name));

    println!(
        "{} Downloaded v{} to {}",
        style("✓").green(),
        latest,
        target.display()
    );

    Ok(())
}

/// Release asset name for the running platform.
fn platform_asset_name() -> String {
    match (std::env::consts::OS, std::env::consts::ARCH) {
        ("windows", _) => "deskhand-windows.exe".to_string(),
        ("macos", "aarch64") => "deskhand-macos-arm".to_string(),
        ("macos", _) => "deskhand-macos-intel".to_string(),
        (os, _) => format!("deskhand-{os}"),
    }
}

/// File name for a downloaded asset with the version spliced in before
/// any extension.
fn versioned_name(asset_name: &str, version: &str) -> String {
    match asset_name.rsplit_once('.') {
        Some((stem, ext)) => format!("{stem}-v{version}.{ext}"),
        None => format!("{asset_name}-v{version}"),
    }
}

/// Compare dotted version strings component-wise, so "0.10.0" beats
/// "0.9.1". Missing components count as zero.
fn is_newer(candidate: &str, current: &str) -> bool {
    let parse = |v: &str| -> Vec<u64> {
        v.split('.')
            .map(|part| part.trim().parse().unwrap_or(0))
            .collect()
    };

    let candidate = parse(candidate);
    let current = parse(current);
    let len = candidate.len().max(current.len());

    for i in 0..len {
        let c = candidate.get(i).copied().unwrap_or(0);
        let cur = current.get(i).copied().unwrap_or(0);
        if c != cur {
            return c > cur;
        }
    }
    false
}

async fn download_file(
    client: &reqwest::Client,
    url: &str,
    path: &Path,
    pb: &ProgressBar,
) -> anyhow::Result<()> {
    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        anyhow::bail!("HTTP {}", response.status());
    }

    if let Some(content_length) = response.content_length() {
        pb.set_length(content_length);
    }

    // Create temp file first
    let temp_path = path.with_extension("tmp");
    let mut file = File::create(&temp_path)?;

    // Stream download with progress
    let mut stream = response.bytes_stream();
    let mut downloaded: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk)?;
        downloaded += chunk.len() as u64;
        pb.set_position(downloaded);
    }

    file.flush()?;
    drop(file);

    // Rename temp to final
    fs::rename(&temp_path, path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_newer() {
        assert!(is_newer("0.2.0", "0.1.0"));
        assert!(is_newer("0.10.0", "0.9.1"));
        assert!(is_newer("1.0", "0.9.9"));
        assert!(!is_newer("0.1.0", "0.1.0"));
        assert!(!is_newer("0.1", "0.1.0"));
        assert!(!is_newer("0.0.9", "0.1.0"));
    }

    #[test]
    fn test_versioned_name() {
        assert_eq!(
            versioned_name("deskhand-windows.exe", "0.2.0"),
            "deskhand-windows-v0.2.0.exe"
        );
        assert_eq!(
            versioned_name("deskhand-linux", "0.2.0"),
            "deskhand-linux-v0.2.0"
        );
    }
}

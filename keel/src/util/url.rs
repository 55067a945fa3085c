//! Download pretrained policy parameters from a network drive.
use anyhow::{Context, Result};
use log::info;
use reqwest::IntoUrl;
use std::{
    fmt::Debug,
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

/// Download a file containing pretrained policy parameters from the given url.
///
/// This function will download the file into `~/.keel/artifacts`, then return
/// the path to the downloaded file. If a file with the given name already
/// exists there, the download is skipped.
pub fn fetch_artifact<T: AsRef<Path>>(url: impl IntoUrl + Debug, file_name: T) -> Result<PathBuf> {
    let mut path = dirs::home_dir().context("Couldn't find home directory")?;
    path.push(".keel/artifacts/");

    if !path.as_path().exists() {
        info!("Create directory {:?}", path);
        std::fs::create_dir_all(path.as_path())?;
    }

    path.push(&file_name);
    if path.as_path().exists() {
        info!("Exists file {:?}, skips download", path);
        return Ok(path);
    }

    info!("Download file from {:?}", url);
    let response = reqwest::blocking::get(url)?;
    let content = response.bytes()?;
    let mut file = File::create(&path.as_path())
        .context(format!("Failed to create file {:?}", path))?;
    file.write_all(&content)?;
    file.flush()?;
    info!("Downloaded file as {:?}", path.as_path());

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::fetch_artifact;
    use anyhow::{Context, Result};

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    // Requires network access.
    #[test]
    #[ignore]
    fn test_fetch_artifact() -> Result<()> {
        init();

        let url = "https://raw.githubusercontent.com/keel-rl/keel/main/README.md";
        let file_name = "readme_artifact";

        let mut path = dirs::home_dir().context("Couldn't find home directory")?;
        path.push(".keel/artifacts");
        path.push(file_name);

        // ignore when failed to remove file
        std::fs::remove_file(&path.as_path()).unwrap_or(());

        let path = fetch_artifact(url, file_name)?;
        assert!(path.exists());

        Ok(())
    }
}

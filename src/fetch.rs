use crate::error::LoadError;
use crate::settings::FetchConfig;
use reqwest::blocking::Client;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;

pub fn quotes_url(config: &FetchConfig, ticker: &str, start_date: &str, end_date: &str) -> String {
    format!(
        "{}/{}/historical-prices/download?MOD_VIEW=page&num_rows={}&startDate={}&endDate={}",
        config.base_url.trim_end_matches('/'),
        ticker,
        config.num_rows,
        start_date,
        end_date
    )
}

pub fn client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .redirect(reqwest::redirect::Policy::limited(10));
    if !config.use_system_proxy {
        builder = builder.no_proxy();
    }
    builder.build()
}

/// Streams the response body of `url` into `path`, returning the byte count.
pub fn download_to_file(client: &Client, url: &str, path: &Path) -> Result<u64, LoadError> {
    let mut response = client.get(url).send()?.error_for_status()?;

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    let written = response.copy_to(&mut writer)?;
    writer.flush()?;

    tracing::info!(url, bytes = written, path = %path.display(), "downloaded quotes");
    Ok(written)
}

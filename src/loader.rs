// loader.rs - downloads and parses quotes off the UI thread
use crate::error::{DataError, LoadError};
use crate::fetch;
use crate::quotes::{self, Field, Quote};
use crate::scale::{Range, Series};
use crate::settings::FetchConfig;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub ticker: String,
    pub start_date: String,
    pub end_date: String,
}

/// Parsed quotes plus the two ranges the tabs share: one over all four
/// price columns, one for volume.
#[derive(Debug, Clone)]
pub struct ChartData {
    pub quotes: Vec<Quote>,
    pub price_range: Range,
    pub volume_range: Range,
}

impl ChartData {
    pub fn from_quotes(quotes: Vec<Quote>) -> Result<Self, DataError> {
        let prices: Vec<Series> = Field::PRICES
            .iter()
            .map(|&f| quotes::series(&quotes, f))
            .collect();
        let price_range = Range::union(&prices).ok_or(DataError::Empty)?;
        let volume_range =
            Range::from_series(&quotes::series(&quotes, Field::Volume)).ok_or(DataError::Empty)?;
        Ok(Self {
            quotes,
            price_range,
            volume_range,
        })
    }

    pub fn series(&self, field: Field) -> Series {
        quotes::series(&self.quotes, field)
    }

    pub fn range(&self, field: Field) -> Range {
        if field.is_price() {
            self.price_range
        } else {
            self.volume_range
        }
    }
}

pub type LoadOutcome = Result<ChartData, DataError>;

/// Download `request` into `path`, then parse it. Blocking. The downloaded
/// file is removed again whatever the outcome.
pub fn load_quotes(config: &FetchConfig, request: &LoadRequest, path: &Path) -> LoadOutcome {
    let outcome = download_and_parse(config, request, path);
    if path.exists() {
        if let Err(e) = fs::remove_file(path) {
            tracing::warn!(path = %path.display(), error = %e, "could not remove download");
        }
    }
    outcome
}

fn download_and_parse(config: &FetchConfig, request: &LoadRequest, path: &Path) -> LoadOutcome {
    let url = fetch::quotes_url(config, &request.ticker, &request.start_date, &request.end_date);
    let client = fetch::client(config).map_err(LoadError::from)?;
    fetch::download_to_file(&client, &url, path)?;
    let quotes = quotes::read_csv_file(path)?;
    if quotes.is_empty() {
        return Err(DataError::Empty);
    }
    ChartData::from_quotes(quotes)
}

/// A load running on its own thread.
pub struct PendingLoad {
    rx: Receiver<LoadOutcome>,
}

impl PendingLoad {
    /// Runs [`load_quotes`] on a worker thread; `notify` fires once the outcome is sent.
    pub fn spawn(
        config: FetchConfig,
        request: LoadRequest,
        path: PathBuf,
        notify: impl FnOnce() + Send + 'static,
    ) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            tracing::debug!(ticker = %request.ticker, "loader thread started");
            let outcome = load_quotes(&config, &request, &path);
            match &outcome {
                Ok(data) => {
                    let rows = data.quotes.len();
                    tracing::info!(ticker = %request.ticker, rows, "quotes loaded")
                }
                Err(e) => {
                    tracing::warn!(ticker = %request.ticker, error = %e, "quote load failed")
                }
            }
            // receiver is gone when the chart window was closed first
            let _ = tx.send(outcome);
            drop(tx);
            notify();
        });
        Self { rx }
    }

    /// Non-blocking; `None` while the worker is still running.
    pub fn poll(&self) -> Option<LoadOutcome> {
        match self.rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(LoadError::WorkerExited.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::time::Duration;

    const FEED: &str = "Date,Open,High,Low,Close,Volume\n\
        1/3/2019,12.0,14.0,11.0,13.0,900\n\
        1/2/2019,10.0,12.5,9.0,12.0,1200\n";

    /// Serves one canned HTTP response and returns the base url.
    fn serve_once(status: &'static str, body: &'static str) -> String {
        serve_once_with(status, String::new(), body)
    }

    /// Like [`serve_once`] with extra response header lines, each ending in `\r\n`.
    fn serve_once_with(status: &'static str, headers: String, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {status}\r\n{headers}Content-Type: text/csv\r\n\
                 Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
        });
        format!("http://{addr}")
    }

    fn config(base_url: String) -> FetchConfig {
        FetchConfig {
            base_url,
            timeout_secs: 5,
            use_system_proxy: false,
            ..FetchConfig::default()
        }
    }

    fn request() -> LoadRequest {
        LoadRequest {
            ticker: "KO".to_string(),
            start_date: "1/1/2019".to_string(),
            end_date: "1/4/2019".to_string(),
        }
    }

    #[test]
    fn loads_and_shares_price_range() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("KO.csv");
        let data = load_quotes(&config(serve_once("200 OK", FEED)), &request(), &path).unwrap();

        assert_eq!(data.quotes.len(), 2);
        assert_eq!(data.range(Field::Close), data.range(Field::High));
        assert_eq!(data.price_range, Range::from_extrema(9.0, 14.0));
        assert_eq!(data.range(Field::Volume), Range::from_extrema(900.0, 1200.0));
    }

    fn files_in(dir: &Path) -> usize {
        fs::read_dir(dir).unwrap().count()
    }

    #[test]
    fn downloads_are_removed_after_every_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("KO.csv");

        assert!(load_quotes(&config(serve_once("200 OK", FEED)), &request(), &path).is_ok());
        assert_eq!(files_in(dir.path()), 0);

        let bad = "Date,Open,High,Low,Close,Volume\n1/2/2019,1,2\n";
        assert!(load_quotes(&config(serve_once("200 OK", bad)), &request(), &path).is_err());
        assert_eq!(files_in(dir.path()), 0);

        let header_only = "Date,Open,High,Low,Close,Volume\n";
        let outcome = load_quotes(&config(serve_once("200 OK", header_only)), &request(), &path);
        assert!(matches!(outcome, Err(DataError::Empty)));
        assert_eq!(files_in(dir.path()), 0);
    }

    #[test]
    fn redirect_is_followed_into_the_file() {
        let target = serve_once("200 OK", FEED);
        let moved = serve_once_with(
            "301 Moved Permanently",
            format!("Location: {target}/moved.csv\r\n"),
            "",
        );
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("KO.csv");

        let client = fetch::client(&config(moved.clone())).unwrap();
        let written = fetch::download_to_file(&client, &format!("{moved}/KO"), &path).unwrap();
        assert_eq!(written, FEED.len() as u64);
        assert_eq!(fs::read_to_string(&path).unwrap(), FEED);
    }

    #[test]
    fn header_only_response_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("KO.csv");
        let outcome = load_quotes(
            &config(serve_once("200 OK", "Date,Open,High,Low,Close,Volume\n")),
            &request(),
            &path,
        );
        assert!(matches!(outcome, Err(DataError::Empty)));
    }

    #[test]
    fn http_error_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("KO.csv");
        let outcome = load_quotes(&config(serve_once("404 Not Found", "")), &request(), &path);
        assert!(matches!(outcome, Err(DataError::Unavailable(LoadError::Http(_)))));
    }

    #[test]
    fn malformed_feed_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("KO.csv");
        let body = "Date,Open,High,Low,Close,Volume\n1/2/2019,10.0,oops,9.0,12.0,1200\n";
        let outcome = load_quotes(&config(serve_once("200 OK", body)), &request(), &path);
        assert!(matches!(
            outcome,
            Err(DataError::Unavailable(LoadError::MalformedRow { line: 2, .. }))
        ));
    }

    #[test]
    fn spawned_load_delivers_outcome_and_notifies() {
        let dir = tempfile::tempdir().unwrap();
        let (notify_tx, notify_rx) = mpsc::channel();
        let pending = PendingLoad::spawn(
            config(serve_once("200 OK", FEED)),
            request(),
            dir.path().join("nested").join("KO.csv"),
            move || {
                let _ = notify_tx.send(());
            },
        );
        notify_rx.recv_timeout(Duration::from_secs(10)).unwrap();
        let data = pending.poll().expect("outcome after notify").unwrap();
        assert_eq!(data.series(Field::Open).len(), 2);
        // the sender is dropped after the one outcome
        assert!(matches!(
            pending.poll(),
            Some(Err(DataError::Unavailable(LoadError::WorkerExited)))
        ));
    }

    #[test]
    fn chart_data_rejects_no_quotes() {
        assert!(matches!(ChartData::from_quotes(Vec::new()), Err(DataError::Empty)));
    }
}

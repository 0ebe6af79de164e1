use crate::fetch::error::FetchError;
use crate::fetch::records::records_to_frame;
use bon::bon;
use log::{error, info, warn};
use polars::frame::DataFrame;
use reqwest::blocking::Client;
use serde_json::Value;
use std::time::Duration;

/// Open data portal endpoint for the plant harm assessment dataset.
pub const DEFAULT_SOURCE_URL: &str = "https://get.data.gov.lt/datasets/gov/lzukt/Ivertis";

/// Upper bound on the single blocking request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Downloads the observation dataset and turns it into the raw table.
///
/// Performs exactly one blocking GET per call; nothing is cached or retried.
#[derive(Debug, Clone)]
pub struct Fetcher {
    source_url: String,
    client: Client,
}

#[bon]
impl Fetcher {
    /// Creates a fetcher for `source_url` whose requests give up after `timeout`.
    ///
    /// Both parameters are optional on the builder and default to
    /// [`DEFAULT_SOURCE_URL`] and [`DEFAULT_TIMEOUT`].
    ///
    /// ```no_run
    /// use plant_harm::Fetcher;
    /// use std::time::Duration;
    ///
    /// let fetcher = Fetcher::builder()
    ///     .timeout(Duration::from_secs(5))
    ///     .build()?;
    /// let raw = fetcher.fetch();
    /// println!("{} raw rows", raw.height());
    /// # Ok::<(), plant_harm::FetchError>(())
    /// ```
    #[builder]
    pub fn new(
        #[builder(into, default = DEFAULT_SOURCE_URL.to_string())] source_url: String,
        #[builder(default = DEFAULT_TIMEOUT)] timeout: Duration,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FetchError::ClientBuild)?;
        Ok(Self { source_url, client })
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    /// Fetches the dataset, reporting every failure through [`FetchError`].
    pub fn try_fetch(&self) -> Result<DataFrame, FetchError> {
        let url = self.source_url.as_str();
        info!("Downloading observations from {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| FetchError::NetworkRequest(url.to_string(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    FetchError::HttpStatus {
                        url: url.to_string(),
                        status,
                        source: e,
                    }
                } else {
                    FetchError::NetworkRequest(url.to_string(), e)
                });
            }
        };

        let body = response
            .text()
            .map_err(|e| FetchError::BodyRead(url.to_string(), e))?;
        let json: Value =
            serde_json::from_str(&body).map_err(|e| FetchError::JsonParse(url.to_string(), e))?;

        let frame = records_to_frame(&json)?;
        info!(
            "Fetched {} records with {} columns from {}",
            frame.height(),
            frame.width(),
            url
        );
        Ok(frame)
    }

    /// Fetches the dataset, degrading any failure into an empty table.
    ///
    /// The failure is printed to the console and logged; callers only see a
    /// table with no rows and no columns. Use [`Fetcher::try_fetch`] to tell
    /// "no data" apart from "fetch failed".
    pub fn fetch(&self) -> DataFrame {
        match self.try_fetch() {
            Ok(frame) => frame,
            Err(e) => {
                let reason = failure_reason(e);
                error!("Fetching {} failed: {}", self.source_url, reason);
                println!("Error fetching data: {}", reason);
                DataFrame::empty()
            }
        }
    }
}

/// One-line `outer: cause: root` rendering of a fetch failure.
fn failure_reason(e: FetchError) -> String {
    format!("{:#}", anyhow::Error::from(e))
}

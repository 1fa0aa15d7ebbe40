//! Where the seed data comes from and the shape of its records.

use std::{fmt::Debug, path::PathBuf, sync::Arc, time::Duration};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Error;

/// The default location of the seed data.
pub const DEFAULT_SEED_URL: &str = "https://s3.amazonaws.com/roxiler.com/product_transaction.json";

/// How long to wait for the seed data to download.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// A product sale as it appears in the seed data.
///
/// Records are checked and converted to transactions by [crate::prepare_transactions].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedRecord {
    /// The ID used by the seed data. Transactions are given new IDs, so it is ignored.
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    /// The name of the product.
    pub title: String,
    /// A text description of the product.
    pub description: String,
    /// The price of the product.
    pub price: SeedPrice,
    /// The product category.
    pub category: String,
    /// Whether the product was sold, defaults to false.
    #[serde(default)]
    pub sold: Option<bool>,
    /// When the product was sold as an RFC 3339 date-time, defaults to the time of import.
    #[serde(default)]
    pub date_of_sale: Option<String>,
    /// The URL of an image of the product.
    pub image: String,
}

/// A price given as either a JSON number or a string holding a decimal number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeedPrice {
    /// A price given as a JSON number, e.g. `329.85`.
    Number(f64),
    /// A price given as a string, e.g. `"329.85"`.
    Text(String),
}

/// A source of seed data.
#[async_trait]
pub trait SeedSource: Debug + Send + Sync {
    /// Fetch every record from the source.
    ///
    /// # Errors
    /// Returns [Error::SeedSourceUnavailable] if the data cannot be read or is not
    /// a JSON array of seed records.
    async fn fetch(&self) -> Result<Vec<SeedRecord>, Error>;

    /// A description of where the data is fetched from, for logging.
    fn location(&self) -> &str;
}

/// Fetches seed data with an HTTP GET request.
#[derive(Debug, Clone)]
pub struct HttpSeedSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSeedSource {
    /// Create a source that downloads the seed data from `url`.
    ///
    /// # Errors
    /// Returns [Error::SeedSourceUnavailable] if the HTTP client cannot be created.
    pub fn new(url: &str) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|error| {
                Error::SeedSourceUnavailable(format!("could not create HTTP client: {error}"))
            })?;

        Ok(Self {
            url: url.to_owned(),
            client,
        })
    }
}

#[async_trait]
impl SeedSource for HttpSeedSource {
    async fn fetch(&self) -> Result<Vec<SeedRecord>, Error> {
        let unavailable =
            |error: reqwest::Error| Error::SeedSourceUnavailable(format!("{}: {error}", self.url));

        self.client
            .get(&self.url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(unavailable)?
            .json::<Vec<SeedRecord>>()
            .await
            .map_err(unavailable)
    }

    fn location(&self) -> &str {
        &self.url
    }
}

/// Reads seed data from a JSON file.
#[derive(Debug, Clone)]
pub struct FileSeedSource {
    path: PathBuf,
    location: String,
}

impl FileSeedSource {
    /// Create a source that reads the seed data from the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let location = path.display().to_string();

        Self { path, location }
    }
}

#[async_trait]
impl SeedSource for FileSeedSource {
    async fn fetch(&self) -> Result<Vec<SeedRecord>, Error> {
        let contents = tokio::fs::read(&self.path).await.map_err(|error| {
            Error::SeedSourceUnavailable(format!("could not read {}: {error}", self.location))
        })?;

        serde_json::from_slice(&contents).map_err(|error| {
            Error::SeedSourceUnavailable(format!("could not parse {}: {error}", self.location))
        })
    }

    fn location(&self) -> &str {
        &self.location
    }
}

/// Create the seed source for `location`.
///
/// Locations starting with `http://` or `https://` are downloaded, anything
/// else is treated as a path to a JSON file.
///
/// # Errors
/// Returns [Error::SeedSourceUnavailable] if the HTTP client cannot be created.
pub fn seed_source_from_location(location: &str) -> Result<Arc<dyn SeedSource>, Error> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(Arc::new(HttpSeedSource::new(location)?))
    } else {
        Ok(Arc::new(FileSeedSource::new(location)))
    }
}

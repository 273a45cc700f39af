//! Loading the static venue and event documents.
//!
//! Each region has two JSON files, `{region}_venues.json` and
//! `{region}_events.json`, served either from a local directory or from the
//! published site. Fetch failures are logged and degrade to empty data so a
//! broken file never stops the listing from rendering.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::PrettyFormatter;
use tracing::{debug, error};
use url::Url;

use crate::error::{ArtwalkError, ArtwalkResult};
use crate::event::{EventsByVenue, Venues};
use crate::region::Region;

const FETCH_TIMEOUT_SECS: u64 = 20;

/// Where the region documents live
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Dir(PathBuf),
    /// Base URL; always ends with `/` so file names join onto it
    Http(Url),
}

impl FromStr for DataSource {
    type Err = ArtwalkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if s.starts_with("http://") || s.starts_with("https://") {
            let mut url = Url::parse(s)
                .map_err(|e| ArtwalkError::Config(format!("Invalid data source URL '{s}': {e}")))?;
            if !url.path().ends_with('/') {
                let path = format!("{}/", url.path());
                url.set_path(&path);
            }
            return Ok(DataSource::Http(url));
        }

        Ok(DataSource::Dir(PathBuf::from(shellexpand::tilde(s).into_owned())))
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Dir(dir) => write!(f, "{}", dir.display()),
            DataSource::Http(url) => write!(f, "{url}"),
        }
    }
}

/// Loads one region's documents. Venues are cached after the first
/// successful fetch and never invalidated.
pub struct DataLoader {
    source: DataSource,
    region: Region,
    http: reqwest::Client,
    venues: Option<Venues>,
}

impl DataLoader {
    pub fn new(source: DataSource, region: Region) -> ArtwalkResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()?;

        Ok(Self::with_client(source, region, http))
    }

    pub fn with_client(source: DataSource, region: Region, http: reqwest::Client) -> Self {
        DataLoader {
            source,
            region,
            http,
            venues: None,
        }
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn cached_venues(&self) -> Option<&Venues> {
        self.venues.as_ref()
    }

    /// Venue name -> address. Empty if the document can't be loaded.
    pub async fn fetch_venues(&mut self) -> Venues {
        if let Some(venues) = &self.venues {
            debug!(region = %self.region, "Using cached venues");
            return venues.clone();
        }

        match self.read_json::<Venues>(&self.region.venues_file()).await {
            Ok(venues) => {
                self.venues = Some(venues.clone());
                venues
            }
            Err(e) => {
                error!(region = %self.region, source = %self.source, "Failed to fetch venues: {e}");
                Venues::new()
            }
        }
    }

    /// All events by venue. Empty if the document can't be loaded.
    pub async fn fetch_events(&self) -> EventsByVenue {
        self.try_fetch_events().await.unwrap_or_else(|e| {
            error!(region = %self.region, source = %self.source, "Failed to fetch events: {e}");
            EventsByVenue::new()
        })
    }

    /// Like [`fetch_events`](Self::fetch_events) but reports failures.
    pub async fn try_fetch_events(&self) -> ArtwalkResult<EventsByVenue> {
        self.read_json(&self.region.events_file()).await
    }

    /// Write the events document back, 4-space indented.
    pub async fn save_events(&self, events: &EventsByVenue) -> ArtwalkResult<()> {
        let DataSource::Dir(dir) = &self.source else {
            return Err(ArtwalkError::ReadOnlySource(self.source.to_string()));
        };

        let mut content = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut content, PrettyFormatter::with_indent(b"    "));
        events.serialize(&mut serializer)?;

        tokio::fs::write(dir.join(self.region.events_file()), content).await?;
        Ok(())
    }

    async fn read_json<T: DeserializeOwned>(&self, file: &str) -> ArtwalkResult<T> {
        match &self.source {
            DataSource::Dir(dir) => {
                let bytes = tokio::fs::read(dir.join(file)).await?;
                Ok(serde_json::from_slice(&bytes)?)
            }
            DataSource::Http(base) => {
                let url = base
                    .join(file)
                    .map_err(|e| ArtwalkError::Http(format!("Invalid URL for {file}: {e}")))?;

                let resp = self.http.get(url.clone()).send().await?;
                if !resp.status().is_success() {
                    return Err(ArtwalkError::Http(format!("{url} returned {}", resp.status())));
                }

                Ok(resp.json().await?)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::DateField;
    use tempfile::TempDir;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const VENUES: &str = r#"{ "SFMOMA": "151 Third St, San Francisco, CA 94103" }"#;

    const EVENTS: &str = r#"{
        "SFMOMA": {
            "Rothko-SFMOMA": {
                "name": "Rothko",
                "dates": { "start": "null", "end": "2025-05-01" },
                "tags": ["current"],
                "links": [{ "description": "Event Page", "link": "https://example.org/rothko" }],
                "hash": "0f3c"
            },
            "Kahlo-SFMOMA": { "name": "Kahlo" }
        }
    }"#;

    fn write_region(dir: &TempDir, region: Region) {
        std::fs::write(dir.path().join(region.venues_file()), VENUES).unwrap();
        std::fs::write(dir.path().join(region.events_file()), EVENTS).unwrap();
    }

    fn loader(dir: &TempDir, region: Region) -> DataLoader {
        DataLoader::new(DataSource::Dir(dir.path().to_path_buf()), region).unwrap()
    }

    /// Serves `routes` (path, body) over plain HTTP; anything else is a 404.
    async fn serve(routes: Vec<(&'static str, &'static str)>) -> DataSource {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = vec![0u8; 8192];
                let mut read = 0;
                while read < buf.len() {
                    let n = socket.read(&mut buf[read..]).await.unwrap_or(0);
                    if n == 0 {
                        break;
                    }
                    read += n;
                    if buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                        break;
                    }
                }

                let request = String::from_utf8_lossy(&buf[..read]);
                let path = request.split_whitespace().nth(1).unwrap_or("/");
                let (status, body) = routes
                    .iter()
                    .find(|(route, _)| *route == path)
                    .map(|(_, body)| ("200 OK", *body))
                    .unwrap_or(("404 Not Found", "not found"));

                let response = format!(
                    "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        format!("http://{addr}/data").parse().unwrap()
    }

    fn http_loader(source: DataSource, region: Region) -> DataLoader {
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        DataLoader::with_client(source, region, client)
    }

    #[test]
    fn test_parse_data_source() {
        assert_eq!(
            "https://example.org/data".parse::<DataSource>().unwrap(),
            DataSource::Http(Url::parse("https://example.org/data/").unwrap())
        );
        assert_eq!(
            "/srv/artwalk/data".parse::<DataSource>().unwrap(),
            DataSource::Dir(PathBuf::from("/srv/artwalk/data"))
        );
        assert!("https://exa mple.org".parse::<DataSource>().is_err());
    }

    #[tokio::test]
    async fn test_fetch_from_directory() {
        let dir = TempDir::new().unwrap();
        write_region(&dir, Region::Sf);
        let mut loader = loader(&dir, Region::Sf);

        let venues = loader.fetch_venues().await;
        let events = loader.fetch_events().await;

        assert_eq!(venues["SFMOMA"], "151 Third St, San Francisco, CA 94103");
        let keys: Vec<&String> = events["SFMOMA"].keys().collect();
        assert_eq!(keys, vec!["Rothko-SFMOMA", "Kahlo-SFMOMA"]);
        assert_eq!(events["SFMOMA"]["Rothko-SFMOMA"].dates.start, DateField::Sentinel);
        assert!(events["SFMOMA"]["Kahlo-SFMOMA"].tags.is_empty());
    }

    #[tokio::test]
    async fn test_missing_files_degrade_to_empty() {
        let dir = TempDir::new().unwrap();
        let mut loader = loader(&dir, Region::La);

        assert!(loader.fetch_venues().await.is_empty());
        assert!(loader.fetch_events().await.is_empty());
        assert!(loader.cached_venues().is_none());
        assert!(loader.try_fetch_events().await.is_err());
    }

    #[tokio::test]
    async fn test_malformed_json_degrades_to_empty() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(Region::Sf.events_file()), "{ not json").unwrap();

        assert!(loader(&dir, Region::Sf).fetch_events().await.is_empty());
    }

    #[tokio::test]
    async fn test_venues_are_loaded_once() {
        let dir = TempDir::new().unwrap();
        write_region(&dir, Region::Sf);
        let mut loader = loader(&dir, Region::Sf);

        loader.fetch_venues().await;
        std::fs::remove_file(dir.path().join(Region::Sf.venues_file())).unwrap();

        assert_eq!(loader.fetch_venues().await.len(), 1);
        assert!(loader.cached_venues().is_some());
    }

    #[tokio::test]
    async fn test_save_events_round_trips() {
        let dir = TempDir::new().unwrap();
        write_region(&dir, Region::Sf);
        let loader = loader(&dir, Region::Sf);

        let events = loader.try_fetch_events().await.unwrap();
        loader.save_events(&events).await.unwrap();

        let saved = std::fs::read_to_string(dir.path().join(Region::Sf.events_file())).unwrap();
        assert!(saved.contains("\n    \"SFMOMA\""), "{saved}");
        assert!(saved.contains("\"hash\": \"0f3c\""));
        assert_eq!(loader.try_fetch_events().await.unwrap(), events);
    }

    #[tokio::test]
    async fn test_http_source_is_read_only() {
        let source: DataSource = "https://example.org/data/".parse().unwrap();
        let loader = DataLoader::new(source, Region::Sf).unwrap();

        assert!(matches!(
            loader.save_events(&EventsByVenue::new()).await,
            Err(ArtwalkError::ReadOnlySource(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_over_http() {
        let source = serve(vec![("/data/sf_venues.json", VENUES), ("/data/sf_events.json", EVENTS)]).await;
        let mut loader = http_loader(source, Region::Sf);

        let venues = loader.fetch_venues().await;
        let events = loader.try_fetch_events().await.unwrap();

        assert_eq!(venues["SFMOMA"], "151 Third St, San Francisco, CA 94103");
        let keys: Vec<&String> = events["SFMOMA"].keys().collect();
        assert_eq!(keys, vec!["Rothko-SFMOMA", "Kahlo-SFMOMA"]);
        assert!(loader.cached_venues().is_some());
    }

    #[tokio::test]
    async fn test_http_error_status_degrades_to_empty() {
        let source = serve(vec![("/data/sf_events.json", EVENTS)]).await;
        let mut loader = http_loader(source, Region::La);

        assert!(loader.fetch_events().await.is_empty());
        assert!(loader.fetch_venues().await.is_empty());
        assert!(loader.cached_venues().is_none());

        let err = loader.try_fetch_events().await.unwrap_err();
        assert!(matches!(&err, ArtwalkError::Http(msg) if msg.contains("404")), "{err}");
    }
}

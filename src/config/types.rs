use serde::Deserialize;

/// Main configuration structure for merocrawl
///
/// Every section is optional; missing values fall back to the directory's
/// known layout (base URL, places and grade categories).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub crawler: CrawlerConfig,
    pub output: OutputConfig,
    pub places: Vec<PlaceEntry>,
    pub categories: Vec<String>,
}

/// Target site configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Root URL of the directory, without a trailing path
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Number of accumulated records between checkpoint flushes
    #[serde(rename = "checkpoint-interval")]
    pub checkpoint_interval: usize,

    /// Per-request timeout in seconds; requests never time out when unset
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: Option<u64>,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the CSV file that receives every flush
    #[serde(rename = "csv-path")]
    pub csv_path: String,
}

/// A place entry: listing slug and numeric site identifier
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PlaceEntry {
    pub name: String,
    pub id: u32,
}

impl PlaceEntry {
    fn new(name: &str, id: u32) -> Self {
        Self {
            name: name.to_string(),
            id,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site: SiteConfig::default(),
            crawler: CrawlerConfig::default(),
            output: OutputConfig::default(),
            places: default_places(),
            categories: default_categories(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://merotutor.com".to_string(),
            user_agent: concat!("merocrawl/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            checkpoint_interval: 100,
            request_timeout_secs: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: "merotutor_data.csv".to_string(),
        }
    }
}

fn default_places() -> Vec<PlaceEntry> {
    vec![
        PlaceEntry::new("kathmandu", 1),
        PlaceEntry::new("dhangadhi", 2),
        PlaceEntry::new("biratnagar", 3),
        PlaceEntry::new("pokhara", 4),
        PlaceEntry::new("birgunj", 5),
        PlaceEntry::new("nepalgunj", 29),
        PlaceEntry::new("hetauda", 38),
        PlaceEntry::new("butwal", 47),
        PlaceEntry::new("narayanghat", 48),
        PlaceEntry::new("mahendranagar", 49),
        PlaceEntry::new("janakpur", 50),
    ]
}

fn default_categories() -> Vec<String> {
    [
        "all-subjects-teachers-grade-1-to-5",
        "all-subjects-teachers-grade-6-to-8",
        "all-subjects-teachers-grade-9-to-10",
        "all-subjects-teachers-higher-secondary",
        "all-subjects-teachers-bachelors-degree",
        "all-subjects-teachers-masters-degree",
    ]
    .iter()
    .map(|c| c.to_string())
    .collect()
}

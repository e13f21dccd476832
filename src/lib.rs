pub mod assets;
pub mod config;
pub mod episode;
pub mod error;
pub mod feed;
pub mod http;
pub mod progress;
pub mod render;
pub mod site;

// Re-export main types for convenience
pub use assets::{AudioOutcome, CoverOutcome};
pub use config::{Config, load_config};
pub use episode::{Episode, extract_episodes, markdown_to_html, slugify};
pub use error::{BuildError, ConfigError, CoverError, DownloadError, FeedError, RenderError};
pub use feed::{Enclosure, FeedItem, Podcast, fetch_feed, parse_feed};
pub use http::{HttpClient, HttpResponse, ReqwestClient};
pub use progress::{NoopReporter, ProgressEvent, ProgressReporter, SharedProgressReporter};
pub use render::Renderer;
pub use site::{BuildOptions, BuildSummary, build_site};

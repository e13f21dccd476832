use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors that can occur when fetching, parsing, or extracting from a feed
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Failed to fetch feed from {url}: {source}")]
    FetchFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to parse RSS feed: {0}")]
    ParseFailed(#[from] rss::Error),

    #[error("Invalid feed URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Episode '{title}' has an unparseable enclosure URL: {source}")]
    InvalidEnclosureUrl {
        title: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Audio URL {url} has no file name in its path")]
    MissingFileName { url: String },
}

/// Errors that can occur while downloading audio files
#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("HTTP request failed for {url}: {source}")]
    HttpFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Stream error while downloading {url}: {source}")]
    StreamFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to write audio file {path}: {source}")]
    FileWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur while downloading and resizing cover art
#[derive(Error, Debug)]
pub enum CoverError {
    #[error("Failed to fetch cover art from {url}: {source}")]
    FetchFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Cover art at {url} is not a decodable image: {source}")]
    DecodeFailed {
        url: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to save cover art to {path}: {source}")]
    SaveFailed {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Errors that can occur while rendering pages from templates
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Failed to create directory {path}: {source}")]
    CreateDirectoryFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write rendered page {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Top-level errors for a site build
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    #[error("Download error: {0}")]
    Download(#[from] DownloadError),

    #[error("Cover art error: {0}")]
    Cover(#[from] CoverError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Failed to create output directory {path}: {source}")]
    CreateDirectoryFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Feed does not declare a cover image")]
    MissingCoverArt,
}

use std::path::PathBuf;
use std::sync::Arc;

/// Events emitted while building the site, for progress reporting
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Feed is being fetched from URL
    FetchingFeed { url: String },

    /// Feed has been parsed and episodes extracted
    FeedParsed {
        podcast_title: String,
        /// Items in the channel, including ones without an enclosure
        item_count: usize,
        /// Items that became episodes
        episode_count: usize,
    },

    /// An audio download is starting
    DownloadStarting {
        episode_title: String,
        /// Index of this episode in the feed
        episode_index: usize,
        total_episodes: usize,
        /// Expected content length in bytes, if known
        content_length: Option<u64>,
    },

    /// Audio download progress update
    DownloadProgress {
        bytes_downloaded: u64,
        total_bytes: Option<u64>,
    },

    /// An audio download completed successfully
    DownloadCompleted {
        episode_title: String,
        bytes_downloaded: u64,
    },

    /// An audio file was already present and left untouched
    DownloadSkipped { file_name: String },

    /// Cover art was fetched, decoded, and saved with its thumbnail
    CoverArtSaved { width: u32, height: u32 },

    /// Cover art already present; neither file was regenerated
    CoverArtSkipped,

    /// A page was rendered and written
    PageRendered { path: PathBuf },

    /// Build finished
    BuildCompleted {
        downloaded_count: usize,
        skipped_count: usize,
        pages_rendered: usize,
    },
}

/// Trait for reporting progress events during a build.
///
/// Implementations can use this to display progress bars, log messages,
/// or collect statistics.
pub trait ProgressReporter: Send + Sync {
    /// Report a progress event
    fn report(&self, event: ProgressEvent);
}

/// A shared reference to a progress reporter
pub type SharedProgressReporter = Arc<dyn ProgressReporter>;

/// A no-op progress reporter that silently ignores all events.
/// Useful for tests or quiet mode.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn report(&self, _event: ProgressEvent) {
        // Intentionally empty
    }
}

impl NoopReporter {
    /// Create a new NoopReporter wrapped in an Arc
    pub fn shared() -> SharedProgressReporter {
        Arc::new(Self)
    }
}

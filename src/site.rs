// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::{Path, PathBuf};

use crate::assets::{AudioOutcome, CoverOutcome, download_audio, download_cover_art};
use crate::config::Config;
use crate::episode::extract_episodes;
use crate::error::BuildError;
use crate::feed::fetch_feed;
use crate::http::HttpClient;
use crate::progress::{ProgressEvent, SharedProgressReporter};
use crate::render::Renderer;

/// Directory for audio files under the output root
const AUDIO_DIR: &str = "audio";
/// Directory for per-episode pages under the output root
const EPISODE_DIR: &str = "episode";

/// Options for a site build
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Directory holding the structural templates (sitemap)
    pub template_dir: PathBuf,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            template_dir: PathBuf::from("templates"),
        }
    }
}

/// Result of a completed build
#[derive(Debug, Clone)]
pub struct BuildSummary {
    /// Episodes extracted from the feed
    pub episode_count: usize,
    /// Audio files downloaded this run
    pub downloaded: usize,
    /// Audio files already present and left untouched
    pub skipped: usize,
    /// Whether cover art was fetched (false when cached from an earlier run)
    pub cover_art_refreshed: bool,
    /// Pages written (sitemap + front page + episode pages)
    pub pages_rendered: usize,
}

/// Build the site from the configured feed.
///
/// The pipeline runs strictly in order:
/// 1. Create the output directory tree
/// 2. Fetch and parse the feed
/// 3. Extract episodes
/// 4. Download audio files, one at a time (skip-on-exists)
/// 5. Download cover art and derive the thumbnail (skip-on-exists)
/// 6. Render sitemap, front page, and episode pages (always overwritten)
///
/// Any stage failure aborts the build; only "feed has no items / no
/// enclosures" degrades to an empty episode set.
pub async fn build_site<C: HttpClient>(
    client: &C,
    config: &Config,
    options: &BuildOptions,
    reporter: &SharedProgressReporter,
) -> Result<BuildSummary, BuildError> {
    make_output_dirs(&config.output_dir)?;

    reporter.report(ProgressEvent::FetchingFeed {
        url: config.feed_url.clone(),
    });

    let podcast = fetch_feed(client, &config.feed_url).await?;
    let episodes = extract_episodes(&podcast)?;

    reporter.report(ProgressEvent::FeedParsed {
        podcast_title: podcast.title.clone(),
        item_count: podcast.items.len(),
        episode_count: episodes.len(),
    });

    let audio_dir = config.output_dir.join(AUDIO_DIR);
    let total_episodes = episodes.len();
    let mut downloaded = 0;
    let mut skipped = 0;

    for (episode_index, episode) in episodes.iter().enumerate() {
        let outcome = download_audio(
            client,
            episode,
            &audio_dir,
            episode_index,
            total_episodes,
            reporter,
        )
        .await?;

        match outcome {
            AudioOutcome::Downloaded { .. } => downloaded += 1,
            AudioOutcome::AlreadyPresent => skipped += 1,
        }
    }

    let image_url = podcast
        .image_url
        .as_ref()
        .ok_or(BuildError::MissingCoverArt)?;
    let cover_outcome = download_cover_art(client, image_url, &config.output_dir, reporter).await?;

    // Pages are refreshed on every run, even when every asset was cached
    let renderer = Renderer::new(&options.template_dir, &config.theme_dir);
    renderer.render_sitemap(config, &episodes, &config.output_dir, reporter)?;
    renderer.render_front_page(config, &episodes, &podcast, &config.output_dir, reporter)?;
    let episode_pages =
        renderer.render_episodes(config, &episodes, &podcast, &config.output_dir, reporter)?;

    let pages_rendered = episode_pages + 2;

    reporter.report(ProgressEvent::BuildCompleted {
        downloaded_count: downloaded,
        skipped_count: skipped,
        pages_rendered,
    });

    Ok(BuildSummary {
        episode_count: total_episodes,
        downloaded,
        skipped,
        cover_art_refreshed: matches!(cover_outcome, CoverOutcome::Saved { .. }),
        pages_rendered,
    })
}

fn make_output_dirs(output_dir: &Path) -> Result<(), BuildError> {
    for dir in [
        output_dir.to_path_buf(),
        output_dir.join(AUDIO_DIR),
        output_dir.join(EPISODE_DIR),
    ] {
        std::fs::create_dir_all(&dir)
            .map_err(|e| BuildError::CreateDirectoryFailed { path: dir, source: e })?;
    }
    Ok(())
}

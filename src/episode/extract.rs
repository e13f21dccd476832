use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use url::Url;

use crate::error::FeedError;
use crate::feed::{Enclosure, FeedItem, Podcast};

use super::markup::markdown_to_html;
use super::slug::slugify;

/// An episode derived from an enclosure-bearing feed item
#[derive(Debug, Clone, Serialize)]
pub struct Episode {
    pub title: String,
    /// Show notes rendered to HTML, bare URLs and emails turned into links
    pub description: Option<String>,
    pub pub_date: Option<DateTime<FixedOffset>>,
    pub guid: Option<String>,
    pub duration: Option<String>,
    /// Resolved URL the audio file is downloaded from
    pub audio_url: Url,
    /// Local file name: the final path segment of the audio URL
    pub file_name: String,
    /// URL-safe directory name for the episode page
    pub slug: String,
    /// Original enclosure metadata as it appeared in the feed
    pub enclosure: Enclosure,
}

/// Derive episodes from the feed's item list, preserving feed order.
///
/// Items without an enclosure are dropped silently; an empty item list
/// yields an empty vector. An enclosure that is present but malformed
/// (unparseable URL, audio URL without a file name) is an error rather
/// than a silent drop.
pub fn extract_episodes(podcast: &Podcast) -> Result<Vec<Episode>, FeedError> {
    let mut episodes = Vec::new();

    for item in &podcast.items {
        let Some(enclosure) = &item.enclosure else {
            continue;
        };

        let episode = derive_episode(item, enclosure)?;
        episodes.push(episode);
    }

    Ok(episodes)
}

fn derive_episode(item: &FeedItem, enclosure: &Enclosure) -> Result<Episode, FeedError> {
    let audio_url =
        Url::parse(&enclosure.url).map_err(|e| FeedError::InvalidEnclosureUrl {
            title: item.title.clone(),
            source: e,
        })?;

    let file_name = file_name_from_url(&audio_url)
        .ok_or_else(|| FeedError::MissingFileName {
            url: audio_url.to_string(),
        })?
        .to_string();

    Ok(Episode {
        title: item.title.clone(),
        description: item.description.as_deref().map(markdown_to_html),
        pub_date: item.pub_date,
        guid: item.guid.clone(),
        duration: item.duration.clone(),
        slug: slugify(&item.title),
        file_name,
        audio_url,
        enclosure: enclosure.clone(),
    })
}

/// Final segment of the URL path; query string and fragment never appear here
fn file_name_from_url(url: &Url) -> Option<&str> {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|segment| !segment.is_empty())
}

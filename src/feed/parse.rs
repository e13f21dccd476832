// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use url::Url;

use crate::error::FeedError;

/// A parsed podcast feed: channel metadata plus the ordered item list.
///
/// Every field beyond the title is optional; no schema validation happens
/// here. Items without an enclosure are kept — whether an item becomes an
/// episode is decided during extraction, not parsing.
#[derive(Debug, Clone, Serialize)]
pub struct Podcast {
    pub title: String,
    pub description: Option<String>,
    pub link: Option<Url>,
    pub author: Option<String>,
    /// Cover art URL, from the channel image or the itunes extension
    pub image_url: Option<Url>,
    pub language: Option<String>,
    pub feed_url: Url,
    pub items: Vec<FeedItem>,
}

/// A raw channel item, straight from the feed
#[derive(Debug, Clone, Serialize)]
pub struct FeedItem {
    pub title: String,
    /// Show notes in whatever lightweight markup the feed author used
    pub description: Option<String>,
    pub pub_date: Option<DateTime<FixedOffset>>,
    pub guid: Option<String>,
    pub duration: Option<String>,
    pub enclosure: Option<Enclosure>,
}

/// The media attachment of an item, URL kept as the raw attribute value
#[derive(Debug, Clone, Serialize)]
pub struct Enclosure {
    pub url: String,
    pub length: Option<u64>,
    pub mime_type: Option<String>,
}

/// Parse RSS feed XML bytes into a Podcast struct
pub fn parse_feed(xml_bytes: &[u8], feed_url: Url) -> Result<Podcast, FeedError> {
    let channel = rss::Channel::read_from(xml_bytes)?;

    let items = channel.items().iter().map(parse_item).collect();

    let image_url = channel
        .image()
        .and_then(|img| Url::parse(img.url()).ok())
        .or_else(|| {
            channel
                .itunes_ext()
                .and_then(|ext| ext.image())
                .and_then(|url| Url::parse(url).ok())
        });

    let author = channel
        .itunes_ext()
        .and_then(|ext| ext.author().map(String::from))
        .or_else(|| channel.managing_editor().map(String::from));

    Ok(Podcast {
        title: channel.title().to_string(),
        description: Some(channel.description().to_string()).filter(|s| !s.is_empty()),
        link: Url::parse(channel.link()).ok(),
        author,
        image_url,
        language: channel.language().map(String::from),
        feed_url,
        items,
    })
}

fn parse_item(item: &rss::Item) -> FeedItem {
    let title = item
        .title()
        .map(String::from)
        .unwrap_or_else(|| "Untitled Episode".to_string());

    let enclosure = item.enclosure().map(|enc| Enclosure {
        url: enc.url().to_string(),
        length: enc.length().parse().ok(),
        mime_type: Some(enc.mime_type().to_string()).filter(|s| !s.is_empty()),
    });

    let pub_date = item.pub_date().and_then(|date_str| {
        DateTime::parse_from_rfc2822(date_str)
            .or_else(|_| parse_relaxed_date(date_str))
            .ok()
    });

    FeedItem {
        title,
        description: item.description().map(String::from),
        pub_date,
        guid: item.guid().map(|g| g.value().to_string()),
        duration: item
            .itunes_ext()
            .and_then(|ext| ext.duration().map(String::from)),
        enclosure,
    }
}

/// Try to parse dates that don't strictly conform to RFC 2822
fn parse_relaxed_date(date_str: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    // Try common alternative formats
    let formats = [
        "%a, %d %b %Y %H:%M:%S %z",
        "%Y-%m-%dT%H:%M:%S%:z",
        "%Y-%m-%d %H:%M:%S %z",
    ];

    for format in formats {
        if let Ok(dt) = DateTime::parse_from_str(date_str, format) {
            return Ok(dt);
        }
    }

    Err(chrono::DateTime::parse_from_rfc2822("invalid").unwrap_err())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:itunes="http://www.itunes.com/dtds/podcast-1.0.dtd">
  <channel>
    <title>Test Podcast</title>
    <description>A test podcast for unit testing</description>
    <link>https://example.com</link>
    <language>en-us</language>
    <itunes:author>Test Author</itunes:author>
    <itunes:image href="https://example.com/image.jpg"/>
    <item>
      <title>Episode 1</title>
      <description>First episode</description>
      <pubDate>Mon, 01 Jan 2024 12:00:00 +0000</pubDate>
      <guid>ep1-guid</guid>
      <enclosure url="https://example.com/ep1.mp3" length="1234567" type="audio/mpeg"/>
      <itunes:duration>30:00</itunes:duration>
    </item>
    <item>
      <title>Just an announcement</title>
      <description>No audio here</description>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn parse_feed_extracts_channel_metadata() {
        let feed_url = Url::parse("https://example.com/feed.xml").unwrap();
        let podcast = parse_feed(SAMPLE_FEED.as_bytes(), feed_url.clone()).unwrap();

        assert_eq!(podcast.title, "Test Podcast");
        assert_eq!(
            podcast.description,
            Some("A test podcast for unit testing".to_string())
        );
        assert_eq!(podcast.author, Some("Test Author".to_string()));
        assert_eq!(podcast.language, Some("en-us".to_string()));
        assert_eq!(
            podcast.image_url,
            Some(Url::parse("https://example.com/image.jpg").unwrap())
        );
        assert_eq!(podcast.feed_url, feed_url);
    }

    #[test]
    fn parse_feed_keeps_items_without_enclosure() {
        let feed_url = Url::parse("https://example.com/feed.xml").unwrap();
        let podcast = parse_feed(SAMPLE_FEED.as_bytes(), feed_url).unwrap();

        // Both items survive parsing; dropping happens at extraction
        assert_eq!(podcast.items.len(), 2);
        assert!(podcast.items[0].enclosure.is_some());
        assert!(podcast.items[1].enclosure.is_none());
    }

    #[test]
    fn parse_feed_reads_item_fields() {
        let feed_url = Url::parse("https://example.com/feed.xml").unwrap();
        let podcast = parse_feed(SAMPLE_FEED.as_bytes(), feed_url).unwrap();

        let item = &podcast.items[0];
        assert_eq!(item.title, "Episode 1");
        assert_eq!(item.guid, Some("ep1-guid".to_string()));
        assert_eq!(item.duration, Some("30:00".to_string()));
        assert!(item.pub_date.is_some());

        let enclosure = item.enclosure.as_ref().unwrap();
        assert_eq!(enclosure.url, "https://example.com/ep1.mp3");
        assert_eq!(enclosure.length, Some(1234567));
        assert_eq!(enclosure.mime_type, Some("audio/mpeg".to_string()));
    }

    #[test]
    fn parse_feed_defaults_missing_title() {
        let feed = r#"<?xml version="1.0"?>
<rss version="2.0">
  <channel>
    <title>Test</title>
    <description>Test</description>
    <item>
      <enclosure url="https://example.com/ep.mp3" type="audio/mpeg"/>
    </item>
  </channel>
</rss>"#;

        let feed_url = Url::parse("https://example.com/feed.xml").unwrap();
        let podcast = parse_feed(feed.as_bytes(), feed_url).unwrap();
        assert_eq!(podcast.items[0].title, "Untitled Episode");
    }

    #[test]
    fn parse_feed_handles_empty_channel() {
        let feed = r#"<?xml version="1.0"?>
<rss version="2.0">
  <channel>
    <title>Empty</title>
    <description>No items at all</description>
  </channel>
</rss>"#;

        let feed_url = Url::parse("https://example.com/feed.xml").unwrap();
        let podcast = parse_feed(feed.as_bytes(), feed_url).unwrap();
        assert!(podcast.items.is_empty());
    }

    #[test]
    fn parse_feed_rejects_malformed_xml() {
        let feed_url = Url::parse("https://example.com/feed.xml").unwrap();
        let result = parse_feed(b"this is not xml at all <<<", feed_url);
        assert!(matches!(result, Err(FeedError::ParseFailed(_))));
    }

    #[test]
    fn parse_feed_handles_unparseable_date() {
        let feed = r#"<?xml version="1.0"?>
<rss version="2.0">
  <channel>
    <title>Test</title>
    <description>Test</description>
    <item>
      <title>Weird Date</title>
      <pubDate>sometime last week</pubDate>
      <enclosure url="https://example.com/ep.mp3" type="audio/mpeg"/>
    </item>
  </channel>
</rss>"#;

        let feed_url = Url::parse("https://example.com/feed.xml").unwrap();
        let podcast = parse_feed(feed.as_bytes(), feed_url).unwrap();
        assert!(podcast.items[0].pub_date.is_none());
    }
}

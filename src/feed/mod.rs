mod fetch;
mod parse;

pub use fetch::fetch_feed;
pub use parse::{Enclosure, FeedItem, Podcast, parse_feed};

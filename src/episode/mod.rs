mod extract;
mod markup;
mod slug;

pub use extract::{Episode, extract_episodes};
pub use markup::markdown_to_html;
pub use slug::slugify;

use linkify::{LinkFinder, LinkKind};
use pulldown_cmark::{Event, LinkType, Options, Parser, Tag, TagEnd, html};

/// Render lightweight markup (markdown) to HTML.
///
/// Bare URLs and email addresses in plain text become links. Text that is
/// already inside a link, an image, or code is left untouched.
pub fn markdown_to_html(input: &str) -> String {
    let parser = Parser::new_ext(input, Options::empty());

    let mut events: Vec<Event> = Vec::new();
    // Depth of enclosing constructs whose text must not be linkified
    let mut protected_depth = 0usize;

    for event in parser {
        match event {
            Event::Start(tag @ (Tag::Link { .. } | Tag::Image { .. } | Tag::CodeBlock(_))) => {
                protected_depth += 1;
                events.push(Event::Start(tag));
            }
            Event::End(end @ (TagEnd::Link | TagEnd::Image | TagEnd::CodeBlock)) => {
                protected_depth = protected_depth.saturating_sub(1);
                events.push(Event::End(end));
            }
            Event::Text(text) if protected_depth == 0 => autolink_text(&text, &mut events),
            other => events.push(other),
        }
    }

    let mut output = String::new();
    html::push_html(&mut output, events.into_iter());
    output
}

/// Split a text run around detected URLs/emails, emitting link events
fn autolink_text<'a>(text: &str, events: &mut Vec<Event<'a>>) {
    let finder = LinkFinder::new();
    let mut cursor = 0;

    for link in finder.links(text) {
        if link.start() > cursor {
            events.push(Event::Text(text[cursor..link.start()].to_string().into()));
        }

        let dest = match link.kind() {
            LinkKind::Email => format!("mailto:{}", link.as_str()),
            _ => link.as_str().to_string(),
        };

        events.push(Event::Start(Tag::Link {
            link_type: LinkType::Autolink,
            dest_url: dest.into(),
            title: "".into(),
            id: "".into(),
        }));
        events.push(Event::Text(link.as_str().to_string().into()));
        events.push(Event::End(TagEnd::Link));

        cursor = link.end();
    }

    if cursor < text.len() {
        events.push(Event::Text(text[cursor..].to_string().into()));
    }
}

use crate::http_client;
use htmlescape::decode_html;
use rss::Channel;

/// Parsed wire representation of one feed document. Constructed per fetch,
/// discarded after ingestion.
#[derive(Debug, Eq, PartialEq)]
pub struct FetchedFeed {
    pub title: String,
    pub link: String,
    pub description: String,
    pub items: Vec<FetchedItem>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FetchedItem {
    pub title: String,
    pub link: Option<String>,
    pub description: Option<String>,
    /// Publish date exactly as the producer wrote it; normalized later.
    pub pub_date: Option<String>,
}

#[derive(Debug, Eq, PartialEq)]
pub enum FetchError {
    TransportError { msg: String },
    StatusError { status: u16 },
    ParseError { body: String, msg: String },
}

/// Fetches and parses the feed at `url`. No retries here; a failed fetch is
/// retried whenever the feed rotates to the front of the queue again.
pub fn fetch(url: &str) -> Result<FetchedFeed, FetchError> {
    let response = http_client::client()
        .get(url)
        .send()
        .map_err(|error| FetchError::TransportError {
            msg: format!("{:?}", error),
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::StatusError {
            status: status.as_u16(),
        });
    }

    let body = response.text().map_err(|error| FetchError::TransportError {
        msg: format!("{:?}", error),
    })?;

    match Channel::read_from(body.as_bytes()) {
        Ok(channel) => Ok(FetchedFeed::from(channel)),
        Err(error) => Err(FetchError::ParseError {
            msg: format!("{:?}", error),
            body,
        }),
    }
}

impl From<Channel> for FetchedFeed {
    fn from(channel: Channel) -> Self {
        let items = channel
            .items()
            .iter()
            .map(|item| FetchedItem {
                title: item.title().map_or_else(String::new, decode_entities),
                link: item.link().map(|s| s.to_string()),
                description: item.description().map(decode_entities),
                pub_date: item.pub_date().map(|s| s.to_string()),
            })
            .collect::<Vec<FetchedItem>>();

        FetchedFeed {
            title: decode_entities(channel.title()),
            link: channel.link().to_string(),
            description: decode_entities(channel.description()),
            items,
        }
    }
}

// Producers routinely double-encode entities; the XML parser already removed
// one layer, this removes the second. Text that isn't valid HTML-encoded
// data is passed through untouched.
fn decode_entities(raw: &str) -> String {
    decode_html(raw).unwrap_or_else(|_| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::{FetchError, FetchedFeed};
    use mockito::mock;
    use rss::Channel;
    use std::fs;
    use std::str::FromStr;

    #[test]
    fn it_converts_rss_channel_to_fetched_feed() {
        let xml_feed = fs::read_to_string("./tests/support/rss_feed_example.xml").unwrap();
        let channel = Channel::from_str(&xml_feed).unwrap();

        let fetched_feed: FetchedFeed = channel.into();

        assert_eq!(fetched_feed.title, "Caiman Sample Feed");
        assert_eq!(fetched_feed.description, "Research & development notes");
        assert_eq!(fetched_feed.items.len(), 2);

        let first_item = &fetched_feed.items[0];
        assert_eq!(first_item.title, "A");
        assert_eq!(
            first_item.link.as_deref(),
            Some("https://example.com/posts/a")
        );
        assert_eq!(first_item.description.as_deref(), Some("First & foremost"));
        assert_eq!(
            first_item.pub_date.as_deref(),
            Some("Mon, 02 Jan 2006 15:04:05 MST")
        );

        let second_item = &fetched_feed.items[1];
        assert_eq!(second_item.title, "B");
        assert_eq!(second_item.pub_date, None);
    }

    #[test]
    fn it_fetches_and_parses_a_feed() {
        let response = fs::read_to_string("./tests/support/rss_feed_example.xml").unwrap();
        let path = "/feed.xml";
        let _m = mock("GET", path)
            .with_status(200)
            .with_body(response)
            .create();
        let url = format!("{}{}", mockito::server_url(), path);

        let fetched_feed = super::fetch(&url).unwrap();

        assert_eq!(fetched_feed.items.len(), 2);
        assert_eq!(fetched_feed.title, "Caiman Sample Feed");
    }

    #[test]
    fn it_returns_status_error_on_not_found() {
        let path = "/missing.xml";
        let _m = mock("GET", path).with_status(404).create();
        let url = format!("{}{}", mockito::server_url(), path);

        let result = super::fetch(&url);

        assert_eq!(result, Err(FetchError::StatusError { status: 404 }));
    }

    #[test]
    fn it_returns_parse_error_with_the_raw_body() {
        let path = "/broken.xml";
        let _m = mock("GET", path)
            .with_status(200)
            .with_body("this is not a feed")
            .create();
        let url = format!("{}{}", mockito::server_url(), path);

        let result = super::fetch(&url);

        match result {
            Err(FetchError::ParseError { body, .. }) => {
                assert_eq!(body, "this is not a feed");
            }
            other => panic!("Expected a parse error, got {:?}", other),
        }
    }

    #[test]
    fn it_returns_transport_error_when_the_host_is_unreachable() {
        let result = super::fetch("http://127.0.0.1:1/feed.xml");

        assert!(matches!(
            result,
            Err(FetchError::TransportError { .. })
        ));
    }
}

/// Deep links: `?item=<id>` opens an item's detail view at startup
///
/// Accepted forms:
/// - full URL: `archive://browse?item=7`
/// - query string: `?item=7`
/// - bare pair: `item=7`

use url::Url;

use crate::state::data::ItemId;

/// Base of generated share links
pub const SHARE_BASE: &str = "archive://browse";

const ITEM_PARAM: &str = "item";

/// Extract the item id from a deep link.
/// Returns None when the parameter is missing or not a valid integer.
pub fn parse_item_id(link: &str) -> Option<ItemId> {
    let link = link.trim();

    let value = match Url::parse(link) {
        Ok(url) => url
            .query_pairs()
            .find(|(key, _)| key == ITEM_PARAM)
            .map(|(_, value)| value.into_owned()),
        Err(_) => {
            let query = link.strip_prefix('?').unwrap_or(link);
            url::form_urlencoded::parse(query.as_bytes())
                .find(|(key, _)| key == ITEM_PARAM)
                .map(|(_, value)| value.into_owned())
        }
    }?;

    value.trim().parse().ok()
}

/// Build the link that reopens `id` (e.g., `archive://browse?item=7`)
pub fn share_link(base: &str, id: ItemId) -> String {
    match Url::parse(base) {
        Ok(mut url) => {
            url.query_pairs_mut()
                .clear()
                .append_pair(ITEM_PARAM, &id.to_string());
            url.to_string()
        }
        Err(_) => format!("{}?{}={}", base, ITEM_PARAM, id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepted_forms() {
        assert_eq!(parse_item_id("archive://browse?item=7"), Some(7));
        assert_eq!(parse_item_id("https://archive.example.org/?view=grid&item=42"), Some(42));
        assert_eq!(parse_item_id("?item=12"), Some(12));
        assert_eq!(parse_item_id("item=3"), Some(3));
        assert_eq!(parse_item_id("  ?item=5  "), Some(5));
    }

    #[test]
    fn test_invalid_ids_are_ignored() {
        assert_eq!(parse_item_id("archive://browse"), None);
        assert_eq!(parse_item_id("archive://browse?item="), None);
        assert_eq!(parse_item_id("?item=abc"), None);
        assert_eq!(parse_item_id("?item=1.5"), None);
        assert_eq!(parse_item_id("?other=1"), None);
        assert_eq!(parse_item_id(""), None);
    }

    #[test]
    fn test_share_link_round_trips() {
        let link = share_link(SHARE_BASE, 31);
        assert_eq!(link, "archive://browse?item=31");
        assert_eq!(parse_item_id(&link), Some(31));

        let replaced = share_link("https://archive.example.org/?item=1", 2);
        assert_eq!(parse_item_id(&replaced), Some(2));
    }
}

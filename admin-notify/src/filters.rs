use admin_core::{Channel, NotificationQuery, NotificationStatus, ParseError};
use std::str::FromStr;

/// Search text plus the type and status facets. `None` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationFilters {
    pub search: String,
    pub notification_type: Option<Channel>,
    pub status: Option<NotificationStatus>,
}

impl NotificationFilters {
    pub fn to_query(&self, page: u32) -> NotificationQuery {
        let search = self.search.trim();
        NotificationQuery {
            page: page.max(1),
            search: (!search.is_empty()).then(|| search.to_string()),
            status: self.status,
            notification_type: self.notification_type,
        }
    }
}

/// Parse a select value where `all` (or blank) clears the facet.
pub fn parse_facet<T>(value: &str) -> Result<Option<T>, ParseError>
where
    T: FromStr<Err = ParseError>,
{
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    value.parse().map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_search_is_omitted() {
        let filters = NotificationFilters {
            search: "   ".to_string(),
            ..Default::default()
        };
        let query = filters.to_query(3);
        assert_eq!(query.page, 3);
        assert_eq!(query.search, None);
    }

    #[test]
    fn page_is_at_least_one() {
        assert_eq!(NotificationFilters::default().to_query(0).page, 1);
    }

    #[test]
    fn facets_flow_into_query() {
        let filters = NotificationFilters {
            search: " bonus ".to_string(),
            notification_type: Some(Channel::Email),
            status: Some(NotificationStatus::Failed),
        };

        let query = filters.to_query(1);
        assert_eq!(query.search.as_deref(), Some("bonus"));
        assert_eq!(query.notification_type, Some(Channel::Email));
        assert_eq!(query.status, Some(NotificationStatus::Failed));
    }

    #[test]
    fn all_clears_a_facet() {
        assert_eq!(parse_facet::<Channel>("all").unwrap(), None);
        assert_eq!(parse_facet::<Channel>("").unwrap(), None);
        assert_eq!(parse_facet::<Channel>("push").unwrap(), Some(Channel::Push));
        assert!(parse_facet::<NotificationStatus>("lost").is_err());
    }
}

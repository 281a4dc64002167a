pub mod client_services;
pub mod clients;
pub mod departments;
pub mod employees;
pub mod payments;
pub mod reports;
pub mod services;
pub mod views;

use sea_orm::Order;
use serde::Deserialize;

/// Query string shared by every list endpoint: `?search=..&status=..&sort=..`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub sort: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Date,
    Status,
    Amount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub key: SortKey,
    pub descending: bool,
}

impl SortOrder {
    pub fn asc(key: SortKey) -> Self {
        Self { key, descending: false }
    }

    pub fn desc(key: SortKey) -> Self {
        Self { key, descending: true }
    }

    pub fn order(&self) -> Order {
        if self.descending { Order::Desc } else { Order::Asc }
    }
}

impl ListQuery {
    /// Trimmed search text, `None` when blank.
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// `active` -> `Some(true)`, `inactive` -> `Some(false)`, anything else -> no filter.
    pub fn active_filter(&self) -> Option<bool> {
        match self.status.as_deref().map(str::trim) {
            Some(s) if s.eq_ignore_ascii_case("active") => Some(true),
            Some(s) if s.eq_ignore_ascii_case("inactive") => Some(false),
            _ => None,
        }
    }

    /// Parses `name`, `date`, `status`, `amount`, each optionally suffixed `_desc`.
    /// Unknown keys yield `None` so the caller applies its default ordering.
    pub fn sort_order(&self) -> Option<SortOrder> {
        let raw = self.sort.as_deref()?.trim().to_ascii_lowercase();
        let (key, descending) = match raw.strip_suffix("_desc") {
            Some(key) => (key.to_string(), true),
            None => (raw, false),
        };
        let key = match key.as_str() {
            "name" => SortKey::Name,
            "date" => SortKey::Date,
            "status" => SortKey::Status,
            "amount" => SortKey::Amount,
            _ => return None,
        };
        Some(SortOrder { key, descending })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(search: Option<&str>, status: Option<&str>, sort: Option<&str>) -> ListQuery {
        ListQuery {
            search: search.map(str::to_string),
            status: status.map(str::to_string),
            sort: sort.map(str::to_string),
        }
    }

    #[test]
    fn status_filter_parsing() {
        assert_eq!(query(None, Some("active"), None).active_filter(), Some(true));
        assert_eq!(query(None, Some("Inactive"), None).active_filter(), Some(false));
        assert_eq!(query(None, Some(""), None).active_filter(), None);
        assert_eq!(query(None, Some("all"), None).active_filter(), None);
        assert_eq!(query(None, None, None).active_filter(), None);
    }

    #[test]
    fn sort_parsing() {
        assert_eq!(
            query(None, None, Some("name_desc")).sort_order(),
            Some(SortOrder::desc(SortKey::Name))
        );
        assert_eq!(
            query(None, None, Some("date")).sort_order(),
            Some(SortOrder::asc(SortKey::Date))
        );
        assert_eq!(
            query(None, None, Some("status_desc")).sort_order(),
            Some(SortOrder::desc(SortKey::Status))
        );
        assert_eq!(query(None, None, Some("bogus")).sort_order(), None);
        assert_eq!(query(None, None, None).sort_order(), None);
    }

    #[test]
    fn blank_search_is_ignored() {
        assert_eq!(query(Some("  "), None, None).search_term(), None);
        assert_eq!(query(Some(" acme "), None, None).search_term(), Some("acme"));
    }
}

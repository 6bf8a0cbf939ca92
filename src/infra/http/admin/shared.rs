use std::error::Error as StdError;

use axum::http::StatusCode;
use serde::Deserialize;

use crate::application::error::HttpError;

/// Page selector for paginated admin listings. Absent, non-numeric or zero
/// values fall back to the first page.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct PageQuery {
    #[serde(default)]
    pub page: Option<String>,
}

impl PageQuery {
    pub fn page(&self) -> u32 {
        self.page
            .as_deref()
            .and_then(|value| value.parse::<u32>().ok())
            .filter(|page| *page > 0)
            .unwrap_or(1)
    }
}

pub(crate) fn service_unavailable(source: &'static str, err: &dyn StdError) -> HttpError {
    HttpError::from_error(
        source,
        StatusCode::SERVICE_UNAVAILABLE,
        "Service temporarily unavailable",
        err,
    )
}

#[cfg(test)]
mod tests {
    use super::PageQuery;

    fn query(raw: &str) -> PageQuery {
        PageQuery {
            page: Some(raw.to_string()),
        }
    }

    #[test]
    fn page_defaults_to_one() {
        assert_eq!(PageQuery::default().page(), 1);
        assert_eq!(query("0").page(), 1);
        assert_eq!(query("garbage").page(), 1);
        assert_eq!(query("7").page(), 7);
    }
}

use tracing::warn;

use super::domain::{ApplicationRecord, ReferenceEntry};
use crate::api::{ApiClient, ApiError};

/// Reference lists with no parent dependency, fetched once when the form
/// opens. Lists that failed to load stay empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceCatalog {
    pub states: Vec<ReferenceEntry>,
    pub question_categories: Vec<ReferenceEntry>,
    pub fee_categories: Vec<ReferenceEntry>,
    pub municipalities: Vec<ReferenceEntry>,
}

/// Fetch the four independent lists concurrently. A failure of any one is
/// logged and degraded to an empty list without blocking the others.
pub async fn load_catalog(client: &ApiClient) -> ReferenceCatalog {
    let (states, question_categories, fee_categories, municipalities) = tokio::join!(
        client.states(),
        client.pollution_types(),
        client.fees_categories(),
        client.municipalities(),
    );

    ReferenceCatalog {
        states: list_or_empty(states, "states"),
        question_categories: list_or_empty(question_categories, "question categories"),
        fee_categories: list_or_empty(fee_categories, "fee categories"),
        municipalities: list_or_empty(municipalities, "municipalities"),
    }
}

/// Fetch an existing application for edit hydration. Failure is logged and
/// treated as "nothing to hydrate"; the blank form remains usable.
pub async fn load_record(client: &ApiClient, id: &str) -> Option<ApplicationRecord> {
    match client.application(id).await {
        Ok(record) => Some(record),
        Err(error) => {
            warn!(application_id = id, %error, "failed to fetch application for editing");
            None
        }
    }
}

fn list_or_empty(
    result: Result<Vec<ReferenceEntry>, ApiError>,
    what: &str,
) -> Vec<ReferenceEntry> {
    match result {
        Ok(entries) => entries,
        Err(error) => {
            warn!(list = what, %error, "reference list fetch failed; leaving it empty");
            Vec::new()
        }
    }
}

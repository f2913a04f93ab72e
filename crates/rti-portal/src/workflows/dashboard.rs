//! Aggregate application counters for the signed-in user's dashboard.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::api::{ApiClient, ApiError};

/// Counts returned by `dashboard/dashboardCount`; wire names preserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardCounts {
    #[serde(rename = "applicationCount")]
    pub total: u64,
    #[serde(rename = "returnApplicationCount")]
    pub returned: u64,
    #[serde(rename = "refuseApplicationCount")]
    pub refused: u64,
    #[serde(rename = "pendingApplicationCount")]
    pub pending: u64,
    #[serde(rename = "disposeApplicationCount")]
    pub disposed: u64,
    #[serde(rename = "firstAppealCount")]
    pub first_appeals: u64,
    #[serde(rename = "secondAppealCount")]
    pub second_appeals: u64,
}

/// Counts plus the moment they were fetched, for display.
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    pub counts: DashboardCounts,
    pub refreshed_at: DateTime<Local>,
}

/// Fetch the current counts. An expired or missing session clears the
/// session store (forcing re-authentication) before the error propagates.
pub async fn refresh(client: &ApiClient) -> Result<DashboardSnapshot, ApiError> {
    match client.get::<DashboardCounts>("dashboard/dashboardCount", &[]).await {
        Ok(counts) => Ok(DashboardSnapshot {
            counts,
            refreshed_at: Local::now(),
        }),
        Err(error) => {
            if error.requires_reauthentication() {
                client.session().clear();
            }
            Err(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_parse_from_wire_names() {
        let counts: DashboardCounts = serde_json::from_str(
            r#"{
                "applicationCount": 120,
                "returnApplicationCount": 4,
                "refuseApplicationCount": 2,
                "pendingApplicationCount": 31,
                "disposeApplicationCount": 83,
                "firstAppealCount": 7,
                "secondAppealCount": 1
            }"#,
        )
        .expect("parses");
        assert_eq!(counts.total, 120);
        assert_eq!(counts.disposed, 83);
        assert_eq!(counts.second_appeals, 1);
    }
}

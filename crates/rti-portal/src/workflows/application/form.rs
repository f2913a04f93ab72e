use std::sync::Arc;

use tracing::{debug, warn};

use super::cascade::{Cascade, CascadeLevel, CascadeTicket, OptionListState};
use super::domain::{ApplicationDraft, ApplicationRecord, Area, QueryEntry, ReferenceEntry};
use super::loader::{self, ReferenceCatalog};
use super::submission::SubmissionBody;
use super::validation::{self, FieldError};
use super::visibility::FieldVisibility;
use crate::api::{ApiClient, ApiError};

/// Raised by [`ApplicationForm::submit`].
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("draft failed validation ({} field(s))", .0.len())]
    Validation(Vec<FieldError>),
    #[error("failed to encode submission body: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Single source of truth for the application form: the draft, the loaded
/// reference lists, and the dependent-selection cascade. All mutations go
/// through the handlers here so dependent state stays consistent.
pub struct ApplicationForm {
    client: Arc<ApiClient>,
    draft: ApplicationDraft,
    existing_id: Option<String>,
    catalog: ReferenceCatalog,
    cascade: Cascade,
}

impl ApplicationForm {
    /// Blank form with nothing fetched yet. Use [`ApplicationForm::load`]
    /// for the fully initialized variant.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            draft: ApplicationDraft::default(),
            existing_id: None,
            catalog: ReferenceCatalog::default(),
            cascade: Cascade::new(),
        }
    }

    /// Open the form: fetch the independent reference lists concurrently
    /// and, when an id is given, hydrate the draft from the persisted
    /// application. Any individual fetch failure degrades to an empty list
    /// (or a blank form) without blocking the rest.
    pub async fn load(client: Arc<ApiClient>, existing_id: Option<&str>) -> Self {
        let mut form = Self::new(client);
        form.catalog = loader::load_catalog(&form.client).await;

        if let Some(id) = existing_id {
            if let Some(record) = loader::load_record(&form.client, id).await {
                form.existing_id = Some(record.id.clone());
                form.draft = ApplicationDraft::from_record(&record);
            }
        }

        form
    }

    pub fn draft(&self) -> &ApplicationDraft {
        &self.draft
    }

    /// Direct access for plain text fields. Selections and the three
    /// toggles have dedicated handlers; writing them here bypasses the
    /// clearing rules.
    pub fn draft_mut(&mut self) -> &mut ApplicationDraft {
        &mut self.draft
    }

    pub fn is_edit(&self) -> bool {
        self.existing_id.is_some()
    }

    pub fn catalog(&self) -> &ReferenceCatalog {
        &self.catalog
    }

    pub fn districts(&self) -> &OptionListState {
        self.cascade.districts()
    }

    pub fn police_stations(&self) -> &OptionListState {
        self.cascade.police_stations()
    }

    pub fn post_offices(&self) -> &OptionListState {
        self.cascade.post_offices()
    }

    pub fn visibility(&self) -> FieldVisibility {
        FieldVisibility::derive(self.draft.area, self.draft.bpl, self.draft.fees_receive)
    }

    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        validation::validate(&self.draft)
    }

    /// Record the state selection, drop every downstream selection and
    /// list, and fetch the districts scoped to the new state.
    pub async fn select_state(&mut self, state_id: &str) {
        self.draft.state_id = state_id.to_string();
        self.draft.district_id.clear();
        self.draft.police_station_id.clear();
        self.draft.post_office_id.clear();

        let ticket = self.cascade.begin(CascadeLevel::District);
        let outcome = self.client.districts(state_id).await;
        self.finish_fetch(ticket, outcome);
    }

    pub async fn select_district(&mut self, district_id: &str) {
        self.draft.district_id = district_id.to_string();
        self.draft.police_station_id.clear();
        self.draft.post_office_id.clear();

        let ticket = self.cascade.begin(CascadeLevel::PoliceStation);
        let outcome = self.client.police_stations(district_id).await;
        self.finish_fetch(ticket, outcome);
    }

    pub async fn select_police_station(&mut self, police_station_id: &str) {
        self.draft.police_station_id = police_station_id.to_string();
        self.draft.post_office_id.clear();

        let ticket = self.cascade.begin(CascadeLevel::PostOffice);
        let outcome = self.client.post_offices(police_station_id).await;
        self.finish_fetch(ticket, outcome);
    }

    pub fn select_post_office(&mut self, post_office_id: &str) {
        self.draft.post_office_id = post_office_id.to_string();
    }

    fn finish_fetch(
        &mut self,
        ticket: CascadeTicket,
        outcome: Result<Vec<ReferenceEntry>, ApiError>,
    ) {
        let level = ticket.level();
        let outcome = match outcome {
            Ok(entries) => Ok(entries),
            Err(error) => {
                warn!(list = level.label(), %error, "dependent list fetch failed");
                Err(())
            }
        };
        if !self.cascade.complete(ticket, outcome) {
            debug!(list = level.label(), "dropping superseded fetch response");
        }
    }

    /// Switch between urban and rural, clearing the values of the group
    /// that just became inactive.
    pub fn set_area(&mut self, area: Area) {
        if self.draft.area == area {
            return;
        }
        self.draft.area = area;
        match area {
            Area::Rural => {
                self.draft.municipality_id.clear();
                self.draft.ward_no = None;
            }
            Area::Urban => {
                self.draft.village.clear();
                self.draft.panchayat.clear();
            }
        }
    }

    /// Toggle BPL status. Exactly one of the certificate requirement and
    /// the fees sub-record is active at a time.
    pub fn set_bpl(&mut self, bpl: bool) {
        if self.draft.bpl == bpl {
            return;
        }
        self.draft.bpl = bpl;
        if bpl {
            self.draft.fees_receive = false;
            self.draft.fees_type_id.clear();
            self.draft.total_fees = None;
            self.draft.fees_not_receive_reason.clear();
        } else {
            self.draft.bpl_file = None;
        }
    }

    pub fn set_fees_receive(&mut self, received: bool) {
        if self.draft.fees_receive == received {
            return;
        }
        self.draft.fees_receive = received;
        if received {
            self.draft.fees_not_receive_reason.clear();
        } else {
            self.draft.fees_type_id.clear();
            self.draft.total_fees = None;
        }
    }

    /// Append a blank question entry; always permitted.
    pub fn add_query(&mut self) {
        self.draft.applicant_query.push(QueryEntry::blank());
    }

    /// Remove the question at `index`. A no-op (returning `false`) when it
    /// would leave the list empty or the index is out of range: at least
    /// one question is mandatory at all times.
    pub fn remove_query(&mut self, index: usize) -> bool {
        if self.draft.applicant_query.len() <= 1 || index >= self.draft.applicant_query.len() {
            return false;
        }
        self.draft.applicant_query.remove(index);
        true
    }

    /// Validate, encode, and dispatch the draft: POST for a new
    /// application, PUT when editing an existing one. Success is decided by
    /// the application-level error code; nothing is retried automatically.
    pub async fn submit(&mut self) -> Result<ApplicationRecord, SubmitError> {
        self.validate().map_err(SubmitError::Validation)?;
        let body = SubmissionBody::encode(&self.draft)?;

        let record = match &self.existing_id {
            Some(id) => self.client.update_application(id, body).await?,
            None => self.client.create_application(body).await?,
        };
        Ok(record)
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry of a reference list (states, districts, municipalities, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    pub id: String,
    pub name: String,
}

/// Urban/rural split deciding which locality fields apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Area {
    Urban,
    Rural,
}

impl Area {
    pub const fn label(self) -> &'static str {
        match self {
            Area::Urban => "urban",
            Area::Rural => "rural",
        }
    }
}

/// One applicant question with its category. Wire names are preserved: the
/// category field is historically called `pollution_id` by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryEntry {
    pub query: String,
    pub pollution_id: String,
}

impl QueryEntry {
    pub fn blank() -> Self {
        Self {
            query: String::new(),
            pollution_id: String::new(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.query.trim().is_empty() && self.pollution_id.is_empty()
    }
}

/// File handle carried alongside the draft until submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAttachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// The in-progress application form state. Mutated only through the form
/// facade; serialized for submission by the submission module. The
/// attachment is runtime-only and never part of the serde representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationDraft {
    pub applicant_name: String,
    pub father_name: String,
    pub mobile_no: String,
    pub email: String,
    pub address: String,
    pub area: Area,
    pub block: String,
    pub village: String,
    pub panchayat: String,
    pub municipality_id: String,
    pub ward_no: Option<u32>,
    pub state_id: String,
    pub district_id: String,
    pub police_station_id: String,
    pub post_office_id: String,
    pub pincode: String,
    pub applicant_query: Vec<QueryEntry>,
    pub bpl: bool,
    #[serde(skip)]
    pub bpl_file: Option<FileAttachment>,
    pub fees_receive: bool,
    pub fees_type_id: String,
    pub total_fees: Option<f64>,
    pub fees_not_receive_reason: String,
}

impl Default for ApplicationDraft {
    fn default() -> Self {
        Self {
            applicant_name: String::new(),
            father_name: String::new(),
            mobile_no: String::new(),
            email: String::new(),
            address: String::new(),
            area: Area::Urban,
            block: String::new(),
            village: String::new(),
            panchayat: String::new(),
            municipality_id: String::new(),
            ward_no: None,
            state_id: String::new(),
            district_id: String::new(),
            police_station_id: String::new(),
            post_office_id: String::new(),
            pincode: String::new(),
            applicant_query: vec![QueryEntry::blank()],
            bpl: false,
            bpl_file: None,
            fees_receive: false,
            fees_type_id: String::new(),
            total_fees: None,
            fees_not_receive_reason: String::new(),
        }
    }
}

impl ApplicationDraft {
    /// Hydrate a draft from a persisted application for editing. The server
    /// never returns the uploaded certificate bytes, so `bpl_file` starts
    /// empty even for BPL applications.
    pub fn from_record(record: &ApplicationRecord) -> Self {
        let applicant_query = if record.applicant_query.is_empty() {
            vec![QueryEntry::blank()]
        } else {
            record.applicant_query.clone()
        };

        Self {
            applicant_name: record.applicant_name.clone(),
            father_name: record.father_name.clone(),
            mobile_no: record.mobile_no.clone(),
            email: record.email.clone(),
            address: record.address.clone(),
            area: record.area,
            block: record.block.clone().unwrap_or_default(),
            village: record.village.clone().unwrap_or_default(),
            panchayat: record.panchayat.clone().unwrap_or_default(),
            municipality_id: record.municipality_id.clone().unwrap_or_default(),
            ward_no: record.ward_no,
            state_id: record.state_id.clone(),
            district_id: record.district_id.clone(),
            police_station_id: record.police_station_id.clone().unwrap_or_default(),
            post_office_id: record.post_office_id.clone().unwrap_or_default(),
            pincode: record.pincode.clone(),
            applicant_query,
            bpl: record.bpl,
            bpl_file: None,
            fees_receive: record.fees_receive,
            fees_type_id: record.fees_type_id.clone().unwrap_or_default(),
            total_fees: record.total_fees,
            fees_not_receive_reason: record.fees_not_receive_reason.clone().unwrap_or_default(),
        }
    }
}

/// A persisted application as returned by `applications/<id>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub id: String,
    pub applicant_name: String,
    pub father_name: String,
    pub mobile_no: String,
    pub email: String,
    pub address: String,
    pub area: Area,
    #[serde(default)]
    pub block: Option<String>,
    #[serde(default)]
    pub village: Option<String>,
    #[serde(default)]
    pub panchayat: Option<String>,
    #[serde(default)]
    pub municipality_id: Option<String>,
    #[serde(default)]
    pub ward_no: Option<u32>,
    pub state_id: String,
    pub district_id: String,
    #[serde(default)]
    pub police_station_id: Option<String>,
    #[serde(default)]
    pub post_office_id: Option<String>,
    pub pincode: String,
    #[serde(default)]
    pub applicant_query: Vec<QueryEntry>,
    pub bpl: bool,
    pub fees_receive: bool,
    #[serde(default)]
    pub fees_type_id: Option<String>,
    #[serde(default)]
    pub total_fees: Option<f64>,
    #[serde(default)]
    pub fees_not_receive_reason: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

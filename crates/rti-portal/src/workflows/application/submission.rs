use super::domain::{ApplicationDraft, FileAttachment};

/// Transport-agnostic description of the multipart request body: scalar
/// fields stringified, the query list JSON-serialized as one field, and the
/// optional certificate carried as a binary part. The API client turns this
/// into an actual multipart form.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionBody {
    pub fields: Vec<(&'static str, String)>,
    pub file: Option<FileAttachment>,
}

impl SubmissionBody {
    pub fn encode(draft: &ApplicationDraft) -> Result<Self, serde_json::Error> {
        let query_json = serde_json::to_string(&draft.applicant_query)?;

        let fields = vec![
            ("applicant_name", draft.applicant_name.clone()),
            ("father_name", draft.father_name.clone()),
            ("mobile_no", draft.mobile_no.clone()),
            ("email", draft.email.clone()),
            ("address", draft.address.clone()),
            ("area", draft.area.label().to_string()),
            ("block", draft.block.clone()),
            ("village", draft.village.clone()),
            ("panchayat", draft.panchayat.clone()),
            ("municipality_id", draft.municipality_id.clone()),
            ("ward_no", option_to_string(draft.ward_no)),
            ("state_id", draft.state_id.clone()),
            ("district_id", draft.district_id.clone()),
            ("police_station_id", draft.police_station_id.clone()),
            ("post_office_id", draft.post_office_id.clone()),
            ("pincode", draft.pincode.clone()),
            ("applicant_query", query_json),
            ("bpl", draft.bpl.to_string()),
            ("fees_receive", draft.fees_receive.to_string()),
            ("fees_type_id", draft.fees_type_id.clone()),
            ("total_fees", option_to_string(draft.total_fees)),
            ("fees_not_receive_reason", draft.fees_not_receive_reason.clone()),
        ];

        Ok(Self {
            fields,
            file: draft.bpl_file.clone(),
        })
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value.as_str())
    }
}

fn option_to_string<T: ToString>(value: Option<T>) -> String {
    value.map(|value| value.to_string()).unwrap_or_default()
}

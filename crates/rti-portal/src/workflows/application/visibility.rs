use super::domain::Area;

/// Which optional field groups apply, derived from the three toggles.
/// Never stored on the draft; recompute whenever a toggle changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldVisibility {
    /// village + panchayat
    pub rural_fields: bool,
    /// municipality + ward number
    pub urban_fields: bool,
    /// BPL certificate upload
    pub bpl_certificate: bool,
    /// fees_receive toggle and its dependents
    pub fees_section: bool,
    /// fee type + total fees
    pub fee_amount_fields: bool,
    /// reason for non-receipt
    pub non_receipt_reason: bool,
}

impl FieldVisibility {
    pub fn derive(area: Area, bpl: bool, fees_receive: bool) -> Self {
        let fees_section = !bpl;
        Self {
            rural_fields: area == Area::Rural,
            urban_fields: area == Area::Urban,
            bpl_certificate: bpl,
            fees_section,
            fee_amount_fields: fees_section && fees_receive,
            non_receipt_reason: fees_section && !fees_receive,
        }
    }
}

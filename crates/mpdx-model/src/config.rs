//! Import configuration supplied by the API's constants collaborator.
//!
//! Passed explicitly into the transforms and the service instead of being
//! read from ambient state.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{ConstantDescriptor, ConstantId, FieldId, ModelError};

/// Supported/required headers and the constants published for each field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Field id -> display label of every header the import accepts.
    pub supported_headers: IndexMap<FieldId, String>,

    /// Fields that must be mapped before leaving the headers step.
    pub required_headers: Vec<FieldId>,

    /// Constants keyed by the API's camel-cased name (`sendAppeals`).
    pub constants: IndexMap<String, Vec<ConstantDescriptor>>,
}

impl ImportConfig {
    pub fn is_supported(&self, field: &FieldId) -> bool {
        self.supported_headers.contains_key(field)
    }

    /// Fails with [`ModelError::UnsupportedField`] unless `field` is supported.
    pub fn check_supported(&self, field: &FieldId) -> Result<(), ModelError> {
        if self.is_supported(field) {
            Ok(())
        } else {
            Err(ModelError::UnsupportedField(field.clone()))
        }
    }

    pub fn label(&self, field: &FieldId) -> Option<&str> {
        self.supported_headers.get(field).map(String::as_str)
    }

    /// Constants for `field`, matched case-insensitively on its camel-cased name.
    pub fn constants_for(&self, field: &FieldId) -> Option<&[ConstantDescriptor]> {
        let key = field.camel_case();
        self.constants
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(&key))
            .map(|(_, constants)| constants.as_slice())
    }

    pub fn has_constants(&self, field: &FieldId) -> bool {
        self.constants_for(field).is_some()
    }

    /// True when every constant published for `field` is a boolean.
    pub fn is_boolean_field(&self, field: &FieldId) -> bool {
        self.constants_for(field).is_some_and(|constants| {
            !constants.is_empty() && constants.iter().all(|c| c.id.as_bool().is_some())
        })
    }

    /// MPDX's contact import defaults.
    pub fn mpdx_defaults() -> Self {
        let supported_headers = [
            ("church", "Church"),
            ("city", "City"),
            ("pledge_amount", "Commitment Amount"),
            ("pledge_currency", "Commitment Currency"),
            ("pledge_frequency", "Commitment Frequency"),
            ("country", "Country"),
            ("email_1", "Email 1"),
            ("email_2", "Email 2"),
            ("envelope_greeting", "Envelope Greeting"),
            ("first_name", "First Name"),
            ("full_name", "Full Name"),
            ("greeting", "Greeting"),
            ("last_name", "Last Name"),
            ("likely_to_give", "Likely To Give"),
            ("metro_area", "Metro Area"),
            ("newsletter", "Newsletter"),
            ("notes", "Notes"),
            ("phone_1", "Phone 1"),
            ("phone_2", "Phone 2"),
            ("phone_3", "Phone 3"),
            ("referred_by", "Referred By"),
            ("region", "Region"),
            ("send_appeals", "Send Appeals?"),
            ("spouse_email", "Spouse Email"),
            ("spouse_first_name", "Spouse First Name"),
            ("spouse_last_name", "Spouse Last Name"),
            ("spouse_phone", "Spouse Phone"),
            ("state", "State"),
            ("status", "Status"),
            ("street", "Street"),
            ("tags", "Tags"),
            ("website", "Website"),
            ("zip", "Zip"),
        ]
        .into_iter()
        .map(|(id, label)| (known_field(id), label.to_string()))
        .collect();

        let required_headers = vec![known_field("first_name"), known_field("last_name")];

        let mut constants = IndexMap::new();
        constants.insert(
            "newsletter".to_string(),
            descriptors(&[
                ("Physical", "Physical"),
                ("Email", "Email"),
                ("Both", "Both"),
                ("None", "None"),
            ]),
        );
        constants.insert(
            "sendAppeals".to_string(),
            vec![
                ConstantDescriptor::new(true, "Yes"),
                ConstantDescriptor::new(false, "No"),
            ],
        );
        constants.insert(
            "status".to_string(),
            descriptors(&[
                ("Never Contacted", "Never Contacted"),
                ("Ask in Future", "Ask in Future"),
                ("Cultivate Relationship", "Cultivate Relationship"),
                ("Contact for Appointment", "Contact for Appointment"),
                ("Appointment Scheduled", "Appointment Scheduled"),
                ("Call for Decision", "Call for Decision"),
                ("Partner - Financial", "Partner - Financial"),
                ("Partner - Special", "Partner - Special"),
                ("Partner - Pray", "Partner - Pray"),
                ("Not Interested", "Not Interested"),
                ("Unresponsive", "Unresponsive"),
                ("Never Ask", "Never Ask"),
                ("Research Abandoned", "Research Abandoned"),
                ("Expired Referral", "Expired Referral"),
            ]),
        );
        constants.insert(
            "pledgeCurrency".to_string(),
            descriptors(&[
                ("USD", "US Dollar"),
                ("CAD", "Canadian Dollar"),
                ("EUR", "Euro"),
                ("GBP", "British Pound"),
                ("AUD", "Australian Dollar"),
                ("NZD", "New Zealand Dollar"),
            ]),
        );
        constants.insert(
            "pledgeFrequency".to_string(),
            descriptors(&[
                ("0.23076923076923", "Weekly"),
                ("0.46153846153846", "Every 2 Weeks"),
                ("1.0", "Monthly"),
                ("2.0", "Every 2 Months"),
                ("3.0", "Quarterly"),
                ("4.0", "Every 4 Months"),
                ("6.0", "Every 6 Months"),
                ("12.0", "Annual"),
                ("24.0", "Every 2 Years"),
            ]),
        );
        constants.insert(
            "likelyToGive".to_string(),
            descriptors(&[
                ("Least Likely", "Least Likely"),
                ("Likely", "Likely"),
                ("Most Likely", "Most Likely"),
            ]),
        );

        Self {
            supported_headers,
            required_headers,
            constants,
        }
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self::mpdx_defaults()
    }
}

fn known_field(id: &'static str) -> FieldId {
    FieldId::from_static(id)
}

fn descriptors(pairs: &[(&str, &str)]) -> Vec<ConstantDescriptor> {
    pairs
        .iter()
        .map(|(id, label)| ConstantDescriptor::new(ConstantId::Value((*id).to_string()), *label))
        .collect()
}

//! Firmware/configuration update notice parsing (command `U0`).
//!
//! After boot, locks describe their firmware to the server: payload
//! version, hardware revision, build date. The field layout varies
//! between firmware builds, so the report is kept fully opaque and the
//! fields are preserved in order for logging and fleet inventory.
//!
//! # Message Format
//!
//! ```text
//! *CMDR,OM,<IMEI>,<TIMESTAMP>,U0[,<FIELD>...]#
//! ```
//!
//! A typical trace carries three fields (`68,A1,Mar 13 2020`), but zero
//! fields is also legal.
//!
//! # Examples
//!
//! ```
//! use lockwire_protocol::commands::update::UpdateReport;
//!
//! let fields = ["68", "A1", "Mar 13 2020"];
//! let report = UpdateReport::parse(&fields).unwrap();
//! assert_eq!(report.fields().len(), 3);
//! assert_eq!(report.fields()[2].as_str(), "Mar 13 2020");
//! ```

use crate::field::RawToken;
use lockwire_core::Result;
use serde::{Deserialize, Serialize};

/// Firmware/configuration notice with an opaque field list.
///
/// No minimum field count is enforced; builds have been seen reporting
/// anywhere from zero to four fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateReport {
    fields: Vec<RawToken>,
}

impl UpdateReport {
    /// Create a new update report from pre-validated tokens.
    #[must_use]
    pub fn new(fields: Vec<RawToken>) -> Self {
        Self { fields }
    }

    /// Parse an update report from command data fields.
    ///
    /// Every field is kept, in order, without interpretation.
    ///
    /// # Errors
    ///
    /// Returns error if any field contains reserved or non-ASCII bytes.
    pub fn parse(fields: &[&str]) -> Result<Self> {
        let fields = fields
            .iter()
            .map(|field| RawToken::new((*field).to_string()))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { fields })
    }

    /// Get the report fields in wire order.
    #[must_use]
    pub fn fields(&self) -> &[RawToken] {
        &self.fields
    }

    /// Returns the number of fields carried.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the report carried no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

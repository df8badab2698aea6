//! Wire types for the hosted store's records API.

use serde::{Deserialize, Serialize};

use crate::application::gateway::TableRow;
use crate::domain::posts::PostFields;

/// A record as the store returns it. `created_time` and other envelope
/// members are ignored; only the key and the field bag matter here.
#[derive(Debug, Deserialize)]
pub struct Record {
    pub id: String,
    #[serde(default)]
    pub fields: PostFields,
}

impl Record {
    pub fn into_row(self) -> TableRow {
        TableRow {
            record_key: self.id,
            fields: self.fields,
        }
    }
}

/// One page of a list query, with the continuation token when more follow.
#[derive(Debug, Deserialize)]
pub struct RecordList {
    #[serde(default)]
    pub records: Vec<Record>,
    #[serde(default)]
    pub offset: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NewRecord {
    pub fields: PostFields,
}

#[derive(Debug, Serialize)]
pub struct CreateRecords {
    pub records: Vec<NewRecord>,
}

#[derive(Debug, Serialize)]
pub struct UpdateRecord {
    pub fields: PostFields,
}

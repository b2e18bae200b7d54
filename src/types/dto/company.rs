use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::company;

/// Company row as returned by the API and export documents
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct CompanyOut {
    pub id: i32,
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
}

impl From<company::Model> for CompanyOut {
    fn from(c: company::Model) -> Self {
        Self {
            id: c.id,
            name: c.name,
            address: c.address,
            phone: c.phone,
            email: c.email,
            notes: c.notes,
        }
    }
}

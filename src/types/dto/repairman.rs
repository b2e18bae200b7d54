use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::repairman;

/// Repairman row as returned by the API and export documents
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct RepairmanOut {
    pub id: i32,
    pub first_name: Option<String>,
    pub surname: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub specialization: Option<String>,
    pub company_id: Option<i32>,
}

impl From<repairman::Model> for RepairmanOut {
    fn from(r: repairman::Model) -> Self {
        Self {
            id: r.id,
            first_name: r.first_name,
            surname: r.surname,
            email: r.email,
            phone: r.phone,
            specialization: r.specialization,
            company_id: r.company_id,
        }
    }
}

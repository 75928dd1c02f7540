use serde::Deserialize;
use ts_rs::TS;

use crate::errors::Result;
use crate::utils::validate::validate_required;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct CreateSubjectRequest {
    pub name: String,
    pub code: String,
}

impl CreateSubjectRequest {
    pub fn validate(self) -> Result<Self> {
        Ok(Self {
            name: validate_required("name", self.name)?,
            code: validate_required("code", self.code)?,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct UpdateSubjectRequest {
    pub name: Option<String>,
    pub code: Option<String>,
}

impl UpdateSubjectRequest {
    pub fn validate(self) -> Result<Self> {
        Ok(Self {
            name: self.name.map(|v| validate_required("name", v)).transpose()?,
            code: self.code.map(|v| validate_required("code", v)).transpose()?,
        })
    }
}

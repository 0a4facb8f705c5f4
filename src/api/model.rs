use crate::dls_file::LastUpdate;
use serde::Serialize;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(super) struct UpdateResult {
    pub status: &'static str,
    pub message: &'static str,
    pub last_update: LastUpdate,
}

impl UpdateResult {
    pub fn success(last_update: LastUpdate) -> Self {
        Self {
            status: "success",
            message: "Text successfully updated",
            last_update,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(super) struct StatusResult {
    pub status: &'static str,
    /// The configured target path, lossily converted if it isn't valid UTF-8.
    pub target: String,
    pub last_update: LastUpdate,
}

impl StatusResult {
    pub fn online(target: String, last_update: LastUpdate) -> Self {
        Self {
            status: "online",
            target,
            last_update,
        }
    }
}

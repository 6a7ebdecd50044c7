use crate::filter::StatusFilter;
use serde::{Deserialize, Serialize};

/// REST API list wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    pub total: usize,
}

impl<T> From<Vec<T>> for ListResponse<T> {
    fn from(data: Vec<T>) -> Self {
        let total = data.len();
        Self { data, total }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SwitchResponse {
    pub scheduled: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub refreshed: bool,
}

/// Per-request overrides for the device list
#[derive(Debug, Default, Deserialize)]
pub struct DeviceListParams {
    pub status: Option<StatusFilter>,
    pub search: Option<String>,
}

//! JSON bodies exchanged with the accounting service.
//!
//! The service expects every numeric or identifier field as a string, so the
//! request structs hold `String`s built from the typed domain values rather
//! than the values themselves.

use serde::{Deserialize, Serialize};

use crate::{Count, JobId, ProjectId, ServiceSubtype, ServiceType, Timestamp};

/// Path of the one-shot reservation endpoint, relative to the base URL.
pub const ONESHOT_RESERVATION_PATH: &str = "/reservation/oneshot";

/// Path of the one-shot usage endpoint, relative to the base URL.
pub const ONESHOT_USAGE_PATH: &str = "/usage/oneshot";

/// Body of `POST /reservation/oneshot`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneshotReservationRequest {
    #[serde(rename = "type")]
    pub service_type: ServiceType,
    pub subtype: ServiceSubtype,
    pub proj_id: String,
    pub count: String,
}

impl OneshotReservationRequest {
    pub fn new(subtype: ServiceSubtype, proj_id: ProjectId, count: Count) -> Self {
        Self {
            service_type: ServiceType::Oneshot,
            subtype,
            proj_id: proj_id.to_string(),
            count: count.to_wire(),
        }
    }
}

/// Body of `POST /usage/oneshot`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneshotUsageRequest {
    #[serde(rename = "type")]
    pub service_type: ServiceType,
    pub subtype: ServiceSubtype,
    pub proj_id: String,
    pub count: String,
    pub job_id: String,
    pub timestamp: String,
}

impl OneshotUsageRequest {
    pub fn new(
        subtype: ServiceSubtype,
        proj_id: ProjectId,
        count: Count,
        job_id: JobId,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            service_type: ServiceType::Oneshot,
            subtype,
            proj_id: proj_id.to_string(),
            count: count.to_wire(),
            job_id: job_id.to_string(),
            timestamp: timestamp.to_wire(),
        }
    }
}

/// Successful reservation reply. Fields other than `job_id` are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ReservationResponse {
    pub job_id: JobId,
}

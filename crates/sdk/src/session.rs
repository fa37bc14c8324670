//! State carried by a one-shot session through both of its phases.

use accounting::{
    Count, JobId, OneshotReservationRequest, OneshotUsageRequest, ProjectId, ServiceSubtype,
    Timestamp,
};
use tracing::{info, Span};

#[derive(Debug)]
pub(crate) struct OneshotParams {
    pub(crate) subtype: ServiceSubtype,
    pub(crate) proj_id: ProjectId,
    pub(crate) count: Count,
    pub(crate) span: Span,
}

impl OneshotParams {
    pub(crate) fn new(subtype: ServiceSubtype, proj_id: ProjectId, count: Count) -> Self {
        let span = tracing::info_span!(
            "oneshot_session",
            subtype = %subtype,
            proj_id = %proj_id,
            job_id = tracing::field::Empty,
        );
        Self {
            subtype,
            proj_id,
            count,
            span,
        }
    }

    pub(crate) fn set_count(&mut self, value: Count) {
        if self.count != value {
            let _enter = self.span.enter();
            info!(previous = %self.count, new = %value, "Overriding previous count value");
        }
        self.count = value;
    }

    pub(crate) fn record_job(&self, job_id: JobId) {
        self.span.record("job_id", tracing::field::display(job_id));
    }

    pub(crate) fn reservation_body(&self) -> OneshotReservationRequest {
        OneshotReservationRequest::new(self.subtype, self.proj_id, self.count)
    }

    pub(crate) fn usage_body(&self, job_id: JobId) -> OneshotUsageRequest {
        OneshotUsageRequest::new(self.subtype, self.proj_id, self.count, job_id, Timestamp::now())
    }
}

//! Async one-shot sessions.
//!
//! A session is a typestate pair: [`OneshotSession`] before the reservation and
//! [`ActiveOneshotSession`] after it. Reserving twice or reporting usage without
//! a reservation cannot be expressed.

use accounting::{AccountingError, Count, JobId, ProjectId, ServiceSubtype};
use tracing::{debug, info, warn, Instrument};

use crate::session::OneshotParams;
use crate::transport::{self, Transport};

/// A one-shot session that has not reserved anything yet.
#[derive(Debug)]
pub struct OneshotSession {
    transport: Transport<reqwest::Client>,
    params: OneshotParams,
}

impl OneshotSession {
    pub(crate) fn new(
        transport: Transport<reqwest::Client>,
        subtype: ServiceSubtype,
        proj_id: ProjectId,
        count: Count,
    ) -> Self {
        Self {
            transport,
            params: OneshotParams::new(subtype, proj_id, count),
        }
    }

    /// The count that will be reserved.
    pub fn count(&self) -> Count {
        self.params.count
    }

    pub fn set_count(&mut self, count: impl Into<Count>) {
        self.params.set_count(count.into());
    }

    /// Reserves the current count for the project.
    ///
    /// Fails with [`AccountingError::InsufficientFunds`] when the service answers
    /// `402`, and with [`AccountingError::Reservation`] for any other failure.
    pub async fn reserve(self) -> Result<ActiveOneshotSession, AccountingError> {
        let job_id = match &self.transport {
            Transport::Disabled => {
                debug!(parent: &self.params.span, "Accounting disabled, skipping reservation");
                None
            }
            Transport::Http { client, endpoints } => {
                let span = self.params.span.clone();
                let job_id = make_reservation(client, endpoints.reservation(), &self.params)
                    .instrument(span)
                    .await?;
                self.params.record_job(job_id);
                Some(job_id)
            }
        };
        Ok(ActiveOneshotSession {
            transport: self.transport,
            params: self.params,
            job_id,
            finished: false,
        })
    }
}

/// A one-shot session holding a reservation.
///
/// Call [`finish`](Self::finish) once the billable work has succeeded. Dropping
/// the session instead sends no usage, which is the right outcome when the work
/// failed.
#[derive(Debug)]
pub struct ActiveOneshotSession {
    transport: Transport<reqwest::Client>,
    params: OneshotParams,
    job_id: Option<JobId>,
    finished: bool,
}

impl ActiveOneshotSession {
    /// The reserved job, or `None` for a null session.
    pub fn job_id(&self) -> Option<JobId> {
        self.job_id
    }

    /// The count that will be reported as usage.
    pub fn count(&self) -> Count {
        self.params.count
    }

    /// Replaces the estimate with the actual count before finishing.
    pub fn set_count(&mut self, count: impl Into<Count>) {
        self.params.set_count(count.into());
    }

    /// Reports the current count as usage for the reserved job.
    pub async fn finish(mut self) -> Result<(), AccountingError> {
        self.finished = true;
        let (Transport::Http { client, endpoints }, Some(job_id)) = (&self.transport, self.job_id)
        else {
            debug!(parent: &self.params.span, "Accounting disabled, skipping usage");
            return Ok(());
        };
        send_usage(client, endpoints.usage(), &self.params, job_id)
            .instrument(self.params.span.clone())
            .await
    }
}

impl Drop for ActiveOneshotSession {
    fn drop(&mut self) {
        if !self.finished && self.job_id.is_some() {
            warn!(parent: &self.params.span, "Session dropped before finish, not sending usage");
        }
    }
}

async fn make_reservation(
    client: &reqwest::Client,
    url: &str,
    params: &OneshotParams,
) -> Result<JobId, AccountingError> {
    info!(count = %params.count, "Making reservation");
    let response = client
        .post(url)
        .json(&params.reservation_body())
        .send()
        .await
        .map_err(|e| AccountingError::reservation_transport(url, e))?;
    transport::check_reservation_status(url, response.status())?;
    let body = response
        .bytes()
        .await
        .map_err(|e| AccountingError::reservation_transport(url, e))?;
    transport::parse_reservation(&body)
}

async fn send_usage(
    client: &reqwest::Client,
    url: &str,
    params: &OneshotParams,
    job_id: JobId,
) -> Result<(), AccountingError> {
    info!(count = %params.count, "Sending usage");
    let response = client
        .post(url)
        .json(&params.usage_body(job_id))
        .send()
        .await
        .map_err(|e| AccountingError::usage_transport(url, e))?;
    transport::check_usage_status(url, response.status())
}

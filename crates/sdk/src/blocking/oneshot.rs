//! Blocking one-shot sessions.
//!
//! Same typestate as the async sessions, plus [`OneshotSession::run`] for
//! wrapping a unit of work in a reservation and a usage report.

use accounting::{AccountingError, Count, JobId, ProjectId, ServiceSubtype};
use reqwest::blocking::Client;
use tracing::{debug, info, warn};

use crate::session::OneshotParams;
use crate::transport::{self, Transport};

/// A blocking one-shot session that has not reserved anything yet.
#[derive(Debug)]
pub struct OneshotSession {
    transport: Transport<Client>,
    params: OneshotParams,
}

impl OneshotSession {
    pub(crate) fn new(
        transport: Transport<Client>,
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
    pub fn reserve(self) -> Result<ActiveOneshotSession, AccountingError> {
        let job_id = match &self.transport {
            Transport::Disabled => {
                debug!(parent: &self.params.span, "Accounting disabled, skipping reservation");
                None
            }
            Transport::Http { client, endpoints } => {
                let _enter = self.params.span.enter();
                let job_id = make_reservation(client, endpoints.reservation(), &self.params)?;
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

    /// Runs `work` between a reservation and a usage report.
    ///
    /// Usage is sent only when `work` returns `Ok`. An `Err` from `work` is
    /// returned as-is and the reservation is left without usage.
    pub fn run<T, E, F>(self, work: F) -> Result<T, E>
    where
        F: FnOnce(&mut ActiveOneshotSession) -> Result<T, E>,
        E: From<AccountingError>,
    {
        let mut session = self.reserve()?;
        let value = work(&mut session)?;
        session.finish()?;
        Ok(value)
    }
}

/// A blocking one-shot session holding a reservation.
#[derive(Debug)]
pub struct ActiveOneshotSession {
    transport: Transport<Client>,
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
    pub fn finish(mut self) -> Result<(), AccountingError> {
        self.finished = true;
        let (Transport::Http { client, endpoints }, Some(job_id)) = (&self.transport, self.job_id)
        else {
            debug!(parent: &self.params.span, "Accounting disabled, skipping usage");
            return Ok(());
        };
        let _enter = self.params.span.enter();
        send_usage(client, endpoints.usage(), &self.params, job_id)
    }
}

impl Drop for ActiveOneshotSession {
    fn drop(&mut self) {
        if !self.finished && self.job_id.is_some() {
            warn!(parent: &self.params.span, "Session dropped before finish, not sending usage");
        }
    }
}

fn make_reservation(
    client: &Client,
    url: &str,
    params: &OneshotParams,
) -> Result<JobId, AccountingError> {
    info!(count = %params.count, "Making reservation");
    let response = client
        .post(url)
        .json(&params.reservation_body())
        .send()
        .map_err(|e| AccountingError::reservation_transport(url, e))?;
    transport::check_reservation_status(url, response.status())?;
    let body = response
        .bytes()
        .map_err(|e| AccountingError::reservation_transport(url, e))?;
    transport::parse_reservation(&body)
}

fn send_usage(
    client: &Client,
    url: &str,
    params: &OneshotParams,
    job_id: JobId,
) -> Result<(), AccountingError> {
    info!(count = %params.count, "Sending usage");
    let response = client
        .post(url)
        .json(&params.usage_body(job_id))
        .send()
        .map_err(|e| AccountingError::usage_transport(url, e))?;
    transport::check_usage_status(url, response.status())
}

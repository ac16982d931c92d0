use std::cell::Cell;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::Duration;

use crate::config::model::BlurConfig;
use crate::foundation::core::PixelBuffer;
use crate::foundation::error::{BlurError, BlurResult};
use crate::render::backend::BlurBackend;
use crate::render::pipeline::blur_with_backend;

/// Identifier handed out by [`BlurWorker::submit`]. Later submissions get larger ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlurRequestId(pub u64);

/// What became of one request.
#[derive(Debug)]
pub enum BlurOutcome {
    /// The blurred image.
    Completed(PixelBuffer),
    /// The request failed; the caller's previous image should stay on screen.
    Failed(BlurError),
    /// A newer request replaced this one (only with [`BlurWorkerOpts::drop_stale`]).
    Superseded,
}

/// A response from the worker thread.
#[derive(Debug)]
pub struct BlurResponse {
    /// Request this answers.
    pub id: BlurRequestId,
    /// Result of the request.
    pub outcome: BlurOutcome,
}

/// Options for [`BlurWorker`].
#[derive(Clone, Debug)]
pub struct BlurWorkerOpts {
    /// Skip queued requests that a newer submission replaces, and report results that finish
    /// after a newer submission as [`BlurOutcome::Superseded`].
    pub drop_stale: bool,
    /// Bounded channel capacity for responses waiting to be received.
    pub response_capacity: usize,
}

impl Default for BlurWorkerOpts {
    fn default() -> Self {
        Self {
            drop_stale: false,
            response_capacity: 4,
        }
    }
}

struct Job {
    id: u64,
    pixels: PixelBuffer,
    config: BlurConfig,
}

/// A dedicated thread that blurs images for one logical view.
///
/// Requests run one at a time in submission order, so a view never has two convolutions in
/// flight. Submitting never waits for the work; responses are picked up with [`Self::recv`],
/// [`Self::try_recv`], [`Self::recv_timeout`] or [`Self::wait_latest`].
pub struct BlurWorker {
    jobs: Option<mpsc::Sender<Job>>,
    responses: Option<mpsc::Receiver<BlurResponse>>,
    latest: Arc<AtomicU64>,
    answered: Cell<u64>,
    next_id: u64,
    handle: Option<JoinHandle<()>>,
}

impl BlurWorker {
    /// Start the worker thread around `backend`.
    pub fn spawn(backend: Box<dyn BlurBackend>, opts: BlurWorkerOpts) -> BlurResult<Self> {
        let (jobs_tx, jobs_rx) = mpsc::channel::<Job>();
        let (resp_tx, resp_rx) =
            mpsc::sync_channel::<BlurResponse>(opts.response_capacity.max(1));
        let latest = Arc::new(AtomicU64::new(0));

        let worker_latest = Arc::clone(&latest);
        let drop_stale = opts.drop_stale;
        let handle = std::thread::Builder::new()
            .name("progblur-worker".to_owned())
            .spawn(move || worker_loop(backend, jobs_rx, resp_tx, worker_latest, drop_stale))
            .map_err(|e| {
                BlurError::unsupported_backend(format!("spawn blur worker thread: {e}"))
            })?;

        Ok(Self {
            jobs: Some(jobs_tx),
            responses: Some(resp_rx),
            latest,
            answered: Cell::new(0),
            next_id: 1,
            handle: Some(handle),
        })
    }

    /// Queue an image for blurring and return its id.
    pub fn submit(
        &mut self,
        pixels: PixelBuffer,
        config: BlurConfig,
    ) -> BlurResult<BlurRequestId> {
        let id = self.next_id;
        let jobs = self
            .jobs
            .as_ref()
            .ok_or_else(|| BlurError::unsupported_backend("blur worker is shut down"))?;
        jobs.send(Job { id, pixels, config }).map_err(|_| {
            BlurError::unsupported_backend("blur worker is not accepting requests")
        })?;
        self.latest.store(id, Ordering::Release);
        self.next_id += 1;
        Ok(BlurRequestId(id))
    }

    /// Most recently submitted request, if any.
    pub fn latest_request(&self) -> Option<BlurRequestId> {
        match self.latest.load(Ordering::Acquire) {
            0 => None,
            id => Some(BlurRequestId(id)),
        }
    }

    /// Whether `id` is the newest submission, i.e. its result is safe to display.
    pub fn is_current(&self, id: BlurRequestId) -> bool {
        self.latest.load(Ordering::Acquire) == id.0
    }

    /// Block until the next response arrives.
    pub fn recv(&self) -> BlurResult<BlurResponse> {
        let resp = self.receiver()?.recv().map_err(|_| disconnected())?;
        Ok(self.mark_answered(resp))
    }

    /// Return a response if one is ready.
    pub fn try_recv(&self) -> BlurResult<Option<BlurResponse>> {
        match self.receiver()?.try_recv() {
            Ok(resp) => Ok(Some(self.mark_answered(resp))),
            Err(mpsc::TryRecvError::Empty) => Ok(None),
            Err(mpsc::TryRecvError::Disconnected) => Err(disconnected()),
        }
    }

    /// Wait up to `timeout` for a response.
    pub fn recv_timeout(&self, timeout: Duration) -> BlurResult<Option<BlurResponse>> {
        match self.receiver()?.recv_timeout(timeout) {
            Ok(resp) => Ok(Some(self.mark_answered(resp))),
            Err(mpsc::RecvTimeoutError::Timeout) => Ok(None),
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(disconnected()),
        }
    }

    /// Drain responses until the newest submission is answered and return its image.
    ///
    /// Responses to older requests are discarded. Fails without blocking when the newest
    /// response was already taken by [`Self::recv`], [`Self::try_recv`] or
    /// [`Self::recv_timeout`].
    pub fn wait_latest(&self) -> BlurResult<PixelBuffer> {
        let latest = self
            .latest_request()
            .ok_or_else(|| BlurError::processing("no blur request has been submitted"))?;
        if self.answered.get() >= latest.0 {
            return Err(BlurError::processing(format!(
                "response to blur request {} was already received",
                latest.0
            )));
        }
        loop {
            let resp = self.recv()?;
            if resp.id != latest {
                continue;
            }
            return match resp.outcome {
                BlurOutcome::Completed(pixels) => Ok(pixels),
                BlurOutcome::Failed(err) => Err(err),
                BlurOutcome::Superseded => Err(BlurError::processing(
                    "newest blur request was reported as superseded",
                )),
            };
        }
    }

    fn mark_answered(&self, resp: BlurResponse) -> BlurResponse {
        self.answered.set(self.answered.get().max(resp.id.0));
        resp
    }

    fn receiver(&self) -> BlurResult<&mpsc::Receiver<BlurResponse>> {
        self.responses
            .as_ref()
            .ok_or_else(|| BlurError::unsupported_backend("blur worker is shut down"))
    }
}

impl Drop for BlurWorker {
    fn drop(&mut self) {
        // Disconnect both directions first so a worker blocked on a full response channel wakes.
        drop(self.jobs.take());
        drop(self.responses.take());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn disconnected() -> BlurError {
    BlurError::unsupported_backend("blur worker disconnected")
}

#[tracing::instrument(skip(backend, jobs, responses, latest))]
fn worker_loop(
    mut backend: Box<dyn BlurBackend>,
    jobs: mpsc::Receiver<Job>,
    responses: mpsc::SyncSender<BlurResponse>,
    latest: Arc<AtomicU64>,
    drop_stale: bool,
) {
    while let Ok(mut job) = jobs.recv() {
        if drop_stale {
            while let Ok(newer) = jobs.try_recv() {
                let skipped = BlurResponse {
                    id: BlurRequestId(job.id),
                    outcome: BlurOutcome::Superseded,
                };
                if responses.send(skipped).is_err() {
                    return;
                }
                job = newer;
            }
        }

        let outcome = match blur_with_backend(&job.pixels, &job.config, backend.as_mut()) {
            Ok(_) if drop_stale && latest.load(Ordering::Acquire) > job.id => {
                BlurOutcome::Superseded
            }
            Ok(pixels) => BlurOutcome::Completed(pixels),
            Err(err) => {
                tracing::warn!(id = job.id, error = %err, "blur request failed");
                BlurOutcome::Failed(err)
            }
        };
        tracing::debug!(id = job.id, "blur request answered");

        let resp = BlurResponse {
            id: BlurRequestId(job.id),
            outcome,
        };
        if responses.send(resp).is_err() {
            return;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/worker.rs"]
mod tests;

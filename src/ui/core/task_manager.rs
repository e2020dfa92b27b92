use super::actions::{Action, ListPayload, ListRequest};
use crate::api::{execute_submission, fetch_lookup, AgencyApi, Submission};
use crate::forms::Lookup;
use crate::session::Section;
use crate::utils::datetime;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub type TaskId = u64;

/// Requests running longer than this are reported in the logs
const LONG_RUNNING: Duration = Duration::from_secs(30);

#[derive(Debug)]
pub struct BackgroundTask {
    pub id: TaskId,
    pub handle: JoinHandle<()>,
    pub description: String,
    pub started_at: Instant,
    reported_slow: bool,
}

impl BackgroundTask {
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    pub fn is_long_running(&self) -> bool {
        self.elapsed() > LONG_RUNNING
    }
}

/// Runs API calls on the tokio runtime and reports back as [`Action`]s
pub struct TaskManager {
    api: Arc<dyn AgencyApi>,
    tasks: HashMap<TaskId, BackgroundTask>,
    next_task_id: TaskId,
    action_sender: mpsc::UnboundedSender<Action>,
}

impl TaskManager {
    pub fn new(api: Arc<dyn AgencyApi>) -> (Self, mpsc::UnboundedReceiver<Action>) {
        let (tx, rx) = mpsc::unbounded_channel();

        (
            Self {
                api,
                tasks: HashMap::new(),
                next_task_id: 1,
                action_sender: tx,
            },
            rx,
        )
    }

    fn spawn<Fut>(&mut self, description: String, future: Fut) -> TaskId
    where
        Fut: std::future::Future<Output = ()> + Send + 'static,
    {
        let task_id = self.next_task_id;
        self.next_task_id += 1;

        log::debug!("Task {}: {}", task_id, description);
        let task = BackgroundTask {
            id: task_id,
            handle: tokio::spawn(future),
            description,
            started_at: Instant::now(),
            reported_slow: false,
        };

        self.tasks.insert(task_id, task);
        task_id
    }

    /// Load a list for `section`; the generation comes back with the result
    pub fn spawn_list_load(&mut self, section: Section, generation: u64, request: ListRequest) -> TaskId {
        let api = Arc::clone(&self.api);
        let action_sender = self.action_sender.clone();
        let description = format!("Load {} (generation {})", section.title(), generation);

        self.spawn(description, async move {
            let result = match request {
                ListRequest::Clients(query) => api.list_clients(&query).await.map(ListPayload::Clients),
                ListRequest::Offers(query) => api.list_offers(&query).await.map(ListPayload::Offers),
                ListRequest::Tours(term) => api.list_tours(&term).await.map(ListPayload::Tours),
                ListRequest::ToursFiltered(filter) => {
                    let today = datetime::today();
                    api.list_tours_filtered(&filter)
                        .await
                        .map(|tours| ListPayload::Tours(filter.timeline.apply(tours, today)))
                }
            }
            .map_err(|e| {
                log::error!("Failed to load {}: {}", section.title(), e);
                e.to_string()
            });

            let _ = action_sender.send(Action::ListLoaded {
                section,
                generation,
                result,
            });
        })
    }

    /// Fetch classifier options for the form opened as `form`
    pub fn spawn_lookup(&mut self, form: u64, lookup: Lookup) -> TaskId {
        let api = Arc::clone(&self.api);
        let action_sender = self.action_sender.clone();
        let description = format!("Lookup {:?}", lookup.request);

        self.spawn(description, async move {
            let result = fetch_lookup(api.as_ref(), &lookup.request)
                .await
                .map_err(|e| e.to_string());
            let _ = action_sender.send(Action::LookupLoaded {
                form,
                ticket: lookup.ticket,
                result,
            });
        })
    }

    /// Send a form submission; `id` ties the answer to the dialog that asked
    pub fn spawn_submission(&mut self, id: u64, submission: Submission) -> TaskId {
        let api = Arc::clone(&self.api);
        let action_sender = self.action_sender.clone();
        let description = submission.description();

        self.spawn(description, async move {
            let failure = submission.failure_message();
            let action = match execute_submission(api.as_ref(), submission, datetime::today()).await {
                Ok(outcome) => Action::SubmissionCompleted { id, outcome },
                Err(e) => {
                    log::error!("{}: {}", failure, e);
                    Action::SubmissionFailed {
                        id,
                        message: format!("{}: {}", failure, e),
                    }
                }
            };
            let _ = action_sender.send(action);
        })
    }

    /// Drop finished tasks; returns how many were removed
    pub fn cleanup_finished_tasks(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|_, task| {
            if task.handle.is_finished() {
                return false;
            }
            if task.is_long_running() && !task.reported_slow {
                task.reported_slow = true;
                log::warn!("Task {} still running after {:?}: {}", task.id, task.elapsed(), task.description);
            }
            true
        });
        before - self.tasks.len()
    }

    /// Cancel all running tasks
    pub fn cancel_all_tasks(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.handle.abort();
        }
    }

    /// Get the number of active tasks
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }
}

impl Drop for TaskManager {
    fn drop(&mut self) {
        self.cancel_all_tasks();
    }
}

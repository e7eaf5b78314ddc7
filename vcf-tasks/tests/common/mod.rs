//! Shared test utilities for vcf-tasks integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use vcf_tasks::{ProgressSink, ProviderError, SubTask, Task, TaskStatusProvider, TrackerEvent};

/// Provider answering from a fixed script of responses.
///
/// Once the script runs out, `repeat` is returned forever; without one any
/// further poll panics.
#[derive(Default)]
pub struct ScriptedProvider {
    script: Mutex<VecDeque<Result<Task, ProviderError>>>,
    repeat: Option<Task>,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn new(script: Vec<Result<Task, ProviderError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            ..Default::default()
        }
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self::new(tasks.into_iter().map(Ok).collect())
    }

    pub fn repeating(task: Task) -> Self {
        Self {
            repeat: Some(task),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TaskStatusProvider for ScriptedProvider {
    async fn get_task(&self, task_id: &str, _timeout: Duration) -> Result<Task, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(next) = self.script.lock().unwrap().pop_front() {
            return next;
        }
        match &self.repeat {
            Some(task) => Ok(task.clone()),
            None => panic!("unexpected poll for task {task_id}"),
        }
    }
}

/// Provider whose queries never complete.
#[derive(Default)]
pub struct HangingProvider {
    pub calls: AtomicUsize,
}

#[async_trait]
impl TaskStatusProvider for HangingProvider {
    async fn get_task(&self, _task_id: &str, _timeout: Duration) -> Result<Task, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        std::future::pending().await
    }
}

/// Sink recording every event as a line of text.
#[derive(Default)]
pub struct RecordingSink {
    lines: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    pub fn progress(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|l| l.starts_with('['))
            .collect()
    }
}

impl ProgressSink for RecordingSink {
    fn emit(&self, event: TrackerEvent<'_>) {
        let line = match event {
            TrackerEvent::Progress {
                status, message, ..
            } => format!("[{status}] {message}"),
            TrackerEvent::Completed {
                task_id,
                status,
                completed_at,
            } => format!("completed {task_id} {status} {completed_at}"),
            TrackerEvent::Failed {
                task_id, status, ..
            } => format!("failed {task_id} {status}"),
        };
        self.lines.lock().unwrap().push(line);
    }
}

pub fn task(id: &str, status: &str) -> Task {
    Task {
        id: id.to_string(),
        name: format!("task {id}"),
        task_type: "DOMAIN_CREATION".to_string(),
        status: status.to_string(),
        ..Default::default()
    }
}

pub fn task_with_sub_tasks(id: &str, status: &str, sub_tasks: &[(&str, &str)]) -> Task {
    Task {
        sub_tasks: Some(
            sub_tasks
                .iter()
                .map(|(status, description)| SubTask {
                    status: status.to_string(),
                    description: description.to_string(),
                    ..Default::default()
                })
                .collect(),
        ),
        ..task(id, status)
    }
}

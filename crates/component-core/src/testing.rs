//! In-memory doubles for the HTTP and package-manager seams

use crate::error::InstallError;
use crate::events::{AddEvent, Reporter};
use crate::http::{HttpClient, HttpResponse, TransportError};
use crate::install::PackageBackend;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use url::Url;

/// Serves canned responses by exact URL and records every request
#[derive(Default)]
pub struct StubHttp {
    routes: HashMap<String, Result<HttpResponse, String>>,
    calls: Mutex<Vec<String>>,
}

impl StubHttp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, url: &str, status: u16, body: impl Into<Vec<u8>>) -> Self {
        self.routes
            .insert(url.to_string(), Ok(HttpResponse::new(status, body)));
        self
    }

    pub fn json(self, url: &str, body: &str) -> Self {
        self.route(url, 200, body)
    }

    pub fn unreachable(mut self, url: &str) -> Self {
        self.routes
            .insert(url.to_string(), Err("connection refused".to_string()));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }
}

#[async_trait]
impl HttpClient for StubHttp {
    async fn get(&self, url: &Url) -> Result<HttpResponse, TransportError> {
        self.calls.lock().unwrap().push(url.to_string());
        match self.routes.get(url.as_str()) {
            Some(Ok(response)) => Ok(response.clone()),
            Some(Err(reason)) => Err(TransportError {
                reason: reason.clone(),
            }),
            None => Ok(HttpResponse::new(404, "Not Found")),
        }
    }
}

/// Records each batch it is asked to install; optionally fails
#[derive(Default)]
pub struct RecordingBackend {
    pub batches: Mutex<Vec<Vec<String>>>,
    pub fail_with: Option<String>,
}

impl RecordingBackend {
    pub fn failing(diagnostics: &str) -> Self {
        Self {
            batches: Mutex::new(Vec::new()),
            fail_with: Some(diagnostics.to_string()),
        }
    }

    pub fn batches(&self) -> Vec<Vec<String>> {
        self.batches.lock().unwrap().clone()
    }
}

#[async_trait]
impl PackageBackend for RecordingBackend {
    fn describe(&self, names: &[String]) -> String {
        format!("stub add {}", names.join(" "))
    }

    async fn add_packages(&self, names: &[String]) -> Result<(), InstallError> {
        self.batches.lock().unwrap().push(names.to_vec());
        match &self.fail_with {
            Some(diagnostics) => Err(InstallError::Failed {
                command: self.describe(names),
                code: 1,
                diagnostics: diagnostics.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PackageBackend for std::sync::Arc<RecordingBackend> {
    fn describe(&self, names: &[String]) -> String {
        self.as_ref().describe(names)
    }

    async fn add_packages(&self, names: &[String]) -> Result<(), InstallError> {
        self.as_ref().add_packages(names).await
    }
}

/// Keeps every event it receives
#[derive(Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<AddEvent>>,
}

impl RecordingReporter {
    pub fn events(&self) -> Vec<AddEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, event: &AddEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

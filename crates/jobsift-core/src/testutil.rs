//! Test utilities: a scripted mock of the browser session.
//!
//! Handwritten, `Arc<Mutex<_>>`-backed like the rest of the crate's mocks,
//! so tests can assert on recorded calls after the service consumed clones.

use std::sync::{Arc, Mutex};

use crate::error::AppError;
use crate::traits::PageSession;

/// Scripted [`PageSession`]: `open` and `snapshot` pop from one shared page
/// queue in order, `advance` pops from its own queue. Exhausted queues fall
/// back to an empty page / `Ok(false)`, which terminates any traversal.
#[derive(Clone)]
pub struct MockSession {
    pages: Arc<Mutex<Vec<Result<String, AppError>>>>,
    advances: Arc<Mutex<Vec<Result<bool, AppError>>>>,
    opened: Arc<Mutex<Vec<String>>>,
    advance_count: Arc<Mutex<u32>>,
}

impl MockSession {
    pub fn builder() -> MockSessionBuilder {
        MockSessionBuilder {
            pages: Vec::new(),
            advances: Vec::new(),
        }
    }

    /// URLs passed to `open`, in call order.
    pub fn opened_urls(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }

    /// How many times `advance` was called.
    pub fn advance_calls(&self) -> u32 {
        *self.advance_count.lock().unwrap()
    }

    fn next_page(&self) -> Result<String, AppError> {
        let mut pages = self.pages.lock().unwrap();
        if pages.is_empty() {
            Ok("<html><body></body></html>".to_string())
        } else {
            pages.remove(0)
        }
    }
}

impl PageSession for MockSession {
    async fn open(&self, url: &str) -> Result<String, AppError> {
        self.opened.lock().unwrap().push(url.to_string());
        self.next_page()
    }

    async fn snapshot(&self) -> Result<String, AppError> {
        self.next_page()
    }

    async fn advance(&self) -> Result<bool, AppError> {
        *self.advance_count.lock().unwrap() += 1;
        let mut advances = self.advances.lock().unwrap();
        if advances.is_empty() {
            Ok(false)
        } else {
            advances.remove(0)
        }
    }
}

pub struct MockSessionBuilder {
    pages: Vec<Result<String, AppError>>,
    advances: Vec<Result<bool, AppError>>,
}

impl MockSessionBuilder {
    /// Queue the next page load result (consumed by `open`, then `snapshot`).
    pub fn page(mut self, page: Result<String, AppError>) -> Self {
        self.pages.push(page);
        self
    }

    /// Queue the next `advance` result.
    pub fn advance(mut self, result: Result<bool, AppError>) -> Self {
        self.advances.push(result);
        self
    }

    pub fn build(self) -> MockSession {
        MockSession {
            pages: Arc::new(Mutex::new(self.pages)),
            advances: Arc::new(Mutex::new(self.advances)),
            opened: Arc::new(Mutex::new(Vec::new())),
            advance_count: Arc::new(Mutex::new(0)),
        }
    }
}

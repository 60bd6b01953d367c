//! In-process navigator used by the CLI and by tests.

use anyhow::{Context, Result};
use std::cell::RefCell;
use std::rc::Rc;
use url::Url;

use super::Navigator;

#[derive(Debug)]
struct Inner {
    current: Url,
    visits: Vec<String>,
    replaced: Vec<String>,
    /// `(message, page URL when shown)`
    alerts: Vec<(String, String)>,
}

/// Navigator over a URL held in memory. Clones share state, so a caller can
/// keep a handle to inspect navigations after handing one to the app.
#[derive(Clone, Debug)]
pub struct MemoryNavigator {
    inner: Rc<RefCell<Inner>>,
}

impl MemoryNavigator {
    pub fn new(url: &str) -> Result<Self> {
        let current = Url::parse(url).with_context(|| format!("invalid page URL: {url}"))?;
        Ok(Self {
            inner: Rc::new(RefCell::new(Inner {
                current,
                visits: Vec::new(),
                replaced: Vec::new(),
                alerts: Vec::new(),
            })),
        })
    }

    pub fn current_url(&self) -> String {
        self.inner.borrow().current.to_string()
    }

    /// URLs passed to `navigate`, oldest first.
    pub fn visits(&self) -> Vec<String> {
        self.inner.borrow().visits.clone()
    }

    /// Paths passed to `replace_url`, oldest first.
    pub fn replaced(&self) -> Vec<String> {
        self.inner.borrow().replaced.clone()
    }

    /// Alert messages paired with the page URL they were shown on.
    pub fn alerts(&self) -> Vec<(String, String)> {
        self.inner.borrow().alerts.clone()
    }
}

impl Navigator for MemoryNavigator {
    fn pathname(&self) -> String {
        self.inner.borrow().current.path().to_string()
    }

    fn search(&self) -> String {
        match self.inner.borrow().current.query() {
            Some(q) if !q.is_empty() => format!("?{q}"),
            _ => String::new(),
        }
    }

    fn origin(&self) -> String {
        self.inner.borrow().current.origin().ascii_serialization()
    }

    fn replace_url(&mut self, path: &str) {
        let mut inner = self.inner.borrow_mut();
        if let Ok(next) = inner.current.join(path) {
            inner.current = next;
        }
        inner.replaced.push(path.to_string());
    }

    fn navigate(&mut self, url: &str) {
        let mut inner = self.inner.borrow_mut();
        if let Ok(next) = inner.current.join(url) {
            inner.current = next;
        }
        inner.visits.push(url.to_string());
    }

    fn alert(&mut self, message: &str) {
        let mut inner = self.inner.borrow_mut();
        let page = inner.current.to_string();
        inner.alerts.push((message.to_string(), page));
    }
}

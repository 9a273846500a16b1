//! Navigation history
//!
//! The screen keeps its location (`/<category>` or `/search?<terms>`) in a
//! history stack with browser semantics: push, replace and back/forward.
//! Back/forward moves are reported to listeners as [`HistoryAction::Pop`].

use super::subscription::{detach_on_dispose, Listeners, Subscription};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::cell::RefCell;
use std::rc::Rc;

/// Characters left unescaped in a URL component (`encodeURIComponent`)
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a URL component; space becomes `%20`
pub fn encode_component(text: &str) -> String {
    utf8_percent_encode(text, COMPONENT).to_string()
}

/// Decode a percent-encoded URL component (invalid UTF-8 is replaced)
pub fn decode_component(text: &str) -> String {
    percent_decode_str(text).decode_utf8_lossy().into_owned()
}

/// Path plus query of a history entry
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    /// Always starts with `/`
    pub pathname: String,
    /// Empty, or starts with `?`
    pub search: String,
}

impl Location {
    pub fn new(pathname: impl Into<String>, search: impl Into<String>) -> Self {
        Self {
            pathname: pathname.into(),
            search: search.into(),
        }
    }

    /// Location of a registry category: `/<key>`
    pub fn category(key: &str) -> Self {
        Self::new(format!("/{key}"), "")
    }

    /// Location of a search: `/search?<encoded text>`
    pub fn search(text: &str) -> Self {
        Self::new("/search", format!("?{}", encode_component(text)))
    }

    /// Parse `path[?query]`, adding the leading `/` if missing
    pub fn parse(url: &str) -> Self {
        let (path, search) = match url.find('?') {
            Some(idx) => (&url[..idx], &url[idx..]),
            None => (url, ""),
        };
        let pathname = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };
        Self::new(pathname, search)
    }

    /// First path segment without the leading `/`
    pub fn section(&self) -> &str {
        self.pathname.strip_prefix('/').unwrap_or(&self.pathname)
    }

    /// Decoded query text without the leading `?`
    pub fn search_text(&self) -> String {
        decode_component(self.search.strip_prefix('?').unwrap_or(&self.search))
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.pathname, self.search)
    }
}

/// How the current location was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryAction {
    Push,
    Replace,
    /// Back/forward navigation
    Pop,
}

/// Listener invoked after every location change
pub type HistoryListener = dyn Fn(&Location, HistoryAction);

/// Browser-style history
pub trait History {
    /// Current location
    fn location(&self) -> Location;

    /// Add a new entry, dropping any forward entries
    fn push(&self, location: Location);

    /// Overwrite the current entry
    fn replace(&self, location: Location);

    /// Move `delta` entries back (negative) or forward (positive)
    fn go(&self, delta: isize);

    /// Register a listener; dispose the subscription to stop listening
    fn listen(&self, listener: Box<HistoryListener>) -> Subscription;

    fn back(&self) {
        self.go(-1);
    }

    fn forward(&self) {
        self.go(1);
    }
}

struct MemoryHistoryInner {
    entries: Vec<Location>,
    index: usize,
    listeners: Listeners<HistoryListener>,
}

/// In-memory history stack
#[derive(Clone)]
pub struct MemoryHistory {
    inner: Rc<RefCell<MemoryHistoryInner>>,
}

impl MemoryHistory {
    /// Create a history whose only entry is `initial`
    pub fn new(initial: Location) -> Self {
        Self {
            inner: Rc::new(RefCell::new(MemoryHistoryInner {
                entries: vec![initial],
                index: 0,
                listeners: Listeners::new(),
            })),
        }
    }

    /// All entries, oldest first
    pub fn entries(&self) -> Vec<Location> {
        self.inner.borrow().entries.clone()
    }

    /// Number of entries in the stack
    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index of the current entry
    pub fn index(&self) -> usize {
        self.inner.borrow().index
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    fn notify(&self, action: HistoryAction) {
        let (location, listeners) = {
            let inner = self.inner.borrow();
            (inner.entries[inner.index].clone(), inner.listeners.snapshot())
        };
        for listener in listeners {
            listener(&location, action);
        }
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new(Location::new("/", ""))
    }
}

impl History for MemoryHistory {
    fn location(&self) -> Location {
        let inner = self.inner.borrow();
        inner.entries[inner.index].clone()
    }

    fn push(&self, location: Location) {
        {
            let mut inner = self.inner.borrow_mut();
            let keep = inner.index + 1;
            inner.entries.truncate(keep);
            inner.entries.push(location);
            inner.index = keep;
        }
        self.notify(HistoryAction::Push);
    }

    fn replace(&self, location: Location) {
        {
            let mut inner = self.inner.borrow_mut();
            let index = inner.index;
            inner.entries[index] = location;
        }
        self.notify(HistoryAction::Replace);
    }

    fn go(&self, delta: isize) {
        let moved = {
            let mut inner = self.inner.borrow_mut();
            let last = inner.entries.len() as isize - 1;
            let target = (inner.index as isize + delta).clamp(0, last) as usize;
            let moved = target != inner.index;
            inner.index = target;
            moved
        };
        if moved {
            self.notify(HistoryAction::Pop);
        }
    }

    fn listen(&self, listener: Box<HistoryListener>) -> Subscription {
        let id = self.inner.borrow_mut().listeners.add(Rc::from(listener));
        detach_on_dispose(&self.inner, id, |inner: &mut MemoryHistoryInner, id| {
            inner.listeners.remove(id);
        })
    }
}

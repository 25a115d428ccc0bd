use serde::{Deserialize, Serialize};

/// Paginated response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            count: 0,
            next: None,
            previous: None,
            results: Vec::new(),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            count: self.count,
            next: self.next,
            previous: self.previous,
            results: self.results.into_iter().map(f).collect(),
        }
    }
}

/// Offset-based pagination cursor, encoded as `limit=N&offset=M`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub limit: u64,
    pub offset: u64,
}

pub const DEFAULT_PAGE_SIZE: u64 = 20;

impl Default for Cursor {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_SIZE,
            offset: 0,
        }
    }
}

impl Cursor {
    pub fn new(limit: u64, offset: u64) -> Self {
        Self { limit, offset }
    }

    pub fn encode(&self) -> String {
        format!("limit={}&offset={}", self.limit, self.offset)
    }

    /// Parses `limit=N&offset=M`; order-insensitive, missing fields fall back
    /// to the defaults.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut cursor = Cursor::default();
        for pair in raw.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=')?;
            match key {
                "limit" => cursor.limit = value.parse().ok()?,
                "offset" => cursor.offset = value.parse().ok()?,
                _ => return None,
            }
        }
        Some(cursor)
    }

    /// Cursor of the page after this one, if `count` leaves items beyond it.
    pub fn next(&self, count: u64) -> Option<Self> {
        (self.offset + self.limit < count).then(|| Self {
            limit: self.limit,
            offset: self.offset + self.limit,
        })
    }

    /// Cursor of the page before this one.
    pub fn previous(&self) -> Option<Self> {
        (self.offset > 0).then(|| Self {
            limit: self.limit,
            offset: self.offset.saturating_sub(self.limit),
        })
    }
}

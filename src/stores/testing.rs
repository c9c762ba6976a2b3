//! Scriptable stores for tests

use super::traits::{ImageStore, VectorStore};
use crate::budget::Budget;
use crate::search::{ImageCollection, SearchError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

enum Reply<T> {
    Value(T),
    Fail(fn() -> SearchError),
    /// Never returns on its own
    Hang,
}

/// Call bookkeeping shared by both stubs
struct Calls<A> {
    count: AtomicUsize,
    last: Mutex<Option<(A, Option<Duration>)>>,
}

impl<A: Clone> Calls<A> {
    fn record(&self, args: A, budget: &Budget) {
        self.count.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some((args, budget.remaining()));
    }

    fn last_args(&self) -> Option<A> {
        self.last.lock().unwrap().as_ref().map(|(args, _)| args.clone())
    }

    fn last_remaining(&self) -> Option<Option<Duration>> {
        self.last.lock().unwrap().as_ref().map(|(_, remaining)| *remaining)
    }
}

pub struct StubVectorStore {
    reply: Reply<Vec<String>>,
    calls: Calls<String>,
}

impl StubVectorStore {
    fn with_reply(reply: Reply<Vec<String>>) -> Self {
        Self {
            reply,
            calls: Calls {
                count: AtomicUsize::new(0),
                last: Mutex::new(None),
            },
        }
    }

    pub fn returning(ids: Vec<String>) -> Self {
        Self::with_reply(Reply::Value(ids))
    }

    pub fn failing(error: fn() -> SearchError) -> Self {
        Self::with_reply(Reply::Fail(error))
    }

    pub fn hanging() -> Self {
        Self::with_reply(Reply::Hang)
    }

    pub fn calls(&self) -> usize {
        self.calls.count.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<String> {
        self.calls.last_args()
    }

    /// Budget left when the last call started
    pub fn last_remaining(&self) -> Option<Option<Duration>> {
        self.calls.last_remaining()
    }
}

#[async_trait]
impl VectorStore for StubVectorStore {
    async fn ids_by_query(&self, budget: &Budget, query: &str) -> Result<Vec<String>, SearchError> {
        self.calls.record(query.to_string(), budget);
        match &self.reply {
            Reply::Value(ids) => Ok(ids.clone()),
            Reply::Fail(error) => Err(error()),
            Reply::Hang => std::future::pending().await,
        }
    }
}

enum Collections {
    Fixed(Vec<ImageCollection>),
    /// One collection per requested ID, in request order
    Echo,
}

pub struct StubImageStore {
    reply: Reply<Collections>,
    calls: Calls<Vec<String>>,
}

impl StubImageStore {
    fn with_reply(reply: Reply<Collections>) -> Self {
        Self {
            reply,
            calls: Calls {
                count: AtomicUsize::new(0),
                last: Mutex::new(None),
            },
        }
    }

    pub fn returning(collections: Vec<ImageCollection>) -> Self {
        Self::with_reply(Reply::Value(Collections::Fixed(collections)))
    }

    pub fn echoing() -> Self {
        Self::with_reply(Reply::Value(Collections::Echo))
    }

    pub fn failing(error: fn() -> SearchError) -> Self {
        Self::with_reply(Reply::Fail(error))
    }

    pub fn hanging() -> Self {
        Self::with_reply(Reply::Hang)
    }

    pub fn calls(&self) -> usize {
        self.calls.count.load(Ordering::SeqCst)
    }

    pub fn last_ids(&self) -> Option<Vec<String>> {
        self.calls.last_args()
    }

    pub fn last_remaining(&self) -> Option<Option<Duration>> {
        self.calls.last_remaining()
    }
}

#[async_trait]
impl ImageStore for StubImageStore {
    async fn collections_by_ids(
        &self,
        budget: &Budget,
        ids: &[String],
    ) -> Result<Vec<ImageCollection>, SearchError> {
        self.calls.record(ids.to_vec(), budget);
        match &self.reply {
            Reply::Value(Collections::Fixed(collections)) => Ok(collections.clone()),
            Reply::Value(Collections::Echo) => Ok(ids
                .iter()
                .map(|id| ImageCollection::new(id.clone(), [format!("{}.jpg", id.to_lowercase())]))
                .collect()),
            Reply::Fail(error) => Err(error()),
            Reply::Hang => std::future::pending().await,
        }
    }
}

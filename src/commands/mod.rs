use std::{future::Future, pin::Pin, sync::Arc};

pub mod locks;
pub mod points_board;
pub mod purchase_places;
pub mod show_booking;
pub mod show_summary;

use locks::KeyedLocks;

/// Boxed future returned by every command
pub type CommandFuture<T> = Pin<Box<dyn Future<Output = Result<T, Error>> + Send>>;

/// Entry point for all booking commands
///
/// Each command is a [`tower::Service`] implementation on this type.
pub struct DomainLogic<R, C> {
    records: Arc<R>,
    clock: Arc<C>,
    locks: KeyedLocks,
}

impl<R, C> DomainLogic<R, C> {
    pub fn new(records: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            records,
            clock,
            locks: KeyedLocks::default(),
        }
    }

    pub fn records(&self) -> &Arc<R> {
        &self.records
    }
}

// Manual impl: the ports themselves do not need to be `Clone`
impl<R, C> Clone for DomainLogic<R, C> {
    fn clone(&self) -> Self {
        Self {
            records: self.records.clone(),
            clock: self.clock.clone(),
            locks: self.locks.clone(),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("record port error: {0:?}")]
    Records(#[from] crate::ports::records::Error),
}

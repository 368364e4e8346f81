//! Runtime wrapper tying a [`Carousel`] to tokio
//!
//! A [`CarouselRow`] schedules the commit of every transition it begins and
//! follows the items-per-page stream of a [`crate::responsive::ResponsiveCount`].
//! Commits are triggered either by a fixed animation budget or by the
//! renderer reporting that the track animation ended; the state machine does
//! not care which.
//!
//! Background tasks only hold a [`Weak`] handle to the state plus the row's
//! cancellation token, so a completion that fires after the row was torn
//! down is dropped instead of touching a dead row.

use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::{CarouselError, Result};
use crate::state::{Carousel, DerivedView, Transition};
use crate::types::RowKey;

/// Default transition budget, matching the track's CSS transition.
pub const DEFAULT_ANIMATION_MS: u64 = 750;

/// What ends a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitTrigger {
    /// Commit after a fixed delay.
    Timer(#[serde(with = "millis")] Duration),
    /// Commit when [`CarouselRow::animation_finished`] is called.
    AnimationEnd,
}

impl Default for CommitTrigger {
    fn default() -> Self {
        Self::Timer(Duration::from_millis(DEFAULT_ANIMATION_MS))
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        duration: &Duration,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(millis)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

/// One row on a browse page, driven by tokio timers.
#[derive(Debug)]
pub struct CarouselRow<T> {
    key: RowKey,
    inner: Arc<Mutex<Carousel<T>>>,
    trigger: CommitTrigger,
    cancel: CancellationToken,
    subscription: Mutex<Option<JoinHandle<()>>>,
}

impl<T> CarouselRow<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a row. Must be called from within a tokio runtime when the
    /// trigger is a timer.
    pub fn new(
        key: RowKey,
        items: Vec<T>,
        items_per_page: usize,
        trigger: CommitTrigger,
    ) -> Result<Self> {
        let carousel = Carousel::new(items, items_per_page)?;
        debug!(row = %key, items_per_page, "carousel row created");
        Ok(Self {
            key,
            inner: Arc::new(Mutex::new(carousel)),
            trigger,
            cancel: CancellationToken::new(),
            subscription: Mutex::new(None),
        })
    }

    /// Create a row that follows a responsive items-per-page stream. The
    /// current value of the stream seeds the page size.
    pub fn with_responsive(
        key: RowKey,
        items: Vec<T>,
        items_per_page: watch::Receiver<usize>,
        trigger: CommitTrigger,
    ) -> Result<Self> {
        let initial = *items_per_page.borrow();
        let row = Self::new(key, items, initial, trigger)?;
        row.follow(items_per_page);
        Ok(row)
    }

    pub fn key(&self) -> &RowKey {
        &self.key
    }

    pub fn trigger(&self) -> CommitTrigger {
        self.trigger
    }

    pub fn is_attached(&self) -> bool {
        !self.cancel.is_cancelled()
    }

    /// Begin a transition to the next page and schedule its commit.
    pub fn move_next(&self) -> Result<Transition> {
        self.begin(|carousel| carousel.move_next())
    }

    /// Begin a transition to the previous page and schedule its commit.
    pub fn move_prev(&self) -> Result<Transition> {
        self.begin(|carousel| carousel.move_prev())
    }

    fn begin<F>(&self, start: F) -> Result<Transition>
    where
        F: FnOnce(&mut Carousel<T>) -> Result<Transition>,
    {
        if !self.is_attached() {
            return Err(CarouselError::Detached);
        }
        let transition = {
            let mut carousel = self.inner.lock();
            start(&mut *carousel)?
        };
        if let CommitTrigger::Timer(budget) = self.trigger {
            self.schedule_commit(transition, budget);
        }
        Ok(transition)
    }

    fn schedule_commit(&self, transition: Transition, budget: Duration) {
        let weak = Arc::downgrade(&self.inner);
        let cancel = self.cancel.clone();
        let row = self.key.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!(%row, transition = transition.id, "pending commit cancelled");
                }
                _ = tokio::time::sleep(budget) => {
                    commit_if_alive(&weak, &cancel, &row, &transition);
                }
            }
        });
    }

    /// Animation-end event from the renderer. Only meaningful with
    /// [`CommitTrigger::AnimationEnd`]; with a timer trigger the timer owns
    /// the commit and the event is only logged.
    pub fn animation_finished(&self, transition_id: u64) -> Result<()> {
        if !self.is_attached() {
            return Err(CarouselError::Detached);
        }
        let mut carousel = self.inner.lock();
        let pending = *carousel.pending().ok_or(CarouselError::NoTransition)?;
        if pending.id != transition_id {
            return Err(CarouselError::StaleTransition {
                expected: pending.id,
                got: transition_id,
            });
        }
        if matches!(self.trigger, CommitTrigger::Timer(_)) {
            warn!(
                row = %self.key,
                transition = transition_id,
                "animation end ignored, timer owns the commit"
            );
            return Ok(());
        }
        carousel.commit(&pending)
    }

    /// Apply a new page size directly.
    pub fn update_items_to_display(&self, count: usize) -> Result<()> {
        if !self.is_attached() {
            return Err(CarouselError::Detached);
        }
        self.inner.lock().update_items_to_display(count)
    }

    pub fn set_items(&self, items: Vec<T>) -> Result<()> {
        if !self.is_attached() {
            return Err(CarouselError::Detached);
        }
        self.inner.lock().set_items(items);
        Ok(())
    }

    /// The projection the renderer draws from.
    pub fn derived(&self) -> DerivedView<T> {
        self.inner.lock().derived()
    }

    /// Run a read-only closure against the state machine.
    pub fn with_carousel<R>(&self, f: impl FnOnce(&Carousel<T>) -> R) -> R {
        f(&*self.inner.lock())
    }

    fn follow(&self, mut items_per_page: watch::Receiver<usize>) {
        let weak = Arc::downgrade(&self.inner);
        let cancel = self.cancel.clone();
        let row = self.key.clone();
        let handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    changed = items_per_page.changed() => {
                        if changed.is_err() {
                            debug!(%row, "responsive count provider closed");
                            break;
                        }
                        let count = *items_per_page.borrow_and_update();
                        let Some(inner) = weak.upgrade() else { break };
                        if let Err(err) = inner.lock().update_items_to_display(count) {
                            warn!(%row, %err, "ignoring responsive count");
                        }
                    }
                }
            }
        });
        *self.subscription.lock() = Some(handle);
    }

    /// Tear the row down: pending commits are cancelled, the responsive
    /// subscription is aborted and further operations fail with
    /// [`CarouselError::Detached`].
    pub fn shutdown(&self) {
        if self.cancel.is_cancelled() {
            return;
        }
        self.cancel.cancel();
        if let Some(handle) = self.subscription.lock().take() {
            handle.abort();
        }
        debug!(row = %self.key, "carousel row torn down");
    }
}

impl<T> Drop for CarouselRow<T> {
    fn drop(&mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.subscription.get_mut().take() {
            handle.abort();
        }
    }
}

fn commit_if_alive<T: Clone>(
    weak: &Weak<Mutex<Carousel<T>>>,
    cancel: &CancellationToken,
    row: &RowKey,
    transition: &Transition,
) {
    if cancel.is_cancelled() {
        debug!(%row, transition = transition.id, "row detached before commit");
        return;
    }
    let Some(inner) = weak.upgrade() else {
        debug!(%row, transition = transition.id, "row dropped before commit");
        return;
    };
    if let Err(err) = inner.lock().commit(transition) {
        debug!(%row, transition = transition.id, %err, "dropping stale commit");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_trigger_serializes_as_millis() {
        let json = serde_json::to_string(&CommitTrigger::default())
            .expect("serialize");
        assert_eq!(json, r#"{"timer":750}"#);

        let parsed: CommitTrigger =
            serde_json::from_str(r#""animation_end""#).expect("deserialize");
        assert_eq!(parsed, CommitTrigger::AnimationEnd);

        let parsed: CommitTrigger =
            serde_json::from_str(r#"{"timer":300}"#).expect("deserialize");
        assert_eq!(parsed, CommitTrigger::Timer(Duration::from_millis(300)));
    }

    #[test]
    fn oversized_timer_saturates_instead_of_wrapping() {
        let json = serde_json::to_string(&CommitTrigger::Timer(Duration::MAX))
            .expect("serialize");
        assert_eq!(json, format!(r#"{{"timer":{}}}"#, u64::MAX));
    }
}

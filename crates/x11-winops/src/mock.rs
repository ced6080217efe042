use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::time::Instant;

use crate::{Error, OpacityStore, Result, WindowId};

/// A primitive call observed by [`MockOpacityStore`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MockCall {
    /// `read(window)`
    Read(WindowId),
    /// `remove(window)`
    Remove(WindowId),
    /// `set(window, value)`
    Set(WindowId, u32),
}

/// Mutable state shared between clones of the mock.
#[derive(Default)]
struct State {
    /// Current property values.
    props: HashMap<WindowId, u32>,
    /// Every call, in order, with the (tokio) time it was made.
    journal: Vec<(Instant, MockCall)>,
    /// Windows that behave as destroyed.
    gone: HashSet<WindowId>,
    /// Windows whose `read` fails.
    fail_read: HashSet<WindowId>,
    /// Windows whose `remove` fails.
    fail_remove: HashSet<WindowId>,
    /// Windows whose `set` fails.
    fail_set: HashSet<WindowId>,
}

/// In-memory opacity store for tests (enabled with `test-utils` feature).
#[derive(Clone, Default)]
pub struct MockOpacityStore {
    /// Shared state.
    state: Arc<Mutex<State>>,
}

/// Update membership of `window` in a failure set.
fn toggle(set: &mut HashSet<WindowId>, window: WindowId, on: bool) {
    if on {
        set.insert(window);
    } else {
        set.remove(&window);
    }
}

impl MockOpacityStore {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn set_value(&self, window: WindowId, value: u32) {
        self.state.lock().props.insert(window, value);
    }
    pub fn value(&self, window: WindowId) -> Option<u32> {
        self.state.lock().props.get(&window).copied()
    }
    /// Mark a window as destroyed: every subsequent call on it fails.
    pub fn set_gone(&self, window: WindowId, gone: bool) {
        toggle(&mut self.state.lock().gone, window, gone);
    }
    pub fn set_fail_read(&self, window: WindowId, fail: bool) {
        toggle(&mut self.state.lock().fail_read, window, fail);
    }
    pub fn set_fail_remove(&self, window: WindowId, fail: bool) {
        toggle(&mut self.state.lock().fail_remove, window, fail);
    }
    pub fn set_fail_set(&self, window: WindowId, fail: bool) {
        toggle(&mut self.state.lock().fail_set, window, fail);
    }
    pub fn calls(&self) -> Vec<MockCall> {
        self.state.lock().journal.iter().map(|(_, c)| *c).collect()
    }
    pub fn journal(&self) -> Vec<(Instant, MockCall)> {
        self.state.lock().journal.clone()
    }
    /// Record `call`, then fail if `window` is gone or listed in the chosen failure set.
    fn note(
        &self,
        call: MockCall,
        window: WindowId,
        failing: impl FnOnce(&State) -> &HashSet<WindowId>,
    ) -> Result<()> {
        let mut st = self.state.lock();
        st.journal.push((Instant::now(), call));
        if st.gone.contains(&window) || failing(&st).contains(&window) {
            return Err(Error::WindowGone(window));
        }
        Ok(())
    }
}

#[async_trait]
impl OpacityStore for MockOpacityStore {
    async fn read(&self, window: WindowId) -> Result<Option<u32>> {
        self.note(MockCall::Read(window), window, |s| &s.fail_read)?;
        Ok(self.value(window))
    }

    async fn remove(&self, window: WindowId) -> Result<()> {
        self.note(MockCall::Remove(window), window, |s| &s.fail_remove)?;
        self.state.lock().props.remove(&window);
        Ok(())
    }

    async fn set(&self, window: WindowId, value: u32) -> Result<()> {
        self.note(MockCall::Set(window, value), window, |s| &s.fail_set)?;
        self.state.lock().props.insert(window, value);
        Ok(())
    }
}

use std::{collections::VecDeque, time::Duration};

use async_trait::async_trait;
use flash_engine::{Error, FocusSource, Flasher, Monitor, MonitorState, Opacity, Result};
use x11_winops::{MockCall, MockOpacityStore, WindowId};

/// Yields a fixed list of focus changes, then reports the connection closed.
struct Script {
    windows: VecDeque<WindowId>,
}

impl Script {
    fn new(ids: &[u32]) -> Self {
        Self {
            windows: ids.iter().copied().map(WindowId::new).collect(),
        }
    }
}

#[async_trait]
impl FocusSource for Script {
    async fn next_focus(&mut self) -> Result<WindowId> {
        self.windows
            .pop_front()
            .ok_or(Error::Transport(i3_ipc::Error::Closed))
    }
}

fn flasher(store: &MockOpacityStore) -> Flasher<MockOpacityStore> {
    Flasher::new(
        store.clone(),
        Opacity::from_decimal(0.9).unwrap(),
        Duration::from_millis(150),
    )
}

#[tokio::test(start_paused = true)]
async fn queued_focus_waits_for_previous_restore() {
    let store = MockOpacityStore::new();
    let (a, b) = (WindowId::new(1), WindowId::new(2));
    store.set_value(a, 42);
    let mut monitor = Monitor::new(flasher(&store), Script::new(&[1, 2]));
    assert_eq!(monitor.state(), MonitorState::Idle);

    let err = monitor.run().await.unwrap_err();
    assert!(matches!(err, Error::Transport(i3_ipc::Error::Closed)));
    assert!(err.is_fatal());
    assert_eq!(monitor.state(), MonitorState::Listening);

    let dip = Opacity::from_decimal(0.9).unwrap().native();
    let journal = store.journal();
    let calls: Vec<MockCall> = journal.iter().map(|(_, c)| *c).collect();
    assert_eq!(
        calls,
        vec![
            MockCall::Read(a),
            MockCall::Remove(a),
            MockCall::Set(a, dip),
            MockCall::Remove(a),
            MockCall::Set(a, 42),
            MockCall::Read(b),
            MockCall::Remove(b),
            MockCall::Set(b, dip),
            MockCall::Remove(b),
        ]
    );
    // Second flash starts only after the first restore, 150ms after its dip.
    assert!(journal[5].0 - journal[2].0 >= Duration::from_millis(150));
    assert_eq!(store.value(a), Some(42));
    assert_eq!(store.value(b), None);
}

#[tokio::test(start_paused = true)]
async fn bad_window_does_not_stop_monitor() {
    let store = MockOpacityStore::new();
    let (gone, ok) = (WindowId::new(5), WindowId::new(6));
    store.set_gone(gone, true);
    let mut monitor = Monitor::new(flasher(&store), Script::new(&[5, 6]));

    let err = monitor.run().await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
    let calls = store.calls();
    assert_eq!(calls[0], MockCall::Read(gone));
    assert!(calls.contains(&MockCall::Read(ok)));
    assert_eq!(calls.last(), Some(&MockCall::Remove(ok)));
}

#[tokio::test(start_paused = true)]
async fn no_events_means_no_writes() {
    let store = MockOpacityStore::new();
    let mut monitor = Monitor::new(flasher(&store), Script::new(&[]));
    assert!(monitor.run().await.is_err());
    assert!(store.calls().is_empty());
}

use super::direction::Direction;
use super::engine::{GameState, Snapshot, TickOutcome};
use crate::history::{History, HistoryRecord};
use crate::util::report;
use rand::Rng;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, RwLock};
use std::thread::{Builder, JoinHandle};
use std::time::Instant;
use tracing::{debug, info, warn};

static SNAPSHOT_LOCK_POISON_WARNED: AtomicBool = AtomicBool::new(false);

fn warn_snapshot_lock_poison_once(operation: &'static str) {
    if SNAPSHOT_LOCK_POISON_WARNED
        .compare_exchange(false, true, Ordering::Relaxed, Ordering::Relaxed)
        .is_ok()
    {
        warn!(operation, "snapshot lock poisoned; recovered inner value");
    }
}

/// Hand-off point between the logic task and its readers.  The writer
/// replaces the whole snapshot at once, so a reader sees either the previous
/// tick or the next one, never a mixture.
#[derive(Clone, Debug)]
pub(crate) struct SnapshotSlot {
    latest: Arc<RwLock<Arc<Snapshot>>>,
}

impl SnapshotSlot {
    pub(crate) fn new(snapshot: Snapshot) -> SnapshotSlot {
        SnapshotSlot {
            latest: Arc::new(RwLock::new(Arc::new(snapshot))),
        }
    }

    pub(crate) fn latest(&self) -> Arc<Snapshot> {
        match self.latest.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => {
                warn_snapshot_lock_poison_once("read");
                Arc::clone(&poisoned.into_inner())
            }
        }
    }

    pub(crate) fn publish(&self, snapshot: Snapshot) {
        let snapshot = Arc::new(snapshot);
        match self.latest.write() {
            Ok(mut guard) => *guard = snapshot,
            Err(poisoned) => {
                warn_snapshot_lock_poison_once("write");
                *poisoned.into_inner() = snapshot;
            }
        }
    }
}

/// Messages from the UI to the logic task
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Signal {
    Propose(Direction),
    Stop,
}

/// A running game.
///
/// The [`GameState`] lives on a dedicated `logic-tick` thread that advances
/// it at the difficulty's tick interval and publishes a fresh [`Snapshot`]
/// after every tick.  When the snake dies, that thread appends the result to
/// the [`History`] exactly once and hands the history back through
/// [`Session::finish()`].
#[derive(Debug)]
pub(crate) struct Session {
    signals: Sender<Signal>,
    snapshots: SnapshotSlot,
    worker: Option<JoinHandle<History>>,
}

impl Session {
    pub(crate) fn start<R>(state: GameState, history: History, rng: R) -> io::Result<Session>
    where
        R: Rng + Send + 'static,
    {
        let snapshots = SnapshotSlot::new(state.snapshot());
        let (signals, receiver) = channel();
        let logic = LogicTask {
            state,
            rng,
            signals: receiver,
            snapshots: snapshots.clone(),
            history,
        };
        let worker = Builder::new()
            .name(String::from("logic-tick"))
            .spawn(move || logic.run())?;
        Ok(Session {
            signals,
            snapshots,
            worker: Some(worker),
        })
    }

    /// Forward a turn request to the logic task.  Requests arriving after the
    /// session has ended are dropped.
    pub(crate) fn propose(&self, direction: Direction) {
        let _ = self.signals.send(Signal::Propose(direction));
    }

    pub(crate) fn latest(&self) -> Arc<Snapshot> {
        self.snapshots.latest()
    }

    /// Stop the logic task (if it is still running) and wait for it, returning
    /// the history.  A session stopped before the snake died adds no record.
    pub(crate) fn finish(mut self) -> io::Result<History> {
        let _ = self.signals.send(Signal::Stop);
        let worker = self
            .worker
            .take()
            .ok_or_else(|| io::Error::other("logic task already joined"))?;
        worker
            .join()
            .map_err(|_| io::Error::other("logic task panicked"))
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = self.signals.send(Signal::Stop);
            let _ = worker.join();
        }
    }
}

#[derive(Debug)]
struct LogicTask<R> {
    state: GameState,
    rng: R,
    signals: Receiver<Signal>,
    snapshots: SnapshotSlot,
    history: History,
}

impl<R: Rng> LogicTask<R> {
    fn run(mut self) -> History {
        let period = self.state.difficulty().tick_interval();
        info!(
            difficulty = %self.state.difficulty(),
            period_ms = period.as_millis(),
            "session started"
        );
        let mut next_tick = Instant::now() + period;
        loop {
            let wait = next_tick.saturating_duration_since(Instant::now());
            match self.signals.recv_timeout(wait) {
                Ok(Signal::Propose(direction)) => {
                    let accepted = self.state.propose(direction);
                    debug!(
                        ?direction,
                        accepted,
                        previous = ?self.state.previous_direction(),
                        pending = ?self.state.pending_direction(),
                        "turn requested"
                    );
                    continue;
                }
                Ok(Signal::Stop) | Err(RecvTimeoutError::Disconnected) => {
                    info!(score = self.state.score(), "session abandoned");
                    return self.history;
                }
                Err(RecvTimeoutError::Timeout) => (),
            }
            match self.state.tick() {
                TickOutcome::Moved => (),
                TickOutcome::Ate => {
                    debug_assert!(self.state.fruit_consumed(), "fruit eaten but not consumed");
                    self.state.respawn_fruit(&mut self.rng);
                    debug!(
                        score = self.state.score(),
                        length = self.state.snake().len(),
                        fruit = ?self.state.fruit(),
                        "fruit eaten"
                    );
                }
                TickOutcome::Terminal(collision) => {
                    debug_assert!(!self.state.alive(), "terminal outcome from a live state");
                    debug_assert_eq!(self.state.collision(), Some(collision));
                    self.snapshots.publish(self.state.snapshot());
                    info!(
                        reason = %collision,
                        score = self.state.score(),
                        "session over"
                    );
                    self.record_result();
                    return self.history;
                }
            }
            self.snapshots.publish(self.state.snapshot());
            next_tick = Instant::now() + period;
        }
    }

    fn record_result(&mut self) {
        let record = HistoryRecord::today(self.state.score(), self.state.difficulty());
        if let Err(e) = self.history.append(record) {
            warn!(error = %report(e), "failed to persist session history");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::Difficulty;
    use crate::game::grid::{Bounds, Position};
    use crate::game::snake::Snake;
    use crate::game::collision::Collision;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use std::thread::sleep;
    use std::time::Duration;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    const BOUNDS: Bounds = Bounds {
        width: 10,
        height: 10,
    };

    fn wait_until_over(session: &Session) -> Arc<Snapshot> {
        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            let snapshot = session.latest();
            if snapshot.is_over() {
                return snapshot;
            }
            assert!(Instant::now() < deadline, "session never ended");
            sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn collision_records_history_once() {
        let state = GameState::from_parts(
            Snake::new(Position::new(2, 5)),
            Position::new(1, 5),
            Direction::Left,
            Difficulty::Hell,
            BOUNDS,
        );
        let session = Session::start(
            state,
            History::default(),
            ChaCha12Rng::seed_from_u64(RNG_SEED),
        )
        .unwrap();
        let snapshot = wait_until_over(&session);
        assert_eq!(snapshot.collision, Some(Collision::Boundary));
        assert_eq!(snapshot.snake[0], Position::new(0, 5));
        // The respawned fruit may or may not land on (0, 5).
        assert!((1..=2).contains(&snapshot.score));
        assert_eq!(snapshot.snake.len(), 1 + usize::try_from(snapshot.score).unwrap());
        let history = session.finish().unwrap();
        assert_eq!(history.records().len(), 1);
        assert_eq!(history.records()[0].score, snapshot.score);
        assert_eq!(history.records()[0].mode, "Hell");
    }

    #[test]
    fn turn_requests_reach_logic_task() {
        let state = GameState::from_parts(
            Snake::new(Position::new(5, 5)),
            Position::new(9, 9),
            Direction::Right,
            Difficulty::Hell,
            BOUNDS,
        );
        let session = Session::start(
            state,
            History::default(),
            ChaCha12Rng::seed_from_u64(RNG_SEED),
        )
        .unwrap();
        session.propose(Direction::Up);
        let snapshot = wait_until_over(&session);
        // Without the turn the snake would have left through the right wall.
        assert_eq!(snapshot.collision, Some(Collision::Boundary));
        assert_eq!(snapshot.facing, Direction::Up);
        assert_eq!(snapshot.snake[0].y, 0);
        let history = session.finish().unwrap();
        assert_eq!(history.records().len(), 1);
    }

    #[test]
    fn stop_before_collision_adds_no_record() {
        let state = GameState::from_parts(
            Snake::new(Position::new(0, 0)),
            Position::new(9, 9),
            Direction::Right,
            Difficulty::Easy,
            BOUNDS,
        );
        let session = Session::start(
            state,
            History::default(),
            ChaCha12Rng::seed_from_u64(RNG_SEED),
        )
        .unwrap();
        assert!(!session.latest().is_over());
        let history = session.finish().unwrap();
        assert!(history.records().is_empty());
    }

    #[test]
    fn slot_replaces_whole_snapshot() {
        let state = GameState::from_parts(
            Snake::new(Position::new(5, 5)),
            Position::new(6, 5),
            Direction::Right,
            Difficulty::Normal,
            BOUNDS,
        );
        let slot = SnapshotSlot::new(state.snapshot());
        let before = slot.latest();
        let mut state = state;
        assert_eq!(state.tick(), TickOutcome::Ate);
        slot.publish(state.snapshot());
        // Readers holding an older snapshot keep it intact.
        assert_eq!(before.snake, [Position::new(5, 5)]);
        assert_eq!(before.score, 0);
        let after = slot.latest();
        assert_eq!(after.snake, [Position::new(6, 5), Position::new(5, 5)]);
        assert_eq!(after.score, 1);
    }
}

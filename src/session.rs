//! Frame driver
//!
//! A `Session` owns the simulation context and everything around it for one
//! play session: the frame clock, intents queued by the input surface, and
//! the best-score store.

use crate::input::{InputDecoder, Intent, KeySignal};
use crate::persistence::BestScoreStore;
use crate::settings::Settings;
use crate::sim::{FrameClock, GameEvent, GameState, Snapshot, TickInput, tick};

pub struct Session {
    state: GameState,
    clock: FrameClock,
    decoder: InputDecoder,
    /// Intents waiting for the next frame
    pending: TickInput,
    store: Box<dyn BestScoreStore>,
    reduced_motion: bool,
}

impl Session {
    /// Build a session, reading the stored best once
    pub fn new(seed: u64, settings: Settings, store: Box<dyn BestScoreStore>) -> Self {
        let best = store.load_best();
        log::info!("Session started with seed {} (best {})", seed, best);
        Self {
            clock: FrameClock::new(settings.tuning.max_frame_dt),
            state: GameState::with_tuning(seed, settings.tuning).with_best(best),
            decoder: InputDecoder::new(settings.bindings),
            pending: TickInput::default(),
            store,
            reduced_motion: settings.reduced_motion,
        }
    }

    /// Queue a raw key-down; returns the decoded intent, if any
    pub fn key_down(&mut self, signal: KeySignal) -> Option<Intent> {
        let intent = self.decoder.decode(signal)?;
        self.pending.push(intent);
        Some(intent)
    }

    /// Queue an already-decoded intent (autopilot, touch UI)
    pub fn push_intent(&mut self, intent: Intent) {
        self.pending.push(intent);
    }

    /// Run one frame stamped `now` (seconds). Returns the events it produced.
    pub fn frame(&mut self, now: f64) -> Vec<GameEvent> {
        let dt = self.clock.frame(now);
        self.step(dt)
    }

    /// Run one frame with an explicit delta (still clamped)
    pub fn step(&mut self, dt: f32) -> Vec<GameEvent> {
        let dt = self.clock.clamp(dt);
        let input = std::mem::take(&mut self.pending);
        tick(&mut self.state, &input, dt);

        let events = self.state.take_events();
        for event in &events {
            if let GameEvent::GameOver { best, .. } = event {
                if let Err(e) = self.store.save_best(*best) {
                    log::warn!("Failed to save best score: {}", e);
                }
            }
        }
        events
    }

    /// Render feed for the current frame
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state, self.reduced_motion)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Drop the previous frame time (after the page was hidden)
    pub fn pause_clock(&mut self) {
        self.clock.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyCode;
    use crate::persistence::{MemoryStore, StoreError};
    use crate::sim::RunState;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Store that shares its state with the test
    #[derive(Clone, Default)]
    struct SharedStore(Rc<RefCell<MemoryStore>>);

    impl BestScoreStore for SharedStore {
        fn try_load_best(&self) -> Result<u64, StoreError> {
            self.0.borrow().try_load_best()
        }

        fn save_best(&mut self, best: u64) -> Result<(), StoreError> {
            self.0.borrow_mut().save_best(best)
        }
    }

    struct BrokenStore;

    impl BestScoreStore for BrokenStore {
        fn try_load_best(&self) -> Result<u64, StoreError> {
            Err(StoreError::Unavailable)
        }

        fn save_best(&mut self, _best: u64) -> Result<(), StoreError> {
            Err(StoreError::Unavailable)
        }
    }

    fn crash(session: &mut Session) {
        let state = session.state_mut();
        let id = state.next_entity_id();
        let lane = state.player.lane();
        crate::sim::spawner::spawn_obstacle_in_lane(state, id, lane);
        state.obstacles.last_mut().unwrap().pos.z = -0.2;
        session.step(0.0);
    }

    #[test]
    fn test_reads_best_at_startup() {
        let store = MemoryStore::with_best(90);
        let session = Session::new(1, Settings::default(), Box::new(store));
        assert_eq!(session.snapshot().best, 90);
    }

    #[test]
    fn test_unreadable_store_starts_at_zero() {
        let mut session = Session::new(1, Settings::default(), Box::new(BrokenStore));
        assert_eq!(session.state().stats.best, 0);
        // Save failures are logged, not fatal
        session.key_down(KeySignal::press(KeyCode::Space));
        session.step(0.0);
        crash(&mut session);
        assert_eq!(session.state().run_state, RunState::GameOver);
    }

    #[test]
    fn test_key_down_queues_until_next_frame() {
        let mut session = Session::new(1, Settings::default(), Box::new(MemoryStore::new()));
        assert_eq!(session.key_down(KeySignal::press(KeyCode::Space)), Some(Intent::Confirm));
        assert_eq!(session.key_down(KeySignal::press(KeyCode::Other)), None);
        assert_eq!(session.state().run_state, RunState::Idle);

        let events = session.frame(0.0);
        assert_eq!(events, vec![GameEvent::RunStarted]);
        assert_eq!(session.state().run_state, RunState::Running);
    }

    #[test]
    fn test_best_written_on_each_game_over() {
        let shared = SharedStore(Rc::new(RefCell::new(MemoryStore::with_best(90))));
        let mut session = Session::new(1, Settings::default(), Box::new(shared.clone()));

        session.push_intent(Intent::Confirm);
        session.step(0.0);
        session.state_mut().stats.score = 137.0;
        crash(&mut session);
        assert_eq!(shared.0.borrow().stored(), Some(137));
        assert_eq!(shared.0.borrow().saves, 1);

        session.push_intent(Intent::Confirm);
        session.step(0.0);
        session.state_mut().stats.score = 50.0;
        crash(&mut session);
        assert_eq!(shared.0.borrow().stored(), Some(137));
        assert_eq!(shared.0.borrow().saves, 2);
        assert_eq!(session.snapshot().best, 137);
    }

    #[test]
    fn test_stall_advances_one_clamped_tick() {
        let mut session = Session::new(1, Settings::default(), Box::new(MemoryStore::new()));
        session.push_intent(Intent::Confirm);
        session.frame(10.0);
        let before = session.state().stats.score;
        // Five second stall
        session.frame(15.0);
        let gained = session.state().stats.score - before;
        assert!((gained - 0.033 * 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_held_key_repeat_does_not_restart() {
        let mut session = Session::new(1, Settings::default(), Box::new(MemoryStore::new()));
        session.key_down(KeySignal::press(KeyCode::Space));
        session.step(0.0);
        crash(&mut session);
        assert_eq!(session.state().run_state, RunState::GameOver);

        session.key_down(KeySignal::repeat(KeyCode::Space));
        session.step(0.0);
        assert_eq!(session.state().run_state, RunState::GameOver);
    }
}

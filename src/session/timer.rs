use std::time::Duration;

use log::debug;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::models::WordSet;
use crate::services::rng::PuzzleRng;
use crate::session::{GameSession, Guess, HintToggle, SessionState};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Background task that emits one tick per period until dropped.
pub struct Countdown {
    handle: JoinHandle<()>,
    ticks: mpsc::Receiver<()>,
}

impl Countdown {
    pub fn start(period: Duration) -> Self {
        let (tx, ticks) = mpsc::channel(4);
        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(()).await.is_err() {
                    break;
                }
            }
        });
        Self { handle, ticks }
    }

    /// Wait for the next tick. Cancel safe.
    pub async fn tick(&mut self) -> Option<()> {
        self.ticks.recv().await
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A `GameSession` with its countdown attached.
///
/// At most one countdown exists at a time, and it is dropped on every path
/// out of `Active` so a stale timer can never tick a finished or restarted
/// session.
pub struct TimedSession {
    session: GameSession,
    countdown: Option<Countdown>,
    period: Duration,
}

impl TimedSession {
    pub fn new(hint_allowance: u32) -> Self {
        Self::with_period(hint_allowance, TICK_PERIOD)
    }

    pub fn with_period(hint_allowance: u32, period: Duration) -> Self {
        Self {
            session: GameSession::new(hint_allowance),
            countdown: None,
            period,
        }
    }

    pub fn start<R: PuzzleRng>(&mut self, word_set: WordSet, duration: u32, rng: &mut R) {
        self.countdown = None;
        self.session.start(word_set, duration, rng);
        if self.session.is_active() {
            self.countdown = Some(Countdown::start(self.period));
        }
    }

    pub fn submit_word(&mut self, raw: &str) -> Guess {
        let guess = self.session.submit_word(raw);
        self.release_if_done();
        guess
    }

    pub fn use_hint(&mut self, letter: char) -> Option<HintToggle> {
        self.session.use_hint(letter)
    }

    pub fn shuffle_letters<R: PuzzleRng>(&mut self, rng: &mut R) {
        self.session.shuffle_letters(rng);
    }

    pub fn give_up(&mut self) -> bool {
        let gave_up = self.session.give_up();
        self.release_if_done();
        gave_up
    }

    pub fn reset(&mut self) {
        self.countdown = None;
        self.session.reset();
    }

    /// Wait for the next second and apply it. `None` when no countdown is
    /// running.
    pub async fn next_tick(&mut self) -> Option<SessionState> {
        self.countdown.as_mut()?.tick().await?;
        self.session.tick();
        self.release_if_done();
        Some(self.session.state())
    }

    pub fn has_countdown(&self) -> bool {
        self.countdown.is_some()
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    fn release_if_done(&mut self) {
        if !self.session.is_active() && self.countdown.take().is_some() {
            debug!("Countdown stopped in state {:?}", self.session.state());
        }
    }
}

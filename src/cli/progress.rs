use std::{sync::Mutex, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    error::{ServiceError, ShuffleError},
    info,
    shuffle::{Phase, ProgressObserver},
    success, warning,
};

#[derive(Default)]
struct State {
    bar: Option<ProgressBar>,
    phase: Option<Phase>,
    done: usize,
    total: usize,
}

/// Renders shuffle progress with spinners, bars and the colored log macros.
#[derive(Default)]
pub struct ConsoleProgress {
    state: Mutex<State>,
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}

fn batch_bar(message: &str, total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    pb.set_message(message.to_string());
    if let Ok(style) =
        ProgressStyle::with_template("{spinner:.blue} {msg} [{bar:30.cyan/blue}] {pos}/{len}")
    {
        pb.set_style(style.progress_chars("=> "));
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut State) -> T) -> T {
        let mut state = match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut state)
    }

    /// Prints a warning about the playlist state if a rewrite was under way.
    pub fn report_partial_state(&self) {
        self.with_state(|state| {
            if let Some(bar) = state.bar.take() {
                bar.finish_and_clear();
            }
            match state.phase {
                Some(Phase::Remove) => warning!(
                    "{}/{} remove batches were applied; the playlist is partially emptied. Tracks removed so far are not restored.",
                    state.done,
                    state.total
                ),
                Some(Phase::Add) => warning!(
                    "All tracks were removed but only {}/{} add batches were applied; the playlist is incomplete.",
                    state.done,
                    state.total
                ),
                _ => return,
            }
            warning!("Check the playlist before running the shuffle again.");
        })
    }

    pub fn finish(&self) {
        self.with_state(|state| {
            if let Some(bar) = state.bar.take() {
                bar.finish_and_clear();
            }
            state.phase = None;
        })
    }
}

impl ProgressObserver for ConsoleProgress {
    fn on_phase_start(&self, phase: Phase, batches: usize) {
        self.with_state(|state| {
            if let Some(bar) = state.bar.take() {
                bar.finish_and_clear();
            }
            if state.phase == Some(Phase::Fetch) {
                success!("Retrieved playlist tracks");
            }

            state.phase = Some(phase);
            state.done = 0;
            state.total = batches;
            state.bar = match phase {
                Phase::Fetch => Some(spinner("Retrieving playlist tracks...")),
                Phase::Shuffle => {
                    info!("Shuffling track order...");
                    None
                }
                Phase::Remove => Some(batch_bar("Removing current tracks", batches)),
                Phase::Add => Some(batch_bar("Adding tracks in new order", batches)),
            };
        })
    }

    fn on_batch_done(&self, phase: Phase, batch: usize, batches: usize) {
        self.with_state(|state| {
            state.done = batch;
            let Some(bar) = &state.bar else {
                return;
            };
            match phase {
                Phase::Fetch => {
                    bar.set_message(format!("Retrieving playlist tracks... page {}", batch))
                }
                _ => {
                    bar.set_position(batch as u64);
                    if batch == batches {
                        bar.finish_and_clear();
                        match phase {
                            Phase::Remove => success!("{} batches removed", batches),
                            Phase::Add => success!("{} batches added", batches),
                            _ => {}
                        }
                    }
                }
            }
        })
    }

    fn on_retry(&self, operation: &str, attempt: u32, error: &ServiceError) {
        self.with_state(|state| {
            let print = || warning!("Error during {} (attempt {}): {}", operation, attempt, error);
            match &state.bar {
                Some(bar) => bar.suspend(print),
                None => print(),
            }
        })
    }

    fn on_fatal_error(&self, _error: &ShuffleError) {
        self.report_partial_state();
    }
}

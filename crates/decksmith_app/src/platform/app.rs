use std::collections::VecDeque;
use std::io::{self, Write};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use decksmith_core::{update, AppState, Msg, SubmissionStatus};
use decksmith_engine::EngineHandle;
use decksmith_logging::{deck_debug, deck_warn};

use super::effects::EffectRunner;
use super::input::FormInput;
use super::ui::render::TerminalRenderer;
use crate::config::AppConfig;

/// Interval for the render tick while a submission is in flight.
const TICK_INTERVAL: Duration = Duration::from_millis(75);

pub fn run_app(config: &AppConfig, input: FormInput) -> Result<ExitCode> {
    let engine = EngineHandle::new(config.generate_settings())
        .context("Failed to start the submission engine")?;
    let runner = EffectRunner::new(engine, config.output_dir.clone());
    let mut controller = Controller::new(runner, TerminalRenderer::new(io::stderr()));

    for msg in input.into_messages() {
        controller.dispatch(msg);
    }
    controller.dispatch(Msg::SubmitClicked);
    controller.render_if_dirty();
    controller.wait_while_in_flight();

    Ok(controller.finish())
}

/// Owns the single `AppState` for the lifetime of one run.
struct Controller<W: Write> {
    state: AppState,
    runner: EffectRunner,
    renderer: TerminalRenderer<W>,
    inbox: VecDeque<Msg>,
}

impl<W: Write> Controller<W> {
    fn new(runner: EffectRunner, renderer: TerminalRenderer<W>) -> Self {
        Self {
            state: AppState::new(),
            runner,
            renderer,
            inbox: VecDeque::new(),
        }
    }

    /// Applies `msg` and every message its effects produce.
    fn dispatch(&mut self, msg: Msg) {
        self.inbox.push_back(msg);
        while let Some(msg) = self.inbox.pop_front() {
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;
            for effect in effects {
                if let Some(follow_up) = self.runner.run(effect) {
                    self.inbox.push_back(follow_up);
                }
            }
        }
    }

    /// Pumps engine events until the submission settles, rendering at most once per batch.
    fn wait_while_in_flight(&mut self) {
        while self.state.status().is_in_flight() {
            match self.runner.next_msg(TICK_INTERVAL) {
                Some(msg) => {
                    self.dispatch(msg);
                    while let Some(msg) = self.runner.try_next_msg() {
                        self.dispatch(msg);
                    }
                }
                None => self.dispatch(Msg::Tick),
            }
            self.render_if_dirty();
        }
    }

    fn render_if_dirty(&mut self) {
        if !self.state.consume_dirty() {
            return;
        }
        // Field edits render nothing new while the form is being filled in.
        if self.state.status() == &SubmissionStatus::Idle {
            return;
        }
        if let Err(err) = self.renderer.present(&self.state.view()) {
            deck_debug!("Render failed: {}", err);
        }
    }

    fn finish(self) -> ExitCode {
        match (self.state.status(), self.state.last_download()) {
            (SubmissionStatus::Succeeded, Some(path)) => {
                println!("{}", path.display());
                ExitCode::SUCCESS
            }
            (status, _) => {
                deck_warn!("Submission ended as {:?}", status);
                ExitCode::from(1)
            }
        }
    }
}

//! Operator console: raw-mode terminal that turns key presses into control
//! datagrams and paints the help/status screen.

use std::io::{stdout, Write};

use anyhow::Result;
use async_trait::async_trait;
use clap::Parser;
use client_core::{Dispatcher, InputEvent, InputSource, Presenter, StatusFrame};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind},
    execute, queue,
    style::{Attribute, Print, SetAttribute},
    terminal,
};
use shared::{
    domain::DEFAULT_AXIS_RANGE,
    protocol::{help_entries, Key, DEFAULT_CONTROL_ADDR},
};
use transport::UdpSender;

/// Matches the reference slider's single step.
const FOCUS_SLIDER_STEP: u16 = 50;

#[derive(Parser, Debug)]
struct Args {
    /// Actuator control endpoint.
    #[arg(long, default_value = DEFAULT_CONTROL_ADDR)]
    target: String,
}

/// Blocking crossterm reads, hopped off the runtime so the dispatcher's
/// async loop is never starved. Owns the local focus-target slider value;
/// the remote actuator is never queried from the input path.
struct ConsoleInput {
    focus_target: u16,
}

impl ConsoleInput {
    fn new() -> Self {
        Self { focus_target: 0 }
    }
}

#[async_trait]
impl InputSource for ConsoleInput {
    async fn next_event(&mut self) -> Result<Option<InputEvent>> {
        loop {
            let event = tokio::task::spawn_blocking(event::read).await??;
            let Event::Key(key) = event else { continue };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let max = DEFAULT_AXIS_RANGE.max as u16;
            return Ok(Some(match key.code {
                KeyCode::Char('+') | KeyCode::Char('=') => {
                    self.focus_target = (self.focus_target + FOCUS_SLIDER_STEP).min(max);
                    InputEvent::Slider(self.focus_target)
                }
                KeyCode::Char('-') => {
                    self.focus_target = self.focus_target.saturating_sub(FOCUS_SLIDER_STEP);
                    InputEvent::Slider(self.focus_target)
                }
                KeyCode::Char(c) => InputEvent::Key(Key::Char(c)),
                KeyCode::Left => InputEvent::Key(Key::Left),
                KeyCode::Right => InputEvent::Key(Key::Right),
                KeyCode::Up => InputEvent::Key(Key::Up),
                KeyCode::Down => InputEvent::Key(Key::Down),
                _ => continue,
            }));
        }
    }
}

struct TermPresenter;

impl TermPresenter {
    fn new() -> Self {
        let mut presenter = Self;
        presenter.refresh(&StatusFrame {
            last_event: None,
            help: help_entries(),
            status: "Press 'q' to exit",
        });
        presenter
    }

    fn draw(&self, frame: &StatusFrame<'_>) -> Result<()> {
        let mut out = stdout();
        let (width, height) = terminal::size()?;

        queue!(
            out,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0),
            SetAttribute(Attribute::Bold),
            Print("Lens Controller"),
            SetAttribute(Attribute::Reset),
        )?;

        let mut row = 2u16;
        for (label, description) in frame.help {
            queue!(
                out,
                cursor::MoveTo(0, row),
                Print(format!("{label:<13}: {description}")),
            )?;
            row += 1;
        }

        let last = match frame.last_event {
            Some(InputEvent::Key(key)) => format!("Last key pressed: {key:?}"),
            Some(InputEvent::Slider(value)) => format!("Focus target: {value}"),
            None => "No key press detected...".to_string(),
        };
        queue!(out, cursor::MoveTo(0, row + 1), Print(last))?;

        let bar = format!("{:<width$}", frame.status, width = width as usize);
        queue!(
            out,
            cursor::MoveTo(0, height.saturating_sub(1)),
            SetAttribute(Attribute::Reverse),
            Print(bar),
            SetAttribute(Attribute::Reset),
        )?;

        out.flush()?;
        Ok(())
    }
}

impl Presenter for TermPresenter {
    fn refresh(&mut self, frame: &StatusFrame<'_>) {
        // Presentation is a side concern; a paint failure must not stop the
        // dispatch loop.
        if let Err(error) = self.draw(frame) {
            tracing::warn!(%error, "screen refresh failed");
        }
    }
}

/// Restores the terminal on every exit path.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("warn").init();
    let args = Args::parse();

    let link = UdpSender::connect(&args.target).await?;

    let guard = TerminalGuard::enter()?;
    let dispatcher = Dispatcher::new(ConsoleInput::new(), link, TermPresenter::new());
    let summary = dispatcher.run().await;
    drop(guard);

    let summary = summary?;
    println!(
        "sent {} command(s), {} dropped locally",
        summary.commands_sent, summary.sends_failed
    );
    Ok(())
}

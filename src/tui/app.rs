//! Main TUI application.

use std::io;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use tracing::info;

use super::dashboard::Dashboard;
use super::event::{Event, EventSource, TerminalEvents};
use super::input::{KeyAction, handle_key};
use super::render::render;

/// Longest wait for input when no poll is pending.
const IDLE_WAIT: Duration = Duration::from_millis(250);

/// Main TUI application.
pub struct App {
    dashboard: Dashboard,
}

impl App {
    pub fn new(dashboard: Dashboard) -> Self {
        Self { dashboard }
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    /// Runs the TUI application on the controlling terminal.
    pub fn run(mut self) -> io::Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.run_loop(&mut terminal, &mut TerminalEvents);

        // Restore terminal, even when the loop failed
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    /// Event loop: paint when something changed, wait for input until the
    /// next poll is due, then run due polls.
    pub fn run_loop<B: Backend, E: EventSource>(
        &mut self,
        terminal: &mut Terminal<B>,
        events: &mut E,
    ) -> io::Result<()> {
        let mut needs_draw = true;

        loop {
            let dirty = self.dashboard.take_dirty();
            if needs_draw || dirty {
                terminal.draw(|frame| render(frame, &mut self.dashboard))?;
                needs_draw = false;
            }

            let timeout = self
                .dashboard
                .time_until_next()
                .map_or(IDLE_WAIT, |wait| wait.min(IDLE_WAIT));

            match events.next(timeout)? {
                Some(Event::Key(key)) => match handle_key(&mut self.dashboard, key) {
                    KeyAction::Quit => {
                        info!("quit requested");
                        self.dashboard.shutdown();
                    }
                    KeyAction::Redraw => needs_draw = true,
                    KeyAction::None => {}
                },
                Some(Event::Resize(..)) => {
                    terminal.autoresize()?;
                    needs_draw = true;
                }
                None => {}
            }

            if self.dashboard.should_quit() {
                return Ok(());
            }

            self.dashboard.run_due();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::rc::Rc;

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;
    use serde_json::json;

    use super::*;
    use crate::config::Config;
    use crate::provider::testing::ScriptedEndpoint;
    use crate::scheduler::{Clock, ManualClock};

    /// Plays back a script; `None` entries let virtual time run for the
    /// full timeout. Quits once the script is exhausted.
    struct ScriptedEvents {
        clock: Rc<ManualClock>,
        script: VecDeque<Option<Event>>,
        timeouts: Vec<Duration>,
    }

    impl EventSource for ScriptedEvents {
        fn next(&mut self, timeout: Duration) -> io::Result<Option<Event>> {
            self.timeouts.push(timeout);
            match self.script.pop_front() {
                Some(Some(event)) => Ok(Some(event)),
                Some(None) => {
                    self.clock.advance(timeout);
                    Ok(None)
                }
                None => Ok(Some(Event::Key(KeyEvent::new(
                    KeyCode::Char('q'),
                    KeyModifiers::NONE,
                )))),
            }
        }
    }

    fn idle(steps: usize) -> Vec<Option<Event>> {
        vec![None; steps]
    }

    #[test]
    fn test_loop_polls_renders_and_quits() {
        let clock = Rc::new(ManualClock::new());
        let metrics = ScriptedEndpoint::new(vec![Ok(json!({
            "clusterMetrics": {"appsRunning": 3, "appsSubmitted": 3}
        }))]);
        let apps = ScriptedEndpoint::new(vec![Ok(json!({
            "apps": {"app": [{"id": "application_1_0001", "state": "RUNNING"}]}
        }))]);
        let dashboard = Dashboard::new(
            &Config::default(),
            Box::new(metrics),
            Box::new(apps),
            Box::new(Rc::clone(&clock)),
        );
        let mut app = App::new(dashboard);
        let mut terminal = Terminal::new(TestBackend::new(140, 10)).unwrap();
        let mut events = ScriptedEvents {
            clock: Rc::clone(&clock),
            script: idle(8).into(),
            timeouts: Vec::new(),
        };

        app.run_loop(&mut terminal, &mut events).unwrap();

        assert!(app.dashboard().should_quit());
        assert!(app.dashboard().pending().is_empty());
        assert!(events.timeouts.iter().all(|t| *t <= IDLE_WAIT));
        // 8 idle waits of at most 250ms reach past the first apps poll.
        assert!(clock.now() >= Duration::from_millis(1200));

        let buffer = terminal.backend().buffer();
        let screen: String = (0..buffer.area.height)
            .flat_map(|y| (0..buffer.area.width).map(move |x| (x, y)))
            .map(|pos| buffer[pos].symbol().to_string())
            .collect();
        assert!(screen.contains("Apps: 3 running"));
        assert!(screen.contains("application_1_0001"));
    }

    #[test]
    fn test_input_is_handled_while_fetches_fail() {
        let clock = Rc::new(ManualClock::new());
        let dashboard = Dashboard::new(
            &Config::default(),
            Box::new(ScriptedEndpoint::failing()),
            Box::new(ScriptedEndpoint::failing()),
            Box::new(Rc::clone(&clock)),
        );
        let mut app = App::new(dashboard);
        let mut terminal = Terminal::new(TestBackend::new(80, 10)).unwrap();
        let mut script = idle(20);
        script.push(Some(Event::Key(KeyEvent::new(
            KeyCode::Char('+'),
            KeyModifiers::NONE,
        ))));
        script.push(Some(Event::Resize(80, 10)));
        let mut events = ScriptedEvents {
            clock: Rc::clone(&clock),
            script: script.into(),
            timeouts: Vec::new(),
        };

        app.run_loop(&mut terminal, &mut events).unwrap();

        assert_eq!(app.dashboard().interval(), Duration::from_secs(4));
        assert!(app.dashboard().should_quit());
    }
}

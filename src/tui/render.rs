//! Main rendering logic for TUI.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::dashboard::Dashboard;
use super::style::Styles;
use super::widgets::METRICS_PANE_HEIGHT;

/// Main render function.
pub fn render(frame: &mut Frame, dashboard: &mut Dashboard) {
    let chunks = Layout::vertical([
        Constraint::Length(METRICS_PANE_HEIGHT), // Cluster metrics
        Constraint::Min(1),                      // Applications
        Constraint::Length(1),                   // Footer
    ])
    .split(frame.area());

    dashboard.metrics.render(frame, chunks[0]);
    dashboard.apps.render(frame, chunks[1]);
    render_footer(frame, chunks[2], dashboard);
}

fn render_footer(frame: &mut Frame, area: Rect, dashboard: &Dashboard) {
    let interval = dashboard.interval().as_secs_f64();
    let mut spans = vec![
        Span::styled("F10", Styles::footer_key()),
        Span::styled("Quit ", Styles::footer()),
        Span::styled(" +/-", Styles::footer_key()),
        Span::styled(format!("Interval {}s ", interval), Styles::footer()),
    ];
    if dashboard.is_failing() {
        spans.push(Span::styled(" Fetch failed ", Styles::footer_alert()));
    }
    let line = Line::from(spans);
    frame.render_widget(Paragraph::new(line).style(Styles::footer()), area);
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;
    use std::time::Duration;

    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::config::Config;
    use crate::provider::testing::ScriptedEndpoint;
    use crate::scheduler::ManualClock;

    #[test]
    fn test_layout_and_footer() {
        let mut dashboard = Dashboard::new(
            &Config::default(),
            Box::new(ScriptedEndpoint::failing()),
            Box::new(ScriptedEndpoint::failing()),
            Box::new(ManualClock::new()),
        );
        let mut terminal = Terminal::new(TestBackend::new(120, 12)).unwrap();
        terminal
            .draw(|frame| render(frame, &mut dashboard))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let row = |y: u16| -> String {
            (0..buffer.area.width)
                .map(|x| buffer[(x, y)].symbol())
                .collect()
        };
        assert!(row(1).contains("vCore["));
        assert!(row(1).contains("Apps: 0 running"));
        assert!(row(5).starts_with("AppID"));
        assert!(row(11).starts_with("F10Quit  +/-Interval 2s"));
        assert_eq!(buffer[(119, 11)].bg, Styles::footer().bg.unwrap());
    }

    #[test]
    fn test_footer_flags_failing_fetches() {
        let clock = Rc::new(ManualClock::new());
        let mut dashboard = Dashboard::new(
            &Config::default(),
            Box::new(ScriptedEndpoint::failing()),
            Box::new(ScriptedEndpoint::failing()),
            Box::new(Rc::clone(&clock)),
        );
        clock.advance(Duration::from_secs(1));
        dashboard.run_due();

        let mut terminal = Terminal::new(TestBackend::new(80, 8)).unwrap();
        terminal
            .draw(|frame| render(frame, &mut dashboard))
            .unwrap();
        let buffer = terminal.backend().buffer();
        let footer: String = (0..buffer.area.width)
            .map(|x| buffer[(x, 7)].symbol())
            .collect();
        assert!(footer.contains("Fetch failed"));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let mut dashboard = Dashboard::new(
            &Config::default(),
            Box::new(ScriptedEndpoint::failing()),
            Box::new(ScriptedEndpoint::failing()),
            Box::new(ManualClock::new()),
        );
        for (w, h) in [(1, 1), (5, 3), (20, 7)] {
            let mut terminal = Terminal::new(TestBackend::new(w, h)).unwrap();
            terminal
                .draw(|frame| render(frame, &mut dashboard))
                .unwrap();
        }
    }
}

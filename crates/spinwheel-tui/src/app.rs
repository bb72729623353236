use std::time::Duration;

use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::sync::watch;
use tracing::{debug, info};

use spinwheel_core::resolver::{SpinResolver, SpinState};
use spinwheel_core::scheduler::TokioScheduler;
use spinwheel_core::session::SpinSession;

use crate::action::Action;
use crate::component::Component;
use crate::components::help_popup::HelpPopup;
use crate::components::log_panel::LogPanel;
use crate::components::spin_button::SpinButton;
use crate::components::status_bar::StatusBar;
use crate::components::wheel_panel::WheelPanel;
use crate::components::winner_banner::WinnerBanner;
use crate::config::AppConfig;
use crate::event::{self, AppEvent};
use crate::keymap::Keymap;
use crate::theme::Theme;
use crate::tui::{self, Tui};

const TITLE: &str = "Spin to Win";
const BUTTON_WIDTH: u16 = 12;

pub struct App {
    config: AppConfig,
    should_quit: bool,
    keymap: Keymap,
    theme: Theme,

    session: SpinSession<TokioScheduler<Action>>,
    state_rx: watch::Receiver<SpinState>,

    // Components
    wheel_panel: WheelPanel,
    spin_button: SpinButton,
    winner_banner: WinnerBanner,
    status_bar: StatusBar,
    log_panel: LogPanel,
    help_popup: HelpPopup,

    // Last rendered button area, for mouse hit-testing
    button_area: Option<Rect>,

    action_tx: UnboundedSender<Action>,
    action_rx: UnboundedReceiver<Action>,
}

impl App {
    /// Build the app. `seed` makes spins reproducible.
    pub fn new(config: AppConfig, seed: Option<u64>) -> anyhow::Result<Self> {
        let theme = Theme::load(&config.general.theme);
        let keymap = Keymap::from_config(&config.keybindings);
        let (action_tx, action_rx) = tokio::sync::mpsc::unbounded_channel();

        let resolver = match seed {
            Some(seed) => SpinResolver::seeded(config.wheel.clone(), seed)?,
            None => SpinResolver::new(config.wheel.clone())?,
        };
        let state_rx = resolver.subscribe();
        let scheduler = TokioScheduler::new(action_tx.clone(), Action::ResolveSpin);

        let wheel_panel = WheelPanel::new(
            theme.clone(),
            config.wheel.segments.clone(),
            config.wheel.animation_duration(),
        );

        Ok(Self {
            should_quit: false,
            session: SpinSession::new(resolver, scheduler),
            state_rx,
            wheel_panel,
            spin_button: SpinButton::new(theme.clone()),
            winner_banner: WinnerBanner::new(theme.clone(), keymap.hint("spin")),
            status_bar: StatusBar::new(theme.clone(), &keymap),
            log_panel: LogPanel::new(theme.clone()),
            help_popup: HelpPopup::new(theme.clone(), &keymap),
            button_area: None,
            keymap,
            theme,
            config,
            action_tx,
            action_rx,
        })
    }

    /// Main event loop.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        tui::install_panic_hook();
        let mut terminal = tui::init()?;

        let result = self.event_loop(&mut terminal).await;

        self.session.cancel();
        tui::restore()?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut Tui) -> anyhow::Result<()> {
        let tick_rate = Duration::from_millis(self.config.general.tick_rate_ms);

        loop {
            terminal.draw(|frame| self.render(frame))?;

            if let Some(app_event) = event::poll_event(tick_rate) {
                let action = match app_event {
                    AppEvent::Key(key) => self.handle_key(key),
                    AppEvent::Mouse(mouse) => self.handle_mouse(mouse),
                    AppEvent::Resize(w, h) => Action::Resize(w, h),
                    AppEvent::Tick => Action::Tick,
                };
                if !matches!(action, Action::None) {
                    let _ = self.action_tx.send(action);
                }
            }

            // Let the resolution timer run on single-threaded runtimes too
            tokio::task::yield_now().await;
            self.drain_actions();

            if self.should_quit {
                return Ok(());
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Action {
        // Popups intercept keys first
        if self.help_popup.visible {
            self.help_popup.handle_key_event(key)
        } else if self.log_panel.visible {
            self.log_panel.handle_key_event(key)
        } else {
            self.keymap.resolve(&key)
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Action {
        if self.help_popup.visible || self.log_panel.visible {
            return Action::None;
        }
        match self.button_area {
            Some(area) => self.spin_button.handle_mouse_event(mouse, area),
            None => Action::None,
        }
    }

    fn drain_actions(&mut self) {
        while let Ok(action) = self.action_rx.try_recv() {
            self.process_action(action);
        }
    }

    fn process_action(&mut self, action: Action) {
        match action {
            Action::Tick => {
                self.wheel_panel.tick();
                self.status_bar.tick();
            }
            Action::Quit => {
                info!("Quit requested");
                self.should_quit = true;
            }
            Action::Resize(w, h) => debug!("Terminal resized to {}x{}", w, h),
            Action::Spin => {
                if self.session.spin() {
                    let state = self.session.resolver().state();
                    self.log_panel.push(format!(
                        "Spinning to {:.1}°",
                        state.cumulative_rotation_degrees
                    ));
                } else {
                    self.status_bar
                        .set_message("Wheel is already spinning".to_string());
                }
            }
            Action::ResolveSpin(ticket) => {
                if let Some(resolution) = self.session.on_ticket(&ticket) {
                    self.log_panel.push(format!(
                        "You won: {} (segment {}, resting at {:.1}°)",
                        resolution.winner,
                        resolution.index,
                        resolution.rotation_degrees.rem_euclid(360.0)
                    ));
                }
            }
            Action::ToggleLogPanel => self.log_panel.toggle(),
            Action::ShowHelp => self.help_popup.show(),
            Action::ClosePopup | Action::None => {}
        }
        self.sync_state();
    }

    /// Pull the latest resolver snapshot into the components.
    fn sync_state(&mut self) {
        if !self.state_rx.has_changed().unwrap_or(false) {
            return;
        }
        let state = self.state_rx.borrow_and_update().clone();
        self.wheel_panel.observe(&state);
        self.spin_button.enabled = !state.is_spinning;
        self.winner_banner.set(state.winner.clone(), state.is_spinning);
        self.status_bar.observe(&state);
    }

    fn render(&mut self, frame: &mut ratatui::Frame) {
        let full = frame.area();

        let [title_area, wheel_area, button_row, banner_area, status_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(6),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(full);

        let title = Paragraph::new(Line::from(Span::styled(TITLE, self.theme.title)))
            .alignment(Alignment::Center);
        frame.render_widget(title, title_area);

        self.wheel_panel.render(frame, wheel_area);

        let [button_area] = Layout::horizontal([Constraint::Length(BUTTON_WIDTH)])
            .flex(Flex::Center)
            .areas(button_row);
        self.button_area = Some(button_area);
        self.spin_button.render(frame, button_area);

        self.winner_banner.render(frame, banner_area);
        self.status_bar.render(frame, status_area);

        // Popups on top
        self.log_panel.render(frame, full);
        self.help_popup.render(frame, full);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use super::*;

    fn app() -> App {
        App::new(AppConfig::default(), Some(1)).unwrap()
    }

    fn screen(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_spin_then_resolve() {
        let mut app = app();
        app.process_action(Action::Spin);
        assert!(!app.spin_button.enabled);
        assert_eq!(app.winner_banner.text(), "Spinning...");

        tokio::time::sleep(Duration::from_secs(6)).await;
        app.drain_actions();

        assert!(app.spin_button.enabled);
        assert!(app.winner_banner.text().starts_with("You won: "));
        assert_eq!(app.session.resolver().state().spins_completed, 1);
        assert_eq!(app.log_panel.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_spin_while_spinning_resolves_once() {
        let mut app = app();
        app.process_action(Action::Spin);
        app.process_action(Action::Spin);

        tokio::time::sleep(Duration::from_secs(6)).await;
        let mut resolutions = 0;
        while let Ok(action) = app.action_rx.try_recv() {
            if matches!(action, Action::ResolveSpin(_)) {
                resolutions += 1;
            }
            app.process_action(action);
        }
        assert_eq!(resolutions, 1);
        assert_eq!(app.session.resolver().state().spins_completed, 1);
    }

    #[tokio::test]
    async fn test_render_shows_title_button_and_hint() {
        let mut app = app();
        let text = screen(&mut app);
        assert!(text.contains("Spin to Win"));
        assert!(text.contains("SPIN"));
        assert!(text.contains("Press Space to spin"));
        assert!(app.button_area.is_some());
    }

    #[tokio::test]
    async fn test_help_popup_captures_keys() {
        let mut app = app();
        app.process_action(Action::ShowHelp);
        assert!(app.help_popup.visible);

        // space closes help instead of spinning
        let action = app.handle_key(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE));
        assert!(matches!(action, Action::ClosePopup));
        assert!(!app.help_popup.visible);

        let action = app.handle_key(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE));
        assert!(matches!(action, Action::Spin));
    }

    #[tokio::test]
    async fn test_quit() {
        let mut app = app();
        let action = app.handle_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE));
        app.process_action(action);
        assert!(app.should_quit);
    }
}

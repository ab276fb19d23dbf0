mod logging;

use std::io::{Write, stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use color_eyre::eyre::WrapErr;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
};
use rand::{SeedableRng, rngs::StdRng};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::Stylize,
    text::Line,
};
use stardust_background::{Animator, Effects, FrameClock, PixelCanvas};
use stardust_config::{CellConfig, Config};
use stardust_core::{Point, Theme, Viewport};

/// Poll timeout while no frame is pending (inert background).
const IDLE_POLL: Duration = Duration::from_millis(250);

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let mut args = std::env::args().skip(1);
    let config_path = match args.next().as_deref() {
        Some("--print-config") => {
            print!("{}", Config::default().to_toml_string()?);
            return Ok(());
        }
        Some(path) => PathBuf::from(path),
        None => Config::default_path()?,
    };
    let config = Config::load(&config_path)
        .wrap_err_with(|| format!("loading {}", config_path.display()))?;

    if let Some(path) = logging::init_logging(&config.log) {
        tracing::info!(log = %path.display(), "logging started");
    }

    let (cols, rows) = crossterm::terminal::size()?;
    let terminal = ratatui::init();
    let result = with_mouse_capture(&mut stdout(), || {
        App::new(config, cols, rows).run(terminal)
    });
    ratatui::restore();
    result
}

/// Run `body` with mouse capture enabled on `out`.
///
/// Never returns early: capture is released even when `body` fails, and the
/// first error wins.
fn with_mouse_capture<W: Write>(
    out: &mut W,
    body: impl FnOnce() -> color_eyre::Result<()>,
) -> color_eyre::Result<()> {
    let result = execute!(out, EnableMouseCapture)
        .map_err(color_eyre::Report::from)
        .and_then(|()| body());
    let released = execute!(out, DisableMouseCapture);
    result?;
    released?;
    Ok(())
}

/// The application: hosts the starfield animator in the terminal.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Cell geometry used to map the terminal to surface pixels.
    cell: CellConfig,
    /// Current theme.
    theme: Theme,
    /// The animated background.
    animator: Animator<PixelCanvas, StdRng>,
    /// Display refresh source for the animator.
    clock: FrameClock,
    /// When the application started; frame time is measured from here.
    started: Instant,
}

impl App {
    /// Construct a new instance of [`App`] for a terminal of `cols x rows`.
    pub fn new(config: Config, cols: u16, rows: u16) -> Self {
        let config = config.sanitized();
        let effects = Effects {
            twinkle_chance: config.effects.twinkle_chance,
            shooting_star_chance: config.effects.shooting_star_chance,
        };
        let animator = Animator::mount(
            acquire_surface(&config),
            viewport_for(&config.cell, cols, rows),
            config.theme,
            effects,
            StdRng::from_os_rng(),
        );

        Self {
            running: false,
            clock: FrameClock::new(config.effective_frame_rate()),
            theme: config.theme,
            cell: config.cell,
            animator,
            started: Instant::now(),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        self.animator.start(&mut self.clock);
        while self.running {
            self.deliver_due_frame();
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        self.animator.stop(&mut self.clock);
        Ok(())
    }

    /// Hand the animator its frame once the clock says it is due.
    fn deliver_due_frame(&mut self) {
        let now = Instant::now();
        if let Some(id) = self.clock.take_due(now) {
            let elapsed = now.duration_since(self.started);
            self.animator.on_frame(id, elapsed, &mut self.clock);
        }
    }

    /// Renders the background, then the help line on top of it.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        if let Some(canvas) = self.animator.surface() {
            frame.render_widget(canvas, area);
        }

        let [_, help_area] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)])
            .areas(area);
        let help = Line::from(vec![
            "q".bold().white(),
            " quit  ".dark_gray(),
            "t".bold().white(),
            format!(" theme: {}", self.theme.name()).dark_gray(),
        ])
        .centered();
        frame.render_widget(help, help_area);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits at most until the next frame is due.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        let timeout = self
            .clock
            .time_until_due(Instant::now())
            .unwrap_or(IDLE_POLL);
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                Event::Resize(cols, rows) => {
                    self.animator
                        .handle_resize(viewport_for(&self.cell, cols, rows));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('t')) => self.toggle_theme(),
            _ => {}
        }
    }

    /// Forward pointer movement for the parallax effect.
    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        if matches!(mouse.kind, MouseEventKind::Moved | MouseEventKind::Drag(_)) {
            self.animator
                .handle_pointer_move(pointer_for(&self.cell, mouse.column, mouse.row));
        }
    }

    /// Toggle between dark and light theme.
    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
        self.animator.set_theme(self.theme);
        tracing::debug!(theme = self.theme.name(), "theme toggled");
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

/// Acquire the drawing surface, or `None` when the background must stay off.
fn acquire_surface(config: &Config) -> Option<PixelCanvas> {
    let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
    surface_for(config, no_color)
}

fn surface_for(config: &Config, no_color: bool) -> Option<PixelCanvas> {
    if !config.background.enabled || no_color {
        return None;
    }
    Some(PixelCanvas::for_cells(
        config.cell.width_px.max(1),
        config.cell.height_px.max(1),
    ))
}

/// Surface size of a terminal of `cols x rows` cells.
fn viewport_for(cell: &CellConfig, cols: u16, rows: u16) -> Viewport {
    Viewport::new(
        u32::from(cols).saturating_mul(cell.width_px),
        u32::from(rows).saturating_mul(cell.height_px),
    )
}

/// Surface position of the center of a terminal cell.
fn pointer_for(cell: &CellConfig, column: u16, row: u16) -> Point {
    Point::new(
        (column as f32 + 0.5) * cell.width_px as f32,
        (row as f32 + 0.5) * cell.height_px as f32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_for_cells() {
        let cell = CellConfig::default();
        assert_eq!(viewport_for(&cell, 80, 24), Viewport::new(640, 384));
        assert_eq!(viewport_for(&cell, 0, 0), Viewport::new(0, 0));
    }

    /// Writer that rejects every write.
    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_mouse_capture_failure_returns_error() {
        let mut ran = false;
        let result = with_mouse_capture(&mut BrokenPipe, || {
            ran = true;
            Ok(())
        });
        assert!(result.is_err());
        assert!(!ran);
    }

    #[test]
    fn test_mouse_capture_released_after_body_error() {
        let mut out = Vec::new();
        let result = with_mouse_capture(&mut out, || Err(color_eyre::eyre::eyre!("boom")));
        assert_eq!(result.unwrap_err().to_string(), "boom");

        let mut expected = Vec::new();
        execute!(expected, EnableMouseCapture, DisableMouseCapture).unwrap();
        assert_eq!(out, expected);
    }

    #[test]
    fn test_viewport_for_huge_cells_saturates() {
        let cell = CellConfig {
            width_px: 100_000,
            height_px: 100_000,
        };
        let viewport = viewport_for(&cell, 50_000, 50_000);
        assert_eq!(viewport, Viewport::new(u32::MAX, u32::MAX));
    }

    #[test]
    fn test_app_sanitizes_unchecked_config() {
        let mut config = Config::default();
        config.effects.twinkle_chance = f64::NAN;
        config.effects.shooting_star_chance = 7.0;
        config.cell.width_px = 100_000;

        let mut app = App::new(config, 100, 4);
        assert_eq!(app.cell.width_px, stardust_config::MAX_CELL_PX);
        assert_eq!(
            viewport_for(&app.cell, 100, 4),
            Viewport::new(100 * stardust_config::MAX_CELL_PX, 64)
        );

        app.animator.start(&mut app.clock);
        let later = Instant::now() + Duration::from_secs(1);
        if let Some(id) = app.clock.take_due(later) {
            app.animator
                .on_frame(id, Duration::from_millis(16), &mut app.clock);
        }
    }

    #[test]
    fn test_pointer_for_cell_center() {
        let cell = CellConfig::default();
        assert_eq!(pointer_for(&cell, 0, 0), Point::new(4.0, 8.0));
        assert_eq!(pointer_for(&cell, 10, 2), Point::new(84.0, 40.0));
    }

    #[test]
    fn test_surface_acquisition() {
        let config = Config::default();
        assert!(surface_for(&config, false).is_some());
        assert!(surface_for(&config, true).is_none());

        let mut disabled = Config::default();
        disabled.background.enabled = false;
        assert!(surface_for(&disabled, false).is_none());
    }

    #[test]
    fn test_app_toggles_theme() {
        let mut app = App::new(Config::default(), 40, 10);
        assert_eq!(app.theme, Theme::Dark);
        app.on_key_event(KeyEvent::from(KeyCode::Char('t')));
        assert_eq!(app.theme, Theme::Light);
        assert_eq!(app.animator.theme(), Theme::Light);
    }

    #[test]
    fn test_app_quits_on_q() {
        let mut app = App::new(Config::default(), 40, 10);
        app.running = true;
        app.on_key_event(KeyEvent::from(KeyCode::Char('q')));
        assert!(!app.running);
    }
}

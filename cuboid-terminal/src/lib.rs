/// Terminal host for the cube carousel
use crossterm::{
    cursor,
    event::{
        self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event,
        KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use cuboid_core::{
    sheet::parse_face_sheet, Cuboid, CuboidConfig, FaceIndex, FaceSource, Fling, GestureThresholds,
    GlyphSurface, Host, PointerEvent, PointerPhase, Rect, Size, Swipe, FACE_COUNT,
};
use nalgebra::Point2;
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod renderer;

pub use renderer::AsciiRenderer;

/// Roughly eight pixels per terminal cell
pub const TERMINAL_DENSITY: f32 = 0.125;

/// Rows kept free above the faces for the status line
pub const FACE_VERTICAL_SPACE: f32 = 2.0;

/// Faces shown when no sheet is given
pub const DEMO_SHEET: &str = r"
[face] one
+----------------------+
|                      |
|   ##    ONE          |
|  ###                 |
|   ##    swipe or     |
|   ##    press <- ->  |
|  ####                |
|                      |
+----------------------+
[face] two
+----------------------+
|                      |
|  ####   TWO          |
|     #                |
|  ####                |
|  #                   |
|  ####                |
|                      |
+----------------------+
[face] three
+----------------------+
|                      |
|  ####   THREE        |
|     #                |
|   ###                |
|     #                |
|  ####                |
|                      |
+----------------------+
[face] four
+----------------------+
|                      |
|  #  #   FOUR         |
|  #  #                |
|  ####                |
|     #                |
|     #                |
|                      |
+----------------------+
";

/// Timestamps for `count` events that arrived somewhere in `(from, to]`,
/// spaced evenly and ending at `to`.
///
/// Input is drained once per frame, so read time says nothing about when a
/// sample happened; stamping a whole batch with one instant would make every
/// in-frame flick look infinitely fast.
pub fn spread_timestamps(from: Duration, to: Duration, count: usize) -> Vec<Duration> {
    if count == 0 {
        return Vec::new();
    }
    let step = to.saturating_sub(from) / count as u32;
    (1..=count as u32).map(|i| from + step * i).collect()
}

/// The four face surfaces plus their current placement
pub struct FaceDeck {
    faces: [GlyphSurface; FACE_COUNT],
    bounds: Rect,
    container: Size,
    layout_requested: bool,
}

impl FaceDeck {
    pub fn new(faces: [GlyphSurface; FACE_COUNT]) -> Self {
        Self {
            faces,
            bounds: Rect::default(),
            container: Size::default(),
            layout_requested: true,
        }
    }

    /// Size every face is laid out with: the largest surface, plus the
    /// spacing above it since the layout's bottom edge is measured from the
    /// container top.
    pub fn face_size(&self) -> Size {
        let width = self.faces.iter().map(GlyphSurface::width).max().unwrap_or(0);
        let height = self.faces.iter().map(GlyphSurface::height).max().unwrap_or(0);
        Size::new(width as f32, height as f32 + FACE_VERTICAL_SPACE)
    }

    pub fn layout(&mut self, cuboid: &Cuboid, container: Size) {
        self.container = container;
        self.bounds = cuboid.layout(container.width);
        self.layout_requested = false;
    }

    pub fn needs_layout(&self) -> bool {
        self.layout_requested
    }
}

impl FaceSource for FaceDeck {
    type Surface = GlyphSurface;

    fn surface(&self, face: FaceIndex) -> Option<&GlyphSurface> {
        self.faces.get(face.get())
    }

    fn bounds(&self, _face: FaceIndex) -> Rect {
        self.bounds
    }

    fn container_size(&self) -> Size {
        self.container
    }
}

impl Host for FaceDeck {
    fn request_layout(&mut self) {
        self.layout_requested = true;
    }
}

/// Main application struct for the terminal carousel
pub struct TerminalApp {
    cuboid: Cuboid,
    deck: FaceDeck,
    renderer: AsciiRenderer,
    running: bool,
    started: Instant,
    /// End of the last drained input window, relative to `started`
    last_input: Duration,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
    last_swipe: Swipe,
}

impl TerminalApp {
    pub fn new(faces: [GlyphSurface; FACE_COUNT]) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Self::with_size(faces, width, height)
    }

    /// Build for a screen of `width` x `height` cells without touching the terminal
    pub fn with_size(faces: [GlyphSurface; FACE_COUNT], width: u16, height: u16) -> io::Result<Self> {
        let mut deck = FaceDeck::new(faces);
        let mut config =
            CuboidConfig::new(deck.face_size(), GestureThresholds::scaled(TERMINAL_DENSITY))
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        config.item_vertical_space = FACE_VERTICAL_SPACE;
        let cuboid =
            Cuboid::new(config).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        deck.layout(&cuboid, Size::new(width as f32, height as f32));
        log::info!("terminal {}x{}, faces laid out at {:?}", width, height, deck.bounds);

        Ok(Self {
            cuboid,
            deck,
            renderer: AsciiRenderer::new(width as usize, height as usize),
            running: true,
            started: Instant::now(),
            last_input: Duration::ZERO,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
            last_swipe: Swipe::None,
        })
    }

    pub fn with_demo_faces() -> io::Result<Self> {
        let faces = parse_face_sheet(DEMO_SHEET)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Self::new(faces)
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            EnableFocusChange,
            cursor::Hide
        )?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(
            stdout(),
            DisableFocusChange,
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        )?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            // Drain input so fast drags are not spread across frames
            let mut batch = Vec::new();
            while event::poll(Duration::from_millis(0))? {
                batch.push(event::read()?);
            }
            self.process_batch(batch, self.started.elapsed());

            if self.deck.needs_layout() {
                let container = self.deck.container_size();
                self.deck.layout(&self.cuboid, container);
            }

            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    /// Handle events that arrived since the previous batch, up to `now`.
    fn process_batch(&mut self, events: Vec<Event>, now: Duration) {
        let times = spread_timestamps(self.last_input, now, events.len());
        for (event, time) in events.into_iter().zip(times) {
            self.handle_event(event, time);
        }
        self.last_input = now;
    }

    fn handle_event(&mut self, event: Event, time: Duration) {
        match event {
            Event::Key(KeyEvent { code, .. }) => self.handle_key(code),
            Event::Mouse(mouse) => self.handle_mouse(mouse, time),
            Event::FocusLost => self.cuboid.cancel_gesture(),
            Event::Resize(width, height) => {
                self.renderer.resize(width as usize, height as usize);
                self.deck
                    .layout(&self.cuboid, Size::new(width as f32, height as f32));
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
            }
            KeyCode::Char('l') | KeyCode::Right => self.synthetic_fling(1.0),
            KeyCode::Char('h') | KeyCode::Left => self.synthetic_fling(-1.0),
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, time: Duration) {
        let phase = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => PointerPhase::Down,
            MouseEventKind::Drag(MouseButton::Left) => PointerPhase::Move,
            MouseEventKind::Up(MouseButton::Left) => PointerPhase::Up,
            // Another button interrupts the swipe
            MouseEventKind::Down(_) | MouseEventKind::Up(_) => {
                self.cuboid.cancel_gesture();
                return;
            }
            _ => return,
        };
        let event = PointerEvent::new(phase, mouse.column as f32, mouse.row as f32, time);
        let swipe = self.cuboid.on_pointer(&event, &mut self.deck);
        if phase == PointerPhase::Up {
            self.last_swipe = swipe;
        }
    }

    /// Swipe across the face horizontally in `direction` at a speed inside
    /// the fling window.
    fn synthetic_fling(&mut self, direction: f32) {
        let thresholds = self.cuboid.config().thresholds;
        let bounds = self.deck.bounds;
        let start = Point2::new((bounds.left + bounds.right) / 2.0, bounds.top + 1.0);
        let distance = thresholds.min_swipe_distance * 4.0;
        let speed = (thresholds.min_fling_velocity + thresholds.max_fling_velocity) / 2.0;

        self.cuboid.on_pointer_down(start, self.started.elapsed());
        let fling = Fling::new(
            start.x + direction * distance,
            start.y,
            direction * speed,
            0.0,
        );
        self.last_swipe = self.cuboid.on_fling(&fling, &mut self.deck);
    }

    fn render(&mut self) -> io::Result<()> {
        self.renderer.clear();

        let commands = self.cuboid.draw(&self.deck);
        for command in &commands {
            self.renderer.draw_command(command, &self.deck);
        }

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "Cuboid | FPS: {:.1} | Face: {} | Last: {:?} | Drag or Left/Right=Rotate Q=Quit",
                self.fps,
                self.cuboid.state().current_index(),
                self.last_swipe
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crossterm::event::KeyModifiers;

    fn app() -> TerminalApp {
        TerminalApp::with_size(parse_face_sheet(DEMO_SHEET).unwrap(), 80, 24).unwrap()
    }

    fn mouse(kind: MouseEventKind, column: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row: 5,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn quick_flick_right() -> Vec<Event> {
        vec![
            mouse(MouseEventKind::Down(MouseButton::Left), 30),
            mouse(MouseEventKind::Drag(MouseButton::Left), 34),
            mouse(MouseEventKind::Drag(MouseButton::Left), 38),
            mouse(MouseEventKind::Up(MouseButton::Left), 40),
        ]
    }

    #[test]
    fn test_spread_timestamps_end_at_window_close() {
        let ms = Duration::from_millis;
        assert_eq!(
            spread_timestamps(ms(100), ms(130), 3),
            vec![ms(110), ms(120), ms(130)]
        );
        assert!(spread_timestamps(ms(0), ms(33), 0).is_empty());
        // A window that has not advanced still yields one stamp per event
        assert_eq!(spread_timestamps(ms(50), ms(50), 2), vec![ms(50), ms(50)]);
    }

    #[test]
    fn test_flick_within_one_frame_advances() {
        let mut app = app();
        app.process_batch(quick_flick_right(), Duration::from_millis(33));

        assert_eq!(app.last_swipe, Swipe::Advance);
        assert_eq!(app.cuboid.state().next_index().map(FaceIndex::get), Some(0));
        assert!(app.deck.needs_layout());
    }

    #[test]
    fn test_flicks_in_consecutive_frames_both_classify() {
        let mut app = app();
        app.process_batch(quick_flick_right(), Duration::from_millis(33));
        app.process_batch(Vec::new(), Duration::from_millis(66));
        app.process_batch(quick_flick_right(), Duration::from_millis(99));
        assert_eq!(app.last_swipe, Swipe::Advance);
    }

    #[test]
    fn test_focus_loss_cancels_swipe() {
        let mut app = app();
        let mut events = quick_flick_right();
        events.insert(2, Event::FocusLost);
        app.process_batch(events, Duration::from_millis(33));

        assert_eq!(app.last_swipe, Swipe::None);
        assert!(!app.cuboid.state().in_transition());
    }

    #[test]
    fn test_other_button_cancels_swipe() {
        let mut app = app();
        let mut events = quick_flick_right();
        events.insert(2, mouse(MouseEventKind::Down(MouseButton::Right), 36));
        app.process_batch(events, Duration::from_millis(33));

        assert_eq!(app.last_swipe, Swipe::None);
        assert!(!app.cuboid.state().in_transition());
    }

    fn deck() -> FaceDeck {
        FaceDeck::new(parse_face_sheet(DEMO_SHEET).unwrap())
    }

    #[test]
    fn test_demo_sheet_faces_share_a_size() {
        let deck = deck();
        assert_eq!(deck.face_size(), Size::new(24.0, 9.0 + FACE_VERTICAL_SPACE));
    }

    #[test]
    fn test_layout_matches_surface_height() {
        let mut deck = deck();
        let cuboid = Cuboid::new(CuboidConfig {
            face_size: deck.face_size(),
            item_vertical_space: FACE_VERTICAL_SPACE,
            ..CuboidConfig::default()
        })
        .unwrap();
        deck.layout(&cuboid, Size::new(80.0, 24.0));
        assert_eq!(deck.bounds, Rect::new(28.0, 2.0, 52.0, 11.0));
        assert!(!deck.needs_layout());

        deck.request_layout();
        assert!(deck.needs_layout());
    }

    #[test]
    fn test_terminal_thresholds_accept_key_flings() {
        let t = GestureThresholds::scaled(TERMINAL_DENSITY);
        let speed = (t.min_fling_velocity + t.max_fling_velocity) / 2.0;
        assert!(t.velocity_in_range(speed));
        assert_eq!(t.min_swipe_distance, 2.0);
    }
}

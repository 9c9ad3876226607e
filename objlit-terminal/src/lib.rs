/// Terminal front end: event loop, input handling and frame output
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use log::{debug, info};
use objlit_core::{Command, FlatMesh, SceneConfig, SceneState, Texture};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod cli;
pub mod renderer;

pub use renderer::{AsciiRenderer, Frame};

/// Terminal cells are roughly twice as tall as they are wide
pub fn terminal_aspect(width: u16, height: u16) -> f32 {
    width.max(1) as f32 / (2.0 * height.max(1) as f32)
}

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    mesh: FlatMesh,
    texture: Option<Texture>,
    scene: SceneState,
    renderer: AsciiRenderer,
    running: bool,
    frame_time: Duration,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(
        mesh: FlatMesh,
        texture: Option<Texture>,
        config: SceneConfig,
        fps: u32,
    ) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self::with_size(mesh, texture, config, fps, width, height))
    }

    /// Build the app for a fixed viewport without querying the terminal
    pub fn with_size(
        mesh: FlatMesh,
        texture: Option<Texture>,
        config: SceneConfig,
        fps: u32,
        width: u16,
        height: u16,
    ) -> Self {
        Self {
            mesh,
            texture,
            scene: SceneState::new(config, terminal_aspect(width, height)),
            renderer: AsciiRenderer::new(width as usize, height as usize),
            running: true,
            frame_time: Duration::from_millis(1000 / u64::from(fps.max(1))),
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        }
    }

    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        while self.running {
            let frame_start = Instant::now();

            // Handle input
            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }

            // Update
            self.scene.tick();

            // Render
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < self.frame_time {
                std::thread::sleep(self.frame_time - elapsed);
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

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) => self.handle_key(code, modifiers),
            Event::Resize(width, height) => {
                debug!("resized to {width}x{height}");
                self.renderer.resize(width as usize, height as usize);
                self.scene.set_aspect(terminal_aspect(width, height));
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        let key = match code {
            KeyCode::Esc => '\u{1b}',
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => '\u{1b}',
            KeyCode::Char(c) => c,
            _ => return,
        };
        match Command::from_key(key) {
            Some(Command::Quit) => {
                info!("quit requested");
                self.running = false;
            }
            Some(command) => self.scene.apply(command),
            None => {}
        }
    }

    pub fn render_frame(&mut self) {
        let pose = self.scene.pose();
        let projection = self.scene.projection();
        let frame = Frame {
            pose: &pose,
            projection: &projection,
            lighting: &self.scene.lighting,
            texture: self.texture.as_ref(),
        };

        self.renderer.clear();
        self.renderer.render_mesh(&self.mesh, &frame);
    }

    fn render(&mut self) -> io::Result<()> {
        self.render_frame();

        // Output to terminal
        let mut stdout = stdout();
        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(self.status_line()),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }

    /// Status overlay for row 0, cut to the viewport width so it never wraps
    /// into the frame
    pub fn status_line(&self) -> String {
        let lights: Vec<&str> = self
            .scene
            .lighting
            .enabled()
            .iter()
            .map(|&on| if on { "on" } else { "off" })
            .collect();
        let line = format!(
            "objlit | FPS: {:.1} | mode: {} | spin: {} | lights: {} | ambient: {:.2} | scale: {:.2} | WASDFG=move Q=mode R=spin 1-3=lights Z/X=ambient ,/.=scale Esc=quit",
            self.fps,
            self.scene.mode,
            if self.scene.spin.rotating { "on" } else { "off" },
            lights.join("/"),
            self.scene.lighting.ambient,
            self.scene.scale,
        );
        line.chars().take(self.renderer.width()).collect()
    }
}

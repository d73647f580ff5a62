//! Interactive A* visualizer shared by the demo binaries.
//!
//! [`Visualizer`] is the top-level driver: it owns the grid, the editor, the
//! search engine and a [`Renderer`], and interleaves input handling, drawing
//! and search steps on a single thread.

use std::time::Duration;

use gridpath_core::{Editor, Grid, Input, Paint, Renderer, Status};
use gridpath_search::{Engine, PathResult};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// How long the idle loop waits for input before polling again.
const IDLE_POLL: Duration = Duration::from_millis(100);

const HELP: &str =
    "left click: start/end/wall  right click: erase  space: run  r: random walls  c: clear  q: quit";

/// Settings for a [`Visualizer`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisualizerConfig {
    pub rows: i32,
    pub cols: i32,
    /// Pause between search steps so the frontier can be watched.
    pub step_delay: Duration,
    /// Share of free cells blocked by a scatter, in percent.
    pub scatter_percent: u32,
    /// Seed for obstacle scattering; random when `None`.
    pub seed: Option<u64>,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            rows: 30,
            cols: 30,
            step_delay: Duration::from_millis(20),
            scatter_percent: 30,
            seed: None,
        }
    }
}

/// The editor/search loop.
pub struct Visualizer<R: Renderer> {
    config: VisualizerConfig,
    grid: Grid,
    editor: Editor,
    engine: Engine,
    renderer: R,
    rng: StdRng,
    status: Status,
}

impl<R: Renderer> Visualizer<R> {
    pub fn new(config: VisualizerConfig, renderer: R) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        Self {
            grid: Grid::build(config.rows, config.cols),
            editor: Editor::new(),
            engine: Engine::new(),
            renderer,
            rng: StdRng::seed_from_u64(seed),
            status: Status::new(HELP),
            config,
        }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    #[inline]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    #[inline]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[inline]
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Run until the user quits.
    ///
    /// The renderer is initialised first and always closed on the way out,
    /// including when an error ends the loop.
    pub fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.renderer.init()?;
        let result = self.event_loop();
        self.renderer.close();
        result
    }

    fn event_loop(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.renderer.draw(&self.grid, &self.status)?;
        loop {
            let Some(input) = self.renderer.poll_input(IDLE_POLL)? else {
                continue;
            };
            if !self.handle(input)? {
                return Ok(());
            }
            self.renderer.draw(&self.grid, &self.status)?;
        }
    }

    /// Apply one input. Returns `false` when the application should stop.
    pub fn handle(&mut self, input: Input) -> Result<bool, Box<dyn std::error::Error>> {
        match input {
            Input::Paint(p) => {
                if !self.grid.contains(p) {
                    return Ok(true);
                }
                self.grid.clear_search_marks();
                self.status = match self.editor.paint(&mut self.grid, p)? {
                    Paint::Start => Status::new(format!("start set at {p}")),
                    Paint::End => Status::new(format!("end set at {p}")),
                    Paint::Blocked | Paint::Unchanged => self.status.clone(),
                };
            }
            Input::Erase(p) => {
                if !self.grid.contains(p) {
                    return Ok(true);
                }
                self.grid.clear_search_marks();
                self.editor.erase(&mut self.grid, p)?;
            }
            Input::Run => return self.search(),
            Input::Clear => {
                self.editor.clear(&mut self.grid);
                self.status = Status::new(HELP);
            }
            Input::Scatter => {
                self.grid.clear_search_marks();
                let n = self.editor.scatter(
                    &mut self.grid,
                    &mut self.rng,
                    self.config.scatter_percent,
                );
                self.status = Status::new(format!("{n} walls added"));
            }
            Input::Cancel => {}
            Input::Quit => return Ok(false),
        }
        Ok(true)
    }

    /// Run one search, drawing after every step. Returns `false` if the user
    /// asked to quit while it was running.
    fn search(&mut self) -> Result<bool, Box<dyn std::error::Error>> {
        let Some((start, end)) = self.editor.endpoints() else {
            self.status = Status::new("place a start and an end first");
            return Ok(true);
        };

        let renderer = &mut self.renderer;
        let delay = self.config.step_delay;
        let mut quit = false;
        let mut render_err = None;

        let result = self.engine.run(&mut self.grid, start, end, |step| {
            let status = Status::new(format!(
                "searching: step {}, frontier {}  (esc: cancel)",
                step.iteration, step.frontier_len
            ));
            if let Err(e) = renderer.draw(step.grid, &status) {
                render_err = Some(e);
                return false;
            }
            match renderer.poll_input(delay) {
                Ok(Some(Input::Cancel)) => false,
                Ok(Some(Input::Quit)) => {
                    quit = true;
                    false
                }
                Ok(_) => true,
                Err(e) => {
                    render_err = Some(e);
                    false
                }
            }
        });

        if let Some(e) = render_err {
            return Err(e);
        }

        let expanded = self.engine.stats().expanded;
        self.status = match result {
            Ok(PathResult::Succeeded(path)) => Status::new(format!(
                "path found: {} steps, {expanded} cells expanded",
                path.len() - 1
            )),
            Ok(PathResult::Failed) => {
                Status::new(format!("no path exists ({expanded} cells expanded)"))
            }
            Ok(PathResult::Cancelled) => Status::new("search cancelled"),
            Err(e) => {
                log::warn!("search rejected: {e}");
                Status::new(e.to_string())
            }
        };
        Ok(!quit)
    }
}

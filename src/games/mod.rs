//! The mini-games
//!
//! Each game is a [`GameRules`] implementation run by a [`Controller`]. The
//! page only sees them through [`Playable`], so the host can swap games
//! without knowing their rule types.

pub mod balloons;
pub mod bubbles;
pub mod drawing;
pub mod falling;
pub mod feeding;
pub mod piano;
pub mod sorting;

use crate::PlayArea;
use crate::platform::FrameHandle;
use crate::renderer::Scene;
use crate::sim::{Controller, Feedback, GameRules, PointerOutcome};

pub use balloons::Balloons;
pub use bubbles::BubbleWrap;
pub use drawing::Drawing;
pub use falling::FallingShapes;
pub use feeding::Feeding;
pub use piano::Piano;
pub use sorting::Sorting;

/// Available games
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameKind {
    #[default]
    Balloons,
    Bubbles,
    Falling,
    Feeding,
    Drawing,
    Piano,
    Sorting,
}

impl GameKind {
    pub const ALL: [GameKind; 7] = [
        GameKind::Balloons,
        GameKind::Bubbles,
        GameKind::Falling,
        GameKind::Feeding,
        GameKind::Drawing,
        GameKind::Piano,
        GameKind::Sorting,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::Balloons => "balloons",
            GameKind::Bubbles => "bubbles",
            GameKind::Falling => "falling",
            GameKind::Feeding => "feeding",
            GameKind::Drawing => "drawing",
            GameKind::Piano => "piano",
            GameKind::Sorting => "sorting",
        }
    }

    /// Parse a `data-game` value or URL hash (leading `#` allowed)
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim().trim_start_matches('#');
        match s.to_lowercase().as_str() {
            "balloons" | "balloon" => Some(GameKind::Balloons),
            "bubbles" | "bubble" | "bubble-wrap" | "bubblewrap" => Some(GameKind::Bubbles),
            "falling" | "shapes" | "falling-shapes" => Some(GameKind::Falling),
            "feeding" | "feed" | "animals" => Some(GameKind::Feeding),
            "drawing" | "draw" | "paint" => Some(GameKind::Drawing),
            "piano" | "keyboard" | "music" => Some(GameKind::Piano),
            "sorting" | "sort" | "colors" => Some(GameKind::Sorting),
            _ => None,
        }
    }

    /// String-table key of the display title
    pub fn title_key(&self) -> &'static str {
        match self {
            GameKind::Balloons => "games.balloons",
            GameKind::Bubbles => "games.bubbles",
            GameKind::Falling => "games.falling",
            GameKind::Feeding => "games.feeding",
            GameKind::Drawing => "games.drawing",
            GameKind::Piano => "games.piano",
            GameKind::Sorting => "games.sorting",
        }
    }
}

/// A running game as seen by the page
pub trait Playable {
    fn name(&self) -> &'static str;
    fn start(&mut self) -> FrameHandle;
    fn frame(&mut self, dt_ms: f64);
    fn handle_pointer(&mut self, x: f32, y: f32) -> PointerOutcome;
    fn handle_drag(&mut self, x: f32, y: f32) -> PointerOutcome;
    fn stop(&mut self);
    fn resize(&mut self, area: PlayArea);
    fn is_running(&self) -> bool;
    fn live_count(&self) -> usize;
    /// Draw list for the current state
    fn scene(&self) -> Scene;
}

impl<R: GameRules> Playable for Controller<R> {
    fn name(&self) -> &'static str {
        self.rules().name()
    }

    fn start(&mut self) -> FrameHandle {
        Controller::start(self)
    }

    fn frame(&mut self, dt_ms: f64) {
        Controller::frame(self, dt_ms);
    }

    fn handle_pointer(&mut self, x: f32, y: f32) -> PointerOutcome {
        Controller::handle_pointer(self, x, y)
    }

    fn handle_drag(&mut self, x: f32, y: f32) -> PointerOutcome {
        Controller::handle_drag(self, x, y)
    }

    fn stop(&mut self) {
        Controller::stop(self);
    }

    fn resize(&mut self, area: PlayArea) {
        Controller::resize(self, area);
    }

    fn is_running(&self) -> bool {
        Controller::is_running(self)
    }

    fn live_count(&self) -> usize {
        Controller::live_count(self)
    }

    fn scene(&self) -> Scene {
        let area = self.area();
        Scene::capture(
            area,
            self.rules().background(),
            self.rules().backdrop(area),
            self.entities(),
            self.effects(),
        )
    }
}

/// Build a stopped controller for `kind`
pub fn build(kind: GameKind, area: PlayArea, feedback: Feedback, seed: u64) -> Box<dyn Playable> {
    match kind {
        GameKind::Balloons => Box::new(Controller::new(Balloons::new(), area, feedback, seed)),
        GameKind::Bubbles => Box::new(Controller::new(BubbleWrap::new(), area, feedback, seed)),
        GameKind::Falling => Box::new(Controller::new(FallingShapes::new(), area, feedback, seed)),
        GameKind::Feeding => Box::new(Controller::new(Feeding::new(), area, feedback, seed)),
        GameKind::Drawing => Box::new(Controller::new(Drawing::new(), area, feedback, seed)),
        GameKind::Piano => Box::new(Controller::new(Piano::new(), area, feedback, seed)),
        GameKind::Sorting => Box::new(Controller::new(Sorting::new(), area, feedback, seed)),
    }
}

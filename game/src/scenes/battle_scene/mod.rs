//====================================================================

use common::{Color, Size};
use engine::{scene::Scene, tools::KeyCode, StateInner};
use renderer::{Canvas, TextPainter};
use ui::{ControlEvent, Controls};

use crate::{
    api::BattleApi,
    board::{self, BoardLayout},
    config::ClientConfig,
    session::{BattleSession, SessionPhase},
};

pub mod ui;

//====================================================================

pub const FRAME_SIZE: Size<u32> = Size::new(800, 480);
pub const TITLE: &str = "⚔️ Auto Battler Demo";

pub struct BattleScene {
    session: BattleSession,
    controls: Controls,
    painter: TextPainter,
    autoplay_turns: Option<u32>,

    board: Canvas,
    status: String,
    dirty: bool,
}

impl BattleScene {
    pub fn new(state: &mut StateInner, config: &ClientConfig) -> Self {
        state.window.set_title(TITLE);
        state.renderer.set_clear_color(Color::BLACK);

        let session = BattleSession::new(
            BattleApi::http(config.api_base.clone()),
            config.battle_request(),
        );

        Self {
            session,
            controls: Controls::new(),
            painter: TextPainter::new(),
            autoplay_turns: config.autoplay_turns,
            board: Canvas::new(board::BOARD_SIZE, board::BACKGROUND),
            status: String::new(),
            dirty: true,
        }
    }
}

impl Scene for BattleScene {
    fn resize(&mut self, _state: &mut StateInner, new_size: Size<u32>) {
        log::debug!("Presenting {} frame in {} window", FRAME_SIZE, new_size);
    }

    fn update(&mut self, state: &mut StateInner) {
        self.session.start();

        if self.session.poll() {
            self.on_new_snapshot(state);
        }

        let cursor = ui::frame_cursor(state.cursor, state.window.size(), FRAME_SIZE);

        match self.controls.process_input(&state.keys, &state.mouse, cursor) {
            Some(ControlEvent::NextTurn) => {
                self.session.request_next_turn();
            }
            Some(ControlEvent::Autoplay) => {
                self.session.request_autoplay(self.autoplay_turns);
            }
            None => {}
        }

        if state.keys.just_pressed(KeyCode::KeyL) {
            self.session.request_battle_list();
        }

        let status = self.status_line();
        if status != self.status {
            self.status = status;
            self.dirty = true;
        }

        if self.dirty || self.controls.is_dirty() {
            self.present(state);
        }
    }
}

impl BattleScene {
    fn on_new_snapshot(&mut self, state: &mut StateInner) {
        let Some(battle) = self.session.battle() else {
            return;
        };

        let layout = BoardLayout::from_summary(battle);
        self.board = board::paint(&layout, &mut self.painter);

        state.window.set_title(&format!(
            "{} - Turn {} ({})",
            TITLE, battle.turn, battle.state
        ));

        self.dirty = true;
    }

    fn status_line(&self) -> String {
        let status = match self.session.phase() {
            SessionPhase::Uninitialized | SessionPhase::Creating => "Creating battle...".into(),
            SessionPhase::Fetching => "Loading battle...".into(),
            SessionPhase::Failed => "Backend unavailable, see log".into(),
            SessionPhase::Ready => self
                .session
                .last_result()
                .unwrap_or("Ready")
                .to_string(),
        };

        match self.session.pending_turns() {
            0 => status,
            pending => format!("{} [{} pending]", status, pending),
        }
    }

    fn present(&mut self, state: &mut StateInner) {
        let mut frame = Canvas::new(FRAME_SIZE, Color::BLACK);
        frame.blit(&self.board, 0, 0);
        self.controls.draw(&mut frame, &mut self.painter, &self.status);

        state.renderer.set_canvas(&frame);
        self.dirty = false;
    }
}

//====================================================================

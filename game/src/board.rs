//====================================================================

use common::{Color, Size};
use renderer::{Canvas, TextPainter, TextStyle};

use crate::battle::BattleSummary;

//====================================================================

pub const BOARD_SIZE: Size<u32> = Size::new(800, 400);
pub const BACKGROUND: Color = Color::from_hex(0x1e1e1e);

pub const TEAM_A_COLUMN: f32 = 50.;
pub const TEAM_B_COLUMN: f32 = 500.;
pub const FIRST_ROW: f32 = 50.;
pub const ROW_SPACING: f32 = 40.;

pub const LABEL_STYLE: TextStyle = TextStyle {
    font_size: 14.,
    line_height: 1.2,
    color: Color::WHITE,
};

//====================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    TeamA,
    TeamB,
}

impl Side {
    #[inline]
    pub fn glyph(&self) -> &'static str {
        match self {
            Side::TeamA => "🛡️",
            Side::TeamB => "⚔️",
        }
    }

    #[inline]
    pub fn column(&self) -> f32 {
        match self {
            Side::TeamA => TEAM_A_COLUMN,
            Side::TeamB => TEAM_B_COLUMN,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BoardLabel {
    pub side: Side,
    /// Position in the team's roster.
    pub index: usize,
    pub text: String,
    pub position: glam::Vec2,
}

//====================================================================

/// Where every roster entry of a snapshot goes on the board.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoardLayout {
    labels: Vec<BoardLabel>,
}

impl BoardLayout {
    pub fn from_summary(summary: &BattleSummary) -> Self {
        let team = |side: Side, roster: &[crate::characters::BattleCharacter]| {
            roster
                .iter()
                .enumerate()
                .map(move |(index, fighter)| BoardLabel {
                    side,
                    index,
                    text: format!("{} {}", side.glyph(), fighter.name()),
                    position: glam::vec2(side.column(), FIRST_ROW + index as f32 * ROW_SPACING),
                })
                .collect::<Vec<_>>()
        };

        let mut labels = team(Side::TeamA, &summary.team_a);
        labels.extend(team(Side::TeamB, &summary.team_b));

        Self { labels }
    }

    #[inline]
    pub fn labels(&self) -> &[BoardLabel] {
        &self.labels
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Paints a fresh board. Nothing from a previous paint carries over.
pub fn paint(layout: &BoardLayout, painter: &mut TextPainter) -> Canvas {
    let mut canvas = Canvas::new(BOARD_SIZE, BACKGROUND);

    layout.labels().iter().for_each(|label| {
        painter.draw_text(&mut canvas, &label.text, label.position, &LABEL_STYLE)
    });

    log::trace!("Painted board with {} labels", layout.len());

    canvas
}

//====================================================================


//====================================================================

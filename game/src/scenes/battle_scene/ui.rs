//====================================================================

use common::{Color, Rect, Size};
use engine::tools::{Input, KeyCode, MouseButton};
use renderer::{Canvas, TextPainter, TextStyle};

//====================================================================

pub const STRIP: Rect = Rect::new(0., 400., 800., 80.);

const STRIP_COLOR: Color = Color::from_hex(0x141414);
const BUTTON_COLOR: Color = Color::from_hex(0x3a3a3a);
const BUTTON_HOVER_COLOR: Color = Color::from_hex(0x4f4f4f);
const FOCUS_COLOR: Color = Color::from_hex(0xd0d0d0);

const BUTTON_STYLE: TextStyle = TextStyle {
    font_size: 14.,
    line_height: 1.2,
    color: Color::WHITE,
};

const STATUS_STYLE: TextStyle = TextStyle {
    font_size: 13.,
    line_height: 1.2,
    color: Color::from_hex(0xa0a0a0),
};

const STATUS_POSITION: glam::Vec2 = glam::Vec2::new(296., 428.);

//====================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlEvent {
    NextTurn,
    Autoplay,
}

#[derive(Debug)]
struct Button {
    label: &'static str,
    rect: Rect,
    event: ControlEvent,
}

/// The strip under the board: "Next Turn" and "Auto Play" plus a status line.
#[derive(Debug)]
pub struct Controls {
    buttons: [Button; 2],
    focused: usize,
    hovered: Option<usize>,
    dirty: bool,
}

impl Default for Controls {
    fn default() -> Self {
        Self::new()
    }
}

impl Controls {
    pub fn new() -> Self {
        Self {
            buttons: [
                Button {
                    label: "Next Turn",
                    rect: Rect::new(16., 416., 120., 40.),
                    event: ControlEvent::NextTurn,
                },
                Button {
                    label: "Auto Play",
                    rect: Rect::new(152., 416., 120., 40.),
                    event: ControlEvent::Autoplay,
                },
            ],
            focused: 0,
            hovered: None,
            dirty: true,
        }
    }

    /// True when the strip looks different from its last draw.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// `cursor` is in frame pixels, not window pixels.
    pub fn process_input(
        &mut self,
        keys: &Input<KeyCode>,
        mouse: &Input<MouseButton>,
        cursor: glam::Vec2,
    ) -> Option<ControlEvent> {
        let hovered = self
            .buttons
            .iter()
            .position(|button| button.rect.contains(cursor));

        if hovered != self.hovered {
            self.hovered = hovered;
            self.dirty = true;
        }

        let left = keys.just_pressed(KeyCode::ArrowLeft);
        let right = keys.just_pressed(KeyCode::ArrowRight);
        let dir = right as i8 - left as i8;

        if dir != 0 {
            let focused = (self.focused as i8 + dir).clamp(0, self.buttons.len() as i8 - 1);
            if focused as usize != self.focused {
                self.focused = focused as usize;
                self.dirty = true;
            }
        }

        if mouse.just_pressed(MouseButton::Left) {
            if let Some(index) = hovered {
                self.focused = index;
                self.dirty = true;
                return Some(self.buttons[index].event);
            }
        }

        if keys.just_pressed(KeyCode::Enter) {
            return Some(self.buttons[self.focused].event);
        }

        if keys.just_pressed(KeyCode::Space) {
            return Some(ControlEvent::NextTurn);
        }

        if keys.just_pressed(KeyCode::KeyP) {
            return Some(ControlEvent::Autoplay);
        }

        None
    }

    pub fn draw(&mut self, canvas: &mut Canvas, painter: &mut TextPainter, status: &str) {
        canvas.fill_rect(STRIP, STRIP_COLOR);

        self.buttons
            .iter()
            .enumerate()
            .for_each(|(index, button)| {
                if index == self.focused {
                    let border = Rect::new(
                        button.rect.x - 2.,
                        button.rect.y - 2.,
                        button.rect.width + 4.,
                        button.rect.height + 4.,
                    );
                    canvas.fill_rect(border, FOCUS_COLOR);
                }

                let color = match self.hovered == Some(index) {
                    true => BUTTON_HOVER_COLOR,
                    false => BUTTON_COLOR,
                };
                canvas.fill_rect(button.rect, color);

                let label_size = painter.measure(button.label, &BUTTON_STYLE);
                let label_position = button.rect.center()
                    - glam::vec2(label_size.width, label_size.height) / 2.;

                painter.draw_text(canvas, button.label, label_position, &BUTTON_STYLE);
            });

        painter.draw_text(canvas, status, STATUS_POSITION, &STATUS_STYLE);

        self.dirty = false;
    }
}

/// Maps a window cursor position onto the frame that is stretched over it.
pub fn frame_cursor(cursor: glam::Vec2, window_size: Size<u32>, frame_size: Size<u32>) -> glam::Vec2 {
    if window_size.width == 0 || window_size.height == 0 {
        return cursor;
    }

    cursor * frame_size.as_vec2() / window_size.as_vec2()
}

//====================================================================

#[cfg(test)]
mod tests {
    use engine::tools::process_inputs;

    use super::*;

    fn press_key(key: KeyCode) -> Input<KeyCode> {
        let mut keys = Input::default();
        process_inputs(&mut keys, key, true);
        keys
    }

    fn click() -> Input<MouseButton> {
        let mut mouse = Input::default();
        process_inputs(&mut mouse, MouseButton::Left, true);
        mouse
    }

    #[test]
    fn clicking_buttons() {
        let mut controls = Controls::new();
        let keys = Input::default();

        assert_eq!(
            controls.process_input(&keys, &click(), glam::vec2(70., 430.)),
            Some(ControlEvent::NextTurn)
        );
        assert_eq!(
            controls.process_input(&keys, &click(), glam::vec2(200., 430.)),
            Some(ControlEvent::Autoplay)
        );
        assert_eq!(
            controls.process_input(&keys, &click(), glam::vec2(400., 200.)),
            None
        );
    }

    #[test]
    fn keyboard_shortcuts() {
        let mut controls = Controls::new();
        let mouse = Input::default();
        let away = glam::vec2(-1., -1.);

        assert_eq!(
            controls.process_input(&press_key(KeyCode::Space), &mouse, away),
            Some(ControlEvent::NextTurn)
        );
        assert_eq!(
            controls.process_input(&press_key(KeyCode::KeyP), &mouse, away),
            Some(ControlEvent::Autoplay)
        );
        assert_eq!(
            controls.process_input(&press_key(KeyCode::Enter), &mouse, away),
            Some(ControlEvent::NextTurn)
        );

        assert_eq!(
            controls.process_input(&press_key(KeyCode::ArrowRight), &mouse, away),
            None
        );
        assert_eq!(
            controls.process_input(&press_key(KeyCode::Enter), &mouse, away),
            Some(ControlEvent::Autoplay)
        );
    }

    #[test]
    fn hover_marks_dirty() {
        let mut controls = Controls::new();
        let mut canvas = Canvas::new(Size::new(800, 480), Color::BLACK);
        controls.draw(&mut canvas, &mut TextPainter::new(), "");
        assert!(!controls.is_dirty());

        let none = Input::default();
        controls.process_input(&Input::default(), &none, glam::vec2(20., 420.));
        assert!(controls.is_dirty());
    }

    #[test]
    fn cursor_scales_with_window() {
        let frame = Size::new(800, 480);

        assert_eq!(
            frame_cursor(glam::vec2(800., 480.), Size::new(1600, 960), frame),
            glam::vec2(400., 240.)
        );
        assert_eq!(
            frame_cursor(glam::vec2(10., 10.), Size::new(0, 0), frame),
            glam::vec2(10., 10.)
        );
    }
}

//====================================================================

//====================================================================

use std::{
    collections::HashSet,
    hash::{BuildHasherDefault, Hash},
};

use rustc_hash::FxHasher;

//====================================================================

type Hasher = BuildHasherDefault<FxHasher>;

//====================================================================

pub use winit::{event::MouseButton, keyboard::KeyCode};

/// Button state for a single frame. `just_pressed` is cleared at the end of
/// every tick.
#[derive(Debug)]
pub struct Input<T> {
    pressed: HashSet<T, Hasher>,
    just_pressed: HashSet<T, Hasher>,
}

impl<T> Default for Input<T> {
    fn default() -> Self {
        Self {
            pressed: HashSet::default(),
            just_pressed: HashSet::default(),
        }
    }
}

impl<T> Input<T>
where
    T: Eq + Hash,
{
    #[inline]
    pub fn pressed(&self, input: T) -> bool {
        self.pressed.contains(&input)
    }

    #[inline]
    pub fn just_pressed(&self, input: T) -> bool {
        self.just_pressed.contains(&input)
    }
}

pub fn process_inputs<T>(input: &mut Input<T>, val: T, pressed: bool)
where
    T: Eq + Hash + Copy,
{
    match pressed {
        true => {
            // Key repeat reports pressed again without a release in between
            if input.pressed.insert(val) {
                input.just_pressed.insert(val);
            }
        }
        false => {
            input.pressed.remove(&val);
        }
    }
}

pub fn reset_input<T>(input: &mut Input<T>) {
    input.just_pressed.clear();
}

//====================================================================


//====================================================================

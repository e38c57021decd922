//====================================================================

use common::Size;

use crate::StateInner;

//====================================================================

/// Whatever the window is currently showing. Scenes are built by the
/// [`Runner`](crate::window::Runner) once the window and renderer exist.
pub trait Scene: 'static {
    fn resize(&mut self, state: &mut StateInner, new_size: Size<u32>);
    fn update(&mut self, state: &mut StateInner);
}

//====================================================================

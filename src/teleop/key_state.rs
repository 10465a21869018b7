use crate::errors::Result;

/// Source of "is this key held down right now"
///
/// The loop calls [`KeyState::refresh`] before checking keys and while it
/// pauses, then queries individual keys with [`KeyState::is_pressed`].
pub trait KeyState {
    /// Pull pending input so that `is_pressed` reflects the keyboard now.
    fn refresh(&mut self) -> Result<()> {
        Ok(())
    }

    fn is_pressed(&self, key: char) -> bool;
}

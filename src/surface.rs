//! Capabilities the simulation asks of its host: somewhere to draw and
//! something to make noise with.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sprite {
    Raven,
    Boom,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sound {
    Boom,
}

/// Destination rectangle in logical viewport pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shade {
    Black,
    White,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextStyle {
    pub shade: Shade,
    pub align: Align,
}

/// The visible drawing surface.
pub trait Canvas {
    fn clear(&mut self);

    /// Draw one frame of a sprite sheet scaled into `dest`.  A canvas that
    /// could not load the sheet draws nothing.
    fn draw_sprite(&mut self, sprite: Sprite, frame: u32, dest: Rect);

    /// `(x, y)` is the text baseline anchor, interpreted according to `style.align`.
    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: TextStyle);
}

/// Fire-and-forget audio.  Implementations must not block.
pub trait SoundPlayer {
    fn play(&mut self, sound: Sound);
}

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EncoderConfig {
    /// Flips each glyph's text matrix vertically.
    ///
    /// Glyph positions come from a y-down device space; with the flip, glyphs
    /// come out upright once the initial transform maps that space onto the
    /// y-up page.
    ///
    /// Defaults to `true`.
    pub flip_glyph_y: bool,

    /// Leaves out the `Tr` operator when the computed mode is plain fill,
    /// which is the mode a fresh text state starts in anyway.
    ///
    /// Defaults to `false`.
    pub skip_default_rendering_mode: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            flip_glyph_y: true,
            skip_default_rendering_mode: false,
        }
    }
}

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Width/height pair in pixels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

impl Size {
    pub fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }
    /// Area in pixels.
    pub fn area(&self) -> u64 {
        (self.w as u64) * (self.h as u64)
    }
    /// Returns true if either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }
}

/// Axis-aligned rectangle (pixels). `x,y` is top-left; `w,h` are sizes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
    pub fn size(&self) -> Size {
        Size::new(self.w, self.h)
    }
    /// Inclusive right edge coordinate (`x + w - 1`).
    pub fn right(&self) -> u32 {
        self.x + self.w.saturating_sub(1)
    }
    /// Inclusive bottom edge coordinate (`y + h - 1`).
    pub fn bottom(&self) -> u32 {
        self.y + self.h.saturating_sub(1)
    }
    /// Returns true if `r` is fully inside `self` (inclusive edges).
    pub fn contains(&self, r: &Rect) -> bool {
        r.x >= self.x && r.y >= self.y && r.right() <= self.right() && r.bottom() <= self.bottom()
    }
    /// Returns true if either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }
    /// Area in pixels.
    pub fn area(&self) -> u64 {
        (self.w as u64) * (self.h as u64)
    }
}

/// 3D offset applied when a sprite is rendered (x/y in pixels, z for depth
/// tweaks). Carried through placement untouched; the packer never reads it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct SpriteOffset {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl SpriteOffset {
    pub const ZERO: SpriteOffset = SpriteOffset {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// One color plane of an RGBA sheet. Single-channel sprites occupy exactly
/// one of these; the index doubles as the byte lane within an RGBA8 texel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Red,
    Green,
    Blue,
    Alpha,
}

impl Channel {
    /// All channels in packing order.
    pub const ALL: [Channel; 4] = [Channel::Red, Channel::Green, Channel::Blue, Channel::Alpha];

    /// Byte lane within an RGBA8 texel (also the packing ordinal).
    pub fn index(&self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
            Channel::Alpha => 3,
        }
    }

    /// The channel after this one in packing order, or `None` after `Alpha`.
    pub fn next(&self) -> Option<Channel> {
        match self {
            Channel::Red => Some(Channel::Green),
            Channel::Green => Some(Channel::Blue),
            Channel::Blue => Some(Channel::Alpha),
            Channel::Alpha => None,
        }
    }
}

impl FromStr for Channel {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "r" | "red" => Ok(Self::Red),
            "g" | "green" => Ok(Self::Green),
            "b" | "blue" => Ok(Self::Blue),
            "a" | "alpha" => Ok(Self::Alpha),
            _ => Err(()),
        }
    }
}

/// How a sheet's texels are interpreted, which fixes how many independent
/// channel sub-atlases fit on one sheet.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SheetKind {
    /// Palette-indexed artwork: one packable channel per sheet.
    Indexed,
    /// Channel-packed artwork: all four planes packed independently.
    Packed,
}

impl SheetKind {
    /// Number of channel sub-atlases a sheet of this kind holds.
    pub fn channels(&self) -> usize {
        match self {
            SheetKind::Indexed => 1,
            SheetKind::Packed => 4,
        }
    }

    /// Channel new sheets of this kind start packing into.
    pub fn first_channel(&self) -> Channel {
        Channel::Red
    }
}

impl FromStr for SheetKind {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "indexed" => Ok(Self::Indexed),
            "packed" => Ok(Self::Packed),
            _ => Err(()),
        }
    }
}

/// Blend mode a sprite is drawn with. Placement always assigns `Alpha`;
/// consumers may rewrite it before rendering.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BlendMode {
    #[default]
    Alpha,
    Additive,
    Multiply,
}

impl FromStr for BlendMode {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "alpha" => Ok(Self::Alpha),
            "additive" => Ok(Self::Additive),
            "multiply" => Ok(Self::Multiply),
            _ => Err(()),
        }
    }
}

/// Stable handle to one sheet owned by an `AtlasPacker`, in allocation order.
/// Sheets are append-only, so the index never dangles while the packer lives.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SheetId(pub(crate) usize);

impl SheetId {
    /// Position of the sheet in the packer's allocation order.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Where a placed image landed: sheet, region, channel, and the render
/// parameters carried through from the request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Sprite {
    /// Sheet holding the pixels.
    pub sheet: SheetId,
    /// Region within the sheet. Empty for degenerate (zero-size) requests.
    pub rect: Rect,
    /// Per-row depth ramp applied when rendering.
    pub z_ramp: f32,
    /// Render-time offset.
    pub offset: SpriteOffset,
    /// Channel plane the pixels occupy.
    pub channel: Channel,
    /// Blend mode to draw with.
    pub blend: BlendMode,
}

/// Statistics about packing efficiency across all sheets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PackStats {
    /// Number of sheets allocated so far.
    pub num_sheets: usize,
    /// Number of non-degenerate sprites placed.
    pub num_sprites: usize,
    /// Total packable area: sheet area times packable channels per sheet.
    pub total_area: u64,
    /// Area reserved by placed sprites.
    pub used_area: u64,
    /// used_area / total_area (0.0 to 1.0). Higher is better.
    pub occupancy: f64,
}

impl PackStats {
    /// Returns a human-readable summary of the statistics.
    pub fn summary(&self) -> String {
        format!(
            "Sheets: {}, Sprites: {}, Occupancy: {:.2}%, Total Area: {} px², Used Area: {} px²",
            self.num_sheets,
            self.num_sprites,
            self.occupancy * 100.0,
            self.total_area,
            self.used_area,
        )
    }

    /// Returns unreserved space in pixels.
    pub fn wasted_area(&self) -> u64 {
        self.total_area.saturating_sub(self.used_area)
    }
}

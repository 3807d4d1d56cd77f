//! Incremental texture atlas packer for sprite loading.
//!
//! - Greedy shelf rows across fixed-size square sheets, grown on demand
//! - `Packed` sheets pack all four channel planes as independent sub-atlases; `Indexed` sheets pack one
//! - `place_*` methods copy pixels in and commit the sheet; `allocate` only reserves a region and leaves the writes to the caller
//! - Data model is serde-serializable; sprites refer to sheets by stable id
//!
//! Quick example:
//! ```
//! use sheet_packer::{AtlasPacker, SheetKind, Size};
//!
//! # fn main() -> sheet_packer::Result<()> {
//! let mut packer = AtlasPacker::new(SheetKind::Indexed, 512)?;
//! let pixels = vec![7u8; 24 * 16];
//! let sprite = packer.place(&pixels, Size::new(24, 16))?;
//! assert_eq!((sprite.rect.x, sprite.rect.y), (0, 0));
//! println!("sheet {} channel {:?}", sprite.sheet.index(), sprite.channel);
//! # Ok(()) }
//! ```

pub mod compositing;
pub mod error;
pub mod model;
pub mod packer;
pub mod sheet;

pub use compositing::*;
pub use error::*;
pub use model::*;
pub use packer::*;
pub use sheet::*;

/// Convenience prelude for common types and functions.
/// Importing `sheet_packer::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::compositing::{blit_channel, blit_rgba};
    pub use crate::error::{Result, SheetPackerError};
    pub use crate::model::{
        BlendMode, Channel, PackStats, Rect, SheetId, SheetKind, Size, Sprite, SpriteOffset,
    };
    pub use crate::packer::{AtlasPacker, SheetFactory, SourceFrame};
    pub use crate::sheet::{MemorySheet, PixelSheet, Sheet};
}

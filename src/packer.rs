use crate::compositing::{blit_channel, blit_rgba};
use crate::error::{Result, SheetPackerError};
use crate::model::{
    BlendMode, Channel, PackStats, Rect, SheetId, SheetKind, Size, Sprite, SpriteOffset,
};
use crate::sheet::{MemorySheet, PixelSheet, Sheet};
use image::RgbaImage;
use tracing::{debug, instrument, trace};

/// Produces a fresh sheet whenever the packer runs out of space.
/// Returning `SheetOverflow` caps atlas growth; the error reaches the caller
/// of the placement method that triggered the rollover.
pub type SheetFactory<S> = Box<dyn FnMut() -> Result<S>>;

/// Decoded image data fed to `place_frame`: pixel bytes plus the metadata an
/// asset format carries alongside them.
pub trait SourceFrame {
    /// Frame dimensions in pixels.
    fn size(&self) -> Size;
    /// Row-major pixel bytes, one byte per pixel, `size().area()` long.
    fn data(&self) -> &[u8];
    /// Render-time offset baked into the asset.
    fn offset(&self) -> SpriteOffset;
}

/// Shelf-packing pen: next placement position plus the height of the row
/// being filled.
#[derive(Debug, Clone, Copy)]
struct Cursor {
    x: u32,
    y: u32,
    row_height: u32,
}

impl Cursor {
    fn origin() -> Self {
        Self {
            x: 0,
            y: 0,
            row_height: 0,
        }
    }
}

/// Incremental shelf packer over a growing list of fixed-size sheets.
///
/// Images pack left to right into rows; a row wraps when the sheet width
/// runs out and grows to the tallest image placed in it. When the sheet
/// height runs out the packer moves to the sheet's next channel plane, and
/// once every plane is used up it opens a fresh sheet from the factory.
/// Sprites refer to sheets through `SheetId`, stable for the packer's
/// lifetime. Dropping the packer drops every sheet, in allocation order;
/// `into_sheets` moves them out instead.
pub struct AtlasPacker<S: Sheet + 'static = MemorySheet> {
    kind: SheetKind,
    channel: Channel,
    cursor: Cursor,
    sheets: Vec<S>,
    factory: SheetFactory<S>,
    sprites: usize,
    used_area: u64,
}

impl AtlasPacker<MemorySheet> {
    /// Packer backed by in-memory sheets of `sheet_edge` x `sheet_edge`
    /// texels.
    pub fn new(kind: SheetKind, sheet_edge: u32) -> Result<Self> {
        if sheet_edge == 0 {
            return Err(SheetPackerError::InvalidInput(
                "sheet edge length must be non-zero".into(),
            ));
        }
        let size = Size::new(sheet_edge, sheet_edge);
        Self::with_factory(kind, Box::new(move || Ok(MemorySheet::new(size))))
    }
}

impl<S: Sheet + 'static> AtlasPacker<S> {
    /// Packer drawing sheets from a caller-supplied factory. The factory
    /// runs once here for the initial sheet and again on every rollover.
    pub fn with_factory(kind: SheetKind, mut factory: SheetFactory<S>) -> Result<Self> {
        let first = factory()?;
        Ok(Self {
            kind,
            channel: kind.first_channel(),
            cursor: Cursor::origin(),
            sheets: vec![first],
            factory,
            sprites: 0,
            used_area: 0,
        })
    }

    /// Reserve a region for an image without writing pixels. The caller
    /// copies pixels itself (see `compositing`) and commits the sheet.
    pub fn allocate(&mut self, size: Size) -> Result<Sprite> {
        self.allocate_with(size, 0.0, SpriteOffset::ZERO)
    }

    /// Like `allocate`, carrying an explicit z ramp and render offset into
    /// the sprite.
    ///
    /// A request with a zero dimension returns a degenerate sprite: empty
    /// rect on the current sheet and channel, cursor untouched.
    #[instrument(skip_all)]
    pub fn allocate_with(
        &mut self,
        size: Size,
        z_ramp: f32,
        offset: SpriteOffset,
    ) -> Result<Sprite> {
        if size.is_empty() {
            return Ok(Sprite {
                sheet: self.current_id(),
                rect: Rect::new(0, 0, 0, 0),
                z_ramp,
                offset,
                channel: self.channel,
                blend: BlendMode::Alpha,
            });
        }

        let sheet_size = self.current().size();
        if self.cursor.x + size.w > sheet_size.w {
            self.cursor.x = 0;
            self.cursor.y += self.cursor.row_height;
            self.cursor.row_height = size.h;
        }
        if size.h > self.cursor.row_height {
            self.cursor.row_height = size.h;
        }

        if self.cursor.y + size.h > sheet_size.h {
            match self.next_channel() {
                Some(next) => {
                    trace!(channel = ?next, "channel plane exhausted, advancing to next");
                    self.channel = next;
                }
                None => {
                    // Old sheet is done for good; let go of its staging
                    // buffer before asking the factory for the next one.
                    self.current_mut().release_buffer();
                    let sheet = (self.factory)()?;
                    self.sheets.push(sheet);
                    self.channel = self.kind.first_channel();
                    debug!(sheets = self.sheets.len(), "sheet exhausted, opened a new one");
                }
            }
            self.cursor = Cursor {
                x: 0,
                y: 0,
                row_height: size.h,
            };
        }

        let sprite = Sprite {
            sheet: self.current_id(),
            rect: Rect::new(self.cursor.x, self.cursor.y, size.w, size.h),
            z_ramp,
            offset,
            channel: self.channel,
            blend: BlendMode::Alpha,
        };
        self.cursor.x += size.w;
        self.sprites += 1;
        self.used_area += size.area();
        Ok(sprite)
    }

    /// Next channel plane of the current sheet, if the sheet kind has one
    /// left.
    fn next_channel(&self) -> Option<Channel> {
        self.channel
            .next()
            .filter(|c| c.index() < self.kind.channels())
    }

    /// Kind shared by every sheet this packer allocates.
    pub fn kind(&self) -> SheetKind {
        self.kind
    }

    /// Channel plane the next allocation lands on.
    pub fn current_channel(&self) -> Channel {
        self.channel
    }

    /// Handle of the sheet currently being packed into.
    pub fn current_id(&self) -> SheetId {
        SheetId(self.sheets.len() - 1)
    }

    /// The sheet currently being packed into (always the newest).
    pub fn current(&self) -> &S {
        // never empty: construction allocates the first sheet
        &self.sheets[self.sheets.len() - 1]
    }

    /// Mutable access to the current sheet.
    pub fn current_mut(&mut self) -> &mut S {
        let last = self.sheets.len() - 1;
        &mut self.sheets[last]
    }

    /// All sheets in allocation order.
    pub fn sheets(&self) -> &[S] {
        &self.sheets
    }

    /// Look up a sheet by handle.
    pub fn sheet(&self, id: SheetId) -> Option<&S> {
        self.sheets.get(id.0)
    }

    /// Mutable sheet lookup, for callers doing their own pixel writes.
    pub fn sheet_mut(&mut self, id: SheetId) -> Option<&mut S> {
        self.sheets.get_mut(id.0)
    }

    /// Number of sheets allocated so far.
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Packing statistics across all sheets. Total area counts every channel
    /// plane; degenerate sprites are not counted.
    pub fn stats(&self) -> PackStats {
        let sheet_area: u64 = self.sheets.iter().map(|s| s.size().area()).sum();
        let total_area = sheet_area * self.kind.channels() as u64;
        let occupancy = if total_area > 0 {
            self.used_area as f64 / total_area as f64
        } else {
            0.0
        };
        PackStats {
            num_sheets: self.sheets.len(),
            num_sprites: self.sprites,
            total_area,
            used_area: self.used_area,
            occupancy,
        }
    }

    /// Consume the packer and take ownership of the sheets, in allocation
    /// order. Nothing is committed or released on the way out.
    pub fn into_sheets(self) -> Vec<S> {
        self.sheets
    }
}

impl<S: PixelSheet + 'static> AtlasPacker<S> {
    /// Pack a single-channel image and copy its pixels into the atlas.
    /// The sheet is committed after the copy.
    pub fn place(&mut self, src: &[u8], size: Size) -> Result<Sprite> {
        self.place_with(src, size, 0.0, SpriteOffset::ZERO)
    }

    /// Pack a single-channel image, carrying `z_ramp` and `offset` into the
    /// sprite.
    ///
    /// Zero-size requests return a degenerate sprite without reading `src`
    /// or touching pixel storage. Otherwise `src` must hold exactly
    /// `size.area()` bytes, row-major; on a mismatch `InvalidInput` is
    /// returned and nothing is allocated.
    pub fn place_with(
        &mut self,
        src: &[u8],
        size: Size,
        z_ramp: f32,
        offset: SpriteOffset,
    ) -> Result<Sprite> {
        if size.is_empty() {
            return self.allocate_with(size, z_ramp, offset);
        }
        if src.len() as u64 != size.area() {
            return Err(SheetPackerError::InvalidInput(format!(
                "source buffer holds {} bytes, expected {} for {}x{}",
                src.len(),
                size.area(),
                size.w,
                size.h
            )));
        }
        let sprite = self.allocate_with(size, z_ramp, offset)?;
        let sheet = self.current_mut();
        blit_channel(sheet.image_mut(), sprite.rect, sprite.channel, src);
        sheet.commit_buffered_data();
        Ok(sprite)
    }

    /// Pack a decoded source frame, carrying its render offset into the
    /// sprite.
    pub fn place_frame(&mut self, frame: &impl SourceFrame) -> Result<Sprite> {
        self.place_with(frame.data(), frame.size(), 0.0, frame.offset())
    }

    /// Pack a solid region filled with one palette index. Useful for
    /// placeholder and debug sprites.
    pub fn place_solid(&mut self, size: Size, index: u8) -> Result<Sprite> {
        let fill = vec![index; size.area() as usize];
        self.place(&fill, size)
    }

    /// Pack a full-color RGBA image, overwriting all four channel lanes of
    /// the region. Meant for `Indexed` atlases where a sprite owns the whole
    /// texel; on `Packed` sheets this clobbers the other planes.
    pub fn place_image(&mut self, src: &RgbaImage) -> Result<Sprite> {
        let (w, h) = src.dimensions();
        let sprite = self.allocate(Size::new(w, h))?;
        if !sprite.rect.is_empty() {
            let sheet = self.current_mut();
            blit_rgba(sheet.image_mut(), sprite.rect, src);
            sheet.commit_buffered_data();
        }
        Ok(sprite)
    }
}

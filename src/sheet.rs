use crate::model::Size;
use image::RgbaImage;

/// Backing surface the packer allocates regions on.
///
/// Sheets are created by the packer's factory, written through an external
/// copy primitive, and owned by the packer until teardown (or until moved out
/// with `into_sheets`). The packer only ever drives the three hooks below;
/// pixel storage is the implementor's business.
pub trait Sheet {
    /// Fixed dimensions, set at creation.
    fn size(&self) -> Size;
    /// Flush writes buffered since the last commit. GPU-backed sheets upload
    /// dirty texels here.
    fn commit_buffered_data(&mut self);
    /// The packer is done writing to this sheet; staging storage can go.
    /// Called when packing rolls over to a fresh sheet; may repeat if a
    /// rollover is retried after a factory failure.
    fn release_buffer(&mut self);
}

/// A sheet whose pixels live in an addressable RGBA plane, letting the packer
/// copy image data in directly.
pub trait PixelSheet: Sheet {
    fn image(&self) -> &RgbaImage;
    fn image_mut(&mut self) -> &mut RgbaImage;
}

/// Default in-memory sheet: one RGBA plane, initially transparent.
///
/// Commits are counted rather than acted on (there is nowhere to upload to),
/// and `release_buffer` only flags the sheet, since the plane is the storage.
/// Both are observable for callers layering an uploader on top.
pub struct MemorySheet {
    image: RgbaImage,
    commits: u64,
    released: bool,
}

impl MemorySheet {
    pub fn new(size: Size) -> Self {
        Self {
            image: RgbaImage::new(size.w, size.h),
            commits: 0,
            released: false,
        }
    }

    /// Number of times `commit_buffered_data` has run.
    pub fn commits(&self) -> u64 {
        self.commits
    }

    /// True once the packer has moved on from this sheet.
    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl Sheet for MemorySheet {
    fn size(&self) -> Size {
        let (w, h) = self.image.dimensions();
        Size::new(w, h)
    }

    fn commit_buffered_data(&mut self) {
        self.commits += 1;
    }

    fn release_buffer(&mut self) {
        self.released = true;
    }
}

impl PixelSheet for MemorySheet {
    fn image(&self) -> &RgbaImage {
        &self.image
    }

    fn image_mut(&mut self) -> &mut RgbaImage {
        &mut self.image
    }
}

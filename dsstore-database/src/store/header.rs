/*!
 The fixed header at the start of every `.DS_Store` file.

 ```text
 0x00  alignment        0x00000001
 0x04  magic            "Bud1"
 0x08  allocator offset relative to 0x04
 0x0c  allocator length
 0x10  allocator offset repeated
 ```
*/

use crate::{
    error::store::StoreError,
    store::reader::StoreReader,
    util::diagnostics::{Diagnostics, Warning},
};

/// Expected value of the first word in the file
pub const ALIGNMENT: u32 = 0x00000001;
/// `Bud1`, the buddy allocator magic
pub const MAGIC: u32 = 0x42756431;
/// Offsets stored in the file are relative to this position
pub const OFFSET_BASE: u32 = 0x4;

/// Values read from the file header
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Header {
    /// The first word, expected to be [`ALIGNMENT`]
    pub alignment: u32,
    /// The second word, expected to be [`MAGIC`]
    pub magic: u32,
    /// Absolute position of the allocator block
    pub allocator_offset: u32,
    /// Length of the allocator block
    pub allocator_length: u32,
}

impl Header {
    /// Read the header from the start of the stream.
    ///
    /// Unexpected alignment, magic, or a mismatched offset repeat are warnings: files with those quirks still decode.
    pub fn parse(
        reader: &mut StoreReader,
        diagnostics: &mut Diagnostics,
    ) -> Result<Self, StoreError> {
        reader.seek(0);

        let alignment = reader.read_u32()?;
        if alignment != ALIGNMENT {
            diagnostics.warn(Warning::Alignment(alignment));
        }

        let magic = reader.read_u32()?;
        if magic != MAGIC {
            diagnostics.warn(Warning::Magic(magic));
        }

        let allocator_offset = OFFSET_BASE.wrapping_add(reader.read_u32()?);
        let allocator_length = reader.read_u32()?;
        let allocator_offset_repeat = OFFSET_BASE.wrapping_add(reader.read_u32()?);
        if allocator_offset_repeat != allocator_offset {
            diagnostics.warn(Warning::AllocatorOffsets(
                allocator_offset,
                allocator_offset_repeat,
            ));
        }

        Ok(Self {
            alignment,
            magic,
            allocator_offset,
            allocator_length,
        })
    }
}

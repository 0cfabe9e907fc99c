/*!
 The buddy allocator block: the offset table, the directory of named blocks, and the free lists.

 ```text
 allocator + 0x000  block count N
 allocator + 0x004  reserved, 0
 allocator + 0x008  N block addresses
 allocator + 0x408  directory entry count, then (u8 name length, name, u32 block id)
                    32 free lists: u32 count, then that many block ids
 ```
*/

use std::collections::BTreeMap;

use crate::{
    error::store::StoreError,
    store::{header::OFFSET_BASE, reader::StoreReader},
    util::diagnostics::{Diagnostics, Warning},
};

/// The directory key that names the B-tree master block
pub const MASTER_KEY: &str = "DSDB";
/// Position of the directory relative to the start of the allocator block
const DIRECTORY_OFFSET: usize = 0x408;
/// One free list for each power of two size class from 2^0 to 2^31
pub const FREE_LIST_COUNT: usize = 32;

/// A packed block offset and size class
///
/// The low 5 bits hold the base-2 log of the block size; the remaining bits are the offset,
/// relative to [`OFFSET_BASE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockAddress(pub u32);

impl BlockAddress {
    /// Offset of the block relative to [`OFFSET_BASE`]
    pub fn offset(&self) -> u32 {
        (self.0 >> 5) << 5
    }

    /// Size of the block in bytes
    pub fn size(&self) -> u64 {
        1 << (self.0 & 0x1f)
    }

    /// Absolute position of the block in the file
    pub fn position(&self) -> usize {
        OFFSET_BASE as usize + self.offset() as usize
    }
}

/// The decoded allocator block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Allocator {
    /// Block addresses, indexed by block id
    pub offsets: Vec<BlockAddress>,
    /// Named blocks; real files only contain [`MASTER_KEY`]
    pub directory: BTreeMap<String, u32>,
    /// Free block ids, indexed by size class exponent
    pub free_lists: Vec<Vec<u32>>,
}

impl Allocator {
    /// Read the allocator block that starts at `allocator_offset`
    pub fn parse(
        reader: &mut StoreReader,
        allocator_offset: u32,
        diagnostics: &mut Diagnostics,
    ) -> Result<Self, StoreError> {
        let start = allocator_offset as usize;
        reader.seek(start);

        let num_offsets = reader.read_u32()?;
        let reserved = reader.read_u32()?;
        if reserved != 0 {
            diagnostics.warn(Warning::AllocatorReserved(reserved));
        }

        // Never trust a count to size an allocation; the reads below fail on truncation
        let mut offsets = Vec::with_capacity((num_offsets as usize).min(reader.len() / 4));
        for _ in 0..num_offsets {
            offsets.push(BlockAddress(reader.read_u32()?));
        }

        reader.seek(start.saturating_add(DIRECTORY_OFFSET));
        let num_keys = reader.read_u32()?;
        let mut directory = BTreeMap::new();
        for _ in 0..num_keys {
            let key_length = reader.read_u8()? as usize;
            let key = String::from_utf8_lossy(reader.read_exact_bytes(key_length)?).into_owned();
            let block_id = reader.read_u32()?;
            if key != MASTER_KEY {
                diagnostics.warn(Warning::DirectoryKey(key.clone(), block_id));
            }
            directory.insert(key, block_id);
        }

        if !directory.contains_key(MASTER_KEY) {
            return Err(StoreError::MissingDirectoryKey(MASTER_KEY.to_string()));
        }

        let mut free_lists = Vec::with_capacity(FREE_LIST_COUNT);
        for _ in 0..FREE_LIST_COUNT {
            let count = reader.read_u32()?;
            let mut list = Vec::with_capacity((count as usize).min(reader.len() / 4));
            for _ in 0..count {
                list.push(reader.read_u32()?);
            }
            free_lists.push(list);
        }

        Ok(Self {
            offsets,
            directory,
            free_lists,
        })
    }

    /// The id of the B-tree master block
    pub fn master_id(&self) -> Option<u32> {
        self.directory.get(MASTER_KEY).copied()
    }

    /// Look up a block in the offset table
    pub fn block(&self, block_id: u32) -> Result<BlockAddress, StoreError> {
        self.offsets
            .get(block_id as usize)
            .copied()
            .ok_or(StoreError::InvalidBlockId(block_id, self.offsets.len()))
    }

    /// The free list for blocks of `1 << exponent` bytes
    pub fn free_list(&self, exponent: usize) -> Option<&[u32]> {
        self.free_lists.get(exponent).map(Vec::as_slice)
    }

    /// Total number of free blocks across every size class
    pub fn free_block_count(&self) -> usize {
        self.free_lists.iter().map(Vec::len).sum()
    }
}

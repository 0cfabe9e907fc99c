/*!
 Walks the B-tree that holds the record entries.

 The master block describes the tree:

 ```text
 root block id, tree height, record count, node count, 0x00001000
 ```

 Every other node starts with a `next` link and an entry count. Leaf nodes have `next == 0`.
 In an internal node each entry is preceded by the id of the child holding the smaller keys,
 and `next` points at the rightmost child. Walking children before their entries yields
 the entries in key order.
*/

use crate::{
    error::store::StoreError,
    store::{
        allocator::Allocator,
        reader::StoreReader,
        record::RecordStore,
        value::read_value,
    },
    util::diagnostics::{Diagnostics, Warning},
};

/// Expected value of the last word of the master block
const MASTER_RESERVED: u32 = 0x00001000;
/// Real trees are a handful of levels deep; anything past this is a cycle or garbage
pub const MAX_TREE_DEPTH: usize = 32;

/// The B-tree master block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MasterBlock {
    /// Block id of the root node
    pub root_id: u32,
    /// Number of internal levels; `0` when the root is a leaf
    pub tree_height: u32,
    /// Number of entries in the tree
    pub num_records: u32,
    /// Number of nodes in the tree
    pub num_nodes: u32,
}

impl MasterBlock {
    pub fn parse(
        reader: &mut StoreReader,
        allocator: &Allocator,
        master_id: u32,
        diagnostics: &mut Diagnostics,
    ) -> Result<Self, StoreError> {
        reader.seek(allocator.block(master_id)?.position());

        let master = Self {
            root_id: reader.read_u32()?,
            tree_height: reader.read_u32()?,
            num_records: reader.read_u32()?,
            num_nodes: reader.read_u32()?,
        };

        let reserved = reader.read_u32()?;
        if reserved != MASTER_RESERVED {
            diagnostics.warn(Warning::MasterReserved(reserved));
        }

        Ok(master)
    }
}

/// Recursively reads tree nodes into a [`RecordStore`]
#[derive(Debug)]
pub struct TreeWalker<'a, 'b> {
    reader: StoreReader<'a>,
    allocator: &'b Allocator,
    master: MasterBlock,
    /// Number of nodes read so far
    pub nodes_visited: usize,
    /// Number of entries read so far
    pub entries_visited: usize,
}

impl<'a, 'b> TreeWalker<'a, 'b> {
    pub fn new(stream: &'a [u8], allocator: &'b Allocator, master: MasterBlock) -> Self {
        Self {
            reader: StoreReader::new(stream),
            allocator,
            master,
            nodes_visited: 0,
            entries_visited: 0,
        }
    }

    /// Walk the whole tree starting at the master block's root
    pub fn walk(
        &mut self,
        records: &mut RecordStore,
        diagnostics: &mut Diagnostics,
    ) -> Result<(), StoreError> {
        self.walk_node(self.master.root_id, 0, records, diagnostics)
    }

    /// Read the node `node_id`, which sits `depth` levels below the root
    fn walk_node(
        &mut self,
        node_id: u32,
        depth: usize,
        records: &mut RecordStore,
        diagnostics: &mut Diagnostics,
    ) -> Result<(), StoreError> {
        if depth > MAX_TREE_DEPTH {
            return Err(StoreError::TreeTooDeep(MAX_TREE_DEPTH));
        }
        if depth > self.master.tree_height as usize {
            diagnostics.warn(Warning::TreeDepth(depth, self.master.tree_height));
        }

        self.reader.seek(self.allocator.block(node_id)?.position());
        self.nodes_visited += 1;

        let next_id = self.reader.read_u32()?;
        let num_entries = self.reader.read_u32()?;

        for _ in 0..num_entries {
            if next_id != 0 {
                let child_id = self.reader.read_u32()?;
                let resume = self.reader.position();
                self.walk_node(child_id, depth + 1, records, diagnostics)?;
                self.reader.seek(resume);
            }

            let name_length = self.reader.read_u32()? as usize;
            let name = self.reader.read_utf16(name_length)?;
            let code = self.reader.read_tag()?;
            let value = read_value(&mut self.reader)?;

            records.insert(name, code, value);
            self.entries_visited += 1;
        }

        if next_id != 0 {
            self.walk_node(next_id, depth + 1, records, diagnostics)?;
        }

        Ok(())
    }
}

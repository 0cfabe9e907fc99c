/*!
 Decodes the on-disk structure of a `.DS_Store` file.

 A `.DS_Store` file is a buddy-allocated block store. The header points at the allocator block,
 whose directory names the master block of a B-tree. The B-tree entries are
 `(file name, field code, typed value)` triples, which are grouped into [`Record`]s by file name.

 ```text
 header ──▶ allocator ──"DSDB"──▶ master block ──▶ root node ──▶ children ...
 ```
*/

pub mod allocator;
pub mod btree;
pub mod header;
pub mod reader;
pub mod record;
pub mod value;
#[cfg(test)]
pub(crate) mod tests;

use crate::{
    error::store::StoreError,
    store::{
        allocator::{Allocator, MASTER_KEY},
        btree::{MasterBlock, TreeWalker},
        header::Header,
        reader::StoreReader,
        record::{Record, RecordStore},
    },
    util::diagnostics::{Diagnostics, Warning},
};

/// A fully decoded `.DS_Store` file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DSStore {
    pub header: Header,
    pub allocator: Allocator,
    pub master: MasterBlock,
    /// Number of tree nodes actually read
    pub nodes_visited: usize,
    /// Number of tree entries actually read
    pub entries_visited: usize,
    /// The records, in the order their names first appear in the tree
    pub records: RecordStore,
}

impl DSStore {
    /// Decode a `.DS_Store` file held in memory.
    ///
    /// Structural problems that make the tree unreachable are returned as a [`StoreError`].
    /// Anything the decoder can work around is reported in the returned [`Diagnostics`].
    pub fn parse(stream: &[u8]) -> Result<(Self, Diagnostics), StoreError> {
        let mut diagnostics = Diagnostics::new();
        let store = Self::parse_with(stream, &mut diagnostics)?;
        Ok((store, diagnostics))
    }

    /// Decode a `.DS_Store` file, adding warnings to an existing sink
    pub fn parse_with(stream: &[u8], diagnostics: &mut Diagnostics) -> Result<Self, StoreError> {
        let mut reader = StoreReader::new(stream);

        let header = Header::parse(&mut reader, diagnostics)?;
        let allocator = Allocator::parse(&mut reader, header.allocator_offset, diagnostics)?;
        let master_id = allocator
            .master_id()
            .ok_or_else(|| StoreError::MissingDirectoryKey(MASTER_KEY.to_string()))?;
        let master = MasterBlock::parse(&mut reader, &allocator, master_id, diagnostics)?;

        let mut records = RecordStore::new();
        let mut walker = TreeWalker::new(stream, &allocator, master);
        walker.walk(&mut records, diagnostics)?;

        if walker.entries_visited != master.num_records as usize {
            diagnostics.warn(Warning::RecordCount(
                master.num_records,
                walker.entries_visited,
            ));
        }
        if walker.nodes_visited != master.num_nodes as usize {
            diagnostics.warn(Warning::NodeCount(master.num_nodes, walker.nodes_visited));
        }
        let nodes_visited = walker.nodes_visited;
        let entries_visited = walker.entries_visited;

        Ok(Self {
            header,
            allocator,
            master,
            nodes_visited,
            entries_visited,
            records,
        })
    }

    /// Iterate over the decoded records
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    /// Get the record for a specific file name
    pub fn record(&self, name: &str) -> Option<&Record> {
        self.records.get(name)
    }
}

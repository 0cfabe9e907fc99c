//! Builds small `.DS_Store` files byte by byte for tests.

/// Type code and payload of one entry value
pub(crate) fn long(value: u32) -> Vec<u8> {
    tagged(b"long", &value.to_be_bytes())
}

pub(crate) fn boolean(value: bool) -> Vec<u8> {
    tagged(b"bool", &[value as u8])
}

pub(crate) fn dutc(value: u64) -> Vec<u8> {
    tagged(b"dutc", &value.to_be_bytes())
}

pub(crate) fn type_code(value: &[u8; 4]) -> Vec<u8> {
    tagged(b"type", value)
}

pub(crate) fn blob(value: &[u8]) -> Vec<u8> {
    let mut payload = (value.len() as u32).to_be_bytes().to_vec();
    payload.extend_from_slice(value);
    tagged(b"blob", &payload)
}

pub(crate) fn ustr(value: &str) -> Vec<u8> {
    let units: Vec<u16> = value.encode_utf16().collect();
    let mut payload = (units.len() as u32).to_be_bytes().to_vec();
    units
        .iter()
        .for_each(|unit| payload.extend_from_slice(&unit.to_be_bytes()));
    tagged(b"ustr", &payload)
}

fn tagged(tag: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut out = tag.to_vec();
    out.extend_from_slice(payload);
    out
}

/// One encoded tree entry: name, field code, then a value built by the helpers above
pub(crate) fn entry(name: &str, code: &[u8; 4], value: &[u8]) -> Vec<u8> {
    let units: Vec<u16> = name.encode_utf16().collect();
    let mut out = (units.len() as u32).to_be_bytes().to_vec();
    units
        .iter()
        .for_each(|unit| out.extend_from_slice(&unit.to_be_bytes()));
    out.extend_from_slice(code);
    out.extend_from_slice(value);
    out
}

/// A node with `next == 0`
pub(crate) fn leaf(entries: &[Vec<u8>]) -> Vec<u8> {
    let mut out = 0u32.to_be_bytes().to_vec();
    out.extend((entries.len() as u32).to_be_bytes());
    entries.iter().for_each(|entry| out.extend_from_slice(entry));
    out
}

/// A node whose entries are each preceded by a child id, with `rightmost` as the `next` link
pub(crate) fn internal(children: &[(u32, Vec<u8>)], rightmost: u32) -> Vec<u8> {
    let mut out = rightmost.to_be_bytes().to_vec();
    out.extend((children.len() as u32).to_be_bytes());
    children.iter().for_each(|(child, entry)| {
        out.extend(child.to_be_bytes());
        out.extend_from_slice(entry);
    });
    out
}

pub(crate) fn master(root: u32, height: u32, records: u32, nodes: u32) -> Vec<u8> {
    let mut out = vec![];
    for word in [root, height, records, nodes, 0x1000] {
        out.extend(word.to_be_bytes());
    }
    out
}

/// Lays out blocks, the allocator, and the header of a file
pub(crate) struct StoreBuilder {
    /// Block contents; block `n` in this list gets id `n + 1`, id `0` is the allocator
    blocks: Vec<Vec<u8>>,
    directory: Vec<(String, u32)>,
    free: Vec<(usize, Vec<u32>)>,
    pub alignment: u32,
    pub magic: u32,
    /// Added to the repeated allocator offset
    pub repeat_skew: u32,
    /// The word after the allocator's block count
    pub allocator_reserved: u32,
}

impl StoreBuilder {
    pub(crate) fn new() -> Self {
        Self {
            blocks: vec![],
            directory: vec![],
            free: vec![],
            alignment: 1,
            magic: 0x42756431,
            repeat_skew: 0,
            allocator_reserved: 0,
        }
    }

    /// Reserve the next block id, to be filled in with [`StoreBuilder::set_block`]
    pub(crate) fn reserve(&mut self) -> u32 {
        self.blocks.push(vec![]);
        self.blocks.len() as u32
    }

    pub(crate) fn set_block(&mut self, id: u32, data: Vec<u8>) {
        self.blocks[id as usize - 1] = data;
    }

    pub(crate) fn add_block(&mut self, data: Vec<u8>) -> u32 {
        self.blocks.push(data);
        self.blocks.len() as u32
    }

    pub(crate) fn directory(&mut self, key: &str, id: u32) -> &mut Self {
        self.directory.push((key.to_string(), id));
        self
    }

    pub(crate) fn free(&mut self, exponent: usize, ids: Vec<u32>) -> &mut Self {
        self.free.push((exponent, ids));
        self
    }

    pub(crate) fn build(&self) -> Vec<u8> {
        // Everything after the alignment word; offsets in the file are relative to this
        let mut body = vec![0u8; 0x20];
        let mut addresses = vec![];

        for block in &self.blocks {
            let size = block.len().next_power_of_two().max(32);
            let offset = body.len() as u32;
            addresses.push(offset | size.trailing_zeros());
            body.extend_from_slice(block);
            body.resize(offset as usize + size, 0);
        }

        let allocator_offset = body.len() as u32;
        let allocator_size: usize = 2048;
        let mut allocator = vec![];
        allocator.extend((addresses.len() as u32 + 1).to_be_bytes());
        allocator.extend(self.allocator_reserved.to_be_bytes());
        allocator.extend((allocator_offset | allocator_size.trailing_zeros()).to_be_bytes());
        addresses
            .iter()
            .for_each(|address| allocator.extend(address.to_be_bytes()));
        allocator.resize(0x408, 0);

        allocator.extend((self.directory.len() as u32).to_be_bytes());
        for (key, id) in &self.directory {
            allocator.push(key.len() as u8);
            allocator.extend_from_slice(key.as_bytes());
            allocator.extend(id.to_be_bytes());
        }
        for exponent in 0..32 {
            let ids = self
                .free
                .iter()
                .find(|(class, _)| *class == exponent)
                .map(|(_, ids)| ids.as_slice())
                .unwrap_or(&[]);
            allocator.extend((ids.len() as u32).to_be_bytes());
            ids.iter().for_each(|id| allocator.extend(id.to_be_bytes()));
        }
        allocator.resize(allocator_size, 0);
        body.extend(allocator);

        body[0..4].copy_from_slice(&self.magic.to_be_bytes());
        body[4..8].copy_from_slice(&allocator_offset.to_be_bytes());
        body[8..12].copy_from_slice(&(allocator_size as u32).to_be_bytes());
        body[12..16].copy_from_slice(&(allocator_offset + self.repeat_skew).to_be_bytes());

        let mut file = self.alignment.to_be_bytes().to_vec();
        file.extend(body);
        file
    }
}

/// A one-leaf file holding `entries`
pub(crate) fn single_leaf(entries: &[Vec<u8>]) -> Vec<u8> {
    let mut builder = StoreBuilder::new();
    let master_id = builder.reserve();
    let leaf_id = builder.add_block(leaf(entries));
    builder.set_block(master_id, master(leaf_id, 0, entries.len() as u32, 1));
    builder.directory("DSDB", master_id);
    builder.build()
}

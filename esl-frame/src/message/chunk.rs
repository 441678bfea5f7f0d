use esl_macros::frame;
use heapless::Vec;

use crate::{Error, Result};

/// Maximum number of data bytes a chunk response can carry.
pub const CHUNK_DATA_CAPACITY: usize = 256;

#[frame]
/// A reader/writer for the body of a chunk request.
pub struct ChunkRequest {
    /// Return the requested version.
    version_requested: u64,
    /// Return the offset of the chunk.
    offset: u32,
    /// Return the length of the chunk.
    len: u8,
    /// Returns `true` when an OS update is requested.
    os_update_requested: bool,
}

/// A high-level representation of a chunk request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChunkRequestRepr {
    /// Requested version.
    pub version_requested: u64,
    /// Offset of the chunk.
    pub offset: u32,
    /// Length of the chunk.
    pub len: u8,
    /// Whether an OS update is requested.
    pub os_update_requested: bool,
}

impl ChunkRequestRepr {
    /// Parse a chunk request body.
    pub fn parse(reader: &ChunkRequest<&[u8]>) -> Self {
        Self {
            version_requested: reader.version_requested(),
            offset: reader.offset(),
            len: reader.len(),
            os_update_requested: reader.os_update_requested(),
        }
    }

    /// Return the length of the body when emitted into a buffer.
    pub const fn buffer_len(&self) -> usize {
        ChunkRequest::<&[u8]>::size()
    }

    /// Emit the body into a buffer.
    pub fn emit(&self, writer: &mut ChunkRequest<&mut [u8]>) {
        writer.set_version_requested(self.version_requested);
        writer.set_offset(self.offset);
        writer.set_len(self.len);
        writer.set_os_update_requested(self.os_update_requested);
    }
}

impl core::fmt::Display for ChunkRequestRepr {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Chunk request: version {}, offset {}, len {}, os update {}",
            self.version_requested,
            self.offset,
            self.len,
            if self.os_update_requested { "yes" } else { "no" },
        )
    }
}

#[frame]
/// A reader/writer for the body of a chunk response.
pub struct ChunkResponse {
    /// Return the offset of the chunk.
    offset: u32,
    /// Returns `true` when the chunk belongs to an OS update.
    os_update: bool,
    /// Return the chunk data.
    #[bytes(0)]
    data: &[u8],
}

/// A high-level representation of a chunk response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChunkResponseRepr {
    /// Offset of the chunk.
    pub offset: u32,
    /// Whether the chunk belongs to an OS update.
    pub os_update: bool,
    /// Chunk data.
    pub data: Vec<u8, CHUNK_DATA_CAPACITY>,
}

impl ChunkResponseRepr {
    /// Parse a chunk response body.
    ///
    /// # Errors
    ///
    /// Returns an error if the chunk data exceeds [`CHUNK_DATA_CAPACITY`].
    pub fn parse(reader: &ChunkResponse<&[u8]>) -> Result<Self> {
        Ok(Self {
            offset: reader.offset(),
            os_update: reader.os_update(),
            data: Vec::from_slice(reader.data()).map_err(|_| Error::MessageTooLong)?,
        })
    }

    /// Return the length of the body when emitted into a buffer.
    pub fn buffer_len(&self) -> usize {
        ChunkResponse::<&[u8]>::size() + self.data.len()
    }

    /// Emit the body into a buffer.
    pub fn emit(&self, writer: &mut ChunkResponse<&mut [u8]>) {
        writer.set_offset(self.offset);
        writer.set_os_update(self.os_update);
        writer.set_data(&self.data);
    }
}

impl core::fmt::Display for ChunkResponseRepr {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Chunk response: offset {}, os update {}, ",
            self.offset,
            if self.os_update { "yes" } else { "no" },
        )?;

        for b in &self.data {
            write!(f, "{b:02x}")?;
        }

        Ok(())
    }
}

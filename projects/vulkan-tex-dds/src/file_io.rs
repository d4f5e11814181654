//! File entry points, built on memory-mapped I/O.

use crate::error::{DdsError, DdsResult};
use crate::flags::DdsFlags;
use crate::header::DecodedDdsHeader;
use crate::load::{dds_metadata_from_memory, dds_metadata_from_memory_ex, load_from_dds_memory,
    load_from_dds_memory_ex};
use crate::save::{save_to_dds_memory, save_to_dds_memory_single};
use lightweight_mmap::handles::{ReadOnlyFileHandle, ReadWriteFileHandle};
use lightweight_mmap::mmap::{ReadOnlyMmap, ReadWriteMmap};
use std::path::Path;
use thiserror::Error;
use vulkan_tex_image::{ImageView, ScratchImage, TexMetadata};

/// Low-level I/O failures from the mapping backend.
#[derive(Debug, Error)]
pub enum FileIoError {
    /// Error opening a file handle.
    #[error("failed to open file handle: {0}")]
    FileHandle(#[from] lightweight_mmap::handles::HandleOpenError),

    /// Error creating a memory mapping.
    #[error("failed to create memory mapping: {0}")]
    MemoryMapping(#[from] lightweight_mmap::mmap::MmapError),
}

impl From<lightweight_mmap::handles::HandleOpenError> for DdsError {
    fn from(e: lightweight_mmap::handles::HandleOpenError) -> Self {
        Self::Io(FileIoError::FileHandle(e))
    }
}

impl From<lightweight_mmap::mmap::MmapError> for DdsError {
    fn from(e: lightweight_mmap::mmap::MmapError) -> Self {
        Self::Io(FileIoError::MemoryMapping(e))
    }
}

fn with_mapped_file<T>(path: &Path, f: impl FnOnce(&[u8]) -> DdsResult<T>) -> DdsResult<T> {
    let handle = ReadOnlyFileHandle::open(&path.to_string_lossy())?;
    let size = handle.size()? as usize;
    let mapping = ReadOnlyMmap::new(&handle, 0, size)?;
    f(mapping.as_slice())
}

fn write_file(path: &Path, bytes: &[u8]) -> DdsResult<()> {
    let handle = ReadWriteFileHandle::create_preallocated(&path.to_string_lossy(), bytes.len() as i64)?;
    let mut mapping = ReadWriteMmap::new(&handle, 0, bytes.len())?;
    mapping.as_mut_slice().copy_from_slice(bytes);
    Ok(())
}

/// Reads the texture identity out of a DDS file on disk.
pub fn dds_metadata_from_file(path: impl AsRef<Path>, flags: DdsFlags) -> DdsResult<TexMetadata> {
    with_mapped_file(path.as_ref(), |bytes| dds_metadata_from_memory(bytes, flags))
}

/// As [`dds_metadata_from_file`], also exposing the raw pixel-format
/// descriptor.
pub fn dds_metadata_from_file_ex(
    path: impl AsRef<Path>,
    flags: DdsFlags,
) -> DdsResult<DecodedDdsHeader> {
    with_mapped_file(path.as_ref(), |bytes| dds_metadata_from_memory_ex(bytes, flags))
}

/// Loads a DDS file from disk.
pub fn load_from_dds_file(path: impl AsRef<Path>, flags: DdsFlags) -> DdsResult<ScratchImage> {
    with_mapped_file(path.as_ref(), |bytes| load_from_dds_memory(bytes, flags))
}

/// As [`load_from_dds_file`], also returning the decoded header.
pub fn load_from_dds_file_ex(
    path: impl AsRef<Path>,
    flags: DdsFlags,
) -> DdsResult<(DecodedDdsHeader, ScratchImage)> {
    with_mapped_file(path.as_ref(), |bytes| load_from_dds_memory_ex(bytes, flags))
}

/// Serializes a full image array to a DDS file on disk.
pub fn save_to_dds_file(
    images: &[ImageView<'_>],
    metadata: &TexMetadata,
    flags: DdsFlags,
    path: impl AsRef<Path>,
) -> DdsResult<()> {
    let blob = save_to_dds_memory(images, metadata, flags)?;
    write_file(path.as_ref(), blob.as_slice())
}

/// Serializes a single image to a DDS file on disk.
pub fn save_to_dds_file_single(
    image: ImageView<'_>,
    flags: DdsFlags,
    path: impl AsRef<Path>,
) -> DdsResult<()> {
    let blob = save_to_dds_memory_single(image, flags)?;
    write_file(path.as_ref(), blob.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vulkan_tex_format::{CpFlags, Format};

    #[test]
    fn files_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roundtrip.dds");

        let mut original =
            ScratchImage::initialize_2d(Format::R8G8B8A8_UNORM, 16, 16, 1, 0, CpFlags::empty())
                .unwrap();
        for (i, b) in original.pixels_mut().iter_mut().enumerate() {
            *b = (i % 251) as u8;
        }

        save_to_dds_file(
            &original.image_views(),
            original.metadata(),
            crate::DdsFlags::empty(),
            &path,
        )
        .unwrap();

        let metadata = dds_metadata_from_file(&path, crate::DdsFlags::empty()).unwrap();
        assert_eq!(&metadata, original.metadata());

        let reloaded = load_from_dds_file(&path, crate::DdsFlags::empty()).unwrap();
        assert_eq!(
            &reloaded.pixels()[..reloaded.packed_size()],
            &original.pixels()[..original.packed_size()]
        );
    }

    #[test]
    fn missing_files_surface_io_errors() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_from_dds_file(dir.path().join("nope.dds"), crate::DdsFlags::empty());
        assert!(matches!(result, Err(DdsError::Io(_))));
    }
}

//! File entry points, built on memory-mapped I/O.
//!
//! Small images are serialized through an in-memory [`Blob`] and flushed in
//! one write; larger ones are encoded row by row straight into a
//! preallocated mapping.

use crate::clock::{SystemClock, TgaClock};
use crate::decode::{load_from_tga_memory, tga_metadata_from_memory};
use crate::encode::{encode_into, plan_encode, save_to_tga_memory_with_clock};
use crate::error::{TgaError, TgaResult};
use crate::flags::TgaFlags;
use lightweight_mmap::handles::{ReadOnlyFileHandle, ReadWriteFileHandle};
use lightweight_mmap::mmap::{ReadOnlyMmap, ReadWriteMmap};
use std::path::Path;
use thiserror::Error;
use vulkan_tex_image::{Blob, ImageView, ScratchImage, TexMetadata};

/// Pixel payloads below this size take the in-memory path.
const STREAMING_THRESHOLD: usize = 65535;

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

impl From<lightweight_mmap::handles::HandleOpenError> for TgaError {
    fn from(e: lightweight_mmap::handles::HandleOpenError) -> Self {
        Self::Io(FileIoError::FileHandle(e))
    }
}

impl From<lightweight_mmap::mmap::MmapError> for TgaError {
    fn from(e: lightweight_mmap::mmap::MmapError) -> Self {
        Self::Io(FileIoError::MemoryMapping(e))
    }
}

fn with_mapped_file<T>(path: &Path, f: impl FnOnce(&[u8]) -> TgaResult<T>) -> TgaResult<T> {
    let handle = ReadOnlyFileHandle::open(&path.to_string_lossy())?;
    let size = handle.size()? as usize;
    let mapping = ReadOnlyMmap::new(&handle, 0, size)?;
    f(mapping.as_slice())
}

/// Reads the texture identity out of a TGA file on disk.
pub fn tga_metadata_from_file(path: impl AsRef<Path>, flags: TgaFlags) -> TgaResult<TexMetadata> {
    with_mapped_file(path.as_ref(), |bytes| tga_metadata_from_memory(bytes, flags))
}

/// Loads a TGA file from disk.
pub fn load_from_tga_file(path: impl AsRef<Path>, flags: TgaFlags) -> TgaResult<ScratchImage> {
    with_mapped_file(path.as_ref(), |bytes| load_from_tga_memory(bytes, flags))
}

/// Serializes an image to a TGA file on disk.
pub fn save_to_tga_file(
    image: ImageView<'_>,
    flags: TgaFlags,
    path: impl AsRef<Path>,
    metadata: Option<&TexMetadata>,
) -> TgaResult<()> {
    save_to_tga_file_with_clock(image, flags, path, metadata, &SystemClock)
}

/// As [`save_to_tga_file`] with an explicit timestamp source.
pub fn save_to_tga_file_with_clock(
    image: ImageView<'_>,
    flags: TgaFlags,
    path: impl AsRef<Path>,
    metadata: Option<&TexMetadata>,
    clock: &dyn TgaClock,
) -> TgaResult<()> {
    let plan = plan_encode(&image, flags, metadata)?;

    if plan.pitch.slice < STREAMING_THRESHOLD {
        // For small images it is better to build an in-memory file and
        // write it out in one go.
        let blob: Blob = save_to_tga_memory_with_clock(image, flags, metadata, clock)?;
        let handle = ReadWriteFileHandle::create_preallocated(&path.as_ref().to_string_lossy(), blob.len() as i64)?;
        let mut mapping = ReadWriteMmap::new(&handle, 0, blob.len())?;
        mapping.as_mut_slice().copy_from_slice(blob.as_slice());
        return Ok(());
    }

    // Otherwise encode straight into the mapping, one row at a time.
    let handle = ReadWriteFileHandle::create_preallocated(&path.as_ref().to_string_lossy(), plan.total as i64)?;
    let mut mapping = ReadWriteMmap::new(&handle, 0, plan.total)?;
    encode_into(mapping.as_mut_slice(), &image, &plan, flags, metadata, clock);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{FixedClock, TgaTimestamp};
    use vulkan_tex_format::{CpFlags, Format};
    use vulkan_tex_image::AlphaMode;

    fn fixed_clock() -> FixedClock {
        FixedClock(TgaTimestamp {
            month: 1,
            day: 2,
            year: 2025,
            hour: 3,
            minute: 4,
            second: 5,
        })
    }

    #[test]
    fn small_files_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("small.tga");

        let mut image =
            ScratchImage::initialize_2d(Format::R8G8B8A8_UNORM, 8, 8, 1, 1, CpFlags::empty())
                .unwrap();
        for (i, b) in image.pixels_mut().iter_mut().enumerate() {
            *b = (i as u8) | 0x10;
        }

        save_to_tga_file(image.image_at(0).unwrap(), TgaFlags::empty(), &path, None).unwrap();

        let reloaded = load_from_tga_file(&path, TgaFlags::empty()).unwrap();
        assert_eq!(
            reloaded.image_at(0).unwrap().pixels,
            image.image_at(0).unwrap().pixels
        );
    }

    #[test]
    fn large_files_stream_rows_and_keep_the_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("large.tga");

        // 128x128 RGBA8 crosses the streaming threshold.
        let mut image =
            ScratchImage::initialize_2d(Format::R8G8B8A8_UNORM, 128, 128, 1, 1, CpFlags::empty())
                .unwrap();
        for (i, b) in image.pixels_mut().iter_mut().enumerate() {
            *b = (i % 253) as u8 | 1;
        }
        let mut metadata = *image.metadata();
        metadata.set_alpha_mode(AlphaMode::Premultiplied);

        save_to_tga_file_with_clock(
            image.image_at(0).unwrap(),
            TgaFlags::FORCE_SRGB,
            &path,
            Some(&metadata),
            &fixed_clock(),
        )
        .unwrap();

        let loaded_metadata = tga_metadata_from_file(&path, TgaFlags::empty()).unwrap();
        assert_eq!(loaded_metadata.format, Format::R8G8B8A8_SRGB);
        assert_eq!(loaded_metadata.alpha_mode(), AlphaMode::Premultiplied);

        let reloaded = load_from_tga_file(&path, TgaFlags::empty()).unwrap();
        assert_eq!(
            reloaded.image_at(0).unwrap().pixels,
            image.image_at(0).unwrap().pixels
        );
    }

    #[test]
    fn missing_files_surface_io_errors() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_from_tga_file(dir.path().join("nope.tga"), TgaFlags::empty());
        assert!(matches!(result, Err(TgaError::Io(_))));
    }
}

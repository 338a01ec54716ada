use crate::Result;
use ohno::IntoAppError;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Log target for output
const LOG_TARGET: &str = "    output";

/// What was written for one chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkInfo {
    pub path: PathBuf,
    pub records: usize,
    pub bytes: u64,
}

/// Writes records to `<output_root>/chunk<N>_<filename>` files.
#[derive(Debug, Clone)]
pub struct ChunkWriter {
    output_root: PathBuf,
}

impl ChunkWriter {
    #[must_use]
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
        }
    }

    #[must_use]
    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Splits `records` into chunks of at most `chunk_size` and writes one file per chunk.
    ///
    /// Records are joined with newlines. A `chunk_size` of 0 writes everything to a
    /// single `chunk0_` file, even when there are no records.
    pub fn save(&self, filename: &str, records: &[String], chunk_size: usize) -> Result<Vec<ChunkInfo>> {
        fs::create_dir_all(&self.output_root)
            .into_app_err_with(|| format!("unable to create output directory '{}'", self.output_root.display()))?;

        let chunks: Vec<&[String]> = if chunk_size == 0 {
            vec![records]
        } else {
            records.chunks(chunk_size).collect()
        };

        let mut info = Vec::with_capacity(chunks.len());
        for (index, chunk) in chunks.into_iter().enumerate() {
            let path = self.output_root.join(format!("chunk{index}_{filename}"));
            let bytes = write_chunk(&path, chunk)?;

            log::debug!(target: LOG_TARGET, "Wrote {} records ({bytes} bytes) to {}", chunk.len(), path.display());

            info.push(ChunkInfo {
                path,
                records: chunk.len(),
                bytes,
            });
        }

        Ok(info)
    }
}

fn write_chunk(path: &Path, records: &[String]) -> Result<u64> {
    let file = File::create(path).into_app_err_with(|| format!("unable to create output file '{}'", path.display()))?;
    let mut writer = BufWriter::new(file);

    for (index, record) in records.iter().enumerate() {
        if index > 0 {
            writer.write_all(b"\n")?;
        }
        writer.write_all(record.as_bytes())?;
    }

    let file = writer
        .into_inner()
        .into_app_err_with(|| format!("unable to flush output file '{}'", path.display()))?;
    let metadata = file.metadata().into_app_err_with(|| format!("unable to stat output file '{}'", path.display()))?;

    Ok(metadata.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("record {i}")).collect()
    }

    #[test]
    fn test_save_chunks_round_trip() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let writer = ChunkWriter::new(temp_dir.path());
        let records = records(5);

        let info = writer.save("Pages.txt", &records, 2).unwrap();

        let sizes: Vec<_> = info.iter().map(|c| c.records).collect();
        assert_eq!(sizes, [2, 2, 1]);

        let mut reassembled = Vec::new();
        for (index, chunk) in info.iter().enumerate() {
            assert_eq!(chunk.path, temp_dir.path().join(format!("chunk{index}_Pages.txt")));
            let text = fs::read_to_string(&chunk.path).unwrap();
            assert_eq!(chunk.bytes, text.len() as u64);
            reassembled.extend(text.split('\n').map(ToString::to_string));
        }
        assert_eq!(reassembled, records);
    }

    #[test]
    fn test_save_zero_chunk_size_writes_single_file() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let writer = ChunkWriter::new(temp_dir.path());

        let info = writer.save("All.txt", &records(3), 0).unwrap();

        assert_eq!(info.len(), 1);
        assert_eq!(info[0].records, 3);
        assert_eq!(fs::read_to_string(&info[0].path).unwrap(), "record 0\nrecord 1\nrecord 2");
    }

    #[test]
    fn test_save_nothing() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let writer = ChunkWriter::new(temp_dir.path());

        assert!(writer.save("None.txt", &[], 10).unwrap().is_empty());

        let info = writer.save("Empty.txt", &[], 0).unwrap();
        assert_eq!(info.len(), 1);
        assert_eq!(info[0].bytes, 0);
    }

    #[test]
    fn test_save_creates_output_directory() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let root = temp_dir.path().join("out").join("wiki");
        let writer = ChunkWriter::new(&root);

        let info = writer.save("Pages.txt", &records(1), 200).unwrap();
        assert!(info[0].path.starts_with(&root));
        assert!(info[0].path.exists());
    }

    #[test]
    fn test_save_overwrites_previous_run() {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let writer = ChunkWriter::new(temp_dir.path());

        let _ = writer.save("Pages.txt", &records(4), 0).unwrap();
        let info = writer.save("Pages.txt", &records(1), 0).unwrap();

        assert_eq!(fs::read_to_string(&info[0].path).unwrap(), "record 0");
    }
}

use super::ChunkInfo;
use crate::Result;
use core::fmt::Write;
use owo_colors::OwoColorize;

const HEADERS: [&str; 3] = ["Filename", "Data Count", "File Size"];

/// Write a `Filename | Data Count | File Size` table describing saved chunks.
pub fn write_summary<W: Write>(chunks: &[ChunkInfo], use_colors: bool, writer: &mut W) -> Result<()> {
    let rows: Vec<[String; 3]> = chunks
        .iter()
        .map(|chunk| [chunk.path.display().to_string(), chunk.records.to_string(), chunk.bytes.to_string()])
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header = format!(
        " {:<w0$} | {:<w1$} | {:<w2$}",
        HEADERS[0],
        HEADERS[1],
        HEADERS[2],
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2]
    );
    if use_colors {
        writeln!(writer, "{}", header.bold())?;
    } else {
        writeln!(writer, "{header}")?;
    }

    writeln!(writer, "-{}-+-{}-+-{}-", "-".repeat(widths[0]), "-".repeat(widths[1]), "-".repeat(widths[2]))?;

    for [path, records, bytes] in &rows {
        let path = format!("{path:<w$}", w = widths[0]);
        if use_colors {
            writeln!(writer, " {} | {records:>w1$} | {bytes:>w2$}", path.cyan(), w1 = widths[1], w2 = widths[2])?;
        } else {
            writeln!(writer, " {path} | {records:>w1$} | {bytes:>w2$}", w1 = widths[1], w2 = widths[2])?;
        }
    }

    Ok(())
}

//! Lazy line lengths with an early stop.
//!
//! Writes a small sample file, then processes it twice inside one handle:
//! a full pass that sums line lengths, and a second scope that stops after
//! the first two lines without ever reading the rest.

use lazylines::LazyFile;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("sample.txt");
    std::fs::write(
        &path,
        "the quick brown fox\njumps over\nthe lazy dog\nand keeps going\n",
    )?;

    let mut file = LazyFile::new(&path)?;

    // Full pass: one length per line, computed as the sum pulls them.
    let total: usize = file.scoped(|file| {
        let mut total = 0;
        for length in file.apply(|line| line.len())? {
            total += length?;
        }
        Ok::<_, lazylines::Error>(total)
    })?;
    println!("total bytes across lines: {total}");

    // Early stop: take(2) means lines three and four are never read.
    let preview: Vec<String> = file.scoped(|file| {
        file.apply(|line| line.trim_end().to_string())?
            .take(2)
            .collect::<Result<_, _>>()
    })?;
    println!("first two lines: {preview:?}");

    Ok(())
}

//! Subject-last application with a pre-bound argument bundle.
//!
//! The replacement function takes its line first, like any ordinary string
//! transformation. `map_function_with` reorders it subject-last internally,
//! binds the `(from, to)` bundle once, and maps the bound closure over the
//! file — equivalent to `apply_with`, without re-passing the bundle per line.

use lazylines::LazyFile;

fn replace(line: String, args: &(&str, &str)) -> String {
    line.replace(args.0, args.1)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("hosts.txt");
    std::fs::write(&path, "db.internal staging\nweb.internal staging\ncache.internal staging\n")?;

    let mut file = LazyFile::new(&path)?;
    let promoted: Vec<String> = file.scoped(|file| {
        file.map_function_with(replace, ("staging", "production"))?
            .collect::<Result<_, _>>()
    })?;

    for line in &promoted {
        print!("{line}");
    }

    Ok(())
}

use crate::adapt::{bind, subject_last};
use crate::error::{Error, Result};
use crate::read::{Encoding, LineReader};
use std::fmt;
use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// A text file read lazily, one line at a time, inside an explicit scope.
///
/// Construction validates that the path names an existing regular file but
/// does not touch it otherwise. [`open`](LazyFile::open) acquires the file
/// and builds a lazy line sequence over it; the application operations
/// ([`apply`](LazyFile::apply), [`map_function`](LazyFile::map_function) and
/// their `_with` variants) drain that sequence on demand, one line per
/// element requested. [`close`](LazyFile::close) releases the file, and
/// [`scoped`](LazyFile::scoped) wraps the whole cycle so release happens on
/// every exit path.
///
/// Lines keep their original terminators, so a transformation sees exactly
/// the bytes the file holds. Because nothing is read until an element is
/// requested, files larger than memory can be processed, and a consumer
/// that stops early never pays for the remainder.
///
/// # Examples
///
/// ```
/// use lazylines::LazyFile;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dir = tempfile::tempdir()?;
/// let path = dir.path().join("notes.txt");
/// std::fs::write(&path, "a\nbb\nccc\n")?;
///
/// let mut file = LazyFile::new(&path)?;
/// let lengths = file.scoped(|file| {
///     file.apply(|line| line.len())?.collect::<Result<Vec<_>, _>>()
/// })?;
///
/// assert_eq!(lengths, vec![2, 3, 4]);
/// assert!(!file.is_open());
/// # Ok(())
/// # }
/// ```
pub struct LazyFile {
    path: PathBuf,
    buffer_capacity: Option<usize>,
    encoding: Encoding,
    open: bool,
    lines: Option<LineReader>,
}

impl fmt::Debug for LazyFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyFile")
            .field("path", &self.path)
            .field("buffer_capacity", &self.buffer_capacity)
            .field("encoding", &self.encoding)
            .field("open", &self.open)
            .finish()
    }
}

/// Configures and constructs a [`LazyFile`].
///
/// Obtained from [`LazyFile::builder`]. Path validation happens at
/// [`build`](LazyFileBuilder::build), not while setting options.
#[derive(Debug, Clone)]
pub struct LazyFileBuilder {
    path: PathBuf,
    buffer_capacity: Option<usize>,
    encoding: Encoding,
}

impl LazyFileBuilder {
    /// Set the read buffer capacity in bytes.
    ///
    /// Passed through to the underlying buffered reader; when unset, the
    /// library default capacity is used.
    pub fn buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = Some(capacity);
        self
    }

    /// Set the text codec. Defaults to strict [`Encoding::Utf8`].
    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Validate the path and construct the handle.
    ///
    /// The file is not opened yet — only checked to exist and be a regular
    /// file.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if the path does not name an existing regular
    /// file; [`Error::Io`] if its metadata cannot be read for another
    /// reason.
    pub fn build(self) -> Result<LazyFile> {
        let metadata = match fs::metadata(&self.path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::NotFound { path: self.path });
            }
            Err(e) => return Err(Error::Io(e)),
        };

        if !metadata.is_file() {
            return Err(Error::NotFound { path: self.path });
        }

        Ok(LazyFile {
            path: self.path,
            buffer_capacity: self.buffer_capacity,
            encoding: self.encoding,
            open: false,
            lines: None,
        })
    }
}

impl LazyFile {
    /// Construct a handle with default buffering and strict UTF-8.
    ///
    /// Equivalent to `LazyFile::builder(path).build()`.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if `path` does not name an existing regular file.
    ///
    /// # Examples
    ///
    /// ```
    /// use lazylines::{Error, LazyFile};
    ///
    /// let err = LazyFile::new("").unwrap_err();
    /// assert!(matches!(err, Error::NotFound { .. }));
    /// ```
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        Self::builder(path).build()
    }

    /// Start building a handle for `path`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lazylines::{Encoding, LazyFile};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// # let dir = tempfile::tempdir()?;
    /// # let path = dir.path().join("data.txt");
    /// # std::fs::write(&path, "x\n")?;
    /// let file = LazyFile::builder(&path)
    ///     .buffer_capacity(64 * 1024)
    ///     .encoding(Encoding::Utf8Lossy)
    ///     .build()?;
    ///
    /// assert_eq!(file.encoding(), Encoding::Utf8Lossy);
    /// # Ok(())
    /// # }
    /// ```
    pub fn builder(path: impl AsRef<Path>) -> LazyFileBuilder {
        LazyFileBuilder {
            path: path.as_ref().to_path_buf(),
            buffer_capacity: None,
            encoding: Encoding::default(),
        }
    }

    /// The path this handle was constructed with.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The configured codec.
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// The configured buffer capacity, or `None` for the library default.
    pub fn buffer_capacity(&self) -> Option<usize> {
        self.buffer_capacity
    }

    /// Whether the handle currently holds an open scope.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Enter a scope: open the file and build a fresh lazy line sequence.
    ///
    /// Returns the handle itself so entry and use compose in one
    /// expression. Each successful `open` starts reading from the top of
    /// the file; lines consumed in an earlier scope are not remembered.
    ///
    /// # Errors
    ///
    /// [`Error::AlreadyOpen`] if a scope is already active, [`Error::Io`]
    /// if the file cannot be opened (it may have been removed or had its
    /// permissions changed since construction).
    pub fn open(&mut self) -> Result<&mut Self> {
        if self.open {
            return Err(Error::AlreadyOpen);
        }

        let file = File::open(&self.path)?;
        self.lines = Some(LineReader::new(file, self.buffer_capacity, self.encoding));
        self.open = true;
        log::debug!("opened {}", self.path.display());
        Ok(self)
    }

    /// Exit the scope: release the file and discard the line sequence.
    ///
    /// # Errors
    ///
    /// [`Error::NotOpen`] if no scope is active. [`Error::MissingReader`]
    /// if the handle was marked open but the reader was gone — the handle's
    /// state was corrupted and the release could not be observed.
    pub fn close(&mut self) -> Result<()> {
        if !self.open {
            return Err(Error::NotOpen);
        }

        self.open = false;
        match self.lines.take() {
            Some(reader) => {
                drop(reader);
                log::debug!("closed {}", self.path.display());
                Ok(())
            }
            None => Err(Error::MissingReader),
        }
    }

    /// Run `body` inside a scope, releasing the file on every exit path.
    ///
    /// Opens the handle, runs `body`, then closes the handle whether or not
    /// `body` succeeded. A failing body has its error logged before release
    /// and returned unchanged afterwards — never swallowed. The error type
    /// only needs to convert from [`Error`], so bodies may surface their
    /// own failures alongside this crate's.
    ///
    /// # Examples
    ///
    /// ```
    /// use lazylines::LazyFile;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// # let dir = tempfile::tempdir()?;
    /// # let path = dir.path().join("data.txt");
    /// # std::fs::write(&path, "one\ntwo\nthree\n")?;
    /// let mut file = LazyFile::new(&path)?;
    ///
    /// // Early stop: only the first line is ever read.
    /// let first = file.scoped(|file| {
    ///     let mut shouted = file.apply(|line| line.to_uppercase())?;
    ///     shouted.next().transpose()
    /// })?;
    ///
    /// assert_eq!(first.as_deref(), Some("ONE\n"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn scoped<R, E, F>(&mut self, body: F) -> std::result::Result<R, E>
    where
        E: From<Error> + fmt::Display,
        F: FnOnce(&mut Self) -> std::result::Result<R, E>,
    {
        self.open()?;
        let result = body(self);
        if let Err(error) = &result {
            log::error!("scope over {} failed: {error}", self.path.display());
        }
        let released = self.close();
        let value = result?;
        released?;
        Ok(value)
    }

    fn reader(&mut self) -> Result<&mut LineReader> {
        if !self.open {
            return Err(Error::NotOpen);
        }
        self.lines.as_mut().ok_or(Error::MissingReader)
    }

    /// The remaining lines of the current scope, terminators intact.
    ///
    /// Lazy and single-pass: lines are read as the iterator is advanced,
    /// and lines it yields are gone from the sequence. A read or decode
    /// failure yields one `Err` tagged with its line number and ends the
    /// sequence.
    ///
    /// # Errors
    ///
    /// [`Error::NotOpen`] if no scope is active.
    pub fn lines(&mut self) -> Result<impl Iterator<Item = Result<String>> + '_> {
        Ok(self.reader()?)
    }

    /// Lazily apply `func` to each remaining line.
    ///
    /// Yields `func(line)` per line, in file order, reading one line per
    /// element requested. Dropping the iterator early leaves the rest of
    /// the sequence unread and available to a later call.
    ///
    /// # Errors
    ///
    /// [`Error::NotOpen`] if no scope is active. Read failures surface per
    /// element, as in [`lines`](LazyFile::lines).
    pub fn apply<'a, T, F>(&'a mut self, mut func: F) -> Result<impl Iterator<Item = Result<T>> + 'a>
    where
        F: FnMut(String) -> T + 'a,
    {
        let reader = self.reader()?;
        Ok(reader.map(move |line| line.map(&mut func)))
    }

    /// Lazily apply `func` to each remaining line with an argument bundle.
    ///
    /// Yields `func(line, &args)` per line. The bundle is lent to `func`
    /// anew on every call; see
    /// [`map_function_with`](LazyFile::map_function_with) for the
    /// pre-bound equivalent.
    ///
    /// # Errors
    ///
    /// [`Error::NotOpen`] if no scope is active.
    pub fn apply_with<'a, T, A, F>(
        &'a mut self,
        mut func: F,
        args: A,
    ) -> Result<impl Iterator<Item = Result<T>> + 'a>
    where
        F: FnMut(String, &A) -> T + 'a,
        A: 'a,
    {
        let reader = self.reader()?;
        Ok(reader.map(move |line| line.map(|line| func(line, &args))))
    }

    /// Map `func` over the remaining lines.
    ///
    /// With no argument bundle there is nothing to pre-bind, so `func` is
    /// mapped directly — same output as [`apply`](LazyFile::apply).
    ///
    /// # Errors
    ///
    /// [`Error::NotOpen`] if no scope is active.
    pub fn map_function<'a, T, F>(
        &'a mut self,
        func: F,
    ) -> Result<impl Iterator<Item = Result<T>> + 'a>
    where
        F: FnMut(String) -> T + 'a,
    {
        self.apply(func)
    }

    /// Map `func` over the remaining lines with a pre-bound argument bundle.
    ///
    /// Output-equivalent to [`apply_with`](LazyFile::apply_with), but the
    /// bundle is fixed once up front: `func` is reordered subject-last and
    /// `args` bound to it, leaving a single-slot closure that is mapped
    /// over the lines. `func` still takes the line first — the reordering
    /// is internal.
    ///
    /// # Errors
    ///
    /// [`Error::NotOpen`] if no scope is active.
    ///
    /// # Examples
    ///
    /// ```
    /// use lazylines::LazyFile;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// # let dir = tempfile::tempdir()?;
    /// # let path = dir.path().join("data.txt");
    /// # std::fs::write(&path, "a\nbb\nccc\n")?;
    /// fn replace(line: String, args: &(&str, &str)) -> String {
    ///     line.replace(args.0, args.1)
    /// }
    ///
    /// let mut file = LazyFile::new(&path)?;
    /// let out = file.scoped(|file| {
    ///     file.map_function_with(replace, ("a", "X"))?
    ///         .collect::<Result<Vec<_>, _>>()
    /// })?;
    ///
    /// assert_eq!(out, vec!["X\n", "bb\n", "ccc\n"]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn map_function_with<'a, T: 'a, A, F>(
        &'a mut self,
        func: F,
        args: A,
    ) -> Result<impl Iterator<Item = Result<T>> + 'a>
    where
        F: Fn(String, &A) -> T + 'a,
        A: 'a,
    {
        let reader = self.reader()?;
        let mut bound = bind(subject_last(func), args);
        Ok(reader.map(move |line| line.map(|line| bound(line))))
    }

    /// Lazily apply a fallible `func` to each remaining line.
    ///
    /// A line `func` rejects surfaces as [`Error::Function`] tagged with
    /// that line's number, at the point the element is requested. Lines
    /// already yielded are unaffected, and later lines remain reachable by
    /// continuing to iterate.
    ///
    /// # Errors
    ///
    /// [`Error::NotOpen`] if no scope is active.
    pub fn try_apply<'a, T, E, F>(
        &'a mut self,
        mut func: F,
    ) -> Result<impl Iterator<Item = Result<T>> + 'a>
    where
        F: FnMut(String) -> std::result::Result<T, E> + 'a,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        let reader = self.reader()?;
        let start = reader.next_line_number();
        Ok(reader.enumerate().map(move |(index, line)| -> Result<T> {
            let number = start + index as u64;
            func(line?).map_err(|source| Error::Function {
                line: number,
                source: source.into(),
            })
        }))
    }
}

//! Configuration module for pdfmerge.
//!
//! A merge is driven by an explicit [`MergeConfig`] value: the ordered list
//! of [`FileSpec`] entries, the output path and the read concurrency. The
//! CLI builds one from arguments or a JSON file; tests build their own.
//! [`MergeConfig::default`] reproduces the built-in file list.

use anyhow::{Context, bail};
use serde::Deserialize;
use std::fmt;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{PdfMergeError, Result};

/// Output path used when none is configured.
pub const DEFAULT_OUTPUT: &str = "merged-buffer.pdf";

/// Number of benchmark iterations used when none is configured.
pub const DEFAULT_ITERATIONS: usize = 100;

/// Which pages of a source document to append.
///
/// Page numbers are 1-indexed and ranges are inclusive:
/// - `All` - every page
/// - `Single(3)` - page 3 only
/// - `Range(2, 5)` - pages 2, 3, 4 and 5
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "RawSelector")]
pub enum PageSelector {
    /// Every page of the document.
    #[default]
    All,
    /// Exactly one page.
    Single(u32),
    /// Pages `start..=end`.
    Range(u32, u32),
}

impl PageSelector {
    /// Parse a page selector string.
    ///
    /// Accepts `"all"`, a page number such as `"3"`, or a range such as
    /// `"2-5"`.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is empty, not numeric, contains page
    /// zero, or describes a range whose start is after its end.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdfmerge::config::PageSelector;
    ///
    /// assert_eq!(PageSelector::parse("2-5").unwrap(), PageSelector::Range(2, 5));
    /// assert_eq!(PageSelector::parse("7").unwrap(), PageSelector::Single(7));
    /// assert!(PageSelector::parse("0").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        parse_selector(s).map_err(|err| PdfMergeError::invalid_selector(s, format!("{err:#}")))
    }

    /// Check if this selector is [`PageSelector::All`].
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Resolve the selector against a document with `total` pages.
    ///
    /// Returns `None` when the selector points past the last page.
    pub fn resolve(&self, total: u32) -> Option<RangeInclusive<u32>> {
        match *self {
            Self::All => Some(1..=total),
            Self::Single(page) if page <= total => Some(page..=page),
            Self::Range(start, end) if end <= total => Some(start..=end),
            _ => None,
        }
    }
}

fn parse_selector(s: &str) -> anyhow::Result<PageSelector> {
    let s = s.trim();

    if s.is_empty() {
        bail!("Page selector cannot be empty");
    }

    if s.eq_ignore_ascii_case("all") {
        return Ok(PageSelector::All);
    }

    if let Some((start, end)) = s.split_once('-') {
        if end.contains('-') {
            bail!("Invalid page range format: {s}. Expected format like '1-5'");
        }

        let start: u32 = start
            .trim()
            .parse()
            .with_context(|| format!("Invalid page number: {start}"))?;
        let end: u32 = end
            .trim()
            .parse()
            .with_context(|| format!("Invalid page number: {end}"))?;

        if start == 0 || end == 0 {
            bail!("Page numbers must be positive (1-indexed)");
        }

        if start > end {
            bail!("Invalid range {start}-{end}: start page must be less than or equal to end page");
        }

        return Ok(PageSelector::Range(start, end));
    }

    let page: u32 = s
        .parse()
        .with_context(|| format!("Invalid page number: {s}"))?;

    if page == 0 {
        bail!("Page numbers must be positive (1-indexed)");
    }

    Ok(PageSelector::Single(page))
}

impl FromStr for PageSelector {
    type Err = PdfMergeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for PageSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Single(page) => write!(f, "{page}"),
            Self::Range(start, end) => write!(f, "{start}-{end}"),
        }
    }
}

/// Page selector as it appears in a JSON config: a number or a string.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawSelector {
    Page(u32),
    Text(String),
}

impl TryFrom<RawSelector> for PageSelector {
    type Error = PdfMergeError;

    fn try_from(raw: RawSelector) -> Result<Self> {
        match raw {
            RawSelector::Page(0) => Err(PdfMergeError::invalid_selector(
                "0",
                "Page numbers must be positive (1-indexed)",
            )),
            RawSelector::Page(page) => Ok(Self::Single(page)),
            RawSelector::Text(text) => Self::parse(&text),
        }
    }
}

/// One input file and the pages to take from it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileSpec {
    /// Path of the PDF file.
    pub filename: PathBuf,

    /// Pages to append; absent means all pages.
    #[serde(default)]
    pub pages: PageSelector,
}

impl FileSpec {
    /// Create a spec that appends every page of `filename`.
    pub fn new(filename: impl Into<PathBuf>) -> Self {
        Self {
            filename: filename.into(),
            pages: PageSelector::All,
        }
    }

    /// Create a spec restricted to `pages`.
    pub fn with_pages(filename: impl Into<PathBuf>, pages: PageSelector) -> Self {
        Self {
            filename: filename.into(),
            pages,
        }
    }
}

impl FromStr for FileSpec {
    type Err = PdfMergeError;

    /// Parse `NAME`, `NAME:N` or `NAME:START-END`.
    ///
    /// The suffix after the last `:` is only treated as a selector when it
    /// starts with a digit, so paths such as `C:\docs\a.pdf` stay intact.
    fn from_str(s: &str) -> Result<Self> {
        if s.trim().is_empty() {
            return Err(PdfMergeError::invalid_config("Input file name cannot be empty"));
        }

        match s.rsplit_once(':') {
            Some((name, pages))
                if !name.is_empty() && pages.trim_start().starts_with(|c: char| c.is_ascii_digit()) =>
            {
                Ok(Self::with_pages(name, PageSelector::parse(pages)?))
            }
            _ => Ok(Self::new(s)),
        }
    }
}

impl fmt::Display for FileSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pages {
            PageSelector::All => write!(f, "{}", self.filename.display()),
            pages => write!(f, "{}:{pages}", self.filename.display()),
        }
    }
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}

/// Complete configuration for a merge operation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MergeConfig {
    /// Input files in merge order.
    pub files: Vec<FileSpec>,

    /// Output PDF file path.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Number of concurrent file reads (None = auto-detect).
    #[serde(default)]
    pub jobs: Option<usize>,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            files: vec![
                FileSpec::new("file-1.pdf"),
                FileSpec::new("file-2.pdf"),
                FileSpec::with_pages("file-3.pdf", PageSelector::Single(1)),
            ],
            output: default_output(),
            jobs: None,
        }
    }
}

impl MergeConfig {
    /// Create a configuration for `files` written to `output`.
    pub fn new(files: Vec<FileSpec>, output: impl Into<PathBuf>) -> Self {
        Self {
            files,
            output: output.into(),
            jobs: None,
        }
    }

    /// Parse a configuration from JSON text.
    ///
    /// ```
    /// use pdfmerge::config::{MergeConfig, PageSelector};
    ///
    /// let config = MergeConfig::from_json_str(
    ///     r#"{ "files": [{ "filename": "a.pdf" }, { "filename": "b.pdf", "pages": "2-3" }] }"#,
    /// ).unwrap();
    /// assert_eq!(config.files[1].pages, PageSelector::Range(2, 3));
    /// assert_eq!(config.output.to_str(), Some("merged-buffer.pdf"));
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|err| PdfMergeError::invalid_config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    pub async fn from_json_file(path: &Path) -> Result<Self> {
        let json = tokio::fs::read_to_string(path).await.map_err(|source| {
            PdfMergeError::FailedToReadConfig {
                path: path.to_path_buf(),
                source,
            }
        })?;

        Self::from_json_str(&json)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No input files are specified
    /// - Jobs count is zero
    /// - The output path is also an input
    pub fn validate(&self) -> Result<()> {
        if self.files.is_empty() {
            return Err(PdfMergeError::NoFilesToMerge);
        }

        if self.jobs == Some(0) {
            return Err(PdfMergeError::invalid_config(
                "Number of jobs must be at least 1",
            ));
        }

        if let Some(spec) = self
            .files
            .iter()
            .find(|spec| same_path(&spec.filename, &self.output))
        {
            return Err(PdfMergeError::invalid_config(format!(
                "Output file cannot be the same as an input file: {}",
                spec.filename.display()
            )));
        }

        Ok(())
    }

    /// Get the effective number of concurrent reads.
    ///
    /// Returns the configured job count, or the number of CPU cores if auto-detect.
    pub fn effective_jobs(&self) -> usize {
        self.jobs.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }
}

/// Whether `a` and `b` name the same file once made absolute.
///
/// Symlinks are not resolved.
fn same_path(a: &Path, b: &Path) -> bool {
    let absolute = |p: &Path| std::path::absolute(p).unwrap_or_else(|_| p.to_path_buf());
    absolute(a) == absolute(b)
}

/// Settings for the benchmark runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchConfig {
    /// Number of back-to-back merge iterations.
    pub iterations: usize,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

impl BenchConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(PdfMergeError::invalid_config(
                "Number of iterations must be at least 1",
            ));
        }
        Ok(())
    }
}

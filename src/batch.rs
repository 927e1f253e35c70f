//! The batch driver compresses every file of a dataset directory into a
//! mirrored output tree, and decompresses such a tree in place. Each file is
//! handled independently: a file that fails is reported and skipped.

use std::fs::{self, File, FileType};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::error::{LZ78Error, Result};
use crate::lz::{compress_stream, decompress_stream, StreamStats};
use crate::utils::signatures::DECOMPRESSED_SUFFIX;

/// Settings for the batch driver.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Appended to the file stem of each decompressed file.
    pub decompressed_suffix: String,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            decompressed_suffix: String::from(DECOMPRESSED_SUFFIX),
        }
    }
}

/// A file that could not be processed.
#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: LZ78Error,
}

/// Totals over all of the files of a batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// The number of files that were processed successfully.
    pub files: usize,
    /// Bytes read from the successful files.
    pub read: usize,
    /// Bytes written for the successful files.
    pub written: usize,
    pub failures: Vec<FileFailure>,
}

impl BatchReport {
    fn record(&mut self, stats: StreamStats) {
        self.files += 1;
        self.read += stats.read;
        self.written += stats.written;
    }

    /// Returns the original size over the compressed size, or None if
    /// nothing was processed.
    pub fn ratio(&self, compressing: bool) -> Option<f64> {
        StreamStats {
            read: self.read,
            written: self.written,
        }
        .ratio(compressing)
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Compress the file 'input' into the file 'output'. A partially written
/// output is removed if reading or writing fails.
pub fn compress_file(input: &Path, output: &Path) -> Result<StreamStats> {
    let src = File::open(input)?;
    let dest = File::create(output)?;
    let res = compress_stream(src, dest);
    if res.is_err() {
        let _ = fs::remove_file(output);
    }
    res
}

/// Decompress the file 'input' into the file 'output'. A partially written
/// output is removed if the input is malformed.
pub fn decompress_file(input: &Path, output: &Path) -> Result<StreamStats> {
    let src = File::open(input)?;
    let dest = File::create(output)?;
    let res = decompress_stream(src, dest);
    if res.is_err() {
        let _ = fs::remove_file(output);
    }
    res
}

/// Returns the path of the decompressed copy of 'path': the same directory
/// and extension, with 'suffix' appended to the stem.
pub fn decompressed_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_default();
    name.push(suffix);
    if let Some(ext) = path.extension() {
        name.push(".");
        name.push(ext);
    }
    path.with_file_name(name)
}

/// The directories and files under a root directory, in a stable order.
/// The root itself is not listed.
#[derive(Debug, Default)]
struct Tree {
    dirs: Vec<PathBuf>,
    files: Vec<PathBuf>,
    /// Nested directories that could not be listed.
    failures: Vec<FileFailure>,
}

/// Returns the sorted entries of 'dir' with their types. The types come
/// from the directory entries, so symlinks are not followed.
fn list_dir(dir: &Path) -> std::io::Result<Vec<(PathBuf, FileType)>> {
    let mut entries = fs::read_dir(dir)?
        .map(|entry| entry.and_then(|e| Ok((e.path(), e.file_type()?))))
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(entries)
}

impl Tree {
    /// Collect everything under 'root'. Only a failure to list the root
    /// itself is an error.
    fn walk(root: &Path) -> Result<Self> {
        let mut tree = Self::default();
        tree.visit(list_dir(root)?);
        Ok(tree)
    }

    fn visit(&mut self, entries: Vec<(PathBuf, FileType)>) {
        for (path, ty) in entries {
            if ty.is_dir() {
                self.dirs.push(path.clone());
                match list_dir(&path) {
                    Ok(children) => self.visit(children),
                    Err(err) => {
                        log::warn!("Can't list {}: {}", path.display(), err);
                        self.failures.push(FileFailure {
                            path,
                            error: err.into(),
                        });
                    }
                }
            } else if ty.is_file() || (ty.is_symlink() && path.is_file()) {
                // Links to files are followed, links to directories are not.
                self.files.push(path);
            } else {
                log::debug!("Skipping {}", path.display());
            }
        }
    }
}

fn process_file<F>(
    report: &mut BatchReport,
    input: &Path,
    output: &Path,
    compressing: bool,
    handler: F,
) where
    F: Fn(&Path, &Path) -> Result<StreamStats>,
{
    let start = Instant::now();
    match handler(input, output) {
        Ok(stats) => {
            log::info!(
                "{} -> {}: {} to {} bytes ({:.4}x) in {:.3} seconds",
                input.display(),
                output.display(),
                stats.read,
                stats.written,
                stats.ratio(compressing).unwrap_or(1.0),
                start.elapsed().as_secs_f32()
            );
            report.record(stats);
        }
        Err(error) => {
            log::warn!("Failed to process {}: {}", input.display(), error);
            report.failures.push(FileFailure {
                path: input.to_path_buf(),
                error,
            });
        }
    }
}

/// Compress every file under 'input_dir' into the same relative location
/// under 'output_dir'. The output directory must not exist.
pub fn compress_tree(
    input_dir: &Path,
    output_dir: &Path,
) -> Result<BatchReport> {
    let tree = Tree::walk(input_dir)?;

    fs::create_dir(output_dir)?;
    for dir in &tree.dirs {
        if let Ok(rel) = dir.strip_prefix(input_dir) {
            fs::create_dir_all(output_dir.join(rel))?;
        }
    }

    let mut report = BatchReport {
        failures: tree.failures,
        ..Default::default()
    };
    for file in &tree.files {
        let Ok(rel) = file.strip_prefix(input_dir) else {
            continue;
        };
        let dest = output_dir.join(rel);
        process_file(&mut report, file, &dest, true, compress_file);
    }

    log::info!(
        "Compressed {} files from {} to {} bytes ({} failed)",
        report.files,
        report.read,
        report.written,
        report.failures.len()
    );
    if let Some(ratio) = report.ratio(true) {
        log::info!("Compression ratio is {:.4}x.", ratio);
    }
    Ok(report)
}

/// Decompress every file under 'dir' into a sibling file whose stem carries
/// the decompressed suffix. The file list is taken before anything is
/// written.
pub fn decompress_tree(
    dir: &Path,
    options: &BatchOptions,
) -> Result<BatchReport> {
    let tree = Tree::walk(dir)?;

    let mut report = BatchReport {
        failures: tree.failures,
        ..Default::default()
    };
    for file in &tree.files {
        let dest = decompressed_path(file, &options.decompressed_suffix);
        process_file(&mut report, file, &dest, false, decompress_file);
    }

    log::info!(
        "Decompressed {} files from {} to {} bytes ({} failed)",
        report.files,
        report.read,
        report.written,
        report.failures.len()
    );
    Ok(report)
}

//! This is the command line tool that loads an input file and either compresses
//! or decompresses it. In batch mode the input is a dataset directory.

extern crate clap;
extern crate env_logger;
extern crate log;

use clap::{Arg, ArgAction, Command};
use lz78::batch::{compress_tree, decompress_tree, BatchOptions, BatchReport};
use lz78::utils::signatures::{has_extension, FILE_EXTENSION};
use lz78::{compress, decompress};

use std::path::Path;
use std::process::ExitCode;
use std::{fs, time::Instant};
use std::{fs::File, io::Write};

fn save_file(data: &[u8], path: &str) -> std::io::Result<()> {
    let mut f = File::create(path)?;
    f.write_all(data)?;
    log::info!("Wrote {}.", &path);
    Ok(())
}

/// A scoped utility struct for measuring and reporting time.
struct Timer {
    start: std::time::Instant,
}

impl Timer {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        let now = Instant::now();
        if let Some(duration) = now.checked_duration_since(self.start) {
            log::info!(
                "Operation completed in {:03} seconds",
                duration.as_secs_f32()
            );
        }
    }
}

fn report_batch(report: &BatchReport) -> ExitCode {
    for failure in &report.failures {
        log::error!("{}: {}", failure.path.display(), failure.error);
    }
    if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn handle_batch(
    is_compress: bool,
    input_path: &str,
    output_path: Option<String>,
) -> ExitCode {
    let options = BatchOptions::default();
    let res = if is_compress {
        let out = output_path.unwrap_or_else(|| String::from("output"));
        log::info!("Compressing the dataset {} into {}", input_path, out);
        compress_tree(Path::new(input_path), Path::new(&out))
    } else {
        log::info!("Decompressing the dataset {}", input_path);
        decompress_tree(Path::new(input_path), &options)
    };

    match res {
        Ok(report) => report_batch(&report),
        Err(err) => {
            log::error!("Batch failed: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn handle_file(
    is_compress: bool,
    checked: bool,
    input_path: &str,
    output_path: &str,
) -> ExitCode {
    let input = match fs::read(input_path) {
        Ok(input) => input,
        Err(err) => {
            log::error!("Can't open the input file {}: {}", input_path, err);
            return ExitCode::FAILURE;
        }
    };

    let dest = if is_compress {
        log::info!("Compressing using the LZ78 compressor");
        let dest = compress(&input);
        log::info!("Compressed from {} to {} bytes.", input.len(), dest.len());
        if !dest.is_empty() {
            log::info!(
                "Compression ratio is {:.4}x.",
                input.len() as f64 / dest.len() as f64
            );
        }

        if checked {
            match decompress(&dest) {
                Ok(decoded) if decoded == input => log::info!("Correct!"),
                Ok(_) => {
                    log::error!("Incorrect!");
                    return ExitCode::FAILURE;
                }
                Err(err) => {
                    log::error!("Could not decompress the file: {}", err);
                    return ExitCode::FAILURE;
                }
            }
        }
        dest
    } else {
        log::info!("Decompressing LZ78 compression");
        match decompress(&input) {
            Ok(dest) => {
                log::info!(
                    "Decompressed from {} to {} bytes.",
                    input.len(),
                    dest.len()
                );
                dest
            }
            Err(err) => {
                log::error!("Decompression failed: {}", err);
                return ExitCode::FAILURE;
            }
        }
    };

    if let Err(err) = save_file(&dest, output_path) {
        log::error!("Unable to write {}: {}", output_path, err);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn main() -> ExitCode {
    let matches = Command::new("CLI")
        .version("1.x")
        .arg(
            Arg::new("checked")
                .long("check")
                .help("Enables checked-mode")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("decompress")
                .short('d')
                .long("decompress")
                .help("Try to decompress the input")
                .action(ArgAction::SetTrue)
                .conflicts_with("compress"),
        )
        .arg(
            Arg::new("compress")
                .short('c')
                .long("compress")
                .help("Compress the input")
                .conflicts_with("decompress")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("batch")
                .long("batch")
                .help("The input is a directory of files to process")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Path of the output file, or of the output directory")
                .num_args(1),
        )
        .arg(
            Arg::new("INPUT")
                .help("Sets the input file to use")
                .required(true)
                .index(1),
        )
        .get_matches();

    env_logger::builder().format_timestamp(None).init();

    let mut cli_compress = matches.get_flag("compress");
    let cli_decompress = matches.get_flag("decompress");
    let cli_checked_mode = matches.get_flag("checked");
    let cli_batch = matches.get_flag("batch");
    let mut cli_output_path = matches.get_one::<String>("output").cloned();

    let Some(input_path) = matches.get_one::<String>("INPUT") else {
        return ExitCode::FAILURE;
    };

    // The user did not specify if this is compress of decompress. Try to figure
    // out using the extension.
    let ends_with_ext = has_extension(input_path);
    if !cli_compress && !cli_decompress && !ends_with_ext {
        cli_compress = true;
    }

    let _timer = Timer::new();

    if cli_batch {
        return handle_batch(cli_compress, input_path, cli_output_path);
    }

    // Come up with a file name.
    if cli_output_path.is_none() {
        if ends_with_ext {
            // remove the extension.
            let end = input_path.len() - FILE_EXTENSION.len();
            cli_output_path = Some(String::from(&input_path[0..end]));
        } else {
            // Add the extension.
            cli_output_path = Some(input_path.clone() + FILE_EXTENSION);
        }
    }

    let out = cli_output_path.unwrap_or_default();
    handle_file(cli_compress, cli_checked_mode, input_path, &out)
}

// ============================================================================
// SignPad CLI — headless signature rendering via command-line arguments
// ============================================================================
//
// Usage examples:
//   signpad --script signature.json --output sig.png
//   signpad -s "scripts/*.json" --output-dir rendered/
//   signpad -s signature.json --print-data-uri
//   signpad --decode uri.txt -o sig.png
//
// No GUI is opened in CLI mode. Scripts replay through the same pad code the
// GUI uses, so rendered output matches interactive drawing pixel for pixel.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use crate::io::{save_png, with_png_extension, write_data_uri};
use crate::script::StrokeScript;
use crate::snapshot;

// ============================================================================
// CLI argument definition (clap Derive)
// ============================================================================

/// SignPad headless signature renderer.
///
/// Replay stroke scripts or decode captured data URIs into PNG images — no
/// GUI required.
#[derive(Parser, Debug)]
#[command(
    name = "signpad",
    about = "SignPad headless signature renderer",
    long_about = "Replay stroke scripts into signature images, or decode previously\n\
                  captured data URIs, without opening the GUI.\n\n\
                  Example:\n  \
                  signpad --script signature.json --output sig.png\n  \
                  signpad -s \"scripts/*.json\" --output-dir rendered/"
)]
pub struct CliArgs {
    /// Stroke script file(s) to replay. Glob patterns accepted
    /// (e.g. "scripts/*.json").
    #[arg(short, long, value_name = "SCRIPT.json", num_args = 1.., conflicts_with = "decode")]
    pub script: Vec<String>,

    /// Data-URI text file(s) to decode into PNG images. Glob patterns accepted.
    #[arg(short, long, value_name = "URI.txt", num_args = 1..)]
    pub decode: Vec<String>,

    /// Output file path. Only valid for single-file input.
    /// For batch input use --output-dir instead.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output directory for batch processing.
    /// Files are written here with the input's stem and a .png extension.
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Also write the replayed data URI to this text file (single input only).
    #[arg(long, value_name = "FILE")]
    pub data_uri_out: Option<PathBuf>,

    /// Print each replayed data URI to stdout.
    /// Without --output/--output-dir this suppresses the PNG file.
    #[arg(long)]
    pub print_data_uri: bool,

    /// Print per-file timing information.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliArgs {
    /// Returns `true` when any CLI-mode flag is present in the real process
    /// arguments. Used by `main()` to route before creating an eframe window.
    pub fn is_cli_mode() -> bool {
        std::env::args().any(|a| a == "--script" || a == "-s" || a == "--decode" || a == "-d")
    }
}

// ============================================================================
// Public entry point
// ============================================================================

/// Run all CLI processing and return an OS exit code.
/// `0` = all files succeeded, `1` = one or more files failed.
pub fn run(args: CliArgs) -> ExitCode {
    let replay_mode = !args.script.is_empty();
    let patterns = if replay_mode { &args.script } else { &args.decode };

    let inputs = resolve_inputs(patterns);
    if inputs.is_empty() {
        eprintln!("error: no input files matched the given pattern(s).");
        return ExitCode::FAILURE;
    }

    // Multiple inputs require --output-dir, not a single destination file
    if inputs.len() > 1 && args.output.is_some() && args.output_dir.is_none() {
        eprintln!(
            "error: {} input files given but --output only accepts a single file path.\n\
             Use --output-dir to specify a destination directory for batch processing.",
            inputs.len()
        );
        return ExitCode::FAILURE;
    }
    if inputs.len() > 1 && args.data_uri_out.is_some() {
        eprintln!("error: --data-uri-out only accepts a single input file.");
        return ExitCode::FAILURE;
    }

    if let Some(dir) = &args.output_dir {
        if let Err(e) = std::fs::create_dir_all(dir) {
            eprintln!(
                "error: could not create output directory '{}': {}",
                dir.display(),
                e
            );
            return ExitCode::FAILURE;
        }
    }

    // URI-only invocations skip the PNG unless a destination was named.
    let png_wanted = args.output.is_some()
        || args.output_dir.is_some()
        || (!args.print_data_uri && args.data_uri_out.is_none());

    let total = inputs.len();
    let multi = total > 1;
    let mut any_failure = false;

    for (idx, input_path) in inputs.iter().enumerate() {
        if multi || args.verbose {
            println!("[{}/{}] {}", idx + 1, total, input_path.display());
        }

        let file_start = Instant::now();

        let output_path = if png_wanted {
            match build_output_path(input_path, args.output.as_deref(), args.output_dir.as_deref())
            {
                Some(p) => Some(p),
                None => {
                    eprintln!(
                        "  error: cannot determine output path for '{}'.",
                        input_path.display()
                    );
                    any_failure = true;
                    continue;
                }
            }
        } else {
            None
        };

        let result = if replay_mode {
            run_one_script(
                input_path,
                output_path.as_deref(),
                args.data_uri_out.as_deref(),
                args.print_data_uri,
            )
        } else {
            run_one_decode(input_path, output_path.as_deref())
        };

        match result {
            Ok(()) => {
                if (args.verbose || multi) && let Some(out) = &output_path {
                    println!(
                        "  → {} ({:.0}ms)",
                        out.display(),
                        file_start.elapsed().as_secs_f64() * 1000.0
                    );
                }
            }
            Err(e) => {
                eprintln!("  error: {}", e);
                any_failure = true;
            }
        }
    }

    if any_failure { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}

// ============================================================================
// Per-file processing
// ============================================================================

/// Replay one stroke script: parse, replay, then fan the captured value out
/// to the PNG file, stdout, and/or the data-URI file.
fn run_one_script(
    input: &Path,
    output: Option<&Path>,
    data_uri_out: Option<&Path>,
    print_data_uri: bool,
) -> Result<(), String> {
    let source = std::fs::read_to_string(input)
        .map_err(|e| format!("could not read script '{}': {}", input.display(), e))?;
    let script = StrokeScript::from_json(&source)
        .map_err(|e| format!("script parse error: {}", e))?;

    let (_, uri) = script.replay();
    if uri.is_empty() {
        return Err(
            "script never completed a stroke (no mouse_up, mouse_leave, or touch_end event), \
             so no output value was captured"
                .to_string(),
        );
    }

    if print_data_uri {
        println!("{}", uri);
    }
    if let Some(path) = data_uri_out {
        write_data_uri(path, &uri)
            .map_err(|e| format!("could not write '{}': {}", path.display(), e))?;
    }
    if let Some(path) = output {
        let image = snapshot::decode_data_uri(&uri)
            .map_err(|e| format!("captured value failed to decode: {}", e))?;
        save_png(&image, path).map_err(|e| format!("save failed: {}", e))?;
    }
    Ok(())
}

/// Decode one captured data-URI file into a PNG image.
fn run_one_decode(input: &Path, output: Option<&Path>) -> Result<(), String> {
    let uri = crate::io::read_data_uri(input)
        .map_err(|e| format!("could not read '{}': {}", input.display(), e))?;
    let image =
        snapshot::decode_data_uri(&uri).map_err(|e| format!("decode failed: {}", e))?;

    if let Some(path) = output {
        save_png(&image, path).map_err(|e| format!("save failed: {}", e))?;
    }
    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

/// Expand glob patterns and literal paths into a deduplicated, ordered list.
fn resolve_inputs(patterns: &[String]) -> Vec<PathBuf> {
    let mut result: Vec<PathBuf> = Vec::new();

    for pattern in patterns {
        let as_path = Path::new(pattern);

        if as_path.exists() {
            // Literal path — use directly
            if !result.iter().any(|p| p.as_path() == as_path) {
                result.push(as_path.to_path_buf());
            }
            continue;
        }

        match glob::glob(pattern) {
            Ok(entries) => {
                let mut matched = false;
                for entry in entries.flatten() {
                    if !result.contains(&entry) {
                        result.push(entry);
                    }
                    matched = true;
                }
                if !matched {
                    eprintln!("warning: pattern '{}' matched no files.", pattern);
                }
            }
            Err(e) => {
                eprintln!("warning: invalid glob '{}': {}", pattern, e);
            }
        }
    }

    result
}

/// Compute the output path for a single input file.
///
/// Priority:
/// 1. `--output` (explicit path, used for single-file input)
/// 2. `--output-dir` (batch directory, derives filename from input stem)
/// 3. Fallback: same directory as input, same stem, `.png` extension
///    (appends `_out` to the stem if it would collide with the input path)
fn build_output_path(
    input: &Path,
    output: Option<&Path>,
    output_dir: Option<&Path>,
) -> Option<PathBuf> {
    if let Some(out) = output {
        return Some(with_png_extension(out.to_path_buf()));
    }

    let stem = input.file_stem()?.to_string_lossy().into_owned();

    if let Some(dir) = output_dir {
        return Some(dir.join(format!("{}.png", stem)));
    }

    let parent = input.parent().unwrap_or(Path::new("."));
    let candidate = parent.join(format!("{}.png", stem));

    // Avoid silent overwrite of the input
    if candidate == input {
        Some(parent.join(format!("{}_out.png", stem)))
    } else {
        Some(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_prefers_explicit_then_dir_then_sibling() {
        let input = Path::new("scripts/sig.json");
        assert_eq!(
            build_output_path(input, Some(Path::new("out/custom.png")), None),
            Some(PathBuf::from("out/custom.png"))
        );
        assert_eq!(
            build_output_path(input, None, Some(Path::new("rendered"))),
            Some(PathBuf::from("rendered/sig.png"))
        );
        assert_eq!(
            build_output_path(input, None, None),
            Some(PathBuf::from("scripts/sig.png"))
        );
    }

    /// An input already named like the derived output must not be clobbered.
    #[test]
    fn sibling_output_never_overwrites_input() {
        let input = Path::new("captures/sig.png");
        assert_eq!(
            build_output_path(input, None, None),
            Some(PathBuf::from("captures/sig_out.png"))
        );
    }

    #[test]
    fn explicit_output_gains_png_extension() {
        assert_eq!(
            build_output_path(Path::new("a.json"), Some(Path::new("plain")), None),
            Some(PathBuf::from("plain.png"))
        );
    }
}

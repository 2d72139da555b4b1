//! Termstream Headless Runner
//!
//! Feeds a control stream to a terminal and prints the resulting state.
//! Reads input from stdin or a file, optionally in fixed-size chunks to
//! exercise sequences split across deliveries.

use std::io::{self, Read};
use std::process::ExitCode;

use termstream::core::{Clipboard, TextDocument};
use termstream::snapshot::SnapshotClipboard;
use termstream::{Snapshot, Terminal, TerminalConfig};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args: Vec<String> = std::env::args().collect();

    // Parse command line arguments
    let mut cols = 80usize;
    let mut chunk_size: Option<usize> = None;
    let mut input_file: Option<String> = None;
    let mut config_file: Option<String> = None;
    let mut output_format = OutputFormat::Text;
    let mut show_help = false;
    let mut system_clipboard = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-w" | "--cols" => {
                i += 1;
                if i < args.len() {
                    cols = args[i].parse().unwrap_or(80);
                }
            },
            "-c" | "--chunk" => {
                i += 1;
                if i < args.len() {
                    chunk_size = args[i].parse().ok().filter(|&n: &usize| n > 0);
                }
            },
            "-f" | "--file" => {
                i += 1;
                if i < args.len() {
                    input_file = Some(args[i].clone());
                }
            },
            "--config" => {
                i += 1;
                if i < args.len() {
                    config_file = Some(args[i].clone());
                }
            },
            "--system-clipboard" => {
                system_clipboard = true;
            },
            "-j" | "--json" => {
                output_format = OutputFormat::Json;
            },
            "-t" | "--text" => {
                output_format = OutputFormat::Text;
            },
            "-h" | "--help" => {
                show_help = true;
            },
            _ => {
                // Treat as input file if no flag
                if input_file.is_none() && !args[i].starts_with('-') {
                    input_file = Some(args[i].clone());
                }
            },
        }
        i += 1;
    }

    if show_help {
        print_help();
        return ExitCode::SUCCESS;
    }

    let config = match &config_file {
        Some(path) => match TerminalConfig::load(std::path::Path::new(path)) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path, e);
                return ExitCode::FAILURE;
            },
        },
        None => TerminalConfig::load_or_default(),
    };

    // Read input
    let input_data = match &input_file {
        Some(path) => match std::fs::read(path) {
            Ok(data) => data,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path, e);
                return ExitCode::FAILURE;
            },
        },
        None => {
            // Read from stdin
            let mut data = Vec::new();
            if let Err(e) = io::stdin().read_to_end(&mut data) {
                eprintln!("Error reading stdin: {}", e);
                return ExitCode::FAILURE;
            }
            data
        },
    };
    let input = String::from_utf8_lossy(&input_data);
    tracing::debug!(chars = input.chars().count(), ?chunk_size, "processing input");

    // Process input
    let document = TextDocument::new(cols).record_writes(false);
    let snapshot = if system_clipboard {
        match process_with_system_clipboard(document, config, &input, chunk_size) {
            Some(snapshot) => snapshot,
            None => return ExitCode::FAILURE,
        }
    } else {
        process(Terminal::with_config(document, config), &input, chunk_size)
    };

    // Output result
    match output_format {
        OutputFormat::Text => {
            println!("Terminal State ({} cols):", cols);
            println!("{}", snapshot.to_text());
        },
        OutputFormat::Json => match snapshot.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing snapshot: {}", e);
                return ExitCode::FAILURE;
            },
        },
    }

    ExitCode::SUCCESS
}

/// Feed the input, whole or in `chunk_size` character chunks
fn process<C>(mut terminal: Terminal<TextDocument, C>, input: &str, chunk_size: Option<usize>) -> Snapshot
where
    C: Clipboard + SnapshotClipboard,
{
    match chunk_size {
        Some(size) => {
            let chars: Vec<char> = input.chars().collect();
            for chunk in chars.chunks(size) {
                let chunk: String = chunk.iter().collect();
                terminal.write(&chunk);
            }
        },
        None => terminal.write(input),
    }
    Snapshot::from_terminal(&terminal)
}

#[cfg(feature = "clipboard")]
fn process_with_system_clipboard(
    document: TextDocument,
    config: TerminalConfig,
    input: &str,
    chunk_size: Option<usize>,
) -> Option<Snapshot> {
    let clipboard = termstream::core::SystemClipboard::new();
    let replies = termstream::core::PendingReplies::new();
    let terminal = Terminal::with_capabilities(document, clipboard, replies, config);
    Some(process(terminal, input, chunk_size))
}

#[cfg(not(feature = "clipboard"))]
fn process_with_system_clipboard(
    _document: TextDocument,
    _config: TerminalConfig,
    _input: &str,
    _chunk_size: Option<usize>,
) -> Option<Snapshot> {
    eprintln!("--system-clipboard requires the 'clipboard' feature");
    None
}

#[derive(Clone, Copy)]
enum OutputFormat {
    Text,
    Json,
}

fn print_help() {
    println!("Termstream Headless Runner");
    println!();
    println!("Usage: termstream-headless [OPTIONS] [INPUT_FILE]");
    println!();
    println!("Options:");
    println!("  -w, --cols <N>       Set document width (default: 80)");
    println!("  -c, --chunk <N>      Deliver input in chunks of N characters");
    println!("  -f, --file <PATH>    Read input from file");
    println!("      --config <PATH>  Load configuration from a JSON file");
    println!("      --system-clipboard  Send OSC 52 writes to the desktop clipboard");
    println!("  -j, --json           Output snapshot as JSON");
    println!("  -t, --text           Output snapshot as text (default)");
    println!("  -h, --help           Show this help message");
    println!();
    println!("If no input file is specified, reads from stdin.");
    println!("Without --config, ~/.config/termstream/config.json is used if present.");
    println!();
    println!("Examples:");
    println!("  printf '\\x1b]0;title\\x07Hello' | termstream-headless");
    println!("  termstream-headless -c 1 --json input.txt");
}

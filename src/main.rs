use std::env;
use std::fs;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: chordshift <input.song> <semitones> [output]");
        eprintln!("       chordshift --check <input.song>");
        process::exit(1);
    }

    // Validation mode
    if args[1] == "--check" {
        if args.len() < 3 {
            eprintln!("Usage: chordshift --check <input.song>");
            process::exit(1);
        }
        let source = read_source(&args[2]);
        let song = match chordshift::parse_song(&source) {
            Ok(song) => song,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        };
        let report = chordshift::validate_song(&song);
        for warning in report.lyrics.warnings.iter().chain(report.warnings.iter()) {
            eprintln!("warning: {}", warning);
        }
        if report.is_clean() {
            eprintln!("{}: no issues found", args[2]);
        }
        return;
    }

    if args.len() < 3 {
        eprintln!("Usage: chordshift <input.song> <semitones> [output]");
        process::exit(1);
    }

    let input_path = &args[1];
    let semitones: i32 = match args[2].parse() {
        Ok(n) => n,
        Err(_) => {
            eprintln!("Invalid semitone offset '{}': expected an integer", args[2]);
            process::exit(1);
        }
    };
    let output_path = args.get(3);

    let source = read_source(input_path);

    let transposed = match chordshift::transpose_song(&source, semitones) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(path, &transposed) {
                eprintln!("Error writing to '{}': {}", path, e);
                process::exit(1);
            }
            eprintln!("Wrote transposed song to {}", path);
        }
        None => {
            println!("{}", transposed);
        }
    }
}

fn read_source(path: &str) -> String {
    match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", path, e);
            process::exit(1);
        }
    }
}

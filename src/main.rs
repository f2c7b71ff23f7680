use log::debug;
use std::env;
use std::io::{self, BufRead};
use std::process::ExitCode;
use thompson_nfa_transformer::{render, translate, ConversionConfig, StateAllocator};

const USAGE: &str = "usage: thompson_nfa [--alphabet <chars>] [--postfix] [pattern]";

#[derive(Debug, Default)]
struct Options {
    alphabet: Option<String>,
    show_postfix: bool,
    pattern: Option<String>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Options, String> {
    let mut options = Options::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--alphabet" => {
                options.alphabet = Some(args.next().ok_or("--alphabet needs a value")?);
            }
            "--postfix" => options.show_postfix = true,
            _ if options.pattern.is_none() => options.pattern = Some(arg),
            _ => return Err(format!("unexpected argument {arg:?}")),
        }
    }

    Ok(options)
}

/// Surrounding whitespace is not part of the pattern.
fn pattern_from_line(line: &str) -> String {
    line.trim().to_string()
}

fn read_pattern() -> io::Result<String> {
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(pattern_from_line(&line))
}

fn main() -> ExitCode {
    env_logger::init();

    let options = match parse_args(env::args().skip(1)) {
        Ok(options) => options,
        Err(msg) => {
            eprintln!("{msg}");
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };
    debug!("{options:?}");

    let pattern = match options.pattern {
        Some(pattern) => pattern,
        None => match read_pattern() {
            Ok(pattern) => pattern,
            Err(e) => {
                eprintln!("error: could not read pattern: {e}");
                return ExitCode::FAILURE;
            }
        },
    };

    let config = match options.alphabet {
        Some(alphabet) => ConversionConfig::with_alphabet(alphabet.chars()),
        None => ConversionConfig::default(),
    };

    match translate(&pattern, &config, &mut StateAllocator::new()) {
        Ok(translation) => {
            if options.show_postfix {
                println!("Normalized: {}", render(translation.normalized()));
                println!("Postfix: {}", render(translation.postfix()));
            }
            print!("{}", translation.automaton().describe());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_flags_and_pattern() {
        let options = parse_args(args(&["--postfix", "--alphabet", "ab", "(a|b)*"])).unwrap();
        assert!(options.show_postfix);
        assert_eq!(options.alphabet.as_deref(), Some("ab"));
        assert_eq!(options.pattern.as_deref(), Some("(a|b)*"));
    }

    #[test]
    fn pattern_is_optional() {
        let options = parse_args(args(&[])).unwrap();
        assert!(options.pattern.is_none());
        assert!(!options.show_postfix);
    }

    #[test]
    fn stdin_line_is_trimmed() {
        assert_eq!(pattern_from_line("ab  \n"), "ab");
        assert_eq!(pattern_from_line("  (a|b)*\r\n"), "(a|b)*");
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(parse_args(args(&["--alphabet"])).is_err());
        assert!(parse_args(args(&["a", "b"])).is_err());
    }
}

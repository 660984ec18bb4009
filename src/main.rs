mod debug_report;

use stylet::{Config, FieldSyntax, expand_verbose_with, expand_with};
use std::io::{self, IsTerminal, Read};

fn main() {
    let cli = match parse_args() {
        Ok(cli) => cli,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    if cli.verbose {
        let res = expand_verbose_with(&cli.input, &cli.config);
        debug_report::print_run(&cli.input, &res, cli.color);
    } else {
        println!("{}", expand_with(&cli.input, &cli.config));
    }
}

struct Cli {
    input: String,
    config: Config,
    verbose: bool,
    color: bool,
}

fn parse_args() -> Result<Cli, String> {
    let mut input: Option<String> = None;
    let mut config = Config::default();
    let mut verbose = false;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1).peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("stylet {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--verbose" | "-v" => verbose = true,
            "--plain" => config.options.field_syntax = FieldSyntax::Plain,
            "--context" => {
                let value = args.next().ok_or_else(|| "error: --context expects a value".to_string())?;
                config.context = Some(value);
            }
            "--config" => {
                let value = args.next().ok_or_else(|| "error: --config expects a path".to_string())?;
                config = load_config(&value, config)?;
            }
            "--snippets" => {
                let value = args.next().ok_or_else(|| "error: --snippets expects a path".to_string())?;
                load_snippets(&value, &mut config)?;
            }
            "--min-score" => {
                let value = args.next().ok_or_else(|| "error: --min-score expects a value".to_string())?;
                config.options.fuzzy_search_min_score = parse_min_score(&value)?;
            }
            "--input" | "-i" => {
                let value = args.next().ok_or_else(|| "error: --input expects a value".to_string())?;
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(value);
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.trim().is_empty() {
                    if input.is_some() {
                        return Err("error: input provided multiple times".to_string());
                    }
                    input = Some(rest);
                }
                break;
            }
            _ if arg.starts_with("--context=") => {
                config.context = Some(arg.trim_start_matches("--context=").to_string());
            }
            _ if arg.starts_with("--config=") => {
                config = load_config(arg.trim_start_matches("--config="), config)?;
            }
            _ if arg.starts_with("--min-score=") => {
                config.options.fuzzy_search_min_score =
                    parse_min_score(arg.trim_start_matches("--min-score="))?;
            }
            _ if arg.starts_with("--input=") => {
                let value = arg.trim_start_matches("--input=");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(value.to_string());
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(rest);
                break;
            }
        }
    }

    let input = match input {
        Some(value) => value,
        None => read_stdin_input()?,
    };
    let input = input.trim().to_string();

    if input.is_empty() {
        return Err(format!("error: no abbreviation provided\n\n{}", help_text()));
    }

    Ok(Cli { input, config, verbose, color })
}

/// `--config` replaces the whole configuration but keeps any flags that were
/// already applied on the command line where they do not conflict.
fn load_config(path: &str, current: Config) -> Result<Config, String> {
    let mut loaded =
        Config::from_json_file(path).map_err(|err| format!("error: cannot load '{path}': {err}"))?;
    if loaded.context.is_none() {
        loaded.context = current.context;
    }
    Ok(loaded)
}

fn load_snippets(path: &str, config: &mut Config) -> Result<(), String> {
    let text =
        std::fs::read_to_string(path).map_err(|err| format!("error: cannot load '{path}': {err}"))?;
    let snippets: std::collections::BTreeMap<String, String> =
        serde_json::from_str(&text).map_err(|err| format!("error: malformed snippets in '{path}': {err}"))?;
    config.snippets.extend(snippets);
    Ok(())
}

fn parse_min_score(value: &str) -> Result<f64, String> {
    value
        .parse::<f64>()
        .ok()
        .filter(|score| (0.0..=1.0).contains(score))
        .ok_or_else(|| format!("error: invalid --min-score '{value}' (expected a number in 0..=1)"))
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "stylet {version}

Stylesheet abbreviation expansion CLI.

Usage:
  stylet [OPTIONS] [--] <abbreviation...>
  stylet [OPTIONS] --input <abbreviation>

Options:
  -i, --input <abbr>       Abbreviation to expand. If omitted, reads remaining
                           args or stdin when no args are provided.
  --context <property>     Resolve the input as a bare value for <property>.
  --config <path>          Load a JSON configuration file.
  --snippets <path>        Merge a JSON object of extra snippets.
  --min-score <n>          Reject fuzzy matches scoring below <n> (0..=1).
  --plain                  Render placeholder text instead of ${{n}} tab stops.
  -v, --verbose            Print match traces and timings instead of plain output.
  --color                  Force ANSI color output.
  --no-color               Disable ANSI color output.
  -h, --help               Show this help message.
  -V, --version            Print version information.

Exit codes:
  0  Success.
  2  Invalid arguments or missing input.
",
        version = env!("CARGO_PKG_VERSION")
    )
}

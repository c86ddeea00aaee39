mod debug_report;

use plurality::{Context, Options, select_verbose_with};
use std::io::{self, IsTerminal, Read};

const DEBUG_ENV: &str = "PLURALITY_DEBUG";

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    if config.debug {
        tracing_subscriber::fmt().with_writer(io::stderr).with_max_level(tracing::Level::TRACE).init();
    }

    let mut failed = false;
    for number in &config.numbers {
        match select_verbose_with(number, &config.context, &config.options) {
            Ok(res) => debug_report::print_selection(number, &config.context, &res, config.color),
            Err(err) => {
                debug_report::print_error(number, &err, config.color);
                failed = true;
            }
        }
    }

    if failed {
        std::process::exit(1);
    }
}

struct CliConfig {
    numbers: Vec<String>,
    context: Context,
    options: Options,
    color: bool,
    debug: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut numbers: Vec<String> = Vec::new();
    let mut context = Context::default();
    let mut options = Options::default();
    let mut color = io::stdout().is_terminal();
    let mut debug = std::env::var_os(DEBUG_ENV).is_some();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag.to_string(), Some(value.to_string())),
            _ => (arg.clone(), None),
        };
        let mut value = |name: &str| -> Result<String, String> {
            match inline.clone() {
                Some(v) => Ok(v),
                None => args.next().ok_or_else(|| format!("error: {name} expects a value")),
            }
        };

        match flag.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("plurality {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--debug" => debug = true,
            "-c" | "--culture" => context.culture = value("--culture")?,
            "--category" => {
                let category = value("--category")?;
                if !matches!(category.as_str(), "cardinal" | "ordinal") {
                    return Err(format!("error: invalid --category '{category}' (expected cardinal or ordinal)"));
                }
                context.category = category;
            }
            "--ordinal" => context.category = "ordinal".to_string(),
            "--rule-set" => options.rule_set = value("--rule-set")?,
            "-r" | "--rules" => options.rule_set = value("--rules")?,
            "--" => {
                numbers.extend(args.by_ref());
                break;
            }
            _ if looks_like_option(&arg) => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => numbers.push(arg),
        }
    }

    if numbers.is_empty() {
        numbers = read_stdin_numbers()?;
    }

    if numbers.is_empty() {
        return Err(format!("error: no number provided\n\n{}", help_text()));
    }

    Ok(CliConfig { numbers, context, options, color, debug })
}

/// `-x` is an option, `-3` and `-.5` are numbers.
fn looks_like_option(arg: &str) -> bool {
    match arg.strip_prefix('-') {
        Some(rest) => !rest.is_empty() && !rest.starts_with(|c: char| c.is_ascii_digit() || c == '.'),
        None => false,
    }
}

fn read_stdin_numbers() -> Result<Vec<String>, String> {
    if io::stdin().is_terminal() {
        return Ok(Vec::new());
    }
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer.split_whitespace().map(str::to_string).collect())
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "plurality {version}

CLDR plural-case selection CLI.

Usage:
  plurality [OPTIONS] [--] <number...>
  echo \"1 2 5\" | plurality [OPTIONS]

Options:
  -c, --culture <name>       Culture to select for. Default: en
  --category <name>          cardinal or ordinal. Default: cardinal
  --ordinal                  Shorthand for --category ordinal.
  --rule-set <name>          Registered rule table. Default: Unicode.CLDR
                             (also: Unicode.CLDR.Optional)
  -r, --rules <text>         Use this rule text instead of a registered table,
                             e.g. \"[Case=one] n = 1; [Case=other]\".
  --debug                    Print engine traces to stderr
                             (same as setting {debug_env}).
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Exit codes:
  0  Success.
  1  A number or the rule set could not be evaluated.
  2  Invalid arguments or missing input.
",
        version = env!("CARGO_PKG_VERSION"),
        debug_env = DEBUG_ENV,
    )
}

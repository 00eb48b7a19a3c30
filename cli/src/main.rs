use clap::{Arg, ArgAction, ArgMatches, Command};
use console::style;
use slate_core::{CompilerOptions, SlateErrorExt, compile_template, engine, generate_error_report};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

mod report;

fn main() -> ExitCode {
    let cli = Command::new("Slate CLI")
        .version("0.1.0")
        .about("Lowers parsed template trees into backend IR");

    let cli = setup_cli(cli);
    let matches = cli.get_matches();
    init_logging(matches.get_count("verbose"));
    dispatch_commands(&matches)
}

/// Sets up the CLI with its subcommands and arguments.
fn setup_cli(cli: Command) -> Command {
    cli.arg(
        Arg::new("verbose")
            .help("Increase log verbosity (repeatable)")
            .short('v')
            .long("verbose")
            .global(true)
            .action(ArgAction::Count),
    )
    .subcommand(
        Command::new("compile")
            .about("Compile JSON template trees to IR")
            .arg(
                Arg::new("files")
                    .help("Template tree files or glob patterns")
                    .required(true)
                    .num_args(1..)
                    .index(1),
            )
            .arg(
                Arg::new("format")
                    .help("Output format")
                    .short('f')
                    .long("format")
                    .value_parser(["sexpr", "json"])
                    .default_value("sexpr"),
            )
            .arg(
                Arg::new("safe")
                    .help("Use the html-safe aware escaper")
                    .long("safe")
                    .action(ArgAction::SetTrue),
            )
            .arg(
                Arg::new("config")
                    .help("Compiler options file (JSON)")
                    .short('c')
                    .long("config")
                    .value_parser(clap::value_parser!(String))
                    .value_name("FILE"),
            )
            .arg(
                Arg::new("output")
                    .help("Write the IR to this file instead of stdout")
                    .short('o')
                    .long("output")
                    .value_parser(clap::value_parser!(String))
                    .value_name("FILE"),
            ),
    )
    .subcommand(Command::new("engines").about("List registered embedded engines"))
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Dispatches the command based on the parsed arguments.
fn dispatch_commands(matches: &ArgMatches) -> ExitCode {
    match matches.subcommand() {
        Some(("compile", sub_m)) => match run_compile(sub_m) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("{} {}", style("error:").red().bold(), generate_error_report(&*e));
                ExitCode::FAILURE
            }
        },
        Some(("engines", _)) => {
            println!("{}", report::engines_table(&engine::global()));
            ExitCode::SUCCESS
        }
        _ => {
            println!("No valid subcommand was used. Use --help for more information.");
            ExitCode::FAILURE
        }
    }
}

fn load_options(sub_m: &ArgMatches) -> Result<CompilerOptions, Box<dyn SlateErrorExt>> {
    let mut options = match sub_m.get_one::<String>("config") {
        Some(path) => CompilerOptions::load_from_file(path)?,
        None => CompilerOptions::default(),
    };
    if sub_m.get_flag("safe") {
        options.use_html_safe = true;
    }
    Ok(options)
}

fn run_compile(sub_m: &ArgMatches) -> Result<(), Box<dyn SlateErrorExt>> {
    let options = load_options(sub_m)?;
    let as_json = sub_m.get_one::<String>("format").map(String::as_str) == Some("json");

    let patterns: Vec<&String> = sub_m.get_many::<String>("files").into_iter().flatten().collect();
    let files = report::expand_patterns(&patterns);

    let registry = engine::global();
    let mut rendered = Vec::with_capacity(files.len());
    for file in &files {
        let tree = slate_core::TemplateTree::new(file.clone())?;
        log::info!("compiling {}", tree);
        let ir = compile_template(&tree.nodes, &registry, options.clone())?;
        let text = if as_json { ir.to_json_string(true) } else { ir.to_string() };
        if files.len() > 1 {
            rendered.push(format!("; {}\n{}", file.display(), text));
        } else {
            rendered.push(text);
        }
    }
    let output = rendered.join("\n");

    match sub_m.get_one::<String>("output") {
        Some(path) => fs::write(PathBuf::from(path), output + "\n").map_err(|e| {
            Box::new(report::OutputError::new(path, e.to_string())) as Box<dyn SlateErrorExt>
        }),
        None => {
            println!("{}", output);
            Ok(())
        }
    }
}

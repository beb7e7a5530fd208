#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::doc_markdown)]

mod commands;
mod logging;

use clap::Parser;
use demodulizer_core::Config;
use miette::Result;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "demodulizer")]
#[command(author, version, about = "Transpile ES modules into HTML imports", long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit JSON formatted output (stable, machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Override the working directory
    #[arg(long, global = true, value_name = "PATH")]
    cwd: Option<PathBuf>,

    /// Config file to use instead of ./demodulizer.json
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print version information
    Version,

    /// Transpile one ES module into an HTML import document
    Transpile {
        /// Module file to transpile
        file: PathBuf,

        /// Qualified name (`<package>/<path>.js`), overriding the one derived from --root
        #[arg(long, value_name = "QUALIFIED")]
        name: Option<String>,

        /// Directory the qualified name is relative to [default: ./node_modules, else .]
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,

        /// Write the document here instead of stdout
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,
    },

    /// Serve transpiled components over HTTP
    Serve {
        /// Directory holding installed packages [default: ./node_modules]
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,

        /// Host to bind to [default: 127.0.0.1]
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (0 picks a free port) [default: 8080]
        #[arg(short, long)]
        port: Option<u16>,

        /// URL prefix for component requests [default: /frontend/npm_components]
        #[arg(long)]
        prefix: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Determine working directory
    let current = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let cwd = match cli.cwd {
        Some(dir) if dir.is_relative() => current.join(dir),
        Some(dir) => dir,
        None => current,
    };

    let config = Config::new(cwd)
        .with_verbosity(cli.verbose)
        .with_json_logs(cli.json)
        .with_config_file(cli.config);

    // Version handles its own output, no logging
    let Some(command) = cli.command else {
        return commands::version::run(cli.json);
    };
    if matches!(command, Commands::Version) {
        return commands::version::run(cli.json);
    }

    logging::init(config.verbosity, config.json_logs);

    match command {
        Commands::Version => commands::version::run(cli.json),
        Commands::Transpile {
            file,
            name,
            root,
            output,
        } => {
            let action = commands::transpile::TranspileAction {
                file,
                name,
                root,
                output,
            };
            commands::transpile::run(&config, action)
        }
        Commands::Serve {
            root,
            host,
            port,
            prefix,
        } => {
            let action = commands::serve::ServeAction {
                root,
                host,
                port,
                prefix,
            };
            let rt = tokio::runtime::Runtime::new().map_err(|e| miette::miette!("{e}"))?;
            rt.block_on(commands::serve::run(config, action))
        }
    }
}

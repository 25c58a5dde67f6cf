use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use locport_cli::{
    config::ENDPOINT_ENV,
    convert::{ConvertOptions, run_convert_command},
    discovery::split_inputs,
    languages::CATALOGUE,
    layout::{
        DEFAULT_MISSING_LOCALE, DEFAULT_RENAME_FROM, DEFAULT_RENAME_TO, find_missing_locales,
        rename_locale_dirs,
    },
    translate::{TranslateOptions, run_translate_command},
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Show debug logs
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate English localization files into other languages.
    Translate {
        /// Source files or folders, comma separated
        #[arg(short, long)]
        source: String,

        /// Only translate files of this platform (ios, android, portal)
        #[arg(short, long)]
        platform: Option<String>,

        /// Language code to translate to; every catalogue language when omitted
        #[arg(short, long)]
        language: Option<String>,

        /// Number of files translated concurrently
        #[arg(long)]
        batch_size: Option<usize>,

        /// Translation service endpoint
        #[arg(long)]
        endpoint: Option<String>,

        /// Configuration file (defaults to ./locport.toml when present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Glob of paths to skip (repeatable)
        #[arg(long)]
        exclude: Vec<String>,
    },

    /// Convert a localization file between platform formats.
    Convert {
        /// The input file to process
        #[arg(short, long)]
        input: PathBuf,
        /// The output file to write the results to
        #[arg(short, long)]
        output: PathBuf,
        /// Input platform, when the extension is not enough
        #[arg(long)]
        input_platform: Option<String>,
        /// Output platform, when the extension is not enough
        #[arg(long)]
        output_platform: Option<String>,
        /// Language code of the written file
        #[arg(short, long)]
        language: Option<String>,
    },

    /// List Localization folders missing a locale folder.
    Missing {
        /// Folders to search, comma separated
        #[arg(short, long)]
        source: String,
        #[arg(long, default_value = DEFAULT_MISSING_LOCALE)]
        locale: String,
    },

    /// Rename locale folders throughout a tree.
    Rename {
        /// Root folder to search
        #[arg(short, long)]
        source: PathBuf,
        #[arg(long, default_value = DEFAULT_RENAME_FROM)]
        from: String,
        #[arg(long, default_value = DEFAULT_RENAME_TO)]
        to: String,
    },

    /// List the languages `translate` knows about.
    Languages,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    match args.commands {
        Commands::Translate {
            source,
            platform,
            language,
            batch_size,
            endpoint,
            config,
            exclude,
        } => {
            let options = TranslateOptions {
                source,
                platform,
                language,
                batch_size,
                endpoint,
                config,
                exclude,
            };
            run_translate_command(options, std::env::var(ENDPOINT_ENV).ok()).await?;
        }
        Commands::Convert {
            input,
            output,
            input_platform,
            output_platform,
            language,
        } => {
            let options = ConvertOptions {
                input_platform,
                output_platform,
                language,
            };
            run_convert_command(&input, &output, &options)?;
        }
        Commands::Missing { source, locale } => {
            let missing = find_missing_locales(&split_inputs(&source), &locale)?;
            for dir in &missing {
                println!("{}", dir.display());
            }
            println!("{} folders missing {}", missing.len(), locale);
        }
        Commands::Rename { source, from, to } => {
            let renamed = rename_locale_dirs(&source, &from, &to)?;
            for (old, new) in &renamed {
                println!("Renamed: {} -> {}", old.display(), new.display());
            }
        }
        Commands::Languages => {
            for language in CATALOGUE {
                println!("{:<8} {}", language.code, language.name);
            }
        }
    }

    Ok(())
}

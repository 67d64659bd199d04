use anyhow::{Context, Result};
use api_changelog::{ChangelogConfig, GenerateOptions, OutputFormat};
use clap::{CommandFactory, Parser};
use const_format::concatcp;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const GIT_COMMIT: &str = match option_env!("API_CHANGELOG_GIT_COMMIT") {
    Some(commit) => commit,
    None => "unknown",
};

const BUILD_DATE: &str = match option_env!("API_CHANGELOG_BUILD_DATE") {
    Some(date) => date,
    None => "unknown",
};

const VERSION_INFO: &str = concatcp!(
    "Version:    ",
    env!("CARGO_PKG_VERSION"),
    "\nGit Commit: ",
    GIT_COMMIT,
    "\nBuild Date: ",
    BUILD_DATE
);

#[derive(Parser)]
#[command(name = "api-changelog")]
#[command(about = "Generate changelogs from OpenAPI specification changes")]
#[command(version)]
struct Args {
    #[arg(long, global = true, help = "Show detailed version information")]
    version_info: bool,
    #[arg(short, long, global = true, help = "Log progress to stderr")]
    verbose: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Parser)]
enum Commands {
    #[command(about = "Compare two versions of an OpenAPI file and generate a changelog")]
    Compare {
        #[arg(long, help = "Path to the latest version of the OpenAPI file")]
        latest: PathBuf,
        #[arg(long, help = "Path to the previous version of the OpenAPI file")]
        previous: PathBuf,
        #[arg(long, help = "Path where the changelog is written")]
        output: PathBuf,
        #[arg(long, help = "Path to a YAML configuration file")]
        config: Option<PathBuf>,
        #[arg(long, help = "Output format", value_enum, default_value = "markdown")]
        format: FormatArg,
        #[arg(long, help = "Date shown in the changelog header (defaults to today)")]
        date: Option<String>,
    },
    #[command(about = "Generate semantic fingerprint for an OpenAPI file")]
    Fingerprint {
        #[arg(help = "Path to the OpenAPI file")]
        file: PathBuf,
    },
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum FormatArg {
    Markdown,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Markdown => OutputFormat::Markdown,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "api_changelog=info"
    } else {
        "api_changelog=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.version_info {
        println!("{VERSION_INFO}");
        return Ok(());
    }

    init_tracing(args.verbose);

    let Some(command) = args.command else {
        Args::command().print_help()?;
        std::process::exit(2);
    };

    match command {
        Commands::Compare {
            latest,
            previous,
            output,
            config,
            format,
            date,
        } => {
            let config = match config {
                Some(path) => ChangelogConfig::from_yaml_file(&path)
                    .with_context(|| format!("Failed to load config '{}'", path.display()))?,
                None => ChangelogConfig::default(),
            };

            let options = GenerateOptions {
                config,
                format: format.into(),
                date,
            };

            match api_changelog::generate_changelog(&latest, &previous, &output, options)? {
                Some(path) => println!("Changelog generated at: {}", path.display()),
                None => println!("No changes detected between the two OpenAPI documents."),
            }
        }
        Commands::Fingerprint { file } => {
            let content = fs::read_to_string(&file)
                .map_err(|e| anyhow::anyhow!("Failed to read file '{}': {}", file.display(), e))?;

            let fingerprint = api_changelog::generate_fingerprint(&content)?;
            println!("{}", fingerprint);
        }
    }

    Ok(())
}

use clap::{Parser, Subcommand};
use project_sitemap::config::{self, SiteConfig};
use project_sitemap::{generate, output, persist, render, validate};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "project-sitemap")]
#[command(about = "Generate a JSON sitemap for a static project repository")]
#[command(long_about = "\
Generate a JSON sitemap for a static project repository

Every immediate subdirectory of the projects root that contains a
content.json descriptor is indexed. Run without arguments to scan
./projects and write ./sitemap.json.

Repository structure:

  ./
  ├── sitemap.toml                 # Optional config (see gen-config)
  ├── sitemap.json                 # Generated, overwritten on every run
  └── projects/
      ├── alpha/
      │   └── content.json         # {\"title\": \"Alpha\", \"tags\": [...]}
      ├── beta/
      │   ├── content.json
      │   └── feeds/               # Every *.json file here is a feed
      │       └── latest.json
      └── drafts/                  # No content.json = not a project

Descriptor fields:
  title        Display title (falls back to the directory name)
  description  Copied when present
  version      Copied when present
  status       Copied when present
  tags         Copied when it is an array

Exit status is 1 when the sitemap fails validation or cannot be written.")]
#[command(version)]
struct Cli {
    /// Projects directory [default: projects_dir from config]
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Sitemap path [default: output from config]
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Config file (ignored when missing)
    #[arg(long, default_value = config::CONFIG_FILENAME, global = true)]
    config: PathBuf,

    /// Log pipeline details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Scan projects, validate, and write the sitemap (the default)
    Build,
    /// Validate an existing sitemap without regenerating it
    Check,
    /// Render an index.html from an existing sitemap
    Render {
        /// Index page path [default: index.output from config]
        #[arg(long)]
        index: Option<PathBuf>,
    },
    /// Print a stock sitemap.toml with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{}", output::format_error(&err.to_string()));
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so they never mix with the summary on stdout.
/// `RUST_LOG` takes precedence over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "project_sitemap=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    if let Some(Command::GenConfig) = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(ExitCode::SUCCESS);
    }

    let site_config = config::load_config(&cli.config)?;
    let sitemap_path = cli
        .output
        .unwrap_or_else(|| PathBuf::from(&site_config.output));

    match cli.command {
        None | Some(Command::Build) => {
            let root = cli
                .root
                .unwrap_or_else(|| PathBuf::from(&site_config.projects_dir));
            build(&root, &sitemap_path, &site_config)
        }
        Some(Command::Check) => {
            let value = persist::read_sitemap_value(&sitemap_path)?;
            let result = validate::validate_value(&value);
            output::print_validation(&result);
            Ok(exit_code(result.is_ok()))
        }
        Some(Command::Render { index }) => {
            let index_path = index.unwrap_or_else(|| PathBuf::from(&site_config.index.output));
            let sitemap = render::render_file(&sitemap_path, &index_path, &site_config)?;
            println!("{}", output::format_rendered(&index_path, &sitemap));
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::GenConfig) => Ok(ExitCode::SUCCESS),
    }
}

/// generate → validate → persist → summary.
fn build(
    root: &Path,
    sitemap_path: &Path,
    site_config: &SiteConfig,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    println!("==> Scanning {}", root.display());
    let generated = generate::generate(root, site_config)?;
    output::print_diagnostics(&generated.diagnostics);

    let validation = validate::validate(&generated.sitemap);
    output::print_validation(&validation);
    if validation.is_err() {
        return Ok(ExitCode::FAILURE);
    }

    persist::write_sitemap(&generated.sitemap, sitemap_path)?;
    output::print_build_output(sitemap_path, &generated.sitemap);
    Ok(ExitCode::SUCCESS)
}

fn exit_code(ok: bool) -> ExitCode {
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

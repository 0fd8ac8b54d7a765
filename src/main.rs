use clap::{Parser, Subcommand};
use std::path::PathBuf;
use studio_site::{check, config, generate, output};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "studio-site")]
#[command(about = "Static site generator for an interior design studio")]
#[command(long_about = "\
Static site generator for an interior design studio

Page copy and projects live as JSON in the content directory. Every field is
optional: missing documents and fields fall back to house copy, and project
records that cannot be used are skipped with a warning.

Content structure:

  content/
  ├── config.toml                  # Site config (optional)
  ├── home.json                    # Hero, parallax band, about, services
  ├── portfolio.json               # Portfolio heading and intro
  ├── process.json                 # Steps and process sections
  ├── art.json                     # Art pieces and gallery
  ├── contact.json                 # Contact heading and intro
  ├── portfolio/                   # One project per file
  │   ├── 010-observatory.json
  │   └── 020-loft.json
  └── assets/                      # Images, favicon → copied to output root

Output:

  dist/index.html, dist/portfolio/index.html, dist/process/index.html,
  dist/art/index.html, dist/contact/index.html

Run 'studio-site gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render every page and copy assets into the output directory
    Build,
    /// Validate content and exercise the gallery and parallax behavior
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            println!("==> Building {} → {}", cli.source.display(), cli.output.display());
            let report = generate::generate(&cli.source, &cli.output)?;
            output::print_build_output(&report);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let report = check::check(&cli.source)?;
            output::print_check_output(&report);
            if report.is_clean() {
                println!("==> Content is valid");
            } else {
                println!("==> {} problem(s) found", report.problems.len());
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

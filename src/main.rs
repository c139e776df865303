use clap::{Parser, Subcommand};
use simple_kb::{browser, catalog, compile, config, generate, output};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "simple-kb")]
#[command(about = "Static site generator for personal knowledge bases")]
#[command(long_about = "\
Static site generator for personal knowledge bases

Your filesystem is the data source. Six fixed category directories hold
markdown files; each file becomes one entry in a browsable, searchable,
deep-linkable single-page site.

Content structure:

  contents/
  ├── config.toml                  # Site config (optional)
  ├── prompts/
  │   ├── cold-email.md            # One entry per markdown file
  │   └── writing/
  │       └── blog-outline.md      # Nesting is fine; category stays prompts
  ├── skills/
  ├── tips/
  ├── docs/
  ├── links/
  │   └── rust-book.md             # url: in front-matter → external link
  ├── agents/
  │   └── reviewer.agent.md        # Agents keep their raw text for copying
  └── drafts/                      # Not a category — never scanned

Front-matter (all fields optional):

  ---
  name: Cold Email
  description: Outreach starter
  tags: [sales, outreach]
  url: https://example.com
  ---

Entry names fall back to the title-cased filename; slugs (used as #fragments
for deep links) are derived from the filename.

Run 'simple-kb gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "contents", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (compiled catalog)
    #[arg(long, default_value = ".simple-kb-temp", global = true)]
    temp_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile the content directory into a catalog
    Compile,
    /// Produce the final HTML site from the compiled catalog
    Generate,
    /// Run the full pipeline: compile → generate
    Build,
    /// Validate the content directory without building
    Check,
    /// Query the catalog from the command line
    Search {
        /// Category filter: one of the six categories, or 'all'
        #[arg(long, default_value = "all")]
        category: browser::Filter,

        /// Case-insensitive substring matched against name, description,
        /// content, and tags
        query: Option<String>,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Compile => {
            let compilation = compile::compile(&cli.source)?;
            write_catalog(&cli.temp_dir, &compilation.catalog)?;
            output::print_compile_output(&compilation);
        }
        Command::Generate => {
            let catalog_path = cli.temp_dir.join("catalog.json");
            generate::generate(&catalog_path, &cli.source, &cli.output)?;
            let catalog = read_catalog(&catalog_path)?;
            output::print_generate_output(&catalog);
        }
        Command::Build => {
            println!("==> Stage 1: Compiling {}", cli.source.display());
            let compilation = compile::compile(&cli.source)?;
            let catalog_path = write_catalog(&cli.temp_dir, &compilation.catalog)?;
            output::print_compile_output(&compilation);

            println!("==> Stage 2: Generating HTML \u{2192} {}", cli.output.display());
            generate::generate(&catalog_path, &cli.source, &cli.output)?;
            output::print_generate_output(&compilation.catalog);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let compilation = compile::compile(&cli.source)?;
            output::print_compile_output(&compilation);
            println!("==> Content is valid");
        }
        Command::Search { category, query } => {
            // Use the compiled artifact when present; fall back to a fresh
            // in-memory compile so search works without a prior build.
            let catalog_path = cli.temp_dir.join("catalog.json");
            let catalog = if catalog_path.exists() {
                read_catalog(&catalog_path)?
            } else {
                compile::compile(&cli.source)?.catalog
            };

            let mut browser = browser::Browser::new(&catalog);
            browser.set_category(category);
            if let Some(q) = &query {
                browser.set_query(q.clone());
            }
            let results = browser.filtered();
            output::print_search_output(&results, category, query.as_deref().unwrap_or(""));
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Serialize the catalog into `<temp_dir>/catalog.json` and return the path.
fn write_catalog(
    temp_dir: &std::path::Path,
    catalog: &catalog::Catalog,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    std::fs::create_dir_all(temp_dir)?;
    let catalog_path = temp_dir.join("catalog.json");
    let json = serde_json::to_string_pretty(catalog)?;
    std::fs::write(&catalog_path, json)?;
    Ok(catalog_path)
}

fn read_catalog(path: &std::path::Path) -> Result<catalog::Catalog, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

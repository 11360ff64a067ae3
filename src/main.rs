use budgie_site::{build_id, config, generate, home, i18n, output, redirects, scan};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "budgie-site")]
#[command(about = "Static site builder for the Buddies of Budgie website")]
#[command(long_about = "\
Static site builder for the Buddies of Budgie website

Site structure:

  site/
  ├── site.toml                 # Site config (optional)
  ├── content/blog/             # One permanent redirect per entry:
  │   └── budgie-10-8.mdx       #   /budgie-10-8 → /blog/budgie-10-8
  ├── messages/                 # One message bundle per locale
  │   └── en.json
  └── public/                   # Copied verbatim to the output root
      └── images/logo.svg

The build id comes from the BUILD_ID environment variable when set,
otherwise from the current time in milliseconds.

Run 'budgie-site gen-config' to generate a documented site.toml.")]
#[command(version)]
struct Cli {
    /// Site directory
    #[arg(long, default_value = "site", global = true)]
    root: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the static site
    Build,
    /// Print the redirect table derived from the blog directory
    Redirects,
    /// Validate config, content and message bundles without building
    Check,
    /// Print the build id this environment would use
    BuildId,
    /// Print a stock site.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            let id = build_id::build_id_from_env();
            println!("==> Building {} → {}", cli.root.display(), cli.output.display());
            let report = generate::generate(&cli.root, &cli.output, &id)?;
            output::print_build_output(&report);
            println!("==> Build complete: {}", report.output_dir.display());
        }
        Command::Redirects => {
            let site_config = config::load_config(&cli.root)?;
            let rules = redirects::scan_redirects(&cli.root.join(&site_config.blog_dir))?;
            output::print_redirects(&rules);
        }
        Command::Check => {
            println!("==> Checking {}", cli.root.display());
            let site_config = config::load_config(&cli.root)?;
            let manifest = scan::scan(&cli.root, &site_config)?;
            output::print_redirects(&manifest.redirects);

            let bundles = i18n::load_all(
                &cli.root.join(&site_config.messages_dir),
                &site_config.i18n.locales,
            )?;
            let checks: Vec<output::LocaleCheck> = bundles
                .iter()
                .map(|m| output::LocaleCheck {
                    locale: &m.locale,
                    message_count: m.entries().len(),
                    missing: m.missing_keys(home::REQUIRED_KEYS),
                })
                .collect();
            output::print_check_output(&checks);

            let incomplete = checks.iter().filter(|c| !c.missing.is_empty()).count();
            if incomplete > 0 {
                return Err(format!("{incomplete} locale(s) are missing homepage messages").into());
            }
            println!("==> Site is valid");
        }
        Command::BuildId => {
            println!("{}", build_id::build_id_from_env());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

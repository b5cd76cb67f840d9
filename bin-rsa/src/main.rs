use std::{fs, path::{Path, PathBuf}, time::Instant};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use num_format::{Locale, ToFormattedString};
use tracing::info;
use tracing_subscriber::EnvFilter;
use lib_rsa::{form::{AdForm, MAX_DESCRIPTIONS, MAX_HEADLINES}, item::Item, permute::{permutation_count, permute}, save_file::{self, FileStore, SaveFile}, select};

/*
   Preview the headline combinations a responsive search ad can show.

   Enter up to 15 headlines, optionally pinned to slot 1, 2, or 3 ("Free Shipping@1").
   'preview' shows every ordering of three headlines which keeps each pinned headline in its slot.
   'save', 'load', and 'reset' keep a set of headlines and descriptions between runs.
*/

/// Preview responsive search ad headline combinations.
#[derive(Debug, Parser)]
#[command(name = "rsa-preview", version, about = "Preview responsive search ad headline combinations")]
struct Cli {
    /// Directory where the saved form is kept.
    #[arg(long, value_name = "DIR", env = "RSA_DATA_DIR", default_value = ".rsa", global = true)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Mode,
}

#[derive(Debug, Subcommand)]
enum Mode {
    /// Show every valid combination of three headlines.
    ///   ex: preview "Free Shipping@1" "Same Day Delivery" "Order Online" "Open Late"
    Preview {
        /// Headlines, each optionally pinned with '@slot'.
        headlines: Vec<String>,

        /// Read headlines from a saved form JSON file.
        #[arg(long, value_name = "FILE", conflicts_with_all = ["headlines", "saved"])]
        file: Option<PathBuf>,

        /// Use the headlines from the saved form.
        #[arg(long, conflicts_with = "headlines")]
        saved: bool,
    },

    /// Show every ordering of <length> elements.
    ///   ex: permute 2 a b c
    Permute {
        length: usize,
        elements: Vec<String>,
    },

    /// Save headlines (and descriptions) for later.
    Save {
        headlines: Vec<String>,

        /// Description, optionally pinned with '@slot'. May be repeated.
        #[arg(long = "description", value_name = "TEXT")]
        descriptions: Vec<String>,
    },

    /// Show the saved form.
    Load,

    /// Clear the saved form.
    Reset,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let start = Instant::now();

    match cli.command {
        Mode::Preview { headlines, file, saved } => {
            let headlines = if let Some(file) = file {
                read_save_file(&file)?.headline_objs
            } else if saved {
                let store = FileStore::new(&cli.data_dir);
                match save_file::load(&store)? {
                    Some(form) => form.headlines,
                    None => bail!("No saved form in {}", cli.data_dir.display()),
                }
            } else {
                parse_items(&headlines, MAX_HEADLINES, "headlines")?
            };

            let combos = select::select_combinations(&headlines)?;
            for combo in combos.iter() {
                println!("{}", combo);
            }

            eprintln!(
                "{} combinations of {} headlines ({} orderings before pins)",
                combos.len().to_formatted_string(&Locale::en),
                headlines.len(),
                permutation_count(headlines.len(), 3).to_formatted_string(&Locale::en)
            );
        }

        Mode::Permute { length, elements } => {
            let results = permute(&elements, length)?;
            for result in results.iter() {
                println!("{}", result.join(select::SEPARATOR));
            }

            eprintln!("{} orderings", results.len().to_formatted_string(&Locale::en));
        }

        Mode::Save { headlines, descriptions } => {
            let form = AdForm::new(
                parse_items(&headlines, MAX_HEADLINES, "headlines")?,
                parse_items(&descriptions, MAX_DESCRIPTIONS, "descriptions")?,
            );

            let mut store = FileStore::new(&cli.data_dir);
            save_file::save(&mut store, &form)?;
            info!(path = %store.path(save_file::SAVE_KEY).display(), "saved form");

            eprintln!("Saved {} headlines and {} descriptions.", form.headlines.len(), form.descriptions.len());
        }

        Mode::Load => {
            let store = FileStore::new(&cli.data_dir);
            match save_file::load(&store)? {
                Some(form) => println!("{}", serde_json::to_string_pretty(&SaveFile::capture(&form))?),
                None => eprintln!("No saved form."),
            }
        }

        Mode::Reset => {
            let mut store = FileStore::new(&cli.data_dir);
            save_file::reset(&mut store)?;
            eprintln!("Cleared saved form.");
        }
    }

    let duration: f64 = start.elapsed().as_secs_f64();
    eprintln!(" -> {duration:.3} sec");
    Ok(())
}

fn parse_items(args: &[String], limit: usize, kind: &str) -> Result<Vec<Item>> {
    let items = args.iter().filter_map(|arg| Item::parse(arg)).collect::<Vec<Item>>();
    if items.len() > limit {
        bail!("At most {limit} {kind} are allowed; {} were provided.", items.len());
    }

    Ok(items)
}

fn read_save_file(path: &Path) -> Result<SaveFile> {
    let json = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    match SaveFile::from_json(&json) {
        Some(save_file) => Ok(save_file),
        None => bail!("'{}' is not a valid saved form.", path.display()),
    }
}

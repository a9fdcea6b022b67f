// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

// Use library instead of local modules
use qatar_hub::calculators::{
    BreakEven, BreakEvenInput, Calculator, ProfitLoss, ProfitLossInput, Roi, RoiInput, Vat,
    VatInput, VatMode,
};
use qatar_hub::catalog::{Catalog, CategoryFilter, PlaceDirectory};
use qatar_hub::uploads::{self, FileUpload, UploadKind};
use qatar_hub::{document, logging, Config, ContactForm, ExportFormat};

#[derive(Parser)]
#[command(name = "qatar-hub")]
#[command(version, about = "Qatar Business & Life Hub - calculators, guide and documents")]
struct CommandLine {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the terminal UI (default)
    Tui,
    /// Add or extract VAT
    Vat {
        amount: String,
        /// VAT rate in percent (defaults to HUB_DEFAULT_VAT_RATE)
        #[arg(long)]
        rate: Option<String>,
        /// Treat the amount as VAT-inclusive and extract the tax
        #[arg(long)]
        inclusive: bool,
    },
    /// Profit & loss statement
    #[command(alias = "pl")]
    Profit {
        #[arg(long, default_value = "")]
        revenue: String,
        #[arg(long, default_value = "")]
        cogs: String,
        #[arg(long, default_value = "")]
        expenses: String,
        #[arg(long, default_value = "")]
        other_income: String,
        #[arg(long, default_value = "")]
        other_expenses: String,
    },
    /// Return on investment
    Roi {
        investment: String,
        final_value: String,
        /// Holding period in years (enables annualized ROI)
        #[arg(long, default_value = "")]
        years: String,
    },
    /// Break-even point
    BreakEven {
        fixed_costs: String,
        variable_cost: String,
        selling_price: String,
    },
    /// Search the Qatar directory
    Places {
        #[arg(long, short, default_value = "")]
        search: String,
        /// all, business, dining, transport, housing, services
        #[arg(long, short, default_value = "all")]
        category: CategoryFilter,
        /// Write the results as CSV to stdout
        #[arg(long)]
        csv: bool,
    },
    /// Emergency contact numbers
    Contacts,
    /// Living-in-Qatar tips
    Tips,
    /// Accounting software listings
    Software {
        #[arg(long)]
        free: bool,
    },
    /// Accounting and document templates
    Templates,
    /// Digital services offered
    Services,
    /// Export the sample resume
    Resume {
        #[arg(long, short, default_value = "markdown")]
        format: ExportFormat,
        /// Write to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Check whether a local file would be accepted as an upload
    CheckFile {
        path: PathBuf,
        /// image or pdf
        #[arg(long, default_value = "pdf")]
        kind: String,
    },
    /// Send a business services enquiry
    Contact {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long, default_value = "")]
        company: String,
        #[arg(long, default_value = "")]
        service: String,
        #[arg(long, default_value = "")]
        message: String,
    },
}

fn main() -> Result<()> {
    let cli = CommandLine::parse();
    let config = Config::from_env()?;

    logging::init(default_log_filter(cli.command.as_ref(), &config));

    match cli.command {
        None => run_ui_mode(config)?,
        Some(command) => run_command(command, &config)?,
    }

    Ok(())
}

/// Filter used when RUST_LOG is unset. The TUI shares the terminal with
/// stderr, so it only lets errors through.
fn default_log_filter<'a>(command: Option<&Commands>, config: &'a Config) -> &'a str {
    match command {
        None | Some(Commands::Tui) => "error",
        Some(_) => &config.rust_log,
    }
}

fn run_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Tui => run_ui_mode(config.clone()),
        Commands::Vat {
            amount,
            rate,
            inclusive,
        } => {
            let mode = if inclusive { VatMode::Inclusive } else { VatMode::Exclusive };
            let rate = rate.unwrap_or_else(|| config.vat_rate_field());
            print_calculation::<Vat>(&VatInput::new(&amount, &rate, mode))
        }
        Commands::Profit {
            revenue,
            cogs,
            expenses,
            other_income,
            other_expenses,
        } => print_calculation::<ProfitLoss>(&ProfitLossInput {
            revenue,
            cogs,
            expenses,
            other_income,
            other_expenses,
        }),
        Commands::Roi {
            investment,
            final_value,
            years,
        } => print_calculation::<Roi>(&RoiInput {
            investment,
            final_value,
            time_period: years,
        }),
        Commands::BreakEven {
            fixed_costs,
            variable_cost,
            selling_price,
        } => print_calculation::<BreakEven>(&BreakEvenInput {
            fixed_costs,
            variable_cost,
            selling_price,
        }),
        Commands::Places {
            search,
            category,
            csv,
        } => run_places(&search, category, csv),
        Commands::Contacts => {
            println!("🚨 Emergency Contacts");
            println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
            for contact in Catalog::load().emergency_contacts {
                println!(
                    "{:<24} {:<10} {} ({})",
                    contact.service, contact.number, contact.description, contact.available
                );
            }
            Ok(())
        }
        Commands::Tips => {
            for group in Catalog::load().living_tips {
                println!("\n💡 {}", group.category);
                for tip in group.tips {
                    println!("   • {}", tip);
                }
            }
            Ok(())
        }
        Commands::Software { free } => {
            let catalog = Catalog::load();
            let listing = if free {
                catalog.software.free_only()
            } else {
                catalog.software.all()
            };
            for software in listing {
                println!("{:<28} {:<24} {}", software.name, software.pricing, software.trial);
            }
            Ok(())
        }
        Commands::Templates => {
            let catalog = Catalog::load();
            for (category, templates) in catalog.software.templates_by_category() {
                println!("\n📄 {}", category);
                for template in templates {
                    println!("   {:<32} {}", template.name, template.description);
                }
            }
            Ok(())
        }
        Commands::Services => {
            let catalog = Catalog::load();
            for service in &catalog.services {
                let badge = if service.popular { " ⭐ Popular" } else { "" };
                println!("\n{}{}", service.title, badge);
                println!("   {}", service.description);
                println!("   💰 {}", service.price);
                if let Some(duration) = &service.duration {
                    println!("   ⏱  {}", duration);
                }
            }
            Ok(())
        }
        Commands::Resume { format, output } => {
            let rendered = document::resume().export(format);
            match output {
                Some(path) => {
                    std::fs::write(&path, rendered)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("✓ Document exported to {}", path.display());
                }
                None => print!("{}", rendered),
            }
            Ok(())
        }
        Commands::CheckFile { path, kind } => {
            let kind = match kind.as_str() {
                "image" => UploadKind::Image,
                "pdf" => UploadKind::Pdf,
                other => anyhow::bail!("unknown upload kind '{}' (expected image or pdf)", other),
            };
            let size = std::fs::metadata(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?
                .len();
            let upload = uploads::accept(kind, FileUpload::from_path(&path, size))?;
            println!("✓ {} accepted ({})", upload.name, upload.size_label());
            Ok(())
        }
        Commands::Contact {
            name,
            email,
            phone,
            company,
            service,
            message,
        } => {
            let mut form = ContactForm {
                name,
                email,
                phone,
                company,
                service,
                message,
            };
            let (submission, notification) = form.submit()?;
            println!("✅ {}", notification.title);
            println!("   {}", notification.description);
            println!("   Reference: {}", submission.id);
            Ok(())
        }
    }
}

fn print_calculation<C: Calculator>(input: &C::Input) -> Result<()> {
    let output = C::compute(input)?;

    println!("🧮 {}", C::NAME);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for (label, value) in C::summary(&output) {
        println!("{:<28} {}", label, value);
    }

    Ok(())
}

fn run_places(search: &str, category: CategoryFilter, csv: bool) -> Result<()> {
    let directory = PlaceDirectory::new();
    let results = directory.search(search, category);

    if csv {
        return PlaceDirectory::export_csv(std::io::stdout().lock(), &results);
    }

    println!("📍 {} place(s) in {}", results.len(), category.label());
    for place in results {
        let rating = place.rating.map(|r| format!("★ {:.1}", r)).unwrap_or_default();
        println!("\n{} [{}] {}", place.name, place.category.label(), rating);
        println!("   {}", place.description);
        println!("   📍 {}", place.location);
        if let Some(phone) = &place.phone {
            println!("   📞 {}", phone);
        }
        if let Some(hours) = &place.hours {
            println!("   🕒 {}", hours);
        }
    }

    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(config: Config) -> Result<()> {
    let mut app = ui::App::new(&config);
    ui::run_ui(&mut app)?;

    println!("\n✅ Qatar Hub closed");

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_config: Config) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use the API: cargo run --bin hub-server --features server");
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CommandLine {
        CommandLine::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_tui_logs_errors_only() {
        let config = Config {
            rust_log: "debug".to_string(),
            ..Config::default()
        };

        let bare = parse(&["qatar-hub"]);
        assert_eq!(default_log_filter(bare.command.as_ref(), &config), "error");

        let tui = parse(&["qatar-hub", "tui"]);
        assert_eq!(default_log_filter(tui.command.as_ref(), &config), "error");
    }

    #[test]
    fn test_commands_use_configured_filter() {
        let config = Config {
            rust_log: "debug".to_string(),
            ..Config::default()
        };

        let vat = parse(&["qatar-hub", "vat", "100"]);
        assert_eq!(default_log_filter(vat.command.as_ref(), &config), "debug");
    }
}

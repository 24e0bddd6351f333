//! Pack Size Optimizer
//!
//! Splits an order quantity into packs of the configured sizes. Pack sizes are
//! kept in a small text store so they persist between runs; a calculation can
//! also name its sizes directly.

use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use log::error;

use packopt::format::format_packing;
use packopt::greedy::Greedy;
use packopt::optimizer::Optimizer;
use packopt::packs::{PackSize, Target};
use packopt::persistence::{FileRegistry, DEFAULT_STORE};
use packopt::prefill::{PrefillPolicy, DEFAULT_HEADROOM, DEFAULT_TRIGGER_MULTIPLE};
use packopt::registry::{PackSizeRegistry, RegistryError};
use packopt::service::PackService;
use packopt::PackingStrategy;

/// Computes pack combinations for order quantities.
#[derive(Parser)]
#[command(name = "packopt")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Pack size store.
    #[arg(long, global = true, default_value = DEFAULT_STORE)]
    store: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute the packs for an order quantity.
    Calculate(CalculateArgs),
    /// List the stored pack sizes.
    Sizes,
    /// Replace the stored pack sizes.
    SetSizes {
        /// New pack sizes.
        #[arg(required = true)]
        sizes: Vec<PackSize>,
    },
}

#[derive(clap::Args)]
struct CalculateArgs {
    /// Requested quantity.
    #[arg(allow_negative_numbers = true)]
    amount: Target,

    /// Pack sizes to use instead of the stored ones.
    #[arg(long, value_delimiter = ',', value_parser = clap::value_parser!(PackSize).range(1..))]
    sizes: Option<Vec<PackSize>>,

    #[arg(long, value_enum, default_value_t = StrategyKind::Optimal)]
    strategy: StrategyKind,

    /// Prefill when the amount reaches this multiple of the largest size.
    #[arg(long, default_value_t = DEFAULT_TRIGGER_MULTIPLE)]
    trigger_multiple: u32,

    /// Largest packs kept in the searched space when prefilling.
    #[arg(long, default_value_t = DEFAULT_HEADROOM)]
    headroom: u32,

    /// Search the whole amount without prefilling.
    #[arg(long)]
    no_prefill: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyKind {
    /// Least surplus, then fewest packs.
    Optimal,
    /// Largest first, round up with the smallest size.
    Greedy,
}

impl CalculateArgs {
    fn strategy(&self) -> Box<dyn PackingStrategy> {
        match self.strategy {
            StrategyKind::Greedy => Box::new(Greedy),
            StrategyKind::Optimal if self.no_prefill => {
                Box::new(Optimizer::default().without_prefill())
            }
            StrategyKind::Optimal => Box::new(
                Optimizer::default().with_prefill(
                    PrefillPolicy::default()
                        .with_trigger_multiple(self.trigger_multiple)
                        .with_headroom(self.headroom),
                ),
            ),
        }
    }
}

fn main() -> ExitCode {
    // install global collector configured based on RUST_LOG env var.
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{}", err);
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

/// Executes a command and returns the text to print.
fn run(cli: Cli) -> Result<String, RegistryError> {
    let registry = FileRegistry::new(cli.store);

    match cli.command {
        Command::Calculate(args) => {
            let service = PackService::new(registry, args.strategy());
            let packs = match &args.sizes {
                Some(sizes) => service.strategy().compute(args.amount, sizes),
                None => service.calculate(args.amount)?,
            };
            Ok(format_packing(&packs, args.amount))
        }
        Command::Sizes => {
            let sizes = registry.find_all()?;
            Ok(format_sizes(&sizes))
        }
        Command::SetSizes { sizes } => {
            let service = PackService::new(registry, Box::new(Optimizer::default()));
            service.set_pack_sizes(&sizes)?;
            Ok(format_sizes(&service.pack_sizes()?))
        }
    }
}

fn format_sizes(sizes: &[PackSize]) -> String {
    if sizes.is_empty() {
        return String::from("no pack sizes configured\n");
    }
    let listed: Vec<String> = sizes.iter().map(|size| size.to_string()).collect();
    format!("{}\n", listed.join(" "))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    /// Fresh store path in the system temp dir, removed on drop.
    struct ScratchStore(PathBuf);

    impl ScratchStore {
        fn new(name: &str) -> Self {
            let path = std::env::temp_dir().join(format!(
                "packopt-cli-{}-{}",
                std::process::id(),
                name
            ));
            let _ = std::fs::remove_file(&path);
            Self(path)
        }

        fn arg(&self) -> String {
            self.0.to_string_lossy().into_owned()
        }
    }

    impl Drop for ScratchStore {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.0);
        }
    }

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("packopt").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_calculate_report_snapshot() {
        let output = run(parse(&["calculate", "500000", "--sizes", "23,31,53"])).unwrap();

        insta::assert_snapshot!(output, @r"
        53 x 9429
        31 x 7
        23 x 2
        shipped 500000 in 9438 packs (excess 0)
        ");
    }

    #[test]
    fn test_greedy_strategy_flag() {
        let output = run(parse(&[
            "calculate",
            "251",
            "--sizes",
            "250,500,1000",
            "--strategy",
            "greedy",
        ]))
        .unwrap();
        assert_eq!(output, "250 x 2\nshipped 500 in 2 packs (excess 249)\n");
    }

    #[test]
    fn test_non_positive_amount() {
        let output = run(parse(&["calculate", "-5", "--sizes", "250"])).unwrap();
        assert_eq!(output, "no packs required\n");
    }

    #[test]
    fn test_prefill_flags() {
        let cli = parse(&["calculate", "10", "--trigger-multiple", "50", "--headroom", "5"]);
        let Command::Calculate(args) = cli.command else {
            panic!("expected calculate");
        };
        assert_eq!(args.trigger_multiple, 50);
        assert_eq!(args.headroom, 5);
        assert_eq!(args.strategy().name(), "optimal");
        assert!(Cli::try_parse_from(["packopt", "calculate"]).is_err());
    }

    #[test]
    fn test_set_sizes_then_list() {
        let scratch = ScratchStore::new("sizes.txt");
        let store = scratch.arg();

        let output = run(parse(&["set-sizes", "53", "23", "31", "--store", &store])).unwrap();
        assert_eq!(output, "23 31 53\n");
        let output = run(parse(&["sizes", "--store", &store])).unwrap();
        assert_eq!(output, "23 31 53\n");
        let output = run(parse(&["calculate", "500000", "--store", &store])).unwrap();
        assert!(output.starts_with("53 x 9429\n"));

        let err = run(parse(&["set-sizes", "0", "--store", &store])).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidPackSize(0)));
    }

    #[test]
    fn test_zero_in_sizes_flag_is_rejected() {
        assert!(Cli::try_parse_from(["packopt", "calculate", "100", "--sizes", "0,0"]).is_err());
        assert!(Cli::try_parse_from(["packopt", "calculate", "100", "--sizes", "250,0"]).is_err());
    }

    #[test]
    fn test_largest_amount() {
        let output = run(parse(&["calculate", "9223372036854775807", "--sizes", "2"])).unwrap();
        assert!(output.ends_with("(excess 1)\n"));
    }

    #[test]
    fn test_format_sizes() {
        assert_eq!(format_sizes(&[]), "no pack sizes configured\n");
        assert_eq!(format_sizes(&[250, 500]), "250 500\n");
    }
}

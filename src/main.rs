//! Rental Projection CLI
//!
//! Project buy-to-rent properties across valuation scenarios, or solve for
//! the capital needed to reach a target monthly cash flow.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use rental_projection::assumptions::{loader::DEFAULT_ASSUMPTIONS_PATH, Assumptions};
use rental_projection::property::{load_properties, PropertyInputs};
use rental_projection::scenario::{PropertyReport, ScenarioRunner};
use rental_projection::solver::{
    assess_viability, generate_alternative_scenarios, SolveOutcome, SolverInputs, ViabilityReport,
    DEFAULT_AVAILABLE_CAPITAL,
};

#[derive(Parser)]
#[command(name = "rental-projection", version, about = "Buy-to-rent investment projections")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Project properties under every valuation scenario
    Project(ProjectArgs),
    /// Solve for the capital needed to reach a monthly cash-flow target
    Viability(ViabilityArgs),
}

#[derive(Args)]
struct ProjectArgs {
    /// Property CSV file (sample projects when omitted)
    #[arg(short, long)]
    properties: Option<PathBuf>,

    /// Directory with general.csv, valuation_scenarios.csv and instruments.csv
    #[arg(short, long, default_value = DEFAULT_ASSUMPTIONS_PATH)]
    assumptions_dir: PathBuf,

    /// Override the investment horizon in years
    #[arg(long)]
    investment_years: Option<u32>,

    /// Override the loan term in years
    #[arg(long)]
    loan_term: Option<u32>,

    /// Scenario used for the yearly breakdown
    #[arg(long)]
    scenario: Option<String>,

    /// Emit reports as JSON
    #[arg(long)]
    json: bool,

    /// Write the yearly breakdown rows to this CSV file
    #[arg(long)]
    csv_out: Option<PathBuf>,
}

#[derive(Args)]
struct ViabilityArgs {
    /// Target monthly net cash flow
    #[arg(long, default_value_t = SolverInputs::default().target_monthly_cashflow)]
    target: f64,

    /// Capital available to invest
    #[arg(long, default_value_t = DEFAULT_AVAILABLE_CAPITAL)]
    available: f64,

    /// Expected annual rental yield (%)
    #[arg(long, default_value_t = 7.0)]
    rental_yield: f64,

    /// Loan interest rate (%)
    #[arg(long, default_value_t = 12.0)]
    interest: f64,

    /// Loan term in years
    #[arg(long, default_value_t = 30)]
    loan_term: u32,

    /// Down payment (%)
    #[arg(long, default_value_t = 30.0)]
    down_payment: f64,

    /// Notary fees (%)
    #[arg(long, default_value_t = 2.5)]
    notary: f64,

    /// Property tax (% of value)
    #[arg(long, default_value_t = 0.5)]
    property_tax: f64,

    /// Maintenance (% of value)
    #[arg(long, default_value_t = 1.0)]
    maintenance: f64,

    /// Insurance (% of value)
    #[arg(long, default_value_t = 0.3)]
    insurance: f64,

    /// Monthly administration fee
    #[arg(long, default_value_t = 0.0)]
    admin_fee: f64,

    /// Also solve the three alternative scenarios
    #[arg(long)]
    alternatives: bool,

    /// Emit results as JSON
    #[arg(long)]
    json: bool,
}

impl ViabilityArgs {
    fn solver_inputs(&self) -> SolverInputs {
        SolverInputs {
            target_monthly_cashflow: self.target,
            expected_rental_yield: self.rental_yield / 100.0,
            loan_term_years: self.loan_term,
            interest_rate: self.interest / 100.0,
            down_payment_percent: self.down_payment / 100.0,
            notary_fees_percent: self.notary / 100.0,
            property_tax_percent: self.property_tax / 100.0,
            maintenance_percent: self.maintenance / 100.0,
            insurance_percent: self.insurance / 100.0,
            admin_fee_monthly: self.admin_fee,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Project(args) => run_project(args),
        Commands::Viability(args) => run_viability(args),
    }
}

fn run_project(args: ProjectArgs) -> Result<()> {
    let mut assumptions = Assumptions::from_csv_path(&args.assumptions_dir)
        .with_context(|| format!("loading assumptions from {}", args.assumptions_dir.display()))?;
    if let Some(years) = args.investment_years {
        assumptions.general.investment_years = years;
    }
    if let Some(term) = args.loan_term {
        assumptions.general.loan_term_years = term;
    }

    let properties = match &args.properties {
        Some(path) => load_properties(path).with_context(|| format!("loading properties from {}", path.display()))?,
        None => PropertyInputs::sample_projects(),
    };

    let runner = ScenarioRunner::with_assumptions(assumptions);
    let mut reports = runner.run_batch(&properties);

    if let Some(name) = &args.scenario {
        let rate = runner.assumptions().scenario(name)?.rate;
        for report in &mut reports {
            report.breakdown = runner.breakdown_for(&report.property.inputs, name)?;
            report.breakdown_rate = rate;
        }
    }

    if let Some(path) = &args.csv_out {
        write_breakdown_csv(path, &reports).with_context(|| format!("writing {}", path.display()))?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            print_property_report(report);
        }
    }

    Ok(())
}

#[derive(serde::Serialize)]
struct BreakdownCsvRow<'a> {
    property_id: u32,
    property: &'a str,
    valuation_rate: f64,
    year: u32,
    gross_annual_rent: f64,
    variable_expenses: f64,
    fixed_expenses: f64,
    mortgage_payment: f64,
    net_cash_flow: f64,
}

fn write_breakdown_csv(path: &Path, reports: &[PropertyReport]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for report in reports {
        for row in &report.breakdown {
            writer.serialize(BreakdownCsvRow {
                property_id: report.property.property_id,
                property: &report.property.name,
                valuation_rate: report.breakdown_rate,
                year: row.year,
                gross_annual_rent: row.gross_annual_rent,
                variable_expenses: row.variable_expenses,
                fixed_expenses: row.fixed_expenses,
                mortgage_payment: row.mortgage_payment,
                net_cash_flow: row.net_cash_flow,
            })?;
        }
    }
    writer.flush()?;
    Ok(())
}

fn print_property_report(report: &PropertyReport) {
    let financing = &report.financing;

    println!("{} (#{})", report.property.name, report.property.property_id);
    println!("{}", "=".repeat(60));
    println!("  Base value:          {:>18.0}", report.property.inputs.base_value);
    println!("  Notary fees:         {:>18.0}", financing.notary_amount);
    println!("  Total with notary:   {:>18.0}", financing.total_value_with_notary);
    println!("  Initial equity:      {:>18.0}", financing.initial_user_equity);
    println!("  Loan amount:         {:>18.0}", financing.loan_amount);
    println!("  Annual mortgage:     {:>18.0}", report.annual_mortgage_payment);
    println!("  Total interest:      {:>18.0}", report.total_interest);
    println!();

    println!(
        "{:<14} {:>7} {:>16} {:>16} {:>16} {:>9} {:>8}",
        "Scenario", "Rate", "Future value", "Cash flow", "Total value", "ROI", "CAGR"
    );
    println!("{}", "-".repeat(92));
    for scenario in &report.scenarios {
        let m = &scenario.metrics;
        println!(
            "{:<14} {:>6.2}% {:>16.0} {:>16.0} {:>16.0} {:>8.1}% {:>7.2}%",
            scenario.scenario_name,
            scenario.scenario_rate * 100.0,
            m.future_base_property_value,
            m.accumulated_cash_flow,
            m.total_user_value,
            m.roi * 100.0,
            m.cagr * 100.0,
        );
    }
    println!();

    println!("Yearly breakdown at {:.2}% appreciation:", report.breakdown_rate * 100.0);
    println!(
        "{:>4} {:>14} {:>14} {:>14} {:>14} {:>14}",
        "Year", "Rent", "Variable", "Fixed", "Mortgage", "Net"
    );
    for row in &report.breakdown {
        println!(
            "{:>4} {:>14.0} {:>14.0} {:>14.0} {:>14.0} {:>14.0}",
            row.year, row.gross_annual_rent, row.variable_expenses, row.fixed_expenses,
            row.mortgage_payment, row.net_cash_flow,
        );
    }
    println!();

    println!("Initial equity in liquid instruments:");
    for projection in &report.instruments {
        println!(
            "  {:<28} {:>6.2}% {:>18.0}",
            projection.instrument.name,
            projection.instrument.rate * 100.0,
            projection.future_value,
        );
    }
    println!();
}

fn run_viability(args: ViabilityArgs) -> Result<()> {
    let inputs = args.solver_inputs();
    let report = assess_viability(&inputs, args.available);
    let alternatives = if args.alternatives {
        generate_alternative_scenarios(&inputs, args.available)
    } else {
        Vec::new()
    };

    if args.json {
        let value = serde_json::json!({
            "base": report,
            "alternatives": alternatives,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    print_viability_report("Base case", &report);
    for alternative in &alternatives {
        print_viability_report(&alternative.name, &alternative.report);
    }

    Ok(())
}

fn print_viability_report(title: &str, report: &ViabilityReport) {
    let result = &report.result;
    let analysis = &report.analysis;

    println!("{}", title);
    println!("{}", "=".repeat(60));
    match result.outcome {
        SolveOutcome::Converged => {
            println!("  Solved in {} iterations ({} evaluations)", result.iterations, result.evaluations)
        }
        SolveOutcome::Exhausted => println!("  Iteration limit reached, best estimate shown"),
        SolveOutcome::Fallback(reason) => println!("  No bracket found ({:?}), direct estimate shown", reason),
    }
    println!("  Property value:      {:>18.0}", result.required_property_value);
    println!("  Notary fees:         {:>18.0}", result.notary_amount);
    println!("  Down payment:        {:>18.0}", result.required_down_payment);
    println!("  Loan amount:         {:>18.0}", result.loan_amount);
    println!("  Monthly rent:        {:>18.0}", result.monthly_rent);
    println!("  Annual expenses:     {:>18.0}", result.total_annual_expenses);
    println!("  Annual mortgage:     {:>18.0}", result.annual_mortgage_payment);
    println!("  Net monthly cash:    {:>18.0}", result.net_monthly_cashflow);
    println!();
    println!("  Available capital:   {:>18.0}", report.available_capital);
    println!("  Status:              {} ({:.1}%)", analysis.status, analysis.viability_percentage);
    println!("  {}", analysis.recommendation);
    println!();
}

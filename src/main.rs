//! CPP Bridge CLI
//!
//! Command-line interface for evaluating a single bridge scenario

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;

use cpp_bridge::assumptions::loader::load_mortality_table_file;
use cpp_bridge::projection::crossover_age;
use cpp_bridge::valuation::nominal_breakeven_age;
use cpp_bridge::{Assumptions, Gender, HealthStatus, ScenarioRequest, ScenarioRunner};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliGender {
    Male,
    Female,
}

impl From<CliGender> for Gender {
    fn from(value: CliGender) -> Self {
        match value {
            CliGender::Male => Gender::Male,
            CliGender::Female => Gender::Female,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliHealth {
    Excellent,
    #[value(alias = "average")]
    Normal,
    Poor,
}

impl From<CliHealth> for HealthStatus {
    fn from(value: CliHealth) -> Self {
        match value {
            CliHealth::Excellent => HealthStatus::Excellent,
            CliHealth::Normal => HealthStatus::Normal,
            CliHealth::Poor => HealthStatus::Poor,
        }
    }
}

/// Should CPP be claimed at 65, or deferred to 70 with savings bridging the gap?
#[derive(Debug, Parser)]
#[command(name = "cpp_bridge", version, about)]
struct Cli {
    /// Read the scenario request from a JSON file instead of flags
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Current age
    #[arg(long, required_unless_present = "input")]
    age: Option<u32>,

    /// Monthly CPP estimate at 65
    #[arg(long, required_unless_present = "input")]
    cpp: Option<f64>,

    /// Savings available to fund the bridge
    #[arg(long, required_unless_present = "input")]
    savings: Option<f64>,

    #[arg(long, value_enum, default_value = "male")]
    gender: CliGender,

    #[arg(long, value_enum, default_value = "normal")]
    health: CliHealth,

    /// Annual real rate of return (decimal)
    #[arg(long, default_value_t = 0.01, allow_negative_numbers = true)]
    real_rate: f64,

    /// Annual wage growth (decimal)
    #[arg(long, default_value_t = 0.011, allow_negative_numbers = true)]
    wage_growth: f64,

    /// Value each strategy as if survival to 65 were certain
    #[arg(long)]
    ignore_pre_retirement_mortality: bool,

    /// Mortality table CSV (columns Age,Male-qx,Female-qx)
    #[arg(long, value_name = "FILE")]
    mortality_csv: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Write the monthly projection to a CSV file
    #[arg(long, value_name = "FILE")]
    projection_csv: Option<PathBuf>,

    /// Print the accumulated value of both streams by age
    #[arg(long)]
    growth: bool,
}

impl Cli {
    fn request(&self) -> Result<ScenarioRequest> {
        if let Some(path) = &self.input {
            let file = File::open(path)
                .with_context(|| format!("Unable to open {}", path.display()))?;
            return serde_json::from_reader(file)
                .with_context(|| format!("Invalid scenario JSON in {}", path.display()));
        }

        // clap enforces these when --input is absent
        let age = self.age.context("--age is required")?;
        let cpp = self.cpp.context("--cpp is required")?;
        let savings = self.savings.context("--savings is required")?;

        Ok(ScenarioRequest::new(age, cpp, savings)
            .with_gender(self.gender.into())
            .with_health(self.health.into())
            .with_rates(self.real_rate, self.wage_growth)
            .with_pre_retirement_discount(!self.ignore_pre_retirement_mortality))
    }

    fn assumptions(&self) -> Result<Assumptions> {
        let assumptions = Assumptions::default_pricing();
        match &self.mortality_csv {
            Some(path) => {
                let table = load_mortality_table_file(path)
                    .with_context(|| format!("Unable to load mortality table {}", path.display()))?;
                Ok(assumptions.with_mortality(table))
            }
            None => Ok(assumptions),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let request = cli.request()?;
    let runner = ScenarioRunner::with_assumptions(cli.assumptions()?);

    info!("Evaluating scenario for age {}", request.current_age);
    let result = runner.evaluate(&request)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        let target = result.target_monthly_income_at_70;
        let nominal = nominal_breakeven_age(
            request.cpp_estimate_at_65,
            target,
            &runner.assumptions().benefit,
        );

        println!("CPP Bridge Analysis");
        println!("===================\n");
        println!("Profile:");
        println!("  Age: {}", request.current_age);
        println!("  Gender: {:?}", request.gender);
        println!("  Health: {}", request.health_status);
        println!("  Life Expectancy: {:.1}", result.life_expectancy);
        println!();
        println!("Benefits:");
        println!("  CPP at 65: ${:.2}/month", request.cpp_estimate_at_65);
        println!("  CPP at 70: ${:.2}/month", target);
        println!();
        println!("Bridge:");
        println!("  Cost Today: ${:.0}", result.bridge_cost_lump_sum);
        println!("  Savings: ${:.2}", request.rrsp_savings);
        if result.is_affordable {
            println!("  Fully Funded (surplus ${:.2})", result.surplus_amount);
            println!("  Surplus at 85: ${:.2}", result.bonus_estate_value_at_85);
        } else {
            println!("  Shortfall: ${:.2}", result.shortfall_amount);
        }
        println!();
        println!("Breakeven:");
        println!("  Economic: Age {}", result.breakeven_age_economic);
        match nominal {
            Some(age) => println!("  Nominal: Age {}", age),
            None => println!(
                "  Nominal: none before Age {}",
                runner.assumptions().benefit.breakeven_scan.1
            ),
        }
        println!("  Probability of Reaching: {:.1}%", result.probability_of_winning * 100.0);
        println!();
        println!("Expected Present Value:");
        println!("  Take at 65: ${:.2}", result.epv_early);
        println!("  Delay to 70: ${:.2}", result.epv_delayed);
        println!();
        println!("Recommendation: {}", result.recommendation);
        println!("  {}", result.recommendation_reasoning);
    }

    if cli.growth {
        let points = runner.growth(&request)?;
        println!("\n{:>5} {:>14} {:>14}", "Age", "Take at 65", "Delay to 70");
        println!("{}", "-".repeat(35));
        for p in &points {
            println!("{:>5} {:>14.2} {:>14.2}", p.age, p.early_balance, p.delayed_balance);
        }
        if let Some(age) = crossover_age(&points) {
            println!("\nDelayed balance overtakes at Age {}", age);
        }
    }

    if let Some(path) = &cli.projection_csv {
        let projection = runner.project(&request)?;
        let file = File::create(path)
            .with_context(|| format!("Unable to create {}", path.display()))?;
        projection.write_csv(BufWriter::new(file))?;

        let summary = projection.summary();
        println!("\nProjection ({} months) written to: {}", summary.total_months, path.display());
        println!("  Total EPV Early: ${:.2}", summary.total_epv_early);
        println!("  Total EPV Delayed: ${:.2}", summary.total_epv_delayed);
    }

    Ok(())
}

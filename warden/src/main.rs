#![forbid(unsafe_code)]

mod report;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use miette::IntoDiagnostic;

use warden_analysis::{analyze_redundancy, implied_by_rest, implies_bounded, single_redundant};
use warden_exec::parse_spec_with_limit;
use warden_parse::parse_predicate;

#[derive(Parser, Debug)]
#[command(name = "warden", version, about = "Bounded contract checker")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Analyze a spec: run the bounded contract and the redundancy checks
    Check {
        /// Path to a spec JSON file (e.g. specs/countdown.json)
        #[arg(long)]
        spec: PathBuf,

        /// Override the spec file's step_limit
        #[arg(long)]
        step_limit: Option<u64>,

        /// Also compute the group-redundancy report and write it as JSON
        #[arg(long, default_value_t = false)]
        group: bool,

        /// Print the base run as machine-readable JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Bounded implication check over a spec's input domain
    Implies {
        /// Path to a spec JSON file providing the input domain
        #[arg(long)]
        spec: PathBuf,

        /// Antecedent expressions (conjoined; may repeat)
        #[arg(long)]
        antecedent: Vec<String>,

        /// Consequent expression
        #[arg(long)]
        consequent: String,
    },
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Check {
            spec,
            step_limit,
            group,
            json,
        } => check(&spec, step_limit, group, json),
        Cmd::Implies {
            spec,
            antecedent,
            consequent,
        } => implies(&spec, &antecedent, &consequent),
    }
}

fn check(path: &Path, step_limit: Option<u64>, group: bool, json: bool) -> miette::Result<()> {
    let text = std::fs::read_to_string(path).into_diagnostic()?;
    let loaded = parse_spec_with_limit(&text, step_limit)?;
    let contract = &loaded.contract;

    let base = contract.run();

    if json {
        println!("{}", serde_json::to_string_pretty(&base).into_diagnostic()?);
        return Ok(());
    }

    println!("Spec: {}", path.display());
    if let Some(title) = &loaded.title {
        println!("Title: {title}");
    }
    print!("{}", report::render_base_run(contract, &base));
    println!();

    if !contract.pre.is_empty() {
        let redundant = single_redundant(contract);
        print!(
            "{}",
            report::render_single_redundancy(&contract.pre, &redundant)
        );
        println!();

        let implied = implied_by_rest(contract)?;
        print!("{}", report::render_implication(&contract.pre, &implied));
        println!();
    }

    if !contract.post.is_empty() {
        print!("{}", report::render_variable_usage(contract));
        println!();
    }

    if group {
        let group_report = analyze_redundancy(contract);
        let out = PathBuf::from("outputs/redundancy_report.json");
        if let Some(parent) = out.parent() {
            std::fs::create_dir_all(parent).into_diagnostic()?;
        }
        std::fs::write(
            &out,
            serde_json::to_string_pretty(&group_report).into_diagnostic()?,
        )
        .into_diagnostic()?;
        println!("Wrote {}", out.display());
    }

    Ok(())
}

fn implies(path: &Path, antecedent: &[String], consequent: &str) -> miette::Result<()> {
    let text = std::fs::read_to_string(path).into_diagnostic()?;
    let loaded = parse_spec_with_limit(&text, None)?;

    let antecedent = antecedent
        .iter()
        .map(|text| parse_predicate(text))
        .collect::<Result<Vec<_>, _>>()?;
    let consequent = parse_predicate(consequent)?;

    let holds = implies_bounded(&antecedent, &consequent, &loaded.contract.domain)?;
    println!("{}", if holds { "IMPLIED" } else { "NOT implied" });
    Ok(())
}

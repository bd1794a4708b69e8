use clap::Args;

use crate::cli::OutputFormat;
use crate::core::variant::VariantState;

#[derive(Args)]
pub struct ClassifyArgs {
    /// Variant descriptions (e.g. "NM_000088.3:c.589G>T").
    /// Use '-' to read one description per line from stdin
    #[arg(required = true)]
    pub descriptions: Vec<String>,

    /// Leave whitespace inside descriptions untouched
    #[arg(long)]
    pub keep_whitespace: bool,
}

/// Result of running one description through normalization
struct Outcome {
    state: VariantState,
    failed: bool,
    non_ascii: Vec<(char, usize)>,
}

pub fn run(args: ClassifyArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let descriptions = read_descriptions(&args.descriptions)?;

    if verbose {
        eprintln!("Classifying {} variant descriptions", descriptions.len());
    }

    let outcomes: Vec<Outcome> = descriptions
        .into_iter()
        .enumerate()
        .map(|(order, description)| classify_one(description, order, args.keep_whitespace))
        .collect();

    match format {
        OutputFormat::Text => print_text_results(&outcomes),
        OutputFormat::Json => print_json_results(&outcomes)?,
        OutputFormat::Tsv => print_tsv_results(&outcomes),
    }

    Ok(())
}

fn read_descriptions(args: &[String]) -> anyhow::Result<Vec<String>> {
    use std::io::{self, Read};

    if args.len() == 1 && args[0] == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        return Ok(buffer
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect());
    }

    Ok(args.to_vec())
}

fn classify_one(description: String, order: usize, keep_whitespace: bool) -> Outcome {
    let mut state = VariantState::new(description).with_order(order);

    if !keep_whitespace {
        state.strip_whitespace();
    }

    let non_ascii: Vec<(char, usize)> = if state.is_ascii() {
        Vec::new()
    } else {
        let (chars, positions) = state.locate_non_ascii();
        for (c, pos) in chars.iter().zip(&positions) {
            state.add_warning(format!(
                "Submitted variant description contains an invalid character {c} at position {pos}"
            ));
        }
        chars.into_iter().zip(positions).collect()
    };

    let failed = state.normalize_quibble();
    if failed {
        state.add_warning(format!(
            "Unable to identify the reference sequence type or source of {}",
            state.quibble()
        ));
    }

    Outcome {
        state,
        failed,
        non_ascii,
    }
}

fn print_text_results(outcomes: &[Outcome]) {
    for (i, outcome) in outcomes.iter().enumerate() {
        if i > 0 {
            println!();
        }
        let state = &outcome.state;
        println!("Submitted: {}", state.original());
        println!("  Working copy: {}", state.quibble());

        match (state.reference_source(), state.reference_type()) {
            (Some(source), Some(reference_type)) => {
                println!("  Source: {source}");
                println!("  Type:   {reference_type}");
            }
            _ => println!("  Unclassified"),
        }

        for (c, pos) in &outcome.non_ascii {
            println!("  Non-ASCII character {c:?} at position {pos}");
        }
        for warning in state.warnings() {
            println!("  Warning: {warning}");
        }
    }
}

fn print_json_results(outcomes: &[Outcome]) -> anyhow::Result<()> {
    let output: Vec<serde_json::Value> = outcomes
        .iter()
        .map(|outcome| {
            let state = &outcome.state;
            let non_ascii: Vec<serde_json::Value> = outcome
                .non_ascii
                .iter()
                .map(|(c, pos)| serde_json::json!({ "character": c.to_string(), "position": pos }))
                .collect();
            serde_json::json!({
                "order": state.order,
                "quibble": state.quibble(),
                "classified": !outcome.failed,
                "reference_source": state.reference_source(),
                "reference_type": state.reference_type(),
                "non_ascii": non_ascii,
                "warnings": state.warnings(),
                "output_type_flag": state.output_type_flag,
                "record": state.output_dict(),
            })
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_results(outcomes: &[Outcome]) {
    println!("order\tsubmitted\tquibble\tsource\ttype\tnon_ascii_positions");
    for outcome in outcomes {
        let state = &outcome.state;
        let positions = outcome
            .non_ascii
            .iter()
            .map(|(_, pos)| pos.to_string())
            .collect::<Vec<_>>()
            .join(",");
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}",
            state.order.unwrap_or_default(),
            state.original(),
            state.quibble(),
            state.reference_source().map_or("-".to_string(), |s| s.to_string()),
            state.reference_type().map_or("-".to_string(), |t| t.to_string()),
            if positions.is_empty() { "-" } else { positions.as_str() },
        );
    }
}

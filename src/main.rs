use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracefold::cli::{
    ClusterArgs, Cli, Command, GraphArgs, GraphFormat, OutputFormat, PairwiseArgs, ScoreArgs,
};
use tracefold::config::AnalysisConfig;
use tracefold::csv_output::ClusterCsv;
use tracefold::json_output::{ClusterReport, GraphReport, PairwiseReport, ScoreReport};
use tracefold::scoring::{
    disparity, evaluate_model, evaluate_model_weak_disparity, homogeneity, predecessors,
    shift_dissimilarity, MemoRegistry,
};
use tracefold::step::{parse_model, parse_sequence_lines, parse_sequences, Sequence, Token};
use tracefold::{cluster_sequences, Automaton};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
///
/// Without `--debug`, a subscriber is still installed when RUST_LOG is set.
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    } else if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Read INPUT, with `-` meaning stdin
fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read stdin")?;
        return Ok(content);
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn load_sequences(path: &Path, lines: bool) -> Result<Vec<Sequence>> {
    let content = read_input(path)?;
    let sequences = if lines {
        parse_sequence_lines(&content)
    } else {
        parse_sequences(&content)
    };
    sequences.with_context(|| format!("Invalid sequences in {}", path.display()))
}

fn write_output(output: Option<&PathBuf>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "output written");
        }
        None => print!("{}", content),
    }
    Ok(())
}

fn run_cluster(args: &ClusterArgs, mut config: AnalysisConfig, lines: bool) -> Result<()> {
    args.pattern.apply(&mut config);
    let sequences = load_sequences(&args.input, lines)?;
    let outcome = cluster_sequences(&sequences, &config.pattern)?;

    let rendered = match args.format {
        OutputFormat::Json => ClusterReport::from_outcome(&outcome).to_json()? + "\n",
        OutputFormat::Csv => ClusterCsv::from_model(&outcome.model).to_csv(),
        OutputFormat::Text => {
            let mut text = format!(
                "{} sequences in {} clusters\n",
                sequences.len(),
                outcome.model.len()
            );
            for cluster in outcome.model.clusters() {
                text.push_str(&format!(
                    "cluster {} ({} members): {}\n",
                    cluster.id,
                    cluster.size(),
                    cluster.pattern_text()
                ));
            }
            text
        }
    };

    write_output(args.output.as_ref(), &rendered)
}

fn run_graph(args: &GraphArgs, mut config: AnalysisConfig, lines: bool) -> Result<()> {
    args.apply(&mut config);
    let sequences = load_sequences(&args.input, lines)?;

    let mut automaton = Automaton::from_config(&config.automaton);
    automaton.insert(&sequences)?;

    let rendered = match args.format {
        GraphFormat::Dot => automaton.render(config.automaton.include_root) + "\n",
        GraphFormat::Json => {
            GraphReport::from_automaton(&automaton, config.automaton.include_root).to_json()? + "\n"
        }
    };

    write_output(args.output.as_ref(), &rendered)
}

fn run_score(args: &ScoreArgs, mut config: AnalysisConfig, lines: bool) -> Result<()> {
    if args.format == OutputFormat::Csv {
        anyhow::bail!("score reports support --format text or json, not csv");
    }
    args.apply(&mut config);

    let model: Vec<Vec<Vec<Token>>> = if args.model {
        let content = read_input(&args.input)?;
        parse_model(&content)
            .with_context(|| format!("Invalid model in {}", args.input.display()))?
            .iter()
            .map(|cluster| cluster.iter().map(Sequence::tokens).collect())
            .collect()
    } else {
        let sequences = load_sequences(&args.input, lines)?;
        cluster_sequences(&sequences, &config.pattern)?
            .model
            .member_tokens()
    };
    let sequences = model.iter().map(Vec::len).sum();

    let mut memo = MemoRegistry::new();
    let scores = if args.weak {
        evaluate_model_weak_disparity(&model, &mut memo)?
    } else {
        evaluate_model(&model, &config.scoring, &mut memo)?
    };
    tracing::debug!(
        known_sequences = memo.known_sequences().len(),
        cached_pairs = memo.pair_count(),
        "scoring complete"
    );

    let report = ScoreReport::new(model.len(), sequences, args.weak, scores);
    match args.format {
        OutputFormat::Json => println!("{}", report.to_json()?),
        _ => print!("{}", report.to_text()),
    }
    Ok(())
}

fn parse_inline(text: &str, name: &str) -> Result<Vec<Token>> {
    let value: serde_json::Value = serde_json::from_str(text)
        .with_context(|| format!("{} is not valid JSON", name))?;
    let sequence = Sequence::from_value(&value).with_context(|| format!("Invalid {}", name))?;
    if sequence.is_empty() {
        anyhow::bail!("{} is empty", name);
    }
    Ok(sequence.tokens())
}

fn run_pairwise(args: &PairwiseArgs) -> Result<()> {
    if args.format == OutputFormat::Csv {
        anyhow::bail!("pairwise reports support --format text or json, not csv");
    }
    let first = parse_inline(&args.first, "first sequence")?;
    let second = parse_inline(&args.second, "second sequence")?;

    let report = PairwiseReport {
        homogeneity: homogeneity(&first, &second),
        disparity: disparity(&first, &second),
        shift_dissimilarity: shift_dissimilarity(&first, &second),
        predecessors: predecessors(&first, &second, !args.keep_repeats, None),
    };

    match args.format {
        OutputFormat::Json => println!("{}", report.to_json()?),
        _ => print!("{}", report.to_text()),
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    let config = match &args.config {
        Some(path) => AnalysisConfig::from_toml(path)?,
        None => AnalysisConfig::default(),
    };

    match &args.command {
        Command::Cluster(cmd) => run_cluster(cmd, config, args.lines),
        Command::Graph(cmd) => run_graph(cmd, config, args.lines),
        Command::Score(cmd) => run_score(cmd, config, args.lines),
        Command::Pairwise(cmd) => run_pairwise(cmd),
    }
}

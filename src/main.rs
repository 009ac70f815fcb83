//! Paperrank command-line entrypoint.

use anyhow::Context;

use paperrank::config::Config;
use paperrank::models::ModelRegistry;
use paperrank::pipeline::{Pipeline, PipelineError, RunInput, RunReport};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "--list-models") {
        println!("{}", ModelRegistry::describe_all());
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;

    let input_path = config.require_input_path()?;
    let input = RunInput::load(input_path)
        .with_context(|| format!("reading input document {}", input_path.display()))?;

    tracing::info!(
        papers = input.papers.len(),
        questions = input.questions.len(),
        model = %config.model_key,
        "Paperrank starting"
    );

    let pipeline = Pipeline::from_config(&config)?;
    let report = match pipeline.run(&input.papers, &input.questions).await {
        Ok(report) => report,
        Err(PipelineError::NothingResolved { unresolved }) => {
            tracing::warn!(unresolved, "No papers could be resolved; nothing to rank");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(
        prompt_tokens = report.usage.total_prompt_tokens,
        completion_tokens = report.usage.total_completion_tokens,
        total_tokens = report.usage.total_tokens,
        cost_usd = report.usage.estimated_cost_usd,
        "Token usage"
    );

    print_top(&report, config.top_n);
    if let Some(error) = &report.save_error {
        eprintln!("warning: ranked table was not saved: {error}");
    }
    Ok(())
}

fn print_top(report: &RunReport, n: usize) {
    println!("{:>4}  {:>6}  {:<18}  Title", "#", "Score", "arXiv id");
    for (rank, (paper, score)) in report.top(n).into_iter().enumerate() {
        let score = if score < 0.0 {
            "-".to_string()
        } else {
            format!("{score:.2}")
        };
        println!(
            "{:>4}  {:>6}  {:<18}  {}",
            rank + 1,
            score,
            paper.canonical_id,
            paper.title
        );
    }
    println!(
        "\n{} ranked, {} unresolved, {} duplicates removed, estimated cost ${:.4}",
        report.table.len(),
        report.unresolved,
        report.duplicates,
        report.usage.estimated_cost_usd
    );
}

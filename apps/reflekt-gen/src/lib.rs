use std::collections::HashSet;

use clap::Parser;
use color_eyre::eyre::eyre;
use tracing_subscriber::EnvFilter;

use reflekt_config::Config;
use reflekt_engine::{Aggregator, ReflectionEngine, ranked};
use reflekt_index::{EsIndex, FrequencyCache, SearchIndex};
use reflekt_nlp::HttpAnnotator;

#[derive(Debug, Parser)]
#[command(
	version = reflekt_cli::VERSION,
	rename_all = "kebab",
	styles = reflekt_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: std::path::PathBuf,
	/// Reflect the single document matching this title and print its ranked
	/// candidates instead of generating a judgment file.
	#[arg(long, value_name = "PHRASE")]
	pub title: Option<String>,
	/// Overrides the configured traversal depth.
	#[arg(long, value_name = "N")]
	pub step_budget: Option<u32>,
	/// Overrides the configured corpus sample size.
	#[arg(long, value_name = "N")]
	pub limit: Option<u32>,
	/// Overrides the configured judgment file path.
	#[arg(long, short = 'o', value_name = "FILE")]
	pub output: Option<std::path::PathBuf>,
}

pub fn run(args: Args) -> color_eyre::Result<()> {
	let config = reflekt_config::load(&args.config)?;
	let filter = EnvFilter::new(config.service.log_level.clone());

	tracing_subscriber::fmt().with_env_filter(filter).init();

	let index = EsIndex::new(&config.index)?;
	let annotator = HttpAnnotator::new(&config.annotator)?;
	let cache = FrequencyCache::load(&config.cache.dir, config.reflection.stopword_doc_freq);

	tracing::info!(
		phrases = cache.phrase_entries(),
		collections = cache.collection_entries(),
		"Caches loaded."
	);

	let engine = ReflectionEngine::new(&index, &annotator, cache, config.reflection.clone());
	let step_budget = args.step_budget.unwrap_or(config.reflection.step_budget);

	match &args.title {
		Some(title) => inspect(engine, &index, &config, title, step_budget),
		None => generate(engine, &index, &config, &args, step_budget),
	}
}

/// Reflects one document looked up by title and prints its candidates best
/// first.
fn inspect(
	mut engine: ReflectionEngine<'_>,
	index: &EsIndex,
	config: &Config,
	title: &str,
	step_budget: u32,
) -> color_eyre::Result<()> {
	let doc = index
		.title_phrase_search(title)?
		.into_iter()
		.next()
		.ok_or_else(|| eyre!("No document matched title {title:?}."))?;
	let mut visited = HashSet::from([doc.id.clone()]);
	let outcome = engine.reflect(&doc, step_budget, &mut visited);

	persist_cache(&engine.into_cache(), config);

	let store = outcome?;

	println!("{} candidates for {:?} (doc {}):", store.len(), title, doc.id);

	for candidate in ranked(&store) {
		println!(
			"  {:<18} score={:<6} tf={:.2} df={} {}",
			candidate.class.label(),
			candidate.raw_score,
			candidate.term_frequency,
			candidate.document_frequency.map_or_else(|| "-".into(), |df| df.to_string()),
			candidate.phrase,
		);
	}

	Ok(())
}

/// Default mode: sample the corpus, aggregate judgments, write the judgment
/// file.
fn generate(
	engine: ReflectionEngine<'_>,
	index: &EsIndex,
	config: &Config,
	args: &Args,
	step_budget: u32,
) -> color_eyre::Result<()> {
	let limit = args.limit.unwrap_or(config.aggregation.max_docs);
	let sample = index.corpus_sample(limit)?;

	tracing::info!(documents = sample.len(), step_budget, "Corpus sample fetched.");

	let mut aggregator =
		Aggregator::new(engine, config.grades.clone(), config.aggregation.clone());
	let outcome = aggregator.aggregate(&sample, step_budget);

	// Whatever the pipeline outcome, the lookups already paid for are kept.
	persist_cache(&aggregator.into_cache(), config);

	let outcome = outcome?;
	let output = args.output.as_deref().unwrap_or(config.output.judgments_path.as_path());

	reflekt_judgments::write_judgments(output, &outcome.judgments)?;
	tracing::info!(
		path = ?output,
		judgments = outcome.judgments.len(),
		queries = outcome.query_count,
		"Judgment file written."
	);

	Ok(())
}

fn persist_cache(cache: &FrequencyCache, config: &Config) {
	if let Err(err) = cache.save(&config.cache.dir) {
		tracing::warn!(%err, "Failed to persist caches.");
	}
}

//! Spamsift CLI - Short Message Spam Classifier
//!
//! Command-line interface for normalizing and classifying messages.

use clap::{Parser, Subcommand};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use log::{error, warn};
use rayon::prelude::*;
use spamsift::{Config, ModelBundle, Normalizer, Prediction, Result, SpamFilter};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "spamsift")]
#[command(author = "Spamsift Contributors")]
#[command(version)]
#[command(about = "Short message spam classifier", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the normalized form of a message
    Normalize {
        /// Configuration file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// WordNet dictionary directory (overrides the configuration)
        #[arg(long)]
        wordnet: Option<PathBuf>,

        /// Skip lemmatization
        #[arg(long)]
        no_lemmatize: bool,

        /// Show every intermediate stage
        #[arg(long)]
        trace: bool,

        /// Message text
        text: String,
    },

    /// Classify a single message
    Predict {
        /// Configuration file (JSON)
        #[arg(short, long)]
        config: PathBuf,

        /// Print the prediction as JSON
        #[arg(long)]
        json: bool,

        /// Message text
        text: String,
    },

    /// Classify a file of messages, one per line
    Batch {
        /// Configuration file (JSON)
        #[arg(short, long)]
        config: PathBuf,

        /// Input file (one message per line)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show model artifact statistics
    Info {
        /// Configuration file (JSON)
        #[arg(short, long)]
        config: PathBuf,
    },

    /// Load and validate every resource and artifact
    Check {
        /// Configuration file (JSON)
        #[arg(short, long)]
        config: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let result = match cli.command {
        Commands::Normalize {
            config,
            wordnet,
            no_lemmatize,
            trace,
            text,
        } => normalize_text(config, wordnet, no_lemmatize, trace, text),

        Commands::Predict { config, json, text } => predict_message(config, json, text),

        Commands::Batch {
            config,
            input,
            output,
        } => predict_batch(config, input, output),

        Commands::Info { config } => show_info(config),

        Commands::Check { config } => check_config(config),
    };

    if let Err(e) = result {
        error!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::from_file(path),
        None => Ok(Config::default()),
    }
}

fn normalize_text(
    config: Option<PathBuf>,
    wordnet: Option<PathBuf>,
    no_lemmatize: bool,
    trace: bool,
    text: String,
) -> Result<()> {
    let mut config = load_config(config.as_deref())?;
    if wordnet.is_some() {
        config.resources.wordnet = wordnet;
    }
    if no_lemmatize {
        config.text.lemmatize = false;
    }

    let normalizer = Normalizer::from_config(&config.text, &config.resources)?;

    if !trace {
        println!("{}", normalizer.normalize(&text));
        return Ok(());
    }

    let trace = normalizer.trace(&text);
    println!("Prepared:     {:?}", trace.prepared);
    println!("Tokens:       {:?}", trace.tokens);
    println!("Alphanumeric: {:?}", trace.alphanumeric);
    println!("Content:      {:?}", trace.content);
    println!("Lemmas:       {:?}", trace.lemmas);
    println!("Normalized:   {:?}", trace.normalized.as_str());

    Ok(())
}

fn predict_message(config: PathBuf, json: bool, text: String) -> Result<()> {
    let config = Config::from_file(&config)?;
    let filter = SpamFilter::from_config(&config)?;
    let prediction = filter.predict(&text)?;

    if json {
        println!("{}", serde_json::to_string(&prediction)?);
    } else {
        println!("{}", prediction.verdict.message());
    }

    Ok(())
}

fn predict_batch(config: PathBuf, input: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let start_time = Instant::now();

    let config = Config::from_file(&config)?;
    let filter = SpamFilter::from_config(&config)?;

    let content = fs::read_to_string(&input)?;
    let messages: Vec<&str> = content.lines().collect();

    let bar_style = ProgressStyle::default_bar()
        .template("{msg}\n{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) ETA: {eta}")
        .unwrap()
        .progress_chars("█▓▒░  ");

    let pb = ProgressBar::new(messages.len() as u64);
    pb.set_style(bar_style);
    pb.set_message("Classifying messages (parallel)...");

    let results: Vec<Result<Prediction>> = messages
        .par_iter()
        .map(|message| {
            let result = filter.predict(message);
            pb.inc(1);
            result
        })
        .collect();

    pb.finish_and_clear();

    let mut writer: Box<dyn Write> = match &output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(std::io::stdout().lock()),
    };
    let tally = write_verdicts(&results, &mut writer)?;

    eprintln!(
        "✓ Classified {} messages: {} spam, {} not spam, {} failed",
        format_number(tally.total),
        format_number(tally.spam),
        format_number(tally.not_spam()),
        format_number(tally.failed)
    );
    eprintln!("Completed in {}", HumanDuration(start_time.elapsed()));

    if tally.failed > 0 {
        error!(
            "{} of {} messages could not be classified",
            tally.failed, tally.total
        );
        std::process::exit(1);
    }

    Ok(())
}

/// Outcome counts of a batch run.
#[derive(Debug, Default, PartialEq, Eq)]
struct BatchTally {
    total: usize,
    spam: usize,
    failed: usize,
}

impl BatchTally {
    fn not_spam(&self) -> usize {
        self.total - self.spam - self.failed
    }
}

/// Writes one verdict per line, `ERROR` for lines that failed.
fn write_verdicts<W: Write>(results: &[Result<Prediction>], writer: &mut W) -> Result<BatchTally> {
    let mut tally = BatchTally {
        total: results.len(),
        ..Default::default()
    };

    for (line, result) in results.iter().enumerate() {
        match result {
            Ok(prediction) => {
                if prediction.verdict.is_spam() {
                    tally.spam += 1;
                }
                writeln!(writer, "{}", prediction.verdict)?;
            }
            Err(e) => {
                warn!("line {}: {}", line + 1, e);
                tally.failed += 1;
                writeln!(writer, "ERROR")?;
            }
        }
    }
    writer.flush()?;

    Ok(tally)
}

fn show_info(config_path: PathBuf) -> Result<()> {
    let config = Config::from_file(&config_path)?;
    let bundle = ModelBundle::load(&config.assets)?;
    let summary = bundle.summary();

    println!("Model: {:?}", config_path);
    println!("  Vectorizer: {} ({})", summary.vectorizer, config.assets.vectorizer.display());
    println!("  Vocabulary size: {}", format_number(summary.vocabulary_size));
    println!("  Selector: {} ({})", summary.selector, config.assets.selector.display());
    println!("  Selected features: {}", format_number(summary.selected_features));
    println!("  Classifier: {} ({})", summary.classifier, config.assets.classifier.display());
    println!("  Empty input: {:?}", config.inference.empty_input);

    Ok(())
}

fn check_config(config_path: PathBuf) -> Result<()> {
    let config = Config::from_file(&config_path)?;
    println!("✓ Configuration {:?} is valid", config_path);

    let normalizer = Normalizer::from_config(&config.text, &config.resources)?;
    println!(
        "✓ Linguistic resources loaded ({} stopwords, lemmatization {})",
        normalizer.filter().stopwords().len(),
        if config.text.lemmatize { "on" } else { "off" }
    );

    let bundle = ModelBundle::load(&config.assets)?;
    println!("✓ Artifacts loaded and consistent");
    println!("{}", bundle.summary());

    // Push an empty document through every stage.
    let empty = normalizer.normalize("");
    let verdict = spamsift::pipeline::classify_normalized(&empty, &bundle)?;
    println!("✓ Empty document classifies as {}", verdict);

    Ok(())
}

fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use spamsift::{SpamSiftError, Verdict};

    #[test]
    fn test_write_verdicts() {
        let results = vec![
            Ok(Prediction::from(Verdict::Spam)),
            Err(SpamSiftError::UnknownLabel(2)),
            Ok(Prediction::from(Verdict::NotSpam)),
        ];
        let mut out = Vec::new();

        let tally = write_verdicts(&results, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "SPAM\nERROR\nNOT_SPAM\n");
        assert_eq!(
            tally,
            BatchTally {
                total: 3,
                spam: 1,
                failed: 1
            }
        );
        assert_eq!(tally.not_spam(), 1);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(7), "7");
        assert_eq!(format_number(1234567), "1,234,567");
    }
}

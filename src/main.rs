// src/main.rs

use airth::{
    build_http_client, deliver, load_topics, plan_delivery, render_report, AnthropicClient,
    AppError, ArticleAssembler, BatchOrchestrator, BatchReport, CommandLineInput, DeliveryTarget,
    GeminiClient, OpenAiClient, OutputReport, PipelineConfig, ProviderId, ProviderSettings,
    ProviderSlot, ServiceConfig, SystemStatus, TextGenerator, TopicOutcome, WordPressClient,
};
use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Logger, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use reqwest::Client;
use std::fs;
use std::sync::Arc;

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let console_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("airth.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    // Stdout may carry the JSON report
    let console_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] {t} - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(console_level)))
                .build("console", Box::new(console_appender)),
        )
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .logger(Logger::builder().build("reqwest", LevelFilter::Info))
        .build(
            Root::builder()
                .appender("console")
                .appender("file")
                .build(LevelFilter::Debug),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Runs every topic through generation and publishing, then reports.
async fn execute_pipeline(cli: &CommandLineInput, config: PipelineConfig) -> Result<(), AppError> {
    let requests = load_topics(cli)?;
    let services = ServiceConfig::resolve(cli)?;

    let http =
        build_http_client(services.request_timeout).context("failed to build HTTP client")?;

    let assembler = ArticleAssembler::new(
        services
            .providers
            .iter()
            .map(|settings| {
                ProviderSlot::new(generator_for(settings, &http), settings.params.clone())
            })
            .collect(),
    );
    log::info!(
        "Enabled providers: {}",
        assembler
            .providers()
            .iter()
            .map(ProviderId::display_name)
            .collect::<Vec<_>>()
            .join(", ")
    );

    let publisher = WordPressClient::new(http, services.wordpress);
    let orchestrator = BatchOrchestrator::new(Arc::new(assembler), Arc::new(publisher), config)?;

    let outcomes = orchestrator.process_batch(requests).await;
    let delivery = deliver_report(cli, orchestrator.config(), &outcomes)?;
    report_completion(&outcomes, &delivery);

    Ok(())
}

fn generator_for(settings: &ProviderSettings, http: &Client) -> Arc<dyn TextGenerator> {
    let (client, api_key, base_url) = (
        http.clone(),
        settings.api_key.clone(),
        settings.base_url.clone(),
    );
    match settings.provider {
        ProviderId::OpenAi => Arc::new(OpenAiClient::new(client, api_key, base_url)),
        ProviderId::Anthropic => Arc::new(AnthropicClient::new(client, api_key, base_url)),
        ProviderId::Gemini => Arc::new(GeminiClient::new(client, api_key, base_url)),
    }
}

fn deliver_report(
    cli: &CommandLineInput,
    config: &PipelineConfig,
    outcomes: &[TopicOutcome],
) -> Result<OutputReport, AppError> {
    let report = BatchReport::new(&config.system_name, &config.system_version, outcomes);
    let rendered = render_report(&report)?;
    let delivery = deliver(plan_delivery(rendered, cli.output_file.as_deref()));

    if !delivery.is_success() {
        return Err(AppError::DeliveryFailed {
            failures: delivery.failure_messages(),
        });
    }
    Ok(delivery)
}

/// Prints the completion line. Goes to stderr so a report on stdout stays parseable.
fn report_completion(outcomes: &[TopicOutcome], delivery: &OutputReport) {
    let summary = airth::BatchSummary::from_outcomes(outcomes);

    for completed in &delivery.completed {
        if let DeliveryTarget::WriteFile { path, .. } = &completed.operation {
            eprintln!("✓ Report saved to {}", path.display());
        }
    }

    for outcome in outcomes.iter().filter(|o| !o.is_success()) {
        eprintln!(
            "✗ {}: {}",
            outcome.topic,
            outcome.error().unwrap_or("unknown error")
        );
    }

    let marker = if summary.all_succeeded() { "✓" } else { "⚠️ " };
    eprintln!("{} {}", marker, summary.headline());
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let config = PipelineConfig::resolve(&cli)?;

    if cli.status {
        let status = SystemStatus::from_config(&config);
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    execute_pipeline(&cli, config).await?;

    Ok(())
}

//! `leadgen run`: every stage once, no prompt.

use anyhow::{bail, Context};
use chrono::Local;
use leadgen_core::{FilterCriteria, SearchQuery, Stage};
use leadgen_engine::Pipeline;
use pipeline_logging::pipeline_info;

use crate::cli::RunArgs;
use crate::console::settings::AppSettings;

pub fn run(settings: &AppSettings, args: RunArgs) -> anyhow::Result<()> {
    let config = settings
        .engine_config()
        .context("configuring the lead-gen backend")?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("building runtime")?;
    let mut pipeline = Pipeline::new(config);

    let result = runtime.block_on(run_stages(&mut pipeline, &args));
    print_notifications(&mut pipeline);
    result
}

async fn run_stages(pipeline: &mut Pipeline, args: &RunArgs) -> anyhow::Result<()> {
    let criteria = FilterCriteria {
        domain_active: args.domain_active,
        is_shopify: args.shopify,
        load_time_check: args.load_time,
        excluded_substrings: Vec::new(),
    }
    .with_exclusions(&args.exclude);

    if let Some(path) = &args.email_csv {
        pipeline
            .upload_csv(Stage::Email, path.display().to_string())
            .await?;
    } else {
        if let Some(path) = &args.filter_csv {
            pipeline
                .upload_csv(Stage::Filter, path.display().to_string())
                .await?;
        } else {
            let Some(keyword) = &args.keyword else {
                bail!("--keyword is required unless --filter-csv or --email-csv is given");
            };
            let mut query = SearchQuery::new(keyword.as_str()).with_count(args.count);
            if let Some(country) = &args.country {
                query = query.with_country(country.as_str());
            }
            if let Some(locality) = &args.locality {
                query = query.with_locality(locality.as_str());
            }
            let fetched = pipeline.run_fetch(query).await?;
            pipeline_info!("Batch fetch produced {} websites", fetched.len());
            print_notifications(pipeline);
        }
        let filtered = pipeline.run_filter(criteria).await?;
        pipeline_info!("Batch filter kept {} websites", filtered.len());
        print_notifications(pipeline);
    }

    let results = pipeline.run_extract().await?;
    pipeline_info!("Batch extract covered {} websites", results.len());
    print_notifications(pipeline);

    let path = pipeline.save_export().await?;
    println!("{}", path.display());
    Ok(())
}

fn print_notifications(pipeline: &mut Pipeline) {
    let now = Local::now();
    for notification in pipeline.take_notifications() {
        eprintln!(
            "{} {}: {}",
            now.format("%H:%M:%S"),
            notification.title,
            notification.message
        );
    }
}

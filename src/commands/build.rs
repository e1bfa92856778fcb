use std::path::Path;
use std::sync::Arc;

use crate::{
    BuildArgs,
    build::{Coordinator, GenerationRequest, PipelineError, PipelineState, ProjectRecord},
    commands::{interactive::Prompter, preview},
    config::Settings,
    llm::OpenAiClient,
};

pub async fn run(args: &BuildArgs, config_file: Option<&Path>) -> Result<(), anyhow::Error> {
    let settings = Settings::load(config_file)?;
    settings.validate()?;

    let interactive = args.interactive || args.description.is_none();
    let request = if interactive {
        let answers = Prompter::stdio().build_answers(args)?;
        GenerationRequest::parse(&answers.description, &answers.website_type, &answers.style)?
            .with_skip_review(answers.skip_review)
            .with_project_name(answers.name)
    } else {
        let description = args.description.as_deref().unwrap_or_default();
        GenerationRequest::parse(description, &args.website_type, &args.style)?
            .with_skip_review(args.skip_review)
            .with_project_name(args.name.clone())
    };
    request.validate()?;

    let client = Arc::new(OpenAiClient::new(&settings.llm)?);
    let skip_review = request.skip_review;
    let coordinator = Coordinator::new(client, &settings.output)?
        .with_observer(move |state| {
            if let Some(line) = progress_line(state, skip_review) {
                println!("{line}");
            }
        });
    tracing::debug!(stages = ?coordinator.stage_names(), "coordinator ready");

    println!(
        "Generating a {} website in the {} style with {}",
        request.website_type, request.style, settings.llm.model
    );

    let result = match coordinator.build_website(&request).await {
        Ok(result) => result,
        Err(PipelineError::Stage {
            stage,
            source,
            project_dir,
        }) => {
            eprintln!("Error in {stage} stage: {source}");
            eprintln!("Partial output kept in {}", project_dir.display());
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    println!("\nWebsite generated in {}", result.project_dir.display());
    print_summary(&ProjectRecord::open(&result.project_dir), result.reviewed)?;
    println!("Open {} in a browser to view it", result.index_path.display());

    let preview = args.preview
        || (interactive && Prompter::stdio().confirm("Preview the website now?", true)?);
    if preview {
        preview::serve(&result.project_dir, &settings.preview, !args.no_open).await?;
    }

    Ok(())
}

fn print_summary(project: &ProjectRecord, reviewed: bool) -> Result<(), anyhow::Error> {
    if let Some(content) = project.read_content()? {
        println!("  Headline: {}", content.hero.headline);
    }
    if let Some(design) = project.read_design()? {
        println!("  Theme:    {} / {}", design.theme.mode, design.theme.style);
    }
    if let Some(html) = project.read_artifact()? {
        let review = if reviewed { "reviewed" } else { "not reviewed" };
        println!("  Page:     {} bytes, {review}", html.len());
    }
    Ok(())
}

/// The progress line printed for a state transition, if any.
fn progress_line(state: PipelineState, skip_review: bool) -> Option<&'static str> {
    match state {
        PipelineState::Created => Some("[content] Writing website copy..."),
        PipelineState::ContentDone => Some("[design] Creating the design..."),
        PipelineState::DesignDone => Some("[code] Generating HTML, CSS and JavaScript..."),
        PipelineState::CodeDone if !skip_review => Some("[review] Reviewing and polishing..."),
        PipelineState::Complete => Some("Done."),
        _ => None,
    }
}

//! Run command implementation.
//!
//! Drives the full pipeline or a single stage and prints a summary.

use anyhow::Result;
use autodoc_ops::{
    CommentResponse, Config, DescribeResponse, DocstringResponse, NormalizeAction,
    ReadmeResponse, StageFailure, SummarizeResponse,
};
use tracing::info;

use super::{build_context, build_request, offline_context, Output, Stage};
use crate::TargetArgs;

/// Run every stage against the target directory.
pub async fn pipeline(config: Config, args: &TargetArgs, output: Output) -> Result<()> {
    let ctx = build_context(config, args)?;
    let request = build_request(args);
    info!(root = %request.root.display(), "starting documentation run");

    if output.human() {
        println!(
            "📝 Documenting {} with {}",
            request.root.display(),
            ctx.model_name()
        );
    }

    let response = ctx.run(request).await?;
    if output.emit_json(&response)? || !output.human() {
        return Ok(());
    }

    print_comment(&response.comment, output);
    print_docstrings(&response.docstrings, output);
    print_describe(&response.describe);
    print_summarize(&response.summarize);
    print_readme(&response.readme);

    println!();
    println!("✅ Documentation written to {}", response.output_root.display());
    for artifact in response.artifacts() {
        println!("   • {}", artifact.display());
    }
    if response.failure_count() > 0 {
        println!("⚠️  {} file(s) skipped, rerun with --verbose for details", response.failure_count());
    }
    Ok(())
}

/// Run a single stage against the target directory.
pub async fn stage(config: Config, args: &TargetArgs, stage: Stage, output: Output) -> Result<()> {
    let ctx = match stage {
        Stage::Describe => offline_context(config),
        _ => build_context(config, args)?,
    };
    let request = build_request(args);

    match stage {
        Stage::Comment => {
            let response = ctx.comment(&request).await?;
            if !output.emit_json(&response)? && output.human() {
                print_comment(&response, output);
            }
        }
        Stage::Docstrings => {
            let response = ctx.docstrings(&request).await?;
            if !output.emit_json(&response)? && output.human() {
                print_docstrings(&response, output);
            }
        }
        Stage::Describe => {
            let response = ctx.describe(&request)?;
            if !output.emit_json(&response)? && output.human() {
                print_describe(&response);
            }
        }
        Stage::Summarize => {
            let response = ctx.summarize(&request).await?;
            if !output.emit_json(&response)? && output.human() {
                print_summarize(&response);
            }
        }
        Stage::Readme => {
            let response = ctx.readme(&request).await?;
            if !output.emit_json(&response)? && output.human() {
                print_readme(&response);
            }
        }
    }
    Ok(())
}

fn print_comment(response: &CommentResponse, output: Output) {
    println!(
        "💬 Comments: {} rewritten, {} copied, {} fell back",
        response.count(NormalizeAction::Rewritten),
        response.count(NormalizeAction::Copied),
        response.count(NormalizeAction::FellBack)
    );
    if output.verbose {
        for outcome in &response.outcomes {
            println!(
                "   {} ({} → {:?})",
                outcome.output.display(),
                outcome.detected_style,
                outcome.action
            );
        }
    }
    print_failures(&response.failures);
}

fn print_docstrings(response: &DocstringResponse, output: Output) {
    println!(
        "📚 Docstrings: {} function(s) in {} file(s), {} placeholder(s)",
        response.functions_documented(),
        response.outcomes.iter().filter(|o| o.modified()).count(),
        response.placeholders()
    );
    if output.verbose {
        for outcome in response.outcomes.iter().filter(|o| o.modified()) {
            println!("   {}: {}", outcome.path.display(), outcome.functions.join(", "));
        }
    }
    print_failures(&response.failures);
}

fn print_describe(response: &DescribeResponse) {
    println!(
        "🌳 Directory structure: {} entries → {}",
        response.entries,
        response.path.display()
    );
}

fn print_summarize(response: &SummarizeResponse) {
    let outcome = &response.outcome;
    let failed = outcome.files.iter().filter(|f| f.is_error()).count();
    println!(
        "🧾 Summaries: {} file(s), {} failed → {}",
        outcome.files.len(),
        failed,
        outcome.job_summaries_path.display()
    );
    if outcome.directory_summary_failed {
        println!("⚠️  Directory summary failed, placeholder written");
    }
}

fn print_readme(response: &ReadmeResponse) {
    println!(
        "📖 README: {} → {}",
        humansize::format_size(response.outcome.bytes, humansize::DECIMAL),
        response.outcome.path.display()
    );
}

fn print_failures(failures: &[StageFailure]) {
    for failure in failures {
        println!("   ❌ {}: {}", failure.path.display(), failure.message);
    }
}

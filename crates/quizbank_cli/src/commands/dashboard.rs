//! Bank overview with per-paper category metrics.

use super::{AppContext, Palette};
use anyhow::Result;
use quizbank_core::{dashboard_overview, CategoryAggregate};

pub fn run(ctx: &AppContext) -> Result<()> {
    let overview = dashboard_overview(&ctx.bank());
    let palette = ctx.palette();

    println!("Total questions: {}", overview.total_questions);
    println!("Total papers:    {}", overview.total_papers);
    for paper in &overview.papers {
        println!();
        println!("{}", palette.accent(&format!("Paper {}", paper.paper_id)));
        println!("  Questions: {}", paper.command_terms.question_count);
        print_aggregate("Command terms", &paper.command_terms, &palette);
        print_aggregate("Concepts", &paper.concepts, &palette);
        print_aggregate("Content", &paper.content, &palette);
        print_aggregate("Contexts", &paper.contexts, &palette);
    }
    Ok(())
}

fn print_aggregate(heading: &str, aggregate: &CategoryAggregate, palette: &Palette) {
    println!(
        "  {heading}: total={} unique={} most common={}",
        aggregate.total,
        aggregate.unique_used,
        aggregate.most_common.as_deref().unwrap_or("-")
    );
    for (category, count) in aggregate.sorted_counts() {
        let bar = "#".repeat(count.min(40));
        println!("    {:<36} {:>4} {}", category, count, palette.muted(&bar));
    }
}

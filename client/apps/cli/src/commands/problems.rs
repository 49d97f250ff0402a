//! Catalog commands

use catalog::{AppError, Difficulty, ProblemFilter, ProblemType};
use clap::Args;
use kernel::id::ProblemId;

use crate::app::{App, print_json};

#[derive(Args)]
pub struct ListArgs {
    /// dsa, lld, hld, sql or devops
    #[arg(short = 't', long = "type", value_parser = parse_type)]
    problem_type: Option<ProblemType>,

    /// easy, medium or hard
    #[arg(short, long, value_parser = parse_difficulty)]
    difficulty: Option<Difficulty>,

    /// Substring of the title or description
    #[arg(short, long)]
    search: Option<String>,

    /// Required tag (repeatable)
    #[arg(long = "tag")]
    tags: Vec<String>,

    #[arg(long)]
    limit: Option<u32>,

    #[arg(long)]
    offset: Option<u32>,
}

impl From<ListArgs> for ProblemFilter {
    fn from(args: ListArgs) -> Self {
        ProblemFilter {
            problem_type: args.problem_type,
            difficulty: args.difficulty,
            search: args.search,
            tags: args.tags,
            limit: args.limit,
            offset: args.offset,
        }
    }
}

pub fn parse_type(value: &str) -> Result<ProblemType, String> {
    ProblemType::from_code(value).ok_or_else(|| format!("unknown problem type `{value}`"))
}

pub fn parse_difficulty(value: &str) -> Result<Difficulty, String> {
    Difficulty::from_code(value).ok_or_else(|| format!("unknown difficulty `{value}`"))
}

pub async fn list(app: &App, args: ListArgs) -> anyhow::Result<()> {
    let filter = ProblemFilter::from(args);
    app.catalog.set_filter(filter);
    let page = app.catalog.refresh().await.map_err(AppError::from)?;
    if let Some(total) = page.total {
        tracing::info!(shown = page.items.len(), total, "Problems loaded");
    }
    print_json(&page.items)
}

pub async fn show(app: &App, id: &str) -> anyhow::Result<()> {
    let problem = app
        .catalog
        .fetch_one(&ProblemId::new(id))
        .await
        .map_err(AppError::from)?;
    print_json(&problem)
}

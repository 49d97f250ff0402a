//! Problem management commands

use auth::{RouteRequirement, UserRole};
use catalog::{AppError, Difficulty, ProblemDraft, ProblemPatch, ProblemType};
use clap::Subcommand;
use kernel::id::ProblemId;
use serde_json::json;

use super::problems::{parse_difficulty, parse_type};
use crate::app::{App, print_json};

#[derive(Subcommand)]
pub enum AdminCommand {
    /// Create a problem
    CreateProblem {
        #[arg(long)]
        title: String,

        #[arg(long)]
        description: String,

        #[arg(short = 't', long = "type", value_parser = parse_type)]
        problem_type: ProblemType,

        #[arg(short, long, value_parser = parse_difficulty)]
        difficulty: Difficulty,

        #[arg(long = "tag")]
        tags: Vec<String>,

        #[arg(long)]
        company_id: Option<String>,
    },

    /// Change fields of a problem
    UpdateProblem {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(short = 't', long = "type", value_parser = parse_type)]
        problem_type: Option<ProblemType>,

        #[arg(short, long, value_parser = parse_difficulty)]
        difficulty: Option<Difficulty>,
    },

    /// Delete a problem
    DeleteProblem {
        id: String,
    },
}

pub async fn run(app: &App, command: AdminCommand) -> anyhow::Result<()> {
    app.require(RouteRequirement::role(UserRole::Admin)).await?;

    match command {
        AdminCommand::CreateProblem {
            title,
            description,
            problem_type,
            difficulty,
            tags,
            company_id,
        } => {
            let mut draft = ProblemDraft::new(title, description, problem_type, difficulty);
            draft.tags = tags.into_iter().collect();
            draft.company_id = company_id;
            let problem = app.catalog.create(&draft).await.map_err(AppError::from)?;
            print_json(&problem)
        }
        AdminCommand::UpdateProblem {
            id,
            title,
            description,
            problem_type,
            difficulty,
        } => {
            let patch = ProblemPatch {
                title,
                description,
                problem_type,
                difficulty,
                ..ProblemPatch::default()
            };
            let problem = app
                .catalog
                .update(&ProblemId::new(id), &patch)
                .await
                .map_err(AppError::from)?;
            print_json(&problem)
        }
        AdminCommand::DeleteProblem { id } => {
            app.catalog
                .delete(&ProblemId::new(id.as_str()))
                .await
                .map_err(AppError::from)?;
            print_json(&json!({ "deleted": id }))
        }
    }
}

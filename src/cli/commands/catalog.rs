//! Catalog listing and export.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use super::load_engine;
use crate::cli::display::{action_success, list_table, output, render_list, CommandOutput};
use crate::domain::models::{Catalog, Config, Question, QuestionBranch};
use crate::infrastructure::CatalogLoader;

#[derive(Args, Debug)]
pub struct CatalogArgs {
    /// Catalog asset to use instead of the configured one
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Write the catalog as a YAML asset to this file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct CatalogOutput {
    pub version: String,
    pub total: usize,
    pub questions: Vec<Question>,
}

impl From<&Catalog> for CatalogOutput {
    fn from(catalog: &Catalog) -> Self {
        Self {
            version: catalog.version().to_string(),
            total: catalog.total(),
            questions: catalog.iter().cloned().collect(),
        }
    }
}

fn branch_label(branch: QuestionBranch) -> &'static str {
    match branch {
        QuestionBranch::Always => "always",
        QuestionBranch::TypeKnown => "knows type",
        QuestionBranch::TypeUnknown => "unsure of type",
    }
}

fn answers_label(question: &Question) -> String {
    if let Some(range) = question.range {
        return format!("{} to {}", range.min, range.max);
    }
    if question.options.is_empty() {
        return "text".to_string();
    }
    format!("{} options", question.options.len())
}

impl CommandOutput for CatalogOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["#", "id", "kind", "shown when", "answers"]);
        for (i, question) in self.questions.iter().enumerate() {
            table.add_row(vec![
                (i + 1).to_string(),
                question.id.clone(),
                question.kind.as_str().to_string(),
                branch_label(question.branch).to_string(),
                answers_label(question),
            ]);
        }
        format!(
            "Catalog {}\n{}",
            self.version,
            render_list("question", &table, self.total)
        )
    }
}

pub async fn execute(args: CatalogArgs, config: &Config, json_mode: bool) -> Result<()> {
    let engine = load_engine(config, args.catalog.as_deref()).await?;

    if let Some(path) = &args.export {
        CatalogLoader::write_to_file(engine.catalog(), path).await?;
        if !json_mode {
            println!("{}", action_success(&format!("Catalog written to {}", path.display())));
            return Ok(());
        }
    }

    output(&CatalogOutput::from(engine.catalog()), json_mode);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_output_lists_every_question() {
        console::set_colors_enabled(false);
        let out = CatalogOutput::from(&Catalog::builtin());
        assert_eq!(out.total, 20);
        let text = out.to_human();
        assert!(text.contains("mbti_know"));
        assert!(text.contains("unsure of type"));
        assert!(text.contains("0 to 10"));
    }
}

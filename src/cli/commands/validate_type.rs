//! Type code validation.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::cli::display::{action_failure, action_success, output, CommandOutput};
use crate::domain::models::mbti;
use crate::domain::models::Notice;

#[derive(Args, Debug)]
pub struct ValidateTypeArgs {
    /// Code to check, e.g. INFJ (case and surrounding spaces are ignored)
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct ValidateTypeOutput {
    pub input: String,
    pub normalized: String,
    pub is_valid: bool,
}

impl CommandOutput for ValidateTypeOutput {
    fn to_human(&self) -> String {
        if self.is_valid {
            action_success(&format!("{} is a valid type", self.normalized))
        } else {
            action_failure(Notice::MbtiFormatHint.message())
        }
    }
}

pub async fn execute(args: ValidateTypeArgs, json_mode: bool) -> Result<()> {
    let validation = mbti::validate(&args.code);
    let out = ValidateTypeOutput {
        input: args.code,
        normalized: validation.normalized,
        is_valid: validation.is_valid,
    };
    output(&out, json_mode);
    Ok(())
}

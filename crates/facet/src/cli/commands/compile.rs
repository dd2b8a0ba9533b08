//! Implements `facet compile`.

use std::process::ExitCode;

use crate::cli::{args::CompileCommand, context::CommandContext, output::output_context};

/// Compiles the request and prints the committed queries.
pub fn run(ctx: &CommandContext, cmd: &CompileCommand) -> ExitCode {
    let nav = &cmd.navigation;
    let result = ctx
        .session(&nav.catalog)
        .and_then(|session| session.compile(nav));
    match result {
        Ok(context) => output_context(&context, nav.json),
        Err(code) => code,
    }
}

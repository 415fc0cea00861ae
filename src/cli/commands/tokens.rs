//! tokens command - Show how words are classified

use anyhow::Result;
use serde_json::json;

use super::load_parser;
use crate::cli::args::InputArgs;
use crate::cli::Context;
use crate::ui::output;

/// Print the token stream and lexer messages.
pub fn tokens(ctx: &Context, input: &InputArgs) -> Result<i32> {
    let parser = load_parser(ctx, input.tree.manifest.as_deref())?;
    let lexed = parser.tokenize(&input.words);

    if input.tree.json {
        let value = json!({
            "tokens": lexed.tokens,
            "messages": lexed.messages,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(0);
    }

    if lexed.tokens.is_empty() {
        output::print("(no tokens)", ctx.verbosity);
    } else {
        output::print(output::format_list(&lexed.tokens, ""), ctx.verbosity);
    }
    if !lexed.messages.is_empty() {
        output::print(output::format_list(&lexed.messages, ""), ctx.verbosity);
    }
    Ok(0)
}

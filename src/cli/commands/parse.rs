//! parse command - Show what a word sequence binds to

use anyhow::Result;

use super::load_parser;
use crate::cli::args::InputArgs;
use crate::cli::Context;
use crate::parser::ParseResult;
use crate::ui::output;

/// Parse the words and print the result.
///
/// Exit code 1 when no command resolved or an error was reported.
pub fn parse(ctx: &Context, input: &InputArgs) -> Result<i32> {
    let parser = load_parser(ctx, input.tree.manifest.as_deref())?;
    let result = parser.parse(&input.words);

    if input.tree.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        output::print(render(&result), ctx.verbosity);
    }

    let failed = !result.is_resolved() || result.has_errors();
    Ok(if failed { 1 } else { 0 })
}

fn render(result: &ParseResult) -> String {
    let command = match result.registration() {
        Some(registration) => format!(
            "command: {} -> {}",
            registration.path(),
            registration.target()
        ),
        None => "command: (none)".to_string(),
    };

    let options: Vec<String> = result
        .option_results()
        .iter()
        .map(|option| {
            let value = option
                .value()
                .map_or_else(|| "(no value)".to_string(), |v| v.to_string());
            format!(
                "{} = {} ({})",
                option.option().display_name(),
                value,
                option.source()
            )
        })
        .collect();

    let arguments: Vec<String> = result
        .argument_results()
        .iter()
        .map(|argument| format!("{}: {}", argument.position, argument.value))
        .collect();

    let directives: Vec<String> = result
        .directive_results()
        .iter()
        .map(|directive| match &directive.value {
            Some(value) => format!("{}:{}", directive.name, value),
            None => directive.name.clone(),
        })
        .collect();

    let messages: Vec<String> = result
        .message_results()
        .iter()
        .map(ToString::to_string)
        .collect();

    let sections = [
        output::section("options", &options),
        output::section("arguments", &arguments),
        output::section("directives", &directives),
        output::section("messages", &messages),
    ];
    std::iter::once(command)
        .chain(sections.into_iter().flatten())
        .collect::<Vec<_>>()
        .join("\n")
}

//! tree command - Print the command tree

use anyhow::Result;
use serde_json::{json, Value};

use super::load_catalog;
use crate::cli::args::TreeArgs;
use crate::cli::Context;
use crate::core::registration::CommandRegistration;
use crate::parser::{CommandModel, ModelNode};
use crate::ui::output;

/// Print every node of the tree, with registrations and their options.
pub fn tree(ctx: &Context, args: &TreeArgs) -> Result<i32> {
    let catalog = load_catalog(ctx, args.manifest.as_deref())?;
    let model = catalog.model()?;

    if args.json {
        let commands: Vec<Value> = model
            .registrations()
            .iter()
            .map(|r| registration_json(r))
            .collect();
        println!("{}", serde_json::to_string_pretty(&json!({ "commands": commands }))?);
        return Ok(0);
    }

    output::print(render(&model), ctx.verbosity);
    Ok(0)
}

fn registration_json(registration: &CommandRegistration) -> Value {
    let options: Vec<Value> = registration
        .options()
        .iter()
        .map(|o| {
            json!({
                "names": o.spellings(),
                "type": o.option_type().to_string(),
                "arity": o.arity().to_string(),
                "required": o.is_required(),
                "default": o.default_value(),
                "position": o.position(),
                "description": o.description(),
            })
        })
        .collect();
    let aliases: Vec<String> = registration
        .aliases()
        .iter()
        .map(|a| a.path.to_string())
        .collect();

    json!({
        "path": registration.path().to_string(),
        "description": registration.description(),
        "group": registration.group(),
        "hidden": registration.is_hidden(),
        "aliases": aliases,
        "target": registration.target().to_string(),
        "options": options,
    })
}

fn render(model: &CommandModel) -> String {
    let mut lines = Vec::new();
    for root in model.roots() {
        render_node(root, 0, &mut lines);
    }
    if lines.is_empty() {
        lines.push("(no commands)".to_string());
    }
    lines.join("\n")
}

fn render_node(node: &ModelNode, depth: usize, lines: &mut Vec<String>) {
    let pad = output::indent(depth);
    match node.registration() {
        Some(registration) => {
            let mut line = format!("{pad}{}", node.segment());
            if let Some(description) = registration.description() {
                line.push_str(&format!(" - {description}"));
            }
            if registration.is_hidden() {
                line.push_str(" (hidden)");
            }
            lines.push(line);
            for option in registration.options() {
                let mut line = format!(
                    "{pad}    {} <{}> [{}]",
                    option.spellings().join(", "),
                    option.option_type(),
                    option.arity()
                );
                if option.is_required() {
                    line.push_str(" required");
                }
                if let Some(default) = option.default_value() {
                    line.push_str(&format!(" default={default}"));
                }
                if let Some(position) = option.position() {
                    line.push_str(&format!(" position={position}"));
                }
                lines.push(line);
            }
        }
        None => lines.push(format!("{pad}{}", node.segment())),
    }
    for child in node.children() {
        render_node(child, depth + 1, lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::core::config::ParserConfig;
    use crate::core::option::{CommandOption, OptionType};
    use crate::core::registration::Target;

    #[test]
    fn renders_nested_tree() {
        let registrations = [
            CommandRegistration::builder()
                .command("root1")
                .description("first")
                .option(
                    CommandOption::builder()
                        .long("arg1")
                        .short('a')
                        .option_type(OptionType::Int)
                        .required(),
                )
                .target(Target::named("root1"))
                .build()
                .unwrap(),
            CommandRegistration::builder()
                .command("root2 sub1")
                .target(Target::named("sub1"))
                .build()
                .unwrap(),
        ];
        let model = CommandModel::build(
            registrations.into_iter().map(Arc::new),
            ParserConfig::default(),
        )
        .unwrap();

        insta::assert_snapshot!(render(&model), @r"
        root1 - first
            --arg1, -a <int> [zero-or-one] required
        root2
          sub1
        ");
    }

    #[test]
    fn empty_tree() {
        assert_eq!(render(&CommandModel::default()), "(no commands)");
    }
}

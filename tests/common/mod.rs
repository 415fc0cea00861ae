//! Shared fixtures for parser integration tests.
//!
//! The registrations cover one concern each: plain roots, nested
//! sub-commands, long and short options, required options, typed values,
//! defaults and positional slots.

#![allow(dead_code)]

use std::sync::Arc;

use cmdtree::core::config::{Feature, ParserConfig};
use cmdtree::core::option::{Arity, CommandOption, OptionType};
use cmdtree::core::registration::{CommandRegistration, RegistrationBuilder, Target};
use cmdtree::parser::{CommandModel, Parser, Token, TokenType};

// =============================================================================
// Registrations
// =============================================================================

fn command(path: &str) -> RegistrationBuilder {
    CommandRegistration::builder()
        .command(path)
        .target(Target::named(path.replace(' ', "-")))
}

fn long(name: &str) -> cmdtree::core::option::OptionBuilder {
    CommandOption::builder().long(name)
}

pub fn root1() -> CommandRegistration {
    command("root1").build().unwrap()
}

pub fn root1_up() -> CommandRegistration {
    command("ROOT1").build().unwrap()
}

pub fn root2() -> CommandRegistration {
    command("root2").build().unwrap()
}

pub fn root2_sub1() -> CommandRegistration {
    command("root2 sub1").option(long("arg1")).build().unwrap()
}

pub fn root2_sub2() -> CommandRegistration {
    command("root2 sub2").option(long("arg1")).build().unwrap()
}

pub fn root2_sub1_sub2() -> CommandRegistration {
    command("root2 sub1 sub2").option(long("arg1")).build().unwrap()
}

pub fn root2_sub1_sub3() -> CommandRegistration {
    command("root2 sub1 sub3").option(long("arg1")).build().unwrap()
}

pub fn root2_sub1_sub4() -> CommandRegistration {
    command("root2 sub1 sub4").option(long("arg1")).build().unwrap()
}

pub fn root3() -> CommandRegistration {
    command("root3").option(long("arg1")).build().unwrap()
}

pub fn root3_option_arg1_arg2() -> CommandRegistration {
    command("root3")
        .option(long("arg1"))
        .option(long("arg2"))
        .build()
        .unwrap()
}

pub fn root3_short_option_a() -> CommandRegistration {
    command("root3")
        .option(CommandOption::builder().short('a'))
        .build()
        .unwrap()
}

pub fn root3_short_option_a_b() -> CommandRegistration {
    command("root3")
        .option(CommandOption::builder().short('a'))
        .option(CommandOption::builder().short('b'))
        .build()
        .unwrap()
}

pub fn root3_short_option_a_b_required() -> CommandRegistration {
    command("root3")
        .option(CommandOption::builder().short('a').required())
        .option(CommandOption::builder().short('b').required())
        .build()
        .unwrap()
}

pub fn root4() -> CommandRegistration {
    command("root4").option(long("arg1").required()).build().unwrap()
}

pub fn root5() -> CommandRegistration {
    command("root5")
        .option(long("arg1").required())
        .option(long("arg2").required())
        .build()
        .unwrap()
}

pub fn root6_option_int() -> CommandRegistration {
    command("root6")
        .option(long("arg1").option_type(OptionType::Int).required())
        .build()
        .unwrap()
}

pub fn root6_option_int_list() -> CommandRegistration {
    command("root6")
        .option(
            long("arg1")
                .option_type(OptionType::List(Box::new(OptionType::Int)))
                .required(),
        )
        .build()
        .unwrap()
}

pub fn root6_option_default_value() -> CommandRegistration {
    command("root6")
        .option(long("arg1").default_value("defaultvalue"))
        .build()
        .unwrap()
}

pub fn root7_positional_one_arg_string() -> CommandRegistration {
    command("root7")
        .option(long("arg1").position(0))
        .build()
        .unwrap()
}

pub fn root7_positional_two_arg_string() -> CommandRegistration {
    command("root7")
        .option(long("arg1").position(0))
        .option(long("arg2").position(1))
        .build()
        .unwrap()
}

pub fn root7_positional_one_arg_string_default() -> CommandRegistration {
    command("root7")
        .option(long("arg1").default_value("arg1default").position(0))
        .build()
        .unwrap()
}

pub fn root7_positional_two_arg_string_default() -> CommandRegistration {
    command("root7")
        .option(
            long("arg1")
                .default_value("arg1default")
                .arity(Arity::ExactlyOne)
                .position(0),
        )
        .option(
            long("arg2")
                .default_value("arg2default")
                .arity(Arity::ExactlyOne)
                .position(1),
        )
        .build()
        .unwrap()
}

pub fn root7_positional_two_arg_string_default_one_nodefault() -> CommandRegistration {
    command("root7")
        .option(
            long("arg1")
                .default_value("arg1default")
                .arity(Arity::ExactlyOne)
                .position(0),
        )
        .option(
            long("arg2")
                .default_value("arg2default")
                .arity(Arity::ExactlyOne)
                .position(1),
        )
        .option(long("arg3").arity(Arity::ExactlyOne).position(2))
        .build()
        .unwrap()
}

pub fn root8_one_arg_arity_one_string() -> CommandRegistration {
    command("root8")
        .option(long("arg1").arity(Arity::ExactlyOne).position(0))
        .build()
        .unwrap()
}

// =============================================================================
// Helpers
// =============================================================================

/// Both case features off.
pub fn case_insensitive() -> ParserConfig {
    ParserConfig::default()
        .disable(Feature::CaseSensitiveCommands)
        .disable(Feature::CaseSensitiveOptions)
}

pub fn with_directives() -> ParserConfig {
    ParserConfig::default().enable(Feature::AllowDirectives)
}

pub fn model_with<I>(config: ParserConfig, registrations: I) -> CommandModel
where
    I: IntoIterator<Item = CommandRegistration>,
{
    CommandModel::build(registrations.into_iter().map(Arc::new), config).unwrap()
}

pub fn model<I>(registrations: I) -> CommandModel
where
    I: IntoIterator<Item = CommandRegistration>,
{
    model_with(ParserConfig::default(), registrations)
}

pub fn parser_with<I>(config: ParserConfig, registrations: I) -> Parser
where
    I: IntoIterator<Item = CommandRegistration>,
{
    Parser::new(Arc::new(model_with(config, registrations)))
}

pub fn parser<I>(registrations: I) -> Parser
where
    I: IntoIterator<Item = CommandRegistration>,
{
    parser_with(ParserConfig::default(), registrations)
}

pub fn token(value: &str, token_type: TokenType, position: usize) -> Token {
    Token::new(value, token_type, position)
}

/// Token types only, for compact assertions.
pub fn types(tokens: &[Token]) -> Vec<TokenType> {
    tokens.iter().map(Token::token_type).collect()
}

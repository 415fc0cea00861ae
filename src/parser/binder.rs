//! parser::binder
//!
//! Binds AST words to a registration's declared options.
//!
//! # Phases
//!
//! 1. **Named**: each option token claims the words between itself and the
//!    next option token (never past `--`), up to its arity. A repeated
//!    option keeps its last occurrence and only that occurrence's
//!    messages; words taken by earlier occurrences stay consumed.
//! 2. **Positional**: unbound options with a position take the remaining
//!    words in position order.
//! 3. **Overflow**: words left before `--` are reported once (2004).
//! 4. **Defaults**: still-unbound options with a default get it.
//! 5. **Required**: required options never bound by name, position or
//!    default are reported (2000). `--name` alone counts as bound.
//!
//! Every word not claimed by a named option also yields an
//! [`ArgumentResult`], ranked from 0 and restarting after `--`.
//!
//! # Invariants
//!
//! - Each word is bound at most once
//! - Binding never fails; problems become [`MessageResult`]s

use log::{debug, trace};

use super::ast::AstResult;
use super::convert::{convert, parse_bool, OptionValue};
use super::message::{MessageResult, ParserMessage};
use super::result::{ArgumentResult, OptionResult, ValueSource};
use crate::core::config::{Feature, ParserConfig};
use crate::core::option::{CommandOption, OptionType};
use crate::core::registration::CommandRegistration;

/// An input word available for binding.
#[derive(Debug, Clone)]
struct Word {
    value: String,
    position: usize,
    after_double_dash: bool,
}

/// Output of [`Binder::bind`].
#[derive(Debug, Clone, Default)]
pub struct Binding {
    pub option_results: Vec<OptionResult>,
    pub argument_results: Vec<ArgumentResult>,
    pub messages: Vec<MessageResult>,
}

impl Binding {
    fn is_bound(&self, option: &CommandOption) -> bool {
        self.option_results.iter().any(|r| r.option() == option)
    }

    fn report(&mut self, message: ParserMessage, position: usize) {
        trace!("binding message {} at {}", message.code(), position);
        self.messages.push(MessageResult::new(message, position));
    }
}

/// Binds words for one registration.
#[derive(Debug, Clone, Copy)]
pub struct Binder<'a> {
    registration: &'a CommandRegistration,
    config: ParserConfig,
}

impl<'a> Binder<'a> {
    pub fn new(registration: &'a CommandRegistration, config: ParserConfig) -> Self {
        Self {
            registration,
            config,
        }
    }

    pub fn bind(&self, ast: &AstResult) -> Binding {
        let mut binding = Binding::default();
        let words = collect_words(ast);
        let mut consumed = vec![false; words.len()];

        self.bind_named(ast, &words, &mut consumed, &mut binding);

        let pool: Vec<&Word> = words
            .iter()
            .zip(&consumed)
            .filter(|(_, used)| !**used)
            .map(|(word, _)| word)
            .collect();

        binding.argument_results = rank_arguments(&pool);
        let bound = self.bind_positional(&pool, &mut binding);
        report_overflow(&pool[bound..], &mut binding);

        self.bind_defaults(&mut binding);
        self.check_required(&mut binding);

        debug!(
            "bound {} option(s), {} argument(s), {} message(s) for '{}'",
            binding.option_results.len(),
            binding.argument_results.len(),
            binding.messages.len(),
            self.registration.path()
        );
        binding
    }

    fn bind_named(
        &self,
        ast: &AstResult,
        words: &[Word],
        consumed: &mut [bool],
        binding: &mut Binding,
    ) {
        let options = ast.options();
        let start = binding.messages.len();
        // Owner of each message from `start` on; `None` for unknown options
        let mut owners: Vec<Option<&'a CommandOption>> = Vec::new();

        for (i, node) in options.iter().enumerate() {
            let next_position = options.get(i + 1).map_or(usize::MAX, |n| n.position);
            let window: Vec<usize> = words
                .iter()
                .enumerate()
                .filter(|(_, w)| {
                    !w.after_double_dash && w.position > node.position && w.position < next_position
                })
                .map(|(index, _)| index)
                .collect();

            let matched = self.match_option(&node.name, node.position, binding);
            owners.resize(binding.messages.len() - start, None);

            for (option, consumes) in matched {
                // Repeated option: last occurrence wins, with its messages only
                binding.option_results.retain(|r| r.option() != option);
                drop_messages_of(option, start, &mut owners, binding);

                let available: &[usize] = if consumes { &window } else { &[] };
                let taken = take_named(option, available, words);
                for index in &available[..taken] {
                    consumed[*index] = true;
                }
                let values: Vec<&str> = available[..taken]
                    .iter()
                    .map(|index| words[*index].value.as_str())
                    .collect();
                let result = self.bind_values(
                    option,
                    &values,
                    node.position,
                    ValueSource::Named,
                    binding,
                );
                owners.resize(binding.messages.len() - start, Some(option));
                binding.option_results.push(result);
            }
        }
    }

    /// Resolve an option token to declared options, each paired with
    /// whether it may consume argument words.
    ///
    /// `--name` names one option. `-abc` names one option per letter and
    /// only its last letter consumes words. Unknown names are reported as
    /// 2001.
    fn match_option(
        &self,
        name: &str,
        position: usize,
        binding: &mut Binding,
    ) -> Vec<(&'a CommandOption, bool)> {
        let case_sensitive = self.config.is_enabled(Feature::CaseSensitiveOptions);
        let unknown = |option: String, binding: &mut Binding| {
            binding.report(ParserMessage::UnrecognisedOption { option }, position);
        };

        if let Some(long) = name.strip_prefix("--") {
            return match self.registration.find_long(long, case_sensitive) {
                Some(option) => vec![(option, true)],
                None => {
                    unknown(name.to_string(), binding);
                    Vec::new()
                }
            };
        }

        let letters: Vec<char> = name.chars().skip(1).collect();
        let mut matched = Vec::new();
        for (i, c) in letters.iter().enumerate() {
            match self.registration.find_short(*c) {
                Some(option) => matched.push((option, i + 1 == letters.len())),
                None => unknown(format!("-{c}"), binding),
            }
        }
        matched
    }

    fn bind_values(
        &self,
        option: &CommandOption,
        values: &[&str],
        position: usize,
        source: ValueSource,
        binding: &mut Binding,
    ) -> OptionResult {
        let arity = option.arity();
        if values.len() < arity.min() {
            binding.report(
                ParserMessage::NotEnoughOptionArguments {
                    option: option.primary_name(),
                    required: arity.min(),
                    available: values.len(),
                },
                position,
            );
        }

        if values.is_empty() {
            let value = option.option_type().is_bool().then_some(OptionValue::Bool(true));
            return OptionResult::new(option.clone(), value, None, source);
        }

        let raw = values.join(",");
        let value = self.convert_value(option, &raw, position, binding);
        OptionResult::new(option.clone(), Some(value), Some(raw), source)
    }

    fn convert_value(
        &self,
        option: &CommandOption,
        raw: &str,
        position: usize,
        binding: &mut Binding,
    ) -> OptionValue {
        match convert(raw, option.option_type()) {
            Ok(value) => value,
            Err(error) => {
                binding.report(
                    ParserMessage::IllegalOptionValue {
                        value: raw.to_string(),
                        reason: error.to_string(),
                    },
                    position,
                );
                OptionValue::String(raw.to_string())
            }
        }
    }

    /// Fill positional slots from `pool`. Returns how many words were used.
    fn bind_positional(&self, pool: &[&Word], binding: &mut Binding) -> usize {
        let slots: Vec<&CommandOption> = self
            .registration
            .positional_options()
            .into_iter()
            .filter(|o| !binding.is_bound(o))
            .collect();

        let mut cursor = 0;
        for (k, slot) in slots.iter().enumerate() {
            let remaining = pool.len() - cursor;
            if remaining == 0 {
                break;
            }

            let arity = slot.arity();
            let take = match arity.max() {
                Some(max) => max.min(remaining),
                None => {
                    let reserved: usize = slots[k + 1..].iter().map(|s| s.arity().min()).sum();
                    remaining
                        .saturating_sub(reserved)
                        .max(arity.min().min(remaining))
                }
            };
            if take == 0 {
                continue;
            }

            let taken = &pool[cursor..cursor + take];
            cursor += take;
            let values: Vec<&str> = taken.iter().map(|w| w.value.as_str()).collect();
            trace!("positional {} takes {:?}", slot.display_name(), values);

            let result = self.bind_values(
                slot,
                &values,
                taken[0].position,
                ValueSource::Positional,
                binding,
            );
            binding.option_results.push(result);
        }
        cursor
    }

    fn bind_defaults(&self, binding: &mut Binding) {
        for option in self.registration.options() {
            let Some(default) = option.default_value() else {
                continue;
            };
            if binding.is_bound(option) {
                continue;
            }
            let value = self.convert_value(option, default, 0, binding);
            binding.option_results.push(OptionResult::new(
                option.clone(),
                Some(value),
                Some(default.to_string()),
                ValueSource::Default,
            ));
        }
    }

    fn check_required(&self, binding: &mut Binding) {
        for option in self.registration.options() {
            if option.is_required() && !binding.is_bound(option) {
                binding.report(
                    ParserMessage::MandatoryOptionMissing {
                        option: option.display_name(),
                        description: option.description().map(str::to_string),
                    },
                    0,
                );
            }
        }
    }
}

/// Remove messages from `start` on that belong to `option`.
fn drop_messages_of<'a>(
    option: &CommandOption,
    start: usize,
    owners: &mut Vec<Option<&'a CommandOption>>,
    binding: &mut Binding,
) {
    if !owners.iter().any(|owner| *owner == Some(option)) {
        return;
    }
    let tail = binding.messages.split_off(start);
    let kept: Vec<(Option<&'a CommandOption>, MessageResult)> = owners
        .drain(..)
        .zip(tail)
        .filter(|(owner, _)| *owner != Some(option))
        .collect();
    for (owner, message) in kept {
        owners.push(owner);
        binding.messages.push(message);
    }
}

/// Number of leading window words a named option takes.
///
/// Booleans only take words that read as booleans, so `-v file` leaves
/// `file` for positional binding.
fn take_named(option: &CommandOption, window: &[usize], words: &[Word]) -> usize {
    let max = option.arity().max().unwrap_or(usize::MAX);
    let limit = max.min(window.len());
    match option.option_type() {
        OptionType::Bool => window[..limit]
            .iter()
            .take_while(|index| parse_bool(&words[**index].value).is_some())
            .count(),
        _ => limit,
    }
}

/// Nested and un-nested words, in input order.
fn collect_words(ast: &AstResult) -> Vec<Word> {
    let nested = ast.options().into_iter().filter_map(|option| {
        option.argument.as_ref().map(|arg| Word {
            value: arg.value.clone(),
            position: arg.position,
            after_double_dash: false,
        })
    });
    let free = ast.arguments.iter().map(|arg| Word {
        value: arg.value.clone(),
        position: arg.position,
        after_double_dash: arg.after_double_dash,
    });

    let mut words: Vec<Word> = nested.chain(free).collect();
    words.sort_by_key(|w| w.position);
    words
}

fn rank_arguments(pool: &[&Word]) -> Vec<ArgumentResult> {
    let mut before = 0;
    let mut after = 0;
    pool.iter()
        .map(|word| {
            let rank = if word.after_double_dash {
                &mut after
            } else {
                &mut before
            };
            let position = *rank;
            *rank += 1;
            ArgumentResult {
                value: word.value.clone(),
                position,
            }
        })
        .collect()
}

fn report_overflow(leftover: &[&Word], binding: &mut Binding) {
    let extra: Vec<&&Word> = leftover.iter().filter(|w| !w.after_double_dash).collect();
    if let Some(first) = extra.first() {
        let words: Vec<&str> = extra.iter().map(|w| w.value.as_str()).collect();
        binding.report(
            ParserMessage::TooManyArguments {
                words: words.join(" "),
            },
            first.position,
        );
    }
}

// SPDX-FileCopyrightText: 2026 Memlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Slash-command definitions and option parsing.

use serenity::all::{CommandDataOption, CommandOptionType, CreateCommand, CreateCommandOption};

/// A parsed slash-command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    Log { text: String },
    Search { query: String },
    Ask { question: String },
    Stats,
    Help,
}

impl SlashCommand {
    /// Parse a command from its name and the interaction's options.
    pub fn from_interaction(name: &str, options: &[CommandDataOption]) -> Option<Self> {
        Self::parse(name, |option| string_option(options, option))
    }

    /// Parse a command by name, reading string options through `option`.
    /// Unknown names and missing required options yield `None`.
    pub fn parse(name: &str, option: impl Fn(&str) -> Option<String>) -> Option<Self> {
        match name {
            "log" => option("text").map(|text| Self::Log { text }),
            "search" => option("query").map(|query| Self::Search { query }),
            "ask" => option("question").map(|question| Self::Ask { question }),
            "stats" => Some(Self::Stats),
            "help" => Some(Self::Help),
            _ => None,
        }
    }
}

fn string_option(options: &[CommandDataOption], name: &str) -> Option<String> {
    options
        .iter()
        .find(|option| option.name == name)
        .and_then(|option| option.value.as_str())
        .map(str::to_string)
}

/// The command set registered with Discord.
pub fn definitions() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new("log")
            .description("Save a memory to your personal knowledge base")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "text",
                    "What do you want to remember?",
                )
                .required(true),
            ),
        CreateCommand::new("search")
            .description("Search your memories by keyword")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "query",
                    "What are you looking for?",
                )
                .required(true),
            ),
        CreateCommand::new("ask")
            .description("Ask a question about your memories")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "question",
                    "What would you like to know?",
                )
                .required(true),
            ),
        CreateCommand::new("stats").description("Show your memory statistics"),
        CreateCommand::new("help").description("Learn how to use memlog"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option<'a>(name: &'a str, value: &'a str) -> impl Fn(&str) -> Option<String> + 'a {
        move |wanted| (wanted == name).then(|| value.to_string())
    }

    fn none(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn parses_commands_with_options() {
        assert_eq!(
            SlashCommand::parse("log", option("text", "buy milk")),
            Some(SlashCommand::Log {
                text: "buy milk".into()
            })
        );
        assert_eq!(
            SlashCommand::parse("search", option("query", "milk")),
            Some(SlashCommand::Search {
                query: "milk".into()
            })
        );
        assert_eq!(
            SlashCommand::parse("ask", option("question", "what to buy?")),
            Some(SlashCommand::Ask {
                question: "what to buy?".into()
            })
        );
        assert_eq!(SlashCommand::parse("stats", none), Some(SlashCommand::Stats));
        assert_eq!(SlashCommand::parse("help", none), Some(SlashCommand::Help));
    }

    #[test]
    fn missing_option_or_unknown_name_is_none() {
        assert_eq!(SlashCommand::parse("log", none), None);
        assert_eq!(SlashCommand::parse("log", option("query", "x")), None);
        assert_eq!(SlashCommand::parse("forget", none), None);
    }

    #[test]
    fn registers_five_commands() {
        assert_eq!(definitions().len(), 5);
    }
}

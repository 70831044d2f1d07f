// SPDX-FileCopyrightText: 2026 Memlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reply text for slash commands.

use memlog_core::MemlogError;
use memlog_recall::{LogReceipt, SearchEntry, Stats};

/// Discord's per-message character limit.
pub const MESSAGE_LIMIT: usize = 2000;

/// Snippet length shown per search result before it is cut.
pub const SNIPPET_DISPLAY_CHARS: usize = 150;

const ELLIPSIS: &str = "...";

/// Cut `text` to the Discord message limit, marking the cut with `...`.
pub fn truncate_reply(text: &str) -> String {
    if text.chars().count() <= MESSAGE_LIMIT {
        return text.to_string();
    }
    let kept: String = text.chars().take(MESSAGE_LIMIT - ELLIPSIS.len()).collect();
    kept + ELLIPSIS
}

fn shorten_snippet(snippet: &str) -> String {
    match snippet.char_indices().nth(SNIPPET_DISPLAY_CHARS) {
        Some((end, _)) => format!("{}{ELLIPSIS}", &snippet[..end]),
        None => snippet.to_string(),
    }
}

pub fn log_reply(receipt: &LogReceipt) -> String {
    format!(
        "Logged! (#{})\nYou now have **{}** memories stored.",
        receipt.id, receipt.total
    )
}

pub fn search_reply(query: &str, entries: &[SearchEntry]) -> String {
    if entries.is_empty() {
        return format!(
            "No memories found matching **{query}**.\n\
             Try different keywords or use `/log` to store some memories first."
        );
    }

    let mut sections = Vec::with_capacity(entries.len() + 1);
    sections.push(format!(
        "**Found {} memories matching \"{query}\":**\n",
        entries.len()
    ));
    for entry in entries {
        sections.push(format!(
            "**#{}** ({})\n> {}\n",
            entry.id,
            entry.local_date,
            shorten_snippet(&entry.snippet)
        ));
    }
    truncate_reply(&sections.join("\n"))
}

pub fn stats_reply(stats: &Stats) -> String {
    match &stats.last_entry {
        Some(last) => format!(
            "**Your Memory Stats**\n\nTotal memories: **{}**\nLast entry: {last}\n\n\
             Use `/log` to add more memories!",
            stats.total
        ),
        None => format!(
            "**Your Memory Stats**\n\nTotal memories: **{}**\n\n\
             Get started with `/log` to save your first memory!",
            stats.total
        ),
    }
}

/// Reply to `/ask` failures; configuration problems get their own wording.
pub fn ask_error_reply(err: &MemlogError) -> String {
    match err {
        MemlogError::Config(detail) => format!("Configuration error: {detail}"),
        other => failure_reply("answer", other),
    }
}

/// `Failed to <action>: <error>`.
pub fn failure_reply(action: &str, err: &MemlogError) -> String {
    truncate_reply(&format!("Failed to {action}: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i64, snippet: &str) -> SearchEntry {
        SearchEntry {
            id,
            local_date: "2026-03-01 09:15".into(),
            snippet: snippet.into(),
        }
    }

    #[test]
    fn short_replies_are_untouched() {
        assert_eq!(truncate_reply("hello"), "hello");
        let exact = "x".repeat(MESSAGE_LIMIT);
        assert_eq!(truncate_reply(&exact), exact);
    }

    #[test]
    fn long_replies_are_cut_to_the_limit() {
        let long = "é".repeat(MESSAGE_LIMIT + 10);
        let cut = truncate_reply(&long);
        assert_eq!(cut.chars().count(), MESSAGE_LIMIT);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn log_reply_shows_id_and_total() {
        let reply = log_reply(&LogReceipt { id: 42, total: 7 });
        assert_eq!(reply, "Logged! (#42)\nYou now have **7** memories stored.");
    }

    #[test]
    fn search_reply_lists_entries() {
        let reply = search_reply("budget", &[entry(3, "the **budget** is due"), entry(1, "old budget")]);
        assert_eq!(
            reply,
            "**Found 2 memories matching \"budget\":**\n\n\
             **#3** (2026-03-01 09:15)\n> the **budget** is due\n\n\
             **#1** (2026-03-01 09:15)\n> old budget\n"
        );
    }

    #[test]
    fn search_reply_shortens_long_snippets() {
        let reply = search_reply("x", &[entry(1, &"a".repeat(180))]);
        assert!(reply.contains(&format!("> {}...\n", "a".repeat(SNIPPET_DISPLAY_CHARS))));
    }

    #[test]
    fn empty_search_suggests_logging() {
        let reply = search_reply("zebra", &[]);
        assert!(reply.starts_with("No memories found matching **zebra**."));
        assert!(reply.contains("`/log`"));
    }

    #[test]
    fn stats_reply_variants() {
        let with_entry = stats_reply(&Stats {
            total: 3,
            last_entry: Some("2026-03-01 09:15".into()),
        });
        assert!(with_entry.contains("Total memories: **3**\nLast entry: 2026-03-01 09:15"));

        let empty = stats_reply(&Stats {
            total: 0,
            last_entry: None,
        });
        assert!(empty.contains("Get started with `/log`"));
        assert!(!empty.contains("Last entry"));
    }

    #[test]
    fn ask_errors_distinguish_configuration() {
        let config = ask_error_reply(&MemlogError::Config("no key".into()));
        assert_eq!(config, "Configuration error: no key");

        let provider = ask_error_reply(&MemlogError::Provider {
            message: "overloaded".into(),
            source: None,
        });
        assert_eq!(provider, "Failed to answer: provider error: overloaded");
    }
}

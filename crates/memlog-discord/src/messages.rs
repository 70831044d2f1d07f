// SPDX-FileCopyrightText: 2026 Memlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static text shown to Discord users.

/// Reply to `/help`.
pub const HELP_TEXT: &str = "\
**Memlog - Your Personal Knowledge Base**

Store anything, search it later, ask questions about it.

**Commands:**

`/log <text>`
Save a memory. Thoughts, notes, tasks, anything.
> Example: `/log Met with Sarah about Q1 planning. Action: send budget by Friday`

`/search <query>`
Find memories by keyword. Shows the top 5 matches with their IDs.
> Example: `/search budget meeting`

`/ask <question>`
Get an AI-written answer based on your memories.
> Example: `/ask What did Sarah and I discuss about Q1?`

`/stats`
Show how many memories are stored and when the last one was added.

`/help`
Show this message.

**Tips:**
- Log often; short notes are fine
- Include dates, names and context for better recall
- Use /search to find specific entries and /ask for summaries
";

/// Direct message sent to members joining a guild.
pub const ONBOARDING_DM: &str = "\
Hey! I'm **Memlog**, your personal knowledge base.

I store your notes and let you search them or ask questions about them later.

**Quick start:**
1. Go to any channel where I'm active
2. Type `/log Had coffee with Alex, discussed the new project timeline`
3. Later, use `/search Alex` or `/ask What did Alex and I talk about?`

**Commands:**
- `/log <text>` - Save a memory
- `/search <query>` - Find by keyword
- `/ask <question>` - AI-powered Q&A over your memories
- `/help` - Full help

Start logging and I'll help you remember.
";

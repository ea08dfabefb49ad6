//! Admin command parser and executor.
//!
//! Question fields are pipe-separated so texts can contain spaces:
//! `addq Math | What is 7 * 8? | 54 | 56 | 58 | 63 | 1 | 8 | 7*8=56`.

use crate::models::{NUM_OPTIONS, Question};

use super::AdminConsole;

const OPTION_LABELS: [char; 4] = ['A', 'B', 'C', 'D'];

/// Result of executing a command.
pub enum CommandResult {
    /// Command executed successfully with optional output.
    Ok(Option<String>),
    /// Command failed with an error message.
    Error(String),
    /// The console should close.
    Quit,
}

/// Parse and execute a command line.
pub fn execute_command(console: &mut AdminConsole, input: &str) -> CommandResult {
    let input = input.trim();
    if input.is_empty() {
        return CommandResult::Ok(None);
    }

    let (command, rest) = input.split_once(char::is_whitespace).unwrap_or((input, ""));
    let command = command.to_lowercase();
    let rest = rest.trim();

    match command.as_str() {
        "categories" => cmd_categories(console),
        "questions" => cmd_questions(console, rest),
        "addcat" => cmd_addcat(console, rest),
        "delcat" => cmd_delcat(console, rest),
        "addq" => cmd_addq(console, rest),
        "editq" => cmd_editq(console, rest),
        "delq" => cmd_delq(console, rest),
        "scores" => cmd_scores(console, rest),
        "rmscore" => cmd_rmscore(console, rest),
        "purge" => cmd_purge(console),
        "help" | "?" => cmd_help(),
        "quit" | "exit" => CommandResult::Quit,
        _ => CommandResult::Error(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            command
        )),
    }
}

fn cmd_categories(console: &AdminConsole) -> CommandResult {
    let categories = console.bank.categories();
    if categories.is_empty() {
        return CommandResult::Ok(Some("No categories in the bank.".to_string()));
    }
    let lines: Vec<String> = categories
        .iter()
        .map(|name| format!("{} ({} questions)", name, console.bank.questions(name).len()))
        .collect();
    CommandResult::Ok(Some(lines.join("\n")))
}

fn cmd_questions(console: &AdminConsole, category: &str) -> CommandResult {
    if category.is_empty() {
        return CommandResult::Error("Usage: questions <category>".to_string());
    }
    if !console.bank.contains(category) {
        return CommandResult::Error(format!("No such category: {}", category));
    }
    let questions = console.bank.questions(category);
    if questions.is_empty() {
        return CommandResult::Ok(Some(format!("{} has no questions yet.", category)));
    }
    let lines: Vec<String> = questions
        .iter()
        .enumerate()
        .map(|(i, q)| {
            format!(
                "{}. {} [correct: {}, {} pts]",
                i, q.text, OPTION_LABELS[q.correct_index], q.points
            )
        })
        .collect();
    CommandResult::Ok(Some(lines.join("\n")))
}

fn cmd_addcat(console: &mut AdminConsole, name: &str) -> CommandResult {
    match console.bank.add_category(name) {
        Ok(()) => CommandResult::Ok(Some(format!("Added category {}.", name.trim()))),
        Err(err) => CommandResult::Error(err.to_string()),
    }
}

fn cmd_delcat(console: &mut AdminConsole, name: &str) -> CommandResult {
    match console.bank.delete_category(name) {
        Ok(()) => CommandResult::Ok(Some(format!(
            "Deleted category {} and all its questions.",
            name
        ))),
        Err(err) => CommandResult::Error(err.to_string()),
    }
}

fn cmd_addq(console: &mut AdminConsole, rest: &str) -> CommandResult {
    let pieces: Vec<&str> = rest.split('|').map(str::trim).collect();
    if pieces.len() < 2 {
        return CommandResult::Error(
            "Usage: addq <category> | <text> | <A> | <B> | <C> | <D> | <correct 0-3> | [points] | [hint]"
                .to_string(),
        );
    }
    let category = pieces[0];
    let question = match parse_question(&pieces[1..]) {
        Ok(q) => q,
        Err(msg) => return CommandResult::Error(msg),
    };
    match console.bank.add_question(category, question) {
        Ok(()) => CommandResult::Ok(Some(format!("Question added to {}.", category))),
        Err(err) => CommandResult::Error(err.to_string()),
    }
}

fn cmd_editq(console: &mut AdminConsole, rest: &str) -> CommandResult {
    let pieces: Vec<&str> = rest.split('|').map(str::trim).collect();
    let usage = "Usage: editq <category> <index> | <text> | <A> | <B> | <C> | <D> | <correct 0-3> | [points] | [hint]";
    if pieces.len() < 2 {
        return CommandResult::Error(usage.to_string());
    }
    let Some((category, index)) = pieces[0].rsplit_once(' ') else {
        return CommandResult::Error(usage.to_string());
    };
    let Ok(index) = index.trim().parse::<usize>() else {
        return CommandResult::Error(usage.to_string());
    };
    let question = match parse_question(&pieces[1..]) {
        Ok(q) => q,
        Err(msg) => return CommandResult::Error(msg),
    };
    match console.bank.edit_question(category.trim(), index, question) {
        Ok(()) => CommandResult::Ok(Some(format!(
            "Question {} in {} updated.",
            index,
            category.trim()
        ))),
        Err(err) => CommandResult::Error(err.to_string()),
    }
}

fn cmd_delq(console: &mut AdminConsole, rest: &str) -> CommandResult {
    let usage = "Usage: delq <category> <index>";
    let Some((category, index)) = rest.rsplit_once(' ') else {
        return CommandResult::Error(usage.to_string());
    };
    let Ok(index) = index.trim().parse::<usize>() else {
        return CommandResult::Error(usage.to_string());
    };
    match console.bank.delete_question(category.trim(), index) {
        Ok(removed) => CommandResult::Ok(Some(format!("Deleted question: {}", removed.text))),
        Err(err) => CommandResult::Error(err.to_string()),
    }
}

fn cmd_scores(console: &AdminConsole, filter: &str) -> CommandResult {
    let filter = filter.to_lowercase();
    let rows: Vec<String> = console
        .scores
        .list()
        .iter()
        .filter(|e| {
            filter.is_empty()
                || e.user_id.to_lowercase().contains(&filter)
                || e.name.to_lowercase().contains(&filter)
        })
        .map(|e| {
            format!(
                "{:<12} {:<16} {:<12} {:>5}",
                e.user_id, e.name, e.category, e.score
            )
        })
        .collect();

    if rows.is_empty() {
        return CommandResult::Ok(Some("No matching scores.".to_string()));
    }
    let header = format!(
        "{:<12} {:<16} {:<12} {:>5}",
        "User ID", "Name", "Category", "Score"
    );
    CommandResult::Ok(Some(format!("{}\n{}", header, rows.join("\n"))))
}

/// Remove a user's score for a category and re-open the completion gate
/// so the category can be retaken.
fn cmd_rmscore(console: &mut AdminConsole, rest: &str) -> CommandResult {
    let Some((user_id, category)) = rest.split_once(char::is_whitespace) else {
        return CommandResult::Error("Usage: rmscore <userId> <category>".to_string());
    };
    let category = category.trim();

    let removed = match console.scores.remove(user_id, category) {
        Ok(n) => n,
        Err(err) => return CommandResult::Error(err.to_string()),
    };
    if removed == 0 {
        return CommandResult::Ok(Some(format!(
            "No score found for {} in {}.",
            user_id, category
        )));
    }
    if let Err(err) = console.completion.unmark(user_id, category) {
        return CommandResult::Error(err.to_string());
    }
    CommandResult::Ok(Some(format!(
        "Removed {} score(s); {} may retake {}.",
        removed, user_id, category
    )))
}

fn cmd_purge(console: &mut AdminConsole) -> CommandResult {
    match console.scores.purge_invalid() {
        Ok(0) => CommandResult::Ok(Some("No invalid score entries found.".to_string())),
        Ok(n) => CommandResult::Ok(Some(format!("Purged {} invalid score entries.", n))),
        Err(err) => CommandResult::Error(err.to_string()),
    }
}

fn cmd_help() -> CommandResult {
    let help = "\
Available commands:
  categories                 List categories and question counts
  questions <category>       List a category's questions
  addcat <name>              Create an empty category
  delcat <name>              Delete a category and its questions
  addq <cat> | <text> | <A> | <B> | <C> | <D> | <correct> | [pts] | [hint]
  editq <cat> <idx> | ...    Replace a question in place
  delq <cat> <idx>           Delete a question
  scores [filter]            Show recorded scores (filter by id/name)
  rmscore <userId> <cat>     Remove a score and re-open the category
  purge                      Drop invalid score entries
  quit                       Close the console";
    CommandResult::Ok(Some(help.to_string()))
}

/// Build a question from `text | A | B | C | D | correct | [points] | [hint]`.
fn parse_question(fields: &[&str]) -> Result<Question, String> {
    if fields.len() < NUM_OPTIONS + 2 {
        return Err("expected at least text, four options and a correct index".to_string());
    }

    let text = fields[0].to_string();
    let options: [String; NUM_OPTIONS] = [
        fields[1].to_string(),
        fields[2].to_string(),
        fields[3].to_string(),
        fields[4].to_string(),
    ];
    let correct_index = fields[5]
        .parse::<usize>()
        .map_err(|_| "correct index must be a number between 0 and 3".to_string())?;
    let points = match fields.get(6) {
        None => 10,
        Some(raw) if raw.is_empty() => 10,
        Some(raw) => raw
            .parse::<u32>()
            .map_err(|_| "points must be a positive number".to_string())?,
    };
    let hint = fields
        .get(7)
        .filter(|raw| !raw.is_empty())
        .map(|raw| raw.to_string());

    let question = Question {
        text,
        options,
        correct_index,
        points,
        hint,
    };
    question.validate().map_err(str::to_string)?;
    Ok(question)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScoreEntry;
    use crate::store::{CompletionTracker, QuestionBank, ScoreStore};

    fn console() -> AdminConsole {
        AdminConsole::new(
            QuestionBank::in_memory(),
            ScoreStore::in_memory(),
            CompletionTracker::in_memory(),
        )
    }

    fn output(result: CommandResult) -> String {
        match result {
            CommandResult::Ok(Some(msg)) => msg,
            CommandResult::Ok(None) => String::new(),
            CommandResult::Error(msg) => panic!("command failed: {}", msg),
            CommandResult::Quit => panic!("unexpected quit"),
        }
    }

    #[test]
    fn test_category_lifecycle_via_commands() {
        let mut console = console();
        output(execute_command(&mut console, "addcat History"));
        assert!(console.bank.contains("History"));

        assert!(matches!(
            execute_command(&mut console, "addcat History"),
            CommandResult::Error(_)
        ));

        output(execute_command(&mut console, "delcat History"));
        assert!(!console.bank.contains("History"));
    }

    #[test]
    fn test_addq_parses_pipe_separated_fields() {
        let mut console = console();
        output(execute_command(
            &mut console,
            "addq Math | What is 6 * 7? | 40 | 41 | 42 | 43 | 2 | 9 | The answer to everything.",
        ));

        let added = console.bank.questions("Math").last().unwrap();
        assert_eq!(added.text, "What is 6 * 7?");
        assert_eq!(added.correct_index, 2);
        assert_eq!(added.points, 9);
        assert_eq!(added.hint.as_deref(), Some("The answer to everything."));
    }

    #[test]
    fn test_addq_defaults_points_and_hint() {
        let mut console = console();
        output(execute_command(
            &mut console,
            "addq Math | q | a | b | c | d | 0",
        ));
        let added = console.bank.questions("Math").last().unwrap();
        assert_eq!(added.points, 10);
        assert_eq!(added.hint, None);
    }

    #[test]
    fn test_addq_rejects_bad_correct_index() {
        let mut console = console();
        assert!(matches!(
            execute_command(&mut console, "addq Math | q | a | b | c | d | 5"),
            CommandResult::Error(_)
        ));
        assert_eq!(console.bank.questions("Math").len(), 1);
    }

    #[test]
    fn test_editq_and_delq_address_by_index() {
        let mut console = console();
        output(execute_command(
            &mut console,
            "editq General 0 | Edited? | a | b | c | d | 1 | 5",
        ));
        assert_eq!(console.bank.questions("General")[0].text, "Edited?");

        output(execute_command(&mut console, "delq General 0"));
        assert_eq!(console.bank.questions("General").len(), 1);

        assert!(matches!(
            execute_command(&mut console, "delq General 9"),
            CommandResult::Error(_)
        ));
    }

    #[test]
    fn test_rmscore_also_reopens_the_gate() {
        let mut console = console();
        console
            .scores
            .record(ScoreEntry::new("1234567890", "Devi", 8, "Math"))
            .unwrap();
        console.completion.mark_attempted("1234567890", "Math").unwrap();

        output(execute_command(&mut console, "rmscore 1234567890 Math"));
        assert!(console.scores.list().is_empty());
        assert!(!console.completion.has_attempted("1234567890", "Math"));
    }

    #[test]
    fn test_scores_filter_matches_id_or_name() {
        let mut console = console();
        console
            .scores
            .record(ScoreEntry::new("111", "Alice", 10, "Math"))
            .unwrap();
        console
            .scores
            .record(ScoreEntry::new("222", "Bob", 20, "Math"))
            .unwrap();

        let table = output(execute_command(&mut console, "scores alice"));
        assert!(table.contains("Alice"));
        assert!(!table.contains("Bob"));

        let table = output(execute_command(&mut console, "scores 222"));
        assert!(table.contains("Bob"));
    }

    #[test]
    fn test_unknown_command_is_reported() {
        let mut console = console();
        assert!(matches!(
            execute_command(&mut console, "frobnicate"),
            CommandResult::Error(_)
        ));
    }

    #[test]
    fn test_quit_closes_the_console() {
        let mut console = console();
        assert!(matches!(
            execute_command(&mut console, "quit"),
            CommandResult::Quit
        ));
        console.command_input = "exit".to_string();
        console.submit();
        assert!(console.should_quit);
    }
}

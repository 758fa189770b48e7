//! SQL text helpers used by the SQL executors.

use std::sync::OnceLock;

fn comment_pattern() -> &'static regex::Regex {
    static PATTERN: OnceLock<regex::Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        regex::Regex::new(
            r#"(?xs)
            '(?:[^']|'')*'
            | "(?:[^"]|"")*"
            | /\*.*?\*/
            | --[^\n]*
            "#,
        )
        .expect("Invalid SQL comment pattern")
    })
}

/// Removes `--` line comments and `/* */` block comments.
///
/// Quoted strings and identifiers are left untouched, so `'--'` survives.
/// Block comments become a single space to keep adjacent tokens apart.
pub fn strip_sql_comments(sql: &str) -> String {
    comment_pattern()
        .replace_all(sql, |caps: &regex::Captures<'_>| {
            let matched = &caps[0];
            if matched.starts_with('\'') || matched.starts_with('"') {
                matched.to_string()
            } else if matched.starts_with("/*") {
                " ".to_string()
            } else {
                String::new()
            }
        })
        .into_owned()
}

fn first_keyword(query: &str) -> String {
    query
        .trim_start()
        .split(|c: char| c.is_whitespace() || c == '(' || c == ';')
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Verb of the statement, lower-cased.
///
/// For `WITH` statements this is the first `select`, `insert`, `update` or
/// `delete` after the common table expressions, outside parentheses and
/// quotes. A `WITH` with none of those stays `with`.
fn main_keyword(query: &str) -> String {
    let first = first_keyword(query);
    if first != "with" {
        return first;
    }

    top_level_words(query)
        .into_iter()
        .find(|word| matches!(word.as_str(), "select" | "insert" | "update" | "delete"))
        .unwrap_or(first)
}

fn top_level_words(query: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut word = String::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    for c in query.chars() {
        let in_word = quote.is_none() && depth == 0 && (c.is_alphanumeric() || c == '_');
        if in_word {
            word.push(c.to_ascii_lowercase());
            continue;
        }
        if !word.is_empty() {
            words.push(std::mem::take(&mut word));
        }
        match (quote, c) {
            (None, '\'' | '"' | '`') => quote = Some(c),
            (Some(open), _) if open == c => quote = None,
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    if !word.is_empty() {
        words.push(word);
    }

    words
}

/// True when the statement reads rows: `SELECT`, or a `WITH` whose main
/// statement is a `SELECT`. Case-insensitive.
pub fn is_select_query(query: &str) -> bool {
    main_keyword(query) == "select"
}

/// True for statements that report an affected-row count, including `WITH`
/// statements whose main statement is one of them.
pub fn is_insert_update_or_delete(query: &str) -> bool {
    matches!(
        main_keyword(query).as_str(),
        "insert" | "update" | "delete"
    )
}

/// Splits query text on `;` outside quotes.
///
/// Statements are trimmed and blank ones are dropped.
pub fn split_queries(queries: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for c in queries.chars() {
        match (quote, c) {
            (None, ';') => {
                push_statement(&mut statements, &current);
                current.clear();
                continue;
            }
            (None, '\'' | '"' | '`') => quote = Some(c),
            (Some(open), _) if open == c => quote = None,
            _ => {}
        }
        current.push(c);
    }
    push_statement(&mut statements, &current);

    statements
}

fn push_statement(statements: &mut Vec<String>, statement: &str) {
    let trimmed = statement.trim();
    if !trimmed.is_empty() {
        statements.push(trimmed.to_string());
    }
}

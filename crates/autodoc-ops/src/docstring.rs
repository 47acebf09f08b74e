//! Docstring insertion for Python functions.
//!
//! Functions without a docstring are located with tree-sitter, the model
//! writes one per function, and the results are spliced back into the source
//! bottom-up so earlier line numbers stay valid.

use std::path::{Path, PathBuf};

use autodoc_core::text::{indent_block, normalize_docstring};
use autodoc_core::{FunctionRecord, DOCSTRING_PLACEHOLDER};
use autodoc_llm::ModelClient;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use tree_sitter::{Language, Node, Parser};

use crate::error::{DocError, DocResult};
use crate::prompts;

/// Result of documenting one file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocstringOutcome {
    pub path: PathBuf,
    /// Functions that had no docstring.
    pub functions: Vec<String>,
    /// Docstrings produced by the model.
    pub generated: usize,
    /// Placeholders used because the model call failed.
    pub placeholders: usize,
}

impl DocstringOutcome {
    pub fn modified(&self) -> bool {
        !self.functions.is_empty()
    }
}

/// Find every function definition in `source` that lacks a docstring.
///
/// Records are ordered by starting line. Functions whose body begins on the
/// header line have nowhere to put a docstring and are skipped.
pub fn extract_functions_missing_docstrings(source: &str) -> DocResult<Vec<FunctionRecord>> {
    let mut parser = Parser::new();
    let language: Language = tree_sitter_python::LANGUAGE.into();
    parser.set_language(&language)?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| DocError::with_context("tree-sitter", "parser returned no tree"))?;
    let root = tree.root_node();
    if root.has_error() {
        return Err(DocError::Syntax {
            line: first_error_line(root),
        });
    }

    let lines: Vec<&str> = source.lines().collect();
    let mut records = Vec::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.kind() == "function_definition" {
            if let Some(record) = missing_docstring(node, source, &lines) {
                records.push(record);
            }
        }
        let mut cursor = node.walk();
        stack.extend(node.named_children(&mut cursor));
    }

    records.sort_by_key(|r| r.start_line);
    Ok(records)
}

fn missing_docstring(function: Node, source: &str, lines: &[&str]) -> Option<FunctionRecord> {
    let body = function.child_by_field_name("body")?;
    let mut cursor = body.walk();
    let first = body
        .named_children(&mut cursor)
        .find(|stmt| stmt.kind() != "comment")?;

    if is_docstring(first, source) {
        return None;
    }

    let name = function
        .child_by_field_name("name")
        .and_then(|n| n.utf8_text(source.as_bytes()).ok())
        .unwrap_or("<anonymous>")
        .to_string();

    let body_row = first.start_position().row;
    let body_text = lines.get(body_row)?;
    let before_body = body_text.get(..first.start_position().column)?;
    if !before_body.trim().is_empty() {
        debug!(function = %name, line = body_row + 1, "body shares the header line, skipping");
        return None;
    }

    let start_row = function.start_position().row;
    let end_row = function.end_position().row.min(lines.len().saturating_sub(1));
    let indent = &body_text[..body_text.len() - body_text.trim_start_matches([' ', '\t']).len()];

    Some(FunctionRecord {
        name,
        start_line: start_row + 1,
        end_line: end_row + 1,
        body_line: body_row + 1,
        indent: indent.to_string(),
        source: lines[start_row..=end_row].join("\n"),
    })
}

/// A body statement counts as a docstring when it is a bare string literal.
/// Byte strings and f-strings do not.
fn is_docstring(statement: Node, source: &str) -> bool {
    if statement.kind() != "expression_statement" {
        return false;
    }
    let mut cursor = statement.walk();
    let children: Vec<Node> = statement.named_children(&mut cursor).collect();
    let [expr] = children.as_slice() else {
        return false;
    };
    if !matches!(expr.kind(), "string" | "concatenated_string") {
        return false;
    }

    let text = expr.utf8_text(source.as_bytes()).unwrap_or_default();
    let prefix: String = text
        .chars()
        .take_while(|c| *c != '"' && *c != '\'')
        .collect::<String>()
        .to_lowercase();
    !prefix.contains('f') && !prefix.contains('b')
}

fn first_error_line(root: Node) -> usize {
    let mut first = usize::MAX;
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            first = first.min(node.start_position().row + 1);
            continue;
        }
        if node.has_error() {
            let mut cursor = node.walk();
            stack.extend(node.children(&mut cursor));
        }
    }
    if first == usize::MAX {
        1
    } else {
        first
    }
}

/// Splice `docstrings` into `source` before each record's body line.
///
/// Records are applied from the highest body line down, so each insertion
/// leaves the line numbers of the remaining records untouched. Line endings
/// and a trailing newline are preserved.
pub fn insert_docstrings(source: &str, records: &[FunctionRecord], docstrings: &[String]) -> String {
    let newline = if source.contains("\r\n") { "\r\n" } else { "\n" };
    let mut lines: Vec<String> = source.lines().map(str::to_string).collect();

    let mut pairs: Vec<(&FunctionRecord, &String)> = records.iter().zip(docstrings).collect();
    pairs.sort_by(|a, b| b.0.body_line.cmp(&a.0.body_line));

    for (record, docstring) in pairs {
        let at = record.body_line.saturating_sub(1).min(lines.len());
        let block = indent_block(docstring, &record.indent);
        lines.splice(at..at, block);
    }

    let mut output = lines.join(newline);
    if source.ends_with('\n') {
        output.push_str(newline);
    }
    output
}

/// Ask the model for a docstring, normalized to a bare triple-quoted string.
pub async fn suggest_docstring(
    client: &dyn ModelClient,
    record: &FunctionRecord,
) -> DocResult<String> {
    let reply = client.complete(&prompts::docstring(&record.source)).await?;
    Ok(normalize_docstring(&reply))
}

/// Add docstrings to every undocumented function in `path`, in place.
///
/// Files without undocumented functions are not rewritten.
pub async fn document_file(client: &dyn ModelClient, path: &Path) -> DocResult<DocstringOutcome> {
    let source = std::fs::read_to_string(path)?;
    let records = extract_functions_missing_docstrings(&source)?;

    let mut outcome = DocstringOutcome {
        path: path.to_path_buf(),
        functions: records.iter().map(|r| r.name.clone()).collect(),
        generated: 0,
        placeholders: 0,
    };

    if records.is_empty() {
        info!(file = %path.display(), "no functions missing docstrings");
        return Ok(outcome);
    }

    let mut docstrings = Vec::with_capacity(records.len());
    for record in &records {
        match suggest_docstring(client, record).await {
            Ok(docstring) => {
                debug!(function = %record.name, line = record.start_line, "docstring generated");
                outcome.generated += 1;
                docstrings.push(docstring);
            }
            Err(err) => {
                warn!(
                    file = %path.display(),
                    function = %record.name,
                    line = record.start_line,
                    "docstring generation failed: {err}"
                );
                outcome.placeholders += 1;
                docstrings.push(DOCSTRING_PLACEHOLDER.to_string());
            }
        }
    }

    std::fs::write(path, insert_docstrings(&source, &records, &docstrings))?;
    info!(
        file = %path.display(),
        functions = records.len(),
        placeholders = outcome.placeholders,
        "docstrings added"
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ScriptedClient, DOCSTRING};
    use std::fs;

    const SAMPLE: &str = r#"import os


def documented(x):
    """Already has one."""
    return x


@staticmethod
def decorated(a, b):
    # leading comment is not a docstring
    return a + b


class Greeter:
    def greet(self, name):
        def shout(text):
            return text.upper()
        return shout(name)

    async def later(self):
        return None


def one_liner(): return 1


def fstring_first():
    f"not a {docstring}"
    return 0
"#;

    fn names(records: &[FunctionRecord]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn finds_functions_without_docstrings() {
        let records = extract_functions_missing_docstrings(SAMPLE).unwrap();
        assert_eq!(
            names(&records),
            vec!["decorated", "greet", "shout", "later", "fstring_first"]
        );
    }

    #[test]
    fn byte_string_first_statement_is_not_a_docstring() {
        let records = extract_functions_missing_docstrings("def g():\n    b\"raw\"\n    return 0\n").unwrap();
        assert_eq!(names(&records), vec!["g"]);
        assert_eq!(records[0].body_line, 2);

        let plain = extract_functions_missing_docstrings("def h():\n    \"\"\"Doc.\"\"\"\n    return 0\n").unwrap();
        assert!(plain.is_empty());

        let raw = extract_functions_missing_docstrings("def r():\n    r\"\"\"Raw doc.\"\"\"\n    return 0\n").unwrap();
        assert!(raw.is_empty());
    }

    #[test]
    fn records_carry_lines_and_indentation() {
        let records = extract_functions_missing_docstrings(SAMPLE).unwrap();

        let decorated = &records[0];
        assert_eq!(decorated.start_line, 10);
        assert_eq!(decorated.body_line, 12, "comment before the body is skipped");
        assert_eq!(decorated.indent, "    ");
        assert!(decorated.source.starts_with("def decorated(a, b):"));
        assert!(decorated.source.ends_with("return a + b"));

        let shout = records.iter().find(|r| r.name == "shout").unwrap();
        assert_eq!(shout.body_line, 18);
        assert_eq!(shout.indent, "            ");
    }

    #[test]
    fn syntax_errors_are_rejected() {
        let err = extract_functions_missing_docstrings("def broken(:\n    pass\n").unwrap_err();
        assert!(matches!(err, DocError::Syntax { line: 1 }));
    }

    #[test]
    fn insertion_runs_bottom_up_and_keeps_trailing_newline() {
        let source = "def a():\n    return 1\n\ndef b():\n    return 2\n";
        let records = extract_functions_missing_docstrings(source).unwrap();
        let docstrings = vec![
            "\"\"\"First.\"\"\"".to_string(),
            "\"\"\"Second.\"\"\"".to_string(),
        ];

        let output = insert_docstrings(source, &records, &docstrings);
        assert_eq!(
            output,
            "def a():\n    \"\"\"First.\"\"\"\n    return 1\n\ndef b():\n    \"\"\"Second.\"\"\"\n    return 2\n"
        );
        assert!(extract_functions_missing_docstrings(&output)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn nested_functions_are_documented_at_their_own_depth() {
        let source = "class A:\n    def m(self):\n        def inner():\n            return 1\n        return inner()\n";
        let records = extract_functions_missing_docstrings(source).unwrap();
        let docstrings: Vec<String> = records
            .iter()
            .map(|r| format!("\"\"\"Doc for {}.\"\"\"", r.name))
            .collect();

        let output = insert_docstrings(source, &records, &docstrings);
        assert_eq!(
            output,
            "class A:\n    def m(self):\n        \"\"\"Doc for m.\"\"\"\n        def inner():\n            \"\"\"Doc for inner.\"\"\"\n            return 1\n        return inner()\n"
        );
    }

    #[test]
    fn crlf_sources_keep_their_line_endings() {
        let source = "def a():\r\n    return 1\r\n";
        let records = extract_functions_missing_docstrings(source).unwrap();
        let output = insert_docstrings(source, &records, &["\"\"\"Doc.\"\"\"".to_string()]);
        assert_eq!(output, "def a():\r\n    \"\"\"Doc.\"\"\"\r\n    return 1\r\n");
    }

    #[tokio::test]
    async fn document_file_uses_placeholder_when_model_fails() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("m.py");
        fs::write(&path, "def a():\n    return 1\n\ndef b():\n    return 2\n").unwrap();

        let client = ScriptedClient::new()
            .fail_on("def b()")
            .on(DOCSTRING, "```python\n\"\"\"Return one.\"\"\"\n```");

        let outcome = document_file(&client, &path).await.unwrap();
        assert_eq!(outcome.functions, vec!["a", "b"]);
        assert_eq!(outcome.generated, 1);
        assert_eq!(outcome.placeholders, 1);

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "def a():\n    \"\"\"Return one.\"\"\"\n    return 1\n\ndef b():\n    \"\"\"TODO: Add docstring\"\"\"\n    return 2\n"
        );
    }

    #[tokio::test]
    async fn fully_documented_file_is_left_alone() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("m.py");
        let source = "def a():\n    '''Doc.'''\n    return 1";
        fs::write(&path, source).unwrap();

        let client = ScriptedClient::new();
        let outcome = document_file(&client, &path).await.unwrap();

        assert!(!outcome.modified());
        assert!(client.prompts().is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), source);
    }
}

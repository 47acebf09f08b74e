//! Prompt text for every model request the pipeline makes.

use autodoc_core::CommentStyle;

fn fenced(code: &str) -> String {
    format!("```python\n{}\n```", code.trim_end())
}

/// Ask for a short phrase describing the comment verbosity of `code`.
pub fn classify_comment_style(code: &str) -> String {
    format!(
        "You are a Python commenting assistant. Read the following code and determine what \
commenting style it uses.\nReply with a single phrase between 1 and 3 words long (for example \
extensive, light) describing the verbosity of the comments in this file. No explanations or \
details.\n{}",
        fenced(code)
    )
}

/// Ask how far the detected style is from the target style.
pub fn compare_comment_styles(detected: &CommentStyle, target: &CommentStyle) -> String {
    format!(
        "Answer how similar or different the phrase '{detected}' is from the phrase '{target}' \
in terms of code commenting verbosity.\nReply with exactly one of: very different, different, \
similar, very similar. No explanation is needed."
    )
}

/// Ask for `code` with every comment removed.
pub fn strip_comments(code: &str) -> String {
    format!(
        "You are a Python commenting assistant. Read the following code and return the same \
code with the existing comments removed.\nReturn ONLY the modified code. Do not summarize or \
explain.\n{}",
        fenced(code)
    )
}

/// Ask for `code` with inline comments in the target style.
pub fn add_comments(code: &str, style: &CommentStyle) -> String {
    format!(
        "You are a Python commenting assistant. Read the following code and return the same \
code, but with {style} inline comments.\nReturn ONLY the modified code with comments. Do not \
summarize or explain.\n{}",
        fenced(code)
    )
}

/// Ask for a Google-style docstring for a single function.
pub fn docstring(function_source: &str) -> String {
    format!(
        "You are a helpful Python documentation assistant. Read the following Python function \
and write a clear, concise Google style docstring in triple quotes. Only output the docstring, \
starting your reply with triple quotes.\n{}",
        fenced(function_source)
    )
}

/// Ask for a 1-3 sentence description of a file.
pub fn file_summary(code: &str) -> String {
    format!(
        "You're a Python code summarizer. Read the file content and briefly describe at a high \
level what it contains in 1-3 sentences. You wrote this code and are certain about your \
summary.\n{code}\n"
    )
}

/// Ask for the call order and processes inside a file.
pub fn file_processes(code: &str) -> String {
    format!(
        "You're a Python code summarizer. Read the file content and scan for any user defined \
function calls or other detailed processes. Keep track of the order of function calls. Describe \
the identified processes in 2-4 sentences. You wrote this code and are certain about your \
summary.\n{code}\n"
    )
}

/// Ask for a holistic description of a directory from its per-file report.
pub fn directory_summary(job_summaries: &str) -> String {
    format!(
        "You're a Python code summarizer. Read the report that explains what each Python script \
in the directory contains and briefly describe what the entire directory does holistically, in \
2-4 sentences. You wrote this code and are certain about your summary.\n{job_summaries}\n"
    )
}

/// Ask for the final README from every generated text artifact.
pub fn readme(descriptions: &str) -> String {
    format!(
        "You are an expert software documentarian. You are given descriptions of various Python \
files that are part of a project.\nUsing the descriptions below, create a professional, helpful, \
and clean README.md for the project that would be suitable for GitHub.\n\n\
Descriptions:\n{descriptions}\n\n\
The README should include:\n\
- A project title\n\
- A brief description of what the project does\n\
- Installation or setup instructions (generic, if details are not available)\n\
- An overview of the directory structure\n\
- A section briefly explaining the role of each major Python file\n\
- Usage examples if possible\n\
- Any other relevant GitHub-style sections\n\n\
Output ONLY the markdown content of the README.\n"
    )
}

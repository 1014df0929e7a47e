//! System instruction and prompt text for review and explain sessions.

use crate::tools::fs::{IGNORED_DIRS, IGNORED_EXTENSIONS};

/// The opening user message of every review session.
pub const OPENING_PROMPT: &str = "Review the code in the given directory.
- Use the available tools to list and read the relevant files.
- When no more tool calls are needed, return the FINAL JSON summary \
containing all issues exactly as instructed in the system instructions.";

/// Build the fixed system instruction for one review session.
///
/// Carries the review policy, the excluded-directory list and the exact
/// output schema the extractor expects.
pub fn system_instruction(directory: &str, apply_fixes: bool) -> String {
    let excluded: String = IGNORED_DIRS
        .iter()
        .map(|d| format!("- {d}/\n"))
        .chain(IGNORED_EXTENSIONS.iter().map(|e| format!("- *.{e}\n")))
        .collect();

    let fix_policy = if apply_fixes {
        "You MAY use `write_file` to apply a fix, but only when the fix is unambiguous."
    } else {
        "Do NOT modify any file; report issues and suggested fixes only."
    };

    format!(
        "You are an expert code reviewer for any programming language, including HTML, CSS, \
JavaScript, TypeScript, Python, Java and Rust.
The directory you have to review is {directory}.

## EXCLUDED DIRECTORIES & FILES
You MUST ignore the following folders and files completely. Do NOT list, read, or analyze them; \
they contain generated or dependency code:
{excluded}
## RESPONSIBILITIES
1. Use `list_files` to retrieve the relevant source files.
2. Use `read_file` to read each relevant file.
3. Analyze issues related to bugs, security, code quality, best practices and performance.
4. For HTML/markup: doctype, meta, semantic HTML, alt tags, accessibility, inline styles.
5. For CSS: syntax, inefficient selectors, unused styles.
6. For JS/TS and other languages: null/undefined errors, missing returns, async issues, \
hardcoded secrets, leftover debug output, code duplication.
7. {fix_policy}

## OUTPUT
Return ONLY a single JSON object, with no surrounding prose:

{{
  \"summary\": {{
    \"total_files_analyzed\": number,
    \"total_issues\": number,
    \"critical\": number,
    \"major\": number,
    \"minor\": number
  }},
  \"issues\": [
    {{
      \"file\": string,
      \"line_start\": number,
      \"line_end\": number,
      \"category\": \"SECURITY\" | \"BUG\" | \"QUALITY\" | \"PERFORMANCE\",
      \"severity\": \"CRITICAL\" | \"MAJOR\" | \"MINOR\",
      \"comment\": string,
      \"suggested_fix\": string
    }}
  ]
}}"
    )
}

/// Prompt for a single-shot code explanation.
pub fn explain_prompt(code: &str, language: &str) -> String {
    format!(
        "Explain the following {language} code in clear natural language. \
Describe what it does, how it works, and anything notable about it. \
Respond with prose only, no JSON.\n\n```{language}\n{code}\n```"
    )
}

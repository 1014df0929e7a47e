//! Review tools: filesystem operations plus the dispatch layer that maps
//! model function calls onto them.
//!
//! Dispatch is a closed enum, so an unsupported operation is a typed parse
//! error and adding an operation is a compile-time-checked change.

pub mod fs;

use std::str::FromStr;

use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use revet_types::ToolName;

use crate::gemini::{FunctionCall, FunctionDeclaration};

/// A failure to turn a model function call into a supported operation.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("unsupported tool: {0}")]
    UnknownTool(String),

    #[error("invalid arguments for {tool}: {reason}")]
    BadArgs { tool: ToolName, reason: String },
}

#[derive(Debug, Deserialize)]
struct ListFilesArgs {
    dir_path: String,
}

#[derive(Debug, Deserialize)]
struct ReadFileArgs {
    file_path: String,
}

#[derive(Debug, Deserialize)]
struct WriteFileArgs {
    file_path: String,
    content: String,
}

/// A validated tool invocation, ready to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCall {
    ListFiles { dir_path: String },
    ReadFile { file_path: String },
    WriteFile { file_path: String, content: String },
}

impl ToolCall {
    /// Validate a wire-level function call against the supported tool set.
    pub fn parse(call: &FunctionCall) -> Result<Self, ToolError> {
        let tool = ToolName::from_str(&call.name)
            .map_err(|_| ToolError::UnknownTool(call.name.clone()))?;

        let bad_args = |e: serde_json::Error| ToolError::BadArgs {
            tool,
            reason: e.to_string(),
        };

        match tool {
            ToolName::ListFiles => {
                let args: ListFilesArgs =
                    serde_json::from_value(call.args.clone()).map_err(bad_args)?;
                Ok(Self::ListFiles {
                    dir_path: args.dir_path,
                })
            }
            ToolName::ReadFile => {
                let args: ReadFileArgs =
                    serde_json::from_value(call.args.clone()).map_err(bad_args)?;
                Ok(Self::ReadFile {
                    file_path: args.file_path,
                })
            }
            ToolName::WriteFile => {
                let args: WriteFileArgs =
                    serde_json::from_value(call.args.clone()).map_err(bad_args)?;
                Ok(Self::WriteFile {
                    file_path: args.file_path,
                    content: args.content,
                })
            }
        }
    }

    pub fn name(&self) -> ToolName {
        match self {
            Self::ListFiles { .. } => ToolName::ListFiles,
            Self::ReadFile { .. } => ToolName::ReadFile,
            Self::WriteFile { .. } => ToolName::WriteFile,
        }
    }

    /// Execute the operation and wrap its output the way the model expects
    /// a function response to look.
    pub fn execute(&self) -> serde_json::Value {
        match self {
            Self::ListFiles { dir_path } => json!({ "result": fs::list_files(dir_path) }),
            Self::ReadFile { file_path } => json!({ "result": fs::read_file(file_path) }),
            Self::WriteFile { file_path, content } => {
                json!({ "result": fs::write_file(file_path, content) })
            }
        }
    }
}

/// The function declarations advertised to the model.
///
/// `write_file` is only declared when the session opts into applying
/// fixes; default sessions are read-only.
pub fn declarations(apply_fixes: bool) -> Vec<FunctionDeclaration> {
    let mut declarations = vec![
        FunctionDeclaration {
            name: ToolName::ListFiles.to_string(),
            description: "Recursively list the reviewable files under a directory. \
                          Dependency and build directories are excluded. Returns absolute paths."
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "dir_path": {
                        "type": "string",
                        "description": "Absolute path of the directory to list"
                    }
                },
                "required": ["dir_path"]
            }),
        },
        FunctionDeclaration {
            name: ToolName::ReadFile.to_string(),
            description: "Read the full text content of a single file. \
                          Returns an empty string if the file cannot be read."
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "file_path": {
                        "type": "string",
                        "description": "Absolute path of the file to read"
                    }
                },
                "required": ["file_path"]
            }),
        },
    ];

    if apply_fixes {
        declarations.push(FunctionDeclaration {
            name: ToolName::WriteFile.to_string(),
            description: "Overwrite a file with corrected content. \
                          Returns true when the write succeeded."
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "file_path": {
                        "type": "string",
                        "description": "Absolute path of the file to write"
                    },
                    "content": {
                        "type": "string",
                        "description": "The full replacement content"
                    }
                },
                "required": ["file_path", "content"]
            }),
        });
    }

    declarations
}

//! Prompt texts sent to the model, kept as Handlebars templates.
//! Escaping is turned off since the values are code and sequence
//! data headed to an LLM, not HTML.

use std::fmt;
use std::sync::OnceLock;

use anyhow::{Error, Result};
use handlebars::Handlebars;
use serde_json::json;

#[derive(Debug, Clone, Copy)]
pub enum Prompt {
    System,
    Context,
    ExplainCode,
    AnalyzeFile,
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

const SYSTEM_PROMPT: &str = r"You are an expert AI assistant specialized in bioinformatics and software development.
You provide helpful, accurate, and detailed assistance with:
1. **Bioinformatics:**
   - DNA/RNA sequence analysis
   - Gene annotation and analysis
   - Protein structure and function
   - Genomic data formats (FASTA, VCF, BAM, etc.)
   - Common bioinformatics workflows and pipelines
   - Tools like BLAST, BWA, SAMtools, BioPython, etc.
2. **Programming:**
   - Python, R, and other languages
   - Code explanation, debugging, and optimization
   - Algorithm design and implementation
   - Library recommendations
   - Best practices and design patterns
3. **Data Analysis:**
   - Statistical analysis
   - Data visualization
   - Machine learning applications
   - Data processing and transformation
Provide clear, concise, and practical answers. Include code examples when relevant.
Format code blocks properly with language specifications.
When analyzing files or code, provide specific insights and actionable suggestions.
";

const CONTEXT_PROMPT: &str = "Context:\n{{context}}";

const EXPLAIN_CODE_PROMPT: &str = "Please explain and analyze this {{language}} code. Suggest any improvements or potential issues.";

const ANALYZE_FILE_PROMPT: &str =
    "Please analyze this file and provide relevant insights and suggestions.";

pub fn templates<'a>() -> Handlebars<'a> {
    let mut registry = Handlebars::new();
    registry.set_strict_mode(true);
    registry.register_escape_fn(handlebars::no_escape);
    for (prompt, template) in [
        (Prompt::System, SYSTEM_PROMPT),
        (Prompt::Context, CONTEXT_PROMPT),
        (Prompt::ExplainCode, EXPLAIN_CODE_PROMPT),
        (Prompt::AnalyzeFile, ANALYZE_FILE_PROMPT),
    ] {
        registry
            .register_template_string(&prompt.to_string(), template)
            .expect("Failed to register template");
    }
    registry
}

fn registry() -> &'static Handlebars<'static> {
    static REGISTRY: OnceLock<Handlebars<'static>> = OnceLock::new();
    REGISTRY.get_or_init(templates)
}

pub fn render(prompt: Prompt, data: &serde_json::Value) -> Result<String, Error> {
    Ok(registry().render(&prompt.to_string(), data)?)
}

pub fn system() -> Result<String, Error> {
    render(Prompt::System, &json!({}))
}

pub fn context(context: &str) -> Result<String, Error> {
    render(Prompt::Context, &json!({ "context": context }))
}

pub fn explain_code(language: &str) -> Result<String, Error> {
    render(Prompt::ExplainCode, &json!({ "language": language }))
}

pub fn analyze_file() -> Result<String, Error> {
    render(Prompt::AnalyzeFile, &json!({}))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt() {
        let prompt = system().unwrap();
        assert!(prompt.starts_with("You are an expert AI assistant"));
        assert!(prompt.contains("Genomic data formats (FASTA, VCF, BAM, etc.)"));
    }

    #[test]
    fn test_context_is_not_escaped() {
        let rendered = context("if a < b && c > d:\n    \"quoted\"").unwrap();
        assert_eq!(rendered, "Context:\nif a < b && c > d:\n    \"quoted\"");
    }

    #[test]
    fn test_explain_code() {
        assert_eq!(
            explain_code("C++").unwrap(),
            "Please explain and analyze this C++ code. Suggest any improvements or potential issues."
        );
    }
}

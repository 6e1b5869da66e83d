//! Lightweight, pattern based summaries of uploaded files. Nothing
//! here tries to be a real parser: the summaries only exist to give
//! the model a bit of structure to work with alongside the raw text.

pub mod code;
pub mod fasta;
pub mod tabular;
pub mod text;
pub mod vcf;

use std::fmt;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

/// Extensions accepted for upload (compared case-insensitively).
pub const ACCEPTED_EXTENSIONS: &[&str] = &[
    "fasta", "fa", "fna", "faa", "vcf", "csv", "tsv", "txt", "py", "r",
];

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

/// Produces a markdown summary from `(content, filename)`.
pub type Summarizer = fn(&str, &str) -> Result<String, AnalysisError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    Fasta,
    Vcf,
    Csv,
    PythonSource,
    RSource,
    PlainText,
}

impl FileKind {
    pub fn label(self) -> &'static str {
        match self {
            FileKind::Fasta => "FASTA",
            FileKind::Vcf => "VCF",
            FileKind::Csv => "CSV/TSV",
            FileKind::PythonSource => "Python",
            FileKind::RSource => "R",
            FileKind::PlainText => "text",
        }
    }

    /// The summarizer responsible for this kind of file. Adding a
    /// variant forces a new arm here.
    pub fn summarizer(self) -> Summarizer {
        match self {
            FileKind::Fasta => fasta::summarize,
            FileKind::Vcf => vcf::summarize,
            FileKind::Csv => tabular::summarize,
            FileKind::PythonSource => code::summarize_python,
            FileKind::RSource => code::summarize_r,
            FileKind::PlainText => text::summarize,
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lowercased extension of `filename` without the dot.
pub fn extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

pub fn is_accepted(filename: &str) -> bool {
    extension(filename).is_some_and(|ext| ACCEPTED_EXTENSIONS.contains(&ext.as_str()))
}

/// Map a file to a kind using its extension first and, failing that,
/// sniffing the content for an unlabeled FASTA file.
pub fn classify(filename: &str, content: &str) -> FileKind {
    let from_extension = match extension(filename).as_deref() {
        Some("fasta" | "fa" | "fna" | "faa") => Some(FileKind::Fasta),
        Some("vcf") => Some(FileKind::Vcf),
        Some("csv" | "tsv") => Some(FileKind::Csv),
        Some("py") => Some(FileKind::PythonSource),
        Some("r") => Some(FileKind::RSource),
        _ => None,
    };

    match from_extension {
        Some(kind) => kind,
        None if content.starts_with('>') => FileKind::Fasta,
        None => FileKind::PlainText,
    }
}

/// Summary text for a file. A failed analysis is reported inline
/// instead of the summary.
pub fn summarize(filename: &str, content: &str) -> String {
    let kind = classify(filename, content);
    tracing::debug!("Analyzing {} as {:?}", filename, kind);
    match (kind.summarizer())(content, filename) {
        Ok(summary) => summary,
        Err(e) => {
            tracing::warn!("Analysis of {} failed: {}", filename, e);
            format!("Error analyzing {} file: {}", kind.label(), e)
        }
    }
}

/// Joins the first `limit` items with ", " and notes how many were
/// left out.
pub(crate) fn truncated_list(items: &[&str], limit: usize) -> String {
    let mut out = items
        .iter()
        .take(limit)
        .copied()
        .collect::<Vec<_>>()
        .join(", ");
    if items.len() > limit {
        out.push_str(&format!(" ... ({} more)", items.len() - limit));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_by_extension() {
        for name in ["a.fasta", "a.fa", "a.fna", "a.faa"] {
            assert_eq!(classify(name, "not a fasta file"), FileKind::Fasta);
        }
        assert_eq!(classify("calls.vcf", ">looks like fasta"), FileKind::Vcf);
        assert_eq!(classify("table.csv", ""), FileKind::Csv);
        assert_eq!(classify("table.tsv", ""), FileKind::Csv);
        assert_eq!(classify("script.py", ">"), FileKind::PythonSource);
        assert_eq!(classify("script.r", ""), FileKind::RSource);
        assert_eq!(classify("script.R", ""), FileKind::RSource);
        assert_eq!(classify("READS.FASTA", ""), FileKind::Fasta);
    }

    #[test]
    fn test_classify_sniffs_fasta_content() {
        assert_eq!(classify("reads.txt", ">seq1\nACGT"), FileKind::Fasta);
        assert_eq!(classify("noext", ">seq1\nACGT"), FileKind::Fasta);
        assert_eq!(classify("", ">seq1"), FileKind::Fasta);
    }

    #[test]
    fn test_classify_plain_text() {
        assert_eq!(classify("notes.txt", "hello"), FileKind::PlainText);
        assert_eq!(classify("notes.txt", " >indented"), FileKind::PlainText);
        assert_eq!(classify("notes", ""), FileKind::PlainText);
    }

    #[test]
    fn test_is_accepted() {
        assert!(is_accepted("genome.fa"));
        assert!(is_accepted("analysis.R"));
        assert!(is_accepted("notes.TXT"));
        assert!(!is_accepted("image.png"));
        assert!(!is_accepted("Makefile"));
        assert!(!is_accepted(".py"));
    }

    #[test]
    fn test_summarize_dispatches_on_kind() {
        let summary = summarize("calls.vcf", "##fileformat=VCFv4.2\n");
        assert!(summary.starts_with("**VCF File Analysis: calls.vcf**"));

        let summary = summarize("notes.txt", "hello\nworld");
        assert!(summary.starts_with("**Text File Analysis: notes.txt**"));
    }

    #[test]
    fn test_summarize_reports_analysis_errors_inline() {
        let summary = summarize("broken.fa", "ACGT\n>seq1\nACGT");
        assert!(summary.starts_with("Error analyzing FASTA file:"));
        assert!((FileKind::Fasta.summarizer())("ACGT", "broken.fa").is_err());
    }

    #[test]
    fn test_truncated_list() {
        assert_eq!(truncated_list(&["a", "b"], 5), "a, b");
        assert_eq!(
            truncated_list(&["a", "b", "c", "d", "e", "f", "g"], 5),
            "a, b, c, d, e ... (2 more)"
        );
    }
}

use std::collections::HashMap;

use super::AnalysisError;

const PREVIEW_BASES: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: String,
    pub bases: String,
}

impl Record {
    pub fn len(&self) -> usize {
        self.bases.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    /// Percentage of `G` and `C` bases. Only uppercase bases are
    /// counted, so soft-masked (lowercase) regions lower the figure.
    pub fn gc_content(&self) -> f64 {
        let len = self.len();
        if len == 0 {
            return 0.0;
        }
        let gc = self.bases.chars().filter(|c| matches!(c, 'G' | 'C')).count();
        gc as f64 / len as f64 * 100.0
    }

    pub fn preview(&self) -> String {
        self.bases.chars().take(PREVIEW_BASES).collect()
    }
}

/// Parse FASTA text into records in order of first appearance.
///
/// The id is the header text up to the first whitespace. When an id
/// repeats, the later record replaces the earlier one but keeps its
/// position.
pub fn parse(input: &str) -> Result<Vec<Record>, AnalysisError> {
    let mut records: Vec<Record> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut current: Option<usize> = None;

    for (idx, line) in input.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        // Only a '>' in the first column starts a record
        if let Some(header) = line.strip_prefix('>') {
            let id = header.split_whitespace().next().unwrap_or("").to_string();
            let pos = match positions.get(&id) {
                Some(&pos) => {
                    records[pos].bases.clear();
                    pos
                }
                None => {
                    positions.insert(id.clone(), records.len());
                    records.push(Record {
                        id,
                        bases: String::new(),
                    });
                    records.len() - 1
                }
            };
            current = Some(pos);
        } else {
            let Some(pos) = current else {
                return Err(AnalysisError::Malformed {
                    line: idx + 1,
                    reason: "sequence data before the first '>' header".to_string(),
                });
            };
            records[pos]
                .bases
                .extend(line.chars().filter(|c| !c.is_whitespace()));
        }
    }

    Ok(records)
}

pub fn summarize(content: &str, filename: &str) -> Result<String, AnalysisError> {
    let records = parse(content)?;

    let mut summary = format!("**FASTA File Analysis: {filename}**\n\n");
    summary.push_str(&format!("- Number of sequences: {}\n", records.len()));

    for record in &records {
        summary.push_str(&format!(
            "\n**Sequence: {}**\n  - Length: {} bp\n  - GC Content: {:.1}%\n  - First 50 bases: {}...\n",
            record.id,
            record.len(),
            record.gc_content(),
            record.preview()
        ));
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(bases: &str) -> Record {
        Record {
            id: "seq".to_string(),
            bases: bases.to_string(),
        }
    }

    #[test]
    fn test_gc_content() {
        assert_eq!(record("GGCC").gc_content(), 100.0);
        assert_eq!(record("AATT").gc_content(), 0.0);
        assert_eq!(record("").gc_content(), 0.0);
        assert_eq!(record("ACGT").gc_content(), 50.0);
    }

    #[test]
    fn test_gc_content_ignores_lowercase() {
        assert_eq!(record("ggcc").gc_content(), 0.0);
        assert_eq!(record("GgCc").gc_content(), 50.0);
    }

    #[test]
    fn test_parse_multi_sequence() {
        let input = ">seq1 first one\nATCG\nGGCC\n\n>seq2\nTT AA\n>seq3\n";
        let records = parse(input).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].id, "seq1");
        assert_eq!(records[0].bases, "ATCGGGCC");
        assert_eq!(records[1].bases, "TTAA");
        assert!(records[2].is_empty());
    }

    #[test]
    fn test_parse_duplicate_ids_last_wins() {
        let input = ">dup\nAAAA\n>other\nCC\n>dup\nGG\n";
        let records = parse(input).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "dup");
        assert_eq!(records[0].bases, "GG");
        assert_eq!(records[1].id, "other");
    }

    #[test]
    fn test_parse_keeps_case() {
        let records = parse(">s\nacgtNN\n").unwrap();
        assert_eq!(records[0].bases, "acgtNN");
    }

    #[test]
    fn test_parse_rejects_leading_sequence() {
        let err = parse("ACGT\n>seq1\nACGT\n").unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_parse_indented_gt_is_sequence_data() {
        let input = ">a\nACGT\n  >not_a_header\nGG\n;comment-like\n";
        let records = parse(input).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].bases, "ACGT>not_a_headerGG;comment-like");
    }

    #[test]
    fn test_parse_semicolon_before_header_is_malformed() {
        let err = parse(";comment\n>a\nACGT\n").unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_record_count_matches_headers() {
        let input = ">a\nA\n>b\nC\n>c\nG\n>d\nT\n";
        let headers = input.lines().filter(|l| l.starts_with('>')).count();
        assert_eq!(parse(input).unwrap().len(), headers);
    }

    #[test]
    fn test_summarize() {
        let summary = summarize(">chr1 test\nGGCCAATT\n", "genome.fa").unwrap();
        assert!(summary.starts_with("**FASTA File Analysis: genome.fa**\n\n"));
        assert!(summary.contains("- Number of sequences: 1\n"));
        assert!(summary.contains("**Sequence: chr1**"));
        assert!(summary.contains("  - Length: 8 bp\n"));
        assert!(summary.contains("  - GC Content: 50.0%\n"));
        assert!(summary.contains("  - First 50 bases: GGCCAATT...\n"));
    }

    #[test]
    fn test_summarize_preview_is_50_bases() {
        let input = format!(">long\n{}\n", "A".repeat(120));
        let summary = summarize(&input, "long.fa").unwrap();
        assert!(summary.contains(&format!("First 50 bases: {}...", "A".repeat(50))));
        assert!(!summary.contains(&"A".repeat(51)));
    }

    #[test]
    fn test_summarize_no_records() {
        let summary = summarize("", "empty.fa").unwrap();
        assert!(summary.contains("- Number of sequences: 0\n"));
        assert!(!summary.contains("**Sequence:"));
    }
}

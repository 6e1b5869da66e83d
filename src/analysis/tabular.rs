use super::{AnalysisError, truncated_list};

const SHOWN_COLUMNS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Tab,
}

impl Delimiter {
    /// Tab if the header line has a tab anywhere, otherwise comma. No
    /// attempt is made to handle quoting.
    pub fn sniff(header: &str) -> Self {
        if header.contains('\t') {
            Delimiter::Tab
        } else {
            Delimiter::Comma
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Delimiter::Comma => "CSV (comma-separated)",
            Delimiter::Tab => "TSV (tab-separated)",
        }
    }
}

pub fn summarize(content: &str, filename: &str) -> Result<String, AnalysisError> {
    let lines: Vec<&str> = content
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .collect();

    let mut summary = format!("**CSV/TSV File Analysis: {filename}**\n\n");
    summary.push_str(&format!("- Total lines: {}\n", lines.len()));

    let Some(header) = lines.first() else {
        return Ok(summary);
    };

    let delimiter = Delimiter::sniff(header);
    let columns: Vec<&str> = header.split(delimiter.as_char()).collect();
    summary.push_str(&format!("- Format: {}\n", delimiter.label()));
    summary.push_str(&format!("- Columns: {}\n", columns.len()));
    summary.push_str(&format!(
        "- Column headers: {}\n",
        truncated_list(&columns, SHOWN_COLUMNS)
    ));

    if let Some(first_row) = lines.get(1) {
        summary.push_str(&format!("- Data rows: {}\n", lines.len() - 1));
        summary.push_str(&format!("\n**First row:**\n```\n{first_row}\n```\n"));
    }

    Ok(summary)
}

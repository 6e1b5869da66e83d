use super::AnalysisError;

/// Columns every VCF file has before the per-sample columns.
pub const FIXED_COLUMNS: i64 = 9;

#[derive(Debug, Default, PartialEq)]
pub struct VcfOverview<'a> {
    pub meta_lines: usize,
    pub column_header: Option<&'a str>,
    pub records: Vec<&'a str>,
}

impl VcfOverview<'_> {
    pub fn column_count(&self) -> Option<usize> {
        self.column_header.map(|line| line.split('\t').count())
    }

    /// Can be negative for a malformed header.
    pub fn sample_count(&self) -> Option<i64> {
        self.column_count().map(|count| count as i64 - FIXED_COLUMNS)
    }
}

pub fn scan(content: &str) -> VcfOverview<'_> {
    let mut overview = VcfOverview::default();
    for line in content.split('\n') {
        if line.starts_with("##") {
            overview.meta_lines += 1;
        } else if line.starts_with("#CHROM") {
            overview.column_header.get_or_insert(line);
        } else if !line.is_empty() && !line.starts_with('#') {
            overview.records.push(line);
        }
    }
    overview
}

pub fn summarize(content: &str, filename: &str) -> Result<String, AnalysisError> {
    let overview = scan(content);

    let mut summary = format!("**VCF File Analysis: {filename}**\n\n");
    summary.push_str(&format!("- Header lines: {}\n", overview.meta_lines));
    summary.push_str(&format!("- Variant records: {}\n", overview.records.len()));

    if let (Some(columns), Some(samples)) = (overview.column_count(), overview.sample_count()) {
        summary.push_str(&format!("- Columns: {columns}\n"));
        summary.push_str(&format!("- Sample columns: {samples}\n"));
    }

    if let Some(first) = overview.records.first() {
        summary.push_str(&format!("\n**First variant:**\n```\n{first}\n```\n"));
    }

    Ok(summary)
}

use super::AnalysisError;

pub fn summarize(content: &str, filename: &str) -> Result<String, AnalysisError> {
    Ok(format!(
        "**Text File Analysis: {}**\n\n- Lines: {}\n- Characters: {}\n",
        filename,
        content.split('\n').count(),
        content.chars().count()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize() {
        let summary = summarize("héllo\nworld\n", "notes.txt").unwrap();
        assert_eq!(
            summary,
            "**Text File Analysis: notes.txt**\n\n- Lines: 3\n- Characters: 12\n"
        );
    }
}

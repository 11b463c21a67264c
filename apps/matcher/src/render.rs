use crate::models::MatchResult;

/// Projects a result into its three display lines. No result, no lines.
pub fn render_result(result: Option<&MatchResult>) -> Vec<String> {
    let Some(result) = result else {
        return Vec::new();
    };
    vec![
        format!("Score: {}", result.score),
        format!("Overlap: {}", join_terms(result.overlap.as_deref())),
        format!("Gaps: {}", join_terms(result.gaps.as_deref())),
    ]
}

/// One bullet per recommendation, if the service sent any.
pub fn render_recommendations(result: Option<&MatchResult>) -> Vec<String> {
    result
        .and_then(|r| r.recommendations.as_deref())
        .unwrap_or_default()
        .iter()
        .map(|rec| format!("- {rec}"))
        .collect()
}

fn join_terms(terms: Option<&[String]>) -> String {
    terms.map(|t| t.join(", ")).unwrap_or_default()
}

use super::{not_blank, recover, ContentFlows};
use crate::error::Result;
use crate::prompts;
use crate::text::{calculate_text_stats, TextStats};

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use validator::Validate;

const MIN_SEO_WORDS: usize = 300;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    #[validate(custom = "not_blank")]
    pub content: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Readability and SEO review of a piece of content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentAnalysis {
    pub readability_score: f32,
    pub seo_score: f32,
    pub reading_level: String,
    pub suggestions: Vec<String>,
    pub stats: TextStats,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelAnalysis {
    readability_score: f32,
    seo_score: f32,
    reading_level: String,
    suggestions: Vec<String>,
}

/// Heuristic analysis computed without the model
pub fn local_analysis(content: &str, keywords: &[String]) -> ContentAnalysis {
    let stats = calculate_text_stats(content);
    let avg_sentence_length = stats.avg_words_per_sentence;

    let (reading_level, complexity_score) = if avg_sentence_length < 10.0 {
        ("Elementary", 0.3)
    } else if avg_sentence_length < 15.0 {
        ("Middle School", 0.5)
    } else if avg_sentence_length < 20.0 {
        ("High School", 0.7)
    } else {
        ("College", 0.9)
    };

    let mut suggestions = Vec::new();
    if complexity_score > 0.5 {
        suggestions.push("Consider shorter sentences for better readability".to_string());
        suggestions.push("Use simpler vocabulary where possible".to_string());
    }

    let lowered = content.to_lowercase();
    let missing: Vec<&String> = keywords
        .iter()
        .filter(|k| !k.trim().is_empty() && !lowered.contains(&k.trim().to_lowercase()))
        .collect();

    let keyword_coverage = if keywords.is_empty() {
        0.5
    } else {
        1.0 - missing.len() as f32 / keywords.len() as f32
    };
    let length_score = (stats.word_count as f32 / MIN_SEO_WORDS as f32).min(1.0);
    let heading_score = if content.lines().any(|l| l.trim_start().starts_with('#')) {
        1.0
    } else {
        0.0
    };

    for keyword in &missing {
        suggestions.push(format!("Include the keyword \"{}\" in the content", keyword.trim()));
    }
    if stats.word_count < MIN_SEO_WORDS {
        suggestions.push(format!(
            "Expand the content to at least {} words for better search visibility",
            MIN_SEO_WORDS
        ));
    }
    if heading_score == 0.0 {
        suggestions.push("Break the content up with descriptive headings".to_string());
    }

    let seo_score = 0.5 * keyword_coverage + 0.3 * length_score + 0.2 * heading_score;

    ContentAnalysis {
        readability_score: 1.0 - complexity_score,
        seo_score: (seo_score * 100.0).round() / 100.0,
        reading_level: reading_level.to_string(),
        suggestions,
        stats,
    }
}

impl ContentFlows {
    /// Readability and SEO analysis. Falls back to the local heuristic.
    pub async fn analyze_content(&self, request: &AnalysisRequest) -> Result<ContentAnalysis> {
        info!("Analyzing {} characters of content", request.content.len());

        let result = self
            .run_structured::<ModelAnalysis>(
                prompts::CONTENT_ANALYSIS,
                json!({
                    "content": request.content,
                    "keywords": request.keywords,
                }),
            )
            .await
            .map(|analysis| ContentAnalysis {
                readability_score: analysis.readability_score.clamp(0.0, 1.0),
                seo_score: analysis.seo_score.clamp(0.0, 1.0),
                reading_level: analysis.reading_level,
                suggestions: analysis.suggestions,
                stats: calculate_text_stats(&request.content),
            });

        recover(prompts::CONTENT_ANALYSIS, result, || {
            local_analysis(&request.content, &request.keywords)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flows::test_support::flows_with;
    use crate::providers::ScriptedTextGenerator;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    #[test]
    fn test_local_analysis_short_sentences() {
        let analysis = local_analysis("# Remote\n\nWork is fun. Teams are happy.", &[]);
        assert_eq!(analysis.reading_level, "Elementary");
        assert_eq!(analysis.readability_score, 0.7);
        assert!(analysis
            .suggestions
            .iter()
            .any(|s| s.starts_with("Expand the content")));
    }

    #[test]
    fn test_local_analysis_missing_keywords() {
        let keywords = vec!["remote".to_string(), "productivity".to_string()];
        let analysis = local_analysis("Remote teams thrive.", &keywords);
        assert!(analysis
            .suggestions
            .contains(&"Include the keyword \"productivity\" in the content".to_string()));
        assert!(!analysis.suggestions.iter().any(|s| s.contains("\"remote\"")));
    }

    #[tokio::test]
    async fn test_model_analysis() {
        let flows = flows_with(Arc::new(ScriptedTextGenerator::repeating(
            r#"{"readabilityScore": 0.8, "seoScore": 1.4, "readingLevel": "High School", "suggestions": ["Add links"]}"#,
        )));
        let request = AnalysisRequest {
            content: "Some content.".to_string(),
            keywords: Vec::new(),
        };

        let analysis = flows.analyze_content(&request).await.unwrap();
        assert_eq!(analysis.reading_level, "High School");
        assert_eq!(analysis.seo_score, 1.0);
        assert_eq!(analysis.stats.word_count, 2);
    }

    #[tokio::test]
    async fn test_fallback_is_local_analysis() {
        let flows = flows_with(Arc::new(ScriptedTextGenerator::repeating("no")));
        let request = AnalysisRequest {
            content: "Remote teams thrive.".to_string(),
            keywords: vec!["remote".to_string()],
        };

        let analysis = flows.analyze_content(&request).await.unwrap();
        assert_eq!(analysis, local_analysis(&request.content, &request.keywords));
    }
}

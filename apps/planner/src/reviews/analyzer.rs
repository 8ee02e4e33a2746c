//! Review summarization backends.
//!
//! Chosen at startup alongside the catalog backend: the LLM summarizer in
//! production, the keyword summarizer for local runs and tests.

use async_trait::async_trait;
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::reviews::prompts::{REVIEW_PROMPT_TEMPLATE, REVIEW_SYSTEM};
use crate::reviews::{detect_warnings, CourseReview};

#[async_trait]
pub trait ReviewAnalyzer: Send + Sync {
    /// Short summary of non-empty `reviews` for one (course, instructor) pair.
    async fn summarize(
        &self,
        course_name: &str,
        instructor: &str,
        reviews: &[CourseReview],
    ) -> Result<String, AppError>;
}

fn exam_lines(reviews: &[CourseReview]) -> Vec<&str> {
    reviews
        .iter()
        .map(|r| r.exam_info.trim())
        .filter(|e| !e.is_empty())
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// LlmReviewAnalyzer — production backend
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmReviewAnalyzer {
    llm: LlmClient,
}

impl LlmReviewAnalyzer {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

fn review_prompt(course_name: &str, instructor: &str, reviews: &[CourseReview]) -> String {
    let texts: Vec<&str> = reviews.iter().map(|r| r.text.trim()).collect();
    let exams = exam_lines(reviews);
    let exams = if exams.is_empty() {
        "none".to_string()
    } else {
        exams.join("\n")
    };
    REVIEW_PROMPT_TEMPLATE
        .replace("{course_name}", course_name)
        .replace("{instructor}", instructor)
        .replace("{reviews}", &texts.join("\n"))
        .replace("{exams}", &exams)
}

#[async_trait]
impl ReviewAnalyzer for LlmReviewAnalyzer {
    async fn summarize(
        &self,
        course_name: &str,
        instructor: &str,
        reviews: &[CourseReview],
    ) -> Result<String, AppError> {
        let prompt = review_prompt(course_name, instructor, reviews);
        let response = self
            .llm
            .call(&prompt, REVIEW_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("Review summary failed: {e}")))?;
        let summary = response
            .text()
            .ok_or_else(|| AppError::Llm("Review summary was empty".to_string()))?;

        info!(
            course = %course_name,
            instructor = %instructor,
            reviews = reviews.len(),
            "Reviews summarized"
        );
        Ok(summary.trim().to_string())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// KeywordReviewAnalyzer — deterministic, no model call
// ────────────────────────────────────────────────────────────────────────────

/// Builds the summary from review counts, keyword warnings and exam notes.
pub struct KeywordReviewAnalyzer;

#[async_trait]
impl ReviewAnalyzer for KeywordReviewAnalyzer {
    async fn summarize(
        &self,
        course_name: &str,
        instructor: &str,
        reviews: &[CourseReview],
    ) -> Result<String, AppError> {
        let mut lines = vec![format!(
            "{course_name} ({instructor}): 강의평 {}건",
            reviews.len()
        )];
        lines.extend(
            detect_warnings(reviews)
                .into_iter()
                .map(|w| w.message().to_string()),
        );
        let exams = exam_lines(reviews);
        if !exams.is_empty() {
            lines.push(format!("시험: {}", exams.join(" / ")));
        }
        Ok(lines.join("\n"))
    }
}

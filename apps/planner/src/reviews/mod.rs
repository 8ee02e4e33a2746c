//! Course reviews — what past students wrote about a course and its instructor.
//!
//! Reviews are keyed by (course name, instructor), not by offering id: the same
//! course taught by the same instructor shares its reviews across sections and
//! terms. Keyword checks flag heavy courses next to the catalog; a longer
//! summary comes from a `ReviewAnalyzer`.

pub mod analyzer;
pub mod prompts;

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::timetable::CourseOffering;

pub use analyzer::{KeywordReviewAnalyzer, LlmReviewAnalyzer, ReviewAnalyzer};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseReview {
    pub course_name: String,
    pub instructor: String,
    pub text: String,
    /// What the student reported about exams, if anything.
    #[serde(default)]
    pub exam_info: String,
}

impl CourseReview {
    pub fn new(
        course_name: impl Into<String>,
        instructor: impl Into<String>,
        text: impl Into<String>,
        exam_info: impl Into<String>,
    ) -> Self {
        Self {
            course_name: course_name.into(),
            instructor: instructor.into(),
            text: text.into(),
            exam_info: exam_info.into(),
        }
    }

    fn is_about(&self, course_name: &str, instructor: &str) -> bool {
        self.course_name.trim() == course_name.trim() && self.instructor.trim() == instructor.trim()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewWarning {
    HeavyWorkload,
    TeamProject,
    FastPace,
}

impl ReviewWarning {
    pub const ALL: [ReviewWarning; 3] = [
        ReviewWarning::HeavyWorkload,
        ReviewWarning::TeamProject,
        ReviewWarning::FastPace,
    ];

    fn keywords(self) -> &'static [&'static str] {
        match self {
            ReviewWarning::HeavyWorkload => &[
                "과제가 많",
                "과제 많",
                "과제가 너무",
                "과제가 진짜",
                "과제 폭탄",
                "밤샘",
                "heavy workload",
                "lots of homework",
            ],
            ReviewWarning::TeamProject => &[
                "조별과제",
                "조별 과제",
                "팀플",
                "팀 프로젝트",
                "team project",
                "group project",
            ],
            ReviewWarning::FastPace => &[
                "진도 엄청 빠",
                "진도가 빠",
                "진도 빠",
                "fast pace",
                "fast-paced",
            ],
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ReviewWarning::HeavyWorkload => "⚠️ 과제가 많다는 평이 있습니다.",
            ReviewWarning::TeamProject => "⚠️ 조별과제가 빡세다는 평이 있습니다.",
            ReviewWarning::FastPace => "⚠️ 진도가 빠르다는 평이 있습니다.",
        }
    }

    fn matches(self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.keywords().iter().any(|k| lower.contains(k))
    }
}

/// A warning together with the text shown to the student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReviewNote {
    pub kind: ReviewWarning,
    pub message: &'static str,
}

impl From<ReviewWarning> for ReviewNote {
    fn from(kind: ReviewWarning) -> Self {
        Self {
            kind,
            message: kind.message(),
        }
    }
}

/// Warnings raised by any of `reviews`, once each, in `ReviewWarning` order.
pub fn detect_warnings(reviews: &[CourseReview]) -> Vec<ReviewWarning> {
    let found: BTreeSet<ReviewWarning> = reviews
        .iter()
        .flat_map(|r| {
            ReviewWarning::ALL
                .into_iter()
                .filter(move |w| w.matches(&r.text) || w.matches(&r.exam_info))
        })
        .collect();
    found.into_iter().collect()
}

/// Everything known about one (course, instructor) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewDigest {
    pub offering_id: String,
    pub course_name: String,
    pub instructor: String,
    pub reviews: Vec<CourseReview>,
    pub warnings: Vec<ReviewNote>,
    /// `None` when there is nothing to summarize.
    pub summary: Option<String>,
}

#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Reviews for `course_name` taught by `instructor`, in stored order.
    async fn find(
        &self,
        course_name: &str,
        instructor: &str,
    ) -> Result<Vec<CourseReview>, AppError>;

    /// Every stored review. Fed to the catalog prompt as background.
    async fn all(&self) -> Result<Vec<CourseReview>, AppError>;
}

/// Review warnings for each offering in `offerings` that has any, keyed by
/// offering id.
pub async fn warnings_for(
    store: &dyn ReviewStore,
    offerings: &[CourseOffering],
) -> Result<BTreeMap<String, Vec<ReviewNote>>, AppError> {
    let mut out = BTreeMap::new();
    for offering in offerings {
        let reviews = store.find(&offering.name, &offering.instructor).await?;
        let notes: Vec<ReviewNote> = detect_warnings(&reviews)
            .into_iter()
            .map(ReviewNote::from)
            .collect();
        if !notes.is_empty() {
            out.insert(offering.id.clone(), notes);
        }
    }
    Ok(out)
}

/// Compact one-line-per-review listing for prompts.
pub fn reviews_for_prompt(reviews: &[CourseReview]) -> String {
    if reviews.is_empty() {
        return "none".to_string();
    }
    reviews
        .iter()
        .map(|r| {
            let exam = match r.exam_info.trim() {
                "" => String::new(),
                e => format!(" (exam: {e})"),
            };
            format!("- {} / {}: {}{}", r.course_name, r.instructor, r.text.trim(), exam)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ────────────────────────────────────────────────────────────────────────────
// StaticReviewStore — seeded in-process data
// ────────────────────────────────────────────────────────────────────────────

pub struct StaticReviewStore {
    reviews: Vec<CourseReview>,
}

impl StaticReviewStore {
    pub fn new(reviews: Vec<CourseReview>) -> Self {
        Self { reviews }
    }

    /// Reviews for the first-year courses served by the sample catalog.
    pub fn seeded() -> Self {
        Self::new(vec![
            CourseReview::new(
                "C프로그래밍",
                "김코딩",
                "교수님 설명은 좋은데 과제가 진짜 너무 많아요. 매주 밤샘.",
                "중간고사 코딩 테스트 손코딩 나옴",
            ),
            CourseReview::new(
                "C프로그래밍",
                "김코딩",
                "학점은 잘 주시는 편입니다. 시험은 족보에서 많이 나옴.",
                "기말은 프로젝트로 대체",
            ),
            CourseReview::new(
                "대학수학1",
                "이수학",
                "수포자라면 비추. 진도 엄청 빠름. 대신 질문은 잘 받아주심.",
                "교재 연습문제 숫자만 바꿔서 나옴",
            ),
            CourseReview::new(
                "공학설계입문",
                "박설계",
                "조별과제 지옥... 팀원 잘못 만나면 한 학기 망함.",
                "발표 비중이 큼",
            ),
            CourseReview::new(
                "대학영어",
                "Brown",
                "출석만 잘 하면 B+은 깔고 감. 꿀강임.",
                "오픈북 시험임",
            ),
        ])
    }
}

#[async_trait]
impl ReviewStore for StaticReviewStore {
    async fn find(
        &self,
        course_name: &str,
        instructor: &str,
    ) -> Result<Vec<CourseReview>, AppError> {
        Ok(self
            .reviews
            .iter()
            .filter(|r| r.is_about(course_name, instructor))
            .cloned()
            .collect())
    }

    async fn all(&self) -> Result<Vec<CourseReview>, AppError> {
        Ok(self.reviews.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_find_matches_course_and_instructor() {
        let store = StaticReviewStore::seeded();
        assert_eq!(store.find("C프로그래밍", "김코딩").await.unwrap().len(), 2);
        assert_eq!(store.find(" 대학영어 ", "Brown").await.unwrap().len(), 1);
        // Same course, other instructor: no reviews.
        assert!(store.find("C프로그래밍", "최포인터").await.unwrap().is_empty());
        assert_eq!(store.all().await.unwrap().len(), 5);
    }

    async fn seeded_warnings(course_name: &str, instructor: &str) -> Vec<ReviewWarning> {
        let store = StaticReviewStore::seeded();
        detect_warnings(&store.find(course_name, instructor).await.unwrap())
    }

    #[tokio::test]
    async fn test_detect_warnings_on_seeded_reviews() {
        assert_eq!(
            seeded_warnings("C프로그래밍", "김코딩").await,
            vec![ReviewWarning::HeavyWorkload]
        );
        assert_eq!(
            seeded_warnings("대학수학1", "이수학").await,
            vec![ReviewWarning::FastPace]
        );
        assert_eq!(
            seeded_warnings("공학설계입문", "박설계").await,
            vec![ReviewWarning::TeamProject]
        );
        assert!(seeded_warnings("대학영어", "Brown").await.is_empty());
    }

    #[test]
    fn test_detect_warnings_dedups_and_orders() {
        let reviews = vec![
            CourseReview::new("X", "Y", "Team project every week", ""),
            CourseReview::new("X", "Y", "팀플 and a HEAVY WORKLOAD", ""),
        ];
        assert_eq!(
            detect_warnings(&reviews),
            vec![ReviewWarning::HeavyWorkload, ReviewWarning::TeamProject]
        );
    }

    #[tokio::test]
    async fn test_warnings_for_catalog_keys_by_offering_id() {
        let store = StaticReviewStore::seeded();
        let offerings = vec![
            CourseOffering::new("P-01", "C프로그래밍", 3).with_instructor("김코딩"),
            CourseOffering::new("P-02", "C프로그래밍", 3).with_instructor("최포인터"),
            CourseOffering::new("E-01", "대학영어", 2).with_instructor("Brown"),
        ];
        let map = warnings_for(&store, &offerings).await.unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map["P-01"][0].kind, ReviewWarning::HeavyWorkload);
        assert_eq!(map["P-01"][0].message, ReviewWarning::HeavyWorkload.message());
    }

    #[test]
    fn test_reviews_for_prompt() {
        assert_eq!(reviews_for_prompt(&[]), "none");
        let text = reviews_for_prompt(&[
            CourseReview::new("대학영어", "Brown", " 꿀강임. ", "오픈북 시험임"),
            CourseReview::new("A", "B", "ok", ""),
        ]);
        assert_eq!(
            text,
            "- 대학영어 / Brown: 꿀강임. (exam: 오픈북 시험임)\n- A / B: ok"
        );
    }
}

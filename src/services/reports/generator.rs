//! 评语与简介生成
//!
//! 生成失败从不向外传播：调用方总是拿到一段文本（可能是兜底文案）。

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::AiConfig;
use crate::errors::{Result, SchoolAdminError};
use crate::models::{students::entities::Student, teachers::entities::Teacher};

pub const REPORT_EMPTY_FALLBACK: &str = "Could not generate report.";
pub const REPORT_ERROR_FALLBACK: &str = "AI Service Unavailable.";
pub const SUMMARY_ERROR_FALLBACK: &str = "Error generating summary.";
pub const DEFAULT_REPORT_CONTEXT: &str = "Good attendance, average participation.";

/// 文本生成后端
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// 单次生成；后端未返回文本时为 `None`
    async fn generate(&self, model: &str, prompt: &str) -> Result<Option<String>>;
}

/// Gemini `generateContent` REST 接口
pub struct GeminiGenerator {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl GeminiGenerator {
    pub fn new(config: &AiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .map_err(|e| SchoolAdminError::text_generation(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GenerateContentResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Part {
    text: Option<String>,
}

impl GenerateContentResponse {
    // 拼接首个候选的全部文本片段
    fn text(self) -> Option<String> {
        let text: String = self
            .candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .filter_map(|p| p.text)
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    async fn generate(&self, model: &str, prompt: &str) -> Result<Option<String>> {
        let url = format!("{}/v1beta/models/{}:generateContent", self.endpoint, model);
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| SchoolAdminError::text_generation(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SchoolAdminError::text_generation(format!(
                "Generation request returned {status}"
            )));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| SchoolAdminError::text_generation(e.to_string()))?;
        Ok(parsed.text())
    }
}

/// 未配置 API key 时使用
pub struct UnconfiguredGenerator;

#[async_trait]
impl TextGenerator for UnconfiguredGenerator {
    async fn generate(&self, _model: &str, _prompt: &str) -> Result<Option<String>> {
        Err(SchoolAdminError::text_generation(
            "Text generation API key is not configured",
        ))
    }
}

pub struct ReportCommentGenerator {
    generator: Arc<dyn TextGenerator>,
    model: String,
}

impl ReportCommentGenerator {
    pub fn new(generator: Arc<dyn TextGenerator>, model: impl Into<String>) -> Self {
        Self {
            generator,
            model: model.into(),
        }
    }

    /// 按配置选择后端
    pub fn from_config(config: &AiConfig) -> Self {
        let generator: Arc<dyn TextGenerator> = if config.api_key.trim().is_empty() {
            Arc::new(UnconfiguredGenerator)
        } else {
            match GeminiGenerator::new(config) {
                Ok(gemini) => Arc::new(gemini),
                Err(e) => {
                    warn!("Text generation client unavailable: {e}");
                    Arc::new(UnconfiguredGenerator)
                }
            }
        };
        Self::new(generator, config.model.clone())
    }

    /// 学生期末评语
    pub async fn student_report_comment(&self, student: &Student, context: Option<&str>) -> String {
        let context = resolve_context(student, context);
        let prompt = student_report_prompt(student, &context);

        match self.generator.generate(&self.model, &prompt).await {
            Ok(Some(text)) => text.trim().to_string(),
            Ok(None) => REPORT_EMPTY_FALLBACK.to_string(),
            Err(e) => {
                warn!("Report comment generation failed: {e}");
                REPORT_ERROR_FALLBACK.to_string()
            }
        }
    }

    /// 教师网站简介
    pub async fn teacher_profile_summary(&self, teacher: &Teacher) -> String {
        let prompt = teacher_profile_prompt(teacher);

        match self.generator.generate(&self.model, &prompt).await {
            Ok(Some(text)) => text.trim().to_string(),
            Ok(None) => String::new(),
            Err(e) => {
                warn!("Profile summary generation failed: {e}");
                SUMMARY_ERROR_FALLBACK.to_string()
            }
        }
    }
}

// 请求上下文 > 学生备注 > 默认描述
fn resolve_context(student: &Student, context: Option<&str>) -> String {
    context
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .or_else(|| {
            student
                .notes
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
        })
        .unwrap_or(DEFAULT_REPORT_CONTEXT)
        .to_string()
}

fn student_report_prompt(student: &Student, context: &str) -> String {
    let placement = if student.is_assigned_to_class() {
        "Assigned to a class"
    } else {
        "Unassigned"
    };
    let prompt = format!(
        "Write a professional and encouraging school report card comment for a student named {}.\n\
         Class placement: {}.\n\
         Teacher observations: {}.\n\
         Keep it under 50 words and focus on growth and behavior.",
        student.full_name(),
        placement,
        context
    );
    debug!("Report prompt built for student {}", student.id);
    prompt
}

fn teacher_profile_prompt(teacher: &Teacher) -> String {
    format!(
        "Write a short, friendly bio for the school website about {}, \
         whose qualifications are: {}. Keep it to two sentences.",
        teacher.full_name, teacher.qualifications
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::students::entities::Gender;
    use std::sync::Mutex;

    struct MockGenerator {
        reply: Result<Option<String>>,
        prompts: Mutex<Vec<String>>,
    }

    impl MockGenerator {
        fn new(reply: Result<Option<String>>) -> Arc<Self> {
            Arc::new(Self {
                reply,
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn last_prompt(&self) -> String {
            self.prompts.lock().unwrap().last().cloned().unwrap_or_default()
        }
    }

    #[async_trait]
    impl TextGenerator for MockGenerator {
        async fn generate(&self, _model: &str, prompt: &str) -> Result<Option<String>> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply.clone()
        }
    }

    fn student(class_id: Option<&str>, notes: Option<&str>) -> Student {
        Student {
            id: "s1".to_string(),
            admission_no: "ADM001".to_string(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            dob: "2015-05-20".to_string(),
            gender: Gender::Male,
            class_id: class_id.map(str::to_string),
            teacher_id: None,
            roll_no: "1".to_string(),
            photo_path: None,
            notes: notes.map(str::to_string),
        }
    }

    fn teacher() -> Teacher {
        Teacher {
            id: "t1".to_string(),
            teacher_no: "T001".to_string(),
            full_name: "Sarah Connor".to_string(),
            phone: "555-0101".to_string(),
            email: "sarah@school.edu".to_string(),
            qualifications: "M.Sc. Mathematics".to_string(),
            hire_date: "2018-08-15".to_string(),
            photo_path: None,
        }
    }

    #[tokio::test]
    async fn test_prompt_contents() {
        let mock = MockGenerator::new(Ok(Some(" Great progress. ".to_string())));
        let reports = ReportCommentGenerator::new(mock.clone(), "test-model");

        let comment = reports
            .student_report_comment(&student(Some("c1"), None), None)
            .await;
        assert_eq!(comment, "Great progress.");

        let prompt = mock.last_prompt();
        assert!(prompt.contains("John Doe"));
        assert!(prompt.contains("Assigned to a class"));
        assert!(prompt.contains(DEFAULT_REPORT_CONTEXT));
        assert!(prompt.contains("under 50 words"));
    }

    #[tokio::test]
    async fn test_context_precedence() {
        let mock = MockGenerator::new(Ok(Some("ok".to_string())));
        let reports = ReportCommentGenerator::new(mock.clone(), "test-model");
        let s = student(None, Some("Loves science fairs"));

        reports.student_report_comment(&s, None).await;
        assert!(mock.last_prompt().contains("Loves science fairs"));
        assert!(mock.last_prompt().contains("Unassigned"));

        reports.student_report_comment(&s, Some("Led the debate team")).await;
        assert!(mock.last_prompt().contains("Led the debate team"));

        reports.student_report_comment(&s, Some("   ")).await;
        assert!(mock.last_prompt().contains("Loves science fairs"));
    }

    #[tokio::test]
    async fn test_report_fallbacks() {
        let empty = ReportCommentGenerator::new(MockGenerator::new(Ok(None)), "m");
        assert_eq!(
            empty.student_report_comment(&student(None, None), None).await,
            REPORT_EMPTY_FALLBACK
        );

        let failing = ReportCommentGenerator::new(
            MockGenerator::new(Err(SchoolAdminError::text_generation("boom"))),
            "m",
        );
        assert_eq!(
            failing.student_report_comment(&student(None, None), None).await,
            REPORT_ERROR_FALLBACK
        );
    }

    #[tokio::test]
    async fn test_profile_summary_fallbacks() {
        let ok = ReportCommentGenerator::new(MockGenerator::new(Ok(Some("Bio".to_string()))), "m");
        assert_eq!(ok.teacher_profile_summary(&teacher()).await, "Bio");

        let empty = ReportCommentGenerator::new(MockGenerator::new(Ok(None)), "m");
        assert_eq!(empty.teacher_profile_summary(&teacher()).await, "");

        let failing = ReportCommentGenerator::new(
            MockGenerator::new(Err(SchoolAdminError::text_generation("boom"))),
            "m",
        );
        assert_eq!(
            failing.teacher_profile_summary(&teacher()).await,
            SUMMARY_ERROR_FALLBACK
        );
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_returns_fallback() {
        let config = AiConfig {
            api_key: "test-key".to_string(),
            endpoint: "http://127.0.0.1:9".to_string(),
            timeout: 5,
            ..AiConfig::default()
        };
        let reports = ReportCommentGenerator::from_config(&config);
        assert_eq!(
            reports.student_report_comment(&student(None, None), None).await,
            REPORT_ERROR_FALLBACK
        );
    }

    #[tokio::test]
    async fn test_unconfigured_key_returns_fallback() {
        let reports = ReportCommentGenerator::from_config(&AiConfig::default());
        assert_eq!(
            reports.student_report_comment(&student(None, None), None).await,
            REPORT_ERROR_FALLBACK
        );
    }

    #[test]
    fn test_response_text_concatenates_parts() {
        let parsed: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": "Hello " }, { "text": "world" }] } }]
        }))
        .unwrap();
        assert_eq!(parsed.text().as_deref(), Some("Hello world"));

        let empty: GenerateContentResponse =
            serde_json::from_value(serde_json::json!({ "candidates": [] })).unwrap();
        assert_eq!(empty.text(), None);
    }
}

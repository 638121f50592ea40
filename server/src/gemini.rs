//! Client for the Gemini generateContent endpoint. Produces tafseer
//! (commentary) text for a verse and verse suggestions for a described
//! problem. The API key travels with each request from the frontend; the
//! server holds none of its own.

use anyhow::{anyhow, Result};
use furqan_core::VerseKey;
use serde_json::{json, Value};

const GEMINI_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Language {
    English,
    Urdu,
}

impl Language {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "english" => Some(Language::English),
            "urdu" => Some(Language::Urdu),
            _ => None,
        }
    }
}

#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
}

impl GeminiClient {
    pub fn new() -> Result<Self> {
        Ok(Self { http: reqwest::Client::builder().build()? })
    }

    async fn generate(&self, prompt: &str, api_key: &str) -> Result<String> {
        let url = format!("{GEMINI_ENDPOINT}?key={api_key}");
        let body = json!({ "contents": [{ "parts": [{ "text": prompt }] }] });

        let response: Value = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let text = response
            .get("candidates")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("content"))
            .and_then(|c| c.get("parts"))
            .and_then(|p| p.get(0))
            .and_then(|p| p.get("text"))
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow!("unexpected response shape from Gemini"))?;
        Ok(text.trim().to_string())
    }

    /// Ask for the most relevant verse reference for a described problem.
    /// The reply is freeform text; the caller extracts the reference with
    /// the lenient resolver grammar.
    pub async fn suggest_reference(&self, problem: &str, api_key: &str) -> Result<String> {
        let prompt = format!(
            "Find the most relevant Quranic verse reference (chapter:verse format) for this problem or situation: {problem}\n\n\
             Respond ONLY with the verse reference in the format chapter:verse (e.g., 2:255 or 24:35). \
             Do not include the actual text of the verse or any other information."
        );
        self.generate(&prompt, api_key).await
    }

    /// Generate tafseer for a verse in the requested language.
    pub async fn tafseer(
        &self,
        verse_key: VerseKey,
        verse_text: &str,
        language: Language,
        api_key: &str,
    ) -> Result<String> {
        let prompt = match language {
            Language::English => format!(
                "Generate a comprehensive tafseer (explanation) in English for Quran verse {verse_key}.\n\n\
                 The verse is: \"{verse_text}\"\n\n\
                 Provide a detailed explanation that includes:\n\
                 1. Context and background\n\
                 2. Main message and teachings\n\
                 3. Scholarly interpretations\n\
                 4. Practical application\n\n\
                 Format the response as a cohesive explanation without numbered sections."
            ),
            Language::Urdu => format!(
                "\u{0642}\u{0631}\u{0622}\u{0646} \u{06a9}\u{06cc} \u{0622}\u{06cc}\u{062a} {verse_key} \u{06a9}\u{06cc} \u{0627}\u{0631}\u{062f}\u{0648} \u{0645}\u{06cc}\u{06ba} \u{062a}\u{0641}\u{0633}\u{06cc}\u{0631} \u{0644}\u{06a9}\u{06be}\u{06cc}\u{06ba}\u{06d4}\n\n\
                 \u{0622}\u{06cc}\u{062a} \u{06cc}\u{06c1} \u{06c1}\u{06d2}: \"{verse_text}\"\n\n\
                 \u{0628}\u{0631}\u{0627}\u{06c1} \u{06a9}\u{0631}\u{0645} \u{0645}\u{06a9}\u{0645}\u{0644} \u{062a}\u{0641}\u{0633}\u{06cc}\u{0631} \u{0641}\u{0631}\u{0627}\u{06c1}\u{0645} \u{06a9}\u{0631}\u{06cc}\u{06ba} \u{062c}\u{0633} \u{0645}\u{06cc}\u{06ba} \u{0634}\u{0627}\u{0645}\u{0644} \u{06c1}\u{0648}:\n\
                 1. \u{0633}\u{06cc}\u{0627}\u{0642} \u{0648} \u{0633}\u{0628}\u{0627}\u{0642} \u{0627}\u{0648}\u{0631} \u{067e}\u{0633} \u{0645}\u{0646}\u{0638}\u{0631}\n\
                 2. \u{0628}\u{0646}\u{06cc}\u{0627}\u{062f}\u{06cc} \u{067e}\u{06cc}\u{063a}\u{0627}\u{0645} \u{0627}\u{0648}\u{0631} \u{062a}\u{0639}\u{0644}\u{06cc}\u{0645}\u{0627}\u{062a}\n\
                 3. \u{0639}\u{0644}\u{0645}\u{0627}\u{0621} \u{06a9}\u{06cc} \u{062a}\u{0634}\u{0631}\u{06cc}\u{062d}\u{0627}\u{062a}\n\
                 4. \u{0639}\u{0645}\u{0644}\u{06cc} \u{0627}\u{0637}\u{0644}\u{0627}\u{0642}\n\n\
                 \u{0627}\u{067e}\u{0646}\u{0627} \u{062c}\u{0648}\u{0627}\u{0628} \u{0627}\u{06cc}\u{06a9} \u{0645}\u{0631}\u{0628}\u{0648}\u{0637} \u{062a}\u{0634}\u{0631}\u{06cc}\u{062d} \u{06a9}\u{06d2} \u{0637}\u{0648}\u{0631} \u{067e}\u{0631} \u{062f}\u{06cc}\u{06ba}\u{060c} \u{0646}\u{0645}\u{0628}\u{0631} \u{0634}\u{062f}\u{06c1} \u{062d}\u{0635}\u{0648}\u{06ba} \u{06a9}\u{06d2} \u{0628}\u{063a}\u{06cc}\u{0631}\u{06d4}"
            ),
        };
        self.generate(&prompt, api_key).await
    }
}

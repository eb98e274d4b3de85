//! Request and response DTOs for the `generateContent` endpoint.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(super) struct GenerateContentRequestDto<'a> {
    pub(super) contents: Vec<ContentDto<'a>>,
}

#[derive(Debug, Serialize)]
pub(super) struct ContentDto<'a> {
    pub(super) parts: Vec<PartDto<'a>>,
}

#[derive(Debug, Serialize)]
pub(super) struct PartDto<'a> {
    pub(super) text: &'a str,
}

impl<'a> GenerateContentRequestDto<'a> {
    pub(super) fn single_prompt(text: &'a str) -> Self {
        Self {
            contents: vec![ContentDto {
                parts: vec![PartDto { text }],
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct GenerateContentResponseDto {
    #[serde(default)]
    pub(super) candidates: Vec<CandidateDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CandidateDto {
    pub(super) content: Option<CandidateContentDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CandidateContentDto {
    #[serde(default)]
    pub(super) parts: Vec<CandidatePartDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CandidatePartDto {
    pub(super) text: Option<String>,
}

impl GenerateContentResponseDto {
    /// Trimmed text of the first part of the first candidate, if non-empty.
    pub(super) fn into_answer(self) -> Option<String> {
        let text = self
            .candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text?;
        let trimmed = text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_owned())
    }
}

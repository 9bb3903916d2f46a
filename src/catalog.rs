use serde::{Deserialize, Serialize};

pub const CATALOG_2015: &str = "curriculum2015";
pub const CATALOG_2022: &str = "curriculum2022";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SubjectChapters {
    pub name: String,
    pub chapters: Vec<String>,
}

/// Static subject -> chapters lookup. Read-only once the store is built;
/// subjects keep the order they were declared in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    subjects: Vec<SubjectChapters>,
}

fn subject(name: &str, chapters: &[&str]) -> SubjectChapters {
    SubjectChapters {
        name: name.to_string(),
        chapters: chapters.iter().map(|c| c.to_string()).collect(),
    }
}

impl Catalog {
    pub fn new(subjects: Vec<SubjectChapters>) -> Self {
        let mut out: Vec<SubjectChapters> = Vec::with_capacity(subjects.len());
        for s in subjects {
            let name = s.name.trim().to_string();
            if name.is_empty() {
                continue;
            }
            let mut chapters: Vec<String> = Vec::with_capacity(s.chapters.len());
            for c in s.chapters {
                let c = c.trim().to_string();
                if !c.is_empty() && !chapters.contains(&c) {
                    chapters.push(c);
                }
            }
            // Later declarations of the same subject win.
            if let Some(existing) = out.iter_mut().find(|e| e.name == name) {
                existing.chapters = chapters;
            } else {
                out.push(SubjectChapters { name, chapters });
            }
        }
        Self { subjects: out }
    }

    pub fn curriculum_2015() -> Self {
        Self::new(vec![
            subject("수학 I", &["지수와 로그", "삼각함수", "수열"]),
            subject("수학 II", &["함수의 극한과 연속", "미분", "적분"]),
            subject("확률과 통계", &["경우의 수", "확률", "통계"]),
            subject(
                "미적분",
                &[
                    "수열의 극한",
                    "함수의 극한과 연속",
                    "다항함수의 미분법",
                    "초월함수의 미분법",
                    "적분법",
                ],
            ),
            subject("기하", &["이차곡선", "평면벡터", "공간도형과 공간좌표"]),
        ])
    }

    pub fn curriculum_2022() -> Self {
        Self::new(vec![
            subject("공통수학1", &["다항식", "방정식과 부등식", "경우의 수", "행렬"]),
            subject("공통수학2", &["도형의 방정식", "집합과 명제", "함수"]),
            subject("수학I", &["지수함수와 로그함수", "삼각함수", "수열"]),
            subject("수학II", &["함수의 극한과 연속", "미분", "적분"]),
            subject("확률과 통계", &["경우의 수", "확률", "통계"]),
            subject("미적분", &["수열의 극한", "미분법", "적분법"]),
            subject("기하", &["이차곡선", "평면벡터", "공간도형과 공간좌표"]),
        ])
    }

    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            CATALOG_2015 => Some(Self::curriculum_2015()),
            CATALOG_2022 => Some(Self::curriculum_2022()),
            _ => None,
        }
    }

    pub fn subjects(&self) -> &[SubjectChapters] {
        &self.subjects
    }

    pub fn chapters(&self, subject: &str) -> Option<&[String]> {
        self.subjects
            .iter()
            .find(|s| s.name == subject)
            .map(|s| s.chapters.as_slice())
    }

    pub fn contains(&self, subject: &str, chapter: &str) -> bool {
        self.chapters(subject)
            .map(|chs| chs.iter().any(|c| c == chapter))
            .unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }
}

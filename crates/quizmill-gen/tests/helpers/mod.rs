//! In-memory repository fakes for pipeline tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use quizmill_core::{
    new_v7, AttemptLog, AttemptLogRepository, Error, NewAttemptLog, QuestionRepository, Result,
    SimilarHit, ValidatedQuestion, Vector,
};
use quizmill_inference::cosine_similarity;

/// Install a test subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

struct StoredQuestion {
    question: ValidatedQuestion,
    vector: Option<Vector>,
}

/// In-memory [`QuestionRepository`] with scriptable failures and
/// scriptable nearest-neighbour results.
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<StoredQuestion>>,
    scripted_nearest: Mutex<VecDeque<Vec<SimilarHit>>>,
    fail_inserts: AtomicBool,
    fail_nearest: AtomicBool,
    fail_recent: AtomicBool,
    fail_attach: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a canned `find_nearest` result; once drained, results are
    /// computed from stored vectors again.
    pub fn push_nearest(&self, hits: Vec<SimilarHit>) {
        self.scripted_nearest.lock().unwrap().push_back(hits);
    }

    pub fn set_fail_inserts(&self, fail: bool) {
        self.fail_inserts.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_nearest(&self, fail: bool) {
        self.fail_nearest.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_recent(&self, fail: bool) {
        self.fail_recent.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_attach(&self, fail: bool) {
        self.fail_attach.store(fail, Ordering::SeqCst);
    }

    /// Seed a stored question directly, bypassing the pipeline.
    pub fn seed(&self, question: ValidatedQuestion) {
        self.rows.lock().unwrap().push(StoredQuestion {
            question,
            vector: None,
        });
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn stored_texts(&self) -> Vec<String> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.question.text.clone())
            .collect()
    }

    pub fn vector_for(&self, id: Uuid) -> Option<Vector> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.question.id == id)
            .and_then(|r| r.vector.clone())
    }
}

#[async_trait]
impl QuestionRepository for MemoryStore {
    async fn insert(&self, question: &ValidatedQuestion) -> Result<Uuid> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(Error::Internal("scripted insert failure".to_string()));
        }
        self.rows.lock().unwrap().push(StoredQuestion {
            question: question.clone(),
            vector: None,
        });
        Ok(question.id)
    }

    async fn fetch(&self, id: Uuid) -> Result<ValidatedQuestion> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.question.id == id)
            .map(|r| r.question.clone())
            .ok_or(Error::QuestionNotFound(id))
    }

    async fn exists(&self, id: Uuid) -> Result<bool> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .any(|r| r.question.id == id))
    }

    async fn list_recent(
        &self,
        topic: Option<&str>,
        limit: i64,
    ) -> Result<Vec<ValidatedQuestion>> {
        if self.fail_recent.load(Ordering::SeqCst) {
            return Err(Error::Internal("scripted list_recent failure".to_string()));
        }
        let mut matching: Vec<ValidatedQuestion> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| topic.map_or(true, |t| r.question.topic == t))
            .map(|r| r.question.clone())
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matching.truncate(limit as usize);
        Ok(matching)
    }

    async fn find_nearest(
        &self,
        query_vec: &Vector,
        k: i64,
        topic: Option<&str>,
    ) -> Result<Vec<SimilarHit>> {
        if let Some(hits) = self.scripted_nearest.lock().unwrap().pop_front() {
            return Ok(hits);
        }
        if self.fail_nearest.load(Ordering::SeqCst) {
            return Err(Error::Internal("scripted find_nearest failure".to_string()));
        }
        let mut hits: Vec<SimilarHit> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| topic.map_or(true, |t| r.question.topic == t))
            .filter_map(|r| {
                r.vector.as_ref().map(|v| SimilarHit {
                    question_id: r.question.id,
                    score: cosine_similarity(query_vec.as_slice(), v.as_slice()),
                })
            })
            .collect();
        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        hits.truncate(k as usize);
        Ok(hits)
    }

    async fn attach_embedding(
        &self,
        question_id: Uuid,
        vector: &Vector,
        _model: &str,
    ) -> Result<()> {
        if self.fail_attach.load(Ordering::SeqCst) {
            return Err(Error::Internal("scripted attach failure".to_string()));
        }
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|r| r.question.id == question_id)
            .ok_or(Error::QuestionNotFound(question_id))?;
        row.vector = Some(vector.clone());
        Ok(())
    }
}

/// In-memory append-only [`AttemptLogRepository`].
#[derive(Default)]
pub struct MemoryAttemptLog {
    rows: Mutex<Vec<AttemptLog>>,
    fail_appends: AtomicBool,
}

impl MemoryAttemptLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_appends(&self, fail: bool) {
        self.fail_appends.store(fail, Ordering::SeqCst);
    }

    /// All rows in append order.
    pub fn entries(&self) -> Vec<AttemptLog> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl AttemptLogRepository for MemoryAttemptLog {
    async fn append(&self, entry: NewAttemptLog) -> Result<Uuid> {
        if self.fail_appends.load(Ordering::SeqCst) {
            return Err(Error::Internal("scripted append failure".to_string()));
        }
        let id = new_v7();
        self.rows.lock().unwrap().push(AttemptLog {
            id,
            prompt: entry.prompt,
            params: entry.params,
            model: entry.model,
            response: entry.response,
            success: entry.success,
            error: entry.error,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<AttemptLog>> {
        let mut rows = self.rows.lock().unwrap().clone();
        rows.reverse();
        rows.truncate(limit as usize);
        Ok(rows)
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.rows.lock().unwrap().len() as i64)
    }
}

/// Build a seeded question for fingerprint tests.
pub fn seeded_question(topic: &str, text: &str, choices: &[&str]) -> ValidatedQuestion {
    ValidatedQuestion {
        id: new_v7(),
        topic: topic.to_string(),
        difficulty: "beginner".to_string(),
        text: text.to_string(),
        choices: choices.iter().map(|c| c.to_string()).collect(),
        correct_answer: choices[0].to_string(),
        explanation: None,
        estimated_time_seconds: 60,
        metadata: serde_json::json!({}),
        created_at: Utc::now(),
    }
}

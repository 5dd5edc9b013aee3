//! Session orchestration.
//!
//! One [`SessionController`] per play session. It owns every sub-component
//! and is the only writer of shared state; all operations run synchronously
//! to completion. The optional per-question countdown is a host-driven tick,
//! disarmed on every completing transition so a stale tick is a no-op.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::countries::CountryProvider;
use crate::error::{GameError, Result};
use crate::ledger::{ScoreEntry, ScoreLedger};
use crate::matching::AnswerMatcher;
use crate::progress::{DetailedProgress, ProgressAnalyzer, ProgressDisplay};
use crate::question::QuestionState;
use crate::scoring::policy_for;
use crate::types::{Country, GameConfig, GameStatus, QuizCategory};

/// Outcome handed back after an answer submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerOutcome {
    pub is_correct: bool,
    pub is_close: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    pub points_awarded: u32,
}

/// Plain-data snapshot of the running game for a presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub current_country: Option<Country>,
    pub current_score: u32,
    pub hints_used: usize,
    pub status: GameStatus,
    pub total_questions: u32,
    pub category: QuizCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_remaining: Option<u32>,
}

/// View of the live question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionView {
    pub country: Country,
    pub category: QuizCategory,
    pub question_text: String,
    pub correct_answer: String,
    pub hints_revealed: Vec<String>,
    pub hints_remaining: usize,
    pub attempts: Vec<String>,
}

/// Sealed record of a finished session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    pub session_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub questions: Vec<ScoreEntry>,
    pub final_score: u32,
    pub max_possible_score: u32,
    pub completed_at: DateTime<Utc>,
}

/// Invoked with the remaining seconds after every countdown tick.
pub type TimerCallback = Box<dyn FnMut(u32)>;

/// Orchestrates one play session end to end.
pub struct SessionController<P: CountryProvider> {
    provider: P,
    config: GameConfig,
    matcher: AnswerMatcher,
    questions: QuestionState,
    ledger: ScoreLedger,
    rng: SmallRng,
    used_countries: HashSet<String>,

    status: GameStatus,
    current_country: Option<Country>,
    current_score: u32,
    hints_used: usize,
    total_questions: u32,
    category: QuizCategory,

    time_remaining: Option<u32>,
    timer_armed: bool,
    on_timer_update: Option<TimerCallback>,

    session_id: Uuid,
    start_time: DateTime<Utc>,
}

impl<P: CountryProvider> SessionController<P> {
    pub fn new(provider: P, config: GameConfig) -> Self {
        Self::with_rng(provider, config, SmallRng::from_os_rng())
    }

    /// Construct with a caller-supplied rng, for deterministic selection.
    pub fn with_rng(provider: P, config: GameConfig, rng: SmallRng) -> Self {
        let matcher = AnswerMatcher {
            close_threshold: config.close_threshold,
            min_close_len: config.min_close_len,
        };
        let ledger = ScoreLedger::new(policy_for(config.scoring));

        Self {
            provider,
            config,
            matcher,
            questions: QuestionState::new(),
            ledger,
            rng,
            used_countries: HashSet::new(),
            status: GameStatus::Waiting,
            current_country: None,
            current_score: 0,
            hints_used: 0,
            total_questions: 0,
            category: QuizCategory::default(),
            time_remaining: None,
            timer_armed: false,
            on_timer_update: None,
            session_id: Uuid::new_v4(),
            start_time: Utc::now(),
        }
    }

    /// Reset everything, move to Playing and serve the first question.
    pub fn start_game(&mut self, category: QuizCategory) -> Result<()> {
        self.reset();
        self.category = category;
        self.status = GameStatus::Playing;
        self.session_id = Uuid::new_v4();
        self.start_time = Utc::now();
        self.next_question()
    }

    /// Serve the next question, avoiding recently-used countries.
    pub fn next_question(&mut self) -> Result<()> {
        if self.status != GameStatus::Playing {
            return Err(GameError::NotPlaying);
        }

        self.cancel_timer();
        let country = self.select_next_country()?;
        self.current_country = Some(country.clone());
        self.total_questions += 1;
        self.hints_used = 0;

        let category = self.resolve_category();
        self.questions.create_question(country, category);

        if let Some(limit) = self.config.time_limit {
            self.time_remaining = Some(limit);
            self.timer_armed = true;
        }
        Ok(())
    }

    /// Validate a submission against the live question.
    ///
    /// Blank input is rejected as data without consuming an attempt. A
    /// correct answer finalizes the question, records the score and cancels
    /// any countdown.
    pub fn submit_answer(&mut self, user_input: &str) -> Result<AnswerOutcome> {
        if self.status != GameStatus::Playing {
            return Err(GameError::NotPlaying);
        }
        let country_name = self
            .current_country
            .as_ref()
            .map(|c| c.name.clone())
            .ok_or(GameError::NoActiveQuestion)?;

        if !self.matcher.is_valid_input(user_input) {
            return Ok(AnswerOutcome {
                is_correct: false,
                is_close: false,
                message: "Please enter a valid answer.".to_string(),
                suggestion: None,
                points_awarded: 0,
            });
        }

        let correct_answer = self
            .questions
            .current()
            .map(|q| q.correct_answer.clone())
            .ok_or(GameError::NoActiveQuestion)?;
        let validation = self.matcher.validate(user_input, &correct_answer);
        self.questions.add_attempt(user_input)?;

        if !validation.is_correct {
            return Ok(AnswerOutcome {
                is_correct: false,
                is_close: validation.is_close,
                message: validation.message,
                suggestion: validation.suggestion,
                points_awarded: 0,
            });
        }

        let time_used = self.elapsed_time();
        let points = self
            .questions
            .complete_question(true, self.ledger.policy(), time_used)?;
        self.ledger
            .record(&country_name, self.hints_used, true, time_used);
        self.current_score = self.ledger.current_score();
        self.cancel_timer();

        Ok(AnswerOutcome {
            is_correct: true,
            is_close: false,
            message: validation.message,
            suggestion: None,
            points_awarded: points,
        })
    }

    /// Reveal the next hint. `Ok(None)` when the catalog is exhausted.
    pub fn request_hint(&mut self) -> Result<Option<String>> {
        if self.status != GameStatus::Playing {
            return Err(GameError::NotPlaying);
        }

        let hint = self.questions.request_hint()?;
        if hint.is_some() {
            self.hints_used = self.questions.hints_used();
        }
        Ok(hint)
    }

    /// Finalize the current question as incorrect and record it.
    pub fn skip_question(&mut self) -> Result<()> {
        if self.status != GameStatus::Playing {
            return Err(GameError::NotPlaying);
        }
        let country_name = self
            .current_country
            .as_ref()
            .map(|c| c.name.clone())
            .ok_or(GameError::NoActiveQuestion)?;

        let time_used = self.elapsed_time();
        self.questions
            .complete_question(false, self.ledger.policy(), time_used)?;
        self.ledger
            .record(&country_name, self.hints_used, false, time_used);
        self.current_score = self.ledger.current_score();
        self.cancel_timer();
        Ok(())
    }

    /// Seal the session and build its summary from the ledger.
    pub fn end_game(&mut self) -> Result<GameSession> {
        if self.status == GameStatus::Ended {
            return Err(GameError::GameAlreadyEnded);
        }

        self.status = GameStatus::Ended;
        self.cancel_timer();

        Ok(GameSession {
            session_id: self.session_id,
            start_time: self.start_time,
            questions: self.ledger.history().to_vec(),
            final_score: self.ledger.current_score(),
            max_possible_score: self.ledger.max_possible_score(),
            completed_at: Utc::now(),
        })
    }

    /// Register the callback fired with the remaining seconds on each tick.
    pub fn set_timer_callback(&mut self, callback: TimerCallback) {
        self.on_timer_update = Some(callback);
    }

    /// Advance the countdown by one second. The host calls this once per
    /// elapsed time unit while the timed variant is active.
    ///
    /// A tick after the question completed (or outside Playing) is a no-op:
    /// completion disarms the countdown synchronously. Reaching zero
    /// force-finalizes the question as incorrect through the skip path.
    pub fn tick(&mut self) -> Result<Option<u32>> {
        if !self.timer_armed {
            return Ok(None);
        }
        if self.status != GameStatus::Playing {
            self.timer_armed = false;
            return Ok(None);
        }

        let remaining = self.time_remaining.unwrap_or(0).saturating_sub(1);
        self.time_remaining = Some(remaining);
        if let Some(callback) = self.on_timer_update.as_mut() {
            callback(remaining);
        }

        if remaining == 0 {
            self.skip_question()?;
        }
        Ok(Some(remaining))
    }

    pub fn is_playing(&self) -> bool {
        self.status == GameStatus::Playing
    }

    pub fn has_ended(&self) -> bool {
        self.status == GameStatus::Ended
    }

    pub fn has_more_hints(&self) -> bool {
        self.questions.has_more_hints()
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn game_snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            current_country: self.current_country.clone(),
            current_score: self.current_score,
            hints_used: self.hints_used,
            status: self.status,
            total_questions: self.total_questions,
            category: self.category,
            time_remaining: self.time_remaining,
        }
    }

    pub fn question_view(&self) -> Option<QuestionView> {
        self.questions.current().map(|q| QuestionView {
            country: q.country.clone(),
            category: q.category,
            question_text: q.question_text.clone(),
            correct_answer: q.correct_answer.clone(),
            hints_revealed: q.hints_revealed.clone(),
            hints_remaining: self.questions.hints_remaining(),
            attempts: q.attempts.clone(),
        })
    }

    pub fn progress(&self) -> ProgressDisplay {
        ProgressAnalyzer::new(&self.ledger, &self.config).progress_display()
    }

    pub fn detailed_progress(&self) -> DetailedProgress {
        ProgressAnalyzer::new(&self.ledger, &self.config).detailed_progress()
    }

    pub fn achievement_notifications(&self) -> Vec<String> {
        ProgressAnalyzer::new(&self.ledger, &self.config).achievements()
    }

    pub fn progress_summary(&self) -> String {
        ProgressAnalyzer::new(&self.ledger, &self.config).progress_summary()
    }

    pub fn session_summary(&self) -> String {
        self.ledger.summary()
    }

    fn reset(&mut self) {
        self.questions.reset();
        self.ledger.reset();
        self.used_countries.clear();
        self.status = GameStatus::Waiting;
        self.current_country = None;
        self.current_score = 0;
        self.hints_used = 0;
        self.total_questions = 0;
        self.time_remaining = None;
        self.cancel_timer();
    }

    fn cancel_timer(&mut self) {
        self.timer_armed = false;
    }

    /// Seconds spent on the current question, when a countdown is running.
    fn elapsed_time(&self) -> Option<u32> {
        self.config.time_limit.map(|limit| {
            limit.saturating_sub(self.time_remaining.unwrap_or(limit))
        })
    }

    fn resolve_category(&mut self) -> QuizCategory {
        if self.category != QuizCategory::Random {
            return self.category;
        }
        match self.rng.random_range(0..3) {
            0 => QuizCategory::CountryToCapital,
            1 => QuizCategory::CapitalToCountry,
            _ => QuizCategory::FlagToCountry,
        }
    }

    /// Uniform draw avoiding the recently-used window. The window is cleared
    /// once it outgrows the cap, or after too many failed draws, so the loop
    /// always terminates.
    fn select_next_country(&mut self) -> Result<Country> {
        let mut attempts = 0u32;
        loop {
            let country = self
                .provider
                .random(&mut self.rng)
                .ok_or(GameError::NoCountriesAvailable)?
                .clone();
            attempts += 1;

            if self.used_countries.len() > self.config.recent_country_cap
                || attempts > self.config.selection_retry_cap
            {
                self.used_countries.clear();
                self.used_countries.insert(country.name.clone());
                return Ok(country);
            }

            if !self.used_countries.contains(&country.name) {
                self.used_countries.insert(country.name.clone());
                return Ok(country);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::countries::StaticCountries;
    use crate::types::ScoringScheme;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn controller() -> SessionController<StaticCountries> {
        SessionController::with_rng(
            StaticCountries::default(),
            GameConfig::default(),
            SmallRng::seed_from_u64(42),
        )
    }

    fn timed_controller() -> SessionController<StaticCountries> {
        let config = GameConfig {
            scoring: ScoringScheme::TimeWeighted,
            time_limit: Some(10),
            ..GameConfig::default()
        };
        SessionController::with_rng(
            StaticCountries::default(),
            config,
            SmallRng::seed_from_u64(42),
        )
    }

    fn correct_answer(controller: &SessionController<StaticCountries>) -> String {
        controller.question_view().unwrap().correct_answer
    }

    #[test]
    fn start_game_serves_the_first_question() {
        let mut game = controller();
        game.start_game(QuizCategory::CountryToCapital).unwrap();

        assert!(game.is_playing());
        let snapshot = game.game_snapshot();
        assert_eq!(snapshot.status, GameStatus::Playing);
        assert_eq!(snapshot.total_questions, 1);
        assert!(snapshot.current_country.is_some());
        assert!(game.question_view().is_some());
    }

    #[test]
    fn operations_fail_before_start() {
        let mut game = controller();
        assert_eq!(game.next_question(), Err(GameError::NotPlaying));
        assert_eq!(game.submit_answer("Paris"), Err(GameError::NotPlaying));
        assert_eq!(game.request_hint(), Err(GameError::NotPlaying));
        assert_eq!(game.skip_question(), Err(GameError::NotPlaying));
    }

    #[test]
    fn blank_input_is_rejected_without_an_attempt() {
        let mut game = controller();
        game.start_game(QuizCategory::CountryToCapital).unwrap();

        let outcome = game.submit_answer("   ").unwrap();
        assert!(!outcome.is_correct);
        assert_eq!(outcome.message, "Please enter a valid answer.");
        assert!(game.question_view().unwrap().attempts.is_empty());
    }

    #[test]
    fn correct_answer_scores_and_completes() {
        let mut game = controller();
        game.start_game(QuizCategory::CountryToCapital).unwrap();

        let answer = correct_answer(&game);
        let outcome = game.submit_answer(&answer).unwrap();
        assert!(outcome.is_correct);
        assert_eq!(outcome.points_awarded, 3);
        assert_eq!(game.game_snapshot().current_score, 3);
        assert_eq!(game.progress().questions_answered, 1);
    }

    #[test]
    fn wrong_answer_keeps_the_question_open() {
        let mut game = controller();
        game.start_game(QuizCategory::CountryToCapital).unwrap();

        let outcome = game.submit_answer("definitely wrong").unwrap();
        assert!(!outcome.is_correct);
        assert_eq!(outcome.points_awarded, 0);
        assert_eq!(game.question_view().unwrap().attempts.len(), 1);
        assert_eq!(game.progress().questions_answered, 0);

        // Still answerable afterwards.
        let answer = correct_answer(&game);
        assert!(game.submit_answer(&answer).unwrap().is_correct);
    }

    #[test]
    fn hints_reduce_the_award() {
        let mut game = controller();
        game.start_game(QuizCategory::CountryToCapital).unwrap();

        game.request_hint().unwrap().unwrap();
        let answer = correct_answer(&game);
        let outcome = game.submit_answer(&answer).unwrap();
        assert_eq!(outcome.points_awarded, 2);
    }

    #[test]
    fn hint_counter_stops_at_catalog_exhaustion() {
        let mut game = controller();
        game.start_game(QuizCategory::CountryToCapital).unwrap();

        for _ in 0..3 {
            assert!(game.request_hint().unwrap().is_some());
        }
        assert_eq!(game.request_hint().unwrap(), None);
        assert_eq!(game.game_snapshot().hints_used, 3);
        assert!(!game.has_more_hints());
    }

    #[test]
    fn skip_records_an_incorrect_entry_with_hints_used() {
        let mut game = controller();
        game.start_game(QuizCategory::CountryToCapital).unwrap();

        game.request_hint().unwrap();
        game.skip_question().unwrap();

        let detailed = game.detailed_progress();
        let last = &detailed.recent_performance.last_five_questions[0];
        assert!(!last.is_correct);
        assert_eq!(last.hints_used, 1);
        assert_eq!(last.points_awarded, 0);
    }

    #[test]
    fn double_skip_hits_the_completed_guard() {
        let mut game = controller();
        game.start_game(QuizCategory::CountryToCapital).unwrap();
        game.skip_question().unwrap();
        assert_eq!(game.skip_question(), Err(GameError::QuestionCompleted));
    }

    #[test]
    fn end_game_seals_the_session() {
        let mut game = controller();
        game.start_game(QuizCategory::CountryToCapital).unwrap();
        let answer = correct_answer(&game);
        game.submit_answer(&answer).unwrap();

        let session = game.end_game().unwrap();
        assert_eq!(session.final_score, 3);
        assert_eq!(session.max_possible_score, 3);
        assert_eq!(session.questions.len(), 1);
        assert!(game.has_ended());

        assert_eq!(game.end_game().unwrap_err(), GameError::GameAlreadyEnded);
        assert_eq!(game.submit_answer("Paris"), Err(GameError::NotPlaying));
    }

    #[test]
    fn restarting_resets_all_state() {
        let mut game = controller();
        game.start_game(QuizCategory::CountryToCapital).unwrap();
        let answer = correct_answer(&game);
        game.submit_answer(&answer).unwrap();
        game.end_game().unwrap();

        let first_id = game.session_id();
        game.start_game(QuizCategory::CapitalToCountry).unwrap();
        assert!(game.is_playing());
        assert_ne!(game.session_id(), first_id);
        let snapshot = game.game_snapshot();
        assert_eq!(snapshot.current_score, 0);
        assert_eq!(snapshot.total_questions, 1);
        assert_eq!(snapshot.category, QuizCategory::CapitalToCountry);
    }

    #[test]
    fn selection_avoids_repeats_within_the_window() {
        let mut game = controller();
        game.start_game(QuizCategory::CountryToCapital).unwrap();

        // 23 built-in countries, window cap 15: the first 16 questions must
        // all feature distinct countries.
        let mut served = vec![game.game_snapshot().current_country.unwrap().name];
        for _ in 0..15 {
            game.skip_question().unwrap();
            game.next_question().unwrap();
            served.push(game.game_snapshot().current_country.unwrap().name);
        }
        let before = served.len();
        served.sort_unstable();
        served.dedup();
        assert_eq!(served.len(), before);
    }

    #[test]
    fn random_category_resolves_to_a_concrete_one() {
        let config = GameConfig::default();
        let mut game = SessionController::with_rng(
            StaticCountries::default(),
            config,
            SmallRng::seed_from_u64(7),
        );
        game.start_game(QuizCategory::Random).unwrap();

        for _ in 0..10 {
            let question = game.question_view().unwrap();
            assert_ne!(question.category, QuizCategory::Random);
            game.skip_question().unwrap();
            game.next_question().unwrap();
        }
        // The session-level category stays Random.
        assert_eq!(game.game_snapshot().category, QuizCategory::Random);
    }

    #[test]
    fn countdown_ticks_fire_the_callback_and_expire() {
        let mut game = timed_controller();
        let seen: Rc<RefCell<Vec<u32>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        game.set_timer_callback(Box::new(move |remaining| {
            sink.borrow_mut().push(remaining);
        }));
        game.start_game(QuizCategory::CountryToCapital).unwrap();

        for _ in 0..10 {
            game.tick().unwrap();
        }

        assert_eq!(*seen.borrow(), (0..10).rev().collect::<Vec<u32>>());
        // Expiry finalized the question as incorrect.
        let entry = game.detailed_progress().recent_performance.last_five_questions[0].clone();
        assert!(!entry.is_correct);
        assert_eq!(game.progress().questions_answered, 1);
    }

    #[test]
    fn stale_tick_after_completion_is_a_no_op() {
        let mut game = timed_controller();
        game.start_game(QuizCategory::CountryToCapital).unwrap();

        game.tick().unwrap();
        let answer = correct_answer(&game);
        game.submit_answer(&answer).unwrap();

        // Completion disarmed the countdown; a late tick changes nothing.
        assert_eq!(game.tick().unwrap(), None);
        assert_eq!(game.progress().questions_answered, 1);
    }

    #[test]
    fn timed_scoring_rewards_fast_answers() {
        let mut game = timed_controller();
        game.start_game(QuizCategory::CountryToCapital).unwrap();

        let answer = correct_answer(&game);
        let outcome = game.submit_answer(&answer).unwrap();
        // No ticks elapsed: base 2 + full bonus 5.
        assert_eq!(outcome.points_awarded, 7);

        game.next_question().unwrap();
        for _ in 0..4 {
            game.tick().unwrap();
        }
        let answer = correct_answer(&game);
        let outcome = game.submit_answer(&answer).unwrap();
        // 4 seconds used: 2 + round(5 * 6/10) = 5.
        assert_eq!(outcome.points_awarded, 5);
    }

    #[test]
    fn next_question_rearms_the_countdown() {
        let mut game = timed_controller();
        game.start_game(QuizCategory::CountryToCapital).unwrap();
        game.tick().unwrap();
        game.skip_question().unwrap();

        game.next_question().unwrap();
        assert_eq!(game.game_snapshot().time_remaining, Some(10));
        assert_eq!(game.tick().unwrap(), Some(9));
    }
}

//! Streaks, achievements and performance trend derived from the ledger.
//!
//! Nothing here is stateful: every call recomputes from the ledger's current
//! history, so notifications reflect exactly the most recent entry.

use serde::{Deserialize, Serialize};

use crate::ledger::{round2, ScoreEntry, ScoreLedger};
use crate::types::GameConfig;

/// Which kind of run ends at the most recent entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakType {
    /// Every recent correct answer was hint-free.
    Perfect,
    Correct,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakInfo {
    pub current: u32,
    pub best: u32,
    pub streak_type: StreakType,
}

/// Progress snapshot for a score display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressDisplay {
    pub current_score: u32,
    pub max_possible_score: u32,
    pub questions_answered: u32,
    pub score_percentage: f64,
    pub last_question_points: Option<u32>,
    pub streak: StreakInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentPerformance {
    pub last_five_questions: Vec<ScoreEntry>,
    pub recent_accuracy: f64,
    pub recent_average_hints: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementStats {
    pub perfect_answers: u32,
    /// Best run of correct, hint-free answers anywhere in history.
    pub no_hint_streak: u32,
    pub total_correct: u32,
    pub efficiency: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedProgress {
    pub overall: ProgressDisplay,
    pub recent_performance: RecentPerformance,
    pub achievements: AchievementStats,
}

/// Short-term direction of the player's scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceTrend {
    Improving,
    Declining,
    Stable,
    InsufficientData,
}

/// Read-only analysis over a ledger.
pub struct ProgressAnalyzer<'a> {
    ledger: &'a ScoreLedger,
    config: &'a GameConfig,
}

impl<'a> ProgressAnalyzer<'a> {
    pub fn new(ledger: &'a ScoreLedger, config: &'a GameConfig) -> Self {
        Self { ledger, config }
    }

    /// Current and best streaks.
    ///
    /// The current correct streak counts backwards from the most recent
    /// entry until an incorrect one. Within that run, the perfect streak
    /// counts hint-free answers but resets to zero when a correct-with-hints
    /// entry interrupts an otherwise perfect run; the correct streak keeps
    /// going. The reported type is perfect only when the entire current
    /// correct run is hint-free.
    pub fn streak(&self) -> StreakInfo {
        let history = self.ledger.history();
        if history.is_empty() {
            return StreakInfo {
                current: 0,
                best: 0,
                streak_type: StreakType::None,
            };
        }

        let mut current_correct = 0u32;
        let mut current_perfect = 0u32;
        for entry in history.iter().rev() {
            if !entry.is_correct {
                break;
            }
            current_correct += 1;
            if entry.hints_used == 0 {
                current_perfect += 1;
            } else if current_perfect == current_correct - 1 {
                current_perfect = 0;
            }
        }

        let mut best_correct = 0u32;
        let mut best_perfect = 0u32;
        let mut run_correct = 0u32;
        let mut run_perfect = 0u32;
        for entry in history {
            if entry.is_correct {
                run_correct += 1;
                best_correct = best_correct.max(run_correct);
                if entry.hints_used == 0 {
                    run_perfect += 1;
                    best_perfect = best_perfect.max(run_perfect);
                } else {
                    run_perfect = 0;
                }
            } else {
                run_correct = 0;
                run_perfect = 0;
            }
        }

        if current_perfect > 0 && current_perfect == current_correct {
            StreakInfo {
                current: current_perfect,
                best: best_perfect,
                streak_type: StreakType::Perfect,
            }
        } else if current_correct > 0 {
            StreakInfo {
                current: current_correct,
                best: best_correct,
                streak_type: StreakType::Correct,
            }
        } else {
            StreakInfo {
                current: 0,
                best: 0,
                streak_type: StreakType::None,
            }
        }
    }

    /// Notifications earned as of the most recent entry. Recomputed fresh on
    /// every call, never stored.
    pub fn achievements(&self) -> Vec<String> {
        let mut notifications = Vec::new();
        let Some(last) = self.ledger.last_entry() else {
            return notifications;
        };

        if last.is_correct && last.hints_used == 0 {
            notifications.push("🎯 Perfect Answer! No hints needed!".to_string());
        }

        let streak = self.streak();
        if streak.current > 1 {
            match streak.streak_type {
                StreakType::Perfect if streak.current >= self.config.perfect_streak_notice => {
                    notifications.push(format!("🔥 Perfect Streak: {} in a row!", streak.current));
                }
                StreakType::Correct if streak.current >= self.config.correct_streak_notice => {
                    notifications.push(format!("⭐ Correct Streak: {} in a row!", streak.current));
                }
                _ => {}
            }
        }

        let stats = self.ledger.stats();
        // Exact equality: a milestone fires once, on the entry that reaches it.
        if self.config.milestones.contains(&stats.total_questions) {
            notifications.push(format!(
                "🏆 Milestone: {} questions completed!",
                stats.total_questions
            ));
        }

        if stats.total_questions >= 5 && stats.score_percentage >= 90.0 {
            notifications.push("💎 High Efficiency: 90%+ score rate!".to_string());
        }

        notifications
    }

    pub fn has_notable_streak(&self) -> bool {
        let streak = self.streak();
        match streak.streak_type {
            StreakType::Perfect => streak.current >= self.config.perfect_streak_notice,
            StreakType::Correct => streak.current >= self.config.correct_streak_notice,
            StreakType::None => false,
        }
    }

    /// Mean points of the last three entries against the preceding three.
    pub fn trend(&self) -> PerformanceTrend {
        let history = self.ledger.history();
        if history.len() < 6 {
            return PerformanceTrend::InsufficientData;
        }

        let mean = |entries: &[ScoreEntry]| {
            entries.iter().map(|e| e.points_awarded as f64).sum::<f64>() / entries.len() as f64
        };
        let recent = mean(&history[history.len() - 3..]);
        let previous = mean(&history[history.len() - 6..history.len() - 3]);
        let difference = recent - previous;

        if difference.abs() < self.config.trend_stability_band {
            PerformanceTrend::Stable
        } else if difference > 0.0 {
            PerformanceTrend::Improving
        } else {
            PerformanceTrend::Declining
        }
    }

    pub fn progress_display(&self) -> ProgressDisplay {
        let stats = self.ledger.stats();
        ProgressDisplay {
            current_score: stats.total_score,
            max_possible_score: self.ledger.max_possible_score(),
            questions_answered: stats.total_questions,
            score_percentage: stats.score_percentage,
            last_question_points: self.ledger.last_entry().map(|e| e.points_awarded),
            streak: self.streak(),
        }
    }

    pub fn detailed_progress(&self) -> DetailedProgress {
        let history = self.ledger.history();
        let stats = self.ledger.stats();

        let start = history.len().saturating_sub(5);
        let last_five = &history[start..];
        let recent_correct = last_five.iter().filter(|e| e.is_correct).count();
        let recent_hints: usize = last_five.iter().map(|e| e.hints_used).sum();
        let (recent_accuracy, recent_average_hints) = if last_five.is_empty() {
            (0.0, 0.0)
        } else {
            (
                recent_correct as f64 / last_five.len() as f64 * 100.0,
                recent_hints as f64 / last_five.len() as f64,
            )
        };

        DetailedProgress {
            overall: self.progress_display(),
            recent_performance: RecentPerformance {
                last_five_questions: last_five.to_vec(),
                recent_accuracy: round2(recent_accuracy),
                recent_average_hints: round2(recent_average_hints),
            },
            achievements: AchievementStats {
                perfect_answers: stats.perfect_answers,
                no_hint_streak: self.best_no_hint_streak(),
                total_correct: stats.correct_answers,
                efficiency: round2(self.ledger.efficiency()),
            },
        }
    }

    /// One-line progress summary for display.
    pub fn progress_summary(&self) -> String {
        let progress = self.progress_display();
        if progress.questions_answered == 0 {
            return "Ready to start! Answer questions to track your progress.".to_string();
        }

        let mut parts = vec![
            format!(
                "Score: {}/{} ({}%)",
                progress.current_score, progress.max_possible_score, progress.score_percentage
            ),
            format!("Questions: {}", progress.questions_answered),
        ];

        if let Some(points) = progress.last_question_points {
            parts.push(format!("Last Question: +{points} points"));
        }

        if progress.streak.current > 0 {
            let label = match progress.streak.streak_type {
                StreakType::Perfect => "Perfect",
                _ => "Correct",
            };
            parts.push(format!("{} Streak: {}", label, progress.streak.current));
        }

        parts.join(" | ")
    }

    fn best_no_hint_streak(&self) -> u32 {
        let mut best = 0u32;
        let mut run = 0u32;
        for entry in self.ledger.history() {
            if entry.is_correct && entry.hints_used == 0 {
                run += 1;
                best = best.max(run);
            } else {
                run = 0;
            }
        }
        best
    }
}
